//! Bucket cache keys
//!
//! The caching bucket layer encodes every cacheable object-store call as a
//! flat string key:
//!
//! ```text
//! attrs:{name}
//! iter:{name}
//! content:{name}
//! exists:{name}
//! subrange:{name}:{start}:{end}
//! ```
//!
//! Fields are separated by `:` with no escaping, so object names containing
//! `:` cannot be represented.

use crate::errors::DomainError;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

const SEPARATOR: char = ':';

/// Backend operation a cache key stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Attributes,
    List,
    Content,
    Exists,
    Subrange,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Attributes,
        Operation::List,
        Operation::Content,
        Operation::Exists,
        Operation::Subrange,
    ];

    /// Verb token used in the key wire format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attributes => "attrs",
            Self::List => "iter",
            Self::Content => "content",
            Self::Exists => "exists",
            Self::Subrange => "subrange",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attrs" => Ok(Self::Attributes),
            "iter" => Ok(Self::List),
            "content" => Ok(Self::Content),
            "exists" => Ok(Self::Exists),
            "subrange" => Ok(Self::Subrange),
            other => Err(DomainError::UnknownOperation(other.to_string())),
        }
    }
}

/// Half-open byte range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteRange {
    start: u64,
    end: u64,
}

impl ByteRange {
    pub fn new(start: u64, end: u64) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::InvalidRange(format!(
                "start {} is past end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Decoded form of a bucket cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKeyDescriptor {
    operation: Operation,
    name: Arc<str>,
    range: Option<ByteRange>,
}

impl CacheKeyDescriptor {
    pub fn attributes(name: &str) -> Result<Self, DomainError> {
        Self::without_range(Operation::Attributes, name)
    }

    pub fn list(name: &str) -> Result<Self, DomainError> {
        Self::without_range(Operation::List, name)
    }

    pub fn content(name: &str) -> Result<Self, DomainError> {
        Self::without_range(Operation::Content, name)
    }

    pub fn exists(name: &str) -> Result<Self, DomainError> {
        Self::without_range(Operation::Exists, name)
    }

    pub fn subrange(name: &str, start: u64, end: u64) -> Result<Self, DomainError> {
        validate_name(name)?;
        Ok(Self {
            operation: Operation::Subrange,
            name: Arc::from(name),
            range: Some(ByteRange::new(start, end)?),
        })
    }

    fn without_range(operation: Operation, name: &str) -> Result<Self, DomainError> {
        validate_name(name)?;
        Ok(Self {
            operation,
            name: Arc::from(name),
            range: None,
        })
    }

    /// Decodes a raw key. Any deviation from the grammar is an error; a
    /// partially understood key never yields a descriptor.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let fields: Vec<&str> = raw.split(SEPARATOR).collect();
        if fields.len() < 2 {
            return Err(DomainError::InvalidCacheKey(raw.to_string()));
        }

        let operation: Operation = fields[0].parse()?;

        if operation == Operation::Subrange {
            if fields.len() != 4 {
                return Err(DomainError::InvalidCacheKey(raw.to_string()));
            }
            let start = parse_offset(fields[2], raw)?;
            let end = parse_offset(fields[3], raw)?;
            return Ok(Self {
                operation,
                name: Arc::from(fields[1]),
                range: Some(ByteRange::new(start, end)?),
            });
        }

        if fields.len() != 2 {
            return Err(DomainError::InvalidCacheKey(raw.to_string()));
        }

        Ok(Self {
            operation,
            name: Arc::from(fields[1]),
            range: None,
        })
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Present only for [`Operation::Subrange`].
    pub fn range(&self) -> Option<ByteRange> {
        self.range
    }
}

impl FromStr for CacheKeyDescriptor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CacheKeyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.range {
            Some(range) => write!(
                f,
                "{}{sep}{}{sep}{}{sep}{}",
                self.operation,
                self.name,
                range.start,
                range.end,
                sep = SEPARATOR
            ),
            None => write!(f, "{}{}{}", self.operation, SEPARATOR, self.name),
        }
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.contains(SEPARATOR) {
        return Err(DomainError::InvalidCacheKey(format!(
            "object name '{}' contains '{}'",
            name, SEPARATOR
        )));
    }
    Ok(())
}

fn parse_offset(field: &str, raw: &str) -> Result<u64, DomainError> {
    field
        .parse::<u64>()
        .map_err(|e| DomainError::InvalidRange(format!("'{}' in key '{}': {}", field, raw, e)))
}
