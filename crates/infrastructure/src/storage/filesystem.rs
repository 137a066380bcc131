//! Object store backed by a local directory
//!
//! Object names are `/`-separated paths relative to the root directory.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ferrous_galaxy_application::ports::{NameStream, ObjectReader, ObjectStore};
use ferrous_galaxy_domain::{DomainError, ObjectAttributes};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::io::{ErrorKind, SeekFrom};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tracing::debug;

pub struct FilesystemObjectStore {
    root: PathBuf,
}

impl FilesystemObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, operation: &str, name: &str) -> Result<PathBuf, DomainError> {
        let relative = Path::new(name.trim_start_matches('/'));
        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => {
                    return Err(DomainError::InvalidObjectName(format!(
                        "{} '{}': path escapes the bucket root",
                        operation, name
                    )))
                }
            }
        }
        Ok(self.root.join(relative))
    }

    async fn list(&self, dir: &str) -> Result<Vec<String>, DomainError> {
        let path = self.resolve("iter", dir)?;

        let mut entries = match fs::read_dir(&path).await {
            Ok(entries) => entries,
            // A prefix with no objects under it lists as empty.
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(backend("iter", dir, e)),
        };

        let prefix = match dir.trim_matches('/') {
            "" => String::new(),
            trimmed => format!("{}/", trimmed),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| backend("iter", dir, e))? {
            let file_type = entry.file_type().await.map_err(|e| backend("iter", dir, e))?;
            let entry_name = entry.file_name().to_string_lossy().into_owned();
            if file_type.is_dir() {
                names.push(format!("{}{}/", prefix, entry_name));
            } else {
                names.push(format!("{}{}", prefix, entry_name));
            }
        }
        names.sort();

        debug!(dir = %dir, count = names.len(), "Listed directory");
        Ok(names)
    }

    async fn open(&self, operation: &str, name: &str) -> Result<fs::File, DomainError> {
        let path = self.resolve(operation, name)?;
        fs::File::open(&path)
            .await
            .map_err(|e| backend(operation, name, e))
    }
}

#[async_trait]
impl ObjectStore for FilesystemObjectStore {
    async fn attributes(&self, name: &str) -> Result<ObjectAttributes, DomainError> {
        let path = self.resolve("attributes", name)?;
        let metadata = fs::metadata(&path)
            .await
            .map_err(|e| backend("attributes", name, e))?;

        if metadata.is_dir() {
            return Err(DomainError::Backend {
                operation: "attributes".to_string(),
                name: name.to_string(),
                message: "is a directory".to_string(),
            });
        }

        let last_modified: DateTime<Utc> = metadata
            .modified()
            .map_err(|e| backend("attributes", name, e))?
            .into();

        Ok(ObjectAttributes::new(metadata.len(), last_modified))
    }

    fn iter<'a>(&'a self, dir: &'a str) -> NameStream<'a> {
        stream::once(async move {
            self.list(dir)
                .await
                .map(|names| stream::iter(names.into_iter().map(Ok)))
        })
        .try_flatten()
        .boxed()
    }

    async fn get(&self, name: &str) -> Result<ObjectReader, DomainError> {
        let file = self.open("get", name).await?;
        Ok(Box::new(file))
    }

    async fn get_range(
        &self,
        name: &str,
        offset: u64,
        length: u64,
    ) -> Result<ObjectReader, DomainError> {
        let mut file = self.open("get_range", name).await?;
        file.seek(SeekFrom::Start(offset))
            .await
            .map_err(|e| backend("get_range", name, e))?;
        Ok(Box::new(file.take(length)))
    }

    async fn exists(&self, name: &str) -> Result<bool, DomainError> {
        let path = self.resolve("exists", name)?;
        match fs::metadata(&path).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(backend("exists", name, e)),
        }
    }

    fn name(&self) -> &str {
        "filesystem"
    }
}

fn backend(operation: &str, name: &str, e: std::io::Error) -> DomainError {
    DomainError::Backend {
        operation: operation.to_string(),
        name: name.to_string(),
        message: e.to_string(),
    }
}
