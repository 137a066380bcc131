use std::collections::BTreeSet;
use std::sync::Arc;

/// Resolved cache peer addresses.
///
/// Deduplicated and sorted so that two resolutions returning the same
/// addresses in a different order compare equal and do not reshuffle key
/// ownership. Cheap to clone; never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PeerSet {
    addresses: Arc<[String]>,
}

impl PeerSet {
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: BTreeSet<String> = addresses.into_iter().map(Into::into).collect();
        Self {
            addresses: unique.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn contains(&self, address: &str) -> bool {
        self.addresses.binary_search_by(|a| a.as_str().cmp(address)).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.addresses.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.addresses
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.addresses.to_vec()
    }
}

impl<S: Into<String>> FromIterator<S> for PeerSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}
