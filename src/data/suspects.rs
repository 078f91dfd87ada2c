//! Suspect index: which suspect each clue points at
//!
//! A fixed-size chained hash table. Entries are pushed onto the front of
//! their bucket's chain, so when a clue is filed twice the newest suspect
//! wins lookups. There is no resizing and no removal.

use crate::{ConstructionError, GameError};

/// Bucket count of the reference case
pub const DEFAULT_BUCKETS: usize = 10;

#[derive(Debug)]
struct HashEntry {
    clue: String,
    suspect: String,
    next: Option<Box<HashEntry>>,
}

/// Clue text → suspect name
#[derive(Debug)]
pub struct HashIndex {
    buckets: Vec<Option<Box<HashEntry>>>,
    len: usize,
}

/// Bucket for `key`: the sum of its UTF-8 byte values modulo `buckets`
pub fn bucket_of(key: &str, buckets: usize) -> usize {
    let sum: u64 = key.bytes().map(u64::from).sum();
    (sum % buckets as u64) as usize
}

impl HashIndex {
    pub fn new() -> Self {
        Self {
            buckets: (0..DEFAULT_BUCKETS).map(|_| None).collect(),
            len: 0,
        }
    }

    pub fn with_buckets(buckets: usize) -> Result<Self, GameError> {
        if buckets == 0 {
            return Err(ConstructionError::ZeroBuckets.into());
        }
        let mut storage = Vec::new();
        storage.try_reserve_exact(buckets)?;
        storage.resize_with(buckets, || None);
        Ok(Self {
            buckets: storage,
            len: 0,
        })
    }

    pub fn hash(&self, key: &str) -> usize {
        bucket_of(key, self.buckets.len())
    }

    /// Record that `clue` implicates `suspect`. Existing entries for the same
    /// clue are kept but shadowed.
    pub fn insert(&mut self, clue: &str, suspect: &str) {
        let bucket = self.hash(clue);
        let head = self.buckets[bucket].take();
        self.buckets[bucket] = Some(Box::new(HashEntry {
            clue: clue.to_string(),
            suspect: suspect.to_string(),
            next: head,
        }));
        self.len += 1;
    }

    /// Suspect of the first entry in the clue's chain whose key matches
    /// exactly, or `None` if the clue implicates nobody.
    pub fn lookup(&self, clue: &str) -> Option<&str> {
        self.chain(self.hash(clue))
            .find(|(key, _)| *key == clue)
            .map(|(_, suspect)| suspect)
    }

    /// Entries of one bucket, newest first. Out-of-range buckets are empty.
    pub fn chain(&self, bucket: usize) -> Chain<'_> {
        Chain {
            next: self.buckets.get(bucket).and_then(|head| head.as_deref()),
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total entries, shadowed duplicates included
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for HashIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for HashIndex {
    fn drop(&mut self) {
        for bucket in &mut self.buckets {
            let mut next = bucket.take();
            while let Some(mut entry) = next {
                next = entry.next.take();
            }
        }
    }
}

/// Walk over one bucket's chain, yielding `(clue, suspect)` pairs
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a HashEntry>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.next?;
        self.next = entry.next.as_deref();
        Some((entry.clue.as_str(), entry.suspect.as_str()))
    }
}
