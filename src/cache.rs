//! Score cache layered over the field scorer.
//!
//! Keys hash the exact input (kind, text, keyword list). Lookups take the
//! read lock; a miss computes outside any lock and inserts under the write
//! lock, so two writers racing on one key leave whichever wrote last.
//! Scoring is deterministic, so the raced values are identical anyway.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use sha2::{Digest, Sha256};

use crate::scoring::field::{score_description, score_headline};
use crate::{FieldKind, ScoredField};

pub struct ScoreCache {
    inner: RwLock<HashMap<u64, ScoredField>>,
}

impl ScoreCache {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub fn score(&self, kind: FieldKind, text: &str, keywords: Option<&[String]>) -> ScoredField {
        let key = cache_key(kind, text, keywords);
        if let Some(hit) = self.read_lock().get(&key) {
            return hit.clone();
        }
        let fresh = match kind {
            FieldKind::Headline => score_headline(text, keywords),
            FieldKind::Description => score_description(text, keywords),
        };
        self.write_lock().insert(key, fresh.clone());
        fresh
    }

    pub fn score_headline(&self, text: &str, keywords: Option<&[String]>) -> ScoredField {
        self.score(FieldKind::Headline, text, keywords)
    }

    pub fn score_description(&self, text: &str, keywords: Option<&[String]>) -> ScoredField {
        self.score(FieldKind::Description, text, keywords)
    }

    pub fn len(&self) -> usize {
        self.read_lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_lock(&self) -> RwLockReadGuard<'_, HashMap<u64, ScoredField>> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, HashMap<u64, ScoredField>> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ScoreCache {
    fn default() -> Self {
        Self::new()
    }
}

/// First 8 bytes of SHA-256 over the kind, the text and the keyword list.
pub fn cache_key(kind: FieldKind, text: &str, keywords: Option<&[String]>) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(kind.label().as_bytes());
    hasher.update(b"\n");
    hasher.update(text.as_bytes());
    hasher.update(b"\n");
    if let Some(keywords) = keywords {
        for keyword in keywords {
            hasher.update(keyword.as_bytes());
            hasher.update([0x1f]);
        }
    }
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
