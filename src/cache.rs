//! Caller-side result cache.
//!
//! `analyze` is deterministic, so a result can be reused for any later call
//! with the same source and language. Keys are SHA-256 digests of the
//! canonical language tag and the source; errors are never cached.
//! Safe to share across rayon workers.
//!
//! `AnalysisCache::new` never evicts, which suits a single CLI run. Long-lived
//! callers should use `with_capacity_limit`; once full, new results are
//! returned without being stored.

use crate::core::errors::Result;
use crate::core::types::AnalysisResult;
use crate::pipeline::Analyzer;
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Hex SHA-256 of `language`, a NUL separator and `source`.
pub fn cache_key(source: &str, language: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(language.as_bytes());
    hasher.update([0u8]);
    hasher.update(source.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

#[derive(Debug, Default)]
pub struct AnalysisCache {
    entries: DashMap<String, AnalysisResult>,
    hits: AtomicUsize,
    misses: AtomicUsize,
    capacity: Option<usize>,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache that stops storing new results after `max_entries`.
    pub fn with_capacity_limit(max_entries: usize) -> Self {
        Self {
            capacity: Some(max_entries),
            ..Self::default()
        }
    }

    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|max| self.entries.len() >= max)
    }

    /// Cached result for the pair, or a fresh analysis that is stored on
    /// success. Aliases (`js`, `javascript`) share entries.
    pub fn get_or_analyze(
        &self,
        analyzer: &Analyzer,
        source: &str,
        language: &str,
    ) -> Result<AnalysisResult> {
        let tag = analyzer
            .registry()
            .get(language)
            .map_or_else(|| language.to_string(), |profile| profile.name.to_string());
        let key = cache_key(source, &tag);

        if let Some(hit) = self.entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::debug!("Analysis cache hit for {}", &key[..12]);
            return Ok(hit.clone());
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let result = analyzer.analyze(source, language)?;
        if self.is_full() {
            log::debug!("Analysis cache full, not storing {}", &key[..12]);
        } else {
            self.entries.insert(key, result.clone());
        }
        Ok(result)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::AnalysisError;

    #[test]
    fn test_key_separates_language_from_source() {
        assert_ne!(cache_key("ab", "c"), cache_key("b", "ca"));
        assert_eq!(cache_key("x = 1", "python"), cache_key("x = 1", "python"));
        assert_eq!(cache_key("", "").len(), 64);
    }

    #[test]
    fn test_hit_returns_identical_result() {
        let cache = AnalysisCache::new();
        let analyzer = Analyzer::new();
        let first = cache.get_or_analyze(&analyzer, "let n = 0;", "javascript").unwrap();
        let second = cache.get_or_analyze(&analyzer, "let n = 0;", "js").unwrap();
        assert_eq!(first, second);
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = AnalysisCache::new();
        let analyzer = Analyzer::new();
        let error = cache.get_or_analyze(&analyzer, "", "python").unwrap_err();
        assert_eq!(error, AnalysisError::EmptyInput);
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_capacity_limit_stops_storing() {
        let cache = AnalysisCache::with_capacity_limit(1);
        let analyzer = Analyzer::new();
        cache.get_or_analyze(&analyzer, "x = 1", "python").unwrap();
        assert!(cache.is_full());

        let fresh = cache.get_or_analyze(&analyzer, "y = 2", "python").unwrap();
        assert_eq!(fresh, analyzer.analyze("y = 2", "python").unwrap());
        assert_eq!(cache.len(), 1);

        cache.get_or_analyze(&analyzer, "x = 1", "python").unwrap();
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 2,
                entries: 1
            }
        );
    }

    #[test]
    fn test_default_cache_is_unbounded() {
        let cache = AnalysisCache::new();
        let analyzer = Analyzer::new();
        for n in 0..5 {
            cache.get_or_analyze(&analyzer, &format!("x = {n}"), "python").unwrap();
        }
        assert_eq!(cache.len(), 5);
        assert!(!cache.is_full());
    }
}
