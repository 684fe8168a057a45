//! In-memory vector similarity index over portfolio entries.
//!
//! Queries are a brute-force cosine scan over every stored entry. Entries
//! live only for the process lifetime; nothing is persisted.

use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::portfolio::PortfolioEntry;

/// Metadata carried alongside each embedded entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryMeta {
    pub name: String,
    pub link: String,
    pub skills: String,
}

impl From<PortfolioEntry> for EntryMeta {
    fn from(entry: PortfolioEntry) -> Self {
        EntryMeta {
            name: entry.name,
            link: entry.link,
            skills: entry.skills,
        }
    }
}

/// One stored entry: embedding of the skills text plus metadata, tagged with
/// a generated id. Duplicate skill text across rows produces independent
/// entries with distinct ids — no dedup.
#[derive(Debug, Clone)]
pub struct IndexedEntry {
    pub id: Uuid,
    pub embedding: Vec<f32>,
    pub meta: EntryMeta,
}

/// A query hit, ranked by descending cosine similarity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievedMatch {
    pub name: String,
    pub link: String,
    pub skills: String,
    pub score: f32,
}

#[derive(Debug, Default)]
pub struct VectorIndex {
    entries: Vec<IndexedEntry>,
}

impl VectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts an embedded entry under a freshly generated id, preserving
    /// insertion order. Returns the id.
    pub fn insert(&mut self, embedding: Vec<f32>, meta: EntryMeta) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.push(IndexedEntry {
            id,
            embedding,
            meta,
        });
        id
    }

    /// Returns up to `k` entries nearest to `query`, best first.
    ///
    /// Querying before any insertion is a precondition violation and fails
    /// with `EmptyIndex` rather than silently returning nothing.
    pub fn query(&self, query: &[f32], k: usize) -> Result<Vec<RetrievedMatch>, AppError> {
        if self.entries.is_empty() {
            return Err(AppError::EmptyIndex);
        }

        let mut scored: Vec<RetrievedMatch> = self
            .entries
            .iter()
            .map(|entry| RetrievedMatch {
                name: entry.meta.name.clone(),
                link: entry.meta.link.clone(),
                skills: entry.meta.skills.clone(),
                score: cosine_similarity(query, &entry.embedding),
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k);
        Ok(scored)
    }
}

/// Cosine similarity of two vectors; 0.0 on length mismatch or zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(name: &str) -> EntryMeta {
        EntryMeta {
            name: name.to_string(),
            link: format!("https://portfolio.example/{name}"),
            skills: format!("{name} skills"),
        }
    }

    #[test]
    fn test_cosine_similarity_identical_vectors() {
        let v = vec![0.5, 0.5, 0.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal_vectors() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_cosine_similarity_length_mismatch_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_cosine_similarity_zero_norm_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_query_empty_index_fails() {
        let index = VectorIndex::new();
        let err = index.query(&[1.0, 0.0], 3).unwrap_err();
        assert!(matches!(err, AppError::EmptyIndex));
    }

    #[test]
    fn test_query_ranks_by_descending_similarity_and_truncates() {
        let mut index = VectorIndex::new();
        index.insert(vec![1.0, 0.0], meta("exact"));
        index.insert(vec![0.7, 0.7], meta("close"));
        index.insert(vec![0.0, 1.0], meta("orthogonal"));
        index.insert(vec![-1.0, 0.0], meta("opposite"));

        let matches = index.query(&[1.0, 0.0], 3).unwrap();
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].name, "exact");
        assert_eq!(matches[1].name, "close");
        assert_eq!(matches[2].name, "orthogonal");
        assert!(matches[0].score > matches[1].score);
        assert!(matches[1].score > matches[2].score);
    }

    #[test]
    fn test_query_k_larger_than_index_returns_all() {
        let mut index = VectorIndex::new();
        index.insert(vec![1.0, 0.0], meta("only"));
        let matches = index.query(&[1.0, 0.0], 3).unwrap();
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_duplicate_skill_text_gets_independent_entries() {
        let mut index = VectorIndex::new();
        let first = index.insert(vec![1.0, 0.0], meta("dup"));
        let second = index.insert(vec![1.0, 0.0], meta("dup"));
        assert_ne!(first, second);
        assert_eq!(index.len(), 2);
    }
}
