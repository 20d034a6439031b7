//! Single-query results shown by the Query Analysis panel and the result page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

pub const QUERY_ID_PREFIX: &str = "Q";
pub const UNKNOWN_SEQUENCE_TITLE: &str = "Unknown Sequence";
pub const NO_CLASSIFICATION_MESSAGE: &str = "No classification available.";
pub const PLACEHOLDER_ACCESSION: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceAlignment {
    pub query: String,
    pub matched: String,
    pub markers: String,
    pub score: u32,
    pub bits: u32,
    pub e_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub id: String,
    pub sequence: String,
    pub similarity: f64,
    pub db_match: Option<String>,
    pub taxonomy: Option<String>,
    pub novelty_score: f64,
    pub timestamp: DateTime<Utc>,
    pub length: usize,
    pub gc_content: f64,
    pub accession: String,
    pub alignment: SequenceAlignment,
    pub phylogenetic_tree_url: String,
}

impl QueryResult {
    pub fn title(&self) -> &str {
        self.db_match.as_deref().unwrap_or(UNKNOWN_SEQUENCE_TITLE)
    }

    pub fn novelty_tier(&self) -> QueryNoveltyTier {
        QueryNoveltyTier::for_score(self.novelty_score)
    }

    pub fn result_icon(&self) -> QueryResultIcon {
        QueryResultIcon::for_score(self.novelty_score)
    }

    /// Taxonomy split into ranks, outermost first.
    pub fn lineage(&self) -> Vec<&str> {
        self.taxonomy
            .as_deref()
            .map(|taxonomy| {
                taxonomy
                    .split("; ")
                    .map(str::trim)
                    .filter(|rank| !rank.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryNoveltyTier {
    HighlyNovel,
    ModeratelyNovel,
    KnownOrganism,
}

impl QueryNoveltyTier {
    pub fn for_score(score: f64) -> Self {
        if score > 70.0 {
            Self::HighlyNovel
        } else if score > 40.0 {
            Self::ModeratelyNovel
        } else {
            Self::KnownOrganism
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::HighlyNovel => "Highly Novel",
            Self::ModeratelyNovel => "Moderately Novel",
            Self::KnownOrganism => "Known Organism",
        }
    }

    pub fn variant(self) -> &'static str {
        match self {
            Self::HighlyNovel => "destructive",
            Self::ModeratelyNovel => "secondary",
            Self::KnownOrganism => "default",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryResultIcon {
    Alert,
    Check,
    Dna,
}

impl QueryResultIcon {
    pub fn for_score(score: f64) -> Self {
        if score > 70.0 {
            Self::Alert
        } else if score < 30.0 {
            Self::Check
        } else {
            Self::Dna
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Check => "check",
            Self::Dna => "dna",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Length and GC content derived from a submitted sequence.
pub struct SequenceStats {
    pub length: usize,
    pub gc_content: f64,
}

/// Counts nucleotide letters and the share of `G`/`C` among them.
///
/// Whitespace and digits (FASTA line numbering) are ignored; a sequence with
/// no letters has zero length and zero GC content.
pub fn sequence_stats(sequence: &str) -> SequenceStats {
    let mut length = 0usize;
    let mut gc = 0usize;
    for base in sequence.chars().filter(char::is_ascii_alphabetic) {
        length += 1;
        if matches!(base.to_ascii_uppercase(), 'G' | 'C') {
            gc += 1;
        }
    }
    let gc_content = if length == 0 {
        0.0
    } else {
        ((gc as f64 / length as f64) * 1000.0).round() / 10.0
    };
    SequenceStats { length, gc_content }
}

/// Uppercased nucleotide letters of a submitted sequence; FASTA header lines
/// (`>`) are dropped.
pub fn normalize_sequence(sequence: &str) -> String {
    sequence
        .lines()
        .filter(|line| !line.trim_start().starts_with('>'))
        .flat_map(str::chars)
        .filter(char::is_ascii_alphabetic)
        .map(|base| base.to_ascii_uppercase())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueryResultLookup<'a> {
    NoSelection,
    NotFound,
    Found(&'a QueryResult),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResultCatalog {
    results: Vec<QueryResult>,
}

impl QueryResultCatalog {
    pub fn new(results: Vec<QueryResult>) -> Self {
        let mut catalog = Self::default();
        for result in results {
            catalog.insert(result);
        }
        catalog
    }

    pub fn list(&self) -> &[QueryResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn get(&self, query_id: &str) -> Result<&QueryResult, DashboardError> {
        self.results
            .iter()
            .find(|result| result.id == query_id)
            .ok_or_else(|| DashboardError::QueryResultNotFound {
                query_id: query_id.to_string(),
            })
    }

    /// Resolves the `id` parameter of the result page.
    pub fn lookup(&self, query_id: Option<&str>) -> QueryResultLookup<'_> {
        match query_id.map(str::trim).filter(|id| !id.is_empty()) {
            None => QueryResultLookup::NoSelection,
            Some(id) => self
                .get(id)
                .map(QueryResultLookup::Found)
                .unwrap_or(QueryResultLookup::NotFound),
        }
    }

    /// Inserts or replaces by id, keeping first-seen order.
    pub fn insert(&mut self, result: QueryResult) {
        match self.results.iter_mut().find(|existing| existing.id == result.id) {
            Some(existing) => *existing = result,
            None => self.results.push(result),
        }
    }

    /// Next free id of the form `Q004`.
    pub fn next_query_id(&self) -> String {
        let highest = self
            .results
            .iter()
            .filter_map(|result| result.id.strip_prefix(QUERY_ID_PREFIX))
            .filter_map(|digits| digits.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("{QUERY_ID_PREFIX}{:03}", highest.saturating_add(1))
    }
}
