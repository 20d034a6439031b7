//! Mock data collaborators standing in for the upload and clustering pipeline.

use chrono::{DateTime, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cluster_table::{
    ClusterRecord, EnvironmentalAssociation, ExpertValidation, FunctionSignal, NoveltyCategory,
    TaxonomicAnnotation, TopDatabaseMatch,
};
use crate::dataset_registry::{Dataset, DatasetId};
use crate::query_results::{QueryResult, SequenceAlignment, PLACEHOLDER_ACCESSION};

pub const DEFAULT_FIXTURE_SEED: u64 = 42;
pub const DEFAULT_CLUSTERS_PER_DATASET: usize = 50;
pub const PHYLOGENETIC_TREE_IMAGE_URL: &str = "https://www.researchgate.net/publication/338279951/figure/fig1/AS:842240963792896@1577817539523/A-phylogenetic-tree-of-Felis-based-on-37-mitochondrial-genomes-The-phylogenetic-tree.png";

const REP_SEQ_ID_BASE: usize = 1000;
const ALIGNMENT_WINDOW: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryScores {
    pub similarity: f64,
    pub novelty_score: f64,
}

/// Supplies the values the analysis pipeline would otherwise compute.
pub trait ClusterFixtureSource: Send + Sync {
    fn generate_clusters(&self, dataset_id: &DatasetId) -> Vec<ClusterRecord>;
    fn score_query(&self, sequence: &str) -> QueryScores;
}

#[derive(Debug, Clone, Copy)]
/// Deterministic generator: the same seed and dataset id always yield the
/// same clusters, independent of call order.
pub struct SeededClusterGenerator {
    seed: u64,
    clusters_per_dataset: usize,
}

impl Default for SeededClusterGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_FIXTURE_SEED, DEFAULT_CLUSTERS_PER_DATASET)
    }
}

impl SeededClusterGenerator {
    pub fn new(seed: u64, clusters_per_dataset: usize) -> Self {
        Self {
            seed,
            clusters_per_dataset,
        }
    }

    pub fn clusters_per_dataset(&self) -> usize {
        self.clusters_per_dataset
    }

    fn rng_for(&self, key: &str) -> StdRng {
        StdRng::seed_from_u64(self.seed ^ fnv1a(key.as_bytes()))
    }
}

impl ClusterFixtureSource for SeededClusterGenerator {
    fn generate_clusters(&self, dataset_id: &DatasetId) -> Vec<ClusterRecord> {
        let mut rng = self.rng_for(dataset_id.as_str());
        (0..self.clusters_per_dataset)
            .map(|index| random_cluster(&mut rng, index))
            .collect()
    }

    fn score_query(&self, sequence: &str) -> QueryScores {
        let mut rng = self.rng_for(sequence);
        QueryScores {
            similarity: round_one_decimal(rng.gen_range(20.0..99.0)),
            novelty_score: round_one_decimal(rng.gen_range(0.0..100.0)),
        }
    }
}

fn random_cluster(rng: &mut StdRng, index: usize) -> ClusterRecord {
    let id = format!("C{:03}", index + 1);
    let mut record = ClusterRecord::new(
        id,
        rng.gen_range(10..510),
        round_one_decimal(rng.gen_range(0.0..100.0)),
        pick(rng, &TaxonomicAnnotation::ALL),
    );
    record.p_value = three_significant_digits(rng.gen_range(1e-6..=1.0));
    record.tax_confidence = round_one_decimal(rng.gen_range(70.0..100.0));
    record.rep_seq_id = format!("contig_{}", REP_SEQ_ID_BASE + index);
    record.top_db_match = pick(rng, &TopDatabaseMatch::ALL);
    record.function_signal = pick(rng, &FunctionSignal::ALL);
    record.abundance = round_one_decimal(rng.gen_range(0.0..10.0));
    record.env_assoc = pick(rng, &EnvironmentalAssociation::ALL);
    record.novelty_category = pick(rng, &NoveltyCategory::ALL);
    record.expert_validation = pick(rng, &ExpertValidation::ALL);
    record
}

fn pick<T: Copy, const N: usize>(rng: &mut StdRng, values: &[T; N]) -> T {
    values[rng.gen_range(0..N)]
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn three_significant_digits(value: f64) -> f64 {
    format!("{value:.2e}").parse().unwrap_or(value)
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

#[derive(Debug, Clone, Default)]
/// Returns the same clusters for every dataset; for tests and demos.
pub struct StaticClusterFixture {
    clusters: Vec<ClusterRecord>,
    scores: Option<QueryScores>,
}

impl StaticClusterFixture {
    pub fn new(clusters: Vec<ClusterRecord>) -> Self {
        Self {
            clusters,
            scores: None,
        }
    }

    pub fn with_scores(mut self, scores: QueryScores) -> Self {
        self.scores = Some(scores);
        self
    }
}

impl ClusterFixtureSource for StaticClusterFixture {
    fn generate_clusters(&self, _dataset_id: &DatasetId) -> Vec<ClusterRecord> {
        self.clusters.clone()
    }

    fn score_query(&self, _sequence: &str) -> QueryScores {
        self.scores.unwrap_or(QueryScores {
            similarity: 50.0,
            novelty_score: 50.0,
        })
    }
}

/// Placeholder alignment against the first bases of a submitted sequence.
pub fn placeholder_alignment(sequence: &str, scores: QueryScores) -> SequenceAlignment {
    let query: String = sequence.chars().take(ALIGNMENT_WINDOW).collect();
    let mismatches = ((100.0 - scores.similarity) / 100.0 * query.len() as f64).round() as usize;
    let markers: String = query
        .chars()
        .enumerate()
        .map(|(index, _)| if index < mismatches { ' ' } else { '|' })
        .collect();
    let matched: String = query
        .chars()
        .enumerate()
        .map(|(index, base)| if index < mismatches { 'N' } else { base })
        .collect();
    let score = (scores.similarity * 2.0).round() as u32;
    SequenceAlignment {
        query,
        matched,
        markers,
        score,
        bits: score * 2,
        e_value: 10f64.powi(-(score as i32 / 2)),
    }
}

/// Query result assembled from a submitted sequence and fixture scores.
pub fn placeholder_query_result(
    id: String,
    sequence: String,
    length: usize,
    gc_content: f64,
    scores: QueryScores,
    timestamp: DateTime<Utc>,
) -> QueryResult {
    let alignment = placeholder_alignment(&sequence, scores);
    QueryResult {
        id,
        sequence,
        similarity: scores.similarity,
        db_match: None,
        taxonomy: None,
        novelty_score: scores.novelty_score,
        timestamp,
        length,
        gc_content,
        accession: PLACEHOLDER_ACCESSION.to_string(),
        alignment,
        phylogenetic_tree_url: PHYLOGENETIC_TREE_IMAGE_URL.to_string(),
    }
}

fn utc_date(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .map(|naive| naive.and_utc())
}

/// Already-processed datasets a fresh session starts with.
pub fn seed_datasets() -> Vec<Dataset> {
    [
        ("ds1", "DeepSea_Pacific_2024", (2024, 1, 15)),
        ("ds2", "Atlantic_Vent_Survey", (2024, 3, 2)),
        ("ds3", "Arctic_Sediment_Core", (2024, 5, 21)),
    ]
    .into_iter()
    .filter_map(|(id, name, (year, month, day))| {
        utc_date(year, month, day, 0, 0).map(|created_at| Dataset {
            id: DatasetId::from(id),
            name: name.to_string(),
            created_at,
        })
    })
    .collect()
}

/// Collection location shown on the dataset detail header.
pub fn dataset_source(dataset_id: &DatasetId) -> &'static str {
    match dataset_id.as_str() {
        "ds1" => "Pacific Ocean, Mariana Trench",
        "ds2" => "Atlantic Ocean, Mid-Atlantic Ridge",
        "ds3" => "Arctic Ocean, Fram Strait",
        _ => "User upload",
    }
}

struct SeedQuery {
    id: &'static str,
    sequence: String,
    similarity: f64,
    db_match: Option<&'static str>,
    taxonomy: Option<&'static str>,
    novelty_score: f64,
    timestamp: Option<DateTime<Utc>>,
    length: usize,
    gc_content: f64,
    accession: &'static str,
    alignment: (&'static str, &'static str, &'static str, u32, u32, f64),
}

/// Reference query results; entries without a fixed date use `now`.
pub fn seed_query_results(now: DateTime<Utc>) -> Vec<QueryResult> {
    let seeds = [
        SeedQuery {
            id: "Q001",
            sequence: "ATCG".repeat(23),
            similarity: 95.6,
            db_match: Some(
                "Escherichia coli strain K-12 substr. MG1655 16S ribosomal RNA, partial sequence",
            ),
            taxonomy: Some(
                "Bacteria; Proteobacteria; Gammaproteobacteria; Enterobacteriales; Enterobacteriaceae; Escherichia",
            ),
            novelty_score: 12.3,
            timestamp: utc_date(2024, 1, 20, 14, 30),
            length: 80,
            gc_content: 50.0,
            accession: "NC_000913.3",
            alignment: (
                "ATCGATCGATCGATCGATCG",
                "ATCGTTCGATCGATCGATCG",
                "||| ||||||||||||||||",
                180,
                350,
                1e-90,
            ),
        },
        SeedQuery {
            id: "Q002",
            sequence: "GCTA".repeat(75),
            similarity: 23.4,
            db_match: None,
            taxonomy: None,
            novelty_score: 87.6,
            timestamp: utc_date(2024, 1, 20, 15, 15),
            length: 150,
            gc_content: 55.0,
            accession: PLACEHOLDER_ACCESSION,
            alignment: (
                "GCTAGCTAGCTAGCTAGC",
                "GCTAGTTTGCTAGCTAGC",
                "|||||  |||||||||||",
                140,
                280,
                1e-70,
            ),
        },
        SeedQuery {
            id: "Q003",
            sequence: "TGCA".repeat(23),
            similarity: 67.8,
            db_match: Some("Marine bacterium clone"),
            taxonomy: Some("Bacteria; Bacteroidetes"),
            novelty_score: 45.2,
            timestamp: utc_date(2024, 1, 20, 16, 0),
            length: 200,
            gc_content: 45.0,
            accession: PLACEHOLDER_ACCESSION,
            alignment: (
                "TGCATGCATGCATGCATG",
                "TGCATGCATGCATGCATG",
                "||||||||||||||||||",
                200,
                400,
                1e-100,
            ),
        },
        SeedQuery {
            id: "Q004",
            sequence: "AGCT".repeat(23),
            similarity: 88.2,
            db_match: Some("Newly Discovered Bacterium"),
            taxonomy: Some("Bacteria; Firmicutes"),
            novelty_score: 75.0,
            timestamp: None,
            length: 90,
            gc_content: 52.0,
            accession: PLACEHOLDER_ACCESSION,
            alignment: (
                "AGCTAGCTAGCTAGCTAG",
                "AGCTAGCTAGCTAGCTAG",
                "||||||||||||||||||",
                190,
                380,
                1e-95,
            ),
        },
    ];

    seeds
        .into_iter()
        .map(|seed| {
            let (query, matched, markers, score, bits, e_value) = seed.alignment;
            QueryResult {
                id: seed.id.to_string(),
                sequence: seed.sequence,
                similarity: seed.similarity,
                db_match: seed.db_match.map(str::to_string),
                taxonomy: seed.taxonomy.map(str::to_string),
                novelty_score: seed.novelty_score,
                timestamp: seed.timestamp.unwrap_or(now),
                length: seed.length,
                gc_content: seed.gc_content,
                accession: seed.accession.to_string(),
                alignment: SequenceAlignment {
                    query: query.to_string(),
                    matched: matched.to_string(),
                    markers: markers.to_string(),
                    score,
                    bits,
                    e_value,
                },
                phylogenetic_tree_url: PHYLOGENETIC_TREE_IMAGE_URL.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::{DateTime, Utc};

    use super::{
        placeholder_alignment, seed_datasets, seed_query_results, ClusterFixtureSource,
        QueryScores, SeededClusterGenerator, StaticClusterFixture,
    };
    use crate::cluster_table::{ClusterRecord, TaxonomicAnnotation};
    use crate::dataset_registry::DatasetId;

    #[test]
    fn functional_seeded_generator_is_deterministic_per_dataset() {
        let generator = SeededClusterGenerator::new(7, 50);
        let first = generator.generate_clusters(&DatasetId::from("ds1"));
        let other = generator.generate_clusters(&DatasetId::from("ds2"));
        let again = generator.generate_clusters(&DatasetId::from("ds1"));
        assert_eq!(first, again);
        assert_ne!(first, other);
    }

    #[test]
    fn unit_generated_clusters_respect_field_bounds() {
        let generator = SeededClusterGenerator::default();
        let clusters = generator.generate_clusters(&DatasetId::from("ds1"));
        assert_eq!(clusters.len(), 50);
        assert_eq!(clusters[0].id, "C001");
        assert_eq!(clusters[49].id, "C050");
        assert_eq!(clusters[0].rep_seq_id, "contig_1000");

        let ids: HashSet<&str> = clusters.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), clusters.len());
        for cluster in &clusters {
            assert!((10..510).contains(&cluster.size));
            assert!((0.0..=100.0).contains(&cluster.novelty));
            assert!(cluster.p_value > 0.0 && cluster.p_value <= 1.0);
            assert!((70.0..=100.0).contains(&cluster.tax_confidence));
            assert!((0.0..=10.0).contains(&cluster.abundance));
        }
    }

    #[test]
    fn unit_static_fixture_returns_supplied_clusters() {
        let clusters = vec![ClusterRecord::new("C1", 10, 10.0, TaxonomicAnnotation::Bacteria)];
        let fixture = StaticClusterFixture::new(clusters.clone()).with_scores(QueryScores {
            similarity: 80.0,
            novelty_score: 10.0,
        });
        assert_eq!(fixture.generate_clusters(&DatasetId::from("any")), clusters);
        assert_eq!(fixture.score_query("ATCG").similarity, 80.0);
    }

    #[test]
    fn unit_seed_data_has_unique_ids() {
        let datasets = seed_datasets();
        assert_eq!(datasets.len(), 3);
        assert_eq!(datasets[0].name, "DeepSea_Pacific_2024");

        let now = DateTime::<Utc>::UNIX_EPOCH;
        let results = seed_query_results(now);
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["Q001", "Q002", "Q003", "Q004"]);
        assert_eq!(results[3].timestamp, now);
        assert_eq!(results[0].accession, "NC_000913.3");
    }

    #[test]
    fn unit_placeholder_alignment_marks_mismatches_from_similarity() {
        let alignment = placeholder_alignment(
            "ATCGATCGAT",
            QueryScores {
                similarity: 80.0,
                novelty_score: 20.0,
            },
        );
        assert_eq!(alignment.query, "ATCGATCGAT");
        assert_eq!(alignment.markers, "  ||||||||");
        assert_eq!(alignment.matched, "NNCGATCGAT");
        assert_eq!(alignment.score, 160);
        assert_eq!(alignment.bits, 320);
    }
}
