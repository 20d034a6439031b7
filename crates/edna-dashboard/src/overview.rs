//! Aggregates behind the dataset header cards and the Global Overview charts.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;
use serde::Serialize;

use crate::cluster_table::{ClusterRecord, TaxonomicAnnotation, TopDatabaseMatch};
use crate::dataset_registry::{Dataset, DatasetId};

pub const NOVELTY_HISTOGRAM_BUCKETS: usize = 20;
pub const NOVELTY_HISTOGRAM_BUCKET_WIDTH: u32 = 5;
pub const TOP_CLUSTER_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub total_reads: u64,
    pub total_clusters: usize,
    pub novel_clusters: usize,
    pub avg_novelty: f64,
}

impl DatasetSummary {
    pub fn from_clusters(clusters: &[ClusterRecord]) -> Self {
        if clusters.is_empty() {
            return Self::default();
        }
        let total_reads = clusters.iter().map(|c| u64::from(c.size)).sum();
        let novel_clusters = clusters
            .iter()
            .filter(|c| c.novelty_category.is_novel())
            .count();
        let novelty_sum: f64 = clusters.iter().map(|c| c.novelty).sum();
        Self {
            total_reads,
            total_clusters: clusters.len(),
            novel_clusters,
            avg_novelty: round_one_decimal(novelty_sum / clusters.len() as f64),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistogramBucket {
    pub lower_bound: u32,
    pub count: usize,
}

/// Twenty buckets of width five; a novelty of exactly 100 lands in the last.
pub fn novelty_histogram(clusters: &[ClusterRecord]) -> Vec<HistogramBucket> {
    let mut counts = [0usize; NOVELTY_HISTOGRAM_BUCKETS];
    for cluster in clusters {
        let index = (cluster.novelty / f64::from(NOVELTY_HISTOGRAM_BUCKET_WIDTH)).floor() as usize;
        counts[index.min(NOVELTY_HISTOGRAM_BUCKETS - 1)] += 1;
    }
    counts
        .iter()
        .enumerate()
        .map(|(index, count)| HistogramBucket {
            lower_bound: index as u32 * NOVELTY_HISTOGRAM_BUCKET_WIDTH,
            count: *count,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub cluster_id: String,
    pub size: u32,
    pub novelty: f64,
}

pub fn size_novelty_scatter(clusters: &[ClusterRecord]) -> Vec<ScatterPoint> {
    clusters
        .iter()
        .map(|cluster| ScatterPoint {
            cluster_id: cluster.id.clone(),
            size: cluster.size,
            novelty: cluster.novelty,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub label: String,
    pub novel_clusters: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationShare {
    pub annotation: TaxonomicAnnotation,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxonomicCoverage {
    pub dataset_name: String,
    pub shares: Vec<AnnotationShare>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NovelKnownSplit {
    pub novel_percent: f64,
    pub known_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopCluster {
    pub dataset_id: DatasetId,
    pub cluster_id: String,
    pub size: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Symmetric matrix of shared top database matches; the diagonal is zero.
pub struct DatasetComparisonMatrix {
    pub labels: Vec<String>,
    pub cells: Vec<Vec<usize>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlobalOverviewSnapshot {
    pub novel_trend: Vec<TrendPoint>,
    pub taxonomic_coverage: Vec<TaxonomicCoverage>,
    pub novel_vs_known: NovelKnownSplit,
    pub top_clusters: Vec<TopCluster>,
    pub comparison: DatasetComparisonMatrix,
}

impl GlobalOverviewSnapshot {
    pub fn build(datasets: &[(&Dataset, &[ClusterRecord])]) -> Self {
        Self {
            novel_trend: novel_trend(datasets),
            taxonomic_coverage: datasets
                .iter()
                .map(|(dataset, clusters)| TaxonomicCoverage {
                    dataset_name: dataset.name.clone(),
                    shares: annotation_shares(clusters),
                })
                .collect(),
            novel_vs_known: novel_vs_known(datasets),
            top_clusters: top_clusters(datasets),
            comparison: comparison_matrix(datasets),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.taxonomic_coverage.is_empty()
    }
}

fn novel_trend(datasets: &[(&Dataset, &[ClusterRecord])]) -> Vec<TrendPoint> {
    let mut by_month: BTreeMap<(i32, u32), (String, usize)> = BTreeMap::new();
    for (dataset, clusters) in datasets {
        let key = (dataset.created_at.year(), dataset.created_at.month());
        let entry = by_month
            .entry(key)
            .or_insert_with(|| (dataset.created_at.format("%b %Y").to_string(), 0));
        entry.1 += clusters
            .iter()
            .filter(|c| c.novelty_category.is_novel())
            .count();
    }
    by_month
        .into_values()
        .map(|(label, novel_clusters)| TrendPoint {
            label,
            novel_clusters,
        })
        .collect()
}

fn annotation_shares(clusters: &[ClusterRecord]) -> Vec<AnnotationShare> {
    TaxonomicAnnotation::ALL
        .into_iter()
        .map(|annotation| {
            let matching = clusters
                .iter()
                .filter(|c| c.annotation == annotation)
                .count();
            AnnotationShare {
                annotation,
                percent: percent_of(matching, clusters.len()),
            }
        })
        .collect()
}

fn novel_vs_known(datasets: &[(&Dataset, &[ClusterRecord])]) -> NovelKnownSplit {
    let (novel, total) = datasets
        .iter()
        .flat_map(|(_, clusters)| clusters.iter())
        .fold((0usize, 0usize), |(novel, total), cluster| {
            (
                novel + usize::from(cluster.novelty_category.is_novel()),
                total + 1,
            )
        });
    if total == 0 {
        return NovelKnownSplit::default();
    }
    let novel_percent = percent_of(novel, total);
    NovelKnownSplit {
        novel_percent,
        known_percent: round_one_decimal(100.0 - novel_percent),
    }
}

fn top_clusters(datasets: &[(&Dataset, &[ClusterRecord])]) -> Vec<TopCluster> {
    let mut all: Vec<TopCluster> = datasets
        .iter()
        .flat_map(|(dataset, clusters)| {
            clusters.iter().map(|cluster| TopCluster {
                dataset_id: dataset.id.clone(),
                cluster_id: cluster.id.clone(),
                size: cluster.size,
            })
        })
        .collect();
    all.sort_by(|left, right| right.size.cmp(&left.size));
    all.truncate(TOP_CLUSTER_LIMIT);
    all
}

fn comparison_matrix(datasets: &[(&Dataset, &[ClusterRecord])]) -> DatasetComparisonMatrix {
    let label_sets: Vec<BTreeSet<TopDatabaseMatch>> = datasets
        .iter()
        .map(|(_, clusters)| clusters.iter().map(|c| c.top_db_match).collect())
        .collect();
    let cells = label_sets
        .iter()
        .enumerate()
        .map(|(row, left)| {
            label_sets
                .iter()
                .enumerate()
                .map(|(column, right)| {
                    if row == column {
                        0
                    } else {
                        left.intersection(right).count()
                    }
                })
                .collect()
        })
        .collect();
    DatasetComparisonMatrix {
        labels: datasets
            .iter()
            .map(|(dataset, _)| dataset.name.clone())
            .collect(),
        cells,
    }
}

fn percent_of(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_one_decimal(part as f64 * 100.0 / total as f64)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
