use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use chrono::{DateTime, Utc};
use edna_dashboard::{
    cluster_table::TaxonomicAnnotation,
    dataset_registry::FixedClock,
    fixtures::{ClusterFixtureSource, QueryScores, SeededClusterGenerator},
    query_results::QueryResultLookup,
    ClusterField, ClusterRecord, DashboardIntent, DashboardOutcome, DashboardShell,
    DashboardShellOptions, DashboardView, DatasetId, SortDirection,
};
use edna_dashboard_ui::{render_edna_dashboard_shell, render_edna_query_result_page};
use serde_json::Value;

/// Hands out scripted clusters per dataset id and records every request.
struct ScriptedFixture {
    clusters: HashMap<String, Vec<ClusterRecord>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedFixture {
    fn new(clusters: Vec<(&str, Vec<ClusterRecord>)>) -> Self {
        Self {
            clusters: clusters
                .into_iter()
                .map(|(dataset_id, records)| (dataset_id.to_string(), records))
                .collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requested(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl ClusterFixtureSource for ScriptedFixture {
    fn generate_clusters(&self, dataset_id: &DatasetId) -> Vec<ClusterRecord> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(dataset_id.to_string());
        self.clusters
            .get(dataset_id.as_str())
            .cloned()
            .unwrap_or_default()
    }

    fn score_query(&self, sequence: &str) -> QueryScores {
        QueryScores {
            similarity: 60.0,
            novelty_score: if sequence.len() > 10 { 85.0 } else { 20.0 },
        }
    }
}

fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_705_276_800, 0).expect("timestamp")
}

fn scenario_clusters() -> Vec<ClusterRecord> {
    vec![
        ClusterRecord::new("C1", 10, 10.0, TaxonomicAnnotation::Bacteria),
        ClusterRecord::new("C2", 20, 90.0, TaxonomicAnnotation::Archaea),
        ClusterRecord::new("C3", 30, 50.0, TaxonomicAnnotation::Unknown),
    ]
}

fn scripted_shell(fixture: Arc<ScriptedFixture>) -> DashboardShell {
    let mut options = DashboardShellOptions::empty(fixture, Arc::new(FixedClock(fixed_now())));
    options.logged_in = true;
    DashboardShell::new(options)
}

fn detail_row_ids(shell: &DashboardShell, dataset_id: &DatasetId) -> Vec<String> {
    shell
        .cluster_rows(dataset_id)
        .expect("known dataset")
        .iter()
        .map(|row| row.id.clone())
        .collect()
}

fn appears_in_order(html: &str, ids: &[&str]) -> bool {
    let positions: Vec<usize> = ids
        .iter()
        .filter_map(|id| html.find(&format!("data-row-id=\"{id}\"")))
        .collect();
    positions.len() == ids.len() && positions.windows(2).all(|pair| pair[0] < pair[1])
}

#[test]
fn integration_add_dataset_sort_and_filter_flow_renders_expected_rows() {
    let fixture = Arc::new(ScriptedFixture::new(vec![("ds1", scenario_clusters())]));
    let mut shell = scripted_shell(Arc::clone(&fixture));

    let DashboardOutcome::DatasetAdded(dataset) = shell
        .dispatch(DashboardIntent::AddDataset {
            name: "DeepSea_Pacific_2024".to_string(),
        })
        .expect("add dataset")
    else {
        panic!("expected dataset added");
    };
    assert_eq!(dataset.id.as_str(), "ds1");
    assert_eq!(fixture.requested(), vec!["ds1".to_string()]);
    assert_eq!(detail_row_ids(&shell, &dataset.id), vec!["C2", "C3", "C1"]);
    assert!(appears_in_order(
        &render_edna_dashboard_shell(&shell),
        &["C2", "C3", "C1"]
    ));

    shell
        .dispatch(DashboardIntent::ToggleSort(ClusterField::Novelty))
        .expect("toggle");
    assert_eq!(shell.table_state().sort.direction, SortDirection::Ascending);
    assert!(appears_in_order(
        &render_edna_dashboard_shell(&shell),
        &["C1", "C3", "C2"]
    ));

    shell
        .dispatch(DashboardIntent::SetFilter("c1".to_string()))
        .expect("filter");
    let html = render_edna_dashboard_shell(&shell);
    assert!(html.contains("data-row-count=\"1\""));
    assert!(!html.contains("data-row-id=\"C3\""));
}

#[test]
fn integration_stale_detail_view_and_delete_fall_back_cleanly() {
    let fixture = Arc::new(ScriptedFixture::new(vec![("ds1", scenario_clusters())]));
    let mut shell = scripted_shell(fixture);
    shell
        .dispatch(DashboardIntent::ChangeView(DashboardView::dataset(
            "unknown-id",
        )))
        .expect("unknown view");
    assert!(render_edna_dashboard_shell(&shell).contains("Dataset not found"));

    shell
        .dispatch(DashboardIntent::AddDataset {
            name: "short lived".to_string(),
        })
        .expect("add");
    shell
        .dispatch(DashboardIntent::DeleteDataset(DatasetId::from("ds1")))
        .expect("delete");
    assert_eq!(shell.current_view(), &DashboardView::Datasets);
    let html = render_edna_dashboard_shell(&shell);
    assert!(html.contains("data-panel=\"datasets\""));
    assert!(html.contains("data-dataset-count=\"0\""));
}

#[test]
fn integration_query_flow_adds_result_and_result_page_renders_it() {
    let fixture = Arc::new(ScriptedFixture::new(Vec::new()));
    let mut shell = scripted_shell(fixture);

    let DashboardOutcome::QueryAdded(result) = shell
        .dispatch(DashboardIntent::AddQuery {
            sequence: ">probe\nATGCGTACGTTAGC".to_string(),
        })
        .expect("add query")
    else {
        panic!("expected query added");
    };
    assert_eq!(result.id, "Q001");
    assert_eq!(result.length, 14);
    assert_eq!(result.novelty_score, 85.0);
    assert_eq!(shell.current_view(), &DashboardView::Queries);
    assert!(render_edna_dashboard_shell(&shell).contains("data-query-id=\"Q001\""));

    let html = render_edna_query_result_page(shell.queries().lookup(Some("Q001")));
    assert!(html.contains("data-result-icon=\"alert\""));
    assert!(html.contains("No classification available."));
    assert_eq!(
        shell.queries().lookup(Some("Q404")),
        QueryResultLookup::NotFound
    );
}

#[test]
fn integration_seeded_demo_sessions_are_reproducible() {
    let first = DashboardShell::new(DashboardShellOptions::demo(7, 20));
    let second = DashboardShell::new(DashboardShellOptions::demo(7, 20));
    let other = DashboardShell::new(DashboardShellOptions::demo(8, 20));
    let dataset_id = DatasetId::from("ds1");

    assert_eq!(first.clusters_for(&dataset_id), second.clusters_for(&dataset_id));
    assert_ne!(first.clusters_for(&dataset_id), other.clusters_for(&dataset_id));
    assert_eq!(
        SeededClusterGenerator::new(7, 20)
            .generate_clusters(&dataset_id)
            .len(),
        20
    );

    let snapshot = serde_json::to_value(first.snapshot()).expect("snapshot json");
    assert_eq!(snapshot["view"], Value::from("global-overview"));
    assert_eq!(snapshot["datasets"].as_array().map(Vec::len), Some(3));
    assert_eq!(snapshot["sort"]["key"], Value::from("novelty"));
}

#[test]
fn integration_every_navigation_section_renders_its_panel() {
    let mut shell = DashboardShell::new(DashboardShellOptions::demo(42, 10));
    for (view, panel) in [
        (DashboardView::GlobalOverview, "global-overview"),
        (DashboardView::Datasets, "datasets"),
        (DashboardView::Queries, "queries"),
        (DashboardView::Review, "review"),
        (DashboardView::Settings, "settings"),
        (DashboardView::dataset("ds2"), "dataset-detail"),
    ] {
        shell
            .dispatch(DashboardIntent::ChangeView(view))
            .expect("change view");
        let html = render_edna_dashboard_shell(&shell);
        assert!(
            html.contains(&format!("data-panel=\"{panel}\"")),
            "missing panel {panel}"
        );
    }
}
