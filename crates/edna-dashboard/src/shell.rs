//! Session state of one dashboard: router, registry, cluster tables and
//! query results behind a single intent dispatcher.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::cluster_table::{ClusterField, ClusterRecord, ClusterTableState, ExpertValidation, SortSpec};
use crate::dataset_registry::{DashboardClock, Dataset, DatasetId, DatasetRegistry, SystemClock};
use crate::error::DashboardError;
use crate::fixtures::{
    dataset_source, placeholder_query_result, seed_datasets, seed_query_results,
    ClusterFixtureSource, SeededClusterGenerator,
};
use crate::overview::{
    novelty_histogram, size_novelty_scatter, DatasetSummary, GlobalOverviewSnapshot,
    HistogramBucket, ScatterPoint,
};
use crate::query_results::{normalize_sequence, sequence_stats, QueryResult, QueryResultCatalog};
use crate::view_router::{DashboardView, ViewRouter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardTheme {
    #[default]
    Dark,
    Light,
}

impl DashboardTheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardIntent {
    ChangeView(DashboardView),
    SelectDataset(DatasetId),
    AddDataset { name: String },
    DeleteDataset(DatasetId),
    AddQuery { sequence: String },
    SetFilter(String),
    ToggleSort(ClusterField),
    SetSort(SortSpec),
    LogIn,
    LogOut,
    SetTheme(DashboardTheme),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardOutcome {
    Unchanged,
    ViewChanged(DashboardView),
    DatasetAdded(Dataset),
    DatasetDeleted(Dataset),
    QueryAdded(QueryResult),
    TableUpdated(SortSpec),
    SessionChanged { logged_in: bool },
    ThemeChanged(DashboardTheme),
}

pub struct DashboardShellOptions {
    pub fixtures: Arc<dyn ClusterFixtureSource>,
    pub clock: Arc<dyn DashboardClock>,
    pub datasets: Vec<Dataset>,
    pub query_results: Vec<QueryResult>,
    pub logged_in: bool,
    pub theme: DashboardTheme,
}

impl DashboardShellOptions {
    /// No seed data; the caller supplies fixtures and clock.
    pub fn empty(fixtures: Arc<dyn ClusterFixtureSource>, clock: Arc<dyn DashboardClock>) -> Self {
        Self {
            fixtures,
            clock,
            datasets: Vec::new(),
            query_results: Vec::new(),
            logged_in: false,
            theme: DashboardTheme::default(),
        }
    }

    /// Seeded demo session backed by the system clock.
    pub fn demo(seed: u64, clusters_per_dataset: usize) -> Self {
        let clock: Arc<dyn DashboardClock> = Arc::new(SystemClock);
        let query_results = seed_query_results(clock.now());
        Self {
            fixtures: Arc::new(SeededClusterGenerator::new(seed, clusters_per_dataset)),
            clock,
            datasets: seed_datasets(),
            query_results,
            logged_in: false,
            theme: DashboardTheme::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetDetailPanel<'a> {
    pub dataset: &'a Dataset,
    pub source: &'static str,
    pub summary: DatasetSummary,
    pub table: &'a ClusterTableState,
    pub rows: Vec<&'a ClusterRecord>,
    pub histogram: Vec<HistogramBucket>,
    pub scatter: Vec<ScatterPoint>,
}

impl DatasetDetailPanel<'_> {
    /// True when the filter leaves no rows.
    pub fn is_empty_result(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewItem<'a> {
    pub dataset: &'a Dataset,
    pub cluster: &'a ClusterRecord,
}

#[derive(Debug, Clone, PartialEq)]
/// Render-ready content of the current view.
pub enum DashboardPanel<'a> {
    GlobalOverview(GlobalOverviewSnapshot),
    Datasets(&'a [Dataset]),
    Queries(&'a [QueryResult]),
    Review(Vec<ReviewItem<'a>>),
    Settings {
        theme: DashboardTheme,
        logged_in: bool,
    },
    DatasetDetail(DatasetDetailPanel<'a>),
    DatasetNotFound { dataset_id: &'a DatasetId },
}

impl DashboardPanel<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::GlobalOverview(_) => "global-overview",
            Self::Datasets(_) => "datasets",
            Self::Queries(_) => "queries",
            Self::Review(_) => "review",
            Self::Settings { .. } => "settings",
            Self::DatasetDetail(_) => "dataset-detail",
            Self::DatasetNotFound { .. } => "dataset-not-found",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStateSnapshot {
    pub view: String,
    pub logged_in: bool,
    pub theme: DashboardTheme,
    pub datasets: Vec<Dataset>,
    pub query_ids: Vec<String>,
    pub filter_text: String,
    pub sort: SortSpec,
}

pub struct DashboardShell {
    router: ViewRouter,
    registry: DatasetRegistry,
    clusters: HashMap<DatasetId, Vec<ClusterRecord>>,
    table: ClusterTableState,
    table_dataset: Option<DatasetId>,
    queries: QueryResultCatalog,
    fixtures: Arc<dyn ClusterFixtureSource>,
    clock: Arc<dyn DashboardClock>,
    logged_in: bool,
    theme: DashboardTheme,
}

impl fmt::Debug for DashboardShell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardShell")
            .field("view", self.router.current())
            .field("datasets", &self.registry.len())
            .field("queries", &self.queries.len())
            .field("table", &self.table)
            .field("logged_in", &self.logged_in)
            .field("theme", &self.theme)
            .finish()
    }
}

impl DashboardShell {
    pub fn new(options: DashboardShellOptions) -> Self {
        let DashboardShellOptions {
            fixtures,
            clock,
            datasets,
            query_results,
            logged_in,
            theme,
        } = options;
        let registry = DatasetRegistry::with_datasets(Arc::clone(&clock), datasets);
        let clusters = registry
            .list()
            .iter()
            .map(|dataset| (dataset.id.clone(), fixtures.generate_clusters(&dataset.id)))
            .collect();
        Self {
            router: ViewRouter::default(),
            registry,
            clusters,
            table: ClusterTableState::default(),
            table_dataset: None,
            queries: QueryResultCatalog::new(query_results),
            fixtures,
            clock,
            logged_in,
            theme,
        }
    }

    pub fn current_view(&self) -> &DashboardView {
        self.router.current()
    }

    pub fn registry(&self) -> &DatasetRegistry {
        &self.registry
    }

    pub fn queries(&self) -> &QueryResultCatalog {
        &self.queries
    }

    pub fn table_state(&self) -> &ClusterTableState {
        &self.table
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn theme(&self) -> DashboardTheme {
        self.theme
    }

    pub fn clusters_for(&self, dataset_id: &DatasetId) -> &[ClusterRecord] {
        self.clusters
            .get(dataset_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Filtered and sorted rows of a dataset under the current table state.
    pub fn cluster_rows(
        &self,
        dataset_id: &DatasetId,
    ) -> Result<Vec<&ClusterRecord>, DashboardError> {
        if !self.registry.contains(dataset_id.as_str()) {
            return Err(DashboardError::DatasetNotFound {
                dataset_id: dataset_id.to_string(),
            });
        }
        Ok(self.table.view(self.clusters_for(dataset_id)))
    }

    pub fn dispatch(&mut self, intent: DashboardIntent) -> Result<DashboardOutcome, DashboardError> {
        debug!(?intent, "dashboard intent");
        match intent {
            DashboardIntent::ChangeView(view) => Ok(self.change_view(view)),
            DashboardIntent::SelectDataset(dataset_id) => {
                Ok(self.change_view(DashboardView::DatasetDetail(dataset_id)))
            }
            DashboardIntent::AddDataset { name } => {
                let dataset = self.registry.add(&name);
                let clusters = self.fixtures.generate_clusters(&dataset.id);
                self.clusters.insert(dataset.id.clone(), clusters);
                self.change_view(DashboardView::DatasetDetail(dataset.id.clone()));
                info!(dataset_id = %dataset.id, "dataset registered");
                Ok(DashboardOutcome::DatasetAdded(dataset))
            }
            DashboardIntent::DeleteDataset(dataset_id) => {
                let removed = self.registry.remove(dataset_id.as_str())?;
                self.clusters.remove(&removed.id);
                if self.table_dataset.as_ref() == Some(&removed.id) {
                    self.table = ClusterTableState::default();
                    self.table_dataset = None;
                }
                if self.router.current().dataset_id() == Some(&removed.id) {
                    self.router.change_view(DashboardView::Datasets);
                }
                info!(dataset_id = %removed.id, "dataset removed");
                Ok(DashboardOutcome::DatasetDeleted(removed))
            }
            DashboardIntent::AddQuery { sequence } => Ok(self.add_query(&sequence)),
            DashboardIntent::SetFilter(filter_text) => {
                self.table.set_filter_text(filter_text);
                Ok(DashboardOutcome::TableUpdated(self.table.sort))
            }
            DashboardIntent::ToggleSort(field) => {
                Ok(DashboardOutcome::TableUpdated(self.table.toggle_sort(field)))
            }
            DashboardIntent::SetSort(spec) => {
                self.table.set_sort(spec);
                Ok(DashboardOutcome::TableUpdated(spec))
            }
            DashboardIntent::LogIn => Ok(self.set_logged_in(true)),
            DashboardIntent::LogOut => Ok(self.set_logged_in(false)),
            DashboardIntent::SetTheme(theme) => {
                if self.theme == theme {
                    return Ok(DashboardOutcome::Unchanged);
                }
                self.theme = theme;
                Ok(DashboardOutcome::ThemeChanged(theme))
            }
        }
    }

    /// Toggles by raw column key. Unknown keys leave the table untouched.
    pub fn toggle_sort_by_key(&mut self, raw_key: &str) -> DashboardOutcome {
        match self.table.toggle_sort_by_key(raw_key) {
            Ok(spec) => DashboardOutcome::TableUpdated(spec),
            Err(error) => {
                debug!(code = error.code(), %error, "ignoring sort request");
                DashboardOutcome::Unchanged
            }
        }
    }

    fn change_view(&mut self, next: DashboardView) -> DashboardOutcome {
        if let DashboardView::DatasetDetail(dataset_id) = &next {
            if self.table_dataset.as_ref() != Some(dataset_id) {
                self.table = ClusterTableState::default();
                self.table_dataset = Some(dataset_id.clone());
            }
        }
        if self.router.current() == &next {
            return DashboardOutcome::Unchanged;
        }
        self.router.change_view(next.clone());
        DashboardOutcome::ViewChanged(next)
    }

    fn add_query(&mut self, sequence: &str) -> DashboardOutcome {
        let normalized = normalize_sequence(sequence);
        if normalized.is_empty() {
            debug!("ignoring empty query sequence");
            return DashboardOutcome::Unchanged;
        }
        let stats = sequence_stats(&normalized);
        let scores = self.fixtures.score_query(&normalized);
        let result = placeholder_query_result(
            self.queries.next_query_id(),
            normalized,
            stats.length,
            stats.gc_content,
            scores,
            self.clock.now(),
        );
        info!(query_id = %result.id, length = result.length, "query registered");
        self.queries.insert(result.clone());
        self.router.change_view(DashboardView::Queries);
        DashboardOutcome::QueryAdded(result)
    }

    fn set_logged_in(&mut self, logged_in: bool) -> DashboardOutcome {
        if self.logged_in == logged_in {
            return DashboardOutcome::Unchanged;
        }
        self.logged_in = logged_in;
        info!(logged_in, "dashboard session changed");
        DashboardOutcome::SessionChanged { logged_in }
    }

    pub fn overview(&self) -> GlobalOverviewSnapshot {
        let pairs: Vec<(&Dataset, &[ClusterRecord])> = self
            .registry
            .list()
            .iter()
            .map(|dataset| (dataset, self.clusters_for(&dataset.id)))
            .collect();
        GlobalOverviewSnapshot::build(&pairs)
    }

    /// Resolves the current view against the registry.
    pub fn resolve_panel(&self) -> DashboardPanel<'_> {
        match self.router.current() {
            DashboardView::GlobalOverview => DashboardPanel::GlobalOverview(self.overview()),
            DashboardView::Datasets => DashboardPanel::Datasets(self.registry.list()),
            DashboardView::Queries => DashboardPanel::Queries(self.queries.list()),
            DashboardView::Review => DashboardPanel::Review(self.review_items()),
            DashboardView::Settings => DashboardPanel::Settings {
                theme: self.theme,
                logged_in: self.logged_in,
            },
            DashboardView::DatasetDetail(dataset_id) => match self.registry.get(dataset_id.as_str()) {
                Some(dataset) => {
                    let clusters = self.clusters_for(&dataset.id);
                    DashboardPanel::DatasetDetail(DatasetDetailPanel {
                        dataset,
                        source: dataset_source(&dataset.id),
                        summary: DatasetSummary::from_clusters(clusters),
                        table: &self.table,
                        rows: self.table.view(clusters),
                        histogram: novelty_histogram(clusters),
                        scatter: size_novelty_scatter(clusters),
                    })
                }
                None => {
                    debug!(dataset_id = %dataset_id, "dataset detail view references unknown dataset");
                    DashboardPanel::DatasetNotFound { dataset_id }
                }
            },
        }
    }

    fn review_items(&self) -> Vec<ReviewItem<'_>> {
        self.registry
            .list()
            .iter()
            .flat_map(|dataset| {
                self.clusters_for(&dataset.id)
                    .iter()
                    .filter(|cluster| cluster.expert_validation == ExpertValidation::Pending)
                    .map(move |cluster| ReviewItem { dataset, cluster })
            })
            .collect()
    }

    pub fn snapshot(&self) -> DashboardStateSnapshot {
        DashboardStateSnapshot {
            view: self.router.current().as_token(),
            logged_in: self.logged_in,
            theme: self.theme,
            datasets: self.registry.list().to_vec(),
            query_ids: self.queries.list().iter().map(|q| q.id.clone()).collect(),
            filter_text: self.table.filter_text.clone(),
            sort: self.table.sort,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{DateTime, Utc};

    use super::{
        DashboardIntent, DashboardOutcome, DashboardPanel, DashboardShell, DashboardShellOptions,
        DashboardTheme,
    };
    use crate::cluster_table::{
        ClusterField, ClusterRecord, ExpertValidation, SortDirection, SortSpec,
        TaxonomicAnnotation,
    };
    use crate::dataset_registry::{DatasetId, FixedClock};
    use crate::error::DashboardError;
    use crate::fixtures::{QueryScores, StaticClusterFixture};
    use crate::view_router::DashboardView;

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

    fn test_shell() -> DashboardShell {
        let fixtures = StaticClusterFixture::new(scenario_clusters()).with_scores(QueryScores {
            similarity: 80.0,
            novelty_score: 72.5,
        });
        DashboardShell::new(DashboardShellOptions::empty(
            Arc::new(fixtures),
            Arc::new(FixedClock(fixed_now())),
        ))
    }

    fn row_ids(shell: &DashboardShell) -> Vec<String> {
        match shell.resolve_panel() {
            DashboardPanel::DatasetDetail(panel) => {
                panel.rows.iter().map(|row| row.id.clone()).collect()
            }
            other => panic!("expected dataset detail panel, got {}", other.kind()),
        }
    }

    #[test]
    fn unit_new_shell_starts_on_global_overview() {
        let shell = test_shell();
        assert_eq!(shell.current_view(), &DashboardView::GlobalOverview);
        assert!(matches!(
            shell.resolve_panel(),
            DashboardPanel::GlobalOverview(_)
        ));
    }

    #[test]
    fn functional_add_dataset_generates_clusters_and_opens_detail() {
        let mut shell = test_shell();
        let outcome = shell
            .dispatch(DashboardIntent::AddDataset {
                name: "DeepSea_Pacific_2024".to_string(),
            })
            .expect("add dataset");
        let DashboardOutcome::DatasetAdded(dataset) = outcome else {
            panic!("expected dataset added outcome");
        };
        assert_eq!(
            shell.current_view(),
            &DashboardView::DatasetDetail(dataset.id.clone())
        );
        assert_eq!(dataset.created_at, fixed_now());
        assert_eq!(shell.clusters_for(&dataset.id).len(), 3);
        assert_eq!(row_ids(&shell), vec!["C2", "C3", "C1"]);
    }

    #[test]
    fn functional_sort_toggle_and_filter_drive_detail_rows() {
        let mut shell = test_shell();
        shell
            .dispatch(DashboardIntent::AddDataset {
                name: "alpha".to_string(),
            })
            .expect("add");

        shell
            .dispatch(DashboardIntent::ToggleSort(ClusterField::Novelty))
            .expect("toggle");
        assert_eq!(row_ids(&shell), vec!["C1", "C3", "C2"]);

        shell
            .dispatch(DashboardIntent::SetFilter("c1".to_string()))
            .expect("filter");
        assert_eq!(row_ids(&shell), vec!["C1"]);

        shell
            .dispatch(DashboardIntent::SetFilter("metazoa".to_string()))
            .expect("filter");
        match shell.resolve_panel() {
            DashboardPanel::DatasetDetail(panel) => assert!(panel.is_empty_result()),
            other => panic!("unexpected panel {}", other.kind()),
        }
    }

    #[test]
    fn functional_unknown_dataset_detail_resolves_to_not_found() {
        let mut shell = test_shell();
        shell
            .dispatch(DashboardIntent::ChangeView(DashboardView::dataset(
                "unknown-id",
            )))
            .expect("change view");
        match shell.resolve_panel() {
            DashboardPanel::DatasetNotFound { dataset_id } => {
                assert_eq!(dataset_id.as_str(), "unknown-id")
            }
            other => panic!("expected not found panel, got {}", other.kind()),
        }
        assert!(shell.cluster_rows(&DatasetId::from("unknown-id")).is_err());
    }

    #[test]
    fn regression_unknown_sort_key_is_a_noop() {
        let mut shell = test_shell();
        let before = shell.table_state().clone();
        assert_eq!(shell.toggle_sort_by_key("depth"), DashboardOutcome::Unchanged);
        assert_eq!(shell.table_state(), &before);
    }

    #[test]
    fn regression_table_state_resets_when_switching_dataset() {
        let mut shell = test_shell();
        let first = shell
            .dispatch(DashboardIntent::AddDataset {
                name: "first".to_string(),
            })
            .expect("add first");
        let DashboardOutcome::DatasetAdded(first) = first else {
            panic!("expected dataset added");
        };
        shell
            .dispatch(DashboardIntent::SetFilter("c3".to_string()))
            .expect("filter");
        shell
            .dispatch(DashboardIntent::ChangeView(DashboardView::Datasets))
            .expect("datasets");
        shell
            .dispatch(DashboardIntent::SelectDataset(first.id.clone()))
            .expect("back to first");
        assert_eq!(shell.table_state().filter_text, "c3");

        shell
            .dispatch(DashboardIntent::AddDataset {
                name: "second".to_string(),
            })
            .expect("add second");
        assert_eq!(shell.table_state().filter_text, "");
        assert_eq!(shell.table_state().sort, SortSpec::default());
    }

    #[test]
    fn functional_delete_dataset_falls_back_to_datasets_view() {
        let mut shell = test_shell();
        let DashboardOutcome::DatasetAdded(dataset) = shell
            .dispatch(DashboardIntent::AddDataset {
                name: "gone".to_string(),
            })
            .expect("add")
        else {
            panic!("expected dataset added");
        };

        shell
            .dispatch(DashboardIntent::DeleteDataset(dataset.id.clone()))
            .expect("delete");
        assert_eq!(shell.current_view(), &DashboardView::Datasets);
        assert!(shell.clusters_for(&dataset.id).is_empty());

        let error = shell
            .dispatch(DashboardIntent::DeleteDataset(dataset.id.clone()))
            .expect_err("second delete");
        assert!(matches!(error, DashboardError::DatasetNotFound { .. }));
    }

    #[test]
    fn functional_add_query_computes_sequence_stats_and_opens_queries() {
        let mut shell = test_shell();
        let outcome = shell
            .dispatch(DashboardIntent::AddQuery {
                sequence: "atgc\nGGCC".to_string(),
            })
            .expect("add query");
        let DashboardOutcome::QueryAdded(result) = outcome else {
            panic!("expected query added");
        };
        assert_eq!(result.id, "Q001");
        assert_eq!(result.sequence, "ATGCGGCC");
        assert_eq!(result.length, 8);
        assert_eq!(result.gc_content, 75.0);
        assert_eq!(result.novelty_score, 72.5);
        assert_eq!(shell.current_view(), &DashboardView::Queries);

        assert_eq!(
            shell
                .dispatch(DashboardIntent::AddQuery {
                    sequence: "  ".to_string()
                })
                .expect("blank query"),
            DashboardOutcome::Unchanged
        );
    }

    #[test]
    fn unit_session_and_theme_intents_report_changes_once() {
        let mut shell = test_shell();
        assert_eq!(
            shell.dispatch(DashboardIntent::LogIn).expect("login"),
            DashboardOutcome::SessionChanged { logged_in: true }
        );
        assert_eq!(
            shell.dispatch(DashboardIntent::LogIn).expect("login again"),
            DashboardOutcome::Unchanged
        );
        assert!(shell.is_logged_in());
        assert_eq!(
            shell
                .dispatch(DashboardIntent::SetTheme(DashboardTheme::Light))
                .expect("theme"),
            DashboardOutcome::ThemeChanged(DashboardTheme::Light)
        );
        assert_eq!(DashboardTheme::parse("LIGHT"), Some(DashboardTheme::Light));
        assert_eq!(DashboardTheme::parse("sepia"), None);
    }

    #[test]
    fn functional_review_panel_lists_pending_clusters() {
        let mut clusters = scenario_clusters();
        clusters[0].expert_validation = ExpertValidation::Reviewed;
        let mut shell = DashboardShell::new(DashboardShellOptions::empty(
            Arc::new(StaticClusterFixture::new(clusters)),
            Arc::new(FixedClock(fixed_now())),
        ));
        shell
            .dispatch(DashboardIntent::AddDataset {
                name: "review".to_string(),
            })
            .expect("add");
        shell
            .dispatch(DashboardIntent::ChangeView(DashboardView::Review))
            .expect("review");
        match shell.resolve_panel() {
            DashboardPanel::Review(items) => {
                let ids: Vec<&str> = items.iter().map(|item| item.cluster.id.as_str()).collect();
                assert_eq!(ids, vec!["C2", "C3"]);
            }
            other => panic!("expected review panel, got {}", other.kind()),
        }
    }

    #[test]
    fn unit_demo_options_seed_datasets_and_query_results() {
        let shell = DashboardShell::new(DashboardShellOptions::demo(42, 12));
        assert_eq!(shell.registry().len(), 3);
        assert_eq!(shell.queries().len(), 4);
        let snapshot = shell.snapshot();
        assert_eq!(snapshot.view, "global-overview");
        assert_eq!(
            snapshot.sort,
            SortSpec::new(ClusterField::Novelty, SortDirection::Descending)
        );
        assert_eq!(
            shell.clusters_for(&DatasetId::from("ds1")).len(),
            12
        );
    }
}
