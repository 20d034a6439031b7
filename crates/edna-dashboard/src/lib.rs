//! View state, dataset registry and cluster-table pipeline for the EDeepNA
//! dashboard.
//!
//! Everything here is in-memory: datasets, clusters and query results come
//! from seeded fixture collaborators, and a [`shell::DashboardShell`] owns the
//! whole session.

pub mod cluster_table;
pub mod dataset_registry;
pub mod error;
pub mod fixtures;
pub mod overview;
pub mod query_results;
pub mod shell;
pub mod view_router;

pub use cluster_table::{
    cluster_table_view, ClusterField, ClusterRecord, ClusterTableState, SortDirection, SortSpec,
};
pub use dataset_registry::{Dataset, DatasetId, DatasetRegistry};
pub use error::DashboardError;
pub use shell::{
    DashboardIntent, DashboardOutcome, DashboardPanel, DashboardShell, DashboardShellOptions,
    DashboardTheme,
};
pub use view_router::{DashboardView, ViewRouter};
