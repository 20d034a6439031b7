use thiserror::Error;

pub const EDNA_ERROR_DATASET_NOT_FOUND: &str = "edna_dataset_not_found";
pub const EDNA_ERROR_QUERY_RESULT_NOT_FOUND: &str = "edna_query_result_not_found";
pub const EDNA_ERROR_INVALID_SORT_KEY: &str = "edna_invalid_sort_key";
pub const EDNA_ERROR_INVALID_SORT_DIRECTION: &str = "edna_invalid_sort_direction";
pub const EDNA_ERROR_INVALID_VIEW: &str = "edna_invalid_view";

/// Recoverable conditions raised by the dashboard core.
///
/// None of these escalate to the user: callers absorb them into a
/// placeholder panel, an empty state, or a no-op.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DashboardError {
    #[error("dataset '{dataset_id}' was not found")]
    DatasetNotFound { dataset_id: String },
    #[error("query result '{query_id}' was not found")]
    QueryResultNotFound { query_id: String },
    #[error("unsupported cluster sort key '{key}'")]
    InvalidSortKey { key: String },
    #[error("unsupported sort direction '{direction}'")]
    InvalidSortDirection { direction: String },
    #[error("unsupported dashboard view '{token}'")]
    InvalidView { token: String },
}

impl DashboardError {
    /// Stable machine code surfaced by JSON responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DatasetNotFound { .. } => EDNA_ERROR_DATASET_NOT_FOUND,
            Self::QueryResultNotFound { .. } => EDNA_ERROR_QUERY_RESULT_NOT_FOUND,
            Self::InvalidSortKey { .. } => EDNA_ERROR_INVALID_SORT_KEY,
            Self::InvalidSortDirection { .. } => EDNA_ERROR_INVALID_SORT_DIRECTION,
            Self::InvalidView { .. } => EDNA_ERROR_INVALID_VIEW,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::DatasetNotFound { .. } | Self::QueryResultNotFound { .. }
        )
    }
}
