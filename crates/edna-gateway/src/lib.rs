//! HTTP surface of the EDeepNA dashboard.
pub mod dashboard_server;

pub use dashboard_server::*;
