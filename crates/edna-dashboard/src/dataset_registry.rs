use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DashboardError;

const DATASET_ID_PREFIX: &str = "ds";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
/// Opaque dataset identifier, unique within one registry.
pub struct DatasetId(String);

impl DatasetId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DatasetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: DatasetId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Time source used to stamp new datasets.
pub trait DashboardClock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl DashboardClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
/// Clock pinned to one instant; used by fixtures and tests.
pub struct FixedClock(pub DateTime<Utc>);

impl DashboardClock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Ordered, in-memory dataset collection for one dashboard session.
pub struct DatasetRegistry {
    datasets: Vec<Dataset>,
    next_sequence: u64,
    clock: Arc<dyn DashboardClock>,
}

impl fmt::Debug for DatasetRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetRegistry")
            .field("datasets", &self.datasets)
            .field("next_sequence", &self.next_sequence)
            .finish()
    }
}

impl Default for DatasetRegistry {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl DatasetRegistry {
    pub fn new(clock: Arc<dyn DashboardClock>) -> Self {
        Self {
            datasets: Vec::new(),
            next_sequence: 1,
            clock,
        }
    }

    /// Builds a registry pre-populated with already-processed datasets.
    ///
    /// Later duplicates of an id are dropped so the uniqueness invariant holds
    /// even for careless fixtures.
    pub fn with_datasets(clock: Arc<dyn DashboardClock>, datasets: Vec<Dataset>) -> Self {
        let mut registry = Self::new(clock);
        for dataset in datasets {
            if registry.contains(dataset.id.as_str()) {
                debug!(dataset_id = %dataset.id, "dropping duplicate seed dataset");
                continue;
            }
            registry.datasets.push(dataset);
        }
        registry
    }

    pub fn list(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    pub fn contains(&self, dataset_id: &str) -> bool {
        self.get(dataset_id).is_some()
    }

    pub fn get(&self, dataset_id: &str) -> Option<&Dataset> {
        self.datasets
            .iter()
            .find(|dataset| dataset.id.as_str() == dataset_id)
    }

    /// Appends a new dataset stamped with the registry clock.
    ///
    /// A blank name falls back to `Dataset <n>`.
    pub fn add(&mut self, name: &str) -> Dataset {
        let id = self.next_dataset_id();
        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            format!("Dataset {}", self.datasets.len() + 1)
        } else {
            trimmed.to_string()
        };
        let dataset = Dataset {
            id,
            name,
            created_at: self.clock.now(),
        };
        debug!(dataset_id = %dataset.id, name = %dataset.name, "dataset added");
        self.datasets.push(dataset.clone());
        dataset
    }

    pub fn remove(&mut self, dataset_id: &str) -> Result<Dataset, DashboardError> {
        let index = self
            .datasets
            .iter()
            .position(|dataset| dataset.id.as_str() == dataset_id)
            .ok_or_else(|| DashboardError::DatasetNotFound {
                dataset_id: dataset_id.to_string(),
            })?;
        Ok(self.datasets.remove(index))
    }

    fn next_dataset_id(&mut self) -> DatasetId {
        loop {
            let candidate = format!("{DATASET_ID_PREFIX}{}", self.next_sequence);
            self.next_sequence = self.next_sequence.saturating_add(1);
            if !self.contains(&candidate) {
                return DatasetId(candidate);
            }
        }
    }
}
