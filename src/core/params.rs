use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{AreaUnit, CompositeMethod};

/// Pipeline parameters suitable for config files and embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineParams {
    /// First acquisition date included in the query
    pub start: NaiveDate,
    /// First acquisition date excluded from the query (half-open range)
    pub end: NaiveDate,
    /// Scenes with a larger cloud fraction are excluded
    pub max_cloud_fraction: f64,
    /// NDVI classification threshold (mask is strictly greater-than)
    pub threshold: f64,
    pub composite: CompositeMethod,
    pub unit: AreaUnit,
    /// Worker threads for per-scene fetch and index computation
    pub concurrency: usize,
    /// Per-scene band fetch timeout; a scene that exceeds it is dropped
    pub fetch_timeout_secs: u64,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
            max_cloud_fraction: 0.2,
            threshold: 0.3,
            composite: CompositeMethod::Median,
            unit: AreaUnit::Hectares,
            concurrency: 4,
            fetch_timeout_secs: 30,
        }
    }
}

impl PipelineParams {
    /// Validate ranges before any computation starts.
    pub fn validate(&self) -> crate::Result<()> {
        if self.start >= self.end {
            return Err(crate::Error::InvalidArgument {
                arg: "date-range",
                value: format!("{}..{}", self.start, self.end),
            });
        }
        if !(0.0..=1.0).contains(&self.max_cloud_fraction) {
            return Err(crate::Error::InvalidArgument {
                arg: "max-cloud",
                value: self.max_cloud_fraction.to_string(),
            });
        }
        if !(-1.0..=1.0).contains(&self.threshold) {
            return Err(crate::Error::InvalidArgument {
                arg: "threshold",
                value: self.threshold.to_string(),
            });
        }
        if self.concurrency == 0 {
            return Err(crate::Error::InvalidArgument {
                arg: "concurrency",
                value: "0".to_string(),
            });
        }
        if self.fetch_timeout_secs == 0 {
            return Err(crate::Error::InvalidArgument {
                arg: "fetch-timeout",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}
