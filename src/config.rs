// src/config.rs
// =============================================================================
// Crawler construction parameters.
//
// All limits must be positive: a pool or host gate with zero permits would
// never let a task through and the crawl would hang forever.
// =============================================================================

use crate::error::CrawlerError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default for every numeric limit, also used by the command line
pub const DEFAULT_LIMIT: usize = 10;

/// How long close() waits for in-flight tasks before cancelling them
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of pages downloaded concurrently
    pub downloaders: usize,
    /// Maximum number of pages links are extracted from concurrently
    pub extractors: usize,
    /// Maximum number of pages downloaded concurrently from one host
    pub per_host: usize,
    /// Grace period for close(), applied once before and once after
    /// forced cancellation
    #[serde(with = "duration_secs")]
    pub shutdown_grace: Duration,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            downloaders: DEFAULT_LIMIT,
            extractors: DEFAULT_LIMIT,
            per_host: DEFAULT_LIMIT,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
        }
    }
}

impl CrawlerConfig {
    pub fn new(downloaders: usize, extractors: usize, per_host: usize) -> Self {
        Self {
            downloaders,
            extractors,
            per_host,
            ..Self::default()
        }
    }

    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    /// Rejects limits that would make the crawler unusable
    pub fn validate(&self) -> Result<(), CrawlerError> {
        let limits = [
            ("downloaders", self.downloaders),
            ("extractors", self.extractors),
            ("per_host", self.per_host),
        ];

        for (name, value) in limits {
            if value == 0 {
                return Err(CrawlerError::InvalidConfig(format!(
                    "{} must be at least 1",
                    name
                )));
            }
        }

        Ok(())
    }
}

// Durations are written as whole seconds in serialized configs
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
