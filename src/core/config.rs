use serde::{Deserialize, Serialize};
use crate::core::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_result_document_count: usize,   // Top-k cut for every find
    pub relevance_epsilon: f64,             // Relevances closer than this are ties
    pub concurrent_buckets: usize,          // Lock stripes for parallel ranking
    pub request_window: usize,              // Requests remembered by RequestQueue
    pub worker_threads: usize,              // Size of the server's rayon pool
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_result_document_count: 5,
            relevance_epsilon: 1e-6,
            concurrent_buckets: 100,
            request_window: 1440,                  // One request per minute for a day
            worker_threads: num_cpus::get(),
        }
    }
}

impl Config {
    /// Parse a config from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.concurrent_buckets == 0 {
            return Err(Error::invalid_argument("concurrent_buckets must be greater than zero"));
        }
        if !(self.relevance_epsilon >= 0.0) {
            return Err(Error::invalid_argument(format!(
                "relevance_epsilon must be non-negative, got {}",
                self.relevance_epsilon
            )));
        }
        Ok(())
    }
}
