//! # Tracking Client Trait
//!
//! インポート先トラッキングサーバーへのハンドルを抽象化

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// Handle to the target tracking system.
///
/// A single instance is shared by every worker of a batch, so implementations
/// must be safe for concurrent use without external locking.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TrackingClient: Send + Sync {
    /// Look up an experiment by name, returning its id if it exists
    async fn get_experiment_id_by_name(&self, name: &str) -> Result<Option<String>>;

    /// Create an experiment and return its id
    async fn create_experiment(&self, name: &str) -> Result<String>;

    /// Set a single tag on an experiment
    async fn set_experiment_tag(&self, experiment_id: &str, key: &str, value: &str) -> Result<()>;
}
