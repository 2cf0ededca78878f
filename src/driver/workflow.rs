//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::Result;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use crate::adapter::config::load_rename_rules;
use crate::adapter::mlflow::bundle_importer::BundleExperimentImporter;
use crate::adapter::mlflow::client::MlflowRestClient;
use crate::adapter::repositories::json_manifest_repository::JsonManifestRepository;
use crate::application::dto::batch_request::BatchRequest;
use crate::application::use_cases::import_experiments::ImportExperimentsUseCase;
use crate::domain::entities::unit_outcome::BatchReport;
use crate::domain::errors::ImportError;
use crate::domain::repositories::experiment_importer::ImportPolicy;
use crate::domain::repositories::tracking_client::TrackingClient;
use crate::domain::services::worker_policy::WorkerPolicy;

use super::cli::Args;

/// Expand `~` in the input directory
pub fn expand_input_dir(input_dir: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(input_dir).as_ref())
}

/// Experiment Import Workflow
pub struct ImportExperimentsWorkflow {
    use_case: ImportExperimentsUseCase<JsonManifestRepository, BundleExperimentImporter>,
    client: Option<Arc<dyn TrackingClient>>,
}

impl ImportExperimentsWorkflow {
    /// Create a workflow that builds its own tracking client per run
    pub fn new() -> Self {
        let manifest_repo = Arc::new(JsonManifestRepository::new());
        let importer = Arc::new(BundleExperimentImporter::new());

        Self {
            use_case: ImportExperimentsUseCase::new(manifest_repo, importer),
            client: None,
        }
    }

    /// Create a workflow with an injected tracking client
    pub fn with_client(client: Arc<dyn TrackingClient>) -> Self {
        Self {
            client: Some(client),
            ..Self::new()
        }
    }

    fn resolve_client(&self, args: &Args) -> Result<Arc<dyn TrackingClient>, ImportError> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }
        let client = MlflowRestClient::new(&args.tracking_uri, args.tracking_token.clone())
            .map_err(|e| ImportError::Client(format!("{:#}", e)))?;
        info!("Created tracking client for {}", client.base_url());
        Ok(Arc::new(client))
    }

    /// Execute the import workflow
    ///
    /// Unit failures are reported in the returned `BatchReport`; only
    /// manifest, rename-rule and client errors are returned as `Err`.
    pub async fn execute(&self, args: Args) -> Result<BatchReport> {
        info!("Options:");
        for (key, value) in args.describe() {
            info!("  {}: {}", key, value);
        }

        let rename_rules = load_rename_rules(args.experiment_rename_file.as_deref())?;
        let workers = WorkerPolicy::resolve(args.use_threads, args.max_workers);

        let request = BatchRequest::new(
            expand_input_dir(&args.input_dir),
            ImportPolicy {
                import_permissions: args.import_permissions,
                import_source_tags: args.import_source_tags,
                use_source_user_id: args.use_src_user_id,
            },
            rename_rules,
            workers.get(),
        );

        println!("✓ Input directory: {}", request.input_dir.display());
        println!("✓ Rename rules: {}", request.rename_rules.len());
        println!("✓ Workers: {}", request.concurrency);

        let client = self.resolve_client(&args)?;
        let report = self.use_case.execute(&request, client).await?;

        println!(
            "✓ Imported {} of {} experiments ({} failed)",
            report.succeeded_count(),
            report.total(),
            report.failed_count()
        );
        for failure in report.failures() {
            println!(
                "  ✗ {} (unit {}): {}",
                failure.name,
                failure.unit_id,
                failure.error().unwrap_or_default()
            );
        }

        Ok(report)
    }
}

impl Default for ImportExperimentsWorkflow {
    fn default() -> Self {
        Self::new()
    }
}
