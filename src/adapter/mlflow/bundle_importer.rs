//! Bundle Experiment Importer
//!
//! ExperimentImporterのデフォルト実装（エクスポートバンドルの `experiment.json` を取り込む）

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::export_file::read_export_file;
use crate::domain::repositories::experiment_importer::{ExperimentImporter, ImportPolicy};
use crate::domain::repositories::tracking_client::TrackingClient;

pub const EXPERIMENT_FILE_NAME: &str = "experiment.json";
pub const SOURCE_TAG_PREFIX: &str = "mlflow_exim.src_exp.";

const RESERVED_TAG_PREFIX: &str = "mlflow.";
const NOTE_TAG: &str = "mlflow.note.content";
const USER_TAG: &str = "mlflow.user";

#[derive(Debug, Deserialize)]
struct ExperimentBundle {
    experiment: ExportedExperiment,
    #[serde(default)]
    runs: Vec<Value>,
    #[serde(default)]
    permissions: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ExportedExperiment {
    #[serde(default)]
    experiment_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    artifact_location: Option<String>,
    #[serde(default)]
    lifecycle_stage: Option<String>,
    #[serde(default)]
    creation_time: Option<i64>,
    #[serde(default)]
    last_update_time: Option<i64>,
    #[serde(default)]
    tags: ExportedTags,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    key: String,
    value: Value,
}

/// Tags are written either as a map or as a list of `{key, value}` pairs
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExportedTags {
    Map(BTreeMap<String, Value>),
    List(Vec<TagEntry>),
}

impl Default for ExportedTags {
    fn default() -> Self {
        ExportedTags::Map(BTreeMap::new())
    }
}

impl ExportedTags {
    fn into_map(self) -> BTreeMap<String, String> {
        match self {
            ExportedTags::Map(map) => map
                .into_iter()
                .map(|(k, v)| (k, value_to_string(v)))
                .collect(),
            ExportedTags::List(list) => list
                .into_iter()
                .map(|t| (t.key, value_to_string(t.value)))
                .collect(),
        }
    }
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// エクスポートバンドルからエクスペリメントを取り込むインポーター
///
/// 同名のエクスペリメントが既にあれば再利用し、なければ作成してタグを設定する。
/// ランの取り込みは行わない。
pub struct BundleExperimentImporter;

impl BundleExperimentImporter {
    /// 新しいインポーターを作成
    pub fn new() -> Self {
        Self
    }

    fn read_bundle(bundle_dir: &Path) -> Result<ExperimentBundle> {
        let path = bundle_dir.join(EXPERIMENT_FILE_NAME);
        let payload = read_export_file(&path)?;
        serde_json::from_value(payload)
            .with_context(|| format!("Invalid experiment bundle {}", path.display()))
    }

    /// 設定するタグを組み立てる
    fn build_tags(experiment: ExportedExperiment, policy: ImportPolicy) -> BTreeMap<String, String> {
        let mut tags: BTreeMap<String, String> = experiment
            .tags
            .into_map()
            .into_iter()
            .filter(|(key, _)| {
                !key.starts_with(RESERVED_TAG_PREFIX)
                    || key == NOTE_TAG
                    || (key == USER_TAG && policy.use_source_user_id)
            })
            .collect();

        if policy.import_source_tags {
            let source_fields = [
                ("experiment_id", experiment.experiment_id),
                ("name", experiment.name),
                ("artifact_location", experiment.artifact_location),
                ("lifecycle_stage", experiment.lifecycle_stage),
                ("creation_time", experiment.creation_time.map(|t| t.to_string())),
                ("last_update_time", experiment.last_update_time.map(|t| t.to_string())),
            ];
            for (field, value) in source_fields {
                if let Some(value) = value {
                    tags.insert(format!("{}{}", SOURCE_TAG_PREFIX, field), value);
                }
            }
        }

        tags
    }
}

#[async_trait]
impl ExperimentImporter for BundleExperimentImporter {
    async fn import_experiment(
        &self,
        client: &dyn TrackingClient,
        experiment_name: &str,
        bundle_dir: &Path,
        policy: ImportPolicy,
    ) -> Result<()> {
        let dir: PathBuf = bundle_dir.to_path_buf();
        let bundle = tokio::task::spawn_blocking(move || Self::read_bundle(&dir))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;

        let run_count = bundle.runs.len();
        let permissions = bundle.permissions;
        let tags = Self::build_tags(bundle.experiment, policy);

        let experiment_id = match client
            .get_experiment_id_by_name(experiment_name)
            .await
            .with_context(|| format!("Failed to look up experiment '{}'", experiment_name))?
        {
            Some(id) => {
                info!("Using existing experiment '{}' (id {})", experiment_name, id);
                id
            }
            None => {
                let id = client
                    .create_experiment(experiment_name)
                    .await
                    .with_context(|| format!("Failed to create experiment '{}'", experiment_name))?;
                info!("Created experiment '{}' (id {})", experiment_name, id);
                id
            }
        };

        for (key, value) in &tags {
            client
                .set_experiment_tag(&experiment_id, key, value)
                .await
                .with_context(|| {
                    format!("Failed to set tag '{}' on experiment '{}'", key, experiment_name)
                })?;
        }

        if policy.import_permissions && permissions.is_some() {
            warn!(
                "Permissions for '{}' are not supported by the tracking server API; skipped",
                experiment_name
            );
        }

        info!(
            "Imported experiment '{}' with {} tags ({} runs in bundle)",
            experiment_name,
            tags.len(),
            run_count
        );

        Ok(())
    }
}

impl Default for BundleExperimentImporter {
    fn default() -> Self {
        Self::new()
    }
}
