//! JSON Manifest Repository Implementation
//!
//! ManifestRepositoryのファイルシステム実装（`experiments.json`）

use async_trait::async_trait;
use log::info;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::adapter::mlflow::export_file::read_export_file;
use crate::domain::entities::import_unit::ImportUnit;
use crate::domain::errors::ImportError;
use crate::domain::repositories::manifest_repository::{ManifestRepository, MANIFEST_FILE_NAME};

/// マニフェストの内部表現
#[derive(Debug, Deserialize)]
struct ManifestJson {
    experiments: Vec<ImportUnit>,
}

/// JSONファイルベースのマニフェストリポジトリ
pub struct JsonManifestRepository;

impl JsonManifestRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    /// マニフェストを読み込む（同期処理）
    fn read_units_sync(input_dir: &Path) -> Result<Vec<ImportUnit>, ImportError> {
        let path = input_dir.join(MANIFEST_FILE_NAME);

        let payload = read_export_file(&path)
            .map_err(|e| ImportError::manifest(&path, format!("{:#}", e)))?;

        let manifest: ManifestJson = serde_json::from_value(payload)
            .map_err(|e| ImportError::manifest(&path, e.to_string()))?;

        let mut seen = HashSet::new();
        for unit in &manifest.experiments {
            if unit.id.is_empty() {
                return Err(ImportError::manifest(
                    &path,
                    format!("experiment '{}' has an empty id", unit.name),
                ));
            }
            if !unit.has_single_segment_id() {
                return Err(ImportError::manifest(
                    &path,
                    format!(
                        "experiment id '{}' is not a single directory name under {}",
                        unit.id,
                        input_dir.display()
                    ),
                ));
            }
            if !seen.insert(unit.id.as_str()) {
                return Err(ImportError::manifest(
                    &path,
                    format!("duplicate experiment id '{}'", unit.id),
                ));
            }
        }

        info!(
            "Read {} experiments from {}",
            manifest.experiments.len(),
            path.display()
        );

        Ok(manifest.experiments)
    }
}

#[async_trait]
impl ManifestRepository for JsonManifestRepository {
    async fn read_units(&self, input_dir: &Path) -> Result<Vec<ImportUnit>, ImportError> {
        let input_dir: PathBuf = input_dir.to_path_buf();
        let manifest_path = input_dir.join(MANIFEST_FILE_NAME);
        tokio::task::spawn_blocking(move || Self::read_units_sync(&input_dir))
            .await
            .map_err(|e| {
                ImportError::manifest(manifest_path, format!("Failed to spawn blocking task: {}", e))
            })?
    }
}

impl Default for JsonManifestRepository {
    fn default() -> Self {
        Self::new()
    }
}
