//! # Import Experiments Use Case
//!
//! エクスペリメント一括インポートユースケース

use chrono::Utc;
use log::{error, info};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinHandle, JoinSet};
use uuid::Uuid;

use crate::application::dto::batch_request::BatchRequest;
use crate::domain::entities::import_unit::ImportUnit;
use crate::domain::entities::rename_rule::{EntityKind, RenameRuleSet};
use crate::domain::entities::unit_outcome::{BatchReport, UnitOutcome};
use crate::domain::errors::{ImportError, UnitImportError};
use crate::domain::repositories::experiment_importer::{ExperimentImporter, ImportPolicy};
use crate::domain::repositories::manifest_repository::ManifestRepository;
use crate::domain::repositories::tracking_client::TrackingClient;
use crate::domain::services::rename_resolver::RenameResolver;

/// エクスペリメント一括インポートユースケース
///
/// マニフェストの全ユニットを上限付きのワーカープールでインポートする。
/// ユニット単位の失敗はタスク境界で吸収され、バッチは中断されない。
pub struct ImportExperimentsUseCase<M: ManifestRepository, I: ExperimentImporter> {
    manifest_repository: Arc<M>,
    importer: Arc<I>,
}

/// 1タスクに渡す入力
struct UnitTask {
    unit: ImportUnit,
    bundle_dir: PathBuf,
    policy: ImportPolicy,
    rename_rules: Arc<RenameRuleSet>,
}

/// ドロップ時にタスクを中断する `JoinHandle`
///
/// 外側のタスクが中断されたとき、内側のインポートだけが残り続けないようにする
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl<M, I> ImportExperimentsUseCase<M, I>
where
    M: ManifestRepository,
    I: ExperimentImporter + 'static,
{
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `manifest_repository` - マニフェストリポジトリ
    /// * `importer` - 単一エクスペリメントのインポーター
    pub fn new(manifest_repository: Arc<M>, importer: Arc<I>) -> Self {
        Self {
            manifest_repository,
            importer,
        }
    }

    /// バッチを実行する
    ///
    /// 全ユニットをマニフェスト順に投入した後、プール全体の完了を1度だけ待つ。
    /// 完了順は保証しない。
    ///
    /// # Arguments
    ///
    /// * `request` - バッチリクエスト
    /// * `client` - インポート先クライアント（全ワーカーで共有）
    ///
    /// # Returns
    ///
    /// ユニットごとの結果を集めたレポート。全ユニットが失敗しても `Ok` を返す。
    ///
    /// # Errors
    ///
    /// マニフェストが読めない場合のみ `ImportError::Manifest` を返す（ディスパッチ前）
    pub async fn execute(
        &self,
        request: &BatchRequest,
        client: Arc<dyn TrackingClient>,
    ) -> Result<BatchReport, ImportError> {
        let started_at = Utc::now();
        let batch_id = Uuid::new_v4().to_string();

        let units = self
            .manifest_repository
            .read_units(&request.input_dir)
            .await?;

        info!("Experiments:");
        for unit in &units {
            info!("  {}", unit);
        }
        info!(
            "Importing {} experiments with {} worker(s) (batch {})",
            units.len(),
            request.concurrency,
            batch_id
        );

        let semaphore = Arc::new(Semaphore::new(request.concurrency.get()));
        let mut tasks = JoinSet::new();

        for unit in &units {
            let task = UnitTask {
                unit: unit.clone(),
                bundle_dir: unit.bundle_dir(&request.input_dir),
                policy: request.policy,
                rename_rules: request.rename_rules.clone(),
            };
            let semaphore = semaphore.clone();
            let importer = self.importer.clone();
            let client = client.clone();
            tasks.spawn(async move { run_unit(task, semaphore, importer, client).await });
        }

        let mut outcomes = Vec::with_capacity(units.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                // run_unit は内部でパニックを捕捉するため、ここに来るのはランタイム停止時のみ
                Err(e) => error!("Import task did not complete: {}", e),
            }
        }

        let report = BatchReport {
            batch_id,
            started_at,
            finished_at: Utc::now(),
            outcomes,
        };
        info!(
            "Batch {} finished: {} succeeded, {} failed",
            report.batch_id,
            report.succeeded_count(),
            report.failed_count()
        );

        Ok(report)
    }
}

/// 1ユニットをインポートし、結果を `UnitOutcome` に変換する
///
/// エラーもパニックもここで止める。兄弟タスクには影響しない。
async fn run_unit<I: ExperimentImporter + 'static>(
    task: UnitTask,
    semaphore: Arc<Semaphore>,
    importer: Arc<I>,
    client: Arc<dyn TrackingClient>,
) -> UnitOutcome {
    let unit_id = task.unit.id;
    let name =
        RenameResolver::resolve(&task.unit.name, EntityKind::Experiment, &task.rename_rules);

    let _permit = match semaphore.acquire_owned().await {
        Ok(permit) => permit,
        Err(e) => return UnitOutcome::failed(unit_id, name, e.to_string()),
    };

    info!(
        "Importing experiment '{}' from {}",
        name,
        task.bundle_dir.display()
    );

    // パニックを JoinError として受け取るため別タスクで実行する
    let mut import = AbortOnDrop(tokio::spawn({
        let name = name.clone();
        let bundle_dir = task.bundle_dir;
        let policy = task.policy;
        async move {
            importer
                .import_experiment(client.as_ref(), &name, &bundle_dir, policy)
                .await
        }
    }));

    let result = match (&mut import.0).await {
        Ok(result) => result,
        Err(e) => Err(anyhow::anyhow!("import task aborted: {}", e)),
    };

    match result {
        Ok(()) => {
            info!("✓ Imported experiment '{}' (unit {})", name, unit_id);
            UnitOutcome::succeeded(unit_id, name)
        }
        Err(source) => {
            let err = UnitImportError {
                unit_id,
                name,
                source,
            };
            error!("✗ {}: {:?}", err, err.source);
            let reason = err.chain_to_string();
            UnitOutcome::failed(err.unit_id, err.name, reason)
        }
    }
}
