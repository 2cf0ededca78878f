//! # Experiment Importer Trait
//!
//! 単一エクスペリメントのインポート処理を抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

use super::tracking_client::TrackingClient;

/// インポートポリシー
///
/// 全ワーカーで共有される読み取り専用のフラグ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportPolicy {
    /// 権限もインポートする
    pub import_permissions: bool,
    /// エクスポート元の情報をタグとして付与する
    pub import_source_tags: bool,
    /// エクスポート元のユーザーIDを引き継ぐ
    pub use_source_user_id: bool,
}

/// エクスペリメントインポーター
///
/// 1つのバンドルを1つのエクスペリメントとしてインポートする
#[async_trait]
pub trait ExperimentImporter: Send + Sync {
    /// バンドルをインポートする
    ///
    /// # Arguments
    ///
    /// * `client` - インポート先のクライアント（全ワーカーで共有）
    /// * `experiment_name` - リネーム適用後のエクスペリメント名
    /// * `bundle_dir` - バンドルの場所 (`<input_dir>/<id>`)
    /// * `policy` - インポートポリシー
    ///
    /// # Errors
    ///
    /// インポートに失敗した場合にエラーを返す（呼び出し側でユニット単位に吸収される）
    async fn import_experiment(
        &self,
        client: &dyn TrackingClient,
        experiment_name: &str,
        bundle_dir: &Path,
        policy: ImportPolicy,
    ) -> Result<()>;
}
