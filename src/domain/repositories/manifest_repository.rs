//! # Manifest Repository Trait
//!
//! インポート対象一覧（マニフェスト）の読み込みを抽象化

use async_trait::async_trait;
use std::path::Path;

use crate::domain::entities::import_unit::ImportUnit;
use crate::domain::errors::ImportError;

/// マニフェストのファイル名
pub const MANIFEST_FILE_NAME: &str = "experiments.json";

/// マニフェストリポジトリ
///
/// 入力ディレクトリからインポート単位の一覧を読み込む
#[async_trait]
pub trait ManifestRepository: Send + Sync {
    /// マニフェストを読み込む
    ///
    /// # Arguments
    ///
    /// * `input_dir` - エクスポートのルートディレクトリ
    ///
    /// # Returns
    ///
    /// マニフェスト順のインポート単位
    ///
    /// # Errors
    ///
    /// マニフェストが存在しない・読めない・不正な場合に `ImportError::Manifest` を返す
    async fn read_units(&self, input_dir: &Path) -> Result<Vec<ImportUnit>, ImportError>;
}
