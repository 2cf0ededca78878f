//! # Batch Request DTO
//!
//! バッチインポートの実行パラメータ

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::entities::rename_rule::RenameRuleSet;
use crate::domain::repositories::experiment_importer::ImportPolicy;

/// バッチリクエスト
///
/// 1回の実行につき1度だけ構築され、全ワーカーから読み取り専用で参照される
#[derive(Debug, Clone)]
pub struct BatchRequest {
    /// エクスポートのルートディレクトリ
    pub input_dir: PathBuf,
    /// インポートポリシー
    pub policy: ImportPolicy,
    /// リネームルール（ワーカー間で共有）
    pub rename_rules: Arc<RenameRuleSet>,
    /// 同時に実行するインポート数の上限（常に1以上）
    pub concurrency: NonZeroUsize,
}

impl BatchRequest {
    /// 新しいバッチリクエストを作成します。
    ///
    /// `concurrency` に0を指定した場合は1として扱います。
    ///
    /// # 例
    ///
    /// ```
    /// use expimport::application::dto::batch_request::BatchRequest;
    /// use expimport::domain::entities::rename_rule::RenameRuleSet;
    /// use expimport::domain::repositories::experiment_importer::ImportPolicy;
    ///
    /// let request = BatchRequest::new(
    ///     "/data/export",
    ///     ImportPolicy::default(),
    ///     RenameRuleSet::empty(),
    ///     0,
    /// );
    ///
    /// assert_eq!(request.concurrency.get(), 1);
    /// ```
    pub fn new(
        input_dir: impl Into<PathBuf>,
        policy: ImportPolicy,
        rename_rules: RenameRuleSet,
        concurrency: usize,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            policy,
            rename_rules: Arc::new(rename_rules),
            concurrency: NonZeroUsize::new(concurrency).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_request_new() {
        let policy = ImportPolicy {
            import_permissions: true,
            import_source_tags: false,
            use_source_user_id: true,
        };
        let request = BatchRequest::new("/data/export", policy, RenameRuleSet::empty(), 4);

        assert_eq!(request.input_dir, PathBuf::from("/data/export"));
        assert_eq!(request.policy, policy);
        assert!(request.rename_rules.is_empty());
        assert_eq!(request.concurrency.get(), 4);
    }

    #[test]
    fn test_batch_request_zero_concurrency() {
        let request =
            BatchRequest::new("/data", ImportPolicy::default(), RenameRuleSet::empty(), 0);
        assert_eq!(request.concurrency.get(), 1);
    }

    #[test]
    fn test_batch_request_clone_shares_rules() {
        let request =
            BatchRequest::new("/data", ImportPolicy::default(), RenameRuleSet::empty(), 2);
        let cloned = request.clone();
        assert!(Arc::ptr_eq(&request.rename_rules, &cloned.rename_rules));
    }
}
