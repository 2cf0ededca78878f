//! # Domain Services
//!
//! エンティティに属さないビジネスルール
//!
//! - **RenameResolver**: 実効名の解決
//! - **WorkerPolicy**: 並列実行数の決定

pub mod rename_resolver;
pub mod worker_policy;
