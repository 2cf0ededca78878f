//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **ImportUnit**: マニフェストに記載されたインポート対象
//! - **RenameRuleSet**: 名前変換ルールのバリューオブジェクト
//! - **UnitOutcome / BatchReport**: ユニットごとの結果とバッチの集計

pub mod import_unit;
pub mod rename_rule;
pub mod unit_outcome;

pub use import_unit::ImportUnit;
pub use rename_rule::{EntityKind, RenameRule, RenameRuleSet};
pub use unit_outcome::{BatchReport, UnitOutcome, UnitStatus};
