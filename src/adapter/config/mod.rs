//! Configuration Adapters
//!
//! 設定ファイルの読み込み

pub mod rename_rules;

pub use rename_rules::load_rename_rules;
