//! Adapter Layer
//!
//! 外部システム（トラッキングサーバー, ファイルシステム）との統合

pub mod config;
pub mod mlflow;
pub mod repositories;
