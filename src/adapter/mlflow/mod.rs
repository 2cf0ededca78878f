//! MLflow Adapter Modules
//!
//! トラッキングサーバーとエクスポート形式のためのアダプターモジュール

pub mod bundle_importer;
pub mod client;
pub mod export_file;
