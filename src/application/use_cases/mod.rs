//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **ImportExperimentsUseCase**: エクスペリメントの一括インポート

pub mod import_experiments;
