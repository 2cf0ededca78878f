//! expimport - Bulk Experiment Importer
//!
//! エクスポートディレクトリのエクスペリメントを一括インポート

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use expimport::driver::{Args, ImportExperimentsWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    // 個々のエクスペリメントの失敗はレポートに集約され、終了コードには影響しない
    let workflow = ImportExperimentsWorkflow::new();
    workflow.execute(args).await?;

    Ok(())
}
