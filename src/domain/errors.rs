//! # Domain Errors
//!
//! バッチを中断する致命的エラーと、ユニット単位で吸収されるエラー

use std::path::PathBuf;
use thiserror::Error;

/// バッチ全体を中断するエラー
///
/// いずれもディスパッチ前に発生する
#[derive(Debug, Error)]
pub enum ImportError {
    /// マニフェストが存在しない・読めない・不正
    #[error("invalid manifest {}: {reason}", .path.display())]
    Manifest { path: PathBuf, reason: String },

    /// リネームルールファイルが不正
    #[error("invalid rename rule file {}{}: {reason}", .path.display(), line_suffix(.line))]
    Configuration {
        path: PathBuf,
        line: Option<usize>,
        reason: String,
    },

    /// デフォルトクライアントの生成に失敗
    #[error("failed to create tracking client: {0}")]
    Client(String),
}

impl ImportError {
    pub fn manifest(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ImportError::Manifest {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn configuration(
        path: impl Into<PathBuf>,
        line: Option<usize>,
        reason: impl Into<String>,
    ) -> Self {
        ImportError::Configuration {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map(|l| format!(" (line {})", l)).unwrap_or_default()
}

/// 単一ユニットのインポートエラー
///
/// タスク境界で捕捉され、Failed の結果に変換される。呼び出し元には伝播しない。
#[derive(Debug, Error)]
#[error("failed to import experiment '{name}' (unit {unit_id})")]
pub struct UnitImportError {
    pub unit_id: String,
    pub name: String,
    #[source]
    pub source: anyhow::Error,
}

impl UnitImportError {
    /// エラーチェーン全体を1行に連結
    pub fn chain_to_string(&self) -> String {
        let mut messages = vec![self.to_string()];
        for cause in self.source.chain() {
            messages.push(cause.to_string());
        }
        messages.join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_error_message() {
        let err = ImportError::manifest("/in/experiments.json", "missing 'experiments'");
        assert_eq!(
            err.to_string(),
            "invalid manifest /in/experiments.json: missing 'experiments'"
        );
    }

    #[test]
    fn test_configuration_error_message_with_line() {
        let err = ImportError::configuration("/rules.csv", Some(3), "empty pattern");
        assert_eq!(
            err.to_string(),
            "invalid rename rule file /rules.csv (line 3): empty pattern"
        );
    }

    #[test]
    fn test_configuration_error_message_without_line() {
        let err = ImportError::configuration("/rules.csv", None, "not found");
        assert_eq!(err.to_string(), "invalid rename rule file /rules.csv: not found");
    }

    #[test]
    fn test_unit_error_chain() {
        let source = anyhow::anyhow!("connection refused").context("create experiment");
        let err = UnitImportError {
            unit_id: "2".to_string(),
            name: "expB".to_string(),
            source,
        };
        assert_eq!(
            err.chain_to_string(),
            "failed to import experiment 'expB' (unit 2) | create experiment | connection refused"
        );
    }
}
