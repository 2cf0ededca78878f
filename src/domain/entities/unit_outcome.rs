//! # Unit Outcome / Batch Report
//!
//! ユニットごとのインポート結果と、バッチ全体の集計

use chrono::{DateTime, Utc};

/// ユニットの終端状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitStatus {
    Succeeded,
    /// 失敗理由（エラーチェーンを連結した文字列）
    Failed(String),
}

/// ユニットのインポート結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOutcome {
    pub unit_id: String,
    /// リネーム適用後の名前
    pub name: String,
    pub status: UnitStatus,
}

impl UnitOutcome {
    pub fn succeeded(unit_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            unit_id: unit_id.into(),
            name: name.into(),
            status: UnitStatus::Succeeded,
        }
    }

    pub fn failed(
        unit_id: impl Into<String>,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            unit_id: unit_id.into(),
            name: name.into(),
            status: UnitStatus::Failed(reason.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == UnitStatus::Succeeded
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            UnitStatus::Succeeded => None,
            UnitStatus::Failed(reason) => Some(reason.as_str()),
        }
    }
}

/// バッチ実行結果のレポート
///
/// 個々のユニットが失敗してもバッチ自体は成功扱い。
/// 失敗の有無はこのレポート（とログ）でのみ観測できる。
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub batch_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// 完了順（マニフェスト順ではない）
    pub outcomes: Vec<UnitOutcome>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.total() - self.succeeded_count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &UnitOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn outcome_for(&self, unit_id: &str) -> Option<&UnitOutcome> {
        self.outcomes.iter().find(|o| o.unit_id == unit_id)
    }
}
