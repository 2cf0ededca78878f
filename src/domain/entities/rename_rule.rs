//! # Rename Rule Value Objects
//!
//! 名前変換ルールとルールセット

use std::fmt;
use std::str::FromStr;

/// リネーム対象のエンティティ種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Experiment,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Experiment => "experiment",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "experiment" => Ok(EntityKind::Experiment),
            other => Err(format!("unknown entity kind '{}'", other)),
        }
    }
}

/// リネームルール
///
/// `pattern` で始まる名前の先頭部分を `replacement` に置き換える
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRule {
    pub pattern: String,
    pub replacement: String,
    pub kind: EntityKind,
}

impl RenameRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
            kind,
        }
    }

    /// ルールを名前に適用する。マッチしない場合は `None`
    pub fn apply(&self, name: &str, kind: EntityKind) -> Option<String> {
        if self.kind != kind || self.pattern.is_empty() {
            return None;
        }
        name.strip_prefix(self.pattern.as_str())
            .map(|rest| format!("{}{}", self.replacement, rest))
    }
}

/// リネームルールセット
///
/// ロード順を保持する。バッチ実行中は読み取り専用。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameRuleSet {
    rules: Vec<RenameRule>,
}

impl RenameRuleSet {
    pub fn new(rules: Vec<RenameRule>) -> Self {
        Self { rules }
    }

    /// ルールなし（恒等変換）
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &[RenameRule] {
        &self.rules
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_from_str() {
        assert_eq!("experiment".parse::<EntityKind>(), Ok(EntityKind::Experiment));
        assert_eq!(" Experiment ".parse::<EntityKind>(), Ok(EntityKind::Experiment));
        assert!("model".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_apply_prefix_keeps_suffix() {
        let rule = RenameRule::new("/Users/alice/", "/Shared/", EntityKind::Experiment);
        assert_eq!(
            rule.apply("/Users/alice/churn", EntityKind::Experiment),
            Some("/Shared/churn".to_string())
        );
    }

    #[test]
    fn test_apply_whole_name() {
        let rule = RenameRule::new("expA", "expA_renamed", EntityKind::Experiment);
        assert_eq!(
            rule.apply("expA", EntityKind::Experiment),
            Some("expA_renamed".to_string())
        );
    }

    #[test]
    fn test_apply_no_match() {
        let rule = RenameRule::new("expA", "x", EntityKind::Experiment);
        assert_eq!(rule.apply("other", EntityKind::Experiment), None);
        // 部分一致（先頭以外）はマッチしない
        assert_eq!(rule.apply("my-expA", EntityKind::Experiment), None);
    }

    #[test]
    fn test_apply_empty_pattern_never_matches() {
        let rule = RenameRule::new("", "prefix-", EntityKind::Experiment);
        assert_eq!(rule.apply("anything", EntityKind::Experiment), None);
    }

    #[test]
    fn test_rule_set_len() {
        let set = RenameRuleSet::new(vec![RenameRule::new("a", "b", EntityKind::Experiment)]);
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
        assert!(RenameRuleSet::empty().is_empty());
    }
}
