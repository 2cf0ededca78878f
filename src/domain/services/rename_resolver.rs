//! # Rename Resolver Service
//!
//! リネームルールから実効名を求めるサービス

use log::info;

use crate::domain::entities::rename_rule::{EntityKind, RenameRuleSet};

/// リネーム解決サービス
///
/// 状態を持たない純粋関数のみ。複数ワーカーから同時に呼び出してよい。
pub struct RenameResolver;

impl RenameResolver {
    /// 実効名を求める
    ///
    /// ルールはロード順に評価され、最初にマッチしたルールが適用される。
    /// マッチしない場合は元の名前をそのまま返す。
    ///
    /// # Arguments
    ///
    /// * `original_name` - 元の名前
    /// * `kind` - エンティティ種別
    /// * `rules` - リネームルールセット
    ///
    /// # 例
    ///
    /// ```
    /// use expimport::domain::entities::rename_rule::{EntityKind, RenameRule, RenameRuleSet};
    /// use expimport::domain::services::rename_resolver::RenameResolver;
    ///
    /// let rules = RenameRuleSet::new(vec![
    ///     RenameRule::new("/Users/alice/", "/Shared/", EntityKind::Experiment),
    /// ]);
    ///
    /// assert_eq!(
    ///     RenameResolver::resolve("/Users/alice/churn", EntityKind::Experiment, &rules),
    ///     "/Shared/churn"
    /// );
    /// assert_eq!(
    ///     RenameResolver::resolve("/Users/bob/churn", EntityKind::Experiment, &rules),
    ///     "/Users/bob/churn"
    /// );
    /// ```
    pub fn resolve(original_name: &str, kind: EntityKind, rules: &RenameRuleSet) -> String {
        for rule in rules.rules() {
            if let Some(new_name) = rule.apply(original_name, kind) {
                info!("Renaming {} '{}' to '{}'", kind, original_name, new_name);
                return new_name;
            }
        }
        original_name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::rename_rule::RenameRule;

    #[test]
    fn test_resolve_empty_rules_is_identity() {
        let rules = RenameRuleSet::empty();
        for name in ["expA", "", "/Users/x/y", "名前"] {
            assert_eq!(RenameResolver::resolve(name, EntityKind::Experiment, &rules), name);
        }
    }

    #[test]
    fn test_resolve_non_matching_rules_is_identity() {
        let rules = RenameRuleSet::new(vec![
            RenameRule::new("foo", "bar", EntityKind::Experiment),
            RenameRule::new("baz", "qux", EntityKind::Experiment),
        ]);
        assert_eq!(
            RenameResolver::resolve("expA", EntityKind::Experiment, &rules),
            "expA"
        );
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let rules = RenameRuleSet::new(vec![
            RenameRule::new("exp", "first_", EntityKind::Experiment),
            RenameRule::new("expA", "second", EntityKind::Experiment),
        ]);
        assert_eq!(
            RenameResolver::resolve("expA", EntityKind::Experiment, &rules),
            "first_A"
        );
    }

    #[test]
    fn test_resolve_first_match_wins_identical_patterns() {
        let rules = RenameRuleSet::new(vec![
            RenameRule::new("expA", "one", EntityKind::Experiment),
            RenameRule::new("expA", "two", EntityKind::Experiment),
        ]);
        assert_eq!(
            RenameResolver::resolve("expA", EntityKind::Experiment, &rules),
            "one"
        );
    }

    #[test]
    fn test_resolve_skips_non_matching_before_match() {
        let rules = RenameRuleSet::new(vec![
            RenameRule::new("other", "x", EntityKind::Experiment),
            RenameRule::new("expA", "expA_renamed", EntityKind::Experiment),
        ]);
        assert_eq!(
            RenameResolver::resolve("expA", EntityKind::Experiment, &rules),
            "expA_renamed"
        );
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let rules = RenameRuleSet::new(vec![RenameRule::new(
            "a",
            "b",
            EntityKind::Experiment,
        )]);
        let first = RenameResolver::resolve("abc", EntityKind::Experiment, &rules);
        let second = RenameResolver::resolve("abc", EntityKind::Experiment, &rules);
        assert_eq!(first, second);
        assert_eq!(first, "bbc");
    }
}
