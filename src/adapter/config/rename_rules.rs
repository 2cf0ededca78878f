//! Rename Rule File Loader
//!
//! リネームルールファイルの読み込み
//!
//! 1行1ルール、カンマ区切り: `pattern,replacement[,kind]`
//!
//! ```text
//! # 旧ユーザーのエクスペリメントを共有フォルダへ
//! /Users/alice@example.com/,/Shared/alice/
//! sklearn_,legacy_sklearn_,experiment
//! ```

use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::entities::rename_rule::{EntityKind, RenameRule, RenameRuleSet};
use crate::domain::errors::ImportError;

const COMMENT_PREFIX: char = '#';

/// リネームルールを読み込む
///
/// パスが指定されていない場合は空のルールセット（恒等変換）を返す。
///
/// # Errors
///
/// ファイルが読めない、または不正な行がある場合に `ImportError::Configuration` を返す
pub fn load_rename_rules(path: Option<&str>) -> Result<RenameRuleSet, ImportError> {
    let Some(path) = path else {
        return Ok(RenameRuleSet::empty());
    };

    let expanded = shellexpand::tilde(path);
    let path = PathBuf::from(expanded.as_ref());

    let content = fs::read_to_string(&path)
        .map_err(|e| ImportError::configuration(&path, None, e.to_string()))?;

    let rules = parse_rename_rules(&path, &content)?;
    info!("Loaded {} rename rules from {}", rules.len(), path.display());
    Ok(rules)
}

/// ルールファイルの内容をパースする
pub fn parse_rename_rules(path: &Path, content: &str) -> Result<RenameRuleSet, ImportError> {
    let mut rules = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
            continue;
        }

        let rule = parse_line(line)
            .map_err(|reason| ImportError::configuration(path, Some(line_num + 1), reason))?;
        rules.push(rule);
    }

    Ok(RenameRuleSet::new(rules))
}

fn parse_line(line: &str) -> Result<RenameRule, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();

    let (pattern, replacement, kind) = match fields.as_slice() {
        [pattern, replacement] => (*pattern, *replacement, EntityKind::Experiment),
        [pattern, replacement, kind] => (*pattern, *replacement, kind.parse::<EntityKind>()?),
        _ => {
            return Err(format!(
                "expected 'pattern,replacement[,kind]' but found {} field(s)",
                fields.len()
            ))
        }
    };

    if pattern.is_empty() {
        return Err("empty pattern".to_string());
    }

    Ok(RenameRule::new(pattern, replacement, kind))
}
