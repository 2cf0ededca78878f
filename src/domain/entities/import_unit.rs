//! # ImportUnit Entity
//!
//! インポート対象のエクスペリメント（マニフェストの1エントリ）

use serde::Deserialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// インポート単位
///
/// マニフェストから読み込まれた後は不変。
/// `id` はバッチ内で一意で、入力ディレクトリ配下のサブディレクトリ名でもある。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportUnit {
    /// エクスポート元のエクスペリメントID（バンドルのサブパス）
    pub id: String,
    /// エクスポート元のエクスペリメント名
    pub name: String,
}

impl ImportUnit {
    /// 新しいインポート単位を作成
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// `id` が入力ディレクトリ直下の1階層を指すか
    ///
    /// 区切り文字・`.`・`..`・絶対パスを含む `id` は別のディレクトリに解決されうるため不可。
    pub fn has_single_segment_id(&self) -> bool {
        let mut components = Path::new(&self.id).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(segment)), None) => segment == self.id.as_str(),
            _ => false,
        }
    }

    /// このユニットのバンドルの場所 (`<input_dir>/<id>`)
    pub fn bundle_dir(&self, input_dir: &Path) -> PathBuf {
        input_dir.join(&self.id)
    }
}

impl fmt::Display for ImportUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id={} name='{}'", self.id, self.name)
    }
}
