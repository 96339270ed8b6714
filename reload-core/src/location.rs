//! ソース位置

use std::fmt;

/// ワークスペース内の正規化されたスクリプトパス
///
/// 通常は [`Workspace::normalize`](crate::Workspace::normalize) が生成する `/` 区切りの
/// ワークスペース相対パスで、`.` や `..` を含まず、空にはなりません。
/// ワークスペース外を指す報告パスだけは、区切り文字を揃えたうえでそのまま保持します。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScriptPath(String);

impl ScriptPath {
    pub(crate) fn from_components(components: &[&str]) -> Self {
        Self(components.join("/"))
    }

    pub(crate) fn verbatim(raw: &str) -> Self {
        Self(raw.replace('\\', "/"))
    }

    /// パス文字列を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for ScriptPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ソース位置（スクリプトパスと行番号）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    path: ScriptPath,
    line: u32,
}

impl Location {
    /// ソース位置を作成する
    pub fn new(path: ScriptPath, line: u32) -> Self {
        Self { path, line }
    }

    /// スクリプトパスを取得する
    pub fn path(&self) -> &ScriptPath {
        &self.path
    }

    /// 行番号を取得する
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.line)
    }
}
