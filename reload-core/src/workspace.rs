//! ワークスペースのパス正規化
//!
//! IDE側のブレークポイントはワークスペースのフルパス（`/project/src/a.js` や絶対パス）で、
//! ランタイムからの通知は生のパス文字列（`src/a.js` など）で位置を表します。
//! 両者はここで同じ [`ScriptPath`] に正規化してから比較します。

use crate::errors::BridgeError;
use crate::location::{Location, ScriptPath};
use std::path::PathBuf;

/// ワークスペース
#[derive(Debug, Clone)]
pub struct Workspace {
    /// `/` 区切りに揃えたルート（末尾の `/` なし）
    root_prefix: String,
}

impl Workspace {
    /// ワークスペースを作成する
    ///
    /// ルートが空の場合、絶対パスの接頭辞は取り除かれません。
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root: PathBuf = root.into();
        let root_prefix = root
            .to_string_lossy()
            .replace('\\', "/")
            .trim_end_matches('/')
            .to_string();
        Self { root_prefix }
    }

    /// 生のパス文字列をワークスペース相対のスクリプトパスに正規化する
    ///
    /// 1. `\` を `/` に揃える
    /// 2. ワークスペースルートの接頭辞を取り除く
    /// 3. 先頭の `/` はワークスペース相対として扱う
    /// 4. `.` と空要素を除き、`..` で一つ上に戻る（ルートより上には戻れない）
    pub fn normalize(&self, raw: &str) -> Result<ScriptPath, BridgeError> {
        let unified = raw.replace('\\', "/");
        let relative = self.strip_root(&unified);

        let mut components: Vec<&str> = Vec::new();
        for part in relative.split('/') {
            match part {
                "" | "." => {}
                ".." => {
                    if components.pop().is_none() {
                        return Err(BridgeError::OutsideWorkspace(raw.to_string()));
                    }
                }
                name => components.push(name),
            }
        }

        if components.is_empty() {
            return Err(BridgeError::EmptyPath(raw.to_string()));
        }
        Ok(ScriptPath::from_components(&components))
    }

    /// 生のパスと行番号からソース位置を作成する
    pub fn resolve(&self, raw: &str, line: u32) -> Result<Location, BridgeError> {
        Ok(Location::new(self.normalize(raw)?, line))
    }

    fn strip_root<'a>(&self, path: &'a str) -> &'a str {
        if self.root_prefix.is_empty() {
            return path;
        }
        match path.strip_prefix(self.root_prefix.as_str()) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => path,
        }
    }
}
