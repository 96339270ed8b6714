//! ブレークポイント定義の検索

use crate::workspace::Workspace;
use tracing::trace;

/// ワークスペース内の行ブレークポイント定義
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBreakpoint {
    /// IDE側のスクリプトパス（ワークスペースのフルパス形式）
    pub script_path: String,
    /// 行番号
    pub line: u32,
}

/// ファイルと行番号からブレークポイント定義を検索するサービス
pub trait BreakpointLookup: Send + Sync {
    /// 生のパスと行番号に対応するブレークポイント定義を検索する
    fn find_breakpoint(&self, path: &str, line: u32) -> Option<LineBreakpoint>;
}

/// ワークスペースのパス解決に基づく既定の検索サービス
///
/// ワークスペース内に解決できるパスであれば、その位置のブレークポイント定義を
/// フルパス形式（`/` で始まる）で返します。
pub struct WorkspaceBreakpoints {
    workspace: Workspace,
}

impl WorkspaceBreakpoints {
    /// 検索サービスを作成する
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }
}

impl BreakpointLookup for WorkspaceBreakpoints {
    fn find_breakpoint(&self, path: &str, line: u32) -> Option<LineBreakpoint> {
        match self.workspace.normalize(path) {
            Ok(script) => Some(LineBreakpoint {
                script_path: format!("/{}", script),
                line,
            }),
            Err(e) => {
                trace!("no breakpoint definition for {}:{}: {}", path, line, e);
                None
            }
        }
    }
}
