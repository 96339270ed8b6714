//! 通知位置とブレークポイントリクエストの照合

use crate::breakpoint::{BreakpointLookup, LineBreakpoint};
use crate::errors::BridgeError;
use crate::location::Location;
use crate::request::BreakpointRequest;
use crate::workspace::Workspace;
use std::sync::Arc;
use tracing::debug;

/// ロケーションマッチャ
pub struct LocationMatcher {
    workspace: Workspace,
    lookup: Arc<dyn BreakpointLookup>,
}

impl LocationMatcher {
    /// ロケーションマッチャを作成する
    pub fn new(workspace: Workspace, lookup: Arc<dyn BreakpointLookup>) -> Self {
        Self { workspace, lookup }
    }

    /// 報告された位置を正規化する
    ///
    /// パスが正規化できない場合はエラーになります。
    pub fn resolve(&self, file: &str, line: u32) -> Result<Location, BridgeError> {
        self.workspace.resolve(file, line)
    }

    /// 報告された生の位置に対応するブレークポイント定義を検索する
    pub fn find_definition(&self, file: &str, line: u32) -> Option<LineBreakpoint> {
        self.lookup.find_breakpoint(file, line)
    }

    /// ブレークポイントリクエストが定義と同じ位置を指すか判定する
    ///
    /// 行番号が一致し、かつ双方のパスが同じスクリプトパスに正規化される場合に true です。
    /// 定義がない場合や、どちらかのパスが正規化できない場合は false です。
    pub fn matches(
        &self,
        request: &BreakpointRequest,
        definition: Option<&LineBreakpoint>,
    ) -> bool {
        let Some(definition) = definition else {
            return false;
        };
        if definition.line != request.line {
            return false;
        }

        let request_path = match self.workspace.normalize(&request.source) {
            Ok(path) => path,
            Err(e) => {
                debug!("skipping breakpoint request {}: {}", request.id, e);
                return false;
            }
        };
        match self.workspace.normalize(&definition.script_path) {
            Ok(path) => path == request_path,
            Err(e) => {
                debug!("unresolvable breakpoint definition {:?}: {}", definition, e);
                false
            }
        }
    }
}
