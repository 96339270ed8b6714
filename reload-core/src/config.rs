//! ブリッジの設定

use std::path::PathBuf;

/// 既定のポーリングタイムアウト（ミリ秒）。0以下は無期限待ち
pub const DEFAULT_POLL_TIMEOUT_MS: i64 = 0;

/// 既定の仮想マシン名
pub const DEFAULT_VM_NAME: &str = "reload";

/// ブリッジの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// ワークスペースのルート
    pub workspace_root: PathBuf,
    /// `poll` で使うタイムアウト（ミリ秒）
    pub poll_timeout_ms: i64,
    /// 仮想マシン名
    pub vm_name: String,
}

impl BridgeConfig {
    /// 設定を作成する
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            poll_timeout_ms: DEFAULT_POLL_TIMEOUT_MS,
            vm_name: DEFAULT_VM_NAME.to_string(),
        }
    }

    /// ポーリングタイムアウトを設定する
    pub fn with_poll_timeout(mut self, timeout_ms: i64) -> Self {
        self.poll_timeout_ms = timeout_ms;
        self
    }

    /// 仮想マシン名を設定する
    pub fn with_vm_name(mut self, name: impl Into<String>) -> Self {
        self.vm_name = name.into();
        self
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new("")
    }
}
