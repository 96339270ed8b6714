//! デバッグセッション
//!
//! 仮想マシン、イベントリクエストマネージャ、イベントキューをまとめて保持します。

use crate::breakpoint::{BreakpointLookup, WorkspaceBreakpoints};
use crate::config::BridgeConfig;
use crate::mailbox::NotificationSender;
use crate::matcher::LocationMatcher;
use crate::queue::{EventQueue, Polled};
use crate::request::{EventRequestManager, RequestId, StepDepth};
use crate::workspace::Workspace;
use crate::Result;
use reload_target::ReloadVm;
use std::sync::Arc;

/// デバッグセッション
pub struct Session {
    /// 設定
    config: BridgeConfig,
    /// デバッグ対象の仮想マシン
    vm: ReloadVm,
    /// イベントリクエスト管理
    requests: Arc<EventRequestManager>,
    /// イベントキュー
    queue: EventQueue,
}

impl Session {
    /// ワークスペースのパス解決でブレークポイント定義を検索するセッションを作成する
    pub fn new(config: BridgeConfig) -> Result<Self> {
        let lookup = WorkspaceBreakpoints::new(Workspace::new(config.workspace_root.clone()));
        Self::with_lookup(config, Arc::new(lookup))
    }

    /// ブレークポイント定義の検索サービスを指定してセッションを作成する
    pub fn with_lookup(config: BridgeConfig, lookup: Arc<dyn BreakpointLookup>) -> Result<Self> {
        let workspace = Workspace::new(config.workspace_root.clone());
        let vm = ReloadVm::new(config.vm_name.clone());
        let thread = vm.main_thread()?;
        let requests = Arc::new(EventRequestManager::new());
        let queue = EventQueue::new(
            LocationMatcher::new(workspace, lookup),
            requests.clone(),
            thread,
        );

        Ok(Self {
            config,
            vm,
            requests,
            queue,
        })
    }

    /// 設定を取得する
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// 仮想マシンを取得する
    pub fn vm(&self) -> &ReloadVm {
        &self.vm
    }

    /// イベントリクエストマネージャを取得する
    pub fn requests(&self) -> &EventRequestManager {
        &self.requests
    }

    /// イベントキューを取得する
    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }

    /// トランスポート側に渡す送信ハンドルを取得する
    pub fn sender(&self) -> NotificationSender {
        self.queue.sender()
    }

    /// ブレークポイントを設定する
    pub fn set_breakpoint(&self, source: &str, line: u32) -> RequestId {
        self.requests.create_breakpoint_request(source, line)
    }

    /// ステップ実行を開始する
    ///
    /// 既存のステップリクエストを置き換えてから、スレッドを再開します。
    pub fn step(&self, depth: StepDepth) -> Result<RequestId> {
        let thread = self.vm.main_thread()?;
        self.requests.delete_step_requests();
        let id = self.requests.create_step_request(thread.tid(), depth);
        self.vm.resume();
        Ok(id)
    }

    /// 実行を再開する
    ///
    /// ステップリクエストは破棄されます。
    pub fn resume(&self) {
        self.requests.delete_step_requests();
        self.vm.resume();
    }

    /// 設定されたタイムアウトでイベントキューから取り出す
    pub fn poll(&self) -> Polled {
        self.queue.remove_timeout(self.config.poll_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestRegistry;
    use reload_target::{SuspendMode, ThreadState};
    use serde_json::json;

    fn session() -> Session {
        Session::new(BridgeConfig::new("/w").with_poll_timeout(500)).unwrap()
    }

    #[test]
    fn test_breakpoint_then_resume() {
        let session = session();
        session.set_breakpoint("/w/src/a.js", 10);
        session
            .sender()
            .received_with("report-breakpoint", json!({"file": "src/a.js", "line": 10}));

        let set = session.poll().into_events().unwrap();
        assert_eq!(set.breakpoint_events().count(), 1);

        let main = session.vm().main_thread().unwrap();
        assert_eq!(main.state(), ThreadState::Suspended(SuspendMode::Breakpoint));

        session.resume();
        assert_eq!(main.state(), ThreadState::Running);
    }

    #[test]
    fn test_step_replaces_previous_step_request() {
        let session = session();
        session.step(StepDepth::Into).unwrap();
        let id = session.step(StepDepth::Over).unwrap();

        let steps = session.requests().step_requests();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].id, id);
        assert_eq!(steps[0].depth, StepDepth::Over);

        session.resume();
        assert!(session.requests().step_requests().is_empty());
    }

    #[test]
    fn test_poll_times_out() {
        let session = Session::new(BridgeConfig::new("/w").with_poll_timeout(10)).unwrap();
        assert!(session.poll().is_timed_out());
    }
}
