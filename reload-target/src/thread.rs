//! スレッド管理機能
//!
//! リモートで動作するスクリプトランタイムは単一のスクリプトスレッドとして表現されます。
//! コアはこのスレッドを停止状態へ遷移させるだけで、再開は外部（デバッグフロントエンド）が行います。

use std::sync::Mutex;
use tracing::debug;

/// スレッドID
pub type ThreadId = u32;

/// 停止の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspendMode {
    /// ブレークポイントによる停止（ハード）
    Breakpoint,
    /// ステップ実行による停止（ソフト）
    Step,
}

impl SuspendMode {
    /// `suspend(hard)` のフラグから停止の種類を得る
    pub fn from_hard(hard: bool) -> Self {
        if hard {
            SuspendMode::Breakpoint
        } else {
            SuspendMode::Step
        }
    }

    /// ハード停止かどうか
    pub fn is_hard(self) -> bool {
        matches!(self, SuspendMode::Breakpoint)
    }
}

/// スレッドの実行状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadState {
    /// 実行中
    Running,
    /// 停止中
    Suspended(SuspendMode),
}

/// スレッドを停止させる能力
///
/// イベントセットの構築時に渡され、空でないイベントセットが得られたときに呼び出されます。
pub trait ThreadControl: Send + Sync {
    /// スレッドIDを取得する
    fn id(&self) -> ThreadId;

    /// スレッドを停止する
    ///
    /// `hard` が true ならブレークポイント停止、false ならステップ停止です。
    fn suspend(&self, hard: bool);
}

/// デバッグ対象のスレッド
#[derive(Debug)]
pub struct ReloadThread {
    tid: ThreadId,
    name: String,
    state: Mutex<ThreadState>,
}

impl ReloadThread {
    /// スレッドを作成する
    pub fn new(tid: ThreadId, name: impl Into<String>) -> Self {
        Self {
            tid,
            name: name.into(),
            state: Mutex::new(ThreadState::Running),
        }
    }

    /// スレッドIDを取得する
    pub fn tid(&self) -> ThreadId {
        self.tid
    }

    /// スレッド名を取得する
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 現在の実行状態を取得する
    pub fn state(&self) -> ThreadState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// 停止中かどうか
    pub fn is_suspended(&self) -> bool {
        matches!(self.state(), ThreadState::Suspended(_))
    }

    /// スレッドを再開する
    ///
    /// resume / step コマンドを受けたフロントエンド側から呼ばれます。
    pub fn resume(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        debug!("thread {} resumed (was {:?})", self.tid, *state);
        *state = ThreadState::Running;
    }
}

impl ThreadControl for ReloadThread {
    fn id(&self) -> ThreadId {
        self.tid
    }

    fn suspend(&self, hard: bool) {
        let mode = SuspendMode::from_hard(hard);
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        debug!("thread {} suspended ({:?})", self.tid, mode);
        *state = ThreadState::Suspended(mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_thread_is_running() {
        let thread = ReloadThread::new(1, "main");
        assert_eq!(thread.state(), ThreadState::Running);
        assert!(!thread.is_suspended());
    }

    #[test]
    fn test_suspend_modes() {
        let thread = ReloadThread::new(1, "main");

        thread.suspend(true);
        assert_eq!(thread.state(), ThreadState::Suspended(SuspendMode::Breakpoint));

        thread.suspend(false);
        assert_eq!(thread.state(), ThreadState::Suspended(SuspendMode::Step));
    }

    #[test]
    fn test_resume() {
        let thread = ReloadThread::new(1, "main");
        thread.suspend(true);
        thread.resume();
        assert_eq!(thread.state(), ThreadState::Running);
    }

    #[test]
    fn test_suspend_mode_from_hard() {
        assert!(SuspendMode::from_hard(true).is_hard());
        assert!(!SuspendMode::from_hard(false).is_hard());
    }
}
