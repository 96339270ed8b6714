//! デバッグ対象の仮想マシン

use crate::{ReloadThread, Result, ThreadId};
use std::sync::Arc;

/// メインスレッドのID
pub const MAIN_THREAD_ID: ThreadId = 1;

/// デバッグ対象の仮想マシン
///
/// リロードされたスクリプトを実行するブラウザ／デバイス上のランタイムを表します。
/// ランタイムは単一のスクリプトスレッドを報告するため、通常スレッドは1つです。
pub struct ReloadVm {
    name: String,
    threads: Vec<Arc<ReloadThread>>,
}

impl ReloadVm {
    /// メインスレッドを1つ持つ仮想マシンを作成する
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            threads: vec![Arc::new(ReloadThread::new(MAIN_THREAD_ID, "main"))],
        }
    }

    /// 仮想マシン名を取得する
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 全てのスレッドを取得する
    pub fn all_threads(&self) -> &[Arc<ReloadThread>] {
        &self.threads
    }

    /// 最初のスレッドを取得する
    ///
    /// 報告されたブレークポイントはこのスレッドに紐付けられます。
    pub fn main_thread(&self) -> Result<Arc<ReloadThread>> {
        self.threads
            .first()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("VM '{}' has no threads", self.name))
    }

    /// 全てのスレッドを再開する
    pub fn resume(&self) {
        for thread in &self.threads {
            thread.resume();
        }
    }
}
