//! Reload ターゲット制御
//!
//! このクレートは、リモートで動作するスクリプトランタイムのスレッド表現を提供します。
//! スレッドの停止・再開と、スレッド一覧を持つ仮想マシンを扱います。

pub mod thread;
pub mod vm;

pub use thread::{ReloadThread, SuspendMode, ThreadControl, ThreadId, ThreadState};
pub use vm::{ReloadVm, MAIN_THREAD_ID};

/// ターゲット制御の結果型
pub type Result<T> = anyhow::Result<T>;
