//! Reload デバッグブリッジのコア機能
//!
//! このクレートは、リモートのスクリプトランタイムからプッシュされる通知を、
//! プル型のデバッグモデル（`remove()` / `remove(timeout)`）のイベントセットに変換します。
//! 通知のバッファリング、リクエストとの照合、イベントセットの構築、スレッドの停止を扱います。

pub mod breakpoint;
pub mod builder;
pub mod command;
pub mod config;
pub mod errors;
pub mod event;
pub mod location;
pub mod mailbox;
pub mod matcher;
pub mod notification;
pub mod parse;
pub mod queue;
pub mod request;
pub mod session;
pub mod workspace;

pub use breakpoint::{BreakpointLookup, LineBreakpoint, WorkspaceBreakpoints};
pub use builder::EventSetBuilder;
pub use command::{Command, REPORT_BREAKPOINT};
pub use config::BridgeConfig;
pub use errors::BridgeError;
pub use event::{BreakpointEvent, DebugEvent, EventSet, StepEvent};
pub use location::{Location, ScriptPath};
pub use mailbox::{Mailbox, NotificationSender, Take};
pub use matcher::LocationMatcher;
pub use notification::{BreakpointReport, Notification};
pub use queue::{EventQueue, Polled};
pub use request::{
    BreakpointRequest, EventRequestManager, RequestId, RequestRegistry, StepDepth, StepRequest,
};
pub use session::Session;
pub use workspace::Workspace;

// 他のクレートから使用するために再エクスポート
pub use reload_target::{ReloadThread, ReloadVm, SuspendMode, ThreadControl, ThreadId, ThreadState};

/// ブリッジの結果型
pub type Result<T> = anyhow::Result<T>;
