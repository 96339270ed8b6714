//! デバッグイベントとイベントセット

use crate::location::Location;
use crate::request::{BreakpointRequest, StepRequest};
use reload_target::{SuspendMode, ThreadId};

/// ブレークポイントイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakpointEvent {
    pub thread: ThreadId,
    pub location: Location,
    pub request: BreakpointRequest,
}

/// ステップイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEvent {
    pub thread: ThreadId,
    pub location: Location,
    pub request: StepRequest,
}

/// デバッグイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebugEvent {
    Breakpoint(BreakpointEvent),
    Step(StepEvent),
}

impl DebugEvent {
    /// イベントが発生したスレッド
    pub fn thread(&self) -> ThreadId {
        match self {
            DebugEvent::Breakpoint(e) => e.thread,
            DebugEvent::Step(e) => e.thread,
        }
    }

    /// イベントが発生した位置
    pub fn location(&self) -> &Location {
        match self {
            DebugEvent::Breakpoint(e) => &e.location,
            DebugEvent::Step(e) => &e.location,
        }
    }
}

/// イベントセット
///
/// 1回のポーリングで返される、順序付きのイベント列です。空の場合もあります。
/// 構築が完了してから呼び出し元に渡されます。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventSet {
    events: Vec<DebugEvent>,
    suspend: Option<SuspendMode>,
}

impl EventSet {
    /// 空のイベントセットを作成する
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, event: DebugEvent) {
        self.events.push(event);
    }

    pub(crate) fn set_suspend(&mut self, mode: SuspendMode) {
        self.suspend = Some(mode);
    }

    /// イベントがないかどうか
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// イベント数を取得する
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// イベントを順に取得する
    pub fn iter(&self) -> impl Iterator<Item = &DebugEvent> {
        self.events.iter()
    }

    /// イベント列を取得する
    pub fn events(&self) -> &[DebugEvent] {
        &self.events
    }

    /// ブレークポイントイベントを取得する
    pub fn breakpoint_events(&self) -> impl Iterator<Item = &BreakpointEvent> {
        self.events.iter().filter_map(|e| match e {
            DebugEvent::Breakpoint(bp) => Some(bp),
            DebugEvent::Step(_) => None,
        })
    }

    /// ステップイベントを取得する
    pub fn step_events(&self) -> impl Iterator<Item = &StepEvent> {
        self.events.iter().filter_map(|e| match e {
            DebugEvent::Step(step) => Some(step),
            DebugEvent::Breakpoint(_) => None,
        })
    }

    /// このイベントセットでスレッドが停止した場合の停止の種類
    pub fn suspend_mode(&self) -> Option<SuspendMode> {
        self.suspend
    }
}

impl IntoIterator for EventSet {
    type Item = DebugEvent;
    type IntoIter = std::vec::IntoIter<DebugEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}
