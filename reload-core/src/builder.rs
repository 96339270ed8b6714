//! イベントセットの構築
//!
//! 1つの通知から、有効なリクエストに対応するイベントを順に組み立て、
//! 空でなければ対象スレッドを停止させます。

use crate::command::Command;
use crate::errors::BridgeError;
use crate::event::{BreakpointEvent, DebugEvent, EventSet, StepEvent};
use crate::location::{Location, ScriptPath};
use crate::matcher::LocationMatcher;
use crate::notification::{BreakpointReport, Notification};
use crate::request::RequestRegistry;
use reload_target::{SuspendMode, ThreadControl};
use tracing::{debug, trace};

/// イベントセットビルダー
pub struct EventSetBuilder<'a> {
    matcher: &'a LocationMatcher,
    thread: &'a dyn ThreadControl,
}

impl<'a> EventSetBuilder<'a> {
    /// ビルダーを作成する
    ///
    /// `thread` は空でないイベントセットが得られたときに停止させるスレッドです。
    pub fn new(matcher: &'a LocationMatcher, thread: &'a dyn ThreadControl) -> Self {
        Self { matcher, thread }
    }

    /// 通知からイベントセットを構築する
    ///
    /// リクエストは呼び出しごとにレジストリから読み直します。
    pub fn build(
        &self,
        notification: &Notification,
        registry: &dyn RequestRegistry,
    ) -> Result<EventSet, BridgeError> {
        match Command::parse(notification.command()) {
            Command::ReportBreakpoint => {
                let report = BreakpointReport::decode(notification)?;
                Ok(self.build_report(&report, registry))
            }
            Command::Unknown(name) => {
                trace!("ignoring runtime command '{}'", name);
                Ok(EventSet::new())
            }
        }
    }

    fn build_report(
        &self,
        report: &BreakpointReport,
        registry: &dyn RequestRegistry,
    ) -> EventSet {
        let mut event_set = EventSet::new();

        let Some((file, line)) = report.position() else {
            debug!("breakpoint report without file or line: {:?}", report);
            return event_set;
        };

        // ワークスペース外のパスには定義がないものとし、ステップイベントだけを生成する
        let (location, in_workspace) = match self.matcher.resolve(file, line) {
            Ok(location) => (location, true),
            Err(e) => {
                debug!("no breakpoint definition outside the workspace: {}", e);
                (Location::new(ScriptPath::verbatim(file), line), false)
            }
        };

        let breakpoint_requests = registry.breakpoint_requests();
        let step_requests = registry.step_requests();
        let thread = self.thread.id();

        // ステップ中の到達はブレークポイントイベントとして扱わない
        if !report.step && in_workspace {
            let definition = self.matcher.find_definition(file, line);
            for request in breakpoint_requests {
                if self.matcher.matches(&request, definition.as_ref()) {
                    event_set.push(DebugEvent::Breakpoint(BreakpointEvent {
                        thread,
                        location: location.clone(),
                        request,
                    }));
                }
            }
        }

        for request in step_requests {
            event_set.push(DebugEvent::Step(StepEvent {
                thread,
                location: location.clone(),
                request,
            }));
        }

        if !event_set.is_empty() {
            let hard = !report.step;
            debug!(
                "{} event(s) at {}, suspending thread {} (hard: {})",
                event_set.len(),
                location,
                thread,
                hard
            );
            self.thread.suspend(hard);
            event_set.set_suspend(SuspendMode::from_hard(hard));
        }

        event_set
    }
}
