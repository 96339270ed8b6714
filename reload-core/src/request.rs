//! イベントリクエスト管理
//!
//! デバッグセッションが登録したブレークポイントリクエストとステップリクエストを保持します。
//! イベントキューは [`RequestRegistry`] を通じて、ポーリングのたびに有効なリクエストを読み取ります。

use crate::errors::ERR_REQUEST_NOT_FOUND;
use crate::Result;
use reload_target::ThreadId;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

/// リクエストID
pub type RequestId = usize;

/// ブレークポイントリクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakpointRequest {
    pub id: RequestId,
    /// 登録時のスクリプトパス（未正規化）
    pub source: String,
    pub line: u32,
}

/// ステップの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDepth {
    Into,
    Over,
    Out,
}

/// ステップリクエスト
///
/// 位置の制約を持たず、次に報告された位置で必ず満たされます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRequest {
    pub id: RequestId,
    pub thread: ThreadId,
    pub depth: StepDepth,
}

/// 有効なリクエストの読み取り口
///
/// 呼び出し時点の状態を返します。イベントキューは結果をキャッシュしません。
pub trait RequestRegistry: Send + Sync {
    /// 有効なブレークポイントリクエストを取得する
    fn breakpoint_requests(&self) -> Vec<BreakpointRequest>;

    /// 有効なステップリクエストを取得する
    fn step_requests(&self) -> Vec<StepRequest>;
}

#[derive(Debug, Clone)]
enum EventRequest {
    Breakpoint(BreakpointRequest),
    Step(StepRequest),
}

struct Requests {
    /// 作成順に並ぶ (リクエスト, 有効フラグ)
    entries: BTreeMap<RequestId, (EventRequest, bool)>,
    next_id: RequestId,
}

/// イベントリクエストマネージャ
///
/// 複数スレッドから共有できるよう内部で `RwLock` を持ちます。
pub struct EventRequestManager {
    requests: RwLock<Requests>,
}

impl EventRequestManager {
    /// 新しいイベントリクエストマネージャを作成する
    pub fn new() -> Self {
        Self {
            requests: RwLock::new(Requests {
                entries: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// ブレークポイントリクエストを作成し、有効化する
    pub fn create_breakpoint_request(&self, source: impl Into<String>, line: u32) -> RequestId {
        self.insert(|id| {
            EventRequest::Breakpoint(BreakpointRequest {
                id,
                source: source.into(),
                line,
            })
        })
    }

    /// ステップリクエストを作成し、有効化する
    pub fn create_step_request(&self, thread: ThreadId, depth: StepDepth) -> RequestId {
        self.insert(|id| EventRequest::Step(StepRequest { id, thread, depth }))
    }

    /// リクエストを削除する
    pub fn delete(&self, id: RequestId) -> Result<()> {
        let mut requests = self.requests.write().unwrap_or_else(PoisonError::into_inner);
        requests
            .entries
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| anyhow::anyhow!("{}: {}", ERR_REQUEST_NOT_FOUND, id))
    }

    /// 全てのステップリクエストを削除する
    pub fn delete_step_requests(&self) {
        let mut requests = self.requests.write().unwrap_or_else(PoisonError::into_inner);
        requests
            .entries
            .retain(|_, (request, _)| !matches!(request, EventRequest::Step(_)));
    }

    /// リクエストの有効／無効を切り替える
    pub fn set_enabled(&self, id: RequestId, enabled: bool) -> Result<()> {
        let mut requests = self.requests.write().unwrap_or_else(PoisonError::into_inner);
        let entry = requests
            .entries
            .get_mut(&id)
            .ok_or_else(|| anyhow::anyhow!("{}: {}", ERR_REQUEST_NOT_FOUND, id))?;
        entry.1 = enabled;
        Ok(())
    }

    /// リクエストの数を取得する（無効なものを含む）
    pub fn count(&self) -> usize {
        let requests = self.requests.read().unwrap_or_else(PoisonError::into_inner);
        requests.entries.len()
    }

    fn insert(&self, make: impl FnOnce(RequestId) -> EventRequest) -> RequestId {
        let mut requests = self.requests.write().unwrap_or_else(PoisonError::into_inner);
        let id = requests.next_id;
        requests.next_id += 1;
        requests.entries.insert(id, (make(id), true));
        id
    }

    fn enabled(&self) -> Vec<EventRequest> {
        let requests = self.requests.read().unwrap_or_else(PoisonError::into_inner);
        requests
            .entries
            .values()
            .filter(|(_, enabled)| *enabled)
            .map(|(request, _)| request.clone())
            .collect()
    }
}

impl RequestRegistry for EventRequestManager {
    fn breakpoint_requests(&self) -> Vec<BreakpointRequest> {
        self.enabled()
            .into_iter()
            .filter_map(|request| match request {
                EventRequest::Breakpoint(bp) => Some(bp),
                EventRequest::Step(_) => None,
            })
            .collect()
    }

    fn step_requests(&self) -> Vec<StepRequest> {
        self.enabled()
            .into_iter()
            .filter_map(|request| match request {
                EventRequest::Step(step) => Some(step),
                EventRequest::Breakpoint(_) => None,
            })
            .collect()
    }
}

impl Default for EventRequestManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_list() {
        let manager = EventRequestManager::new();
        let bp1 = manager.create_breakpoint_request("src/a.js", 10);
        let step = manager.create_step_request(1, StepDepth::Over);
        let bp2 = manager.create_breakpoint_request("src/b.js", 3);

        let bps = manager.breakpoint_requests();
        assert_eq!(bps.iter().map(|r| r.id).collect::<Vec<_>>(), vec![bp1, bp2]);
        assert_eq!(bps[0].source, "src/a.js");

        let steps = manager.step_requests();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].id, step);
        assert_eq!(manager.count(), 3);
    }

    #[test]
    fn test_disabled_requests_are_hidden() {
        let manager = EventRequestManager::new();
        let bp = manager.create_breakpoint_request("src/a.js", 10);
        manager.set_enabled(bp, false).unwrap();
        assert!(manager.breakpoint_requests().is_empty());
        assert_eq!(manager.count(), 1);

        manager.set_enabled(bp, true).unwrap();
        assert_eq!(manager.breakpoint_requests().len(), 1);
    }

    #[test]
    fn test_delete() {
        let manager = EventRequestManager::new();
        let bp = manager.create_breakpoint_request("src/a.js", 10);
        manager.create_step_request(1, StepDepth::Into);
        manager.create_step_request(1, StepDepth::Out);

        manager.delete(bp).unwrap();
        assert!(manager.delete(bp).is_err());
        assert!(manager.set_enabled(bp, true).is_err());

        manager.delete_step_requests();
        assert!(manager.step_requests().is_empty());
        assert_eq!(manager.count(), 0);
    }
}
