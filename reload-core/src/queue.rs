//! イベントキュー
//!
//! プッシュ型で届く通知を、プル型のデバッグモデルが期待する `remove()` /
//! `remove(timeout)` に変換します。通知を1つ取り出すたびにリクエストを照合し、
//! イベントセットを構築して返します。

use crate::builder::EventSetBuilder;
use crate::event::EventSet;
use crate::mailbox::{Mailbox, NotificationSender, Take};
use crate::matcher::LocationMatcher;
use crate::notification::Notification;
use crate::request::RequestRegistry;
use reload_target::ThreadControl;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{trace, warn};

/// タイムアウト付き取り出しの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Polled {
    /// 通知から構築したイベントセット（空の場合もある）
    Events(EventSet),
    /// 通知の解釈に失敗した、または待機が中断された
    NoEvent,
    /// 指定時間内に通知が届かなかった
    TimedOut,
}

impl Polled {
    /// イベントセットを取り出す
    pub fn into_events(self) -> Option<EventSet> {
        match self {
            Polled::Events(set) => Some(set),
            Polled::NoEvent | Polled::TimedOut => None,
        }
    }

    /// タイムアウトしたかどうか
    pub fn is_timed_out(&self) -> bool {
        matches!(self, Polled::TimedOut)
    }
}

/// イベントキュー
///
/// 送信は任意のスレッドから [`NotificationSender`] を通じて行い、
/// 取り出しは単一のポーリングスレッドが行います。
pub struct EventQueue {
    mailbox: Mailbox,
    registry: Arc<dyn RequestRegistry>,
    matcher: LocationMatcher,
    thread: Arc<dyn ThreadControl>,
}

impl EventQueue {
    /// イベントキューを作成する
    ///
    /// `thread` は空でないイベントセットが得られたときに停止させるスレッドです。
    pub fn new(
        matcher: LocationMatcher,
        registry: Arc<dyn RequestRegistry>,
        thread: Arc<dyn ThreadControl>,
    ) -> Self {
        Self {
            mailbox: Mailbox::new(),
            registry,
            matcher,
            thread,
        }
    }

    /// 送信ハンドルを取得する
    pub fn sender(&self) -> NotificationSender {
        self.mailbox.sender()
    }

    /// 通知を送信する
    pub fn send(&self, command: impl Into<String>, payload: Option<Value>) {
        self.mailbox.send(command, payload);
    }

    /// ペイロードなしのコマンドを受け取る
    pub fn received(&self, command: impl Into<String>) {
        self.send(command, None);
    }

    /// ペイロード付きのコマンドを受け取る
    pub fn received_with(&self, command: impl Into<String>, payload: Value) {
        self.send(command, Some(payload));
    }

    /// 通知が届くまでブロックし、イベントセットを返す
    ///
    /// 空のイベントセットも正常な結果です。通知の解釈に失敗した場合は `None` を返します。
    pub fn remove(&self) -> Option<EventSet> {
        match self.mailbox.take() {
            Take::Received(notification) => self.handle(notification).into_events(),
            Take::TimedOut | Take::Disconnected => {
                warn!("event queue wait interrupted");
                None
            }
        }
    }

    /// 最大 `timeout_ms` ミリ秒待ってイベントセットを返す
    ///
    /// `timeout_ms` が0以下の場合は [`EventQueue::remove`] と同じく無期限に待ちます。
    pub fn remove_timeout(&self, timeout_ms: i64) -> Polled {
        if timeout_ms <= 0 {
            return self.remove().map_or(Polled::NoEvent, Polled::Events);
        }

        match self.mailbox.take_timeout(Duration::from_millis(timeout_ms as u64)) {
            Take::Received(notification) => self.handle(notification),
            Take::TimedOut => {
                trace!("no notification within {}ms", timeout_ms);
                Polled::TimedOut
            }
            Take::Disconnected => {
                warn!("event queue wait interrupted");
                Polled::NoEvent
            }
        }
    }

    fn handle(&self, notification: Notification) -> Polled {
        let builder = EventSetBuilder::new(&self.matcher, self.thread.as_ref());
        match builder.build(&notification, self.registry.as_ref()) {
            Ok(event_set) => Polled::Events(event_set),
            Err(e) => {
                warn!("dropping notification '{}': {}", notification.command(), e);
                Polled::NoEvent
            }
        }
    }
}
