//! 通知メールボックス
//!
//! 任意個のプロデューサスレッドから通知を受け取り、単一のコンシューマへ到着順に渡す
//! 上限なしのFIFOキューです。

use crate::notification::Notification;
use serde_json::Value;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;
use tracing::{debug, trace};

/// 取り出しの結果
#[derive(Debug, Clone, PartialEq)]
pub enum Take {
    /// 通知を受け取った
    Received(Notification),
    /// 指定時間内に通知が届かなかった
    TimedOut,
    /// 送信側が全て閉じられた
    Disconnected,
}

/// 通知の送信ハンドル
///
/// クローンして各プロデューサスレッドに渡します。送信はブロックしません。
#[derive(Debug, Clone)]
pub struct NotificationSender {
    tx: Sender<Notification>,
}

impl NotificationSender {
    /// 通知を送信する
    pub fn send(&self, command: impl Into<String>, payload: Option<Value>) {
        let notification = Notification::new(command, payload);
        trace!("enqueue '{}'", notification.command());
        if let Err(e) = self.tx.send(notification) {
            debug!("mailbox closed, dropping '{}'", e.0.command());
        }
    }

    /// ペイロードなしのコマンドを受け取る
    pub fn received(&self, command: impl Into<String>) {
        self.send(command, None);
    }

    /// ペイロード付きのコマンドを受け取る
    pub fn received_with(&self, command: impl Into<String>, payload: Value) {
        self.send(command, Some(payload));
    }
}

/// 通知メールボックス
pub struct Mailbox {
    tx: Sender<Notification>,
    rx: Receiver<Notification>,
}

impl Mailbox {
    /// 空のメールボックスを作成する
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// 送信ハンドルを取得する
    pub fn sender(&self) -> NotificationSender {
        NotificationSender {
            tx: self.tx.clone(),
        }
    }

    /// 通知を送信する
    pub fn send(&self, command: impl Into<String>, payload: Option<Value>) {
        self.sender().send(command, payload);
    }

    /// 通知が届くまでブロックして取り出す
    pub fn take(&self) -> Take {
        match self.rx.recv() {
            Ok(notification) => Take::Received(notification),
            Err(_) => Take::Disconnected,
        }
    }

    /// 最大 `timeout` までブロックして取り出す
    pub fn take_timeout(&self, timeout: Duration) -> Take {
        match self.rx.recv_timeout(timeout) {
            Ok(notification) => Take::Received(notification),
            Err(RecvTimeoutError::Timeout) => Take::TimedOut,
            Err(RecvTimeoutError::Disconnected) => Take::Disconnected,
        }
    }
}

impl Default for Mailbox {
    fn default() -> Self {
        Self::new()
    }
}
