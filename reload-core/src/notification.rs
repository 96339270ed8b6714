//! ランタイムからの通知

use crate::errors::BridgeError;
use serde::Deserialize;
use serde_json::Value;

/// ランタイムからの通知（コマンド名とペイロード）
///
/// キューに入った後は変更されず、イベントキューで一度だけ消費されます。
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    command: String,
    payload: Option<Value>,
}

impl Notification {
    /// 通知を作成する
    pub fn new(command: impl Into<String>, payload: Option<Value>) -> Self {
        Self {
            command: command.into(),
            payload,
        }
    }

    /// コマンド名を取得する
    pub fn command(&self) -> &str {
        &self.command
    }

    /// ペイロードを取得する
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }
}

/// `report-breakpoint` のペイロード
///
/// ```json
/// { "file": "src/a.js", "line": 10, "step": false }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BreakpointReport {
    /// 生のスクリプトパス
    #[serde(default)]
    pub file: Option<String>,
    /// 行番号
    #[serde(default)]
    pub line: Option<u32>,
    /// ステップ実行中の到達かどうか
    #[serde(default)]
    pub step: bool,
}

impl BreakpointReport {
    /// 通知のペイロードをデコードする
    ///
    /// ペイロードがない場合は全フィールドが未設定の報告として扱います。
    pub fn decode(notification: &Notification) -> Result<Self, BridgeError> {
        match notification.payload() {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(value) => Self::deserialize(value).map_err(|source| BridgeError::MalformedPayload {
                command: notification.command().to_string(),
                source,
            }),
        }
    }

    /// ファイルと行番号が両方そろっている場合に取得する
    pub fn position(&self) -> Option<(&str, u32)> {
        match (self.file.as_deref(), self.line) {
            (Some(file), Some(line)) => Some((file, line)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(payload: Value) -> Result<BreakpointReport, BridgeError> {
        BreakpointReport::decode(&Notification::new("report-breakpoint", Some(payload)))
    }

    #[test]
    fn test_decode_full_report() {
        let r = report(json!({"file": "src/a.js", "line": 10, "step": true})).unwrap();
        assert_eq!(r.position(), Some(("src/a.js", 10)));
        assert!(r.step);
    }

    #[test]
    fn test_decode_defaults() {
        let r = report(json!({"file": "src/a.js", "line": 10})).unwrap();
        assert!(!r.step);

        let r = report(json!({"file": "src/a.js"})).unwrap();
        assert_eq!(r.position(), None);

        let r = report(json!({"line": 3, "extra": [1, 2]})).unwrap();
        assert_eq!(r.position(), None);

        let r = BreakpointReport::decode(&Notification::new("report-breakpoint", None)).unwrap();
        assert_eq!(r, BreakpointReport::default());
    }

    #[test]
    fn test_decode_malformed() {
        assert!(report(json!("not an object")).is_err());
        assert!(report(json!({"file": 12, "line": 1})).is_err());
        assert!(report(json!({"file": "a.js", "line": -1})).is_err());
        assert!(report(json!({"file": "a.js", "line": "10"})).is_err());
        assert!(report(json!({"file": "a.js", "line": 1, "step": "yes"})).is_err());
    }
}
