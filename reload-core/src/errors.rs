//! エラー型とエラーメッセージ定数

use thiserror::Error;

/// リクエストが見つからない場合のエラーメッセージ
pub const ERR_REQUEST_NOT_FOUND: &str = "Event request not found";

/// 通知の解釈中に発生するエラー
///
/// イベントキューの外には漏れず、ログ出力されたうえで「イベントなし」として扱われます。
#[derive(Debug, Error)]
pub enum BridgeError {
    /// ペイロードが期待する形式ではない
    #[error("malformed payload for '{command}': {source}")]
    MalformedPayload {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    /// パスが空
    #[error("empty script path '{0}'")]
    EmptyPath(String),

    /// パスがワークスペースの外を指している
    #[error("script path '{0}' escapes the workspace root")]
    OutsideWorkspace(String),
}
