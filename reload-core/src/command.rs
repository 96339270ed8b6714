//! ランタイムから届くコマンド

/// ブレークポイント到達を報告するコマンド名
pub const REPORT_BREAKPOINT: &str = "report-breakpoint";

/// ランタイムコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// ブレークポイント到達（ステップ完了を含む）の報告
    ReportBreakpoint,
    /// 解釈しないコマンド（イベントを生成しない）
    Unknown(String),
}

impl Command {
    /// コマンド名をパースする
    ///
    /// コマンド名は完全一致で比較します。
    pub fn parse(name: &str) -> Self {
        match name {
            REPORT_BREAKPOINT => Command::ReportBreakpoint,
            other => Command::Unknown(other.to_string()),
        }
    }

    /// コマンド名を取得する
    pub fn name(&self) -> &str {
        match self {
            Command::ReportBreakpoint => REPORT_BREAKPOINT,
            Command::Unknown(name) => name,
        }
    }
}
