//! パース関連のユーティリティ関数

use anyhow::Result;
use regex::Regex;

/// `file:line` 形式の位置指定をパース
///
/// ファイル名にコロンが含まれていてもよく、最後のコロン以降を行番号とみなします。
///
/// # Examples
/// ```
/// use reload_core::parse::parse_location;
///
/// assert_eq!(parse_location("src/a.js:10").unwrap(), ("src/a.js".to_string(), 10));
/// assert_eq!(parse_location("C:/w/a.js:3").unwrap(), ("C:/w/a.js".to_string(), 3));
/// ```
pub fn parse_location(s: &str) -> Result<(String, u32)> {
    let re = Regex::new(r"^(?P<file>.+):(?P<line>\d+)$")?;
    let s = s.trim();

    let caps = re
        .captures(s)
        .ok_or_else(|| anyhow::anyhow!("Invalid location '{}': expected <file>:<line>", s))?;
    let line = caps["line"]
        .parse::<u32>()
        .map_err(|e| anyhow::anyhow!("Invalid line number in '{}': {}", s, e))?;

    Ok((caps["file"].to_string(), line))
}

/// タイムアウト（ミリ秒）をパース
///
/// 負の値も受け付けます（無期限待ちを表す）。
pub fn parse_timeout(s: &str) -> Result<i64> {
    let s = s.trim();
    s.strip_suffix("ms")
        .unwrap_or(s)
        .parse::<i64>()
        .map_err(|e| anyhow::anyhow!("Invalid timeout '{}': {}", s, e))
}
