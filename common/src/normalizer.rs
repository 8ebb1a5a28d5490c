//! OCRテキストの正規化
//!
//! 生のOCR出力を行単位に分割し、前後の空白を除去して空行を捨てる。

/// OCRテキストを正規化済みの行リストに変換
///
/// 空入力は空リストを返す（エラーにならない）。`\r\n` は行末の `\r` をトリムで吸収する。
pub fn normalize_lines(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
