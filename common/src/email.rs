//! メールアドレス正規化
//!
//! 保存・検索の前に前後の空白を除去し、アドレス全体を小文字化する。

/// メールアドレスを正規化する
///
/// # Returns
/// * `Some(String)` - 正規化済みアドレス
/// * `None` - 空文字列（空白のみを含む）
pub fn normalize_email(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}
