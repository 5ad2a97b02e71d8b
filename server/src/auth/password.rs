use account_api_common::error::ServiceError;
use bcrypt::{hash, verify};

/// パスワードハッシュ化のコスト（12推奨、200-300ms）
const HASH_COST: u32 = 12;

/// bcryptが扱えるパスワードの最大バイト数（これを超える部分は切り捨てられる）
pub const MAX_PASSWORD_BYTES: usize = 72;

/// パスワードが長すぎる場合のメッセージ
pub const PASSWORD_TOO_LONG: &str = "Ensure this field has no more than 72 bytes.";

/// パスワードをbcryptでハッシュ化
///
/// # Arguments
/// * `password` - ハッシュ化するパスワード
///
/// # Returns
/// * `Ok(String)` - bcryptハッシュ文字列（$2b$で始まる）
/// * `Err(ServiceError::Validation)` - `MAX_PASSWORD_BYTES` を超える
/// * `Err(ServiceError)` - ハッシュ化失敗
pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ServiceError::field("password", PASSWORD_TOO_LONG));
    }
    hash(password, HASH_COST)
        .map_err(|e| ServiceError::PasswordHash(format!("Failed to hash password: {}", e)))
}

/// パスワードを検証
///
/// # Arguments
/// * `password` - 検証する平文パスワード
/// * `hash` - bcryptハッシュ文字列
///
/// # Returns
/// * `Ok(true)` - パスワード一致
/// * `Ok(false)` - パスワード不一致
/// * `Err(ServiceError)` - 検証失敗（ハッシュ形式が不正など）
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ServiceError> {
    // 保存済みパスワードは常に上限以内なので、超えた入力は一致しない
    if password.len() > MAX_PASSWORD_BYTES {
        return Ok(false);
    }
    verify(password, hash)
        .map_err(|e| ServiceError::PasswordHash(format!("Failed to verify password: {}", e)))
}
