//! 不透明な認証トークン
//!
//! クライアントには `tok_` + 32桁の16進数を渡し、保存・照合はSHA-256ハッシュで行う。

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// トークンの接頭辞
pub const TOKEN_PREFIX: &str = "tok_";

/// 新しい平文トークンを生成（`tok_` + UUIDv4の16進表記）
pub fn generate_token() -> String {
    format!("{}{}", TOKEN_PREFIX, Uuid::new_v4().simple())
}

/// トークンをSHA-256でハッシュ化
///
/// # Returns
/// * `String` - 16進数表現のSHA-256ハッシュ（64文字）
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
