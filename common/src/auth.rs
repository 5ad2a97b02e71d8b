//! 認証関連のデータモデル
//!
//! メールアドレスを識別子とするユーザーと、不透明な認証トークン

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ユーザー
///
/// `password_hash` はbcryptハッシュ。平文パスワードは保持しない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// ユーザーID
    pub id: Uuid,
    /// 正規化済みメールアドレス（一意）
    pub email: String,
    /// 表示名
    pub name: String,
    /// bcryptハッシュ
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// 有効フラグ（falseの場合は認証不可）
    pub is_active: bool,
    /// スタッフフラグ
    pub is_staff: bool,
    /// スーパーユーザーフラグ
    pub is_superuser: bool,
    /// 作成日時
    pub created_at: DateTime<Utc>,
    /// 最終ログイン日時（トークン発行時に更新）
    pub last_login: Option<DateTime<Utc>>,
}

/// ユーザー作成時の権限フラグ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserFlags {
    /// スタッフフラグ
    pub is_staff: bool,
    /// スーパーユーザーフラグ
    pub is_superuser: bool,
}

impl UserFlags {
    /// スーパーユーザー用フラグ（両方true）
    pub const SUPERUSER: UserFlags = UserFlags {
        is_staff: true,
        is_superuser: true,
    };
}

/// 認証トークン（DB保存形式、ハッシュのみ）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    /// 所有ユーザーID（1ユーザー1トークン）
    pub user_id: Uuid,
    /// トークンのSHA-256ハッシュ（16進）
    pub token_hash: String,
    /// 発行日時
    pub created_at: DateTime<Utc>,
}

/// 認証トークン（平文付き、発行時のレスポンス用）
#[derive(Debug, Clone, Serialize)]
pub struct AuthTokenWithPlaintext {
    /// 所有ユーザーID
    pub user_id: Uuid,
    /// 平文トークン（`tok_` プレフィックス付き、発行時のみ取得可能）
    pub token: String,
    /// 発行日時
    pub created_at: DateTime<Utc>,
}
