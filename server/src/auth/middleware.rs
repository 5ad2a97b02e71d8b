use crate::api::error::AppError;
use crate::auth::token::hash_token;
use account_api_common::error::ServiceError;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use sqlx::SqlitePool;

/// 認証情報が送られていない場合のメッセージ
pub const MISSING_CREDENTIALS: &str = "Authentication credentials were not provided.";
/// Authorizationヘッダー形式が不正な場合のメッセージ
pub const INVALID_HEADER: &str = "Invalid token header.";
/// トークンが見つからない場合のメッセージ
pub const INVALID_TOKEN: &str = "Invalid token.";
/// ユーザーが無効化・削除済みの場合のメッセージ
pub const INACTIVE_USER: &str = "User inactive or deleted.";

/// トークン認証ミドルウェア
///
/// `Authorization: Token {token}`（または `Bearer {token}`）からトークンを抽出し、
/// SHA-256ハッシュでDBと照合する。
///
/// # Arguments
/// * `State(pool)` - データベース接続プール
/// * `request` - HTTPリクエスト
/// * `next` - 次のミドルウェア/ハンドラー
///
/// # Returns
/// * `Ok(Response)` - 認証成功、requestに`User`を追加
/// * `Err(AppError)` - 認証失敗、401 Unauthorized
pub async fn token_auth_middleware(
    State(pool): State<SqlitePool>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(request.headers())?;

    let auth_token = crate::db::auth_tokens::find_by_hash(&pool, &hash_token(token))
        .await?
        .ok_or_else(|| ServiceError::Unauthenticated(INVALID_TOKEN.to_string()))?;

    let user = crate::db::users::find_by_id(&pool, auth_token.user_id)
        .await?
        .filter(|user| user.is_active)
        .ok_or_else(|| {
            tracing::warn!(
                user_id = %auth_token.user_id,
                "Token presented for inactive or deleted user"
            );
            ServiceError::Unauthenticated(INACTIVE_USER.to_string())
        })?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Authorizationヘッダーからトークン部分を取り出す
fn extract_token(headers: &HeaderMap) -> Result<&str, ServiceError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ServiceError::Unauthenticated(MISSING_CREDENTIALS.to_string()))?
        .to_str()
        .map_err(|_| ServiceError::Unauthenticated(INVALID_HEADER.to_string()))?;

    let mut parts = auth_header.split_whitespace();
    let (scheme, token) = match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) => (scheme, token),
        _ => return Err(ServiceError::Unauthenticated(INVALID_HEADER.to_string())),
    };

    if scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer") {
        Ok(token)
    } else {
        Err(ServiceError::Unauthenticated(INVALID_HEADER.to_string()))
    }
}
