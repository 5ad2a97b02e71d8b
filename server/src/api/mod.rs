//! REST APIハンドラー
//!
//! ユーザー登録、トークン発行、プロフィールAPI

/// トークン発行・ログアウトAPI
pub mod auth;

/// APIエラーレスポンス
pub mod error;

/// ユーザー登録・プロフィールAPI
pub mod users;

use crate::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

/// APIルーターを作成
pub fn create_router(state: AppState) -> Router {
    // トークン認証が必要な保護されたルート
    let protected_routes = Router::new()
        .route("/api/user/me", get(users::me).patch(users::update_me))
        .route("/api/user/logout", post(auth::logout))
        .route_layer(middleware::from_fn_with_state(
            state.db_pool.clone(),
            crate::auth::middleware::token_auth_middleware,
        ));

    Router::new()
        // 認証不要
        .route("/api/user/create", post(users::create_user))
        .route("/api/user/token", post(auth::obtain_token))
        .merge(protected_routes)
        .with_state(state)
}
