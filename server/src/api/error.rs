//! APIエラーレスポンス
//!
//! `ServiceError` をHTTPステータスとJSONボディへ変換する。

use account_api_common::error::{FieldErrors, ServiceError, NON_FIELD_ERRORS};
use axum::{
    extract::rejection::JsonRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use validator::ValidationErrors;

/// メールアドレス重複時のメッセージ
pub const DUPLICATE_EMAIL: &str = "user with this email already exists.";

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub ServiceError);

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        AppError(err)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError(ServiceError::Validation(field_errors(&errors)))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.0 {
            ServiceError::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            ServiceError::DuplicateEmail(_) => (
                StatusCode::BAD_REQUEST,
                Json(single_error("email", DUPLICATE_EMAIL)),
            )
                .into_response(),
            ServiceError::InvalidCredentials => {
                let message = ServiceError::InvalidCredentials.to_string();
                (
                    StatusCode::BAD_REQUEST,
                    Json(single_error(NON_FIELD_ERRORS, &format!("{}.", message))),
                )
                    .into_response()
            }
            ServiceError::Unauthenticated(message) => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Token")],
                Json(json!({ "detail": message })),
            )
                .into_response(),
            ServiceError::UserNotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": "Not found." })),
            )
                .into_response(),
            err @ (ServiceError::Common(_)
            | ServiceError::Database(_)
            | ServiceError::PasswordHash(_)
            | ServiceError::Internal(_)) => {
                tracing::error!("Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

/// JSONボディの抽出結果を検証エラーへ変換する
///
/// 不正なJSONやContent-Typeの誤りも400として扱う。
pub fn parse_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!("Rejected request body: {}", rejection.body_text());
            Err(AppError(ServiceError::field(
                NON_FIELD_ERRORS,
                rejection.body_text(),
            )))
        }
    }
}

/// validatorのエラーをフィールド名 → メッセージ一覧へ変換する
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut fields = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        let messages = errs
            .iter()
            .map(|err| {
                err.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string())
            })
            .collect();
        fields.insert(field.to_string(), messages);
    }
    fields
}

fn single_error(field: &str, message: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(field.to_string(), vec![message.to_string()]);
    errors
}
