//! User handlers

use crate::{
    config::AppState,
    error::{ApiError, Result},
    extract::{AppJson, AppQuery},
    models::User,
};
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

/// GET /chat/get-user-by-email
pub async fn get_user_by_email(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<EmailQuery>,
) -> Result<Json<User>> {
    let email = query.email.unwrap_or_default();
    info!("GET /chat/get-user-by-email - {}", email);

    let user = state.chat.read().await.user(&email).cloned();
    match user {
        Some(user) => Ok(Json(user)),
        None => Err(ApiError::NotFound(format!("user {} not found", email))),
    }
}

/// GET /chat/get-all-users
pub async fn get_all_users(State(state): State<AppState>) -> Json<Vec<User>> {
    info!("GET /chat/get-all-users");
    let users = state.chat.read().await.users();
    Json(users)
}

/// GET /chat/get-users
pub async fn get_users(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PageQuery>,
) -> Result<Json<Vec<User>>> {
    info!(
        "GET /chat/get-users - limit={} offset={}",
        query.limit, query.offset
    );

    if query.limit <= 0 {
        return Err(ApiError::BadRequest("limit must be positive".to_string()));
    }
    if query.offset < 0 {
        return Err(ApiError::BadRequest("offset must not be negative".to_string()));
    }

    let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
    let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);

    let users = state.chat.read().await.users_page(limit, offset);
    Ok(Json(users))
}

/// POST /chat/add-user
pub async fn add_user(
    State(state): State<AppState>,
    AppJson(user): AppJson<User>,
) -> Result<(StatusCode, Json<User>)> {
    info!("POST /chat/add-user - {}", user.email);

    if user.user_name.is_empty() || user.email.is_empty() {
        return Err(ApiError::BadRequest(
            "userName and email are required".to_string(),
        ));
    }

    match state.chat.add_user(user.clone()).await {
        Ok(()) => Ok((StatusCode::CREATED, Json(user))),
        Err(e) => {
            warn!("Add user failed for {}: {}", user.email, e);
            Err(e.into())
        }
    }
}
