//! User endpoints
//!
//! - `GET /api/users/me` - Current authenticated user (bearer)
//! - `GET /api/users` - All users, safe fields only (public)
//!
//! Responses never include the password digest: `/me` converts the full
//! record to `SafeUser`, and the listing never selects the column at all.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use taskbook_shared::{
    auth::middleware::AuthContext,
    models::user::{SafeUser, User},
};

/// Return the authenticated user's record, digest stripped
///
/// The record is re-fetched by id rather than echoed from the token, so a
/// user deleted after token issuance yields 404.
pub async fn get_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<SafeUser>> {
    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

/// List all users with safe fields only, newest id first
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<SafeUser>>> {
    let users = User::list_safe(&state.db).await?;

    Ok(Json(users))
}
