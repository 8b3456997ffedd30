use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        guard::{require_admin, require_user},
        jwt::AuthUser,
        password::{hash_password, is_valid_email},
    },
    state::AppState,
};

use super::dto::{CreateUserRequest, PublicUser, UpdateUserRequest};
use super::repo::{is_unique_violation, User};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
) -> Result<Json<Vec<PublicUser>>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_admin(&caller)?;

    let users = User::list(&state.db).await.map_err(internal)?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PublicUser>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_admin(&caller)?;

    match User::find_by_id(&state.db, id).await {
        Ok(Some(user)) => Ok(Json(user.into())),
        Ok(None) => Err((StatusCode::NOT_FOUND, "User not found".into())),
        Err(e) => {
            error!(error = %e, %id, "find user failed");
            Err(internal(e))
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Json(mut payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<PublicUser>), (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_admin(&caller)?;

    payload.email = payload.email.trim().to_lowercase();
    if !is_valid_email(&payload.email) {
        return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
    }
    if payload.password.len() < 8 {
        return Err((StatusCode::BAD_REQUEST, "Password too short".into()));
    }
    if payload.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Name is required".into()));
    }

    if let Ok(Some(_)) = User::find_by_email(&state.db, &payload.email).await {
        warn!(email = %payload.email, "email already registered");
        return Err((StatusCode::CONFLICT, "Email already registered".into()));
    }

    let hash = hash_password(&payload.password).map_err(internal)?;
    let user = match User::create(
        &state.db,
        payload.name.trim(),
        &payload.email,
        &hash,
        payload.role,
        &payload.allowed_pages,
        payload.photo_url.as_deref(),
    )
    .await
    {
        Ok(u) => u,
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %payload.email, "email already registered");
            return Err((StatusCode::CONFLICT, "Email already registered".into()));
        }
        Err(e) => {
            error!(error = %e, "create user failed");
            return Err(internal(e));
        }
    };

    info!(user_id = %user.id, email = %user.email, by = %caller.id, "staff account created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<PublicUser>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_admin(&caller)?;

    let mut user = match User::find_by_id(&state.db, id).await {
        Ok(Some(u)) => u,
        Ok(None) => return Err((StatusCode::NOT_FOUND, "User not found".into())),
        Err(e) => return Err(internal(e)),
    };

    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err((StatusCode::BAD_REQUEST, "Name is required".into()));
        }
        user.name = name.trim().to_string();
    }
    if let Some(email) = payload.email {
        let email = email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
        }
        if email != user.email {
            if let Ok(Some(_)) = User::find_by_email(&state.db, &email).await {
                return Err((StatusCode::CONFLICT, "Email already registered".into()));
            }
            user.email = email;
        }
    }
    if let Some(password) = payload.password {
        if password.len() < 8 {
            return Err((StatusCode::BAD_REQUEST, "Password too short".into()));
        }
        user.password_hash = hash_password(&password).map_err(internal)?;
    }
    if let Some(role) = payload.role {
        user.role = role;
    }
    if let Some(allowed_pages) = payload.allowed_pages {
        user.allowed_pages = allowed_pages;
    }
    if let Some(photo_url) = payload.photo_url {
        user.photo_url = Some(photo_url);
    }

    let updated = User::update(&state.db, &user).await.map_err(|e| {
        error!(error = %e, %id, "update user failed");
        internal(e)
    })?;

    info!(user_id = %updated.id, by = %caller.id, "staff account updated");
    Ok(Json(updated.into()))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_admin(&caller)?;

    if id == caller.id {
        return Err((
            StatusCode::BAD_REQUEST,
            "Cannot delete your own account".into(),
        ));
    }

    let deleted = User::delete(&state.db, id).await.map_err(internal)?;
    if deleted == 0 {
        return Err((StatusCode::NOT_FOUND, "User not found".into()));
    }

    info!(user_id = %id, by = %caller.id, "staff account deleted");
    Ok(StatusCode::NO_CONTENT)
}
