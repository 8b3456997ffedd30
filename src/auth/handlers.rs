use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, RefreshRequest, RegisterRequest, UpdateMeRequest},
        guard::require_user,
        jwt::{AuthUser, JwtKeys},
        password::{hash_password, is_valid_email, verify_password},
    },
    pages::{visible_pages, Page, MENU},
    state::AppState,
    users::{
        repo::{is_unique_violation, Role, User},
        PublicUser,
    },
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me).put(update_me))
        .route("/me/pages", get(my_pages))
}

fn sign_pair(
    keys: &JwtKeys,
    user_id: uuid::Uuid,
) -> Result<(String, String), (StatusCode, String)> {
    let access = keys.sign_access(user_id).map_err(|e| {
        error!(error = %e, "jwt sign access failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    let refresh = keys.sign_refresh(user_id).map_err(|e| {
        error!(error = %e, "jwt sign refresh failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    Ok((access, refresh))
}

/// The first registered account becomes the admin with the full menu;
/// everyone after that starts as an employee with an empty whitelist.
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err((StatusCode::BAD_REQUEST, "Password too short".into()));
    }
    if payload.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Name is required".into()));
    }

    if let Ok(Some(_)) = User::find_by_email(&state.db, &payload.email).await {
        warn!(email = %payload.email, "email already registered");
        return Err((
            StatusCode::CONFLICT,
            "Email already registered".into(),
        ));
    }

    let existing = User::count(&state.db).await.map_err(|e| {
        error!(error = %e, "count users failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    let (role, allowed_pages): (Role, Vec<Page>) = if existing == 0 {
        (Role::Admin, MENU.to_vec())
    } else {
        (Role::Employee, Vec::new())
    };

    let hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "hash_password failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    let user = match User::create(
        &state.db,
        payload.name.trim(),
        &payload.email,
        &hash,
        role,
        &allowed_pages,
        None,
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
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    let keys = JwtKeys::from_ref(&state);
    let (access_token, refresh_token) = sign_pair(&keys, user.id)?;

    info!(user_id = %user.id, email = %user.email, role = ?user.role, "user registered");
    Ok(Json(AuthResponse {
        access_token,
        refresh_token,
        user: user.into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
    }

    let user = match User::find_by_email(&state.db, &payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %payload.email, "login unknown email");
            return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    let ok = match verify_password(&payload.password, &user.password_hash) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "verify_password failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };
    if !ok {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let (access_token, refresh_token) = sign_pair(&keys, user.id)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        access_token,
        refresh_token,
        user: user.into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|e| (StatusCode::UNAUTHORIZED, format!("{}", e)))?;

    let user = require_user(&state, claims.sub).await?;
    let (access_token, refresh_token) = sign_pair(&keys, user.id)?;

    Ok(Json(AuthResponse {
        access_token,
        refresh_token,
        user: user.into(),
    }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, (StatusCode, String)> {
    let user = require_user(&state, user_id).await?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateMeRequest>,
) -> Result<Json<PublicUser>, (StatusCode, String)> {
    let mut user = require_user(&state, user_id).await?;

    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err((StatusCode::BAD_REQUEST, "Name is required".into()));
        }
        user.name = name.trim().to_string();
    }
    if let Some(photo_url) = payload.photo_url {
        user.photo_url = Some(photo_url);
    }

    if let Some(new_password) = payload.new_password {
        if new_password.len() < 8 {
            return Err((StatusCode::BAD_REQUEST, "Password too short".into()));
        }
        let current = payload.current_password.ok_or((
            StatusCode::BAD_REQUEST,
            "Current password required".to_string(),
        ))?;
        let ok = verify_password(&current, &user.password_hash).map_err(|e| {
            error!(error = %e, "verify_password failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
        if !ok {
            warn!(user_id = %user.id, "password change with wrong current password");
            return Err((StatusCode::UNAUTHORIZED, "Wrong current password".into()));
        }
        user.password_hash = hash_password(&new_password).map_err(|e| {
            error!(error = %e, "hash_password failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
    }

    let updated = User::update(&state.db, &user).await.map_err(|e| {
        error!(error = %e, "update user failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    info!(user_id = %updated.id, "account updated");
    Ok(Json(updated.into()))
}

#[instrument(skip(state))]
pub async fn my_pages(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Page>>, (StatusCode, String)> {
    let user = require_user(&state, user_id).await?;
    Ok(Json(visible_pages(user.role, &user.allowed_pages)))
}
