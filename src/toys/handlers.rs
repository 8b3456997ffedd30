use axum::{
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::{
    auth::{
        guard::{require_admin, require_page, require_user},
        jwt::AuthUser,
    },
    pages::Page,
    state::AppState,
};

use super::dto::{
    CreateToyRequest, ToyDetails, ToyListItem, UpdateToyRequest, UploadImagesRequest,
    UploadImagesResponse,
};
use super::images::{self, UploadItem};
use super::repo::Toy;

const PRESIGN_TTL_SECS: u64 = 30 * 60;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/toys", get(list_toys).post(create_toy))
        .route(
            "/toys/:id",
            get(get_toy).put(update_toy).delete(delete_toy),
        )
        .route(
            "/toys/:id/images",
            post(upload_images).layer(DefaultBodyLimit::max(20 * 1024 * 1024)), // 20MB
        )
        .route("/toys/:id/image", get(get_first_image))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[instrument(skip(state))]
pub async fn list_toys(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
) -> Result<Json<Vec<ToyListItem>>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Toys)?;

    let toys = Toy::list(&state.db).await.map_err(internal)?;
    let items = toys
        .into_iter()
        .map(|t| ToyListItem {
            id: t.id,
            name: t.name,
            category: t.category,
            price: t.price,
            quantity: t.quantity,
            size: t.size,
            status: t.status,
            image_count: t.image_keys.len(),
        })
        .collect();
    Ok(Json(items))
}

#[instrument(skip(state))]
pub async fn get_toy(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ToyDetails>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Toys)?;

    let toy = match Toy::find_by_id(&state.db, id).await {
        Ok(Some(t)) => t,
        Ok(None) => return Err((StatusCode::NOT_FOUND, "Toy not found".into())),
        Err(e) => {
            error!(error = %e, %id, "find toy failed");
            return Err(internal(e));
        }
    };

    let urls = images::presign_many(&state, &toy.image_keys, PRESIGN_TTL_SECS)
        .await
        .map_err(internal)?;

    Ok(Json(ToyDetails {
        id: toy.id,
        name: toy.name,
        category: toy.category,
        price: toy.price,
        quantity: toy.quantity,
        size: toy.size,
        status: toy.status,
        images: urls,
        created_at: toy.created_at,
    }))
}

#[instrument(skip(state, payload))]
pub async fn create_toy(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Json(payload): Json<CreateToyRequest>,
) -> Result<(StatusCode, Json<Toy>), (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_admin(&caller)?;

    if payload.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Name is required".into()));
    }
    if payload.price < 0.0 {
        return Err((StatusCode::BAD_REQUEST, "Price must not be negative".into()));
    }
    if payload.quantity < 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            "Quantity must not be negative".into(),
        ));
    }

    let toy = Toy::create(
        &state.db,
        payload.name.trim(),
        &payload.category,
        payload.price,
        payload.quantity,
        payload.size.as_deref(),
        payload.status,
    )
    .await
    .map_err(|e| {
        error!(error = %e, "create toy failed");
        internal(e)
    })?;

    info!(toy_id = %toy.id, name = %toy.name, "toy created");
    Ok((StatusCode::CREATED, Json(toy)))
}

#[instrument(skip(state, payload))]
pub async fn update_toy(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateToyRequest>,
) -> Result<Json<Toy>, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_admin(&caller)?;

    let mut toy = match Toy::find_by_id(&state.db, id).await {
        Ok(Some(t)) => t,
        Ok(None) => return Err((StatusCode::NOT_FOUND, "Toy not found".into())),
        Err(e) => return Err(internal(e)),
    };

    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err((StatusCode::BAD_REQUEST, "Name is required".into()));
        }
        toy.name = name.trim().to_string();
    }
    if let Some(category) = payload.category {
        toy.category = category;
    }
    if let Some(price) = payload.price {
        if price < 0.0 {
            return Err((StatusCode::BAD_REQUEST, "Price must not be negative".into()));
        }
        toy.price = price;
    }
    if let Some(quantity) = payload.quantity {
        if quantity < 0 {
            return Err((
                StatusCode::BAD_REQUEST,
                "Quantity must not be negative".into(),
            ));
        }
        toy.quantity = quantity;
    }
    if let Some(size) = payload.size {
        toy.size = Some(size);
    }
    if let Some(status) = payload.status {
        toy.status = status;
    }

    let updated = Toy::update(&state.db, &toy).await.map_err(|e| {
        error!(error = %e, %id, "update toy failed");
        internal(e)
    })?;

    info!(toy_id = %updated.id, "toy updated");
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn delete_toy(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_admin(&caller)?;

    let toy = match Toy::find_by_id(&state.db, id).await {
        Ok(Some(t)) => t,
        Ok(None) => return Err((StatusCode::NOT_FOUND, "Toy not found".into())),
        Err(e) => return Err(internal(e)),
    };

    Toy::delete(&state.db, id).await.map_err(internal)?;
    images::delete_images(&state, &toy.image_keys).await;

    info!(toy_id = %id, "toy deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /toys/:id/images { images: [...], content_types?: [...] }
#[instrument(skip(state, payload))]
pub async fn upload_images(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UploadImagesRequest>,
) -> Result<(StatusCode, Json<UploadImagesResponse>), (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_admin(&caller)?;

    if payload.images.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "images must be non-empty".into()));
    }
    if Toy::find_by_id(&state.db, id)
        .await
        .map_err(internal)?
        .is_none()
    {
        return Err((StatusCode::NOT_FOUND, "Toy not found".into()));
    }

    let files: Vec<UploadItem<'_>> = payload
        .images
        .iter()
        .enumerate()
        .map(|(i, buf)| UploadItem {
            body: Bytes::copy_from_slice(buf),
            content_type: payload
                .content_types
                .get(i)
                .map(String::as_str)
                .unwrap_or("image/jpeg"),
        })
        .collect();

    let keys = images::upload_toy_images(&state, id, files)
        .await
        .map_err(|e| {
            error!(error = %e, toy_id = %id, "image upload failed");
            internal(e)
        })?;

    info!(toy_id = %id, count = keys.len(), "toy images uploaded");
    Ok((StatusCode::CREATED, Json(UploadImagesResponse { keys })))
}

/// 302 to a presigned URL for the toy's first photo.
#[instrument(skip(state))]
pub async fn get_first_image(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let caller = require_user(&state, caller_id).await?;
    require_page(&caller, Page::Toys)?;

    let toy = match Toy::find_by_id(&state.db, id).await {
        Ok(Some(t)) => t,
        Ok(None) => return Err((StatusCode::NOT_FOUND, "Toy not found".into())),
        Err(e) => return Err(internal(e)),
    };

    let Some(key) = toy.image_keys.first() else {
        return Err((StatusCode::NOT_FOUND, "Toy has no images".into()));
    };

    let url = state
        .storage
        .presign_get(key, PRESIGN_TTL_SECS)
        .await
        .map_err(internal)?;

    Ok(Redirect::temporary(&url))
}
