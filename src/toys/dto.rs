use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo::ToyStatus;

#[derive(Debug, Serialize)]
pub struct ToyListItem {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i32,
    pub size: Option<String>,
    pub status: ToyStatus,
    pub image_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ToyDetails {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i32,
    pub size: Option<String>,
    pub status: ToyStatus,
    pub images: Vec<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateToyRequest {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i32,
    pub size: Option<String>,
    #[serde(default = "default_status")]
    pub status: ToyStatus,
}

fn default_status() -> ToyStatus {
    ToyStatus::Available
}

#[derive(Debug, Deserialize)]
pub struct UpdateToyRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    pub size: Option<String>,
    pub status: Option<ToyStatus>,
}

/// Raw image bytes, one entry per photo. `content_types` runs parallel to
/// `images`; missing entries default to image/jpeg.
#[derive(Debug, Deserialize)]
pub struct UploadImagesRequest {
    pub images: Vec<serde_bytes::ByteBuf>,
    #[serde(default)]
    pub content_types: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadImagesResponse {
    pub keys: Vec<String>,
}
