pub mod handlers;
pub mod render;
pub mod whatsapp;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
