use serde::Deserialize;
use time::{Date, Time};
use uuid::Uuid;

use super::repo::RentalStatus;

#[derive(Debug, Deserialize)]
pub struct RentalListParams {
    pub date: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    pub date: Date,
}

#[derive(Debug, Deserialize)]
pub struct CreateRentalRequest {
    pub customer_id: Uuid,
    pub date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub toy_ids: Vec<Uuid>,
    pub total_value: f64,
    #[serde(default)]
    pub entry_value: f64,
    pub payment_method: String,
    #[serde(default = "default_status")]
    pub status: RentalStatus,
    pub notes: Option<String>,
}

fn default_status() -> RentalStatus {
    RentalStatus::Pending
}

#[derive(Debug, Deserialize)]
pub struct UpdateRentalRequest {
    pub customer_id: Option<Uuid>,
    pub date: Option<Date>,
    pub start_time: Option<Time>,
    pub end_time: Option<Time>,
    pub toy_ids: Option<Vec<Uuid>>,
    pub total_value: Option<f64>,
    pub entry_value: Option<f64>,
    pub payment_method: Option<String>,
    pub status: Option<RentalStatus>,
    pub notes: Option<String>,
}
