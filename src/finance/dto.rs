use serde::Deserialize;
use time::Date;

use super::repo::TransactionKind;

#[derive(Debug, Deserialize)]
pub struct LedgerParams {
    pub from: Option<Date>,
    pub to: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub date: Date,
    pub description: String,
    pub value: f64,
    pub kind: TransactionKind,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTransactionRequest {
    pub date: Option<Date>,
    pub description: Option<String>,
    pub value: Option<f64>,
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
}
