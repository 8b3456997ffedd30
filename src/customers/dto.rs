use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CustomerListParams {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub is_company: bool,
    #[serde(default)]
    pub document: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_company: Option<bool>,
    pub document: Option<String>,
}
