use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateCompanyRequest {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub document: String,
    pub logo_url: Option<String>,
    #[serde(default)]
    pub contract_terms: String,
}
