use super::*;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditorOverview {
    #[serde(default)]
    pub total_customers: u64,

    #[serde(default)]
    pub total_transactions: u64,

    #[serde(default)]
    pub total_deposits: Option<f64>,

    #[serde(default)]
    pub total_withdrawals: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginActivity {
    pub id: i64,

    #[serde(default)]
    pub customer_email: Option<String>,

    #[serde(default)]
    pub timestamp: Option<String>,

    #[serde(default)]
    pub ip_address: Option<String>,

    #[serde(default)]
    pub device: Option<String>,
}

impl Session {
    pub fn auditor_overview(&self) -> Result<AuditorOverview, ApiError> {
        self.get_json("/api/auditor/dashboard")
    }

    pub fn auditor_login_activities(
        &self,
        page: u32,
        size: u32,
    ) -> Result<Page<LoginActivity>, ApiError> {
        self.get_json_query("/api/auditor/login-activities", &page_query(page, size))
    }

    pub fn auditor_transactions(
        &self,
        page: u32,
        size: u32,
    ) -> Result<Page<Transaction>, ApiError> {
        self.get_json_query("/api/auditor/transactions", &page_query(page, size))
    }
}
