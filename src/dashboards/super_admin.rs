use super::*;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuperAdminSummary {
    #[serde(default)]
    pub total_users: u64,

    #[serde(default)]
    pub active_users: u64,

    #[serde(default)]
    pub total_employees: u64,

    #[serde(default)]
    pub total_loans: u64,

    #[serde(default)]
    pub pending_tickets: u64,

    #[serde(default)]
    pub total_assets: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default, alias = "name")]
    pub full_name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub active: Option<bool>,

    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdminEmployee {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub active: Option<bool>,
}

impl Session {
    pub fn super_admin_summary(&self) -> Result<SuperAdminSummary, ApiError> {
        self.get_json("/api/superadmin/dashboard/summary")
    }

    pub fn super_admin_users(&self) -> Result<Vec<AdminUser>, ApiError> {
        self.get_json("/api/superadmin/users")
    }

    pub fn super_admin_employees(&self) -> Result<Vec<AdminEmployee>, ApiError> {
        self.get_json("/api/superadmin/employees")
    }

    pub fn super_admin_tickets(&self) -> Result<Vec<Ticket>, ApiError> {
        self.get_json("/api/superadmin/tickets")
    }
}
