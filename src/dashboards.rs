//! Role-specific backend calls. Each dashboard extends [`Session`]; the
//! session guard makes sure the stored credential carries the right role.

use serde::{Deserialize, Serialize};

use crate::remote::Page;
use crate::session::{ApiError, Session};

mod account;
mod auditor;
mod customer;
mod loans;
mod super_admin;
mod support;

pub use self::auditor::{AuditorOverview, LoginActivity};
pub use self::customer::{
    ActionReceipt, CustomerProfile, TransactionFilter, TransactionsPage, TransferRequest,
};
pub use self::loans::{LoanCounts, LoanDecision};
pub use self::super_admin::{AdminEmployee, AdminUser, SuperAdminSummary};
pub use self::support::{TicketAction, TicketFilter, WeeklyTicketCount};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,

    #[serde(default)]
    pub customer_id: Option<i64>,

    #[serde(default)]
    pub recipient_id: Option<i64>,

    #[serde(default)]
    pub timestamp: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub amount: Option<f64>,

    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: i64,

    #[serde(default)]
    pub customer_id: Option<i64>,

    #[serde(default)]
    pub customer_name: Option<String>,

    #[serde(default)]
    pub loan_type: Option<String>,

    #[serde(default)]
    pub amount_requested: Option<f64>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub applied_at: Option<String>,

    #[serde(default)]
    pub reviewed_by: Option<String>,

    #[serde(default)]
    pub reviewed_at: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: i64,

    #[serde(default)]
    pub customer_id: Option<i64>,

    #[serde(default)]
    pub issue_type: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub handled_by: Option<String>,

    #[serde(default)]
    pub handled_at: Option<String>,

    #[serde(default)]
    pub resolution_note: Option<String>,
}

fn page_query(page: u32, size: u32) -> Vec<(&'static str, String)> {
    vec![("page", page.to_string()), ("size", size.to_string())]
}
