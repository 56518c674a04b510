use super::*;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub full_name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub account_number: Option<String>,

    #[serde(default)]
    pub account_balance: Option<f64>,

    #[serde(default)]
    pub account_status: Option<String>,

    #[serde(default)]
    pub last_login: Option<String>,
}

impl CustomerProfile {
    /// Money movement is only offered on active accounts.
    pub fn is_active(&self) -> bool {
        self.account_status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("ACTIVE"))
    }
}

#[derive(Clone, Debug, Default)]
pub struct TransactionFilter {
    pub page: u32,
    pub size: u32,
    pub kind: Option<String>,
    pub status: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

impl TransactionFilter {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut q = page_query(self.page, self.size);
        let optional = [
            ("type", &self.kind),
            ("status", &self.status),
            ("fromDate", &self.from_date),
            ("toDate", &self.to_date),
        ];
        for (key, value) in optional {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                q.push((key, v.to_string()));
            }
        }
        q
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionsPage {
    #[serde(default)]
    pub total: u64,

    #[serde(default)]
    pub page: u32,

    #[serde(default)]
    pub size: u32,

    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl TransactionsPage {
    pub fn has_more(&self) -> bool {
        (u64::from(self.page) + 1) * u64::from(self.size) < self.total
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub recipient_account_number: String,
    pub amount: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoanApplication<'a> {
    loan_type: &'a str,
    amount_requested: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TicketRequest<'a> {
    issue_type: &'a str,
    description: &'a str,
}

/// Confirmation returned by deposit and transfer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionReceipt {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub balance: Option<f64>,
}

impl Session {
    pub fn customer_profile(&self) -> Result<CustomerProfile, ApiError> {
        self.get_json("/api/customer/dashboard/profile")
    }

    pub fn customer_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<TransactionsPage, ApiError> {
        self.get_json_query("/api/customer/dashboard/transactions", &filter.query())
    }

    pub fn customer_loans(&self) -> Result<Vec<Loan>, ApiError> {
        self.get_json("/api/customer/dashboard/loans")
    }

    pub fn customer_tickets(&self) -> Result<Vec<Ticket>, ApiError> {
        self.get_json("/api/customer/dashboard/tickets")
    }

    pub fn deposit(&self, amount: f64) -> Result<ActionReceipt, ApiError> {
        self.post_query(
            "/api/customer/dashboard/deposit",
            &[("amount", amount.to_string())],
        )
    }

    pub fn transfer(&self, req: &TransferRequest) -> Result<ActionReceipt, ApiError> {
        self.post_json("/api/customer/dashboard/transfer", req)
    }

    pub fn apply_for_loan(
        &self,
        loan_type: &str,
        amount_requested: f64,
    ) -> Result<serde_json::Value, ApiError> {
        self.post_json(
            "/api/customer/dashboard/loan",
            &LoanApplication {
                loan_type,
                amount_requested,
            },
        )
    }

    pub fn open_ticket(
        &self,
        issue_type: &str,
        description: &str,
    ) -> Result<serde_json::Value, ApiError> {
        self.post_json(
            "/api/customer/dashboard/ticket",
            &TicketRequest {
                issue_type,
                description,
            },
        )
    }
}
