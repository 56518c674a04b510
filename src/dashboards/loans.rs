use std::collections::BTreeMap;

use super::*;

/// Loan totals keyed by status (PENDING, UNDER_REVIEW, APPROVED, ...).
pub type LoanCounts = BTreeMap<String, u64>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoanDecision {
    Approve,
    Reject,
    Process,
}

impl LoanDecision {
    fn segment(&self) -> &'static str {
        match self {
            LoanDecision::Approve => "approve",
            LoanDecision::Reject => "reject",
            LoanDecision::Process => "process",
        }
    }
}

impl Session {
    pub fn loan_counts(&self) -> Result<LoanCounts, ApiError> {
        self.get_json("/api/loans/dashboard/counts")
    }

    pub fn loans(&self, page: u32, size: u32, status: Option<&str>) -> Result<Page<Loan>, ApiError> {
        let mut q = page_query(page, size);
        if let Some(s) = status.filter(|s| !s.is_empty()) {
            q.push(("status", s.to_string()));
        }
        self.get_json_query("/api/loans", &q)
    }

    pub fn decide_loan(&self, loan_id: i64, decision: LoanDecision) -> Result<Loan, ApiError> {
        self.put_json::<(), _>(
            &format!("/api/loans/{}/{}", loan_id, decision.segment()),
            None,
        )
    }
}
