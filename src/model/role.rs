use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Roles the backend puts in the `role` claim of an access token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    Auditor,
    LoanOfficer,
    CustomerSupport,
    SuperAdmin,
    BranchManager,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Customer,
        Role::Auditor,
        Role::LoanOfficer,
        Role::CustomerSupport,
        Role::SuperAdmin,
        Role::BranchManager,
    ];

    /// Wire form, as it appears in the token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "CUSTOMER",
            Role::Auditor => "AUDITOR",
            Role::LoanOfficer => "LOAN_OFFICER",
            Role::CustomerSupport => "CUSTOMER_SUPPORT",
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::BranchManager => "BRANCH_MANAGER",
        }
    }

    pub fn portal(&self) -> Portal {
        match self {
            Role::Customer => Portal::Customer,
            _ => Portal::Employee,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role `{0}` (expected one of customer, auditor, loan-officer, customer-support, super-admin, branch-manager)")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == normalized)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Login surface a role signs in through. Each portal keeps its own
/// credential in the session store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Portal {
    Customer,
    Employee,
}

impl Portal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Portal::Customer => "customer",
            Portal::Employee => "employee",
        }
    }

    /// Where a logged-out user is sent to sign in again.
    pub fn login_surface(&self) -> &'static str {
        match self {
            Portal::Customer => "customer-login",
            Portal::Employee => "employee-login",
        }
    }
}

impl fmt::Display for Portal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown portal `{0}` (expected customer or employee)")]
pub struct UnknownPortal(pub String);

impl FromStr for Portal {
    type Err = UnknownPortal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(Portal::Customer),
            "employee" => Ok(Portal::Employee),
            _ => Err(UnknownPortal(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "../tests/model/role_tests.rs"]
mod tests;
