use serde::{Deserialize, Serialize};

/// Role string the backend uses for regular staff.
pub const EMPLOYEE_ROLE: &str = "employee";

/// A user account as returned by `GET /api/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Staff number, distinct from the account id.
    #[serde(default)]
    pub employee_id: Option<String>,
    pub role: String,
}

impl User {
    pub fn is_employee(&self) -> bool {
        self.role == EMPLOYEE_ROLE
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Envelope of `GET /api/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserList {
    #[serde(default)]
    pub users: Vec<User>,
}

/// The signed-in identity the workflows act on behalf of.
///
/// Authentication happens elsewhere; the caller only carries what the
/// workflows need to scope their queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub id: i64,
    pub role: String,
}

impl Caller {
    pub fn new(id: i64, role: impl Into<String>) -> Self {
        Self {
            id,
            role: role.into(),
        }
    }

    pub fn is_employee(&self) -> bool {
        self.role == EMPLOYEE_ROLE
    }
}
