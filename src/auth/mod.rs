use serde::{Deserialize, Serialize};

/// The authenticated user behind a request. Built by the authentication
/// layer and only read by tenancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: i32,
    pub user_name: String,
    pub tenant_id: i32,
}

impl CurrentUser {
    pub fn new(id: i32, user_name: impl Into<String>, tenant_id: i32) -> Self {
        Self {
            id,
            user_name: user_name.into(),
            tenant_id,
        }
    }
}
