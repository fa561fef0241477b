use serde::{Deserialize, Serialize};

use crate::tenancy::Tenanter;

/// A row of `tm_user` as seen by tenancy filtering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    pub tenant_id: Option<i32>,
}

impl Tenanter for User {
    fn tenant_id(&self) -> Option<i32> {
        self.tenant_id
    }

    fn name(&self) -> &str {
        &self.username
    }

    fn resource_type(&self) -> &'static str {
        "user"
    }
}
