use serde::{Deserialize, Serialize};

use crate::tenancy::Tenanter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Origin {
    pub id: i32,
    pub name: String,
    pub delivery_service_id: Option<i32>,
    pub tenant_id: Option<i32>,
}

impl Tenanter for Origin {
    fn tenant_id(&self) -> Option<i32> {
        self.tenant_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn resource_type(&self) -> &'static str {
        "origin"
    }
}
