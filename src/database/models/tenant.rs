use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `tenant` table. Tenants form a forest through `parent_id`;
/// only roots have no parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: i32,
    pub name: String,
    pub active: bool,
    pub parent_id: Option<i32>,
    pub last_updated: DateTime<Utc>,
}
