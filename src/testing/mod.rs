//! Shared fixture: a small tenant tree with resources at every level.
//!
//! ```text
//! root(1)
//! ├── tenantA(2)
//! │   └── tenantB(3)
//! └── tenantC(4)
//!     └── tenantD(5, inactive)
//! ```

use chrono::{TimeZone, Utc};

use crate::auth::CurrentUser;
use crate::database::models::Tenant;
use crate::tenancy::{ResourceKey, TenantSnapshot};

pub const ROOT: i32 = 1;
pub const TENANT_A: i32 = 2;
pub const TENANT_B: i32 = 3;
pub const TENANT_C: i32 = 4;
pub const TENANT_D: i32 = 5;

pub const DS_B_ID: i32 = 10;
pub const DS_UNASSIGNED_ID: i32 = 14;
pub const ORIGIN_B_ID: i32 = 20;
pub const USER_C_ID: i32 = 30;

pub fn tenant(id: i32, name: &str, active: bool, parent_id: Option<i32>) -> Tenant {
    Tenant {
        id,
        name: name.to_string(),
        active,
        parent_id,
        last_updated: Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap(),
    }
}

/// The fixture tree with no `use_tenancy` parameter set
pub fn scenario() -> TenantSnapshot {
    let delivery_services = [
        (DS_B_ID, "ds-b", Some(TENANT_B)),
        (11, "ds-a", Some(TENANT_A)),
        (12, "ds-c", Some(TENANT_C)),
        (13, "ds-d", Some(TENANT_D)),
        (DS_UNASSIGNED_ID, "ds-unassigned", None),
    ];

    let mut snapshot = TenantSnapshot::new()
        .with_tenant(tenant(ROOT, "root", true, None))
        .with_tenant(tenant(TENANT_A, "tenantA", true, Some(ROOT)))
        .with_tenant(tenant(TENANT_B, "tenantB", true, Some(TENANT_A)))
        .with_tenant(tenant(TENANT_C, "tenantC", true, Some(ROOT)))
        .with_tenant(tenant(TENANT_D, "tenantD", false, Some(TENANT_C)))
        .with_resource(ResourceKey::OriginId(ORIGIN_B_ID), Some(TENANT_B))
        .with_resource(ResourceKey::UserId(USER_C_ID), Some(TENANT_C));

    for (id, xml_id, tenant_id) in delivery_services {
        snapshot = snapshot
            .with_resource(ResourceKey::DeliveryServiceId(id), tenant_id)
            .with_resource(ResourceKey::DeliveryServiceXmlId(xml_id.to_string()), tenant_id);
    }
    snapshot
}

pub fn user(tenant_id: i32) -> CurrentUser {
    CurrentUser::new(100 + tenant_id, format!("user-of-{}", tenant_id), tenant_id)
}
