#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Extension, Router,
};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;

use traffic_ops_tenancy::auth::CurrentUser;
use traffic_ops_tenancy::database::models::Tenant;
use traffic_ops_tenancy::database::DatabaseError;
use traffic_ops_tenancy::handlers::{router, AppState};
use traffic_ops_tenancy::tenancy::{
    ResourceKey, ResourceOwner, TenancyBackend, TenancyError, TenancyTx, TenantAccess, TenantSnapshot,
};

// root(1) -> tenantA(2) -> tenantB(3); tenantC(4) under root; tenantD(5) inactive under C
pub const ROOT: i32 = 1;
pub const TENANT_A: i32 = 2;
pub const TENANT_B: i32 = 3;
pub const TENANT_C: i32 = 4;
pub const TENANT_D: i32 = 5;

pub const DS_B_ID: i32 = 10;
pub const DS_D_ID: i32 = 13;
pub const DS_UNASSIGNED_ID: i32 = 14;

pub fn tenant(id: i32, name: &str, active: bool, parent_id: Option<i32>) -> Tenant {
    Tenant {
        id,
        name: name.to_string(),
        active,
        parent_id,
        last_updated: Utc.with_ymd_and_hms(2019, 6, 1, 12, 0, 0).unwrap(),
    }
}

/// Tenant tree and delivery services, with no use_tenancy parameter
pub fn hierarchy() -> TenantSnapshot {
    let mut snapshot = TenantSnapshot::new()
        .with_tenant(tenant(ROOT, "root", true, None))
        .with_tenant(tenant(TENANT_A, "tenantA", true, Some(ROOT)))
        .with_tenant(tenant(TENANT_B, "tenantB", true, Some(TENANT_A)))
        .with_tenant(tenant(TENANT_C, "tenantC", true, Some(ROOT)))
        .with_tenant(tenant(TENANT_D, "tenantD", false, Some(TENANT_C)));

    for (id, xml_id, tenant_id) in [
        (DS_B_ID, "ds-b", Some(TENANT_B)),
        (DS_D_ID, "ds-d", Some(TENANT_D)),
        (DS_UNASSIGNED_ID, "ds-unassigned", None),
    ] {
        snapshot = snapshot
            .with_resource(ResourceKey::DeliveryServiceId(id), tenant_id)
            .with_resource(ResourceKey::DeliveryServiceXmlId(xml_id.to_string()), tenant_id);
    }
    snapshot
}

pub fn enforcing() -> TenantSnapshot {
    hierarchy().with_use_tenancy("true")
}

pub fn user(tenant_id: i32) -> CurrentUser {
    CurrentUser::new(tenant_id * 10, format!("user{}", tenant_id), tenant_id)
}

/// Store whose every query fails, as if the database dropped mid-request
#[derive(Debug, Clone, Copy, Default)]
pub struct BrokenStore;

pub const BROKEN_CONTEXT: &str = "connection reset by tenant-db-7";

fn lost() -> TenancyError {
    TenancyError::Query {
        context: BROKEN_CONTEXT,
        source: sqlx::Error::PoolClosed,
    }
}

#[async_trait]
impl TenancyTx for BrokenStore {
    async fn use_tenancy(&mut self) -> Result<bool, TenancyError> {
        Err(lost())
    }

    async fn tenant_access(&mut self, _user_tenant_id: i32, _resource_tenant_id: i32) -> Result<TenantAccess, TenancyError> {
        Err(lost())
    }

    async fn descendant_tenants(&mut self, _tenant_id: i32) -> Result<Vec<Tenant>, TenancyError> {
        Err(lost())
    }

    async fn descendant_tenant_ids(&mut self, _tenant_id: i32) -> Result<Vec<i32>, TenancyError> {
        Err(lost())
    }

    async fn tenant(&mut self, _id: i32) -> Result<Option<Tenant>, TenancyError> {
        Err(lost())
    }

    async fn resource_owner(&mut self, _key: &ResourceKey) -> Result<ResourceOwner, TenancyError> {
        Err(lost())
    }
}

#[async_trait]
impl TenancyBackend for BrokenStore {
    async fn begin(&self) -> Result<Box<dyn TenancyTx>, TenancyError> {
        Ok(Box::new(*self))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut))
    }
}

/// Router over `backend`, with `user` injected the way the auth layer would
pub fn app(backend: impl TenancyBackend + 'static, user: Option<CurrentUser>) -> Router {
    let app = router(AppState::new(backend));
    match user {
        Some(user) => app.layer(Extension(user)),
        None => app,
    }
}

pub async fn get_json(app: Router, uri: &str) -> Result<(StatusCode, Value)> {
    let res = app
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;
    let status = res.status();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&body)?))
}
