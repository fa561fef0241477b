use async_trait::async_trait;
use sqlx::{FromRow, PgConnection, PgPool, Postgres, Transaction};
use tracing::debug;

use super::error::TenancyError;
use super::resource::{ResourceKey, ResourceOwner};
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Tenant;

/// Toggle value and, when the resource tenant sits in the user's descendant
/// closure, that tenant's active flag. Produced by a single round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct TenantAccess {
    pub use_tenancy: bool,
    pub resource_active: Option<bool>,
}

/// Read view of the tenancy tables for the duration of one request.
/// Every tenancy operation takes one of these explicitly.
#[async_trait]
pub trait TenancyTx: Send {
    /// Global `use_tenancy` flag; absent or null reads as false
    async fn use_tenancy(&mut self) -> Result<bool, TenancyError>;

    async fn tenant_access(
        &mut self,
        user_tenant_id: i32,
        resource_tenant_id: i32,
    ) -> Result<TenantAccess, TenancyError>;

    /// Tenant `tenant_id` and all of its descendants, active or not
    async fn descendant_tenants(&mut self, tenant_id: i32) -> Result<Vec<Tenant>, TenancyError>;

    async fn descendant_tenant_ids(&mut self, tenant_id: i32) -> Result<Vec<i32>, TenancyError>;

    async fn tenant(&mut self, id: i32) -> Result<Option<Tenant>, TenancyError>;

    async fn resource_owner(&mut self, key: &ResourceKey) -> Result<ResourceOwner, TenancyError>;
}

/// Opens a [`TenancyTx`] per request
#[async_trait]
pub trait TenancyBackend: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn TenancyTx>, TenancyError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}

const USE_TENANCY_QUERY: &str = r#"
    SELECT COALESCE(value::boolean, FALSE) AS value FROM parameter
    WHERE name = 'use_tenancy' AND config_file = 'global'
    UNION ALL SELECT FALSE
    FETCH FIRST 1 ROW ONLY
"#;

// $1 is the user tenant ID and $2 is the resource tenant ID
const TENANT_ACCESS_QUERY: &str = r#"
    WITH RECURSIVE q AS (
        SELECT id, active FROM tenant WHERE id = $1
        UNION
        SELECT t.id, t.active FROM tenant t JOIN q ON q.id = t.parent_id
    ),
    tenancy AS (
        SELECT COALESCE(value::boolean, FALSE) AS value FROM parameter
        WHERE name = 'use_tenancy' AND config_file = 'global'
        UNION ALL SELECT FALSE
        FETCH FIRST 1 ROW ONLY
    )
    SELECT tenancy.value AS use_tenancy,
           (SELECT q.active FROM q WHERE q.id = $2) AS resource_active
    FROM tenancy
"#;

const DESCENDANT_TENANTS_QUERY: &str = r#"
    WITH RECURSIVE q AS (
        SELECT id, name, active, parent_id, last_updated FROM tenant WHERE id = $1
        UNION
        SELECT t.id, t.name, t.active, t.parent_id, t.last_updated
        FROM tenant t JOIN q ON q.id = t.parent_id
    )
    SELECT id, name, active, parent_id, last_updated FROM q
"#;

const DESCENDANT_TENANT_IDS_QUERY: &str = r#"
    WITH RECURSIVE q AS (
        SELECT id FROM tenant WHERE id = $1
        UNION
        SELECT t.id FROM tenant t JOIN q ON q.id = t.parent_id
    )
    SELECT id FROM q
"#;

const TENANT_QUERY: &str = "SELECT id, name, active, parent_id, last_updated FROM tenant WHERE id = $1";

#[async_trait]
impl TenancyTx for PgConnection {
    async fn use_tenancy(&mut self) -> Result<bool, TenancyError> {
        sqlx::query_scalar::<_, bool>(USE_TENANCY_QUERY)
            .fetch_one(&mut *self)
            .await
            .map_err(|e| TenancyError::query("checking if tenancy is enabled", e))
    }

    async fn tenant_access(
        &mut self,
        user_tenant_id: i32,
        resource_tenant_id: i32,
    ) -> Result<TenantAccess, TenancyError> {
        debug!("Query: {}", TENANT_ACCESS_QUERY);
        sqlx::query_as::<_, TenantAccess>(TENANT_ACCESS_QUERY)
            .bind(user_tenant_id)
            .bind(resource_tenant_id)
            .fetch_one(&mut *self)
            .await
            .map_err(|e| TenancyError::query("checking user tenant access", e))
    }

    async fn descendant_tenants(&mut self, tenant_id: i32) -> Result<Vec<Tenant>, TenancyError> {
        sqlx::query_as::<_, Tenant>(DESCENDANT_TENANTS_QUERY)
            .bind(tenant_id)
            .fetch_all(&mut *self)
            .await
            .map_err(|e| TenancyError::query("querying user tenant list", e))
    }

    async fn descendant_tenant_ids(&mut self, tenant_id: i32) -> Result<Vec<i32>, TenancyError> {
        sqlx::query_scalar::<_, i32>(DESCENDANT_TENANT_IDS_QUERY)
            .bind(tenant_id)
            .fetch_all(&mut *self)
            .await
            .map_err(|e| TenancyError::query("querying user tenant ID list", e))
    }

    async fn tenant(&mut self, id: i32) -> Result<Option<Tenant>, TenancyError> {
        sqlx::query_as::<_, Tenant>(TENANT_QUERY)
            .bind(id)
            .fetch_optional(&mut *self)
            .await
            .map_err(|e| TenancyError::query("querying tenant", e))
    }

    async fn resource_owner(&mut self, key: &ResourceKey) -> Result<ResourceOwner, TenancyError> {
        let row = match key {
            ResourceKey::DeliveryServiceXmlId(xml_id) => {
                sqlx::query_scalar::<_, Option<i32>>("SELECT tenant_id FROM deliveryservice WHERE xml_id = $1")
                    .bind(xml_id)
                    .fetch_optional(&mut *self)
                    .await
            }
            ResourceKey::DeliveryServiceId(id) => {
                sqlx::query_scalar::<_, Option<i32>>("SELECT tenant_id FROM deliveryservice WHERE id = $1")
                    .bind(*id)
                    .fetch_optional(&mut *self)
                    .await
            }
            ResourceKey::OriginId(id) => {
                sqlx::query_scalar::<_, Option<i32>>("SELECT tenant_id FROM origin WHERE id = $1")
                    .bind(*id)
                    .fetch_optional(&mut *self)
                    .await
            }
            ResourceKey::UserId(id) => {
                sqlx::query_scalar::<_, Option<i32>>("SELECT tenant_id FROM tm_user WHERE id = $1")
                    .bind(*id)
                    .fetch_optional(&mut *self)
                    .await
            }
        };

        row.map(ResourceOwner::from_lookup)
            .map_err(|e| TenancyError::query("querying resource tenant ID", e))
    }
}

#[async_trait]
impl TenancyTx for Transaction<'static, Postgres> {
    async fn use_tenancy(&mut self) -> Result<bool, TenancyError> {
        (**self).use_tenancy().await
    }

    async fn tenant_access(
        &mut self,
        user_tenant_id: i32,
        resource_tenant_id: i32,
    ) -> Result<TenantAccess, TenancyError> {
        (**self).tenant_access(user_tenant_id, resource_tenant_id).await
    }

    async fn descendant_tenants(&mut self, tenant_id: i32) -> Result<Vec<Tenant>, TenancyError> {
        (**self).descendant_tenants(tenant_id).await
    }

    async fn descendant_tenant_ids(&mut self, tenant_id: i32) -> Result<Vec<i32>, TenancyError> {
        (**self).descendant_tenant_ids(tenant_id).await
    }

    async fn tenant(&mut self, id: i32) -> Result<Option<Tenant>, TenancyError> {
        (**self).tenant(id).await
    }

    async fn resource_owner(&mut self, key: &ResourceKey) -> Result<ResourceOwner, TenancyError> {
        (**self).resource_owner(key).await
    }
}

/// Postgres-backed tenancy: one transaction per request, recursive SQL per call
#[derive(Clone)]
pub struct PgBackend {
    pool: PgPool,
}

impl PgBackend {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenancyBackend for PgBackend {
    async fn begin(&self) -> Result<Box<dyn TenancyTx>, TenancyError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| TenancyError::query("beginning transaction", e))?;
        Ok(Box::new(tx))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
