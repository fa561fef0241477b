use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use async_trait::async_trait;
use sqlx::PgConnection;
use tracing::debug;

use super::error::TenancyError;
use super::resource::{ResourceKey, ResourceOwner};
use super::store::{TenancyBackend, TenancyTx, TenantAccess};
use crate::database::manager::DatabaseError;
use crate::database::models::Tenant;

/// The whole tenant table plus the `use_tenancy` parameter, held in memory
/// and walked in process. Loaded inside one transaction, so every decision
/// made against it sees the same hierarchy.
///
/// Resource ownership is not part of the tenant table; only the keys passed
/// to [`TenantSnapshot::load`] or registered with
/// [`TenantSnapshot::with_resource`] resolve, anything else is not found.
#[derive(Debug, Clone, Default)]
pub struct TenantSnapshot {
    tenants: BTreeMap<i32, Tenant>,
    use_tenancy: Option<String>,
    resources: HashMap<ResourceKey, ResourceOwner>,
}

impl TenantSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the tenant table, the toggle and the owners of `keys` through `conn`
    pub async fn load(conn: &mut PgConnection, keys: &[ResourceKey]) -> Result<Self, TenancyError> {
        let tenants = sqlx::query_as::<_, Tenant>(
            "SELECT id, name, active, parent_id, last_updated FROM tenant",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| TenancyError::query("loading tenant table", e))?;

        let use_tenancy = sqlx::query_scalar::<_, Option<String>>(
            "SELECT value FROM parameter WHERE name = 'use_tenancy' AND config_file = 'global' FETCH FIRST 1 ROW ONLY",
        )
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| TenancyError::query("checking if tenancy is enabled", e))?
        .flatten();

        let mut snapshot = Self {
            tenants: tenants.into_iter().map(|t| (t.id, t)).collect(),
            use_tenancy,
            resources: HashMap::new(),
        };
        for key in keys {
            let owner = conn.resource_owner(key).await?;
            snapshot.resources.insert(key.clone(), owner);
        }

        debug!(
            "Loaded tenant snapshot: {} tenants, {} resources",
            snapshot.tenants.len(),
            snapshot.resources.len()
        );
        Ok(snapshot)
    }

    pub fn with_tenant(mut self, tenant: Tenant) -> Self {
        self.tenants.insert(tenant.id, tenant);
        self
    }

    /// Set the raw `use_tenancy` parameter value, as stored in the parameter table
    pub fn with_use_tenancy(mut self, value: impl Into<String>) -> Self {
        self.use_tenancy = Some(value.into());
        self
    }

    pub fn with_resource(mut self, key: ResourceKey, tenant_id: Option<i32>) -> Self {
        self.resources.insert(key, ResourceOwner::from_lookup(Some(tenant_id)));
        self
    }

    fn toggle(&self) -> Result<bool, TenancyError> {
        match self.use_tenancy.as_deref() {
            None => Ok(false),
            Some(raw) => parse_pg_bool(raw).ok_or_else(|| TenancyError::InvalidToggleValue(raw.to_string())),
        }
    }

    /// Breadth-first walk down from `root`; empty when `root` does not exist
    fn descendants(&self, root: i32) -> Vec<&Tenant> {
        let Some(start) = self.tenants.get(&root) else {
            return Vec::new();
        };

        let mut children: HashMap<i32, Vec<&Tenant>> = HashMap::new();
        for tenant in self.tenants.values() {
            if let Some(parent_id) = tenant.parent_id {
                children.entry(parent_id).or_default().push(tenant);
            }
        }

        let mut seen = HashSet::from([start.id]);
        let mut queue = VecDeque::from([start]);
        let mut closure = Vec::new();
        while let Some(tenant) = queue.pop_front() {
            closure.push(tenant);
            for child in children.get(&tenant.id).into_iter().flatten().copied() {
                // the tree should be acyclic, but never loop if it isn't
                if seen.insert(child.id) {
                    queue.push_back(child);
                }
            }
        }
        closure
    }
}

/// Interpret a parameter value the way Postgres casts text to boolean
pub fn parse_pg_bool(value: &str) -> Option<bool> {
    let v = value.trim().to_ascii_lowercase();
    if v.is_empty() {
        return None;
    }
    match v.as_str() {
        "1" | "on" => return Some(true),
        "0" | "of" | "off" => return Some(false),
        _ => {}
    }
    // any unique prefix of the words is accepted
    if "true".starts_with(&v) || "yes".starts_with(&v) {
        Some(true)
    } else if "false".starts_with(&v) || "no".starts_with(&v) {
        Some(false)
    } else {
        None
    }
}

#[async_trait]
impl TenancyTx for TenantSnapshot {
    async fn use_tenancy(&mut self) -> Result<bool, TenancyError> {
        self.toggle()
    }

    async fn tenant_access(
        &mut self,
        user_tenant_id: i32,
        resource_tenant_id: i32,
    ) -> Result<TenantAccess, TenancyError> {
        let use_tenancy = self.toggle()?;
        let resource_active = self
            .descendants(user_tenant_id)
            .into_iter()
            .find(|t| t.id == resource_tenant_id)
            .map(|t| t.active);
        Ok(TenantAccess {
            use_tenancy,
            resource_active,
        })
    }

    async fn descendant_tenants(&mut self, tenant_id: i32) -> Result<Vec<Tenant>, TenancyError> {
        Ok(self.descendants(tenant_id).into_iter().cloned().collect())
    }

    async fn descendant_tenant_ids(&mut self, tenant_id: i32) -> Result<Vec<i32>, TenancyError> {
        Ok(self.descendants(tenant_id).into_iter().map(|t| t.id).collect())
    }

    async fn tenant(&mut self, id: i32) -> Result<Option<Tenant>, TenancyError> {
        Ok(self.tenants.get(&id).cloned())
    }

    async fn resource_owner(&mut self, key: &ResourceKey) -> Result<ResourceOwner, TenancyError> {
        Ok(self.resources.get(key).copied().unwrap_or(ResourceOwner::NotFound))
    }
}

/// Every request gets its own copy of the snapshot
#[async_trait]
impl TenancyBackend for TenantSnapshot {
    async fn begin(&self) -> Result<Box<dyn TenancyTx>, TenancyError> {
        Ok(Box::new(self.clone()))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
