use std::fmt;

use serde::Serialize;

use crate::database::models::{DeliveryServiceTenantInfo, Origin, User};

/// Capability shared by every tenant-scoped resource
pub trait Tenanter {
    /// Owning tenant; `None` when the row carries no tenant
    fn tenant_id(&self) -> Option<i32>;

    fn name(&self) -> &str;

    /// Diagnostic tag, e.g. "deliveryservice"
    fn resource_type(&self) -> &'static str;
}

/// Closed set of tenant-scoped resources, for lists that mix kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TenantedResource {
    DeliveryService(DeliveryServiceTenantInfo),
    Origin(Origin),
    User(User),
}

impl Tenanter for TenantedResource {
    fn tenant_id(&self) -> Option<i32> {
        match self {
            TenantedResource::DeliveryService(ds) => ds.tenant_id(),
            TenantedResource::Origin(origin) => origin.tenant_id(),
            TenantedResource::User(user) => user.tenant_id(),
        }
    }

    fn name(&self) -> &str {
        match self {
            TenantedResource::DeliveryService(ds) => ds.name(),
            TenantedResource::Origin(origin) => origin.name(),
            TenantedResource::User(user) => user.name(),
        }
    }

    fn resource_type(&self) -> &'static str {
        match self {
            TenantedResource::DeliveryService(ds) => ds.resource_type(),
            TenantedResource::Origin(origin) => origin.resource_type(),
            TenantedResource::User(user) => user.resource_type(),
        }
    }
}

/// Natural key used to find the tenant that owns a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    DeliveryServiceXmlId(String),
    DeliveryServiceId(i32),
    OriginId(i32),
    UserId(i32),
}

impl ResourceKey {
    pub fn resource_type(&self) -> &'static str {
        match self {
            ResourceKey::DeliveryServiceXmlId(_) | ResourceKey::DeliveryServiceId(_) => "deliveryservice",
            ResourceKey::OriginId(_) => "origin",
            ResourceKey::UserId(_) => "user",
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKey::DeliveryServiceXmlId(xml_id) => write!(f, "{} '{}'", self.resource_type(), xml_id),
            ResourceKey::DeliveryServiceId(id) | ResourceKey::OriginId(id) | ResourceKey::UserId(id) => {
                write!(f, "{} {}", self.resource_type(), id)
            }
        }
    }
}

/// Result of resolving a [`ResourceKey`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceOwner {
    /// No row matches the key
    NotFound,
    /// The row exists but its tenant_id is null
    Unassigned,
    Tenant(i32),
}

impl ResourceOwner {
    pub fn from_lookup(row: Option<Option<i32>>) -> Self {
        match row {
            None => ResourceOwner::NotFound,
            Some(None) => ResourceOwner::Unassigned,
            Some(Some(id)) => ResourceOwner::Tenant(id),
        }
    }

    pub fn found(&self) -> bool {
        !matches!(self, ResourceOwner::NotFound)
    }

    pub fn tenant_id(&self) -> Option<i32> {
        match self {
            ResourceOwner::Tenant(id) => Some(*id),
            ResourceOwner::NotFound | ResourceOwner::Unassigned => None,
        }
    }
}
