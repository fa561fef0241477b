//! Tenancy: hierarchical, opt-in access control for tenant-scoped resources.
//!
//! A user may access a resource when tenancy is disabled, or when the
//! resource's tenant is the user's tenant or one of its active descendants.
//! Every function takes the request's [`TenancyTx`] explicitly and keeps no
//! state between calls.

pub mod check;
pub mod engine;
pub mod error;
pub mod filter;
pub mod hierarchy;
pub mod resolver;
pub mod resource;
pub mod snapshot;
pub mod store;
pub mod toggle;

pub use check::{check, check_id, check_resource, UnassignedTenant};
pub use engine::is_resource_authorized_to_user;
pub use error::{CheckError, TenancyError};
pub use filter::filter_authorized;
pub use hierarchy::{get_tenant, get_user_tenant_id_list, get_user_tenant_list};
pub use resolver::{get_delivery_service_tenant_info, get_resource_tenant_id};
pub use resource::{ResourceKey, ResourceOwner, TenantedResource, Tenanter};
pub use snapshot::TenantSnapshot;
pub use store::{PgBackend, TenancyBackend, TenancyTx, TenantAccess};
pub use toggle::is_tenancy_enabled;
