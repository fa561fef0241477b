use super::engine::is_resource_authorized_to_user;
use super::error::{CheckError, TenancyError};
use super::resolver::{get_delivery_service_tenant_info, get_resource_tenant_id};
use super::resource::{ResourceKey, ResourceOwner};
use super::store::TenancyTx;
use super::toggle::is_tenancy_enabled;
use crate::auth::CurrentUser;

const NOT_AUTHORIZED: &str = "Access to this resource is not authorized";

/// What to do with a resource whose row exists but carries no tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnassignedTenant {
    /// A missing tenant is a data integrity failure while tenancy is enabled
    Required,
    /// A missing tenant means the resource is unrestricted
    Optional,
}

/// Check that `user` may access the delivery service `xml_id`.
///
/// An unknown XMLID is a 400. A delivery service without a tenant is a
/// system error unless tenancy is disabled.
pub async fn check<T>(tx: &mut T, user: &CurrentUser, xml_id: &str) -> Result<(), CheckError>
where
    T: TenancyTx + ?Sized,
{
    let Some(info) = get_delivery_service_tenant_info(tx, xml_id).await? else {
        return Err(CheckError::bad_request(format!("no such deliveryservice: '{}'", xml_id)));
    };
    let key = ResourceKey::DeliveryServiceXmlId(info.xml_id);
    let owner = ResourceOwner::from_lookup(Some(info.tenant_id));
    authorize_owner(tx, user, &key, owner, UnassignedTenant::Required, NOT_AUTHORIZED).await
}

/// Check that `user` may access the delivery service with id `ds_id`.
///
/// Succeeds without any lookup when tenancy is disabled, and for delivery
/// services that have no tenant. An unknown id is a 404.
pub async fn check_id<T>(tx: &mut T, user: &CurrentUser, ds_id: i32) -> Result<(), CheckError>
where
    T: TenancyTx + ?Sized,
{
    if !is_tenancy_enabled(tx).await? {
        return Ok(());
    }

    let key = ResourceKey::DeliveryServiceId(ds_id);
    let owner = get_resource_tenant_id(tx, &key).await?;
    if !owner.found() {
        return Err(CheckError::not_found(format!("delivery service {} not found", ds_id)));
    }
    authorize_owner(tx, user, &key, owner, UnassignedTenant::Optional, "not authorized on this tenant").await
}

/// Check any tenant-scoped resource by key. An unknown key is a 404.
pub async fn check_resource<T>(
    tx: &mut T,
    user: &CurrentUser,
    key: &ResourceKey,
    unassigned: UnassignedTenant,
) -> Result<(), CheckError>
where
    T: TenancyTx + ?Sized,
{
    let owner = get_resource_tenant_id(tx, key).await?;
    if !owner.found() {
        return Err(CheckError::not_found(format!("{} not found", key)));
    }
    authorize_owner(tx, user, key, owner, unassigned, NOT_AUTHORIZED).await
}

// Shared by every entry point so the rules cannot drift between them.
async fn authorize_owner<T>(
    tx: &mut T,
    user: &CurrentUser,
    key: &ResourceKey,
    owner: ResourceOwner,
    unassigned: UnassignedTenant,
    denial: &str,
) -> Result<(), CheckError>
where
    T: TenancyTx + ?Sized,
{
    let tenant_id = match (owner.tenant_id(), unassigned) {
        (Some(tenant_id), _) => tenant_id,
        (None, UnassignedTenant::Optional) => return Ok(()),
        (None, UnassignedTenant::Required) => {
            if !is_tenancy_enabled(tx).await? {
                return Ok(());
            }
            return Err(TenancyError::MissingTenant {
                resource_type: key.resource_type(),
                name: key.to_string(),
            }
            .into());
        }
    };

    if is_resource_authorized_to_user(tx, tenant_id, user).await? {
        Ok(())
    } else {
        tracing::debug!("Denied {} to user {}", key, user.user_name);
        Err(CheckError::forbidden(denial))
    }
}
