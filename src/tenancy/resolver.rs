use tracing::debug;

use super::error::TenancyError;
use super::resource::{ResourceKey, ResourceOwner};
use super::store::TenancyTx;
use crate::database::models::DeliveryServiceTenantInfo;

/// Point lookup of the tenant owning `key`. A missing row is
/// [`ResourceOwner::NotFound`], not an error, so callers can answer 404
/// instead of 403.
pub async fn get_resource_tenant_id<T>(tx: &mut T, key: &ResourceKey) -> Result<ResourceOwner, TenancyError>
where
    T: TenancyTx + ?Sized,
{
    let owner = tx.resource_owner(key).await?;
    debug!("Resolved {} -> {:?}", key, owner);
    Ok(owner)
}

/// The delivery service `xml_id` with its owning tenant, or `None` when no
/// such delivery service exists
pub async fn get_delivery_service_tenant_info<T>(
    tx: &mut T,
    xml_id: &str,
) -> Result<Option<DeliveryServiceTenantInfo>, TenancyError>
where
    T: TenancyTx + ?Sized,
{
    let key = ResourceKey::DeliveryServiceXmlId(xml_id.to_string());
    let info = match get_resource_tenant_id(tx, &key).await? {
        ResourceOwner::NotFound => None,
        owner => Some(DeliveryServiceTenantInfo {
            xml_id: xml_id.to_string(),
            tenant_id: owner.tenant_id(),
        }),
    };
    Ok(info)
}
