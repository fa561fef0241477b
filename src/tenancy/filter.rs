use std::collections::HashMap;

use tracing::debug;

use super::engine::is_resource_authorized_to_user;
use super::error::TenancyError;
use super::resource::Tenanter;
use super::store::TenancyTx;
use super::toggle::is_tenancy_enabled;
use crate::auth::CurrentUser;

/// Keep only the items `user` is authorized for, in their original order.
///
/// With tenancy disabled the input comes back untouched. With tenancy
/// enabled an item without a tenant fails the whole call: a listing must not
/// silently include or drop unscoped rows. Items are checked one after the
/// other on the same transaction; the decision for a tenant is reused for
/// later items owned by that tenant.
pub async fn filter_authorized<T, R>(tx: &mut T, user: &CurrentUser, items: Vec<R>) -> Result<Vec<R>, TenancyError>
where
    T: TenancyTx + ?Sized,
    R: Tenanter + Send,
{
    if !is_tenancy_enabled(tx).await? {
        return Ok(items);
    }

    let total = items.len();
    let mut decisions: HashMap<i32, bool> = HashMap::new();
    let mut authorized = Vec::with_capacity(total);

    for item in items {
        let Some(tenant_id) = item.tenant_id() else {
            return Err(TenancyError::MissingTenant {
                resource_type: item.resource_type(),
                name: item.name().to_string(),
            });
        };

        let allowed = match decisions.get(&tenant_id) {
            Some(allowed) => *allowed,
            None => {
                let allowed = is_resource_authorized_to_user(tx, tenant_id, user).await?;
                decisions.insert(tenant_id, allowed);
                allowed
            }
        };

        if allowed {
            authorized.push(item);
        }
    }

    debug!(
        "Filtered {} of {} items for user {} (tenant {})",
        authorized.len(),
        total,
        user.user_name,
        user.tenant_id
    );
    Ok(authorized)
}
