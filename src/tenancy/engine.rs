use tracing::{debug, error};

use super::error::TenancyError;
use super::store::TenancyTx;
use crate::auth::CurrentUser;

/// Whether `user` may access a resource owned by `resource_tenant_id`.
///
/// With tenancy disabled every resource is authorized. Otherwise the
/// resource tenant must be the user's own tenant or one of its descendants,
/// and must be active. A tenant that does not exist is simply not reachable,
/// so it is denied rather than reported as an error.
pub async fn is_resource_authorized_to_user<T>(
    tx: &mut T,
    resource_tenant_id: i32,
    user: &CurrentUser,
) -> Result<bool, TenancyError>
where
    T: TenancyTx + ?Sized,
{
    let access = tx
        .tenant_access(user.tenant_id, resource_tenant_id)
        .await
        .map_err(|e| {
            error!(
                "Error checking user tenant {} access on resource tenant {}: {}",
                user.tenant_id, resource_tenant_id, e
            );
            e
        })?;

    if !access.use_tenancy {
        return Ok(true);
    }

    let authorized = access.resource_active == Some(true);
    debug!(
        "Tenancy decision: user {} (tenant {}) on resource tenant {} -> {}",
        user.user_name, user.tenant_id, resource_tenant_id, authorized
    );
    Ok(authorized)
}
