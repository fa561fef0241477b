use super::error::TenancyError;
use super::store::TenancyTx;
use crate::auth::CurrentUser;
use crate::database::models::Tenant;

/// Tenants `user` has access to: their own tenant and every descendant.
///
/// Does not consult `use_tenancy`. Callers that use this list to enforce
/// tenancy must check [`is_tenancy_enabled`](super::is_tenancy_enabled)
/// themselves.
pub async fn get_user_tenant_list<T>(tx: &mut T, user: &CurrentUser) -> Result<Vec<Tenant>, TenancyError>
where
    T: TenancyTx + ?Sized,
{
    tx.descendant_tenants(user.tenant_id).await
}

/// IDs of `user_tenant_id` and all of its descendants
pub async fn get_user_tenant_id_list<T>(tx: &mut T, user_tenant_id: i32) -> Result<Vec<i32>, TenancyError>
where
    T: TenancyTx + ?Sized,
{
    tx.descendant_tenant_ids(user_tenant_id).await
}

pub async fn get_tenant<T>(tx: &mut T, id: i32) -> Result<Option<Tenant>, TenancyError>
where
    T: TenancyTx + ?Sized,
{
    tx.tenant(id).await
}
