use axum::extract::{Path, State};

use super::AppState;
use crate::auth::CurrentUser;
use crate::database::models::Tenant;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::tenancy;

/// GET /api/tenants - the current user's tenant and all of its descendants
pub async fn list(State(state): State<AppState>, user: CurrentUser) -> ApiResult<Vec<Tenant>> {
    let mut tx = state.backend.begin().await?;
    let tenants = tenancy::get_user_tenant_list(tx.as_mut(), &user).await?;
    Ok(ApiResponse::success(tenants))
}

/// GET /api/tenants/:id - a single tenant, if the current user may see it.
///
/// While tenancy is enforced the tenant must be in the same subtree that
/// `list` returns, inactive tenants included. The active flag restricts
/// access to resources owned by a tenant, not to the tenant record itself.
pub async fn show(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Vec<Tenant>> {
    let mut tx = state.backend.begin().await?;

    if tenancy::is_tenancy_enabled(tx.as_mut()).await?
        && !tenancy::get_user_tenant_id_list(tx.as_mut(), user.tenant_id)
            .await?
            .contains(&id)
    {
        tracing::warn!("User {} denied access to tenant {}", user.user_name, id);
        return Err(ApiError::forbidden("Access to this resource is not authorized"));
    }

    match tenancy::get_tenant(tx.as_mut(), id).await? {
        Some(tenant) => Ok(ApiResponse::success(vec![tenant])),
        None => Err(ApiError::not_found(format!("tenant {} not found", id))),
    }
}
