use tracing::error;

use super::error::TenancyError;
use super::store::TenancyTx;

/// Whether tenancy is enforced. Reads the global `use_tenancy` parameter on
/// every call; a missing parameter means disabled.
pub async fn is_tenancy_enabled<T>(tx: &mut T) -> Result<bool, TenancyError>
where
    T: TenancyTx + ?Sized,
{
    tx.use_tenancy().await.map_err(|e| {
        error!("Error checking if tenancy is enabled: {}", e);
        e
    })
}
