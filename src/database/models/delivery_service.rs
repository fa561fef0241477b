use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::tenancy::{is_resource_authorized_to_user, TenancyError, TenancyTx, Tenanter};

/// The slice of a delivery service the tenancy checks need
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryServiceTenantInfo {
    pub xml_id: String,
    pub tenant_id: Option<i32>,
}

impl DeliveryServiceTenantInfo {
    /// Whether `user` may access this delivery service. A delivery service
    /// without a tenant cannot be decided and is an error, whatever the
    /// toggle says.
    pub async fn is_tenant_authorized<T>(&self, tx: &mut T, user: &CurrentUser) -> Result<bool, TenancyError>
    where
        T: TenancyTx + ?Sized,
    {
        match self.tenant_id {
            Some(tenant_id) => is_resource_authorized_to_user(tx, tenant_id, user).await,
            None => Err(TenancyError::MissingTenant {
                resource_type: self.resource_type(),
                name: self.xml_id.clone(),
            }),
        }
    }
}

impl Tenanter for DeliveryServiceTenantInfo {
    fn tenant_id(&self) -> Option<i32> {
        self.tenant_id
    }

    fn name(&self) -> &str {
        &self.xml_id
    }

    fn resource_type(&self) -> &'static str {
        "deliveryservice"
    }
}
