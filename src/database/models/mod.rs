pub mod delivery_service;
pub mod origin;
pub mod tenant;
pub mod user;

pub use delivery_service::DeliveryServiceTenantInfo;
pub use origin::Origin;
pub use tenant::Tenant;
pub use user::User;
