mod common;

use anyhow::Result;

use common::{ROOT, TENANT_A, TENANT_B, TENANT_C, TENANT_D};
use traffic_ops_tenancy::database::models::{DeliveryServiceTenantInfo, Origin, User};
use traffic_ops_tenancy::tenancy::{filter_authorized, TenancyError, TenantedResource, Tenanter};

fn ds(xml_id: &str, tenant_id: Option<i32>) -> TenantedResource {
    TenantedResource::DeliveryService(DeliveryServiceTenantInfo {
        xml_id: xml_id.to_string(),
        tenant_id,
    })
}

fn origin(name: &str, tenant_id: Option<i32>) -> TenantedResource {
    TenantedResource::Origin(Origin {
        id: 1,
        name: name.to_string(),
        delivery_service_id: None,
        tenant_id,
    })
}

fn tm_user(username: &str, tenant_id: Option<i32>) -> TenantedResource {
    TenantedResource::User(User {
        id: 1,
        username: username.to_string(),
        tenant_id,
    })
}

fn names(items: &[TenantedResource]) -> Vec<&str> {
    items.iter().map(|i| i.name()).collect()
}

#[tokio::test]
async fn mixed_list_is_filtered_in_order() -> Result<()> {
    let mut tx = common::enforcing();
    let items = vec![
        ds("ds-root", Some(ROOT)),
        origin("origin-b", Some(TENANT_B)),
        tm_user("carol", Some(TENANT_C)),
        ds("ds-a", Some(TENANT_A)),
        tm_user("bob", Some(TENANT_B)),
    ];

    let filtered = filter_authorized(&mut tx, &common::user(TENANT_A), items).await?;
    assert_eq!(names(&filtered), vec!["origin-b", "ds-a", "bob"]);
    Ok(())
}

#[tokio::test]
async fn toggle_off_returns_input_unchanged() -> Result<()> {
    let mut tx = common::hierarchy();
    let items = vec![
        tm_user("carol", Some(TENANT_C)),
        ds("ds-unassigned", None),
        origin("origin-d", Some(TENANT_D)),
    ];

    let filtered = filter_authorized(&mut tx, &common::user(TENANT_B), items.clone()).await?;
    assert_eq!(filtered, items);
    Ok(())
}

#[tokio::test]
async fn unassigned_item_fails_the_listing() -> Result<()> {
    let mut tx = common::enforcing();
    let items = vec![ds("ds-a", Some(TENANT_A)), ds("ds-unassigned", None)];

    let err = filter_authorized(&mut tx, &common::user(ROOT), items).await.unwrap_err();
    assert!(
        matches!(&err, TenancyError::MissingTenant { resource_type: "deliveryservice", name } if name == "ds-unassigned"),
        "unexpected error: {}",
        err
    );
    Ok(())
}

#[tokio::test]
async fn empty_list_stays_empty() -> Result<()> {
    let mut tx = common::enforcing();
    let filtered = filter_authorized(&mut tx, &common::user(ROOT), Vec::<TenantedResource>::new()).await?;
    assert!(filtered.is_empty());
    Ok(())
}

#[tokio::test]
async fn user_outside_the_tree_sees_nothing() -> Result<()> {
    let mut tx = common::enforcing();
    let items = vec![ds("ds-root", Some(ROOT)), ds("ds-b", Some(TENANT_B))];
    let filtered = filter_authorized(&mut tx, &common::user(404), items).await?;
    assert!(filtered.is_empty());
    Ok(())
}
