//! Domain service over the SeaORM repository on in-memory SQLite.

mod common;

use std::sync::Arc;

use anyhow::Result;

use employees::{
    contract::{
        client::EmployeesApi,
        error::EmployeesError,
        model::{DeleteOutcome, NewEmployee},
    },
    domain::{error::DomainError, service::Service, validation},
    gateways::local::EmployeesLocalClient,
};

fn new_employee(nirc: &str, full_name: &str) -> NewEmployee {
    NewEmployee {
        nirc: nirc.to_string(),
        full_name: full_name.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn create_returns_stored_record() -> Result<()> {
    let service = common::test_service().await;

    let created = service
        .create_employee(NewEmployee {
            nirc: "A123".into(),
            full_name: "Ada Lovelace".into(),
            position: Some("Engineer".into()),
            email: Some("ada@example.com".into()),
        })
        .await?;

    assert!(created.id > 0);
    assert_eq!(created.nirc, "A123");
    assert_eq!(created.full_name, "Ada Lovelace");
    assert_eq!(created.position, "Engineer");
    assert_eq!(created.email.as_deref(), Some("ada@example.com"));

    let listed = service.list_employees().await?;
    assert_eq!(listed, vec![created]);
    Ok(())
}

#[tokio::test]
async fn optional_fields_default_to_empty() -> Result<()> {
    let service = common::test_service().await;

    let created = service
        .create_employee(NewEmployee {
            nirc: "  B_77 ".into(),
            full_name: " Grace ".into(),
            position: None,
            email: Some("   ".into()),
        })
        .await?;

    assert_eq!(created.nirc, "B_77");
    assert_eq!(created.full_name, "Grace");
    assert_eq!(created.position, "");
    assert_eq!(created.email, None);
    Ok(())
}

#[tokio::test]
async fn duplicate_nirc_is_rejected_and_one_row_remains() -> Result<()> {
    let service = common::test_service().await;

    service.create_employee(new_employee("DUP1", "First")).await?;
    let err = service
        .create_employee(new_employee("DUP1", "Second"))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::DuplicateNirc { ref nirc } if nirc == "DUP1"));
    let listed = service.list_employees().await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].full_name, "First");
    Ok(())
}

#[tokio::test]
async fn validation_runs_before_storage() {
    let service = Service::unconfigured();

    // An unconfigured store would fail, so a validation error proves the order.
    let err = service
        .create_employee(new_employee("a", ""))
        .await
        .unwrap_err();

    match err {
        DomainError::Validation { messages } => assert_eq!(
            messages,
            vec![
                validation::NIRC_FORMAT.to_string(),
                validation::FULL_NAME_REQUIRED.to_string()
            ]
        ),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn list_is_newest_first() -> Result<()> {
    let service = common::test_service().await;

    let mut ids = Vec::new();
    for n in 0..4 {
        let e = service
            .create_employee(new_employee(&format!("EMP{n}"), &format!("Person {n}")))
            .await?;
        ids.push(e.id);
    }

    let listed = service.list_employees().await?;
    assert_eq!(listed.len(), 4);
    assert!(listed.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    ids.reverse();
    assert_eq!(listed.iter().map(|e| e.id).collect::<Vec<_>>(), ids);
    Ok(())
}

#[tokio::test]
async fn empty_table_lists_nothing() -> Result<()> {
    let service = common::test_service().await;
    assert!(service.list_employees().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn delete_with_missing_id_changes_nothing() -> Result<()> {
    let service = common::test_service().await;
    let a = service.create_employee(new_employee("AAA", "A")).await?;
    let b = service.create_employee(new_employee("BBB", "B")).await?;
    let missing = b.id + 100;

    let outcome = service.delete_employees(vec![a.id, b.id, missing]).await?;

    assert_eq!(outcome, DeleteOutcome::Missing(vec![missing]));
    assert!(!outcome.is_success());
    assert_eq!(outcome.deleted_count(), 0);
    assert_eq!(service.list_employees().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn delete_existing_ids_removes_them() -> Result<()> {
    let service = common::test_service().await;
    let a = service.create_employee(new_employee("AAA", "A")).await?;
    let b = service.create_employee(new_employee("BBB", "B")).await?;
    let c = service.create_employee(new_employee("CCC", "C")).await?;

    // Duplicates collapse before reaching the store.
    let outcome = service.delete_employees(vec![a.id, b.id, a.id]).await?;

    assert_eq!(outcome, DeleteOutcome::Deleted(2));
    let remaining = service.list_employees().await?;
    assert_eq!(remaining.iter().map(|e| e.id).collect::<Vec<_>>(), vec![c.id]);
    Ok(())
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() -> Result<()> {
    let service = common::test_service().await;
    let a = service.create_employee(new_employee("AAA", "A")).await?;
    service.delete_employees(vec![a.id]).await?;

    let b = service.create_employee(new_employee("AAA", "A again")).await?;
    assert!(b.id > a.id);
    Ok(())
}

#[tokio::test]
async fn empty_delete_is_a_validation_error() {
    let service = common::test_service().await;
    let err = service.delete_employees(Vec::new()).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn oversized_delete_is_rejected_before_storage() {
    let service = common::test_service().await;
    let ids: Vec<i32> = (1..=validation::MAX_IDS_PER_DELETE as i32 + 1).collect();

    let err = service.delete_employees(ids).await.unwrap_err();
    match err {
        DomainError::Validation { messages } => {
            assert_eq!(messages, vec![validation::IDS_TOO_MANY.to_owned()])
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    // Repeated ids collapse first, so a long list of one id is fine.
    let outcome = service
        .delete_employees(vec![9; validation::MAX_IDS_PER_DELETE * 2])
        .await
        .unwrap();
    assert_eq!(outcome, DeleteOutcome::Missing(vec![9]));
}

#[tokio::test]
async fn unconfigured_store_is_reported() {
    let service = Service::unconfigured();
    assert!(matches!(
        service.ensure_schema().await,
        Err(DomainError::StorageUnavailable)
    ));
    assert!(matches!(
        service.list_employees().await,
        Err(DomainError::StorageUnavailable)
    ));
    assert!(matches!(
        service.delete_employees(vec![1]).await,
        Err(DomainError::StorageUnavailable)
    ));
}

#[tokio::test]
async fn ensure_schema_is_idempotent() -> Result<()> {
    let service = common::test_service().await;
    service.ensure_schema().await?;
    service.ensure_schema().await?;
    Ok(())
}

#[tokio::test]
async fn local_client_maps_errors_to_contract() -> Result<()> {
    let client: Arc<dyn EmployeesApi> =
        Arc::new(EmployeesLocalClient::new(common::test_service().await));

    let created = client.create_employee(new_employee("LC1", "Local")).await?;
    assert_eq!(client.list_employees().await?.len(), 1);

    let err = client
        .create_employee(new_employee("LC1", "Again"))
        .await
        .unwrap_err();
    assert_eq!(err, EmployeesError::conflict("LC1"));

    let err = client
        .create_employee(new_employee("", "No nirc"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EmployeesError::validation(vec![validation::NIRC_REQUIRED.to_string()])
    );

    assert_eq!(
        client.delete_employees(vec![created.id]).await?,
        DeleteOutcome::Deleted(1)
    );
    Ok(())
}

#[tokio::test]
async fn unconfigured_client_is_internal_error() {
    let client = EmployeesLocalClient::new(Arc::new(Service::unconfigured()));
    assert_eq!(
        client.list_employees().await.unwrap_err(),
        EmployeesError::internal()
    );
}
