use domain::{
    DomainErrorKind,
    models::{Branch, BranchAddress, BranchId, BranchName, BranchUpdateInput},
};

use crate::helpers::load_app_settings_for_testing;
use crate::test_case::{CREATED_AT, EnableTracing, TestCase, branch_code, new_branch};

#[tokio::test]
#[ignore]
async fn created_branch_can_be_looked_up_by_id_and_code() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::Yes).await;

    let expected = new_branch("QTO01", "Quito Centro");
    let created = test_case.use_case().create(expected.clone()).await.unwrap();
    assert_eq!(created, expected);

    let by_id = test_case.use_case().by_id(expected.id).await.unwrap();
    assert_eq!(by_id, expected);

    let by_code = test_case
        .use_case()
        .by_code(&branch_code("QTO01"))
        .await
        .unwrap();
    assert_eq!(by_code, Some(expected));

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn looking_up_an_unknown_id_is_not_found() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    test_case.register_branch("QTO01", "Quito Centro").await;
    let error = test_case
        .use_case()
        .by_id(BranchId::default())
        .await
        .unwrap_err();
    assert_eq!(error.kind, DomainErrorKind::NotFound);

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn looking_up_an_unknown_code_returns_none() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    test_case.register_branch("QTO01", "Quito Centro").await;
    let result = test_case
        .use_case()
        .by_code(&branch_code("nonExistentCode"))
        .await
        .unwrap();
    assert!(result.is_none());

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn branches_are_listed_in_code_order() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    let empty = test_case.use_case().list().await.unwrap();
    assert!(empty.is_empty());

    test_case.register_branch("GYE01", "Guayaquil Centro").await;
    test_case.register_branch("CUE01", "Cuenca Centro").await;
    test_case.register_branch("QTO01", "Quito Centro").await;
    let branches = test_case.use_case().list().await.unwrap();
    let codes = branches.iter().map(|b| b.code.0.as_str()).collect::<Vec<_>>();
    assert_eq!(codes, vec!["CUE01", "GYE01", "QTO01"]);

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn creating_a_branch_with_a_duplicated_code_is_a_conflict() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    test_case.register_branch("QTO01", "Quito Centro").await;
    let error = test_case
        .use_case()
        .create(new_branch("QTO01", "Quito Norte"))
        .await
        .unwrap_err();
    assert_eq!(error.kind, DomainErrorKind::Conflict);
    let branches = test_case.use_case().list().await.unwrap();
    assert_eq!(branches.len(), 1);
    assert_eq!(branches[0].name.0, "Quito Centro");

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn creating_a_branch_with_an_existing_id_replaces_the_stored_branch() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    let existing = test_case.register_branch("QTO01", "Quito Centro").await;
    let replacement = Branch {
        name: BranchName::new(String::from("Quito Matriz")).unwrap(),
        address: None,
        ..existing.clone()
    };
    let created = test_case
        .use_case()
        .create(replacement.clone())
        .await
        .unwrap();
    assert_eq!(created, replacement);

    let branches = test_case.use_case().list().await.unwrap();
    assert_eq!(branches, vec![replacement]);

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn updating_a_branch_overwrites_only_supplied_fields() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    let existing = test_case.register_branch("existingCode", "Old").await;
    let input = BranchUpdateInput {
        name: Some(BranchName::new(String::from("Updated Name")).unwrap()),
        ..Default::default()
    };
    let updated = test_case
        .use_case()
        .update(&branch_code("existingCode"), input)
        .await
        .unwrap();
    assert_eq!(updated.name.0, "Updated Name");

    let stored = test_case.use_case().by_id(existing.id).await.unwrap();
    assert_eq!(stored.id, existing.id);
    assert_eq!(stored.code, existing.code);
    assert_eq!(stored.name.0, "Updated Name");
    assert_eq!(stored.address, existing.address);
    assert_eq!(stored.phone_number, existing.phone_number);
    assert_eq!(stored.created_at, CREATED_AT);
    assert!(stored.updated_at > CREATED_AT);

    let input = BranchUpdateInput {
        address: Some(BranchAddress::new(String::from("Av. 6 de Diciembre")).unwrap()),
        ..Default::default()
    };
    let updated = test_case
        .use_case()
        .update(&branch_code("existingCode"), input)
        .await
        .unwrap();
    assert_eq!(updated.name.0, "Updated Name");
    assert_eq!(updated.address.unwrap().0, "Av. 6 de Diciembre");

    test_case.end().await;
}

#[tokio::test]
#[ignore]
async fn updating_an_unknown_branch_is_not_found() {
    let app_settings = load_app_settings_for_testing();
    let test_case = TestCase::begin(app_settings, EnableTracing::No).await;

    let error = test_case
        .use_case()
        .update(&branch_code("nonExistentCode"), BranchUpdateInput::default())
        .await
        .unwrap_err();
    assert_eq!(error.kind, DomainErrorKind::NotFound);
    let branches = test_case.use_case().list().await.unwrap();
    assert!(branches.is_empty());

    test_case.end().await;
}
