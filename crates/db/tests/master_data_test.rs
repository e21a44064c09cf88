//! Master data rules: members, company record, ledger groups and references.

mod common;

use common::{seed_company, seed_item, setup};
use khata_db::entities::sea_orm_active_enums::{GroupType, MemberRole};
use khata_db::repositories::{
    CompanyInput, CreateMemberInput, GroupInput, LoginError, UpdateGroupInput, UpdateMemberInput,
};
use khata_db::{
    CategoryRepository, CompanyRepository, GroupRepository, ItemRepository, MemberRepository,
    StoreError,
};
use khata_shared::types::PageRequest;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;

fn member(username: &str, email: &str, phone: &str) -> CreateMemberInput {
    CreateMemberInput {
        username: username.to_string(),
        name: "Sita Sharma".to_string(),
        email: email.to_string(),
        phone_number: phone.to_string(),
        emergency_number: None,
        password: "secret123".to_string(),
        role: MemberRole::Salesman,
        address: None,
        image: None,
        opening_bal: None,
        company_opening_bal: None,
        joining_date: None,
        salary: Some(dec!(25000)),
    }
}

async fn seeded_member(db: &DatabaseConnection) -> MemberRepository {
    let repo = MemberRepository::new(db.clone());
    repo.create(member("sita_s", "Sita@Example.com", "9811111111"))
        .await
        .expect("Failed to create member");
    repo
}

#[tokio::test]
async fn test_member_create_normalizes_email_and_hashes_password() {
    let db = setup().await;
    let repo = MemberRepository::new(db.clone());

    let created = repo
        .create(member("sita_s", "Sita@Example.com", "9811111111"))
        .await
        .expect("Failed to create member");

    assert_eq!(created.email, "sita@example.com");
    assert!(created.status);
    assert_ne!(created.password_hash, "secret123");
    assert!(!repo.admin_exists().await.expect("admin lookup"));
}

#[tokio::test]
async fn test_member_duplicates_name_the_taken_field() {
    let db = setup().await;
    let repo = seeded_member(&db).await;

    let cases = [
        (member("sita_s", "other@example.com", "9822222222"), "Username"),
        (member("other", "SITA@example.com", "9822222222"), "Email"),
        (member("other", "other@example.com", "9811111111"), "Phone number"),
    ];
    for (input, field) in cases {
        match repo.create(input).await {
            Err(StoreError::Duplicate(label)) => assert_eq!(label, field),
            other => panic!("expected duplicate {field}, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_member_update_keeps_own_values_unique() {
    let db = setup().await;
    let repo = seeded_member(&db).await;
    let other = repo
        .create(member("ram_k", "ram@example.com", "9833333333"))
        .await
        .expect("Failed to create second member");

    // Re-sending a member's own phone number is not a conflict.
    let updated = repo
        .update(
            other.id,
            UpdateMemberInput {
                phone_number: Some("9833333333".to_string()),
                name: Some("Ram Kumar".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update member");
    assert_eq!(updated.name, "Ram Kumar");

    let taken = repo
        .update(
            other.id,
            UpdateMemberInput {
                username: Some("sita_s".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(taken, Err(StoreError::Duplicate(label)) if label == "Username"));
}

#[tokio::test]
async fn test_authenticate_by_any_identifier() {
    let db = setup().await;
    let repo = seeded_member(&db).await;

    for login in ["sita_s", "sita@example.com", "9811111111"] {
        let found = repo
            .authenticate(login, "secret123")
            .await
            .unwrap_or_else(|e| panic!("login with {login} failed: {e}"));
        assert_eq!(found.username, "sita_s");
    }
}

#[tokio::test]
async fn test_authenticate_rejections() {
    let db = setup().await;
    let repo = seeded_member(&db).await;

    assert!(matches!(
        repo.authenticate("sita_s", "wrong-password").await,
        Err(LoginError::InvalidCredentials)
    ));
    assert!(matches!(
        repo.authenticate("nobody", "secret123").await,
        Err(LoginError::InvalidCredentials)
    ));

    let sita = repo
        .authenticate("sita_s", "secret123")
        .await
        .expect("Failed to log in");
    repo.deactivate(sita.id).await.expect("Failed to deactivate");

    assert!(matches!(
        repo.authenticate("sita_s", "secret123").await,
        Err(LoginError::Deactivated)
    ));
    assert!(repo.find_active(sita.id).await.expect("lookup").is_none());
    // Deactivated members are kept.
    assert!(!repo.get(sita.id).await.expect("member still stored").status);
}

#[tokio::test]
async fn test_company_record_is_a_singleton() {
    let db = setup().await;
    let repo = CompanyRepository::new(db.clone());
    assert!(matches!(repo.get().await, Err(StoreError::NotFound("Company"))));

    seed_company(&db, dec!(5000)).await;
    let second = repo
        .create(CompanyInput {
            company_name: "Second".to_string(),
            email: None,
            phone_number: None,
            address: None,
            gst_no: None,
            opening_bal: None,
        })
        .await;
    assert!(matches!(second, Err(StoreError::Rule(_))));
    assert_eq!(repo.get().await.expect("company").opening_bal, dec!(5000));
}

fn group(name: &str, group_type: GroupType, parent_id: Option<uuid::Uuid>) -> GroupInput {
    GroupInput {
        group_name: name.to_string(),
        group_type,
        parent_id,
    }
}

#[tokio::test]
async fn test_group_parent_rules() {
    let db = setup().await;
    let repo = GroupRepository::new(db.clone());

    let assets = repo
        .create(group("Assets", GroupType::Group, None))
        .await
        .expect("Failed to create root group");
    let current = repo
        .create(group("Current Assets", GroupType::Both, Some(assets.id)))
        .await
        .expect("Failed to create child group");
    let cash = repo
        .create(group("Cash", GroupType::Ledger, Some(current.id)))
        .await
        .expect("Failed to create ledger");

    let under_ledger = repo
        .create(group("Petty Cash", GroupType::Ledger, Some(cash.id)))
        .await;
    assert!(matches!(under_ledger, Err(StoreError::Rule(_))));

    let cycle = repo
        .update(
            assets.id,
            UpdateGroupInput {
                parent_id: Some(current.id),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(cycle, Err(StoreError::Rule(_))));

    let demote = repo
        .update(
            assets.id,
            UpdateGroupInput {
                group_type: Some(GroupType::Ledger),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(demote, Err(StoreError::Rule(_))));

    // A parent with children cannot go while they reference it.
    assert!(matches!(repo.delete(assets.id).await, Err(StoreError::Conflict(_))));
}

#[tokio::test]
async fn test_referenced_category_cannot_be_deleted() {
    let db = setup().await;
    let item_id = seed_item(&db, "IT-20").await;
    let item = ItemRepository::new(db.clone())
        .get(item_id)
        .await
        .expect("Failed to load item");

    let categories = CategoryRepository::new(db.clone());
    assert!(matches!(
        categories.delete(item.category_id).await,
        Err(StoreError::Conflict(_))
    ));

    ItemRepository::new(db.clone())
        .delete(item_id)
        .await
        .expect("Failed to delete item");
    categories
        .delete(item.category_id)
        .await
        .expect("Unreferenced category can be deleted");
}

#[tokio::test]
async fn test_pagination_metadata() {
    let db = setup().await;
    let repo = GroupRepository::new(db.clone());
    for n in 0..5 {
        repo.create(group(&format!("Group {n}"), GroupType::Both, None))
            .await
            .expect("Failed to create group");
    }

    let page = repo
        .list(&PageRequest {
            page: 2,
            per_page: 2,
        })
        .await
        .expect("Failed to list groups");
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.meta.page, 2);
    assert_eq!(page.meta.total, 5);
    assert_eq!(page.meta.total_pages, 3);

    let last = repo
        .list(&PageRequest {
            page: 3,
            per_page: 2,
        })
        .await
        .expect("Failed to list groups");
    assert_eq!(last.data.len(), 1);
}
