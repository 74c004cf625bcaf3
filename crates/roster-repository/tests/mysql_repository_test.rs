//! Integration tests for the MySQL repositories.
//!
//! These tests run against a real MySQL database using testcontainers.
//! Requires Docker to be available on the system.

mod common;

use common::TestDatabase;
use roster_core::{reconcile, Role, RoleDiff, RoleId, User, UserId};
use roster_repository::{MySqlRoleRepository, MySqlUserRepository, RoleRepository, UserRepository};

async fn seed_roles(repo: &MySqlRoleRepository, names: &[&str]) -> Vec<Role> {
    let mut roles = Vec::new();
    for name in names {
        roles.push(repo.save(&Role::new(*name)).await.expect("Failed to save role"));
    }
    roles
}

#[tokio::test]
async fn test_save_and_find_user_with_roles() {
    let db = TestDatabase::new().await;
    let users = MySqlUserRepository::new(db.pool());
    let roles = MySqlRoleRepository::new(db.pool());
    let seeded = seed_roles(&roles, &["Admin", "Editor"]).await;

    let user = User::new("Alice", 30, "alice@example.com").with_roles(seeded.clone());
    let saved = users.save(&user).await.expect("Failed to save user");
    assert!(saved.id.into_inner() > 0);
    assert_eq!(saved.version, 1);

    let found = users
        .find_by_id(saved.id)
        .await
        .expect("Failed to find user")
        .expect("User not found");
    assert_eq!(found.name, "Alice");
    assert_eq!(found.roles, seeded);
}

#[tokio::test]
async fn test_find_by_id_not_found() {
    let db = TestDatabase::new().await;
    let users = MySqlUserRepository::new(db.pool());

    let result = users.find_by_id(UserId(424_242)).await.expect("Query failed");
    assert!(result.is_none());
}

#[tokio::test]
async fn test_duplicate_email_is_a_conflict() {
    let db = TestDatabase::new().await;
    let users = MySqlUserRepository::new(db.pool());

    users
        .save(&User::new("A", 20, "dup@example.com"))
        .await
        .expect("Failed to save user");
    assert!(users.exists_by_email("dup@example.com").await.unwrap());

    let err = users
        .save(&User::new("B", 21, "dup@example.com"))
        .await
        .expect_err("duplicate email should fail");
    assert!(err.is_conflict());
}

#[tokio::test]
async fn test_update_reconciles_roles_and_detects_stale_version() {
    let db = TestDatabase::new().await;
    let users = MySqlUserRepository::new(db.pool());
    let roles = MySqlRoleRepository::new(db.pool());
    let seeded = seed_roles(&roles, &["R1", "R2", "R3"]).await;

    let saved = users
        .save(&User::new("Bob", 41, "bob@example.com").with_roles(seeded[..2].to_vec()))
        .await
        .unwrap();

    let diff = reconcile(saved.role_ids(), [seeded[1].id, seeded[2].id]);
    let mut changed = saved.clone();
    changed.age = 42;
    let updated = users.update(&changed, &diff).await.expect("Failed to update");
    assert_eq!(updated.age, 42);
    assert_eq!(updated.version, 2);
    assert_eq!(updated.roles, seeded[1..].to_vec());

    let err = users
        .update(&saved, &RoleDiff::default())
        .await
        .expect_err("stale version should conflict");
    assert!(err.is_conflict());
}

#[tokio::test]
async fn test_find_all_loads_roles_for_each_user() {
    let db = TestDatabase::new().await;
    let users = MySqlUserRepository::new(db.pool());
    let roles = MySqlRoleRepository::new(db.pool());
    let seeded = seed_roles(&roles, &["Ops"]).await;

    users.save(&User::new("One", 1, "one@example.com")).await.unwrap();
    users
        .save(&User::new("Two", 2, "two@example.com").with_roles(seeded.clone()))
        .await
        .unwrap();

    let all = users.find_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all[0].roles.is_empty());
    assert_eq!(all[1].roles, seeded);
    assert_eq!(users.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_role_delete_cascades_links() {
    let db = TestDatabase::new().await;
    let users = MySqlUserRepository::new(db.pool());
    let roles = MySqlRoleRepository::new(db.pool());
    let seeded = seed_roles(&roles, &["Temp", "Keep"]).await;

    let saved = users
        .save(&User::new("Cy", 9, "cy@example.com").with_roles(seeded.clone()))
        .await
        .unwrap();

    assert!(roles.delete(seeded[0].id).await.unwrap());
    let found = users.find_by_id(saved.id).await.unwrap().unwrap();
    assert_eq!(found.roles, vec![seeded[1].clone()]);
}

#[tokio::test]
async fn test_role_update_missing_is_not_found() {
    let db = TestDatabase::new().await;
    let roles = MySqlRoleRepository::new(db.pool());
    let seeded = seed_roles(&roles, &["Same"]).await;

    // Unchanged name still succeeds.
    let same = roles.update(&seeded[0]).await.expect("Failed to update role");
    assert_eq!(same, seeded[0]);

    let err = roles
        .update(&Role::new("Nope").with_id(RoleId(9_999)))
        .await
        .expect_err("missing role");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_link_to_deleted_role_is_not_found() {
    let db = TestDatabase::new().await;
    let users = MySqlUserRepository::new(db.pool());
    let roles = MySqlRoleRepository::new(db.pool());
    let seeded = seed_roles(&roles, &["Gone", "Late"]).await;

    // The role disappears after the caller looked it up.
    assert!(roles.delete(seeded[0].id).await.unwrap());
    let err = users
        .save(&User::new("Dee", 33, "dee@example.com").with_roles(seeded[..1].to_vec()))
        .await
        .expect_err("link to a deleted role should fail");
    assert!(err.is_not_found());
    assert!(!users.exists_by_email("dee@example.com").await.unwrap());

    let saved = users.save(&User::new("Eve", 34, "eve@example.com")).await.unwrap();
    assert!(roles.delete(seeded[1].id).await.unwrap());
    let diff = reconcile(saved.role_ids(), [seeded[1].id]);
    let err = users
        .update(&saved, &diff)
        .await
        .expect_err("link to a deleted role should fail");
    assert!(err.is_not_found());

    let found = users.find_by_id(saved.id).await.unwrap().unwrap();
    assert_eq!(found.version, saved.version);
}
