use sea_orm::{EntityTrait, PaginatorTrait};

use super::*;

/// Tests creating an identity on first sight of an external id.
///
/// Verifies that resolve inserts a user row with only the seen platform's
/// column populated and stamps the creation time in storage format.
///
/// Expected: Ok(id) with a discord-only row created
#[tokio::test]
async fn creates_user_on_first_sight() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let id = repo.resolve(Platform::Discord, "123456789", now()).await?;

    let row = entity::prelude::User::find_by_id(id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(row.discord_id.as_deref(), Some("123456789"));
    assert!(row.mindustry_id.is_none());
    assert_eq!(row.created_at, "2024-06-01 12:00:00");

    Ok(())
}

/// Tests that resolving the same pair twice returns the same id.
///
/// Verifies creation-on-demand is idempotent and no duplicate row appears.
///
/// Expected: identical ids, exactly one user row
#[tokio::test]
async fn is_idempotent() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let first = repo.resolve(Platform::Mindustry, "Sharded", now()).await?;
    let second = repo.resolve(Platform::Mindustry, "Sharded", now()).await?;

    assert_eq!(first, second);
    assert_eq!(entity::prelude::User::find().count(db).await?, 1);

    Ok(())
}

/// Tests that the same external string on different platforms yields
/// different identities.
///
/// The platforms are separate namespaces; a Discord id and a Mindustry id
/// that happen to collide textually must not share a row.
///
/// Expected: two distinct internal ids
#[tokio::test]
async fn platforms_are_separate_namespaces() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let discord = repo.resolve(Platform::Discord, "42", now()).await?;
    let mindustry = repo.resolve(Platform::Mindustry, "42", now()).await?;

    assert_ne!(discord, mindustry);
    assert_eq!(entity::prelude::User::find().count(db).await?, 2);

    Ok(())
}

/// Tests resolving an id that already exists from earlier activity.
///
/// Verifies the resolver returns the existing internal id instead of
/// creating a fresh identity.
///
/// Expected: the factory-created user's id
#[tokio::test]
async fn returns_existing_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = test_utils::factory::user::UserFactory::new(db)
        .discord_id("555")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let resolved = repo.resolve(Platform::Discord, "555", now()).await?;

    assert_eq!(resolved, existing.id);

    Ok(())
}
