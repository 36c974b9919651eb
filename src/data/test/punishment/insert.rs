use sea_orm::EntityTrait;

use super::*;

/// Tests inserting a permanent ledger row.
///
/// Verifies the row lands active, with no expiry and no revocation fields.
///
/// Expected: Ok(PunishmentAction) active and permanent
#[tokio::test]
async fn inserts_active_permanent_row() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let staff = factory::create_user(db).await?;

    let repo = PunishmentRepository::new(db);
    let action = repo
        .insert(new_action(user.id, staff.id, ActionKind::Blacklist), now())
        .await?;

    assert_eq!(action.user_id, user.id);
    assert_eq!(action.performed_by, staff.id);
    assert_eq!(action.kind, ActionKind::Blacklist);
    assert!(action.is_active);
    assert!(action.expires_at.is_none());
    assert!(action.duration_seconds.is_none());
    assert!(action.revoked_by.is_none());

    Ok(())
}

/// Tests inserting a timed row.
///
/// Verifies duration and expiry are stored together and the expiry string
/// round-trips through the storage format.
///
/// Expected: Ok with parsed expiry equal to the requested instant
#[tokio::test]
async fn inserts_timed_row() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let staff = factory::create_user(db).await?;

    let expires_at = now() + Duration::seconds(86400);
    let repo = PunishmentRepository::new(db);
    let action = repo
        .insert(
            NewActionParam {
                reason: Some("spam".to_string()),
                duration_seconds: Some(86400),
                expires_at: Some(expires_at),
                ..new_action(user.id, staff.id, ActionKind::Ban)
            },
            now(),
        )
        .await?;

    assert_eq!(action.duration_seconds, Some(86400));
    assert_eq!(action.expires_at, Some(expires_at));
    assert_eq!(action.reason.as_deref(), Some("spam"));

    let row = entity::prelude::PunishmentAction::find_by_id(action.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(row.created_at, "2024-06-01 12:00:00");
    assert_eq!(row.expires_at.as_deref(), Some("2024-06-02 12:00:00"));

    Ok(())
}
