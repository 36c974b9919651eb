use sea_orm::{EntityTrait, PaginatorTrait};

use super::*;

/// Revocation parameters against a Discord target, revoked by staff `2000`.
fn revoke(kind: ActionKind, target: &str) -> RevokeParam {
    RevokeParam {
        platform: Platform::Discord,
        target_id: target.to_string(),
        revoker_id: "2000".to_string(),
        kind,
        reason: "appeal granted".to_string(),
    }
}

/// Tests revoking an active ban, and that revocation is idempotent.
///
/// The first call deactivates the row with a full audit trail and returns
/// true; the immediate second call finds nothing active and returns false.
///
/// Expected: true then false
#[tokio::test]
async fn revokes_once_then_false() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let clock = FixedClock::new(now());
    let config = config();
    let service = ModerationService::new(db, &config, &clock);

    let added = service
        .punish(punish(ActionKind::Ban, "9001", Some(86400)))
        .await?;
    let PunishOutcome::Added { action_id } = added else {
        panic!("expected Added, got {added:?}");
    };

    assert!(service.revoke(revoke(ActionKind::Ban, "9001")).await?);

    let row = entity::prelude::PunishmentAction::find_by_id(action_id)
        .one(db)
        .await?
        .unwrap();
    assert!(!row.is_active);
    assert!(row.revoked_by.is_some());
    assert_eq!(row.revocation_reason.as_deref(), Some("appeal granted"));
    assert_eq!(row.revoked_at.as_deref(), Some("2024-06-01 12:00:00"));

    // Nothing left to revoke.
    assert!(!service.revoke(revoke(ActionKind::Ban, "9001")).await?);

    assert!(service
        .active_punishment(Platform::Discord, "9001", ActionKind::Ban)
        .await?
        .is_none());

    Ok(())
}

/// Tests revoking a kind the target is not punished with.
///
/// The user has an active ban but no mute; revoking the mute is a not-found
/// outcome, not an error, and leaves the ban alone.
///
/// Expected: false, ban still active
#[tokio::test]
async fn false_without_active_punishment_of_kind() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let clock = FixedClock::new(now());
    let config = config();
    let service = ModerationService::new(db, &config, &clock);

    service
        .punish(punish(ActionKind::Ban, "9002", Some(86400)))
        .await?;

    assert!(!service.revoke(revoke(ActionKind::Mute, "9002")).await?);
    assert!(service
        .active_punishment(Platform::Discord, "9002", ActionKind::Ban)
        .await?
        .is_some());

    Ok(())
}

/// Tests revoking against a target the ledger has never seen.
///
/// The target must not be created by the lookup; only the revoker identity
/// appears (staff always resolve on their way in).
///
/// Expected: false, exactly one user row (the revoker)
#[tokio::test]
async fn false_for_unseen_target() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let clock = FixedClock::new(now());
    let config = config();
    let service = ModerationService::new(db, &config, &clock);

    assert!(!service.revoke(revoke(ActionKind::Ban, "9003")).await?);

    assert_eq!(entity::prelude::User::find().count(db).await?, 1);

    Ok(())
}

/// Tests revoking a warn.
///
/// Warns are revocable individually; the most recent active warn is the one
/// that goes.
///
/// Expected: true, one of two warns deactivated
#[tokio::test]
async fn revokes_most_recent_warn() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let clock = FixedClock::new(now());
    let config = config();
    let service = ModerationService::new(db, &config, &clock);

    for _ in 0..2 {
        service
            .punish(punish(ActionKind::Warn, "9004", Some(1209600)))
            .await?;
    }

    assert!(service.revoke(revoke(ActionKind::Warn, "9004")).await?);

    // One warn left.
    assert!(service.revoke(revoke(ActionKind::Warn, "9004")).await?);
    assert!(!service.revoke(revoke(ActionKind::Warn, "9004")).await?);

    Ok(())
}

/// Tests revoking a kind without revocation semantics.
///
/// Expected: ValidationErr(NotRevocable)
#[tokio::test]
async fn rejects_non_revocable_kinds() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let clock = FixedClock::new(now());
    let config = config();
    let service = ModerationService::new(db, &config, &clock);

    for kind in [ActionKind::Kick, ActionKind::Promotion, ActionKind::Demotion] {
        let result = service.revoke(revoke(kind, "9005")).await;
        assert!(matches!(
            result,
            Err(AppError::ValidationErr(ValidationError::NotRevocable(_)))
        ));
    }

    Ok(())
}
