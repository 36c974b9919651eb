use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use super::*;

/// Tests recording a kick.
///
/// Kicks are instantaneous: the row carries no duration or expiry even though
/// the caller passed one, and kicks never supersede each other.
///
/// Expected: Added twice, two untimed rows
#[tokio::test]
async fn kicks_record_independently() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let clock = FixedClock::new(now());
    let config = config();
    let service = ModerationService::new(db, &config, &clock);

    let first = service.punish(punish(ActionKind::Kick, "8101", None)).await?;
    let PunishOutcome::Added { action_id } = first else {
        panic!("expected Added, got {first:?}");
    };

    let row = entity::prelude::PunishmentAction::find_by_id(action_id)
        .one(db)
        .await?
        .unwrap();
    assert!(row.duration_seconds.is_none());
    assert!(row.expires_at.is_none());

    // A second kick is its own row, not a supersession.
    let second = service
        .punish(punish(ActionKind::Kick, "8101", Some(3600)))
        .await?;
    assert!(matches!(second, PunishOutcome::Added { .. }));

    let kicks = entity::prelude::PunishmentAction::find()
        .filter(entity::punishment_action::Column::Kind.eq("kick"))
        .count(db)
        .await?;
    assert_eq!(kicks, 2);

    Ok(())
}
