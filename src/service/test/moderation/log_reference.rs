use sea_orm::EntityTrait;

use super::*;

/// Tests attaching the announcement message after a punishment is issued.
///
/// The announcement is posted after the ledger write, so the reference arrives
/// as a follow-up call.
///
/// Expected: true, reference stored; false for an unknown action id
#[tokio::test]
async fn attaches_after_the_fact() -> Result<(), AppError> {
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
        .punish(punish(ActionKind::Mute, "9201", Some(3600)))
        .await?;
    let PunishOutcome::Added { action_id } = added else {
        panic!("expected Added, got {added:?}");
    };

    assert!(service.attach_log_reference(action_id, "444555666").await?);

    let row = entity::prelude::PunishmentAction::find_by_id(action_id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(row.log_message_id.as_deref(), Some("444555666"));

    assert!(!service.attach_log_reference(424242, "444555666").await?);

    Ok(())
}
