use crate::model::punishment::ActionKind;

use super::*;

/// Tests the full disciplinary profile.
///
/// The user received one mute and performed one warn as staff; both sides
/// show up in their respective lists.
///
/// Expected: profile with one received and one performed action
#[tokio::test]
async fn collects_both_sides_of_the_ledger() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let clock = FixedClock::new(now());
    let service = IdentityService::new(db, &clock);

    let user = factory::user::UserFactory::new(db)
        .discord_id("4101")
        .build()
        .await?;
    let other = factory::create_user(db).await?;

    factory::punishment::PunishmentFactory::new(db, user.id, other.id)
        .kind("mute")
        .build()
        .await?;
    factory::punishment::PunishmentFactory::new(db, other.id, user.id)
        .kind("warn")
        .build()
        .await?;

    let profile = service
        .profile(Platform::Discord, "4101")
        .await?
        .unwrap();

    assert_eq!(profile.user.id, user.id);
    assert_eq!(profile.received.len(), 1);
    assert_eq!(profile.received[0].kind, ActionKind::Mute);
    assert_eq!(profile.performed.len(), 1);
    assert_eq!(profile.performed[0].kind, ActionKind::Warn);

    Ok(())
}

/// Tests the profile of an unseen user.
///
/// Expected: Ok(None)
#[tokio::test]
async fn none_for_unseen_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let clock = FixedClock::new(now());
    let service = IdentityService::new(db, &clock);

    assert!(service.profile(Platform::Discord, "4102").await?.is_none());

    Ok(())
}
