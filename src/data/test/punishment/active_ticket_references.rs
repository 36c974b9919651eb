use super::*;

/// Tests the action-to-ticket join for a user's active punishments.
///
/// Verifies the ticket's channel and log message come through, actions without
/// a ticket are excluded by the join, and inactive actions are filtered.
///
/// Expected: one reference carrying the linked ticket's fields
#[tokio::test]
async fn joins_ticket_fields() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let offender = factory::create_user(db).await?;
    let staff = factory::create_user(db).await?;
    let ticket = factory::ticket::TicketFactory::new(db, offender.id)
        .channel_id("901")
        .closed("777888")
        .build()
        .await?;

    factory::punishment::PunishmentFactory::new(db, offender.id, staff.id)
        .kind("mute")
        .ticket_id(ticket.id)
        .build()
        .await?;
    // No ticket: excluded by the inner join.
    factory::punishment::PunishmentFactory::new(db, offender.id, staff.id)
        .kind("ban")
        .build()
        .await?;
    // Inactive: filtered out.
    factory::punishment::PunishmentFactory::new(db, offender.id, staff.id)
        .kind("voice_mute")
        .ticket_id(ticket.id)
        .inactive()
        .build()
        .await?;

    let repo = PunishmentRepository::new(db);
    let references = repo.active_ticket_references(offender.id, None).await?;

    assert_eq!(references.len(), 1);
    assert_eq!(references[0].kind, ActionKind::Mute);
    assert_eq!(references[0].channel_id, "901");
    assert_eq!(references[0].log_message_id.as_deref(), Some("777888"));

    Ok(())
}

/// Tests restricting the join to one ticket type.
///
/// Expected: only actions from Discord-Complaint tickets
#[tokio::test]
async fn filters_by_ticket_type() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let offender = factory::create_user(db).await?;
    let staff = factory::create_user(db).await?;

    let discord_ticket = factory::ticket::TicketFactory::new(db, offender.id)
        .ticket_type("Discord-Complaint")
        .build()
        .await?;
    let game_ticket = factory::ticket::TicketFactory::new(db, offender.id)
        .ticket_type("Mindustry-Complaint")
        .build()
        .await?;

    factory::punishment::PunishmentFactory::new(db, offender.id, staff.id)
        .kind("mute")
        .ticket_id(discord_ticket.id)
        .build()
        .await?;
    factory::punishment::PunishmentFactory::new(db, offender.id, staff.id)
        .kind("ban")
        .ticket_id(game_ticket.id)
        .build()
        .await?;

    let repo = PunishmentRepository::new(db);
    let references = repo
        .active_ticket_references(offender.id, Some("Discord-Complaint"))
        .await?;

    assert_eq!(references.len(), 1);
    assert_eq!(references[0].kind, ActionKind::Mute);

    Ok(())
}
