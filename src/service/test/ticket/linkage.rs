use super::*;

/// Tests the linkage queries over factory-built data.
///
/// A ticket with a linked, announced punishment reports has_punishment and
/// surfaces the newest announcement reference.
///
/// Expected: true and the log message id
#[tokio::test]
async fn exposes_punishment_linkage() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let clock = FixedClock::new(now());
    let service = TicketService::new(db, &clock);

    let (offender, staff, ticket) =
        factory::helpers::create_ticket_with_participants(db).await?;

    assert!(!service.has_punishment(ticket.id).await?);
    assert!(service.punishment_log_reference(ticket.id).await?.is_none());

    factory::punishment::PunishmentFactory::new(db, offender.id, staff.id)
        .kind("mute")
        .ticket_id(ticket.id)
        .log_message_id("ann-1")
        .build()
        .await?;

    assert!(service.has_punishment(ticket.id).await?);
    assert_eq!(
        service.punishment_log_reference(ticket.id).await?.as_deref(),
        Some("ann-1")
    );

    Ok(())
}

/// Tests offender cross-referencing through the service.
///
/// Expected: the archived complaint's log id
#[tokio::test]
async fn cross_references_archived_complaints() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let clock = FixedClock::new(now());
    let service = TicketService::new(db, &clock);

    let opener = factory::create_user(db).await?;
    factory::ticket::TicketFactory::new(db, opener.id)
        .ticket_type("Mindustry-Complaint")
        .offender_identifier("Router")
        .closed("arch-55")
        .build()
        .await?;

    let logs = service
        .closed_complaint_logs("Mindustry-Complaint", "Router")
        .await?;
    assert_eq!(logs, vec!["arch-55".to_string()]);

    Ok(())
}
