use super::*;

/// Tests cross-referencing closed complaints by offender name.
///
/// Only closed tickets of the requested type with an attached log message
/// qualify; open tickets and other offenders are excluded.
///
/// Expected: exactly the two archived complaints naming the offender
#[tokio::test]
async fn returns_archived_complaints_for_offender() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let opener = factory::create_user(db).await?;

    factory::ticket::TicketFactory::new(db, opener.id)
        .ticket_type("Mindustry-Complaint")
        .offender_identifier("Sharded")
        .closed("log-1")
        .build()
        .await?;
    factory::ticket::TicketFactory::new(db, opener.id)
        .ticket_type("Mindustry-Complaint")
        .offender_identifier("Sharded")
        .closed("log-2")
        .build()
        .await?;
    // Still open: not yet archived.
    factory::ticket::TicketFactory::new(db, opener.id)
        .ticket_type("Mindustry-Complaint")
        .offender_identifier("Sharded")
        .build()
        .await?;
    // Different offender.
    factory::ticket::TicketFactory::new(db, opener.id)
        .ticket_type("Mindustry-Complaint")
        .offender_identifier("Router")
        .closed("log-3")
        .build()
        .await?;
    // Different ticket type.
    factory::ticket::TicketFactory::new(db, opener.id)
        .ticket_type("Discord-Complaint")
        .offender_identifier("Sharded")
        .closed("log-4")
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let mut logs = repo
        .closed_complaint_logs("Mindustry-Complaint", "Sharded")
        .await?;
    logs.sort();

    assert_eq!(logs, vec!["log-1".to_string(), "log-2".to_string()]);

    Ok(())
}

/// Tests an offender nobody has complained about.
///
/// Expected: empty list
#[tokio::test]
async fn empty_for_unknown_offender() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let logs = repo
        .closed_complaint_logs("Mindustry-Complaint", "Nobody")
        .await?;

    assert!(logs.is_empty());

    Ok(())
}
