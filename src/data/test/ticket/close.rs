use sea_orm::EntityTrait;

use super::*;

/// Tests closing a ticket by its external channel id.
///
/// Expected: Ok(true) with status CLOSED and the log message attached
#[tokio::test]
async fn closes_by_channel() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let opener = factory::create_user(db).await?;
    let ticket = factory::ticket::TicketFactory::new(db, opener.id)
        .channel_id("820")
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let closed = repo
        .close(&TicketRef::Channel("820".to_string()), "999000")
        .await?;
    assert!(closed);

    let row = entity::prelude::Ticket::find_by_id(ticket.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(row.status, "CLOSED");
    assert_eq!(row.log_message_id.as_deref(), Some("999000"));

    Ok(())
}

/// Tests closing a ticket by its internal id.
///
/// Expected: Ok(true) with the row closed
#[tokio::test]
async fn closes_by_internal_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let opener = factory::create_user(db).await?;
    let ticket = factory::create_ticket(db, opener.id).await?;

    let repo = TicketRepository::new(db);
    let closed = repo.close(&TicketRef::Id(ticket.id), "999001").await?;
    assert!(closed);

    let row = entity::prelude::Ticket::find_by_id(ticket.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(row.status, "CLOSED");

    Ok(())
}

/// Tests closing a ticket that does not exist.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_unknown_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let closed = repo
        .close(&TicketRef::Channel("nope".to_string()), "999002")
        .await?;

    assert!(!closed);

    Ok(())
}
