use sea_orm_migration::{prelude::*, schema::*};

use super::m20250110_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(pk_auto(Ticket::Id))
                    .col(integer(Ticket::UserId))
                    .col(string_uniq(Ticket::ChannelId))
                    .col(string_null(Ticket::LogMessageId))
                    .col(string(Ticket::Status))
                    .col(string(Ticket::CreatedAt))
                    .col(string_null(Ticket::TicketType))
                    .col(string_null(Ticket::OffenderIdentifier))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_user_id")
                            .from(Ticket::Table, Ticket::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_channel_id")
                    .table(Ticket::Table)
                    .col(Ticket::ChannelId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ticket::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Ticket {
    Table,
    Id,
    UserId,
    ChannelId,
    LogMessageId,
    Status,
    CreatedAt,
    TicketType,
    OffenderIdentifier,
}
