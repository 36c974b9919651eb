use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20250110_000001_create_user_table::User, m20250110_000002_create_ticket_table::Ticket,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PunishmentAction::Table)
                    .if_not_exists()
                    .col(pk_auto(PunishmentAction::Id))
                    .col(integer(PunishmentAction::UserId))
                    .col(string(PunishmentAction::Kind))
                    .col(integer(PunishmentAction::PerformedBy))
                    .col(integer_null(PunishmentAction::TicketId))
                    .col(string_null(PunishmentAction::LogMessageId))
                    .col(string_null(PunishmentAction::Role))
                    .col(string_null(PunishmentAction::Reason))
                    .col(string(PunishmentAction::CreatedAt))
                    .col(big_integer_null(PunishmentAction::DurationSeconds))
                    .col(string_null(PunishmentAction::ExpiresAt))
                    .col(boolean(PunishmentAction::IsActive).default(true))
                    .col(integer_null(PunishmentAction::RevokedBy))
                    .col(string_null(PunishmentAction::RevocationReason))
                    .col(string_null(PunishmentAction::RevokedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_punishment_action_user_id")
                            .from(PunishmentAction::Table, PunishmentAction::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_punishment_action_performed_by")
                            .from(PunishmentAction::Table, PunishmentAction::PerformedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_punishment_action_revoked_by")
                            .from(PunishmentAction::Table, PunishmentAction::RevokedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_punishment_action_ticket_id")
                            .from(PunishmentAction::Table, PunishmentAction::TicketId)
                            .to(Ticket::Table, Ticket::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_punishment_action_user_id")
                    .table(PunishmentAction::Table)
                    .col(PunishmentAction::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_punishment_action_ticket_id")
                    .table(PunishmentAction::Table)
                    .col(PunishmentAction::TicketId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PunishmentAction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PunishmentAction {
    Table,
    Id,
    UserId,
    Kind,
    PerformedBy,
    TicketId,
    LogMessageId,
    Role,
    Reason,
    CreatedAt,
    DurationSeconds,
    ExpiresAt,
    IsActive,
    RevokedBy,
    RevocationReason,
    RevokedAt,
}
