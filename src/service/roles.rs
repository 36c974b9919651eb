//! Role change history service.
//!
//! Promotions and demotions share the ledger with punishments but none of the
//! policies: they are never stacked, never escalated, and not revocable. A
//! role change with a duration records a return window (e.g. a temporary
//! demotion), carried as a normal expiry on the row.

use chrono::Duration;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    clock::Clock,
    data::{punishment::PunishmentRepository, user::UserRepository},
    error::AppError,
    model::{
        punishment::{ActionKind, NewActionParam},
        user::Platform,
    },
    util::time::to_storage_precision,
};

/// Parameters for recording a promotion or demotion.
#[derive(Debug, Clone)]
pub struct RoleChangeParam {
    /// Namespace of the target's external id.
    pub platform: Platform,
    /// External id of the user whose role changes.
    pub target_id: String,
    /// Discord id of the staff member changing the role.
    pub performer_id: String,
    /// Label of the granted or removed role.
    pub role: String,
    pub reason: Option<String>,
    /// Return window in days; records an expiry on the row when present.
    pub duration_days: Option<i64>,
}

/// Service recording promotion and demotion history.
pub struct RoleService<'a> {
    db: &'a DatabaseConnection,
    clock: &'a dyn Clock,
}

impl<'a> RoleService<'a> {
    /// Creates a new RoleService instance.
    ///
    /// # Arguments
    /// - `db` - Database connection
    /// - `clock` - Source of the current instant
    pub fn new(db: &'a DatabaseConnection, clock: &'a dyn Clock) -> Self {
        Self { db, clock }
    }

    /// Records a promotion.
    ///
    /// # Returns
    /// - `Ok(i32)` - Id of the new ledger row
    /// - `Err(AppError::DbErr)` - Database error; nothing was committed
    pub async fn promote(&self, param: RoleChangeParam) -> Result<i32, AppError> {
        self.record(ActionKind::Promotion, param).await
    }

    /// Records a demotion.
    ///
    /// # Returns
    /// - `Ok(i32)` - Id of the new ledger row
    /// - `Err(AppError::DbErr)` - Database error; nothing was committed
    pub async fn demote(&self, param: RoleChangeParam) -> Result<i32, AppError> {
        self.record(ActionKind::Demotion, param).await
    }

    async fn record(&self, kind: ActionKind, param: RoleChangeParam) -> Result<i32, AppError> {
        let now = to_storage_precision(self.clock.now());
        let txn = self.db.begin().await?;

        let users = UserRepository::new(&txn);
        let target = users.resolve(param.platform, &param.target_id, now).await?;
        let performer = users
            .resolve(Platform::Discord, &param.performer_id, now)
            .await?;

        let duration_seconds = param.duration_days.map(|days| days * 86400);
        let action = PunishmentRepository::new(&txn)
            .insert(
                NewActionParam {
                    user_id: target,
                    performed_by: performer,
                    kind,
                    ticket_id: None,
                    role: Some(param.role),
                    reason: param.reason,
                    duration_seconds,
                    expires_at: duration_seconds.map(|seconds| now + Duration::seconds(seconds)),
                },
                now,
            )
            .await?;

        txn.commit().await?;
        Ok(action.id)
    }
}
