//! Moderation service: punishment issuance and revocation.
//!
//! The service wraps every read-decide-write sequence in a transaction so two
//! racing commands cannot both pass a stacking or revocation check against a
//! stale snapshot. A ledger write that commits here is final: if the caller's
//! subsequent side effect (role grant, guild ban) fails, the entry stays and
//! the divergence is the caller's to log and reconcile.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    clock::Clock,
    config::ModerationConfig,
    data::{punishment::PunishmentRepository, user::UserRepository},
    error::{validation::ValidationError, AppError},
    model::{
        punishment::{
            ActionKind, ActivePunishment, NewActionParam, PunishOutcome, PunishParam, RevokeParam,
            TicketReference,
        },
        user::Platform,
    },
    util::time::to_storage_precision,
};

/// Service providing punishment issuance, stacking, escalation, and revocation.
pub struct ModerationService<'a> {
    db: &'a DatabaseConnection,
    config: &'a ModerationConfig,
    clock: &'a dyn Clock,
}

impl<'a> ModerationService<'a> {
    /// Creates a new ModerationService instance.
    ///
    /// # Arguments
    /// - `db` - Database connection
    /// - `config` - Warn-escalation tunables
    /// - `clock` - Source of the current instant
    pub fn new(
        db: &'a DatabaseConnection,
        config: &'a ModerationConfig,
        clock: &'a dyn Clock,
    ) -> Self {
        Self { db, config, clock }
    }

    /// Issues a punishment.
    ///
    /// Resolves both identities (creating them on first sight), then dispatches
    /// on the kind: stackable kinds (mute, ban, voice_mute, blacklist) go
    /// through the stacking policy, warns through the escalation policy, and
    /// kicks are recorded directly. The whole sequence runs in one transaction.
    ///
    /// # Arguments
    /// - `param` - Target, performer, kind, and punishment details
    ///
    /// # Returns
    /// - `Ok(PunishOutcome)` - What was recorded; `Skipped` when an existing
    ///   active punishment already covers the target at least as long
    /// - `Err(AppError::ValidationErr)` - Promotion/demotion submitted here, or
    ///   a warn without a duration
    /// - `Err(AppError::DbErr)` - Database error; nothing was committed
    pub async fn punish(&self, param: PunishParam) -> Result<PunishOutcome, AppError> {
        // Validate before touching storage; a rejected request must not even
        // create identities.
        if let ActionKind::Promotion | ActionKind::Demotion = param.kind {
            return Err(ValidationError::RoleChangeKind(param.kind).into());
        }
        if param.kind == ActionKind::Warn && param.duration_seconds.is_none() {
            return Err(ValidationError::MissingDuration(ActionKind::Warn).into());
        }

        let now = to_storage_precision(self.clock.now());
        let txn = self.db.begin().await?;

        let users = UserRepository::new(&txn);
        let target = users.resolve(param.platform, &param.target_id, now).await?;
        let performer = users
            .resolve(Platform::Discord, &param.performer_id, now)
            .await?;

        let action = NewActionParam {
            user_id: target,
            performed_by: performer,
            kind: param.kind,
            ticket_id: param.ticket_id,
            role: None,
            reason: param.reason,
            duration_seconds: param.duration_seconds,
            expires_at: param
                .duration_seconds
                .map(|seconds| now + Duration::seconds(seconds)),
        };

        let outcome = match param.kind {
            ActionKind::Mute | ActionKind::Ban | ActionKind::VoiceMute | ActionKind::Blacklist => {
                match self.record_stackable(&txn, action, now).await? {
                    Some(action_id) => PunishOutcome::Added { action_id },
                    None => PunishOutcome::Skipped,
                }
            }
            ActionKind::Warn => self.record_warn(&txn, action, now).await?,
            ActionKind::Kick => {
                let ledger = PunishmentRepository::new(&txn);
                let recorded = ledger
                    .insert(
                        NewActionParam {
                            // Kicks are instantaneous; never timed.
                            duration_seconds: None,
                            expires_at: None,
                            ..action
                        },
                        now,
                    )
                    .await?;

                PunishOutcome::Added {
                    action_id: recorded.id,
                }
            }
            ActionKind::Promotion | ActionKind::Demotion => {
                return Err(ValidationError::RoleChangeKind(param.kind).into());
            }
        };

        txn.commit().await?;
        Ok(outcome)
    }

    /// Revokes the active punishment of a kind for a user, with an audit trail.
    ///
    /// The revoker is resolved in the Discord namespace (staff always act
    /// through Discord) and created on first sight; the target is only looked
    /// up; a user the ledger has never seen has nothing to revoke.
    ///
    /// Idempotent per (user, kind): the first call deactivates and returns
    /// true, an immediate second call finds no active row and returns false.
    ///
    /// # Returns
    /// - `Ok(true)` - An active punishment was revoked
    /// - `Ok(false)` - Unknown target, or no active punishment of that kind
    /// - `Err(AppError::ValidationErr(NotRevocable))` - Kind without revocation
    ///   semantics (promotion, demotion, kick)
    /// - `Err(AppError::DbErr)` - Database error; nothing was committed
    pub async fn revoke(&self, param: RevokeParam) -> Result<bool, AppError> {
        if !param.kind.is_revocable() {
            return Err(ValidationError::NotRevocable(param.kind).into());
        }

        let now = to_storage_precision(self.clock.now());
        let txn = self.db.begin().await?;

        let users = UserRepository::new(&txn);
        let revoker = users
            .resolve(Platform::Discord, &param.revoker_id, now)
            .await?;

        let Some(target) = users
            .find_internal_id(param.platform, &param.target_id)
            .await?
        else {
            txn.commit().await?;
            return Ok(false);
        };

        let ledger = PunishmentRepository::new(&txn);
        let Some(active) = ledger.get_active(target, param.kind).await? else {
            tracing::info!(
                target,
                kind = param.kind.as_str(),
                "no active punishment to revoke"
            );
            txn.commit().await?;
            return Ok(false);
        };

        let revoked = ledger.revoke(active.id, revoker, &param.reason, now).await?;
        txn.commit().await?;
        Ok(revoked)
    }

    /// Returns the active punishment of a kind for an external id, if any.
    ///
    /// Never creates an identity: an unseen user has no punishments.
    pub async fn active_punishment(
        &self,
        platform: Platform,
        external_id: &str,
        kind: ActionKind,
    ) -> Result<Option<ActivePunishment>, AppError> {
        let users = UserRepository::new(self.db);
        let Some(target) = users.find_internal_id(platform, external_id).await? else {
            return Ok(None);
        };

        PunishmentRepository::new(self.db)
            .get_active(target, kind)
            .await
    }

    /// Attaches the public announcement message to a ledger row.
    ///
    /// # Returns
    /// - `Ok(true)` - Reference attached
    /// - `Ok(false)` - No such ledger row
    pub async fn attach_log_reference(
        &self,
        action_id: i32,
        log_message_id: &str,
    ) -> Result<bool, AppError> {
        PunishmentRepository::new(self.db)
            .attach_log_reference(action_id, log_message_id)
            .await
    }

    /// Active actions of an external id joined to their originating tickets.
    ///
    /// Empty for users the ledger has never seen.
    ///
    /// # Arguments
    /// - `ticket_type` - Restrict to tickets of this type, if given
    pub async fn active_ticket_references(
        &self,
        platform: Platform,
        external_id: &str,
        ticket_type: Option<&str>,
    ) -> Result<Vec<TicketReference>, AppError> {
        let users = UserRepository::new(self.db);
        let Some(target) = users.find_internal_id(platform, external_id).await? else {
            return Ok(Vec::new());
        };

        PunishmentRepository::new(self.db)
            .active_ticket_references(target, ticket_type)
            .await
    }

    /// Applies the stacking policy and inserts the row when allowed.
    ///
    /// Decision, per the current active row for `(user, kind)`:
    /// - none: add;
    /// - permanent: skip, coverage cannot be extended;
    /// - timed and the new punishment expires strictly later (or is itself
    ///   permanent): silently deactivate the old row, then add;
    /// - timed with an earlier or equal new expiry: skip, so a punishment never
    ///   implicitly shortens coverage and no duplicate timer goes live.
    async fn record_stackable<C: ConnectionTrait>(
        &self,
        db: &C,
        param: NewActionParam,
        now: DateTime<Utc>,
    ) -> Result<Option<i32>, AppError> {
        let ledger = PunishmentRepository::new(db);

        if let Some(existing) = ledger.get_active(param.user_id, param.kind).await? {
            match (existing.expires_at, param.expires_at) {
                (None, _) => {
                    tracing::info!(
                        user_id = param.user_id,
                        kind = param.kind.as_str(),
                        "skipped: a permanent punishment already covers this user"
                    );
                    return Ok(None);
                }
                (Some(existing_expiry), Some(new_expiry)) if new_expiry <= existing_expiry => {
                    tracing::info!(
                        user_id = param.user_id,
                        kind = param.kind.as_str(),
                        "skipped: a longer or equal punishment already exists"
                    );
                    return Ok(None);
                }
                // Strictly longer coverage, or permanent replacing timed.
                (Some(_), _) => {
                    ledger.deactivate(existing.id).await?;
                }
            }
        }

        let action = ledger.insert(param, now).await?;
        Ok(Some(action.id))
    }

    /// Records a warn and applies the escalation policy.
    ///
    /// Warns never go through stacking; every warn is its own row. After the
    /// insert the active-warn count is re-checked: at the configured threshold
    /// all active warns are swept in one bulk deactivation and the configured
    /// automatic punishment is issued through the normal stacking path. The
    /// sweep resets the counter, so the trigger is one-shot: a user must
    /// accumulate a full set of fresh warns to trigger it again.
    async fn record_warn<C: ConnectionTrait>(
        &self,
        db: &C,
        param: NewActionParam,
        now: DateTime<Utc>,
    ) -> Result<PunishOutcome, AppError> {
        let ledger = PunishmentRepository::new(db);

        let target = param.user_id;
        let performer = param.performed_by;
        let ticket_id = param.ticket_id;
        let warn = ledger.insert(param, now).await?;

        let active_warns = ledger.count_active_warns(target).await?;
        if active_warns < self.config.warn_threshold {
            return Ok(PunishOutcome::Warned { action_id: warn.id });
        }

        ledger.deactivate_all_warns(target).await?;

        let escalation_kind = self.config.escalation_kind;
        let escalation_id = self
            .record_stackable(
                db,
                NewActionParam {
                    user_id: target,
                    performed_by: performer,
                    kind: escalation_kind,
                    ticket_id,
                    role: None,
                    reason: Some(format!(
                        "Automatic {} for reaching {} warnings.",
                        escalation_kind, self.config.warn_threshold
                    )),
                    duration_seconds: Some(self.config.escalation_duration_seconds),
                    expires_at: Some(
                        now + Duration::seconds(self.config.escalation_duration_seconds),
                    ),
                },
                now,
            )
            .await?;

        tracing::info!(
            user_id = target,
            warn_id = warn.id,
            escalation_id,
            kind = escalation_kind.as_str(),
            "warn limit reached, issued automatic punishment"
        );

        Ok(PunishOutcome::WarnedAndEscalated {
            warn_id: warn.id,
            escalation_id,
            escalation_kind,
        })
    }
}
