//! Generic entity reconciler.
//!
//! One [`Reconciler`] drives the five lifecycle operations (create, read,
//! update, delete, import) for any entity kind; everything kind-specific
//! lives behind the [`EntityPolicy`] strategy trait. Each operation is a
//! single sequential unit of work with no retries: a failed remote call is
//! terminal for the invocation and surfaced as a diagnostic, never as `Err`.

use async_trait::async_trait;
use tracing::{debug, warn};

use alertmesh_api::{ApiError, ApiResult};

use crate::diagnostics::{Diagnostic, Diagnostics, ProblemKind};

/// Tag identifying an entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Destination,
    Gateway,
    Notification,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Destination => write!(f, "destination"),
            EntityKind::Gateway => write!(f, "gateway"),
            EntityKind::Notification => write!(f, "notification"),
        }
    }
}

/// How a kind applies an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStyle {
    /// The remote mutates the entity under its existing key.
    InPlace,
    /// The entity is deleted and recreated; the new entity gets fresh
    /// remote-assigned fields.
    Replace,
}

/// Progress of a replacement update, reported explicitly so callers can
/// repair a mid-sequence failure instead of guessing from diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplacementPhase {
    /// Delete and create both succeeded.
    Completed { old_id: String, new_id: String },
    /// The old entity is gone but the replacement was not created.
    OldDeletedNewPending { old_id: String },
}

/// Result of a reconciliation operation: an optional value plus the
/// diagnostics collected along the way.
#[derive(Debug, Clone)]
pub struct Reconciled<T> {
    pub value: Option<T>,
    pub diagnostics: Diagnostics,
}

impl<T> Reconciled<T> {
    #[must_use]
    pub fn success(value: T) -> Self {
        Self {
            value: Some(value),
            diagnostics: Diagnostics::new(),
        }
    }

    #[must_use]
    pub fn failed(diagnostics: Diagnostics) -> Self {
        Self {
            value: None,
            diagnostics,
        }
    }

    /// Whether the operation produced a value and no error diagnostics.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.value.is_some() && !self.diagnostics.has_errors()
    }
}

/// Result of an update, which additionally reports replacement progress for
/// kinds with [`UpdateStyle::Replace`].
#[derive(Debug, Clone)]
pub struct UpdateOutcome<T> {
    pub value: Option<T>,
    /// `None` for in-place kinds and for replacements that never got past
    /// the precondition checks.
    pub replacement: Option<ReplacementPhase>,
    pub diagnostics: Diagnostics,
}

/// Kind-specific reconciliation strategy.
///
/// A policy owns the (shared, read-only) remote API handle for its kind and
/// knows how to encode typed records into remote calls and decode the
/// responses back. The generic [`Reconciler`] supplies the lifecycle
/// orchestration: precondition checks, diagnostics aggregation, and the
/// two-phase replacement driver.
#[async_trait]
pub trait EntityPolicy: Send + Sync {
    type Record: Clone + Send + Sync;

    fn kind(&self) -> EntityKind;

    fn update_style(&self) -> UpdateStyle;

    /// The record's operational key: the remote-assigned id, or the name
    /// for kinds addressed by name.
    fn key(&self, record: &Self::Record) -> Option<String>;

    /// Short human summary of a record for diagnostics.
    fn describe(&self, record: &Self::Record) -> String;

    /// The first write-once field that differs between state and plan, if
    /// any. A conflict fails the update before any remote call.
    fn immutable_conflict(&self, state: &Self::Record, plan: &Self::Record) -> Option<String> {
        let _ = (state, plan);
        None
    }

    /// Allocate one remote entity and return the desired record merged with
    /// every remote-assigned field. Failures are pushed onto `diagnostics`.
    async fn create(
        &self,
        desired: &Self::Record,
        diagnostics: &mut Diagnostics,
    ) -> Option<Self::Record>;

    /// Fetch the entity's current remote state by key.
    async fn fetch(&self, key: &str) -> ApiResult<Self::Record>;

    /// Apply an in-place update. Only called for [`UpdateStyle::InPlace`]
    /// kinds; every remote call in the sequence is attempted and each
    /// failure is pushed onto `diagnostics`.
    async fn update_in_place(
        &self,
        state: &Self::Record,
        plan: &Self::Record,
        diagnostics: &mut Diagnostics,
    ) -> Option<Self::Record> {
        let _ = (state, plan);
        diagnostics.push(Diagnostic::error(
            ProblemKind::RemoteRejected,
            format!("{} does not support in-place updates", self.kind()),
            String::new(),
        ));
        None
    }

    /// Delete the remote entity by key.
    async fn delete_remote(&self, key: &str) -> ApiResult<()>;

    /// List every remote entity of this kind, in remote order.
    async fn list(&self) -> ApiResult<Vec<Self::Record>>;
}

/// Map a remote failure to the matching diagnostic.
pub(crate) fn remote_failure(kind: EntityKind, operation: &str, err: &ApiError) -> Diagnostic {
    match err {
        ApiError::NotFound { .. } => Diagnostic::error(
            ProblemKind::NotFound,
            format!("{operation} failed: {kind} not found"),
            err.to_string(),
        ),
        _ => Diagnostic::error(
            ProblemKind::RemoteRejected,
            format!("could not {operation} {kind}"),
            err.to_string(),
        ),
    }
}

/// Drives the lifecycle of one entity kind against the remote API.
///
/// Stateless between calls: every operation takes the full state it needs
/// and retains nothing, so independent entities may be reconciled
/// concurrently by the caller.
pub struct Reconciler<P: EntityPolicy> {
    policy: P,
}

impl<P: EntityPolicy> Reconciler<P> {
    pub fn new(policy: P) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.policy.kind()
    }

    /// Create the entity described by `desired`.
    ///
    /// Observed-only fields on `desired` are ignored; the result carries the
    /// remote-assigned values.
    pub async fn create(&self, desired: &P::Record) -> Reconciled<P::Record> {
        let mut diagnostics = Diagnostics::new();
        debug!(kind = %self.kind(), "creating entity");

        let value = self.policy.create(desired, &mut diagnostics).await;
        if value.is_none() {
            warn!(kind = %self.kind(), "create did not converge");
        }
        Reconciled { value, diagnostics }
    }

    /// Refresh the entity from remote state.
    ///
    /// The result is authoritative: every field the remote returns replaces
    /// local state.
    pub async fn read(&self, key: &str) -> Reconciled<P::Record> {
        let mut diagnostics = Diagnostics::new();
        debug!(kind = %self.kind(), key, "reading entity");

        match self.policy.fetch(key).await {
            Ok(record) => Reconciled::success(record),
            Err(err) => {
                diagnostics.push(remote_failure(self.kind(), "read", &err));
                Reconciled::failed(diagnostics)
            }
        }
    }

    /// Attach an existing remote entity by bare key.
    ///
    /// Equivalent to a read with no prior local state; populates every
    /// field, including collection- and reference-valued ones.
    pub async fn import(&self, key: &str) -> Reconciled<P::Record> {
        debug!(kind = %self.kind(), key, "importing entity");
        self.read(key).await
    }

    /// Converge the remote entity from `state` to `plan`.
    ///
    /// An immutable-field conflict fails before any remote call. In-place
    /// kinds apply their call sequence; replace kinds run the two-phase
    /// delete-then-create driver and report the phase reached.
    pub async fn update(&self, state: &P::Record, plan: &P::Record) -> UpdateOutcome<P::Record> {
        let mut diagnostics = Diagnostics::new();

        if let Some(field) = self.policy.immutable_conflict(state, plan) {
            diagnostics.push(Diagnostic::error(
                ProblemKind::ImmutableFieldViolation,
                format!("{} {field} cannot be changed", self.kind()),
                format!(
                    "{field} is write-once; recreate the {} to change it",
                    self.kind()
                ),
            ));
            return UpdateOutcome {
                value: None,
                replacement: None,
                diagnostics,
            };
        }

        match self.policy.update_style() {
            UpdateStyle::InPlace => {
                debug!(kind = %self.kind(), "updating entity in place");
                let value = self
                    .policy
                    .update_in_place(state, plan, &mut diagnostics)
                    .await;
                UpdateOutcome {
                    value,
                    replacement: None,
                    diagnostics,
                }
            }
            UpdateStyle::Replace => self.replace(state, plan, diagnostics).await,
        }
    }

    /// Two-phase replacement: delete the old entity, then create the new
    /// one. There is no remote atomicity and no rollback; the reported
    /// [`ReplacementPhase`] is how callers detect a mid-sequence failure.
    async fn replace(
        &self,
        state: &P::Record,
        plan: &P::Record,
        mut diagnostics: Diagnostics,
    ) -> UpdateOutcome<P::Record> {
        let Some(old_id) = self.policy.key(state) else {
            diagnostics.push(Diagnostic::error(
                ProblemKind::NotFound,
                format!("cannot replace {} without a key", self.kind()),
                "the current state carries no remote id".to_string(),
            ));
            return UpdateOutcome {
                value: None,
                replacement: None,
                diagnostics,
            };
        };

        debug!(kind = %self.kind(), old_id, "replacing entity");

        if let Err(err) = self.policy.delete_remote(&old_id).await {
            diagnostics.push(remote_failure(self.kind(), "delete (during replacement)", &err));
            return UpdateOutcome {
                value: None,
                replacement: None,
                diagnostics,
            };
        }

        let mut create_diagnostics = Diagnostics::new();
        match self.policy.create(plan, &mut create_diagnostics).await {
            Some(record) => {
                diagnostics.extend(create_diagnostics);
                let new_id = self.policy.key(&record).unwrap_or_default();
                UpdateOutcome {
                    value: Some(record),
                    replacement: Some(ReplacementPhase::Completed { old_id, new_id }),
                    diagnostics,
                }
            }
            None => {
                warn!(
                    kind = %self.kind(),
                    old_id,
                    "replacement create failed after delete; prior entity is lost"
                );
                diagnostics.push(Diagnostic::error(
                    ProblemKind::PartialReplacementFailure,
                    format!(
                        "{} {old_id} was deleted but its replacement was not created",
                        self.kind()
                    ),
                    format!(
                        "desired replacement: {}; {}",
                        self.policy.describe(plan),
                        create_diagnostics.render()
                    ),
                ));
                UpdateOutcome {
                    value: None,
                    replacement: Some(ReplacementPhase::OldDeletedNewPending { old_id }),
                    diagnostics,
                }
            }
        }
    }

    /// Delete the remote entity.
    ///
    /// A failed delete is surfaced as an error so the caller keeps its local
    /// tracking state; there is no soft failure.
    pub async fn delete(&self, key: &str) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        debug!(kind = %self.kind(), key, "deleting entity");

        if let Err(err) = self.policy.delete_remote(key).await {
            diagnostics.push(remote_failure(self.kind(), "delete", &err));
        }
        diagnostics
    }

    /// Materialize the full remote inventory of this kind.
    ///
    /// Ordering is whatever the remote returned; nothing is re-sorted or
    /// deduplicated.
    pub async fn list_all(&self) -> Reconciled<Vec<P::Record>> {
        let mut diagnostics = Diagnostics::new();
        debug!(kind = %self.kind(), "listing entities");

        match self.policy.list().await {
            Ok(records) => Reconciled::success(records),
            Err(err) => {
                diagnostics.push(remote_failure(self.kind(), "list", &err));
                Reconciled::failed(diagnostics)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_display() {
        assert_eq!(EntityKind::Destination.to_string(), "destination");
        assert_eq!(EntityKind::Gateway.to_string(), "gateway");
        assert_eq!(EntityKind::Notification.to_string(), "notification");
    }

    #[test]
    fn test_remote_failure_maps_not_found() {
        let err = ApiError::not_found("destination", "dest-1");
        let diag = remote_failure(EntityKind::Destination, "read", &err);
        assert_eq!(diag.kind, ProblemKind::NotFound);

        let err = ApiError::rejected(500, "boom");
        let diag = remote_failure(EntityKind::Destination, "read", &err);
        assert_eq!(diag.kind, ProblemKind::RemoteRejected);
    }

    #[test]
    fn test_reconciled_success_flags() {
        let ok: Reconciled<u8> = Reconciled::success(1);
        assert!(ok.is_success());

        let mut diags = Diagnostics::new();
        diags.push(Diagnostic::error(
            ProblemKind::RemoteRejected,
            "failed",
            "",
        ));
        let failed: Reconciled<u8> = Reconciled::failed(diags);
        assert!(!failed.is_success());
    }
}
