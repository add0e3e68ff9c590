use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::api::{ApiError, DirectoryApi};
use crate::crypto::{CryptoError, Decryptor};
use crate::grants::{parse_role_summaries, PermissionSet, ShapeError};
use crate::loader::Loader;
use crate::resolver::{self, ScopePlan};
use crate::scope::Scope;
use crate::session::Session;
use crate::store::RolesStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassState {
    Idle,
    ResolvingUser,
    ResolvingOrg,
    FetchingScope,
    Cascading,
    Done,
    Failed,
}

impl PassState {
    pub fn can_transition(self, next: PassState) -> bool {
        use PassState::*;
        matches!(
            (self, next),
            (Idle, ResolvingUser)
                | (ResolvingUser, ResolvingOrg)
                | (ResolvingUser, FetchingScope)
                | (ResolvingUser, Failed)
                | (ResolvingOrg, FetchingScope)
                | (FetchingScope, Cascading)
                | (FetchingScope, Done)
                | (Cascading, Done)
        )
    }
}

#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] ApiError),
    #[error("decrypt failed: {0}")]
    Decrypt(#[from] CryptoError),
    #[error("payload shape invalid: {0}")]
    Shape(#[from] ShapeError),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("user lookup failed: {0}")]
    User(#[source] ApiError),
    #[error("illegal pass transition: {from:?} -> {to:?}")]
    IllegalTransition { from: PassState, to: PassState },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeSummary {
    pub grants: Option<usize>,
    pub roles: Option<usize>,
}

#[derive(Debug)]
pub struct PassReport {
    pub user_id: Uuid,
    pub plan: ScopePlan,
    pub outcomes: Vec<(Scope, Result<ScopeSummary, ScopeError>)>,
    pub cascade_skipped: bool,
}

impl PassReport {
    pub fn fully_resolved(&self) -> bool {
        !self.cascade_skipped && self.outcomes.iter().all(|(_, r)| r.is_ok())
    }

    pub fn total_grants(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(|(_, r)| r.as_ref().ok())
            .filter_map(|s| s.grants)
            .sum()
    }
}

pub struct ResolutionEngine<A> {
    api: A,
    decryptor: Decryptor,
    store: RolesStore,
    session: Session,
    loader: Arc<Loader>,
    state: PassState,
}

impl<A: DirectoryApi> ResolutionEngine<A> {
    pub fn new(
        api: A,
        decryptor: Decryptor,
        store: RolesStore,
        session: Session,
        loader: Arc<Loader>,
    ) -> Self {
        Self {
            api,
            decryptor,
            store,
            session,
            loader,
            state: PassState::Idle,
        }
    }

    pub fn state(&self) -> PassState {
        self.state
    }

    pub fn store(&self) -> &RolesStore {
        &self.store
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_parts(self) -> (RolesStore, Session) {
        (self.store, self.session)
    }

    fn transition(&mut self, next: PassState) -> Result<(), ResolveError> {
        if !self.state.can_transition(next) {
            return Err(ResolveError::IllegalTransition {
                from: self.state,
                to: next,
            });
        }

        tracing::debug!(from = ?self.state, to = ?next, "pass transition");
        self.state = next;

        Ok(())
    }

    pub async fn run_pass(&mut self, user_id: &Uuid) -> Result<PassReport, ResolveError> {
        let loader = Arc::clone(&self.loader);
        let _guard = loader.begin();

        self.state = PassState::Idle;
        self.transition(PassState::ResolvingUser)?;

        let user = match self.api.user_by_id(user_id).await {
            Ok(user) => user,
            Err(err) => {
                self.transition(PassState::Failed)?;
                return Err(ResolveError::User(err));
            }
        };

        if resolver::needs_org_lookup(&user, &self.session) {
            self.transition(PassState::ResolvingOrg)?;
        }

        let plan = resolver::resolve_plan(&self.api, &user, &mut self.session).await;

        self.transition(PassState::FetchingScope)?;

        let primary = self.resolve_scope(plan.primary, plan.org_id.as_ref()).await;
        if let Err(err) = &primary {
            tracing::warn!(scope = plan.primary.as_str(), "Scope resolution failed: {}", err);
        }

        // A payload-level failure (decrypt/shape) still cascades; a failed
        // fetch of the primary scope does not.
        let fetch_failed = matches!(primary, Err(ScopeError::Fetch(_)));
        let mut outcomes = vec![(plan.primary, primary)];
        let mut cascade_skipped = false;

        if !plan.cascade.is_empty() {
            if fetch_failed {
                cascade_skipped = true;
                tracing::warn!("Primary scope fetch failed, skipping cascade");
            } else {
                self.transition(PassState::Cascading)?;

                for scope in &plan.cascade {
                    let outcome = self.resolve_scope(*scope, plan.org_id.as_ref()).await;
                    if let Err(err) = &outcome {
                        tracing::warn!(scope = scope.as_str(), "Scope resolution failed: {}", err);
                    }
                    outcomes.push((*scope, outcome));
                }
            }
        }

        self.transition(PassState::Done)?;

        Ok(PassReport {
            user_id: *user_id,
            plan,
            outcomes,
            cascade_skipped,
        })
    }

    async fn resolve_scope(
        &mut self,
        scope: Scope,
        org_id: Option<&Uuid>,
    ) -> Result<ScopeSummary, ScopeError> {
        let envelope = self.api.roles_and_permissions(scope, org_id).await?;

        let mut summary = ScopeSummary::default();
        let mut first_err: Option<ScopeError> = None;

        match (envelope.permissions, envelope.iv) {
            (Some(ciphertext), Some(iv)) => match self.decrypt_permissions(&ciphertext, &iv) {
                Ok(set) => {
                    summary.grants = Some(set.len());
                    self.store.merge(scope, set);
                }
                Err(err) => first_err = Some(err),
            },
            _ => {
                tracing::debug!(scope = scope.as_str(), "Permission envelope empty, nothing to decrypt");
            }
        }

        match self.api.roles(scope, org_id).await {
            Ok(envelope) => {
                if let (Some(ciphertext), Some(iv)) = (envelope.roles, envelope.iv) {
                    match self.decrypt_roles(&ciphertext, &iv) {
                        Ok(roles) => {
                            summary.roles = Some(roles.len());
                            self.store.set_simple_roles(roles);
                        }
                        Err(err) => {
                            if first_err.is_none() {
                                first_err = Some(err);
                            }
                        }
                    }
                }
            }
            Err(err) => {
                if first_err.is_none() {
                    first_err = Some(ScopeError::Fetch(err));
                }
            }
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(summary),
        }
    }

    fn decrypt_permissions(
        &self,
        ciphertext: &str,
        iv: &str,
    ) -> Result<PermissionSet, ScopeError> {
        let plaintext = self.decryptor.decrypt(ciphertext, iv)?;
        Ok(PermissionSet::from_plaintext(&plaintext)?)
    }

    fn decrypt_roles(
        &self,
        ciphertext: &str,
        iv: &str,
    ) -> Result<Vec<crate::grants::RoleSummary>, ScopeError> {
        let plaintext = self.decryptor.decrypt(ciphertext, iv)?;
        Ok(parse_role_summaries(&plaintext)?)
    }
}
