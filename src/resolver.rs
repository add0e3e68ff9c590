use uuid::Uuid;

use crate::api::{DirectoryApi, User};
use crate::scope::{Scope, PROJECT_MANAGEMENT_MODULE};
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopePlan {
    pub primary: Scope,
    pub org_id: Option<Uuid>,
    pub cascade: Vec<Scope>,
}

impl ScopePlan {
    fn for_scope(scope: Scope, org_id: Option<Uuid>) -> Self {
        Self {
            primary: scope,
            org_id,
            cascade: scope.cascade().to_vec(),
        }
    }
}

pub fn needs_org_lookup(user: &User, session: &Session) -> bool {
    session.selected_module.as_deref() != Some(PROJECT_MANAGEMENT_MODULE)
        && user.current_organization.is_some()
}

pub async fn resolve_plan(
    api: &dyn DirectoryApi,
    user: &User,
    session: &mut Session,
) -> ScopePlan {
    if session.selected_module.as_deref() == Some(PROJECT_MANAGEMENT_MODULE) {
        return ScopePlan::for_scope(Scope::Workspace, None);
    }

    if let Some(org_ref) = &user.current_organization {
        match api.org_by_id(org_ref).await {
            Ok(org) => {
                session.org_name = Some(org.name);
                return ScopePlan::for_scope(Scope::Organization, Some(org.id));
            }
            Err(err) => {
                tracing::warn!(
                    "Organization lookup failed, falling back to platform scope: {}",
                    err
                );
            }
        }
    }

    ScopePlan::for_scope(Scope::Platform, None)
}
