use uuid::Uuid;

use crate::common::{test_user, MockApi};
use rolegate::api::Organization;
use rolegate::resolver::resolve_plan;
use rolegate::scope::{Scope, PROJECT_MANAGEMENT_MODULE};
use rolegate::session::Session;

#[tokio::test]
async fn test_no_org_no_module_resolves_platform() {
    let api = MockApi::default();
    let user = test_user(None);
    let mut session = Session::default();

    let plan = resolve_plan(&api, &user, &mut session).await;

    assert_eq!(plan.primary, Scope::Platform);
    assert!(plan.cascade.is_empty());
    assert!(plan.org_id.is_none());
}

#[tokio::test]
async fn test_current_org_resolves_organization_and_caches_name() {
    let org_id = Uuid::new_v4();
    let api = MockApi {
        org: Some(Organization {
            id: org_id,
            name: "Acme Corp".to_string(),
        }),
        ..Default::default()
    };
    let user = test_user(Some(org_id));
    let mut session = Session::default();

    let plan = resolve_plan(&api, &user, &mut session).await;

    assert_eq!(plan.primary, Scope::Organization);
    assert_eq!(plan.org_id, Some(org_id));
    assert!(plan.cascade.is_empty());
    assert_eq!(session.org_name.as_deref(), Some("Acme Corp"));
}

#[tokio::test]
async fn test_org_lookup_failure_falls_back_to_platform() {
    let org_id = Uuid::new_v4();
    let api = MockApi {
        org_error: true,
        ..Default::default()
    };
    let user = test_user(Some(org_id));
    let mut session = Session::default();

    let plan = resolve_plan(&api, &user, &mut session).await;

    assert_eq!(plan.primary, Scope::Platform);
    assert!(session.org_name.is_none());
}

#[tokio::test]
async fn test_project_management_module_resolves_workspace_cascade() {
    let api = MockApi {
        org_error: true,
        ..Default::default()
    };
    let org_calls = api.org_calls.clone();

    // Module selection wins over the user's organization, no org lookup happens.
    let user = test_user(Some(Uuid::new_v4()));
    let mut session = Session {
        selected_module: Some(PROJECT_MANAGEMENT_MODULE.to_string()),
        ..Default::default()
    };

    let plan = resolve_plan(&api, &user, &mut session).await;

    assert_eq!(plan.primary, Scope::Workspace);
    assert_eq!(plan.cascade, vec![Scope::Project, Scope::Team]);
    assert_eq!(*org_calls.lock().unwrap(), 0);
}

#[test]
fn test_workspace_cascade_is_project_then_team() {
    assert_eq!(Scope::Workspace.cascade(), &[Scope::Project, Scope::Team]);
    assert!(Scope::Platform.cascade().is_empty());
    assert!(Scope::Organization.cascade().is_empty());
    assert!(Scope::Project.cascade().is_empty());
    assert!(Scope::Team.cascade().is_empty());
}
