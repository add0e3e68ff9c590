use tempfile::TempDir;

use rolegate::grants::{ModuleGrant, PermissionSet, RoleSummary};
use rolegate::scope::Scope;
use rolegate::store::RolesStore;

fn grants(module: &str, actions: &[&str]) -> PermissionSet {
    PermissionSet::new(vec![ModuleGrant {
        module: module.to_string(),
        actions: actions.iter().map(|a| a.to_string()).collect(),
    }])
}

#[test]
fn test_merge_preserves_other_scopes() {
    let mut store = RolesStore::default();

    store.merge(Scope::Platform, grants("users", &["read"]));
    store.merge(Scope::Organization, grants("payroll", &["read", "write"]));
    store.merge(Scope::Workspace, grants("projects", &["read"]));

    assert!(store.get(Scope::Platform).is_some());
    assert!(store.get(Scope::Organization).is_some());
    assert!(store.get(Scope::Workspace).is_some());
}

#[test]
fn test_remerge_replaces_only_that_scope() {
    let mut store = RolesStore::default();

    store.merge(Scope::Platform, grants("users", &["read"]));
    store.merge(Scope::Organization, grants("payroll", &["read"]));

    store.merge(Scope::Organization, grants("billing", &["write"]));

    let platform = store.get(Scope::Platform).unwrap();
    assert!(platform.allows("users", "read"));

    let org = store.get(Scope::Organization).unwrap();
    assert!(org.allows("billing", "write"));
    assert!(!org.allows("payroll", "read"));
}

#[test]
fn test_simple_roles_kept_separate() {
    let mut store = RolesStore::default();

    store.merge(Scope::Platform, grants("users", &["read"]));
    store.set_simple_roles(vec![RoleSummary {
        id: "r1".to_string(),
        name: "Admin".to_string(),
        description: None,
    }]);

    assert_eq!(store.simple_roles().len(), 1);
    assert!(store.get(Scope::Platform).is_some());

    store.set_simple_roles(Vec::new());
    assert!(store.simple_roles().is_empty());
    assert!(store.get(Scope::Platform).is_some());
}

#[test]
fn test_allows_wildcard_action() {
    let set = grants("recruitment", &["*"]);

    assert!(set.allows("recruitment", "read"));
    assert!(set.allows("recruitment", "delete"));
    assert!(!set.allows("payroll", "read"));
}

#[test]
fn test_snapshot_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("roles.json");

    let mut store = RolesStore::default();
    store.merge(Scope::Workspace, grants("projects", &["read", "write"]));
    store.merge(Scope::Team, grants("issues", &["read"]));
    store.set_simple_roles(vec![RoleSummary {
        id: "r1".to_string(),
        name: "Member".to_string(),
        description: Some("Default member role".to_string()),
    }]);

    store.save(&path).unwrap();

    let reloaded = RolesStore::load(&path).unwrap();
    assert!(reloaded.get(Scope::Workspace).unwrap().allows("projects", "write"));
    assert!(reloaded.get(Scope::Team).unwrap().allows("issues", "read"));
    assert_eq!(reloaded.simple_roles().len(), 1);
    assert_eq!(reloaded.simple_roles()[0].name, "Member");
}

#[test]
fn test_load_missing_snapshot_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.json");

    let store = RolesStore::load(&path).unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_clear() {
    let mut store = RolesStore::default();
    store.merge(Scope::Platform, grants("users", &["read"]));

    store.clear();
    assert!(store.is_empty());
}
