use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::grants::{PermissionSet, RoleSummary};
use crate::scope::Scope;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RolesStore {
    #[serde(default)]
    scopes: BTreeMap<Scope, PermissionSet>,
    #[serde(default)]
    simple_roles: Vec<RoleSummary>,
}

impl RolesStore {
    // Inserts one scope's entry and never touches the others.
    pub fn merge(&mut self, scope: Scope, set: PermissionSet) {
        self.scopes.insert(scope, set);
    }

    pub fn get(&self, scope: Scope) -> Option<&PermissionSet> {
        self.scopes.get(&scope)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Scope, &PermissionSet)> {
        self.scopes.iter()
    }

    pub fn set_simple_roles(&mut self, roles: Vec<RoleSummary>) {
        self.simple_roles = roles;
    }

    pub fn simple_roles(&self) -> &[RoleSummary] {
        &self.simple_roles
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty() && self.simple_roles.is_empty()
    }

    pub fn clear(&mut self) {
        self.scopes.clear();
        self.simple_roles.clear();
    }

    pub fn snapshot_path() -> PathBuf {
        std::env::var("ROLEGATE_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| crate::config::Config::rolegate_dir().join("roles.json"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).context("Failed to read roles snapshot")?;
        let store: RolesStore =
            serde_json::from_str(&contents).context("Failed to parse roles snapshot")?;

        Ok(store)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, serde_json::to_string_pretty(self)?)?;

        Ok(())
    }
}

pub async fn show_cache(scope: Option<String>) -> Result<()> {
    let filter = match scope {
        Some(s) => Some(s.parse::<Scope>()?),
        None => None,
    };

    let store = RolesStore::load(&RolesStore::snapshot_path())?;

    if store.is_empty() {
        println!("No cached permissions. Run 'rolegate resolve' first.");
        return Ok(());
    }

    for (scope, set) in store.entries() {
        if let Some(wanted) = filter {
            if *scope != wanted {
                continue;
            }
        }

        println!("─────────────────────────────────────");
        println!("Scope: {}", scope);
        if set.is_empty() {
            println!("  (no module grants)");
        }
        for grant in set.iter() {
            println!("  {} [{}]", grant.module, grant.actions.join(", "));
        }
    }

    if !store.simple_roles().is_empty() && filter.is_none() {
        println!("─────────────────────────────────────");
        println!("Roles:");
        for role in store.simple_roles() {
            match &role.description {
                Some(desc) => println!("  {} - {}", role.name, desc),
                None => println!("  {}", role.name),
            }
        }
    }
    println!("─────────────────────────────────────");

    Ok(())
}

pub async fn cache_status() -> Result<()> {
    let path = RolesStore::snapshot_path();
    let store = RolesStore::load(&path)?;

    println!("Snapshot: {}", path.display());

    if store.is_empty() {
        println!("  (empty)");
        return Ok(());
    }

    for (scope, set) in store.entries() {
        println!("  {}: {} grants", scope, set.len());
    }
    println!("  roles: {}", store.simple_roles().len());

    Ok(())
}

pub async fn clear_cache() -> Result<()> {
    let path = RolesStore::snapshot_path();

    if path.exists() {
        fs::remove_file(&path).context("Failed to remove roles snapshot")?;
    }

    let logger = crate::audit::AuditLogger::new()?;
    logger.log(crate::audit::AuditAction::CacheClear, None, None, true, None)?;

    println!("✅ Cleared cached permissions");

    Ok(())
}
