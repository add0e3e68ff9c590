use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("module grant has an empty module name")]
    EmptyModule,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModuleGrant {
    pub module: String,
    #[serde(default)]
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PermissionSet(Vec<ModuleGrant>);

impl PermissionSet {
    pub fn new(grants: Vec<ModuleGrant>) -> Self {
        Self(grants)
    }

    pub fn from_plaintext(plaintext: &str) -> Result<Self, ShapeError> {
        let grants: Vec<ModuleGrant> = serde_json::from_str(plaintext)?;

        if grants.iter().any(|g| g.module.trim().is_empty()) {
            return Err(ShapeError::EmptyModule);
        }

        Ok(Self(grants))
    }

    pub fn allows(&self, module: &str, action: &str) -> bool {
        self.0
            .iter()
            .filter(|g| g.module == module)
            .any(|g| g.actions.iter().any(|a| a == action || a == "*"))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleGrant> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleSummary {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

pub fn parse_role_summaries(plaintext: &str) -> Result<Vec<RoleSummary>, ShapeError> {
    let roles: Vec<RoleSummary> = serde_json::from_str(plaintext)?;
    Ok(roles)
}
