use serde::{Deserialize, Serialize};

pub const PROJECT_MANAGEMENT_MODULE: &str = "project-management";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Platform,
    Organization,
    Workspace,
    Project,
    Team,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Platform => "platform",
            Scope::Organization => "organization",
            Scope::Workspace => "workspace",
            Scope::Project => "project",
            Scope::Team => "team",
        }
    }

    pub fn cascade(&self) -> &'static [Scope] {
        match self {
            Scope::Workspace => &[Scope::Project, Scope::Team],
            _ => &[],
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Scope {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "platform" => Ok(Scope::Platform),
            "organization" => Ok(Scope::Organization),
            "workspace" => Ok(Scope::Workspace),
            "project" => Ok(Scope::Project),
            "team" => Ok(Scope::Team),
            _ => anyhow::bail!("Invalid scope: {}", s),
        }
    }
}
