use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(
        default,
        rename = "selectedModule",
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_module: Option<String>,
    #[serde(default, rename = "orgName", skip_serializing_if = "Option::is_none")]
    pub org_name: Option<String>,
}

impl Session {
    pub fn session_path() -> PathBuf {
        std::env::var("ROLEGATE_SESSION_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| crate::config::Config::rolegate_dir().join("session.json"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::session_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).context("Failed to read session file")?;
        let session: Session =
            serde_json::from_str(&contents).context("Failed to parse session file")?;

        Ok(session)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::session_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, serde_json::to_string_pretty(self)?)?;

        Ok(())
    }
}

pub async fn set_module(name: String) -> Result<()> {
    let mut session = Session::load()?;
    session.selected_module = Some(name.clone());
    session.save()?;

    println!("✅ Selected module: {}", name);

    Ok(())
}

pub async fn show_module() -> Result<()> {
    let session = Session::load()?;

    match session.selected_module {
        Some(name) => println!("Selected module: {}", name),
        None => println!("No module selected"),
    }

    Ok(())
}

pub async fn clear_module() -> Result<()> {
    let mut session = Session::load()?;
    session.selected_module = None;
    session.save()?;

    println!("✅ Cleared selected module");

    Ok(())
}
