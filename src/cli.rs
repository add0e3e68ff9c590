use anyhow::Result;
use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "rolegate")]
#[command(about = "Resolve. Decrypt. Cache. - Scoped permission resolution for multi-tenant platforms")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Resolve {
        #[arg(long, help = "Select a module before resolving (e.g. project-management)")]
        module: Option<String>,

        #[arg(long, help = "User id to resolve permissions for")]
        user: Option<Uuid>,
    },

    Grants {
        #[arg(long, help = "Filter by scope (platform/organization/workspace/project/team)")]
        scope: Option<String>,
    },

    Module {
        #[command(subcommand)]
        action: ModuleAction,
    },

    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    Login {
        #[arg(long, help = "API URL")]
        api_url: Option<String>,
    },

    Audit {
        #[arg(long, help = "Filter by scope")]
        scope: Option<String>,

        #[arg(long, help = "Show last N entries")]
        last: Option<usize>,
    },

    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ModuleAction {
    Set { name: String },
    Show,
    Clear,
}

#[derive(Subcommand)]
pub enum CacheAction {
    Show,
    Clear,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    Show,
    Init,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve { module, user } => crate::resolve::resolve(module, user).await,
        Commands::Grants { scope } => crate::store::show_cache(scope).await,
        Commands::Module { action } => match action {
            ModuleAction::Set { name } => crate::session::set_module(name).await,
            ModuleAction::Show => crate::session::show_module().await,
            ModuleAction::Clear => crate::session::clear_module().await,
        },
        Commands::Cache { action } => match action {
            CacheAction::Show => crate::store::cache_status().await,
            CacheAction::Clear => crate::store::clear_cache().await,
        },
        Commands::Login { api_url } => crate::login::login(api_url).await,
        Commands::Audit { scope, last } => crate::audit::show_audit(scope, last).await,
        Commands::Config { action } => match action {
            Some(ConfigAction::Show) => crate::config::show_config().await,
            Some(ConfigAction::Init) => crate::config::init_config().await,
            None => crate::config::show_config().await,
        },
    }
}
