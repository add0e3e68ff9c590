use anyhow::{Context, Result};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::HttpApi;
use crate::audit::{AuditAction, AuditLogger};
use crate::config::Config;
use crate::crypto::Decryptor;
use crate::engine::ResolutionEngine;
use crate::loader::Loader;
use crate::session::Session;
use crate::store::RolesStore;

pub async fn resolve(module: Option<String>, user: Option<Uuid>) -> Result<()> {
    let config = Config::load()?;
    let mut session = Session::load()?;

    if let Some(module) = module {
        session.selected_module = Some(module);
        session.save()?;
    }

    let user_id = user
        .or(config.user_id)
        .context("No user id. Pass --user or set user_id in config.")?;

    let api = HttpApi::from_config(&config)
        .context("Failed to build API client. Run 'rolegate login' first.")?;
    let decryptor = Decryptor::from_env()?;
    let store = RolesStore::load(&RolesStore::snapshot_path())?;
    let loader = Arc::new(Loader::default());

    let mut engine = ResolutionEngine::new(api, decryptor, store, session, loader);

    println!("🔎 Resolving permissions for user {}", user_id);

    let logger = AuditLogger::new()?;

    match engine.run_pass(&user_id).await {
        Ok(report) => {
            for (scope, outcome) in &report.outcomes {
                match outcome {
                    Ok(summary) => {
                        let grants = summary
                            .grants
                            .map(|n| n.to_string())
                            .unwrap_or_else(|| "no".to_string());
                        match summary.roles {
                            Some(roles) => {
                                println!("✓ {}: {} grants, {} roles", scope, grants, roles)
                            }
                            None => println!("✓ {}: {} grants", scope, grants),
                        }
                    }
                    Err(err) => println!("✗ {}: {}", scope, err),
                }
            }

            if report.cascade_skipped {
                println!("⚠ Cascade skipped (primary scope fetch failed)");
            }

            logger.log(
                AuditAction::Resolve,
                Some(report.plan.primary),
                report.plan.org_id,
                report.fully_resolved(),
                Some(report.total_grants()),
            )?;

            let (store, session) = engine.into_parts();
            store.save(&RolesStore::snapshot_path())?;
            session.save()?;

            println!("✅ Cached {} scope(s)", store.entries().count());

            Ok(())
        }
        Err(err) => {
            logger.log(AuditAction::Resolve, None, None, false, None)?;
            Err(err.into())
        }
    }
}
