use std::sync::Arc;

use lobby::models::ThreadFilter;
use lobby::{seed, Config, DiscussionStore, FileIdentityStore, IdentityService};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Load .env automatically only in debug builds to reduce manual setup overhead.
    if cfg!(debug_assertions) {
        let _ = dotenv::dotenv();
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let cfg = Config::from_env();
    info!("Bootstrapping lobby (identity file: {})", cfg.identity_path().display());

    let identities = IdentityService::new(Arc::new(FileIdentityStore::new(cfg.identity_path())));
    let me = identities.get_or_create_identity();
    if identities.is_ephemeral() {
        info!("Identity {} is session-only", me.display_name);
    }

    let mut store = DiscussionStore::new();
    if cfg.seed_demo {
        let ids = seed::seed_demo(&mut store)?;
        info!("Seeded {} demo threads", ids.len());
    }

    for thread in store.list_threads(&ThreadFilter::all()) {
        info!(
            "[{}] {} ({} messages, last active {})",
            thread.category, thread.title, thread.message_count, thread.last_activity_at
        );
    }
    info!("Ready as {} ({})", me.display_name, me.color);
    Ok(())
}
