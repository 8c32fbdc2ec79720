use std::sync::Arc;
use std::time::Duration;

use auth::TokenService;
use tokio::task::JoinHandle;

/// Periodically drop revocation entries whose tokens have expired on their own.
///
/// The first sweep runs one full `period` after spawning.
pub fn spawn_revocation_sweeper(tokens: Arc<TokenService>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // interval() fires immediately; skip that tick
        interval.tick().await;

        loop {
            interval.tick().await;

            let removed = tokens.purge_expired();
            if removed > 0 {
                tracing::info!(
                    removed,
                    remaining = tokens.revoked_count(),
                    "Expired revocations purged"
                );
            }
        }
    })
}
