//! Periodic removal of expired sessions.
//!
//! Reads already ignore expired sessions, so this job only bounds memory.
//! Runs on a fixed interval using `tokio::time::interval`.

use std::time::Duration;

use portal_db::repositories::SessionRepo;
use portal_db::DbPool;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Run the session sweep loop until `cancel` is triggered.
pub async fn run(pool: DbPool, interval: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = interval.as_secs(), "Session sweep started");

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; nothing can have expired yet.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session sweep stopping");
                break;
            }
            _ = ticker.tick() => {
                let removed = SessionRepo::cleanup_expired(&pool).await;
                if removed > 0 {
                    tracing::info!(removed, "Session sweep: purged expired sessions");
                } else {
                    tracing::debug!("Session sweep: nothing to purge");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use portal_db::models::session::CreateSession;

    use super::*;

    #[tokio::test]
    async fn sweeps_expired_and_stops_on_cancel() {
        let pool = portal_db::create_pool();
        SessionRepo::create(
            &pool,
            &CreateSession {
                user_id: 1,
                ttl: chrono::Duration::milliseconds(1),
            },
        )
        .await;
        let live = SessionRepo::create(
            &pool,
            &CreateSession {
                user_id: 2,
                ttl: chrono::Duration::hours(1),
            },
        )
        .await;

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(
            pool.clone(),
            Duration::from_millis(20),
            cancel.clone(),
        ));

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(SessionRepo::count(&pool).await, 1);
        assert!(SessionRepo::find_active(&pool, &live.id).await.is_some());

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweep should stop after cancel")
            .unwrap();
    }
}
