//! Autoclose Sweeper

use crate::LifecycleManager;
use chrono::Utc;
use quake_model::time;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Recurring autoclose sweep.
///
/// A real scheduled task, not a bolt-on request path: it owns its cadence
/// and its shutdown handle, and the manual trigger endpoint merely runs the
/// same [`LifecycleManager::autoclose`] on demand.
pub struct Sweeper {
    lifecycle: LifecycleManager,
    interval: Duration,
    timeout: chrono::Duration,
}

/// Handle for stopping a spawned sweeper
pub struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signal the sweeper and wait for the task to finish
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

impl Sweeper {
    pub fn new(lifecycle: LifecycleManager, interval_secs: u64, timeout_secs: u64) -> Self {
        Self {
            lifecycle,
            interval: Duration::from_secs(interval_secs),
            timeout: chrono::Duration::seconds(timeout_secs as i64),
        }
    }

    /// Spawn the sweep loop; one sweep per interval until stopped
    pub fn spawn(self) -> SweeperHandle {
        let (shutdown, mut stopped) = watch::channel(false);
        info!(
            interval_secs = self.interval.as_secs(),
            timeout_secs = self.timeout.num_seconds(),
            "starting autoclose sweeper"
        );

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // interval fires immediately; skip the startup tick
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let now = Utc::now().with_timezone(&time::reference_offset());
                        match self.lifecycle.autoclose(now, self.timeout).await {
                            Ok(0) => {}
                            Ok(closed) => info!(closed, "sweep closed stale alerts"),
                            Err(e) => warn!(error = %e, "autoclose sweep failed"),
                        }
                    }
                    _ = stopped.changed() => {
                        debug!("sweeper shutting down");
                        break;
                    }
                }
            }
        });

        SweeperHandle { shutdown, task }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{engine_fixture, event, Fixture};
    use quake_model::{Region, SeverityTier};

    #[tokio::test(start_paused = true)]
    async fn test_sweep_closes_stale_alert_on_tick() {
        let Fixture {
            engine,
            lifecycle,
            store,
            ..
        } = engine_fixture(600).await;

        // fixture base time is far in the past relative to wall-clock now,
        // so any open alert is already stale for a short timeout
        engine
            .promote(&[event("S1", Region::Taipei, SeverityTier::Tier2, 0)])
            .await
            .unwrap();

        let handle = Sweeper::new(lifecycle, 1, 3600).spawn();
        tokio::time::sleep(Duration::from_secs(2)).await;
        handle.stop().await;

        assert!(store.open_alerts().await.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_the_loop() {
        let Fixture { lifecycle, .. } = engine_fixture(600).await;

        let handle = Sweeper::new(lifecycle, 1, 3600).spawn();
        handle.stop().await;
    }
}
