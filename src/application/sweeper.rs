//! AutoDeleteSweeper - Background service that removes expired ideas.
//!
//! Ideas may carry an `auto_delete_after_days` window. On every tick the
//! sweeper loads those ideas, computes whole days elapsed since creation
//! and hard-deletes the ones whose window has passed. Each expired idea is
//! reloaded and checked again right before its delete.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `interval` | 1h | Time between passes |
//!
//! ## Failure handling
//!
//! A failure to delete one idea is logged and the pass continues. A failure
//! to scan is logged and retried on the next tick; the loop itself only
//! stops on shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::domain::foundation::DomainError;
use crate::ports::{Clock, IdeaRepository};

/// Configuration for the AutoDeleteSweeper service.
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// Time between sweep passes.
    pub interval: Duration,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3600),
        }
    }
}

impl SweeperConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Outcome of one sweep pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Ideas with an auto-delete window that were examined.
    pub scanned: usize,
    pub deleted: usize,
    pub failed: usize,
}

/// Background service that deletes ideas past their retention window.
pub struct AutoDeleteSweeper {
    repository: Arc<dyn IdeaRepository>,
    clock: Arc<dyn Clock>,
    config: SweeperConfig,
}

impl AutoDeleteSweeper {
    pub fn new(
        repository: Arc<dyn IdeaRepository>,
        clock: Arc<dyn Clock>,
        config: SweeperConfig,
    ) -> Self {
        Self {
            repository,
            clock,
            config,
        }
    }

    /// Run the sweep loop until the shutdown signal is received.
    ///
    /// The first pass runs immediately. A pass in progress when shutdown
    /// arrives is finished before returning.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.interval);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        tracing::info!(interval_secs = self.config.interval.as_secs(), "auto-delete sweeper started");

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("auto-delete sweeper stopped");
                        return;
                    }
                }

                _ = interval.tick() => {
                    if let Err(e) = self.sweep_once().await {
                        tracing::error!(error = %e, "auto-delete sweep failed");
                    }
                }
            }
        }
    }

    /// Run exactly one pass.
    pub async fn sweep_once(&self) -> Result<SweepReport, DomainError> {
        let now = self.clock.now();
        let candidates = self.repository.find_with_auto_delete().await?;
        let mut report = SweepReport {
            scanned: candidates.len(),
            ..Default::default()
        };

        for idea in candidates.iter().filter(|idea| idea.is_expired_at(&now)) {
            // The owner may have changed the window since the scan.
            match self.repository.find_by_id(idea.id()).await {
                Ok(Some(current)) if current.is_expired_at(&now) => {}
                Ok(_) => {
                    tracing::debug!(idea_id = %idea.id(), "idea no longer expired, skipping");
                    continue;
                }
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(idea_id = %idea.id(), error = %e, "failed to reload expired idea");
                    continue;
                }
            }

            match self.repository.delete(idea.id()).await {
                Ok(()) => {
                    report.deleted += 1;
                    tracing::debug!(idea_id = %idea.id(), "expired idea deleted");
                }
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(idea_id = %idea.id(), error = %e, "failed to delete expired idea");
                }
            }
        }

        tracing::info!(
            scanned = report.scanned,
            deleted = report.deleted,
            failed = report.failed,
            "auto-delete sweep finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::memory::InMemoryIdeaStore;
    use crate::domain::foundation::{IdeaId, Timestamp, UserId};
    use crate::domain::idea::{Idea, IdeaDraft, IdeaPatch};
    use async_trait::async_trait;

    fn idea_with_window(days: Option<i64>) -> Idea {
        Idea::create(
            IdeaId::new(),
            UserId::new("owner").unwrap(),
            IdeaDraft {
                problem: "P".to_string(),
                solution: "S".to_string(),
                stage: Some("Concept".to_string()),
                auto_delete_after_days: days,
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn sweeper(store: Arc<dyn IdeaRepository>, clock: Arc<FixedClock>) -> AutoDeleteSweeper {
        AutoDeleteSweeper::new(store, clock, SweeperConfig::default())
    }

    #[tokio::test]
    async fn deletes_idea_two_days_past_one_day_window() {
        let store = Arc::new(InMemoryIdeaStore::new());
        let expiring = idea_with_window(Some(1));
        let permanent = idea_with_window(None);
        store.save(&expiring).await.unwrap();
        store.save(&permanent).await.unwrap();

        let clock = Arc::new(FixedClock::new(Timestamp::now()));
        clock.advance_days(2);

        let report = sweeper(store.clone(), clock).sweep_once().await.unwrap();

        assert_eq!(
            report,
            SweepReport {
                scanned: 1,
                deleted: 1,
                failed: 0
            }
        );
        assert!(store.find_by_id(expiring.id()).await.unwrap().is_none());
        assert!(store.find_by_id(permanent.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn keeps_idea_inside_its_window() {
        let store = Arc::new(InMemoryIdeaStore::new());
        let idea = idea_with_window(Some(3));
        store.save(&idea).await.unwrap();

        let clock = Arc::new(FixedClock::new(Timestamp::now()));
        clock.advance_days(2);

        let report = sweeper(store.clone(), clock).sweep_once().await.unwrap();
        assert_eq!(report.deleted, 0);
        assert_eq!(store.len().await, 1);
    }

    struct FlakyDeletes {
        inner: InMemoryIdeaStore,
        poisoned: IdeaId,
    }

    #[async_trait]
    impl IdeaRepository for FlakyDeletes {
        async fn save(&self, idea: &Idea) -> Result<(), DomainError> {
            self.inner.save(idea).await
        }
        async fn update(&self, idea: &Idea) -> Result<(), DomainError> {
            self.inner.update(idea).await
        }
        async fn find_by_id(&self, id: &IdeaId) -> Result<Option<Idea>, DomainError> {
            self.inner.find_by_id(id).await
        }
        async fn delete(&self, id: &IdeaId) -> Result<(), DomainError> {
            if id == &self.poisoned {
                return Err(DomainError::database("Simulated delete failure"));
            }
            self.inner.delete(id).await
        }
        async fn find_with_auto_delete(&self) -> Result<Vec<Idea>, DomainError> {
            self.inner.find_with_auto_delete().await
        }
    }

    #[tokio::test]
    async fn one_failed_delete_does_not_stop_the_pass() {
        let bad = idea_with_window(Some(1));
        let good = idea_with_window(Some(1));
        let repo = Arc::new(FlakyDeletes {
            inner: InMemoryIdeaStore::new(),
            poisoned: *bad.id(),
        });
        repo.save(&bad).await.unwrap();
        repo.save(&good).await.unwrap();

        let clock = Arc::new(FixedClock::new(Timestamp::now()));
        clock.advance_days(5);

        let report = sweeper(repo.clone(), clock).sweep_once().await.unwrap();

        assert_eq!(report.deleted, 1);
        assert_eq!(report.failed, 1);
        assert!(repo.find_by_id(good.id()).await.unwrap().is_none());
        assert!(repo.find_by_id(bad.id()).await.unwrap().is_some());
    }

    /// Serves a scan result captured before the stored idea changed.
    struct StaleScan {
        inner: InMemoryIdeaStore,
        snapshot: Vec<Idea>,
    }

    #[async_trait]
    impl IdeaRepository for StaleScan {
        async fn save(&self, idea: &Idea) -> Result<(), DomainError> {
            self.inner.save(idea).await
        }
        async fn update(&self, idea: &Idea) -> Result<(), DomainError> {
            self.inner.update(idea).await
        }
        async fn find_by_id(&self, id: &IdeaId) -> Result<Option<Idea>, DomainError> {
            self.inner.find_by_id(id).await
        }
        async fn delete(&self, id: &IdeaId) -> Result<(), DomainError> {
            self.inner.delete(id).await
        }
        async fn find_with_auto_delete(&self) -> Result<Vec<Idea>, DomainError> {
            Ok(self.snapshot.clone())
        }
    }

    #[tokio::test]
    async fn window_cleared_after_scan_keeps_the_idea() {
        let mut idea = idea_with_window(Some(1));
        let snapshot = vec![idea.clone()];
        idea.update(
            &UserId::new("owner").unwrap(),
            IdeaPatch {
                auto_delete_after_days: Some(None),
                ..Default::default()
            },
        )
        .unwrap();

        let repo = Arc::new(StaleScan {
            inner: InMemoryIdeaStore::new(),
            snapshot,
        });
        repo.save(&idea).await.unwrap();

        let clock = Arc::new(FixedClock::new(Timestamp::now()));
        clock.advance_days(5);

        let report = sweeper(repo.clone(), clock).sweep_once().await.unwrap();

        assert_eq!(report.deleted, 0);
        assert_eq!(report.failed, 0);
        assert!(repo.find_by_id(idea.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn run_stops_on_shutdown() {
        let store = Arc::new(InMemoryIdeaStore::new());
        let clock = Arc::new(FixedClock::new(Timestamp::now()));
        let sweeper = Arc::new(AutoDeleteSweeper::new(
            store,
            clock,
            SweeperConfig::default().with_interval(Duration::from_millis(10)),
        ));
        let (tx, rx) = watch::channel(false);

        let task = tokio::spawn({
            let sweeper = sweeper.clone();
            async move { sweeper.run(rx).await }
        });
        tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("sweeper did not stop")
            .unwrap();
    }
}
