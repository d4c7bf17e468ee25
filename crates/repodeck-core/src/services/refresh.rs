//! Background refresh coordination.
//!
//! The [`RefreshCoordinator`] reconciles each user's tracked repositories
//! with the external source. A sweep refreshes every record the user owns;
//! at most one sweep per user runs at a time, enforced by an in-flight
//! marker set. Individual fetch failures are absorbed and logged so one
//! bad repository never aborts the rest of a sweep.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::Utc;
use futures_util::future::join_all;
use tracing::{debug, error, info, warn};

use crate::domain::{TrackedRepo, parse_source_path};
use crate::ports::{CoreError, RepoStore, SourceClient};

/// Tuning knobs for the coordinator.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Minimum time between two sweeps for the same user, measured from
    /// sweep completion. Repeated list calls inside this window do not
    /// re-trigger a sweep. `Duration::ZERO` disables the cool-down.
    pub min_sweep_interval: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            min_sweep_interval: Duration::from_secs(30),
        }
    }
}

/// Coordinates background metadata refreshes, one sweep per user at a time.
pub struct RefreshCoordinator {
    repos: Arc<dyn RepoStore>,
    source: Arc<dyn SourceClient>,
    config: RefreshConfig,
    /// Users with a sweep currently running. Guarded by a plain mutex;
    /// every critical section is lock-free of await points.
    in_flight: Mutex<HashSet<i64>>,
    /// Completion times of the most recent sweep per user, for the
    /// cool-down check.
    last_completed: Mutex<HashMap<i64, Instant>>,
}

impl RefreshCoordinator {
    /// Create a coordinator over the given store and source.
    pub fn new(
        repos: Arc<dyn RepoStore>,
        source: Arc<dyn SourceClient>,
        config: RefreshConfig,
    ) -> Self {
        Self {
            repos,
            source,
            config,
            in_flight: Mutex::new(HashSet::new()),
            last_completed: Mutex::new(HashMap::new()),
        }
    }

    /// Whether a sweep for the user is currently running.
    pub fn is_in_flight(&self, user_id: i64) -> bool {
        self.in_flight.lock().expect("in-flight lock").contains(&user_id)
    }

    /// Launch a background sweep for all of the user's repositories.
    ///
    /// Returns `true` if a sweep was launched. The call is a no-op (and
    /// returns `false`) when a sweep for the user is already in flight or
    /// one finished within the configured cool-down window. The caller
    /// never waits on the sweep; the in-flight marker is cleared when all
    /// per-record attempts have settled, even if loading the record list
    /// fails or the sweep task panics.
    pub fn trigger_sweep(self: &Arc<Self>, user_id: i64) -> bool {
        {
            let mut in_flight = self.in_flight.lock().expect("in-flight lock");
            if in_flight.contains(&user_id) {
                debug!(user_id, "Repository refresh already in progress");
                return false;
            }

            let recently_swept = self
                .last_completed
                .lock()
                .expect("last-completed lock")
                .get(&user_id)
                .is_some_and(|done| done.elapsed() < self.config.min_sweep_interval);
            if recently_swept {
                debug!(user_id, "Skipping sweep, completed one recently");
                return false;
            }

            in_flight.insert(user_id);
        }

        let this = Arc::clone(self);
        tokio::spawn(async move {
            let _guard = SweepGuard {
                coordinator: Arc::clone(&this),
                user_id,
            };
            this.sweep(user_id).await;
        });

        true
    }

    /// One pass over all of the user's records. Per-record failures are
    /// absorbed inside `refresh_one`; a failed list load just ends the
    /// sweep (the guard still clears the marker).
    async fn sweep(&self, user_id: i64) {
        let records = match self.repos.list_for_user(user_id).await {
            Ok(records) => records,
            Err(e) => {
                error!(user_id, error = %e, "Failed to load repositories for refresh");
                return;
            }
        };

        debug!(user_id, count = records.len(), "Starting refresh sweep");
        join_all(records.iter().map(|repo| self.refresh_one(repo))).await;
    }

    /// Refresh a single record, absorbing any failure.
    ///
    /// On a fetch or persist error the record keeps its last known-good
    /// state and `last_refreshed` is not advanced.
    pub async fn refresh_one(&self, repo: &TrackedRepo) {
        if let Err(e) = self.try_refresh(repo).await {
            warn!(
                repo_id = repo.id,
                full_name = %repo.full_name,
                error = %e,
                "Failed to refresh repository"
            );
        }
    }

    async fn try_refresh(&self, repo: &TrackedRepo) -> Result<(), CoreError> {
        let path = parse_source_path(&repo.full_name)?;
        let snapshot = self.source.fetch(&path.owner, &path.name).await?;
        self.repos
            .apply_refresh(repo.id, &snapshot, Utc::now())
            .await?;
        info!(repo_id = repo.id, full_name = %repo.full_name, "Updated repository");
        Ok(())
    }

    /// Refresh one record on behalf of an explicit user request.
    ///
    /// The ownership check is strict: a missing record, or one owned by a
    /// different user, fails with `StoreError::NotFound`. The fetch itself
    /// is absorbed the same way sweeps absorb it; the result only says the
    /// refresh was attempted, not that the data is fresh.
    pub async fn refresh_single(&self, user_id: i64, repo_id: i64) -> Result<(), CoreError> {
        let repo = self.repos.find_for_user(repo_id, user_id).await?;
        self.refresh_one(&repo).await;
        Ok(())
    }
}

/// Clears the in-flight marker when a sweep settles, success or failure.
/// Dropped even if the sweep task panics, so the marker can never leak.
struct SweepGuard {
    coordinator: Arc<RefreshCoordinator>,
    user_id: i64,
}

impl Drop for SweepGuard {
    fn drop(&mut self) {
        self.coordinator
            .in_flight
            .lock()
            .expect("in-flight lock")
            .remove(&self.user_id);
        self.coordinator
            .last_completed
            .lock()
            .expect("last-completed lock")
            .insert(self.user_id, Instant::now());
    }
}
