//! Debounced fetch coordinator for the dashboard filters.
//!
//! Filter changes go through a small state machine:
//!
//! ```text
//! Idle --change--> Debouncing --quiet period--> Fetching --response--> Idle
//!                    ^    |
//!                    +----+ change (timer restarts)
//! ```
//!
//! The coordinator runs as one task that owns the criteria, the debounce
//! timer and the fetch sequence counter. Each fetch runs on its own task and
//! reports back tagged with its sequence number; a response older than the
//! last applied one is dropped. In-flight fetches are never cancelled.

use crate::core::notify::Notifier;
use crate::models::filter::FilterCriteria;
use crate::models::movie::Movie;
use crate::services::api::MovieSource;
use crate::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Default quiet period before a filter change is sent.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Message shown after a successful fetch.
pub const FETCH_SUCCESS: &str = "Movies Fetched Successfully";

/// Coordinator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing pending.
    Idle,
    /// Waiting for the criteria to settle.
    Debouncing,
    /// At least one request is in flight.
    Fetching,
}

/// Shared read-only movie collection.
pub type Collection = Arc<Vec<Movie>>;

/// Phase plus the number of criteria updates the coordinator has taken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Status {
    phase: Phase,
    updates_seen: u64,
}

enum Command {
    Update(FilterCriteria),
    Shutdown,
}

struct FetchOutcome {
    seq: u64,
    result: Result<Vec<Movie>>,
}

/// Handle to a running coordinator.
///
/// Dropping the handle stops the coordinator and cancels a pending timer.
#[derive(Debug)]
pub struct FetchCoordinator {
    commands: mpsc::UnboundedSender<Command>,
    criteria: FilterCriteria,
    updates_sent: u64,
    collection: watch::Receiver<Collection>,
    status: watch::Receiver<Status>,
    task: Option<JoinHandle<()>>,
}

impl FetchCoordinator {
    /// Start a coordinator with the default debounce window.
    ///
    /// The initial criteria count as a change, so a first fetch is issued
    /// once the window elapses.
    pub fn spawn(
        source: Arc<dyn MovieSource>,
        initial: FilterCriteria,
        notifier: Notifier,
    ) -> Self {
        Self::with_debounce(source, initial, notifier, DEFAULT_DEBOUNCE)
    }

    /// Start a coordinator with a custom debounce window.
    pub fn with_debounce(
        source: Arc<dyn MovieSource>,
        initial: FilterCriteria,
        notifier: Notifier,
        debounce: Duration,
    ) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (collection_tx, collection) = watch::channel(Collection::default());
        let (status_tx, status) = watch::channel(Status {
            phase: Phase::Debouncing,
            updates_seen: 0,
        });

        let actor = Actor {
            source,
            notifier,
            debounce,
            criteria: initial.clone(),
            deadline: Some(Instant::now() + debounce),
            next_seq: 0,
            last_applied: 0,
            in_flight: 0,
            updates_seen: 0,
            collection_tx,
            status_tx,
        };
        let task = tokio::spawn(actor.run(command_rx));

        Self {
            commands,
            criteria: initial,
            updates_sent: 0,
            collection,
            status,
            task: Some(task),
        }
    }

    /// Criteria as last set through this handle.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replace the criteria and restart the debounce window.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria.clone();
        self.updates_sent += 1;
        let _ = self.commands.send(Command::Update(criteria));
    }

    /// Mutate the criteria in place and restart the debounce window.
    pub fn update(&mut self, change: impl FnOnce(&mut FilterCriteria)) {
        let mut criteria = self.criteria.clone();
        change(&mut criteria);
        self.set_criteria(criteria);
    }

    /// Current collection.
    pub fn collection(&self) -> Collection {
        Arc::clone(&self.collection.borrow())
    }

    /// Receiver notified whenever the collection is replaced.
    pub fn subscribe(&self) -> watch::Receiver<Collection> {
        self.collection.clone()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.status.borrow().phase
    }

    /// Wait until every change sent through this handle has been fetched
    /// and nothing is pending or in flight.
    pub async fn wait_idle(&self) {
        let sent = self.updates_sent;
        let mut status = self.status.clone();
        let _ = status
            .wait_for(|s| s.phase == Phase::Idle && s.updates_seen >= sent)
            .await;
    }

    /// Stop the coordinator. A pending timer never fires afterwards.
    pub async fn shutdown(mut self) {
        let _ = self.commands.send(Command::Shutdown);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for FetchCoordinator {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

struct Actor {
    source: Arc<dyn MovieSource>,
    notifier: Notifier,
    debounce: Duration,
    criteria: FilterCriteria,
    deadline: Option<Instant>,
    next_seq: u64,
    last_applied: u64,
    in_flight: usize,
    updates_seen: u64,
    collection_tx: watch::Sender<Collection>,
    status_tx: watch::Sender<Status>,
}

impl Actor {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        let (outcome_tx, mut outcomes) = mpsc::unbounded_channel::<FetchOutcome>();

        loop {
            let deadline = self.deadline;
            tokio::select! {
                cmd = commands.recv() => match cmd {
                    Some(Command::Update(criteria)) => {
                        self.criteria = criteria;
                        self.updates_seen += 1;
                        self.deadline = Some(Instant::now() + self.debounce);
                        tracing::debug!("Filter changed, debounce restarted");
                    }
                    Some(Command::Shutdown) | None => break,
                },
                _ = debounce_elapsed(deadline), if deadline.is_some() => {
                    self.deadline = None;
                    self.issue_fetch(&outcome_tx);
                }
                Some(outcome) = outcomes.recv() => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    self.apply(outcome);
                }
            }
            self.publish_status();
        }

        tracing::debug!("Coordinator stopped with {} request(s) in flight", self.in_flight);
    }

    fn issue_fetch(&mut self, outcome_tx: &mpsc::UnboundedSender<FetchOutcome>) {
        self.next_seq += 1;
        self.in_flight += 1;

        let seq = self.next_seq;
        let query = self.criteria.to_query();
        let source = Arc::clone(&self.source);
        let outcome_tx = outcome_tx.clone();

        tracing::debug!("Issuing fetch #{} with {:?}", seq, query);
        tokio::spawn(async move {
            let result = source.filter_movies(&query).await;
            let _ = outcome_tx.send(FetchOutcome { seq, result });
        });
    }

    fn apply(&mut self, outcome: FetchOutcome) {
        if outcome.seq <= self.last_applied {
            tracing::debug!(
                "Dropping stale response #{} (already applied #{})",
                outcome.seq,
                self.last_applied
            );
            return;
        }

        match outcome.result {
            Ok(movies) => {
                self.last_applied = outcome.seq;
                tracing::debug!("Fetch #{} returned {} movies", outcome.seq, movies.len());
                self.collection_tx.send_replace(Arc::new(movies));
                self.notifier.success(FETCH_SUCCESS);
            }
            Err(e) => {
                // The previous collection stays; older responses are now stale.
                self.last_applied = outcome.seq;
                self.notifier.error(e.to_string());
            }
        }
    }

    fn publish_status(&self) {
        let phase = if self.deadline.is_some() {
            Phase::Debouncing
        } else if self.in_flight > 0 {
            Phase::Fetching
        } else {
            Phase::Idle
        };
        let status = Status {
            phase,
            updates_seen: self.updates_seen,
        };
        self.status_tx.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
    }
}

async fn debounce_elapsed(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
