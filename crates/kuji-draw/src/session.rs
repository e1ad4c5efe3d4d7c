//! The single-draw session state machine.
//!
//! `LotterySession` owns the lineup, its layout, the draw pool and the
//! draw history for one session. It moves between three states:
//!
//! ```text
//! ReadyToDraw --draw--> Revealing --acknowledge_reveal--> ReadyToDraw | Complete
//!      any state --reset--> ReadyToDraw | Complete
//! ```
//!
//! Every draw is committed to the store before anything in the session
//! changes, so a failed write leaves the session exactly as it was.

use std::fmt;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use kuji_core::{Entry, EntryId, EntryStore, SelectionLog, SelectionRecord};

use crate::config::SessionConfig;
use crate::error::{LotteryError, LotteryResult};
use crate::placement::{Layout, PlacementPlanner};
use crate::pool::DrawPool;
use crate::random::RandomSource;

/// Where a session is in its draw cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// Waiting for the next draw.
    ReadyToDraw,
    /// A result is on show; waiting for the host to return to the overview.
    Revealing,
    /// Nothing left to draw. Only `reset` is accepted.
    Complete,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadyToDraw => write!(f, "ready to draw"),
            Self::Revealing => write!(f, "revealing"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// Notification sent after every successful operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    /// The operation that caused the change.
    pub operation: &'static str,
    /// State before the operation.
    pub from: SessionState,
    /// State after the operation.
    pub to: SessionState,
}

/// Receives state change notifications.
pub trait SessionListener {
    /// Called once per successful `draw`, `acknowledge_reveal` or `reset`.
    fn on_state_change(&mut self, change: &StateChange);
}

impl<F: FnMut(&StateChange)> SessionListener for F {
    fn on_state_change(&mut self, change: &StateChange) {
        self(change)
    }
}

/// What a successful draw hands back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOutcome {
    /// The drawn entry.
    pub entry_id: EntryId,
    /// 1-based position of the entry in the lineup.
    pub display_index: usize,
    /// Lineup index of the entry, for looking up its placement.
    pub lineup_index: usize,
    /// The entry's name.
    pub name: String,
    /// Entries left in the pool after this draw.
    pub remaining: usize,
}

/// One draw session over the entries of a store.
pub struct LotterySession<S: EntryStore, R: RandomSource = StdRng> {
    store: S,
    rng: R,
    planner: PlacementPlanner,
    shuffle: bool,
    lineup: Vec<Entry>,
    layout: Layout,
    pool: DrawPool,
    history: SelectionLog,
    state: SessionState,
    listeners: Vec<Box<dyn SessionListener>>,
}

impl<S: EntryStore, R: RandomSource> fmt::Debug for LotterySession<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LotterySession")
            .field("state", &self.state)
            .field("lineup", &self.lineup.len())
            .field("pool", &self.pool.len())
            .field("history", &self.history.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<S: EntryStore> LotterySession<S, StdRng> {
    /// Start a session seeded from `config.seed`.
    pub fn start(store: S, config: SessionConfig) -> LotteryResult<Self> {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_random(store, config, rng)
    }
}

impl<S: EntryStore, R: RandomSource> LotterySession<S, R> {
    /// Start a session drawing from `rng`.
    ///
    /// The lineup is every entry the store reports as undrawn, shuffled if
    /// the config asks for it, and laid out once here.
    pub fn with_random(store: S, config: SessionConfig, rng: R) -> LotteryResult<Self> {
        let planner = PlacementPlanner::new(config.placement)?;
        let mut session = Self {
            store,
            rng,
            planner,
            shuffle: config.shuffle,
            lineup: Vec::new(),
            layout: Layout::default(),
            pool: DrawPool::default(),
            history: SelectionLog::new(),
            state: SessionState::Complete,
            listeners: Vec::new(),
        };
        let entries = session.store.list_entries()?;
        let history = session.store.list_selection_records()?;
        session.state = session.rebuild(entries, history);
        tracing::info!(
            entries = session.lineup.len(),
            forced = session.layout.forced_count(),
            state = %session.state,
            "session started"
        );
        Ok(session)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Entries taking part in this session, in lineup order.
    pub fn lineup(&self) -> &[Entry] {
        &self.lineup
    }

    /// Lineup entry at `index`.
    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.lineup.get(index)
    }

    /// Layout planned at session start, indexed like the lineup.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Lineup indices still drawable.
    pub fn pool(&self) -> &DrawPool {
        &self.pool
    }

    /// Number of entries left to draw.
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    /// Draws so far, oldest first, including those from earlier sessions
    /// since the last reset.
    pub fn history(&self) -> &SelectionLog {
        &self.history
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the store back, ending the session.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Register a state change listener.
    pub fn subscribe(&mut self, listener: impl SessionListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Draw one entry uniformly from the pool and commit it to the store.
    ///
    /// Only legal in [`SessionState::ReadyToDraw`]. On a store failure the
    /// pool, the lineup and the history are left untouched.
    pub fn draw(&mut self) -> LotteryResult<DrawOutcome> {
        self.expect_state("draw", SessionState::ReadyToDraw)?;
        let index = self
            .pool
            .pick(&mut self.rng)
            .ok_or(LotteryError::EmptyPool)?;

        let record = SelectionRecord::for_entry(&self.lineup[index], Utc::now());
        if let Err(e) = self.store.commit_selection(&record) {
            tracing::warn!(entry = %record.id, error = %e, "draw abandoned, store write failed");
            return Err(e.into());
        }

        self.pool.remove(index);
        self.lineup[index].mark_selected(record.selected_at);
        self.history.append(record);

        let entry = &self.lineup[index];
        let outcome = DrawOutcome {
            entry_id: entry.id,
            display_index: index + 1,
            lineup_index: index,
            name: entry.name.clone(),
            remaining: self.pool.len(),
        };
        tracing::info!(
            entry = %outcome.entry_id,
            display_index = outcome.display_index,
            remaining = outcome.remaining,
            "entry drawn"
        );
        self.transition("draw", SessionState::Revealing);
        Ok(outcome)
    }

    /// Leave the reveal and go back to the overview.
    ///
    /// Only legal in [`SessionState::Revealing`]. Moves to
    /// [`SessionState::Complete`] once the pool is empty.
    pub fn acknowledge_reveal(&mut self) -> LotteryResult<SessionState> {
        self.expect_state("acknowledge reveal", SessionState::Revealing)?;
        let next = self.idle_state();
        self.transition("acknowledge_reveal", next);
        Ok(next)
    }

    /// Start over. Legal in every state.
    ///
    /// With `keep_entries` every entry is undrawn and the history cleared;
    /// without it the store drops every entry as well. The lineup is
    /// rebuilt and laid out again from what the store then holds.
    ///
    /// The roster is read before the store is cleared, so once the clear
    /// succeeds the session can always follow it. Any failure leaves both
    /// the store and the session as they were.
    pub fn reset(&mut self, keep_entries: bool) -> LotteryResult<SessionState> {
        let entries = if keep_entries {
            let mut entries = self.store.list_entries()?;
            self.store.clear_selections()?;
            entries.iter_mut().for_each(Entry::clear_selection);
            entries
        } else {
            self.store.clear_all()?;
            Vec::new()
        };
        let next = self.rebuild(entries, SelectionLog::new());
        tracing::info!(keep_entries, entries = self.lineup.len(), "session reset");
        self.transition("reset", next);
        Ok(next)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn idle_state(&self) -> SessionState {
        if self.pool.is_empty() {
            SessionState::Complete
        } else {
            SessionState::ReadyToDraw
        }
    }

    fn expect_state(&self, operation: &'static str, expected: SessionState) -> LotteryResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(LotteryError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    fn transition(&mut self, operation: &'static str, to: SessionState) {
        let change = StateChange {
            operation,
            from: self.state,
            to,
        };
        self.state = to;
        tracing::debug!(operation, from = %change.from, to = %change.to, "session transition");
        for listener in &mut self.listeners {
            listener.on_state_change(&change);
        }
    }

    /// Replace lineup, layout, pool and history. Returns the idle state for
    /// the new pool; the current state is left for the caller to move.
    fn rebuild(&mut self, entries: Vec<Entry>, history: SelectionLog) -> SessionState {
        let mut lineup: Vec<Entry> = entries.into_iter().filter(|e| !e.selected).collect();
        if self.shuffle {
            shuffle(&mut lineup, &mut self.rng);
        }
        let layout = self.planner.plan(lineup.len(), &mut self.rng);

        self.pool = DrawPool::from_entries(&lineup);
        self.lineup = lineup;
        self.layout = layout;
        self.history = history;
        self.idle_state()
    }
}

/// Fisher-Yates.
fn shuffle<T>(items: &mut [T], rng: &mut impl RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1);
        items.swap(i, j);
    }
}
