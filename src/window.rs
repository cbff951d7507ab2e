/// The pagination window: a growing prefix over the current query result.
///
/// The state machine is `idle → loading → idle`. Growth is asynchronous from
/// the caller's point of view: `request_more` hands out a ticket, the caller
/// waits `GROW_DELAY`, then `commit`s it. A reset (new query tuple) bumps the
/// window's epoch so a stale ticket commits against nothing — the in-flight
/// growth is superseded, never applied to the fresh result.
use std::time::Duration;

/// Rows visible after a reset.
pub const INITIAL_WINDOW: usize = 30;
/// Rows added per committed growth.
pub const PAGE_SIZE: usize = 30;
/// Delay between a growth request and its commit.
pub const GROW_DELAY: Duration = Duration::from_millis(300);

/// Proof that a growth request was accepted. Valid only for the epoch it was
/// issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthTicket {
    epoch: u64,
}

#[derive(Debug)]
pub struct PaginationWindow {
    loaded: usize,
    loading: bool,
    epoch: u64,
}

impl Default for PaginationWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl PaginationWindow {
    pub fn new() -> Self {
        PaginationWindow {
            loaded: INITIAL_WINDOW,
            loading: false,
            epoch: 0,
        }
    }

    /// Rows currently loaded. Always at least `INITIAL_WINDOW`.
    pub fn loaded(&self) -> usize {
        self.loaded
    }

    /// True while a growth is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The visible prefix of a query result: `min(loaded, len)` rows.
    pub fn visible<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        &rows[..self.loaded.min(rows.len())]
    }

    /// Back to the initial window. Called whenever the query tuple changes;
    /// invalidates any ticket issued before the reset.
    pub fn reset(&mut self) {
        self.loaded = INITIAL_WINDOW;
        self.loading = false;
        self.epoch += 1;
    }

    /// Ask for one more page of a result with `total` rows. Returns `None`
    /// when a growth is already in flight or the window covers the result;
    /// otherwise enters the loading state and issues a ticket.
    pub fn request_more(&mut self, total: usize) -> Option<GrowthTicket> {
        if self.loading || self.loaded >= total {
            return None;
        }
        self.loading = true;
        Some(GrowthTicket { epoch: self.epoch })
    }

    /// Apply a growth after the delay has elapsed. Grows against the window's
    /// current state, capped at `total`. Returns false (and changes nothing)
    /// if a reset superseded the ticket.
    pub fn commit(&mut self, ticket: GrowthTicket, total: usize) -> bool {
        if ticket.epoch != self.epoch {
            return false;
        }
        self.loaded = (self.loaded + PAGE_SIZE).min(total).max(INITIAL_WINDOW);
        self.loading = false;
        true
    }
}
