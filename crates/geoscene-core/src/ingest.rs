//! Ingestion boundary between asynchronous source parsers and the scene
//! engine.
//!
//! Parses of source files may finish out of order. Every load is started with
//! a [`LoadTicket`] carrying a monotonically increasing generation; committing
//! a result whose generation is older than the newest committed one is
//! rejected, so a stale parse can never replace a newer tree.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::geo::GeoNode;

/// Handle identifying one started load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    /// The generation number of this load.
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Outcome of committing a parsed tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The tree replaced the held source.
    Accepted,
    /// A newer load already committed; the tree was discarded.
    Stale,
}

/// Holds the most recent geographic tree handed over by the ingestion layer.
#[derive(Debug, Default)]
pub struct SourceSlot {
    issued: u64,
    committed: u64,
    tree: Option<Arc<GeoNode>>,
}

impl SourceSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new load and returns its ticket.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        debug!("Starting source load generation {}", self.issued);
        LoadTicket(self.issued)
    }

    /// Commits a parsed tree for the given ticket.
    ///
    /// Returns [`CommitOutcome::Stale`] if a load started later has already
    /// been committed.
    pub fn commit(&mut self, ticket: LoadTicket, tree: GeoNode) -> CommitOutcome {
        if ticket.0 <= self.committed {
            warn!(
                "Discarding stale source load generation {} (newest committed is {})",
                ticket.0, self.committed
            );
            return CommitOutcome::Stale;
        }
        self.committed = ticket.0;
        self.tree = Some(Arc::new(tree));
        debug!("Committed source load generation {}", ticket.0);
        CommitOutcome::Accepted
    }

    /// The currently held tree, if any load has been committed.
    pub fn current(&self) -> Option<&Arc<GeoNode>> {
        self.tree.as_ref()
    }

    /// Generation of the currently held tree (0 when nothing is held).
    pub fn generation(&self) -> u64 {
        self.committed
    }

    /// Whether a load started after the committed one is still outstanding.
    pub fn is_loading(&self) -> bool {
        self.issued > self.committed
    }
}
