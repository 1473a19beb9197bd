//! Lock-free handoff of transfer tables from the control thread to the
//! audio thread.
//!
//! Two `rtrb` rings connect a [`TablePublisher`] to a [`TableReader`]:
//!
//! ```text
//!   control thread                         audio thread
//!   ┌──────────────┐   fresh tables    ┌──────────────┐
//!   │  publisher   │ ────────────────→ │    reader    │
//!   │              │ ←──────────────── │  (current)   │
//!   └──────────────┘  retired tables   └──────────────┘
//! ```
//!
//! The publisher fills a whole table before pushing it, so the reader only
//! ever swaps complete tables in. Retired tables travel back to be refilled
//! or dropped on the control thread; the audio thread never allocates or
//! frees.

use log::{debug, warn};
use rtrb::{Consumer, Producer, PushError, RingBuffer};

use super::TransferTable;
use crate::curve::CurveEvaluator;

/// Result of [`TablePublisher::publish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The table is queued for the reader.
    Published,
    /// The ring is full; the table is held back and retried on the next
    /// publish or [`TablePublisher::flush`].
    Deferred,
}

/// Control-thread end of the table handoff.
pub struct TablePublisher {
    tx: Producer<Box<TransferTable>>,
    retired: Consumer<Box<TransferTable>>,
    pending: Option<Box<TransferTable>>,
    resolution: usize,
    generation: u64,
}

/// Audio-thread end of the table handoff.
pub struct TableReader {
    rx: Consumer<Box<TransferTable>>,
    retired: Producer<Box<TransferTable>>,
    current: Box<TransferTable>,
}

/// Create a connected publisher/reader pair.
///
/// `initial` is what the reader sees until the first publish. `capacity`
/// bounds how many fresh tables may wait for the reader at once.
pub fn table_channel(initial: TransferTable, capacity: usize) -> (TablePublisher, TableReader) {
    let capacity = capacity.max(1);
    let (tx, rx) = RingBuffer::new(capacity);
    // Every table in flight except the reader's current one fits here, so
    // the reader can always hand a table back.
    let (retired_tx, retired_rx) = RingBuffer::new(capacity + 2);

    let publisher = TablePublisher {
        tx,
        retired: retired_rx,
        pending: None,
        resolution: initial.resolution(),
        generation: initial.generation(),
    };
    let reader = TableReader {
        rx,
        retired: retired_tx,
        current: Box::new(initial),
    };

    (publisher, reader)
}

impl TablePublisher {
    /// Sample `evaluator` into a spare table and hand it to the reader.
    pub fn publish(&mut self, evaluator: &CurveEvaluator) -> PublishOutcome {
        let mut table = self.spare_table();
        table.rebuild_from(evaluator);
        self.generation += 1;
        table.set_generation(self.generation);
        debug!("publishing transfer table generation {}", self.generation);
        self.push(table)
    }

    /// Retry a table held back by a full ring.
    pub fn flush(&mut self) -> PublishOutcome {
        match self.pending.take() {
            Some(table) => self.push(table),
            None => PublishOutcome::Published,
        }
    }

    /// Whether a table is waiting for space in the ring.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Generation stamped on the most recent table built.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// A table to fill: the held-back one, a retired one, or a new one.
    ///
    /// New tables are only allocated when nothing can be reused, which caps
    /// the number of live tables at the ring capacity plus two.
    fn spare_table(&mut self) -> Box<TransferTable> {
        if let Some(table) = self.pending.take() {
            return table;
        }

        let mut spare = None;
        while let Ok(table) = self.retired.pop() {
            if table.resolution() == self.resolution && spare.is_none() {
                spare = Some(table);
            }
        }

        spare.unwrap_or_else(|| {
            let mut table = TransferTable::with_resolution(self.resolution)
                .unwrap_or_else(|_| unreachable!("resolution was checked when the table was made"));
            table.set_generation(self.generation);
            Box::new(table)
        })
    }

    fn push(&mut self, table: Box<TransferTable>) -> PublishOutcome {
        match self.tx.push(table) {
            Ok(()) => PublishOutcome::Published,
            Err(PushError::Full(table)) => {
                warn!(
                    "table ring full, holding generation {} back",
                    table.generation()
                );
                self.pending = Some(table);
                PublishOutcome::Deferred
            }
        }
    }
}

impl TableReader {
    /// Swap in the newest published table, if any.
    ///
    /// Call once per audio block. Never allocates, frees or blocks.
    /// Returns whether the table changed.
    #[inline]
    pub fn refresh(&mut self) -> bool {
        let mut changed = false;
        while let Ok(next) = self.rx.pop() {
            let previous = std::mem::replace(&mut self.current, next);
            let handed_back = self.retired.push(previous);
            debug_assert!(handed_back.is_ok(), "retired ring overflowed");
            changed = true;
        }
        changed
    }

    /// Interpolated value of the current table at `x`.
    #[inline]
    pub fn lookup(&self, x: f32) -> f32 {
        self.current.lookup(x)
    }

    pub fn table(&self) -> &TransferTable {
        &self.current
    }

    pub fn generation(&self) -> u64 {
        self.current.generation()
    }
}
