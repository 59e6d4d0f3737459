//! Ticket history: the sample buffer behind the chart.
//!
//! [`SampleBuffer`] is the fixed-capacity FIFO of "tickets remaining"
//! samples. [`TicketHistory`] wraps it with the derived sold-out flag and the
//! sequence gate that discards stale poll results: poll ticks are not
//! synchronized with each other, so two fetches can be in flight at once and
//! resolve out of order, and the latest observed value must win.

use std::collections::VecDeque;

/// Number of samples kept for the chart.
pub const HISTORY_CAPACITY: usize = 10;

/// Fixed-capacity FIFO of "tickets remaining" samples.
///
/// `push` evicts the oldest sample once the buffer is full. Pure data
/// structure; the caller is responsible for only pushing applied values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    samples: VecDeque<u32>,
    capacity: usize,
}

impl SampleBuffer {
    /// Create an empty buffer with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Create a buffer pre-filled with zeros, the seed state of the chart.
    pub fn zero_filled(capacity: usize) -> Self {
        let mut buffer = Self::new(capacity);
        for _ in 0..capacity {
            buffer.push(0);
        }
        buffer
    }

    /// Append a sample, evicting the front element first when at capacity.
    pub fn push(&mut self, sample: u32) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Current ordered contents, oldest first.
    pub fn snapshot(&self) -> Vec<u32> {
        self.samples.iter().copied().collect()
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of samples held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Chart-facing view of the remote pool: sample history, the most recently
/// applied value, and whether the pool is sold out.
///
/// Single-writer: only the app's event loop applies poll results. Results
/// arriving with a sequence number at or below the highest applied one are
/// discarded as stale.
#[derive(Debug, Clone)]
pub struct TicketHistory {
    buffer: SampleBuffer,
    remaining: u32,
    sold_out: bool,
    last_seq: u64,
}

impl Default for TicketHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketHistory {
    /// Create a zero-filled history at [`HISTORY_CAPACITY`].
    pub fn new() -> Self {
        Self {
            buffer: SampleBuffer::zero_filled(HISTORY_CAPACITY),
            remaining: 0,
            sold_out: false,
            last_seq: 0,
        }
    }

    /// Apply one poll result. Returns true if it was applied, false if it
    /// was discarded as stale. Sequence numbers start at 1.
    pub fn apply(&mut self, seq: u64, remaining: u32) -> bool {
        if seq <= self.last_seq {
            tracing::debug!(seq, last_seq = self.last_seq, "stale status result discarded");
            return false;
        }
        self.last_seq = seq;
        self.remaining = remaining;
        self.sold_out = remaining == 0;
        self.buffer.push(remaining);
        true
    }

    /// Most recently applied "tickets remaining" value.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether the last applied sample was exactly zero.
    pub fn sold_out(&self) -> bool {
        self.sold_out
    }

    /// Whether any poll result has been applied yet.
    pub fn has_data(&self) -> bool {
        self.last_seq > 0
    }

    /// Ordered sample snapshot for the chart, oldest first.
    pub fn snapshot(&self) -> Vec<u32> {
        self.buffer.snapshot()
    }
}
