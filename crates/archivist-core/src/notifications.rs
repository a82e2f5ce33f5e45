//! Bounded queue of transient user-facing notices.
//!
//! The queue only tracks which notices are live. Timing (auto-dismissal) is
//! left to the frontend, which reads [`Level::display_ms`] to schedule it.

use std::collections::VecDeque;
use std::fmt;

/// Default number of notices kept before the oldest is evicted.
pub const DEFAULT_CAPACITY: usize = 5;

/// Identifier of a notice. Never reused within a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoticeId(pub u64);

impl fmt::Display for NoticeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    /// How long a notice of this level stays on screen, in milliseconds.
    pub fn display_ms(self) -> u32 {
        match self {
            Level::Info | Level::Success => 4_000,
            Level::Warning => 6_000,
            Level::Error => 10_000,
        }
    }

    /// Short lowercase name, used for CSS modifiers.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Success => "success",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

/// A single notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub level: Level,
    pub message: String,
}

/// FIFO of live notices with a fixed capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationQueue {
    notices: VecDeque<Notice>,
    capacity: usize,
    next_id: u64,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl NotificationQueue {
    /// Creates a queue holding at most `capacity` notices (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            notices: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 1,
        }
    }

    /// Appends a notice, evicting the oldest one if the queue is full.
    pub fn push(&mut self, level: Level, message: impl Into<String>) -> NoticeId {
        let id = NoticeId(self.next_id);
        self.next_id += 1;

        if self.notices.len() == self.capacity {
            self.notices.pop_front();
        }
        self.notices.push_back(Notice {
            id,
            level,
            message: message.into(),
        });
        id
    }

    /// Removes a notice. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: NoticeId) -> bool {
        match self.notices.iter().position(|n| n.id == id) {
            Some(pos) => {
                self.notices.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }

    /// Live notices, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
