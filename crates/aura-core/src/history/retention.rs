//! Retention bounds for stored conversations.

use aura_types::llm::Message;

/// Bounds the size of a stored transcript.
///
/// Growth is unbounded until `ceiling` is crossed, then the transcript is
/// cut back to the `floor` most recent messages in one step. Trimming in
/// blocks keeps appends cheap and leaves room above the prompt window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    ceiling: usize,
    floor: usize,
}

impl RetentionPolicy {
    /// Policy with the given bounds. A floor above the ceiling is clamped
    /// down to it, so `enforce` never grows a transcript.
    pub fn new(ceiling: usize, floor: usize) -> Self {
        Self {
            ceiling,
            floor: floor.min(ceiling),
        }
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    pub fn floor(&self) -> usize {
        self.floor
    }

    /// Trim `history` in place if it has grown past the ceiling.
    ///
    /// Keeps the most recent `floor` messages; older entries are dropped.
    /// At or under the ceiling this is a no-op.
    pub fn enforce(&self, history: &mut Vec<Message>) {
        if history.len() > self.ceiling {
            let excess = history.len() - self.floor;
            history.drain(..excess);
        }
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::new(50, 30)
    }
}
