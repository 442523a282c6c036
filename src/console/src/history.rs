//! Command history ring.

/// Number of lines kept.
pub const HISTORY_CAPACITY: usize = 10;

/// Longest line kept, in bytes. Longer lines are truncated.
pub const LINE_CAPACITY: usize = 255;

/// Fixed-capacity circular buffer of submitted lines.
///
/// Lines are never removed; once the ring is full the oldest slot is
/// overwritten.
pub struct History {
    lines: [[u8; LINE_CAPACITY]; HISTORY_CAPACITY],
    lengths: [usize; HISTORY_CAPACITY],
    /// Lines ever pushed. Slot of the next push is `count % HISTORY_CAPACITY`.
    count: usize,
}

impl History {
    /// Creates an empty history.
    pub const fn new() -> Self {
        Self {
            lines: [[0; LINE_CAPACITY]; HISTORY_CAPACITY],
            lengths: [0; HISTORY_CAPACITY],
            count: 0,
        }
    }

    /// Appends a line. Empty lines are skipped.
    pub fn push(&mut self, line: &[u8]) {
        if line.is_empty() {
            return;
        }
        let slot = self.count % HISTORY_CAPACITY;
        let len = line.len().min(LINE_CAPACITY);
        self.lines[slot][..len].copy_from_slice(&line[..len]);
        self.lengths[slot] = len;
        self.count += 1;
    }

    /// Number of lines currently retrievable.
    pub fn len(&self) -> usize {
        self.count.min(HISTORY_CAPACITY)
    }

    /// Whether nothing has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Lines ever pushed, including overwritten ones.
    pub fn count(&self) -> usize {
        self.count
    }

    /// The `back`-th most recent line; `1` is the newest.
    pub fn recent(&self, back: usize) -> Option<&[u8]> {
        if back == 0 || back > self.len() {
            return None;
        }
        let slot = (self.count - back) % HISTORY_CAPACITY;
        Some(&self.lines[slot][..self.lengths[slot]])
    }

    /// Retrievable lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (1..=self.len()).rev().filter_map(move |back| self.recent(back))
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_recent() {
        let mut history = History::new();
        history.push(b"ls");
        history.push(b"");
        history.push(b"cat notes");

        assert_eq!(history.len(), 2);
        assert_eq!(history.recent(1), Some(&b"cat notes"[..]));
        assert_eq!(history.recent(2), Some(&b"ls"[..]));
        assert_eq!(history.recent(0), None);
        assert_eq!(history.recent(3), None);
    }

    #[test]
    fn test_ring_overwrites_oldest() {
        let mut history = History::new();
        for i in 0..HISTORY_CAPACITY + 3 {
            history.push(format!("cmd{}", i).as_bytes());
        }

        assert_eq!(history.count(), HISTORY_CAPACITY + 3);
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.recent(1), Some(&b"cmd12"[..]));
        assert_eq!(history.recent(HISTORY_CAPACITY), Some(&b"cmd3"[..]));

        let oldest_first: Vec<&[u8]> = history.iter().collect();
        assert_eq!(oldest_first.first(), Some(&&b"cmd3"[..]));
        assert_eq!(oldest_first.last(), Some(&&b"cmd12"[..]));
    }

    #[test]
    fn test_long_line_is_truncated() {
        let mut history = History::new();
        history.push(&[b'a'; LINE_CAPACITY + 20]);
        assert_eq!(history.recent(1).map(|l| l.len()), Some(LINE_CAPACITY));
    }
}
