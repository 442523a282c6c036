//! Interrupt-to-foreground key handoff.
//!
//! The keyboard interrupt handler posts one [`KeyEvent`] per scancode and
//! the foreground loop spins until it can take one. The default mailbox
//! holds a single event: posting while one is pending overwrites it, so
//! keys typed faster than the foreground drains them are lost.
//! [`Mailbox::with_capacity`] trades that for a ring that drops the oldest
//! event on overflow.

use crossbeam_queue::ArrayQueue;
use edgeos_hal::KeySource;

use crate::keyboard::Decoder;

/// What the interrupt handler saw for one scancode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Decoded character, 0 if the scancode produced none.
    pub character: u8,
    /// The raw scancode.
    pub scancode: u8,
}

impl KeyEvent {
    /// Creates an event.
    pub const fn new(character: u8, scancode: u8) -> Self {
        Self {
            character,
            scancode,
        }
    }
}

/// Lock-free pending-key slot shared by the interrupt handler and the reader.
pub struct Mailbox {
    slots: ArrayQueue<KeyEvent>,
}

impl Mailbox {
    /// A single-slot mailbox.
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    /// A mailbox buffering up to `capacity` events (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: ArrayQueue::new(capacity.max(1)),
        }
    }

    /// Number of events that can be pending at once.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Whether no event is pending.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Stores an event, returning the one it displaced when full.
    pub fn post(&self, event: KeyEvent) -> Option<KeyEvent> {
        self.slots.force_push(event)
    }

    /// Decodes `scancode` and posts the result.
    ///
    /// Every scancode is posted, releases and modifiers included, with a
    /// zero character when the decoder produced none.
    pub fn deliver(&self, decoder: &mut Decoder, scancode: u8) {
        let decoded = decoder.decode(scancode);
        self.post(KeyEvent::new(decoded.character, scancode));
    }

    /// Removes the oldest pending event.
    pub fn take(&self) -> Option<KeyEvent> {
        self.slots.pop()
    }

    /// Takes a pending character, if the pending event carries one.
    ///
    /// Events without a character are consumed and discarded.
    pub fn try_get_char(&self) -> Option<u8> {
        self.take()
            .map(|event| event.character)
            .filter(|&ch| ch != 0)
    }

    /// Takes a pending non-zero scancode.
    pub fn try_get_scancode(&self) -> Option<u8> {
        self.take()
            .map(|event| event.scancode)
            .filter(|&code| code != 0)
    }

    /// Spins until a character arrives.
    pub fn get_char(&self) -> u8 {
        loop {
            if let Some(ch) = self.try_get_char() {
                return ch;
            }
            core::hint::spin_loop();
        }
    }

    /// Spins until a scancode arrives.
    pub fn get_scancode(&self) -> u8 {
        loop {
            if let Some(code) = self.try_get_scancode() {
                return code;
            }
            core::hint::spin_loop();
        }
    }
}

impl Default for Mailbox {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySource for &Mailbox {
    fn get_char(&mut self) -> u8 {
        Mailbox::get_char(*self)
    }

    fn get_scancode(&mut self) -> u8 {
        Mailbox::get_scancode(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_slot_overwrites() {
        let mailbox = Mailbox::new();
        assert_eq!(mailbox.post(KeyEvent::new(b'a', 0x1E)), None);
        assert_eq!(mailbox.post(KeyEvent::new(b'b', 0x30)), Some(KeyEvent::new(b'a', 0x1E)));

        assert_eq!(mailbox.get_char(), b'b');
        assert!(mailbox.is_empty());
    }

    #[test]
    fn test_release_overwrites_pending_char() {
        let mailbox = Mailbox::new();
        mailbox.post(KeyEvent::new(b'a', 0x1E));
        mailbox.post(KeyEvent::new(0, 0x9E));

        assert_eq!(mailbox.try_get_char(), None);
        assert!(mailbox.is_empty());
    }

    #[test]
    fn test_deliver_posts_every_scancode() {
        let mailbox = Mailbox::new();
        let mut decoder = Decoder::new();

        mailbox.deliver(&mut decoder, 0x2A); // shift down
        assert_eq!(mailbox.get_scancode(), 0x2A);

        mailbox.deliver(&mut decoder, 0x1E); // 'a'
        assert_eq!(mailbox.get_char(), b'A');

        mailbox.deliver(&mut decoder, 0x9E); // 'a' released
        assert_eq!(mailbox.take(), Some(KeyEvent::new(0, 0x9E)));

        mailbox.deliver(&mut decoder, 0xAA); // shift released
        assert_eq!(mailbox.get_scancode(), 0xAA);
        assert!(mailbox.is_empty());
    }

    #[test]
    fn test_release_replaces_unread_char() {
        let mailbox = Mailbox::new();
        let mut decoder = Decoder::new();
        mailbox.deliver(&mut decoder, 0x1E);
        mailbox.deliver(&mut decoder, 0x9E);
        assert_eq!(mailbox.try_get_char(), None);
    }

    #[test]
    fn test_get_scancode() {
        let mailbox = Mailbox::new();
        mailbox.post(KeyEvent::new(0, 0xAA));
        assert_eq!(mailbox.get_scancode(), 0xAA);
        assert_eq!(mailbox.try_get_scancode(), None);
    }

    #[test]
    fn test_queue_drops_oldest() {
        let mailbox = Mailbox::with_capacity(2);
        mailbox.post(KeyEvent::new(b'1', 0x02));
        mailbox.post(KeyEvent::new(b'2', 0x03));
        mailbox.post(KeyEvent::new(b'3', 0x04));

        let mut keys = &mailbox;
        assert_eq!(KeySource::get_char(&mut keys), b'2');
        assert_eq!(KeySource::get_char(&mut keys), b'3');
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        assert_eq!(Mailbox::with_capacity(0).capacity(), 1);
    }

    #[test]
    fn test_interrupt_thread_handoff() {
        use std::sync::Arc;

        let mailbox = Arc::new(Mailbox::new());
        let producer = Arc::clone(&mailbox);
        let handle = std::thread::spawn(move || {
            producer.post(KeyEvent::new(b'z', 0x2C));
        });

        assert_eq!(mailbox.get_char(), b'z');
        handle.join().unwrap();
    }
}
