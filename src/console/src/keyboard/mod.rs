//! Keyboard scancode state machine.
//!
//! Turns set-1 scancodes into single-byte characters while tracking the
//! caps-lock toggle and the shift latch. Shift applies to exactly one
//! character key press, then clears.

mod layout;

pub use layout::{alternate_char, Scancode, SCANCODE_CHARS};

/// Character produced by arrow-up.
pub const KEY_UP: u8 = 0x80;

/// Character produced by arrow-down.
pub const KEY_DOWN: u8 = 0x81;

/// Result of decoding one scancode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// Produced character, 0 if none.
    pub character: u8,
    /// The scancode only changed modifier state.
    pub modifier: bool,
}

impl Decoded {
    const NOTHING: Decoded = Decoded {
        character: 0,
        modifier: false,
    };

    const MODIFIER: Decoded = Decoded {
        character: 0,
        modifier: true,
    };

    const fn character(character: u8) -> Decoded {
        Decoded {
            character,
            modifier: false,
        }
    }

    /// The produced character, if any.
    pub fn char(self) -> Option<u8> {
        (self.character != 0).then_some(self.character)
    }
}

/// Modifier latches of the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decoder {
    caps_lock: bool,
    shift: bool,
}

impl Decoder {
    /// Both latches off.
    pub const fn new() -> Self {
        Self {
            caps_lock: false,
            shift: false,
        }
    }

    /// Whether caps lock is on.
    pub fn caps_lock(&self) -> bool {
        self.caps_lock
    }

    /// Whether shift is latched for the next character.
    pub fn shift(&self) -> bool {
        self.shift
    }

    /// Decodes one scancode and updates the latches.
    ///
    /// Releases only matter for shift. Presses of caps lock and shift are
    /// modifiers; enter, tab and the vertical arrows map to fixed
    /// characters; every other key goes through the layout table.
    pub fn decode(&mut self, scancode: u8) -> Decoded {
        let code = Scancode(scancode);
        if code.is_release() {
            if code.is_shift() {
                self.shift = false;
                return Decoded::MODIFIER;
            }
            return Decoded::NOTHING;
        }

        match code {
            Scancode::CAPS_LOCK => {
                self.caps_lock = !self.caps_lock;
                Decoded::MODIFIER
            }
            Scancode::ENTER => Decoded::character(b'\n'),
            Scancode::TAB => Decoded::character(b'\t'),
            Scancode::LEFT_SHIFT | Scancode::RIGHT_SHIFT => {
                self.shift = true;
                Decoded::MODIFIER
            }
            Scancode::UP => Decoded::character(KEY_UP),
            Scancode::DOWN => Decoded::character(KEY_DOWN),
            _ => {
                let base = code.base_char();
                let ch = if self.caps_lock {
                    if self.shift {
                        alternate_char(base)
                    } else {
                        base.to_ascii_uppercase()
                    }
                } else if self.shift {
                    if base.is_ascii_alphabetic() {
                        base.to_ascii_uppercase()
                    } else {
                        alternate_char(base)
                    }
                } else {
                    base
                };
                self.shift = false;
                Decoded::character(ch)
            }
        }
    }
}
