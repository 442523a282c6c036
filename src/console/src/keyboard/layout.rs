//! US keyboard layout for scancode set 1.

/// A raw set-1 scancode. Bit 7 marks a key release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scancode(pub u8);

impl Scancode {
    /// Bit set on every key release.
    pub const RELEASE_BIT: u8 = 0x80;

    /// Escape.
    pub const ESCAPE: Scancode = Scancode(0x01);
    /// The `1` key.
    pub const KEY_1: Scancode = Scancode(0x02);
    /// Backspace.
    pub const BACKSPACE: Scancode = Scancode(0x0E);
    /// Tab.
    pub const TAB: Scancode = Scancode(0x0F);
    /// The `Q` key.
    pub const Q: Scancode = Scancode(0x10);
    /// Enter.
    pub const ENTER: Scancode = Scancode(0x1C);
    /// The `A` key.
    pub const A: Scancode = Scancode(0x1E);
    /// Left shift.
    pub const LEFT_SHIFT: Scancode = Scancode(0x2A);
    /// Right shift.
    pub const RIGHT_SHIFT: Scancode = Scancode(0x36);
    /// Space bar.
    pub const SPACE: Scancode = Scancode(0x39);
    /// Caps lock.
    pub const CAPS_LOCK: Scancode = Scancode(0x3A);
    /// Arrow up (also keypad 8).
    pub const UP: Scancode = Scancode(0x48);
    /// Arrow down (also keypad 2).
    pub const DOWN: Scancode = Scancode(0x50);

    /// Whether this is a key-up event.
    pub const fn is_release(self) -> bool {
        self.0 & Self::RELEASE_BIT != 0
    }

    /// The key, with the release bit cleared.
    pub const fn key(self) -> Scancode {
        Scancode(self.0 & !Self::RELEASE_BIT)
    }

    /// The key-up event for this key.
    pub const fn released(self) -> Scancode {
        Scancode(self.0 | Self::RELEASE_BIT)
    }

    /// Unshifted character of the key, 0 for keys without one.
    pub const fn base_char(self) -> u8 {
        SCANCODE_CHARS[(self.0 & !Self::RELEASE_BIT) as usize]
    }

    /// Whether this is either shift key, pressed or released.
    pub const fn is_shift(self) -> bool {
        let key = self.0 & !Self::RELEASE_BIT;
        key == Self::LEFT_SHIFT.0 || key == Self::RIGHT_SHIFT.0
    }
}

/// Unshifted character for each scancode, indexed by scancode.
pub const SCANCODE_CHARS: [u8; 128] = {
    const HEAD: [u8; 90] = [
        0, 27, b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', b'0', b'-', b'=', b'\x08',
        b'\t', b'q', b'w', b'e', b'r', b't', b'y', b'u', b'i', b'o', b'p', b'[', b']', b'\n',
        0, b'a', b's', b'd', b'f', b'g', b'h', b'j', b'k', b'l', b';', b'\'', b'`', 0,
        b'\\', b'z', b'x', b'c', b'v', b'b', b'n', b'm', b',', b'.', b'/', 0, b'*', 0, b' ',
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, b'-', 0, 0, 0, b'+', 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0,
    ];
    let mut table = [0u8; 128];
    let mut i = 0;
    while i < HEAD.len() {
        table[i] = HEAD[i];
        i += 1;
    }
    table
};

/// Shifted variant of an unshifted punctuation or digit key.
///
/// Characters without a shifted form come back unchanged.
pub const fn alternate_char(ch: u8) -> u8 {
    match ch {
        b'`' => b'~',
        b'1' => b'!',
        b'2' => b'@',
        b'3' => b'#',
        b'4' => b'$',
        b'5' => b'%',
        b'6' => b'^',
        b'7' => b'&',
        b'8' => b'*',
        b'9' => b'(',
        b'0' => b')',
        b'-' => b'_',
        b'=' => b'+',
        b'[' => b'{',
        b']' => b'}',
        b'\\' => b'|',
        b';' => b':',
        b'\'' => b'"',
        b',' => b'<',
        b'.' => b'>',
        b'/' => b'?',
        _ => ch,
    }
}
