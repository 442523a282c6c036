//! Minimal `%`-template formatter.
//!
//! Supported conversions:
//!
//! | spec | renders |
//! |------|---------|
//! | `%d` | signed decimal |
//! | `%u` | unsigned decimal |
//! | `%x` | lowercase hex, no prefix |
//! | `%s` | string, `(null)` for an absent one |
//!
//! An optional `0` flag selects zero padding and a single digit sets the
//! minimum width. Any other conversion writes the low byte of the next
//! argument as a raw character, which is how `%c` works.

use edgeos_common::Color;
use edgeos_hal::TextSurface;

use crate::console::Console;

/// Scratch space for one rendered integer.
pub const INT_BUFFER_LEN: usize = 32;

/// Integer-to-string routine: renders `value` for conversion `spec`
/// (`b'd'`, `b'u'` or `b'x'`) into the buffer and returns the length.
pub type Itoa = fn(buffer: &mut [u8; INT_BUFFER_LEN], spec: u8, value: i32) -> usize;

/// One formatter argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    /// Signed integer.
    Int(i32),
    /// Unsigned integer.
    Uint(u32),
    /// String; `None` renders as `(null)`.
    Str(Option<&'a str>),
    /// Single byte character.
    Char(u8),
}

impl Arg<'_> {
    /// The byte written for an unrecognised conversion.
    fn low_byte(self) -> u8 {
        match self {
            Arg::Int(v) => v as u8,
            Arg::Uint(v) => v as u8,
            Arg::Str(s) => s.and_then(|s| s.bytes().next()).unwrap_or(0),
            Arg::Char(c) => c,
        }
    }
}

impl From<i32> for Arg<'_> {
    fn from(value: i32) -> Self {
        Arg::Int(value)
    }
}

impl From<u32> for Arg<'_> {
    fn from(value: u32) -> Self {
        Arg::Uint(value)
    }
}

/// Counts past `u32::MAX` saturate instead of wrapping.
impl From<usize> for Arg<'_> {
    fn from(value: usize) -> Self {
        Arg::Uint(u32::try_from(value).unwrap_or(u32::MAX))
    }
}

impl From<u8> for Arg<'_> {
    fn from(value: u8) -> Self {
        Arg::Char(value)
    }
}

impl From<char> for Arg<'_> {
    fn from(value: char) -> Self {
        Arg::Char(value as u8)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Arg::Str(Some(value))
    }
}

impl<'a> From<Option<&'a str>> for Arg<'a> {
    fn from(value: Option<&'a str>) -> Self {
        Arg::Str(value)
    }
}

/// Default integer-to-string routine.
///
/// `d` renders a leading `-` for negative values; `u` and `x` treat the
/// value as its 32-bit unsigned bit pattern.
pub fn itoa(buffer: &mut [u8; INT_BUFFER_LEN], spec: u8, value: i32) -> usize {
    let (mut magnitude, radix, negative) = match spec {
        b'd' if value < 0 => (value.unsigned_abs(), 10, true),
        b'x' => (value as u32, 16, false),
        _ => (value as u32, 10, false),
    };

    let mut digits = [0u8; INT_BUFFER_LEN];
    let mut count = 0;
    loop {
        let digit = (magnitude % radix) as u8;
        digits[count] = if digit < 10 {
            b'0' + digit
        } else {
            b'a' + digit - 10
        };
        count += 1;
        magnitude /= radix;
        if magnitude == 0 {
            break;
        }
    }

    let mut len = 0;
    if negative {
        buffer[0] = b'-';
        len = 1;
    }
    for &digit in digits[..count].iter().rev() {
        buffer[len] = digit;
        len += 1;
    }
    len
}

/// Text for a `d`/`u`/`x`/`s` conversion of `arg`.
fn render<'b>(
    arg: Arg<'b>,
    spec: u8,
    scratch: &'b mut [u8; INT_BUFFER_LEN],
    itoa: Itoa,
) -> &'b [u8] {
    let (spec, value) = match (arg, spec) {
        (Arg::Str(Some(s)), _) => return s.as_bytes(),
        (Arg::Str(None), _) => return b"(null)",
        (Arg::Char(c), b's') => {
            scratch[0] = c;
            return &scratch[..1];
        }
        (Arg::Int(v), b's') => (b'd', v),
        (Arg::Uint(v), b's') => (b'u', v as i32),
        (Arg::Int(v), spec) => (spec, v),
        (Arg::Uint(v), spec) => (spec, v as i32),
        (Arg::Char(c), spec) => (spec, c as i32),
    };
    let len = itoa(scratch, spec, value);
    &scratch[..len]
}

impl<S: TextSurface> Console<S> {
    /// Renders `template` in the console's default foreground color.
    ///
    /// Arguments are consumed in order; a conversion with no argument left
    /// renders nothing.
    pub fn format_write(&mut self, template: &str, args: &[Arg<'_>]) {
        self.reset_foreground();
        self.render_template(template, args);
    }

    /// Renders `template` in `foreground`.
    ///
    /// The color stays active for later writes until the next plain
    /// [`Console::format_write`].
    pub fn format_write_color(
        &mut self,
        foreground: Color,
        template: &str,
        args: &[Arg<'_>],
    ) {
        self.set_foreground(foreground);
        self.render_template(template, args);
    }

    fn render_template(&mut self, template: &str, args: &[Arg<'_>]) {
        let mut bytes = template.bytes();
        let mut args = args.iter().copied();
        let mut scratch = [0u8; INT_BUFFER_LEN];

        while let Some(c) = bytes.next() {
            if c != b'%' {
                self.put_char(c);
                continue;
            }

            let Some(mut spec) = bytes.next() else { break };
            let mut zero_pad = false;
            let mut width = 0;
            if spec == b'0' {
                zero_pad = true;
                let Some(next) = bytes.next() else { break };
                spec = next;
            }
            if spec.is_ascii_digit() {
                width = usize::from(spec - b'0');
                let Some(next) = bytes.next() else { break };
                spec = next;
            }

            let Some(arg) = args.next() else { continue };
            match spec {
                b'd' | b'u' | b'x' | b's' => {
                    let text = render(arg, spec, &mut scratch, self.itoa);
                    self.put_padded(text, width, zero_pad);
                }
                _ => self.put_char(arg.low_byte()),
            }
        }
    }

    fn put_padded(&mut self, text: &[u8], width: usize, zero_pad: bool) {
        let fill = if zero_pad { b'0' } else { b' ' };
        for _ in text.len()..width {
            self.put_char(fill);
        }
        for &byte in text {
            self.put_char(byte);
        }
    }
}
