//! Cursor and scroll controller.
//!
//! [`Console`] is the single owner of the screen state: the display buffer,
//! the cursor, the active colors and the scroll-back page ring. Every
//! operation takes it by exclusive reference.

use alloc::boxed::Box;
use alloc::vec;
use core::fmt;

use edgeos_common::{Color, ScreenCell, TEXT_CELLS, TEXT_HEIGHT, TEXT_WIDTH};
use edgeos_hal::TextSurface;

use crate::display::{DisplayBuffer, Page};
use crate::format::{self, Itoa};

/// Number of full-screen snapshots kept for scroll-back.
pub const MAXIMUM_PAGES: usize = 16;

/// Number of space cells a tab expands to.
pub const TAB_WIDTH: usize = 4;

/// Direction for [`Console::scroll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Toward older snapshots.
    Up,
    /// Toward newer snapshots.
    Down,
}

/// Text console over a [`TextSurface`].
///
/// Invariant: `index == y * TEXT_WIDTH + x` after every public operation,
/// except after an out-of-range [`Console::goto_xy`].
pub struct Console<S> {
    display: DisplayBuffer<S>,
    /// Column, `0..TEXT_WIDTH`.
    x: usize,
    /// Row, `0..TEXT_HEIGHT`.
    y: usize,
    /// Linear cell index of the cursor.
    index: usize,
    foreground: Color,
    background: Color,
    /// Foreground restored by every plain `format_write`.
    default_foreground: Color,
    pages: Box<[Page]>,
    /// Always in `0..MAXIMUM_PAGES`.
    current_page: usize,
    /// Total snapshots taken; the next one lands in `captures % MAXIMUM_PAGES`.
    captures: usize,
    /// `current_page` holds a capture not shown by `scroll` yet.
    unseen_capture: bool,
    pub(crate) itoa: Itoa,
}

impl<S: TextSurface> Console<S> {
    /// Takes ownership of `surface`, sets the colors and clears the screen.
    pub fn new(surface: S, foreground: Color, background: Color) -> Self {
        let mut console = Console {
            display: DisplayBuffer::new(surface),
            x: 0,
            y: 0,
            index: 0,
            foreground,
            background,
            default_foreground: foreground,
            pages: vec![[ScreenCell::BLANK; TEXT_CELLS]; MAXIMUM_PAGES].into_boxed_slice(),
            current_page: 0,
            captures: 0,
            unseen_capture: false,
            itoa: format::itoa,
        };
        console.clear(foreground, background);
        console
    }

    /// Replaces the integer-to-string routine used by `%d`, `%u` and `%x`.
    pub fn with_itoa(mut self, itoa: Itoa) -> Self {
        self.itoa = itoa;
        self
    }

    /// Fills the screen with null cells in the given colors and homes the cursor.
    ///
    /// The active colors are left unchanged.
    pub fn clear(&mut self, foreground: Color, background: Color) {
        self.display.fill(ScreenCell::new(0, foreground, background));
        self.x = 0;
        self.y = 0;
        self.index = 0;
        self.sync_cursor();
    }

    /// Sets the colors for subsequent writes.
    pub fn set_color(&mut self, foreground: Color, background: Color) {
        self.foreground = foreground;
        self.background = background;
    }

    pub(crate) fn set_foreground(&mut self, foreground: Color) {
        self.foreground = foreground;
    }

    pub(crate) fn reset_foreground(&mut self) {
        self.foreground = self.default_foreground;
    }

    /// Places one character at the cursor.
    ///
    /// `'\t'` expands to [`TAB_WIDTH`] spaces, `'\n'` starts a new line,
    /// bytes `0x01..=0x7f` are written as glyphs. Anything else is ignored.
    pub fn put_char(&mut self, ch: u8) {
        match ch {
            b'\t' => {
                for _ in 0..TAB_WIDTH {
                    self.advance(b' ');
                }
            }
            b'\n' => self.newline(),
            0x01..=0x7f => self.advance(ch),
            _ => {}
        }
        self.sync_cursor();
    }

    /// Writes every byte of `s` through [`Console::put_char`].
    pub fn put_string(&mut self, s: &str) {
        for byte in s.bytes() {
            self.put_char(byte);
        }
    }

    fn advance(&mut self, ch: u8) {
        self.display
            .write_cell(self.index, ch, self.foreground, self.background);
        self.index += 1;
        self.x += 1;
        if self.x >= TEXT_WIDTH {
            self.x = 0;
            self.y += 1;
        }
        if self.y >= TEXT_HEIGHT {
            self.newline();
        }
    }

    /// Moves to the start of the next row, scrolling the screen on the last row.
    ///
    /// The screen is captured into the page ring right before it shifts.
    pub fn newline(&mut self) {
        if self.y >= TEXT_HEIGHT - 1 {
            self.save_page();
            self.display.shift_up();
            self.display.clear_row(
                TEXT_HEIGHT - 1,
                ScreenCell::new(b' ', self.foreground, self.background),
            );
            self.y = TEXT_HEIGHT - 1;
        } else {
            self.y += 1;
        }
        self.x = 0;
        self.index = self.y * TEXT_WIDTH + self.x;
        self.sync_cursor();
    }

    /// Steps back over the last placed cell and blanks it.
    ///
    /// Does nothing at the top-left corner.
    pub fn unput_char(&mut self) {
        if self.index == 0 {
            return;
        }
        self.index -= 1;
        if self.x > 0 {
            self.x -= 1;
        } else if self.y > 0 {
            self.y -= 1;
            self.x = TEXT_WIDTH - 1;
        }
        self.display
            .write_cell(self.index, 0, self.foreground, self.background);
        self.sync_cursor();
    }

    /// Calls [`Console::unput_char`] `n` times or until the cursor reaches the origin.
    pub fn unput_bound(&mut self, n: usize) {
        for _ in 0..n {
            if self.index == 0 {
                break;
            }
            self.unput_char();
        }
    }

    /// Moves the cursor to column `x`, row `y`.
    ///
    /// The caller must keep `x < TEXT_WIDTH` and `y < TEXT_HEIGHT`. Out-of-range
    /// positions leave the linear index pointing off screen, where writes
    /// are dropped.
    pub fn goto_xy(&mut self, x: usize, y: usize) {
        self.index = y.wrapping_mul(TEXT_WIDTH).wrapping_add(x);
        self.x = x;
        self.y = y;
        self.sync_cursor();
    }

    /// Captures the live screen into the next page slot.
    ///
    /// Afterwards the current page is the captured slot and the next
    /// [`ScrollDirection::Up`] shows it without stepping back.
    pub fn save_page(&mut self) {
        let slot = self.captures % MAXIMUM_PAGES;
        self.display.snapshot(&mut self.pages[slot]);
        self.captures = self.captures.wrapping_add(1);
        self.current_page = slot;
        self.unseen_capture = true;
        log::trace!("page {} captured", slot);
    }

    /// Pages through the saved snapshots and copies the selected one on screen.
    ///
    /// `Up` steps back, stopping at page 0; the first `Up` after a capture
    /// shows that capture instead. `Down` steps forward and wraps. The cursor
    /// does not move.
    pub fn scroll(&mut self, direction: ScrollDirection) {
        let unseen = core::mem::replace(&mut self.unseen_capture, false);
        match direction {
            ScrollDirection::Up => {
                if !unseen && self.current_page > 0 {
                    self.current_page -= 1;
                }
            }
            ScrollDirection::Down => self.current_page += 1,
        }
        self.current_page %= MAXIMUM_PAGES;
        self.display.restore(&self.pages[self.current_page]);
        log::trace!("scrolled {:?} to page {}", direction, self.current_page);
    }

    fn sync_cursor(&mut self) {
        self.display.move_cursor(self.x, self.y);
    }

    /// Cursor column.
    pub fn cursor_x(&self) -> usize {
        self.x
    }

    /// Cursor row.
    pub fn cursor_y(&self) -> usize {
        self.y
    }

    /// Linear cell index of the cursor.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Index of the page the next scroll starts from.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Active foreground color.
    pub fn foreground(&self) -> Color {
        self.foreground
    }

    /// Active background color.
    pub fn background(&self) -> Color {
        self.background
    }

    /// The display buffer.
    pub fn display(&self) -> &DisplayBuffer<S> {
        &self.display
    }

    /// The underlying surface.
    pub fn surface(&self) -> &S {
        self.display.surface()
    }
}

impl<S: TextSurface> fmt::Write for Console<S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.put_string(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::virt::MemorySurface;

    fn console() -> Console<MemorySurface> {
        Console::new(MemorySurface::new(), Color::White, Color::Black)
    }

    #[test]
    fn test_clear_homes_cursor() {
        let mut console = console();
        console.put_string("hello\nworld");
        console.clear(Color::Yellow, Color::Blue);

        assert_eq!((console.cursor_x(), console.cursor_y(), console.index()), (0, 0, 0));
        assert_eq!(console.surface().cursor(), (0, 0));
        let blank = ScreenCell::new(0, Color::Yellow, Color::Blue);
        assert!(console.surface().cells().iter().all(|c| *c == blank));
    }

    #[test]
    fn test_put_char_advances_and_wraps() {
        let mut console = console();
        console.goto_xy(10, 3);
        for count in 1..=200 {
            console.put_char(b'x');
            let total = 10 + count;
            assert_eq!(console.cursor_x(), total % TEXT_WIDTH);
            assert_eq!(console.cursor_y(), 3 + total / TEXT_WIDTH);
            assert_eq!(console.index(), console.cursor_y() * TEXT_WIDTH + console.cursor_x());
        }
        assert_eq!(console.surface().cursor(), (console.cursor_x(), console.cursor_y()));
    }

    #[test]
    fn test_overflow_scrolls_once_per_row() {
        let mut console = console();
        console.goto_xy(0, TEXT_HEIGHT - 1);
        console.put_string("last");
        console.goto_xy(TEXT_WIDTH - 1, TEXT_HEIGHT - 1);
        console.put_char(b'!');

        // One shift: "last" moved up a row, cursor pinned to the bottom row.
        assert_eq!((console.cursor_x(), console.cursor_y()), (0, TEXT_HEIGHT - 1));
        assert_eq!(console.index(), (TEXT_HEIGHT - 1) * TEXT_WIDTH);
        let shifted = console.surface().row_text(TEXT_HEIGHT - 2);
        assert!(shifted.starts_with("last"));
        assert!(shifted.ends_with('!'));
        assert_eq!(console.surface().row_text(TEXT_HEIGHT - 1), "");
    }

    #[test]
    fn test_newline_clears_last_row_with_current_colors() {
        let mut console = console();
        console.set_color(Color::Green, Color::Red);
        console.goto_xy(5, TEXT_HEIGHT - 1);
        console.newline();

        let cell = console.surface().cell((TEXT_HEIGHT - 1) * TEXT_WIDTH);
        assert_eq!(cell, ScreenCell::new(b' ', Color::Green, Color::Red));
        assert_eq!(console.cursor_x(), 0);
    }

    #[test]
    fn test_tab_expands_to_spaces() {
        let mut console = console();
        console.put_char(b'a');
        console.put_char(b'\t');
        assert_eq!(console.cursor_x(), 1 + TAB_WIDTH);
        assert_eq!(console.surface().cell(1).character(), b' ');

        console.goto_xy(TEXT_WIDTH - 2, 0);
        console.put_char(b'\t');
        assert_eq!((console.cursor_x(), console.cursor_y()), (2, 1));
    }

    #[test]
    fn test_unput_is_left_inverse_of_put() {
        let mut console = console();
        for &(x, y) in &[(7, 2), (0, 5), (TEXT_WIDTH - 1, 9)] {
            console.goto_xy(x, y);
            let before = (console.cursor_x(), console.cursor_y(), console.index());
            console.put_char(b'k');
            console.unput_char();
            assert_eq!((console.cursor_x(), console.cursor_y(), console.index()), before);
            assert_eq!(console.surface().cell(before.2).character(), 0);
        }
    }

    #[test]
    fn test_unput_wraps_to_previous_row() {
        let mut console = console();
        console.goto_xy(0, 4);
        console.unput_char();
        assert_eq!((console.cursor_x(), console.cursor_y()), (TEXT_WIDTH - 1, 3));
        assert_eq!(console.index(), 3 * TEXT_WIDTH + TEXT_WIDTH - 1);
    }

    #[test]
    fn test_unput_bound_stops_at_origin() {
        let mut console = console();
        console.put_string("abc");
        console.unput_bound(10);
        assert_eq!(console.index(), 0);
        console.unput_char();
        assert_eq!((console.cursor_x(), console.cursor_y(), console.index()), (0, 0, 0));
    }

    #[test]
    fn test_non_ascii_bytes_are_ignored() {
        let mut console = console();
        console.put_char(0);
        console.put_char(0x80);
        console.put_char(0xff);
        assert_eq!(console.index(), 0);
    }

    #[test]
    fn test_scroll_down_wraps_to_first_page() {
        let mut console = console();
        console.put_string("page zero");
        console.save_page();
        console.scroll(ScrollDirection::Up);
        assert_eq!(console.current_page(), 0);
        let snapshot: Vec<ScreenCell> = console.surface().cells().to_vec();

        for _ in 0..MAXIMUM_PAGES - 1 {
            console.scroll(ScrollDirection::Down);
            assert!(console.current_page() < MAXIMUM_PAGES);
        }
        console.scroll(ScrollDirection::Down);
        assert_eq!(console.current_page(), 0);
        assert_eq!(console.surface().cells(), &snapshot[..]);
        assert_eq!(console.surface().row_text(0), "page zero");
    }

    #[test]
    fn test_scroll_up_shows_newest_after_ring_wraps() {
        let mut console = console();
        for i in 0..MAXIMUM_PAGES {
            console.clear(Color::White, Color::Black);
            console.put_string(&format!("snap{}", i));
            console.save_page();
        }
        assert_eq!(console.current_page(), MAXIMUM_PAGES - 1);

        console.clear(Color::White, Color::Black);
        console.scroll(ScrollDirection::Up);
        assert_eq!(console.surface().row_text(0), "snap15");
        console.scroll(ScrollDirection::Up);
        assert_eq!(console.surface().row_text(0), "snap14");
    }

    #[test]
    fn test_scroll_up_after_later_capture_shows_it() {
        let mut console = console();
        console.put_string("old");
        console.save_page();
        console.scroll(ScrollDirection::Up);

        console.clear(Color::White, Color::Black);
        console.put_string("new");
        console.save_page();
        console.clear(Color::White, Color::Black);
        console.scroll(ScrollDirection::Up);
        assert_eq!(console.current_page(), 1);
        assert_eq!(console.surface().row_text(0), "new");
    }

    #[test]
    fn test_scroll_up_floors_at_zero() {
        let mut console = console();
        console.scroll(ScrollDirection::Up);
        console.scroll(ScrollDirection::Up);
        assert_eq!(console.current_page(), 0);
    }

    #[test]
    fn test_scroll_up_shows_screen_before_shift() {
        let mut console = console();
        console.goto_xy(0, TEXT_HEIGHT - 1);
        console.put_string("bottom");
        console.newline();
        assert_eq!(console.surface().row_text(TEXT_HEIGHT - 1), "");

        console.scroll(ScrollDirection::Up);
        assert_eq!(console.surface().row_text(TEXT_HEIGHT - 1), "bottom");
    }

    #[test]
    fn test_fmt_write() {
        use core::fmt::Write;

        let mut console = console();
        write!(console, "{}-{}", 4, "two").unwrap();
        assert_eq!(console.surface().row_text(0), "4-two");
    }
}
