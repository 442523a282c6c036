//! Blocking line input with in-place editing.

use edgeos_hal::{KeySource, TextSurface};

use crate::console::{Console, TAB_WIDTH};
use crate::history::History;
use crate::keyboard::{KEY_DOWN, KEY_UP};

impl<S: TextSurface> Console<S> {
    /// Reads a line into `buffer`, using its whole length as the bound.
    ///
    /// See [`Console::read_line_bound`].
    pub fn read_line<K: KeySource>(&mut self, keys: &mut K, buffer: &mut [u8]) -> usize {
        let bound = buffer.len();
        self.read_line_bound(keys, buffer, bound)
    }

    /// Reads characters until `'\n'`, echoing them.
    ///
    /// At most `bound - 1` characters are kept (and never more than the
    /// buffer holds); the rest are dropped. `'\b'` erases the last kept
    /// character from buffer and screen. The line is null-terminated and its
    /// length returned. An empty buffer or zero bound returns 0 at once.
    pub fn read_line_bound<K: KeySource>(
        &mut self,
        keys: &mut K,
        buffer: &mut [u8],
        bound: usize,
    ) -> usize {
        self.edit_line(keys, buffer, bound, None)
    }

    /// Like [`Console::read_line_bound`], with history.
    ///
    /// Arrow-up and arrow-down walk `history`, replacing the line being
    /// edited. A non-empty submitted line is appended to `history`.
    pub fn read_line_with_history<K: KeySource>(
        &mut self,
        keys: &mut K,
        history: &mut History,
        buffer: &mut [u8],
        bound: usize,
    ) -> usize {
        let len = self.edit_line(keys, buffer, bound, Some(&*history));
        if len > 0 {
            history.push(&buffer[..len]);
        }
        len
    }

    fn edit_line<K: KeySource>(
        &mut self,
        keys: &mut K,
        buffer: &mut [u8],
        bound: usize,
        history: Option<&History>,
    ) -> usize {
        let max_len = bound.min(buffer.len());
        if max_len == 0 {
            return 0;
        }

        let mut len = 0;
        // How far back in history the line currently is; 0 is the fresh line.
        let mut recall = 0;
        loop {
            match keys.get_char() {
                b'\n' => {
                    self.newline();
                    buffer[len] = 0;
                    return len;
                }
                b'\x08' => {
                    if len > 0 {
                        len -= 1;
                        self.erase(buffer[len]);
                        buffer[len] = 0;
                    }
                }
                key @ (KEY_UP | KEY_DOWN) => {
                    let Some(history) = history else { continue };
                    recall = match key {
                        KEY_UP if recall < history.len() => recall + 1,
                        KEY_DOWN if recall > 0 => recall - 1,
                        _ => continue,
                    };
                    let entry = history.recent(recall).unwrap_or(&[]);
                    len = self.replace_line(buffer, len, max_len, entry);
                }
                ch => {
                    if len < max_len - 1 {
                        buffer[len] = ch;
                        len += 1;
                        self.put_char(ch);
                    }
                }
            }
        }
    }

    /// Removes the cells `ch` occupied when it was echoed.
    fn erase(&mut self, ch: u8) {
        let cells = if ch == b'\t' { TAB_WIDTH } else { 1 };
        self.unput_bound(cells);
    }

    fn replace_line(
        &mut self,
        buffer: &mut [u8],
        len: usize,
        max_len: usize,
        entry: &[u8],
    ) -> usize {
        for i in (0..len).rev() {
            self.erase(buffer[i]);
        }
        let new_len = entry.len().min(max_len - 1);
        buffer[..new_len].copy_from_slice(&entry[..new_len]);
        buffer[new_len..len.max(new_len)].fill(0);
        for &ch in &buffer[..new_len] {
            self.put_char(ch);
        }
        new_len
    }
}
