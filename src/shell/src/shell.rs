//! Interactive shell loop.

use edgeos_common::Color;
use edgeos_console::{console_printf, Console, History, LINE_CAPACITY};
use edgeos_hal::{KeySource, TextSurface};

use crate::commands::Command;
use crate::fs::{Fat12, FileSystem};

/// Release string reported by `uname -a`.
pub const VERSION: &str = "0.05";

/// Shell state: the volume it works on and its command history.
pub struct Shell<F = Fat12> {
    fs: F,
    history: History,
}

impl Shell<Fat12> {
    /// Create a shell over a freshly formatted FAT12 volume.
    pub fn new() -> Self {
        Self::with_filesystem(Fat12::new())
    }
}

impl Default for Shell<Fat12> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> Shell<F> {
    /// Create a shell over `fs`.
    pub fn with_filesystem(fs: F) -> Self {
        Self {
            fs,
            history: History::new(),
        }
    }

    /// The volume.
    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    /// Submitted command lines.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Print the welcome line.
    pub fn greet<S: TextSurface>(&self, console: &mut Console<S>) {
        console_printf!(console, "Welcome to EdgeOS %s\n", VERSION);
        console_printf!(console, "Type 'help' for a list of commands.\n\n");
    }

    /// Display the shell prompt.
    pub fn prompt<S: TextSurface>(&self, console: &mut Console<S>) {
        console.format_write_color(Color::Blue, "root", &[]);
        console.format_write_color(Color::White, "@", &[]);
        console.format_write_color(Color::Green, "edgeos", &[]);
        console.format_write_color(Color::White, "~$ ", &[]);
    }

    /// Prompt, read one line and run it.
    ///
    /// Returns the command that ran, `None` for a blank line.
    pub fn step<S, K>(&mut self, console: &mut Console<S>, keys: &mut K) -> Option<Command>
    where
        S: TextSurface,
        K: KeySource,
    {
        self.prompt(console);

        let mut buffer = [0u8; LINE_CAPACITY];
        let len =
            console.read_line_with_history(keys, &mut self.history, &mut buffer, LINE_CAPACITY);
        let line = core::str::from_utf8(&buffer[..len]).unwrap_or("");

        let command = Command::parse(line)?;
        log::debug!("shell: {:?}", command);
        command
            .clone()
            .execute(console, keys, &mut self.fs, &self.history);
        Some(command)
    }

    /// Run the shell forever.
    pub fn run<S, K>(&mut self, console: &mut Console<S>, keys: &mut K) -> !
    where
        S: TextSurface,
        K: KeySource,
    {
        self.greet(console);
        loop {
            self.step(console, keys);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgeos_console::{KeyScript, MemorySurface, KEY_UP};

    fn console() -> Console<MemorySurface> {
        Console::new(MemorySurface::new(), Color::White, Color::Black)
    }

    fn run_script(shell: &mut Shell, console: &mut Console<MemorySurface>, script: &[u8]) {
        let mut keys = KeyScript::new(script);
        while keys.remaining() > 0 {
            shell.step(console, &mut keys);
        }
    }

    #[test]
    fn test_prompt_colors() {
        let mut console = console();
        Shell::new().prompt(&mut console);

        let screen = console.surface();
        assert_eq!(screen.row_text(0), "root@edgeos~$");
        assert_eq!(screen.cell(0).foreground(), Color::Blue);
        assert_eq!(screen.cell(4).foreground(), Color::White);
        assert_eq!(screen.cell(5).foreground(), Color::Green);
        assert_eq!(screen.cell(11).foreground(), Color::White);
    }

    #[test]
    fn test_touch_then_cat() {
        let mut console = console();
        let mut shell = Shell::new();
        run_script(&mut shell, &mut console, b"touch notes\nhello world\ncat notes\n");

        let screen = console.surface();
        assert_eq!(screen.row_text(0), "root@edgeos~$ touch notes");
        assert_eq!(screen.row_text(1), "File Content> hello world");
        assert_eq!(
            screen.row_text(2),
            "File 'notes' created successfully in FAT12 FS."
        );
        assert_eq!(screen.row_text(3), "root@edgeos~$ cat notes");
        assert_eq!(screen.row_text(4), "hello world");

        // The file content is not a command line.
        assert_eq!(shell.history().len(), 2);
    }

    #[test]
    fn test_ls_and_rm() {
        let mut console = console();
        let mut shell = Shell::new();
        run_script(
            &mut shell,
            &mut console,
            b"touch a\nabc\ntouch b\n\nrm a\nls\ncat a\n",
        );

        let screen = console.surface();
        assert_eq!(screen.row_text(6), "root@edgeos~$ rm a");
        assert_eq!(screen.row_text(7), "File 'a' removed successfully.");
        assert_eq!(screen.row_text(8), "root@edgeos~$ ls");
        assert_eq!(screen.row_text(9), "- b, 0 bytes");
        assert_eq!(screen.row_text(10), "root@edgeos~$ cat a");
        assert_eq!(screen.row_text(11), "File 'a' not found.");
        assert_eq!(shell.filesystem().list().len(), 1);
    }

    #[test]
    fn test_duplicate_touch() {
        let mut console = console();
        let mut shell = Shell::new();
        run_script(&mut shell, &mut console, b"touch a\n1\ntouch a\n2\n");
        assert_eq!(console.surface().row_text(5), "File 'a' already exists.");
    }

    #[test]
    fn test_uname_and_unknown() {
        let mut console = console();
        let mut shell = Shell::new();
        run_script(&mut shell, &mut console, b"uname\nuname -a\nuname -x\nfoo bar\n");

        let screen = console.surface();
        assert_eq!(screen.row_text(1), "EdgeOS");
        assert_eq!(screen.row_text(3), "EdgeOS localhost 0.05 x86_64 EdgeOS Kernel");
        assert_eq!(screen.row_text(5), "Invalid argument for uname: -x");
        assert_eq!(screen.row_text(7), "foo bar: command not found");
    }

    #[test]
    fn test_blank_line_runs_nothing() {
        let mut console = console();
        let mut shell = Shell::new();
        let mut keys = KeyScript::new(b"   \n");
        assert_eq!(shell.step(&mut console, &mut keys), None);
        assert_eq!(console.cursor_y(), 1);
    }

    #[test]
    fn test_history_recall_reruns_command() {
        let mut console = console();
        let mut shell = Shell::new();
        let mut script = b"echo hi\n".to_vec();
        script.extend_from_slice(&[KEY_UP, b'\n']);
        run_script(&mut shell, &mut console, &script);

        let screen = console.surface();
        assert_eq!(screen.row_text(1), "hi");
        assert_eq!(screen.row_text(2), "root@edgeos~$ echo hi");
        assert_eq!(screen.row_text(3), "hi");
    }

    #[test]
    fn test_history_command() {
        let mut console = console();
        let mut shell = Shell::new();
        run_script(&mut shell, &mut console, b"whoami\nhistory\n");

        let screen = console.surface();
        assert_eq!(screen.row_text(1), "root");
        assert_eq!(screen.row_text(3), "  1  whoami");
        assert_eq!(screen.row_text(4), "  2  history");
    }

    #[test]
    fn test_clear_homes_cursor() {
        let mut console = console();
        let mut shell = Shell::new();
        run_script(&mut shell, &mut console, b"whoami\nclear\n");
        assert_eq!(console.cursor_y(), 0);
        assert_eq!(console.surface().row_text(0), "");
    }
}
