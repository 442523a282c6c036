//! Built-in shell commands.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::Write;

use edgeos_common::{Color, FsError};
use edgeos_console::{console_printf, Console, History, LINE_CAPACITY};
use edgeos_hal::{KeySource, TextSurface};

use crate::fs::fat12::ROOT_ENTRIES;
use crate::fs::FileSystem;
use crate::shell::VERSION;

/// Shell command types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Display help information.
    Help,
    /// Clear the screen.
    Clear,
    /// Print the system name.
    Uname {
        /// `-a` for the long form; anything else is rejected.
        arg: Option<String>,
    },
    /// Create a file, prompting for its content.
    Touch {
        /// File to create.
        name: String,
    },
    /// List files.
    Ls,
    /// Print a file.
    Cat {
        /// File to print.
        name: String,
    },
    /// Delete a file.
    Rm {
        /// File to delete.
        name: String,
    },
    /// Print the current user.
    Whoami,
    /// Echo text.
    Echo {
        /// The text to echo.
        text: String,
    },
    /// List previous command lines.
    History,
    /// A command missing its argument.
    Usage(&'static str),
    /// Unknown command; holds the whole line.
    Unknown(String),
}

impl Command {
    /// Parse a command line.
    ///
    /// Returns `None` for a blank line.
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
        let arg = rest.trim();
        let named = |usage: &'static str, build: fn(String) -> Command| {
            if arg.is_empty() {
                Command::Usage(usage)
            } else {
                build(arg.to_string())
            }
        };

        Some(match cmd {
            "help" => Command::Help,
            "clear" => Command::Clear,
            "uname" => Command::Uname {
                arg: (!arg.is_empty()).then(|| arg.to_string()),
            },
            "touch" => named("touch <filename>", |name| Command::Touch { name }),
            "ls" => Command::Ls,
            "cat" => named("cat <filename>", |name| Command::Cat { name }),
            "rm" => named("rm <filename>", |name| Command::Rm { name }),
            "whoami" => Command::Whoami,
            "echo" => Command::Echo {
                text: rest.to_string(),
            },
            "history" => Command::History,
            _ => Command::Unknown(line.to_string()),
        })
    }

    /// Execute a command.
    ///
    /// `keys` is only read by commands that prompt for more input.
    pub fn execute<S, K, F>(
        self,
        console: &mut Console<S>,
        keys: &mut K,
        fs: &mut F,
        history: &History,
    ) where
        S: TextSurface,
        K: KeySource,
        F: FileSystem,
    {
        match self {
            Command::Help => cmd_help(console),
            Command::Clear => console.clear(Color::White, Color::Black),
            Command::Uname { arg } => cmd_uname(console, arg.as_deref()),
            Command::Touch { name } => cmd_touch(console, keys, fs, &name),
            Command::Ls => cmd_ls(console, fs),
            Command::Cat { name } => cmd_cat(console, fs, &name),
            Command::Rm { name } => cmd_rm(console, fs, &name),
            Command::Whoami => console_printf!(console, "root\n"),
            Command::Echo { text } => console_printf!(console, "%s\n", text.as_str()),
            Command::History => cmd_history(console, history),
            Command::Usage(usage) => console_printf!(console, "Usage: %s\n", usage),
            Command::Unknown(line) => {
                console_printf!(console, "%s: command not found\n", line.as_str())
            }
        }
    }
}

/// Display help information.
fn cmd_help<S: TextSurface>(console: &mut Console<S>) {
    console.format_write_color(Color::LightCyan, "EdgeOS Operating System\n", &[]);
    console_printf!(console, "Commands:\n\n");
    console_printf!(console, " help\n");
    console_printf!(console, " clear\n");
    console_printf!(console, " uname [-a]\n");
    console_printf!(console, " touch <filename>\n");
    console_printf!(console, " ls\n");
    console_printf!(console, " cat <filename> (Show file content)\n");
    console_printf!(console, " rm <filename>\n");
    console_printf!(console, " whoami\n");
    console_printf!(console, " echo <text>\n");
    console_printf!(console, " history\n\n");
    console_printf!(
        console,
        "Important Info: 'MAX FILES: %d', 'MAX FILE CONTENT: %d'\n",
        ROOT_ENTRIES,
        LINE_CAPACITY - 1
    );
}

fn cmd_uname<S: TextSurface>(console: &mut Console<S>, arg: Option<&str>) {
    match arg {
        None => console_printf!(console, "EdgeOS\n"),
        Some("-a") => console_printf!(
            console,
            "EdgeOS localhost %s x86_64 EdgeOS Kernel\n",
            VERSION
        ),
        Some(other) => console_printf!(console, "Invalid argument for uname: %s\n", other),
    }
}

fn cmd_touch<S, K, F>(console: &mut Console<S>, keys: &mut K, fs: &mut F, name: &str)
where
    S: TextSurface,
    K: KeySource,
    F: FileSystem,
{
    console_printf!(console, "File Content> ");
    let mut content = [0u8; LINE_CAPACITY];
    let len = console.read_line(keys, &mut content);

    match fs.create(name, &content[..len]) {
        Ok(()) => {
            console_printf!(console, "File '%s' created successfully in FAT12 FS.\n", name)
        }
        Err(FsError::AlreadyExists) => {
            console_printf!(console, "File '%s' already exists.\n", name)
        }
        Err(FsError::DirectoryFull) => console_printf!(
            console,
            "Root directory is full. Cannot create more files.\n"
        ),
        Err(err) => {
            let _ = writeln!(console, "touch: {}: {}", name, err);
        }
    }
}

fn cmd_ls<S: TextSurface, F: FileSystem>(console: &mut Console<S>, fs: &F) {
    for file in fs.list() {
        console_printf!(console, "- %s, %u bytes\n", file.name.as_str(), file.size);
    }
}

fn cmd_cat<S: TextSurface, F: FileSystem>(console: &mut Console<S>, fs: &F, name: &str) {
    let mut content = Vec::new();
    match fs.read(name, &mut content) {
        Ok(_) => {
            for &byte in &content {
                console.put_char(byte);
            }
            console.put_char(b'\n');
        }
        Err(FsError::NotFound) => console_printf!(console, "File '%s' not found.\n", name),
        Err(err) => {
            let _ = writeln!(console, "cat: {}: {}", name, err);
        }
    }
}

fn cmd_rm<S: TextSurface, F: FileSystem>(console: &mut Console<S>, fs: &mut F, name: &str) {
    match fs.remove(name) {
        Ok(()) => {
            console_printf!(console, "File '%s' removed successfully.\n", name)
        }
        Err(FsError::NotFound) => console_printf!(console, "File '%s' not found.\n", name),
        Err(err) => {
            let _ = writeln!(console, "rm: {}: {}", name, err);
        }
    }
}

fn cmd_history<S: TextSurface>(console: &mut Console<S>, history: &History) {
    for (i, line) in history.iter().enumerate() {
        let line = core::str::from_utf8(line).unwrap_or("?");
        console_printf!(console, "%3d  %s\n", i + 1, line);
    }
}
