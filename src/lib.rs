//! A small Brainfuck interpreter over an unbounded, bidirectional byte tape.
//!
//! Features and behaviors:
//! - Tape cells are created on demand and start at 0; the pointer may move
//!   left of the origin.
//! - Cell arithmetic wraps modulo 256.
//! - Whitespace is stripped at load time; any other non-command character is
//!   an error when (and only when) execution reaches it.
//! - Loops are matched at runtime: a forward scan when a loop is skipped and
//!   a loop stack for repeating one.
//! - `.` writes one byte; `,` prompts and reads one byte (EOF stores 0).
//!
//! Quick start:
//!
//! ```no_run
//! use tape_bf::{Interpreter, Streams, DEFAULT_PROMPT};
//!
//! let code = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.";
//! let mut bf = Interpreter::new(code);
//! bf.run(&mut Streams::stdio(DEFAULT_PROMPT)).expect("program should run");
//! ```

pub mod cli_util;
pub mod command;
pub mod config;
pub mod interpreter;
pub mod io;
pub mod tape;

pub use command::Command;
pub use config::Config;
pub use interpreter::{BracketKind, Effect, Interpreter, InterpreterError, Status, Step};
pub use io::{NullTerminal, Streams, Terminal, DEFAULT_PROMPT};
pub use tape::{Byte, Tape};
