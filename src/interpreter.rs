//! The execution engine: program, tape, loop stack, and the dispatch loop.
//!
//! Behaviors:
//! - Spaces, tabs, newlines, and carriage returns are stripped from the
//!   source; every other character is kept and validated only when the
//!   instruction pointer reaches it.
//! - The tape is unbounded in both directions and zero-initialized.
//! - `[` with a zero cell scans forward for its matching `]` every time;
//!   `]` with a nonzero cell jumps back through the loop stack.
//! - A `]` with a zero cell and no open loop is ignored.
//! - Reaching the end of the program with loops still open is not an error.
//! - Normal termination writes one trailing newline.
//!
//! ```
//! use std::io;
//! use tape_bf::{Interpreter, Streams};
//!
//! let mut bf = Interpreter::new("++++++++[>++++++++<-]>+.");
//! let mut term = Streams::new(io::empty(), Vec::new(), io::sink(), "");
//! bf.run(&mut term).unwrap();
//! assert_eq!(term.into_output(), b"A\n");
//! ```

use std::fmt;
use std::io::Write;

use tracing::{debug, trace};

use crate::command::Command;
use crate::io::{NullTerminal, Terminal};
use crate::tape::{Byte, Tape};

/// Errors that stop execution. None of them are recoverable.
#[derive(Debug, thiserror::Error)]
pub enum InterpreterError {
    /// A character outside `><+-.,[]` was reached by the instruction pointer.
    #[error("Invalid command '{ch}' at {ip}")]
    InvalidCommand { ch: char, ip: usize },

    /// A `[` has no matching `]`, or a `]` tried to repeat a loop that was never entered.
    #[error("Unmatched {kind} bracket at column {ip}")]
    UnbalancedBracket { ip: usize, kind: BracketKind },

    /// The host failed to read or write a byte.
    #[error("I/O error at instruction {ip}: {source}")]
    Io {
        ip: usize,
        #[source]
        source: std::io::Error,
    },
}

impl InterpreterError {
    /// Program position the error points at.
    pub fn ip(&self) -> usize {
        match self {
            InterpreterError::InvalidCommand { ip, .. }
            | InterpreterError::UnbalancedBracket { ip, .. }
            | InterpreterError::Io { ip, .. } => *ip,
        }
    }
}

/// Which side of a loop was left unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    Open,
    Close,
}

impl fmt::Display for BracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketKind::Open => write!(f, "'['"),
            BracketKind::Close => write!(f, "']'"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Terminated,
    Failed,
}

/// Result of a single [`Interpreter::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Executed { ip: usize, command: Command, effect: Effect },
    /// The interpreter has terminated or failed; nothing was executed.
    Halted,
}

/// What one instruction did to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Moved { to: isize },
    Incremented { cell: isize, from: u8, to: u8 },
    Decremented { cell: isize, from: u8, to: u8 },
    Wrote(u8),
    /// `None` when input was exhausted and the cell was set to 0.
    Read(Option<u8>),
    EnteredLoop,
    SkippedLoop { to: usize },
    RepeatedLoop { to: usize },
    ExitedLoop,
    StrayLoopEnd,
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Moved { to } => write!(f, "Moved pointer head to index {to}"),
            Effect::Incremented { cell, from, to } => {
                write!(f, "Increment cell[{cell}] from {from} to {to}")
            }
            Effect::Decremented { cell, from, to } => {
                write!(f, "Decrement cell[{cell}] from {from} to {to}")
            }
            Effect::Wrote(b) => write!(f, "Output byte {b}"),
            Effect::Read(Some(b)) => write!(f, "Read byte {b}"),
            Effect::Read(None) => write!(f, "Read hit EOF (set cell to 0)"),
            Effect::EnteredLoop => write!(f, "Enter loop (cell != 0)"),
            Effect::SkippedLoop { to } => {
                write!(f, "Cell is 0; jump forward to matching ']' at IP {to}")
            }
            Effect::RepeatedLoop { to } => write!(f, "Cell != 0; jump back to '[' at IP {to}"),
            Effect::ExitedLoop => write!(f, "Exit loop (cell is 0)"),
            Effect::StrayLoopEnd => write!(f, "Cell is 0; ignore ']' with no open loop"),
        }
    }
}

fn io_error_at(ip: usize) -> impl FnOnce(std::io::Error) -> InterpreterError {
    move |source| InterpreterError::Io { ip, source }
}

/// A Brainfuck interpreter over an unbounded byte tape.
#[derive(Debug, Clone)]
pub struct Interpreter {
    program: Vec<char>,
    // `None` until the first instruction is dispatched.
    ip: Option<usize>,
    tape: Tape,
    pointer: isize,
    loop_stack: Vec<usize>,
    status: Status,
}

impl Interpreter {
    /// Load `source`, dropping spaces, tabs, newlines, and carriage returns.
    pub fn new(source: &str) -> Self {
        let program = source
            .chars()
            .filter(|c| !matches!(c, '\n' | '\r' | '\t' | ' '))
            .collect();

        Self {
            program,
            ip: None,
            tape: Tape::new(),
            pointer: 0,
            loop_stack: Vec::new(),
            status: Status::Running,
        }
    }

    pub fn program(&self) -> &[char] {
        &self.program
    }

    /// The stripped program as a string, for diagnostics.
    pub fn program_text(&self) -> String {
        self.program.iter().collect()
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn pointer(&self) -> isize {
        self.pointer
    }

    pub fn current(&self) -> Byte {
        self.tape.get(self.pointer)
    }

    /// Number of loops entered and not yet exited.
    pub fn loop_depth(&self) -> usize {
        self.loop_stack.len()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Execute the program until it runs off the end or fails.
    ///
    /// Calling `run` again after termination or failure does nothing.
    pub fn run<T: Terminal + ?Sized>(&mut self, io: &mut T) -> Result<(), InterpreterError> {
        debug!(len = self.program.len(), "run started");
        while let Step::Executed { .. } = self.step(io)? {}
        Ok(())
    }

    /// Execute without producing I/O, writing one table row per instruction
    /// to `table`. `.` is suppressed and `,` behaves as if input hit EOF;
    /// the tape evolves exactly as in a real run.
    pub fn run_debug<W: Write + ?Sized>(&mut self, table: &mut W) -> Result<(), InterpreterError> {
        writeln!(table, "STEP | IP  | PTR | CELL | INSTR | ACTION").map_err(io_error_at(0))?;
        writeln!(
            table,
            "-----+-----+-----+------+-------+------------------------------------------------"
        )
        .map_err(io_error_at(0))?;

        let mut io = NullTerminal;
        let mut step = 0usize;
        loop {
            let (ptr_before, cell_before) = (self.pointer, self.current());
            let Step::Executed { ip, command, effect } = self.step(&mut io)? else {
                break;
            };
            writeln!(
                table,
                "{:<4} | {:<3} | {:<3} | {:<4} |  {}    | {}",
                step, ip, ptr_before, cell_before.value(), command, effect
            )
            .map_err(io_error_at(ip))?;
            step += 1;
        }
        Ok(())
    }

    /// Advance the instruction pointer and dispatch one command.
    ///
    /// When the pointer passes the end of the program the trailing newline
    /// is written, the interpreter becomes [`Status::Terminated`], and
    /// [`Step::Halted`] is returned.
    pub fn step<T: Terminal + ?Sized>(&mut self, io: &mut T) -> Result<Step, InterpreterError> {
        if self.status != Status::Running {
            return Ok(Step::Halted);
        }

        let ip = self.ip.map_or(0, |ip| ip + 1);
        self.ip = Some(ip);

        let Some(&ch) = self.program.get(ip) else {
            self.status = Status::Terminated;
            debug!(open_loops = self.loop_stack.len(), "program exhausted");
            io.write_byte(b'\n')
                .and_then(|_| io.flush())
                .map_err(io_error_at(ip))?;
            return Ok(Step::Halted);
        };

        match self.dispatch(ip, ch, io) {
            Ok((command, effect)) => {
                trace!(ip, %command, ptr = self.pointer, %effect, "step");
                Ok(Step::Executed { ip, command, effect })
            }
            Err(e) => {
                self.status = Status::Failed;
                Err(e)
            }
        }
    }

    fn dispatch<T: Terminal + ?Sized>(
        &mut self,
        ip: usize,
        ch: char,
        io: &mut T,
    ) -> Result<(Command, Effect), InterpreterError> {
        let command = Command::from_char(ch).ok_or(InterpreterError::InvalidCommand { ch, ip })?;

        let effect = match command {
            Command::Right => {
                self.pointer += 1;
                self.tape.ensure(self.pointer);
                Effect::Moved { to: self.pointer }
            }
            Command::Left => {
                self.pointer -= 1;
                self.tape.ensure(self.pointer);
                Effect::Moved { to: self.pointer }
            }
            Command::Increment => {
                let cell = self.tape.get_mut(self.pointer);
                let from = cell.value();
                cell.increment();
                Effect::Incremented { cell: self.pointer, from, to: cell.value() }
            }
            Command::Decrement => {
                let cell = self.tape.get_mut(self.pointer);
                let from = cell.value();
                cell.decrement();
                Effect::Decremented { cell: self.pointer, from, to: cell.value() }
            }
            Command::Output => {
                let byte = self.current().value();
                io.write_byte(byte).map_err(io_error_at(ip))?;
                Effect::Wrote(byte)
            }
            Command::Input => {
                io.prompt().map_err(io_error_at(ip))?;
                let byte = io.read_byte().map_err(io_error_at(ip))?;
                *self.tape.get_mut(self.pointer) = Byte::new(byte.unwrap_or(0));
                Effect::Read(byte)
            }
            Command::LoopStart => {
                if self.current() == 0u8 {
                    let to = self.closing_brace(ip)?;
                    self.ip = Some(to);
                    Effect::SkippedLoop { to }
                } else {
                    self.loop_stack.push(ip);
                    Effect::EnteredLoop
                }
            }
            Command::LoopEnd => {
                if self.current() == 0u8 {
                    match self.loop_stack.pop() {
                        Some(_) => Effect::ExitedLoop,
                        None => {
                            debug!(ip, "ignoring ']' with no open loop");
                            Effect::StrayLoopEnd
                        }
                    }
                } else {
                    let Some(&to) = self.loop_stack.last() else {
                        return Err(InterpreterError::UnbalancedBracket {
                            ip,
                            kind: BracketKind::Close,
                        });
                    };
                    self.ip = Some(to);
                    Effect::RepeatedLoop { to }
                }
            }
        };

        Ok((command, effect))
    }

    /// Scan forward from the `[` at `open` to its matching `]`.
    fn closing_brace(&self, open: usize) -> Result<usize, InterpreterError> {
        let mut depth = 0usize;
        for (i, &c) in self.program.iter().enumerate().skip(open + 1) {
            match c {
                '[' => depth += 1,
                ']' if depth == 0 => return Ok(i),
                ']' => depth -= 1,
                _ => {}
            }
        }

        Err(InterpreterError::UnbalancedBracket {
            ip: open,
            kind: BracketKind::Open,
        })
    }
}
