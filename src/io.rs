//! Byte-level I/O boundary between the interpreter and the outside world.

use std::io::{self, Read, Stderr, Stdin, Stdout, Write};

/// Prompt printed before blocking on a `,` read.
pub const DEFAULT_PROMPT: &str = "\n> ";

/// What the interpreter needs from its host: one byte out, one byte in,
/// and an operator-facing cue before blocking on input.
pub trait Terminal {
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;

    /// Block until one byte is available. `Ok(None)` signals EOF.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    fn prompt(&mut self) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;
}

/// A [`Terminal`] over arbitrary streams.
///
/// Program output goes to `output`; the prompt goes to `cue` so that it
/// never interleaves with program bytes.
pub struct Streams<R, W, P> {
    input: R,
    output: W,
    cue: P,
    prompt: String,
}

impl<R: Read, W: Write, P: Write> Streams<R, W, P> {
    pub fn new(input: R, output: W, cue: P, prompt: impl Into<String>) -> Self {
        Self {
            input,
            output,
            cue,
            prompt: prompt.into(),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl Streams<Stdin, Stdout, Stderr> {
    /// Bind stdin, stdout, and stderr (for the prompt).
    pub fn stdio(prompt: impl Into<String>) -> Self {
        Self::new(io::stdin(), io::stdout(), io::stderr(), prompt)
    }
}

impl<R: Read, W: Write, P: Write> Terminal for Streams<R, W, P> {
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.output.write_all(&[byte])
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn prompt(&mut self) -> io::Result<()> {
        // Program output written so far must land before the cue.
        self.output.flush()?;
        if self.prompt.is_empty() {
            return Ok(());
        }
        self.cue.write_all(self.prompt.as_bytes())?;
        self.cue.flush()
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}

/// Discards output and always reports EOF. Used by debug runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTerminal;

impl Terminal for NullTerminal {
    fn write_byte(&mut self, _byte: u8) -> io::Result<()> {
        Ok(())
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(None)
    }

    fn prompt(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_one_byte_at_a_time_then_eof() {
        let mut t = Streams::new(Cursor::new(b"ab".to_vec()), Vec::new(), io::sink(), "");
        assert_eq!(t.read_byte().unwrap(), Some(b'a'));
        assert_eq!(t.read_byte().unwrap(), Some(b'b'));
        assert_eq!(t.read_byte().unwrap(), None);
    }

    #[test]
    fn prompt_goes_to_cue_not_output() {
        let mut cue = Vec::new();
        let mut t = Streams::new(io::empty(), Vec::new(), &mut cue, "> ");
        t.write_byte(b'x').unwrap();
        t.prompt().unwrap();
        assert_eq!(t.into_output(), b"x");
        assert_eq!(cue, b"> ");
    }

    #[test]
    fn empty_prompt_writes_nothing() {
        let mut cue = Vec::new();
        let mut t = Streams::new(io::empty(), Vec::new(), &mut cue, "");
        t.prompt().unwrap();
        assert!(cue.is_empty());
    }
}
