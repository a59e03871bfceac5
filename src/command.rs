use std::fmt;

/// The eight Brainfuck instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `>`
    Right,
    /// `<`
    Left,
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// `.`
    Output,
    /// `,`
    Input,
    /// `[`
    LoopStart,
    /// `]`
    LoopEnd,
}

impl Command {
    pub fn from_char(ch: char) -> Option<Self> {
        Some(match ch {
            '>' => Command::Right,
            '<' => Command::Left,
            '+' => Command::Increment,
            '-' => Command::Decrement,
            '.' => Command::Output,
            ',' => Command::Input,
            '[' => Command::LoopStart,
            ']' => Command::LoopEnd,
            _ => return None,
        })
    }

    pub fn symbol(self) -> char {
        match self {
            Command::Right => '>',
            Command::Left => '<',
            Command::Increment => '+',
            Command::Decrement => '-',
            Command::Output => '.',
            Command::Input => ',',
            Command::LoopStart => '[',
            Command::LoopEnd => ']',
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_exactly_eight_symbols() {
        let recognized: String = (0u8..=127)
            .map(char::from)
            .filter(|&c| Command::from_char(c).is_some())
            .collect();
        assert_eq!(recognized, "+,-.<>[]");
    }

    #[test]
    fn symbol_matches_parsed_character() {
        for ch in "><+-.,[]".chars() {
            let cmd = Command::from_char(ch).expect("brainfuck symbol");
            assert_eq!(cmd.symbol(), ch);
        }
    }
}
