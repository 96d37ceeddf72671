//! Calculator commands and key mapping
//!
//! Every frontend (terminal keys, keypad clicks, browser key names, scripted
//! sequences) turns its input into a [`Command`] and hands it to
//! [`Calculator::apply`](crate::core::Calculator::apply).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Digit, Operator};

/// One calculator operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Enter a digit
    Digit(Digit),
    /// Commit a binary operator
    Operator(Operator),
    /// Enter the decimal point
    DecimalPoint,
    /// Evaluate the pending operation ("=")
    Evaluate,
    /// Reset everything except memory ("C")
    ClearAll,
    /// Reset the current entry ("CE")
    ClearEntry,
    /// Drop the last entered character
    Backspace,
    /// Memory store ("MS")
    MemoryStore,
    /// Memory recall ("MR")
    MemoryRecall,
    /// Memory add ("M+")
    MemoryAdd,
    /// Memory subtract ("M-")
    MemorySubtract,
    /// Memory clear ("MC")
    MemoryClear,
}

impl Command {
    /// Maps a browser-style key name to a command.
    ///
    /// Digits, `+ - * /`, `.` or `,`, `Enter` or `=`, `Escape` and
    /// `Backspace` are recognised. Everything else returns `None`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | "=" => Some(Self::Evaluate),
            "Escape" => Some(Self::ClearAll),
            "Backspace" => Some(Self::Backspace),
            "." | "," => Some(Self::DecimalPoint),
            _ => {
                let mut chars = key.chars();
                let (Some(c), None) = (chars.next(), chars.next()) else {
                    return None;
                };
                Digit::from_char(c)
                    .map(Self::Digit)
                    .or_else(|| Operator::from_char(c).map(Self::Operator))
            }
        }
    }

    /// Whether a browser host should suppress the key's default action.
    ///
    /// `,` is handled but deliberately not suppressed.
    #[must_use]
    pub fn suppresses_default(key: &str) -> bool {
        matches!(key, "Enter" | "Escape" | "Backspace")
            || (key.len() == 1 && "0123456789+-*/.=".contains(key))
    }

    /// Keypad label
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Digit(d) => d.as_char().to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::DecimalPoint => ".".to_string(),
            Self::Evaluate => "=".to_string(),
            Self::ClearAll => "C".to_string(),
            Self::ClearEntry => "CE".to_string(),
            Self::Backspace => "⌫".to_string(),
            Self::MemoryStore => "MS".to_string(),
            Self::MemoryRecall => "MR".to_string(),
            Self::MemoryAdd => "M+".to_string(),
            Self::MemorySubtract => "M-".to_string(),
            Self::MemoryClear => "MC".to_string(),
        }
    }

    /// True for the five memory keys
    #[must_use]
    pub const fn is_memory(self) -> bool {
        matches!(
            self,
            Self::MemoryStore
                | Self::MemoryRecall
                | Self::MemoryAdd
                | Self::MemorySubtract
                | Self::MemoryClear
        )
    }
}

/// Keypad buttons row by row, four per row
const KEYPAD_LAYOUT: &str = "<MC><MR><M+><M-> <C><CE><BS>/ 789* 456- 123+ 0.<MS>=";

/// Number of keypad columns
pub const KEYPAD_COLUMNS: usize = 4;

/// Every keypad button in row-major order
#[must_use]
pub fn keypad_commands() -> Vec<Command> {
    parse_key_sequence(KEYPAD_LAYOUT).unwrap_or_default()
}

/// Unknown token in a key sequence
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown key {token:?} at position {position}")]
pub struct KeySequenceError {
    /// Character offset of the token
    pub position: usize,
    /// Offending token
    pub token: String,
}

/// Parses a typed key sequence such as `"12+3="` or `"42<MS><Esc><MR>"`.
///
/// Single characters follow [`Command::from_key`]. Named keys go in angle
/// brackets: `<Enter>`, `<Esc>`, `<BS>`, `<CE>`, `<C>`, `<MS>`, `<MR>`,
/// `<M+>`, `<M->`, `<MC>`. Whitespace is ignored.
pub fn parse_key_sequence(sequence: &str) -> Result<Vec<Command>, KeySequenceError> {
    let mut commands = Vec::new();
    let mut chars = sequence.char_indices();

    while let Some((position, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        if c == '<' {
            let mut name = String::new();
            let mut closed = false;
            for (_, next) in chars.by_ref() {
                if next == '>' {
                    closed = true;
                    break;
                }
                name.push(next);
            }
            let command = closed.then(|| named_key(&name)).flatten();
            match command {
                Some(command) => commands.push(command),
                None => {
                    return Err(KeySequenceError {
                        position,
                        token: format!("<{name}{}", if closed { ">" } else { "" }),
                    })
                }
            }
            continue;
        }

        match Command::from_key(c.encode_utf8(&mut [0; 4])) {
            Some(command) => commands.push(command),
            None => {
                return Err(KeySequenceError {
                    position,
                    token: c.to_string(),
                })
            }
        }
    }

    Ok(commands)
}

/// Looks up an angle-bracket key name (case-insensitive)
fn named_key(name: &str) -> Option<Command> {
    let command = match name.to_ascii_uppercase().as_str() {
        "ENTER" => Command::Evaluate,
        "ESC" | "ESCAPE" | "C" => Command::ClearAll,
        "BS" | "BACKSPACE" => Command::Backspace,
        "CE" | "DEL" | "DELETE" => Command::ClearEntry,
        "MS" => Command::MemoryStore,
        "MR" => Command::MemoryRecall,
        "M+" => Command::MemoryAdd,
        "M-" => Command::MemorySubtract,
        "MC" => Command::MemoryClear,
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit(d: u8) -> Command {
        Command::Digit(Digit::new(d).unwrap())
    }

    // ===== Key mapping =====

    #[test]
    fn test_from_key_digits() {
        for d in 0..=9u8 {
            assert_eq!(Command::from_key(&d.to_string()), Some(digit(d)));
        }
    }

    #[test]
    fn test_from_key_operators() {
        assert_eq!(
            Command::from_key("+"),
            Some(Command::Operator(Operator::Add))
        );
        assert_eq!(
            Command::from_key("-"),
            Some(Command::Operator(Operator::Subtract))
        );
        assert_eq!(
            Command::from_key("*"),
            Some(Command::Operator(Operator::Multiply))
        );
        assert_eq!(
            Command::from_key("/"),
            Some(Command::Operator(Operator::Divide))
        );
    }

    #[test]
    fn test_from_key_decimal_point_and_comma() {
        assert_eq!(Command::from_key("."), Some(Command::DecimalPoint));
        assert_eq!(Command::from_key(","), Some(Command::DecimalPoint));
    }

    #[test]
    fn test_from_key_evaluate() {
        assert_eq!(Command::from_key("Enter"), Some(Command::Evaluate));
        assert_eq!(Command::from_key("="), Some(Command::Evaluate));
    }

    #[test]
    fn test_from_key_escape_and_backspace() {
        assert_eq!(Command::from_key("Escape"), Some(Command::ClearAll));
        assert_eq!(Command::from_key("Backspace"), Some(Command::Backspace));
    }

    #[test]
    fn test_from_key_unknown() {
        assert_eq!(Command::from_key("a"), None);
        assert_eq!(Command::from_key("Tab"), None);
        assert_eq!(Command::from_key("%"), None);
        assert_eq!(Command::from_key(""), None);
        assert_eq!(Command::from_key("12"), None);
    }

    #[test]
    fn test_suppresses_default() {
        for key in ["5", "+", "/", ".", "=", "Enter", "Escape", "Backspace"] {
            assert!(Command::suppresses_default(key), "{key} should be suppressed");
        }
        assert!(!Command::suppresses_default(","));
        assert!(!Command::suppresses_default("Tab"));
        assert!(!Command::suppresses_default("a"));
    }

    // ===== Labels =====

    #[test]
    fn test_labels() {
        assert_eq!(digit(7).label(), "7");
        assert_eq!(Command::Operator(Operator::Divide).label(), "/");
        assert_eq!(Command::ClearEntry.label(), "CE");
        assert_eq!(Command::MemoryAdd.label(), "M+");
    }

    #[test]
    fn test_is_memory() {
        assert!(Command::MemoryRecall.is_memory());
        assert!(!Command::Evaluate.is_memory());
    }

    #[test]
    fn test_keypad_commands_cover_every_command() {
        let commands = keypad_commands();
        assert_eq!(commands.len(), 24);
        assert_eq!(commands.len() % KEYPAD_COLUMNS, 0);
        assert_eq!(commands[0], Command::MemoryClear);
        assert_eq!(commands[23], Command::Evaluate);
        for d in 0..=9 {
            assert!(commands.contains(&digit(d)));
        }
        for op in Operator::ALL {
            assert!(commands.contains(&Command::Operator(op)));
        }
    }

    // ===== Key sequences =====

    #[test]
    fn test_parse_plain_sequence() {
        let commands = parse_key_sequence("5+3*2=").unwrap();
        assert_eq!(
            commands,
            vec![
                digit(5),
                Command::Operator(Operator::Add),
                digit(3),
                Command::Operator(Operator::Multiply),
                digit(2),
                Command::Evaluate,
            ]
        );
    }

    #[test]
    fn test_parse_named_keys() {
        let commands = parse_key_sequence("42 <MS> <esc> <MR>").unwrap();
        assert_eq!(
            commands,
            vec![
                digit(4),
                digit(2),
                Command::MemoryStore,
                Command::ClearAll,
                Command::MemoryRecall,
            ]
        );
    }

    #[test]
    fn test_parse_memory_plus_minus_names() {
        let commands = parse_key_sequence("<M+><M-><MC><CE><BS><Enter>").unwrap();
        assert_eq!(
            commands,
            vec![
                Command::MemoryAdd,
                Command::MemorySubtract,
                Command::MemoryClear,
                Command::ClearEntry,
                Command::Backspace,
                Command::Evaluate,
            ]
        );
    }

    #[test]
    fn test_parse_unknown_char() {
        let err = parse_key_sequence("1+x").unwrap_err();
        assert_eq!(err.position, 2);
        assert_eq!(err.token, "x");
    }

    #[test]
    fn test_parse_unknown_name() {
        let err = parse_key_sequence("1<Nope>").unwrap_err();
        assert_eq!(err.position, 1);
        assert_eq!(err.token, "<Nope>");
    }

    #[test]
    fn test_parse_unclosed_name() {
        let err = parse_key_sequence("<MS").unwrap_err();
        assert_eq!(err.token, "<MS");
        assert!(err.to_string().contains("position 0"));
    }
}
