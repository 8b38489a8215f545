//! Prompt helpers with inquire → stdin fallback.
//!
//! When `inquire` cannot drive the terminal (e.g. no real TTY), every prompt
//! degrades to a plain numbered menu over stdin.

use inquire::{Confirm, InquireError, Select};
use std::fmt;
use std::io::{self, BufRead, Write};

#[derive(Debug)]
pub enum PromptError {
    Cancelled,
    OutOfRange { given: String, count: usize },
    Io(io::Error),
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptError::Cancelled => write!(f, "入力がキャンセルされました"),
            PromptError::OutOfRange { given, count } => {
                write!(f, "選択が範囲外です: {given}（1〜{count} で指定してください）")
            }
            PromptError::Io(err) => write!(f, "入力を読み取れません: {err}"),
        }
    }
}

impl std::error::Error for PromptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PromptError::Io(err) => Some(err),
            PromptError::Cancelled | PromptError::OutOfRange { .. } => None,
        }
    }
}

/// Read a trimmed line from stdin.
fn read_line() -> Result<String, PromptError> {
    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .map_err(PromptError::Io)?;
    Ok(input.trim().to_string())
}

fn parse_selection(input: &str, count: usize) -> Result<usize, PromptError> {
    let number: usize = input.trim().parse().map_err(|_| PromptError::OutOfRange {
        given: input.trim().to_string(),
        count,
    })?;
    if (1..=count).contains(&number) {
        Ok(number - 1)
    } else {
        Err(PromptError::OutOfRange {
            given: input.trim().to_string(),
            count,
        })
    }
}

/// Single-choice prompt with fallback.
pub(crate) fn select<'a>(message: &str, items: &[&'a str]) -> Result<&'a str, PromptError> {
    match Select::new(message, items.to_vec()).prompt() {
        Ok(choice) => Ok(choice),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            Err(PromptError::Cancelled)
        }
        Err(_) => select_fallback(message, items),
    }
}

fn select_fallback<'a>(message: &str, items: &[&'a str]) -> Result<&'a str, PromptError> {
    println!("{message}");
    for (idx, item) in items.iter().enumerate() {
        println!("  {}. {}", idx + 1, item);
    }
    print!("番号を入力してください: ");
    io::stdout().flush().map_err(PromptError::Io)?;
    let input = read_line()?;
    let idx = parse_selection(&input, items.len())?;
    Ok(items[idx])
}

/// Single-choice prompt where the first entry means "no selection".
pub(crate) fn select_optional<'a>(
    message: &str,
    items: &[&'a str],
) -> Result<Option<&'a str>, PromptError> {
    const NONE_CHOICE: &str = "選択なし";
    let mut menu = Vec::with_capacity(items.len() + 1);
    menu.push(NONE_CHOICE);
    menu.extend_from_slice(items);
    let choice = select(message, &menu)?;
    Ok(if choice == NONE_CHOICE {
        None
    } else {
        Some(choice)
    })
}

/// Yes/no prompt with fallback; defaults to no.
pub(crate) fn confirm(message: &str) -> Result<bool, PromptError> {
    match Confirm::new(message).with_default(false).prompt() {
        Ok(choice) => Ok(choice),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            Err(PromptError::Cancelled)
        }
        Err(_) => {
            print!("? {message} (y/N) ");
            io::stdout().flush().map_err(PromptError::Io)?;
            let input = read_line()?;
            Ok(matches!(input.to_lowercase().as_str(), "y" | "yes"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_selection_accepts_in_range_numbers() {
        assert_eq!(parse_selection("1", 5).expect("valid"), 0);
        assert_eq!(parse_selection(" 5 ", 5).expect("valid"), 4);
    }

    #[test]
    fn parse_selection_rejects_out_of_range_numbers() {
        let err = parse_selection("6", 5).expect_err("out of range");
        assert!(matches!(err, PromptError::OutOfRange { count: 5, .. }));
        assert!(parse_selection("0", 5).is_err());
    }

    #[test]
    fn parse_selection_rejects_non_numeric_input() {
        let err = parse_selection("正規生", 3).expect_err("not a number");
        assert!(err.to_string().contains("正規生"));
    }
}
