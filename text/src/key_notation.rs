//! Key notation parsing for vim-like key sequences.
//!
//! Converts a string such as `"abc<Enter><BS><C-End>"` into [`KeyInput`]s.
//! Plain characters become one [`KeyInput::Text`] each. Special keys are
//! enclosed in angle brackets; a `<` without a closing `>` is taken literally.
//!
//! | Notation | Key |
//! |----------|-----|
//! | `<Enter>` `<CR>` `<Return>` | [`KeyInput::Enter`] |
//! | `<BS>` `<Backspace>` | [`KeyInput::Backspace`] |
//! | `<Del>` `<Delete>` | [`KeyInput::Delete`] |
//! | `<Left>` `<Right>` `<Up>` `<Down>` | arrows |
//! | `<Home>` `<End>`, `<C-Home>` `<C-End>` | line / buffer jumps |
//! | `<Tab>` `<Space>` `<lt>` | literal tab, space, `<` |

use crate::input::KeyInput;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("Unknown key <{name}>")]
    UnknownKey { name: String },
}

/// Parse a key sequence
///
/// ```
/// use rpe_text::{key_notation::parse_sequence, KeyInput};
///
/// let keys = parse_sequence("hi<Enter>").unwrap();
/// assert_eq!(keys.len(), 3);
/// assert_eq!(keys[2], KeyInput::Enter);
/// ```
pub fn parse_sequence(input: &str) -> Result<Vec<KeyInput>, NotationError> {
    let mut keys = Vec::new();
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if ch != '<' {
            keys.push(KeyInput::Text(ch.to_string()));
            continue;
        }

        let mut name = String::new();
        let mut found_closing = false;
        for next in chars.by_ref() {
            if next == '>' {
                found_closing = true;
                break;
            }
            name.push(next);
        }

        if !found_closing {
            // Treat as literal '<' followed by what we collected
            keys.push(KeyInput::Text(ch.to_string()));
            keys.extend(name.chars().map(|ch| KeyInput::Text(ch.to_string())));
            continue;
        }

        keys.push(parse_special_key(&name)?);
    }

    Ok(keys)
}

/// Parse the name between angle brackets
fn parse_special_key(name: &str) -> Result<KeyInput, NotationError> {
    let lowered = name.to_lowercase();
    let (ctrl, base) = match lowered
        .strip_prefix("c-")
        .or_else(|| lowered.strip_prefix("ctrl-"))
    {
        Some(base) => (true, base),
        None => (false, lowered.as_str()),
    };

    let key = match (ctrl, base) {
        (_, "home") => KeyInput::Home { ctrl },
        (_, "end") => KeyInput::End { ctrl },
        (false, "enter" | "cr" | "return") => KeyInput::Enter,
        (false, "bs" | "backspace") => KeyInput::Backspace,
        (false, "del" | "delete") => KeyInput::Delete,
        (false, "left") => KeyInput::Left,
        (false, "right") => KeyInput::Right,
        (false, "up") => KeyInput::Up,
        (false, "down") => KeyInput::Down,
        (false, "tab") => KeyInput::text("\t"),
        (false, "space") => KeyInput::text(" "),
        (false, "lt") => KeyInput::text("<"),
        _ => {
            return Err(NotationError::UnknownKey {
                name: name.to_owned(),
            })
        },
    };
    Ok(key)
}
