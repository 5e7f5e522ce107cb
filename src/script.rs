//! Replay script parsing: one control event per line.
//!
//! ```text
//! # comments and blank lines are skipped
//! count 8        # also: amount 8
//! scale 1.6
//! rotation -0.5
//! click 2        # toggle bunny 2
//! tap 75 30      # pointer down at stage coordinates
//! ```
//!
//! Field values are passed through unparsed, exactly as a panel widget would
//! report them; the controller does the coercion.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use bunnies::controller::ControlEvent;
use bunnies::entity::EntityId;
use bunnies::panel::FieldId;
use bunnies::surface::Point;

/// Why a script line could not be turned into an event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("`{command}` expects {expected}")]
    MissingArgument { command: String, expected: &'static str },
    #[error("unexpected trailing input `{0}`")]
    TrailingInput(String),
    #[error("invalid bunny id `{0}`")]
    InvalidId(String),
    #[error("invalid coordinate `{0}`")]
    InvalidCoordinate(String),
}

/// Parse one script line. Returns `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// Returns a [`ScriptError`] describing the first problem on the line.
pub fn parse_line(line: &str) -> Result<Option<ControlEvent>, ScriptError> {
    let line = line.split_once('#').map_or(line, |(code, _)| code);
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };

    let event = match command {
        "click" => {
            let raw = expect_arg(&mut words, command, "a bunny id")?;
            let id = raw.parse::<u32>().map_err(|_| ScriptError::InvalidId(raw.to_owned()))?;
            ControlEvent::EntityClicked(EntityId(id))
        }
        "tap" => {
            let x = parse_coordinate(expect_arg(&mut words, command, "x and y coordinates")?)?;
            let y = parse_coordinate(expect_arg(&mut words, command, "x and y coordinates")?)?;
            ControlEvent::PointerDown(Point::new(x, y))
        }
        other => {
            let field = other
                .parse::<FieldId>()
                .map_err(|_| ScriptError::UnknownCommand(other.to_owned()))?;
            let raw = expect_arg(&mut words, command, "a value")?;
            ControlEvent::FieldChanged { field, raw: raw.to_owned() }
        }
    };

    let rest: Vec<&str> = words.collect();
    if !rest.is_empty() {
        return Err(ScriptError::TrailingInput(rest.join(" ")));
    }
    Ok(Some(event))
}

fn expect_arg<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &str,
    expected: &'static str,
) -> Result<&'a str, ScriptError> {
    words
        .next()
        .ok_or_else(|| ScriptError::MissingArgument { command: command.to_owned(), expected })
}

fn parse_coordinate(raw: &str) -> Result<f64, ScriptError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ScriptError::InvalidCoordinate(raw.to_owned()))
}
