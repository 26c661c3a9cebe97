// src/state.rs

//! Persisted form of the command text.
//!
//! The host stores a single text value per task. We wrap the script as
//!
//! ```xml
//! <SysCommands><Commands>echo hello</Commands></SysCommands>
//! ```
//!
//! Restoring never fails from the caller's point of view: anything we cannot
//! read is logged and the current script is kept, so a damaged project still
//! opens.

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::Event;
use tracing::{debug, warn};

use crate::errors::{Result, SysCommandError};
use crate::script::CommandScript;

pub const ROOT_ELEMENT: &str = "SysCommands";
pub const COMMANDS_ELEMENT: &str = "Commands";

/// Serialize the script into its persisted form.
///
/// Carriage returns are written as character references; XML readers fold
/// raw `\r\n` into `\n`, which would silently rewrite Windows batch text.
pub fn encode(script: &CommandScript) -> String {
    let body = escape(script.as_str()).replace('\r', "&#13;");
    format!("<{ROOT_ELEMENT}><{COMMANDS_ELEMENT}>{body}</{COMMANDS_ELEMENT}></{ROOT_ELEMENT}>")
}

/// Parse the persisted form back into a script.
pub fn decode(text: &str) -> Result<CommandScript> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(false);

    match next_structural(&mut reader)? {
        Event::Start(e) if e.name().as_ref() == ROOT_ELEMENT.as_bytes() => {}
        Event::Eof => return Err(corrupt("no content")),
        other => return Err(corrupt(format!("expected <{ROOT_ELEMENT}>, found {other:?}"))),
    }

    let commands = match next_structural(&mut reader)? {
        Event::Start(e) if e.name().as_ref() == COMMANDS_ELEMENT.as_bytes() => {
            read_commands_text(&mut reader)?
        }
        Event::Empty(e) if e.name().as_ref() == COMMANDS_ELEMENT.as_bytes() => String::new(),
        other => {
            return Err(corrupt(format!(
                "expected <{COMMANDS_ELEMENT}>, found {other:?}"
            )));
        }
    };

    match next_structural(&mut reader)? {
        Event::End(e) if e.name().as_ref() == ROOT_ELEMENT.as_bytes() => {}
        other => return Err(corrupt(format!("expected </{ROOT_ELEMENT}>, found {other:?}"))),
    }

    Ok(CommandScript::new(commands))
}

/// Replace `script` with the decoded state, or leave it untouched if the
/// state is empty or unreadable.
pub fn restore(script: &mut CommandScript, text: &str) {
    if text.is_empty() {
        debug!("no persisted state; keeping current commands");
        return;
    }

    match decode(text) {
        Ok(restored) => *script = restored,
        Err(err) => {
            warn!(error = %err, "ignoring unreadable persisted state; keeping current commands");
        }
    }
}

/// Next event that carries document structure, skipping prolog noise and
/// whitespace between elements.
fn next_structural<'a>(reader: &mut Reader<&'a [u8]>) -> Result<Event<'a>> {
    loop {
        match reader.read_event().map_err(corrupt)? {
            Event::Text(t) if t.iter().all(u8::is_ascii_whitespace) => continue,
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => continue,
            event => return Ok(event),
        }
    }
}

fn read_commands_text(reader: &mut Reader<&[u8]>) -> Result<String> {
    let mut out = String::new();
    loop {
        match reader.read_event().map_err(corrupt)? {
            Event::Text(t) => out.push_str(&t.unescape().map_err(corrupt)?),
            Event::CData(c) => out.push_str(std::str::from_utf8(&c).map_err(corrupt)?),
            Event::Comment(_) | Event::PI(_) => {}
            // The reader has already checked that this closes <Commands>.
            Event::End(_) => return Ok(out),
            Event::Eof => return Err(corrupt(format!("unterminated <{COMMANDS_ELEMENT}>"))),
            other => {
                return Err(corrupt(format!(
                    "unexpected {other:?} inside <{COMMANDS_ELEMENT}>"
                )));
            }
        }
    }
}

fn corrupt(err: impl std::fmt::Display) -> SysCommandError {
    SysCommandError::PersistedStateCorrupt(err.to_string())
}
