// src/script.rs

//! The user-authored command text.

use std::fmt;

/// Placeholder shown before the user has entered anything.
///
/// Written as a comment in the native interpreter so running it is a no-op.
#[cfg(windows)]
pub const DEFAULT_SCRIPT: &str = "REM Add commands to execute";
#[cfg(not(windows))]
pub const DEFAULT_SCRIPT: &str = "# Add commands to execute";

/// One or more OS commands, exactly as they would appear in a batch file.
///
/// The text is opaque: nothing here parses or validates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandScript(String);

impl CommandScript {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for CommandScript {
    fn default() -> Self {
        Self(DEFAULT_SCRIPT.to_string())
    }
}

impl fmt::Display for CommandScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CommandScript {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for CommandScript {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_a_single_line_comment() {
        let script = CommandScript::default();
        assert_eq!(script.as_str(), DEFAULT_SCRIPT);
        assert!(!script.as_str().contains('\n'));
        assert!(script.as_str().contains("Add commands"));
    }

    #[test]
    fn text_is_kept_verbatim() {
        let text = "  echo one\r\necho two\n\n";
        assert_eq!(CommandScript::new(text).as_str(), text);
    }
}
