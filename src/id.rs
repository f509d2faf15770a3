use compact_str::CompactString;
use serde::{Deserialize, Deserializer, Serialize};

use crate::result::VibeError;

/// Account identifier as typed by the user, e.g. `torvalds`
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct Handle {
    value: CompactString,
}

/// Display position of a profile card
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Primary,
    Comparison1,
    Comparison2,
}

impl Handle {
    /// Parses user input into a handle.
    ///
    /// Surrounding whitespace is trimmed. The rest must be ASCII letters,
    /// digits or `-`, which is what GitHub allows in a login and keeps the
    /// handle a single URL path segment.
    pub fn parse(input: &str) -> Result<Self, VibeError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(VibeError::invalid_handle(input, "handle cannot be empty"));
        }

        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(VibeError::invalid_handle(
                input,
                "handle may only contain letters, digits and '-'",
            ));
        }

        Ok(Self { value: trimmed.into() })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Primary, Slot::Comparison1, Slot::Comparison2];

    pub fn index(self) -> usize {
        match self {
            Slot::Primary => 0,
            Slot::Comparison1 => 1,
            Slot::Comparison2 => 2,
        }
    }

    pub fn is_primary(self) -> bool {
        self == Slot::Primary
    }

    pub fn label(self) -> &'static str {
        match self {
            Slot::Primary => "primary",
            Slot::Comparison1 => "comparison-1",
            Slot::Comparison2 => "comparison-2",
        }
    }
}

impl<'de> Deserialize<'de> for Handle {
    fn deserialize<D>(deserializer: D) -> Result<Handle, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = CompactString::deserialize(deserializer)?;
        Handle::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl std::str::FromStr for Handle {
    type Err = VibeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Handle::parse(s)
    }
}

impl std::str::FromStr for Slot {
    type Err = VibeError;

    /// Accepts the 1-based card position or the slot label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "primary" => Ok(Slot::Primary),
            "2" | "comparison-1" => Ok(Slot::Comparison1),
            "3" | "comparison-2" => Ok(Slot::Comparison2),
            other => Err(VibeError::GeneralError(
                format!("unknown slot '{other}', expected 1, 2 or 3").into(),
            )),
        }
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
