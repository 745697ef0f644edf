use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordClass {
    IN,
    CS,
    CH,
    HS,
    /// A class outside the lookup table, kept upper-cased for comparison.
    Unknown(Arc<str>),
}

impl RecordClass {
    pub fn as_str(&self) -> &str {
        match self {
            RecordClass::IN => "IN",
            RecordClass::CS => "CS",
            RecordClass::CH => "CH",
            RecordClass::HS => "HS",
            RecordClass::Unknown(token) => token,
        }
    }

    pub fn to_u16(&self) -> Option<u16> {
        match self {
            RecordClass::IN => Some(1),
            RecordClass::CS => Some(2),
            RecordClass::CH => Some(3),
            RecordClass::HS => Some(4),
            RecordClass::Unknown(_) => None,
        }
    }

    pub fn from_u16(code: u16) -> Self {
        match code {
            1 => RecordClass::IN,
            2 => RecordClass::CS,
            3 => RecordClass::CH,
            4 => RecordClass::HS,
            other => RecordClass::Unknown(Arc::from(format!("CLASS{}", other))),
        }
    }

    /// Recognizes class mnemonics in zone files. Anything else is not a class.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "IN" => Some(RecordClass::IN),
            "CS" => Some(RecordClass::CS),
            "CH" | "CHAOS" => Some(RecordClass::CH),
            "HS" | "HESIOD" => Some(RecordClass::HS),
            _ => None,
        }
    }

    /// Builds a class from any token, falling back to `Unknown`.
    pub fn from_any_token(token: &str) -> Self {
        Self::from_token(token)
            .unwrap_or_else(|| RecordClass::Unknown(Arc::from(token.to_ascii_uppercase())))
    }
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
