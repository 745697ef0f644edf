use super::field::{FieldKind, FieldLayout};
use std::fmt;
use std::sync::Arc;

use FieldKind::*;

const ADDRESS_V4: FieldLayout = FieldLayout::fixed(&[Ipv4]);
const ADDRESS_V6: FieldLayout = FieldLayout::fixed(&[Ipv6]);
const SINGLE_NAME: FieldLayout = FieldLayout::fixed(&[Name]);
const MAIL_EXCHANGE: FieldLayout = FieldLayout::fixed(&[U16, Name]);
const TEXT_STRINGS: FieldLayout = FieldLayout::variadic(&[Text], Text);
const HOST_INFO: FieldLayout = FieldLayout::fixed(&[Text, Text]);
const SERVICE: FieldLayout = FieldLayout::fixed(&[U16, U16, U16, Name]);
const START_OF_AUTHORITY: FieldLayout =
    FieldLayout::fixed(&[Name, Name, U32, Time, Time, Time, Time]);
const OPAQUE: FieldLayout = FieldLayout::variadic(&[], Text);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    NS,
    CNAME,
    SOA,
    PTR,
    HINFO,
    MX,
    TXT,
    AAAA,
    SRV,
    /// A type outside the lookup table, kept upper-cased for comparison.
    /// Matchable, but rejected by the codec.
    Unknown(Arc<str>),
}

impl RecordType {
    pub fn as_str(&self) -> &str {
        match self {
            RecordType::A => "A",
            RecordType::NS => "NS",
            RecordType::CNAME => "CNAME",
            RecordType::SOA => "SOA",
            RecordType::PTR => "PTR",
            RecordType::HINFO => "HINFO",
            RecordType::MX => "MX",
            RecordType::TXT => "TXT",
            RecordType::AAAA => "AAAA",
            RecordType::SRV => "SRV",
            RecordType::Unknown(token) => token,
        }
    }

    pub fn to_u16(&self) -> Option<u16> {
        match self {
            RecordType::A => Some(1),
            RecordType::NS => Some(2),
            RecordType::CNAME => Some(5),
            RecordType::SOA => Some(6),
            RecordType::PTR => Some(12),
            RecordType::HINFO => Some(13),
            RecordType::MX => Some(15),
            RecordType::TXT => Some(16),
            RecordType::AAAA => Some(28),
            RecordType::SRV => Some(33),
            RecordType::Unknown(_) => None,
        }
    }

    pub fn from_u16(code: u16) -> Self {
        match code {
            1 => RecordType::A,
            2 => RecordType::NS,
            5 => RecordType::CNAME,
            6 => RecordType::SOA,
            12 => RecordType::PTR,
            13 => RecordType::HINFO,
            15 => RecordType::MX,
            16 => RecordType::TXT,
            28 => RecordType::AAAA,
            33 => RecordType::SRV,
            other => RecordType::Unknown(Arc::from(format!("TYPE{}", other))),
        }
    }

    /// Case-insensitive; never fails, unrecognised tokens become `Unknown`.
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_uppercase().as_str() {
            "A" => RecordType::A,
            "NS" => RecordType::NS,
            "CNAME" => RecordType::CNAME,
            "SOA" => RecordType::SOA,
            "PTR" => RecordType::PTR,
            "HINFO" => RecordType::HINFO,
            "MX" => RecordType::MX,
            "TXT" => RecordType::TXT,
            "AAAA" => RecordType::AAAA,
            "SRV" => RecordType::SRV,
            other => RecordType::Unknown(Arc::from(other)),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, RecordType::Unknown(_))
    }

    pub fn field_layout(&self) -> FieldLayout {
        match self {
            RecordType::A => ADDRESS_V4,
            RecordType::AAAA => ADDRESS_V6,
            RecordType::NS | RecordType::CNAME | RecordType::PTR => SINGLE_NAME,
            RecordType::MX => MAIL_EXCHANGE,
            RecordType::TXT => TEXT_STRINGS,
            RecordType::HINFO => HOST_INFO,
            RecordType::SRV => SERVICE,
            RecordType::SOA => START_OF_AUTHORITY,
            RecordType::Unknown(_) => OPAQUE,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
