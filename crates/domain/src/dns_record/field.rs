use crate::domain_name::DomainName;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Ipv4,
    Ipv6,
    /// 16-bit unsigned on the wire.
    U16,
    /// 32-bit unsigned on the wire.
    U32,
    /// 32-bit unsigned on the wire, written as a time literal in zone files.
    Time,
    Name,
    /// Length-prefixed character string on the wire.
    Text,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Ipv4 => "ipv4",
            FieldKind::Ipv6 => "ipv6",
            FieldKind::U16 => "u16",
            FieldKind::U32 => "u32",
            FieldKind::Time => "time",
            FieldKind::Name => "name",
            FieldKind::Text => "text",
        }
    }
}

/// Arity and kind contract for one record type's field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub required: &'static [FieldKind],
    /// Kind of any fields after `required`; `None` means no extra fields.
    pub rest: Option<FieldKind>,
}

impl FieldLayout {
    pub const fn fixed(required: &'static [FieldKind]) -> Self {
        Self {
            required,
            rest: None,
        }
    }

    pub const fn variadic(required: &'static [FieldKind], rest: FieldKind) -> Self {
        Self {
            required,
            rest: Some(rest),
        }
    }

    pub fn kind_at(&self, index: usize) -> Option<FieldKind> {
        self.required.get(index).copied().or(self.rest)
    }

    pub fn accepts_count(&self, count: usize) -> bool {
        match self.rest {
            Some(_) => count >= self.required.len(),
            None => count == self.required.len(),
        }
    }

    pub fn describe_arity(&self) -> String {
        match self.rest {
            Some(_) => format!("at least {}", self.required.len()),
            None => self.required.len().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordField {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    Integer(u64),
    Name(DomainName),
    Text(Arc<str>),
}

impl RecordField {
    pub fn text(value: impl Into<Arc<str>>) -> Self {
        RecordField::Text(value.into())
    }

    pub fn fits(&self, kind: FieldKind) -> bool {
        matches!(
            (self, kind),
            (RecordField::Ipv4(_), FieldKind::Ipv4)
                | (RecordField::Ipv6(_), FieldKind::Ipv6)
                | (
                    RecordField::Integer(_),
                    FieldKind::U16 | FieldKind::U32 | FieldKind::Time
                )
                | (RecordField::Name(_), FieldKind::Name)
                | (RecordField::Text(_), FieldKind::Text)
        )
    }

    pub fn as_name(&self) -> Option<&DomainName> {
        match self {
            RecordField::Name(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<u64> {
        match self {
            RecordField::Integer(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordField::Ipv4(addr) => write!(f, "{}", addr),
            RecordField::Ipv6(addr) => write!(f, "{}", addr),
            RecordField::Integer(value) => write!(f, "{}", value),
            RecordField::Name(name) => write!(f, "{}", name),
            RecordField::Text(text) => {
                f.write_str("\"")?;
                for c in text.chars() {
                    if c == '"' || c == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{}", c)?;
                }
                f.write_str("\"")
            }
        }
    }
}
