use super::{RecordClass, RecordField, RecordType};
use crate::domain_name::DomainName;
use crate::errors::ParseError;
use std::fmt;

/// One resource record. Immutable once built: the field list is checked
/// against the type's layout in `new` and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRecord {
    name: DomainName,
    ttl: u32,
    class: RecordClass,
    record_type: RecordType,
    fields: Vec<RecordField>,
}

impl DomainRecord {
    pub fn new(
        name: DomainName,
        ttl: u32,
        class: RecordClass,
        record_type: RecordType,
        fields: Vec<RecordField>,
    ) -> Result<Self, ParseError> {
        let layout = record_type.field_layout();

        if !layout.accepts_count(fields.len()) {
            return Err(ParseError::malformed(
                0,
                format!(
                    "{} needs {} field(s), got {}",
                    record_type,
                    layout.describe_arity(),
                    fields.len()
                ),
            ));
        }

        for (index, field) in fields.iter().enumerate() {
            let fits = layout.kind_at(index).is_some_and(|kind| field.fits(kind));
            if !fits {
                return Err(ParseError::malformed(
                    0,
                    format!("{} field {} has the wrong kind: {}", record_type, index + 1, field),
                ));
            }
        }

        Ok(Self {
            name,
            ttl,
            class,
            record_type,
            fields,
        })
    }

    pub fn name(&self) -> &DomainName {
        &self.name
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn class(&self) -> &RecordClass {
        &self.class
    }

    pub fn record_type(&self) -> &RecordType {
        &self.record_type
    }

    pub fn fields(&self) -> &[RecordField] {
        &self.fields
    }

    pub fn is_wildcard(&self) -> bool {
        self.name.is_wildcard()
    }

    /// Same record data under another owner, used when answering from a wildcard.
    pub fn with_owner(&self, name: DomainName) -> Self {
        Self {
            name,
            ..self.clone()
        }
    }

    /// Identity used for duplicate detection: everything except the ttl.
    pub fn same_data(&self, other: &DomainRecord) -> bool {
        self.name == other.name
            && self.class == other.class
            && self.record_type == other.record_type
            && self.fields == other.fields
    }
}

impl fmt::Display for DomainRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.name, self.ttl, self.class, self.record_type
        )?;
        for field in &self.fields {
            write!(f, " {}", field)?;
        }
        Ok(())
    }
}
