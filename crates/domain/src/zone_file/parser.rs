use super::time_literal::parse_time_literal;
use super::tokenizer::{tokenize, Entry, Token};
use crate::dns_record::{DomainRecord, FieldKind, RecordClass, RecordField, RecordType};
use crate::domain_name::DomainName;
use crate::errors::ParseError;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Values a caller can supply up front, used when the document itself has no
/// `$ORIGIN` / `$TTL`.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub origin: Option<DomainName>,
    pub default_ttl: Option<u32>,
}

impl ParseOptions {
    pub fn with_origin(origin: DomainName) -> Self {
        Self {
            origin: Some(origin),
            default_ttl: None,
        }
    }

    pub fn default_ttl(mut self, ttl: u32) -> Self {
        self.default_ttl = Some(ttl);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ParsedZone {
    pub origin: DomainName,
    pub default_ttl: Option<u32>,
    /// Records in document order, duplicates included.
    pub records: Vec<DomainRecord>,
}

struct ParserState {
    origin: Option<DomainName>,
    zone_origin: Option<DomainName>,
    default_ttl: Option<u32>,
    last_owner: Option<DomainName>,
    last_class: Option<RecordClass>,
    records: Vec<(usize, DomainRecord)>,
}

/// RFC 1035 master-file reader.
///
/// Supports `$ORIGIN`, `$TTL`, `@`, owner inheritance from the previous record,
/// ttl/class in either order, parenthesised continuation and quoted strings.
/// The first error aborts the whole parse.
#[derive(Debug, Clone, Default)]
pub struct ZoneParser {
    options: ParseOptions,
}

impl ZoneParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn parse(&self, text: &str) -> Result<ParsedZone, ParseError> {
        let mut state = ParserState {
            origin: self.options.origin.clone(),
            zone_origin: self.options.origin.clone(),
            default_ttl: self.options.default_ttl,
            last_owner: None,
            last_class: None,
            records: Vec::new(),
        };

        for entry in tokenize(text)? {
            // Indentation does not turn a directive into a record.
            let is_directive = entry
                .tokens
                .first()
                .is_some_and(|t| !t.quoted && t.text.starts_with('$'));

            if is_directive {
                self.parse_directive(&entry, &mut state)?;
            } else {
                self.parse_record(&entry, &mut state)?;
            }
        }

        let origin = match state.zone_origin.take() {
            Some(origin) => origin,
            None => state
                .records
                .iter()
                .find(|(_, r)| *r.record_type() == RecordType::SOA)
                .map(|(_, r)| r.name().clone())
                .ok_or_else(|| ParseError::MissingOrigin {
                    line: 0,
                    name: "@".to_string(),
                })?,
        };

        for (line, record) in &state.records {
            if !record.name().is_subdomain_of(&origin) {
                return Err(ParseError::malformed(
                    *line,
                    format!("{} is outside zone {}", record.name(), origin),
                ));
            }
        }

        Ok(ParsedZone {
            origin,
            default_ttl: state.default_ttl,
            records: state.records.into_iter().map(|(_, r)| r).collect(),
        })
    }

    fn parse_directive(&self, entry: &Entry, state: &mut ParserState) -> Result<(), ParseError> {
        let line = entry.line;
        let directive = entry.tokens[0].text.to_ascii_uppercase();
        let args = &entry.tokens[1..];

        match directive.as_str() {
            "$ORIGIN" => {
                let [arg] = args else {
                    return Err(ParseError::malformed(line, "$ORIGIN takes exactly one name"));
                };
                let origin = resolve_name(&arg.text, state.origin.as_ref(), line)?;
                if state.zone_origin.is_none() {
                    state.zone_origin = Some(origin.clone());
                }
                state.origin = Some(origin);
            }
            "$TTL" => {
                let [arg] = args else {
                    return Err(ParseError::malformed(line, "$TTL takes exactly one value"));
                };
                let ttl = parse_time_literal(&arg.text).map_err(|e| e.at_line(line))?;
                state.default_ttl = Some(ttl);
            }
            _ => {
                return Err(ParseError::UnknownDirective {
                    line,
                    directive: entry.tokens[0].text.clone(),
                })
            }
        }

        Ok(())
    }

    fn parse_record(&self, entry: &Entry, state: &mut ParserState) -> Result<(), ParseError> {
        let line = entry.line;
        let mut tokens: &[Token] = &entry.tokens;

        let owner = if entry.owner_blank {
            state
                .last_owner
                .clone()
                .ok_or_else(|| ParseError::malformed(line, "no previous owner name to inherit"))?
        } else {
            let (first, rest) = tokens
                .split_first()
                .ok_or_else(|| ParseError::malformed(line, "empty record"))?;
            tokens = rest;
            resolve_name(&first.text, state.origin.as_ref(), line)?
        };

        let mut ttl = None;
        let mut class = None;
        while let Some((token, rest)) = tokens.split_first() {
            if token.quoted {
                break;
            }
            if ttl.is_none() && token.text.starts_with(|c: char| c.is_ascii_digit()) {
                ttl = Some(parse_time_literal(&token.text).map_err(|e| e.at_line(line))?);
            } else if class.is_none() && RecordClass::from_token(&token.text).is_some() {
                class = RecordClass::from_token(&token.text);
            } else {
                break;
            }
            tokens = rest;
        }

        let (type_token, field_tokens) = tokens
            .split_first()
            .ok_or_else(|| ParseError::malformed(line, "missing record type"))?;
        if type_token.quoted {
            return Err(ParseError::malformed(line, "record type cannot be quoted"));
        }
        let record_type = RecordType::from_token(&type_token.text);

        let ttl = match ttl.or(state.default_ttl) {
            Some(ttl) => ttl,
            None => {
                return Err(ParseError::MissingOrigin {
                    line,
                    name: "$TTL".to_string(),
                })
            }
        };
        let class = class
            .or_else(|| state.last_class.clone())
            .unwrap_or(RecordClass::IN);

        let layout = record_type.field_layout();
        if !layout.accepts_count(field_tokens.len()) {
            return Err(ParseError::FieldArityMismatch {
                line,
                record_type: record_type.to_string(),
                expected: layout.describe_arity(),
                found: field_tokens.len(),
            });
        }

        let mut fields = Vec::with_capacity(field_tokens.len());
        for (index, token) in field_tokens.iter().enumerate() {
            let kind = layout.kind_at(index).unwrap_or(FieldKind::Text);
            fields.push(parse_field(kind, token, state.origin.as_ref(), line)?);
        }

        let record = DomainRecord::new(owner.clone(), ttl, class.clone(), record_type, fields)
            .map_err(|e| e.at_line(line))?;

        state.last_owner = Some(owner);
        state.last_class = Some(class);
        state.records.push((line, record));
        Ok(())
    }
}

/// Convenience wrapper around `ZoneParser::new(options).parse(text)`.
pub fn parse(text: &str, options: ParseOptions) -> Result<ParsedZone, ParseError> {
    ZoneParser::new(options).parse(text)
}

fn resolve_name(
    token: &str,
    origin: Option<&DomainName>,
    line: usize,
) -> Result<DomainName, ParseError> {
    let missing_origin = || ParseError::MissingOrigin {
        line,
        name: token.to_string(),
    };

    if token == "@" {
        return origin.cloned().ok_or_else(missing_origin);
    }

    let resolved = if token.ends_with('.') {
        DomainName::from_fqdn(token)
    } else {
        let origin = origin.ok_or_else(missing_origin)?;
        DomainName::from_relative(token, origin)
    };

    resolved.map_err(|reason| ParseError::malformed(line, reason))
}

fn parse_field(
    kind: FieldKind,
    token: &Token,
    origin: Option<&DomainName>,
    line: usize,
) -> Result<RecordField, ParseError> {
    let text = token.text.as_str();
    let bad = |what: &str| ParseError::malformed(line, format!("'{}' is not a valid {}", text, what));

    if token.quoted && kind != FieldKind::Text {
        return Err(bad(kind.as_str()));
    }

    match kind {
        FieldKind::Ipv4 => text
            .parse::<Ipv4Addr>()
            .map(RecordField::Ipv4)
            .map_err(|_| bad("IPv4 address")),
        FieldKind::Ipv6 => text
            .parse::<Ipv6Addr>()
            .map(RecordField::Ipv6)
            .map_err(|_| bad("IPv6 address")),
        FieldKind::U16 | FieldKind::U32 => text
            .parse::<u64>()
            .map(RecordField::Integer)
            .map_err(|_| bad("integer")),
        FieldKind::Time => parse_time_literal(text)
            .map(|secs| RecordField::Integer(u64::from(secs)))
            .map_err(|e| e.at_line(line)),
        FieldKind::Name => resolve_name(text, origin, line).map(RecordField::Name),
        FieldKind::Text => Ok(RecordField::text(text)),
    }
}
