use super::names::{read_name, write_name};
use bytes::{BufMut, Bytes, BytesMut};
use std::net::{Ipv4Addr, Ipv6Addr};
use zonewire_application::ports::RecordEncoder;
use zonewire_domain::{
    DomainRecord, EncodingError, FieldKind, RecordClass, RecordField, RecordType,
};

const MAX_TEXT_LEN: usize = 255;
const MAX_RDATA_LEN: usize = u16::MAX as usize;

/// RFC 1035 resource-record codec.
///
/// Owner and embedded names are written without compression. Encoding is
/// deterministic: equal records always produce equal bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct WireRecordCodec;

impl WireRecordCodec {
    pub fn new() -> Self {
        Self
    }

    pub fn encode(&self, record: &DomainRecord) -> Result<Bytes, EncodingError> {
        let unsupported = |token: String| EncodingError::UnsupportedRecordType(token);
        let record_type = record
            .record_type()
            .to_u16()
            .ok_or_else(|| unsupported(record.record_type().to_string()))?;
        let class = record
            .class()
            .to_u16()
            .ok_or_else(|| unsupported(record.class().to_string()))?;

        let rdata = encode_rdata(record)?;
        if rdata.len() > MAX_RDATA_LEN {
            return Err(EncodingError::FieldEncodingOverflow {
                field: "rdata".to_string(),
                reason: format!("{} bytes exceeds {}", rdata.len(), MAX_RDATA_LEN),
            });
        }

        let mut out = BytesMut::with_capacity(record.name().wire_len() + 10 + rdata.len());
        write_name(record.name(), &mut out);
        out.put_u16(record_type);
        out.put_u16(class);
        out.put_u32(record.ttl());
        out.put_u16(rdata.len() as u16);
        out.put_slice(&rdata);
        Ok(out.freeze())
    }

    /// Parses exactly one uncompressed resource record.
    pub fn decode(&self, buf: &[u8]) -> Result<DomainRecord, EncodingError> {
        let mut pos = 0;
        let name = read_name(buf, &mut pos)?;

        let header = buf
            .get(pos..pos + 10)
            .ok_or_else(|| EncodingError::MalformedWire("truncated record header".into()))?;
        let type_code = u16::from_be_bytes([header[0], header[1]]);
        let class_code = u16::from_be_bytes([header[2], header[3]]);
        let ttl = u32::from_be_bytes([header[4], header[5], header[6], header[7]]);
        let rdlength = u16::from_be_bytes([header[8], header[9]]) as usize;
        pos += 10;

        let record_type = RecordType::from_u16(type_code);
        if !record_type.is_known() {
            return Err(EncodingError::UnsupportedRecordType(record_type.to_string()));
        }
        let class = RecordClass::from_u16(class_code);
        if class.to_u16().is_none() {
            return Err(EncodingError::UnsupportedRecordType(class.to_string()));
        }

        let rdata = buf
            .get(pos..pos + rdlength)
            .ok_or_else(|| EncodingError::MalformedWire("rdata runs past end of data".into()))?;
        if pos + rdlength != buf.len() {
            return Err(EncodingError::MalformedWire(format!(
                "{} trailing byte(s) after record",
                buf.len() - pos - rdlength
            )));
        }

        let fields = decode_rdata(&record_type, rdata)?;
        DomainRecord::new(name, ttl, class, record_type, fields)
            .map_err(|e| EncodingError::MalformedWire(e.to_string()))
    }
}

impl RecordEncoder for WireRecordCodec {
    fn encode(&self, record: &DomainRecord) -> Result<Bytes, EncodingError> {
        WireRecordCodec::encode(self, record)
    }
}

fn encode_rdata(record: &DomainRecord) -> Result<Vec<u8>, EncodingError> {
    let layout = record.record_type().field_layout();
    let mut out = Vec::with_capacity(32);

    for (index, field) in record.fields().iter().enumerate() {
        let kind = layout.kind_at(index).unwrap_or(FieldKind::Text);
        let overflow = |reason: String| EncodingError::FieldEncodingOverflow {
            field: format!("{} field {}", record.record_type(), index + 1),
            reason,
        };

        match (kind, field) {
            (FieldKind::Ipv4, RecordField::Ipv4(addr)) => out.put_slice(&addr.octets()),
            (FieldKind::Ipv6, RecordField::Ipv6(addr)) => out.put_slice(&addr.octets()),
            (FieldKind::U16, RecordField::Integer(value)) => {
                let value = u16::try_from(*value)
                    .map_err(|_| overflow(format!("{} does not fit in 16 bits", value)))?;
                out.put_u16(value);
            }
            (FieldKind::U32 | FieldKind::Time, RecordField::Integer(value)) => {
                let value = u32::try_from(*value)
                    .map_err(|_| overflow(format!("{} does not fit in 32 bits", value)))?;
                out.put_u32(value);
            }
            (FieldKind::Name, RecordField::Name(name)) => write_name(name, &mut out),
            (FieldKind::Text, RecordField::Text(text)) => {
                if text.len() > MAX_TEXT_LEN {
                    return Err(overflow(format!(
                        "{} bytes exceeds {}",
                        text.len(),
                        MAX_TEXT_LEN
                    )));
                }
                out.put_u8(text.len() as u8);
                out.put_slice(text.as_bytes());
            }
            (kind, field) => {
                return Err(overflow(format!(
                    "{} is not a {} value",
                    field,
                    kind.as_str()
                )))
            }
        }
    }

    Ok(out)
}

struct RdataReader<'a> {
    rdata: &'a [u8],
    pos: usize,
    record_type: &'a RecordType,
}

impl<'a> RdataReader<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8], EncodingError> {
        let rdata = self.rdata;
        let slice = rdata.get(self.pos..self.pos + len).ok_or_else(|| {
            EncodingError::MalformedWire(format!("{} rdata is truncated", self.record_type))
        })?;
        self.pos += len;
        Ok(slice)
    }

    fn remaining(&self) -> usize {
        self.rdata.len() - self.pos
    }
}

fn decode_rdata(record_type: &RecordType, rdata: &[u8]) -> Result<Vec<RecordField>, EncodingError> {
    let layout = record_type.field_layout();
    let mut fields = Vec::with_capacity(layout.required.len());
    let mut reader = RdataReader {
        rdata,
        pos: 0,
        record_type,
    };

    let mut index = 0;
    while index < layout.required.len() || (layout.rest.is_some() && reader.remaining() > 0) {
        let Some(kind) = layout.kind_at(index) else {
            break;
        };

        let field = match kind {
            FieldKind::Ipv4 => {
                let b = reader.take(4)?;
                RecordField::Ipv4(Ipv4Addr::new(b[0], b[1], b[2], b[3]))
            }
            FieldKind::Ipv6 => {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(reader.take(16)?);
                RecordField::Ipv6(Ipv6Addr::from(octets))
            }
            FieldKind::U16 => {
                let b = reader.take(2)?;
                RecordField::Integer(u64::from(u16::from_be_bytes([b[0], b[1]])))
            }
            FieldKind::U32 | FieldKind::Time => {
                let b = reader.take(4)?;
                RecordField::Integer(u64::from(u32::from_be_bytes([b[0], b[1], b[2], b[3]])))
            }
            FieldKind::Name => RecordField::Name(read_name(rdata, &mut reader.pos)?),
            FieldKind::Text => {
                let len = reader.take(1)?[0] as usize;
                let text = std::str::from_utf8(reader.take(len)?).map_err(|_| {
                    EncodingError::MalformedWire(format!("{} text is not UTF-8", record_type))
                })?;
                RecordField::text(text)
            }
        };

        fields.push(field);
        index += 1;
    }

    if reader.remaining() != 0 {
        return Err(EncodingError::MalformedWire(format!(
            "{} rdata has {} unused byte(s)",
            record_type,
            reader.remaining()
        )));
    }

    Ok(fields)
}
