use bytes::BufMut;
use zonewire_domain::{DomainName, EncodingError};

/// Writes `name` as uncompressed length-prefixed labels ending in the root label.
pub fn write_name(name: &DomainName, out: &mut impl BufMut) {
    for label in name.labels() {
        out.put_u8(label.len() as u8);
        out.put_slice(label.as_bytes());
    }
    out.put_u8(0);
}

/// Reads an uncompressed name starting at `*pos` and advances `pos` past it.
/// Compression pointers are rejected.
pub fn read_name(buf: &[u8], pos: &mut usize) -> Result<DomainName, EncodingError> {
    let mut text = String::new();

    loop {
        let len = *buf
            .get(*pos)
            .ok_or_else(|| EncodingError::MalformedWire("name runs past end of data".into()))?
            as usize;
        *pos += 1;

        if len == 0 {
            break;
        }
        if len & 0xC0 != 0 {
            return Err(EncodingError::MalformedWire(
                "compressed or extended label".into(),
            ));
        }

        let label = buf
            .get(*pos..*pos + len)
            .ok_or_else(|| EncodingError::MalformedWire("label runs past end of data".into()))?;
        let label = std::str::from_utf8(label)
            .map_err(|_| EncodingError::MalformedWire("label is not ASCII".into()))?;
        text.push_str(label);
        text.push('.');
        *pos += len;
    }

    if text.is_empty() {
        return Ok(DomainName::root());
    }
    DomainName::from_fqdn(&text).map_err(EncodingError::MalformedWire)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_layout() {
        let mut out = Vec::new();
        write_name(&DomainName::from_fqdn("www.Example.com.").unwrap(), &mut out);
        assert_eq!(out, b"\x03www\x07Example\x03com\x00");

        let mut pos = 0;
        let name = read_name(&out, &mut pos).unwrap();
        assert_eq!(name.as_str(), "www.Example.com.");
        assert_eq!(pos, out.len());
    }

    #[test]
    fn test_root_name() {
        let mut out = Vec::new();
        write_name(&DomainName::root(), &mut out);
        assert_eq!(out, [0]);
        assert!(read_name(&out, &mut 0).unwrap().is_root());
    }

    #[test]
    fn test_rejects_pointers_and_truncation() {
        assert!(read_name(&[0xC0, 0x0C], &mut 0).is_err());
        assert!(read_name(&[3, b'w', b'w'], &mut 0).is_err());
        assert!(read_name(&[3, b'w', b'w', b'w'], &mut 0).is_err());
    }
}
