use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

pub const MAX_LABEL_LEN: usize = 63;
/// Longest name allowed on the wire, counting length octets and the root label.
pub const MAX_WIRE_LEN: usize = 255;

/// An absolute (root-terminated) domain name.
///
/// The presentation form keeps the case it was written with so that encoded
/// answers echo the zone file; comparison and hashing use the lower-cased key.
#[derive(Clone)]
pub struct DomainName {
    text: Arc<str>,
    key: Arc<str>,
}

impl DomainName {
    pub fn root() -> Self {
        Self {
            text: Arc::from("."),
            key: Arc::from("."),
        }
    }

    /// Parses a name as absolute whether or not it carries the trailing dot.
    pub fn from_fqdn(name: &str) -> Result<Self, String> {
        if name == "." {
            return Ok(Self::root());
        }
        let trimmed = name.strip_suffix('.').unwrap_or(name);
        Self::from_labels_text(trimmed)
    }

    /// Expands a relative name below `origin`.
    pub fn from_relative(relative: &str, origin: &DomainName) -> Result<Self, String> {
        if relative.ends_with('.') {
            return Err(format!("'{}' is already absolute", relative));
        }
        if origin.is_root() {
            return Self::from_labels_text(relative);
        }
        let origin_text = origin.text.strip_suffix('.').unwrap_or(&origin.text);
        Self::from_labels_text(&format!("{}.{}", relative, origin_text))
    }

    fn from_labels_text(labels: &str) -> Result<Self, String> {
        if labels.is_empty() {
            return Err("empty domain name".to_string());
        }
        if !labels.is_ascii() {
            return Err(format!("'{}' is not an ASCII name", labels));
        }

        let mut wire_len = 1;
        for label in labels.split('.') {
            if label.is_empty() {
                return Err(format!("'{}' contains an empty label", labels));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(format!(
                    "label '{}' exceeds {} octets",
                    label, MAX_LABEL_LEN
                ));
            }
            if label.bytes().any(|b| b.is_ascii_whitespace() || b.is_ascii_control()) {
                return Err(format!("label '{}' contains whitespace", label));
            }
            wire_len += label.len() + 1;
        }
        if wire_len > MAX_WIRE_LEN {
            return Err(format!("'{}' exceeds {} octets", labels, MAX_WIRE_LEN));
        }

        let text = format!("{}.", labels);
        let key = text.to_ascii_lowercase();
        Ok(Self {
            text: Arc::from(text),
            key: Arc::from(key),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Lower-cased, trailing-dot form used for lookups.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_root(&self) -> bool {
        &*self.key == "."
    }

    /// Labels from leftmost to rightmost, excluding the root.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.text
            .strip_suffix('.')
            .unwrap_or("")
            .split('.')
            .filter(|label| !label.is_empty())
    }

    pub fn label_count(&self) -> usize {
        self.labels().count()
    }

    pub fn is_wildcard(&self) -> bool {
        self.labels().next() == Some("*")
    }

    pub fn parent(&self) -> Option<DomainName> {
        if self.is_root() {
            return None;
        }
        match self.text.split_once('.') {
            Some((_, rest)) if !rest.is_empty() => {
                let key = self.key.split_once('.').map(|(_, k)| k).unwrap_or(".");
                Some(Self {
                    text: Arc::from(rest),
                    key: Arc::from(key),
                })
            }
            _ => Some(Self::root()),
        }
    }

    /// True when `self` equals `other` or lies below it.
    pub fn is_subdomain_of(&self, other: &DomainName) -> bool {
        if other.is_root() {
            return true;
        }
        let key = self.key();
        let suffix = other.key();
        key == suffix
            || (key.len() > suffix.len()
                && key.ends_with(suffix)
                && key.as_bytes()[key.len() - suffix.len() - 1] == b'.')
    }

    pub fn is_strict_subdomain_of(&self, other: &DomainName) -> bool {
        self != other && self.is_subdomain_of(other)
    }

    /// `*.<self>`
    pub fn wildcard_child(&self) -> Result<DomainName, String> {
        Self::from_relative("*", self)
    }

    /// Ancestors from the immediate parent up to and including `apex`.
    pub fn ancestors_to(&self, apex: &DomainName) -> SmallVec<[DomainName; 8]> {
        let mut out = SmallVec::new();
        if !self.is_strict_subdomain_of(apex) {
            return out;
        }
        let mut current = self.parent();
        while let Some(name) = current {
            let reached_apex = &name == apex;
            current = if reached_apex { None } else { name.parent() };
            out.push(name);
        }
        out
    }

    /// Length of the uncompressed wire form.
    pub fn wire_len(&self) -> usize {
        self.labels().map(|l| l.len() + 1).sum::<usize>() + 1
    }
}

impl PartialEq for DomainName {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for DomainName {}

impl Hash for DomainName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DomainName({})", self.text)
    }
}
