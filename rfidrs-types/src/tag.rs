//! Tag identifier

use std::fmt;

/// Identifier bytes of a detected tag, exactly as the reader returned
/// them.
///
/// Compares byte-wise and displays as lowercase hex, the conventional
/// rendition for tag identifiers.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TagId(Vec<u8>);

impl TagId {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Raw identifier bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for TagId {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for TagId {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl fmt::Debug for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TagId({})", hex::encode(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lowercase_hex() {
        let tag = TagId::new(vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(tag.to_string(), "deadbeef");
    }

    #[test]
    fn test_equality_is_byte_wise() {
        let a = TagId::new(vec![0x01, 0x02]);
        let b = TagId::from(&[0x01, 0x02][..]);
        let c = TagId::new(vec![0x01, 0x03]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_empty_tag() {
        let tag = TagId::new(Vec::new());
        assert!(tag.is_empty());
        assert_eq!(tag.to_string(), "");
    }
}
