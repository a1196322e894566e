//! Content fingerprints for navigation nodes
//!
//! Provides [`Fingerprint`], a 32-byte Blake3 digest used to derive
//! deterministic identities for nodes the store has not seen yet.

/// A 32-byte content digest (Blake3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Digest a sequence of parts.
    ///
    /// Parts are length-prefixed so `["ab", "c"]` and `["a", "bc"]` differ.
    #[must_use]
    pub fn compute_parts<'a, I>(parts: I) -> Self
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut hasher = blake3::Hasher::new();
        for part in parts {
            hasher.update(&(part.len() as u64).to_le_bytes());
            hasher.update(part);
        }
        Self(*hasher.finalize().as_bytes())
    }

    /// Short string representation (first 16 hex chars)
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_are_deterministic() {
        let a = Fingerprint::compute_parts([b"menu".as_slice()]);
        assert_eq!(a, Fingerprint::compute_parts([b"menu".as_slice()]));
        assert_ne!(a, Fingerprint::compute_parts([b"menus".as_slice()]));
    }

    #[test]
    fn parts_are_length_prefixed() {
        let a = Fingerprint::compute_parts([b"ab".as_slice(), b"c".as_slice()]);
        let b = Fingerprint::compute_parts([b"a".as_slice(), b"bc".as_slice()]);
        assert_ne!(a, b);
    }

    #[test]
    fn short_form_is_sixteen_hex_chars() {
        let short = Fingerprint::compute_parts([b"about-us".as_slice()]).short();
        assert_eq!(short.len(), 16);
        assert!(short.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
