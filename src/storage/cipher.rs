//! Byte-wise field obfuscation for the data file
//!
//! `Cipher::Xor` flips every byte against a single key byte. Applying it twice
//! returns the original bytes. It hides nothing from anyone who looks; treat
//! it as obfuscation, never as a security control.

/// Transform applied to each stored field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cipher {
    /// Store fields as-is
    #[default]
    Plain,
    /// XOR every byte with `key`
    Xor { key: u8 },
}

impl Cipher {
    /// Apply the transform. The transform is its own inverse.
    pub fn apply(&self, bytes: &[u8]) -> Vec<u8> {
        match *self {
            Self::Plain => bytes.to_vec(),
            Self::Xor { key } => bytes.iter().map(|b| b ^ key).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_is_identity() {
        assert_eq!(Cipher::Plain.apply(b"Dune"), b"Dune");
    }

    #[test]
    fn test_xor_changes_bytes() {
        let cipher = Cipher::Xor { key: b'X' };
        let out = cipher.apply(b"Dune");
        assert_ne!(out, b"Dune");
        assert_eq!(out[0], b'D' ^ b'X');
    }

    #[test]
    fn test_xor_is_self_inverse() {
        let cipher = Cipher::Xor { key: b'X' };
        let text = "Ready? Über \\ Ünïcödé 123".as_bytes();
        assert_eq!(cipher.apply(&cipher.apply(text)), text);
    }

    #[test]
    fn test_xor_can_produce_line_breaks() {
        // 'R' ^ 'X' is LF, which the record framing has to escape
        let cipher = Cipher::Xor { key: b'X' };
        assert_eq!(cipher.apply(b"R"), b"\n");
    }
}
