//! Fixed-width identifiers: 64-bit symbols and 256-bit hashes
//!
//! A symbol packs up to 13 characters from `.12345abcdefghijklmnopqrstuvwxyz`
//! into a u64: twelve 5-bit characters from the high bits down, then one
//! 4-bit character in the low nibble. Characters outside the alphabet map
//! to `.`.

use std::fmt;

const SYMBOL_CHARS: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

const fn char_to_bits(c: u8) -> u64 {
    match c {
        b'a'..=b'z' => (c - b'a') as u64 + 6,
        b'1'..=b'5' => (c - b'1') as u64 + 1,
        _ => 0,
    }
}

/// Compact name used for tables, indexes and queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u64);

impl Symbol {
    /// Wraps a raw symbol value
    pub const fn new(value: u64) -> Self {
        Symbol(value)
    }

    /// Packs text into a symbol. Usable in constants.
    pub const fn from_text(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut value = 0u64;
        let mut i = 0;
        while i < bytes.len() && i < 12 {
            value |= (char_to_bits(bytes[i]) & 0x1f) << (64 - 5 * (i + 1));
            i += 1;
        }
        if bytes.len() > 12 {
            value |= char_to_bits(bytes[12]) & 0x0f;
        }
        Symbol(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl From<&str> for Symbol {
    fn from(text: &str) -> Self {
        Symbol::from_text(text)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = [b'.'; 13];
        let mut bits = self.0;
        out[12] = SYMBOL_CHARS[(bits & 0x0f) as usize];
        bits >>= 4;
        for slot in out[..12].iter_mut().rev() {
            *slot = SYMBOL_CHARS[(bits & 0x1f) as usize];
            bits >>= 5;
        }
        let len = out.iter().rposition(|&c| c != b'.').map_or(0, |p| p + 1);
        // every byte comes from SYMBOL_CHARS, so this is ASCII
        f.write_str(std::str::from_utf8(&out[..len]).map_err(|_| fmt::Error)?)
    }
}

/// 256-bit hash such as a block or transaction id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Checksum256(pub [u8; 32]);

impl Checksum256 {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Checksum256(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Checksum256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_text_round_trip() {
        for text in ["account", "block.info", "c.index128", "res.lim.stat", "eosio.token", "a"] {
            assert_eq!(Symbol::from_text(text).to_string(), text);
        }
    }

    #[test]
    fn test_thirteenth_character() {
        let sym = Symbol::from_text("aaaaaaaaaaaaj");
        assert_eq!(sym.to_string(), "aaaaaaaaaaaaj");
        assert_eq!(sym.value() & 0x0f, char_to_bits(b'j'));
    }

    #[test]
    fn test_empty_symbol() {
        assert_eq!(Symbol::from_text("").value(), 0);
        assert_eq!(Symbol::default().to_string(), "");
    }

    #[test]
    fn test_invalid_chars_become_dots() {
        assert_eq!(Symbol::from_text("a_b").to_string(), "a.b");
    }

    #[test]
    fn test_known_value() {
        // single 'a' lands in the top five bits
        assert_eq!(Symbol::from_text("a").value(), 6u64 << 59);
    }

    #[test]
    fn test_checksum_hex() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xab;
        let hash = Checksum256::new(bytes);
        assert!(hash.to_string().starts_with("ab00"));
        assert_eq!(hash.to_string().len(), 64);
    }
}
