use meshinv_core::{text, ValueObject};

/// A candidate item code after normalization (surrounding whitespace
/// trimmed, uppercased).
///
/// Normalization never fails; whether the code is *acceptable* is decided by
/// the [`RuleEngine`](crate::RuleEngine).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemCode(String);

impl ItemCode {
    pub fn normalize(raw: &str) -> Self {
        Self(text::trim(raw).to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// Sum of the code points of every character, reduced by `modulus`.
    pub fn checksum(&self, modulus: u32) -> u32 {
        let sum: u64 = self.0.chars().map(|c| u64::from(u32::from(c))).sum();
        (sum % u64::from(modulus)) as u32
    }
}

impl ValueObject for ItemCode {}

impl core::fmt::Display for ItemCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ItemCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
