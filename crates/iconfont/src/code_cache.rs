use std::num::NonZeroUsize;

use lru::LruCache;

use crate::error::InflateError;

/// Bounded cache from hexadecimal code literals (`"e001"`) to characters.
///
/// Parse failures are not cached. Least-recently-used entries are evicted
/// once `capacity` literals are held.
#[derive(Debug)]
pub struct CodeCache {
    entries: LruCache<String, char>,
    hits: u64,
    misses: u64,
}

impl CodeCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self { entries: LruCache::new(capacity), hits: 0, misses: 0 }
    }

    /// Resolves `literal` to its character, parsing it on first use.
    pub fn get(&mut self, literal: &str) -> Result<char, InflateError> {
        if let Some(&c) = self.entries.get(literal) {
            self.hits += 1;
            return Ok(c);
        }
        self.misses += 1;
        let c = parse_code(literal)?;
        self.entries.put(literal.to_string(), c);
        Ok(c)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    pub fn contains(&self, literal: &str) -> bool {
        self.entries.contains(literal)
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that had to parse.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

/// Parses a hexadecimal code-point literal into a character.
///
/// An optional `0x`/`U+` prefix is accepted. Empty input, non-hex digits and
/// values outside the Unicode scalar range are rejected.
pub fn parse_code(literal: &str) -> Result<char, InflateError> {
    let trimmed = literal.trim();
    if trimmed.is_empty() {
        return Err(InflateError::MissingCode);
    }
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .or_else(|| trimmed.strip_prefix("U+"))
        .or_else(|| trimmed.strip_prefix("u+"))
        .unwrap_or(trimmed);
    u32::from_str_radix(digits, 16)
        .ok()
        .filter(|_| !digits.starts_with('+'))
        .and_then(char::from_u32)
        .ok_or_else(|| InflateError::InvalidCode(literal.to_string()))
}
