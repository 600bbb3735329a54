//! Built-in font selection.
//!
//! The toolkit ships one proportional font family in even pixel sizes from
//! 8 to 48. Each enabled size pulls its glyph tables into the binary, so the
//! selection is part of the resolved configuration.

use std::fmt;

/// Smallest built-in font size, in pixels.
pub const MIN_FONT_SIZE: u8 = 8;
/// Largest built-in font size, in pixels.
pub const MAX_FONT_SIZE: u8 = 48;

/// A set of enabled built-in font sizes plus the default one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontSet {
    /// Bit `i` set means size `MIN_FONT_SIZE + 2 * i` is enabled.
    bits: u32,
    default: u8,
}

impl FontSet {
    /// Whether `size` names a built-in font.
    pub fn is_builtin(size: u8) -> bool {
        (MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size) && size % 2 == 0
    }

    /// Build a set from sizes already checked with
    /// [`is_builtin`](FontSet::is_builtin). The default must be among them.
    pub(crate) fn new(sizes: &[u8], default: u8) -> Self {
        let bits = sizes
            .iter()
            .fold(0u32, |acc, &s| acc | 1 << ((s - MIN_FONT_SIZE) / 2));
        Self { bits, default }
    }

    /// Whether the given size is enabled.
    pub fn contains(&self, size: u8) -> bool {
        Self::is_builtin(size) && self.bits & (1 << ((size - MIN_FONT_SIZE) / 2)) != 0
    }

    /// The default font size.
    pub fn default_size(&self) -> u8 {
        self.default
    }

    /// Enabled sizes, ascending.
    pub fn sizes(&self) -> impl Iterator<Item = u8> + '_ {
        (MIN_FONT_SIZE..=MAX_FONT_SIZE)
            .step_by(2)
            .filter(|&s| self.contains(s))
    }

    /// Number of enabled sizes.
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Whether no size is enabled.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl fmt::Display for FontSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sizes: Vec<String> = self.sizes().map(|s| s.to_string()).collect();
        write!(f, "[{}] default {}", sizes.join(", "), self.default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_sizes() {
        assert!(FontSet::is_builtin(8));
        assert!(FontSet::is_builtin(14));
        assert!(FontSet::is_builtin(48));
        assert!(!FontSet::is_builtin(13));
        assert!(!FontSet::is_builtin(6));
        assert!(!FontSet::is_builtin(50));
    }

    #[test]
    fn membership_and_order() {
        let set = FontSet::new(&[24, 12, 16, 14], 14);
        assert_eq!(set.sizes().collect::<Vec<_>>(), vec![12, 14, 16, 24]);
        assert!(set.contains(16));
        assert!(!set.contains(18));
        assert!(!set.contains(13));
        assert_eq!(set.len(), 4);
        assert_eq!(set.default_size(), 14);
    }

    #[test]
    fn duplicates_collapse() {
        let set = FontSet::new(&[14, 14], 14);
        assert_eq!(set.len(), 1);
    }
}
