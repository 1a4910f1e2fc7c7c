//! A compact set of digits 1-9.
//!
//! [`DigitSet`] stores guess marks ("pencil marks") for a single cell. Bits 0-8
//! represent digits 1-9 respectively.
//!
//! # Examples
//!
//! ```
//! use futoshiki_core::{Digit, DigitSet};
//!
//! let mut set = DigitSet::EMPTY;
//! set.toggle(Digit::D2);
//! set.toggle(Digit::D7);
//! assert_eq!(set.len(), 2);
//!
//! set.toggle(Digit::D2);
//! assert!(!set.contains(Digit::D2));
//! ```

use std::{fmt, iter::FusedIterator};

use crate::Digit;

/// A set of digits 1-9 represented as a 9-bit mask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DigitSet {
    bits: u16,
}

impl DigitSet {
    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };
    /// The set containing all digits 1-9.
    pub const FULL: Self = Self { bits: 0x1ff };

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates a set from raw bits, returning `None` if bits above 8 are set.
    #[must_use]
    pub const fn try_from_bits(bits: u16) -> Option<Self> {
        if bits & !Self::FULL.bits == 0 {
            Some(Self { bits })
        } else {
            None
        }
    }

    /// Returns the raw bit mask.
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.bits
    }

    const fn bit(digit: Digit) -> u16 {
        1 << (digit.value() - 1)
    }

    /// Returns `true` if the set contains `digit`.
    #[must_use]
    pub const fn contains(self, digit: Digit) -> bool {
        self.bits & Self::bit(digit) != 0
    }

    /// Inserts `digit`, returning `true` if it was not present.
    pub fn insert(&mut self, digit: Digit) -> bool {
        let absent = !self.contains(digit);
        self.bits |= Self::bit(digit);
        absent
    }

    /// Removes `digit`, returning `true` if it was present.
    pub fn remove(&mut self, digit: Digit) -> bool {
        let present = self.contains(digit);
        self.bits &= !Self::bit(digit);
        present
    }

    /// Flips membership of `digit`.
    pub fn toggle(&mut self, digit: Digit) {
        self.bits ^= Self::bit(digit);
    }

    /// Removes every digit.
    pub fn clear(&mut self) {
        self.bits = 0;
    }

    /// Returns `true` if no digit is present.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns the number of digits in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterates digits in ascending order.
    #[must_use]
    pub fn iter(self) -> DigitSetIter {
        DigitSetIter { bits: self.bits }
    }
}

impl fmt::Debug for DigitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(Digit::value)).finish()
    }
}

impl FromIterator<Digit> for DigitSet {
    fn from_iter<T: IntoIterator<Item = Digit>>(iter: T) -> Self {
        let mut set = Self::EMPTY;
        for digit in iter {
            set.insert(digit);
        }
        set
    }
}

impl IntoIterator for DigitSet {
    type Item = Digit;
    type IntoIter = DigitSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the digits of a [`DigitSet`].
#[derive(Debug, Clone)]
pub struct DigitSetIter {
    bits: u16,
}

impl Iterator for DigitSetIter {
    type Item = Digit;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let index = self.bits.trailing_zeros() as u8;
        self.bits &= self.bits - 1;
        Digit::try_from_value(index + 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl FusedIterator for DigitSetIter {}
impl ExactSizeIterator for DigitSetIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Digit::*;

    #[test]
    fn test_toggle_and_contains() {
        let mut set = DigitSet::new();
        set.toggle(D1);
        set.toggle(D9);
        assert!(set.contains(D1));
        assert!(set.contains(D9));
        assert_eq!(set.len(), 2);

        set.toggle(D1);
        assert!(!set.contains(D1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_iteration_order() {
        let set = DigitSet::from_iter([D9, D1, D5, D3]);
        let collected: Vec<_> = set.iter().collect();
        assert_eq!(collected, vec![D1, D3, D5, D9]);
    }

    #[test]
    fn test_constants_and_bits() {
        assert!(DigitSet::EMPTY.is_empty());
        assert_eq!(DigitSet::FULL.len(), 9);
        assert_eq!(DigitSet::try_from_bits(0x1ff), Some(DigitSet::FULL));
        assert_eq!(DigitSet::try_from_bits(0x200), None);
    }

    #[test]
    fn test_insert_remove_report_changes() {
        let mut set = DigitSet::EMPTY;
        assert!(set.insert(D4));
        assert!(!set.insert(D4));
        assert!(set.remove(D4));
        assert!(!set.remove(D4));
        set.insert(D2);
        set.clear();
        assert!(set.is_empty());
    }
}
