use crate::SyntaxKind;

/// One bit per kind. Swift needs more than two hundred kinds, so the set
/// spans as many `u64` slots as the last kind requires.
const SIZE: usize = (SyntaxKind::TOMBSTONE as usize + 1).div_ceil(u64::BITS as usize);

/// A `const`-buildable set of kinds, used for first-sets and recovery stop
/// sets in the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyntaxSet {
    bits: [u64; SIZE],
}

impl SyntaxSet {
    pub const EMPTY: Self = Self { bits: [0; SIZE] };
    const BITS_PER_SLOT: u16 = u64::BITS as u16;

    const fn from_kind(kind: SyntaxKind) -> Self {
        let kind = kind as u16;

        let slot_index = (kind / Self::BITS_PER_SLOT) as usize;

        debug_assert!(
            slot_index < Self::EMPTY.bits.len(),
            "Index out of bounds. Increase the size of the bitset array."
        );

        let bit_index = kind % Self::BITS_PER_SLOT;
        let mask = 1 << bit_index;

        let mut bits = Self::EMPTY.bits;
        bits[slot_index] = mask;

        Self { bits }
    }

    pub const fn union(mut self, other: &Self) -> Self {
        let mut i = 0;

        while i < self.bits.len() {
            self.bits[i] |= other.bits[i];
            i += 1;
        }

        self
    }

    pub const fn new<const N: usize>(kinds: [SyntaxKind; N]) -> Self {
        let mut set = Self::EMPTY;

        let mut i = 0;
        while i < kinds.len() {
            set = set.union(&Self::from_kind(kinds[i]));
            i += 1;
        }

        set
    }

    pub const fn with(self, kind: SyntaxKind) -> Self {
        self.union(&Self::from_kind(kind))
    }

    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        let slot_index = (kind / Self::BITS_PER_SLOT) as usize;
        let bit_index = kind % Self::BITS_PER_SLOT;
        let mask = 1 << bit_index;

        self.bits[slot_index] & mask != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;

    #[test]
    fn membership_spans_every_slot() {
        let set = SyntaxSet::new([LEFT_PAREN, EOF, CODE_BLOCK, MISSING_TYPE]);

        assert!(set.contains(LEFT_PAREN));
        assert!(set.contains(EOF));
        assert!(set.contains(CODE_BLOCK));
        assert!(set.contains(MISSING_TYPE));
        assert!(!set.contains(RIGHT_PAREN));
        assert!(!set.contains(UNEXPECTED));
        assert!(SyntaxSet::new([TOMBSTONE]).contains(TOMBSTONE));
    }

    #[test]
    fn union_and_with_agree() {
        const A: SyntaxSet = SyntaxSet::new([COMMA]).with(RIGHT_BRACKET);
        let b = SyntaxSet::new([COMMA]).union(&SyntaxSet::new([RIGHT_BRACKET]));

        assert_eq!(A, b);
        assert!(SyntaxSet::EMPTY.union(&A).contains(COMMA));
    }
}
