// bitmask.rs - Dynamically sized component set
//
// Archetypes are identified by the exact set of component ids they store,
// and queries select archetypes with a superset test over the same words.

use std::fmt;

const WORD_BITS: usize = u64::BITS as usize;

/// Fixed-capacity set of small integers backed by 64-bit words.
///
/// All masks compared against each other inside one world share the same
/// capacity (`EcsConfig::max_components`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Bitmask {
    words: Box<[u64]>,
    capacity: usize,
}

impl Bitmask {
    /// Create an empty mask able to hold bits `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(WORD_BITS)].into_boxed_slice(),
            capacity,
        }
    }

    /// Number of addressable bits.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    #[inline]
    pub fn set(&mut self, bit: usize) {
        assert!(bit < self.capacity, "bit {bit} out of range ({})", self.capacity);
        self.words[bit / WORD_BITS] |= 1u64 << (bit % WORD_BITS);
    }

    #[inline]
    pub fn clear(&mut self, bit: usize) {
        assert!(bit < self.capacity, "bit {bit} out of range ({})", self.capacity);
        self.words[bit / WORD_BITS] &= !(1u64 << (bit % WORD_BITS));
    }

    /// Whether `bit` is set. Bits beyond the capacity are never set.
    #[inline]
    pub fn test(&self, bit: usize) -> bool {
        self.words
            .get(bit / WORD_BITS)
            .is_some_and(|word| word & (1u64 << (bit % WORD_BITS)) != 0)
    }

    pub fn clear_all(&mut self) {
        self.words.fill(0);
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&word| word == 0)
    }

    /// True iff every bit set in `required` is also set in `self`.
    ///
    /// This is the archetype-matches-query test.
    pub fn contains_all(&self, required: &Bitmask) -> bool {
        required.words.iter().enumerate().all(|(i, &req)| {
            let word = self.words.get(i).copied().unwrap_or(0);
            word & req == req
        })
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> u32 {
        self.words.iter().map(|word| word.count_ones()).sum()
    }

    pub fn lowest_set_bit(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .find(|(_, word)| **word != 0)
            .map(|(i, word)| i * WORD_BITS + word.trailing_zeros() as usize)
    }

    pub fn highest_set_bit(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .rev()
            .find(|(_, word)| **word != 0)
            .map(|(i, word)| i * WORD_BITS + (WORD_BITS - 1 - word.leading_zeros() as usize))
    }

    /// Set bits in ascending order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            let mut remaining = word;
            std::iter::from_fn(move || {
                if remaining == 0 {
                    return None;
                }
                let bit = remaining.trailing_zeros() as usize;
                remaining &= remaining - 1;
                Some(i * WORD_BITS + bit)
            })
        })
    }

    /// Starting point for open-addressed lookups: the lowest word.
    #[inline]
    pub fn hash_seed(&self) -> u64 {
        self.words.first().copied().unwrap_or(0)
    }
}

impl fmt::Display for Bitmask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (n, bit) in self.iter_ones().enumerate() {
            if n > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{bit}")?;
        }
        f.write_str("}")
    }
}
