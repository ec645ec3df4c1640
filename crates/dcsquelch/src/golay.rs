//! (23,12) binary Golay code
//!
//! DCS frames its 12 data bits (a 9-bit code number plus three zero
//! bits) as a 23-bit systematic codeword of the perfect binary Golay
//! code: data in bits 22..11, check bits in bits 10..0. The code has
//! minimum distance 7 and corrects every error pattern of weight ≤ 3.
//!
//! The generator polynomial, per EIA/TIA-603, is
//!
//! ```txt
//! g(x) = x^11 + x^10 + x^6 + x^5 + x^4 + x^2 + 1
//! ```
//!
//! Correction uses a 2048-entry syndrome → error-pattern table. The
//! table is a pure function of the generator and is built once per
//! process; decoders share it read-only.

use lazy_static::lazy_static;

/// Generator polynomial, bit 11 = x^11
pub const GENERATOR: u32 = 0xC75;

/// Mask of the 23 codeword bits
pub const WORD_MASK: u32 = 0x7F_FFFF;

// 11-bit syndrome space
const SYNDROMES: usize = 2048;

// table slot with no correctable pattern assigned yet
const INVALID: u32 = u32::MAX;

/// Compute the 11-bit syndrome of a 23-bit word
///
/// Polynomial long division of the word by the generator: data
/// positions 22 down to 11 are cleared in turn by subtracting the
/// shifted generator. The remainder in the low 11 bits is the
/// syndrome, which is zero exactly for codewords.
pub fn syndrome(word: u32) -> u32 {
    let mut reg = word & WORD_MASK;
    for i in (11..=22).rev() {
        if (reg >> i) & 1 != 0 {
            reg ^= GENERATOR << (i - 11);
        }
    }
    reg & 0x7FF
}

/// Encode 12 data bits into a systematic 23-bit codeword
///
/// The lower 12 bits of `data` land in codeword bits 22..11; the 11
/// check bits are the division remainder. Every encoded word has a
/// zero syndrome.
pub fn encode(data: u16) -> u32 {
    let shifted = ((data & 0x0FFF) as u32) << 11;
    shifted | syndrome(shifted)
}

/// Rotate a 23-bit word left by one bit
///
/// The Golay code is cyclic: every rotation of a codeword is again a
/// codeword. The code validator leans on this to recognize a word at
/// any bit alignment.
#[inline]
pub fn rotate(word: u32) -> u32 {
    ((word << 1) | (word >> 22)) & WORD_MASK
}

/// Syndrome → error-pattern correction table
///
/// Maps each of the 2048 possible syndromes to the unique error
/// pattern of Hamming weight ≤ 3 that produces it. Because the
/// (23,12,7) Golay code is perfect, the 1 + 23 + 253 + 1771 = 2048
/// such patterns fill the table exactly.
pub struct SyndromeTable {
    entries: [u32; SYNDROMES],
}

impl SyndromeTable {
    /// Process-wide shared table
    ///
    /// Built on first use and shared read-only by every decoder
    /// instance.
    pub fn shared() -> &'static SyndromeTable {
        lazy_static! {
            static ref TABLE: SyndromeTable = SyndromeTable::build();
        }
        &TABLE
    }

    // Enumerate error patterns by ascending weight; the first writer
    // claims each slot.
    fn build() -> Self {
        let mut entries = [INVALID; SYNDROMES];
        entries[0] = 0;

        for i in 0..23 {
            let pattern = 1u32 << i;
            let slot = &mut entries[syndrome(pattern) as usize];
            if *slot == INVALID {
                *slot = pattern;
            }
        }

        for i in 0..23 {
            for j in i + 1..23 {
                let pattern = (1u32 << i) | (1u32 << j);
                let slot = &mut entries[syndrome(pattern) as usize];
                if *slot == INVALID {
                    *slot = pattern;
                }
            }
        }

        for i in 0..23 {
            for j in i + 1..23 {
                for k in j + 1..23 {
                    let pattern = (1u32 << i) | (1u32 << j) | (1u32 << k);
                    let slot = &mut entries[syndrome(pattern) as usize];
                    if *slot == INVALID {
                        *slot = pattern;
                    }
                }
            }
        }

        Self { entries }
    }

    /// Correctable error pattern for a syndrome
    ///
    /// Returns `None` if the slot holds no pattern. For a fully
    /// built table every slot is populated.
    #[inline]
    pub fn error_pattern(&self, syndrome: u32) -> Option<u32> {
        match self.entries.get(syndrome as usize) {
            Some(&e) if e != INVALID => Some(e),
            _ => None,
        }
    }

    /// Correct a received 23-bit word
    ///
    /// Looks up the error pattern for the word's syndrome and XORs
    /// it back in. Returns the corrected codeword and the error
    /// pattern that was removed; an error pattern of zero means the
    /// word was received intact.
    #[inline]
    pub fn correct(&self, word: u32) -> Option<(u32, u32)> {
        let word = word & WORD_MASK;
        let error = self.error_pattern(syndrome(word))?;
        Some((word ^ error, error))
    }
}

impl std::fmt::Debug for SyndromeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyndromeTable")
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_zero_syndrome() {
        // every encoded word is a codeword
        for data in 0u16..4096 {
            let cw = encode(data);
            assert!(cw <= WORD_MASK);
            assert_eq!(syndrome(cw), 0, "data {:#05x}", data);
            assert_eq!((cw >> 11) as u16, data);
        }
    }

    #[test]
    fn test_known_codewords() {
        assert_eq!(encode(0), 0);
        assert_eq!(encode(19), 0x00_9959);
        assert_eq!(encode(21), 0x00_A88D);
        assert_eq!(encode(25), 0x00_CB25);
    }

    #[test]
    fn test_table_is_full_and_weighted() {
        let table = SyndromeTable::shared();
        let mut weight_counts = [0usize; 4];
        for s in 0..SYNDROMES as u32 {
            let e = table.error_pattern(s).expect("table slot unpopulated");
            let w = e.count_ones() as usize;
            assert!(w <= 3);
            assert_eq!(syndrome(e), s);
            weight_counts[w] += 1;
        }
        assert_eq!(weight_counts, [1, 23, 253, 1771]);
    }

    #[test]
    fn test_corrects_up_to_three_errors() {
        let table = SyndromeTable::shared();
        let cw = encode(0b1010_1100_0011);

        for i in 0..23 {
            let e = 1u32 << i;
            assert_eq!(table.correct(cw ^ e), Some((cw, e)));
        }
        for i in 0..23 {
            for j in i + 1..23 {
                let e = (1u32 << i) | (1u32 << j);
                assert_eq!(table.correct(cw ^ e), Some((cw, e)));
            }
        }
        for (i, j, k) in [(0, 1, 2), (0, 11, 22), (5, 10, 15), (3, 7, 19), (1, 12, 20)] {
            let e = (1u32 << i) | (1u32 << j) | (1u32 << k);
            assert_eq!(table.correct(cw ^ e), Some((cw, e)));
        }
    }

    #[test]
    fn test_intact_word_has_zero_error() {
        let table = SyndromeTable::shared();
        let cw = encode(19);
        assert_eq!(table.correct(cw), Some((cw, 0)));
    }

    #[test]
    fn test_code_is_cyclic() {
        // rotations of codewords are codewords
        for data in [1u16, 19, 21, 0xABC, 0xFFF] {
            let mut w = encode(data);
            for _i in 0..23 {
                w = rotate(w);
                assert_eq!(syndrome(w), 0);
            }
            assert_eq!(w, encode(data));
        }
    }
}
