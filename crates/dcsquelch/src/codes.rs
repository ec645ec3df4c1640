//! DCS code numbers and designators
//!
//! DCS codes are historically written as three octal digits with a
//! `D` prefix and an optional `N` suffix for inverted polarity:
//! `D023`, `D023N`. Internally a code is the decimal value of those
//! octal digits, a 9-bit number (decimal 19 for `D023`).
//!
//! Only the 105 codes of the standard EIA-603 table are reportable.
//! The table contains rotation aliases of itself: because the Golay
//! code is cyclic and DCS words repeat back to back, several listed
//! codes are the same on-air bit sequence at different alignments
//! (`D114` and `D023`, for example), and an inverted code is the
//! same sequence as some other code upright. The
//! [`classify`] routine resolves a codeword's whole equivalence
//! class to one canonical representative so that a transmission
//! reports the same `(code, polarity)` at every bit alignment.

use std::fmt;
use std::str::FromStr;

use phf::phf_set;
use thiserror::Error;

use crate::golay;

/// Standard DCS codes, as decimal values of the octal designators
///
/// 105 codes, per the EIA-603 table.
static STANDARD_CODES: phf::Set<u16> = phf_set! {
    19u16, 21u16, 22u16, 25u16, 26u16, 30u16, 35u16, 39u16, 41u16, 43u16,
    44u16, 53u16, 57u16, 58u16, 59u16, 60u16,
    76u16, 77u16, 78u16, 82u16, 85u16, 89u16, 90u16, 92u16, 99u16, 101u16,
    106u16, 109u16, 110u16, 114u16, 117u16, 122u16, 124u16,
    133u16, 138u16, 140u16, 147u16, 149u16, 150u16, 163u16, 164u16, 165u16,
    166u16, 169u16, 170u16, 173u16, 177u16, 179u16, 181u16, 182u16, 185u16,
    188u16,
    198u16, 201u16, 205u16, 213u16, 217u16, 218u16, 227u16, 230u16, 233u16,
    238u16, 244u16, 245u16, 249u16,
    265u16, 266u16, 267u16, 275u16, 281u16, 282u16, 293u16, 294u16, 298u16,
    300u16, 301u16, 306u16, 308u16, 309u16, 310u16,
    323u16, 326u16, 334u16, 339u16, 342u16, 346u16, 358u16, 373u16,
    390u16, 394u16, 404u16, 407u16, 409u16, 410u16, 428u16, 434u16, 436u16,
    451u16, 458u16, 467u16, 473u16, 474u16, 476u16, 483u16, 492u16,
};

/// Number of standard DCS codes
pub const NUM_CODES: usize = 105;

/// Error for code numbers or designators outside the standard table
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Error)]
#[error("not a standard DCS code")]
pub struct UnknownCodeErr;

/// A standard DCS code number
///
/// Always a member of the 105-entry standard table. Construct from
/// the decimal value with `TryFrom<u16>`; display prints the octal
/// designator digits.
///
/// ```
/// use std::convert::TryFrom;
/// use dcsquelch::DcsCode;
///
/// let code = DcsCode::try_from(19).unwrap();
/// assert_eq!(&format!("{}", code), "023");
/// assert!(DcsCode::try_from(20).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DcsCode(u16);

impl DcsCode {
    /// Decimal value of the code, in `[0, 511]`
    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for DcsCode {
    type Error = UnknownCodeErr;

    fn try_from(code: u16) -> Result<Self, UnknownCodeErr> {
        if STANDARD_CODES.contains(&code) {
            Ok(DcsCode(code))
        } else {
            Err(UnknownCodeErr)
        }
    }
}

impl From<DcsCode> for u16 {
    fn from(code: DcsCode) -> u16 {
        code.0
    }
}

impl fmt::Display for DcsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03o}", self.0)
    }
}

/// A detected or configured DCS code with polarity
///
/// `inverted` corresponds to the `N` suffix of the designator.
/// Parses from and displays as the designator notation:
///
/// ```
/// use dcsquelch::CodeDetect;
///
/// let detect: CodeDetect = "D023N".parse().unwrap();
/// assert_eq!(detect.code.as_u16(), 19);
/// assert!(detect.inverted);
/// assert_eq!(&format!("{}", detect), "D023N");
///
/// // the D prefix and the case are optional
/// assert_eq!("023n".parse::<CodeDetect>().unwrap(), detect);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodeDetect {
    /// The code number
    pub code: DcsCode,

    /// True for inverted polarity (the "N" suffix)
    pub inverted: bool,
}

impl CodeDetect {
    /// New detection value
    pub fn new(code: DcsCode, inverted: bool) -> Self {
        Self { code, inverted }
    }

    /// Canonical alias for this code and polarity
    ///
    /// Codes that are bit rotations (or polarity complements) of one
    /// another are indistinguishable in a continuous DCS stream. The
    /// decoder always reports the canonical member of the class, and
    /// anything comparing against decoder output should normalize
    /// its reference value the same way:
    ///
    /// ```
    /// use dcsquelch::CodeDetect;
    ///
    /// // D114 is the same on-air sequence as D023
    /// let picked: CodeDetect = "D114".parse().unwrap();
    /// assert_eq!(picked.normalized(), "D023".parse().unwrap());
    /// ```
    pub fn normalized(&self) -> CodeDetect {
        let canon = classify(golay::encode(self.code.as_u16()))
            .expect("standard code must classify to itself or an alias");
        CodeDetect {
            code: canon.code,
            inverted: canon.inverted ^ self.inverted,
        }
    }
}

impl fmt::Display for CodeDetect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.code)?;
        if self.inverted {
            write!(f, "N")?;
        }
        Ok(())
    }
}

impl FromStr for CodeDetect {
    type Err = UnknownCodeErr;

    fn from_str(s: &str) -> Result<Self, UnknownCodeErr> {
        let s = s
            .strip_prefix('D')
            .or_else(|| s.strip_prefix('d'))
            .unwrap_or(s);
        let (digits, inverted) = match s.strip_suffix('N').or_else(|| s.strip_suffix('n')) {
            Some(digits) => (digits, true),
            None => (s, false),
        };
        let code = u16::from_str_radix(digits, 8).map_err(|_| UnknownCodeErr)?;
        Ok(CodeDetect {
            code: DcsCode::try_from(code)?,
            inverted,
        })
    }
}

/// Resolve a codeword's equivalence class to a recognized code
///
/// Examines all 23 rotations of the corrected codeword and of its
/// bitwise complement. A rotation whose data field has zero in its
/// top three bits and a standard code in its low nine bits is a
/// candidate; the candidate with the smallest code number wins, with
/// normal polarity preferred on a tie. Complement-derived candidates
/// carry `inverted = true`.
///
/// Returns `None` when no alignment of either polarity yields a
/// standard code.
pub(crate) fn classify(codeword: u32) -> Option<CodeDetect> {
    let mut best: Option<CodeDetect> = None;
    let mut straight = codeword & golay::WORD_MASK;
    let mut flipped = !codeword & golay::WORD_MASK;

    for _i in 0..23 {
        for (word, inverted) in [(straight, false), (flipped, true)] {
            let data = (word >> 11) & 0xFFF;
            if data & 0xE00 != 0 {
                continue;
            }
            if let Ok(code) = DcsCode::try_from(data as u16) {
                let detect = CodeDetect { code, inverted };
                if best.map_or(true, |b| detect < b) {
                    best = Some(detect);
                }
            }
        }
        straight = golay::rotate(straight);
        flipped = golay::rotate(flipped);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_membership() {
        let members = (0u16..512).filter(|&c| STANDARD_CODES.contains(&c)).count();
        assert_eq!(members, NUM_CODES);

        for code in [19, 21, 22, 25, 26, 43, 114, 265, 492] {
            assert!(DcsCode::try_from(code).is_ok(), "code {} missing", code);
        }
        for code in [0, 1, 18, 20, 23, 412, 511] {
            assert!(DcsCode::try_from(code).is_err(), "code {} unexpected", code);
        }
        assert!(DcsCode::try_from(732).is_err());
    }

    #[test]
    fn test_display() {
        let code = DcsCode::try_from(19).unwrap();
        assert_eq!(&code.to_string(), "023");
        assert_eq!(&CodeDetect::new(code, false).to_string(), "D023");
        assert_eq!(&CodeDetect::new(code, true).to_string(), "D023N");

        let code = DcsCode::try_from(265).unwrap();
        assert_eq!(&CodeDetect::new(code, false).to_string(), "D411");
    }

    #[test]
    fn test_parse() {
        for text in ["D023", "023", "d023", "23"] {
            let detect: CodeDetect = text.parse().expect(text);
            assert_eq!(detect.code.as_u16(), 19);
            assert!(!detect.inverted);
        }
        for text in ["D023N", "023n", "d23N"] {
            let detect: CodeDetect = text.parse().expect(text);
            assert_eq!(detect.code.as_u16(), 19);
            assert!(detect.inverted);
        }

        assert!("D024".parse::<CodeDetect>().is_err()); // valid octal, not standard
        assert!("D088".parse::<CodeDetect>().is_err()); // not octal
        assert!("".parse::<CodeDetect>().is_err());
        assert!("DN".parse::<CodeDetect>().is_err());
    }

    #[test]
    fn test_classify_aligned_codewords() {
        // codes that are canonical classify to themselves
        for code in [19u16, 21, 22, 25, 39, 41, 265] {
            let detect = classify(golay::encode(code)).unwrap();
            assert_eq!(detect.code.as_u16(), code);
            assert!(!detect.inverted);
        }
    }

    #[test]
    fn test_classify_rotation_aliases() {
        // rotation aliases inside the standard table resolve to the
        // smallest member of the class
        for (alias, canon, inverted) in [
            (76u16, 19u16, false),
            (306, 19, false),
            (282, 21, false),
            (44, 22, false),
            (78, 39, true),
            (244, 60, true),
            (166, 122, true),
        ] {
            let detect = classify(golay::encode(alias)).unwrap();
            assert_eq!(detect.code.as_u16(), canon, "alias {}", alias);
            assert_eq!(detect.inverted, inverted, "alias {}", alias);
        }
    }

    #[test]
    fn test_classify_rotation_invariance() {
        // the class representative is the same at every alignment
        let mut word = golay::encode(21);
        let expect = classify(word);
        assert!(expect.is_some());
        for _i in 0..23 {
            word = golay::rotate(word);
            assert_eq!(classify(word), expect);
        }
        // and on the complemented stream, with polarity flipped
        let flipped = classify(!word & golay::WORD_MASK).unwrap();
        assert_eq!(flipped.code, expect.unwrap().code);
        assert!(flipped.inverted);
    }

    #[test]
    fn test_classify_unknown_payloads() {
        // payloads whose class holds no standard code at either
        // polarity resolve to nothing
        for payload in [0u16, 13, 27, 40, 55] {
            assert_eq!(classify(golay::encode(payload)), None, "payload {}", payload);
        }
    }

    #[test]
    fn test_normalized() {
        let picked: CodeDetect = "D306".parse().unwrap();
        assert_eq!(picked.normalized(), "D023".parse().unwrap());

        let picked: CodeDetect = "D306N".parse().unwrap();
        let norm = picked.normalized();
        assert_eq!(norm.code.as_u16(), 19);
        assert!(norm.inverted);

        // canonical codes are fixed points
        let canon: CodeDetect = "D023N".parse().unwrap();
        assert_eq!(canon.normalized(), canon);
    }
}
