//! Child key indices.

use crate::{Error, Result};
use borsh::{BorshDeserialize, BorshSerialize};
use core::{
    fmt::{self, Display},
    str::FromStr,
};
use serde::{Deserialize, Serialize};

/// Index of a particular child key for a given extended key.
///
/// The top bit marks hardened derivation: each extended key has 2^31 normal
/// children at indices `[0, 2^31)` and 2^31 hardened children at
/// `[2^31, 2^32)`.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct ChildNumber(pub u32);

impl ChildNumber {
    /// Flag marking a hardened child number.
    pub const HARDENED_FLAG: u32 = 1 << 31;

    /// Build a child number from an index and a hardened flag.
    ///
    /// The index must fit in 31 bits; an index with the hardened bit already
    /// set is rejected.
    pub fn new(index: u32, hardened: bool) -> Result<Self> {
        if index & Self::HARDENED_FLAG == 0 {
            Ok(ChildNumber(if hardened { index | Self::HARDENED_FLAG } else { index }))
        } else {
            Err(Error::ChildNumber)
        }
    }

    /// Parse a child number from big-endian serialized bytes.
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        ChildNumber(u32::from_be_bytes(bytes))
    }

    /// Serialize this child number as big-endian bytes (`ser32`).
    pub fn to_bytes(&self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Index of this child number, with the hardened bit masked off.
    pub fn index(&self) -> u32 {
        self.0 & !Self::HARDENED_FLAG
    }

    /// Is this child number hardened?
    pub fn is_hardened(&self) -> bool {
        self.0 & Self::HARDENED_FLAG != 0
    }
}

impl From<ChildNumber> for u32 {
    fn from(child_number: ChildNumber) -> u32 {
        child_number.0
    }
}

impl From<u32> for ChildNumber {
    fn from(n: u32) -> ChildNumber {
        ChildNumber(n)
    }
}

impl Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())?;

        if self.is_hardened() {
            write!(f, "'")?;
        }

        Ok(())
    }
}

impl FromStr for ChildNumber {
    type Err = Error;

    /// Parse a path segment: a decimal index with an optional trailing
    /// apostrophe marking it hardened. All failures surface as
    /// [`Error::DerivationPath`] so path parsing reports a single error kind.
    fn from_str(child: &str) -> Result<ChildNumber> {
        let (child, hardened) = match child.strip_suffix('\'') {
            Some(child) => (child, true),
            None => (child, false),
        };

        // Segments are bare decimal digits; `u32::parse` alone would also
        // accept a leading `+`.
        if !child.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::DerivationPath(format!("invalid child number `{child}`")));
        }

        let index = child.parse::<u32>().map_err(|_| Error::DerivationPath(format!("invalid child number `{child}`")))?;
        ChildNumber::new(index, hardened).map_err(|_| Error::DerivationPath(format!("child number `{index}` out of range")))
    }
}

#[cfg(test)]
mod tests {
    use super::ChildNumber;
    use crate::Error;

    #[test]
    fn new_rejects_hardened_bit() {
        assert!(ChildNumber::new(0x7fffffff, true).is_ok());
        assert!(matches!(ChildNumber::new(0x80000000, false), Err(Error::ChildNumber)));
        assert!(matches!(ChildNumber::new(0x80000000, true), Err(Error::ChildNumber)));
    }

    #[test]
    fn parse_segments() {
        assert_eq!("0".parse::<ChildNumber>().unwrap(), ChildNumber(0));
        assert_eq!("44'".parse::<ChildNumber>().unwrap(), ChildNumber(44 | ChildNumber::HARDENED_FLAG));
        assert!(matches!("abc".parse::<ChildNumber>(), Err(Error::DerivationPath(_))));
        assert!(matches!("2147483648".parse::<ChildNumber>(), Err(Error::DerivationPath(_))));
        assert!(matches!("".parse::<ChildNumber>(), Err(Error::DerivationPath(_))));
        assert!(matches!("+5".parse::<ChildNumber>(), Err(Error::DerivationPath(_))));
        assert!(matches!("-5".parse::<ChildNumber>(), Err(Error::DerivationPath(_))));
    }

    #[test]
    fn ser32_round_trip() {
        for child_number in [ChildNumber(0), ChildNumber(44 | ChildNumber::HARDENED_FLAG), ChildNumber(u32::MAX)] {
            assert_eq!(ChildNumber::from_bytes(child_number.to_bytes()), child_number);
        }

        assert_eq!(ChildNumber(0x8000002c).to_bytes(), [0x80, 0x00, 0x00, 0x2c]);
    }

    #[test]
    fn display_round_trip() {
        for segment in ["0", "1", "44'", "2147483647'"] {
            assert_eq!(segment.parse::<ChildNumber>().unwrap().to_string(), segment);
        }
    }
}
