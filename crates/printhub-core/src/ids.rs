//! # Identifier Codes
//!
//! Every row in the shop is keyed by a fixed-width business code: one letter
//! prefix followed by a five-digit, zero-padded sequence number.
//!
//! ```text
//! ┌──────────────┬────────┬──────────┐
//! │ Entity       │ Prefix │ Example  │
//! ├──────────────┼────────┼──────────┤
//! │ Customer     │   C    │ C00001   │
//! │ Staff        │   S    │ S00012   │
//! │ Printer      │   P    │ P00003   │
//! │ Inventory    │   I    │ I00001   │
//! │ Transaction  │   T    │ T00042   │
//! │ Membership   │   M    │ M00007   │
//! └──────────────┴────────┴──────────┘
//! ```
//!
//! The formats are shared with the dashboard and existing data, so they are
//! parsed strictly: exact prefix, exactly five ASCII digits.

use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Highest sequence number representable in five digits.
pub const MAX_CODE_NUMBER: u32 = 99_999;

/// Number of digits after the prefix.
const CODE_DIGITS: usize = 5;

// =============================================================================
// Entity Kind
// =============================================================================

/// The kinds of entities that carry a business code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Customer,
    Staff,
    Printer,
    Inventory,
    Transaction,
    Membership,
}

impl EntityKind {
    /// The single-letter prefix of this kind's codes.
    pub const fn prefix(&self) -> char {
        match self {
            EntityKind::Customer => 'C',
            EntityKind::Staff => 'S',
            EntityKind::Printer => 'P',
            EntityKind::Inventory => 'I',
            EntityKind::Transaction => 'T',
            EntityKind::Membership => 'M',
        }
    }

    /// Looks up a kind by its prefix letter.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            'C' => Some(EntityKind::Customer),
            'S' => Some(EntityKind::Staff),
            'P' => Some(EntityKind::Printer),
            'I' => Some(EntityKind::Inventory),
            'T' => Some(EntityKind::Transaction),
            'M' => Some(EntityKind::Membership),
            _ => None,
        }
    }

    /// Human-readable entity name used in error messages.
    pub const fn label(&self) -> &'static str {
        match self {
            EntityKind::Customer => "Customer",
            EntityKind::Staff => "Staff",
            EntityKind::Printer => "Printer",
            EntityKind::Inventory => "Inventory item",
            EntityKind::Transaction => "Transaction",
            EntityKind::Membership => "Membership",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Entity Code
// =============================================================================

/// A parsed business code such as `T00042`.
///
/// ## Example
/// ```rust
/// use printhub_core::ids::{EntityCode, EntityKind};
///
/// let code: EntityCode = "T00041".parse().unwrap();
/// assert_eq!(code.kind(), EntityKind::Transaction);
/// assert_eq!(code.next().unwrap().to_string(), "T00042");
///
/// assert_eq!(EntityCode::first(EntityKind::Transaction).to_string(), "T00001");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityCode {
    kind: EntityKind,
    number: u32,
}

impl EntityCode {
    /// Builds a code from a kind and sequence number (1..=99999).
    pub fn new(kind: EntityKind, number: u32) -> CoreResult<Self> {
        if number == 0 || number > MAX_CODE_NUMBER {
            return Err(CoreError::CodeOutOfRange {
                kind: kind.label().to_string(),
                number: i64::from(number),
            });
        }

        Ok(EntityCode { kind, number })
    }

    /// Builds a code from a sequence value read back from the store.
    pub fn from_sequence(kind: EntityKind, value: i64) -> CoreResult<Self> {
        let number = u32::try_from(value).map_err(|_| CoreError::CodeOutOfRange {
            kind: kind.label().to_string(),
            number: value,
        })?;
        EntityCode::new(kind, number)
    }

    /// The first code of a kind (`X00001`).
    pub const fn first(kind: EntityKind) -> Self {
        EntityCode { kind, number: 1 }
    }

    /// Parses a code and checks that it belongs to `kind`.
    pub fn parse_as(kind: EntityKind, raw: &str) -> CoreResult<Self> {
        let code: EntityCode = raw.parse()?;
        if code.kind() != kind {
            return Err(CoreError::InvalidCode {
                value: raw.to_string(),
                reason: format!("expected prefix '{}'", kind.prefix()),
            });
        }
        Ok(code)
    }

    /// The entity kind encoded in the prefix.
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// The numeric sequence part.
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// The code that follows this one.
    pub fn next(&self) -> CoreResult<Self> {
        EntityCode::new(self.kind, self.number + 1)
    }
}

impl fmt::Display for EntityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:0width$}", self.kind.prefix(), self.number, width = CODE_DIGITS)
    }
}

impl FromStr for EntityCode {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CoreError::InvalidCode {
            value: raw.to_string(),
            reason: reason.to_string(),
        };

        let mut chars = raw.chars();
        let prefix = chars.next().ok_or_else(|| invalid("empty code"))?;
        let kind = EntityKind::from_prefix(prefix).ok_or_else(|| invalid("unknown prefix"))?;

        let digits = chars.as_str();
        if digits.len() != CODE_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected five digits after the prefix"));
        }

        let number: u32 = digits
            .parse()
            .map_err(|_| invalid("expected five digits after the prefix"))?;
        if number == 0 {
            return Err(invalid("sequence number starts at 1"));
        }

        EntityCode::new(kind, number)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_zero_padded() {
        let code = EntityCode::new(EntityKind::Inventory, 7).unwrap();
        assert_eq!(code.to_string(), "I00007");

        let code = EntityCode::new(EntityKind::Customer, 99_999).unwrap();
        assert_eq!(code.to_string(), "C99999");
    }

    #[test]
    fn test_parses_every_prefix() {
        for (raw, kind) in [
            ("C00001", EntityKind::Customer),
            ("S00002", EntityKind::Staff),
            ("P00003", EntityKind::Printer),
            ("I00004", EntityKind::Inventory),
            ("T00005", EntityKind::Transaction),
            ("M00006", EntityKind::Membership),
        ] {
            let code: EntityCode = raw.parse().unwrap();
            assert_eq!(code.kind(), kind);
            assert_eq!(code.to_string(), raw);
        }
    }

    #[test]
    fn test_rejects_malformed_codes() {
        for raw in ["", "T", "T1", "T000001", "X00001", "t00001", "T0000a", "T00000", " T00001"] {
            assert!(raw.parse::<EntityCode>().is_err(), "accepted {raw:?}");
        }
    }

    #[test]
    fn test_parse_as_checks_kind() {
        assert!(EntityCode::parse_as(EntityKind::Staff, "S00001").is_ok());
        let err = EntityCode::parse_as(EntityKind::Staff, "C00001").unwrap_err();
        assert!(err.to_string().contains("expected prefix 'S'"));
    }

    #[test]
    fn test_next_and_exhaustion() {
        let code = EntityCode::first(EntityKind::Transaction);
        assert_eq!(code.next().unwrap().to_string(), "T00002");

        let last = EntityCode::new(EntityKind::Transaction, MAX_CODE_NUMBER).unwrap();
        assert!(matches!(last.next(), Err(CoreError::CodeOutOfRange { .. })));
    }

    #[test]
    fn test_from_sequence_rejects_negative() {
        assert!(EntityCode::from_sequence(EntityKind::Transaction, -1).is_err());
        assert_eq!(
            EntityCode::from_sequence(EntityKind::Transaction, 42)
                .unwrap()
                .to_string(),
            "T00042"
        );
    }
}
