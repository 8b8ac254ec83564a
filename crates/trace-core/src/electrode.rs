//! Electrode identity and label grammar
//!
//! An electrode is identified by a scalp-region prefix and a numeric
//! suffix following the 10-20 labelling convention: `Fp1`, `Cz`, `T6`.
//! Suffix 0 is the midline variant and renders as `z`; odd suffixes sit
//! over the left hemisphere, even (nonzero) suffixes over the right.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The lobe/area of the brain associated with an electrode position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prefix {
    Prefrontal,
    Frontal,
    Temporal,
    Parietal,
    Occipital,
    Central,
    Mastoid,
}

impl Prefix {
    /// All prefixes in convention order
    pub const ALL: [Prefix; 7] = [
        Prefix::Prefrontal,
        Prefix::Frontal,
        Prefix::Temporal,
        Prefix::Parietal,
        Prefix::Occipital,
        Prefix::Central,
        Prefix::Mastoid,
    ];

    /// The shorthand symbol used in electrode labels
    pub fn short_code(&self) -> &'static str {
        match self {
            Prefix::Prefrontal => "Fp",
            Prefix::Frontal => "F",
            Prefix::Temporal => "T",
            Prefix::Parietal => "P",
            Prefix::Occipital => "O",
            Prefix::Central => "C",
            Prefix::Mastoid => "A",
        }
    }

    /// The full lowercase region name
    pub fn name(&self) -> &'static str {
        match self {
            Prefix::Prefrontal => "prefrontal",
            Prefix::Frontal => "frontal",
            Prefix::Temporal => "temporal",
            Prefix::Parietal => "parietal",
            Prefix::Occipital => "occipital",
            Prefix::Central => "central",
            Prefix::Mastoid => "mastoid",
        }
    }
}

/// Which side of the scalp an electrode sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneralArea {
    Left,
    Central,
    Right,
}

impl GeneralArea {
    pub fn name(&self) -> &'static str {
        match self {
            GeneralArea::Left => "left",
            GeneralArea::Central => "central",
            GeneralArea::Right => "right",
        }
    }
}

/// A scalp sensor position identified by prefix and suffix
///
/// This is a plain identity value: any (prefix, suffix) pair is a valid
/// electrode even when no scalp-map geometry is defined for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Electrode {
    pub prefix: Prefix,
    /// Position index, 0 for the midline ("z") variant
    pub suffix: u8,
}

impl Electrode {
    pub fn new(prefix: Prefix, suffix: u8) -> Self {
        Self { prefix, suffix }
    }

    /// Parses a canonical electrode symbol, e.g. `Fp1` or `Cz`
    ///
    /// The trailing character is the suffix (`z` for 0, otherwise one
    /// decimal digit); the remainder must exactly match one of the
    /// seven prefix short codes. Returns `None` for anything else -
    /// malformed CSV headers are an expected, recoverable input.
    pub fn parse(symbol: &str) -> Option<Electrode> {
        let mut chars = symbol.chars();
        let last = chars.next_back()?;
        let head = chars.as_str();

        let suffix = if last == 'z' {
            0
        } else {
            last.to_digit(10)? as u8
        };

        let prefix = Prefix::ALL.into_iter().find(|p| p.short_code() == head)?;

        Some(Electrode { prefix, suffix })
    }

    /// The canonical symbol for this electrode; inverse of [`parse`](Self::parse)
    pub fn symbol(&self) -> String {
        if self.suffix == 0 {
            format!("{}z", self.prefix.short_code())
        } else {
            format!("{}{}", self.prefix.short_code(), self.suffix)
        }
    }

    /// Hemisphere classification: midline iff suffix 0, else odd = left,
    /// even = right
    pub fn general_area(&self) -> GeneralArea {
        if self.suffix == 0 {
            GeneralArea::Central
        } else if self.suffix % 2 == 1 {
            GeneralArea::Left
        } else {
            GeneralArea::Right
        }
    }

    /// A prose description of the electrode position, e.g. "left frontal"
    pub fn location_description(&self) -> String {
        format!("{} {}", self.general_area().name(), self.prefix.name())
    }
}

impl fmt::Display for Electrode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_symbols() {
        assert_eq!(
            Electrode::parse("Fp1"),
            Some(Electrode::new(Prefix::Prefrontal, 1))
        );
        assert_eq!(
            Electrode::parse("Cz"),
            Some(Electrode::new(Prefix::Central, 0))
        );
        assert_eq!(
            Electrode::parse("T6"),
            Some(Electrode::new(Prefix::Temporal, 6))
        );
    }

    #[test]
    fn test_parse_rejects_malformed_symbols() {
        // Unknown prefix
        assert_eq!(Electrode::parse("X9"), None);
        // Missing suffix character: "F" leaves an empty prefix
        assert_eq!(Electrode::parse("F"), None);
        assert_eq!(Electrode::parse(""), None);
        // Two-digit suffix: "F10" ends in '0' but leaves prefix "F1"
        assert_eq!(Electrode::parse("F10"), None);
        // Lowercase prefix is not canonical
        assert_eq!(Electrode::parse("fp1"), None);
    }

    #[test]
    fn test_symbol_round_trip() {
        for prefix in Prefix::ALL {
            for suffix in 0..=8 {
                let electrode = Electrode::new(prefix, suffix);
                assert_eq!(Electrode::parse(&electrode.symbol()), Some(electrode));
            }
        }
    }

    #[test]
    fn test_midline_formats_as_z() {
        assert_eq!(Electrode::new(Prefix::Frontal, 0).symbol(), "Fz");
        assert_eq!(Electrode::new(Prefix::Occipital, 2).symbol(), "O2");
    }

    #[test]
    fn test_general_area() {
        assert_eq!(
            Electrode::new(Prefix::Parietal, 0).general_area(),
            GeneralArea::Central
        );
        assert_eq!(
            Electrode::new(Prefix::Parietal, 3).general_area(),
            GeneralArea::Left
        );
        assert_eq!(
            Electrode::new(Prefix::Parietal, 4).general_area(),
            GeneralArea::Right
        );
    }

    #[test]
    fn test_location_description() {
        assert_eq!(
            Electrode::new(Prefix::Frontal, 7).location_description(),
            "left frontal"
        );
        assert_eq!(
            Electrode::new(Prefix::Central, 0).location_description(),
            "central central"
        );
    }
}
