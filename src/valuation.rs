// 💎 Valuation Resolver - Lookup tables as data
// Special overrides → priority-ordered suffixes → fallback

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Value of any skin no table recognizes
pub const FALLBACK_VALUE: u64 = 10;

// ============================================================================
// LOOKUP TABLES
// ============================================================================

/// Character base names a suffix may be attached to
pub const CHARACTERS: &[&str] = &[
    "magekid", "bazooka", "zetoman", "sniper", "dai", "samurai", "samrival", "pboi", "nero",
    "jonjon", "janko", "evilolif", "revis", "emy", "bigb", "hunt",
];

/// Variant suffixes, most specific first. Order is the tie-break.
pub const SUFFIXES: &[(&str, u64)] = &[
    ("promo", 300_000),
    ("magr1", 6_500),
    ("chr3", 500),
    ("chr2", 3_500),
    ("chr", 120_000),
    ("spr1", 500),
    ("mari1", 300),
    ("mag1", 500),
    ("se2", 5_500),
    ("se1", 5_500),
    ("r1", 1_500),
    ("s2", 100),
    ("s1", 100),
];

/// Hand-priced identifiers that bypass the suffix scheme
pub const SPECIAL_VALUES: &[(&str, u64)] = &[
    ("daichr3", 50_000),
    ("bigbchr2", 150_000),
    ("revisspr1se", 50_000),
    ("daiser1", 45_000),
    ("magekidser1", 45_000),
    ("emyse", 6_500),
    ("samuraimari1", 4_000),
    ("revismari2", 4_000),
    ("pboimari2", 4_000),
    ("zetomanmari2", 4_000),
    ("neromari1", 4_000),
    ("magekidmari1", 40_000),
    ("daimari2", 40_000),
    ("bigbmari2", 40_000),
    ("bigbmari2r2r", 55_000),
    ("daiu1", 800),
    ("daiu2", 1_200),
    ("emyu1", 800),
    ("jankou1", 800),
    ("nerou1", 800),
    ("nerou2", 1_200),
    ("emymari2", 40_000),
];

// ============================================================================
// SUFFIX RULE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixRule {
    pub suffix: String,
    pub value: u64,
}

impl SuffixRule {
    pub fn new(suffix: impl Into<String>, value: u64) -> Self {
        SuffixRule {
            suffix: suffix.into(),
            value,
        }
    }

    /// Base name left after removing this suffix, if the identifier ends with it
    pub fn strip<'a>(&self, identifier: &'a str) -> Option<&'a str> {
        identifier.strip_suffix(self.suffix.as_str())
    }
}

// ============================================================================
// VALUATION RESULT
// ============================================================================

/// Which rule produced a value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueSource {
    /// Exact entry in the special value table
    Special,

    /// Character base name plus a known variant suffix
    Suffix { suffix: String, base: String },

    /// Nothing matched
    Fallback,
}

impl ValueSource {
    pub fn label(&self) -> String {
        match self {
            ValueSource::Special => "special".to_string(),
            ValueSource::Suffix { suffix, base } => format!("suffix {} on {}", suffix, base),
            ValueSource::Fallback => "fallback".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Valuation {
    pub value: u64,
    pub source: ValueSource,
}

// ============================================================================
// SKIN VALUER
// ============================================================================

/// SkinValuer - owns the three lookup tables and resolves unit values
///
/// Pure: resolving never mutates the tables, so the same identifier always
/// yields the same value.
#[derive(Debug, Clone)]
pub struct SkinValuer {
    characters: HashSet<String>,
    suffixes: Vec<SuffixRule>,
    specials: HashMap<String, u64>,
    fallback: u64,
}

impl SkinValuer {
    /// Create a valuer from explicit tables
    ///
    /// `suffixes` is walked in the given order; put longer suffixes first.
    pub fn new(
        characters: impl IntoIterator<Item = String>,
        suffixes: Vec<SuffixRule>,
        specials: HashMap<String, u64>,
    ) -> Self {
        SkinValuer {
            characters: characters.into_iter().collect(),
            suffixes,
            specials,
            fallback: FALLBACK_VALUE,
        }
    }

    /// Valuer over the compiled-in game tables
    pub fn with_builtin_tables() -> Self {
        SkinValuer::new(
            CHARACTERS.iter().map(|c| c.to_string()),
            SUFFIXES
                .iter()
                .map(|(suffix, value)| SuffixRule::new(*suffix, *value))
                .collect(),
            SPECIAL_VALUES
                .iter()
                .map(|(id, value)| (id.to_string(), *value))
                .collect(),
        )
    }

    /// Resolve an identifier and report which rule priced it
    pub fn resolve(&self, identifier: &str) -> Valuation {
        // 1. Special overrides win outright
        if let Some(value) = self.specials.get(identifier) {
            return Valuation {
                value: *value,
                source: ValueSource::Special,
            };
        }

        // 2. First suffix whose removal leaves a real character name
        for rule in &self.suffixes {
            if let Some(base) = rule.strip(identifier) {
                if self.characters.contains(base) {
                    return Valuation {
                        value: rule.value,
                        source: ValueSource::Suffix {
                            suffix: rule.suffix.clone(),
                            base: base.to_string(),
                        },
                    };
                }
            }
        }

        // 3. Unknown skin
        Valuation {
            value: self.fallback,
            source: ValueSource::Fallback,
        }
    }

    /// Unit value of one skin
    pub fn value(&self, identifier: &str) -> u64 {
        self.resolve(identifier).value
    }

    pub fn is_character(&self, name: &str) -> bool {
        self.characters.contains(name)
    }

    pub fn suffix_count(&self) -> usize {
        self.suffixes.len()
    }

    pub fn special_count(&self) -> usize {
        self.specials.len()
    }
}

impl Default for SkinValuer {
    fn default() -> Self {
        Self::with_builtin_tables()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_values_take_precedence() {
        let valuer = SkinValuer::default();

        for (id, expected) in SPECIAL_VALUES {
            assert_eq!(valuer.value(id), *expected, "special value for {}", id);
        }

        // Through the suffix scheme this would be chr3 = 500
        let valuation = valuer.resolve("daichr3");
        assert_eq!(valuation.value, 50_000);
        assert_eq!(valuation.source, ValueSource::Special);
    }

    #[test]
    fn test_every_character_suffix_pair() {
        let valuer = SkinValuer::default();

        for character in CHARACTERS {
            for (suffix, value) in SUFFIXES {
                let id = format!("{}{}", character, suffix);
                if SPECIAL_VALUES.iter().any(|(special, _)| *special == id) {
                    continue;
                }
                assert_eq!(valuer.value(&id), *value, "value for {}", id);
            }
        }
    }

    #[test]
    fn test_suffix_source_reports_base() {
        let valuer = SkinValuer::default();
        let valuation = valuer.resolve("samuraichr2");

        assert_eq!(valuation.value, 3_500);
        assert_eq!(
            valuation.source,
            ValueSource::Suffix {
                suffix: "chr2".to_string(),
                base: "samurai".to_string(),
            }
        );
        assert_eq!(valuation.source.label(), "suffix chr2 on samurai");
    }

    #[test]
    fn test_suffix_priority_order_breaks_ties() {
        // Both "ar1" and "r1" leave a known base; the earlier rule wins
        let valuer = SkinValuer::new(
            vec!["st".to_string(), "sta".to_string()],
            vec![SuffixRule::new("ar1", 700), SuffixRule::new("r1", 5)],
            HashMap::new(),
        );
        assert_eq!(valuer.value("star1"), 700);

        let reversed = SkinValuer::new(
            vec!["st".to_string(), "sta".to_string()],
            vec![SuffixRule::new("r1", 5), SuffixRule::new("ar1", 700)],
            HashMap::new(),
        );
        assert_eq!(reversed.value("star1"), 5);
    }

    #[test]
    fn test_longer_suffix_checked_first() {
        let valuer = SkinValuer::default();

        // Ends with both "magr1" and "r1"; only magr1 leaves a character
        assert_eq!(valuer.value("neromagr1"), 6_500);
        // Ends with "r1" alone
        assert_eq!(valuer.value("bazookar1"), 1_500);
    }

    #[test]
    fn test_suffix_requires_character_base() {
        let valuer = SkinValuer::default();

        // "s1" terminates this but "glove" is no character
        assert_eq!(valuer.value("gloves1"), FALLBACK_VALUE);
        assert_eq!(valuer.value("xyz123"), FALLBACK_VALUE);
        assert_eq!(valuer.value("daichr3x"), FALLBACK_VALUE);
    }

    #[test]
    fn test_fallback_for_unknown() {
        let valuer = SkinValuer::default();
        let valuation = valuer.resolve("mysteryhat");

        assert_eq!(valuation.value, 10);
        assert_eq!(valuation.source, ValueSource::Fallback);
        assert_eq!(valuer.value(""), 10);
        // Bare character name carries no suffix
        assert_eq!(valuer.value("dai"), 10);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let valuer = SkinValuer::default();

        for id in ["daichr3", "bigbpromo", "unknown", "emys1"] {
            assert_eq!(valuer.resolve(id), valuer.resolve(id));
        }
    }

    #[test]
    fn test_custom_tables() {
        let valuer = SkinValuer::new(
            vec!["knight".to_string()],
            vec![SuffixRule::new("gold", 900), SuffixRule::new("old", 1)],
            HashMap::from([("knightold".to_string(), 77)]),
        );

        assert_eq!(valuer.value("knightgold"), 900);
        assert_eq!(valuer.value("knightold"), 77);
        assert_eq!(valuer.value("kngold"), FALLBACK_VALUE);
        assert!(valuer.is_character("knight"));
        assert_eq!(valuer.suffix_count(), 2);
        assert_eq!(valuer.special_count(), 1);
    }
}
