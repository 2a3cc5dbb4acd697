// 📄 Record Extractor - Profile page → ownership records + coin balance
// Best-effort: malformed blocks are skipped, never fatal

use crate::sprite::parse_sprite_name;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

// ============================================================================
// PAGE STRUCTURE
// ============================================================================

/// One cosmetic display block per owned skin
pub const COSTUME_BLOCK: &str = ".playerpage-costume-c";

/// Sprite element roles, checked in this order
pub const SPRITE_ROLES: &[&str] = &[
    ".playerpage-costume[style]",
    ".playerpage-costume-b[style]",
    ".playerpage-costume-b2[style]",
];

/// Owned-quantity element inside a block
pub const COUNT_ELEMENT: &str = ".playerpage-costume-n";

/// Profile stat holding the coin balance
pub const COINS_ELEMENT: &str = ".playerpage-profile-stats.brcoin2";

fn coins_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"COINS:\s*(\d+)").expect("coins pattern is valid"))
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("page selectors are valid CSS")
}

struct Selectors {
    block: Selector,
    sprites: Vec<Selector>,
    count: Selector,
    coins: Selector,
}

fn selectors() -> &'static Selectors {
    static SELECTORS: OnceLock<Selectors> = OnceLock::new();
    SELECTORS.get_or_init(|| Selectors {
        block: selector(COSTUME_BLOCK),
        sprites: SPRITE_ROLES.iter().map(|css| selector(css)).collect(),
        count: selector(COUNT_ELEMENT),
        coins: selector(COINS_ELEMENT),
    })
}

// ============================================================================
// OWNERSHIP RECORD
// ============================================================================

/// OwnershipRecord - one skin block found on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipRecord {
    /// Canonical skin identifier
    pub identifier: String,

    /// How many the player owns
    pub count: u64,
}

impl OwnershipRecord {
    pub fn new(identifier: impl Into<String>, count: u64) -> Self {
        OwnershipRecord {
            identifier: identifier.into(),
            count,
        }
    }
}

// ============================================================================
// PROFILE PAGE
// ============================================================================

/// ProfilePage - a parsed player profile document
pub struct ProfilePage {
    document: Html,
}

impl ProfilePage {
    pub fn parse(html: &str) -> Self {
        ProfilePage {
            document: Html::parse_document(html),
        }
    }

    /// Every skin block that yields a sprite name and a numeric count
    pub fn skin_records(&self) -> Vec<OwnershipRecord> {
        let selectors = selectors();
        let mut records = Vec::new();

        for (index, block) in self.document.select(&selectors.block).enumerate() {
            match record_from_block(block, selectors) {
                Ok(record) => records.push(record),
                Err(reason) => debug!(block = index, reason, "skipping costume block"),
            }
        }

        records
    }

    /// Coin balance from the profile stats, zero when absent or unreadable
    pub fn coins(&self) -> u64 {
        let Some(stat) = self.document.select(&selectors().coins).next() else {
            debug!("no coin stat on page");
            return 0;
        };

        let text = stat.text().collect::<String>();
        coins_pattern()
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or_else(|| {
                debug!(text = text.trim(), "coin stat has no readable balance");
                0
            })
    }
}

fn record_from_block(
    block: ElementRef<'_>,
    selectors: &Selectors,
) -> Result<OwnershipRecord, &'static str> {
    let sprite = selectors
        .sprites
        .iter()
        .find_map(|role| block.select(role).next())
        .ok_or("no sprite element")?;

    let style = sprite.value().attr("style").unwrap_or_default();
    let identifier = parse_sprite_name(style).ok_or("sprite style has no png path")?;

    let count_element = block
        .select(&selectors.count)
        .next()
        .ok_or("no count element")?;
    let count_text = count_element.text().collect::<String>();
    let count_text = count_text.trim();
    if count_text.is_empty() {
        return Err("empty count");
    }
    let count = count_text.parse::<u64>().map_err(|_| "count is not a number")?;

    Ok(OwnershipRecord { identifier, count })
}

/// Parse a page and pull its skin records
pub fn extract_records(html: &str) -> Vec<OwnershipRecord> {
    ProfilePage::parse(html).skin_records()
}

/// Parse a page and pull its coin balance
pub fn extract_coins(html: &str) -> u64 {
    ProfilePage::parse(html).coins()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn block(sprite_class: &str, sprite_file: &str, count: Option<&str>) -> String {
        let count = count
            .map(|c| format!(r#"<div class="playerpage-costume-n">{}</div>"#, c))
            .unwrap_or_default();
        format!(
            r#"<div class="playerpage-costume-c">
                 <div class="{}" style="background-image: url(/static/skins/{}.png)"></div>
                 {}
               </div>"#,
            sprite_class, sprite_file, count
        )
    }

    fn page(body: &str) -> String {
        format!("<html><body>{}</body></html>", body)
    }

    #[test]
    fn test_extracts_records_from_blocks() {
        let html = page(&[
            block("playerpage-costume", "basedaichr3", Some("1")),
            block("playerpage-costume", "magekidser1", Some(" 2 ")),
        ]
        .concat());

        let records = extract_records(&html);

        assert_eq!(
            records,
            vec![
                OwnershipRecord::new("daichr3", 1),
                OwnershipRecord::new("magekidser1", 2),
            ]
        );
    }

    #[test]
    fn test_secondary_sprite_roles() {
        let html = page(&[
            block("playerpage-costume-b", "emys1", Some("3")),
            block("playerpage-costume-b2", "nerou1", Some("1")),
        ]
        .concat());

        let records = extract_records(&html);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].identifier, "emys1");
        assert_eq!(records[1].identifier, "nerou1");
    }

    #[test]
    fn test_sprite_role_priority() {
        // Variant listed first in the document, primary role still wins
        let html = page(
            r#"<div class="playerpage-costume-c">
                 <div class="playerpage-costume-b" style="background-image: url(/s/daiu1.png)"></div>
                 <div class="playerpage-costume" style="background-image: url(/s/daiu2.png)"></div>
                 <div class="playerpage-costume-n">1</div>
               </div>"#,
        );

        let records = extract_records(&html);

        assert_eq!(records, vec![OwnershipRecord::new("daiu2", 1)]);
    }

    #[test]
    fn test_sprite_without_style_is_ignored() {
        let html = page(
            r#"<div class="playerpage-costume-c">
                 <div class="playerpage-costume"></div>
                 <div class="playerpage-costume-b2" style="background-image: url(/s/huntpromo.png)"></div>
                 <div class="playerpage-costume-n">4</div>
               </div>"#,
        );

        assert_eq!(
            extract_records(&html),
            vec![OwnershipRecord::new("huntpromo", 4)]
        );
    }

    #[test]
    fn test_missing_count_contributes_nothing() {
        let html = page(&[
            block("playerpage-costume", "daichr3", None),
            block("playerpage-costume", "emys1", Some("1")),
        ]
        .concat());

        assert_eq!(extract_records(&html), vec![OwnershipRecord::new("emys1", 1)]);
    }

    #[test]
    fn test_malformed_blocks_are_skipped() {
        let html = page(&[
            block("playerpage-costume", "daichr3", Some("")),
            block("playerpage-costume", "daichr2", Some("many")),
            block("playerpage-costume", "daichr", Some("-1")),
            block("unrelated", "dais1", Some("1")),
            r#"<div class="playerpage-costume-c">
                 <div class="playerpage-costume" style="color: red"></div>
                 <div class="playerpage-costume-n">1</div>
               </div>"#
                .to_string(),
        ]
        .concat());

        assert!(extract_records(&html).is_empty());
    }

    #[test]
    fn test_count_must_be_plain_integer() {
        let html = page(&[
            block("playerpage-costume", "daiu1", Some("1.0")),
            block("playerpage-costume", "daiu2", Some("1e3")),
            block("playerpage-costume", "emyu1", Some("+5")),
        ]
        .concat());

        assert_eq!(extract_records(&html), vec![OwnershipRecord::new("emyu1", 5)]);
    }

    #[test]
    fn test_coins_balance() {
        let html = page(
            r#"<div class="playerpage-profile-stats brcoin2">COINS: 12345</div>
               <div class="playerpage-profile-stats">KILLS: 99</div>"#,
        );

        assert_eq!(extract_coins(&html), 12_345);
    }

    #[test]
    fn test_coins_without_space_after_label() {
        let html = page(r#"<span class="playerpage-profile-stats brcoin2"><b>COINS:</b>77</span>"#);

        assert_eq!(extract_coins(&html), 77);
    }

    #[test]
    fn test_coins_default_to_zero() {
        assert_eq!(extract_coins(&page("")), 0);
        assert_eq!(
            extract_coins(&page(
                r#"<div class="playerpage-profile-stats brcoin2">COINS: hidden</div>"#
            )),
            0
        );
        // Wrong element: class must carry both names
        assert_eq!(
            extract_coins(&page(r#"<div class="brcoin2">COINS: 5</div>"#)),
            0
        );
    }

    #[test]
    fn test_single_parse_serves_both() {
        let html = page(&format!(
            r#"{}<div class="playerpage-profile-stats brcoin2">COINS: 500</div>"#,
            block("playerpage-costume", "bigbchr2", Some("2"))
        ));
        let profile = ProfilePage::parse(&html);

        assert_eq!(profile.skin_records(), vec![OwnershipRecord::new("bigbchr2", 2)]);
        assert_eq!(profile.coins(), 500);
    }
}
