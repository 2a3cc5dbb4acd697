// 🎨 Name Parser - Sprite reference → canonical skin identifier
// "background-image: url(/img/skins/basedaichr3.png)" → "daichr3"

use regex::Regex;
use std::sync::OnceLock;

/// Decorative prefix some sprite files carry in front of the real name
pub const DECORATIVE_PREFIX: &str = "base";

fn sprite_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"/([^/]+)\.png\)").expect("sprite pattern is valid"))
}

/// Extract the canonical identifier from a style attribute.
///
/// Takes the file stem between the last `/` and `.png)`, then strips one
/// leading `base` if present. Returns `None` when the style carries no
/// sprite path; callers skip the fragment in that case.
pub fn parse_sprite_name(style: &str) -> Option<String> {
    let stem = sprite_pattern().captures(style)?.get(1)?.as_str();
    let name = stem.strip_prefix(DECORATIVE_PREFIX).unwrap_or(stem);
    Some(name.to_string())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_file_stem() {
        let style = "background-image: url(https://bandit.rip/static/skins/daichr3.png)";
        assert_eq!(parse_sprite_name(style), Some("daichr3".to_string()));
    }

    #[test]
    fn test_strips_base_prefix_once() {
        assert_eq!(
            parse_sprite_name("background-image:url(/skins/basemagekidser1.png)"),
            Some("magekidser1".to_string())
        );
        assert_eq!(
            parse_sprite_name("background-image:url(/skins/basebasedai.png)"),
            Some("basedai".to_string())
        );
    }

    #[test]
    fn test_base_only_in_middle_is_kept() {
        assert_eq!(
            parse_sprite_name("url(/skins/zetomanbase.png)"),
            Some("zetomanbase".to_string())
        );
    }

    #[test]
    fn test_uses_last_path_segment() {
        assert_eq!(
            parse_sprite_name("url(/a/b/c/bigbchr2.png)"),
            Some("bigbchr2".to_string())
        );
    }

    #[test]
    fn test_no_match_without_png_path() {
        assert_eq!(parse_sprite_name("color: red"), None);
        assert_eq!(parse_sprite_name("url(/skins/dai.gif)"), None);
        assert_eq!(parse_sprite_name(""), None);
    }
}
