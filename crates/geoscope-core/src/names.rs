//! Region name normalization.
//!
//! Article text rarely spells out the full administrative name, so a region
//! is matched in up to three forms: the full name, the name with its
//! trailing administrative suffix removed, and that form with ethnic-group
//! qualifiers removed. Real gazetteer examples:
//!
//!   黑龙江省 → 黑龙江
//!   神农架林区 → 神农架
//!   恩施土家族苗族自治州 → 恩施土家族苗族 → 恩施

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Trailing administrative suffix, stripped before re-matching.
static ADMIN_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(省|市|县|区|自治州|自治县|自治区|自治旗|林区)$").unwrap());

/// Ethnic-group qualifiers removed from suffix-trimmed names.
const ETHNIC_QUALIFIERS: &[&str] = &[
    "满族",
    "回族",
    "达斡尔族",
    "蒙古族",
    "朝鲜族",
    "土家族",
    "苗族",
    "瑶族",
    "壮族",
    "黎族",
];

/// Remove the trailing administrative suffix, if present.
pub fn strip_admin_suffix(name: &str) -> Cow<'_, str> {
    ADMIN_SUFFIX.replace(name, "")
}

/// Remove every ethnic-group qualifier occurring anywhere in `name`.
pub fn strip_ethnic_qualifiers(name: &str) -> String {
    let mut out = name.to_string();
    for qualifier in ETHNIC_QUALIFIERS {
        out = out.replace(qualifier, "");
    }
    out
}

/// Whether a gazetteer region named `name` is mentioned in `content`.
///
/// Exact substring first; names of 3+ characters additionally match on
/// their suffix-trimmed form, then with ethnic qualifiers removed. Empty
/// names and empty trimmed forms never match.
pub fn region_name_in_content(content: &str, name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    if content.contains(name) {
        return true;
    }
    if name.chars().count() < 3 {
        return false;
    }

    let trimmed = strip_admin_suffix(name);
    if trimmed.is_empty() {
        return false;
    }
    if content.contains(trimmed.as_ref()) {
        return true;
    }

    let bare = strip_ethnic_qualifiers(&trimmed);
    if bare.is_empty() {
        return false;
    }
    content.contains(&bare)
}

/// Whether entity `entity` duplicates the resolved region `region`: equal
/// outright, or equal to the region's suffix-trimmed form when the region
/// has 3+ characters and the entity 2+.
pub fn entity_matches_region(entity: &str, region: &str) -> bool {
    if entity.is_empty() || region.is_empty() {
        return false;
    }
    if entity == region {
        return true;
    }
    if region.chars().count() >= 3 && entity.chars().count() >= 2 {
        return strip_admin_suffix(region) == entity;
    }
    false
}
