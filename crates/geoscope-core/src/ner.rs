//! Entity classification over raw tagger output.
//!
//! The tagger returns ordered sentences of `(token, tag)` pairs; this
//! module filters the noise and buckets tokens by tag class.

use std::sync::LazyLock;

use regex::Regex;

use crate::article::EntitySet;

/// Outlet self-references the tagger keeps labelling as institutes.
const STOP_WORDS: &[&str] = &["长江网", "长江日报"];

/// Tokens containing any of these characters are tagger artifacts.
static STOP_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.%]").unwrap());

/// Bucket `(token, tag)` pairs into an [`EntitySet`].
///
/// Tags follow the tagger's convention: `NR` person, `NT` institute, `NS`
/// location, anything else lands in `other`. Stop words, tokens with stop
/// punctuation, and single-character tokens are dropped; the sets
/// deduplicate per article.
pub fn classify_tokens(sentences: &[Vec<(String, String)>]) -> EntitySet {
    let mut set = EntitySet::default();

    for sentence in sentences {
        for (token, tag) in sentence {
            if STOP_WORDS.contains(&token.as_str()) {
                continue;
            }
            if token.chars().count() <= 1 {
                continue;
            }
            if STOP_PUNCTUATION.is_match(token) {
                continue;
            }

            let bucket = match tag.as_str() {
                "NR" => &mut set.persons,
                "NT" => &mut set.institutes,
                "NS" => &mut set.locations,
                _ => &mut set.other,
            };
            bucket.insert(token.clone());
        }
    }

    set
}
