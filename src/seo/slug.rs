use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical lookup form of a slug as it may arrive from a URL.
///
/// Percent-decodes (keeping the input when it isn't valid UTF-8 once
/// decoded), trims, lowercases and applies NFC.
pub fn normalize_slug(input: &str) -> String {
    let decoded = urlencoding::decode(input)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| input.to_string());
    decoded.trim().to_lowercase().nfc().collect()
}

/// ASCII-only alias of a slug: `cañones-ayacucho` becomes `canones-ayacucho`.
///
/// Diacritics are stripped, every other character outside `[a-z0-9-]`
/// becomes a hyphen, runs of hyphens collapse and edge hyphens are removed.
pub fn ascii_slug(input: &str) -> String {
    let folded = fold_diacritics(&normalize_slug(input));

    let mut out = String::with_capacity(folded.len());
    for c in folded.chars() {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '-' };
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }
    out.trim_matches('-').to_string()
}

/// Every key a listing should be reachable under, deduplicated, original first.
pub fn slug_aliases(slug: &str) -> Vec<String> {
    let mut aliases = vec![slug.to_string()];
    for alias in [normalize_slug(slug), ascii_slug(slug)] {
        if !alias.is_empty() && !aliases.contains(&alias) {
            aliases.push(alias);
        }
    }
    aliases
}

/// Lowercase-insensitive comparisons need `á` and `a` to match.
pub(crate) fn fold_diacritics(input: &str) -> String {
    input.nfd().filter(|c| !is_combining_mark(*c)).collect()
}
