//! `Accept-Language` negotiation.

/// Returns the language tag with the highest quality value.
///
/// Ties keep header order. The wildcard `*`, malformed entries and entries
/// with `q=0` are ignored. Tags are returned as sent, minus surrounding spaces.
pub fn preferred_language(header: &str) -> Option<String> {
    let mut best: Option<(&str, f32)> = None;

    for entry in header.split(',') {
        let mut parts = entry.split(';');
        let tag = parts.next().unwrap_or_default().trim();
        if tag.is_empty() || tag == "*" {
            continue;
        }

        let mut quality = 1.0_f32;
        for param in parts {
            if let Some(value) = param.trim().strip_prefix("q=") {
                quality = value.trim().parse().unwrap_or(0.0);
            }
        }

        if quality <= 0.0 {
            continue;
        }

        if best.is_none_or(|(_, best_quality)| quality > best_quality) {
            best = Some((tag, quality));
        }
    }

    best.map(|(tag, _)| tag.to_string())
}
