//! URL-safe slugs for category names.

/// Derive a slug from a display name.
///
/// Lowercases, trims, collapses whitespace runs into single hyphens and drops
/// every character outside `[a-z0-9_-]`.
///
/// ```
/// use preorder_core::slugify;
///
/// assert_eq!(slugify("Phone Protection"), "phone-protection");
/// assert_eq!(slugify("  Kids' Toys & Games "), "kids-toys--games");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_whitespace = false;

    for ch in lowered.trim().chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            slug.push(ch);
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_names() {
        assert_eq!(slugify("Electronics"), "electronics");
        assert_eq!(slugify("Phone Protection"), "phone-protection");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(slugify("Home \t  Garden"), "home-garden");
    }

    #[test]
    fn test_punctuation_is_dropped() {
        assert_eq!(slugify("Men's Shoes!"), "mens-shoes");
        assert_eq!(slugify("snake_case-ok"), "snake_case-ok");
    }

    #[test]
    fn test_non_ascii_letters_are_dropped() {
        assert_eq!(slugify("Café Crème"), "caf-crme");
    }

    #[test]
    fn test_empty() {
        assert_eq!(slugify("   "), "");
    }
}
