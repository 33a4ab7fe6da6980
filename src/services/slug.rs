//! URL slug generation for event names.

/// Turn arbitrary text into a URL-safe slug.
///
/// Lower-cases and trims the input, turns whitespace runs into a single `-`,
/// drops anything that is not an ASCII letter, digit, `_` or `-`, and
/// collapses repeated hyphens. Leading or trailing hyphens that survive these
/// steps are kept. Empty input yields an empty slug.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_whitespace = false;

    for c in lowered.trim().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                push_hyphen(&mut slug);
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;

        match c {
            '-' => push_hyphen(&mut slug),
            c if c.is_ascii_alphanumeric() || c == '_' => slug.push(c),
            _ => {}
        }
    }

    slug
}

fn push_hyphen(slug: &mut String) {
    if !slug.ends_with('-') {
        slug.push('-');
    }
}
