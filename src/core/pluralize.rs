/// Plural form of a packaging unit label, e.g. `bundle` -> `bundles`.
///
/// Words already ending in a single `s` are treated as plural and returned as is,
/// so singulars like `bus` or `gas` are unchanged. Final consonants are never
/// doubled (`quiz` -> `quizes`).
pub fn pluralize(word: &str) -> String {
    let lower = word.to_lowercase();

    if word.is_empty() {
        return String::new();
    }

    if ["ss", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return format!("{}es", word);
    }

    if lower.ends_with('s') {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix(['y', 'Y']) {
        let before = stem.chars().last().map(|c| c.to_ascii_lowercase());
        if matches!(before, Some(c) if c.is_ascii_alphabetic() && !"aeiou".contains(c)) {
            return format!("{}ies", stem);
        }
    }

    format!("{}s", word)
}
