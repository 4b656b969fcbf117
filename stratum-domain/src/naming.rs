//! Collection naming helpers.

use convert_case::{Case, Casing};

/// Derive the default collection name for a type name.
///
/// `"LineItem"` becomes `"line_items"`.
pub fn collection_name(type_name: &str) -> String {
    pluralize(&type_name.to_case(Case::Snake))
}

/// Pluralize a snake_case word.
///
/// Covers the regular English forms; mappings can override the
/// collection name for anything irregular.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    if let Some(stem) = word.strip_suffix('y') {
        let penultimate = stem.chars().last();
        if matches!(penultimate, Some(c) if !is_vowel(c)) {
            return format!("{}ies", stem);
        }
    }

    if word.ends_with('s')
        || word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("ch")
        || word.ends_with("sh")
    {
        return format!("{}es", word);
    }

    format!("{}s", word)
}

/// The unqualified name of a type, without module path or generics.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}
