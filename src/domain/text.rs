//! Name normalization helpers shared by the dataset and message paths.

/// Title-case a string: an alphabetic character is uppercased when it
/// follows a non-alphabetic character (or starts the string) and
/// lowercased otherwise. Hyphens and other punctuation restart a word, so
/// "anne-marie o'neil" becomes "Anne-Marie O'Neil".
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_alphabetic = false;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if prev_alphabetic {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(ch);
            prev_alphabetic = false;
        }
    }
    out
}

/// Trim surrounding whitespace and title-case the remainder.
///
/// Idempotent: normalizing an already-normalized name returns it
/// unchanged.
pub fn normalize_name(input: &str) -> String {
    title_case(input.trim())
}
