use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Strip diacritics from `input`: NFD, drop combining marks, then NFC.
///
/// Characters without a canonical decomposition pass through unchanged,
/// so the function is total.
pub fn fold_accents(input: &str) -> String {
    input.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}
