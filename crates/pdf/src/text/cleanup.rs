use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Clean up the text of a single extracted run.
///
/// Applies unicode normalization, ligature replacement, whitespace folding
/// (tabs, line breaks and no-break spaces become plain spaces) and removal of
/// replacement and control characters. Leading and trailing spaces are kept
/// since they carry positional meaning within the run.
pub fn clean_run_text(text: &str) -> String {
    // 1. Unicode NFC normalization.
    let mut result: String = text.nfc().collect();

    // 2. Fix ligatures (ff, fi, fl, ffi, ffl).
    let ligatures = [
        ("\u{FB00}", "ff"),
        ("\u{FB01}", "fi"),
        ("\u{FB02}", "fl"),
        ("\u{FB03}", "ffi"),
        ("\u{FB04}", "ffl"),
    ];
    for (lig, replacement) in &ligatures {
        if result.contains(lig) {
            result = result.replace(lig, replacement);
        }
    }

    // 3. Fold whitespace variants to a plain space.
    static RE_WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let re_whitespace =
        RE_WHITESPACE.get_or_init(|| Regex::new(r"[\t\r\n\x{00A0}\x{2007}\x{202F}]").unwrap());
    let result = re_whitespace.replace_all(&result, " ");

    // 4. Drop replacement and remaining control characters.
    static RE_JUNK: OnceLock<Regex> = OnceLock::new();
    let re_junk = RE_JUNK.get_or_init(|| Regex::new(r"[\p{Cc}\x{FFFD}]").unwrap());
    re_junk.replace_all(&result, "").into_owned()
}
