//! Character normalization applied before a line enters the feature pipeline.

use std::borrow::Cow;

/// Replacement of special characters in [`normalize_line()`].
pub const SPECIAL_CHAR_MARKER: char = '&';

/// Class marker of digit-like characters.
pub const NUM_CLASS: &str = "**Num";

/// Class marker of Latin-letter-like characters.
pub const LETTER_CLASS: &str = "**Letter";

/// Checks if the character is collapsed into [`SPECIAL_CHAR_MARKER`].
pub const fn is_special_char(c: char) -> bool {
    matches!(c, '-' | '.' | '_' | ',' | '|' | '/' | '*' | ':')
}

/// Checks if the character belongs to the digit class.
pub const fn is_numeral(c: char) -> bool {
    matches!(
        c,
        '0'..='9'
            | '０'..='９'
            | '几' | '二' | '三' | '四' | '五' | '六' | '七' | '八' | '九'
            | '十' | '千' | '万' | '亿' | '兆' | '零'
            | '.' | '%' | '％'
    )
}

/// Checks if the character belongs to the letter class.
pub const fn is_letter(c: char) -> bool {
    matches!(
        c,
        'A'..='Z' | 'a'..='z' | 'Ａ'..='Ｚ' | 'ａ'..='ｚ' | '／' | '・' | '－'
    )
}

/// Replaces special characters in a line with [`SPECIAL_CHAR_MARKER`].
///
/// This runs before tokenization, so it may change token contents but never splits or merges
/// tokens since whitespace is untouched.
///
/// # Examples
///
/// ```
/// use cws_feature::normalize::normalize_line;
///
/// assert_eq!("3&5 km&h", normalize_line("3.5 km/h"));
/// ```
pub fn normalize_line(line: &str) -> String {
    line.chars()
        .map(|c| {
            if is_special_char(c) {
                SPECIAL_CHAR_MARKER
            } else {
                c
            }
        })
        .collect()
}

/// Strips ASCII control characters and spaces from both ends of a line.
///
/// Other whitespace such as `U+3000` is kept, since it is part of the text.
pub fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c <= ' ')
}

/// Maps a character into its class marker, or into itself if it has no class.
///
/// # Examples
///
/// ```
/// use cws_feature::normalize::normalize_char;
///
/// assert_eq!("**Num", normalize_char('５'));
/// assert_eq!("**Letter", normalize_char('Ａ'));
/// assert_eq!("中", normalize_char('中'));
/// ```
pub fn normalize_char(c: char) -> Cow<'static, str> {
    if is_numeral(c) {
        Cow::Borrowed(NUM_CLASS)
    } else if is_letter(c) {
        Cow::Borrowed(LETTER_CLASS)
    } else {
        Cow::Owned(c.to_string())
    }
}
