use std::fmt;
use std::str::FromStr;

use bincode::{Decode, Encode};

/// Boundary label of a character.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Tag {
    /// First character of a multi-character word.
    Begin,

    /// Inner character of a word. (BMES scheme)
    Middle,

    /// Last character of a multi-character word. (BMES scheme)
    End,

    /// Single-character word. (BMES scheme)
    Single,

    /// Single-character word. (5-tag scheme)
    BeginSingle,

    /// Inner character of a word other than the second one. (5-tag scheme)
    Inside,

    /// Second character of a word with three or more characters. (5-tag scheme)
    InsideFirst,

    /// Last character of a multi-character word. (5-tag scheme)
    InsideEnd,
}

impl Tag {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Begin => "B",
            Self::Middle => "M",
            Self::End => "E",
            Self::Single => "S",
            Self::BeginSingle => "B_single",
            Self::Inside => "I",
            Self::InsideFirst => "I_first",
            Self::InsideEnd => "I_end",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" => Ok(Self::Begin),
            "M" => Ok(Self::Middle),
            "E" => Ok(Self::End),
            "S" => Ok(Self::Single),
            "B_single" => Ok(Self::BeginSingle),
            "I" => Ok(Self::Inside),
            "I_first" => Ok(Self::InsideFirst),
            "I_end" => Ok(Self::InsideEnd),
            _ => Err("Unknown tag."),
        }
    }
}

const BMES_TAGS: [Tag; 4] = [Tag::Begin, Tag::Middle, Tag::End, Tag::Single];

const EXTENDED_TAGS: [Tag; 5] = [
    Tag::Begin,
    Tag::BeginSingle,
    Tag::Inside,
    Tag::InsideEnd,
    Tag::InsideFirst,
];

/// Label set used to annotate characters.
///
/// The index of a label is its position in [`TagScheme::tags()`]; it never depends on the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Decode, Encode)]
pub enum TagScheme {
    /// `B`, `M`, `E`, `S`.
    Bmes,

    /// `B`, `B_single`, `I`, `I_end`, `I_first`.
    Extended,
}

impl Default for TagScheme {
    fn default() -> Self {
        Self::Extended
    }
}

impl TagScheme {
    /// Returns all labels of the scheme in index order.
    pub const fn tags(self) -> &'static [Tag] {
        match self {
            Self::Bmes => &BMES_TAGS,
            Self::Extended => &EXTENDED_TAGS,
        }
    }

    /// Gets the label of the `position`-th character of a word with `word_len` characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use cws_feature::{Tag, TagScheme};
    ///
    /// let tags: Vec<_> = (0..3).map(|i| TagScheme::Extended.tag(i, 3)).collect();
    /// assert_eq!(vec![Tag::Begin, Tag::InsideFirst, Tag::InsideEnd], tags);
    /// ```
    pub const fn tag(self, position: usize, word_len: usize) -> Tag {
        match self {
            Self::Bmes => {
                if word_len == 1 {
                    Tag::Single
                } else if position == 0 {
                    Tag::Begin
                } else if position == word_len - 1 {
                    Tag::End
                } else {
                    Tag::Middle
                }
            }
            Self::Extended => {
                if word_len == 1 {
                    Tag::BeginSingle
                } else if position == 0 {
                    Tag::Begin
                } else if position == word_len - 1 {
                    Tag::InsideEnd
                } else if position == 1 {
                    Tag::InsideFirst
                } else {
                    Tag::Inside
                }
            }
        }
    }

    pub fn index_of(self, tag: Tag) -> Option<usize> {
        self.tags().iter().position(|&t| t == tag)
    }

    /// Gets the index of the label, or [`None`] if the scheme does not use it.
    pub fn tag_index(self, tag: Tag) -> Option<u32> {
        self.index_of(tag).and_then(|i| u32::try_from(i).ok())
    }
}

impl FromStr for TagScheme {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bmes" | "4tag" => Ok(Self::Bmes),
            "5tag" | "extended" => Ok(Self::Extended),
            _ => Err("Unsupported tag scheme. (bmes or 5tag)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use Tag::*;

    fn word_tags(scheme: TagScheme, len: usize) -> Vec<Tag> {
        (0..len).map(|i| scheme.tag(i, len)).collect()
    }

    #[test]
    fn test_extended_tags() {
        assert_eq!(vec![BeginSingle], word_tags(TagScheme::Extended, 1));
        assert_eq!(vec![Begin, InsideEnd], word_tags(TagScheme::Extended, 2));
        assert_eq!(
            vec![Begin, InsideFirst, InsideEnd],
            word_tags(TagScheme::Extended, 3)
        );
        assert_eq!(
            vec![Begin, InsideFirst, Inside, Inside, InsideEnd],
            word_tags(TagScheme::Extended, 5)
        );
    }

    #[test]
    fn test_bmes_tags() {
        assert_eq!(vec![Single], word_tags(TagScheme::Bmes, 1));
        assert_eq!(vec![Begin, End], word_tags(TagScheme::Bmes, 2));
        assert_eq!(vec![Begin, Middle, End], word_tags(TagScheme::Bmes, 3));
        assert_eq!(
            vec![Begin, Middle, Middle, End],
            word_tags(TagScheme::Bmes, 4)
        );
    }

    #[test]
    fn test_tag_index() {
        assert_eq!(Some(0), TagScheme::Extended.tag_index(Begin));
        assert_eq!(Some(1), TagScheme::Extended.tag_index(BeginSingle));
        assert_eq!(Some(2), TagScheme::Extended.tag_index(Inside));
        assert_eq!(Some(3), TagScheme::Extended.tag_index(InsideEnd));
        assert_eq!(Some(4), TagScheme::Extended.tag_index(InsideFirst));
        assert_eq!(None, TagScheme::Extended.tag_index(Middle));

        assert_eq!(Some(3), TagScheme::Bmes.tag_index(Single));
        assert_eq!(None, TagScheme::Bmes.tag_index(InsideFirst));
    }

    #[test]
    fn test_tag_from_str() {
        for &tag in TagScheme::Extended.tags().iter().chain(TagScheme::Bmes.tags()) {
            assert_eq!(Ok(tag), tag.as_str().parse());
        }
        assert!("X".parse::<Tag>().is_err());
    }

    #[test]
    fn test_scheme_from_str() {
        assert_eq!(Ok(TagScheme::Bmes), "bmes".parse());
        assert_eq!(Ok(TagScheme::Extended), "5tag".parse());
        assert!("6tag".parse::<TagScheme>().is_err());
    }
}
