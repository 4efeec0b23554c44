use std::ops::Index;

use hashbrown::HashSet;

use crate::dictionary::{bigram_key, Dictionary};
use crate::normalize::{normalize_char, normalize_line, trim_line};
use crate::tag::{Tag, TagScheme};

/// Normalized characters of a line, without word boundaries.
///
/// Each element is either a single character or a class marker such as `**Num`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CharSequence {
    chars: Vec<String>,
}

impl CharSequence {
    pub fn new<I, S>(chars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            chars: chars.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Gets the element at a signed position, or [`None`] if it lies outside the sequence.
    pub fn get(&self, position: isize) -> Option<&str> {
        usize::try_from(position)
            .ok()
            .and_then(|i| self.chars.get(i))
            .map(String::as_str)
    }

    /// Concatenates `len` elements starting at `start`.
    ///
    /// Returns [`None`] if the window does not fit in the sequence.
    pub fn window(&self, start: isize, len: usize) -> Option<String> {
        let start = usize::try_from(start).ok()?;
        if start >= self.chars.len() || start + len > self.chars.len() {
            return None;
        }
        Some(self.chars[start..start + len].concat())
    }
}

impl Index<usize> for CharSequence {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.chars[index]
    }
}

/// A non-blank corpus line split into words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedLine {
    tokens: Vec<String>,
}

impl TokenizedLine {
    /// Parses a whitespace-segmented line.
    ///
    /// Special characters are normalized before splitting on runs of spaces and tabs.
    ///
    /// # Returns
    ///
    /// [`None`] if the line is blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use cws_feature::TokenizedLine;
    ///
    /// let line = TokenizedLine::parse(" 北京  天安门\t").unwrap();
    /// assert_eq!(&["北京", "天安门"], line.tokens());
    ///
    /// assert!(TokenizedLine::parse("  \t").is_none());
    /// ```
    pub fn parse(line: &str) -> Option<Self> {
        let line = trim_line(line);
        if line.is_empty() {
            return None;
        }
        let tokens: Vec<_> = normalize_line(line)
            .split([' ', '\t'])
            .filter(|token| !token.is_empty())
            .map(ToString::to_string)
            .collect();
        if tokens.is_empty() {
            return None;
        }
        Some(Self { tokens })
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Returns the characters of all words in order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.tokens.iter().flat_map(|token| token.chars())
    }

    pub fn n_chars(&self) -> usize {
        self.tokens.iter().map(|token| token.chars().count()).sum()
    }

    pub fn char_sequence(&self) -> CharSequence {
        CharSequence {
            chars: self.chars().map(|c| normalize_char(c).into_owned()).collect(),
        }
    }

    /// Labels every character by its position in the word.
    pub fn tags(&self, scheme: TagScheme) -> Vec<Tag> {
        let mut tags = Vec::with_capacity(self.n_chars());
        for token in &self.tokens {
            let len = token.chars().count();
            tags.extend((0..len).map(|i| scheme.tag(i, len)));
        }
        tags
    }
}

/// Collects the dictionary and the character sequences of a corpus.
#[derive(Default)]
pub struct CorpusIndexer {
    unigrams: HashSet<String>,
    bigrams: HashSet<String>,
    sequences: Vec<CharSequence>,
}

impl CorpusIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a corpus line.
    ///
    /// # Returns
    ///
    /// `false` if the line is blank and has been skipped.
    pub fn push_line(&mut self, line: &str) -> bool {
        match TokenizedLine::parse(line) {
            Some(line) => {
                self.push_tokenized(&line);
                true
            }
            None => false,
        }
    }

    pub fn push_tokenized(&mut self, line: &TokenizedLine) {
        for pair in line.tokens.windows(2) {
            let key = bigram_key(&pair[0], &pair[1]);
            if !self.bigrams.contains(key.as_str()) {
                self.bigrams.insert(key);
            }
        }
        for token in &line.tokens {
            if !self.unigrams.contains(token.as_str()) {
                self.unigrams.insert(token.clone());
            }
        }
        self.sequences.push(line.char_sequence());
    }

    pub fn n_lines(&self) -> usize {
        self.sequences.len()
    }

    pub fn n_unigrams(&self) -> usize {
        self.unigrams.len()
    }

    pub fn finish(self) -> (Dictionary, Vec<CharSequence>) {
        (
            Dictionary {
                unigrams: self.unigrams,
                bigrams: self.bigrams,
            },
            self.sequences,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::normalize::{LETTER_CLASS, NUM_CLASS};
    use Tag::*;

    #[test]
    fn test_char_sequence_window() {
        let seq = CharSequence::new(["a", "b", "c"]);

        assert_eq!(Some("ab".to_string()), seq.window(0, 2));
        assert_eq!(Some("abc".to_string()), seq.window(0, 3));
        assert_eq!(Some("c".to_string()), seq.window(2, 1));
        assert_eq!(None, seq.window(-1, 2));
        assert_eq!(None, seq.window(2, 2));
        assert_eq!(None, seq.window(3, 1));
        assert_eq!(None, seq.window(0, 4));
    }

    #[test]
    fn test_char_sequence_get() {
        let seq = CharSequence::new(["a", NUM_CLASS]);

        assert_eq!(None, seq.get(-1));
        assert_eq!(Some("a"), seq.get(0));
        assert_eq!(Some(NUM_CLASS), seq.get(1));
        assert_eq!(None, seq.get(2));
        assert_eq!(NUM_CLASS, &seq[1]);
    }

    #[test]
    fn test_tokenized_line_parse() {
        let line = TokenizedLine::parse("ａｂ 12:30\t\t中").unwrap();

        assert_eq!(&["ａｂ", "12&30", "中"], line.tokens());
        assert_eq!(8, line.n_chars());
        assert_eq!(
            CharSequence::new([
                LETTER_CLASS,
                LETTER_CLASS,
                NUM_CLASS,
                NUM_CLASS,
                "&",
                NUM_CLASS,
                NUM_CLASS,
                "中"
            ]),
            line.char_sequence()
        );
    }

    #[test]
    fn test_tokenized_line_keeps_ideographic_space() {
        let line = TokenizedLine::parse("北京 天安门\u{3000}").unwrap();
        assert_eq!(&["北京", "天安门\u{3000}"], line.tokens());

        let line = TokenizedLine::parse(" \u{3000}\t").unwrap();
        assert_eq!(&["\u{3000}"], line.tokens());
    }

    #[test]
    fn test_tokenized_line_blank() {
        assert_eq!(None, TokenizedLine::parse(""));
        assert_eq!(None, TokenizedLine::parse(" \t "));
    }

    #[test]
    fn test_tokenized_line_tags() {
        let line = TokenizedLine::parse("北京 天安门").unwrap();

        assert_eq!(5, line.char_sequence().len());
        assert_eq!(
            vec![Begin, InsideEnd, Begin, InsideFirst, InsideEnd],
            line.tags(TagScheme::Extended)
        );
        assert_eq!(
            vec![Begin, End, Begin, Middle, End],
            line.tags(TagScheme::Bmes)
        );
    }

    #[test]
    fn test_tokenized_line_single_tags() {
        let line = TokenizedLine::parse("x xyz").unwrap();

        assert_eq!(
            vec![BeginSingle, Begin, InsideFirst, InsideEnd],
            line.tags(TagScheme::Extended)
        );
        assert_eq!(vec![Single, Begin, Middle, End], line.tags(TagScheme::Bmes));
    }

    #[test]
    fn test_corpus_indexer_dictionary() {
        let mut indexer = CorpusIndexer::new();
        assert!(indexer.push_line("ab cd"));
        assert!(!indexer.push_line(""));
        assert!(indexer.push_line("北京 天安门"));
        assert_eq!(2, indexer.n_lines());

        let (dict, sequences) = indexer.finish();

        assert!(dict.contains_word("ab"));
        assert!(dict.contains_word("cd"));
        assert!(dict.contains_bigram("ab", "cd"));
        assert!(!dict.contains_bigram("cd", "ab"));
        assert!(dict.contains_word("北京"));
        assert!(dict.contains_word("天安门"));
        assert!(dict.contains_bigram("北京", "天安门"));
        assert!(!dict.contains_bigram("cd", "北京"));
        assert_eq!(2, sequences.len());
        assert_eq!(5, sequences[1].len());
    }

    #[test]
    fn test_corpus_indexer_special_chars() {
        let mut indexer = CorpusIndexer::new();
        indexer.push_line("a-b c");

        let (dict, _) = indexer.finish();

        assert!(dict.contains_word("a&b"));
        assert!(!dict.contains_word("a-b"));
        assert!(dict.contains_bigram("a&b", "c"));
    }
}
