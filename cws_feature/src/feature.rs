use std::fmt;

use crate::corpus::CharSequence;
use crate::dictionary::{bigram_key, Dictionary};
use crate::errors::{CwsError, Result};

/// Textual form of [`Feature::Empty`].
pub const SENTINEL: &str = "/";

/// Feature placed at the head of every feature list.
pub const START_MARKER: &str = "$$";

/// Number of features in the character block.
pub const N_CHAR_FEATURES: usize = 9;

/// A slot of a feature list.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum Feature {
    /// The template matched and produced this string.
    Fired(String),

    /// The template did not match.
    Empty,
}

impl Feature {
    /// Gets the feature string, where [`Feature::Empty`] becomes [`SENTINEL`].
    pub fn as_str(&self) -> &str {
        match self {
            Self::Fired(s) => s,
            Self::Empty => SENTINEL,
        }
    }

    /// Gets the feature string if the template matched.
    pub fn fired(&self) -> Option<&str> {
        match self {
            Self::Fired(s) => Some(s),
            Self::Empty => None,
        }
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn char_feature(name: &str, c: Option<&str>) -> Feature {
    c.map_or(Feature::Empty, |c| Feature::Fired(format!("{name}.{c}")))
}

fn char_pair_feature(name: &str, c1: Option<&str>, c2: Option<&str>) -> Feature {
    match (c1, c2) {
        (Some(c1), Some(c2)) => Feature::Fired(format!("{name}.{c1}.{c2}")),
        _ => Feature::Empty,
    }
}

/// Generates the feature list of each character position.
///
/// Every list has the same length and layout:
///
/// 1. the start marker `$$`,
/// 2. nine character features (`c.`, `c-1.`, `c1.`, `c-2.`, `c2.`, `c-1c.`, `cc1.`, `c-2c-1.`,
///    `c1c2.`),
/// 3. one `w-1.` feature per word length for the dictionary word ending at the position,
/// 4. one `w1.` feature per word length for the dictionary word starting at the position,
/// 5. one `ww.l.` feature per pair of word lengths for the bigram crossing the left edge of the
///    position,
/// 6. one `ww.r.` feature per pair of word lengths for the bigram crossing the right edge.
///
/// Word lengths run in ascending order. A slot whose template does not match holds
/// [`Feature::Empty`].
pub struct FeatureExtractor<'a> {
    dictionary: &'a Dictionary,
    word_min: usize,
    word_max: usize,
}

impl<'a> FeatureExtractor<'a> {
    /// Creates a new extractor.
    ///
    /// # Arguments
    ///
    /// * `dictionary` - Words and bigrams that gate the word features.
    /// * `word_min` - The shortest word length to look up.
    /// * `word_max` - The longest word length to look up.
    ///
    /// # Errors
    ///
    /// If the word length range is empty or starts at zero, an error variant will be returned.
    pub fn new(dictionary: &'a Dictionary, word_min: usize, word_max: usize) -> Result<Self> {
        if word_min == 0 {
            return Err(CwsError::invalid_argument(
                "word_min",
                "must be at least 1",
            ));
        }
        if word_min > word_max {
            return Err(CwsError::invalid_argument(
                "word_max",
                "must not be less than word_min",
            ));
        }
        Ok(Self {
            dictionary,
            word_min,
            word_max,
        })
    }

    pub const fn n_word_lengths(&self) -> usize {
        self.word_max - self.word_min + 1
    }

    /// Gets the length of every feature list.
    pub const fn n_slots(&self) -> usize {
        let n = self.n_word_lengths();
        1 + N_CHAR_FEATURES + 2 * n + 2 * n * n
    }

    /// Generates the features of the character at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds of `seq`.
    pub fn node_features(&self, position: usize, seq: &CharSequence) -> Vec<Feature> {
        assert!(position < seq.len(), "position out of bounds");
        let mut features = Vec::with_capacity(self.n_slots());
        features.push(Feature::Fired(START_MARKER.to_string()));
        self.push_char_features(&mut features, position, seq);
        self.push_word_features(&mut features, position, seq);
        features
    }

    /// Generates the features of all positions of `seq`.
    pub fn sequence_features(&self, seq: &CharSequence) -> Vec<Vec<Feature>> {
        (0..seq.len())
            .map(|i| self.node_features(i, seq))
            .collect()
    }

    fn push_char_features(&self, features: &mut Vec<Feature>, position: usize, seq: &CharSequence) {
        let pos = position as isize;
        let c = seq.get(pos);
        let l1 = seq.get(pos - 1);
        let r1 = seq.get(pos + 1);
        let l2 = seq.get(pos - 2);
        let r2 = seq.get(pos + 2);
        features.push(char_feature("c", c));
        features.push(char_feature("c-1", l1));
        features.push(char_feature("c1", r1));
        features.push(char_feature("c-2", l2));
        features.push(char_feature("c2", r2));
        features.push(char_pair_feature("c-1c", l1, c));
        features.push(char_pair_feature("cc1", c, r1));
        features.push(char_pair_feature("c-2c-1", l2, l1));
        features.push(char_pair_feature("c1c2", r1, r2));
    }

    /// Looks up dictionary words in windows starting at `start(len)` for each word length.
    fn lookup_words<F>(&self, seq: &CharSequence, start: F) -> Vec<Option<String>>
    where
        F: Fn(isize) -> isize,
    {
        (self.word_min..=self.word_max)
            .map(|len| {
                seq.window(start(len as isize), len)
                    .filter(|word| self.dictionary.contains_word(word))
            })
            .collect()
    }

    fn push_bigram_features(
        &self,
        features: &mut Vec<Feature>,
        prefix: &str,
        lefts: &[Option<String>],
        rights: &[Option<String>],
    ) {
        for left in lefts {
            for right in rights {
                let feature = match (left, right) {
                    (Some(left), Some(right)) if self.dictionary.contains_bigram(left, right) => {
                        Feature::Fired(format!("{prefix}{}", bigram_key(left, right)))
                    }
                    _ => Feature::Empty,
                };
                features.push(feature);
            }
        }
    }

    fn push_word_features(&self, features: &mut Vec<Feature>, position: usize, seq: &CharSequence) {
        let pos = position as isize;
        let prev_in = self.lookup_words(seq, |len| pos - len + 1);
        let post_in = self.lookup_words(seq, |_| pos);
        let prev_exclude = self.lookup_words(seq, |len| pos - len);
        let post_exclude = self.lookup_words(seq, |_| pos + 1);

        for word in &prev_in {
            features.push(char_feature("w-1", word.as_deref()));
        }
        for word in &post_in {
            features.push(char_feature("w1", word.as_deref()));
        }
        self.push_bigram_features(features, "ww.l.", &prev_exclude, &post_in);
        self.push_bigram_features(features, "ww.r.", &prev_in, &post_exclude);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::corpus::{CorpusIndexer, TokenizedLine};

    fn build(lines: &[&str]) -> (Dictionary, Vec<CharSequence>) {
        let mut indexer = CorpusIndexer::new();
        for line in lines {
            indexer.push_line(line);
        }
        indexer.finish()
    }

    fn fired(features: &[Feature]) -> Vec<&str> {
        features.iter().filter_map(Feature::fired).collect()
    }

    #[test]
    fn test_feature_display() {
        assert_eq!("/", Feature::Empty.to_string());
        assert_eq!("c.中", Feature::Fired("c.中".to_string()).to_string());
        assert_eq!(None, Feature::Empty.fired());
        assert!(Feature::Empty.is_empty());
    }

    #[test]
    fn test_feature_extractor_new_invalid() {
        let dict = Dictionary::default();

        let fe = FeatureExtractor::new(&dict, 0, 6);
        assert!(fe.is_err());
        assert_eq!(
            "InvalidArgumentError: word_min: must be at least 1",
            &fe.err().unwrap().to_string()
        );

        let fe = FeatureExtractor::new(&dict, 4, 3);
        assert!(fe.is_err());
        assert_eq!(
            "InvalidArgumentError: word_max: must not be less than word_min",
            &fe.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_feature_extractor_n_slots() {
        let dict = Dictionary::default();

        assert_eq!(70, FeatureExtractor::new(&dict, 2, 6).unwrap().n_slots());
        assert_eq!(14, FeatureExtractor::new(&dict, 2, 2).unwrap().n_slots());
    }

    #[test]
    fn test_node_features_len() {
        let (dict, sequences) = build(&["北京 天安门", "我 爱 北京 天安门", "a"]);
        let fe = FeatureExtractor::new(&dict, 2, 6).unwrap();

        for seq in &sequences {
            for i in 0..seq.len() {
                assert_eq!(70, fe.node_features(i, seq).len());
            }
        }
    }

    #[test]
    fn test_node_features_char_block_edges() {
        let (dict, sequences) = build(&["北京 天安门"]);
        let fe = FeatureExtractor::new(&dict, 2, 6).unwrap();
        let seq = &sequences[0];

        let head = fe.node_features(0, seq);
        #[rustfmt::skip]
        let expected = vec![
            Feature::Fired("$$".to_string()),
            Feature::Fired("c.北".to_string()),
            Feature::Empty,
            Feature::Fired("c1.京".to_string()),
            Feature::Empty,
            Feature::Fired("c2.天".to_string()),
            Feature::Empty,
            Feature::Fired("cc1.北.京".to_string()),
            Feature::Empty,
            Feature::Fired("c1c2.京.天".to_string()),
        ];
        assert_eq!(expected, head[..10]);

        let tail = fe.node_features(4, seq);
        #[rustfmt::skip]
        let expected = vec![
            Feature::Fired("$$".to_string()),
            Feature::Fired("c.门".to_string()),
            Feature::Fired("c-1.安".to_string()),
            Feature::Empty,
            Feature::Fired("c-2.天".to_string()),
            Feature::Empty,
            Feature::Fired("c-1c.安.门".to_string()),
            Feature::Empty,
            Feature::Fired("c-2c-1.天.安".to_string()),
            Feature::Empty,
        ];
        assert_eq!(expected, tail[..10]);
    }

    #[test]
    fn test_node_features_single_char() {
        let (dict, sequences) = build(&["中"]);
        let fe = FeatureExtractor::new(&dict, 2, 6).unwrap();

        let features = fe.node_features(0, &sequences[0]);

        assert_eq!(70, features.len());
        assert_eq!(vec!["$$", "c.中"], fired(&features));
    }

    #[test]
    fn test_node_features_word_block() {
        let (dict, sequences) = build(&["北京 天安门"]);
        let fe = FeatureExtractor::new(&dict, 2, 6).unwrap();
        let seq = &sequences[0];

        // 北 京 | 天 安 门
        let features = fe.node_features(1, seq);
        assert_eq!(
            vec![
                "$$",
                "c.京",
                "c-1.北",
                "c1.天",
                "c2.安",
                "c-1c.北.京",
                "cc1.京.天",
                "c1c2.天.安",
                "w-1.北京",
                "ww.r.北京*天安门",
            ],
            fired(&features)
        );
        // The word of length 2 is the first slot after the character block.
        assert_eq!(Feature::Fired("w-1.北京".to_string()), features[10]);

        let features = fe.node_features(2, seq);
        assert!(fired(&features).contains(&"w1.天安门"));
        assert!(fired(&features).contains(&"ww.l.北京*天安门"));
        // post_in[3] is the second slot of the w1 block.
        assert_eq!(Feature::Fired("w1.天安门".to_string()), features[10 + 5 + 1]);
        // prev_exclude[2] x post_in[3] is the second slot of the left bigram block.
        assert_eq!(
            Feature::Fired("ww.l.北京*天安门".to_string()),
            features[10 + 5 + 5 + 1]
        );
    }

    #[test]
    fn test_node_features_right_bigram() {
        let (dict, sequences) = build(&["北京 天安门"]);
        let fe = FeatureExtractor::new(&dict, 2, 6).unwrap();
        let seq = &sequences[0];

        // The right bigram needs a word ending at the position followed by a word right after it.
        let features = fe.node_features(1, seq);
        let right_block = &features[10 + 5 + 5 + 25..];
        assert_eq!(25, right_block.len());
        // prev_in[2] ("北京") x post_exclude[3] ("天安门").
        assert_eq!(
            Feature::Fired("ww.r.北京*天安门".to_string()),
            right_block[1]
        );
        assert_eq!(1, right_block.iter().filter(|f| !f.is_empty()).count());
    }

    #[test]
    fn test_node_features_reversed_bigram_does_not_fire() {
        let (dict, _) = build(&["北京 天安门"]);
        let fe = FeatureExtractor::new(&dict, 2, 6).unwrap();
        let seq = TokenizedLine::parse("天安门 北京").unwrap().char_sequence();

        for i in 0..seq.len() {
            let features = fe.node_features(i, &seq);
            assert!(fired(&features).iter().all(|f| !f.starts_with("ww.")));
        }
    }

    #[test]
    fn test_node_features_class_markers_in_words() {
        // Words are looked up on normalized characters, so "１０" is searched as "**Num**Num".
        let (dict, _) = build(&["１０ 月"]);
        let fe = FeatureExtractor::new(&dict, 2, 6).unwrap();
        let seq = TokenizedLine::parse("１０月").unwrap().char_sequence();

        let features = fe.node_features(0, &seq);

        assert_eq!(Feature::Fired("c.**Num".to_string()), features[1]);
        assert!(fired(&features).iter().all(|f| !f.starts_with("w")));
    }

    #[test]
    fn test_sequence_features() {
        let (dict, sequences) = build(&["北京 天安门"]);
        let fe = FeatureExtractor::new(&dict, 2, 6).unwrap();

        let features = fe.sequence_features(&sequences[0]);

        assert_eq!(5, features.len());
        assert_eq!(fe.node_features(3, &sequences[0]), features[3]);
    }
}
