use rayon::prelude::*;

use crate::corpus::TokenizedLine;
use crate::feature::{Feature, FeatureExtractor};
use crate::tag::{Tag, TagScheme};
use crate::vocabulary::FeatureVocabulary;

/// A line with labels and feature strings of every character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedLine {
    /// Characters after special character normalization.
    pub chars: Vec<char>,
    pub tags: Vec<Tag>,
    pub features: Vec<Vec<Feature>>,
}

impl AnnotatedLine {
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// Feature IDs and label IDs of every character of a line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EncodedExample {
    pub features: Vec<Vec<u32>>,
    pub tags: Vec<u32>,
}

impl EncodedExample {
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterates over `(feature IDs, label ID)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&[u32], u32)> {
        self.features
            .iter()
            .map(Vec::as_slice)
            .zip(self.tags.iter().copied())
    }
}

/// Converts tokenized lines into labels and feature IDs.
///
/// The encoder only borrows the dictionary and the vocabulary, so a single instance can be shared
/// by many threads.
pub struct Encoder<'a> {
    extractor: FeatureExtractor<'a>,
    vocabulary: &'a FeatureVocabulary,
    scheme: TagScheme,
}

impl<'a> Encoder<'a> {
    pub const fn new(
        extractor: FeatureExtractor<'a>,
        vocabulary: &'a FeatureVocabulary,
        scheme: TagScheme,
    ) -> Self {
        Self {
            extractor,
            vocabulary,
            scheme,
        }
    }

    /// Labels every character and generates its feature strings.
    pub fn annotate(&self, line: &TokenizedLine) -> AnnotatedLine {
        let seq = line.char_sequence();
        AnnotatedLine {
            chars: line.chars().collect(),
            tags: line.tags(self.scheme),
            features: self.extractor.sequence_features(&seq),
        }
    }

    /// Maps features into IDs. Sentinels and features missing in the vocabulary are dropped.
    pub fn encode_features(&self, features: &[Feature]) -> Vec<u32> {
        features
            .iter()
            .filter_map(Feature::fired)
            .filter_map(|f| self.vocabulary.get(f))
            .collect()
    }

    /// Gets the ID of a label.
    ///
    /// # Panics
    ///
    /// Panics if the label is not part of the scheme, which never happens for labels produced by
    /// the same scheme.
    fn tag_id(&self, tag: Tag) -> u32 {
        self.scheme
            .tag_index(tag)
            .expect("labels are produced by the same scheme")
    }

    pub fn encode(&self, line: &TokenizedLine) -> EncodedExample {
        let seq = line.char_sequence();
        let features = (0..seq.len())
            .map(|i| self.encode_features(&self.extractor.node_features(i, &seq)))
            .collect();
        let tags = line
            .tags(self.scheme)
            .into_iter()
            .map(|tag| self.tag_id(tag))
            .collect();
        EncodedExample { features, tags }
    }

    /// Encodes lines in parallel. The result keeps the order of `lines`.
    pub fn encode_all(&self, lines: &[TokenizedLine]) -> Vec<EncodedExample> {
        tracing::debug!(n_lines = lines.len(), "encoding lines");
        lines.par_iter().map(|line| self.encode(line)).collect()
    }

    /// Annotates lines in parallel. The result keeps the order of `lines`.
    pub fn annotate_all(&self, lines: &[TokenizedLine]) -> Vec<AnnotatedLine> {
        tracing::debug!(n_lines = lines.len(), "annotating lines");
        lines.par_iter().map(|line| self.annotate(line)).collect()
    }
}
