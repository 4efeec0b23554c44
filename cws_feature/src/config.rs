use crate::errors::{CwsError, Result};
use crate::tag::TagScheme;
use crate::vocabulary::VocabularyOrder;

/// Default shortest word length looked up in the dictionary.
pub const DEFAULT_WORD_MIN: u8 = 2;

/// Default longest word length looked up in the dictionary.
pub const DEFAULT_WORD_MAX: u8 = 6;

/// Settings of feature extraction.
///
/// # Examples
///
/// ```
/// use cws_feature::{FeatureConfig, TagScheme, VocabularyOrder};
///
/// let config = FeatureConfig::default()
///     .tag_scheme(TagScheme::Bmes)
///     .vocabulary_order(VocabularyOrder::Frequency)
///     .min_count(2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureConfig {
    pub(crate) word_min: u8,
    pub(crate) word_max: u8,
    pub(crate) tag_scheme: TagScheme,
    pub(crate) vocabulary_order: VocabularyOrder,
    pub(crate) min_count: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            word_min: DEFAULT_WORD_MIN,
            word_max: DEFAULT_WORD_MAX,
            tag_scheme: TagScheme::default(),
            vocabulary_order: VocabularyOrder::default(),
            min_count: 1,
        }
    }
}

impl FeatureConfig {
    /// Sets the range of word lengths looked up in the dictionary.
    pub const fn word_lengths(mut self, word_min: u8, word_max: u8) -> Self {
        self.word_min = word_min;
        self.word_max = word_max;
        self
    }

    pub const fn tag_scheme(mut self, tag_scheme: TagScheme) -> Self {
        self.tag_scheme = tag_scheme;
        self
    }

    pub const fn vocabulary_order(mut self, order: VocabularyOrder) -> Self {
        self.vocabulary_order = order;
        self
    }

    /// Sets the minimum number of occurrences of a feature to enter the vocabulary.
    pub const fn min_count(mut self, min_count: usize) -> Self {
        self.min_count = min_count;
        self
    }

    pub const fn word_min(&self) -> u8 {
        self.word_min
    }

    pub const fn word_max(&self) -> u8 {
        self.word_max
    }

    pub const fn scheme(&self) -> TagScheme {
        self.tag_scheme
    }

    pub const fn order(&self) -> VocabularyOrder {
        self.vocabulary_order
    }

    pub const fn threshold(&self) -> usize {
        self.min_count
    }

    /// Checks the settings.
    ///
    /// # Errors
    ///
    /// If the word length range is empty or starts at zero, an error variant will be returned.
    pub fn validate(&self) -> Result<()> {
        if self.word_min == 0 {
            return Err(CwsError::invalid_argument(
                "word_min",
                "must be at least 1",
            ));
        }
        if self.word_min > self.word_max {
            return Err(CwsError::invalid_argument(
                "word_max",
                "must not be less than word_min",
            ));
        }
        Ok(())
    }
}
