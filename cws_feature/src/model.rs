use std::io::{Read, Write};

use bincode::{Decode, Encode};

use crate::config::FeatureConfig;
use crate::dictionary::Dictionary;
use crate::encoder::Encoder;
use crate::errors::{CwsError, Result};
use crate::feature::FeatureExtractor;
use crate::tag::TagScheme;
use crate::vocabulary::{FeatureVocabulary, VocabularyOrder};

/// Serialized form of [`FeatureModel`].
#[derive(Decode, Encode)]
struct ModelData {
    unigrams: Vec<String>,
    bigrams: Vec<String>,
    features: Vec<String>,
    tag_scheme: TagScheme,
    vocabulary_order: VocabularyOrder,
    min_count: u64,
    word_min: u8,
    word_max: u8,
}

/// Everything needed to encode a corpus: the dictionary, the feature vocabulary, and the settings
/// they were built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureModel {
    pub(crate) dictionary: Dictionary,
    pub(crate) vocabulary: FeatureVocabulary,
    pub(crate) config: FeatureConfig,
}

impl FeatureModel {
    /// Creates a model.
    ///
    /// # Errors
    ///
    /// If `config` is invalid, an error variant will be returned.
    pub fn new(
        dictionary: Dictionary,
        vocabulary: FeatureVocabulary,
        config: FeatureConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            dictionary,
            vocabulary,
            config,
        })
    }

    pub const fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub const fn vocabulary(&self) -> &FeatureVocabulary {
        &self.vocabulary
    }

    pub const fn config(&self) -> &FeatureConfig {
        &self.config
    }

    pub const fn tag_scheme(&self) -> TagScheme {
        self.config.tag_scheme
    }

    /// Creates a feature extractor borrowing the dictionary.
    pub fn extractor(&self) -> Result<FeatureExtractor<'_>> {
        FeatureExtractor::new(
            &self.dictionary,
            usize::from(self.config.word_min),
            usize::from(self.config.word_max),
        )
    }

    /// Creates an encoder borrowing the dictionary and the vocabulary.
    pub fn encoder(&self) -> Result<Encoder<'_>> {
        Ok(Encoder::new(
            self.extractor()?,
            &self.vocabulary,
            self.config.tag_scheme,
        ))
    }

    /// Exports the model data.
    ///
    /// # Arguments
    ///
    /// * `wtr` - Byte-oriented sink object.
    ///
    /// # Errors
    ///
    /// When `wtr` generates an error, it will be returned as is.
    pub fn write<W>(&self, wtr: &mut W) -> Result<()>
    where
        W: Write,
    {
        let data = ModelData {
            unigrams: self.dictionary.unigrams().into_iter().map(String::from).collect(),
            bigrams: self.dictionary.bigrams().into_iter().map(String::from).collect(),
            features: self.vocabulary.features().to_vec(),
            tag_scheme: self.config.tag_scheme,
            vocabulary_order: self.config.vocabulary_order,
            min_count: u64::try_from(self.config.min_count)?,
            word_min: self.config.word_min,
            word_max: self.config.word_max,
        };
        bincode::encode_into_std_write(data, wtr, bincode::config::standard())?;
        Ok(())
    }

    /// Creates a model from a reader.
    ///
    /// # Arguments
    ///
    /// * `rdr` - A data source.
    ///
    /// # Returns
    ///
    /// A model data read from `rdr`.
    ///
    /// # Errors
    ///
    /// When `rdr` generates an error, it will be returned as is.
    /// If the data is inconsistent, [`CwsError::InvalidModel`] will be returned.
    pub fn read<R>(rdr: &mut R) -> Result<Self>
    where
        R: Read,
    {
        let data: ModelData = bincode::decode_from_std_read(rdr, bincode::config::standard())?;
        let vocabulary = FeatureVocabulary::from_features(data.features)
            .map_err(|e| CwsError::invalid_model(e.to_string()))?;
        let config = FeatureConfig::default()
            .word_lengths(data.word_min, data.word_max)
            .tag_scheme(data.tag_scheme)
            .vocabulary_order(data.vocabulary_order)
            .min_count(usize::try_from(data.min_count)?);
        config
            .validate()
            .map_err(|e| CwsError::invalid_model(e.to_string()))?;
        Ok(Self {
            dictionary: Dictionary::new(data.unigrams, data.bigrams),
            vocabulary,
            config,
        })
    }
}
