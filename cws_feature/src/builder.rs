use crate::config::FeatureConfig;
use crate::corpus::{CorpusIndexer, TokenizedLine};
use crate::errors::Result;
use crate::feature::FeatureExtractor;
use crate::model::FeatureModel;
use crate::vocabulary::FeatureCounter;

/// Builds a [`FeatureModel`] from a segmented corpus.
///
/// # Examples
///
/// ```no_run
/// use std::fs::File;
/// use std::io::{prelude::*, BufReader, BufWriter};
///
/// use cws_feature::{FeatureBuilder, FeatureConfig};
///
/// let mut builder = FeatureBuilder::new(FeatureConfig::default()).unwrap();
/// let f = BufReader::new(File::open("pku_training.utf8").unwrap());
/// for line in f.lines() {
///     builder.push_line(&line.unwrap());
/// }
///
/// let model = builder.build().unwrap();
/// let mut f = BufWriter::new(File::create("features.bin").unwrap());
/// model.write(&mut f).unwrap();
/// ```
pub struct FeatureBuilder {
    config: FeatureConfig,
    indexer: CorpusIndexer,
}

impl FeatureBuilder {
    /// Creates a new builder.
    ///
    /// # Errors
    ///
    /// If `config` is invalid, an error variant will be returned.
    pub fn new(config: FeatureConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            indexer: CorpusIndexer::new(),
        })
    }

    /// Adds a line of the corpus. Blank lines are ignored.
    ///
    /// # Returns
    ///
    /// `false` if the line is blank.
    pub fn push_line(&mut self, line: &str) -> bool {
        self.indexer.push_line(line)
    }

    pub fn push_tokenized(&mut self, line: &TokenizedLine) {
        self.indexer.push_tokenized(line);
    }

    /// Gets the number of non-blank lines added so far.
    pub fn n_lines(&self) -> usize {
        self.indexer.n_lines()
    }

    /// Gets the number of distinct words added so far.
    pub fn n_words(&self) -> usize {
        self.indexer.n_unigrams()
    }

    /// Freezes the dictionary and collects the feature vocabulary over all added lines.
    pub fn build(self) -> Result<FeatureModel> {
        let (dictionary, sequences) = self.indexer.finish();
        tracing::info!(
            n_lines = sequences.len(),
            n_unigrams = dictionary.n_unigrams(),
            n_bigrams = dictionary.n_bigrams(),
            "dictionary built"
        );

        let extractor = FeatureExtractor::new(
            &dictionary,
            usize::from(self.config.word_min),
            usize::from(self.config.word_max),
        )?;
        let mut counter = FeatureCounter::new();
        for seq in &sequences {
            for i in 0..seq.len() {
                counter.add_features(&extractor.node_features(i, seq));
            }
        }
        tracing::debug!(n_features = counter.n_features(), "features counted");

        let vocabulary = counter.build(self.config.vocabulary_order, self.config.min_count);
        tracing::info!(n_features = vocabulary.len(), "vocabulary built");

        FeatureModel::new(dictionary, vocabulary, self.config)
    }
}
