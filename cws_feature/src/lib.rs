#![cfg_attr(docsrs, feature(doc_cfg))]

//! # cws_feature
//!
//! Feature extraction for CRF-based Chinese word segmentation.
//!
//! A segmented corpus is scanned once to collect a word dictionary, a word bigram dictionary and
//! a feature vocabulary. The corpus (or another one) is then converted into per-character feature
//! IDs and boundary labels.
//!
//! ## Examples
//!
//! ```
//! use cws_feature::{FeatureBuilder, FeatureConfig, TokenizedLine};
//!
//! let mut builder = FeatureBuilder::new(FeatureConfig::default()).unwrap();
//! builder.push_line("北京 天安门");
//! builder.push_line("我 爱 北京 天安门");
//! let model = builder.build().unwrap();
//!
//! let encoder = model.encoder().unwrap();
//! let line = TokenizedLine::parse("我 爱 天安门").unwrap();
//! let example = encoder.encode(&line);
//! assert_eq!(5, example.len());
//! assert_eq!(vec![1, 1, 0, 4, 3], example.tags);
//! ```

mod builder;
mod config;
mod corpus;
mod dictionary;
mod encoder;
mod feature;
mod model;
mod tag;
mod vocabulary;

pub mod errors;
pub mod normalize;
pub mod table;

pub use builder::FeatureBuilder;
pub use config::{FeatureConfig, DEFAULT_WORD_MAX, DEFAULT_WORD_MIN};
pub use corpus::{CharSequence, CorpusIndexer, TokenizedLine};
pub use dictionary::{bigram_key, Dictionary, BIGRAM_SEPARATOR};
pub use encoder::{AnnotatedLine, EncodedExample, Encoder};
pub use feature::{Feature, FeatureExtractor, N_CHAR_FEATURES, SENTINEL, START_MARKER};
pub use model::FeatureModel;
pub use tag::{Tag, TagScheme};
pub use vocabulary::{FeatureCounter, FeatureVocabulary, Indexer, VocabularyOrder};
