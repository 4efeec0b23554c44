use std::borrow::Borrow;
use std::hash::Hash;
use std::str::FromStr;

use bincode::{Decode, Encode};
use hashbrown::HashMap;

use crate::errors::{CwsError, Result};
use crate::feature::{Feature, SENTINEL};

/// Assigns sequential IDs to keys in first-seen order.
pub struct Indexer<K> {
    ids: HashMap<K, usize>,
    keys: Vec<K>,
}

impl<K> Default for Indexer<K> {
    fn default() -> Self {
        Self {
            ids: HashMap::new(),
            keys: vec![],
        }
    }
}

impl<K> Indexer<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_id<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + ToOwned<Owned = K> + Eq + Hash,
    {
        if let Some(&id) = self.ids.get(key) {
            id
        } else {
            let id = self.keys.len();
            self.keys.push(key.to_owned());
            self.ids.insert(key.to_owned(), id);
            id
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }
}

/// Ordering of feature IDs in a [`FeatureVocabulary`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Decode, Encode)]
pub enum VocabularyOrder {
    /// Order of the first occurrence in the corpus.
    FirstSeen,

    /// Ascending order of feature strings.
    Ascending,

    /// Descending order of feature strings.
    Descending,

    /// Descending order of frequency. Ties are broken by ascending order of feature strings.
    Frequency,
}

impl Default for VocabularyOrder {
    fn default() -> Self {
        Self::Ascending
    }
}

impl FromStr for VocabularyOrder {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first-seen" => Ok(Self::FirstSeen),
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            "freq" => Ok(Self::Frequency),
            _ => Err("Unsupported vocabulary order. (first-seen, asc, desc, or freq)"),
        }
    }
}

/// Counts feature occurrences over a corpus.
#[derive(Default)]
pub struct FeatureCounter {
    feature_ids: Indexer<String>,
    counts: Vec<usize>,
}

impl FeatureCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_feature(&mut self, feature: &Feature) {
        if let Some(s) = feature.fired() {
            let id = self.feature_ids.get_id(s);
            if id == self.counts.len() {
                self.counts.push(0);
            }
            self.counts[id] += 1;
        }
    }

    pub fn add_features(&mut self, features: &[Feature]) {
        for feature in features {
            self.add_feature(feature);
        }
    }

    /// Gets the number of distinct features.
    pub fn n_features(&self) -> usize {
        self.feature_ids.len()
    }

    pub fn count(&self, feature: &str) -> usize {
        self.feature_ids
            .ids
            .get(feature)
            .map_or(0, |&id| self.counts[id])
    }

    /// Builds a vocabulary.
    ///
    /// # Arguments
    ///
    /// * `order` - The order of IDs.
    /// * `min_count` - Features occurring fewer times are dropped.
    ///
    /// # Returns
    ///
    /// A vocabulary. The same counts with the same arguments always give the same vocabulary.
    pub fn build(self, order: VocabularyOrder, min_count: usize) -> FeatureVocabulary {
        let mut entries: Vec<(String, usize)> = self
            .feature_ids
            .keys
            .into_iter()
            .zip(self.counts)
            .filter(|(_, count)| *count >= min_count)
            .collect();
        match order {
            VocabularyOrder::FirstSeen => (),
            VocabularyOrder::Ascending => entries.sort_unstable_by(|a, b| a.0.cmp(&b.0)),
            VocabularyOrder::Descending => entries.sort_unstable_by(|a, b| b.0.cmp(&a.0)),
            VocabularyOrder::Frequency => {
                entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
            }
        }
        let features: Vec<String> = entries.into_iter().map(|(feature, _)| feature).collect();
        FeatureVocabulary::from_unique(features)
    }
}

/// Mapping from feature strings to dense IDs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FeatureVocabulary {
    ids: HashMap<String, u32>,
    features: Vec<String>,
}

impl FeatureVocabulary {
    fn from_unique(features: Vec<String>) -> Self {
        let ids = features
            .iter()
            .enumerate()
            .map(|(i, feature)| (feature.clone(), i as u32))
            .collect();
        Self { ids, features }
    }

    /// Creates a vocabulary whose IDs are the positions in `features`.
    ///
    /// # Errors
    ///
    /// If `features` contains a duplicate or the sentinel, an error variant will be returned.
    pub fn from_features(features: Vec<String>) -> Result<Self> {
        u32::try_from(features.len())?;
        {
            let mut seen = hashbrown::HashSet::with_capacity(features.len());
            for feature in &features {
                if feature == SENTINEL {
                    return Err(CwsError::invalid_argument(
                        "features",
                        "contains the sentinel",
                    ));
                }
                if !seen.insert(feature.as_str()) {
                    return Err(CwsError::invalid_argument(
                        "features",
                        format!("duplicated feature: {feature}"),
                    ));
                }
            }
        }
        Ok(Self::from_unique(features))
    }

    pub fn get(&self, feature: &str) -> Option<u32> {
        self.ids.get(feature).copied()
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.ids.contains_key(feature)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Gets the feature string of an ID.
    pub fn feature(&self, id: u32) -> Option<&str> {
        self.features.get(id as usize).map(String::as_str)
    }

    /// Returns features with their IDs in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.features
            .iter()
            .enumerate()
            .map(|(i, feature)| (feature.as_str(), i as u32))
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fired(s: &str) -> Feature {
        Feature::Fired(s.to_string())
    }

    fn counter() -> FeatureCounter {
        let mut counter = FeatureCounter::new();
        counter.add_features(&[fired("c.b"), Feature::Empty, fired("c.a"), fired("$$")]);
        counter.add_features(&[fired("c.a"), Feature::Empty, fired("c.c"), fired("$$")]);
        counter.add_features(&[fired("c.a"), fired("$$")]);
        counter
    }

    #[test]
    fn test_indexer() {
        let mut indexer = Indexer::<String>::new();

        assert_eq!(0, indexer.get_id("b"));
        assert_eq!(1, indexer.get_id("a"));
        assert_eq!(0, indexer.get_id("b"));
        assert_eq!(2, indexer.len());
        assert_eq!(&["b".to_string(), "a".to_string()], indexer.keys());
    }

    #[test]
    fn test_feature_counter_skips_sentinel() {
        let counter = counter();

        assert_eq!(4, counter.n_features());
        assert_eq!(3, counter.count("c.a"));
        assert_eq!(1, counter.count("c.b"));
        assert_eq!(0, counter.count(SENTINEL));
    }

    #[test]
    fn test_build_first_seen() {
        let vocab = counter().build(VocabularyOrder::FirstSeen, 1);

        assert_eq!(
            vec![("c.b", 0), ("c.a", 1), ("$$", 2), ("c.c", 3)],
            vocab.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_build_ascending() {
        let vocab = counter().build(VocabularyOrder::Ascending, 1);

        assert_eq!(&["$$", "c.a", "c.b", "c.c"], vocab.features());
        assert_eq!(Some(1), vocab.get("c.a"));
        assert_eq!(None, vocab.get(SENTINEL));
    }

    #[test]
    fn test_build_descending() {
        let vocab = counter().build(VocabularyOrder::Descending, 1);

        assert_eq!(&["c.c", "c.b", "c.a", "$$"], vocab.features());
    }

    #[test]
    fn test_build_frequency() {
        let vocab = counter().build(VocabularyOrder::Frequency, 1);

        assert_eq!(&["$$", "c.a", "c.b", "c.c"], vocab.features());
    }

    #[test]
    fn test_build_min_count() {
        let vocab = counter().build(VocabularyOrder::Ascending, 2);

        assert_eq!(&["$$", "c.a"], vocab.features());
        assert!(!vocab.contains("c.b"));
    }

    #[test]
    fn test_build_deterministic() {
        assert_eq!(
            counter().build(VocabularyOrder::Frequency, 1),
            counter().build(VocabularyOrder::Frequency, 1)
        );
        assert_eq!(
            counter().build(VocabularyOrder::FirstSeen, 1),
            counter().build(VocabularyOrder::FirstSeen, 1)
        );
    }

    #[test]
    fn test_from_features() {
        let vocab = FeatureVocabulary::from_features(vec!["x".into(), "y".into()]).unwrap();

        assert_eq!(Some(1), vocab.get("y"));
        assert_eq!(Some("x"), vocab.feature(0));
        assert_eq!(None, vocab.feature(2));
    }

    #[test]
    fn test_from_features_rebuilds_vocabulary() {
        let vocab = counter().build(VocabularyOrder::Frequency, 1);

        let other = FeatureVocabulary::from_features(vocab.features().to_vec()).unwrap();

        assert_eq!(vocab, other);
    }

    #[test]
    fn test_from_features_invalid() {
        let vocab = FeatureVocabulary::from_features(vec!["x".into(), "/".into()]);
        assert_eq!(
            "InvalidArgumentError: features: contains the sentinel",
            &vocab.err().unwrap().to_string()
        );

        let vocab = FeatureVocabulary::from_features(vec!["x".into(), "x".into()]);
        assert_eq!(
            "InvalidArgumentError: features: duplicated feature: x",
            &vocab.err().unwrap().to_string()
        );
    }
}
