use hashbrown::HashSet;

/// Separator of the two words in a bigram entry.
pub const BIGRAM_SEPARATOR: char = '*';

/// Makes the key of a bigram entry.
pub fn bigram_key(left: &str, right: &str) -> String {
    let mut key = String::with_capacity(left.len() + right.len() + 1);
    key.push_str(left);
    key.push(BIGRAM_SEPARATOR);
    key.push_str(right);
    key
}

/// Words and adjacent word pairs observed in a corpus.
///
/// Once built, the dictionary is only read; every feature extraction borrows it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Dictionary {
    pub(crate) unigrams: HashSet<String>,
    pub(crate) bigrams: HashSet<String>,
}

impl Dictionary {
    /// Creates a dictionary from word and bigram lists.
    ///
    /// Bigram entries must already be joined with [`BIGRAM_SEPARATOR`].
    pub fn new<U, B>(unigrams: U, bigrams: B) -> Self
    where
        U: IntoIterator,
        U::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
    {
        Self {
            unigrams: unigrams.into_iter().map(Into::into).collect(),
            bigrams: bigrams.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.unigrams.contains(word)
    }

    /// Checks if `left` is immediately followed by `right` somewhere in the corpus.
    pub fn contains_bigram(&self, left: &str, right: &str) -> bool {
        self.bigrams.contains(bigram_key(left, right).as_str())
    }

    pub fn n_unigrams(&self) -> usize {
        self.unigrams.len()
    }

    pub fn n_bigrams(&self) -> usize {
        self.bigrams.len()
    }

    /// Returns the words in ascending order.
    pub fn unigrams(&self) -> Vec<&str> {
        let mut words: Vec<_> = self.unigrams.iter().map(String::as_str).collect();
        words.sort_unstable();
        words
    }

    /// Returns the bigram entries in ascending order.
    pub fn bigrams(&self) -> Vec<&str> {
        let mut pairs: Vec<_> = self.bigrams.iter().map(String::as_str).collect();
        pairs.sort_unstable();
        pairs
    }
}
