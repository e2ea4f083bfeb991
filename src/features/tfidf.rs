//! TF-IDF (term frequency × inverse document frequency) text vectorizer.
//!
//! - Tokens are runs of two or more word characters, lowercased
//! - Common English stop words are removed
//! - The vocabulary keeps the `max_features` most frequent terms of the
//!   corpus (ties broken alphabetically) and indexes them alphabetically
//! - Weights are raw counts × smoothed IDF `ln((1 + n) / (1 + df)) + 1`,
//!   each row scaled to unit L2 norm
//!
//! The fitted vectorizer (vocabulary + IDF) must be kept and reused to
//! transform new text the same way.

use std::collections::{BTreeMap, HashMap, HashSet};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::domain::error::{PipelineError, PipelineResult};

/// Default vocabulary cap.
pub const DEFAULT_MAX_FEATURES: usize = 500;

/// English stop words removed before counting.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together",
    "too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
    "yourself", "yourselves",
];

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lowercase, split into word-character runs of length ≥ 2, drop stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|t| t.chars().count() >= 2)
        .filter(|t| !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Row-compressed sparse matrix of term weights.
#[derive(Debug, Clone, PartialEq)]
pub struct TermMatrix {
    n_cols:  usize,
    indptr:  Vec<usize>,
    indices: Vec<usize>,
    data:    Vec<f64>,
}

impl TermMatrix {
    pub fn n_rows(&self) -> usize {
        self.indptr.len() - 1
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Number of stored (non-zero) weights.
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    /// (column, weight) pairs of one row, in column order.
    pub fn row(&self, i: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let span = self.indptr[i]..self.indptr[i + 1];
        self.indices[span.clone()].iter().copied().zip(self.data[span].iter().copied())
    }

    pub fn to_dense(&self) -> Array2<f64> {
        let mut dense = Array2::zeros((self.n_rows(), self.n_cols));
        for i in 0..self.n_rows() {
            for (j, w) in self.row(i) {
                dense[[i, j]] = w;
            }
        }
        dense
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    max_features: usize,
    /// Retained terms, sorted; position = column
    vocabulary:   Vec<String>,
    /// IDF weight per column
    idf:          Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn vocabulary and IDF weights from `docs`.
    /// Fails with EmptyVocabulary if no term survives tokenisation.
    pub fn fit<S: AsRef<str>>(docs: &[S], max_features: usize) -> PipelineResult<Self> {
        let mut corpus_counts: HashMap<String, usize> = HashMap::new();
        let mut doc_freq:      HashMap<String, usize> = HashMap::new();

        for doc in docs {
            let tokens = tokenize(doc.as_ref());
            let unique: HashSet<&String> = tokens.iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            for term in tokens {
                *corpus_counts.entry(term).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = corpus_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(max_features);

        if ranked.is_empty() {
            return Err(PipelineError::EmptyVocabulary);
        }

        let mut vocabulary: Vec<String> = ranked.into_iter().map(|(t, _)| t).collect();
        vocabulary.sort();

        let n   = docs.len() as f64;
        let idf = vocabulary
            .iter()
            .map(|t| {
                let df = doc_freq.get(t).copied().unwrap_or(0) as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        tracing::debug!("Fitted TF-IDF vocabulary of {} terms", vocabulary.len());
        Ok(Self { max_features, vocabulary, idf })
    }

    /// Weight `docs` with the fitted vocabulary; unknown terms are ignored.
    pub fn transform<S: AsRef<str>>(&self, docs: &[S]) -> TermMatrix {
        let mut indptr  = vec![0];
        let mut indices = Vec::new();
        let mut data    = Vec::new();

        for doc in docs {
            let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
            for term in tokenize(doc.as_ref()) {
                if let Ok(col) = self.vocabulary.binary_search(&term) {
                    *counts.entry(col).or_insert(0.0) += 1.0;
                }
            }

            let weights: Vec<(usize, f64)> =
                counts.into_iter().map(|(col, tf)| (col, tf * self.idf[col])).collect();
            let norm = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();

            for (col, w) in weights {
                indices.push(col);
                data.push(if norm > 0.0 { w / norm } else { w });
            }
            indptr.push(indices.len());
        }

        TermMatrix { n_cols: self.vocabulary.len(), indptr, indices, data }
    }

    pub fn fit_transform<S: AsRef<str>>(docs: &[S], max_features: usize) -> PipelineResult<(Self, TermMatrix)> {
        let vectorizer = Self::fit(docs, max_features)?;
        let matrix     = vectorizer.transform(docs);
        Ok((vectorizer, matrix))
    }

    /// Terms in column order.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub fn max_features(&self) -> usize {
        self.max_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_stop_words_and_short_tokens() {
        let tokens = tokenize("The cat and I saw a BIG dog!");
        assert_eq!(tokens, vec!["cat", "saw", "big", "dog"]);
    }

    #[test]
    fn test_tokenize_handles_unicode_and_underscores() {
        assert_eq!(tokenize("café snake_case x"), vec!["café", "snake_case"]);
    }

    #[test]
    fn test_vocabulary_is_alphabetical() {
        let v = TfidfVectorizer::fit(&["zebra apple", "mango apple"], 10).unwrap();
        assert_eq!(v.vocabulary(), &["apple", "mango", "zebra"]);
    }

    #[test]
    fn test_cap_keeps_most_frequent_terms() {
        let docs = ["apple apple apple", "banana banana", "cherry"];
        let v    = TfidfVectorizer::fit(&docs, 2).unwrap();
        assert_eq!(v.vocabulary(), &["apple", "banana"]);
    }

    #[test]
    fn test_smoothed_idf_values() {
        let v = TfidfVectorizer::fit(&["cat dog", "cat"], 10).unwrap();
        // cat: df = 2 → ln(3/3) + 1 = 1 ; dog: df = 1 → ln(3/2) + 1
        assert!((v.idf()[0] - 1.0).abs() < 1e-12);
        assert!((v.idf()[1] - ((1.5f64).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rows_are_unit_norm() {
        let (_, m) = TfidfVectorizer::fit_transform(&["cat dog dog", "cat", ""], 10).unwrap();
        assert_eq!(m.n_rows(), 3);
        for i in 0..2 {
            let norm: f64 = m.row(i).map(|(_, w)| w * w).sum();
            assert!((norm - 1.0).abs() < 1e-9);
        }
        // empty document has no stored weights
        assert_eq!(m.row(2).count(), 0);
    }

    #[test]
    fn test_transform_ignores_unknown_terms() {
        let v = TfidfVectorizer::fit(&["cat dog"], 10).unwrap();
        let m = v.transform(&["giraffe cat"]);
        assert_eq!(m.row(0).collect::<Vec<_>>(), vec![(0, 1.0)]);
    }

    #[test]
    fn test_empty_corpus_is_empty_vocabulary() {
        let err = TfidfVectorizer::fit(&["", "the and of"], 500).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyVocabulary));
    }

    #[test]
    fn test_dense_matches_sparse() {
        let (_, m) = TfidfVectorizer::fit_transform(&["cat dog", "dog"], 10).unwrap();
        let d = m.to_dense();
        assert_eq!(d.shape(), &[2, 2]);
        assert_eq!(d[[1, 0]], 0.0);
        assert!((d[[1, 1]] - 1.0).abs() < 1e-12);
    }
}
