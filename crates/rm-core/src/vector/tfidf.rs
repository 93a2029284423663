use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::stopwords::is_stopword;

/// Terms are runs of two or more word characters.
static TERM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

#[derive(Debug, Clone, Copy)]
pub struct TfidfParams {
    /// Vocabulary bound; the most frequent corpus terms are kept.
    pub max_features: usize,
    /// Terms present in more than this fraction of documents are dropped.
    pub max_df: f64,
    /// Apply `1 + ln(tf)` scaling instead of raw counts.
    pub sublinear_tf: bool,
}

impl TfidfParams {
    pub fn new(max_features: usize, max_df: f64, sublinear_tf: bool) -> Self {
        Self {
            max_features,
            max_df,
            sublinear_tf,
        }
    }
}

/// A fitted weighted term-frequency space: vocabulary plus smoothed inverse
/// document frequencies. Transforms produce L2-normalized dense vectors.
#[derive(Debug, Clone)]
pub struct TfidfSpace {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    params: TfidfParams,
}

impl TfidfSpace {
    /// Build vocabulary and IDF weights from the given documents.
    ///
    /// The document-frequency cap is applied first, then the vocabulary
    /// bound selects by total corpus frequency with an alphabetical
    /// tie-break so fitting is deterministic.
    pub fn fit<S: AsRef<str>>(params: TfidfParams, documents: &[S]) -> Self {
        let n_docs = documents.len();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        let mut corpus_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let terms = analyze(doc.as_ref());
            let unique: HashSet<&String> = terms.iter().collect();
            for term in &unique {
                *doc_freq.entry((*term).clone()).or_insert(0) += 1;
            }
            for term in &terms {
                *corpus_freq.entry(term.clone()).or_insert(0) += 1;
            }
        }

        let max_doc_count = params.max_df * n_docs as f64;
        let mut eligible: Vec<(&String, usize)> = corpus_freq
            .iter()
            .filter(|(term, _)| {
                let df = doc_freq.get(*term).copied().unwrap_or(0);
                (df as f64) <= max_doc_count
            })
            .map(|(term, count)| (term, *count))
            .collect();

        eligible.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        eligible.truncate(params.max_features);

        let mut vocabulary = HashMap::with_capacity(eligible.len());
        let mut idf = vec![0.0; eligible.len()];
        for (idx, (term, _)) in eligible.into_iter().enumerate() {
            let df = doc_freq.get(term).copied().unwrap_or(1) as f64;
            idf[idx] = ((1.0 + n_docs as f64) / (1.0 + df)).ln() + 1.0;
            vocabulary.insert(term.clone(), idx);
        }

        Self {
            vocabulary,
            idf,
            params,
        }
    }

    /// True when the document-frequency cap (or empty input) removed every
    /// term; callers treat such a space as unusable and fall back.
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Project a document into the fitted space as an L2-normalized vector.
    /// Out-of-vocabulary documents come back as the zero vector.
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut vector: Vec<f64> = vec![0.0; self.vocabulary.len()];

        for term in analyze(text) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                vector[idx] += 1.0;
            }
        }

        for (idx, value) in vector.iter_mut().enumerate() {
            if *value > 0.0 {
                let tf = if self.params.sublinear_tf {
                    1.0 + (*value).ln()
                } else {
                    *value
                };
                *value = tf * self.idf[idx];
            }
        }

        let norm: f64 = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }

        vector
    }
}

fn analyze(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TERM_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .filter(|term| !is_stopword(term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<&'static str> {
        vec![
            "python developer building backend services with django",
            "frontend developer using react and typescript",
            "data engineer working on spark pipelines in python",
        ]
    }

    #[test]
    fn fit_builds_bounded_vocabulary() {
        let space = TfidfSpace::fit(TfidfParams::new(5, 1.0, false), &docs());
        assert_eq!(space.vocabulary_len(), 5);
        assert!(!space.is_empty());
    }

    #[test]
    fn transform_produces_unit_vectors() {
        let space = TfidfSpace::fit(TfidfParams::new(100, 1.0, true), &docs());
        let vector = space.transform(docs()[0]);
        let norm: f64 = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn out_of_vocabulary_text_is_zero_vector() {
        let space = TfidfSpace::fit(TfidfParams::new(100, 1.0, false), &docs());
        let vector = space.transform("zzz qqq www");
        assert!(vector.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn max_df_drops_ubiquitous_terms() {
        // "developer" appears in 2 of 3 docs; cap at one third keeps only
        // singletons.
        let space = TfidfSpace::fit(TfidfParams::new(100, 0.34, false), &docs());
        assert!(!space.vocabulary.contains_key("developer"));
        assert!(space.vocabulary.contains_key("django"));
    }

    #[test]
    fn identical_two_doc_corpus_with_df_cap_is_empty() {
        let space = TfidfSpace::fit(
            TfidfParams::new(100, 0.9, true),
            &["same text here", "same text here"],
        );
        assert!(space.is_empty());
    }

    #[test]
    fn stopwords_never_enter_the_vocabulary() {
        let space = TfidfSpace::fit(TfidfParams::new(100, 1.0, false), &["the and of python"]);
        assert!(space.vocabulary.contains_key("python"));
        assert_eq!(space.vocabulary_len(), 1);
    }
}
