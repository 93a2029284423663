pub mod similarity;
pub mod tfidf;

use tracing::{debug, warn};

use crate::config::EngineConfig;
use similarity::{cosine_similarity, lexical_overlap};
use tfidf::{TfidfParams, TfidfSpace};

/// Which of the two corpus-fitted spaces to project into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceKind {
    /// Fitted over normalized text; larger vocabulary, sublinear tf.
    Content,
    /// Fitted over raw text; smaller vocabulary, plain tf.
    Semantic,
}

/// The two shared weighted term-vector spaces, fitted across every known
/// document. Owned by the engine and passed by reference to all callers;
/// `fit`, `invalidate`, and `is_fitted` are the only mutators, and the
/// engine's `&mut self` entry points serialize them.
#[derive(Debug)]
pub struct CorpusVectorModel {
    content_params: TfidfParams,
    semantic_params: TfidfParams,
    pair_semantic_params: TfidfParams,
    content: Option<TfidfSpace>,
    semantic: Option<TfidfSpace>,
    fitted: bool,
}

impl CorpusVectorModel {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            content_params: TfidfParams::new(config.content_max_features, config.content_max_df, true),
            semantic_params: TfidfParams::new(
                config.semantic_max_features,
                config.semantic_max_df,
                false,
            ),
            pair_semantic_params: TfidfParams::new(config.pair_semantic_max_features, 1.0, false),
            content: None,
            semantic: None,
            fitted: false,
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Drop the fitted flag; called whenever a document joins the corpus.
    pub fn invalidate(&mut self) {
        self.fitted = false;
    }

    /// Rebuild both vocabularies and IDF weights. Requires at least two
    /// texts per corpus invariant; returns false (and stays unfit) otherwise.
    pub fn fit(&mut self, normalized_corpus: &[String], raw_corpus: &[String]) -> bool {
        if normalized_corpus.len() < 2 {
            warn!(
                corpus_size = normalized_corpus.len(),
                "not enough documents to fit corpus vector spaces"
            );
            return false;
        }

        self.content = Some(TfidfSpace::fit(self.content_params, normalized_corpus));
        self.semantic = Some(TfidfSpace::fit(self.semantic_params, raw_corpus));
        self.fitted = true;
        debug!(
            corpus_size = normalized_corpus.len(),
            content_vocabulary = self.content.as_ref().map(|s| s.vocabulary_len()),
            semantic_vocabulary = self.semantic.as_ref().map(|s| s.vocabulary_len()),
            "corpus vector spaces fitted"
        );
        true
    }

    /// Pairwise similarity in the requested space, always in [0, 1].
    ///
    /// Fitted path projects both texts into the shared space. Unfit (or
    /// empty-vocabulary) models fall back to a throwaway two-document fit,
    /// and from there to lexical overlap when even that yields no features.
    pub fn similarity(&self, kind: SpaceKind, text_a: &str, text_b: &str) -> f64 {
        let space = match kind {
            SpaceKind::Content => self.content.as_ref(),
            SpaceKind::Semantic => self.semantic.as_ref(),
        };

        if self.fitted {
            if let Some(space) = space.filter(|s| !s.is_empty()) {
                let va = space.transform(text_a);
                let vb = space.transform(text_b);
                return cosine_similarity(&va, &vb);
            }
        }

        self.pair_similarity(kind, text_a, text_b)
    }

    fn pair_similarity(&self, kind: SpaceKind, text_a: &str, text_b: &str) -> f64 {
        let params = match kind {
            SpaceKind::Content => self.content_params,
            SpaceKind::Semantic => self.pair_semantic_params,
        };

        let space = TfidfSpace::fit(params, &[text_a, text_b]);
        if space.is_empty() {
            debug!("pairwise fit produced no features; using lexical overlap");
            return lexical_overlap(text_a, text_b);
        }

        let va = space.transform(text_a);
        let vb = space.transform(text_b);
        cosine_similarity(&va, &vb)
    }
}
