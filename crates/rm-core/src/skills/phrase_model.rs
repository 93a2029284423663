use tracing::warn;

use crate::text::stopwords::is_stopword;

/// Optional entity/phrase model backing skill-extraction augmentation.
///
/// Implementations surface candidate spans only; the extractor applies the
/// length, digit, and marker filters. Absence of a model (engine holds
/// `None`) reduces recall but never fails extraction.
pub trait PhraseModel: Send + Sync {
    fn name(&self) -> &'static str;

    /// Candidate named entities (organizations, products) as raw surface text.
    fn entities(&self, text: &str) -> Vec<String>;

    /// Candidate 1-2 word noun phrases, lowercased.
    fn noun_phrases(&self, text: &str) -> Vec<String>;
}

/// Dependency-free phrase model: capitalized spans stand in for named
/// entities, stopword-bounded token chunks for noun phrases.
pub struct HeuristicPhraseModel;

impl PhraseModel for HeuristicPhraseModel {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn entities(&self, text: &str) -> Vec<String> {
        let mut entities = Vec::new();
        let mut run: Vec<&str> = Vec::new();

        for raw in text.split_whitespace() {
            let word = raw.trim_matches(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'));
            let capitalized = word.chars().next().is_some_and(|c| c.is_uppercase());

            if capitalized && run.len() < 3 {
                run.push(word);
            } else {
                if !run.is_empty() {
                    entities.push(run.join(" "));
                    run.clear();
                }
                if capitalized {
                    run.push(word);
                }
            }
        }
        if !run.is_empty() {
            entities.push(run.join(" "));
        }

        entities
    }

    fn noun_phrases(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut phrases = Vec::new();
        let mut chunk: Vec<&str> = Vec::new();

        for raw in lowered.split_whitespace() {
            let word = raw.trim_matches(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'));
            if word.len() > 1 && !is_stopword(word) {
                chunk.push(word);
            } else {
                flush_chunk(&chunk, &mut phrases);
                chunk.clear();
            }
        }
        flush_chunk(&chunk, &mut phrases);

        phrases
    }
}

fn flush_chunk(chunk: &[&str], phrases: &mut Vec<String>) {
    for word in chunk {
        phrases.push((*word).to_string());
    }
    for pair in chunk.windows(2) {
        phrases.push(pair.join(" "));
    }
}

/// Select a phrase model from `RM_PHRASE_MODEL`. Unset or `heuristic`
/// yields the built-in model; `off`/`none` disables augmentation; anything
/// else falls back to the heuristic with a warning.
pub fn phrase_model_from_env() -> Option<Box<dyn PhraseModel>> {
    match std::env::var("RM_PHRASE_MODEL") {
        Ok(name) if name == "off" || name == "none" => None,
        Ok(name) if name == "heuristic" => Some(Box::new(HeuristicPhraseModel)),
        Ok(name) => {
            warn!(model = %name, "unknown phrase model; using heuristic");
            Some(Box::new(HeuristicPhraseModel))
        }
        Err(_) => Some(Box::new(HeuristicPhraseModel)),
    }
}
