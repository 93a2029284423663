pub mod lemma;
pub mod sections;
pub mod stopwords;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use lemma::lemmatize;
use stopwords::is_stopword;

/// Everything except word characters, whitespace, and the characters that
/// carry meaning in technical tokens (`c++`, `c#`, `node.js`, `ci/cd`).
static STRIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s+#./-]+").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalize raw document text for corpus fitting.
///
/// Lowercases, strips punctuation that carries no signal, drops stopwords
/// and one-character tokens, and reduces plain words to their dictionary
/// base form. Tokens containing `+`, `#`, `.` or a digit pass through
/// untouched so version numbers and symbol-bearing names survive.
///
/// Idempotent: the keep-filter is re-applied after lemmatization, so
/// `normalize(normalize(t)) == normalize(t)`.
pub fn normalize(text: &str) -> String {
    let folded: String = text.nfkc().collect();
    let lowered = folded.to_lowercase();
    let stripped = STRIP_RE.replace_all(&lowered, " ");
    let collapsed = WHITESPACE_RE.replace_all(&stripped, " ");

    let mut kept: Vec<String> = Vec::new();
    for raw_token in collapsed.trim().split_whitespace() {
        // A word tokenizer splits sentence-final periods off; trimming
        // trailing dots mirrors that while keeping "node.js" and ".net".
        let token = raw_token.trim_end_matches('.');
        if token.is_empty() || !keep_token(token) {
            continue;
        }

        let token = if is_plain_word(token) {
            lemmatize(token)
        } else {
            token.to_string()
        };

        if keep_token(&token) {
            kept.push(token);
        }
    }

    kept.join(" ")
}

fn keep_token(token: &str) -> bool {
    let has_special = token.contains(['+', '#', '.']);
    let has_digit = token.chars().any(|c| c.is_ascii_digit());
    (!is_stopword(token) && token.chars().count() >= 2) || has_special || has_digit
}

fn is_plain_word(token: &str) -> bool {
    token.chars().count() > 2 && token.chars().all(|c| c.is_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_technical_tokens() {
        let normalized = normalize("C++ and C# with Node.js, CI/CD on k8s in 3D");
        assert!(normalized.contains("c++"));
        assert!(normalized.contains("c#"));
        assert!(normalized.contains("node.js"));
        assert!(normalized.contains("ci/cd"));
        assert!(normalized.contains("k8s"));
        assert!(normalized.contains("3d"));
    }

    #[test]
    fn drops_stopwords_and_short_tokens() {
        let normalized = normalize("This is a test of the system, I am sure");
        assert!(!normalized.contains("the"));
        assert!(!normalized.contains(" a "));
        assert!(normalized.contains("test"));
        assert!(normalized.contains("system"));
        assert!(normalized.contains("sure"));
    }

    #[test]
    fn lemmatizes_plain_words_only() {
        let normalized = normalize("5 years of experience with databases and APIs");
        assert!(normalized.contains("year"));
        assert!(!normalized.contains("years"));
        assert!(normalized.contains("database"));
        // "5" survives via the digit rule.
        assert!(normalized.contains('5'));
    }

    #[test]
    fn strips_sentence_final_periods() {
        let normalized = normalize("Built REST services. Deployed with Docker.");
        assert!(normalized.contains("service"));
        assert!(normalized.contains("docker"));
        assert!(!normalized.contains("docker."));
    }

    #[test]
    fn normalization_is_idempotent() {
        let samples = [
            "Senior Python Developer - 5+ Years Experience with Django/Flask, AWS (EC2, S3).",
            "C++ and C# engineer; CI/CD pipelines, .NET services, k8s clusters.",
            "",
            "   \n\t  ",
            "The quick brown foxes jumped over 3 lazy dogs!!!",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn empty_and_degenerate_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("!?!"), "");
    }
}
