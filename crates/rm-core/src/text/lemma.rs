use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Irregular noun forms that suffix rules would get wrong.
static IRREGULAR: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("men", "man"),
        ("women", "woman"),
        ("children", "child"),
        ("people", "person"),
        ("teeth", "tooth"),
        ("feet", "foot"),
        ("geese", "goose"),
        ("mice", "mouse"),
        ("indices", "index"),
        ("matrices", "matrix"),
        ("vertices", "vertex"),
        ("criteria", "criterion"),
        ("media", "medium"),
        ("caches", "cache"),
    ]
    .into_iter()
    .collect()
});

/// Words that end in `s` but are already base forms.
static INVARIANT: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "news", "series", "species", "lens", "alias", "canvas", "atlas", "jeans", "physics",
        "mathematics", "economics", "logistics", "devops", "kubernetes", "sales", "aws", "data",
    ]
    .into_iter()
    .collect()
});

/// Reduce a purely alphabetic token to its dictionary base form.
///
/// Noun-plural reduction only: an irregular-form table followed by suffix
/// rules. The output is a fixpoint (`lemmatize(lemmatize(t)) == lemmatize(t)`),
/// which the normalizer relies on for idempotence.
pub fn lemmatize(token: &str) -> String {
    if let Some(base) = IRREGULAR.get(token) {
        return (*base).to_string();
    }
    if INVARIANT.contains(token) {
        return token.to_string();
    }

    let len = token.len();
    if len > 4 && token.ends_with("ies") {
        return format!("{}y", &token[..len - 3]);
    }
    if token.ends_with("sses")
        || token.ends_with("xes")
        || token.ends_with("ches")
        || token.ends_with("shes")
        || token.ends_with("zes")
    {
        return token[..len - 2].to_string();
    }
    if len > 3
        && token.ends_with('s')
        && !token.ends_with("ss")
        && !token.ends_with("us")
        && !token.ends_with("is")
    {
        return token[..len - 1].to_string();
    }

    token.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduces_regular_plurals() {
        assert_eq!(lemmatize("skills"), "skill");
        assert_eq!(lemmatize("years"), "year");
        assert_eq!(lemmatize("technologies"), "technology");
        assert_eq!(lemmatize("classes"), "class");
        assert_eq!(lemmatize("boxes"), "box");
        assert_eq!(lemmatize("matches"), "match");
    }

    #[test]
    fn keeps_base_forms_unchanged() {
        assert_eq!(lemmatize("status"), "status");
        assert_eq!(lemmatize("analysis"), "analysis");
        assert_eq!(lemmatize("express"), "express");
        assert_eq!(lemmatize("series"), "series");
        assert_eq!(lemmatize("gas"), "gas");
    }

    #[test]
    fn handles_irregular_forms() {
        assert_eq!(lemmatize("people"), "person");
        assert_eq!(lemmatize("men"), "man");
        assert_eq!(lemmatize("matrices"), "matrix");
    }

    #[test]
    fn lemmatize_is_a_fixpoint() {
        for word in ["skills", "technologies", "classes", "people", "status", "kubernetes"] {
            let once = lemmatize(word);
            assert_eq!(lemmatize(&once), once, "not a fixpoint for {word}");
        }
    }
}
