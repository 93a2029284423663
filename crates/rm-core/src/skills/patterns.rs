use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// One alternation per skill category, matched against lowercased text.
    /// Whole words and phrases only; symbolic names that cannot sit inside
    /// `\b…\b` (`c++`, `c#`) are handled by `symbolic_matches`.
    pub static ref CATEGORY_PATTERNS: Vec<Regex> = vec![
        // Programming languages
        Regex::new(r"(?i)\b(?:python|java|javascript|typescript|php|ruby|go|rust|swift|kotlin|scala|r|matlab|perl|shell|bash|powershell)\b").unwrap(),
        // Web frameworks
        Regex::new(r"(?i)\b(?:react|angular|vue|node\.?js|express|django|flask|spring|laravel|rails|asp\.net|nextjs|nuxt|gatsby)\b").unwrap(),
        // Markup and styling
        Regex::new(r"(?i)\b(?:html|css|sass|less|scss|bootstrap|tailwind|material-ui|chakra|bulma|foundation)\b").unwrap(),
        // Databases
        Regex::new(r"(?i)\b(?:sql|mysql|postgresql|mongodb|redis|elasticsearch|cassandra|dynamodb|sqlite|oracle|mariadb|couchdb)\b").unwrap(),
        // Cloud platforms and provisioning
        Regex::new(r"(?i)\b(?:aws|azure|gcp|google cloud|docker|kubernetes|jenkins|terraform|ansible|chef|puppet|vagrant)\b").unwrap(),
        // Delivery and infrastructure
        Regex::new(r"(?i)\b(?:ci/cd|devops|microservices|serverless|lambda|api gateway|load balancer|nginx|apache)\b").unwrap(),
        // Data science and ML concepts
        Regex::new(r"(?i)\b(?:machine learning|deep learning|ai|artificial intelligence|nlp|computer vision|data science|big data)\b").unwrap(),
        // ML libraries
        Regex::new(r"(?i)\b(?:tensorflow|pytorch|scikit-learn|pandas|numpy|matplotlib|seaborn|jupyter|keras|xgboost|lightgbm)\b").unwrap(),
        // Data platforms
        Regex::new(r"(?i)\b(?:spark|hadoop|kafka|airflow|dask|mlflow|kubeflow|sagemaker)\b").unwrap(),
        // Methodologies
        Regex::new(r"(?i)\b(?:agile|scrum|kanban|lean|waterfall|tdd|bdd|solid|design patterns|microservices|rest|graphql|soap)\b").unwrap(),
        // Version control and collaboration tools
        Regex::new(r"(?i)\b(?:git|github|gitlab|bitbucket|svn|mercurial|jira|confluence|slack|teams)\b").unwrap(),
        // Mobile
        Regex::new(r"(?i)\b(?:ios|android|react native|flutter|xamarin|cordova|ionic|swift|objective-c)\b").unwrap(),
        // Testing
        Regex::new(r"(?i)\b(?:unit testing|integration testing|selenium|cypress|jest|mocha|pytest|junit|testng)\b").unwrap(),
        // Soft skills
        Regex::new(r"(?i)\b(?:leadership|communication|problem solving|analytical thinking|teamwork|project management|time management)\b").unwrap(),
        // Industries
        Regex::new(r"(?i)\b(?:fintech|healthcare|e-commerce|education|gaming|automotive|blockchain|cryptocurrency)\b").unwrap(),
    ];

    /// Certifications and degrees; group 1 is the skill surface, truncated
    /// to 50 chars by the extractor.
    pub static ref CERT_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)\b(aws certified [a-z\s]+)\b").unwrap(),
        Regex::new(r"(?i)\b(azure certified [a-z\s]+)\b").unwrap(),
        Regex::new(r"(?i)\b(google cloud certified [a-z\s]+)\b").unwrap(),
        Regex::new(r"(?i)\b(cissp|ceh|comptia [a-z+]+|pmp|scrum master)\b").unwrap(),
        Regex::new(r"(?i)\b(bachelor.{0,20}computer science|master.{0,20}computer science|computer science degree)\b").unwrap(),
        Regex::new(r"(?i)\b(bachelor.{0,20}engineering|master.{0,20}engineering|engineering degree)\b").unwrap(),
    ];

    static ref SYMBOLIC_RE: Regex = Regex::new(r"(?i)c\+\+|c#|f#|\.net").unwrap();
}

/// Find symbolic skill names with hand-rolled boundary checks: the char
/// before a match must not be part of a word or symbol run (so `asp.net`
/// does not also yield `.net`), and the char after must not extend it.
pub fn symbolic_matches(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    for m in SYMBOLIC_RE.find_iter(text) {
        let before = text[..m.start()].chars().next_back();
        let after = text[m.end()..].chars().next();

        let left_ok = before.map_or(true, |c| {
            !(c.is_alphanumeric() || c == '_' || c == '+' || c == '#' || c == '.')
        });
        let right_ok = after.map_or(true, |c| {
            !(c.is_alphanumeric() || c == '_' || c == '+' || c == '#')
        });

        if left_ok && right_ok {
            found.push(m.as_str().to_lowercase());
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbolic_names_match_between_delimiters() {
        let found = symbolic_matches("strong C++ and c# background, some .NET");
        assert!(found.contains(&"c++".to_string()));
        assert!(found.contains(&"c#".to_string()));
        assert!(found.contains(&".net".to_string()));
    }

    #[test]
    fn symbolic_names_do_not_match_inside_words() {
        assert!(symbolic_matches("aspic#tag").is_empty());
        // "asp.net" is covered by the web-framework pattern, not ".net".
        assert!(symbolic_matches("asp.net").is_empty());
        assert!(symbolic_matches("c++x").is_empty());
    }

    #[test]
    fn category_patterns_match_whole_words_only() {
        let languages = &CATEGORY_PATTERNS[0];
        assert!(languages.is_match("we use python daily"));
        assert!(!languages.is_match("pythonic style"));
    }

    #[test]
    fn adjacent_symbolic_names_both_match() {
        let found = symbolic_matches("c++ c# f#");
        assert_eq!(found.len(), 3);
    }
}
