//! Small concept table for the hashing embedder.
//!
//! A sentence model knows that "AI" and "artificial intelligence" mean the
//! same thing, and that a "method" is a kind of "technique". Feature hashing
//! only sees characters, so these aliases rewrite a word into the words it
//! stands for before hashing. Entries are lemma forms, matching the output of
//! the normalizer.

/// Words `word` stands for, or `None` when it stands for itself.
pub(crate) fn expand(word: &str) -> Option<&'static [&'static str]> {
    let words: &'static [&'static str] = match word {
        // acronyms
        "ai" => &["artificial", "intelligence"],
        "ml" => &["machine", "learn"],
        "dl" => &["deep", "learn"],
        "nn" => &["neural", "network"],
        "nlp" => &["natural", "language", "process"],
        "llm" => &["large", "language", "model"],
        "cpu" => &["central", "process", "unit"],
        "gpu" => &["graphic", "process", "unit"],
        "api" => &["application", "program", "interface"],
        "ui" => &["user", "interface"],
        "os" => &["operate", "system"],
        "db" => &["database"],
        "iot" => &["internet", "thing"],
        // synonyms, folded onto one head word
        "method" | "approach" => &["technique"],
        "paper" | "article" | "essay" => &["document"],
        "example" => &["sample"],
        "research" => &["study"],
        "huge" | "big" => &["large"],
        "quick" | "rapid" => &["fast"],
        "commence" | "begin" => &["start"],
        "automobile" => &["car"],
        "error" => &["mistake"],
        _ => return None,
    };
    Some(words)
}
