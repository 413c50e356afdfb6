//! English lemmatization by suffix rules plus lookup tables.
//!
//! Regular inflections (`-s`, `-es`, `-ies`, `-ed`, `-ied`, `-ing`) are
//! stripped and the base form is repaired (undoubling, silent `e`). Irregular
//! forms and words that only look inflected come from fixed tables. The result
//! is a dictionary word ("studies" -> "study"), never a truncated stem.

use std::borrow::Cow;

/// Lemma of a lowercase `word`.
///
/// Words with digits or non-ASCII letters, and words shorter than four
/// characters, come back unchanged.
///
/// ```rust
/// use canonical::lemmatize;
///
/// assert_eq!(lemmatize("learning"), "learn");
/// assert_eq!(lemmatize("studies"), "study");
/// assert_eq!(lemmatize("written"), "write");
/// assert_eq!(lemmatize("2024"), "2024");
/// ```
pub fn lemmatize(word: &str) -> Cow<'_, str> {
    if !word.bytes().all(|b| b.is_ascii_lowercase()) {
        return Cow::Borrowed(word);
    }
    if let Some(lemma) = irregular(word) {
        return Cow::Borrowed(lemma);
    }
    if word.len() < 4 || is_invariant(word) {
        return Cow::Borrowed(word);
    }

    if word.len() > 4 {
        if let Some(stem) = word.strip_suffix("ies").or_else(|| word.strip_suffix("ied")) {
            return Cow::Owned(format!("{stem}y"));
        }
    }
    if let Some(stem) = word.strip_suffix("ing") {
        return verb_base(word, stem);
    }
    if let Some(stem) = word.strip_suffix("ed") {
        if stem.ends_with('e') {
            // speed, feed, breed
            return Cow::Borrowed(word);
        }
        return verb_base(word, stem);
    }
    if word.ends_with('s') {
        return plural_base(word);
    }
    Cow::Borrowed(word)
}

fn verb_base<'a>(word: &'a str, stem: &'a str) -> Cow<'a, str> {
    if stem.len() < 3 || !stem.bytes().any(is_vowel_or_y) {
        return Cow::Borrowed(word);
    }
    let bytes = stem.as_bytes();
    let n = bytes.len();
    let (last, prev) = (bytes[n - 1], bytes[n - 2]);

    if last == prev && !is_vowel(last) {
        let keep_double = matches!(last, b's' | b'z' | b'f')
            || (last == b'l' && vowel_groups(stem) < 2);
        if !keep_double {
            return Cow::Borrowed(&stem[..n - 1]);
        }
        return Cow::Borrowed(stem);
    }
    if needs_silent_e(stem) {
        return Cow::Owned(format!("{stem}e"));
    }
    Cow::Borrowed(stem)
}

/// Stems that lost a final `e` when the suffix was added.
fn needs_silent_e(stem: &str) -> bool {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    let (last, prev) = (bytes[n - 1], bytes[n - 2]);

    match last {
        b'v' | b'c' => return true,
        b'z' if matches!(prev, b'i' | b'y') => return true,
        b'l' if matches!(prev, b'b' | b'c' | b'd' | b'f' | b'g' | b'k' | b'p' | b't' | b'z') => {
            return true
        }
        b's' if !is_vowel(prev) && prev != b's' => return true,
        b'g' if matches!(prev, b'd' | b'r') => return true,
        b't' | b'r' if prev == b'a' || prev == b'u' => {
            if n >= 5 && !is_vowel(bytes[n - 3]) {
                return true;
            }
        }
        _ => {}
    }

    // one-syllable consonant-vowel-consonant: mak(e), hop(e), writ(e)
    vowel_groups(stem) == 1
        && !is_vowel(bytes[n - 3])
        && is_vowel(prev)
        && !is_vowel(last)
        && !matches!(last, b'w' | b'x' | b'y')
}

fn plural_base(word: &str) -> Cow<'_, str> {
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return Cow::Borrowed(word);
    }
    for suffix in ["sses", "xes", "ches", "shes", "zzes"] {
        if word.ends_with(suffix) {
            return Cow::Borrowed(&word[..word.len() - 2]);
        }
    }
    Cow::Borrowed(&word[..word.len() - 1])
}

fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u')
}

fn is_vowel_or_y(b: u8) -> bool {
    is_vowel(b) || b == b'y'
}

fn vowel_groups(word: &str) -> usize {
    let mut groups = 0;
    let mut in_group = false;
    for b in word.bytes() {
        let v = is_vowel(b);
        if v && !in_group {
            groups += 1;
        }
        in_group = v;
    }
    groups
}

/// Look inflected but are already base forms.
fn is_invariant(word: &str) -> bool {
    matches!(
        word,
        "always"
            | "perhaps"
            | "news"
            | "series"
            | "species"
            | "physics"
            | "mathematics"
            | "economics"
            | "politics"
            | "lens"
            | "thing"
            | "nothing"
            | "something"
            | "anything"
            | "everything"
            | "morning"
            | "evening"
            | "ceiling"
            | "hundred"
            | "sacred"
            | "naked"
            | "wicked"
            | "indeed"
    )
}

fn irregular(word: &str) -> Option<&'static str> {
    let lemma = match word {
        "children" => "child",
        "men" => "man",
        "women" => "woman",
        "feet" => "foot",
        "teeth" => "tooth",
        "mice" => "mouse",
        "geese" => "goose",
        "went" | "gone" | "goes" | "going" => "go",
        "made" => "make",
        "said" => "say",
        "took" | "taken" => "take",
        "gave" | "given" => "give",
        "came" => "come",
        "saw" | "seen" => "see",
        "knew" | "known" => "know",
        "thought" => "think",
        "brought" => "bring",
        "bought" => "buy",
        "taught" => "teach",
        "caught" => "catch",
        "found" => "find",
        "told" => "tell",
        "wrote" | "written" => "write",
        "began" | "begun" => "begin",
        "ran" => "run",
        "got" | "gotten" => "get",
        "kept" => "keep",
        "felt" => "feel",
        "meant" => "mean",
        "built" => "build",
        "sent" => "send",
        "spent" => "spend",
        "held" => "hold",
        "stood" => "stand",
        "understood" => "understand",
        "chose" | "chosen" => "choose",
        "spoke" | "spoken" => "speak",
        "broke" | "broken" => "break",
        "drove" | "driven" => "drive",
        "ate" | "eaten" => "eat",
        "grew" | "grown" => "grow",
        "drew" | "drawn" => "draw",
        "threw" | "thrown" => "throw",
        "flew" | "flown" => "fly",
        "sold" => "sell",
        "paid" => "pay",
        "laid" => "lay",
        "lost" => "lose",
        "led" => "lead",
        "better" | "best" => "good",
        "worse" | "worst" => "bad",
        "used" | "using" | "uses" => "use",
        "caused" | "causing" | "causes" => "cause",
        "increased" | "increasing" | "increases" => "increase",
        "released" | "releasing" => "release",
        "purchased" | "purchasing" => "purchase",
        "changed" | "changing" => "change",
        "managed" | "managing" => "manage",
        "arranged" | "arranging" => "arrange",
        "created" | "creating" => "create",
        "dying" => "die",
        "lying" => "lie",
        "tying" => "tie",
        _ => return None,
    };
    Some(lemma)
}
