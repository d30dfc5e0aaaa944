//! Rule-based part-of-speech tagger producing Penn Treebank tags.
//!
//! Closed-class words come from lookup tables; open-class words are tagged
//! from suffixes and the previous tag. Accuracy only needs to be good enough
//! to pick the lemmatizer's word class.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub text: String,
    pub tag: &'static str,
}

const CLOSED_CLASS: &[(&str, &str)] = &[
    ("the", "DT"),
    ("a", "DT"),
    ("an", "DT"),
    ("this", "DT"),
    ("that", "DT"),
    ("these", "DT"),
    ("those", "DT"),
    ("each", "DT"),
    ("every", "DT"),
    ("some", "DT"),
    ("any", "DT"),
    ("no", "DT"),
    ("all", "DT"),
    ("another", "DT"),
    ("and", "CC"),
    ("or", "CC"),
    ("but", "CC"),
    ("nor", "CC"),
    ("yet", "CC"),
    ("of", "IN"),
    ("in", "IN"),
    ("on", "IN"),
    ("at", "IN"),
    ("by", "IN"),
    ("for", "IN"),
    ("with", "IN"),
    ("from", "IN"),
    ("into", "IN"),
    ("over", "IN"),
    ("under", "IN"),
    ("after", "IN"),
    ("before", "IN"),
    ("during", "IN"),
    ("about", "IN"),
    ("against", "IN"),
    ("between", "IN"),
    ("through", "IN"),
    ("than", "IN"),
    ("as", "IN"),
    ("if", "IN"),
    ("because", "IN"),
    ("while", "IN"),
    ("despite", "IN"),
    ("amid", "IN"),
    ("to", "TO"),
    ("i", "PRP"),
    ("you", "PRP"),
    ("he", "PRP"),
    ("she", "PRP"),
    ("it", "PRP"),
    ("we", "PRP"),
    ("they", "PRP"),
    ("me", "PRP"),
    ("him", "PRP"),
    ("us", "PRP"),
    ("them", "PRP"),
    ("my", "PRP$"),
    ("your", "PRP$"),
    ("his", "PRP$"),
    ("her", "PRP$"),
    ("its", "PRP$"),
    ("our", "PRP$"),
    ("their", "PRP$"),
    ("can", "MD"),
    ("could", "MD"),
    ("will", "MD"),
    ("would", "MD"),
    ("shall", "MD"),
    ("should", "MD"),
    ("may", "MD"),
    ("might", "MD"),
    ("must", "MD"),
    ("which", "WDT"),
    ("who", "WP"),
    ("what", "WP"),
    ("when", "WRB"),
    ("where", "WRB"),
    ("why", "WRB"),
    ("how", "WRB"),
    ("is", "VBZ"),
    ("are", "VBP"),
    ("am", "VBP"),
    ("was", "VBD"),
    ("were", "VBD"),
    ("be", "VB"),
    ("been", "VBN"),
    ("being", "VBG"),
    ("has", "VBZ"),
    ("have", "VBP"),
    ("had", "VBD"),
    ("does", "VBZ"),
    ("do", "VBP"),
    ("did", "VBD"),
    ("not", "RB"),
    ("very", "RB"),
    ("also", "RB"),
    ("too", "RB"),
    ("so", "RB"),
    ("just", "RB"),
    ("now", "RB"),
    ("then", "RB"),
    ("here", "RB"),
    ("there", "RB"),
    ("again", "RB"),
    ("still", "RB"),
    ("already", "RB"),
    ("never", "RB"),
    ("always", "RB"),
    ("often", "RB"),
    ("soon", "RB"),
    ("quite", "RB"),
    ("almost", "RB"),
    ("better", "JJR"),
    ("worse", "JJR"),
    ("more", "JJR"),
    ("less", "JJR"),
    ("higher", "JJR"),
    ("lower", "JJR"),
    ("greater", "JJR"),
    ("larger", "JJR"),
    ("smaller", "JJR"),
    ("bigger", "JJR"),
    ("stronger", "JJR"),
    ("weaker", "JJR"),
    ("faster", "JJR"),
    ("slower", "JJR"),
    ("cheaper", "JJR"),
    ("best", "JJS"),
    ("worst", "JJS"),
    ("most", "JJS"),
    ("least", "JJS"),
    ("highest", "JJS"),
    ("lowest", "JJS"),
    ("biggest", "JJS"),
    ("largest", "JJS"),
    ("strongest", "JJS"),
    ("weakest", "JJS"),
];

const IRREGULAR_PAST: &[&str] = &[
    "rose", "fell", "grew", "sold", "bought", "made", "took", "gave", "went", "came", "saw",
    "said", "told", "paid", "won", "lost", "began", "brought", "built", "spent", "sent", "held",
    "kept", "left", "led", "met", "ran", "stood", "thought", "felt", "found", "got", "knew",
    "became", "wrote", "drove", "struck", "sank", "shrank", "swung", "hit", "cut", "set", "put",
];

const IRREGULAR_PARTICIPLE: &[&str] = &[
    "risen", "fallen", "grown", "taken", "given", "gone", "seen", "done", "written", "begun",
    "known", "shown", "driven", "become", "shrunk", "sunk", "swollen", "forgotten", "chosen",
];

const NOT_SUPERLATIVE: &[&str] = &[
    "interest", "request", "invest", "protest", "harvest", "suggest", "forest", "honest",
    "modest", "arrest", "contest", "digest", "latest", "test", "rest", "west", "nest", "guest",
    "chest", "quest", "vest", "best", "manifest",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "able", "ible", "ive", "less", "ical", "ic", "ish", "ant", "ent", "ial",
];

/// Tag a flat token stream (sentence order preserved).
#[must_use]
pub fn tag(tokens: &[String]) -> Vec<TaggedToken> {
    let mut out: Vec<TaggedToken> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let prev = out.last().map(|t| t.tag);
        let tag = tag_token(token, prev);
        out.push(TaggedToken {
            text: token.clone(),
            tag,
        });
    }
    out
}

fn tag_token(token: &str, prev: Option<&'static str>) -> &'static str {
    if !token.chars().any(char::is_alphanumeric) {
        return punctuation_tag(token);
    }
    if is_number(token) {
        return "CD";
    }

    let lower = token.to_lowercase();
    if let Some(&(_, tag)) = CLOSED_CLASS.iter().find(|(w, _)| *w == lower) {
        return tag;
    }

    let sentence_start = prev.is_none_or(|p| p == ".");
    if !sentence_start && token.chars().next().is_some_and(char::is_uppercase) {
        return "NNP";
    }

    if IRREGULAR_PARTICIPLE.contains(&lower.as_str()) {
        return "VBN";
    }
    if IRREGULAR_PAST.contains(&lower.as_str()) {
        return if follows_auxiliary(prev) { "VBN" } else { "VBD" };
    }
    if matches!(prev, Some("MD" | "TO")) {
        return "VB";
    }

    suffix_tag(&lower, prev)
}

fn suffix_tag(lower: &str, prev: Option<&'static str>) -> &'static str {
    let len = lower.chars().count();

    if len > 4 && lower.ends_with("ly") {
        return "RB";
    }
    if len > 4 && lower.ends_with("ing") {
        return "VBG";
    }
    if len > 3 && lower.ends_with("ed") {
        return if follows_auxiliary(prev) { "VBN" } else { "VBD" };
    }
    if len > 5 && lower.ends_with("est") && !NOT_SUPERLATIVE.iter().any(|w| lower.ends_with(w)) {
        return "JJS";
    }
    if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return "JJ";
    }
    if len > 3
        && lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is")
    {
        return if matches!(prev, Some("PRP" | "NN" | "NNP" | "WDT" | "WP")) {
            "VBZ"
        } else {
            "NNS"
        };
    }
    "NN"
}

fn follows_auxiliary(prev: Option<&'static str>) -> bool {
    matches!(prev, Some("VBZ" | "VBP" | "VBD" | "VB" | "VBN"))
}

fn punctuation_tag(token: &str) -> &'static str {
    match token {
        "." | "!" | "?" => ".",
        "," => ",",
        ":" | ";" | "-" | "--" | "…" => ":",
        "$" | "€" | "£" | "¥" => "$",
        "%" => "NN",
        "(" | "[" | "{" => "(",
        ")" | "]" | "}" => ")",
        _ => "SYM",
    }
}

fn is_number(token: &str) -> bool {
    let cleaned: String = token.chars().filter(|c| *c != ',').collect();
    !cleaned.is_empty() && cleaned.parse::<f64>().is_ok()
}
