//! Morphological lemmatizer: exception tables first, then suffix detachment
//! rules per word class.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordClass {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl WordClass {
    /// Map a Penn Treebank tag to a lemmatizer class. Unknown tags map to `Noun`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.as_bytes().first() {
            Some(b'J') => Self::Adjective,
            Some(b'V') => Self::Verb,
            Some(b'R') => Self::Adverb,
            _ => Self::Noun,
        }
    }
}

const NOUN_EXCEPTIONS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("indices", "index"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("theses", "thesis"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("media", "medium"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("news", "news"),
    ("series", "series"),
    ("species", "species"),
    ("bias", "bias"),
    ("earnings", "earnings"),
];

const VERB_EXCEPTIONS: &[(&str, &str)] = &[
    ("is", "be"),
    ("are", "be"),
    ("am", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("being", "be"),
    ("has", "have"),
    ("had", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("rose", "rise"),
    ("risen", "rise"),
    ("fell", "fall"),
    ("fallen", "fall"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("sold", "sell"),
    ("bought", "buy"),
    ("made", "make"),
    ("took", "take"),
    ("taken", "take"),
    ("gave", "give"),
    ("given", "give"),
    ("went", "go"),
    ("gone", "go"),
    ("came", "come"),
    ("saw", "see"),
    ("seen", "see"),
    ("said", "say"),
    ("told", "tell"),
    ("paid", "pay"),
    ("won", "win"),
    ("lost", "lose"),
    ("began", "begin"),
    ("begun", "begin"),
    ("brought", "bring"),
    ("built", "build"),
    ("spent", "spend"),
    ("sent", "send"),
    ("held", "hold"),
    ("kept", "keep"),
    ("left", "leave"),
    ("led", "lead"),
    ("met", "meet"),
    ("ran", "run"),
    ("stood", "stand"),
    ("thought", "think"),
    ("felt", "feel"),
    ("found", "find"),
    ("got", "get"),
    ("knew", "know"),
    ("known", "know"),
    ("became", "become"),
    ("wrote", "write"),
    ("written", "write"),
    ("drove", "drive"),
    ("driven", "drive"),
    ("struck", "strike"),
    ("sank", "sink"),
    ("sunk", "sink"),
    ("shrank", "shrink"),
    ("shrunk", "shrink"),
    ("swung", "swing"),
    ("shown", "show"),
    ("chosen", "choose"),
    ("used", "use"),
    ("using", "use"),
];

const ADJECTIVE_EXCEPTIONS: &[(&str, &str)] = &[
    ("better", "good"),
    ("best", "good"),
    ("worse", "bad"),
    ("worst", "bad"),
    ("more", "much"),
    ("most", "much"),
    ("less", "little"),
    ("least", "little"),
    ("further", "far"),
    ("furthest", "far"),
];

const ADVERB_EXCEPTIONS: &[(&str, &str)] = &[
    ("better", "well"),
    ("best", "well"),
    ("worse", "badly"),
    ("worst", "badly"),
];

/// Lemmatizer over embedded exception tables and detachment rules.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    exceptions: HashMap<WordClass, HashMap<&'static str, &'static str>>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer {
    #[must_use]
    pub fn new() -> Self {
        let exceptions = [
            (WordClass::Noun, NOUN_EXCEPTIONS),
            (WordClass::Verb, VERB_EXCEPTIONS),
            (WordClass::Adjective, ADJECTIVE_EXCEPTIONS),
            (WordClass::Adverb, ADVERB_EXCEPTIONS),
        ]
        .into_iter()
        .map(|(class, table)| (class, table.iter().copied().collect()))
        .collect();
        Self { exceptions }
    }

    /// Reduce a lowercased word to its base form for the given class.
    #[must_use]
    pub fn lemmatize(&self, word: &str, class: WordClass) -> String {
        if let Some(lemma) = self.exceptions.get(&class).and_then(|t| t.get(word)) {
            return (*lemma).to_owned();
        }
        match class {
            WordClass::Noun => noun_base(word),
            WordClass::Verb => verb_base(word),
            WordClass::Adjective => adjective_base(word),
            WordClass::Adverb => word.to_owned(),
        }
    }
}

fn noun_base(word: &str) -> String {
    if word.chars().count() <= 3 {
        return word.to_owned();
    }
    for (suffix, replacement) in [
        ("sses", "ss"),
        ("xes", "x"),
        ("ches", "ch"),
        ("shes", "sh"),
        ("ies", "y"),
        ("men", "man"),
    ] {
        if let Some(stem) = word.strip_suffix(suffix) {
            return format!("{stem}{replacement}");
        }
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_owned();
    }
    word.strip_suffix('s').unwrap_or(word).to_owned()
}

fn verb_base(word: &str) -> String {
    for suffix in ["ies", "ied"] {
        if let Some(stem) = word.strip_suffix(suffix)
            && stem.chars().count() >= 2
        {
            return format!("{stem}y");
        }
    }
    for suffix in ["ing", "ed"] {
        if let Some(stem) = word.strip_suffix(suffix)
            && stem.chars().count() >= 3
        {
            return restore_stem(stem);
        }
    }
    for suffix in ["sses", "ches", "shes", "xes", "zes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_owned();
        }
    }
    if word.chars().count() > 3
        && word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("us")
    {
        return word[..word.len() - 1].to_owned();
    }
    word.to_owned()
}

fn adjective_base(word: &str) -> String {
    for suffix in ["iest", "ier"] {
        if let Some(stem) = word.strip_suffix(suffix)
            && stem.chars().count() >= 2
        {
            return format!("{stem}y");
        }
    }
    for suffix in ["est", "er"] {
        if let Some(stem) = word.strip_suffix(suffix)
            && stem.chars().count() >= 3
        {
            return restore_stem(stem);
        }
    }
    word.to_owned()
}

/// Stem endings whose silent `e` was dropped by an inflection.
const SILENT_E_ENDINGS: &[&str] = &[
    "v", "z", "c", "u", "ang", "rg", "dg", "ns", "rs", "ps", "um", "uir",
];

/// Repair a stem left after removing an inflection: undo consonant doubling
/// (`stopp` -> `stop`) or restore a dropped final `e` (`rais` -> `raise`).
fn restore_stem(stem: &str) -> String {
    let undoubled = undouble(stem);
    if undoubled.len() != stem.len() {
        return undoubled.to_owned();
    }
    if needs_final_e(stem) {
        format!("{stem}e")
    } else {
        stem.to_owned()
    }
}

fn needs_final_e(stem: &str) -> bool {
    if SILENT_E_ENDINGS.iter().any(|e| stem.ends_with(e)) {
        return true;
    }

    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    if n < 2 {
        return false;
    }
    let last = chars[n - 1];
    let before = chars[n - 2];

    if last == 's' {
        return is_vowel(before) && !stem.ends_with("cus");
    }
    if last == 'l' {
        return !is_vowel(before) && !matches!(before, 'l' | 'r' | 'w');
    }
    if n < 3 || !ends_cvc(&chars) {
        return false;
    }
    // consonant + single vowel + consonant
    if n <= 4 && !is_vowel(chars[0]) {
        return true;
    }
    match last {
        'r' | 'd' => matches!(before, 'a' | 'i' | 'u'),
        'b' | 'n' => before == 'i',
        't' => matches!(before, 'a' | 'u'),
        'g' => before == 'a',
        _ => false,
    }
}

fn undouble(stem: &str) -> &str {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n >= 4
        && bytes[n - 1] == bytes[n - 2]
        && bytes[n - 1].is_ascii_alphabetic()
        && !is_vowel(char::from(bytes[n - 1]))
        && !matches!(bytes[n - 1], b'l' | b's' | b'z' | b'f')
    {
        &stem[..n - 1]
    } else {
        stem
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn ends_cvc(chars: &[char]) -> bool {
    let n = chars.len();
    n >= 3
        && !is_vowel(chars[n - 3])
        && is_vowel(chars[n - 2])
        && !is_vowel(chars[n - 1])
        && !matches!(chars[n - 1], 'w' | 'x' | 'y')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemma(word: &str, class: WordClass) -> String {
        Lemmatizer::new().lemmatize(word, class)
    }

    #[test]
    fn word_class_from_tag() {
        assert_eq!(WordClass::from_tag("JJS"), WordClass::Adjective);
        assert_eq!(WordClass::from_tag("VBD"), WordClass::Verb);
        assert_eq!(WordClass::from_tag("NNS"), WordClass::Noun);
        assert_eq!(WordClass::from_tag("RB"), WordClass::Adverb);
        assert_eq!(WordClass::from_tag("CD"), WordClass::Noun);
        assert_eq!(WordClass::from_tag(""), WordClass::Noun);
    }

    #[test]
    fn noun_plurals() {
        assert_eq!(lemma("shares", WordClass::Noun), "share");
        assert_eq!(lemma("companies", WordClass::Noun), "company");
        assert_eq!(lemma("boxes", WordClass::Noun), "box");
        assert_eq!(lemma("branches", WordClass::Noun), "branch");
        assert_eq!(lemma("businesses", WordClass::Noun), "business");
        assert_eq!(lemma("chairmen", WordClass::Noun), "chairman");
        assert_eq!(lemma("children", WordClass::Noun), "child");
    }

    #[test]
    fn noun_singulars_untouched() {
        assert_eq!(lemma("business", WordClass::Noun), "business");
        assert_eq!(lemma("status", WordClass::Noun), "status");
        assert_eq!(lemma("analysis", WordClass::Noun), "analysis");
        assert_eq!(lemma("gas", WordClass::Noun), "gas");
        assert_eq!(lemma("news", WordClass::Noun), "news");
    }

    #[test]
    fn irregular_verbs() {
        assert_eq!(lemma("rose", WordClass::Verb), "rise");
        assert_eq!(lemma("was", WordClass::Verb), "be");
        assert_eq!(lemma("sold", WordClass::Verb), "sell");
    }

    #[test]
    fn regular_verbs() {
        assert_eq!(lemma("reported", WordClass::Verb), "report");
        assert_eq!(lemma("stopped", WordClass::Verb), "stop");
        assert_eq!(lemma("raised", WordClass::Verb), "raise");
        assert_eq!(lemma("reduced", WordClass::Verb), "reduce");
        assert_eq!(lemma("moving", WordClass::Verb), "move");
        assert_eq!(lemma("running", WordClass::Verb), "run");
        assert_eq!(lemma("trading", WordClass::Verb), "trade");
        assert_eq!(lemma("making", WordClass::Verb), "make");
        assert_eq!(lemma("carried", WordClass::Verb), "carry");
        assert_eq!(lemma("reports", WordClass::Verb), "report");
        assert_eq!(lemma("rallies", WordClass::Verb), "rally");
        assert_eq!(lemma("pushes", WordClass::Verb), "push");
        assert_eq!(lemma("updated", WordClass::Verb), "update");
        assert_eq!(lemma("provided", WordClass::Verb), "provide");
        assert_eq!(lemma("changed", WordClass::Verb), "change");
        assert_eq!(lemma("opened", WordClass::Verb), "open");
        assert_eq!(lemma("visited", WordClass::Verb), "visit");
        assert_eq!(lemma("added", WordClass::Verb), "add");
        assert_eq!(lemma("focused", WordClass::Verb), "focus");
        assert_eq!(lemma("settled", WordClass::Verb), "settle");
        assert_eq!(lemma("called", WordClass::Verb), "call");
    }

    #[test]
    fn short_verbs_untouched() {
        assert_eq!(lemma("sing", WordClass::Verb), "sing");
        assert_eq!(lemma("bed", WordClass::Verb), "bed");
    }

    #[test]
    fn adjectives() {
        assert_eq!(lemma("higher", WordClass::Adjective), "high");
        assert_eq!(lemma("biggest", WordClass::Adjective), "big");
        assert_eq!(lemma("happier", WordClass::Adjective), "happy");
        assert_eq!(lemma("better", WordClass::Adjective), "good");
        assert_eq!(lemma("strong", WordClass::Adjective), "strong");
        assert_eq!(lemma("larger", WordClass::Adjective), "large");
        assert_eq!(lemma("simpler", WordClass::Adjective), "simple");
    }

    #[test]
    fn adverbs_use_exceptions_only() {
        assert_eq!(lemma("better", WordClass::Adverb), "well");
        assert_eq!(lemma("quickly", WordClass::Adverb), "quickly");
    }
}
