// src/engine/patterns.rs
// Deterministic colloquialization pass applied to every provider response.

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

/// Contraction table. Order matters: compound-verb forms ("would have")
/// must run before shorter patterns that could fire inside them.
const CONTRACTIONS: [(&str, &str); 25] = [
    ("is not", "isnt"),
    ("will not", "wont"),
    ("can not", "cant"),
    ("do not", "dont"),
    ("did not", "didnt"),
    ("does not", "doesnt"),
    ("have not", "havent"),
    ("has not", "hasnt"),
    ("would not", "wouldnt"),
    ("could not", "couldnt"),
    ("should not", "shouldnt"),
    ("would have", "wouldve"),
    ("could have", "couldve"),
    ("should have", "shouldve"),
    ("it is", "its"),
    ("there is", "theres"),
    ("i am", "im"),
    ("you are", "youre"),
    ("we are", "were"),
    ("they are", "theyre"),
    ("i will", "ill"),
    ("you will", "youll"),
    ("i have", "ive"),
    ("you have", "youve"),
    ("let us", "lets"),
];

static CONTRACTION_RES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    CONTRACTIONS
        .iter()
        .map(|(pat, repl)| {
            let re = Regex::new(&format!(r"(?i)\b{pat}\b")).expect("valid contraction pattern");
            (re, *repl)
        })
        .collect()
});

const MARKERS: [&str; 7] = [
    "honestly, ",
    "look, ",
    "i mean, ",
    "you know, ",
    "like, ",
    "basically, ",
    "actually, ",
];

/// Sentences already opening with one of these never get a second marker.
const MARKER_PREFIXES: [&str; 4] = ["honestly", "look", "i mean", "you know"];

const SPLIT_CONJUNCTIONS: [&str; 3] = ["and", "but", "because"];
const LONG_SENTENCE_WORDS: usize = 20;

static FILLER_RES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)\bit is important to note\b", ""),
        (r"(?i)\bin conclusion\b", "so"),
        (r"(?i)\bat the end of the day\b", "at the end"),
        (r"(?i)\bfurthermore\b", "plus"),
    ]
    .iter()
    .map(|(pat, repl)| (Regex::new(pat).expect("valid filler pattern"), *repl))
    .collect()
});

/// Rewrite `text` to read more casual and less formulaic.
///
/// Pure apart from the injected RNG (marker placement); never fails.
/// Empty input comes back unchanged.
pub fn inject<R: Rng>(text: &str, rng: &mut R) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut result = fold_contractions(text);
    result = insert_markers(&result, rng);
    result = split_long_sentences(&result);
    result = strip_filler(&result);
    result = repair_capitalization(&result);
    collapse_whitespace(&result)
}

fn fold_contractions(text: &str) -> String {
    let mut result = text.to_string();
    for (re, repl) in CONTRACTION_RES.iter() {
        result = re.replace_all(&result, *repl).into_owned();
    }
    result
}

/// Split at `.`/`!`/`?` followed by whitespace; the delimiter stays with the
/// preceding sentence.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().is_some_and(|n| n.is_whitespace()) {
            while chars.peek().is_some_and(|n| n.is_whitespace()) {
                chars.next();
            }
            if !current.trim().is_empty() {
                sentences.push(std::mem::take(&mut current));
            }
        }
    }
    if !current.trim().is_empty() {
        sentences.push(current);
    }
    sentences
}

fn insert_markers<R: Rng>(text: &str, rng: &mut R) -> String {
    let sentences: Vec<String> = split_sentences(text)
        .into_iter()
        .map(|sentence| {
            let lowered = sentence.to_lowercase();
            let already_marked = MARKER_PREFIXES.iter().any(|p| lowered.starts_with(p));
            // Insert with probability 0.4, never on top of an existing marker.
            if already_marked || rng.random::<f64>() <= 0.6 {
                return sentence;
            }
            let marker = MARKERS[rng.random_range(0..MARKERS.len())];
            format!("{}{}", marker, lower_first(&sentence))
        })
        .collect();
    sentences.join(" ")
}

fn split_long_sentences(text: &str) -> String {
    let segments: Vec<String> = text
        .split(". ")
        .filter(|s| !s.trim().is_empty())
        .map(|segment| {
            let words: Vec<&str> = segment.split_whitespace().collect();
            if words.len() <= LONG_SENTENCE_WORDS {
                return segment.to_string();
            }

            let mut idx = words.len() / 2;
            let window_start = idx.saturating_sub(2);
            let window_end = (idx + 3).min(words.len());
            for j in window_start..window_end {
                if SPLIT_CONJUNCTIONS.contains(&words[j].to_lowercase().as_str()) {
                    idx = j;
                    break;
                }
            }

            // The word at idx is a connector replaced by the new boundary.
            if idx > 5 && idx < words.len() - 5 {
                let head = words[..idx].join(" ");
                let tail = words[idx + 1..].join(" ");
                format!("{}. {}", head, upper_first(&tail))
            } else {
                segment.to_string()
            }
        })
        .collect();
    segments.join(". ")
}

fn strip_filler(text: &str) -> String {
    let mut result = text.to_string();
    for (re, repl) in FILLER_RES.iter() {
        result = re.replace_all(&result, *repl).into_owned();
    }
    result
}

/// Uppercase the first letter of every line.
fn repair_capitalization(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let mut chars = line.chars();
            match chars.next() {
                Some(c) if c.is_ascii_lowercase() => {
                    format!("{}{}", c.to_ascii_uppercase(), chars.as_str())
                }
                _ => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
