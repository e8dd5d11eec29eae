//! README text normalization.
//!
//! Markup is stripped, the text is lowercased, split into word tokens, stop
//! words are dropped and the remaining tokens are joined with single spaces.
//! The output only contains lowercase word characters and spaces, so running
//! it through [`normalize`] again returns it unchanged.

use regex::Regex;
use scraper::Html;
use std::collections::HashSet;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub remove_stopwords: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            remove_stopwords: true,
        }
    }
}

/// English stop words, contractions already split the way [`tokenize`] splits them.
const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren",
    "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn",
    "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

// 字母與數字的連續片段；底線視為分隔符
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\W_]+").expect("valid regex"));

/// Run the whole normalization on raw README content.
pub fn normalize(raw: &str, options: &NormalizeOptions) -> String {
    let text = strip_markup(raw).to_lowercase();

    tokenize(&text)
        .into_iter()
        .filter(|token| !options.remove_stopwords || !is_stopword(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keep only the text nodes of `input`, skipping `<script>` and `<style>` bodies.
pub fn strip_markup(input: &str) -> String {
    let fragment = Html::parse_fragment(input);
    let mut text = String::with_capacity(input.len());

    for node in fragment.root_element().descendants() {
        let Some(chunk) = node.value().as_text() else {
            continue;
        };

        let in_code = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .map(|element| matches!(element.name(), "script" | "style"))
            .unwrap_or(false);

        if !in_code {
            text.push_str(chunk);
            // 相鄰元素的文字不可黏在一起
            text.push(' ');
        }
    }

    text
}

pub fn tokenize(text: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect()
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}
