use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{ Deserialize, Serialize };

/// A temporal-logic formula in some surface syntax.
///
/// The string is opaque: nothing here builds a syntax tree. The only
/// transformation applied to it is the symbol rewrite in [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Formula(String);

impl Formula {
    pub fn new(text: impl Into<String>) -> Self {
        Formula(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// The same formula rewritten into the verifier's ASCII operator set
    pub fn normalized(&self) -> Formula {
        Formula(normalize(&self.0))
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Formula {
    fn from(text: &str) -> Self {
        Formula::new(text)
    }
}

impl From<String> for Formula {
    fn from(text: String) -> Self {
        Formula(text)
    }
}

/// Unicode operator symbols and their ASCII replacements
pub const SYMBOL_TABLE: [(char, &str); 7] = [
    ('∧', "&"),
    ('∨', "|"),
    ('¬', "!"),
    ('→', "->"),
    ('≥', ">="),
    ('≤', "<="),
    ('≠', "!="),
];

/// Rewrite Unicode logical and relational operators into ASCII.
///
/// Total and pure: every other character is copied through untouched, so
/// malformed input survives and fails later at the verifier. The output
/// contains none of the mapped symbols, which makes the rewrite idempotent.
pub fn normalize(formula: &str) -> String {
    let mut out = String::with_capacity(formula.len());
    for c in formula.chars() {
        match SYMBOL_TABLE.iter().find(|(symbol, _)| *symbol == c) {
            Some((_, ascii)) => out.push_str(ascii),
            None => out.push(c),
        }
    }
    out
}

/// Single-letter temporal operators of ptLTL and LTL
pub const TEMPORAL_OPERATORS: [&str; 10] = ["H", "O", "Y", "Z", "S", "U", "F", "G", "X", "R"];

/// Words that look like identifiers but are literals or connectives
const RESERVED_WORDS: [&str; 13] = [
    "true",
    "false",
    "if",
    "then",
    "else",
    "in",
    "when",
    "until",
    "always",
    "eventually",
    "before",
    "after",
    "for",
];

fn identifier_regex() -> &'static Regex {
    static IDENT: OnceLock<Regex> = OnceLock::new();
    IDENT.get_or_init(|| Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*\b").expect("valid regex"))
}

/// Heuristically collect the variable names used by a formula.
///
/// Operator letters, boolean literals and a handful of English connectives
/// are dropped. This is a documentation aid for building schemas; the
/// equivalence decision never relies on it.
pub fn extract_identifiers(formula: &str) -> BTreeSet<String> {
    let normalized = normalize(formula);
    identifier_regex()
        .find_iter(&normalized)
        .map(|m| m.as_str())
        .filter(|token| !TEMPORAL_OPERATORS.contains(token))
        .filter(|token| {
            let lower = token.to_lowercase();
            !RESERVED_WORDS.contains(&lower.as_str())
        })
        .map(str::to_string)
        .collect()
}
