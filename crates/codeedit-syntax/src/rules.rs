//! Highlight rules and the per-language keyword tables they are built from.
//!
//! ## Learning: Ordered Tables
//!
//! A `RuleTable` is a `Vec`, not a map keyed by pattern. Two rules may share
//! a pattern and still be distinct entries, and the table order doubles as
//! the overlap priority: when spans from different rules cover the same
//! text, the later rule is drawn on top.

use regex::Regex;

use crate::{SyntaxError, SyntaxResult, TextFormat};

/// One lexical highlighting behavior: a pattern and the format of its matches.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    format: TextFormat,
}

impl Rule {
    /// Compiles `pattern` into a rule.
    pub fn new(pattern: &str, format: TextFormat) -> SyntaxResult<Self> {
        let pattern = Regex::new(pattern).map_err(|source| SyntaxError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { pattern, format })
    }

    /// A rule matching `word` as a whole word.
    pub fn keyword(word: &str, format: TextFormat) -> SyntaxResult<Self> {
        Self::new(&format!(r"\b{}\b", regex::escape(word)), format)
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn format(&self) -> &TextFormat {
        &self.format
    }
}

/// An ordered, immutable-after-construction list of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// One keyword rule per keyword of `language`, all sharing `format`.
    ///
    /// Unknown languages produce an empty table.
    pub fn for_language(language: &str, format: TextFormat) -> SyntaxResult<Self> {
        let rules = keywords(language)
            .iter()
            .map(|word| Rule::keyword(word, format))
            .collect::<SyntaxResult<Vec<_>>>()?;
        tracing::debug!(language, rules = rules.len(), "built keyword rules");
        Ok(Self { rules })
    }

    /// Builds a table from raw `(pattern, format)` pairs, in order.
    pub fn with_patterns<'a>(
        patterns: impl IntoIterator<Item = (&'a str, TextFormat)>,
    ) -> SyntaxResult<Self> {
        let rules = patterns
            .into_iter()
            .map(|(pattern, format)| Rule::new(pattern, format))
            .collect::<SyntaxResult<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Appends a rule; it takes priority over every rule already present.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Appends every rule of `other` after the existing ones.
    pub fn extend(&mut self, other: RuleTable) {
        self.rules.extend(other.rules);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

// ============================================================================
// Language keyword sets
// ============================================================================

fn go_keywords() -> &'static [&'static str] {
    &[
        "break", "case", "chan", "const", "continue", "default", "defer",
        "else", "fallthrough", "for", "func", "go", "goto", "if", "import",
        "interface", "map", "package", "range", "return", "select", "struct",
        "switch", "type", "var",
    ]
}

fn rust_keywords() -> &'static [&'static str] {
    &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn",
        "else", "enum", "extern", "fn", "for", "if", "impl", "in", "let",
        "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
        "self", "Self", "static", "struct", "super", "trait", "type",
        "unsafe", "use", "where", "while", "yield",
    ]
}

fn python_keywords() -> &'static [&'static str] {
    &[
        "and", "as", "assert", "async", "await", "break", "class", "continue",
        "def", "del", "elif", "else", "except", "finally", "for", "from",
        "global", "if", "import", "in", "is", "lambda", "nonlocal", "not",
        "or", "pass", "raise", "return", "try", "while", "with", "yield",
    ]
}

fn js_keywords() -> &'static [&'static str] {
    &[
        "async", "await", "break", "case", "catch", "class", "const",
        "continue", "debugger", "default", "delete", "do", "else", "export",
        "extends", "finally", "for", "from", "function", "if", "import",
        "in", "instanceof", "let", "new", "of", "return", "static", "super",
        "switch", "this", "throw", "try", "typeof", "var", "void", "while",
        "with", "yield",
    ]
}

fn c_keywords() -> &'static [&'static str] {
    &[
        "auto", "break", "case", "char", "const", "continue", "default",
        "do", "double", "else", "enum", "extern", "float", "for", "goto",
        "if", "inline", "int", "long", "register", "restrict", "return",
        "short", "signed", "sizeof", "static", "struct", "switch",
        "typedef", "union", "unsigned", "void", "volatile", "while",
    ]
}

/// Keywords highlighted for `language` (empty for unknown languages).
pub fn keywords(language: &str) -> &'static [&'static str] {
    match language {
        "go" => go_keywords(),
        "rust" => rust_keywords(),
        "python" => python_keywords(),
        "javascript" | "typescript" => js_keywords(),
        "c" => c_keywords(),
        _ => &[],
    }
}

/// Languages with a built-in keyword table.
pub fn supported_languages() -> &'static [&'static str] {
    &["go", "rust", "python", "javascript", "c"]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, FontWeight};

    #[test]
    fn test_go_table_has_one_rule_per_keyword() {
        let table = RuleTable::for_language("go", TextFormat::keyword()).unwrap();
        assert_eq!(table.len(), 25);
        assert!(table.iter().all(|r| r.format().is_bold()));
    }

    #[test]
    fn test_every_supported_language_builds() {
        for language in supported_languages() {
            let table = RuleTable::for_language(language, TextFormat::keyword()).unwrap();
            assert!(!table.is_empty(), "{language} has no rules");
        }
    }

    #[test]
    fn test_unknown_language_is_empty() {
        let table = RuleTable::for_language("cobol", TextFormat::keyword()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_duplicate_patterns_are_distinct_entries() {
        let red = TextFormat::new(Color::DARK_RED, FontWeight::Normal);
        let table =
            RuleTable::with_patterns([("x", TextFormat::keyword()), ("x", red)]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1).unwrap().format(), &red);
    }

    #[test]
    fn test_keyword_pattern_is_escaped() {
        let rule = Rule::keyword("a.b", TextFormat::keyword()).unwrap();
        assert!(rule.pattern().is_match("a.b"));
        assert!(!rule.pattern().is_match("axb"));
    }

    #[test]
    fn test_malformed_pattern_fails_the_table() {
        let result = RuleTable::with_patterns([("ok", TextFormat::keyword()), ("[", TextFormat::keyword())]);
        assert!(result.is_err());
    }
}
