//! Compiled pattern tables.
//!
//! Criterion patterns are authored as regex fragments over lower-cased
//! document text. They are compiled once per engine; a pattern that fails to
//! compile poisons the whole ruleset rather than being skipped silently.

use regex::{Regex, RegexBuilder};
use std::fmt;

#[derive(Debug)]
pub struct PatternCompileError {
    pub pattern: String,
    pub source: regex::Error,
}

impl fmt::Display for PatternCompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid pattern `{}`: {}", self.pattern, self.source)
    }
}

impl std::error::Error for PatternCompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// One list of patterns compiled together, keeping the source fragment for
/// match traces.
#[derive(Debug, Clone)]
pub struct CompiledPatterns {
    patterns: Vec<(String, Regex)>,
}

impl CompiledPatterns {
    pub fn compile(fragments: &[&str]) -> Result<Self, PatternCompileError> {
        let mut patterns = Vec::with_capacity(fragments.len());
        for fragment in fragments {
            let regex = RegexBuilder::new(fragment)
                .case_insensitive(true)
                .build()
                .map_err(|source| PatternCompileError {
                    pattern: (*fragment).to_owned(),
                    source,
                })?;
            patterns.push(((*fragment).to_owned(), regex));
        }
        Ok(Self { patterns })
    }

    /// Source fragments of the patterns that match `text`. Each pattern
    /// counts at most once no matter how often it occurs.
    pub fn matches<'a>(&'a self, text: &str) -> Vec<&'a str> {
        self.patterns
            .iter()
            .filter(|(_, regex)| regex.is_match(text))
            .map(|(fragment, _)| fragment.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// The three pattern lists a criterion carries: positive evidence, negative
/// evidence, and explicit negations that retract the negatives.
#[derive(Debug, Clone)]
pub struct CompiledPatternSet {
    pub positive: CompiledPatterns,
    pub negative: CompiledPatterns,
    pub explicit_negation: CompiledPatterns,
}

impl CompiledPatternSet {
    pub fn compile(
        positive: &[&str],
        negative: &[&str],
        explicit_negation: &[&str],
    ) -> Result<Self, PatternCompileError> {
        Ok(Self {
            positive: CompiledPatterns::compile(positive)?,
            negative: CompiledPatterns::compile(negative)?,
            explicit_negation: CompiledPatterns::compile(explicit_negation)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_and_matches_case_insensitively() {
        let patterns = CompiledPatterns::compile(&[r"reside\s+no\s+brasil"]).unwrap();
        let text = "O requerente RESIDE no Brasil desde 2010.".to_lowercase();
        assert_eq!(patterns.matches(&text), vec![r"reside\s+no\s+brasil"]);
    }

    #[test]
    fn counts_each_pattern_once() {
        let patterns = CompiledPatterns::compile(&["residência", "domicílio"]).unwrap();
        let text = "residência atual, residência anterior, residência declarada";
        assert_eq!(patterns.matches(text).len(), 1);
    }

    #[test]
    fn reports_the_offending_fragment() {
        let err = CompiledPatterns::compile(&["valid", "(unclosed"]).unwrap_err();
        assert_eq!(err.pattern, "(unclosed");
    }
}
