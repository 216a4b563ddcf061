use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    /// An empty pattern would match at every position and loop the scanner.
    #[error("substitution rule {index} has an empty pattern")]
    EmptyPattern { index: usize },
}

/// One `(pattern, replacement)` pair in the substitution table.
///
/// Patterns are literal character sequences, not a pattern language. The
/// replacement may be empty, which deletes every occurrence of the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pattern: String,
    replacement: String,
}

impl Rule {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

/// Ordered substitution table.
///
/// Declaration order is a first-class contract: rules are applied strictly in
/// the order given, so a multi-character pattern must be declared before any
/// shorter pattern that shares its leading character, or the shorter rule
/// consumes the characters the longer one needs and the longer form can never
/// match. The table is never reordered or deduped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Build a table from ordered `(pattern, replacement)` pairs.
    ///
    /// Rejects empty patterns at construction time; there is no way to get an
    /// invalid table past this point.
    pub fn new<P, R>(pairs: impl IntoIterator<Item = (P, R)>) -> Result<Self, RuleError>
    where
        P: Into<String>,
        R: Into<String>,
    {
        let mut rules = Vec::new();
        for (index, (pattern, replacement)) in pairs.into_iter().enumerate() {
            let pattern = pattern.into();
            if pattern.is_empty() {
                return Err(RuleError::EmptyPattern { index });
            }
            rules.push(Rule {
                pattern,
                replacement: replacement.into(),
            });
        }
        Ok(Self { rules })
    }

    /// The built-in Egyptological table: ASCII mnemonics to Unicode
    /// transliteration glyphs, in evaluation order.
    pub fn egyptological() -> Self {
        const PAIRS: &[(&str, &str)] = &[
            // Consonant mnemonics. Two-character combining forms (H., T_, ...)
            // come before anything that could consume their leading letter.
            ("E", "Ꜣ"),
            ("e", "ꜣ"),
            ("I", "Ỉ"),
            ("i", "ỉ"),
            ("A", "Ꜥ"),
            ("a", "Ꜥ"),
            ("H.", "Ḥ"),
            ("h.", "ḥ"),
            ("X", "Ḫ"),
            ("x", "ḫ"),
            ("H_", "H̱"),
            ("h_", "ẖ"),
            ("S.", "Š"),
            ("s.", "š"),
            ("K.", "Ḳ"),
            ("k.", "ḳ"),
            ("Q", "Ḳ"),
            ("q", "ḳ"),
            ("T_", "Ṯ"),
            ("t_", "ṯ"),
            ("D_", "Ḏ"),
            ("d_", "ḏ"),
            ("J", "Ḏ"),
            ("j", "ḏ"),
            // Digits render as superscripts for footnote references.
            ("0", "⁰"),
            ("1", "¹"),
            ("2", "²"),
            ("3", "³"),
            ("4", "⁴"),
            ("5", "⁵"),
            ("6", "⁶"),
            ("7", "⁷"),
            ("8", "⁸"),
            ("9", "⁹"),
            // Letters with no transliteration value are stripped.
            ("C", ""),
            ("c", ""),
            ("L", ""),
            ("l", ""),
            ("O", ""),
            ("o", ""),
            ("U", ""),
            ("u", ""),
            ("V", ""),
            ("v", ""),
            ("Y", ""),
            ("y", ""),
            ("Z", ""),
            ("z", ""),
        ];

        // Built from literals that are visibly non-empty, so construction
        // cannot fail.
        Self {
            rules: PAIRS
                .iter()
                .map(|&(pattern, replacement)| Rule {
                    pattern: pattern.to_string(),
                    replacement: replacement.to_string(),
                })
                .collect(),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule in table order to `text` and recompute the caret.
    ///
    /// Pure: identical inputs always yield identical outputs. The returned
    /// caret is always within `0..=result.chars().count()`.
    pub fn rewrite(&self, text: &str, cursor: usize) -> (String, usize) {
        crate::editing::rewrite::rewrite(self, text, cursor)
    }
}
