// src/gate.rs

use regex::Regex;
use std::fmt;

/// Statement tokens that must never appear in a solution query.
pub const BANNED_TOKENS: &[&str] = &[
    "DROP", "DELETE", "UPDATE", "INSERT", "TRUNCATE", "ALTER", "EXEC", "MERGE", "GRANT", "REVOKE",
];

/// Why the gate refused a query. These are expected, user-correctable
/// outcomes, not errors; the UI surfaces `Display` inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    EmptyQuery,
    NotAReadStatement,
    BannedToken(String),
    MissingOrderBy,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::EmptyQuery => write!(f, "Solution query cannot be empty."),
            Rejection::NotAReadStatement => {
                write!(f, "Syntax Error: query must start with SELECT or WITH.")
            }
            Rejection::BannedToken(token) => {
                write!(f, "Security violation: DDL/DML token {} detected.", token)
            }
            Rejection::MissingOrderBy => {
                write!(f, "Determinism Error: ORDER BY is required for scoring.")
            }
        }
    }
}

/// Lexical security and determinism check applied to authored solution
/// queries before they are accepted or executed.
///
/// This is a fast client-side pre-check only. The execution backend
/// re-validates every query and is authoritative; nothing here is a
/// security boundary.
pub struct SolutionGate {
    banned: Vec<(String, Regex)>,
}

impl SolutionGate {
    /// Builds a gate over a custom banned-token vocabulary. Tokens are
    /// matched case-insensitively as whole words, so identifiers merely
    /// containing a token (`updated_at`) pass.
    pub fn new(tokens: &[&str]) -> Self {
        let banned = tokens
            .iter()
            .map(|token| {
                let upper = token.to_uppercase();
                let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&upper)))
                    .expect("banned token pattern must compile");
                (upper, pattern)
            })
            .collect();

        Self { banned }
    }

    /// Checks a query, short-circuiting on the first failed rule. The
    /// rule order is fixed so a given query always produces the same
    /// rejection message:
    ///
    /// 1. non-empty
    /// 2. starts with SELECT or WITH
    /// 3. no banned token as a whole word
    /// 4. contains ORDER BY (result comparison is order-sensitive)
    ///
    /// Scanning happens on an uppercased copy; the original text is
    /// never re-cased for execution.
    pub fn validate(&self, query: &str) -> Result<(), Rejection> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(Rejection::EmptyQuery);
        }

        let upper = trimmed.to_uppercase();

        if !upper.starts_with("SELECT") && !upper.starts_with("WITH") {
            return Err(Rejection::NotAReadStatement);
        }

        for (token, pattern) in &self.banned {
            if pattern.is_match(&upper) {
                return Err(Rejection::BannedToken(token.clone()));
            }
        }

        if !upper.contains("ORDER BY") {
            return Err(Rejection::MissingOrderBy);
        }

        Ok(())
    }
}

impl Default for SolutionGate {
    fn default() -> Self {
        Self::new(BANNED_TOKENS)
    }
}
