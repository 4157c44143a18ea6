// crates/ggb-core/src/line/tokenize.rs

use crate::error::{GgError, Result};
use crate::line::minimize::strip_comment;

/// One parameter token, e.g. `X10.5` -> letter 'X', value "10.5".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamToken<'a> {
    pub raw: &'a str,
    pub letter: char,
    pub value: &'a str,
}

impl<'a> ParamToken<'a> {
    pub fn parse(raw: &'a str) -> Result<Self> {
        let mut chars = raw.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => Ok(Self {
                raw,
                letter: c.to_ascii_uppercase(),
                value: chars.as_str(),
            }),
            _ => Err(GgError::MalformedToken(raw.to_string())),
        }
    }
}

/// A tokenized source line: command plus raw parameter tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub command: String,
    pub params: Vec<&'a str>,
}

impl<'a> SourceLine<'a> {
    /// Parameter tokens that parse, with the malformed ones reported separately.
    pub fn split_params(&self) -> (Vec<ParamToken<'a>>, Vec<GgError>) {
        let mut ok = Vec::with_capacity(self.params.len());
        let mut bad = Vec::new();
        for raw in &self.params {
            match ParamToken::parse(raw) {
                Ok(t) => ok.push(t),
                Err(e) => bad.push(e),
            }
        }
        (ok, bad)
    }
}

/// Split `line` on whitespace. Returns `None` for blank / comment-only lines.
pub fn tokenize(line: &str) -> Option<SourceLine<'_>> {
    let mut words = strip_comment(line).split_whitespace();
    let command = words.next()?.to_ascii_uppercase();
    Some(SourceLine {
        command,
        params: words.collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_command_and_params() {
        let l = tokenize("  g1   X10 y-5.5\tE ; trailing").unwrap();
        assert_eq!(l.command, "G1");
        assert_eq!(l.params, vec!["X10", "y-5.5", "E"]);

        let (toks, bad) = l.split_params();
        assert!(bad.is_empty());
        assert_eq!(toks[1].letter, 'Y');
        assert_eq!(toks[1].value, "-5.5");
        assert_eq!(toks[2].value, "");
    }

    #[test]
    fn blank_and_comment_lines_yield_none() {
        assert!(tokenize("").is_none());
        assert!(tokenize("   ").is_none());
        assert!(tokenize("; only a comment").is_none());
    }

    #[test]
    fn non_letter_parameter_is_malformed() {
        let l = tokenize("G1 10 X1").unwrap();
        let (toks, bad) = l.split_params();
        assert_eq!(toks.len(), 1);
        assert!(matches!(&bad[0], GgError::MalformedToken(t) if t == "10"));
    }
}
