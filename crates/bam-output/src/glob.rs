//! Shell-style glob patterns and collapse prefix derivation
//!
//! Globs follow `fnmatch` rules: `*` matches any run of characters
//! (including `/`), `?` matches exactly one character, and `[...]` /
//! `[!...]` are character classes. Matching is case-sensitive and
//! anchored at both ends.
//!
//! A glob is translated into a regular expression whose first capture
//! group, when present, holds the literal text before the first wildcard.
//! That capture is what [`derive_prefix`] uses to label a collapsed run.

use regex::Regex;

use crate::{Error, Result};

/// One lexical element of a glob.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(char),
    AnyRun,
    AnyChar,
    /// Already translated to regex class syntax.
    Class(String),
}

/// A compiled shell-style glob.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    glob: String,
    regex: Regex,
    literal_len: usize,
    wildcard: bool,
}

impl GlobPattern {
    /// Compile a glob into its anchored regular expression.
    ///
    /// # Example
    /// ```
    /// use bam_output::GlobPattern;
    ///
    /// let pattern = GlobPattern::new("logs/*.txt").unwrap();
    /// assert!(pattern.is_match("logs/2024/app.txt"));
    /// assert!(!pattern.is_match("Logs/app.txt"));
    /// ```
    pub fn new(glob: impl Into<String>) -> Result<Self> {
        let glob = glob.into();
        let tokens = tokenize(&glob);

        let literal_len = tokens
            .iter()
            .position(|t| !matches!(t, Token::Literal(_)))
            .unwrap_or(tokens.len());
        let (lead, rest) = tokens.split_at(literal_len);

        let mut source = String::from(r"^(?s:");
        if !lead.is_empty() {
            source.push('(');
            lead.iter().for_each(|t| push_token(&mut source, t));
            source.push(')');
        }
        rest.iter().for_each(|t| push_token(&mut source, t));
        source.push_str(r")\z");

        let regex = Regex::new(&source).map_err(|e| Error::InvalidPattern {
            pattern: glob.clone(),
            message: e.to_string(),
        })?;
        tracing::trace!(%glob, regex = %source, "Compiled glob");

        Ok(Self {
            glob,
            regex,
            literal_len,
            wildcard: !rest.is_empty(),
        })
    }

    /// The glob exactly as configured.
    pub fn as_str(&self) -> &str {
        &self.glob
    }

    /// Whether the glob contains any wildcard or character class.
    pub fn has_wildcards(&self) -> bool {
        self.wildcard
    }

    /// Test a whole line against the glob.
    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// Capture the literal leading portion of the glob from a matching line.
    ///
    /// Returns `None` when the glob starts with a wildcard or the line
    /// does not match.
    pub fn literal_prefix<'l>(&self, line: &'l str) -> Option<&'l str> {
        if self.literal_len == 0 {
            return None;
        }
        self.regex
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|prefix| !prefix.is_empty())
    }
}

impl std::fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.glob)
    }
}

/// Derive the label of a collapsed run from the run's first line.
///
/// `<literal prefix>*` when the glob has a leading literal segment,
/// otherwise the raw glob.
pub fn derive_prefix(pattern: &GlobPattern, sample_line: &str) -> String {
    match pattern.literal_prefix(sample_line) {
        Some(prefix) => format!("{prefix}*"),
        None => pattern.as_str().to_string(),
    }
}

fn tokenize(glob: &str) -> Vec<Token> {
    let chars: Vec<char> = glob.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' => {
                // A run of stars is a single wildcard
                if tokens.last() != Some(&Token::AnyRun) {
                    tokens.push(Token::AnyRun);
                }
                i += 1;
            }
            '?' => {
                tokens.push(Token::AnyChar);
                i += 1;
            }
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    tokens.push(Token::Class(translate_class(&chars[i + 1..end])));
                    i = end + 1;
                }
                None => {
                    tokens.push(Token::Literal('['));
                    i += 1;
                }
            },
            c => {
                tokens.push(Token::Literal(c));
                i += 1;
            }
        }
    }

    tokens
}

/// Index of the `]` closing the class opened at `open`, if any.
///
/// A `]` directly after `[` or `[!` is a member of the class, not its end.
fn class_end(chars: &[char], open: usize) -> Option<usize> {
    let mut j = open + 1;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    while j < chars.len() && chars[j] != ']' {
        j += 1;
    }
    (j < chars.len()).then_some(j)
}

/// Translate a class body. `-` is a range only between two members;
/// anywhere else it is escaped, so regex set operators never appear.
fn translate_class(body: &[char]) -> String {
    let (negated, members) = match body.split_first() {
        Some(('!', rest)) => (true, rest),
        _ => (false, body),
    };

    let mut class = String::from("[");
    if negated {
        class.push('^');
    }
    let mut i = 0;
    while i < members.len() {
        push_escaped(&mut class, members[i]);
        if members.get(i + 1) == Some(&'-') && i + 2 < members.len() {
            class.push('-');
            push_escaped(&mut class, members[i + 2]);
            i += 3;
        } else {
            i += 1;
        }
    }
    class.push(']');
    class
}

fn push_escaped(out: &mut String, c: char) {
    out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
}

fn push_token(out: &mut String, token: &Token) {
    match token {
        Token::Literal(c) => push_escaped(out, *c),
        Token::AnyRun => out.push_str(".*"),
        Token::AnyChar => out.push('.'),
        Token::Class(class) => out.push_str(class),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn glob(pattern: &str) -> GlobPattern {
        GlobPattern::new(pattern).unwrap()
    }

    #[rstest]
    #[case("a/*", "a/x1.txt", true)]
    #[case("a/*", "a/", true)]
    #[case("a/*", "b/a/x", false)]
    #[case("*.tmp", "dir/sub/file.tmp", true)]
    #[case("*.tmp", "file.tmpx", false)]
    #[case("file?.log", "file1.log", true)]
    #[case("file?.log", "file10.log", false)]
    #[case("img[0-9].png", "img7.png", true)]
    #[case("img[!0-9].png", "img7.png", false)]
    #[case("img[!0-9].png", "imgx.png", true)]
    #[case("[]]x", "]x", true)]
    #[case("[!]]x", "ax", true)]
    #[case("data[", "data[", true)]
    #[case("a.b", "aXb", false)]
    #[case("(x)+", "(x)+", true)]
    #[case("Docs/*", "docs/readme", false)]
    #[case("a/**", "a/b/c", true)]
    #[case("[a&&b]", "&", true)]
    #[case("[a-]", "-", true)]
    #[case("[-a]", "-", true)]
    #[case("[a-c-e]", "-", true)]
    #[case("[a-c-e]", "d", false)]
    #[case("[--/]", ".", true)]
    #[case("[+--]", ",", true)]
    #[case("[a-c--x]", "m", true)]
    #[case("[a-c--x]", "y", false)]
    #[case("[a~~b]", "~", true)]
    fn test_is_match(#[case] pattern: &str, #[case] line: &str, #[case] expected: bool) {
        assert_eq!(glob(pattern).is_match(line), expected, "{pattern} vs {line}");
    }

    #[test]
    fn test_star_crosses_newline() {
        assert!(glob("a*").is_match("a\nb"));
    }

    #[rstest]
    #[case("a/*", "a/x1.txt", Some("a/"))]
    #[case("docs/img?/*.png", "docs/img1/x.png", Some("docs/img"))]
    #[case("photos/2024-[01]*", "photos/2024-01/a.jpg", Some("photos/2024-"))]
    #[case("exact/path", "exact/path", Some("exact/path"))]
    #[case("*.tmp", "x.tmp", None)]
    #[case("?x", "ax", None)]
    #[case("[ab]/*", "a/y", None)]
    #[case("a/*", "b/x", None)]
    fn test_literal_prefix(
        #[case] pattern: &str,
        #[case] line: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(glob(pattern).literal_prefix(line), expected);
    }

    #[rstest]
    #[case("a/*", "a/x1.txt", "a/*")]
    #[case("build/out-*.o", "build/out-12.o", "build/out-*")]
    #[case("*.tmp", "cache/1.tmp", "*.tmp")]
    #[case("?ache/*", "cache/1", "?ache/*")]
    fn test_derive_prefix(#[case] pattern: &str, #[case] line: &str, #[case] expected: &str) {
        assert_eq!(derive_prefix(&glob(pattern), line), expected);
    }

    #[test]
    fn test_derive_prefix_never_fails_on_mismatch() {
        // The sample line is not required to match
        assert_eq!(derive_prefix(&glob("a/*"), "zzz"), "a/*");
    }

    #[test]
    fn test_has_wildcards() {
        assert!(glob("a/*").has_wildcards());
        assert!(glob("a[bc]").has_wildcards());
        assert!(!glob("/home/me/docs/").has_wildcards());
        assert!(!glob("data[").has_wildcards());
    }

    #[test]
    fn test_reversed_range_is_invalid() {
        let err = GlobPattern::new("[z-a]").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { ref pattern, .. } if pattern == "[z-a]"));
    }

    #[test]
    fn test_display_is_raw_glob() {
        assert_eq!(glob("x/[!a]*").to_string(), "x/[!a]*");
    }
}
