// ABOUTME: Path expression tokenizer for dotted and bracketed accessors
// ABOUTME: Turns "$params.items[0].id" into field-name and index tokens

use std::fmt;

/// Sigil marking a string as a path expression.
pub const SIGIL: char = '$';

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Key(String),
    Index(i64),
}

impl Token {
    pub fn key(name: impl Into<String>) -> Self {
        Token::Key(name.into())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Key(name) => write!(f, "{}", name),
            Token::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// True when the string, ignoring surrounding whitespace, starts with `$`.
pub fn is_path_expr(text: &str) -> bool {
    text.trim_start().starts_with(SIGIL)
}

/// Tokenize a path, with or without its leading `$`.
///
/// Segments are split on `.`, and each segment may carry any number of
/// bracket accessors. Bracket content matching `-?[0-9]+` becomes an index,
/// anything else a key. An unmatched `[` is kept as literal text and empty
/// segments are skipped.
pub fn tokenize(path: &str) -> Vec<Token> {
    let raw = path.trim().trim_start_matches(SIGIL).trim();
    let mut tokens = Vec::new();

    for segment in raw.split('.').filter(|s| !s.is_empty()) {
        tokenize_segment(segment, &mut tokens);
    }

    tokens
}

fn tokenize_segment(segment: &str, tokens: &mut Vec<Token>) {
    let mut buf = String::new();
    let mut pos = 0;

    while let Some(offset) = segment[pos..].find('[') {
        let open = pos + offset;
        buf.push_str(&segment[pos..open]);
        if !buf.is_empty() {
            tokens.push(Token::Key(std::mem::take(&mut buf)));
        }

        match segment[open + 1..].find(']') {
            Some(offset) => {
                let close = open + 1 + offset;
                tokens.push(classify_bracket(segment[open + 1..close].trim()));
                pos = close + 1;
            }
            None => {
                // unmatched bracket: the rest is plain text
                buf.push_str(&segment[open..]);
                pos = segment.len();
                break;
            }
        }
    }

    buf.push_str(&segment[pos..]);
    if !buf.is_empty() {
        tokens.push(Token::Key(buf));
    }
}

fn classify_bracket(content: &str) -> Token {
    let digits = content.strip_prefix('-').unwrap_or(content);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(index) = content.parse::<i64>() {
            return Token::Index(index);
        }
    }
    Token::Key(content.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &[&str]) -> Vec<Token> {
        names.iter().map(|n| Token::key(*n)).collect()
    }

    #[test]
    fn test_dotted_path() {
        assert_eq!(tokenize("$params.a.b"), keys(&["params", "a", "b"]));
    }

    #[test]
    fn test_sigil_is_optional() {
        assert_eq!(tokenize("params.a"), tokenize("$params.a"));
    }

    #[test]
    fn test_bracket_indices() {
        assert_eq!(
            tokenize("$params.items[1].val"),
            vec![
                Token::key("params"),
                Token::key("items"),
                Token::Index(1),
                Token::key("val"),
            ]
        );
    }

    #[test]
    fn test_chained_and_negative_indices() {
        assert_eq!(
            tokenize("$params.grid[0][-1]"),
            vec![
                Token::key("params"),
                Token::key("grid"),
                Token::Index(0),
                Token::Index(-1),
            ]
        );
    }

    #[test]
    fn test_non_numeric_bracket_is_key() {
        assert_eq!(
            tokenize("$params.map[name]"),
            keys(&["params", "map", "name"])
        );
        assert_eq!(tokenize("$params.m[-]"), keys(&["params", "m", "-"]));
        assert_eq!(tokenize("$params.m[1a]"), keys(&["params", "m", "1a"]));
    }

    #[test]
    fn test_bracket_content_is_trimmed() {
        assert_eq!(
            tokenize("$params.items[ 2 ]"),
            vec![Token::key("params"), Token::key("items"), Token::Index(2)]
        );
    }

    #[test]
    fn test_text_after_bracket_continues_segment() {
        assert_eq!(
            tokenize("$params.a[0]b"),
            vec![
                Token::key("params"),
                Token::key("a"),
                Token::Index(0),
                Token::key("b"),
            ]
        );
    }

    #[test]
    fn test_unmatched_bracket_is_literal() {
        assert_eq!(tokenize("$params.a[0"), keys(&["params", "a", "[0"]));
        assert_eq!(tokenize("$params.[x"), keys(&["params", "[x"]));
    }

    #[test]
    fn test_empty_segments_skipped() {
        assert_eq!(tokenize("$params..a."), keys(&["params", "a"]));
        assert!(tokenize("$").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_empty_bracket_is_empty_key() {
        assert_eq!(
            tokenize("$params.a[]"),
            vec![Token::key("params"), Token::key("a"), Token::key("")]
        );
    }

    #[test]
    fn test_index_overflow_kept_as_key() {
        assert_eq!(
            tokenize("$params.a[99999999999999999999]"),
            keys(&["params", "a", "99999999999999999999"])
        );
    }

    #[test]
    fn test_is_path_expr() {
        assert!(is_path_expr("$params.a"));
        assert!(is_path_expr("  $params.a"));
        assert!(!is_path_expr("params.a"));
        assert!(!is_path_expr("cost: $5"));
    }
}
