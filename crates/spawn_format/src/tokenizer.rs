//! Line tokenizers for the catalog and spawn files.

/// Split a catalog line into tokens.
///
/// Whitespace separates tokens except inside double quotes. Quote characters
/// toggle the in-quotes flag and are never part of a token. A closing quote
/// ends the current token; an opening quote does not, so `ab"cd"` is one
/// token `abcd`. Empty quoted segments produce no token.
pub fn tokenize_catalog_line(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.trim().chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
            if !in_quotes && !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.push(ch);
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Content of the first `"..."` pair in a raw line.
pub fn first_quoted(line: &str) -> Option<&str> {
    let start = line.find('"')? + 1;
    let len = line[start..].find('"')?;
    Some(&line[start..start + len])
}

/// Parse a token made only of ASCII digits.
///
/// Signs, spaces and empty tokens are rejected.
pub fn parse_digits(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Split a spawn record into data tokens, dropping a trailing `//comment`.
pub fn record_tokens(line: &str) -> Vec<&str> {
    let data = match line.find("//") {
        Some(pos) => &line[..pos],
        None => line,
    };
    data.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_name_is_one_token() {
        let tokens = tokenize_catalog_line(r#"7  1  "Bull Fighter"  6  100"#);
        assert_eq!(tokens, vec!["7", "1", "Bull Fighter", "6", "100"]);
    }

    #[test]
    fn test_empty_quotes_produce_nothing() {
        let tokens = tokenize_catalog_line(r#"1 "" 2"#);
        assert_eq!(tokens, vec!["1", "2"]);
    }

    #[test]
    fn test_opening_quote_does_not_split() {
        let tokens = tokenize_catalog_line(r#"ab"cd" ef"#);
        assert_eq!(tokens, vec!["abcd", "ef"]);
    }

    #[test]
    fn test_tabs_separate_tokens() {
        let tokens = tokenize_catalog_line("1\t2\t\"a b\"");
        assert_eq!(tokens, vec!["1", "2", "a b"]);
    }

    #[test]
    fn test_first_quoted() {
        assert_eq!(first_quoted(r#"3 1 "Spider" 2"#), Some("Spider"));
        assert_eq!(first_quoted(r#"3 1 "" 2"#), Some(""));
        assert_eq!(first_quoted("3 1 Spider"), None);
        assert_eq!(first_quoted(r#"3 "open"#), None);
    }

    #[test]
    fn test_parse_digits() {
        assert_eq!(parse_digits("42"), Some(42));
        assert_eq!(parse_digits("-1"), None);
        assert_eq!(parse_digits("+1"), None);
        assert_eq!(parse_digits(""), None);
        assert_eq!(parse_digits("1.5"), None);
    }

    #[test]
    fn test_record_tokens_strip_comment() {
        let tokens = record_tokens("7  3  20  100  120  -1  //Bull Fighter");
        assert_eq!(tokens, vec!["7", "3", "20", "100", "120", "-1"]);
    }
}
