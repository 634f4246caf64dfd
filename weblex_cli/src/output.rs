//! Token and score printers

use crate::catalog::Language;
use serde::Serialize;
use std::io::{self, Write};
use weblex_engine::{Category, Token};
use weblex_lexers::{ResolvedStyle, StyleSheet};

/// One `Token.<path>\t<quoted text>` line per token
pub fn write_raw<W: Write>(out: &mut W, tokens: &[Token<'_>]) -> io::Result<()> {
    for token in tokens {
        writeln!(out, "{}\t{:?}", token.category, token.text)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct StyledToken<'a> {
    offset: usize,
    category: Category,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<ResolvedStyle>,
}

/// Pretty JSON array of tokens; each carries its resolved style when a sheet is given
pub fn write_json<W: Write>(
    out: &mut W,
    tokens: &[Token<'_>],
    style: Option<&StyleSheet>,
) -> serde_json::Result<()> {
    let styled: Vec<StyledToken<'_>> = tokens
        .iter()
        .map(|token| StyledToken {
            offset: token.offset,
            category: token.category,
            text: token.text,
            style: style.map(|sheet| sheet.resolve(token.category)),
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &styled)?;
    writeln!(out).map_err(serde_json::Error::io)
}

/// Content scores, highest first
pub fn write_scores<W: Write>(out: &mut W, scores: &[(&Language, f32)]) -> io::Result<()> {
    let mut ranked = scores.to_vec();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    for (language, score) in ranked {
        writeln!(out, "{:.2}\t{}", score, language.name())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn sample() -> Vec<Token<'static>> {
        vec![
            Token::new(0, Category::Keyword, "var"),
            Token::new(3, Category::Text, " "),
            Token::new(4, Category::StringDouble, "\"a\\n\""),
        ]
    }

    #[test]
    fn test_raw_lines() {
        let mut out = Vec::new();
        write_raw(&mut out, &sample()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Token.Keyword\t\"var\"");
        assert_eq!(lines[1], "Token.Text\t\" \"");
        assert_eq!(lines[2], "Token.String.Double\t\"\\\"a\\\\n\\\"\"");
    }

    #[test]
    fn test_json_with_style() {
        let sheet = weblex_lexers::styles::murphy().unwrap();
        let mut out = Vec::new();
        write_json(&mut out, &sample(), Some(&sheet)).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["category"], "Keyword");
        assert_eq!(value[0]["style"]["color"], "228899");
        assert_eq!(value[0]["style"]["bold"], true);
        assert_eq!(value[2]["offset"], 4);
        assert_eq!(value[2]["style"]["bgcolor"], "e0e0ff");
    }

    #[test]
    fn test_json_without_style() {
        let mut out = Vec::new();
        write_json(&mut out, &sample(), None).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(value[1].get("style").is_none());
        assert_eq!(value[1]["text"], " ");
    }

    #[test]
    fn test_scores_sorted() {
        let scores = catalog::scores("<?php echo 1; ?>");
        let mut out = Vec::new();
        write_scores(&mut out, &scores).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().next().unwrap().ends_with("\tPHP"));
        assert_eq!(text.lines().count(), catalog::LANGUAGES.len());
    }
}
