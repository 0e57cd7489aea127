//! Corpus types

use mail_parser::MessageParser;
use serde::{Deserialize, Serialize};

use super::mbox::MboxMessage;

/// A text document to train on or classify
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Where the document came from (file path, mbox position)
    pub source: String,
    /// Text fed to the tokenizer
    pub text: String,
}

impl Document {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }

    /// Author name, email, title and body joined by newlines
    ///
    /// Missing or empty parts are left out.
    pub fn with_parts(
        source: impl Into<String>,
        author: Option<&str>,
        email: Option<&str>,
        title: Option<&str>,
        body: &str,
    ) -> Self {
        let text = [author, email, title, Some(body)]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        Self::new(source, text)
    }

    /// Title and body joined by a newline; an empty title is left out
    pub fn with_title(source: impl Into<String>, title: &str, body: &str) -> Self {
        Self::with_parts(source, None, None, Some(title), body)
    }

    /// Build a document from raw message bytes (headers + body)
    ///
    /// Sender, decoded subject and the first text body go into the text.
    /// Content without a header block is used as-is.
    pub fn from_message(source: impl Into<String>, content: &[u8]) -> Self {
        parse_message(source.into(), content, None)
    }

    /// Build a document from an MBOX message; the envelope sender stands in
    /// for a missing From header
    pub fn from_mbox(source: impl Into<String>, message: &MboxMessage) -> Self {
        let sender = Some(message.from.as_str()).filter(|s| !s.is_empty());
        parse_message(source.into(), &message.content, sender)
    }
}

fn parse_message(source: String, content: &[u8], envelope_sender: Option<&str>) -> Document {
    let parsed = if looks_like_headers(content) {
        MessageParser::default().parse(content)
    } else {
        None
    };

    let Some(message) = parsed else {
        let text = String::from_utf8_lossy(content);
        return Document::with_parts(source, None, envelope_sender, None, &text);
    };

    let from = message.from().and_then(|f| f.first());
    let author = from.and_then(|a| a.name());
    let email = from.and_then(|a| a.address()).or(envelope_sender);
    let body = message.body_text(0).unwrap_or_default();

    Document::with_parts(source, author, email, message.subject(), &body)
}

/// First line is a `Name: value` header
fn looks_like_headers(content: &[u8]) -> bool {
    let first = content.split(|&b| b == b'\n').next().unwrap_or_default();
    match first.iter().position(|&b| b == b':') {
        Some(colon) => colon > 0 && !first[..colon].iter().any(u8::is_ascii_whitespace),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spam::tokenize;

    #[test]
    fn test_with_title() {
        let doc = Document::with_title("topic-1", "Cheap pills", "Buy now");
        assert_eq!(doc.text, "Cheap pills\nBuy now");

        let doc = Document::with_title("post-2", "", "Just a reply");
        assert_eq!(doc.text, "Just a reply");
    }

    #[test]
    fn test_with_parts_skips_missing() {
        let doc = Document::with_parts(
            "topic-9",
            Some("bob"),
            Some("bob@pills.example"),
            None,
            "hello",
        );
        assert_eq!(doc.text, "bob\nbob@pills.example\nhello");
    }

    #[test]
    fn test_from_message_includes_sender() {
        let raw = b"From: Prize Desk <winner@lotto.example>\nSubject: You are a WINNER\nTo: b@example.com\n\nClaim your prize\n";
        let doc = Document::from_message("inbox#1", raw);

        assert_eq!(doc.source, "inbox#1");
        assert!(doc.text.starts_with("Prize Desk\nwinner@lotto.example\nYou are a WINNER\n"));
        assert!(doc.text.contains("Claim your prize"));
    }

    #[test]
    fn test_base64_body_and_encoded_subject() {
        let raw = b"From: x@y.example\nSUBJECT: =?UTF-8?B?Q2hlYXAgdmlhZ3Jh?=\nMIME-Version: 1.0\nContent-Type: text/plain; charset=utf-8\nContent-Transfer-Encoding: base64\n\nQnV5IGNoZWFwIHBpbGxzIG5vdw==\n";
        let tokens = tokenize(&Document::from_message("m", raw).text);

        for word in ["cheap", "viagra", "buy", "pills", "now"] {
            assert!(tokens.contains(&word.to_string()), "missing {} in {:?}", word, tokens);
        }
        assert!(!tokens.iter().any(|t| t.starts_with("qnv5")));
    }

    #[test]
    fn test_quoted_printable_body() {
        let raw = b"Subject: Offer\nMIME-Version: 1.0\nContent-Type: text/plain; charset=utf-8\nContent-Transfer-Encoding: quoted-printable\n\nCr=C3=A8me discount=\n today\n";
        let tokens = tokenize(&Document::from_message("m", raw).text);

        assert!(tokens.contains(&"crème".to_string()), "{:?}", tokens);
        assert!(tokens.contains(&"today".to_string()));
        assert!(!tokens.iter().any(|t| t.contains("c3")));
    }

    #[test]
    fn test_folded_subject() {
        let raw = b"Subject: Cheap\n meds today\n\nbody\n";
        let tokens = tokenize(&Document::from_message("m", raw).text);
        assert_eq!(tokens, vec!["cheap", "meds", "today", "body"]);
    }

    #[test]
    fn test_multipart_uses_text_part() {
        let raw = b"Subject: Deal\nMIME-Version: 1.0\nContent-Type: multipart/alternative; boundary=\"XYZ\"\n\n--XYZ\nContent-Type: text/plain\n\nlimited offer inside\n--XYZ\nContent-Type: text/html\n\n<p>limited offer inside</p>\n--XYZ--\n";
        let tokens = tokenize(&Document::from_message("m", raw).text);

        assert!(tokens.contains(&"limited".to_string()), "{:?}", tokens);
        assert!(!tokens.iter().any(|t| t == "xyz" || t == "p"));
    }

    #[test]
    fn test_from_message_crlf() {
        let raw = b"Subject: Lunch\r\nFrom: c@example.com\r\n\r\nNoon?";
        let tokens = tokenize(&Document::from_message("m", raw).text);
        assert_eq!(tokens, vec!["c", "example", "com", "lunch", "noon"]);
    }

    #[test]
    fn test_from_plain_text() {
        let raw = "Hello team, see notes below: agenda attached".as_bytes();
        let doc = Document::from_message("notes.txt", raw);
        assert_eq!(doc.text, "Hello team, see notes below: agenda attached");
    }

    #[test]
    fn test_from_mbox_envelope_sender() {
        let message = MboxMessage {
            from: "bulk@pharma.example".to_string(),
            content: b"Subject: Refill\n\nrefill now\n".to_vec(),
        };
        let doc = Document::from_mbox("spam.mbox#1", &message);
        assert!(doc.text.starts_with("bulk@pharma.example\nRefill\n"));

        let plain = MboxMessage {
            from: "a@b.example".to_string(),
            content: b"no headers here\n".to_vec(),
        };
        assert_eq!(
            Document::from_mbox("x", &plain).text,
            "a@b.example\nno headers here\n"
        );
    }

    #[test]
    fn test_from_invalid_utf8() {
        let doc = Document::from_message("bad", b"caf\xff menu");
        assert!(doc.text.starts_with("caf"));
        assert!(doc.text.ends_with(" menu"));
    }
}
