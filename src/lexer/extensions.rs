//! The slide grammar extensions: styled heading, container, styled
//! paragraph (block level), styled image and styled span (inline level).
//!
//! Each rule receives the owning [`Lexer`] explicitly and delegates
//! recursive tokenization back into it. None of them can fail; a line or
//! text run that does not match falls through to the generic engine.

use std::sync::LazyLock;

use regex::Regex;

use crate::lexer::{BlockRule, InlineRule, Lexer};
use crate::token::Token;

/// `# Title {.center}` — one to six hashes, inline text, attribute group.
static STYLED_HEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+?)\s+\{([.&#\w\s-]+)\}$").unwrap());

/// `Some text {.accent}` — any one-line text ending in an attribute group.
static STYLED_PARAGRAPH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*\{([.&#\w\s-]+)\}$").unwrap());

/// `::: kind` — an opening fence run of three or more colons plus a label.
static CONTAINER_OPEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(:{3,}) *(\w+)$").unwrap());

/// `[text]{.accent}` — searched anywhere inside a text run.
static STYLED_SPAN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\{([.#\w\s-]+)\}").unwrap());

/// An attribute group sitting at the start of the text run that follows an
/// image.
static ATTR_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{([.#\w\s-]+)\}").unwrap());

pub struct StyledHeadingRule;

impl BlockRule for StyledHeadingRule {
    fn try_tokenize(
        &self,
        lexer: &Lexer,
        lines: &[&str],
        _at_boundary: bool,
    ) -> Option<(Token, usize)> {
        let caps = STYLED_HEADING_REGEX.captures(lines.first()?)?;
        let depth = caps[1].len() as u8;
        let text = caps[2].trim().to_string();
        let attrs = caps[3].trim().to_string();
        let tokens = lexer.tokenize_inline(&text);
        Some((
            Token::StyledHeading {
                depth,
                text,
                attrs,
                tokens,
            },
            1,
        ))
    }
}

pub struct ContainerRule;

impl BlockRule for ContainerRule {
    fn try_tokenize(
        &self,
        lexer: &Lexer,
        lines: &[&str],
        at_boundary: bool,
    ) -> Option<(Token, usize)> {
        if !at_boundary {
            return None;
        }
        let caps = CONTAINER_OPEN_REGEX.captures(lines.first()?)?;
        let fence_len = caps[1].len();
        let kind = caps[2].to_string();
        // The closing run must have exactly the opening length; a longer or
        // shorter run belongs to another nesting level. No closing line
        // means no match at all.
        let close_index = lines
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, line)| is_closing_fence(line, fence_len))?
            .0;
        let body = lines[1..close_index].join("\n");
        let tokens = lexer.tokenize(body.trim());
        Some((Token::Container { kind, tokens }, close_index + 1))
    }
}

fn is_closing_fence(line: &str, fence_len: usize) -> bool {
    let trimmed = line.trim_start_matches(' ');
    let run = trimmed.chars().take_while(|c| *c == ':').count();
    run == fence_len && trimmed.len() == run
}

pub struct StyledParagraphRule;

impl BlockRule for StyledParagraphRule {
    fn try_tokenize(
        &self,
        lexer: &Lexer,
        lines: &[&str],
        at_boundary: bool,
    ) -> Option<(Token, usize)> {
        if !at_boundary {
            return None;
        }
        let caps = STYLED_PARAGRAPH_REGEX.captures(lines.first()?)?;
        let text = caps[1].trim().to_string();
        // Never shadow styled headings or container fences.
        if text.starts_with('#') || text.starts_with(":::") {
            return None;
        }
        let attrs = caps[2].trim().to_string();
        let tokens = lexer.tokenize_inline(&text);
        Some((
            Token::StyledParagraph {
                text,
                attrs,
                tokens,
            },
            1,
        ))
    }
}

pub struct StyledImageRule;

impl InlineRule for StyledImageRule {
    fn rewrite(&self, _lexer: &Lexer, tokens: Vec<Token>) -> Vec<Token> {
        let mut out: Vec<Token> = Vec::new();
        let mut iter = tokens.into_iter().peekable();
        while let Some(token) = iter.next() {
            match token {
                Token::Image { href, title, alt } => {
                    let attr_group = match iter.peek() {
                        Some(Token::Text { text }) => ATTR_PREFIX_REGEX
                            .captures(text)
                            .map(|caps| (caps[1].trim().to_string(), caps[0].len())),
                        _ => None,
                    };
                    match attr_group {
                        Some((attrs, consumed)) => {
                            let rest = match iter.next() {
                                Some(Token::Text { text }) => text[consumed..].to_string(),
                                _ => String::new(),
                            };
                            out.push(Token::StyledImage { alt, href, attrs });
                            if !rest.is_empty() {
                                out.push(Token::Text { text: rest });
                            }
                        }
                        None => out.push(Token::Image { href, title, alt }),
                    }
                }
                other => out.push(other),
            }
        }
        out
    }
}

pub struct StyledSpanRule;

impl InlineRule for StyledSpanRule {
    fn rewrite(&self, lexer: &Lexer, tokens: Vec<Token>) -> Vec<Token> {
        let mut out: Vec<Token> = Vec::new();
        for token in tokens {
            match token {
                Token::Text { text } => splice_spans(lexer, &text, &mut out),
                other => out.push(other),
            }
        }
        out
    }
}

fn splice_spans(lexer: &Lexer, text: &str, out: &mut Vec<Token>) {
    let mut rest = text;
    while let Some(caps) = STYLED_SPAN_REGEX.captures(rest) {
        let whole = caps.get(0).unwrap();
        if whole.start() > 0 {
            out.push(Token::text(&rest[..whole.start()]));
        }
        let inner = caps[1].to_string();
        let attrs = caps[2].trim().to_string();
        let tokens = lexer.tokenize_inline(&inner);
        out.push(Token::StyledSpan {
            text: inner,
            attrs,
            tokens,
        });
        rest = &rest[whole.end()..];
    }
    if !rest.is_empty() {
        out.push(Token::text(rest));
    }
}
