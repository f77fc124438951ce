//! The tokenizer: a line-level scanner for the slide grammar extensions
//! layered over pulldown-cmark, which supplies the generic Markdown grammar.
//!
//! Extension rules register on the [`Lexer`] and take precedence over the
//! engine in registration order. Runs of lines no rule claims are handed to
//! pulldown-cmark and its event stream is folded into [`Token`] trees.

pub mod extensions;

use log::trace;
use pulldown_cmark::{
    CodeBlockKind, Event, HeadingLevel, Options, Parser as CmarkParser, Tag, TagEnd,
};

use crate::token::{ListItem, Token};

const ENGINE_OPTIONS: Options = Options::ENABLE_STRIKETHROUGH;

/// A block-level grammar extension.
///
/// Offered the remaining lines whenever the scanner sits on a line outside an
/// open code fence. On a match it returns the token and the number of lines
/// consumed. `at_boundary` is true when the line starts a new block (start of
/// input, or preceded by a blank line); rules that must not interrupt a
/// paragraph check it.
pub trait BlockRule {
    fn try_tokenize(&self, lexer: &Lexer, lines: &[&str], at_boundary: bool)
    -> Option<(Token, usize)>;
}

/// An inline-level grammar extension: rewrites one folded inline token list,
/// splicing extension tokens into it. Adjacent text runs are merged before
/// the rules run.
pub trait InlineRule {
    fn rewrite(&self, lexer: &Lexer, tokens: Vec<Token>) -> Vec<Token>;
}

pub struct Lexer {
    block_rules: Vec<Box<dyn BlockRule>>,
    inline_rules: Vec<Box<dyn InlineRule>>,
}

impl Default for Lexer {
    fn default() -> Self {
        let mut lexer = Lexer {
            block_rules: Vec::new(),
            inline_rules: Vec::new(),
        };
        lexer.register_block(extensions::StyledHeadingRule);
        lexer.register_block(extensions::ContainerRule);
        lexer.register_block(extensions::StyledParagraphRule);
        lexer.register_inline(extensions::StyledImageRule);
        lexer.register_inline(extensions::StyledSpanRule);
        lexer
    }
}

impl Lexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_block(&mut self, rule: impl BlockRule + 'static) {
        self.block_rules.push(Box::new(rule));
    }

    pub fn register_inline(&mut self, rule: impl InlineRule + 'static) {
        self.inline_rules.push(Box::new(rule));
    }

    /// Tokenize block content into a flat token sequence.
    pub fn tokenize(&self, src: &str) -> Vec<Token> {
        let lines: Vec<&str> = src.lines().collect();
        let mut out: Vec<Token> = Vec::new();
        let mut pending: Vec<&str> = Vec::new();
        // (fence char, run length) of an open ``` / ~~~ block in `pending`.
        // Extension rules never fire inside one.
        let mut open_fence: Option<(char, usize)> = None;

        let mut i = 0;
        while i < lines.len() {
            let line = lines[i];

            if let Some((ch, len)) = open_fence {
                pending.push(line);
                if closes_code_fence(line, ch, len) {
                    open_fence = None;
                }
                i += 1;
                continue;
            }
            if let Some(fence) = opens_code_fence(line) {
                pending.push(line);
                open_fence = Some(fence);
                i += 1;
                continue;
            }

            let at_boundary =
                pending.is_empty() || pending.last().is_some_and(|l| l.trim().is_empty());
            if let Some((token, consumed)) = self
                .block_rules
                .iter()
                .find_map(|rule| rule.try_tokenize(self, &lines[i..], at_boundary))
            {
                self.flush_pending(&mut pending, &mut out);
                out.push(token);
                i += consumed;
                continue;
            }

            if line.trim().is_empty() && pending.is_empty() {
                push_space(&mut out);
                i += 1;
                continue;
            }

            pending.push(line);
            i += 1;
        }
        self.flush_pending(&mut pending, &mut out);

        trace!("tokenized {} bytes into {} block tokens", src.len(), out.len());
        out
    }

    /// Tokenize inline text, e.g. the interior of a styled heading or span.
    pub fn tokenize_inline(&self, text: &str) -> Vec<Token> {
        let mut blocks = self.generic_blocks(text);
        if let [Token::Paragraph { .. }] = blocks.as_slice() {
            if let Some(Token::Paragraph { tokens }) = blocks.pop() {
                return tokens;
            }
        }
        blocks
    }

    /// Hand a generic run to pulldown-cmark and fold its events.
    fn generic_blocks(&self, src: &str) -> Vec<Token> {
        let events: Vec<Event<'_>> = CmarkParser::new_ext(src, ENGINE_OPTIONS).collect();
        let mut i = 0;
        self.fold_blocks(&events, &mut i, |_| false)
    }

    fn flush_pending(&self, pending: &mut Vec<&str>, out: &mut Vec<Token>) {
        let mut trailing_blank = false;
        while pending.last().is_some_and(|l| l.trim().is_empty()) {
            pending.pop();
            trailing_blank = true;
        }
        if !pending.is_empty() {
            let src = pending.join("\n");
            out.extend(self.generic_blocks(&src));
        }
        pending.clear();
        if trailing_blank {
            push_space(out);
        }
    }

    /// Fold block-level events until `end` matches (the end tag is consumed).
    ///
    /// Tight list items deliver inline events directly at this level; they
    /// are folded in place, so the returned sequence runs through the inline
    /// rules before it is handed back.
    fn fold_blocks(&self, events: &[Event<'_>], i: &mut usize, end: fn(&TagEnd) -> bool) -> Vec<Token> {
        let mut out: Vec<Token> = Vec::new();
        while *i < events.len() {
            match &events[*i] {
                Event::End(tag_end) if end(tag_end) => {
                    *i += 1;
                    break;
                }
                Event::Start(Tag::Paragraph) => {
                    *i += 1;
                    let tokens = self.fold_inlines(events, i, |e| matches!(e, TagEnd::Paragraph));
                    out.push(Token::Paragraph { tokens });
                }
                Event::Start(Tag::Heading { level, .. }) => {
                    let depth = heading_depth(*level);
                    *i += 1;
                    let tokens = self.fold_inlines(events, i, |e| matches!(e, TagEnd::Heading(_)));
                    out.push(Token::Heading { depth, tokens });
                }
                Event::Start(Tag::BlockQuote(_)) => {
                    *i += 1;
                    let tokens = self.fold_blocks(events, i, |e| matches!(e, TagEnd::BlockQuote(_)));
                    out.push(Token::Blockquote { tokens });
                }
                Event::Start(Tag::CodeBlock(kind)) => {
                    let language = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    *i += 1;
                    let text = collect_text_until(events, i, |e| matches!(e, TagEnd::CodeBlock));
                    out.push(Token::Code { language, text });
                }
                Event::Start(Tag::List(start)) => {
                    let ordered = start.is_some();
                    let start_index = start.unwrap_or(1);
                    *i += 1;
                    let items = self.fold_list_items(events, i);
                    out.push(Token::List {
                        ordered,
                        start: start_index,
                        items,
                    });
                }
                Event::Start(Tag::HtmlBlock) => {
                    *i += 1;
                    let text = collect_html_until(events, i, |e| matches!(e, TagEnd::HtmlBlock));
                    out.push(Token::Html { text });
                }
                Event::Rule => {
                    *i += 1;
                    out.push(Token::Hr);
                }
                // Inline events at block level: tight list item content.
                Event::Text(_)
                | Event::Code(_)
                | Event::InlineHtml(_)
                | Event::SoftBreak
                | Event::HardBreak
                | Event::Start(
                    Tag::Strong
                    | Tag::Emphasis
                    | Tag::Strikethrough
                    | Tag::Link { .. }
                    | Tag::Image { .. },
                ) => {
                    if let Some(token) = self.fold_one_inline(events, i) {
                        out.push(token);
                    }
                }
                _ => *i += 1,
            }
        }
        self.apply_inline_rules(out)
    }

    fn fold_list_items(&self, events: &[Event<'_>], i: &mut usize) -> Vec<ListItem> {
        let mut items = Vec::new();
        while *i < events.len() {
            match &events[*i] {
                Event::Start(Tag::Item) => {
                    *i += 1;
                    let tokens = self.fold_blocks(events, i, |e| matches!(e, TagEnd::Item));
                    items.push(ListItem { tokens });
                }
                Event::End(TagEnd::List(_)) => {
                    *i += 1;
                    break;
                }
                _ => *i += 1,
            }
        }
        items
    }

    /// Fold inline events until `end` matches (the end tag is consumed).
    fn fold_inlines(&self, events: &[Event<'_>], i: &mut usize, end: fn(&TagEnd) -> bool) -> Vec<Token> {
        let mut out: Vec<Token> = Vec::new();
        while *i < events.len() {
            if let Event::End(tag_end) = &events[*i] {
                if end(tag_end) {
                    *i += 1;
                    break;
                }
            }
            if let Some(token) = self.fold_one_inline(events, i) {
                out.push(token);
            }
        }
        self.apply_inline_rules(out)
    }

    /// Fold a single inline event (plus its subtree) into a token.
    fn fold_one_inline(&self, events: &[Event<'_>], i: &mut usize) -> Option<Token> {
        let token = match &events[*i] {
            Event::Text(text) => {
                *i += 1;
                Token::Text {
                    text: text.to_string(),
                }
            }
            Event::Code(text) => {
                *i += 1;
                Token::CodeSpan {
                    text: text.to_string(),
                }
            }
            Event::InlineHtml(text) => {
                *i += 1;
                Token::Html {
                    text: text.to_string(),
                }
            }
            Event::SoftBreak => {
                *i += 1;
                Token::SoftBreak
            }
            Event::HardBreak => {
                *i += 1;
                Token::HardBreak
            }
            Event::Start(Tag::Strong) => {
                *i += 1;
                let tokens = self.fold_inlines(events, i, |e| matches!(e, TagEnd::Strong));
                Token::Strong { tokens }
            }
            Event::Start(Tag::Emphasis) => {
                *i += 1;
                let tokens = self.fold_inlines(events, i, |e| matches!(e, TagEnd::Emphasis));
                Token::Emphasis { tokens }
            }
            Event::Start(Tag::Strikethrough) => {
                *i += 1;
                let tokens = self.fold_inlines(events, i, |e| matches!(e, TagEnd::Strikethrough));
                Token::Strikethrough { tokens }
            }
            Event::Start(Tag::Link { dest_url, title, .. }) => {
                let href = dest_url.to_string();
                let title = title.to_string();
                *i += 1;
                let tokens = self.fold_inlines(events, i, |e| matches!(e, TagEnd::Link));
                Token::Link {
                    href,
                    title,
                    tokens,
                }
            }
            Event::Start(Tag::Image { dest_url, title, .. }) => {
                let href = dest_url.to_string();
                let title = title.to_string();
                *i += 1;
                let alt = collect_text_until(events, i, |e| matches!(e, TagEnd::Image));
                Token::Image { href, title, alt }
            }
            _ => {
                *i += 1;
                return None;
            }
        };
        Some(token)
    }

    /// Merge adjacent text runs, then let each registered inline rule
    /// rewrite the list in registration order.
    fn apply_inline_rules(&self, tokens: Vec<Token>) -> Vec<Token> {
        let mut tokens = merge_adjacent_text(tokens);
        for rule in &self.inline_rules {
            tokens = rule.rewrite(self, tokens);
        }
        tokens
    }
}

fn merge_adjacent_text(tokens: Vec<Token>) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::new();
    for token in tokens {
        if let Token::Text { text } = &token {
            if let Some(Token::Text { text: prev }) = out.last_mut() {
                prev.push_str(text);
                continue;
            }
        }
        out.push(token);
    }
    out
}

fn push_space(out: &mut Vec<Token>) {
    if !matches!(out.last(), Some(Token::Space)) {
        out.push(Token::Space);
    }
}

fn collect_text_until(events: &[Event<'_>], i: &mut usize, end: fn(&TagEnd) -> bool) -> String {
    let mut text = String::new();
    while *i < events.len() {
        match &events[*i] {
            Event::End(tag_end) if end(tag_end) => {
                *i += 1;
                break;
            }
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            _ => {}
        }
        *i += 1;
    }
    text
}

fn collect_html_until(events: &[Event<'_>], i: &mut usize, end: fn(&TagEnd) -> bool) -> String {
    let mut text = String::new();
    while *i < events.len() {
        match &events[*i] {
            Event::End(tag_end) if end(tag_end) => {
                *i += 1;
                break;
            }
            Event::Html(t) | Event::Text(t) => text.push_str(t),
            _ => {}
        }
        *i += 1;
    }
    text
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn opens_code_fence(line: &str) -> Option<(char, usize)> {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return None;
    }
    let ch = trimmed.chars().next()?;
    if ch != '`' && ch != '~' {
        return None;
    }
    let len = trimmed.chars().take_while(|c| *c == ch).count();
    if len < 3 {
        return None;
    }
    // An info string may not contain further backticks.
    if ch == '`' && trimmed[len..].contains('`') {
        return None;
    }
    Some((ch, len))
}

fn closes_code_fence(line: &str, ch: char, len: usize) -> bool {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return false;
    }
    let run = trimmed.chars().take_while(|c| *c == ch).count();
    run >= len && trimmed[run..].trim().is_empty()
}
