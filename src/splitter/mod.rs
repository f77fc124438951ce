//! Slide splitting: partitions a flat token stream into slides at rule
//! boundaries, diverting speaker containers into the notes stream.

use log::trace;

use crate::token::Token;

/// The container kind whose children become speaker notes.
pub const SPEAKER_KIND: &str = "speaker";

/// One presentation unit. Ids are assigned sequentially from 1 in emission
/// order; `content_length` is the estimated visible character count of the
/// content tokens only.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub id: u32,
    pub content_tokens: Vec<Token>,
    pub note_tokens: Vec<Token>,
    pub content_length: usize,
}

/// Split a token stream into slides.
///
/// Single pass: a rule token flushes the accumulators (emitting a slide only
/// when at least one holds something), a `speaker` container's children go to
/// the notes accumulator, everything else goes to content. Tokens are never
/// reordered. An empty stream yields no slides; leading or consecutive rules
/// yield no empty slides; a notes-only stream still yields one slide.
pub fn split_tokens(tokens: Vec<Token>) -> Vec<Slide> {
    let mut slides: Vec<Slide> = Vec::new();
    let mut content: Vec<Token> = Vec::new();
    let mut notes: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Hr => flush(&mut slides, &mut content, &mut notes),
            Token::Container { kind, tokens } if kind == SPEAKER_KIND => notes.extend(tokens),
            other => content.push(other),
        }
    }
    flush(&mut slides, &mut content, &mut notes);

    trace!("split token stream into {} slides", slides.len());
    slides
}

fn flush(slides: &mut Vec<Slide>, content: &mut Vec<Token>, notes: &mut Vec<Token>) {
    // Blank-run tokens alone do not make a slide; without this, a blank line
    // between two rules would emit an empty one.
    let has_content = content.iter().any(|t| !matches!(t, Token::Space));
    if !has_content && notes.is_empty() {
        content.clear();
        return;
    }
    let content_tokens = std::mem::take(content);
    let note_tokens = std::mem::take(notes);
    let content_length = content_length(&content_tokens);
    slides.push(Slide {
        id: slides.len() as u32 + 1,
        content_tokens,
        note_tokens,
        content_length,
    });
}

/// Recursive character count over the text-bearing leaves of a token tree.
pub fn content_length(tokens: &[Token]) -> usize {
    let mut length = 0;
    for token in tokens {
        match token {
            Token::Text { text } | Token::Code { text, .. } | Token::CodeSpan { text } => {
                length += text.chars().count();
            }
            Token::Paragraph { tokens }
            | Token::Heading { tokens, .. }
            | Token::StyledHeading { tokens, .. }
            | Token::StyledParagraph { tokens, .. }
            | Token::StyledSpan { tokens, .. }
            | Token::Container { tokens, .. }
            | Token::Blockquote { tokens }
            | Token::Strong { tokens }
            | Token::Emphasis { tokens }
            | Token::Strikethrough { tokens }
            | Token::Link { tokens, .. } => {
                length += content_length(tokens);
            }
            Token::List { items, .. } => {
                for item in items {
                    length += content_length(&item.tokens);
                }
            }
            Token::StyledImage { .. }
            | Token::Image { .. }
            | Token::Html { .. }
            | Token::Hr
            | Token::Space
            | Token::SoftBreak
            | Token::HardBreak => {}
        }
    }
    length
}
