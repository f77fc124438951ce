//! The presentation assembler: frontmatter extraction, tokenization and
//! slide splitting, in that order.

pub mod error;
mod frontmatter;

pub use error::ParseError;
pub use frontmatter::PresentationMeta;

use log::debug;

use crate::Presentation;
use crate::lexer::Lexer;
use crate::splitter;

/// Compiler entry point.
///
/// Each `parse` call owns its token tree and produces a fresh
/// `Presentation`, so one `Parser` may be shared across call sites; stale
/// results from superseded reads are the caller's concern.
pub struct Parser {
    lexer: Lexer,
    file_id: usize,
}

impl Parser {
    /// `file_id` keys diagnostics into the caller's codespan file table.
    pub fn new(file_id: usize) -> Self {
        Parser {
            lexer: Lexer::new(),
            file_id,
        }
    }

    /// Compile raw document text into a presentation.
    pub fn parse(&self, source: &str) -> Result<Presentation, ParseError> {
        let (meta, content) = frontmatter::extract(source, self.file_id)?;
        let tokens = self.lexer.tokenize(content);
        let slides = splitter::split_tokens(tokens);
        debug!(
            "compiled {} slides (title: {:?}, theme: {})",
            slides.len(),
            meta.title,
            meta.theme
        );
        Ok(Presentation { meta, slides })
    }
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new(0)
    }
}

/// One-shot convenience over [`Parser`].
pub fn parse_markdown(source: &str) -> Result<Presentation, ParseError> {
    Parser::default().parse(source)
}
