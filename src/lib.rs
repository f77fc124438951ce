pub mod attrs;
pub mod layout;
pub mod lexer;
pub mod parser;
pub mod splitter;
pub mod token;

pub use parser::{ParseError, Parser, PresentationMeta, parse_markdown};
pub use splitter::Slide;
pub use token::Token;

/// A compiled presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    /// Frontmatter metadata (title, theme, mode, aspect ratio, font size,
    /// plus arbitrary extras).
    pub meta: PresentationMeta,
    /// Slides in document order; ids strictly increase by 1 from 1.
    pub slides: Vec<Slide>,
}
