/// A single token in the slide document tree.
///
/// Composite kinds own their children; a token belongs to exactly one slide
/// and is never shared. The `attrs` fields on the styled kinds carry the raw
/// attribute text from inside the `{ ... }` braces; consumers normalize it
/// with [`crate::attrs::attrs_to_class`] when emitting class attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Block-level
    /// Plain paragraph, children are inline tokens.
    Paragraph { tokens: Vec<Token> },
    /// ATX heading, `depth` 1-6.
    Heading { depth: u8, tokens: Vec<Token> },
    /// `# Title {.center}` — heading with an attribute list.
    StyledHeading {
        depth: u8,
        text: String,
        attrs: String,
        tokens: Vec<Token>,
    },
    /// `Some text {.accent}` — one-line paragraph with an attribute list.
    StyledParagraph {
        text: String,
        attrs: String,
        tokens: Vec<Token>,
    },
    /// `::: kind` fenced container; `kind == "speaker"` marks notes.
    Container { kind: String, tokens: Vec<Token> },
    /// Fenced or indented code block.
    Code {
        language: Option<String>,
        text: String,
    },
    Blockquote { tokens: Vec<Token> },
    List {
        ordered: bool,
        start: u64,
        items: Vec<ListItem>,
    },
    /// Thematic break; the slide boundary marker.
    Hr,
    /// A blank-line run between blocks.
    Space,
    /// Raw block-level HTML, passed through untouched.
    Html { text: String },

    // Inline
    Text { text: String },
    /// `[text]{.accent}` — classed inline wrapper.
    StyledSpan {
        text: String,
        attrs: String,
        tokens: Vec<Token>,
    },
    /// `![alt](href){.frame}` — image with an attribute list.
    StyledImage {
        alt: String,
        href: String,
        attrs: String,
    },
    Strong { tokens: Vec<Token> },
    Emphasis { tokens: Vec<Token> },
    Strikethrough { tokens: Vec<Token> },
    CodeSpan { text: String },
    Link {
        href: String,
        title: String,
        tokens: Vec<Token>,
    },
    Image {
        href: String,
        title: String,
        alt: String,
    },
    SoftBreak,
    HardBreak,
}

/// One item of a [`Token::List`]; holds the item's block content.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub tokens: Vec<Token>,
}

impl Token {
    pub fn text(text: impl Into<String>) -> Self {
        Token::Text { text: text.into() }
    }

    /// Convenience for building a plain paragraph over a single text run.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Token::Paragraph {
            tokens: vec![Token::text(text)],
        }
    }
}
