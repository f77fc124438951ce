use slidedown::lexer::{BlockRule, Lexer};
use slidedown::token::Token;

fn tokenize(src: &str) -> Vec<Token> {
    Lexer::new().tokenize(src)
}

#[test]
fn styled_heading_captures_depth_text_and_attrs() {
    let tokens = tokenize("# Title {.center}");
    assert_eq!(tokens.len(), 1);
    match &tokens[0] {
        Token::StyledHeading {
            depth,
            text,
            attrs,
            tokens,
        } => {
            assert_eq!(*depth, 1);
            assert_eq!(text, "Title");
            assert_eq!(attrs, ".center");
            assert_eq!(tokens, &vec![Token::text("Title")]);
        }
        other => panic!("expected styled heading, got {other:?}"),
    }
}

#[test]
fn styled_heading_retokenizes_inline_content() {
    let tokens = tokenize("### Deep **bold** {.mark .opacity 60}");
    match &tokens[0] {
        Token::StyledHeading {
            depth,
            attrs,
            tokens,
            ..
        } => {
            assert_eq!(*depth, 3);
            assert_eq!(attrs, ".mark .opacity 60");
            assert!(matches!(&tokens[1], Token::Strong { .. }));
        }
        other => panic!("expected styled heading, got {other:?}"),
    }
}

#[test]
fn plain_heading_stays_generic() {
    let tokens = tokenize("# Title");
    assert!(matches!(&tokens[0], Token::Heading { depth: 1, .. }));
}

#[test]
fn styled_paragraph_captures_text_and_attrs() {
    let tokens = tokenize("Hello world {.accent}");
    match &tokens[0] {
        Token::StyledParagraph { text, attrs, .. } => {
            assert_eq!(text, "Hello world");
            assert_eq!(attrs, ".accent");
        }
        other => panic!("expected styled paragraph, got {other:?}"),
    }
}

#[test]
fn styled_paragraph_never_shadows_headings() {
    // `#tag` fails the heading rule (no space) and is excluded from the
    // paragraph rule, so the line is plain engine content.
    let tokens = tokenize("#tag {.x}");
    assert!(matches!(&tokens[0], Token::Paragraph { .. }));
}

#[test]
fn styled_paragraph_does_not_interrupt_a_paragraph() {
    let tokens = tokenize("line one\nline two {.x}");
    assert_eq!(tokens.len(), 1);
    assert!(matches!(&tokens[0], Token::Paragraph { .. }));
}

#[test]
fn container_holds_recursively_tokenized_body() {
    let tokens = tokenize("::: speaker\nNote here\n:::");
    match &tokens[0] {
        Token::Container { kind, tokens } => {
            assert_eq!(kind, "speaker");
            assert_eq!(tokens, &vec![Token::paragraph("Note here")]);
        }
        other => panic!("expected container, got {other:?}"),
    }
}

#[test]
fn containers_nest_via_distinct_fence_lengths() {
    let src = ":::: layout\nouter\n\n::: speaker\ninner\n:::\n::::";
    let tokens = tokenize(src);
    match &tokens[0] {
        Token::Container { kind, tokens } => {
            assert_eq!(kind, "layout");
            assert!(matches!(&tokens[0], Token::Paragraph { .. }));
            let inner = tokens
                .iter()
                .find(|t| matches!(t, Token::Container { .. }))
                .expect("inner container");
            match inner {
                Token::Container { kind, tokens } => {
                    assert_eq!(kind, "speaker");
                    assert_eq!(tokens, &vec![Token::paragraph("inner")]);
                }
                _ => unreachable!(),
            }
        }
        other => panic!("expected container, got {other:?}"),
    }
}

#[test]
fn unmatched_fence_falls_through_to_generic_handling() {
    let tokens = tokenize("::: speaker\nNote");
    assert!(tokens.iter().all(|t| !matches!(t, Token::Container { .. })));
    assert!(matches!(&tokens[0], Token::Paragraph { .. }));
}

#[test]
fn closing_fence_must_match_opening_length() {
    // A longer run does not close the shorter fence.
    let tokens = tokenize("::: speaker\nNote\n::::");
    assert!(tokens.iter().all(|t| !matches!(t, Token::Container { .. })));
}

#[test]
fn styled_span_splices_into_surrounding_text() {
    let tokens = tokenize("Use [this]{.mark} now");
    let Token::Paragraph { tokens } = &tokens[0] else {
        panic!("expected paragraph");
    };
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0], Token::text("Use "));
    match &tokens[1] {
        Token::StyledSpan {
            text,
            attrs,
            tokens,
        } => {
            assert_eq!(text, "this");
            assert_eq!(attrs, ".mark");
            assert_eq!(tokens, &vec![Token::text("this")]);
        }
        other => panic!("expected styled span, got {other:?}"),
    }
    assert_eq!(tokens[2], Token::text(" now"));
}

#[test]
fn styled_span_works_inside_emphasis() {
    let tokens = tokenize("**bold [x]{.a}**");
    let Token::Paragraph { tokens } = &tokens[0] else {
        panic!("expected paragraph");
    };
    let Token::Strong { tokens } = &tokens[0] else {
        panic!("expected strong");
    };
    assert_eq!(tokens[0], Token::text("bold "));
    assert!(matches!(&tokens[1], Token::StyledSpan { .. }));
}

#[test]
fn full_line_image_with_attrs_is_a_styled_paragraph() {
    // A lone image ending in an attribute group is claimed by the
    // block-level paragraph rule before inline folding ever runs; the
    // image inside it stays generic.
    let tokens = tokenize("![alt](img.png){.frame card}");
    match &tokens[0] {
        Token::StyledParagraph {
            text,
            attrs,
            tokens,
        } => {
            assert_eq!(text, "![alt](img.png)");
            assert_eq!(attrs, ".frame card");
            assert!(matches!(&tokens[0], Token::Image { .. }));
        }
        other => panic!("expected styled paragraph, got {other:?}"),
    }
}

#[test]
fn styled_image_takes_the_attribute_group() {
    let tokens = tokenize("See ![alt](img.png){.frame card} here");
    let Token::Paragraph { tokens } = &tokens[0] else {
        panic!("expected paragraph");
    };
    assert_eq!(tokens[0], Token::text("See "));
    assert_eq!(
        tokens[1],
        Token::StyledImage {
            alt: "alt".to_string(),
            href: "img.png".to_string(),
            attrs: ".frame card".to_string(),
        }
    );
    assert_eq!(tokens[2], Token::text(" here"));
}

#[test]
fn styled_image_keeps_trailing_text() {
    let tokens = tokenize("![a](u.png){.x} tail");
    let Token::Paragraph { tokens } = &tokens[0] else {
        panic!("expected paragraph");
    };
    assert!(matches!(&tokens[0], Token::StyledImage { .. }));
    assert_eq!(tokens[1], Token::text(" tail"));
}

#[test]
fn plain_image_stays_generic() {
    let tokens = tokenize("![alt](img.png)");
    let Token::Paragraph { tokens } = &tokens[0] else {
        panic!("expected paragraph");
    };
    assert!(matches!(&tokens[0], Token::Image { .. }));
}

#[test]
fn extensions_do_not_fire_inside_code_fences() {
    let tokens = tokenize("```\n::: speaker\n```");
    assert_eq!(tokens.len(), 1);
    match &tokens[0] {
        Token::Code { language, text } => {
            assert!(language.is_none());
            assert_eq!(text, "::: speaker\n");
        }
        other => panic!("expected code block, got {other:?}"),
    }
}

#[test]
fn fenced_code_keeps_its_language() {
    let tokens = tokenize("```rust\nfn main() {}\n```");
    match &tokens[0] {
        Token::Code { language, .. } => assert_eq!(language.as_deref(), Some("rust")),
        other => panic!("expected code block, got {other:?}"),
    }
}

#[test]
fn thematic_breaks_come_from_the_engine() {
    let tokens = tokenize("a\n\n---\n\nb");
    assert_eq!(tokens.len(), 3);
    assert!(matches!(&tokens[1], Token::Hr));
}

#[test]
fn tight_list_items_carry_inline_content() {
    let tokens = tokenize("- one\n- two [x]{.mark}");
    match &tokens[0] {
        Token::List {
            ordered, items, ..
        } => {
            assert!(!*ordered);
            assert_eq!(items.len(), 2);
            assert_eq!(items[0].tokens, vec![Token::text("one")]);
            // Inline extensions apply inside list items too.
            assert!(matches!(&items[1].tokens[1], Token::StyledSpan { .. }));
        }
        other => panic!("expected list, got {other:?}"),
    }
}

#[test]
fn ordered_lists_keep_their_start_index() {
    let tokens = tokenize("3. three\n4. four");
    match &tokens[0] {
        Token::List { ordered, start, .. } => {
            assert!(*ordered);
            assert_eq!(*start, 3);
        }
        other => panic!("expected list, got {other:?}"),
    }
}

#[test]
fn blockquotes_recurse_into_block_content() {
    let tokens = tokenize("> quoted");
    let Token::Blockquote { tokens } = &tokens[0] else {
        panic!("expected blockquote");
    };
    assert_eq!(tokens[0], Token::paragraph("quoted"));
}

struct CalloutRule;

impl BlockRule for CalloutRule {
    fn try_tokenize(
        &self,
        lexer: &Lexer,
        lines: &[&str],
        _at_boundary: bool,
    ) -> Option<(Token, usize)> {
        let rest = lines.first()?.strip_prefix("!!! ")?;
        Some((
            Token::Container {
                kind: "callout".to_string(),
                tokens: lexer.tokenize_inline(rest),
            },
            1,
        ))
    }
}

#[test]
fn custom_rules_register_on_the_lexer() {
    let mut lexer = Lexer::new();
    lexer.register_block(CalloutRule);
    let tokens = lexer.tokenize("!!! watch out");
    match &tokens[0] {
        Token::Container { kind, tokens } => {
            assert_eq!(kind, "callout");
            assert_eq!(tokens, &vec![Token::text("watch out")]);
        }
        other => panic!("expected container, got {other:?}"),
    }
}
