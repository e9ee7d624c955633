//! The Tokenizer facade, used the way an embedding application would

use shortcodes::shortcodes::config::{load_defaults, Loader};
use shortcodes::shortcodes::testing::assert_forest;
use shortcodes::{RenderParams, ShortcodeError, TokenKind, Tokenizer, TokenizerOptions};

#[test]
fn test_create_set_input_and_build() {
    let mut tokenizer = Tokenizer::new();
    let forest = tokenizer
        .set_input("[gallery cols=3][image src=a.png/][image src=b.png/][/gallery]")
        .unwrap()
        .build_forest()
        .unwrap();

    assert_forest(&forest).node_count(1).all_closed().node(0, |g| {
        g.open("gallery")
            .param("cols", "3")
            .child_count(2)
            .child(1, |i| {
                i.self_closing("image").param("src", "b.png");
            });
    });
}

#[test]
fn test_tokens_require_input() {
    let mut tokenizer = Tokenizer::new();
    assert!(matches!(
        tokenizer.tokens(),
        Err(ShortcodeError::InvalidInput(_))
    ));
}

#[test]
fn test_non_text_input_is_rejected() {
    let mut tokenizer = Tokenizer::new();
    let result = tokenizer.tokens_from(b"[a]\xff[/a]".as_slice());
    assert!(matches!(result, Err(ShortcodeError::InvalidInput(_))));
    assert_eq!(tokenizer.input(), None);
}

#[test]
fn test_reset_replays_same_tokens() {
    let mut tokenizer = Tokenizer::from_input("x[a]y[/a]", TokenizerOptions::default()).unwrap();
    let first = tokenizer.tokens().unwrap();
    assert!(tokenizer.tokens().unwrap().is_empty());
    let second = tokenizer.reset().tokens().unwrap();
    assert_eq!(first, second);
    assert_eq!(
        second.iter().map(|t| t.kind()).collect::<Vec<_>>(),
        vec![
            TokenKind::Text,
            TokenKind::Open,
            TokenKind::Text,
            TokenKind::Close
        ]
    );
}

#[test]
fn test_build_forest_after_reset() {
    let mut tokenizer = Tokenizer::from_input("[a/]", TokenizerOptions::default()).unwrap();
    assert_eq!(tokenizer.build_forest().unwrap().len(), 1);
    assert!(tokenizer.build_forest().unwrap().is_empty());
    assert_eq!(tokenizer.reset().build_forest().unwrap().len(), 1);
}

#[test]
fn test_options_from_config() {
    let config = Loader::new()
        .set_override("tokenizer.skip_whitespace", true)
        .unwrap()
        .build()
        .unwrap();
    let mut tokenizer = Tokenizer::with_options(config.tokenizer);
    let forest = tokenizer.build_forest_from("[a]\n\t[b/]\n[/a]").unwrap();
    assert_forest(&forest).node(0, |a| {
        a.child_names(&["b"]);
    });

    let defaults = load_defaults().unwrap();
    assert_eq!(defaults.tokenizer, TokenizerOptions::default());
}

#[test]
fn test_render_and_template_through_tokenizer() {
    let mut tokenizer = Tokenizer::new();
    let forest = tokenizer.build_forest_from("[quote by=me]{slot}[/quote]").unwrap();
    let quote = &forest[0];

    assert_eq!(
        tokenizer.render(quote, Some(RenderParams::Raw("by=you")), 1),
        "[quote by=you]\n  {slot}\n[/quote]\n"
    );
    assert_eq!(
        tokenizer.build_template(quote, None),
        "[quote by=\"me\"]\n  {slot}\n\n[/quote]\n"
    );
}
