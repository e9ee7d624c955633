//! Rendering forests back to shortcode text

use shortcodes::{build_template, parse, render, Node, Params, RenderParams};

fn first(input: &str) -> Node {
    parse(input).unwrap().remove(0)
}

#[test]
fn test_render_nested_document() {
    let node = first(
        r#"[card title="Welcome" wide]Hello there.[list][item]one[/item][item]two[/item][/list][divider/][/card]"#,
    );

    insta::assert_snapshot!(render(&node, None, 1), @r###"
[card title="Welcome" wide=yes]
  Hello there.
  [list]
    [item]
      one
    [/item]
    [item]
      two
    [/item]
  [/list]
  [divider]
[/card]
"###);
}

#[test]
fn test_round_trip_keeps_nesting() {
    let node = first("[a][b][c/][/b]text[d x=1/][/a]");
    let reparsed = first(&render(&node, None, 1));

    // leaves come back as unclosed opens and recovery puts them back in place
    let tags = |n: &Node| -> Vec<String> {
        std::iter::once(n)
            .chain(n.descendants())
            .filter_map(|d| d.name().map(str::to_string))
            .collect()
    };
    assert_eq!(tags(&reparsed), vec!["a", "b", "c", "d"]);

    let b = reparsed
        .children()
        .iter()
        .find(|child| child.name() == Some("b"))
        .unwrap();
    assert!(b.children().iter().any(|child| child.name() == Some("c")));
    assert!(reparsed.children().iter().any(|child| child.name() == Some("d")));
    assert_eq!(
        reparsed.descendants().find(|d| d.name() == Some("d")).unwrap().params(),
        node.children()[2].params()
    );
}

#[test]
fn test_render_with_replacement_params() {
    let node = first("[button label=old][icon/][/button]");
    let params: Params = vec![("label", "new")].into_iter().collect();

    insta::assert_snapshot!(render(&node, Some(RenderParams::Map(&params)), 1), @r###"
[button label="new"]
  [icon]
[/button]
"###);
    assert_eq!(
        render(&node, Some(RenderParams::Raw(" raw=1 ")), 1),
        "[button raw=1]\n  [icon]\n[/button]\n"
    );
}

#[test]
fn test_render_at_deeper_level() {
    let node = first("[a][b/][/a]");
    assert_eq!(render(&node, None, 2), "[a]\n    [b]\n  [/a]\n");
}

#[test]
fn test_build_template_nested_slots() {
    let node = first("[page][section]{slot}[/section][/page]");
    // section fills its slot with its own text child, then page fills its slot
    // with the built section
    insta::assert_snapshot!(build_template(&node, None), @r###"
[page]
  [section]
    [section]
  {slot}

[/section]

  [/section]
[/page]
"###);
}

#[test]
fn test_build_template_params_reach_nested_parents() {
    let node = first("[a]{slot}[b]{slot}[c/][/b][/a]");
    let out = build_template(&node, Some(RenderParams::Raw("id=1")));
    // a and b have children so both render with the params; c keeps its own
    assert!(out.starts_with("[a id=1]\n"));
    assert!(out.contains("[b id=1]\n"));
    assert!(out.contains("[c]\n"));
    assert!(!out.contains("[c id=1]"));
}
