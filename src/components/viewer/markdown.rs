//! Markdown views.
//!
//! [`render_document`] turns the source into a node tree; each node is then
//! mapped to a view through [`RENDERERS`], keyed by [`NodeKind`]. When the
//! source cannot be rendered the raw text is shown instead.

use leptos::prelude::*;
use mdshelf_core::render::{Align, LINK_REL, LINK_TARGET, Node, NodeKind};
use mdshelf_core::render_document;

use super::code_block::CodeBlockView;

stylance::import_crate_style!(css, "src/components/viewer/markdown.module.css");

#[component]
pub fn MarkdownView(source: String) -> impl IntoView {
    match render_document(&source) {
        Ok(document) => view! {
            <article class=css::markdown>{render_nodes(&document.nodes)}</article>
        }
        .into_any(),
        Err(e) => {
            log::warn!("showing raw text: {}", e);
            view! { <pre class=css::raw>{source}</pre> }.into_any()
        }
    }
}

// =============================================================================
// Lookup Table
// =============================================================================

/// Renders one node; called only with nodes of its registered kind.
pub type RenderFn = fn(&Node) -> AnyView;

/// View for every node kind.
pub const RENDERERS: &[(NodeKind, RenderFn)] = &[
    (NodeKind::Heading, heading),
    (NodeKind::Paragraph, paragraph),
    (NodeKind::BlockQuote, block_quote),
    (NodeKind::List, list),
    (NodeKind::ListItem, list_item),
    (NodeKind::TaskMarker, task_marker),
    (NodeKind::CodeBlock, code_block),
    (NodeKind::InlineCode, inline_code),
    (NodeKind::Link, link),
    (NodeKind::Image, image),
    (NodeKind::Table, table),
    (NodeKind::TableHead, table_head),
    (NodeKind::TableRow, table_row),
    (NodeKind::TableCell, table_cell),
    (NodeKind::Rule, rule),
    (NodeKind::Strong, strong),
    (NodeKind::Emphasis, emphasis),
    (NodeKind::Strikethrough, strikethrough),
    (NodeKind::Text, text),
    (NodeKind::SoftBreak, soft_break),
    (NodeKind::HardBreak, hard_break),
    (NodeKind::Html, html),
    (NodeKind::FootnoteReference, footnote_reference),
    (NodeKind::FootnoteDefinition, footnote_definition),
];

fn renderer_for(kind: NodeKind) -> Option<RenderFn> {
    RENDERERS
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, render)| *render)
}

/// View of one node; unregistered kinds degrade to their plain text.
pub fn render_node(node: &Node) -> AnyView {
    match renderer_for(node.kind()) {
        Some(render) => render(node),
        None => node.plain_text().into_any(),
    }
}

fn render_nodes(nodes: &[Node]) -> Vec<AnyView> {
    nodes.iter().map(render_node).collect()
}

fn children_of(node: &Node) -> Vec<AnyView> {
    render_nodes(node.children())
}

fn footnote_id(label: &str) -> String {
    format!("fn-{}", label)
}

// =============================================================================
// Block Renderers
// =============================================================================

fn heading(node: &Node) -> AnyView {
    let Node::Heading { level, children } = node else {
        return ().into_any();
    };
    let children = render_nodes(children);
    match *level {
        1 => view! { <h1>{children}</h1> }.into_any(),
        2 => view! { <h2>{children}</h2> }.into_any(),
        3 => view! { <h3>{children}</h3> }.into_any(),
        4 => view! { <h4>{children}</h4> }.into_any(),
        5 => view! { <h5>{children}</h5> }.into_any(),
        _ => view! { <h6>{children}</h6> }.into_any(),
    }
}

fn paragraph(node: &Node) -> AnyView {
    view! { <p>{children_of(node)}</p> }.into_any()
}

fn block_quote(node: &Node) -> AnyView {
    view! { <blockquote class=css::blockQuote>{children_of(node)}</blockquote> }.into_any()
}

fn list(node: &Node) -> AnyView {
    let Node::List { start, items } = node else {
        return ().into_any();
    };
    let items = render_nodes(items);
    match start {
        Some(start) => view! { <ol start=start.to_string()>{items}</ol> }.into_any(),
        None => view! { <ul>{items}</ul> }.into_any(),
    }
}

fn list_item(node: &Node) -> AnyView {
    let is_task = node
        .children()
        .iter()
        .any(|child| child.kind() == NodeKind::TaskMarker);
    let class = if is_task { css::taskItem } else { "" };
    view! { <li class=class>{children_of(node)}</li> }.into_any()
}

fn task_marker(node: &Node) -> AnyView {
    let checked = matches!(node, Node::TaskMarker(true));
    view! { <input type="checkbox" class=css::taskMarker disabled=true checked=checked /> }
        .into_any()
}

fn code_block(node: &Node) -> AnyView {
    let Node::CodeBlock(block) = node else {
        return ().into_any();
    };
    view! { <CodeBlockView block=block.clone() /> }.into_any()
}

fn table(node: &Node) -> AnyView {
    let (head, rows): (Vec<&Node>, Vec<&Node>) = node
        .children()
        .iter()
        .partition(|child| child.kind() == NodeKind::TableHead);
    let head: Vec<AnyView> = head.into_iter().map(render_node).collect();
    let rows: Vec<AnyView> = rows.into_iter().map(render_node).collect();
    view! {
        <div class=css::tableWrap>
            <table class=css::table>
                <thead>{head}</thead>
                <tbody>{rows}</tbody>
            </table>
        </div>
    }
    .into_any()
}

fn table_head(node: &Node) -> AnyView {
    view! { <tr>{children_of(node)}</tr> }.into_any()
}

fn table_row(node: &Node) -> AnyView {
    view! { <tr>{children_of(node)}</tr> }.into_any()
}

fn table_cell(node: &Node) -> AnyView {
    let Node::TableCell {
        header,
        align,
        children,
    } = node
    else {
        return ().into_any();
    };
    let style = align_style(*align);
    let children = render_nodes(children);
    if *header {
        view! { <th style=style>{children}</th> }.into_any()
    } else {
        view! { <td style=style>{children}</td> }.into_any()
    }
}

fn align_style(align: Align) -> String {
    align
        .css()
        .map(|value| format!("text-align: {}", value))
        .unwrap_or_default()
}

fn rule(_: &Node) -> AnyView {
    view! { <hr class=css::rule /> }.into_any()
}

fn footnote_definition(node: &Node) -> AnyView {
    let Node::FootnoteDefinition { label, children } = node else {
        return ().into_any();
    };
    let marker = label.clone();
    view! {
        <div class=css::footnote id=footnote_id(label)>
            <sup class=css::footnoteLabel>{marker}</sup>
            {render_nodes(children)}
        </div>
    }
    .into_any()
}

// =============================================================================
// Inline Renderers
// =============================================================================

fn inline_code(node: &Node) -> AnyView {
    let Node::InlineCode(code) = node else {
        return ().into_any();
    };
    view! { <code class=css::inlineCode>{code.clone()}</code> }.into_any()
}

fn link(node: &Node) -> AnyView {
    let Node::Link {
        href,
        title,
        children,
    } = node
    else {
        return ().into_any();
    };
    let title = (!title.is_empty()).then(|| title.clone());
    view! {
        <a class=css::link href=href.clone() title=title target=LINK_TARGET rel=LINK_REL>
            {render_nodes(children)}
        </a>
    }
    .into_any()
}

fn image(node: &Node) -> AnyView {
    let Node::Image { src, title, alt } = node else {
        return ().into_any();
    };
    let title = (!title.is_empty()).then(|| title.clone());
    view! { <img class=css::image src=src.clone() alt=alt.clone() title=title /> }.into_any()
}

fn strong(node: &Node) -> AnyView {
    view! { <strong>{children_of(node)}</strong> }.into_any()
}

fn emphasis(node: &Node) -> AnyView {
    view! { <em>{children_of(node)}</em> }.into_any()
}

fn strikethrough(node: &Node) -> AnyView {
    view! { <del>{children_of(node)}</del> }.into_any()
}

fn text(node: &Node) -> AnyView {
    let Node::Text(text) = node else {
        return ().into_any();
    };
    text.clone().into_any()
}

fn soft_break(_: &Node) -> AnyView {
    "\n".into_any()
}

fn hard_break(_: &Node) -> AnyView {
    view! { <br /> }.into_any()
}

// Raw HTML is shown, never interpreted.
fn html(node: &Node) -> AnyView {
    let Node::Html(source) = node else {
        return ().into_any();
    };
    view! { <code class=css::rawHtml>{source.clone()}</code> }.into_any()
}

fn footnote_reference(node: &Node) -> AnyView {
    let Node::FootnoteReference(label) = node else {
        return ().into_any();
    };
    let href = format!("#{}", footnote_id(label));
    view! {
        <sup class=css::footnoteRef>
            <a href=href>{label.clone()}</a>
        </sup>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_node_kind_has_a_renderer() {
        for kind in NodeKind::ALL {
            assert!(renderer_for(kind).is_some(), "no renderer for {:?}", kind);
        }
    }

    #[test]
    fn test_renderer_kinds_are_unique() {
        let kinds: HashSet<_> = RENDERERS.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(kinds.len(), RENDERERS.len());
    }

    #[test]
    fn test_align_style() {
        assert_eq!(align_style(Align::Center), "text-align: center");
        assert_eq!(align_style(Align::None), "");
    }

    #[test]
    fn test_footnote_anchor_matches_reference() {
        assert_eq!(footnote_id("note"), "fn-note");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount_markdown(source: &str) -> web_sys::HtmlElement {
        let host: web_sys::HtmlElement = document()
            .create_element("div")
            .unwrap()
            .unchecked_into();
        let source = source.to_string();
        mount_to(host.clone(), move || view! { <MarkdownView source=source /> }).forget();
        host
    }

    #[wasm_bindgen_test]
    fn test_link_opens_in_new_context() {
        let host = mount_markdown("[docs](https://example.com)");
        let link = host.query_selector("a").unwrap().expect("rendered link");
        assert_eq!(link.get_attribute("href").as_deref(), Some("https://example.com"));
        assert_eq!(link.get_attribute("target").as_deref(), Some("_blank"));
        assert_eq!(
            link.get_attribute("rel").as_deref(),
            Some("noopener noreferrer")
        );
    }

    #[wasm_bindgen_test]
    fn test_script_link_is_rendered_as_text() {
        let host = mount_markdown("[click](javascript:alert(1))");
        assert!(host.query_selector("a").unwrap().is_none());
        assert!(host.inner_html().contains("click"));
    }
}
