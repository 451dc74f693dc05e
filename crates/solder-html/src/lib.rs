//! solder HTML - template markup into the DOM arena
//!
//! Uses html5ever's built-in RcDom and converts the result into the arena
//! format. This is simpler and more reliable than implementing TreeSink
//! directly. Templates are parsed as full documents; the parser's
//! `<head>`/`<body>` scaffolding is peeled off and only its content lands
//! under the target node, which is what `innerHTML` assignment needs.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use solder_dom::{DomTree, NodeId};

/// Replace the content of `parent` with the parsed form of `html`
pub fn set_inner_html(tree: &mut DomTree, parent: NodeId, html: &str) {
    tree.clear_children(parent);
    append_html(tree, parent, html);
}

/// Parse `html` and append the resulting nodes under `parent`
pub fn append_html(tree: &mut DomTree, parent: NodeId, html: &str) {
    tracing::trace!(bytes = html.len(), "parsing template markup");
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .one(html.as_bytes());

    // document -> html -> head/body: the parser always synthesizes this
    // scaffolding, so lift the section content out of it
    for child in dom.document.children.borrow().iter() {
        let RcNodeData::Element { name, .. } = &child.data else {
            continue;
        };
        if name.local.as_ref() != "html" {
            continue;
        }
        for section in child.children.borrow().iter() {
            if let RcNodeData::Element { name, .. } = &section.data {
                if matches!(name.local.as_ref(), "head" | "body") {
                    for node in section.children.borrow().iter() {
                        convert_node(node, tree, parent);
                    }
                }
            }
        }
    }
}

/// Convert one RcDom node (and its subtree) into the arena under `parent`
fn convert_node(handle: &Handle, tree: &mut DomTree, parent: NodeId) {
    match &handle.data {
        RcNodeData::Text { contents } => {
            let text = contents.borrow().to_string();
            if !text.trim().is_empty() {
                let id = tree.create_text(&text);
                tree.append_child(parent, id);
            }
        }
        RcNodeData::Comment { contents } => {
            let id = tree.create_comment(&contents.to_string());
            tree.append_child(parent, id);
        }
        RcNodeData::Element { name, attrs, .. } => {
            let id = tree.create_element(name.local.as_ref());
            if let Some(elem) = tree.get_mut(id).and_then(|n| n.as_element_mut()) {
                for attr in attrs.borrow().iter() {
                    elem.attributes.set(attr.name.local.as_ref(), &attr.value);
                }
            }
            tree.append_child(parent, id);
            for child in handle.children.borrow().iter() {
                convert_node(child, tree, id);
            }
        }
        // doctype and processing instructions have no place inside a template
        _ => {}
    }
}
