//! SGML serializer for statement documents.
//!
//! Header fields are written as `NAME:value` lines followed by a blank line.
//! The body opens the root tag, writes every descendant indented two spaces
//! per level with no closing tags, and closes only the root.

use std::io::{self, Write};

use super::document::{Document, Node};

const INDENT: &str = "  ";

/// Write `document` to `out`.
pub fn write_document<W: Write>(document: &Document, out: &mut W) -> io::Result<()> {
    for (name, value) in &document.header {
        writeln!(out, "{}:{}", name, value)?;
    }
    writeln!(out)?;

    let root = &document.root;
    writeln!(out, "<{}>", root.tag())?;
    for child in root.children() {
        write_node(child, 1, out)?;
    }
    if let Node::Container { tag, .. } = root {
        writeln!(out, "</{}>", tag)?;
    }
    Ok(())
}

fn write_node<W: Write>(node: &Node, depth: usize, out: &mut W) -> io::Result<()> {
    let indent = INDENT.repeat(depth);
    match node {
        Node::Leaf { tag, value } => writeln!(out, "{}<{}>{}", indent, tag, value),
        Node::Container { tag, children } => {
            writeln!(out, "{}<{}>", indent, tag)?;
            for child in children {
                write_node(child, depth + 1, out)?;
            }
            Ok(())
        }
    }
}

/// Serialize `document` into a string.
pub fn render_document(document: &Document) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_document(document, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}
