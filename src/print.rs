// src/print.rs
//
// Human-readable tree diagram for operators. The child map is unordered, so
// edges are sorted before rendering to keep the output deterministic.

use std::io::{self, Write};

use crate::node::Node;

pub(crate) fn render<V, W: Write>(root: &Node<V>, out: &mut W) -> io::Result<()> {
  writeln!(out, "(r){}", marker(root))?;
  render_children(root, out, " ")
}

fn render_children<V, W: Write>(node: &Node<V>, out: &mut W, indent: &str) -> io::Result<()> {
  let mut entries: Vec<_> = node.children.iter().collect();
  entries.sort_by(|a, b| a.0.cmp(b.0));

  let last_index = entries.len().saturating_sub(1);
  for (i, (edge, child)) in entries.into_iter().enumerate() {
    let is_last = i == last_index;
    let branch = if is_last { "└──" } else { "├──" };
    writeln!(out, "{indent}{branch} {edge}{}", marker(child))?;

    let child_indent = if is_last {
      format!("{indent}    ")
    } else {
      format!("{indent}│   ")
    };
    render_children(child, out, &child_indent)?;
  }

  Ok(())
}

fn marker<V>(node: &Node<V>) -> &'static str {
  if node.payload.is_some() {
    " *"
  } else {
    ""
  }
}
