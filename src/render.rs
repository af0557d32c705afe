//! Box-drawing text rendering of a subtree.
//!
//! The renderer is a strategy object held by the tree and injectable per
//! call: connector glyphs, a per-level horizontal offset, and the node label
//! function are all configuration. Output is deterministic for a given tree
//! shape and configuration.

use crate::arena::Tree;
use crate::node::{Node, NodeId};

fn display_label<D>(node: &Node<D>) -> String {
    node.to_string()
}

/// Renders a subtree as indented lines with branch connectors.
///
/// The start node's line has no prefix. Every other line is prefixed by the
/// accumulated indent of its ancestors plus a branch connector: `mid` while
/// more siblings follow at that level, `last` for the final sibling. Levels
/// below a `mid` child continue with the vertical bar, levels below a `last`
/// child with blank padding. `level_offset` adds that many spaces of extra
/// indentation per level.
#[derive(Debug, Clone)]
pub struct Renderer<D> {
    vbar: String,
    mid: String,
    last: String,
    level_offset: usize,
    label: fn(&Node<D>) -> String,
}

impl<D> Renderer<D> {
    pub fn new() -> Self {
        Self {
            vbar: "|".to_string(),
            mid: "|--".to_string(),
            last: "`--".to_string(),
            level_offset: 0,
            label: display_label::<D>,
        }
    }

    /// Replaces the connector glyphs: vertical bar, mid-sibling branch and
    /// last-sibling branch.
    pub fn with_glyphs(mut self, vbar: &str, mid: &str, last: &str) -> Self {
        self.vbar = vbar.to_string();
        self.mid = mid.to_string();
        self.last = last.to_string();
        self
    }

    /// Extra spaces of indentation added per level.
    pub fn with_level_offset(mut self, offset: usize) -> Self {
        self.level_offset = offset;
        self
    }

    /// Replaces the node label function (default: the node's `Display`
    /// form).
    pub fn with_label(mut self, label: fn(&Node<D>) -> String) -> Self {
        self.label = label;
        self
    }

    /// Renders the subtree under `start` into a multi-line string without a
    /// trailing newline.
    pub fn render(&self, tree: &Tree<D>, start: NodeId) -> String {
        let mut out = String::new();
        self.render_node(tree, start, "", "", false, &mut out);
        out
    }

    fn render_node(
        &self,
        tree: &Tree<D>,
        id: NodeId,
        level_indent: &str,
        next_level_indent: &str,
        last_child: bool,
        out: &mut String,
    ) {
        let Some(node) = tree.get_node(id) else {
            return;
        };
        if next_level_indent.is_empty() {
            out.push_str(&(self.label)(node));
        } else {
            out.push_str(level_indent);
            out.push_str(if last_child { &self.last } else { &self.mid });
            out.push(' ');
            out.push_str(&(self.label)(node));
        }

        let child_indent = format!(
            "{}{}{}",
            level_indent,
            next_level_indent,
            " ".repeat(self.level_offset)
        );
        let connector_width = self.mid.chars().count();
        let vbar_indent = format!("{}{}", self.vbar, " ".repeat(connector_width));
        let blank_indent = " ".repeat(connector_width + 1);

        let children = node.children();
        let count = children.len();
        for (i, &child) in children.iter().enumerate() {
            let is_last = i + 1 == count;
            out.push('\n');
            self.render_node(
                tree,
                child,
                &child_indent,
                if is_last { &blank_indent } else { &vbar_indent },
                is_last,
                out,
            );
        }
    }
}

impl<D> Default for Renderer<D> {
    fn default() -> Self {
        Self::new()
    }
}
