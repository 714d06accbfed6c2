//! Nested tree objects for hierarchical tree widgets.
//!
//! The json form follows the layout expected by d3 style tree components:
//!
//! ```json
//! [
//!   {
//!     "name": "1",
//!     "nodeSvgShape": { "shapeProps": { "fill": "#A6CEE3", "r": 10 } },
//!     "children": [ ... ]
//!   }
//! ]
//! ```
//!
//! Leaves carry no `children` key and the empty tree is an empty array.

use crate::palette::Palette;
use crate::phylogeny::{Phylogeny, Visit};
use color_eyre::eyre::{Report, Result, WrapErr};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

/// Radius of every node circle.
pub const NODE_RADIUS: u32 = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct DisplayNode {
    pub name: String,
    pub color_hint: String,
    pub children: Vec<DisplayNode>,
}

impl DisplayNode {
    pub fn new(name: &str, color_hint: &str) -> Self {
        DisplayNode {
            name: name.to_string(),
            color_hint: color_hint.to_string(),
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Every (parent, child) name pair in the subtree, pre-order.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let mut edges = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            for child in &node.children {
                edges.push((node.name.as_str(), child.name.as_str()));
            }
            stack.extend(node.children.iter().rev());
        }
        edges
    }

    /// Number of nodes in the subtree, including this one.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

impl Drop for DisplayNode {
    fn drop(&mut self) {
        // drain descendants onto a flat stack, one level at a time
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NodeSvgShape<'a> {
    shape_props: ShapeProps<'a>,
}

#[derive(Serialize)]
struct ShapeProps<'a> {
    fill: &'a str,
    r: u32,
}

impl Serialize for DisplayNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = if self.is_leaf() { 2 } else { 3 };
        let mut state = serializer.serialize_struct("DisplayNode", len)?;
        state.serialize_field("name", &self.name)?;
        let shape = NodeSvgShape {
            shape_props: ShapeProps {
                fill: &self.color_hint,
                r: NODE_RADIUS,
            },
        };
        state.serialize_field("nodeSvgShape", &shape)?;
        if self.is_leaf() {
            state.skip_field("children")?;
        } else {
            state.serialize_field("children", &self.children)?;
        }
        state.end()
    }
}

/// Build the nested display tree in pre-order, `None` for an empty phylogeny.
pub fn to_display_tree(phylogeny: &Phylogeny, palette: &Palette) -> Option<DisplayNode> {
    // nodes whose subtree is still being walked
    let mut stack: Vec<DisplayNode> = Vec::new();

    for visit in phylogeny.walk() {
        match visit {
            Visit::Enter(name) => stack.push(DisplayNode::new(name, palette.color(name))),
            Visit::Exit(_) => {
                let node = stack.pop()?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => return Some(node),
                }
            }
        }
    }

    None
}

/// Pretty json array holding the display tree, `[]` when empty.
pub fn to_json(phylogeny: &Phylogeny, palette: &Palette) -> Result<String, Report> {
    let tree: Vec<DisplayNode> = to_display_tree(phylogeny, palette).into_iter().collect();
    let output = serde_json::to_string_pretty(&tree)
        .wrap_err("Failed to serialize display tree to json.")?;
    Ok(format!("{output}\n"))
}
