pub mod display;
pub mod newick;

use crate::palette::Palette;
use clap::ValueEnum;
use color_eyre::eyre::{Report, Result, WrapErr};
use itertools::Itertools;
use log::{debug, info, warn};
use petgraph::algo::toposort;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{Graph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use strum::EnumIter;
use thiserror::Error;

/// Placeholder length written on every edge, clone trees carry no distances.
pub const DEFAULT_DISTANCE: f64 = 0.1;

// ----------------------------------------------------------------------------
// Edge

/// One ancestor clone giving rise to one descendant clone.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub ancestor_clone: String,
    pub descendant_clone: String,
}

impl Edge {
    pub fn new(ancestor_clone: &str, descendant_clone: &str) -> Self {
        Edge {
            ancestor_clone: ancestor_clone.to_string(),
            descendant_clone: descendant_clone.to_string(),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.ancestor_clone, self.descendant_clone)
    }
}

/// Ancestor clone to the edges leaving it, in input order.
pub type AdjacencyIndex = HashMap<String, Vec<Edge>>;

// ----------------------------------------------------------------------------
// Errors

/// Structural problems that prevent a single rooted tree from being built.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TreeError {
    #[error("Poorly defined tree, multiple roots were identified: {first}, {second}")]
    AmbiguousRoot { first: String, second: String },
    #[error("Clone {clone} has multiple ancestors: {first}, {second}")]
    MultipleParents {
        clone: String,
        first: String,
        second: String,
    },
    #[error("Clone {clone} is its own ancestor")]
    CyclicInput { clone: String },
}

// ----------------------------------------------------------------------------
// Export Format

#[derive(
    Clone, Copy, Debug, Deserialize, EnumIter, Eq, Hash, PartialEq, Serialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Newick,
    Dot,
}

impl ExportFormat {
    pub fn extension(&self) -> String {
        match self {
            ExportFormat::Json => String::from("json"),
            ExportFormat::Newick => String::from("nwk"),
            ExportFormat::Dot => String::from("dot"),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Newick => write!(f, "newick"),
            ExportFormat::Dot => write!(f, "dot"),
        }
    }
}

// ----------------------------------------------------------------------------
// Phylogeny

/// A reconstructed clone tree, either empty or rooted at a single clone.
#[derive(Clone, Debug)]
pub struct Phylogeny {
    pub graph: Graph<String, f64>,
    pub lookup: HashMap<String, NodeIndex>,
    root: Option<String>,
    adjacency: AdjacencyIndex,
}

impl Default for Phylogeny {
    fn default() -> Self {
        Self::new()
    }
}

impl Phylogeny {
    pub fn new() -> Self {
        Phylogeny {
            graph: Graph::new(),
            lookup: HashMap::new(),
            root: None,
            adjacency: HashMap::new(),
        }
    }

    /// Reconstruct the rooted tree implied by parent-child clone edges.
    ///
    /// Sibling order follows the first occurrence of each edge in `edges`.
    /// An empty edge list gives an empty phylogeny, not an error. Exact
    /// duplicate edges are collapsed.
    ///
    /// # Errors
    ///
    /// * [`TreeError::AmbiguousRoot`] if two different clones have no ancestor.
    /// * [`TreeError::CyclicInput`] if the ancestor relation loops back on itself.
    /// * [`TreeError::MultipleParents`] if a clone descends from two clones
    ///   without forming a loop.
    pub fn reconstruct(edges: &[Edge]) -> Result<Phylogeny, TreeError> {
        let mut phylogeny = Phylogeny::new();
        if edges.is_empty() {
            debug!("No clone edges were provided, phylogeny is empty.");
            return Ok(phylogeny);
        }

        let unique = edges.iter().unique().collect_vec();
        if unique.len() < edges.len() {
            warn!("Ignoring {} duplicate clone edge(s).", edges.len() - unique.len());
        }

        // ------------------------------------------------------------------------
        // Adjacency

        for edge in &unique {
            phylogeny
                .adjacency
                .entry(edge.ancestor_clone.clone())
                .or_default()
                .push((*edge).clone());
        }

        // ------------------------------------------------------------------------
        // Root

        let descendants: HashSet<&str> =
            edges.iter().map(|e| e.descendant_clone.as_str()).collect();

        let mut root: Option<&str> = None;
        for edge in edges {
            let ancestor = edge.ancestor_clone.as_str();
            if descendants.contains(ancestor) {
                continue;
            }
            match root {
                Some(first) if first != ancestor => {
                    return Err(TreeError::AmbiguousRoot {
                        first: first.to_string(),
                        second: ancestor.to_string(),
                    })
                }
                _ => root = Some(ancestor),
            }
        }

        // every ancestor is also somebody's descendant, so the edges loop
        let Some(root) = root else {
            return Err(TreeError::CyclicInput {
                clone: edges[0].ancestor_clone.clone(),
            });
        };
        debug!("Identified root clone: {root}");

        // ------------------------------------------------------------------------
        // Construct Graph

        for edge in &unique {
            let ancestor_id = phylogeny.add_node(&edge.ancestor_clone);
            let descendant_id = phylogeny.add_node(&edge.descendant_clone);
            phylogeny.graph.add_edge(ancestor_id, descendant_id, DEFAULT_DISTANCE);
        }

        // loops below the root or detached from it, before the parent check
        if let Err(cycle) = toposort(&phylogeny.graph, None) {
            return Err(TreeError::CyclicInput {
                clone: phylogeny.graph[cycle.node_id()].clone(),
            });
        }

        // ------------------------------------------------------------------------
        // Parents

        let mut parents: HashMap<&str, &str> = HashMap::new();
        for edge in &unique {
            let clone = edge.descendant_clone.as_str();
            let ancestor = edge.ancestor_clone.as_str();
            if let Some(first) = parents.insert(clone, ancestor) {
                return Err(TreeError::MultipleParents {
                    clone: clone.to_string(),
                    first: first.to_string(),
                    second: ancestor.to_string(),
                });
            }
        }

        phylogeny.root = Some(root.to_string());
        Ok(phylogeny)
    }

    fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(node) = self.lookup.get(name) {
            return *node;
        }
        let node = self.graph.add_node(name.to_string());
        self.lookup.insert(name.to_string(), node);
        node
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of distinct clones in the tree.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn adjacency(&self) -> &AdjacencyIndex {
        &self.adjacency
    }

    /// Edges leaving `name` in sibling order, empty for leaves.
    pub fn children(&self, name: &str) -> &[Edge] {
        self.adjacency.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_leaf(&self, name: &str) -> bool {
        self.children(name).is_empty()
    }

    pub fn get_node(&self, name: &str) -> Option<NodeIndex> {
        self.lookup.get(name).copied()
    }

    /// Depth-first walk from the root, see [`Visit`].
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            phylogeny: self,
            stack: Vec::new(),
            pending_root: self.root(),
        }
    }

    /// Graphviz representation, laid out left to right.
    pub fn to_dot(&self) -> String {
        let output = format!("{}", Dot::with_config(&self.graph, &[Config::EdgeNoLabel]));
        // set horizontal (Left to Right) format for tree-like visualizer
        str::replace(&output, "digraph {", "digraph {\n    rankdir=\"LR\";")
    }

    /// Write the phylogeny to `<output_dir>/<prefix>.<ext>`.
    pub fn export(
        &self,
        output_dir: &Path,
        prefix: &str,
        format: ExportFormat,
        palette: &Palette,
    ) -> Result<PathBuf, Report> {
        let output_path = output_dir.join(format!("{prefix}.{}", format.extension()));
        info!("Exporting phylogeny to {format}: {output_path:?}");

        let output = match format {
            ExportFormat::Json => display::to_json(self, palette)?,
            ExportFormat::Newick => format!("{}\n", newick::to_newick(self)),
            ExportFormat::Dot => self.to_dot(),
        };

        std::fs::write(&output_path, output)
            .wrap_err_with(|| format!("Failed to write phylogeny to {output_path:?}"))?;

        Ok(output_path)
    }
}

// ----------------------------------------------------------------------------
// Walk

/// Event emitted by [`Phylogeny::walk`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Visit<'a> {
    /// First arrival at a clone, before any of its children.
    Enter(&'a str),
    /// Departure from a clone, after all of its children.
    Exit(&'a str),
}

/// Iterative depth-first walk, the call stack stays flat however deep the tree.
pub struct Walk<'a> {
    phylogeny: &'a Phylogeny,
    stack: Vec<(&'a str, usize)>,
    pending_root: Option<&'a str>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.pending_root.take() {
            self.stack.push((root, 0));
            return Some(Visit::Enter(root));
        }

        let phylogeny: &'a Phylogeny = self.phylogeny;
        let (name, next_child) = self.stack.last_mut()?;
        let name: &'a str = *name;

        match phylogeny.children(name).get(*next_child) {
            Some(edge) => {
                *next_child += 1;
                let child = edge.descendant_clone.as_str();
                self.stack.push((child, 0));
                Some(Visit::Enter(child))
            }
            None => {
                self.stack.pop();
                Some(Visit::Exit(name))
            }
        }
    }
}
