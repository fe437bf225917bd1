//! Reverse dependency graph for field propagation.
//!
//! Fields declare what they depend on; propagation needs the opposite
//! direction. [`DependencyGraph`] maps every dependency key to the fields that
//! declared it, in field-list order, and provides the two traversals the
//! resolver needs:
//!
//! - [`DependencyGraph::detect_cycles`]: three-color DFS, reports a cycle
//! - [`DependencyGraph::find_affected`]: BFS from a changed set, loop-safe on
//!   any graph
//!
//! The graph is rebuilt for every resolution and never cached.

use indexmap::{IndexMap, IndexSet};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet, VecDeque};

use crate::core::FieldError;
use crate::field::Field;

/// Color states for cycle detection using DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Node has not been visited.
    White,
    /// Node is on the active DFS path.
    Gray,
    /// Node and everything below it has been explored.
    Black,
}

/// Reverse adjacency: dependency key → keys of the fields that depend on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    dependents: IndexMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from a field list.
    ///
    /// For each field and each of its declared dependencies, the field's key is
    /// appended to that dependency's dependent list. Dependencies on keys that
    /// are not in the list are recorded like any other; nothing ever triggers
    /// them.
    pub fn from_fields<C>(fields: &[Field<C>]) -> Self {
        let mut graph = Self::new();
        for field in fields {
            for dependency in field.dependencies() {
                graph.add_dependency(field.key(), dependency);
            }
        }
        graph
    }

    /// Record that `dependent` depends on `dependency`.
    ///
    /// Repeated declarations are kept, so a field listing the same dependency
    /// twice appears twice in that dependency's list.
    pub fn add_dependency(&mut self, dependent: &str, dependency: &str) {
        self.dependents.entry(dependency.to_string()).or_default().push(dependent.to_string());
    }

    /// Fields that directly depend on `key`, in declaration order.
    #[must_use]
    pub fn dependents(&self, key: &str) -> &[String] {
        self.dependents.get(key).map_or(&[], Vec::as_slice)
    }

    /// Check if the graph is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dependents.is_empty()
    }

    /// Number of distinct dependency keys.
    #[must_use]
    pub fn dependency_count(&self) -> usize {
        self.dependents.len()
    }

    /// Total number of declared edges, duplicates included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.dependents.values().map(Vec::len).sum()
    }

    /// Detect cycles using DFS with colors.
    ///
    /// Every field is used as a DFS root (in list order) unless already
    /// visited. Walking into a dependent that is still on the active path is a
    /// cycle; the error names that dependent and renders the path that closes
    /// it. Nodes are taken off the path on return, so a diamond (two routes to
    /// the same field) is not reported.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::CircularDependency`] on the first cycle found.
    pub fn detect_cycles<C>(&self, fields: &[Field<C>]) -> Result<(), FieldError> {
        let mut colors: HashMap<&str, Color> = HashMap::new();
        let mut path: Vec<&str> = Vec::new();

        for field in fields {
            let color = colors.get(field.key()).copied().unwrap_or(Color::White);
            if color == Color::White
                && let Some(cycle) = self.dfs_visit(field.key(), &mut colors, &mut path)
            {
                let field = cycle.last().map(ToString::to_string).unwrap_or_default();
                return Err(FieldError::CircularDependency {
                    field,
                    chain: cycle.join(" → "),
                });
            }
        }

        Ok(())
    }

    /// DFS visit for cycle detection.
    ///
    /// Returns `Some(cycle_path)` if a cycle is detected, None otherwise.
    fn dfs_visit<'a>(
        &'a self,
        key: &'a str,
        colors: &mut HashMap<&'a str, Color>,
        path: &mut Vec<&'a str>,
    ) -> Option<Vec<&'a str>> {
        colors.insert(key, Color::Gray);
        path.push(key);

        for dependent in self.dependents(key) {
            match colors.get(dependent.as_str()).copied().unwrap_or(Color::White) {
                Color::Gray => {
                    // The dependent is on the path, so the slice from it onward is the cycle.
                    let start = path.iter().position(|k| *k == dependent).unwrap_or(0);
                    let mut cycle = path[start..].to_vec();
                    cycle.push(dependent.as_str());
                    return Some(cycle);
                }
                Color::White => {
                    if let Some(cycle) = self.dfs_visit(dependent, colors, path) {
                        return Some(cycle);
                    }
                }
                Color::Black => {}
            }
        }

        path.pop();
        colors.insert(key, Color::Black);
        None
    }

    /// Everything transitively downstream of `changed`, in BFS discovery order.
    ///
    /// The changed keys themselves are only included when one of them is also
    /// a dependent of another reachable key. Unknown keys simply have no
    /// dependents. Terminates on cyclic graphs.
    pub fn find_affected<S: AsRef<str>>(&self, changed: &[S]) -> IndexSet<String> {
        let mut affected = IndexSet::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = changed.iter().map(|key| key.as_ref()).collect();

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }

            for dependent in self.dependents(current) {
                affected.insert(dependent.clone());
                if !visited.contains(dependent.as_str()) {
                    queue.push_back(dependent.as_str());
                }
            }
        }

        affected
    }

    /// Evaluation order in which every field comes after all of its
    /// dependencies.
    ///
    /// Only keys of `fields` appear in the result; dependencies on unknown
    /// keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::CircularDependency`] if the fields form a cycle.
    pub fn topological_order<C>(fields: &[Field<C>]) -> Result<Vec<String>, FieldError> {
        Self::from_fields(fields).detect_cycles(fields)?;

        let mut graph: DiGraph<&str, ()> = DiGraph::new();
        let mut node_map: HashMap<&str, NodeIndex> = HashMap::new();
        for field in fields {
            node_map.entry(field.key()).or_insert_with(|| graph.add_node(field.key()));
        }
        for field in fields {
            let to = node_map[field.key()];
            for dependency in field.dependencies() {
                if let Some(&from) = node_map.get(dependency.as_str())
                    && !graph.contains_edge(from, to)
                {
                    graph.add_edge(from, to, ());
                }
            }
        }

        match toposort(&graph, None) {
            Ok(indices) => Ok(indices.into_iter().map(|idx| graph[idx].to_string()).collect()),
            Err(cycle) => {
                let key = graph[cycle.node_id()].to_string();
                Err(FieldError::CircularDependency {
                    chain: key.clone(),
                    field: key,
                })
            }
        }
    }

    /// Render the dependents of `root` as a tree.
    ///
    /// Keys seen earlier on the walk are marked instead of expanded, which
    /// also keeps cyclic graphs finite.
    #[must_use]
    pub fn to_tree_string(&self, root: &str) -> String {
        let mut result = format!("{root}\n");
        let mut visited = HashSet::new();
        visited.insert(root.to_string());
        self.build_tree_string(root, &mut result, "", &mut visited);
        result
    }

    fn build_tree_string(
        &self,
        key: &str,
        result: &mut String,
        prefix: &str,
        visited: &mut HashSet<String>,
    ) {
        let dependents = self.dependents(key);
        for (i, dependent) in dependents.iter().enumerate() {
            let is_last = i == dependents.len() - 1;
            let connector = if is_last {
                "└── "
            } else {
                "├── "
            };

            if !visited.insert(dependent.clone()) {
                result.push_str(&format!("{prefix}{connector}{dependent} (seen)\n"));
                continue;
            }
            result.push_str(&format!("{prefix}{connector}{dependent}\n"));

            let child_prefix = if is_last {
                format!("{prefix}    ")
            } else {
                format!("{prefix}│   ")
            };
            self.build_tree_string(dependent, result, &child_prefix, visited);
        }
    }
}
