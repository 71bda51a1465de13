//! On-demand type hierarchy graph.
//!
//! Nodes are resolved types, edges are extends/implements relations. The
//! graph is populated lazily from the [`TypeIndex`] as the checker asks
//! about types, and lives for a single analysis pass; ancestor and
//! interface checks are plain reachability queries over it.

use crate::error::Result;
use crate::index::TypeIndex;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use weavecheck_api::models::TypeInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyEdge {
    /// Child class/interface -> direct superclass
    Extends,
    /// Type -> directly implemented (or extended) interface
    Implements,
}

pub struct TypeHierarchy<'a> {
    index: &'a dyn TypeIndex,
    topology: StableDiGraph<Arc<TypeInfo>, HierarchyEdge>,
    fqn_index: HashMap<String, NodeIndex>,
    /// Names this pass already failed to resolve, so we ask the index once.
    unresolved: HashSet<String>,
}

impl<'a> TypeHierarchy<'a> {
    pub fn new(index: &'a dyn TypeIndex) -> Self {
        Self {
            index,
            topology: StableDiGraph::new(),
            fqn_index: HashMap::new(),
            unresolved: HashSet::new(),
        }
    }

    /// Resolve a name and pull it, with its ancestor chain and interfaces,
    /// into the graph. `Ok(None)` when the index does not know the name;
    /// index failures propagate.
    pub fn ensure_loaded(&mut self, fqn: &str) -> Result<Option<NodeIndex>> {
        if let Some(&idx) = self.fqn_index.get(fqn) {
            return Ok(Some(idx));
        }
        if self.unresolved.contains(fqn) {
            return Ok(None);
        }

        let Some(root) = self.load_node(fqn)? else {
            return Ok(None);
        };

        // Walk the extends/implements closure breadth-first, wiring edges as
        // each neighbor resolves. Unresolvable ancestors simply truncate the
        // reachable set (conservative: less is provable about the type).
        let mut queue = VecDeque::from([root]);
        let mut seen = HashSet::from([root]);
        while let Some(idx) = queue.pop_front() {
            let info = self.topology[idx].clone();

            if let Some(sup) = info.superclass.as_deref() {
                if let Some(sup_idx) = self.load_node(sup)? {
                    self.ensure_edge(idx, sup_idx, HierarchyEdge::Extends);
                    if seen.insert(sup_idx) {
                        queue.push_back(sup_idx);
                    }
                }
            }
            for iface in &info.interfaces {
                if let Some(iface_idx) = self.load_node(iface)? {
                    self.ensure_edge(idx, iface_idx, HierarchyEdge::Implements);
                    if seen.insert(iface_idx) {
                        queue.push_back(iface_idx);
                    }
                }
            }
        }

        Ok(Some(root))
    }

    fn load_node(&mut self, fqn: &str) -> Result<Option<NodeIndex>> {
        if let Some(&idx) = self.fqn_index.get(fqn) {
            return Ok(Some(idx));
        }
        if self.unresolved.contains(fqn) {
            return Ok(None);
        }
        match self.index.resolve(fqn)? {
            Some(info) => {
                let idx = self.topology.add_node(info);
                self.fqn_index.insert(fqn.to_string(), idx);
                Ok(Some(idx))
            }
            None => {
                tracing::debug!(fqn, "type not present in index");
                self.unresolved.insert(fqn.to_string());
                Ok(None)
            }
        }
    }

    fn ensure_edge(&mut self, from: NodeIndex, to: NodeIndex, edge: HierarchyEdge) {
        let exists = self
            .topology
            .edges(from)
            .any(|e| e.target() == to && *e.weight() == edge);
        if !exists {
            self.topology.add_edge(from, to, edge);
        }
    }

    pub fn info(&self, idx: NodeIndex) -> &Arc<TypeInfo> {
        &self.topology[idx]
    }

    pub fn is_interface(&self, idx: NodeIndex) -> bool {
        self.topology[idx].is_interface()
    }

    /// Is `sup` a superclass (direct or transitive) of `sub`?
    ///
    /// Follows only extends edges; a type is not its own ancestor.
    pub fn is_ancestor(&self, sup: NodeIndex, sub: NodeIndex) -> bool {
        self.reachable(sub, sup, |e| e == HierarchyEdge::Extends)
    }

    /// Does `idx` implement the interface at `iface`, directly or through
    /// any mix of superclasses and super-interfaces?
    pub fn implements_interface(&self, idx: NodeIndex, iface: NodeIndex) -> bool {
        if !self.is_interface(iface) {
            return false;
        }
        self.reachable(idx, iface, |_| true)
    }

    fn reachable(
        &self,
        from: NodeIndex,
        to: NodeIndex,
        follow: impl Fn(HierarchyEdge) -> bool,
    ) -> bool {
        // The start node itself does not count as reached.
        let mut queue = VecDeque::from([from]);
        let mut seen = HashSet::from([from]);
        while let Some(idx) = queue.pop_front() {
            for edge in self.topology.edges(idx) {
                if !follow(*edge.weight()) {
                    continue;
                }
                let next = edge.target();
                if next == to {
                    return true;
                }
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::InMemoryTypeIndex;

    fn sample_index() -> InMemoryTypeIndex {
        InMemoryTypeIndex::new()
            .with_interface("app.Contract")
            .with_interface("app.Extended")
            .implements("app.Extended", "app.Contract")
            .with_class("app.Base", None)
            .implements("app.Base", "app.Extended")
            .with_class("app.Middle", Some("app.Base"))
            .with_class("app.Leaf", Some("app.Middle"))
            .with_class("app.Other", None)
    }

    #[test]
    fn ancestor_is_transitive_over_extends() {
        let index = sample_index();
        let mut h = TypeHierarchy::new(&index);
        let leaf = h.ensure_loaded("app.Leaf").unwrap().unwrap();
        let base = h.ensure_loaded("app.Base").unwrap().unwrap();
        let other = h.ensure_loaded("app.Other").unwrap().unwrap();

        assert!(h.is_ancestor(base, leaf));
        assert!(!h.is_ancestor(leaf, base));
        assert!(!h.is_ancestor(other, leaf));
        assert!(!h.is_ancestor(leaf, leaf));
    }

    #[test]
    fn implements_walks_superclasses_and_super_interfaces() {
        let index = sample_index();
        let mut h = TypeHierarchy::new(&index);
        let leaf = h.ensure_loaded("app.Leaf").unwrap().unwrap();
        let contract = h.ensure_loaded("app.Contract").unwrap().unwrap();
        let extended = h.ensure_loaded("app.Extended").unwrap().unwrap();

        // Leaf -> Middle -> Base -> Extended -> Contract
        assert!(h.implements_interface(leaf, extended));
        assert!(h.implements_interface(leaf, contract));
        // An interface does not implement itself
        assert!(!h.implements_interface(contract, contract));
    }

    #[test]
    fn unresolved_superclass_truncates_the_chain() {
        let index = InMemoryTypeIndex::new().with_class("app.Orphan", Some("app.Missing"));
        let mut h = TypeHierarchy::new(&index);
        let orphan = h.ensure_loaded("app.Orphan").unwrap().unwrap();
        assert!(h.ensure_loaded("app.Missing").unwrap().is_none());
        assert!(!h.is_ancestor(orphan, orphan));
    }
}
