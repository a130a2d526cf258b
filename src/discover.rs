// CLASSIFICATION: COMMUNITY
// Filename: discover.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Reference-graph traversal over option-bearing types and instances.
//!
//! Both traversals are breadth-first from the roots. Types are deduplicated
//! by `TypeId`; instances by address and type, so an instance that hands
//! itself back from [`OptionTarget::references`] is visited only once.

use std::any::TypeId;
use std::collections::{HashSet, VecDeque};

use log::debug;

use crate::target::{identity, OptionTarget, TargetClass};

/// All types reachable from `roots`, roots first, in traversal order.
pub fn discover_classes(roots: &[TargetClass]) -> Vec<TargetClass> {
    let mut seen = HashSet::new();
    let mut classes = Vec::new();
    let mut queue = VecDeque::new();
    for root in roots {
        if seen.insert(root.id()) {
            classes.push(*root);
            queue.push_back(*root);
        }
    }
    while let Some(class) = queue.pop_front() {
        for linked in class.declarations().references {
            if seen.insert(linked.id()) {
                debug!("adding {} referenced from {}", linked.name(), class.name());
                classes.push(linked);
                queue.push_back(linked);
            }
        }
    }
    classes
}

type InstanceKey = (usize, TypeId);

fn instance_key(target: &dyn OptionTarget) -> InstanceKey {
    let addr = std::ptr::from_ref(target).cast::<()>() as usize;
    (addr, identity(target))
}

/// Live instances reachable from a set of root targets.
///
/// The graph is walked on demand because nested instances are reached
/// through `&mut` borrows of their owners and cannot be held side by side.
pub struct TargetGraph<'g, 'o> {
    roots: &'g mut [&'o mut dyn OptionTarget],
}

impl<'g, 'o> TargetGraph<'g, 'o> {
    /// Graph rooted at `roots`.
    pub fn new(roots: &'g mut [&'o mut dyn OptionTarget]) -> Self {
        Self { roots }
    }

    /// Visit every distinct instance once, in breadth-first order.
    pub fn visit<E, F>(&mut self, mut visitor: F) -> Result<(), E>
    where
        F: FnMut(&mut dyn OptionTarget) -> Result<(), E>,
    {
        let mut visited = HashSet::new();
        let mut queue: VecDeque<&mut dyn OptionTarget> = VecDeque::new();
        for root in self.roots.iter_mut() {
            queue.push_back(&mut **root);
        }
        while let Some(node) = queue.pop_front() {
            if !visited.insert(instance_key(node)) {
                continue;
            }
            visitor(&mut *node)?;
            queue.extend(node.references());
        }
        Ok(())
    }

    /// First instance, in traversal order, whose concrete type is `id`.
    pub fn find(&mut self, id: TypeId) -> Option<&mut dyn OptionTarget> {
        let mut visited = HashSet::new();
        let mut queue: VecDeque<&mut dyn OptionTarget> = VecDeque::new();
        for root in self.roots.iter_mut() {
            queue.push_back(&mut **root);
        }
        while let Some(node) = queue.pop_front() {
            if !visited.insert(instance_key(node)) {
                continue;
            }
            if identity(node) == id {
                return Some(node);
            }
            queue.extend(node.references());
        }
        None
    }

    /// Concrete types of every distinct instance, in traversal order.
    #[cfg(test)]
    pub(crate) fn types(&mut self) -> Vec<TypeId> {
        let mut types = Vec::new();
        let _ = self.visit::<(), _>(|node| {
            types.push(identity(node));
            Ok(())
        });
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Descriptor;
    use crate::target::OptionSet;

    #[derive(Default)]
    struct Leaf {
        hits: u32,
    }

    impl OptionTarget for Leaf {
        fn declare(set: &mut OptionSet<Self>) {
            set.flag(Descriptor::new().short('l'), |l| l.hits += 1);
        }
    }

    #[derive(Default)]
    struct Branch {
        leaf: Leaf,
    }

    impl OptionTarget for Branch {
        fn declare(set: &mut OptionSet<Self>) {
            set.reference::<Leaf>();
        }

        fn references(&mut self) -> Vec<&mut dyn OptionTarget> {
            vec![&mut self.leaf as &mut dyn OptionTarget]
        }
    }

    #[derive(Default)]
    struct Trunk {
        left: Branch,
        right: Branch,
        leaf: Leaf,
    }

    impl OptionTarget for Trunk {
        fn declare(set: &mut OptionSet<Self>) {
            set.reference::<Branch>()
                .reference::<Branch>()
                .reference::<Leaf>()
                .reference::<Trunk>();
        }

        fn references(&mut self) -> Vec<&mut dyn OptionTarget> {
            vec![
                &mut self.left as &mut dyn OptionTarget,
                &mut self.right,
                &mut self.leaf,
            ]
        }
    }

    /// Hands itself back as a reference.
    #[derive(Default)]
    struct Mirror;

    impl OptionTarget for Mirror {
        fn declare(set: &mut OptionSet<Self>) {
            set.reference::<Mirror>();
        }

        fn references(&mut self) -> Vec<&mut dyn OptionTarget> {
            vec![self as &mut dyn OptionTarget]
        }
    }

    #[test]
    fn classes_are_deduplicated_in_breadth_first_order() {
        let classes = discover_classes(&[TargetClass::of::<Trunk>(), TargetClass::of::<Trunk>()]);
        assert_eq!(
            classes,
            vec![
                TargetClass::of::<Trunk>(),
                TargetClass::of::<Branch>(),
                TargetClass::of::<Leaf>(),
            ]
        );
    }

    #[test]
    fn class_cycles_terminate() {
        let classes = discover_classes(&[TargetClass::of::<Mirror>()]);
        assert_eq!(classes, vec![TargetClass::of::<Mirror>()]);
    }

    #[test]
    fn instances_are_walked_breadth_first() {
        let mut trunk = Trunk::default();
        let mut roots = [&mut trunk as &mut dyn OptionTarget];
        let mut graph = TargetGraph::new(&mut roots);
        assert_eq!(
            graph.types(),
            vec![
                TypeId::of::<Trunk>(),
                TypeId::of::<Branch>(),
                TypeId::of::<Branch>(),
                TypeId::of::<Leaf>(),
                TypeId::of::<Leaf>(),
                TypeId::of::<Leaf>(),
            ]
        );
    }

    #[test]
    fn find_returns_first_match_in_traversal_order() {
        let mut trunk = Trunk::default();
        {
            let mut roots = [&mut trunk as &mut dyn OptionTarget];
            let mut graph = TargetGraph::new(&mut roots);
            let leaf = graph.find(TypeId::of::<Leaf>()).unwrap();
            crate::target::as_any_mut(leaf)
                .downcast_mut::<Leaf>()
                .unwrap()
                .hits += 1;
        }
        assert_eq!(trunk.leaf.hits, 1);
        assert_eq!(trunk.left.leaf.hits, 0);
    }

    #[test]
    fn self_reference_is_visited_once() {
        let mut mirror = Mirror;
        let mut roots = [&mut mirror as &mut dyn OptionTarget];
        let mut graph = TargetGraph::new(&mut roots);
        assert_eq!(graph.types(), vec![TypeId::of::<Mirror>()]);
        assert!(graph.find(TypeId::of::<Leaf>()).is_none());
    }
}
