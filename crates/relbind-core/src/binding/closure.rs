//! Traversals over the entity binding tree.
//!
//! Nothing is cached: every call walks the tree again and yields lazily,
//! so the cost follows the size of the hierarchy being walked.

use super::{AttributeBinding, EntityBinding, EntityBindingId, Metamodel};

/// Sub-entity bindings in depth-first pre-order: each binding precedes its
/// own sub-entity bindings. The starting binding is excluded.
#[derive(Debug, Clone)]
pub struct PreOrderSubEntityBindings<'a> {
    metamodel: &'a Metamodel,

    /// Bindings still to visit; the next one is on top.
    stack: Vec<EntityBindingId>,
}

/// Sub-entity bindings with the most derived ones first. The starting
/// binding is excluded.
///
/// For a binding with sub-entity bindings `c1..cn` (in creation order), the
/// sequence is the closure of `c1`, ..., the closure of `cn`, followed by
/// `c1..cn` themselves. Every binding therefore comes after all of its own
/// descendants, and siblings stay grouped.
#[derive(Debug, Clone)]
pub struct PostOrderSubEntityBindings<'a> {
    metamodel: &'a Metamodel,
    stack: Vec<PostOrderFrame>,
}

#[derive(Debug, Clone)]
struct PostOrderFrame {
    entity_binding: EntityBindingId,

    /// Next sub-entity binding to descend into or to yield.
    next: usize,

    /// Set once every sub-entity binding has been descended into.
    yielding: bool,
}

/// Super-entity bindings, nearest first, up to and including the root.
#[derive(Debug, Clone)]
pub struct SuperEntityBindings<'a> {
    metamodel: &'a Metamodel,
    next: Option<EntityBindingId>,
}

impl Metamodel {
    /// See [`SuperEntityBindings`].
    pub fn super_entity_bindings(&self, id: impl Into<EntityBindingId>) -> SuperEntityBindings<'_> {
        SuperEntityBindings {
            metamodel: self,
            next: self.entity_binding(id).super_entity_binding(),
        }
    }

    /// Number of bindings below `id`, at any depth.
    pub fn sub_entity_binding_closure_span(&self, id: impl Into<EntityBindingId>) -> usize {
        let sub_entity_bindings = self.entity_binding(id).direct_sub_entity_bindings();
        sub_entity_bindings.len()
            + sub_entity_bindings
                .iter()
                .map(|&sub| self.sub_entity_binding_closure_span(sub))
                .sum::<usize>()
    }

    /// See [`PreOrderSubEntityBindings`].
    pub fn pre_order_sub_entity_binding_closure(
        &self,
        id: impl Into<EntityBindingId>,
    ) -> PreOrderSubEntityBindings<'_> {
        let stack = self
            .entity_binding(id)
            .direct_sub_entity_bindings()
            .iter()
            .rev()
            .copied()
            .collect();

        PreOrderSubEntityBindings {
            metamodel: self,
            stack,
        }
    }

    /// See [`PostOrderSubEntityBindings`].
    pub fn post_order_sub_entity_binding_closure(
        &self,
        id: impl Into<EntityBindingId>,
    ) -> PostOrderSubEntityBindings<'_> {
        PostOrderSubEntityBindings {
            metamodel: self,
            stack: vec![PostOrderFrame::new(self.entity_binding(id).id())],
        }
    }

    /// Attribute bindings visible on `id`: those of the root first, then
    /// each sub-entity binding down to `id` itself.
    ///
    /// Same-named attributes declared at different levels are all yielded.
    /// Attributes bound through joined tables are not accounted for.
    pub fn attribute_binding_closure(
        &self,
        id: impl Into<EntityBindingId>,
    ) -> impl Iterator<Item = &AttributeBinding> + '_ {
        let entity_binding = self.entity_binding(id);
        let mut lineage: Vec<&EntityBinding> = self.super_entity_bindings(entity_binding).collect();
        lineage.reverse();
        lineage.push(entity_binding);

        lineage
            .into_iter()
            .flat_map(EntityBinding::attribute_bindings)
    }

    /// Number of attribute bindings [`attribute_binding_closure`] yields.
    ///
    /// [`attribute_binding_closure`]: Metamodel::attribute_binding_closure
    pub fn attribute_binding_closure_span(&self, id: impl Into<EntityBindingId>) -> usize {
        let entity_binding = self.entity_binding(id);
        entity_binding.attribute_binding_span()
            + self
                .super_entity_bindings(entity_binding)
                .map(EntityBinding::attribute_binding_span)
                .sum::<usize>()
    }

    /// Every attribute binding taking part in the polymorphic hierarchy
    /// rooted at `id`: the attribute binding closure of `id`, then the
    /// attribute bindings declared by each sub-entity binding, in pre-order.
    pub fn sub_entity_attribute_binding_closure(
        &self,
        id: impl Into<EntityBindingId>,
    ) -> impl Iterator<Item = &AttributeBinding> + '_ {
        let id = id.into();
        self.attribute_binding_closure(id).chain(
            self.pre_order_sub_entity_binding_closure(id)
                .flat_map(EntityBinding::attribute_bindings),
        )
    }
}

impl<'a> Iterator for PreOrderSubEntityBindings<'a> {
    type Item = &'a EntityBinding;

    fn next(&mut self) -> Option<&'a EntityBinding> {
        let entity_binding = self.metamodel.entity_binding(self.stack.pop()?);
        self.stack.extend(
            entity_binding
                .direct_sub_entity_bindings()
                .iter()
                .rev()
                .copied(),
        );
        Some(entity_binding)
    }
}

impl PostOrderFrame {
    fn new(entity_binding: EntityBindingId) -> Self {
        Self {
            entity_binding,
            next: 0,
            yielding: false,
        }
    }
}

impl<'a> Iterator for PostOrderSubEntityBindings<'a> {
    type Item = &'a EntityBinding;

    fn next(&mut self) -> Option<&'a EntityBinding> {
        let metamodel = self.metamodel;

        loop {
            let frame = self.stack.last_mut()?;
            let sub_entity_bindings = metamodel
                .entity_binding(frame.entity_binding)
                .direct_sub_entity_bindings();

            if !frame.yielding {
                if let Some(&sub) = sub_entity_bindings.get(frame.next) {
                    frame.next += 1;
                    self.stack.push(PostOrderFrame::new(sub));
                    continue;
                }

                frame.yielding = true;
                frame.next = 0;
            }

            if let Some(&sub) = sub_entity_bindings.get(frame.next) {
                frame.next += 1;
                return Some(metamodel.entity_binding(sub));
            }

            self.stack.pop();
        }
    }
}

impl<'a> Iterator for SuperEntityBindings<'a> {
    type Item = &'a EntityBinding;

    fn next(&mut self) -> Option<&'a EntityBinding> {
        let entity_binding = self.metamodel.entity_binding(self.next?);
        self.next = entity_binding.super_entity_binding();
        Some(entity_binding)
    }
}
