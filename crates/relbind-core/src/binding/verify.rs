use super::{AttributeBinding, AttributeBindingId, EntityBinding, EntityBindingId, Metamodel};
use crate::{Error, Result};

struct Verify<'a> {
    metamodel: &'a Metamodel,
}

impl Metamodel {
    /// Checks the structural invariants of the binding graph.
    ///
    /// Fails on the first broken link: a sub-entity binding missing from its
    /// parent (or listed twice), a binding outside its parent's hierarchy, or
    /// an attribute binding reference that does not resolve.
    pub fn verify(&self) -> Result<()> {
        Verify { metamodel: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        for entity_binding in self.metamodel.entity_bindings() {
            self.verify_super_entity_link(entity_binding)?;
            self.verify_sub_entity_links(entity_binding)?;

            for attribute_binding in entity_binding.attribute_bindings() {
                self.verify_attribute_binding(attribute_binding)?;
            }
        }

        self.verify_hierarchies()
    }

    fn verify_super_entity_link(&self, entity_binding: &EntityBinding) -> Result<()> {
        let Some(super_id) = entity_binding.super_entity_binding() else {
            return Ok(());
        };

        let super_entity_binding = self.entity_binding(super_id, entity_binding)?;

        let occurrences = super_entity_binding
            .direct_sub_entity_bindings()
            .iter()
            .filter(|&&sub| sub == entity_binding.id())
            .count();

        if occurrences != 1 {
            return Err(Error::internal_consistency(format!(
                "{entity_binding} appears {occurrences} times among the sub-entity bindings of {super_entity_binding}"
            )));
        }

        if super_entity_binding.hierarchy() != entity_binding.hierarchy() {
            return Err(Error::internal_consistency(format!(
                "{entity_binding} is not in the hierarchy of its super-entity binding {super_entity_binding}"
            )));
        }

        Ok(())
    }

    fn verify_sub_entity_links(&self, entity_binding: &EntityBinding) -> Result<()> {
        for &sub in entity_binding.direct_sub_entity_bindings() {
            let sub_entity_binding = self.entity_binding(sub, entity_binding)?;

            if sub_entity_binding.super_entity_binding() != Some(entity_binding.id()) {
                return Err(Error::internal_consistency(format!(
                    "{sub_entity_binding} is listed as a sub-entity binding of {entity_binding}, which is not its super-entity binding"
                )));
            }
        }

        Ok(())
    }

    fn verify_hierarchies(&self) -> Result<()> {
        for hierarchy in self.metamodel.hierarchies() {
            let root_id = hierarchy.root_entity_binding();
            let Some(root) = self.metamodel.get_entity_binding(root_id) else {
                return Err(Error::internal_consistency(format!(
                    "{:?} has a dangling root {root_id:?}",
                    hierarchy.id
                )));
            };

            if !root.is_root() || root.hierarchy() != hierarchy.id {
                return Err(Error::internal_consistency(format!(
                    "{root} is recorded as the root of {:?} but is not",
                    hierarchy.id
                )));
            }

            if let Some(identifier) = hierarchy.identifier {
                self.attribute_binding(identifier, "identifier")?;
            }

            if let Some(version) = hierarchy.version.versioning_attribute_binding {
                let binding = self.attribute_binding(version, "version")?;
                if !binding.is_basic() {
                    return Err(Error::internal_consistency(format!(
                        "version attribute `{}` of {root} must be a basic attribute binding",
                        binding.name()
                    )));
                }
            }
        }

        Ok(())
    }

    fn verify_attribute_binding(&self, attribute_binding: &AttributeBinding) -> Result<()> {
        match attribute_binding {
            AttributeBinding::Basic(_) => Ok(()),
            AttributeBinding::Composite(composite) => {
                for sub in composite.sub_attribute_bindings() {
                    let binding = self.attribute_binding(sub, &composite.attribute.name)?;
                    self.verify_attribute_binding(binding)?;
                }
                Ok(())
            }
            AttributeBinding::ManyToOne(many_to_one) => {
                let target = self.metamodel.get_entity_binding(many_to_one.referenced_entity_binding);
                let Some(target) = target else {
                    return Err(Error::internal_consistency(format!(
                        "many-to-one `{}` references missing {:?}",
                        many_to_one.attribute.name, many_to_one.referenced_entity_binding
                    )));
                };

                let referenced = many_to_one.referenced_attribute_binding;
                self.attribute_binding(referenced, &many_to_one.attribute.name)?;

                if !self.is_visible_on(referenced, target) {
                    return Err(Error::internal_consistency(format!(
                        "many-to-one `{}` references {referenced:?}, which is not visible on {target}",
                        many_to_one.attribute.name
                    )));
                }

                Ok(())
            }
            AttributeBinding::BackRef(back_ref) => {
                let binding =
                    self.attribute_binding(back_ref.plural_attribute_binding, &back_ref.attribute.name)?;
                if !binding.is_plural() {
                    return Err(Error::internal_consistency(format!(
                        "back-reference `{}` must mirror a plural attribute binding, but `{}` is not one",
                        back_ref.attribute.name,
                        binding.name()
                    )));
                }
                Ok(())
            }
            AttributeBinding::Plural(plural) => {
                self.attribute_binding(plural.referenced_attribute_binding, &plural.attribute.name)?;
                Ok(())
            }
        }
    }

    /// True if `id` is stored on `entity_binding` or one of its super-entity bindings.
    fn is_visible_on(&self, id: AttributeBindingId, entity_binding: &EntityBinding) -> bool {
        id.entity == entity_binding.id()
            || self
                .metamodel
                .super_entity_bindings(entity_binding)
                .any(|ancestor| ancestor.id() == id.entity)
    }

    fn entity_binding(&self, id: EntityBindingId, referrer: &EntityBinding) -> Result<&EntityBinding> {
        self.metamodel.get_entity_binding(id).ok_or_else(|| {
            Error::internal_consistency(format!("{referrer} refers to missing {id:?}"))
        })
    }

    fn attribute_binding(&self, id: AttributeBindingId, referrer: &str) -> Result<&AttributeBinding> {
        self.metamodel.get_attribute_binding(id).ok_or_else(|| {
            Error::internal_consistency(format!("`{referrer}` refers to missing {id:?}"))
        })
    }
}
