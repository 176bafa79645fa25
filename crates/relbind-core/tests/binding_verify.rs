use relbind_core::binding::*;
use relbind_core::domain::{Entity, PluralAttribute, PluralAttributeNature, SingularAttribute};
use relbind_core::relational::Value;
use relbind_core::Metamodel;
use std::sync::Arc;

fn basic(container: &mut impl AttributeBindingContainer, name: &str) -> AttributeBindingId {
    container
        .make_basic_attribute_binding(
            SingularAttribute::new(name),
            vec![RelationalValueBinding::column(Value::column("t", name))],
            SingularBindingOptions::default(),
            PropertyGeneration::Never,
        )
        .unwrap()
}

/// Animal -> { Dog }, Owner; Dog.owner -> Owner.id, Owner.pets -> Owner.id
fn zoo() -> (Metamodel, EntityBindingId, EntityBindingId, EntityBindingId) {
    let mut metamodel = Metamodel::new();

    let animal = metamodel.add_root_entity_binding(InheritanceType::Joined, EntityMode::Pojo);
    let dog = metamodel.add_sub_entity_binding(animal);
    let owner = metamodel.add_root_entity_binding(InheritanceType::NoInheritance, EntityMode::Pojo);

    for (id, name) in [(animal, "Animal"), (dog, "Dog"), (owner, "Owner")] {
        metamodel
            .entity_binding_mut(id)
            .set_entity(Arc::new(Entity::new(name)));
    }

    let animal_id = basic(metamodel.entity_binding_mut(animal), "id");
    let version = basic(metamodel.entity_binding_mut(animal), "version");
    let owner_id = basic(metamodel.entity_binding_mut(owner), "id");

    let hierarchy = metamodel.hierarchy_details_mut(animal);
    hierarchy.identifier = Some(animal_id);
    hierarchy.version.versioning_attribute_binding = Some(version);

    metamodel
        .entity_binding_mut(dog)
        .make_many_to_one_attribute_binding(
            SingularAttribute::new("owner"),
            SingularBindingOptions::default(),
            owner,
            owner_id,
            vec![RelationalValueBinding::column(Value::column("dog", "owner_id"))],
        )
        .unwrap();

    let owner_binding = metamodel.entity_binding_mut(owner);
    let pets = owner_binding
        .make_set_attribute_binding(
            PluralAttribute::new("pets", PluralAttributeNature::Set),
            PluralAttributeElementNature::OneToMany,
            owner_id,
            PluralBindingOptions::default(),
        )
        .unwrap();
    owner_binding
        .make_back_ref_attribute_binding(SingularAttribute::synthetic("_petsBackref"), pets)
        .unwrap();

    (metamodel, animal, dog, owner)
}

#[test]
fn consistent_metamodel_verifies() {
    let (metamodel, animal, dog, _) = zoo();
    metamodel.verify().unwrap();

    assert!(metamodel.is_versioned(animal));
    assert!(metamodel.is_versioned(dog));

    let metamodel = metamodel.finish().unwrap();
    assert_eq!(metamodel.entity_bindings().len(), 3);
}

#[test]
fn many_to_one_may_reference_inherited_attribute() {
    let (mut metamodel, animal, dog, owner) = zoo();
    let animal_id = metamodel.hierarchy_details(animal).identifier.unwrap();

    metamodel
        .entity_binding_mut(owner)
        .make_many_to_one_attribute_binding(
            SingularAttribute::new("favorite"),
            SingularBindingOptions::default(),
            dog,
            animal_id,
            vec![RelationalValueBinding::column(Value::column("owner", "favorite_id"))],
        )
        .unwrap();

    metamodel.verify().unwrap();
}

#[test]
fn many_to_one_must_reference_visible_attribute() {
    let (mut metamodel, animal, _, owner) = zoo();
    let owner_id = metamodel
        .entity_binding(owner)
        .locate_attribute_binding("id")
        .unwrap()
        .id();

    metamodel
        .entity_binding_mut(animal)
        .make_many_to_one_attribute_binding(
            SingularAttribute::new("keeper"),
            SingularBindingOptions::default(),
            animal,
            owner_id,
            vec![],
        )
        .unwrap();

    let err = metamodel.verify().unwrap_err();
    assert!(err.is_internal_consistency());
    assert_eq!(
        err.to_string(),
        "internal consistency failure: many-to-one `keeper` references AttributeBindingId(2/0), which is not visible on EntityBinding{entity=Animal}"
    );
}

#[test]
fn dangling_references_fail_verification() {
    let (mut metamodel, _, _, owner) = zoo();

    metamodel
        .entity_binding_mut(owner)
        .make_set_attribute_binding(
            PluralAttribute::new("toys", PluralAttributeNature::Set),
            PluralAttributeElementNature::Basic,
            AttributeBindingId {
                entity: owner,
                index: 99,
            },
            PluralBindingOptions::default(),
        )
        .unwrap();

    let err = metamodel.finish().unwrap_err();
    assert_eq!(
        err.to_string(),
        "internal consistency failure: `toys` refers to missing AttributeBindingId(2/99)"
    );
}

#[test]
fn back_ref_must_mirror_plural_binding() {
    let (mut metamodel, _, _, owner) = zoo();
    let binding = metamodel.entity_binding_mut(owner);
    let id = binding.locate_attribute_binding("id").unwrap().id();

    binding
        .make_back_ref_attribute_binding(SingularAttribute::synthetic("_idBackref"), id)
        .unwrap();

    assert!(metamodel.verify().unwrap_err().is_internal_consistency());
}

#[test]
fn version_must_be_basic() {
    let (mut metamodel, animal, _, _) = zoo();
    let tag = metamodel
        .entity_binding_mut(animal)
        .make_component_attribute_binding(
            SingularAttribute::new("tag"),
            None,
            SingularBindingOptions::default(),
        )
        .unwrap();
    metamodel
        .hierarchy_details_mut(animal)
        .version
        .versioning_attribute_binding = Some(tag);

    let err = metamodel.verify().unwrap_err();
    assert_eq!(
        err.to_string(),
        "internal consistency failure: version attribute `tag` of EntityBinding{entity=Animal} must be a basic attribute binding"
    );
}

#[test]
fn verification_can_be_skipped_on_finish() {
    let mut metamodel = Metamodel::builder().verify_on_finish(false).build();
    let root = metamodel.add_root_entity_binding(InheritanceType::NoInheritance, EntityMode::Pojo);
    metamodel.hierarchy_details_mut(root).identifier = Some(AttributeBindingId {
        entity: root,
        index: 3,
    });

    assert!(metamodel.verify().is_err());
    assert!(metamodel.finish().is_ok());
}
