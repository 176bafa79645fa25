use pretty_assertions::assert_eq;
use relbind_core::binding::*;
use relbind_core::domain::{PluralAttribute, PluralAttributeNature, SingularAttribute};
use relbind_core::relational::Value;
use relbind_core::Metamodel;

fn basic(
    container: &mut impl AttributeBindingContainer,
    name: &str,
    table: &str,
) -> AttributeBindingId {
    container
        .make_basic_attribute_binding(
            SingularAttribute::new(name),
            vec![RelationalValueBinding::column(Value::column(table, name))],
            SingularBindingOptions::default(),
            PropertyGeneration::Never,
        )
        .unwrap()
}

fn names<'a>(bindings: impl Iterator<Item = &'a AttributeBinding>) -> Vec<&'a str> {
    bindings.map(AttributeBinding::name).collect()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn root(metamodel: &mut Metamodel) -> EntityBindingId {
    metamodel.add_root_entity_binding(InheritanceType::SingleTable, EntityMode::Pojo)
}

#[test]
fn basic_binding_is_registered_by_name() {
    let mut metamodel = Metamodel::new();
    let id = root(&mut metamodel);
    let binding = metamodel.entity_binding_mut(id);

    let x = basic(binding, "x", "t");

    let located = binding.locate_attribute_binding("x").unwrap();
    assert_eq!(located.id(), x);
    assert_eq!(located.container(), id);
    assert!(located.is_basic());
    assert!(binding.locate_attribute_binding("y").is_none());
    assert_eq!(binding.attribute_binding_span(), 1);
}

#[test]
fn locate_by_relational_values() {
    let mut metamodel = Metamodel::new();
    let id = root(&mut metamodel);
    let binding = metamodel.entity_binding_mut(id);

    let x = basic(binding, "x", "t");
    let span = binding
        .make_basic_attribute_binding(
            SingularAttribute::new("span"),
            vec![
                RelationalValueBinding::column(Value::column("t", "span_start")),
                RelationalValueBinding::column(Value::column("t", "span_end")),
            ],
            SingularBindingOptions::default(),
            PropertyGeneration::Never,
        )
        .unwrap();

    let found = binding
        .locate_attribute_binding_by_values(&[Value::column("t", "x")])
        .unwrap();
    assert_eq!(found.id(), x);

    let found = binding
        .locate_attribute_binding_by_values(&[
            Value::column("t", "span_start"),
            Value::column("t", "span_end"),
        ])
        .unwrap();
    assert_eq!(found.id(), span);

    // Order matters, and so does the full list.
    assert!(binding
        .locate_attribute_binding_by_values(&[
            Value::column("t", "span_end"),
            Value::column("t", "span_start"),
        ])
        .is_none());
    assert!(binding
        .locate_attribute_binding_by_values(&[Value::column("t", "span_start")])
        .is_none());
    assert!(binding
        .locate_attribute_binding_by_values(&[Value::column("other", "x")])
        .is_none());
}

#[test]
fn locate_by_relational_values_skips_non_basic_bindings() {
    let mut metamodel = Metamodel::new();
    let target = root(&mut metamodel);
    let target_id = basic(metamodel.entity_binding_mut(target), "id", "owner");

    let id = root(&mut metamodel);
    let binding = metamodel.entity_binding_mut(id);
    binding
        .make_many_to_one_attribute_binding(
            SingularAttribute::new("owner"),
            SingularBindingOptions::default(),
            target,
            target_id,
            vec![RelationalValueBinding::column(Value::column("pet", "owner_id"))],
        )
        .unwrap();

    assert!(binding
        .locate_attribute_binding_by_values(&[Value::column("pet", "owner_id")])
        .is_none());
}

#[test]
fn same_name_replaces_previous_binding() {
    init_tracing();
    let mut metamodel = Metamodel::new();
    let id = root(&mut metamodel);
    let binding = metamodel.entity_binding_mut(id);

    basic(binding, "name", "t");
    basic(binding, "other", "t");
    let replacement = binding
        .make_basic_attribute_binding(
            SingularAttribute::new("name"),
            vec![RelationalValueBinding::derived(Value::derived("upper(name)"))],
            SingularBindingOptions::default(),
            PropertyGeneration::Always,
        )
        .unwrap();

    let located = binding.locate_attribute_binding("name").unwrap();
    assert_eq!(located.id(), replacement);
    assert!(located.expect_basic().has_derived_value());
    assert_eq!(binding.attribute_binding_span(), 2);
    assert_eq!(names(binding.attribute_bindings()), ["name", "other"]);
}

#[test]
fn reject_policy_refuses_same_name() {
    init_tracing();
    let mut metamodel = Metamodel::builder()
        .attribute_name_collision(NameCollision::Reject)
        .build();
    let id = root(&mut metamodel);
    let binding = metamodel.entity_binding_mut(id);

    basic(binding, "name", "t");
    let err = binding
        .make_basic_attribute_binding(
            SingularAttribute::new("name"),
            vec![],
            SingularBindingOptions::default(),
            PropertyGeneration::Never,
        )
        .unwrap_err();

    assert!(err.is_internal_consistency());
    assert_eq!(
        err.to_string(),
        "internal consistency failure: attribute binding `EntityBindingId(0).name` is already registered"
    );
    assert_eq!(binding.attribute_binding_span(), 1);
}

#[test]
fn virtual_component_requires_synthetic_attribute() {
    let mut metamodel = Metamodel::new();
    let id = root(&mut metamodel);
    let binding = metamodel.entity_binding_mut(id);
    let part = basic(binding, "part", "t");

    let err = binding
        .make_virtual_component_attribute_binding(SingularAttribute::new("_id"), &[part], None)
        .unwrap_err();
    assert!(err.is_internal_consistency());
    assert!(binding.locate_attribute_binding("_id").is_none());
}

#[test]
fn virtual_component_groups_existing_bindings() {
    let mut metamodel = Metamodel::new();
    let id = root(&mut metamodel);
    let binding = metamodel.entity_binding_mut(id);
    let region = basic(binding, "region", "t");
    let number = basic(binding, "number", "t");

    let virtual_id = binding
        .make_virtual_component_attribute_binding(
            SingularAttribute::synthetic("_identifierMapper"),
            &[region, number],
            None,
        )
        .unwrap();

    let composite = binding.attribute_binding(virtual_id).expect_composite();
    assert!(composite.is_virtual());
    assert_eq!(composite.sub_attribute_bindings().collect::<Vec<_>>(), [region, number]);
    assert_eq!(composite.sub_attribute_binding("number"), Some(number));
    assert_eq!(
        composite.options.property_accessor_name.as_deref(),
        Some("embedded")
    );
    assert_eq!(
        composite.options.natural_id_mutability,
        NaturalIdMutability::NotNaturalId
    );
    assert_eq!(names(binding.attribute_bindings()), ["region", "number", "_identifierMapper"]);
}

#[test]
fn virtual_component_rejects_foreign_sub_attributes() {
    let mut metamodel = Metamodel::new();
    let other = root(&mut metamodel);
    let foreign = basic(metamodel.entity_binding_mut(other), "code", "o");

    let id = root(&mut metamodel);
    let err = metamodel
        .entity_binding_mut(id)
        .make_virtual_component_attribute_binding(SingularAttribute::synthetic("_id"), &[foreign], None)
        .unwrap_err();
    assert!(err.is_internal_consistency());
}

#[test]
fn back_ref_requires_synthetic_attribute() {
    let mut metamodel = Metamodel::new();
    let id = root(&mut metamodel);
    let binding = metamodel.entity_binding_mut(id);
    let key = basic(binding, "id", "t");
    let lines = binding
        .make_bag_attribute_binding(
            PluralAttribute::new("lines", PluralAttributeNature::Bag),
            PluralAttributeElementNature::OneToMany,
            key,
            PluralBindingOptions::default(),
        )
        .unwrap();

    let err = binding
        .make_back_ref_attribute_binding(SingularAttribute::new("order"), lines)
        .unwrap_err();
    assert!(err.is_internal_consistency());

    let back_ref = binding
        .make_back_ref_attribute_binding(SingularAttribute::synthetic("_linesBackref"), lines)
        .unwrap();
    let located = binding.locate_attribute_binding("_linesBackref").unwrap();
    assert_eq!(located.id(), back_ref);
    assert_eq!(located.as_back_ref().unwrap().plural_attribute_binding, lines);
    assert!(located.is_synthetic());
}

#[test]
fn plural_bindings_check_nature() {
    let mut metamodel = Metamodel::new();
    let id = root(&mut metamodel);
    let binding = metamodel.entity_binding_mut(id);
    let key = basic(binding, "id", "t");
    let list = || PluralAttribute::new("items", PluralAttributeNature::List);

    let err = binding
        .make_map_attribute_binding(
            list(),
            PluralAttributeElementNature::Basic,
            PluralAttributeIndexNature::Basic,
            key,
            PluralBindingOptions::default(),
        )
        .unwrap_err();
    assert!(err.is_internal_consistency());
    assert_eq!(
        err.to_string(),
        "internal consistency failure: Expected attribute `EntityBindingId(0).items` to have plural nature MAP, but was LIST"
    );

    assert!(binding
        .make_set_attribute_binding(list(), PluralAttributeElementNature::Basic, key, PluralBindingOptions::default())
        .unwrap_err()
        .is_internal_consistency());
    assert!(binding
        .make_bag_attribute_binding(list(), PluralAttributeElementNature::Basic, key, PluralBindingOptions::default())
        .unwrap_err()
        .is_internal_consistency());
    assert!(binding.locate_attribute_binding("items").is_none());

    let items = binding
        .make_list_attribute_binding(
            list(),
            PluralAttributeElementNature::Basic,
            key,
            PluralBindingOptions::default(),
            1,
        )
        .unwrap();
    let plural = binding.attribute_binding(items).expect_plural();
    assert_eq!(plural.nature(), PluralAttributeNature::List);
    assert_eq!(plural.list_base(), Some(1));
    assert_eq!(plural.referenced_attribute_binding, key);
    assert!(plural.is_indexed());
}

#[test]
fn map_and_set_bindings() {
    let mut metamodel = Metamodel::new();
    let id = root(&mut metamodel);
    let binding = metamodel.entity_binding_mut(id);
    let key = basic(binding, "id", "t");

    let tags = binding
        .make_set_attribute_binding(
            PluralAttribute::new("tags", PluralAttributeNature::Set),
            PluralAttributeElementNature::Basic,
            key,
            PluralBindingOptions::default(),
        )
        .unwrap();
    let prices = binding
        .make_map_attribute_binding(
            PluralAttribute::new("prices", PluralAttributeNature::Map),
            PluralAttributeElementNature::Aggregate,
            PluralAttributeIndexNature::Basic,
            key,
            PluralBindingOptions::default(),
        )
        .unwrap();

    let tags = binding.attribute_binding(tags).expect_plural();
    assert_eq!(tags.kind, PluralKind::Set);
    assert!(!tags.is_indexed());
    assert!(!tags.is_association());

    let prices = binding.attribute_binding(prices).expect_plural();
    assert_eq!(prices.map_index_nature(), Some(PluralAttributeIndexNature::Basic));
    assert_eq!(prices.list_base(), None);
}

#[test]
fn composite_sub_attributes_stay_out_of_entity_map() {
    let mut metamodel = Metamodel::new();
    let id = root(&mut metamodel);
    let binding = metamodel.entity_binding_mut(id);

    let address = binding
        .make_component_attribute_binding(
            SingularAttribute::new("address"),
            Some(SingularAttribute::new("owner")),
            SingularBindingOptions::default(),
        )
        .unwrap();

    let mut container = binding.composite_container(address).unwrap();
    let street = basic(&mut container, "street", "t");
    basic(&mut container, "city", "t");

    assert_eq!(container.locate_attribute_binding("street").unwrap().id(), street);
    assert_eq!(names(container.attribute_bindings()), ["street", "city"]);
    assert_eq!(container.composite().sub_attribute_binding_span(), 2);

    assert!(binding.locate_attribute_binding("street").is_none());
    assert_eq!(names(binding.attribute_bindings()), ["address"]);

    let composite = binding.attribute_binding(address).expect_composite();
    assert!(!composite.is_virtual());
    assert_eq!(
        composite.parent_reference.as_ref().map(|attr| attr.name.as_str()),
        Some("owner")
    );
}

#[test]
fn nested_composite_path() {
    let mut metamodel = Metamodel::builder()
        .attribute_name_collision(NameCollision::Reject)
        .build();
    let id = root(&mut metamodel);
    let binding = metamodel.entity_binding_mut(id);

    let address = binding
        .make_component_attribute_binding(
            SingularAttribute::new("address"),
            None,
            SingularBindingOptions::default(),
        )
        .unwrap();

    let mut container = binding.composite_container(address).unwrap();
    basic(&mut container, "zip", "t");
    let err = container
        .make_basic_attribute_binding(
            SingularAttribute::new("zip"),
            vec![],
            SingularBindingOptions::default(),
            PropertyGeneration::Never,
        )
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "internal consistency failure: attribute binding `EntityBindingId(0).address.zip` is already registered"
    );
}

#[test]
fn composite_container_requires_composite() {
    let mut metamodel = Metamodel::new();
    let id = root(&mut metamodel);
    let binding = metamodel.entity_binding_mut(id);
    let name = basic(binding, "name", "t");

    assert!(binding.composite_container(name).is_err());
}

#[test]
fn attribute_closure_runs_from_root_to_self() {
    let mut metamodel = Metamodel::new();
    let root_id = root(&mut metamodel);
    let child = metamodel.add_sub_entity_binding(root_id);

    basic(metamodel.entity_binding_mut(root_id), "id", "t");
    basic(metamodel.entity_binding_mut(child), "name", "t");

    assert_eq!(names(metamodel.attribute_binding_closure(child)), ["id", "name"]);
    assert_eq!(metamodel.attribute_binding_closure_span(child), 2);
    assert_eq!(names(metamodel.attribute_binding_closure(root_id)), ["id"]);
    assert_eq!(metamodel.attribute_binding_closure_span(root_id), 1);

    // Lookups by name do not search super-entity bindings.
    assert!(metamodel
        .entity_binding(child)
        .locate_attribute_binding("id")
        .is_none());
}

#[test]
fn shadowed_attributes_are_not_deduplicated() {
    let mut metamodel = Metamodel::new();
    let root_id = root(&mut metamodel);
    let child = metamodel.add_sub_entity_binding(root_id);

    basic(metamodel.entity_binding_mut(root_id), "name", "t");
    basic(metamodel.entity_binding_mut(child), "name", "t");

    assert_eq!(names(metamodel.attribute_binding_closure(child)), ["name", "name"]);
    assert_eq!(metamodel.attribute_binding_closure_span(child), 2);
}

#[test]
fn sub_entity_attribute_closure() {
    // Vehicle -> { Car -> { SportsCar }, Truck }
    let mut metamodel = Metamodel::new();
    let vehicle = root(&mut metamodel);
    let car = metamodel.add_sub_entity_binding(vehicle);
    let truck = metamodel.add_sub_entity_binding(vehicle);
    let sports_car = metamodel.add_sub_entity_binding(car);

    basic(metamodel.entity_binding_mut(vehicle), "id", "vehicle");
    basic(metamodel.entity_binding_mut(vehicle), "wheels", "vehicle");
    basic(metamodel.entity_binding_mut(car), "seats", "vehicle");
    basic(metamodel.entity_binding_mut(truck), "payload", "vehicle");
    basic(metamodel.entity_binding_mut(sports_car), "top_speed", "vehicle");

    assert_eq!(
        names(metamodel.sub_entity_attribute_binding_closure(vehicle)),
        ["id", "wheels", "seats", "top_speed", "payload"]
    );
    assert_eq!(
        names(metamodel.sub_entity_attribute_binding_closure(car)),
        ["id", "wheels", "seats", "top_speed"]
    );
    assert_eq!(
        names(metamodel.sub_entity_attribute_binding_closure(truck)),
        ["id", "wheels", "payload"]
    );
}

#[test]
fn many_to_one_binding() {
    let mut metamodel = Metamodel::new();
    let customer = root(&mut metamodel);
    let customer_id = basic(metamodel.entity_binding_mut(customer), "id", "customer");

    let order = root(&mut metamodel);
    let binding = metamodel.entity_binding_mut(order);
    let options = SingularBindingOptions {
        lazy: true,
        included_in_optimistic_locking: false,
        ..SingularBindingOptions::default()
    };
    let customer_ref = binding
        .make_many_to_one_attribute_binding(
            SingularAttribute::new("customer"),
            options,
            customer,
            customer_id,
            vec![RelationalValueBinding::column(Value::column("orders", "customer_id"))],
        )
        .unwrap();

    let located = metamodel.attribute_binding(customer_ref);
    assert!(located.is_association());
    assert!(located.is_lazy());

    let many_to_one = located.expect_many_to_one();
    assert_eq!(many_to_one.referenced_entity_binding, customer);
    assert_eq!(metamodel.attribute_binding(many_to_one.referenced_attribute_binding).name(), "id");
    assert!(!many_to_one.options.included_in_optimistic_locking);
}

#[test]
fn virtual_component_keeps_parts_sharing_a_name() {
    let mut metamodel = Metamodel::new();
    let id = root(&mut metamodel);
    let binding = metamodel.entity_binding_mut(id);

    let entity_id = basic(binding, "id", "t");
    let pk = binding
        .make_component_attribute_binding(
            SingularAttribute::new("pk"),
            None,
            SingularBindingOptions::default(),
        )
        .unwrap();
    let pk_id = basic(&mut binding.composite_container(pk).unwrap(), "id", "t");

    let virtual_id = binding
        .make_virtual_component_attribute_binding(
            SingularAttribute::synthetic("_identifierMapper"),
            &[entity_id, pk_id],
            None,
        )
        .unwrap();

    let composite = binding.attribute_binding(virtual_id).expect_composite();
    assert_eq!(composite.sub_attribute_binding_span(), 2);
    assert_eq!(composite.sub_attribute_bindings().collect::<Vec<_>>(), [entity_id, pk_id]);
    assert_eq!(composite.sub_attribute_binding("id"), Some(entity_id));
}

#[test]
fn replaced_composite_part_keeps_its_position() {
    let mut metamodel = Metamodel::new();
    let id = root(&mut metamodel);
    let binding = metamodel.entity_binding_mut(id);
    let address = binding
        .make_component_attribute_binding(
            SingularAttribute::new("address"),
            None,
            SingularBindingOptions::default(),
        )
        .unwrap();

    let mut container = binding.composite_container(address).unwrap();
    basic(&mut container, "street", "t");
    basic(&mut container, "city", "t");
    let street = basic(&mut container, "street", "t2");

    assert_eq!(names(container.attribute_bindings()), ["street", "city"]);
    assert_eq!(container.locate_attribute_binding("street").unwrap().id(), street);
    assert_eq!(container.composite().sub_attribute_binding_span(), 2);
}

#[test]
fn composite_holds_associations() {
    let mut metamodel = Metamodel::new();
    let country = root(&mut metamodel);
    let country_id = basic(metamodel.entity_binding_mut(country), "id", "country");

    let id = root(&mut metamodel);
    let binding = metamodel.entity_binding_mut(id);
    let key = basic(binding, "id", "t");
    let address = binding
        .make_component_attribute_binding(
            SingularAttribute::new("address"),
            None,
            SingularBindingOptions::default(),
        )
        .unwrap();

    let mut container = binding.composite_container(address).unwrap();
    let country_ref = container
        .make_many_to_one_attribute_binding(
            SingularAttribute::new("country"),
            SingularBindingOptions::default(),
            country,
            country_id,
            vec![RelationalValueBinding::column(Value::column("t", "country_id"))],
        )
        .unwrap();
    let lines = container
        .make_list_attribute_binding(
            PluralAttribute::new("lines", PluralAttributeNature::List),
            PluralAttributeElementNature::Basic,
            key,
            PluralBindingOptions::default(),
            0,
        )
        .unwrap();

    // A nature mismatch inside a composite names the composite path.
    let err = container
        .make_set_attribute_binding(
            PluralAttribute::new("codes", PluralAttributeNature::Bag),
            PluralAttributeElementNature::Basic,
            key,
            PluralBindingOptions::default(),
        )
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "internal consistency failure: Expected attribute `EntityBindingId(1).address.codes` to have plural nature SET, but was BAG"
    );

    assert_eq!(names(container.attribute_bindings()), ["country", "lines"]);
    assert_eq!(
        container.locate_attribute_binding("country").unwrap().id(),
        country_ref
    );
    assert!(container
        .locate_attribute_binding_by_values(&[Value::column("t", "country_id")])
        .is_none());

    assert!(binding.locate_attribute_binding("country").is_none());
    assert!(binding.locate_attribute_binding("lines").is_none());

    let many_to_one = binding.attribute_binding(country_ref).expect_many_to_one();
    assert_eq!(many_to_one.referenced_entity_binding, country);
    assert_eq!(many_to_one.referenced_attribute_binding, country_id);

    let lines = binding.attribute_binding(lines).expect_plural();
    assert_eq!(lines.list_base(), Some(0));
    assert_eq!(lines.referenced_attribute_binding, key);

    metamodel.verify().unwrap();
}

#[test]
fn composite_locates_basic_parts_by_values() {
    let mut metamodel = Metamodel::new();
    let id = root(&mut metamodel);
    let binding = metamodel.entity_binding_mut(id);
    basic(binding, "zip", "person");
    let address = binding
        .make_component_attribute_binding(
            SingularAttribute::new("address"),
            None,
            SingularBindingOptions::default(),
        )
        .unwrap();

    let mut container = binding.composite_container(address).unwrap();
    let zip = basic(&mut container, "zip", "address");

    let found = container
        .locate_attribute_binding_by_values(&[Value::column("address", "zip")])
        .unwrap();
    assert_eq!(found.id(), zip);
    assert!(container
        .locate_attribute_binding_by_values(&[Value::column("person", "zip")])
        .is_none());

    assert_ne!(
        binding
            .locate_attribute_binding_by_values(&[Value::column("person", "zip")])
            .unwrap()
            .id(),
        zip
    );
    assert!(binding
        .locate_attribute_binding_by_values(&[Value::column("address", "zip")])
        .is_none());
}

#[test]
fn basic_binding_nullability_follows_its_values() {
    let mut metamodel = Metamodel::new();
    let id = root(&mut metamodel);
    let binding = metamodel.entity_binding_mut(id);

    let required = RelationalValueBinding {
        nullable: false,
        ..RelationalValueBinding::column(Value::column("t", "code"))
    };
    let code = binding
        .make_basic_attribute_binding(
            SingularAttribute::new("code"),
            vec![required.clone()],
            SingularBindingOptions::default(),
            PropertyGeneration::Never,
        )
        .unwrap();
    let label = binding
        .make_basic_attribute_binding(
            SingularAttribute::new("label"),
            vec![required, RelationalValueBinding::column(Value::column("t", "label"))],
            SingularBindingOptions::default(),
            PropertyGeneration::Insert,
        )
        .unwrap();

    assert!(!binding.attribute_binding(code).expect_basic().is_nullable());
    assert!(binding.attribute_binding(label).expect_basic().is_nullable());
}
