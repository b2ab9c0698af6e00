use crate::{
    error::SchemaError,
    member::PropertyMember,
    schema::{LayoutMember, Schema, StructureKind, StructureLayout, build_schema},
    test_fixtures::{Catalog, Customer, Line, Order},
    MAX_PROPERTY_DEPTH,
};
use std::{collections::HashSet, sync::Arc};

fn schema<T: StructureKind>() -> Schema {
    build_schema(&T::layout()).unwrap()
}

#[test]
fn paths_are_unique_within_a_schema() {
    let schemas = [schema::<Order>(), schema::<Catalog>(), schema::<Customer>()];

    for built in &schemas {
        let mut seen = HashSet::new();
        for property in built.properties() {
            assert!(seen.insert(property.path().to_string()), "{}", property.path());
        }
    }
}

#[test]
fn the_arena_is_depth_first_with_parents_before_children() {
    let schema = schema::<Order>();
    let paths: Vec<_> = schema.properties().iter().map(|p| p.path()).collect();

    assert_eq!(
        paths,
        vec![
            "id",
            "note",
            "ship_to",
            "ship_to.city",
            "ship_to.zip",
            "lines",
            "lines.sku",
            "lines.qty",
            "lines.discount",
            "lines.serials",
            "tags",
        ]
    );

    for (index, property) in schema.properties().iter().enumerate() {
        if let Some(parent) = property.parent() {
            assert!(parent < index, "{}", property.path());
        }
    }
}

#[test]
fn the_identity_descriptor_sits_at_arena_slot_zero() {
    let schema = schema::<Order>();

    assert_eq!(schema.id_property().path(), "id");
    assert_eq!(schema.id_property().level(), 0);
    assert_eq!(schema.name(), "Order");
}

#[test]
fn flattenable_descriptors_exclude_node_shapes() {
    let schema = schema::<Order>();
    let flattenable: Vec<_> = schema.flattenable().map(|p| p.path()).collect();

    assert_eq!(
        flattenable,
        vec![
            "id",
            "note",
            "ship_to.city",
            "ship_to.zip",
            "lines.sku",
            "lines.qty",
            "lines.discount",
            "lines.serials",
            "tags",
        ]
    );
}

#[test]
fn a_layout_without_an_identity_member_is_rejected() {
    let layout = StructureLayout::new(
        "Line",
        vec![LayoutMember::leaf(PropertyMember::scalar(
            "sku",
            |l: &Line| l.sku.clone(),
        ))],
    );

    assert_eq!(
        build_schema(&layout).unwrap_err(),
        SchemaError::MissingIdentity { name: "Line" }
    );
}

#[test]
fn an_identity_member_declared_late_is_rejected() {
    let layout = StructureLayout::new(
        "Line",
        vec![
            LayoutMember::leaf(PropertyMember::id(
                "qty",
                |l: &Line| l.qty,
                |l: &mut Line, qty| l.qty = qty,
            )),
            LayoutMember::leaf(PropertyMember::id(
                "sku",
                |l: &Line| l.sku.clone(),
                |l: &mut Line, sku| l.sku = sku,
            )),
        ],
    );

    assert_eq!(
        build_schema(&layout).unwrap_err(),
        SchemaError::MisplacedIdentity {
            name: "Line",
            path: "sku".to_string(),
        }
    );
}

#[test]
fn duplicate_member_names_are_rejected() {
    let layout = StructureLayout::new(
        "Line",
        vec![
            LayoutMember::leaf(PropertyMember::id(
                "sku",
                |l: &Line| l.sku.clone(),
                |l: &mut Line, sku| l.sku = sku,
            )),
            LayoutMember::leaf(PropertyMember::scalar("sku", |l: &Line| l.sku.clone())),
        ],
    );

    assert_eq!(
        build_schema(&layout).unwrap_err(),
        SchemaError::DuplicatePath {
            name: "Line",
            path: "sku".to_string(),
        }
    );
}

#[test]
fn a_node_member_without_a_nested_layout_is_rejected() {
    let layout = StructureLayout::new(
        "Order",
        vec![
            LayoutMember::leaf(PropertyMember::id(
                "id",
                |o: &Order| o.id,
                |o: &mut Order, id| o.id = id,
            )),
            LayoutMember::leaf(PropertyMember::node_list("lines", "Line", |o: &Order| {
                o.lines.as_slice()
            })),
        ],
    );

    assert_eq!(
        build_schema(&layout).unwrap_err(),
        SchemaError::UnresolvedNode {
            name: "Order",
            path: "lines".to_string(),
        }
    );
}

#[test]
fn a_unique_marker_on_a_node_member_fails_the_whole_build() {
    let layout = StructureLayout::new(
        "Order",
        vec![
            LayoutMember::leaf(PropertyMember::id(
                "id",
                |o: &Order| o.id,
                |o: &mut Order, id| o.id = id,
            )),
            LayoutMember::node(
                PropertyMember::node_list("lines", "Line", |o: &Order| o.lines.as_slice())
                    .unique(),
                Arc::new(StructureLayout::new("Line", vec![])),
            ),
        ],
    );

    assert_eq!(
        build_schema(&layout).unwrap_err(),
        SchemaError::InvalidConstraintDeclaration {
            path: "lines".to_string(),
        }
    );
}

#[test]
fn runaway_layout_nesting_is_rejected() {
    // A chain deeper than the depth limit stands in for an accidental
    // layout cycle, which the builder cannot observe directly.
    struct Chain;

    let mut nested = Arc::new(StructureLayout::new(
        "Chain",
        vec![LayoutMember::leaf(PropertyMember::scalar(
            "label",
            |_: &Chain| "end".to_string(),
        ))],
    ));

    for _ in 0..=MAX_PROPERTY_DEPTH {
        nested = Arc::new(StructureLayout::new(
            "Chain",
            vec![LayoutMember::node(
                PropertyMember::node("child", "Chain", |c: &Chain| c),
                nested,
            )],
        ));
    }

    let layout = StructureLayout::new(
        "Chain",
        vec![
            LayoutMember::leaf(PropertyMember::id(
                "id",
                |_: &Chain| 0u64,
                |_: &mut Chain, _| {},
            )),
            LayoutMember::node(PropertyMember::node("child", "Chain", |c: &Chain| c), nested),
        ],
    );

    assert!(matches!(
        build_schema(&layout).unwrap_err(),
        SchemaError::DepthExceeded { name: "Chain", max, .. } if max == MAX_PROPERTY_DEPTH
    ));
}
