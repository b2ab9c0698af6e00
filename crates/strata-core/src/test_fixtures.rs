use crate::{
    member::PropertyMember,
    schema::{LayoutMember, StructureKind, StructureLayout},
    types::Float64,
};
use std::sync::Arc;
use ulid::Ulid;

///
/// Order / Line / Address
///
/// The canonical nested fixture: scalar root members, an optional node,
/// a node collection, and scalar collections at two depths.
///

#[derive(Clone, Debug, Default)]
pub struct Order {
    pub id: u64,
    pub note: Option<String>,
    pub ship_to: Option<Address>,
    pub lines: Vec<Line>,
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Default)]
pub struct Line {
    pub sku: String,
    pub qty: u32,
    pub discount: Option<Float64>,
    pub serials: Vec<String>,
}

#[derive(Clone, Debug, Default)]
pub struct Address {
    pub city: String,
    pub zip: Option<String>,
}

fn address_layout() -> Arc<StructureLayout> {
    Arc::new(StructureLayout::new(
        "Address",
        vec![
            LayoutMember::leaf(PropertyMember::scalar("city", |a: &Address| a.city.clone())),
            LayoutMember::leaf(PropertyMember::scalar_opt("zip", |a: &Address| {
                a.zip.clone()
            })),
        ],
    ))
}

fn line_layout() -> Arc<StructureLayout> {
    Arc::new(StructureLayout::new(
        "Line",
        vec![
            LayoutMember::leaf(PropertyMember::scalar("sku", |l: &Line| l.sku.clone())),
            LayoutMember::leaf(PropertyMember::scalar("qty", |l: &Line| l.qty)),
            LayoutMember::leaf(PropertyMember::scalar_opt("discount", |l: &Line| l.discount)),
            LayoutMember::leaf(PropertyMember::scalar_list("serials", |l: &Line| {
                l.serials.as_slice()
            })),
        ],
    ))
}

impl StructureKind for Order {
    const NAME: &'static str = "Order";

    fn layout() -> StructureLayout {
        StructureLayout::new(
            "Order",
            vec![
                LayoutMember::leaf(PropertyMember::id(
                    "id",
                    |o: &Order| o.id,
                    |o: &mut Order, id| o.id = id,
                )),
                LayoutMember::leaf(PropertyMember::scalar_opt("note", |o: &Order| {
                    o.note.clone()
                })),
                LayoutMember::node(
                    PropertyMember::node_opt("ship_to", "Address", |o: &Order| o.ship_to.as_ref()),
                    address_layout(),
                ),
                LayoutMember::node(
                    PropertyMember::node_list("lines", "Line", |o: &Order| o.lines.as_slice()),
                    line_layout(),
                ),
                LayoutMember::leaf(PropertyMember::scalar_list("tags", |o: &Order| {
                    o.tags.as_slice()
                })),
            ],
        )
    }
}

///
/// Customer
/// Nullable identity fixture.
///

#[derive(Clone, Debug, Default)]
pub struct Customer {
    pub id: Option<Ulid>,
    pub name: String,
}

impl StructureKind for Customer {
    const NAME: &'static str = "Customer";

    fn layout() -> StructureLayout {
        StructureLayout::new(
            "Customer",
            vec![
                LayoutMember::leaf(PropertyMember::id_opt(
                    "id",
                    |c: &Customer| c.id,
                    |c: &mut Customer, id| c.id = id,
                )),
                LayoutMember::leaf(PropertyMember::scalar("name", |c: &Customer| c.name.clone())),
            ],
        )
    }
}

///
/// Catalog / Section / Item
/// Two collection boundaries on one path, for fan-out product coverage.
///

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub id: u64,
    pub sections: Vec<Section>,
}

#[derive(Clone, Debug, Default)]
pub struct Section {
    pub items: Vec<Item>,
}

#[derive(Clone, Debug, Default)]
pub struct Item {
    pub sku: String,
    pub price: Option<Float64>,
}

fn item_layout() -> Arc<StructureLayout> {
    Arc::new(StructureLayout::new(
        "Item",
        vec![
            LayoutMember::leaf(PropertyMember::scalar("sku", |i: &Item| i.sku.clone())),
            LayoutMember::leaf(PropertyMember::scalar_opt("price", |i: &Item| i.price)),
        ],
    ))
}

fn section_layout() -> Arc<StructureLayout> {
    Arc::new(StructureLayout::new(
        "Section",
        vec![LayoutMember::node(
            PropertyMember::node_list("items", "Item", |s: &Section| s.items.as_slice()),
            item_layout(),
        )],
    ))
}

impl StructureKind for Catalog {
    const NAME: &'static str = "Catalog";

    fn layout() -> StructureLayout {
        StructureLayout::new(
            "Catalog",
            vec![
                LayoutMember::leaf(PropertyMember::id(
                    "id",
                    |c: &Catalog| c.id,
                    |c: &mut Catalog, id| c.id = id,
                )),
                LayoutMember::node(
                    PropertyMember::node_list("sections", "Section", |c: &Catalog| {
                        c.sections.as_slice()
                    }),
                    section_layout(),
                ),
            ],
        )
    }
}

///
/// helpers
///

pub fn order_with_lines(skus: &[&str]) -> Order {
    Order {
        id: 1,
        lines: skus
            .iter()
            .map(|sku| Line {
                sku: (*sku).to_string(),
                qty: 1,
                ..Line::default()
            })
            .collect(),
        ..Order::default()
    }
}
