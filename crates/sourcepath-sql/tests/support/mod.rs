#![allow(dead_code)]

use sourcepath_core::{
    config::MapEntry,
    schema::{AssociationDef, Category, ClassDef, Model, PropertyDef, PropertyId},
    Config, Diagnostics, EncodingContext, SourcePathInfo, SourcePathProvider, VisitedChain,
};
use sourcepath_sql::SqlSourcePathProvider;
use std::sync::Arc;

/// Routes `tracing` output to the test harness. Set `RUST_LOG` to see it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A small road network touching every branch of the resolver.
pub fn transport() -> Model {
    Model::builder()
        .class(
            ClassDef::new("Road", "transport", Category::Feature)
                .property(PropertyDef::new("name", "CharacterString"))
                .property(PropertyDef::new("tags", "CharacterString").many())
                .property(PropertyDef::new("alias", "CharacterString").cardinality(0, Some(1)))
                .property(PropertyDef::new("codes", "CharacterString").cardinality(1, Some(2)))
                .property(PropertyDef::new("geometry", "GM_Curve"))
                .property(PropertyDef::new("length", "Measure"))
                .property(PropertyDef::new("mystery", "Unknown"))
                .property(PropertyDef::new("homepage", "URI"))
                .property(PropertyDef::new("links", "URI").many())
                .property(PropertyDef::new("surface", "SurfaceType"))
                .property(PropertyDef::new("status", "StatusCode"))
                .property(PropertyDef::new("statuses", "StatusCode").many())
                .property(PropertyDef::new("mainLane", "LaneInfo"))
                .property(PropertyDef::new("lanes", "LaneInfo").many())
                .property(PropertyDef::new("address", "Address"))
                .property(PropertyDef::new("formerAddresses", "Address").many())
                .property(PropertyDef::new("owner", "Organization"))
                .property(PropertyDef::new("previousOwners", "Organization").many())
                .property(PropertyDef::role("maintainer", "Organization").cardinality(0, Some(1)))
                .property(PropertyDef::role("operators", "Organization").many())
                .property(PropertyDef::role("segments", "RoadSegment").many())
                .property(PropertyDef::role("connectsTo", "Road").many())
                .property(PropertyDef::role("connectedFrom", "Road").many())
                .property(PropertyDef::role("next", "Road").cardinality(0, Some(1)))
                .property(PropertyDef::role("previous", "Road").cardinality(0, Some(1)))
                .property(PropertyDef::role("documents", "Document").many()),
        )
        .class(
            ClassDef::new("Organization", "transport", Category::Feature)
                .property(PropertyDef::new("name", "CharacterString"))
                .property(PropertyDef::role("maintains", "Road").cardinality(0, Some(1)))
                .property(PropertyDef::role("operates", "Road").many()),
        )
        .class(
            ClassDef::new("RoadSegment", "transport", Category::Feature)
                .property(PropertyDef::new("segmentId", "CharacterString").identifier())
                .property(PropertyDef::role("road", "Road")),
        )
        .class(
            ClassDef::new("Bridge", "transport", Category::Feature)
                .property(PropertyDef::new("bridgeId", "CharacterString").identifier())
                .property(PropertyDef::new("registration", "CharacterString").identifier())
                .property(PropertyDef::new("tags", "CharacterString").many())
                .property(PropertyDef::role("replaces", "Bridge").cardinality(0, Some(1)))
                .property(PropertyDef::role("replacedBy", "Bridge").cardinality(0, Some(1))),
        )
        .class(ClassDef::new("SurfaceType", "transport", Category::Enumeration))
        .class(ClassDef::new("StatusCode", "transport", Category::CodeList))
        .class(
            ClassDef::new("LaneInfo", "transport", Category::DataType)
                .property(PropertyDef::new("width", "Real")),
        )
        .class(
            ClassDef::new("Address", "transport", Category::DataType)
                .tag("dataTypeTables", "several")
                .property(PropertyDef::new("street", "CharacterString"))
                .property(PropertyDef::new("lines", "CharacterString").many())
                .property(PropertyDef::new("locality", "Locality")),
        )
        .class(
            ClassDef::new("Locality", "transport", Category::DataType)
                .tag("dataTypeTables", "several")
                .property(PropertyDef::new("names", "CharacterString").many()),
        )
        .class(
            ClassDef::new("Named", "transport", Category::Mixin)
                .property(PropertyDef::new("label", "CharacterString"))
                .property(PropertyDef::new("aliases", "CharacterString").many()),
        )
        .class(ClassDef::new("Document", "external", Category::Feature))
        .association(AssociationDef::new(("Road", "maintainer"), ("Organization", "maintains")))
        .association(AssociationDef::new(("Road", "operators"), ("Organization", "operates")))
        .association(AssociationDef::new(("Road", "segments"), ("RoadSegment", "road")))
        .association(AssociationDef::new(("Road", "connectsTo"), ("Road", "connectedFrom")))
        .association(AssociationDef::new(("Road", "next"), ("Road", "previous")))
        .association(AssociationDef::new(("Bridge", "replaces"), ("Bridge", "replacedBy")))
        .build()
        .unwrap()
}

pub fn config() -> Config {
    Config {
        map_entries: vec![
            MapEntry::new("CharacterString", "string"),
            MapEntry::new("Real", "float"),
            MapEntry::new("GM_Curve", "GEOMETRY"),
            MapEntry::new("URI", "LINK")
                .with_characteristic("urlTemplate", "https://example.org/docs/{id}"),
            MapEntry {
                source_type: "Measure".to_string(),
                rule: None,
                target_type: None,
                characteristics: Default::default(),
            },
        ],
        ..Config::default()
    }
}

pub fn property(model: &Model, class: &str, name: &str) -> PropertyId {
    model
        .class_by_name(class)
        .and_then(|class| class.property(name))
        .map(|property| property.id)
        .unwrap_or_else(|| panic!("no property `{class}::{name}`"))
}

/// Resolves `class::name` from the initial context of `class`.
pub fn resolve(
    provider: &SqlSourcePathProvider<'_>,
    class: &str,
    name: &str,
) -> (Vec<SourcePathInfo>, Diagnostics) {
    let model = provider.model();
    let id = property(model, class, name);
    let cx = provider.create_initial_context(id.class, true);

    let mut diagnostics = Diagnostics::new();
    let paths = provider.resolve_property(id, &VisitedChain::new(), &cx, &mut diagnostics);
    (paths, diagnostics)
}

/// Resolves `class::name` and returns its single path.
pub fn resolve_one(provider: &SqlSourcePathProvider<'_>, class: &str, name: &str) -> SourcePathInfo {
    let (mut paths, _) = resolve(provider, class, name);
    assert_eq!(paths.len(), 1, "{class}::{name} resolved to {paths:?}");
    paths.remove(0)
}

/// Descends from `class` through `via` into the data type it holds,
/// returning the nested context and the visited chain.
pub fn descend(
    provider: &SqlSourcePathProvider<'_>,
    class: &str,
    via: &[&str],
) -> (Arc<EncodingContext>, VisitedChain) {
    let model = provider.model();
    let root = model.class_by_name(class).unwrap();
    let mut cx = Arc::new(provider.create_initial_context(root.id, true));
    let mut visited = VisitedChain::new();

    for name in via {
        let owner = model.class(cx.owning_type);
        let id = property(model, &owner.name, name);
        let value = model.value_class(model.property(id)).unwrap().id;

        let mut diagnostics = Diagnostics::new();
        let info = provider
            .resolve_property(id, &visited, &cx, &mut diagnostics)
            .into_iter()
            .next();

        cx = Arc::new(provider.create_child_context(cx, value, info.as_ref()));
        visited = visited.push(id);
    }

    (cx, visited)
}
