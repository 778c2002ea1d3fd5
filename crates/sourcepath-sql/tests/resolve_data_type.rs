mod support;

use pretty_assertions::assert_eq;
use sourcepath_core::{
    config::MapEntry, Config, Diagnostics, EncodingContext, SourcePathInfo, SourcePathProvider,
    ValueType, VisitedChain,
};
use sourcepath_sql::SqlSourcePathProvider;
use support::*;

/// Resolves a property expected to have exactly one path.
fn resolve_in(
    provider: &SqlSourcePathProvider<'_>,
    cx: &EncodingContext,
    visited: &VisitedChain,
    diagnostics: &mut Diagnostics,
    class: &str,
    name: &str,
) -> String {
    let id = property(provider.model(), class, name);
    let mut paths = provider.resolve_property(id, visited, cx, diagnostics);
    assert_eq!(paths.len(), 1, "{class}::{name} resolved to {paths:?}");
    paths.remove(0).source_path.unwrap()
}

#[test]
fn enumerations_are_inline_values() {
    let (model, config) = (transport(), config());
    let provider = SqlSourcePathProvider::new(&model, &config);

    assert_eq!(
        resolve_one(&provider, "Road", "surface"),
        SourcePathInfo::new("surface", true).value_type(ValueType::String)
    );
    assert_eq!(
        resolve_one(&provider, "Road", "status"),
        SourcePathInfo::new("status", true).value_type(ValueType::String)
    );
}

#[test]
fn code_lists_as_tables() {
    let model = transport();
    let config = Config {
        code_lists_as_tables: true,
        ..config()
    };
    let provider = SqlSourcePathProvider::new(&model, &config);

    assert_eq!(
        resolve_one(&provider, "Road", "status"),
        SourcePathInfo::new("status_id", true)
            .value_type(ValueType::String)
            .ref_type("StatusCode")
    );
    assert_eq!(
        resolve_one(&provider, "Road", "statuses"),
        SourcePathInfo::new(
            "[id=road_id]road_statuses{sortKey=road}/[statuscode_id=name]statuscode/name",
            false
        )
        .value_type(ValueType::String)
        .ref_type("StatusCode")
        .target_table("statuscode")
    );

    // Enumerations never get a table
    assert_eq!(
        resolve_one(&provider, "Road", "surface").source_path.as_deref(),
        Some("surface")
    );
}

#[test]
fn shared_data_type_table() {
    let (model, config) = (transport(), config());
    let provider = SqlSourcePathProvider::new(&model, &config);

    assert_eq!(
        resolve_one(&provider, "Road", "mainLane"),
        SourcePathInfo::new("[mainlane_id=id]laneinfo", true).target_table("laneinfo")
    );
    assert_eq!(
        resolve_one(&provider, "Road", "lanes"),
        SourcePathInfo::new("[id=road_id]road_lanes{sortKey=road}/[laneinfo_id=id]laneinfo", false)
            .target_table("laneinfo")
    );

    let (cx, visited) = descend(&provider, "Road", &["lanes"]);
    assert_eq!(cx.source_table(), Some("laneinfo"));

    let mut diagnostics = Diagnostics::new();
    let width = provider.resolve_property(
        property(&model, "LaneInfo", "width"),
        &visited,
        &cx,
        &mut diagnostics,
    );
    assert_eq!(
        width,
        vec![SourcePathInfo::new("width", true).value_type(ValueType::Float)]
    );
}

#[test]
fn data_type_with_one_table_per_usage() {
    let (model, config) = (transport(), config());
    let provider = SqlSourcePathProvider::new(&model, &config);

    assert_eq!(
        resolve_one(&provider, "Road", "address"),
        SourcePathInfo::new("[id=road_id]road_address", true).target_table("road_address")
    );
    assert_eq!(
        resolve_one(&provider, "Road", "formerAddresses"),
        SourcePathInfo::new("[id=road_id]road_formeraddresses{sortKey=road}", false)
            .target_table("road_formeraddresses")
    );
}

#[test]
fn nested_fragment_tables_follow_the_visited_chain() {
    let (model, config) = (transport(), config());
    let provider = SqlSourcePathProvider::new(&model, &config);
    let mut diagnostics = Diagnostics::new();

    let (cx, visited) = descend(&provider, "Road", &["address"]);
    assert_eq!(cx.source_table(), Some("road_address"));
    assert_eq!(cx.depth(), 1);

    assert_eq!(
        resolve_in(&provider, &cx, &visited, &mut diagnostics, "Address", "street"),
        "street"
    );
    assert_eq!(
        resolve_in(&provider, &cx, &visited, &mut diagnostics, "Address", "lines"),
        "[id=road_address_id]road_address_lines{sortKey=road_address}/lines"
    );
    assert_eq!(
        resolve_in(&provider, &cx, &visited, &mut diagnostics, "Address", "locality"),
        "[id=road_address_id]road_address_locality"
    );

    let (cx, visited) = descend(&provider, "Road", &["address", "locality"]);
    assert_eq!(cx.source_table(), Some("road_address_locality"));
    assert_eq!(
        resolve_in(&provider, &cx, &visited, &mut diagnostics, "Locality", "names"),
        "[id=road_address_locality_id]road_address_locality_names{sortKey=road_address_locality}/names"
    );

    assert!(diagnostics.is_empty());
}

#[test]
fn same_schema_map_entries_are_suppressed() {
    let model = transport();
    let mut config = config();
    config.map_entries.push(MapEntry::new("LaneInfo", "string"));

    let provider = SqlSourcePathProvider::new(&model, &config);
    assert_eq!(
        resolve_one(&provider, "Road", "mainLane").source_path.as_deref(),
        Some("[mainlane_id=id]laneinfo")
    );

    config.suppress_schema_map_entries = false;
    let provider = SqlSourcePathProvider::new(&model, &config);
    assert_eq!(
        resolve_one(&provider, "Road", "mainLane"),
        SourcePathInfo::new("mainlane", true).value_type(ValueType::String)
    );
}

#[test]
fn mixin_properties_land_in_the_enclosing_table() {
    let (model, config) = (transport(), config());
    let provider = SqlSourcePathProvider::new(&model, &config);
    let road = model.class_by_name("Road").unwrap();
    let named = model.class_by_name("Named").unwrap();
    let aliases = property(&model, "Named", "aliases");
    let visited = Default::default();
    let mut diagnostics = Diagnostics::new();

    let root = std::sync::Arc::new(provider.create_initial_context(road.id, true));
    let cx = provider.create_child_context(root, named.id, None);
    assert_eq!(cx.source_table(), Some("road"));

    let paths = provider.resolve_property(aliases, &visited, &cx, &mut diagnostics);
    assert_eq!(
        paths[0].source_path.as_deref(),
        Some("[id=road_id]named_aliases{sortKey=road}/aliases")
    );

    // On its own a mixin has no table to read from
    let cx = provider.create_initial_context(named.id, true);
    assert_eq!(cx.source_table(), None);

    let paths = provider.resolve_property(aliases, &visited, &cx, &mut diagnostics);
    assert_eq!(
        paths[0].source_path.as_deref(),
        Some("[id=named_id]named_aliases{sortKey=named}/aliases")
    );
}
