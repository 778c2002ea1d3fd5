use sourcepath_core::{
    overlay::{EncodingInfo, EncodingInfos},
    ValueType,
};
use std_util::prelude::*;

fn entry(class: &str, property: &str, table: &str, path: &str, order: i64) -> EncodingInfo {
    EncodingInfo {
        original_schema_name: None,
        original_class_name: None,
        original_property_name: None,
        schema_name: "transport".to_string(),
        class_name: class.to_string(),
        property_name: property.to_string(),
        source_table: Some(table.to_string()),
        source_path: Some(path.to_string()),
        value_type: None,
        ref_type: None,
        ref_uri_template: None,
        target_table: None,
        order,
    }
}

#[test]
fn lookup_filters_by_table_and_names() {
    let overlay = EncodingInfos::new(vec![
        entry("Road", "name", "road", "road_name", 0),
        entry("Road", "name", "road_v1", "legacy_name", 0),
        entry("Lane", "name", "road", "lane_name", 0),
    ])
    .unwrap();

    let found = overlay.lookup("name", "Road", "transport", Some("road"));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].source_path.as_deref(), Some("road_name"));

    assert_empty!(overlay.lookup("name", "Road", "other", Some("road")));
    assert_empty!(overlay.lookup("name", "Road", "transport", None));
}

#[test]
fn entries_without_table_never_match() {
    let mut untabled = entry("Road", "tags", "road", "road_tags", 0);
    untabled.source_table = None;
    let overlay = EncodingInfos::new(vec![untabled]).unwrap();

    assert_empty!(overlay.lookup("tags", "Road", "transport", None));
    assert_empty!(overlay.lookup("tags", "Road", "transport", Some("road")));
}

#[test]
fn lookup_orders_candidates() {
    let overlay = EncodingInfos::new(vec![
        entry("Road", "geometry", "road", "centre", 2),
        entry("Road", "geometry", "road", "start", 1),
        entry("Road", "geometry", "road", "end", 2),
    ])
    .unwrap();

    let paths: Vec<_> = overlay
        .lookup("geometry", "Road", "transport", Some("road"))
        .into_iter()
        .map(|e| e.source_path.as_deref().unwrap())
        .collect();

    assert_eq!(paths, ["start", "centre", "end"]);
}

#[test]
fn lookup_prefers_original_names() {
    let mut renamed = entry("Street", "label", "road", "renamed_label", 0);
    renamed.original_class_name = Some("Road".to_string());
    renamed.original_property_name = Some("name".to_string());

    let overlay = EncodingInfos::new(vec![
        entry("Road", "name", "road", "current_name", 0),
        renamed,
    ])
    .unwrap();

    let found = overlay.lookup("name", "Road", "transport", Some("road"));
    // Both entries match by original names; the unrenamed one has no
    // original names recorded and falls back to its current ones.
    assert_eq!(found.len(), 2);

    let found = overlay.lookup("label", "Street", "transport", Some("road"));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].source_path.as_deref(), Some("renamed_label"));
}

#[test]
fn load_from_json() {
    let overlay = assert_ok!(EncodingInfos::from_json(
        r#"[
            {
                "schemaName": "transport",
                "className": "Road",
                "propertyName": "tags",
                "sourceTable": "road",
                "sourcePath": "[fid=road_fk]legacy_tags/tag",
                "valueType": "string",
                "order": 3
            }
        ]"#
    ));

    assert_eq!(overlay.len(), 1);
    let found = overlay.lookup("tags", "Road", "transport", Some("road"));
    assert_eq!(found[0].value_type, Some(ValueType::String));
    assert_eq!(found[0].order, 3);
}

#[test]
fn load_rejects_invalid_entries() {
    let err = assert_err!(EncodingInfos::from_json("{}"));
    assert!(err.to_string().starts_with("invalid encoding info: cannot parse"));

    let err = assert_err!(EncodingInfos::from_json(
        r#"[{ "schemaName": "t", "className": "", "propertyName": "p" }]"#
    ));
    assert!(err.is_invalid_overlay());
}
