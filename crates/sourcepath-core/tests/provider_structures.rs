use sourcepath_core::{
    provider::PLACEHOLDER_PATH,
    schema::{ClassId, PropertyId},
    EncodingContext, SourcePathInfo, VisitedChain,
};
use std::sync::Arc;
use std_util::prelude::*;

fn property(class: usize, index: usize) -> PropertyId {
    ClassId(class).property(index)
}

#[test]
fn visited_chain_is_persistent() {
    let empty = VisitedChain::new();
    let one = empty.push(property(0, 1));
    let two = one.push(property(1, 0));
    let branch = one.push(property(2, 3));

    assert!(empty.is_empty());
    assert_eq!(one.len(), 1);
    assert_eq!(two.len(), 2);
    assert_eq!(two.last(), Some(property(1, 0)));
    assert_eq!(two.to_vec(), vec![property(0, 1), property(1, 0)]);
    assert_eq!(
        branch.iter_rev().collect::<Vec<_>>(),
        vec![property(2, 3), property(0, 1)]
    );

    // Extending never alters the original
    assert_eq!(one.to_vec(), vec![property(0, 1)]);
    assert_none!(empty.last());
}

#[test]
fn visited_chain_equality() {
    let a: VisitedChain = [property(0, 0), property(1, 1)].into_iter().collect();
    let b = VisitedChain::new().push(property(0, 0)).push(property(1, 1));

    assert_eq!(a, b);
    assert_ne!(a, b.push(property(2, 2)));
}

#[test]
fn context_ancestors() {
    let root = Arc::new(EncodingContext::root(ClassId(0), Some("road".into()), false));
    let child = Arc::new(EncodingContext {
        owning_type: ClassId(1),
        source_table: None,
        in_fragment: false,
        parent: Some(root.clone()),
    });
    let grandchild = EncodingContext {
        owning_type: ClassId(2),
        source_table: Some("road_address".into()),
        in_fragment: false,
        parent: Some(child),
    };

    let owners: Vec<_> = grandchild.ancestors().map(|cx| cx.owning_type).collect();
    assert_eq!(owners, vec![ClassId(1), ClassId(0)]);
    assert_eq!(grandchild.depth(), 2);
    assert_eq!(root.depth(), 0);
    assert_eq!(grandchild.source_table(), Some("road_address"));
}

#[test]
fn path_info_builders() {
    let info = SourcePathInfo::placeholder(true);
    assert!(info.is_placeholder());
    assert_eq!(info.source_path.as_deref(), Some(PLACEHOLDER_PATH));

    let info = SourcePathInfo::empty(false).ref_type("Road");
    assert_none!(info.source_path);
    assert!(!info.targets_single_value);
    assert_eq!(info.ref_type.as_deref(), Some("Road"));
    assert!(!info.is_placeholder());
}
