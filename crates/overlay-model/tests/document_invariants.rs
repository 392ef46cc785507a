use proptest::prelude::*;
use studio_overlay_model::{
    DocumentError, MediaKind, MediaRef, OverlayDocument, MAX_TEXT_LAYERS,
};

#[derive(Debug, Clone)]
enum Edit {
    Add,
    Remove(usize),
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![Just(Edit::Add), (0usize..4).prop_map(Edit::Remove)]
}

proptest! {
    #[test]
    fn layer_count_stays_within_bounds(edits in prop::collection::vec(edit(), 0..40)) {
        let mut doc = OverlayDocument::new(MediaRef::new("img", MediaKind::Image));
        for edit in edits {
            let before = doc.clone();
            match edit {
                Edit::Add => match doc.add_layer() {
                    Ok(_) => prop_assert_eq!(doc.len(), before.len() + 1),
                    Err(DocumentError::LayerCapReached { .. }) => prop_assert_eq!(&doc, &before),
                    Err(other) => prop_assert!(false, "unexpected error: {other}"),
                },
                Edit::Remove(index) => {
                    let Some(id) = doc.id_at(index).cloned() else { continue };
                    match doc.remove_layer(&id) {
                        Ok(_) => prop_assert_eq!(doc.len(), before.len() - 1),
                        Err(DocumentError::LastLayer) => prop_assert_eq!(&doc, &before),
                        Err(other) => prop_assert!(false, "unexpected error: {other}"),
                    }
                }
            }
            prop_assert!((1..=MAX_TEXT_LAYERS).contains(&doc.len()));
        }
    }
}

#[test]
fn survivors_keep_relative_order() {
    let mut doc = OverlayDocument::new(MediaRef::new("img", MediaKind::Image));
    let a = doc.id_at(0).cloned().unwrap();
    let b = doc.add_layer().unwrap();
    let c = doc.add_layer().unwrap();

    doc.remove_layer(&a).unwrap();
    let order: Vec<_> = doc.layers().map(|(id, _)| id.clone()).collect();
    assert_eq!(order, vec![b, c]);
}

#[test]
fn saved_document_with_too_many_layers_is_rejected() {
    let json = r#"{
        "media": { "asset_id": "img", "kind": "image" },
        "layers": {
            "a": { "text": "1" }, "b": { "text": "2" },
            "c": { "text": "3" }, "d": { "text": "4" }
        }
    }"#;
    let err = serde_json::from_str::<OverlayDocument>(json).unwrap_err();
    assert!(err.to_string().contains("1 to 3 layers"));
}
