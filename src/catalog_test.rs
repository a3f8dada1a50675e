#![allow(clippy::float_cmp)]

use std::collections::HashSet;

use super::*;

#[test]
fn six_categories_in_palette_order() {
    let ids: Vec<&str> = categories().iter().map(|c| c.id).collect();
    assert_eq!(ids, ["downlights", "spotlights", "linear", "tracks", "external", "decorative"]);
}

#[test]
fn type_ids_are_unique_across_catalog() {
    let mut seen = HashSet::new();
    for cat in categories() {
        for t in cat.types {
            assert!(seen.insert(t.id), "duplicate type id {}", t.id);
        }
    }
    assert_eq!(seen.len(), 22);
}

#[test]
fn defaults_are_within_ranges() {
    for cat in categories() {
        assert!(!cat.types.is_empty());
        for t in cat.types {
            assert!((0.0..=100.0).contains(&t.default_intensity), "{}", t.id);
            assert!(t.default_width > 0.0 && t.default_height > 0.0, "{}", t.id);
            assert!(t.default_color.starts_with('#') && t.default_color.len() == 7, "{}", t.id);
        }
    }
}

#[test]
fn round_downlight_defaults() {
    let (cat, t) = light_type("downlights", "round_downlight").unwrap();
    assert_eq!(cat.name, "Downlights");
    assert_eq!(t.shape, LightShape::Round);
    assert_eq!((t.default_width, t.default_height), (15.0, 15.0));
    assert_eq!(t.default_intensity, 60.0);
    assert_eq!(t.default_color, "#FFF0D9");
    assert!(!t.is_external);
}

#[test]
fn external_category_is_all_outdoor() {
    let cat = category("external").unwrap();
    assert!(cat.types.iter().all(|t| t.is_external));
    let others = categories().iter().filter(|c| c.id != "external");
    assert!(others.flat_map(|c| c.types.iter()).all(|t| !t.is_external));
}

#[test]
fn light_type_rejects_mismatched_category() {
    assert!(light_type("spotlights", "round_downlight").is_none());
    assert!(light_type("nope", "round_downlight").is_none());
}

#[test]
fn find_type_searches_every_category() {
    let (cat, t) = find_type("chandelier").unwrap();
    assert_eq!(cat.id, "decorative");
    assert_eq!(t.shape, LightShape::Custom);
    assert!(find_type("lava_lamp").is_none());
}

#[test]
fn defaults_resolve() {
    assert!(light_type(DEFAULT_CATEGORY_ID, DEFAULT_TYPE_ID).is_some());
}

#[test]
fn shape_serde_is_lowercase() {
    let cases = [
        (LightShape::Round, "\"round\""),
        (LightShape::Square, "\"square\""),
        (LightShape::Rectangular, "\"rectangular\""),
        (LightShape::Linear, "\"linear\""),
        (LightShape::Track, "\"track\""),
        (LightShape::Spike, "\"spike\""),
        (LightShape::Bollard, "\"bollard\""),
        (LightShape::Custom, "\"custom\""),
    ];
    for (shape, expected) in cases {
        assert_eq!(serde_json::to_string(&shape).unwrap(), expected);
        let back: LightShape = serde_json::from_str(expected).unwrap();
        assert_eq!(back, shape);
    }
}

#[test]
fn shape_deserialize_invalid_rejects() {
    assert!(serde_json::from_str::<LightShape>("\"hexagon\"").is_err());
}

#[test]
fn warm_white_preset_matches_downlight_default() {
    let (_, round) = find_type("round_downlight").unwrap();
    let warm = crate::consts::LIGHT_COLORS.iter().find(|(name, _)| *name == "Warm White").unwrap();
    assert_eq!(warm.1, round.default_color);
}
