//! Share links end to end: a poster goes out through `encode_config`, travels
//! as a URL, and comes back through `extract_encoded` + `decode_config`.

use map_poster::codec::{self, ShareRecord};
use map_poster::poster::{
    AspectRatio, CUSTOM_PALETTE_ID, Camera, Location, Orientation, PosterConfig, TextPosition,
};
use map_poster::styles;

fn kyoto_poster() -> PosterConfig {
    let style = styles::get_style_by_id("topographic").unwrap();
    let mut poster = PosterConfig::with_style(style);
    poster.palette = style.palette("desert").unwrap().clone();
    poster.location = Location {
        name: "Kyoto".to_string(),
        city: Some("Kyoto".to_string()),
        subtitle: Some("Japan".to_string()),
        center: [135.7681, 35.0116],
        bounds: [[135.6581, 34.9316], [135.8781, 35.0916]],
        zoom: 11.5,
    };
    poster.format.aspect_ratio = AspectRatio::Iso;
    poster.format.orientation = Orientation::Landscape;
    poster.typography.position = TextPosition::Top;
    poster
}

#[test]
fn poster_survives_a_share_url() {
    let poster = kyoto_poster();
    let url = codec::share_url("https://example.com/editor?lang=ja", &codec::encode_config(&poster));
    assert!(url.starts_with("https://example.com/editor?lang=ja#config="));

    let patch = codec::decode_config(codec::extract_encoded(&url)).unwrap();
    let restored = PosterConfig::default().merged(patch);
    assert_eq!(restored, poster);
}

#[test]
fn payload_is_url_safe() {
    let encoded = codec::encode_config(&kyoto_poster());
    assert!(!encoded.is_empty());
    assert!(
        encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "+-$".contains(c)),
        "unexpected character in {encoded}"
    );
}

#[test]
fn custom_palette_travels_inline() {
    let mut poster = kyoto_poster();
    poster.palette.id = CUSTOM_PALETTE_ID.to_string();
    poster.palette.accent = Some("#c0392b".to_string());

    let patch = codec::decode_config(&codec::encode_config(&poster)).unwrap();
    let palette = patch.palette.unwrap();
    assert_eq!(palette.id, CUSTOM_PALETTE_ID);
    assert_eq!(palette.name, "AI Generated");
    assert_eq!(palette.style, "custom");
    assert_eq!(palette.background, poster.palette.background);
    assert_eq!(palette.border, "#c0392b");
}

#[test]
fn camera_state_is_carried_verbatim() {
    let mut poster = kyoto_poster();
    let camera: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(r#"{"pitch": 45, "bearing": -17.5}"#).unwrap();
    poster.camera = Some(Camera(camera.clone()));

    let patch = codec::decode_config(&codec::encode_config(&poster)).unwrap();
    assert_eq!(patch.camera, Some(Camera(camera)));
}

#[test]
fn partial_link_leaves_editor_state_alone() {
    let record: ShareRecord = serde_json::from_str(r#"{"style":"noir"}"#).unwrap();
    let encoded = lz_str::compress_to_encoded_uri_component(
        serde_json::to_string(&record).unwrap().as_str(),
    );

    let editor = kyoto_poster();
    let restored = editor.clone().merged(codec::decode_config(&encoded).unwrap());
    assert_eq!(restored.style.id, "noir");
    assert_eq!(restored.palette.id, "midnight");
    assert_eq!(restored.location, editor.location);
    assert_eq!(restored.format, editor.format);
}

#[test]
fn unusable_links_decode_to_none() {
    assert!(codec::decode_config("").is_none());
    assert!(codec::decode_config("not a payload at all!").is_none());

    let unknown_style = lz_str::compress_to_encoded_uri_component(r#"{"style":"vaporwave"}"#);
    assert!(codec::decode_config(&unknown_style).is_none());

    let not_json = lz_str::compress_to_encoded_uri_component("hello");
    assert!(codec::decode_config(&not_json).is_none());
}
