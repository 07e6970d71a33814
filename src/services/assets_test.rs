use editor::upload::encode_data_uri;

use super::*;

#[test]
fn site_relative_path_resolves_under_root() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("background1.jpg"), b"jpeg").unwrap();
    let resolver = AssetResolver::new(dir.path());
    assert_eq!(resolver.resolve("/background1.jpg"), Some(b"jpeg".to_vec()));
}

#[test]
fn data_uri_resolves_without_touching_disk() {
    let resolver = AssetResolver::new("/nonexistent");
    let uri = encode_data_uri("image/png", b"abc");
    assert_eq!(resolver.resolve(&uri), Some(b"abc".to_vec()));
}

#[test]
fn parent_components_are_rejected() {
    let resolver = AssetResolver::new("/srv/assets");
    assert_eq!(resolver.path_for("../secret.png"), None);
    assert_eq!(resolver.path_for("/img/../../etc/passwd"), None);
    assert_eq!(resolver.path_for(""), None);
}

#[test]
fn missing_asset_resolves_to_none() {
    let dir = tempfile::tempdir().unwrap();
    let resolver = AssetResolver::new(dir.path());
    assert_eq!(resolver.resolve("/background9.jpg"), None);
}
