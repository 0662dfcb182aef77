// Resource scanning against real directory trees.

use std::fs;
use std::path::Path;

use image::codecs::gif::GifEncoder;
use image::{Delay, Frame, Rgba, RgbaImage};
use saver_board::catalog::ResourceCatalog;
use saver_board::error::LoadError;
use tempfile::TempDir;

fn write_png(path: &Path, rgba: [u8; 4]) {
    RgbaImage::from_pixel(8, 8, Rgba(rgba)).save(path).unwrap();
}

fn write_gif(path: &Path, frames: usize) {
    let file = fs::File::create(path).unwrap();
    let mut encoder = GifEncoder::new(file);
    let frames = (0..frames).map(|i| {
        let shade = (i * 60) as u8;
        Frame::from_parts(RgbaImage::from_pixel(8, 8, Rgba([shade, 0, 255 - shade, 255])), 0, 0, Delay::from_numer_denom_ms(100, 1))
    });
    encoder.encode_frames(frames).unwrap();
}

fn bundle(root: &Path, dir: &str, context: &str) -> std::path::PathBuf {
    let path = root.join(dir);
    fs::create_dir_all(&path).unwrap();
    fs::write(path.join("context.json"), context).unwrap();
    path
}

#[test]
fn full_bundle_loads_with_every_reaction() {
    let root = TempDir::new().unwrap();
    let dir = bundle(
        root.path(),
        "waltuh",
        r#"{"resourceName":"$asDirectory","idle":"idle.png","wallhit":"flash.gif","cornerhit":"corner.png","resetAnimation":true}"#,
    );
    write_png(&dir.join("idle.png"), [0, 0, 255, 255]);
    write_gif(&dir.join("flash.gif"), 3);
    write_png(&dir.join("corner.png"), [255, 255, 0, 255]);

    let catalog = ResourceCatalog::scan(root.path());
    assert_eq!(catalog.len(), 1);
    assert!(catalog.diagnostics().is_empty());

    let b = catalog.get_by_name("waltuh").expect("named after its directory");
    assert!(b.descriptor.wall_hit_enabled());
    assert!(b.descriptor.corner_hit_enabled());
    assert!(b.descriptor.reset_animation_on_hit);
    assert_eq!(b.descriptor.idle_path, dir.join("idle.png"));
    assert_eq!(b.art.wall_hit.as_ref().map(|f| f.len()), Some(3));
    assert_eq!(b.art.idle.len(), 1);
}

#[test]
fn explicit_name_wins_over_directory() {
    let root = TempDir::new().unwrap();
    let dir = bundle(root.path(), "folder", r#"{"resourceName":"Walter","idle":"idle.png"}"#);
    write_png(&dir.join("idle.png"), [1, 2, 3, 255]);

    let catalog = ResourceCatalog::scan(root.path());
    assert!(catalog.get_by_name("Walter").is_some());
    assert!(catalog.get_by_name("folder").is_none());
}

#[test]
fn missing_wallhit_file_disables_only_that_reaction() {
    let root = TempDir::new().unwrap();
    let dir = bundle(
        root.path(),
        "cat",
        r#"{"resourceName":"cat","idle":"idle.png","wallhit":"gone.png","cornerhit":"corner.png"}"#,
    );
    write_png(&dir.join("idle.png"), [1, 2, 3, 255]);
    write_png(&dir.join("corner.png"), [4, 5, 6, 255]);

    let catalog = ResourceCatalog::scan(root.path());
    let b = catalog.get_by_name("cat").unwrap();
    assert!(!b.descriptor.wall_hit_enabled());
    assert!(b.descriptor.corner_hit_enabled());
    assert!(!b.descriptor.reset_animation_on_hit);
    assert!(b.art.wall_hit.is_none());
    assert_eq!(
        catalog.diagnostics(),
        &[LoadError::MissingOptionalAsset { bundle: "cat".into(), key: "wallhit" }]
    );
}

#[test]
fn broken_bundles_are_skipped_and_the_rest_load() {
    let root = TempDir::new().unwrap();

    fs::create_dir_all(root.path().join("a_no_context")).unwrap();
    bundle(root.path(), "b_no_idle", r#"{"resourceName":"b","idle":"missing.png"}"#);
    bundle(root.path(), "c_bad_json", r#"{"resourceName": "c", "idle": "#);
    bundle(root.path(), "d_no_idle_key", r#"{"resourceName":"d"}"#);
    let good = bundle(root.path(), "e_good", r#"{"resourceName":"e","idle":"idle.png"}"#);
    write_png(&good.join("idle.png"), [9, 9, 9, 255]);
    fs::write(root.path().join("stray_file.txt"), "not a bundle").unwrap();

    let catalog = ResourceCatalog::scan(root.path());
    let names: Vec<_> = catalog.bundles().iter().map(|b| b.descriptor.name.as_str()).collect();
    assert_eq!(names, ["e"]);

    let skipped: Vec<_> = catalog.diagnostics().iter().filter(|d| d.skips_bundle()).collect();
    assert_eq!(skipped.len(), 4);
    assert!(matches!(skipped[0], LoadError::MissingDescriptor { .. }));
    assert!(matches!(skipped[1], LoadError::MissingRequiredAsset { .. }));
    assert!(matches!(skipped[2], LoadError::MalformedDescriptor { .. }));
    assert!(matches!(skipped[3], LoadError::MalformedDescriptor { .. }));
}

#[test]
fn undecodable_idle_skips_the_bundle() {
    let root = TempDir::new().unwrap();
    let dir = bundle(root.path(), "junk", r#"{"resourceName":"junk","idle":"idle.png"}"#);
    fs::write(dir.join("idle.png"), b"definitely not a png").unwrap();

    let catalog = ResourceCatalog::scan(root.path());
    assert!(catalog.is_empty());
    assert!(matches!(catalog.diagnostics(), [LoadError::MissingRequiredAsset { .. }, ..]));
}

#[test]
fn bundles_come_back_in_directory_order() {
    let root = TempDir::new().unwrap();
    for name in ["zeta", "alpha", "mid"] {
        let dir = bundle(root.path(), name, r#"{"resourceName":"$asDirectory","idle":"i.png"}"#);
        write_png(&dir.join("i.png"), [0, 0, 0, 255]);
    }
    let catalog = ResourceCatalog::scan(root.path());
    let names: Vec<_> = catalog.bundles().iter().map(|b| b.descriptor.name.as_str()).collect();
    assert_eq!(names, ["alpha", "mid", "zeta"]);
}

#[test]
fn random_pick_comes_from_the_catalog() {
    use rand::SeedableRng;

    let root = TempDir::new().unwrap();
    for name in ["one", "two"] {
        let dir = bundle(root.path(), name, r#"{"resourceName":"$asDirectory","idle":"i.png"}"#);
        write_png(&dir.join("i.png"), [0, 0, 0, 255]);
    }
    let mut rng = rand::rngs::StdRng::seed_from_u64(3);
    let catalog = ResourceCatalog::scan(root.path());
    for _ in 0..10 {
        let name = &catalog.random(&mut rng).unwrap().descriptor.name;
        assert!(name == "one" || name == "two");
    }
    assert!(ResourceCatalog::default().random(&mut rng).is_none());
}
