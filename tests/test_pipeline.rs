extern crate coco_overlay;

use std::path::Path;
use coco_overlay::common::{OverlayCanvas, OverlayConfig};
use coco_overlay::data::DEFAULT_PALETTE;
use coco_overlay::rendering::OverlayViewer;
use coco_overlay::{run_with_viewer, OverlayError, RunSummary};
use image::Rgb;


#[derive(Default)]
struct RecordingViewer {
    captions: Vec<String>,
    sizes: Vec<(u32, u32)>,
}

impl OverlayViewer for RecordingViewer {
    fn show(&mut self, canvas: &OverlayCanvas) -> coco_overlay::Result<()> {
        self.captions.push(canvas.caption.clone());
        self.sizes.push(canvas.dimensions());
        Ok(())
    }
}

fn saved_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn saves_overlays_and_reports_missing_images() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out").join("nested");
    fixtures::sample_folder(dir.path());

    let config = OverlayConfig::new(dir.path()).with_save_dir(Some(out.clone()));
    let summary = run_with_viewer(&config, &mut RecordingViewer::default()).unwrap();

    assert_eq!(summary.processed, 3);
    assert_eq!(summary.missing, vec!["gone.png".to_string()]);
    assert!(summary.failed.is_empty());
    assert_eq!(summary.saved.len(), 3);
    assert_eq!(
        saved_names(&out),
        vec!["empty__overlay.png", "park__overlay.png", "street__overlay.png"]
    );

    let street = image::open(out.join("street__overlay.png")).unwrap().to_rgb8();
    assert_eq!(street.dimensions(), (64, 48));
    // category 1 sorts first, so "person" gets the first palette colour; bottom edge of its box
    assert_eq!(*street.get_pixel(35, 35), DEFAULT_PALETTE[0]);
}

#[test]
fn unknown_category_is_drawn_in_fallback_colour() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    fixtures::sample_folder(dir.path());

    let config = OverlayConfig::new(dir.path())
        .with_save_dir(Some(out.clone()))
        .with_subset(Some("park.jpg"));
    run_with_viewer(&config, &mut RecordingViewer::default()).unwrap();

    let park = image::open(out.join("park__overlay.png")).unwrap().to_rgb8();
    assert_eq!(park.dimensions(), (80, 60));
    // outer ring of the bottom edge of bbox [5.5, 30.25, 40, 20] at 3px stroke
    assert_eq!(*park.get_pixel(20, 50), Rgb([255, 255, 255]));
}

#[test]
fn show_passes_captions_to_viewer() {
    let dir = tempfile::tempdir().unwrap();
    fixtures::sample_folder(dir.path());

    let config = OverlayConfig::new(dir.path())
        .with_show(true)
        .with_subset(Some("empty.png, street.png"));
    let mut viewer = RecordingViewer::default();
    let summary = run_with_viewer(&config, &mut viewer).unwrap();

    assert_eq!(summary.processed, 2);
    assert!(summary.saved.is_empty());
    assert_eq!(viewer.captions, vec!["street.png  |  2 bboxes", "empty.png  |  0 bboxes"]);
    assert_eq!(viewer.sizes, vec![(64, 48), (32, 32)]);
}

#[test]
fn subset_without_matches_processes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    fixtures::sample_folder(dir.path());

    let config = OverlayConfig::new(dir.path())
        .with_save_dir(Some(out.clone()))
        .with_subset(Some("not_in_the_dataset.png"));
    let summary = run_with_viewer(&config, &mut RecordingViewer::default()).unwrap();

    assert_eq!(summary.processed, 0);
    assert!(summary.missing.is_empty());
    assert!(saved_names(&out).is_empty());
}

#[test]
fn no_output_requested_still_counts_images() {
    let dir = tempfile::tempdir().unwrap();
    fixtures::sample_folder(dir.path());

    let mut viewer = RecordingViewer::default();
    let summary = run_with_viewer(&OverlayConfig::new(dir.path()), &mut viewer).unwrap();

    assert_eq!(summary.processed, 3);
    assert_eq!(summary.missing, vec!["gone.png".to_string()]);
    assert!(viewer.captions.is_empty());
}

#[test]
fn broken_image_and_bbox_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    fixtures::write_json(dir.path(), "coco.json", &serde_json::json!({
        "images": [
            {"id": 1, "file_name": "corrupt.png"},
            {"id": 2, "file_name": "badbox.png"},
            {"id": 3, "file_name": "fine.png"}
        ],
        "annotations": [
            {"id": 1, "image_id": 2, "category_id": 1, "bbox": [1, 2, 3]},
            {"id": 2, "image_id": 3, "category_id": 1, "bbox": [1, 2, 3, 4]}
        ],
        "categories": [{"id": 1, "name": "thing"}]
    }));
    std::fs::write(dir.path().join("corrupt.png"), b"garbage").unwrap();
    fixtures::write_image(dir.path(), "badbox.png", 16, 16);
    fixtures::write_image(dir.path(), "fine.png", 16, 16);

    let config = OverlayConfig::new(dir.path()).with_save_dir(Some(out.clone()));
    let summary = run_with_viewer(&config, &mut RecordingViewer::default()).unwrap();

    assert_eq!(summary.processed, 1);
    let failed: Vec<&str> = summary.failed.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(failed, vec!["corrupt.png", "badbox.png"]);
    assert_eq!(saved_names(&out), vec!["fine__overlay.png"]);
}

#[test]
fn rendering_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    fixtures::sample_folder(dir.path());
    let first = dir.path().join("first");
    let second = dir.path().join("second");

    for out in [&first, &second] {
        let config = OverlayConfig::new(dir.path()).with_save_dir(Some(out.clone())).with_dpi(96);
        run_with_viewer(&config, &mut RecordingViewer::default()).unwrap();
    }

    for name in ["street__overlay.png", "park__overlay.png", "empty__overlay.png"] {
        let a = image::open(first.join(name)).unwrap().to_rgb8();
        let b = image::open(second.join(name)).unwrap().to_rgb8();
        assert_eq!(a.dimensions(), b.dimensions());
        assert_eq!(a, b, "{name} differs between runs");
    }
}

#[test]
fn fatal_errors_abort_the_run() {
    let dir = tempfile::tempdir().unwrap();

    let missing = OverlayConfig::new(dir.path().join("nope"));
    assert!(matches!(
        run_with_viewer(&missing, &mut RecordingViewer::default()),
        Err(OverlayError::Input(_))
    ));

    let file = dir.path().join("file.txt");
    std::fs::write(&file, "x").unwrap();
    assert!(matches!(
        run_with_viewer(&OverlayConfig::new(&file), &mut RecordingViewer::default()),
        Err(OverlayError::Input(_))
    ));

    assert!(matches!(
        run_with_viewer(&OverlayConfig::new(dir.path()), &mut RecordingViewer::default()),
        Err(OverlayError::NotFound(_))
    ));

    fixtures::write_json(dir.path(), "annotations.json", &serde_json::json!({"annotations": [], "categories": []}));
    match run_with_viewer(&OverlayConfig::new(dir.path()), &mut RecordingViewer::default()) {
        Err(OverlayError::Schema(section)) => assert_eq!(section, "images"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn loosely_typed_fields_still_render() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    fixtures::write_json(dir.path(), "coco.json", &serde_json::json!({
        "images": [
            {"id": 1, "file_name": "a.png", "width": "48", "height": null},
            {"id": "2", "file_name": "b.png"},
            {"id": 3}
        ],
        "annotations": [
            {"id": "a1", "image_id": 1, "category_id": 1, "bbox": [2, 30, 10, 10]},
            {"image_id": 1, "category_id": 2, "bbox": [20, 30, 10, 10], "segmentation": "rle"},
            {"id": 9, "image_id": "1", "category_id": 1, "bbox": [0, 0, 5, 5]}
        ],
        "categories": [{"id": 1}, {"id": 2, "name": "dog"}, {"name": "no id"}]
    }));
    fixtures::write_image(dir.path(), "a.png", 48, 48);
    fixtures::write_image(dir.path(), "b.png", 48, 48);

    let config = OverlayConfig::new(dir.path()).with_save_dir(Some(out.clone())).with_show(true);
    let mut viewer = RecordingViewer::default();
    let summary = run_with_viewer(&config, &mut viewer).unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(saved_names(&out), vec!["a__overlay.png"]);
    assert_eq!(viewer.captions, vec!["a.png  |  2 bboxes"]);
    assert_eq!(
        summary.failed,
        vec![
            ("b.png".to_string(), "image entry has no usable 'id'".to_string()),
            ("images[2]".to_string(), "image entry has no usable 'file_name'".to_string()),
        ]
    );

    let a = image::open(out.join("a__overlay.png")).unwrap().to_rgb8();
    // bottom edge of the nameless category's box
    assert_eq!(*a.get_pixel(7, 39), DEFAULT_PALETTE[0]);
}

#[test]
fn huge_boxes_do_not_abort_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    fixtures::write_json(dir.path(), "coco.json", &serde_json::json!({
        "images": [{"id": 1, "file_name": "wide.png"}],
        "annotations": [
            {"id": 1, "image_id": 1, "category_id": 1, "bbox": [0, 0, 3e9, 3e9]},
            {"id": 2, "image_id": 1, "category_id": 1, "bbox": [-3e9, -3e9, 3e9, 3e9]}
        ],
        "categories": [{"id": 1, "name": "sky"}]
    }));
    fixtures::write_image(dir.path(), "wide.png", 40, 30);

    let config = OverlayConfig::new(dir.path()).with_save_dir(Some(out.clone()));
    let summary = run_with_viewer(&config, &mut RecordingViewer::default()).unwrap();

    assert_eq!(summary.processed, 1);
    assert!(summary.failed.is_empty());
    let wide = image::open(out.join("wide__overlay.png")).unwrap().to_rgb8();
    assert_eq!(wide.dimensions(), (40, 30));
}

#[test]
fn saved_overlay_carries_the_caption() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    fixtures::sample_folder(dir.path());

    let config = OverlayConfig::new(dir.path())
        .with_save_dir(Some(out.clone()))
        .with_subset(Some("empty.png"));
    run_with_viewer(&config, &mut RecordingViewer::default()).unwrap();

    let source = image::open(dir.path().join("empty.png")).unwrap().to_rgb8();
    let overlay = image::open(out.join("empty__overlay.png")).unwrap().to_rgb8();
    assert_eq!(overlay.dimensions(), source.dimensions());

    // no boxes on this image, so only the caption band along the top changes it
    let top_changed = (0..32).filter(|&x| overlay.get_pixel(x, 2) != source.get_pixel(x, 2)).count();
    assert_eq!(top_changed, 32);
    for y in 26..32 {
        for x in 0..32 {
            assert_eq!(overlay.get_pixel(x, y), source.get_pixel(x, y));
        }
    }
}

#[test]
fn summary_lists_missing_and_skipped_images() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    fixtures::sample_folder(dir.path());
    std::fs::write(dir.path().join("park.jpg"), b"not a jpeg").unwrap();

    let config = OverlayConfig::new(dir.path()).with_save_dir(Some(out));
    let summary = run_with_viewer(&config, &mut RecordingViewer::default()).unwrap();
    let warnings = summary.warnings();

    assert_eq!(warnings.len(), 4);
    assert_eq!(warnings[0], "The following image files listed in COCO were not found in the folder:");
    assert_eq!(warnings[1], "  - gone.png");
    assert_eq!(warnings[2], "The following images were skipped:");
    assert!(warnings[3].starts_with("  - park.jpg: "), "{}", warnings[3]);
}

#[test]
fn empty_run_warns_about_the_filter() {
    let dir = tempfile::tempdir().unwrap();
    fixtures::sample_folder(dir.path());

    let config = OverlayConfig::new(dir.path()).with_subset(Some("nothing.png"));
    let summary = run_with_viewer(&config, &mut RecordingViewer::default()).unwrap();

    assert_eq!(
        summary.warnings(),
        vec!["No images were processed. Check your --subset filter or that image files exist."]
    );
    assert!(RunSummary::default().warnings()[0].starts_with("No images were processed."));
}
