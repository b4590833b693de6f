//! # End-to-end Pipeline Tests
//!
//! Runs the library pipeline against a generated 500x500 RGB JPEG and checks
//! the artifacts on disk.

use image::{DynamicImage, Rgb, RgbImage};
use logoqr::config::{CONVERTED_LOGO, QUIET_ZONE_MODULES};
use logoqr::qr::{QrErrorLevel, QrPayload};
use logoqr::raster::read_png_dpi;
use logoqr::{LogoQrError, OutputProfile, Pipeline, PipelineConfig};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

/// Solid magenta is easy to tell apart from black and white modules.
const LOGO_COLOR: Rgb<u8> = Rgb([220, 0, 220]);

fn write_logo(path: &Path) {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(500, 500, LOGO_COLOR))
        .save(path)
        .expect("write logo");
}

fn config_in(dir: &Path) -> PipelineConfig {
    PipelineConfig {
        logo: dir.join("logo.jpeg"),
        out_dir: dir.to_path_buf(),
        ..Default::default()
    }
}

fn is_logo_pixel(px: &Rgb<u8>) -> bool {
    px[0] > 150 && px[1] < 80 && px[2] > 150
}

#[test]
fn default_run_produces_all_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_logo(&config.logo);

    let summary = Pipeline::new(config.clone()).run().unwrap();
    assert_eq!(summary.failed(), 0);

    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    for expected in [
        CONVERTED_LOGO,
        "qr_print_ready.png",
        "qr_digital.png",
        "qr_editable.svg",
    ] {
        assert!(names.iter().any(|n| n == expected), "missing {expected}");
        assert!(fs::metadata(dir.path().join(expected)).unwrap().len() > 0);
    }
}

#[test]
fn converted_logo_keeps_size_and_declares_dpi() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_logo(&config.logo);

    Pipeline::new(config.clone()).run().unwrap();

    let converted = config.converted_logo_path();
    let img = image::open(&converted).unwrap();
    assert_eq!((img.width(), img.height()), (500, 500));
    assert_eq!(read_png_dpi(&converted).unwrap(), Some(300));
}

#[test]
fn composites_are_square_opaque_with_centered_logo() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_logo(&config.logo);

    let summary = Pipeline::new(config.clone()).run().unwrap();

    for profile in [OutputProfile::PRINT, OutputProfile::DIGITAL] {
        let img = image::open(config.output_path(&profile)).unwrap();
        assert!(!img.color().has_alpha());
        assert!(img.to_rgba8().pixels().all(|p| p[3] == 255));

        let rgb = img.to_rgb8();
        let (w, h) = rgb.dimensions();
        assert_eq!(w, h);
        assert_eq!(w, (summary.modules + 2 * QUIET_ZONE_MODULES) * profile.scale);

        let size = w / 5;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (u32::MAX, u32::MAX, 0, 0);
        for (x, y, px) in rgb.enumerate_pixels() {
            if is_logo_pixel(px) {
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }
        assert_eq!(max_x - min_x + 1, size);
        assert_eq!(max_y - min_y + 1, size);
        let expected = (w - size) / 2;
        assert!(min_x.abs_diff(expected) <= 1);
        assert!(min_y.abs_diff(expected) <= 1);
    }
}

/// Every symbol found in `path`, decoded to text.
fn decode_symbols(path: &Path) -> Vec<String> {
    let gray = image::open(path).unwrap().to_luma8();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        gray.width() as usize,
        gray.height() as usize,
        |x, y| gray.get_pixel(x as u32, y as u32)[0],
    );
    prepared
        .detect_grids()
        .iter()
        .map(|grid| grid.decode().expect("decode grid").1)
        .collect()
}

#[test]
fn composites_decode_back_to_url() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_logo(&config.logo);

    Pipeline::new(config.clone()).run().unwrap();

    for profile in [OutputProfile::PRINT, OutputProfile::DIGITAL] {
        let decoded = decode_symbols(&config.output_path(&profile));
        assert_eq!(decoded, vec![config.url.clone()], "{}", profile.name);
    }
}

#[test]
fn print_copy_is_larger_than_digital_copy() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_logo(&config.logo);

    Pipeline::new(config.clone()).run().unwrap();

    let print = image::open(config.output_path(&OutputProfile::PRINT)).unwrap();
    let digital = image::open(config.output_path(&OutputProfile::DIGITAL)).unwrap();
    assert_eq!(print.width(), digital.width() * 2);
    assert_eq!(read_png_dpi(&config.output_path(&OutputProfile::PRINT)).unwrap(), Some(300));
}

#[test]
fn svg_has_no_logo_and_matches_encoder() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_logo(&config.logo);

    Pipeline::new(config.clone()).run().unwrap();

    let svg = fs::read_to_string(config.output_path(&OutputProfile::VECTOR)).unwrap();
    let qr = QrPayload::new(config.url.as_str(), QrErrorLevel::H).encode().unwrap();
    assert_eq!(svg, qr.render_svg(OutputProfile::VECTOR.scale));
    assert!(!svg.contains("<image"));
}

#[test]
fn missing_logo_aborts_without_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let err = Pipeline::new(config).run().unwrap_err();

    assert!(matches!(err, LogoQrError::MissingLogo(_)));
    assert!(err.to_string().contains("logo.jpeg"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn corrupted_logo_reports_conversion_failure() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    fs::write(&config.logo, b"not a jpeg at all").unwrap();

    let err = Pipeline::new(config.clone()).run().unwrap_err();

    assert!(matches!(err, LogoQrError::LogoConversion { .. }));
    assert!(!config.output_path(&OutputProfile::PRINT).exists());
    assert!(!config.output_path(&OutputProfile::DIGITAL).exists());
    assert!(!config.converted_logo_path().exists());
}
