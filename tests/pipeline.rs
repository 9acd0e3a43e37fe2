use packfont::atlas::TextureSize;
use packfont::glyph::RasterError;
use packfont::metrics::HEADER;
use packfont::pipeline::{build_artifacts, output_paths, write_artifacts};
use packfont::{CodepointRange, GlyphRasterizer, GlyphRequest, PackConfig, PackfontError, RasterizedGlyph};
use std::path::PathBuf;

/// Stand-in for a font: every glyph is a solid box
struct BoxFont {
    width: u32,
    height: u32,
}

impl GlyphRasterizer for BoxFont {
    fn rasterize(&self, request: &GlyphRequest) -> Result<RasterizedGlyph, RasterError> {
        if request.codepoint == 32 {
            return Ok(RasterizedGlyph::blank(self.width as f32 * 0.5));
        }
        Ok(RasterizedGlyph {
            width: self.width,
            height: self.height,
            coverage: vec![180; (self.width * self.height) as usize],
            x_offset: 0.0,
            y_offset: -(self.height as f32),
            x_offset2: self.width as f32,
            y_offset2: 0.0,
            advance_width: self.width as f32 - 1.0,
        })
    }
}

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("packfont-it-{}-{}", tag, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_known_glyph_schema() {
    let config = PackConfig {
        padding: 0,
        range: CodepointRange::new(65, 66),
        ..PackConfig::new("box", 12.0, "box")
    };
    let artifacts = build_artifacts(&config, &BoxFont { width: 10, height: 12 }).unwrap();
    assert_eq!(
        artifacts.metrics,
        format!("{}\n65 66\n65\t0\t0\t10\t12\t0\t-12\t10\t0\t9\n", HEADER)
    );
    assert_eq!(artifacts.size, TextureSize::square(64));
}

#[test]
fn test_ascii_run_is_deterministic() {
    let config = PackConfig::new("box", 12.0, "box");
    let font = BoxFont { width: 7, height: 11 };
    let a = build_artifacts(&config, &font).unwrap();
    let b = build_artifacts(&config, &font).unwrap();
    assert_eq!(a, b);

    // 96 rows after the header and range lines, ascending
    let rows: Vec<u32> = a
        .metrics
        .lines()
        .skip(2)
        .map(|l| l.split('\t').next().unwrap().parse().unwrap())
        .collect();
    assert_eq!(rows, (32..128).collect::<Vec<u32>>());
}

#[test]
fn test_grows_past_start_size() {
    let config = PackConfig::new("box", 20.0, "box");
    let artifacts = build_artifacts(&config, &BoxFont { width: 20, height: 24 }).unwrap();
    assert!(artifacts.size.area() > TextureSize::square(64).area());

    let image = image::load_from_memory(&artifacts.png).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (artifacts.size.width, artifacts.size.height));
    // top-left corner is padding, the first glyph (space) has no ink
    assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 0]);
    // every pixel is either ink or clear
    assert!(image
        .pixels()
        .all(|p| p.0 == [0, 0, 0, 255] || p.0 == [0, 0, 0, 0]));
}

#[test]
fn test_exhaustion_writes_nothing() {
    let dir = scratch_dir("exhausted");
    let stem = dir.join("huge").to_string_lossy().to_string();
    let config = PackConfig {
        max_dim: 128,
        ..PackConfig::new("box", 200.0, &stem)
    };
    let err = build_artifacts(&config, &BoxFont { width: 200, height: 200 }).unwrap_err();
    match err {
        PackfontError::PackingExhausted(e) => {
            assert_eq!(e.attempts.len(), 3);
            assert_eq!(e.max_dim, 128);
        }
        other => panic!("expected exhaustion, got {}", other),
    }
    let (png, metrics) = output_paths(&stem);
    assert!(!png.exists());
    assert!(!metrics.exists());
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_written_files_parse_back() {
    let dir = scratch_dir("write");
    let stem = dir.join("digits.16").to_string_lossy().to_string();
    let config = PackConfig {
        range: CodepointRange::new(48, 58),
        ..PackConfig::new("box", 16.0, &stem)
    };
    let artifacts = build_artifacts(&config, &BoxFont { width: 9, height: 16 }).unwrap();
    let (png_path, metrics_path) = output_paths(&stem);
    write_artifacts(&artifacts, &png_path, &metrics_path).unwrap();

    assert!(png_path.ends_with("digits.16.png"));
    let text = std::fs::read_to_string(&metrics_path).unwrap();
    assert_eq!(text, artifacts.metrics);
    assert_eq!(text.lines().nth(1), Some("48 58"));
    for line in text.lines().skip(2) {
        let fields: Vec<i64> = line.split('\t').map(|f| f.parse().unwrap()).collect();
        assert_eq!(fields.len(), 10);
        // x1 - x0 and y1 - y0 match the box
        assert_eq!((fields[3] - fields[1], fields[4] - fields[2]), (9, 16));
    }

    let image = image::open(&png_path).unwrap();
    assert_eq!((image.width(), image.height()), (64, 64));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_invalid_config_fails_before_packing() {
    let config = PackConfig {
        oversampling: 0,
        ..PackConfig::new("box", 16.0, "never")
    };
    let err = build_artifacts(&config, &BoxFont { width: 1, height: 1 }).unwrap_err();
    assert!(matches!(err, PackfontError::Config(_)));
}
