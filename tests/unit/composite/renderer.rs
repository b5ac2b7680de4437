use super::*;
use crate::catalog::Catalog;

const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const YELLOW: [u8; 4] = [255, 255, 0, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

fn solid(w: u32, h: u32, px: [u8; 4]) -> Snapshot {
    Snapshot::from_image(image::RgbaImage::from_pixel(w, h, image::Rgba(px)))
}

fn square_spec(images: Vec<Snapshot>) -> CompositeSpec {
    let catalog = Catalog::builtin();
    CompositeSpec::new(
        catalog.layout("4-square").unwrap().clone(),
        catalog.theme("classic").unwrap().clone(),
    )
    .with_images(images)
}

fn four_colors() -> Vec<Snapshot> {
    vec![
        solid(64, 48, RED),
        solid(64, 48, GREEN),
        solid(64, 48, BLUE),
        solid(64, 48, YELLOW),
    ]
}

fn assert_close(actual: Option<PremulRgba8>, expected: [u8; 4]) {
    let actual = actual.unwrap();
    for i in 0..4 {
        assert!(
            actual[i].abs_diff(expected[i]) <= 1,
            "{actual:?} != {expected:?}"
        );
    }
}

#[test]
fn four_photos_fill_four_bordered_cells() {
    let strip = CompositeRenderer::default()
        .render(&square_spec(four_colors()))
        .unwrap();
    assert_eq!(strip.size(), PixelSize::new(500, 500).unwrap());

    assert_close(strip.pixel(125, 125), RED);
    assert_close(strip.pixel(375, 125), GREEN);
    assert_close(strip.pixel(125, 375), BLUE);
    assert_close(strip.pixel(375, 375), YELLOW);

    for (x, y) in [(249, 100), (250, 100), (100, 249), (100, 250), (0, 100), (499, 400)] {
        assert_eq!(strip.pixel(x, y), Some(WHITE), "({x},{y})");
    }
    assert_close(strip.pixel(2, 100), RED);
}

#[test]
fn missing_photos_leave_background_cells() {
    let mut images = four_colors();
    images.truncate(2);
    let strip = CompositeRenderer::default()
        .render(&square_spec(images))
        .unwrap();

    assert_close(strip.pixel(125, 125), RED);
    assert_close(strip.pixel(375, 125), GREEN);
    assert_eq!(strip.pixel(125, 375), Some(BLACK));
    assert_eq!(strip.pixel(375, 375), Some(BLACK));
    assert_eq!(strip.pixel(250, 375), Some(BLACK));
}

#[test]
fn output_size_is_layout_size_for_any_input() {
    let catalog = Catalog::builtin();
    let theme = catalog.theme("modern").unwrap().clone();
    let inputs: Vec<Vec<Snapshot>> = vec![
        Vec::new(),
        vec![solid(1, 1, RED)],
        vec![solid(300, 50, GREEN); 3],
        vec![solid(7, 900, BLUE); 9],
    ];
    let mut renderer = CompositeRenderer::default();
    for layout in catalog.layouts() {
        for images in &inputs {
            let spec = CompositeSpec::new(layout.clone(), theme.clone()).with_images(images.clone());
            let strip = renderer.render(&spec).unwrap();
            assert_eq!(strip.size(), layout.size());
            let rgb = strip.to_rgb_image().unwrap();
            assert_eq!(rgb.dimensions(), (layout.width, layout.height));
        }
    }
}

#[test]
fn photos_beyond_capacity_are_ignored() {
    let mut renderer = CompositeRenderer::default();
    let exact = renderer.render(&square_spec(four_colors())).unwrap();

    let mut extra = four_colors();
    extra.push(solid(10, 10, WHITE));
    extra.push(solid(10, 10, WHITE));
    let over = renderer.render(&square_spec(extra)).unwrap();
    assert_eq!(exact, over);
}

#[test]
fn grayscale_flag_converts_cell_contents() {
    let spec = square_spec(four_colors()).with_grayscale(true);
    let strip = CompositeRenderer::default().render(&spec).unwrap();
    assert_close(strip.pixel(125, 125), [76, 76, 76, 255]);
    assert_close(strip.pixel(375, 125), [150, 150, 150, 255]);
    assert_close(strip.pixel(125, 375), [29, 29, 29, 255]);
    // Borders and background are not filtered.
    assert_eq!(strip.pixel(250, 100), Some(WHITE));
}

#[test]
fn surplus_cells_stay_empty_when_count_is_below_capacity() {
    let mut layout = Catalog::builtin().layout("4-square").unwrap().clone();
    layout.count = 3;
    let spec = CompositeSpec::new(layout, Catalog::builtin().theme("classic").unwrap().clone())
        .with_images(four_colors()[..3].to_vec());
    let strip = CompositeRenderer::default().render(&spec).unwrap();
    assert_close(strip.pixel(125, 375), BLUE);
    assert_eq!(strip.pixel(375, 375), Some(BLACK));
}

#[test]
fn caption_is_truncated_to_limit() {
    let long = "x".repeat(MAX_CAPTION_CHARS + 20);
    let spec = square_spec(Vec::new()).with_caption(&long);
    assert_eq!(spec.caption.chars().count(), MAX_CAPTION_CHARS);
    assert_eq!(clamp_caption("héllo"), "héllo");
}

fn caption_bbox(plain: &StripImage, captioned: &StripImage) -> Option<(u32, u32, u32, u32)> {
    let size = plain.size();
    let mut bbox: Option<(u32, u32, u32, u32)> = None;
    for y in 0..size.height {
        for x in 0..size.width {
            if plain.pixel(x, y) != captioned.pixel(x, y) {
                bbox = Some(match bbox {
                    None => (x, x, y, y),
                    Some((x0, x1, y0, y1)) => (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
                });
            }
        }
    }
    bbox
}

#[test]
fn default_renderer_draws_caption_centered_above_bottom_margin() {
    let mut renderer = CompositeRenderer::default();
    let plain = renderer.render(&square_spec(four_colors())).unwrap();
    let captioned = renderer
        .render(&square_spec(four_colors()).with_caption("Hi!"))
        .unwrap();

    let (min_x, max_x, min_y, max_y) =
        caption_bbox(&plain, &captioned).expect("caption changed no pixels");
    let center = (min_x + max_x) / 2;
    assert!(center.abs_diff(250) <= 3, "caption not centered: {min_x}..{max_x}");
    assert!(min_y >= 440, "caption too high: {min_y}");
    assert!(max_y <= 485, "caption overlaps bottom margin: {max_y}");
    assert!(max_y >= 470, "caption too far from bottom margin: {max_y}");
}

#[test]
fn caption_uses_theme_text_color() {
    let catalog = Catalog::builtin();
    let theme = catalog.theme("modern").unwrap().clone();
    let text = theme.text_color.to_premul();
    let spec = CompositeSpec::new(catalog.layout("4-square").unwrap().clone(), theme)
        .with_caption("HHHH");
    let mut renderer = CompositeRenderer::default();
    let plain = renderer.render(&spec.clone().with_caption("")).unwrap();
    let captioned = renderer.render(&spec).unwrap();

    let (min_x, max_x, min_y, max_y) = caption_bbox(&plain, &captioned).unwrap();
    let mut solid = 0;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            if captioned.pixel(x, y) == Some(text) {
                solid += 1;
            }
        }
    }
    assert!(solid > 20, "only {solid} fully covered text pixels");
}

#[test]
fn caption_font_is_registered_once_across_renders() {
    let mut renderer = CompositeRenderer::default();
    let spec = square_spec(four_colors()).with_caption("Hi!");
    for _ in 0..5 {
        renderer.render(&spec).unwrap();
    }
    assert_eq!(renderer.text.registrations(), 1);
}

#[test]
fn unusable_caption_font_fails_instead_of_dropping_caption() {
    let junk = CaptionFont::from_bytes(vec![0; 128]).unwrap();
    let mut renderer = CompositeRenderer::new(junk);
    assert!(renderer.render(&square_spec(four_colors())).is_ok());
    let err = renderer
        .render(&square_spec(four_colors()).with_caption("Hi!"))
        .unwrap_err();
    assert!(matches!(err, crate::foundation::error::BoothError::Render(_)));
}
