use super::*;

fn regular_fixture() -> CaptionFont {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/fonts/DejaVuSans.ttf");
    CaptionFont::load(&path).unwrap()
}

fn first_run_synthesis(
    engine: &mut TextLayoutEngine,
    font: &CaptionFont,
) -> parley::fontique::Synthesis {
    let layout = engine
        .layout_bold_line("Hi!", font, CAPTION_FONT_SIZE, TextBrushRgba8::default())
        .unwrap();
    for line in layout.lines() {
        for item in line.items() {
            if let parley::layout::PositionedLayoutItem::GlyphRun(run) = item {
                return run.run().synthesis();
            }
        }
    }
    panic!("caption produced no glyph runs");
}

fn coverage(layer: &[u8]) -> u64 {
    layer.chunks_exact(4).map(|px| u64::from(px[3])).sum()
}

#[test]
fn caption_origin_centers_and_bottom_aligns() {
    let canvas = PixelSize {
        width: 500,
        height: 500,
    };
    let (x, y) = caption_origin(canvas, 40.0, 28.0);
    assert_eq!(x, 230.0);
    assert_eq!(y, 457.0);
    // Bottom edge sits at y = 485.
    assert_eq!(y + 28.0, 485.0);
}

#[test]
fn wide_caption_origin_goes_negative() {
    let canvas = PixelSize {
        width: 100,
        height: 100,
    };
    let (x, _) = caption_origin(canvas, 300.0, 20.0);
    assert_eq!(x, -100.0);
}

#[test]
fn empty_font_bytes_are_rejected() {
    assert!(CaptionFont::from_bytes(Vec::new()).is_err());
}

#[test]
fn unparseable_font_is_a_render_error() {
    let junk = CaptionFont::from_bytes(vec![0xAB; 64]).unwrap();
    let mut engine = TextLayoutEngine::new();
    let err = rasterize_caption(
        &mut engine,
        &junk,
        "Hi!",
        Rgba8::rgb(255, 255, 255),
        PixelSize::new(100, 100).unwrap(),
    )
    .unwrap_err();
    assert!(matches!(err, BoothError::Render(_)));
}

#[test]
fn face_is_registered_once_per_font() {
    let font = CaptionFont::bundled();
    let canvas = PixelSize::new(200, 60).unwrap();
    let mut engine = TextLayoutEngine::new();
    for _ in 0..5 {
        rasterize_caption(&mut engine, &font, "Hi!", Rgba8::rgb(0, 0, 0), canvas).unwrap();
    }
    assert_eq!(engine.registrations(), 1);

    rasterize_caption(&mut engine, &font.clone(), "Hi!", Rgba8::rgb(0, 0, 0), canvas).unwrap();
    assert_eq!(engine.registrations(), 1);

    rasterize_caption(&mut engine, &regular_fixture(), "Hi!", Rgba8::rgb(0, 0, 0), canvas)
        .unwrap();
    assert_eq!(engine.registrations(), 2);
}

#[test]
fn bundled_bold_face_needs_no_synthesis() {
    let mut engine = TextLayoutEngine::new();
    let synthesis = first_run_synthesis(&mut engine, &CaptionFont::bundled());
    assert!(!synthesis.embolden());
    assert_eq!(synthesis.skew(), None);
}

#[test]
fn regular_face_is_emboldened() {
    let regular = regular_fixture();
    let mut engine = TextLayoutEngine::new();
    assert!(first_run_synthesis(&mut engine, &regular).embolden());

    // Synthetic bold covers more pixels than the regular outlines alone would. The bold face
    // is wider still, so compare against a fill-only rendering of the same regular glyphs.
    let canvas = PixelSize::new(200, 60).unwrap();
    let bold = rasterize_caption(&mut engine, &regular, "Hi!", Rgba8::rgb(0, 0, 0), canvas)
        .unwrap();

    let layout = engine
        .layout_bold_line("Hi!", &regular, CAPTION_FONT_SIZE, TextBrushRgba8::default())
        .unwrap();
    let (x, y) = caption_origin(canvas, f64::from(layout.width()), f64::from(layout.height()));
    let data = engine.face(&regular).unwrap().data.clone();
    let mut ctx = vello_cpu::RenderContext::new(200, 60);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((x, y)));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(0, 0, 0, 255));
    for line in layout.lines() {
        for item in line.items() {
            if let parley::layout::PositionedLayoutItem::GlyphRun(run) = item {
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }
    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(200, 60);
    ctx.render_to_pixmap(&mut pixmap);

    assert!(coverage(&bold) > coverage(pixmap.data_as_u8_slice()));
}
