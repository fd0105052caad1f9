use image::{Rgb, Rgba, RgbaImage};
use sayings::color::WHITE;
use sayings::commands::TextCommand;
use sayings::scene::{SceneSurface, apply_gradient_overlay};
use sayings::text::{FontBook, TextMetrics};

const INTER_REGULAR: &[u8] = include_bytes!("fixtures/Inter-Regular.ttf");
const INTER_BOLD: &[u8] = include_bytes!("fixtures/Inter-Bold.ttf");

const W: u32 = 320;
const H: u32 = 160;

fn inter() -> FontBook {
    let mut fonts = FontBook::empty();
    fonts
        .add_font_bytes("Inter-Regular.ttf", INTER_REGULAR.to_vec())
        .expect("failed to load Inter Regular");
    fonts
        .add_font_bytes("Inter-Bold.ttf", INTER_BOLD.to_vec())
        .expect("failed to load Inter Bold");
    fonts
}

/// White background, no overlay, black Inter caption.
fn caption_scene(text: &str, size: i64) -> SceneSurface {
    let mut scene = SceneSurface::new();
    scene.set_gradient_overlay_color(None);
    for command in [
        TextCommand::SetText(text.to_string()),
        TextCommand::SetFontName("Inter".to_string()),
        TextCommand::SetFontSize(size),
    ] {
        command.execute(&mut scene).expect("caption command");
    }
    scene
}

/// Horizontal and vertical extent of every non-white pixel.
fn ink_bounds(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0 == [255, 255, 255, 255] {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds
}

#[test]
fn caption_puts_ink_on_the_canvas() {
    let fonts = inter();
    let mut blank = caption_scene("x", 24);
    blank.text_item_mut().set_text("");
    let empty = blank.render(W, H, &fonts);
    assert!(ink_bounds(&empty).is_none());

    let picture = caption_scene("Hello", 24).render(W, H, &fonts);
    let (x0, y0, x1, y1) = ink_bounds(&picture).expect("caption left no ink");
    // Left-justified inside the margin and vertically centered.
    assert!((10..20).contains(&x0), "left edge {x0}");
    assert!(y0 < H / 2 && y1 > H / 2, "rows {y0}..{y1}");
}

#[test]
fn font_size_is_used_for_drawing() {
    let fonts = inter();
    for size in [20, 48] {
        let picture = caption_scene("Hello", size).render(W, H, &fonts);
        let (x0, _, x1, _) = ink_bounds(&picture).expect("caption left no ink");
        let inked = (x1 - x0 + 1) as f32;

        let face = fonts
            .scaled("Inter", false, false, size as f32)
            .expect("Inter face");
        let advance = face.width("Hello");
        assert!(
            (inked - advance).abs() < size as f32 * 0.25,
            "size {size}: inked {inked}, advance {advance}"
        );
    }

    let small = ink_bounds(&caption_scene("Hello", 20).render(W, H, &fonts)).expect("small");
    let large = ink_bounds(&caption_scene("Hello", 48).render(W, H, &fonts)).expect("large");
    assert!(large.2 - large.0 > small.2 - small.0);
    assert!(large.3 - large.1 > small.3 - small.1);
}

#[test]
fn bold_caption_inks_more_pixels() {
    let fonts = inter();
    let count_ink = |image: &RgbaImage| image.pixels().filter(|p| p.0[0] < 128).count();

    let regular = caption_scene("Sayings", 36).render(W, H, &fonts);
    let mut bold = caption_scene("Sayings", 36);
    TextCommand::SetBold(true).execute(&mut bold).expect("bold");
    let bold = bold.render(W, H, &fonts);
    assert!(count_ink(&bold) > count_ink(&regular));
}

#[test]
fn caption_renders_identically_twice() {
    let fonts = inter();
    let mut scene = caption_scene("Render me\ntwice, please", 30);
    scene.set_gradient_overlay_color(Some(WHITE));
    TextCommand::SetColor(Rgb([200, 30, 30]))
        .execute(&mut scene)
        .expect("color");

    let first = scene.render(W, H, &fonts);
    let second = scene.render(W, H, &fonts);
    assert_eq!(first.as_raw(), second.as_raw());
}

#[test]
fn clear_leaves_only_background_and_overlay() {
    let fonts = inter();
    let mut scene = caption_scene("Gone after clear", 40);
    scene.set_background_color(Rgb([10, 20, 30]));
    scene.add_icon(
        std::sync::Arc::new(RgbaImage::from_pixel(16, 16, Rgba([255, 0, 0, 255]))),
        60,
        60,
    );
    assert!(ink_bounds(&scene.render(W, H, &fonts)).is_some());

    scene.clear();
    let mut expected = RgbaImage::from_pixel(W, H, Rgba([10, 20, 30, 255]));
    apply_gradient_overlay(&mut expected, WHITE);
    assert_eq!(scene.render(W, H, &fonts).as_raw(), expected.as_raw());
}
