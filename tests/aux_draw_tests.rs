use swrast::{Color, Context, FillStrategy, Font};

const INK: u32 = Color::YELLOW.pack();

fn context(width: u32, height: u32) -> Context {
    Context::with_strategy(width, height, FillStrategy::Span).unwrap()
}

fn lit(ctx: &Context) -> Vec<(i32, i32)> {
    let mut out = Vec::new();
    for y in 0..ctx.height() as i32 {
        for x in 0..ctx.width() as i32 {
            if ctx.pixel(x, y) == Some(INK) {
                out.push((x, y));
            }
        }
    }
    out
}

#[cfg(test)]
mod aux_draw_tests {
    use super::*;

    #[test]
    fn test_draw_pixel_writes_one_pixel() {
        let mut ctx = context(8, 8);
        ctx.draw_pixel(3, 5, INK);
        assert_eq!(lit(&ctx), vec![(3, 5)]);
    }

    #[test]
    fn test_draw_pixel_out_of_bounds_is_ignored() {
        let mut ctx = context(8, 8);
        for (x, y) in [(-1, 0), (0, -1), (8, 0), (0, 8), (i32::MIN, i32::MAX)] {
            ctx.draw_pixel(x, y, INK);
        }
        assert!(lit(&ctx).is_empty());
    }

    #[test]
    fn test_horizontal_and_vertical_lines() {
        let mut ctx = context(10, 10);
        ctx.draw_line(1, 2, 6, 2, INK);
        assert_eq!(lit(&ctx), (1..=6).map(|x| (x, 2)).collect::<Vec<_>>());

        let mut ctx = context(10, 10);
        ctx.draw_line(4, 8, 4, 3, INK);
        assert_eq!(lit(&ctx), (3..=8).map(|y| (4, y)).collect::<Vec<_>>());
    }

    #[test]
    fn test_diagonal_line_hits_both_endpoints() {
        let mut ctx = context(10, 10);
        ctx.draw_line(8, 1, 1, 8, INK);
        let pixels = lit(&ctx);
        assert_eq!(pixels.len(), 8);
        assert!(pixels.contains(&(8, 1)));
        assert!(pixels.contains(&(1, 8)));
        assert!(pixels.iter().all(|&(x, y)| x + y == 9));
    }

    #[test]
    fn test_line_direction_does_not_matter() {
        let mut a = context(16, 16);
        let mut b = context(16, 16);
        a.draw_line(1, 3, 14, 9, INK);
        b.draw_line(14, 9, 1, 3, INK);
        assert_eq!(a.framebuffer(), b.framebuffer());
    }

    #[test]
    fn test_single_point_line() {
        let mut ctx = context(4, 4);
        ctx.draw_line(2, 2, 2, 2, INK);
        assert_eq!(lit(&ctx), vec![(2, 2)]);
    }

    #[test]
    fn test_partially_off_screen_line_is_clipped() {
        let mut ctx = context(6, 6);
        ctx.draw_line(-4, -4, 10, 10, INK);
        assert_eq!(lit(&ctx), (0..6).map(|i| (i, i)).collect::<Vec<_>>());
    }

    #[test]
    fn test_lines_with_extreme_endpoints_are_clipped() {
        let mut ctx = context(8, 8);
        ctx.draw_line(i32::MIN, 3, i32::MAX, 3, INK);
        assert_eq!(lit(&ctx), (0..8).map(|x| (x, 3)).collect::<Vec<_>>());

        let mut ctx = context(8, 8);
        ctx.draw_line(5, i32::MAX, 5, i32::MIN, INK);
        assert_eq!(lit(&ctx), (0..8).map(|y| (5, y)).collect::<Vec<_>>());

        // Long diagonal through the origin stays on x == y
        let mut ctx = context(8, 8);
        ctx.draw_line(-1_000_000_000, -1_000_000_000, 1_000_000_000, 1_000_000_000, INK);
        assert_eq!(lit(&ctx), (0..8).map(|i| (i, i)).collect::<Vec<_>>());

        let mut ctx = context(8, 8);
        ctx.draw_line(i32::MIN, i32::MIN, i32::MAX, i32::MAX, INK);
        ctx.draw_line(i32::MAX, i32::MIN, i32::MIN, i32::MAX, INK);
        ctx.draw_line(-50, 100, -40, 200, INK);
        assert!(lit(&ctx).iter().all(|&(x, y)| (0..8).contains(&x) && (0..8).contains(&y)));
    }

    #[test]
    fn test_text_near_the_coordinate_limit_is_ignored() {
        let mut ctx = context(8, 8);
        ctx.draw_text(&Font::tiny(), i32::MAX - 2, 0, "AB", INK);
        ctx.draw_text(&Font::tiny(), 0, i32::MAX - 2, "AB", INK);
        assert!(lit(&ctx).is_empty());

        // Glyphs far to the left draw nothing
        ctx.draw_text(&Font::tiny(), i32::MIN, 0, "A", INK);
        assert!(lit(&ctx).is_empty());
    }

    #[test]
    fn test_tiny_font_draws_glyph_bits() {
        let mut ctx = context(12, 6);
        ctx.draw_text(&Font::tiny(), 0, 0, "T", INK);
        // T: full top row, then the middle column
        assert_eq!(lit(&ctx), vec![(0, 0), (1, 0), (2, 0), (1, 1), (1, 2), (1, 3), (1, 4)]);
    }

    #[test]
    fn test_text_advances_by_glyph_width() {
        let font = Font::tiny();
        let mut ctx = context(16, 6);
        ctx.draw_text(&font, 1, 0, "II", INK);
        let pixels = lit(&ctx);
        // Second glyph starts one cell to the right
        assert!(pixels.contains(&(1, 0)));
        assert!(pixels.contains(&(1 + font.glyph_width as i32, 0)));
        assert_eq!(pixels.len(), 2 * 9);
    }

    #[test]
    fn test_unknown_characters_use_fallback_glyph() {
        let font = Font::tiny();
        let mut a = context(8, 6);
        let mut b = context(8, 6);
        a.draw_text(&font, 0, 0, "a", INK);
        b.draw_text(&font, 0, 0, "?", INK);
        assert_eq!(a.framebuffer(), b.framebuffer());
        assert!(!lit(&a).is_empty());
    }

    #[test]
    fn test_text_is_clipped_at_the_edges() {
        let mut ctx = context(5, 3);
        ctx.draw_text(&Font::tiny(), -1, -2, "HH", INK);
        let pixels = lit(&ctx);
        assert!(!pixels.is_empty());
        assert!(pixels.iter().all(|&(x, y)| (0..5).contains(&x) && (0..3).contains(&y)));
    }

    #[test]
    fn test_fallback_glyph_past_font_data_is_skipped() {
        let data = [0xFFu8; 2];
        let font = Font::new(&data, 2, 2, b'0', b'0', 9);
        let mut ctx = context(8, 4);
        ctx.draw_text(&font, 0, 0, "x0", INK);
        // Only the in-range '0' is drawn, one cell in
        assert_eq!(lit(&ctx), vec![(2, 0), (3, 0), (2, 1), (3, 1)]);
    }
}
