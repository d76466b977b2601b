//! Coordinate transforms between the overlay's local space and screen space
//!
//! The overlay expresses drag gestures in a local space with a top-left origin
//! at the screen frame's corner. Screens may natively count y from the top
//! (most compositors) or from the bottom, so conversion has to flip the
//! vertical axis when the conventions differ.

use super::geometry::{Point, Rect};
use super::screen::{OriginConvention, Screen};

/// Normalize the two corners of a drag gesture into a rectangle.
///
/// The origin is the component-wise minimum and the size the absolute deltas,
/// so dragging in any direction yields the same rectangle. Coincident points
/// give an empty rect.
pub fn normalize(start: Point, end: Point) -> Rect {
    Rect::new(
        start.x.min(end.x),
        start.y.min(end.y),
        (start.x - end.x).abs(),
        (start.y - end.y).abs(),
    )
}

/// Convert a rect from the overlay's local space into `screen`'s native space.
pub fn to_screen_space(rect: Rect, screen: &Screen) -> Rect {
    let frame = screen.frame;
    match screen.origin {
        OriginConvention::TopLeft => rect.translate(frame.x, frame.y),
        OriginConvention::BottomLeft => Rect::new(
            frame.x + rect.x,
            frame.y + frame.height - rect.y - rect.height,
            rect.width,
            rect.height,
        ),
    }
}

/// Inverse of [`to_screen_space`] for rects inside `screen.frame`.
pub fn to_local_space(rect: Rect, screen: &Screen) -> Rect {
    let frame = screen.frame;
    match screen.origin {
        OriginConvention::TopLeft => rect.translate(-frame.x, -frame.y),
        OriginConvention::BottomLeft => Rect::new(
            rect.x - frame.x,
            frame.y + frame.height - rect.y - rect.height,
            rect.width,
            rect.height,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(origin: OriginConvention) -> Screen {
        Screen::new("DP-1", Rect::new(100.0, 50.0, 1920.0, 1080.0), origin)
    }

    // Tiny LCG so the sweep is deterministic without pulling in a rng crate.
    fn lcg(seed: &mut u64) -> f64 {
        *seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((*seed >> 33) % 2000) as f64 - 1000.0
    }

    #[test]
    fn test_normalize_origin_and_size() {
        let mut seed = 7;
        for _ in 0..200 {
            let a = Point::new(lcg(&mut seed), lcg(&mut seed));
            let b = Point::new(lcg(&mut seed), lcg(&mut seed));
            let r = normalize(a, b);
            assert_eq!(r.x, a.x.min(b.x));
            assert_eq!(r.y, a.y.min(b.y));
            assert_eq!(r.width, (a.x - b.x).abs());
            assert_eq!(r.height, (a.y - b.y).abs());
        }
    }

    #[test]
    fn test_normalize_coincident_points_is_empty() {
        let p = Point::new(42.0, 17.0);
        let r = normalize(p, p);
        assert!(r.is_empty());
        assert_eq!((r.x, r.y), (42.0, 17.0));
    }

    #[test]
    fn test_to_screen_space_top_left_translates() {
        let s = screen(OriginConvention::TopLeft);
        let r = to_screen_space(Rect::new(10.0, 20.0, 30.0, 40.0), &s);
        assert_eq!(r, Rect::new(110.0, 70.0, 30.0, 40.0));
    }

    #[test]
    fn test_to_screen_space_bottom_left_flips_y() {
        let s = screen(OriginConvention::BottomLeft);
        // 20 px below the top edge locally is 1080 - 20 - 40 above the bottom.
        let r = to_screen_space(Rect::new(10.0, 20.0, 30.0, 40.0), &s);
        assert_eq!(r, Rect::new(110.0, 50.0 + 1020.0, 30.0, 40.0));
    }

    #[test]
    fn test_round_trip_both_conventions() {
        for origin in [OriginConvention::TopLeft, OriginConvention::BottomLeft] {
            let s = screen(origin);
            let mut seed = 99;
            for _ in 0..200 {
                let a = Point::new(lcg(&mut seed).abs(), lcg(&mut seed).abs());
                let b = Point::new(lcg(&mut seed).abs(), lcg(&mut seed).abs());
                let local = normalize(a, b);
                let screen_rect = to_screen_space(local, &s);
                assert_eq!(to_local_space(screen_rect, &s), local);
            }
        }
    }
}
