//! Percentage position → named anchor plus pixel offset.
//!
//! The media is split into a 3×3 grid at 33% and 67%. Boundaries belong to
//! the middle band. The offset is measured from the canvas center, not from
//! the anchor, and is not clamped.

use studio_overlay_model::{Anchor, HorizontalBand, OverlayPosition, VerticalBand};

/// Lower edge of the middle band, in percent.
pub const NEAR_EDGE_PERCENT: f64 = 33.0;
/// Upper edge of the middle band, in percent.
pub const FAR_EDGE_PERCENT: f64 = 67.0;
/// Default pixels per percentage point.
pub const DEFAULT_OFFSET_SCALE: f64 = 10.0;

/// Placement of one overlay in the remote grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAnchor {
    pub anchor: Anchor,
    pub offset_x: i64,
    pub offset_y: i64,
}

/// Resolve with the default offset scale.
pub fn resolve_anchor(position: OverlayPosition) -> ResolvedAnchor {
    resolve_anchor_with_scale(position, DEFAULT_OFFSET_SCALE)
}

pub fn resolve_anchor_with_scale(position: OverlayPosition, scale: f64) -> ResolvedAnchor {
    let vertical = if position.y < NEAR_EDGE_PERCENT {
        VerticalBand::North
    } else if position.y > FAR_EDGE_PERCENT {
        VerticalBand::South
    } else {
        VerticalBand::Center
    };
    let horizontal = if position.x < NEAR_EDGE_PERCENT {
        HorizontalBand::West
    } else if position.x > FAR_EDGE_PERCENT {
        HorizontalBand::East
    } else {
        HorizontalBand::Middle
    };

    ResolvedAnchor {
        anchor: Anchor::from_bands(vertical, horizontal),
        offset_x: axis_offset(position.x, scale),
        offset_y: axis_offset(position.y, scale),
    }
}

/// Rounds half away from zero; NaN maps to 0.
fn axis_offset(percent: f64, scale: f64) -> i64 {
    let offset = ((percent - 50.0) * scale).round();
    if offset.is_nan() {
        0
    } else {
        offset as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn at(x: f64, y: f64) -> ResolvedAnchor {
        resolve_anchor(OverlayPosition::new(x, y))
    }

    #[test]
    fn test_corner_positions() {
        let r = at(10.0, 10.0);
        assert_eq!(r.anchor, Anchor::NorthWest);
        assert_eq!((r.offset_x, r.offset_y), (-400, -400));

        let r = at(90.0, 90.0);
        assert_eq!(r.anchor, Anchor::SouthEast);
        assert_eq!((r.offset_x, r.offset_y), (400, 400));
    }

    #[test]
    fn test_center_has_no_offset() {
        let r = at(50.0, 50.0);
        assert_eq!(r.anchor, Anchor::Center);
        assert_eq!((r.offset_x, r.offset_y), (0, 0));
    }

    #[test]
    fn test_boundaries_fall_in_middle_band() {
        assert_eq!(at(33.0, 33.0).anchor, Anchor::Center);
        assert_eq!(at(67.0, 67.0).anchor, Anchor::Center);
        assert_eq!(at(32.9, 50.0).anchor, Anchor::CenterWest);
        assert_eq!(at(50.0, 67.1).anchor, Anchor::South);
    }

    #[test]
    fn test_edge_rows_keep_vertical_keyword() {
        assert_eq!(at(5.0, 50.0).anchor.as_str(), "center_west");
        assert_eq!(at(95.0, 50.0).anchor.as_str(), "center_east");
        assert_eq!(at(50.0, 5.0).anchor.as_str(), "north");
    }

    #[test]
    fn test_out_of_range_extrapolates() {
        let r = at(-10.0, 120.0);
        assert_eq!(r.anchor, Anchor::SouthWest);
        assert_eq!((r.offset_x, r.offset_y), (-600, 700));
    }

    #[test]
    fn test_half_rounds_away_from_zero() {
        let r = at(50.25, 49.75);
        assert_eq!((r.offset_x, r.offset_y), (3, -3));
    }

    #[test]
    fn test_custom_scale() {
        let r = resolve_anchor_with_scale(OverlayPosition::new(60.0, 40.0), 5.4);
        assert_eq!((r.offset_x, r.offset_y), (54, -54));
    }

    proptest! {
        #[test]
        fn prop_inner_band_is_center(x in 33.0f64..=67.0, y in 33.0f64..=67.0) {
            prop_assert_eq!(at(x, y).anchor, Anchor::Center);
        }

        #[test]
        fn prop_offset_tracks_distance_from_center(x in 0.0f64..=100.0, y in 0.0f64..=100.0) {
            let r = at(x, y);
            prop_assert_eq!(r.offset_y, ((y - 50.0) * 10.0).round() as i64);
            prop_assert!(r.offset_x.abs() <= 500 && r.offset_y.abs() <= 500);
            if y > 50.0 {
                prop_assert!(r.offset_y >= 0);
            } else if y < 50.0 {
                prop_assert!(r.offset_y <= 0);
            }
        }

        #[test]
        fn prop_zero_offset_only_near_center(y in 0.0f64..=100.0) {
            let r = at(50.0, y);
            prop_assert_eq!(r.offset_x, 0);
            if r.offset_y == 0 {
                prop_assert!((y - 50.0).abs() < 0.05 + 1e-9);
            }
        }
    }
}
