//! Detail popup placement and text.
//!
//! The popup sits just below-right of the pointer and flips to the other side
//! of the pointer on any axis where it would run past the work area.

use crate::model::Item;

/// Pointer-to-popup gap for pixel-based hosts.
pub const DEFAULT_POPUP_OFFSET: f64 = 10.0;

/// Top-left corner for a `popup_size` popup near `cursor`.
///
/// `cursor` and the result are in the same coordinate space as
/// `work_area` (`(width, height)`, origin at 0,0).
pub fn place_popup(
    cursor: (f64, f64),
    popup_size: (f64, f64),
    work_area: (f64, f64),
    offset: f64,
) -> (f64, f64) {
    let axis = |pointer: f64, size: f64, limit: f64| {
        if pointer + size + offset > limit {
            pointer - size - offset
        } else {
            pointer + offset
        }
    };
    (
        axis(cursor.0, popup_size.0, work_area.0),
        axis(cursor.1, popup_size.1, work_area.1),
    )
}

/// Label drawn inside an item's rectangle.
pub fn tile_label(item: &Item) -> String {
    format!("{}\n{:.1}%", item.label(), item.weight())
}

/// Text of the detail popup.
pub fn detail_text(item: &Item) -> String {
    format!("{}\nPercentage: {:.2}%", item.label(), item.weight())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: (f64, f64) = (1920.0, 1080.0);

    #[test]
    fn places_below_right_of_cursor() {
        let origin = place_popup((100.0, 100.0), (200.0, 80.0), SCREEN, DEFAULT_POPUP_OFFSET);
        assert_eq!(origin, (110.0, 110.0));
    }

    #[test]
    fn flips_left_near_right_edge() {
        let origin = place_popup((1800.0, 100.0), (200.0, 80.0), SCREEN, DEFAULT_POPUP_OFFSET);
        assert_eq!(origin, (1590.0, 110.0));
    }

    #[test]
    fn flips_up_near_bottom_edge() {
        let origin = place_popup((100.0, 1050.0), (200.0, 80.0), SCREEN, DEFAULT_POPUP_OFFSET);
        assert_eq!(origin, (110.0, 960.0));
    }

    #[test]
    fn flips_both_axes_in_corner() {
        let origin = place_popup((1900.0, 1070.0), (200.0, 80.0), SCREEN, DEFAULT_POPUP_OFFSET);
        assert_eq!(origin, (1690.0, 980.0));
    }

    #[test]
    fn exact_fit_does_not_flip() {
        let origin = place_popup((1710.0, 0.0), (200.0, 80.0), SCREEN, DEFAULT_POPUP_OFFSET);
        assert_eq!(origin.0, 1720.0);
    }

    #[test]
    fn tile_label_has_one_decimal() {
        let item = Item::new("BTC", 40.555);
        assert_eq!(tile_label(&item), "BTC\n40.6%");
    }

    #[test]
    fn detail_text_has_two_decimals() {
        let item = Item::new("ETH", 18.3);
        assert_eq!(detail_text(&item), "ETH\nPercentage: 18.30%");
    }
}
