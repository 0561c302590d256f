//! Non-interactive layout output for `--width/--height` runs.

use crate::model::PlacedItem;
use serde::Serialize;

/// One placed item, flattened for printing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutRow {
    /// Item id; anonymous ids print as `#n`.
    pub id: String,
    /// Item label.
    pub label: String,
    /// Weight as given.
    pub weight: f64,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Rect width.
    pub width: f64,
    /// Rect height.
    pub height: f64,
}

impl From<&PlacedItem> for LayoutRow {
    fn from(placed: &PlacedItem) -> Self {
        Self {
            id: placed.item.id().to_string(),
            label: placed.item.label().to_string(),
            weight: placed.item.weight(),
            x: placed.rect.x,
            y: placed.rect.y,
            width: placed.rect.width,
            height: placed.rect.height,
        }
    }
}

/// Flatten a layout into rows, keeping layout order.
pub fn rows(placed: &[PlacedItem]) -> Vec<LayoutRow> {
    placed.iter().map(LayoutRow::from).collect()
}

/// Aligned plain-text table, one line per item in layout order.
pub fn format_table(placed: &[PlacedItem]) -> String {
    let rows = rows(placed);
    let id_width = rows.iter().map(|r| r.id.chars().count()).fold(2, usize::max);
    let label_width = rows.iter().map(|r| r.label.chars().count()).fold(5, usize::max);

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format!(
        "{:<id_width$}  {:<label_width$}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}",
        "ID", "LABEL", "WEIGHT", "X", "Y", "WIDTH", "HEIGHT"
    ));
    for r in &rows {
        lines.push(format!(
            "{:<id_width$}  {:<label_width$}  {:>8.2}  {:>8.2}  {:>8.2}  {:>8.2}  {:>8.2}",
            r.id, r.label, r.weight, r.x, r.y, r.width, r.height
        ));
    }
    lines.join("\n")
}

/// Pretty-printed JSON array of rows.
///
/// # Errors
///
/// Propagates `serde_json` failures (non-finite numbers cannot occur in a
/// valid layout).
pub fn format_json(placed: &[PlacedItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&rows(placed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout;
    use crate::model::{Item, ItemId};

    fn example_layout() -> Vec<PlacedItem> {
        let items: Vec<Item> = [("A", 40.0), ("B", 30.0), ("C", 20.0), ("D", 10.0)]
            .into_iter()
            .map(|(id, w)| Item::with_id(ItemId::new(id).unwrap(), id, w))
            .collect();
        layout(100.0, 100.0, &items).unwrap()
    }

    #[test]
    fn table_for_square_container() {
        insta::assert_snapshot!(format_table(&example_layout()), @r"
        ID  LABEL    WEIGHT         X         Y     WIDTH    HEIGHT
        A   A         40.00      0.00      0.00    100.00     40.00
        B   B         30.00      0.00     40.00     50.00     60.00
        C   C         20.00     50.00     40.00     50.00     40.00
        D   D         10.00     50.00     80.00     50.00     20.00
        ");
    }

    #[test]
    fn table_for_empty_layout_is_header_only() {
        let table = format_table(&[]);
        assert_eq!(table.lines().count(), 1);
        assert!(table.starts_with("ID  LABEL"));
    }

    #[test]
    fn table_widens_for_long_labels() {
        let placed = layout(10.0, 10.0, &[Item::with_id(
            ItemId::new("x").unwrap(),
            "A rather long label",
            1.0,
        )])
        .unwrap();
        let table = format_table(&placed);
        let widths: Vec<usize> = table.lines().map(|l| l.chars().count()).collect();
        assert_eq!(widths[0], widths[1]);
    }

    #[test]
    fn json_lists_rows_in_layout_order() {
        let json = format_json(&example_layout()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let rows = parsed.as_array().unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0]["id"], "A");
        assert_eq!(rows[1]["y"], 40.0);
        assert_eq!(rows[3]["height"], 20.0);
    }
}
