//! Drawing placed items, the status bar and the detail popup.

use super::colors::{apply_opacity, highlight_opacity, label_color, resolve_color};
use super::constants::{CELL_POPUP_OFFSET, POPUP_PADDING};
use super::popup::{detail_text, place_popup, tile_label};
use crate::model::{Item, PlacedItem, Rect};
use ratatui::layout::{Alignment, Position, Rect as CellRect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Rendering switches resolved from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Draw item labels inside tiles.
    pub show_labels: bool,
    /// Brightness factor for tiles other than the selection, in `[0, 1]`.
    pub dim_opacity: f64,
    /// False under `NO_COLOR`: terminal default colours, selection shown
    /// reversed.
    pub color: bool,
}

/// Snap a container-local rect onto the cell grid of `area`.
///
/// Edges are rounded independently so neighbouring tiles share edges
/// exactly and the grid stays gap-free.
pub fn to_cells(rect: &Rect, area: CellRect) -> CellRect {
    let x0 = rect.x.round();
    let y0 = rect.y.round();
    let x1 = rect.right().round();
    let y1 = rect.bottom().round();

    CellRect {
        x: area.x.saturating_add(x0 as u16),
        y: area.y.saturating_add(y0 as u16),
        width: (x1 - x0).max(0.0) as u16,
        height: (y1 - y0).max(0.0) as u16,
    }
    .intersection(area)
}

/// Cut `s` to at most `max_width` display columns, marking the cut with `…`.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Draw every placed item into `area`.
pub fn render_treemap(
    frame: &mut Frame,
    area: CellRect,
    placed: &[PlacedItem],
    selected: Option<&Item>,
    options: &RenderOptions,
) {
    for p in placed {
        let cells = to_cells(&p.rect, area);
        if cells.is_empty() {
            continue;
        }

        let is_selected = selected.is_some_and(|s| s.same_item(&p.item));
        let (background, foreground) = if options.color {
            let opacity = highlight_opacity(&p.item, selected, options.dim_opacity);
            let background = apply_opacity(resolve_color(&p.item), opacity);
            (background, label_color(background))
        } else {
            (Color::Reset, Color::Reset)
        };
        let mut label_style = Style::default().fg(foreground).add_modifier(Modifier::BOLD);
        if is_selected && !options.color {
            label_style = label_style.add_modifier(Modifier::REVERSED);
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if is_selected {
                BorderType::Thick
            } else {
                BorderType::Plain
            })
            .border_style(Style::default().fg(foreground))
            .style(Style::default().bg(background));

        let inner = block.inner(cells);
        let text = if options.show_labels {
            centered_label(&tile_label(&p.item), inner)
        } else {
            Text::default()
        };

        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(label_style)
            .block(block);
        frame.render_widget(paragraph, cells);
    }
}

/// Label lines truncated to `inner` and padded to sit vertically centred.
fn centered_label(label: &str, inner: CellRect) -> Text<'static> {
    let max_width = usize::from(inner.width);
    let mut lines: Vec<Line<'static>> = label
        .lines()
        .take(usize::from(inner.height))
        .map(|line| Line::from(truncate_to_width(line, max_width)))
        .collect();

    let pad = usize::from(inner.height).saturating_sub(lines.len()) / 2;
    let mut padded = vec![Line::default(); pad];
    padded.append(&mut lines);
    Text::from(padded)
}

/// One-line status bar: item count, selection, key hints.
pub fn render_status(frame: &mut Frame, area: CellRect, item_count: usize, selected: Option<&Item>) {
    let selection = selected.map_or_else(|| "none".to_string(), |item| item.label().to_string());
    let line = Line::from(vec![
        Span::styled(" tmv ", Style::default().add_modifier(Modifier::REVERSED)),
        Span::raw(format!(" {item_count} items | selected: {selection} | click to select, q to quit")),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Detail popup for `item`, placed next to `pointer` inside `bounds`.
pub fn render_detail(
    frame: &mut Frame,
    bounds: CellRect,
    item: &Item,
    pointer: Position,
    options: &RenderOptions,
) {
    let text = detail_text(item);
    let content_width = text.lines().map(UnicodeWidthStr::width).max().unwrap_or(0);
    let width = u16::try_from(content_width)
        .unwrap_or(u16::MAX)
        .saturating_add(2 * POPUP_PADDING + 2);
    let height = u16::try_from(text.lines().count())
        .unwrap_or(u16::MAX)
        .saturating_add(2);

    let (x, y) = place_popup(
        (f64::from(pointer.x), f64::from(pointer.y)),
        (f64::from(width), f64::from(height)),
        (f64::from(bounds.right()), f64::from(bounds.bottom())),
        CELL_POPUP_OFFSET,
    );
    let popup = CellRect {
        x: x.max(0.0) as u16,
        y: y.max(0.0) as u16,
        width,
        height,
    }
    .intersection(bounds);
    if popup.is_empty() {
        return;
    }

    let (background, foreground) = if options.color {
        let background = resolve_color(item);
        (background, label_color(background))
    } else {
        (Color::Reset, Color::Reset)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(foreground))
        .style(Style::default().bg(background));
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(foreground))
        .block(block);

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}
