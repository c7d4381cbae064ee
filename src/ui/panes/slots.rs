//! Slot buffer pane rendering
//!
//! This module renders the stack's buffer the way it is laid out in memory:
//! the range of empty slots above the top, then every live slot from the top
//! down to index 0.
//!
//! # Layout
//!
//! ```text
//!  String stack · size 3 / capacity 10
//!  ·  3..9   7 empty slot(s)
//!  2  "c"    ◀ top
//!  1  "b"
//!  0  "a"
//! ```
//!
//! Only the visible window of live slots is built, so stacks with tens of
//! thousands of slots render without materializing every row.

use crate::memory::stack::TypedStack;
use crate::memory::value::{Tagged, Value};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Scroll state for the slots pane
pub struct SlotsScrollState {
    pub offset: usize,
    pub prev_item_count: usize,
}

/// Format a value with a style matching its type
pub(crate) fn format_value_styled(value: &Value, max_chars: usize) -> Span<'static> {
    let style = match value {
        Value::String(_) => Style::default().fg(DEFAULT_THEME.string),
        Value::Integer(_) | Value::Long(_) | Value::Double(_) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        Value::Boolean(_) => Style::default().fg(DEFAULT_THEME.keyword),
        Value::List(_) | Value::Map(_) => Style::default().fg(DEFAULT_THEME.fg),
        Value::Object => Style::default().fg(DEFAULT_THEME.type_name),
    };

    Span::styled(truncate(&value.to_string(), max_chars), style)
}

/// Cut `text` to at most `max_chars` characters, marking the cut with '…'
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn header_line(stack: &TypedStack<Value>) -> Line<'static> {
    let kind = match stack.element_type() {
        Some(t) => Span::styled(
            format!(" {} stack", t),
            Style::default()
                .fg(DEFAULT_THEME.type_name)
                .add_modifier(Modifier::BOLD),
        ),
        None => Span::styled(
            " untyped stack",
            Style::default()
                .fg(DEFAULT_THEME.comment)
                .add_modifier(Modifier::BOLD),
        ),
    };

    Line::from(vec![
        kind,
        Span::styled(" · ", Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(
            format!("size {}", stack.size()),
            Style::default().fg(DEFAULT_THEME.number),
        ),
        Span::styled(" / ", Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(
            format!("capacity {}", stack.capacity()),
            Style::default().fg(DEFAULT_THEME.secondary),
        ),
    ])
}

/// Render the slots pane
pub fn render_slots_pane(
    frame: &mut Frame,
    area: Rect,
    stack: &TypedStack<Value>,
    is_focused: bool,
    scroll_state: &mut SlotsScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Slots ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let content_width = area.width.saturating_sub(2) as usize; // borders
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    let size = stack.size();
    let capacity = stack.capacity();
    let index_width = capacity.saturating_sub(1).to_string().len();

    // Fixed rows: header, then the empty range (or a placeholder)
    let mut items = vec![ListItem::new(header_line(stack))];
    if capacity == 0 {
        items.push(
            ListItem::new("(no slots allocated)").style(Style::default().fg(DEFAULT_THEME.comment)),
        );
    } else if size < capacity {
        items.push(ListItem::new(Line::from(vec![
            Span::styled(
                format!(" {:>width$}  ", "·", width = index_width),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
            Span::styled(
                format!("{}..{}  {} empty slot(s)", size, capacity - 1, capacity - size),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
        ])));
    } else if size == 0 {
        items.push(ListItem::new("(empty)").style(Style::default().fg(DEFAULT_THEME.comment)));
    }

    // Live slots scroll beneath the fixed rows; reset to the top when the count changes
    if size != scroll_state.prev_item_count {
        scroll_state.offset = 0;
        scroll_state.prev_item_count = size;
    }
    let live_rows = visible_height.saturating_sub(items.len()).max(1);
    scroll_state.offset = scroll_state.offset.min(size.saturating_sub(live_rows));

    let slots = stack.slots();
    let value_width = content_width.saturating_sub(index_width + 12);
    for index in (0..size).rev().skip(scroll_state.offset).take(live_rows) {
        let is_top = index + 1 == size;
        let index_style = if is_top {
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.comment)
        };

        let mut spans = vec![Span::styled(
            format!(" {:>width$}  ", index, width = index_width),
            index_style,
        )];
        match slots[index].value() {
            Some(value) => {
                spans.push(format_value_styled(value, value_width));
                if !stack.is_typed() {
                    spans.push(Span::styled(
                        format!("  {}", value.value_type()),
                        Style::default().fg(DEFAULT_THEME.comment),
                    ));
                }
            }
            None => spans.push(Span::styled(
                "(released)",
                Style::default().fg(DEFAULT_THEME.error),
            )),
        }
        if is_top {
            spans.push(Span::styled(
                "  ◀ top",
                Style::default().fg(DEFAULT_THEME.secondary),
            ));
        }
        items.push(ListItem::new(Line::from(spans)));
    }

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_marks_cut() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }

    #[test]
    fn test_value_styles_follow_type() {
        let span = format_value_styled(&Value::from("x"), 10);
        assert_eq!(span.content, "\"x\"");
        assert_eq!(span.style.fg, Some(DEFAULT_THEME.string));

        let span = format_value_styled(&Value::Long(3), 10);
        assert_eq!(span.content, "3L");
        assert_eq!(span.style.fg, Some(DEFAULT_THEME.number));
    }
}
