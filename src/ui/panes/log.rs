//! Operation log pane rendering

use crate::snapshot::{LogKind, OutputLog};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

fn style_for(kind: LogKind) -> Style {
    match kind {
        LogKind::Info => Style::default().fg(DEFAULT_THEME.fg),
        LogKind::Pulled => Style::default().fg(DEFAULT_THEME.pulled),
        LogKind::Error => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD),
    }
}

/// Render the operation log pane
///
/// Pass `usize::MAX` as the scroll offset to pin the view to the newest line.
pub fn render_log_pane(
    frame: &mut Frame,
    area: Rect,
    log: &OutputLog,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Log ")
        .borders(Borders::ALL)
        .border_style(border_style);

    if log.lines.is_empty() {
        let paragraph = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let total_items = log.lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if total_items > visible_height {
        *scroll_offset = (*scroll_offset).min(total_items - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = log
        .lines
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|line| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>3}  ", line.location.line),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(line.text.clone(), style_for(line.kind)),
            ]))
        })
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}
