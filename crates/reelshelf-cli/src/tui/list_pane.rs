use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use reelshelf_core::model::stars;
use reelshelf_core::store::Slot;
use reelshelf_core::MediaRecord;

use super::{App, Focus};
use crate::commands::list::summary_line;

/// Render the entries as cards, one per record.
pub fn render<S: Slot>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let records = app.collection.list();
    let title = format!("Shelf    {} entries", records.len());
    let border_style = if app.focus == Focus::List {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    if records.is_empty() {
        let empty = Paragraph::new("  Nothing here yet. Press n to add an entry.")
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem<'_>> = records
        .iter()
        .enumerate()
        .map(|(i, record)| ListItem::new(card(i, record)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));

    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn card(index: usize, record: &MediaRecord) -> Text<'static> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!(" #{:<3}", index), Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:<7} ", record.kind.label()),
                Style::default().fg(Color::Magenta),
            ),
            Span::styled(
                record.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!("      {}", summary_line(record))),
    ];
    if !record.description.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("      {}", record.description),
            Style::default().fg(Color::Gray),
        )));
    }
    lines.push(Line::from(Span::styled(
        format!("      {}", stars(record.rating)),
        Style::default().fg(Color::Yellow),
    )));
    lines.push(Line::from(""));
    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_height_depends_on_description() {
        let plain = MediaRecord::movie("Heat").with_year("1995").with_genre("Crime");
        assert_eq!(card(0, &plain).lines.len(), 4);

        let described = plain.with_description("L.A. crime saga");
        assert_eq!(card(0, &described).lines.len(), 5);
    }
}
