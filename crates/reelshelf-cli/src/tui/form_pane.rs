use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use reelshelf_core::store::Slot;
use reelshelf_core::{FormMode, MediaKind};

use super::{App, Focus, Input};

/// Render the entry form.
pub fn render<S: Slot>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let draft = app.form.draft();
    let focused = app.focus == Focus::Form;

    let mut lines: Vec<Line<'_>> = Vec::new();
    for (i, input) in app.inputs().iter().enumerate() {
        let active = focused && i == app.active_input;
        let label_style = if active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let (label, value) = match input {
            Input::Text(field) => {
                let mut value = draft.get(*field).to_string();
                if active {
                    value.push('_');
                }
                (field.label(), value)
            }
            Input::Kind => ("Kind", kind_choice(draft.kind)),
        };

        lines.push(Line::from(vec![
            Span::styled(format!("  {:<12}", label), label_style),
            Span::raw(value),
        ]));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled(
            format!("  [ {} ]", app.form.submit_label()),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  [ Cancel ]", Style::default().fg(Color::DarkGray)),
    ]));

    let title = match (app.form.mode(), app.form.editing_id()) {
        (FormMode::Edit, Some(id)) => match app.collection.position(id) {
            Some(index) => format!("Editing #{index}"),
            None => String::from("Editing (entry removed)"),
        },
        _ => String::from("New entry"),
    };

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let form = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );
    frame.render_widget(form, area);
}

fn kind_choice(kind: MediaKind) -> String {
    let mark = |k: MediaKind| if k == kind { "(\u{2022})" } else { "( )" };
    format!(
        "{} {}  {} {}",
        mark(MediaKind::Movie),
        MediaKind::Movie.label(),
        mark(MediaKind::Series),
        MediaKind::Series.label()
    )
}
