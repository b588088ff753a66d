//! Packing list view: title, add form, list and summary

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::cli::render::EMPTY_LIST;
use crate::cli::tui::app::{App, ConfirmAction, InputMode};
use crate::cli::tui::utils::truncate_str;

/// Draw the whole screen
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Add form
            Constraint::Min(3),    // List
            Constraint::Length(3), // Summary
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_title(frame, app, chunks[0]);
    draw_form(frame, app, chunks[1]);
    draw_list(frame, app, chunks[2]);
    draw_summary(frame, app, chunks[3]);
    draw_status_bar(frame, app, chunks[4]);
}

fn draw_title(frame: &mut Frame, app: &App, area: Rect) {
    let title = Paragraph::new(app.title())
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(title, area);
}

fn draw_form(frame: &mut Frame, app: &App, area: Rect) {
    let focused = *app.input_mode() == InputMode::Adding;
    let form = app.form();

    let mut spans = vec![
        Span::styled(
            format!("[{:>2}] ", form.quantity),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    if form.description.is_empty() && !focused {
        spans.push(Span::styled("Item...", Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::raw(form.description.as_str()));
    }
    if focused {
        spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
    }

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title("What do you need to pack?")
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    frame.render_widget(paragraph, area);
}

fn draw_list(frame: &mut Frame, app: &App, area: Rect) {
    let focused = *app.input_mode() != InputMode::Adding;
    // Borders, highlight symbol and checkbox
    let text_width = usize::from(area.width.saturating_sub(8));

    let items: Vec<ListItem> = if app.items().is_empty() {
        vec![ListItem::new(EMPTY_LIST).style(Style::default().fg(Color::DarkGray))]
    } else {
        app.items()
            .iter()
            .map(|item| {
                let (checkbox, style) = if item.packed {
                    (
                        "[x]",
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT),
                    )
                } else {
                    ("[ ]", Style::default())
                };
                let label = truncate_str(&item.to_string(), text_width);
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{} ", checkbox)),
                    Span::styled(label, style),
                ]))
            })
            .collect()
    };

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("Packing list ({})", app.items().len()))
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .highlight_style(
            Style::default()
                .bg(if focused { Color::DarkGray } else { Color::Black })
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !app.items().is_empty() {
        state.select(Some(app.selected()));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_summary(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.stats();
    let style = if stats.is_complete() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::ITALIC)
    };

    let summary = Paragraph::new(stats.summary())
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));

    frame.render_widget(summary, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (content, style) = match app.input_mode() {
        InputMode::Normal => {
            let msg = app
                .status_message()
                .unwrap_or("[space]pack [+/-]qty [a]dd [d]elete [q]uit [?]help");
            (msg.to_string(), Style::default())
        }
        InputMode::Adding => {
            let msg = app
                .status_message()
                .unwrap_or("[enter]add [up/down]qty [esc]back");
            (msg.to_string(), Style::default().fg(Color::Green))
        }
        InputMode::Confirm(ConfirmAction::Delete(id)) => {
            let name = app
                .items()
                .iter()
                .find(|item| item.id == *id)
                .map(|item| item.description.clone())
                .unwrap_or_else(|| format!("#{}", id));
            (
                format!("Delete {}? [y/n]", name),
                Style::default().fg(Color::Yellow),
            )
        }
    };

    frame.render_widget(Paragraph::new(content).style(style), area);
}
