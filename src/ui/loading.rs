use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Loading quiz...",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(app.category().to_string(), Style::default().fg(Color::DarkGray))),
    ];
    render_box(frame, area, content);
}

pub fn render_error(frame: &mut Frame, area: Rect, app: &App) {
    let message = app.load_error().unwrap_or("unknown error");
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Could not load questions",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from("r retry  ·  tab next category  ·  q quit".fg(Color::DarkGray)),
    ];
    render_box(frame, area, content);
}

fn render_box(frame: &mut Frame, area: Rect, content: Vec<Line<'static>>) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(8),
        Constraint::Fill(1),
    ])
    .margin(2)
    .split(area);

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray),
        );
    frame.render_widget(widget, chunks[1]);
}
