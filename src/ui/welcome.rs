use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(14),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let total = app.session().total_questions();
    let scope = match app.category().name() {
        None => "from all categories".to_string(),
        Some(name) => format!("about {name}"),
    };

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "READY TO START?",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{total} questions {scope}"),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        preference_line("Shuffle questions", app.shuffle_questions()),
        preference_line("Show answers", app.show_correct_answers()),
        Line::from(""),
    ];

    if !app.failed_categories().is_empty() {
        content.push(Line::from(Span::styled(
            format!("Skipped: {}", app.failed_categories().join(", ")),
            Style::default().fg(Color::Yellow),
        )));
    }

    content.push(Line::from(""));
    if total > 0 {
        content.push(Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )));
        content.push(Line::from("to start".fg(Color::DarkGray)));
    } else {
        content.push(Line::from("No questions available".fg(Color::Red)));
    }

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .title(format!(" {} ", app.category())),
        );
    frame.render_widget(widget, chunks[1]);

    super::render_controls(
        frame,
        chunks[3],
        "s shuffle questions  ·  c shuffle choices  ·  a answers  ·  tab category  ·  q quit",
    );
}

fn preference_line(label: &str, enabled: bool) -> Line<'static> {
    let (state, color) = if enabled {
        ("on", Color::Green)
    } else {
        ("off", Color::DarkGray)
    };
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)),
        Span::styled(state, Style::default().fg(color).bold()),
    ])
}
