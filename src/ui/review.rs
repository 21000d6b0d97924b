use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{Question, Selection};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let (score, total) = app.session().result().unwrap_or((0, 0));
    let header = Paragraph::new(Line::from(vec![
        Span::styled("REVIEW  ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(format!("{score} / {total}"), Style::default().fg(Color::Gray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(header, chunks[0]);

    let mut lines: Vec<Line> = Vec::new();
    for entry in app.session().review() {
        let (symbol, color) = if entry.correct {
            ("+", Color::Green)
        } else {
            ("-", Color::Red)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{symbol} {}. ", entry.index + 1), Style::default().fg(color).bold()),
            Span::styled(entry.question.prompt.as_str(), Style::default().fg(Color::White)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    yours:   {}", describe(entry.question, entry.selection)),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(Span::styled(
            format!("    correct: {}", correct_choices(entry.question)),
            Style::default().fg(Color::Green),
        )));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((
            u16::try_from(app.result_scroll().saturating_mul(4)).unwrap_or(u16::MAX),
            0,
        ));
    frame.render_widget(widget, chunks[1]);

    super::render_controls(frame, chunks[2], "j/k scroll  ·  v back  ·  r retake  ·  q quit");
}

fn describe(question: &Question, selection: &Selection) -> String {
    let picked: Vec<&str> = match selection {
        Selection::Unset => Vec::new(),
        Selection::Single(index) => question.choices.get(*index).map(String::as_str).into_iter().collect(),
        Selection::Multiple(set) => set
            .iter()
            .filter_map(|&index| question.choices.get(index).map(String::as_str))
            .collect(),
    };
    if picked.is_empty() {
        "(no answer)".to_string()
    } else {
        picked.join(", ")
    }
}

fn correct_choices(question: &Question) -> String {
    question
        .choices
        .iter()
        .enumerate()
        .filter(|(index, _)| question.answer.contains(*index))
        .map(|(_, choice)| choice.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::models::fixtures::multi;

    #[test]
    fn test_describe_selection() {
        let question = multi(1, &["red", "green", "blue"], &[0, 2]);
        assert_eq!(describe(&question, &Selection::Unset), "(no answer)");
        assert_eq!(
            describe(&question, &Selection::Multiple(BTreeSet::from([2, 0]))),
            "red, blue"
        );
        assert_eq!(correct_choices(&question), "red, blue");
    }
}
