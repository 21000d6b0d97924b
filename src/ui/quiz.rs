use chrono::Utc;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::Question;
use crate::session::{ChoiceMark, QuizView};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.session().view(app.show_correct_answers());
    let Some(question) = view.question else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Length(if question.image.is_some() { 2 } else { 0 }),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_status(frame, chunks[0], app, question, &view);
    render_progress(frame, chunks[1], view.progress);
    render_question_text(frame, chunks[2], question);
    if let Some(image) = &question.image {
        render_image_ref(frame, chunks[3], image);
    }
    render_choices(frame, chunks[4], question, &view.marks, app.cursor());
    super::render_controls(frame, chunks[5], controls(&view));
}

fn render_status(frame: &mut Frame, area: Rect, app: &App, question: &Question, view: &QuizView<'_>) {
    let stats = app.session().stats(Utc::now());
    let elapsed = stats
        .elapsed
        .map(|d| format!("{:02}:{:02}", d.num_minutes(), d.num_seconds() % 60))
        .unwrap_or_default();

    let left = format!("{}  ·  {}", question.category, question.kind);
    let right = format!(
        "{}/{}  ·  {} left  ·  {}",
        view.question_number, view.total, stats.remaining, elapsed
    );

    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);
    frame.render_widget(Paragraph::new(left).fg(Color::DarkGray), halves[0]);
    frame.render_widget(
        Paragraph::new(right)
            .alignment(Alignment::Right)
            .fg(Color::DarkGray),
        halves[1],
    );
}

fn render_progress(frame: &mut Frame, area: Rect, progress: u8) {
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(u16::from(progress));
    frame.render_widget(gauge, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, question: &Question) {
    let widget = Paragraph::new(question.prompt.as_str())
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_image_ref(frame: &mut Frame, area: Rect, image: &str) {
    let widget = Paragraph::new(format!("[image: {image}]")).fg(Color::Yellow);
    frame.render_widget(widget, area);
}

fn render_choices(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    marks: &[ChoiceMark],
    cursor: usize,
) {
    let multi = question.is_multi_answer();
    let mut lines: Vec<Line> = Vec::with_capacity(question.choices.len() * 2);

    for (index, (choice, mark)) in question.choices.iter().zip(marks).enumerate() {
        let (style, badge) = match mark {
            ChoiceMark::Correct { picked: true } => (
                Style::default().fg(Color::Green).bold(),
                "  ✓ your answer (correct)",
            ),
            ChoiceMark::Correct { picked: false } => {
                (Style::default().fg(Color::Green), "  ✓ correct answer")
            }
            ChoiceMark::Incorrect => (Style::default().fg(Color::Red).bold(), "  ✗ your answer"),
            ChoiceMark::Selected => (Style::default().fg(Color::Cyan).bold(), ""),
            ChoiceMark::Plain => (Style::default().fg(Color::Gray), ""),
        };
        let marker = if index == cursor { ">" } else { " " };
        let picked = matches!(
            mark,
            ChoiceMark::Selected | ChoiceMark::Incorrect | ChoiceMark::Correct { picked: true }
        );
        let check = match (multi, picked) {
            (true, true) => "[x]",
            (true, false) => "[ ]",
            (false, true) => "(*)",
            (false, false) => "( )",
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {marker} "), style),
            Span::styled(format!("{check} "), style),
            Span::styled(choice.as_str(), style),
            Span::styled(badge, style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Color::DarkGray)
            .padding(Padding::vertical(1)),
    );
    frame.render_widget(widget, area);
}

fn controls(view: &QuizView<'_>) -> &'static str {
    match (view.is_locked, view.is_last_question) {
        (true, true) => "h previous  ·  enter view results  ·  x submit quiz  ·  q quit",
        (true, false) => "h previous  ·  enter next question  ·  x submit quiz  ·  q quit",
        (false, _) => "j/k move  ·  space select  ·  enter submit  ·  h previous  ·  x submit quiz  ·  q quit",
    }
}
