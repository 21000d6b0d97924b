mod loading;
mod quiz;
mod result;
mod review;
mod welcome;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::app::{App, Screen};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.screen() {
        Screen::Loading => loading::render(frame, area, app),
        Screen::LoadFailed => loading::render_error(frame, area, app),
        Screen::Welcome => welcome::render(frame, area, app),
        Screen::Quiz => quiz::render(frame, area, app),
        Screen::Results => result::render(frame, area, app),
        Screen::Review => review::render(frame, area, app),
    }
}

fn render_controls(frame: &mut Frame, area: Rect, text: &'static str) {
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
