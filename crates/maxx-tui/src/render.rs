//! Top-level view.
//!
//! Pure function of `AppState`: title, blurbs, response card, notice,
//! composer, submit status and footer, top to bottom.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::common::truncate_with_ellipsis;
use crate::features::composer;
use crate::state::{AppState, Notice, NoticeKind, SubmitState};

pub const TITLE: &str = "GPT_MAXX";

const BLURBS: [&str; 2] = [
    "Welcome to GPTMaxx, our supercharged AI model with more parameters than the llama, GPT-4, Gemini and Brok models combined.",
    "With artificial general intelligence, we no longer control the AI, it controls us. So to access it we must be nice.",
];

const FOOTER: &str = "by mvrxlabs";

const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Horizontal margin around the page.
const PAGE_MARGIN: u16 = 2;

pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let page = Rect {
        x: area.x + PAGE_MARGIN.min(area.width / 2),
        width: area.width.saturating_sub(PAGE_MARGIN * 2),
        ..area
    };

    let composer_height =
        composer::calculate_composer_height(&app.composer, page.width, area.height);
    let notice_height = if app.notice.is_some() { 3 } else { 0 };

    let [
        title_area,
        blurb_area,
        response_area,
        notice_area,
        composer_area,
        status_area,
        footer_area,
    ] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(5),
        Constraint::Min(3),
        Constraint::Length(notice_height),
        Constraint::Length(composer_height),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(page);

    render_title(frame, title_area);
    render_blurbs(frame, blurb_area);
    render_response(frame, app.response.as_deref(), response_area);
    if let Some(notice) = &app.notice {
        render_notice(frame, notice, notice_area);
    }
    composer::render_composer(frame, &app.composer, composer_area, true);
    render_status(frame, app, status_area);
    render_footer(frame, footer_area);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, area);
}

fn render_blurbs(frame: &mut Frame, area: Rect) {
    let mut lines = Vec::with_capacity(BLURBS.len() * 2);
    for (i, blurb) in BLURBS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(*blurb));
    }
    let blurbs = Paragraph::new(lines)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(blurbs, area);
}

fn render_response(frame: &mut Frame, response: Option<&str>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Response ");

    let body = match response {
        Some(text) => Paragraph::new(text.to_string()),
        None => Paragraph::new("Ask a question to get started.").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ),
    };
    frame.render_widget(body.block(block).wrap(Wrap { trim: false }), area);
}

fn render_notice(frame: &mut Frame, notice: &Notice, area: Rect) {
    let color = match notice.kind {
        NoticeKind::Error => Color::Red,
        NoticeKind::Info => Color::Blue,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} ", notice.title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    let width = block.inner(area).width as usize;
    let message = truncate_with_ellipsis(&notice.message, width);
    frame.render_widget(Paragraph::new(message).block(block), area);
}

fn render_status(frame: &mut Frame, app: &AppState, area: Rect) {
    let button = match app.submit {
        SubmitState::Pending { started } => {
            let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
            Span::styled(
                format!("{spinner} Asking... {}s", started.elapsed().as_secs()),
                Style::default().fg(Color::Yellow),
            )
        }
        SubmitState::Idle if app.can_submit() => Span::styled(
            "[ Ask Question ]",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        SubmitState::Idle => Span::styled(
            "[ Ask Question ]",
            Style::default().fg(Color::DarkGray),
        ),
    };

    let hints = format!(
        "{} · Enter send · Ctrl+J newline · Esc quit",
        app.model
    );
    let hint_width = (area.width as usize).saturating_sub(button.content.chars().count() + 2);
    let line = Line::from(vec![
        button,
        Span::raw("  "),
        Span::styled(
            truncate_with_ellipsis(&hints, hint_width),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(FOOTER)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
