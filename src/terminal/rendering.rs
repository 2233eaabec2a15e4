//! Rendering functions for the kiosk screen.
//!
//! Pure layout and drawing on ratatui frames; terminal lifecycle lives in
//! `tui`.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::view::{Banner, KioskView, MessageKind};
use crate::ascii::AsciiFrame;
use crate::input::OrderInput;

const ACCENT: Color = Color::Rgb(255, 165, 0);
const STOP_RED: Color = Color::Rgb(217, 83, 79);

/// Screen regions of the kiosk layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KioskLayout {
    pub status: Rect,
    pub preview: Rect,
    pub input: Rect,
    pub stop: Rect,
    pub message: Rect,
}

/// Split `area` into the kiosk regions.
///
/// The preview box is sized for a `columns` x `rows` grid plus its border,
/// shrunk to fit and centered horizontally.
pub fn kiosk_layout(area: Rect, columns: u16, rows: u16) -> KioskLayout {
    let [status, preview_row, controls, message] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(area);

    let preview_width = columns.saturating_add(2).min(preview_row.width);
    let preview_height = rows.saturating_add(2).min(preview_row.height);
    let preview = Rect {
        x: preview_row.x + (preview_row.width - preview_width) / 2,
        y: preview_row.y + (preview_row.height - preview_height) / 2,
        width: preview_width,
        height: preview_height,
    };

    // Controls line up with the preview box
    let controls = Rect {
        x: preview.x,
        width: preview.width,
        ..controls
    };
    let [input, stop] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(14)])
        .areas(controls);

    KioskLayout {
        status,
        preview,
        input,
        stop,
        message,
    }
}

/// Turn a preview frame into styled lines, one span per cell.
pub fn preview_lines(frame: &AsciiFrame) -> Vec<Line<'static>> {
    (0..frame.height)
        .map(|y| {
            Line::from(
                frame
                    .row(y)
                    .map(|(c, color)| {
                        Span::styled(
                            c.to_string(),
                            Style::default().fg(Color::Rgb(color.r, color.g, color.b)),
                        )
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

fn render_preview(frame: &mut ratatui::Frame, view: &KioskView, preview: Option<&AsciiFrame>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(ascii) = preview {
        frame.render_widget(Paragraph::new(preview_lines(ascii)), inner);
        return;
    }

    let style = match view.banner {
        Banner::ThankYou => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    };
    let banner_area = Rect {
        y: inner.y + inner.height / 2,
        height: inner.height.min(2),
        ..inner
    };
    frame.render_widget(
        Paragraph::new(view.banner.text())
            .style(style)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        banner_area,
    );
}

fn render_controls(frame: &mut ratatui::Frame, view: &KioskView, input: &OrderInput, layout: &KioskLayout) {
    let field = if input.is_empty() {
        Paragraph::new("Enter Order ID and press Enter").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(input.text()).style(Style::default().fg(Color::White))
    };
    frame.render_widget(
        field.block(Block::default().borders(Borders::ALL).title(" Order ID ")),
        layout.input,
    );

    // Cursor sits after the typed text inside the border
    let cursor_x = layout.input.x + 1 + input.text().chars().count() as u16;
    if cursor_x < layout.input.x + layout.input.width.saturating_sub(1) {
        frame.set_cursor_position((cursor_x, layout.input.y + 1));
    }

    let stop_style = if view.stop_enabled {
        Style::default()
            .fg(Color::White)
            .bg(STOP_RED)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(
        Paragraph::new("Stop [F2]")
            .style(stop_style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        layout.stop,
    );
}

/// Render the whole kiosk screen.
pub fn render_kiosk(
    frame: &mut ratatui::Frame,
    view: &KioskView,
    input: &OrderInput,
    preview: Option<&AsciiFrame>,
    columns: u16,
    rows: u16,
) {
    let layout = kiosk_layout(frame.area(), columns, rows);

    frame.render_widget(
        Paragraph::new(view.status_label.as_str())
            .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        layout.status,
    );

    render_preview(frame, view, preview, layout.preview);
    render_controls(frame, view, input, &layout);

    if let Some(message) = &view.message {
        let style = match message.kind {
            MessageKind::Info => Style::default().fg(Color::Green),
            MessageKind::Error => Style::default().fg(Color::Red),
        };
        frame.render_widget(
            Paragraph::new(message.text.as_str())
                .style(style)
                .alignment(Alignment::Center),
            layout.message,
        );
    }
}
