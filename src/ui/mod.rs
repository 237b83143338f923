//! Terminal rendering for the monitor display.
//!
//! One view: a header with the device and its availability, one gauge per
//! channel driven by the engine's [0,1] fractions, a total line, and a
//! status bar. The help overlay lists the key bindings.

mod theme;

pub use theme::{parse_color, Theme};

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::units::format_rate;

/// Minimum terminal size for a usable display.
const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 10;

/// Render the whole frame.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.warning));
        frame.render_widget(paragraph, area);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(7),    // Gauges
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_header(frame, app, chunks[0]);
    render_channels(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    if app.show_help {
        render_help(frame, app, area);
    }
}

/// Header: device label, kind, and availability.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let reading = app.reading();

    let (dot, dot_style) = if reading.available {
        ("●", Style::default().fg(app.theme.highlight))
    } else {
        ("●", Style::default().fg(app.theme.warning))
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", dot), dot_style),
        Span::styled("RATEWATCH", app.theme.header),
        Span::raw(" │ "),
        Span::styled(
            app.monitor().device_label().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(if reading.available {
            ""
        } else {
            " │ device unavailable"
        }),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// The two channel gauges and the total line.
fn render_channels(frame: &mut Frame, app: &App, area: Rect) {
    let reading = app.reading();

    let chunks = Layout::vertical([
        Constraint::Length(3), // In
        Constraint::Length(3), // Out
        Constraint::Length(1), // Total
        Constraint::Min(0),
    ])
    .split(area);

    let gauge_in = Gauge::default()
        .block(bordered_block(app, " In "))
        .gauge_style(Style::default().fg(app.theme.bar_in))
        .ratio(reading.fraction_in)
        .label(format_rate(reading.rate_in));
    frame.render_widget(gauge_in, chunks[0]);

    let gauge_out = Gauge::default()
        .block(bordered_block(app, " Out "))
        .gauge_style(Style::default().fg(app.theme.bar_out))
        .ratio(reading.fraction_out)
        .label(format_rate(reading.rate_out));
    frame.render_widget(gauge_out, chunks[1]);

    let total = Line::from(vec![
        Span::styled(" Total: ", Style::default().fg(app.theme.dim)),
        Span::styled(
            format_rate(reading.rate_total),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(total), chunks[2]);
}

fn bordered_block(app: &App, title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
        .title(title)
}

/// Status bar: transient message if one is active, otherwise source
/// description, cadence, scaling mode, and the key hints.
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(message) = app.get_status_message() {
        Line::from(Span::styled(
            format!(" {} ", message),
            Style::default().fg(app.theme.highlight),
        ))
    } else {
        let mode = if app.monitor().config().auto_max {
            "auto max"
        } else {
            "fixed max"
        };
        Line::from(vec![
            Span::styled(
                format!(" {} ", app.monitor().source_description()),
                Style::default().fg(app.theme.dim),
            ),
            Span::raw(format!(
                "│ {} ms │ {} ",
                app.monitor().interval().as_millis(),
                mode
            )),
            Span::styled(
                "│ q quit · a auto · +/- interval · ? help",
                Style::default().fg(app.theme.dim),
            ),
        ])
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Centered key-binding overlay.
fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let width = 44.min(area.width);
    let height = 9.min(area.height);
    let popup = Rect::new(
        (area.width - width) / 2,
        (area.height - height) / 2,
        width,
        height,
    );

    let text = vec![
        Line::from(""),
        Line::from("  q / Esc     quit"),
        Line::from("  p           pause sampling"),
        Line::from("  a           toggle automatic maximum"),
        Line::from("  + / -       adjust update interval"),
        Line::from("  ?           close this help"),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .title(" Help "),
        ),
        popup,
    );
}
