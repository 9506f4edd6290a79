use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, LoginFocus, RegisterFocus, Screen};
use crate::controllers::Phase;

use super::styles;

/// Visible width of a text input field
const FIELD_WIDTH: usize = 24;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, chunks[0]);

    match app.screen {
        Screen::Login => render_login(frame, app, chunks[1]),
        Screen::Register => render_register(frame, app, chunks[1]),
        Screen::Dashboard => render_dashboard(frame, app, chunks[1]),
    }

    render_status_bar(frame, app, chunks[2]);
}

fn render_title_bar(frame: &mut Frame, area: Rect) {
    let title = "  Ledgerline";
    let version = concat!("v", env!("CARGO_PKG_VERSION"), " ");

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(title.len() + version.len() + 2),
        )),
        Span::styled(version, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

/// A labeled input field, padded to a fixed width, with a cursor marker
/// when focused.
fn field_line(label: &str, value: &str, focused: bool, masked: bool) -> Line<'static> {
    let shown: String = if masked {
        "*".repeat(value.chars().count().min(FIELD_WIDTH))
    } else {
        // Show the tail of long values so the cursor position stays visible
        let chars: Vec<char> = value.chars().collect();
        let start = chars.len().saturating_sub(FIELD_WIDTH);
        chars[start..].iter().collect()
    };

    let style = if focused {
        styles::selected_style()
    } else {
        styles::field_style()
    };
    let cursor = if focused { "▌" } else { "" };

    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<12}[", label), styles::muted_style()),
        Span::styled(
            format!("{:<width$}{}", shown, cursor, width = FIELD_WIDTH),
            style,
        ),
        Span::styled("]", styles::muted_style()),
    ])
}

fn button_line(label: &str, focused: bool, busy: bool) -> Line<'static> {
    let text = if busy {
        format!("   {}...   ", label)
    } else if focused {
        format!(" ▶ {} ◀ ", label)
    } else {
        format!("   {}   ", label)
    };

    let style = if focused {
        styles::selected_style()
    } else {
        styles::field_style()
    };

    Line::from(vec![
        Span::raw("            ["),
        Span::styled(text, style),
        Span::raw("]"),
    ])
}

fn render_login(frame: &mut Frame, app: &App, area: Rect) {
    let height = if app.login.error.is_some() { 13 } else { 11 };
    let dialog = centered_rect_fixed(48, height, area);
    frame.render_widget(Clear, dialog);

    let busy = app.login.phase == Phase::Submitting;

    let mut lines = vec![
        Line::from(Span::styled("      Sign in to Ledgerline", styles::title_style())),
        Line::from(""),
        field_line(
            "Email:",
            &app.login.identifier,
            app.login_focus == LoginFocus::Email,
            false,
        ),
        field_line(
            "Password:",
            &app.login.secret,
            app.login_focus == LoginFocus::Password,
            true,
        ),
        Line::from(""),
        button_line("Login", app.login_focus == LoginFocus::Button, busy),
        Line::from(""),
        Line::from(vec![
            Span::styled("  No account? Press ", styles::muted_style()),
            Span::styled("F2", styles::help_key_style()),
            Span::styled(" to register", styles::muted_style()),
        ]),
    ];

    if let Some(error) = app.login.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            styles::error_style(),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), dialog);
}

fn render_register(frame: &mut Frame, app: &App, area: Rect) {
    let extra = usize::from(app.register.error.is_some() || app.register.success.is_some()) * 2;
    let dialog = centered_rect_fixed(48, 13 + extra as u16, area);
    frame.render_widget(Clear, dialog);

    let busy = app.register.phase == Phase::Submitting;

    let mut lines = vec![
        Line::from(Span::styled("      Create your account", styles::title_style())),
        Line::from(""),
        field_line(
            "First name:",
            &app.register.first_name,
            app.register_focus == RegisterFocus::FirstName,
            false,
        ),
        field_line(
            "Last name:",
            &app.register.last_name,
            app.register_focus == RegisterFocus::LastName,
            false,
        ),
        field_line(
            "Email:",
            &app.register.identifier,
            app.register_focus == RegisterFocus::Email,
            false,
        ),
        field_line(
            "Password:",
            &app.register.secret,
            app.register_focus == RegisterFocus::Password,
            true,
        ),
        Line::from(""),
        button_line("Register", app.register_focus == RegisterFocus::Button, busy),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to return to login", styles::muted_style()),
        ]),
    ];

    if let Some(success) = app.register.success {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", success),
            styles::success_style(),
        )));
    } else if let Some(error) = app.register.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            styles::error_style(),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), dialog);
}

fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let dialog = centered_rect_fixed(52, 12, area);
    frame.render_widget(Clear, dialog);

    let mut lines = vec![
        Line::from(Span::styled("      Dashboard", styles::title_style())),
        Line::from(""),
    ];

    match app.dashboard.profile {
        Some(ref profile) => {
            lines.push(Line::from(vec![
                Span::styled("  Welcome, ", styles::muted_style()),
                Span::styled(profile.display_name(), styles::highlight_style()),
            ]));
            lines.push(Line::from(""));
            if let Some(ref email) = profile.email {
                lines.push(Line::from(vec![
                    Span::styled("  Email: ", styles::muted_style()),
                    Span::styled(email.clone(), styles::field_style()),
                ]));
            }
            if let Some(ref id) = profile.id {
                lines.push(Line::from(vec![
                    Span::styled("  Account id: ", styles::muted_style()),
                    Span::styled(id.clone(), styles::field_style()),
                ]));
            }
        }
        None => {
            lines.push(Line::from(Span::styled(
                "  Loading profile...",
                styles::muted_style(),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  [r]", styles::help_key_style()),
        Span::styled(" reload  ", styles::muted_style()),
        Span::styled("[l]", styles::help_key_style()),
        Span::styled(" logout  ", styles::muted_style()),
        Span::styled("[q]", styles::help_key_style()),
        Span::styled(" quit", styles::muted_style()),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), dialog);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = match app.screen {
        Screen::Login => " Tab: next field | Enter: submit | F2: register | Esc: quit ",
        Screen::Register => " Tab: next field | Enter: submit | Esc: back to login ",
        Screen::Dashboard => " r: reload | l: logout | q: quit ",
    };

    let session = if app.api.is_logged_in() {
        " session active "
    } else {
        " no session "
    };

    let padding = (area.width as usize)
        .saturating_sub(left_text.len())
        .saturating_sub(session.len());

    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(session, styles::muted_style()),
    ]);

    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
