//! Keyboard event handling for the three screens.

use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{
    App, LoginFocus, RegisterFocus, Screen, MAX_EMAIL_LENGTH, MAX_NAME_LENGTH,
    MAX_PASSWORD_LENGTH,
};
use crate::controllers::Route;

/// Handle a key event. Returns `true` when the application should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    match app.screen {
        Screen::Login => handle_login_input(app, key),
        Screen::Register => handle_register_input(app, key),
        Screen::Dashboard => handle_dashboard_input(app, key),
    }
}

fn push_bounded(field: &mut String, c: char, max: usize) {
    if field.len() < max {
        field.push(c);
    }
}

fn handle_login_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => return true,
        KeyCode::F(2) => app.navigate(Route::Register),
        KeyCode::Tab | KeyCode::Down => app.login_focus = app.login_focus.next(),
        KeyCode::BackTab | KeyCode::Up => app.login_focus = app.login_focus.prev(),
        KeyCode::Enter => match app.login_focus {
            LoginFocus::Email => app.login_focus = LoginFocus::Password,
            LoginFocus::Password | LoginFocus::Button => app.submit_login(),
        },
        KeyCode::Backspace => {
            match app.login_focus {
                LoginFocus::Email => {
                    app.login.identifier.pop();
                }
                LoginFocus::Password => {
                    app.login.secret.pop();
                }
                LoginFocus::Button => {}
            };
        }
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Email => push_bounded(&mut app.login.identifier, c, MAX_EMAIL_LENGTH),
            LoginFocus::Password => push_bounded(&mut app.login.secret, c, MAX_PASSWORD_LENGTH),
            LoginFocus::Button => {}
        },
        _ => {}
    }
    false
}

fn handle_register_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => app.navigate(Route::Login),
        KeyCode::Tab | KeyCode::Down => app.register_focus = app.register_focus.next(),
        KeyCode::BackTab | KeyCode::Up => app.register_focus = app.register_focus.prev(),
        KeyCode::Enter => match app.register_focus {
            RegisterFocus::Button | RegisterFocus::Password => app.submit_register(),
            other => app.register_focus = other.next(),
        },
        KeyCode::Backspace => {
            if let Some(field) = register_field_mut(app) {
                field.pop();
            }
        }
        KeyCode::Char(c) => {
            let max = match app.register_focus {
                RegisterFocus::Email => MAX_EMAIL_LENGTH,
                RegisterFocus::Password => MAX_PASSWORD_LENGTH,
                _ => MAX_NAME_LENGTH,
            };
            if let Some(field) = register_field_mut(app) {
                push_bounded(field, c, max);
            }
        }
        _ => {}
    }
    false
}

fn register_field_mut(app: &mut App) -> Option<&mut String> {
    match app.register_focus {
        RegisterFocus::FirstName => Some(&mut app.register.first_name),
        RegisterFocus::LastName => Some(&mut app.register.last_name),
        RegisterFocus::Email => Some(&mut app.register.identifier),
        RegisterFocus::Password => Some(&mut app.register.secret),
        RegisterFocus::Button => None,
    }
}

fn handle_dashboard_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('l') => app.logout(),
        KeyCode::Char('r') => app.navigate(Route::Dashboard),
        _ => {}
    }
    false
}
