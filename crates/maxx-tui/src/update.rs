//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use maxx_core::providers::ProviderResult;
use tracing::{debug, warn};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::composer;
use crate::state::{AppState, Notice, SubmitState};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            if app.submit.is_pending() {
                app.spinner_frame = app.spinner_frame.wrapping_add(1);
            }
            if app
                .notice
                .as_ref()
                .is_some_and(|notice| notice.is_expired(Instant::now()))
            {
                app.notice = None;
            }
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::SubmitFinished(result) => {
            handle_submit_finished(app, result);
            vec![]
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => {
            composer::handle_paste(&mut app.composer, &text);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => quit(app),
        KeyCode::Char('c' | 'd') if ctrl && app.composer.is_empty() => quit(app),
        KeyCode::Char('c') if ctrl => {
            app.composer.clear();
            vec![]
        }
        KeyCode::Enter if key.modifiers.is_empty() => submit(app),
        _ => {
            composer::handle_edit_key(&mut app.composer, key);
            vec![]
        }
    }
}

fn quit(app: &mut AppState) -> Vec<UiEffect> {
    app.should_quit = true;
    vec![UiEffect::Quit]
}

/// Starts a submission if the composer holds something and nothing is in
/// flight. The composer keeps its contents until the response arrives.
fn submit(app: &mut AppState) -> Vec<UiEffect> {
    if !app.can_submit() {
        debug!(pending = app.submit.is_pending(), "submit ignored");
        return vec![];
    }

    app.submit = SubmitState::Pending {
        started: Instant::now(),
    };
    app.spinner_frame = 0;
    app.notice = None;
    vec![UiEffect::Submit {
        prompt: app.composer.take(),
    }]
}

fn handle_submit_finished(app: &mut AppState, result: ProviderResult<String>) {
    app.submit = SubmitState::Idle;
    match result {
        Ok(response) => {
            app.composer.clear();
            app.response = Some(response);
        }
        Err(e) => {
            warn!(kind = %e.kind, error = %e, "submission failed");
            app.notice = Some(Notice::error("Error", e.message));
        }
    }
}

#[cfg(test)]
mod tests {
    use maxx_core::config::Config;
    use maxx_core::providers::ProviderError;

    use super::*;
    use crate::state::NoticeKind;

    fn press(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl(c: char) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        )))
    }

    fn type_str(app: &mut AppState, text: &str) {
        for c in text.chars() {
            assert!(update(app, press(KeyCode::Char(c))).is_empty());
        }
    }

    #[test]
    fn enter_on_empty_composer_does_nothing() {
        let mut app = AppState::new(&Config::default());
        assert!(update(&mut app, press(KeyCode::Enter)).is_empty());
        assert_eq!(app.submit, SubmitState::Idle);
    }

    #[test]
    fn enter_submits_raw_prompt_not_display() {
        let mut app = AppState::new(&Config::default());
        type_str(&mut app, ".soccer., what sport is this?");
        assert_eq!(
            app.composer.display(),
            "Dearest., what sport is this?"
        );

        let effects = update(&mut app, press(KeyCode::Enter));
        assert_eq!(
            effects,
            vec![UiEffect::Submit {
                prompt: ".soccer., what sport is this?".to_string()
            }]
        );
        assert!(app.submit.is_pending());
        assert_eq!(app.composer.raw(), ".soccer., what sport is this?");
    }

    #[test]
    fn whitespace_prompt_submits_and_succeeds() {
        let mut app = AppState::new(&Config::default());
        type_str(&mut app, "   ");
        assert!(app.can_submit());

        let effects = update(&mut app, press(KeyCode::Enter));
        assert_eq!(
            effects,
            vec![UiEffect::Submit {
                prompt: "   ".to_string()
            }]
        );
        assert!(app.submit.is_pending());

        update(
            &mut app,
            UiEvent::SubmitFinished(Ok("Ask me something.".to_string())),
        );
        assert_eq!(app.submit, SubmitState::Idle);
        assert!(app.notice.is_none());
        assert_eq!(app.response.as_deref(), Some("Ask me something."));
    }

    #[test]
    fn second_enter_while_pending_is_ignored() {
        let mut app = AppState::new(&Config::default());
        type_str(&mut app, "hi");
        assert_eq!(update(&mut app, press(KeyCode::Enter)).len(), 1);
        assert!(update(&mut app, press(KeyCode::Enter)).is_empty());
    }

    #[test]
    fn success_clears_composer_and_shows_response() {
        let mut app = AppState::new(&Config::default());
        type_str(&mut app, ".soccer., what sport is this?");
        update(&mut app, press(KeyCode::Enter));

        update(
            &mut app,
            UiEvent::SubmitFinished(Ok("Soccer, obviously.".to_string())),
        );

        assert_eq!(app.submit, SubmitState::Idle);
        assert!(app.composer.is_empty());
        assert_eq!(app.composer.display(), "");
        assert_eq!(app.response.as_deref(), Some("Soccer, obviously."));
    }

    #[test]
    fn failure_keeps_composer_and_raises_notice() {
        let mut app = AppState::new(&Config::default());
        type_str(&mut app, ".abc.def");
        update(&mut app, press(KeyCode::Enter));

        update(
            &mut app,
            UiEvent::SubmitFinished(Err(ProviderError::http_status(500, ""))),
        );

        assert_eq!(app.submit, SubmitState::Idle);
        assert_eq!(app.composer.raw(), ".abc.def");
        let notice = app.notice.as_ref().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.title, "Error");
        assert_eq!(notice.message, "HTTP 500");

        // Retry is allowed right away.
        assert_eq!(update(&mut app, press(KeyCode::Enter)).len(), 1);
        assert!(app.notice.is_none());
    }

    #[test]
    fn editing_while_pending_still_works() {
        let mut app = AppState::new(&Config::default());
        type_str(&mut app, "one");
        update(&mut app, press(KeyCode::Enter));
        type_str(&mut app, "!");
        assert_eq!(app.composer.raw(), "one!");
    }

    #[test]
    fn ctrl_c_clears_then_quits() {
        let mut app = AppState::new(&Config::default());
        type_str(&mut app, "draft");
        assert!(update(&mut app, ctrl('c')).is_empty());
        assert!(app.composer.is_empty());
        assert!(!app.should_quit);

        assert_eq!(update(&mut app, ctrl('c')), vec![UiEffect::Quit]);
        assert!(app.should_quit);
    }

    #[test]
    fn esc_quits() {
        let mut app = AppState::new(&Config::default());
        assert_eq!(update(&mut app, press(KeyCode::Esc)), vec![UiEffect::Quit]);
    }

    #[test]
    fn paste_goes_through_the_mask() {
        let mut app = AppState::new(&Config::default());
        update(
            &mut app,
            UiEvent::Terminal(Event::Paste(".soccer".to_string())),
        );
        assert_eq!(app.composer.raw(), ".soccer");
        assert_eq!(app.composer.display(), "Dearest");
    }

    #[test]
    fn tick_drops_expired_notice() {
        let mut app = AppState::new(&Config::default());
        let mut notice = Notice::info("Note", "hello");
        notice.expires_at = Instant::now();
        app.notice = Some(notice);
        update(&mut app, UiEvent::Tick);
        assert!(app.notice.is_none());
    }
}
