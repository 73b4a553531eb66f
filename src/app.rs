//! Front-end state: menu selection, board cursor and action routing.
//!
//! Owns the [`Session`]; the runner feeds it actions and ticks and reads back
//! what to draw. Everything here is pure so it can be driven from tests.

use crate::core::{RoundConfig, RoundSnapshot, Session};
use crate::types::{
    GameAction, Preset, RoundEvent, CUSTOM_MAX_TIME_SECS, CUSTOM_MIN_DIM, CUSTOM_MIN_TIME_SECS,
    CUSTOM_TIME_STEP_SECS, MAX_BOARD_DIM,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    /// Editing the custom board before starting it.
    CustomEdit,
    Playing,
}

/// One selectable menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Preset(Preset),
    Custom,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 4] = [
        MenuEntry::Preset(Preset::Easy),
        MenuEntry::Preset(Preset::Normal),
        MenuEntry::Preset(Preset::Hard),
        MenuEntry::Custom,
    ];
}

/// Field under the custom editor's cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomField {
    Rows,
    Cols,
    Time,
}

impl CustomField {
    pub const ALL: [CustomField; 3] = [CustomField::Rows, CustomField::Cols, CustomField::Time];
}

/// Unsaved custom values; discarded on cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomDraft {
    pub rows: u16,
    pub cols: u16,
    pub time_secs: u32,
    pub field: CustomField,
}

impl CustomDraft {
    fn from_config(config: &RoundConfig) -> Self {
        Self {
            rows: config.rows(),
            cols: config.cols(),
            time_secs: config.starting_time_secs(),
            field: CustomField::Rows,
        }
    }

    fn select(&mut self, step: isize) {
        let n = CustomField::ALL.len() as isize;
        let i = CustomField::ALL.iter().position(|&f| f == self.field).unwrap_or(0) as isize;
        self.field = CustomField::ALL[(i + step).rem_euclid(n) as usize];
    }

    fn adjust(&mut self, up: bool) {
        let step_dim = |v: u16| {
            if up {
                (v + 1).min(MAX_BOARD_DIM)
            } else {
                v.saturating_sub(1).max(CUSTOM_MIN_DIM)
            }
        };
        match self.field {
            CustomField::Rows => self.rows = step_dim(self.rows),
            CustomField::Cols => self.cols = step_dim(self.cols),
            CustomField::Time => {
                self.time_secs = if up {
                    (self.time_secs + CUSTOM_TIME_STEP_SECS).min(CUSTOM_MAX_TIME_SECS)
                } else {
                    self.time_secs
                        .saturating_sub(CUSTOM_TIME_STEP_SECS)
                        .max(CUSTOM_MIN_TIME_SECS)
                };
            }
        }
    }
}

fn clock_label(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub struct App {
    screen: Screen,
    session: Session,
    custom: RoundConfig,
    draft: Option<CustomDraft>,
    menu_selected: usize,
    /// Board cursor as `(row, col)`.
    cursor: (u16, u16),
}

impl App {
    /// Start on the main menu. `custom` backs the "Custom" entry.
    pub fn new(session: Session, custom: RoundConfig) -> Self {
        Self {
            screen: Screen::Menu,
            session,
            custom,
            draft: None,
            menu_selected: 0,
            cursor: (0, 0),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    pub fn menu_selected(&self) -> usize {
        self.menu_selected
    }

    pub fn menu_labels(&self) -> Vec<String> {
        MenuEntry::ALL
            .iter()
            .map(|entry| match entry {
                MenuEntry::Preset(p) => p.label().to_string(),
                MenuEntry::Custom => format!(
                    "Custom  {}x{}  {}",
                    self.custom.rows(),
                    self.custom.cols(),
                    clock_label(self.custom.starting_time_secs())
                ),
            })
            .collect()
    }

    pub fn custom(&self) -> RoundConfig {
        self.custom
    }

    /// The open custom editor, if any.
    pub fn custom_draft(&self) -> Option<&CustomDraft> {
        self.draft.as_ref()
    }

    /// Editor rows and the index of the focused one.
    pub fn custom_labels(&self) -> (Vec<String>, usize) {
        let Some(draft) = self.draft else {
            return (Vec::new(), 0);
        };
        let labels = vec![
            format!("Rows     {}", draft.rows),
            format!("Columns  {}", draft.cols),
            format!("Time     {}", clock_label(draft.time_secs)),
        ];
        let focused = CustomField::ALL.iter().position(|&f| f == draft.field).unwrap_or(0);
        (labels, focused)
    }

    /// Leave the menu and start a round with `config`.
    pub fn play(&mut self, config: RoundConfig) {
        self.session.start_new_round_with(config);
        self.cursor = (0, 0);
        self.screen = Screen::Playing;
    }

    pub fn handle_action(&mut self, action: GameAction) {
        match self.screen {
            Screen::Menu => self.handle_menu_action(action),
            Screen::CustomEdit => self.handle_custom_action(action),
            Screen::Playing => self.handle_round_action(action),
        }
    }

    fn handle_menu_action(&mut self, action: GameAction) {
        let n = MenuEntry::ALL.len();
        match action {
            GameAction::CursorUp => self.menu_selected = (self.menu_selected + n - 1) % n,
            GameAction::CursorDown => self.menu_selected = (self.menu_selected + 1) % n,
            GameAction::Reveal => match MenuEntry::ALL[self.menu_selected] {
                MenuEntry::Preset(p) => self.play(RoundConfig::from_preset(p)),
                MenuEntry::Custom => {
                    self.draft = Some(CustomDraft::from_config(&self.custom));
                    self.screen = Screen::CustomEdit;
                }
            },
            _ => {}
        }
    }

    fn handle_custom_action(&mut self, action: GameAction) {
        let Some(draft) = self.draft.as_mut() else {
            self.screen = Screen::Menu;
            return;
        };
        match action {
            GameAction::CursorUp => draft.select(-1),
            GameAction::CursorDown => draft.select(1),
            GameAction::CursorLeft => draft.adjust(false),
            GameAction::CursorRight => draft.adjust(true),
            GameAction::Reveal => {
                let draft = *draft;
                match RoundConfig::custom_clamped(draft.rows, draft.cols, draft.time_secs) {
                    Ok(config) => {
                        self.custom = config;
                        self.draft = None;
                        self.play(config);
                    }
                    Err(err) => tracing::debug!(%err, "custom board rejected"),
                }
            }
            GameAction::Pause | GameAction::Menu => {
                self.draft = None;
                self.screen = Screen::Menu;
            }
            GameAction::Restart => {}
        }
    }

    fn handle_round_action(&mut self, action: GameAction) {
        let rows = self.session.config().rows();
        let cols = self.session.config().cols();
        let (row, col) = self.cursor;

        match action {
            GameAction::CursorUp => self.cursor.0 = row.saturating_sub(1),
            GameAction::CursorDown => self.cursor.0 = (row + 1).min(rows.saturating_sub(1)),
            GameAction::CursorLeft => self.cursor.1 = col.saturating_sub(1),
            GameAction::CursorRight => self.cursor.1 = (col + 1).min(cols.saturating_sub(1)),
            GameAction::Reveal => {
                let index = row as usize * cols as usize + col as usize;
                self.session.reveal(index);
            }
            GameAction::Pause => {
                self.session.toggle_pause();
            }
            GameAction::Restart => self.session.restart(),
            GameAction::Menu => {
                // The abandoned round is never scored.
                self.session.pause();
                self.screen = Screen::Menu;
            }
        }
    }

    /// Advance the current round; the menu does not tick.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.screen == Screen::Playing {
            self.session.tick(elapsed_ms);
        }
    }

    pub fn take_events(&mut self) -> std::vec::Drain<'_, RoundEvent> {
        self.session.take_events()
    }

    pub fn take_new_best(&mut self) -> Option<u32> {
        self.session.take_new_best()
    }

    pub fn snapshot_into(&self, out: &mut RoundSnapshot) {
        self.session.snapshot_into(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardGenerator, BoardRng};
    use crate::types::{RoundPhase, FLIP_MS};

    fn app() -> App {
        let custom = RoundConfig::custom_clamped(4, 4, 90).unwrap();
        let session = Session::new(custom, BoardGenerator::new(16), BoardRng::new(11));
        App::new(session, custom)
    }

    #[test]
    fn test_menu_labels() {
        let labels = app().menu_labels();
        assert_eq!(labels.len(), 4);
        assert_eq!(labels[3], "Custom  4x4  1:30");
        assert!(labels[0].starts_with("Easy"));
    }

    #[test]
    fn test_menu_selection_wraps() {
        let mut app = app();
        app.handle_action(GameAction::CursorUp);
        assert_eq!(app.menu_selected(), 3);
        app.handle_action(GameAction::CursorDown);
        assert_eq!(app.menu_selected(), 0);
        // Board-only actions do nothing on the menu.
        app.handle_action(GameAction::Pause);
        app.handle_action(GameAction::Restart);
        assert_eq!(app.screen(), Screen::Menu);
    }

    #[test]
    fn test_menu_starts_selected_preset() {
        let mut app = app();
        app.handle_action(GameAction::CursorDown);
        app.handle_action(GameAction::Reveal);
        assert_eq!(app.screen(), Screen::Playing);
        assert_eq!(app.session().config().rows(), 3);
        assert_eq!(app.session().config().cols(), 4);
        assert_eq!(app.session().controller().phase(), RoundPhase::Running);
    }

    fn open_custom(app: &mut App) {
        app.handle_action(GameAction::CursorUp);
        app.handle_action(GameAction::Reveal);
        assert_eq!(app.screen(), Screen::CustomEdit);
    }

    #[test]
    fn test_custom_editor_adjusts_and_starts() {
        let mut app = app();
        open_custom(&mut app);
        assert_eq!(app.custom_labels().0[0], "Rows     4");

        app.handle_action(GameAction::CursorRight);
        app.handle_action(GameAction::CursorDown);
        app.handle_action(GameAction::CursorLeft);
        app.handle_action(GameAction::CursorDown);
        app.handle_action(GameAction::CursorLeft);
        let (labels, focused) = app.custom_labels();
        assert_eq!(labels, vec!["Rows     5", "Columns  3", "Time     1:25"]);
        assert_eq!(focused, 2);

        app.handle_action(GameAction::Reveal);
        assert_eq!(app.screen(), Screen::Playing);
        assert!(app.custom_draft().is_none());
        let config = app.session().config();
        assert_eq!((config.rows(), config.cols(), config.starting_time_secs()), (5, 3, 85));
        assert_eq!(app.custom(), *config);
    }

    #[test]
    fn test_custom_editor_respects_bounds() {
        let mut app = app();
        open_custom(&mut app);
        for _ in 0..20 {
            app.handle_action(GameAction::CursorLeft);
        }
        app.handle_action(GameAction::CursorUp);
        for _ in 0..200 {
            app.handle_action(GameAction::CursorRight);
        }
        let draft = *app.custom_draft().unwrap();
        assert_eq!(draft.field, CustomField::Time);
        assert_eq!(draft.rows, CUSTOM_MIN_DIM);
        assert_eq!(draft.time_secs, CUSTOM_MAX_TIME_SECS);

        app.handle_action(GameAction::CursorDown);
        for _ in 0..20 {
            app.handle_action(GameAction::CursorRight);
        }
        app.handle_action(GameAction::CursorDown);
        app.handle_action(GameAction::CursorRight);
        let draft = *app.custom_draft().unwrap();
        assert_eq!(draft.rows, MAX_BOARD_DIM);
        assert_eq!(draft.cols, 5);
    }

    #[test]
    fn test_custom_editor_cancel_keeps_saved_values() {
        let mut app = app();
        open_custom(&mut app);
        app.handle_action(GameAction::CursorRight);
        app.handle_action(GameAction::Pause);
        assert_eq!(app.screen(), Screen::Menu);
        assert!(app.custom_draft().is_none());
        assert_eq!(app.custom().rows(), 4);
        assert_eq!(app.menu_labels()[3], "Custom  4x4  1:30");
        // Nothing was started.
        assert_eq!(app.session().controller().round_id(), 0);
    }

    #[test]
    fn test_cursor_is_clamped_to_board() {
        let mut app = app();
        app.play(RoundConfig::from_preset(Preset::Easy));
        app.handle_action(GameAction::CursorLeft);
        app.handle_action(GameAction::CursorUp);
        assert_eq!(app.cursor(), (0, 0));
        for _ in 0..5 {
            app.handle_action(GameAction::CursorRight);
            app.handle_action(GameAction::CursorDown);
        }
        assert_eq!(app.cursor(), (1, 1));
    }

    #[test]
    fn test_reveal_under_cursor() {
        let mut app = app();
        app.play(RoundConfig::from_preset(Preset::Easy));
        app.handle_action(GameAction::CursorRight);
        app.handle_action(GameAction::CursorDown);
        app.handle_action(GameAction::Reveal);
        app.tick(FLIP_MS);
        assert_eq!(app.session().controller().pending(), &[3]);
        assert_eq!(
            app.take_events().collect::<Vec<_>>(),
            vec![RoundEvent::Flip { index: 3 }]
        );
    }

    #[test]
    fn test_pause_toggle_and_menu() {
        let mut app = app();
        app.play(RoundConfig::from_preset(Preset::Easy));
        app.handle_action(GameAction::Pause);
        assert_eq!(app.session().controller().phase(), RoundPhase::Paused);
        app.handle_action(GameAction::Pause);
        assert_eq!(app.session().controller().phase(), RoundPhase::Running);

        app.handle_action(GameAction::Menu);
        assert_eq!(app.screen(), Screen::Menu);
        let left = app.session().controller().time_left_ms();
        app.tick(1000);
        assert_eq!(app.session().controller().time_left_ms(), left);
    }

    #[test]
    fn test_restart_keeps_configuration() {
        let mut app = app();
        app.play(RoundConfig::from_preset(Preset::Hard));
        app.tick(5000);
        app.handle_action(GameAction::Restart);
        assert_eq!(app.session().controller().round_id(), 2);
        assert_eq!(app.session().controller().time_left_ms(), 60_000);
        assert_eq!(app.session().config().rows(), 5);
    }
}
