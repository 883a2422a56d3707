use codeedit_buffer::Motion;
use codeedit_core::EditAction;
use iced::keyboard::{self, Key, key::Named};
use iced::Task;

use super::{App, BOTTOM_PANEL_HEIGHT, Message};
use crate::components::wheel_lines;

/// Maps a key press to the edit it performs, if any.
///
/// Shortcuts with Ctrl/Cmd/Alt are not text and produce nothing.
pub fn action_for_key(key: &Key, modifiers: keyboard::Modifiers) -> Option<EditAction> {
    let action = match key {
        Key::Named(Named::ArrowLeft) => EditAction::Move(Motion::Left),
        Key::Named(Named::ArrowRight) => EditAction::Move(Motion::Right),
        Key::Named(Named::ArrowUp) => EditAction::Move(Motion::Up),
        Key::Named(Named::ArrowDown) => EditAction::Move(Motion::Down),
        Key::Named(Named::Home) if modifiers.command() => EditAction::Move(Motion::DocumentStart),
        Key::Named(Named::End) if modifiers.command() => EditAction::Move(Motion::DocumentEnd),
        Key::Named(Named::Home) => EditAction::Move(Motion::LineStart),
        Key::Named(Named::End) => EditAction::Move(Motion::LineEnd),
        Key::Named(Named::Enter) => EditAction::Newline,
        Key::Named(Named::Backspace) => EditAction::Backspace,
        Key::Named(Named::Delete) => EditAction::Delete,
        Key::Named(Named::Tab) => EditAction::Insert('\t'),
        Key::Named(Named::Space) => EditAction::Insert(' '),
        Key::Character(text)
            if !(modifiers.command() || modifiers.control() || modifiers.alt()) =>
        {
            EditAction::InsertText(text.to_string())
        }
        _ => return None,
    };
    Some(action)
}

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::KeyPressed(key, modifiers) => {
                if let Some(action) = action_for_key(&key, modifiers) {
                    self.editor.apply(action);
                    self.refresh();
                }
            }

            Message::Scrolled(delta) => {
                let lines = self.scroll_remainder
                    + wheel_lines(
                        delta,
                        self.editor.line_height() as f32,
                        self.config.editor.scroll_lines as f32,
                    );
                let whole = lines.trunc();
                self.scroll_remainder = lines - whole;
                if whole != 0.0 {
                    self.editor.scroll_lines(whole as i32);
                    self.refresh();
                }
            }

            Message::WindowResized(size) => {
                let height = (size.height - BOTTOM_PANEL_HEIGHT).max(0.0);
                self.editor.resize(size.width as i32, height as i32);
                self.refresh();
            }

            Message::Tick => {
                self.wiggly.tick();
            }

            Message::WigglyTextChanged(text) => {
                self.wiggly.set_text(text);
            }
        }

        Task::none()
    }

    /// Invalidates the canvases after the editor changed.
    ///
    /// The gutter is only redrawn when the editor asked for it. The reported
    /// band is not passed on: the canvas cache repaints full frames.
    fn refresh(&mut self) {
        if let Some(region) = self.editor.take_gutter_update() {
            tracing::trace!(?region, "gutter repaint");
            self.gutter_cache.clear();
        }
        self.viewport_cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Flags;
    use codeedit_core::{CodeEditor, Config, Document};

    fn app(text: &str) -> App {
        let config = Config::default();
        let document = Document::new(text, "go", config.font.line_height);
        let editor = CodeEditor::new(document, &config).unwrap();
        App::new(Flags { editor, config }).0
    }

    #[test]
    fn test_arrows_and_editing_keys() {
        let none = keyboard::Modifiers::default();
        assert_eq!(
            action_for_key(&Key::Named(Named::ArrowUp), none),
            Some(EditAction::Move(Motion::Up))
        );
        assert_eq!(
            action_for_key(&Key::Named(Named::Enter), none),
            Some(EditAction::Newline)
        );
        assert_eq!(
            action_for_key(&Key::Named(Named::Home), keyboard::Modifiers::COMMAND),
            Some(EditAction::Move(Motion::DocumentStart))
        );
    }

    #[test]
    fn test_characters_insert_unless_modified() {
        let key = Key::Character("a".into());
        assert_eq!(
            action_for_key(&key, keyboard::Modifiers::SHIFT),
            Some(EditAction::InsertText("a".to_string()))
        );
        assert_eq!(action_for_key(&key, keyboard::Modifiers::CTRL), None);
        assert_eq!(action_for_key(&Key::Named(Named::F1), keyboard::Modifiers::default()), None);
    }

    #[test]
    fn test_typing_updates_editor() {
        let mut app = app("");
        let _ = app.update(Message::KeyPressed(
            Key::Character("x".into()),
            keyboard::Modifiers::default(),
        ));
        assert_eq!(app.editor.document().text(), "x");

        for _ in 0..9 {
            let _ = app.update(Message::KeyPressed(
                Key::Named(Named::Enter),
                keyboard::Modifiers::default(),
            ));
        }
        assert_eq!(app.editor.gutter_width(), 26);
        assert_eq!(app.editor.take_gutter_update(), None);
    }

    #[test]
    fn test_trackpad_deltas_accumulate() {
        let mut app = app(&"x\n".repeat(100));
        let scroll_y = |app: &App| app.editor.document().layout().scroll_y();
        let half_line = iced::mouse::ScrollDelta::Pixels { x: 0.0, y: -9.0 };

        let _ = app.update(Message::Scrolled(half_line));
        assert_eq!(scroll_y(&app), 0);
        let _ = app.update(Message::Scrolled(half_line));
        assert_eq!(scroll_y(&app), 18);
        assert_eq!(app.scroll_remainder, 0.0);

        // One notch moves `scroll_lines` lines; pixels never do.
        let notch = iced::mouse::ScrollDelta::Lines { x: 0.0, y: -1.0 };
        let _ = app.update(Message::Scrolled(notch));
        assert_eq!(scroll_y(&app), 18 + 3 * 18);

        // The reported band was consumed by the full gutter repaint.
        assert_eq!(app.editor.take_gutter_update(), None);
    }

    #[test]
    fn test_resize_leaves_room_for_bottom_panel() {
        let mut app = app("a");
        let _ = app.update(Message::WindowResized(iced::Size::new(640.0, 480.0)));
        assert_eq!(app.editor.size(), (640, 380));
    }

    #[test]
    fn test_tick_and_text_edits_drive_wiggly() {
        let mut app = app("");
        assert_eq!(app.wiggly.text(), "Hello World!");
        let _ = app.update(Message::Tick);
        assert_eq!(app.wiggly.step(), 1);
        let _ = app.update(Message::WigglyTextChanged("Bye".to_string()));
        assert_eq!(app.wiggly.text(), "Bye");
    }

    #[test]
    fn test_title_names_language() {
        assert_eq!(app("").title(), "untitled [go] - codeedit");
    }
}
