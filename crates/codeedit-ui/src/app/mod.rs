use std::time::Duration;

use codeedit_core::{CodeEditor, Config};
use iced::widget::canvas::Cache;
use iced::{Subscription, Task, keyboard, window};

pub mod messages;
pub mod update;
pub mod view;

pub use messages::*;

use crate::wiggly::Wiggly;

/// Height of the wiggly text strip below the editor.
pub const WIGGLY_HEIGHT: f32 = 60.0;

/// Height of the text input editing the wiggly text.
pub const INPUT_HEIGHT: f32 = 40.0;

/// Everything below the editor.
pub const BOTTOM_PANEL_HEIGHT: f32 = WIGGLY_HEIGHT + INPUT_HEIGHT;

/// Startup state handed over by the binary.
pub struct Flags {
    pub editor: CodeEditor,
    pub config: Config,
}

pub struct App {
    pub editor: CodeEditor,
    pub config: Config,
    pub gutter_cache: Cache,
    pub viewport_cache: Cache,
    pub wiggly: Wiggly,
    /// Fraction of a line scrolled but not yet applied
    pub scroll_remainder: f32,
}

impl App {
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let Flags { editor, config } = flags;
        let wiggly = Wiggly::new(
            config.animation.text.clone(),
            config.font.size,
            config.font.line_height,
            config.font.digit_width,
        );

        let app = Self {
            editor,
            config,
            gutter_cache: Cache::new(),
            viewport_cache: Cache::new(),
            wiggly,
            scroll_remainder: 0.0,
        };
        (app, Task::none())
    }

    pub fn title(&self) -> String {
        let document = self.editor.document();
        let name = document
            .file_path()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("untitled");

        format!("{} [{}] - codeedit", name, document.language())
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let keyboard_sub = keyboard::on_key_press(|key, modifiers| {
            Some(Message::KeyPressed(key, modifiers))
        });
        let resize_sub = window::resize_events().map(|(_id, size)| Message::WindowResized(size));
        let tick_sub = iced::time::every(Duration::from_millis(self.config.animation.interval_ms))
            .map(|_| Message::Tick);

        Subscription::batch([keyboard_sub, resize_sub, tick_sub])
    }
}

pub fn run(flags: Flags) -> iced::Result {
    let (width, height) = flags.editor.size();
    let window_size = iced::Size::new(width as f32, height as f32 + BOTTOM_PANEL_HEIGHT);

    iced::application(App::title, App::update, App::view)
        .subscription(App::subscription)
        .window_size(window_size)
        .theme(|_| iced::Theme::Light)
        .antialiasing(true)
        .run_with(move || App::new(flags))
}
