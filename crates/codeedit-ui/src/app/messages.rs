use iced::{Size, keyboard, mouse};

#[derive(Debug, Clone)]
pub enum Message {
    // Editor input
    KeyPressed(keyboard::Key, keyboard::Modifiers),
    /// Raw wheel or trackpad delta over either editor canvas
    Scrolled(mouse::ScrollDelta),

    // Window
    WindowResized(Size),

    // Wiggly text
    Tick,
    WigglyTextChanged(String),
}
