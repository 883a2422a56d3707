use iced::widget::{canvas, column, container, row, text_input};
use iced::{Background, Element, Length};

use super::{App, INPUT_HEIGHT, Message, WIGGLY_HEIGHT};
use crate::components::{GutterCanvas, ViewportCanvas};
use crate::theme::colors;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let font_size = self.config.font.size;

        // Gutter and viewport touch: no spacing, no padding.
        let editor = row![
            canvas(GutterCanvas::new(&self.editor, &self.gutter_cache, font_size))
                .width(Length::Fixed(self.editor.gutter_width() as f32))
                .height(Length::Fill),
            canvas(ViewportCanvas::new(&self.editor, &self.viewport_cache, font_size))
                .width(Length::Fill)
                .height(Length::Fill),
        ]
        .spacing(0)
        .height(Length::Fill);

        let wiggly = container(
            canvas(&self.wiggly)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .height(Length::Fixed(WIGGLY_HEIGHT))
        .style(|_| container::Style {
            background: Some(Background::Color(colors::PANEL_BG)),
            ..Default::default()
        });

        let input = container(
            text_input("Wiggly text", self.wiggly.text())
                .on_input(Message::WigglyTextChanged)
                .padding(8),
        )
        .height(Length::Fixed(INPUT_HEIGHT))
        .style(|_| container::Style {
            background: Some(Background::Color(colors::DIVIDER)),
            ..Default::default()
        });

        column![editor, wiggly, input]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}
