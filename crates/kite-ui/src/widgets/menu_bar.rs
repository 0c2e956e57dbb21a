use kite_render::{Color, Font};

use crate::panel::Panel;
use crate::widgets::Button;

pub const MENU_BAR_HEIGHT: f32 = 30.0;
pub const MENU_BAR_COLOR: u32 = 0x717171;

const HEADING_PADDING: f32 = 8.0;

impl Panel {
    /// A fixed-size strip that lays headings out left to right.
    pub fn menu_bar(
        id: impl Into<String>,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        background: Color,
    ) -> Self {
        Panel::horizontal(id)
            .with_position(x, y)
            .with_size(width, height)
            .with_dynamic_size(false)
            .with_background(background)
    }

    /// A text heading for this menu bar, sized to its label and the bar's height.
    ///
    /// The heading's id is `<menu bar id>.<title>`. Attach handlers to it, then
    /// add it with [`Panel::add_widget`].
    pub fn menu_heading(&self, title: &str, font: &Font) -> Button {
        let width = font.text_width(title) + 2.0 * HEADING_PADDING;
        Button::text(
            format!("{}.{}", self.id(), title),
            title,
            width,
            self.size().height,
            font.clone(),
        )
        .with_background(Color::from_hex(MENU_BAR_COLOR))
    }

    /// Append a heading with no handlers.
    pub fn add_menu_heading(&mut self, title: &str, font: &Font) {
        let heading = self.menu_heading(title, font);
        self.add_widget(heading);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;
    use crate::panel::PanelLayout;
    use crate::widget::Widget;

    #[test]
    fn test_headings_laid_out_left_to_right() {
        let font = Font::default();
        let mut bar = Panel::menu_bar(
            "menu",
            0.0,
            0.0,
            600.0,
            MENU_BAR_HEIGHT,
            Color::from_hex(MENU_BAR_COLOR),
        );
        bar.add_menu_heading("File", &font);
        let edit = bar.menu_heading("Edit", &font).on_click(|_| Ok(()));
        bar.add_widget(edit);

        assert_eq!(bar.layout(), PanelLayout::Horizontal);
        assert_eq!(bar.size().height, MENU_BAR_HEIGHT);
        assert_eq!(bar.size().width, 600.0);

        let first = &bar.widgets()[0];
        let second = &bar.widgets()[1];
        assert_eq!(first.id(), "menu.File");
        assert_eq!(second.position().x, first.size().width);
        assert_eq!(first.size().height, MENU_BAR_HEIGHT);

        let edit = bar.widget("menu.Edit").unwrap().as_any().downcast_ref::<Button>();
        assert_eq!(edit.and_then(|b| b.label()), Some("Edit"));
        assert!(edit.is_some_and(|b| b.base().has_handler(EventType::ButtonDown)));
    }
}
