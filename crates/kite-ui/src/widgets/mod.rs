//! Concrete widgets.

mod button;
mod checkbox;
mod menu_bar;
mod text_input;

pub use button::{Button, ButtonFace};
pub use checkbox::{CheckBox, CheckBoxFace};
pub use menu_bar::{MENU_BAR_COLOR, MENU_BAR_HEIGHT};
pub use text_input::{CARET_BLINK_INTERVAL, TextInput};
