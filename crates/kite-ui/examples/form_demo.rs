//! Form Demo - a scripted, headless run of a small settings form
//!
//! Builds a window with a menu bar, two button panels and a form panel
//! (checkbox and text input), then replays a short input script through the
//! headless runner. A listener thread prints every value change, and the last
//! frame is saved as a PNG.
//!
//! Usage:
//!   cargo run -p kite-ui --example form_demo -- [output.png]
//!
//! Set `RUST_LOG=debug` to see dispatch logging.

use std::thread;

use crossbeam_channel::unbounded;
use kite_core::Config;
use kite_input::{Key, MouseButton, RawInput};
use kite_render::{Color, Font};
use kite_ui::{
    Button, CheckBox, Event, EventType, HeadlessRunner, Panel, TextInput, UiResult, Window,
    WindowConfig,
};

fn button_panel(name: &str, font: &Font, x: f32) -> Panel {
    let mut panel = Panel::vertical(name).with_position(x, 40.0);
    for i in 1..=2 {
        let id = format!("{}-button{}", name, i);
        let label = format!("my button{}", i);
        let log_id = id.clone();
        panel.add_widget(
            Button::text(id, label, 100.0, 40.0, font.clone()).on_click(move |_| {
                tracing::info!("{} pressed", log_id);
                Ok(())
            }),
        );
    }
    panel
}

fn form_panel(font: &Font) -> Panel {
    let mut panel = Panel::vertical("form")
        .with_position(260.0, 40.0)
        .with_background(Color::from_hex(0x2a2a2a));
    panel.add_widget(CheckBox::new("subscribe", 20.0).on_toggle(|_| {
        tracing::info!("checkbox changed");
        Ok(())
    }));
    panel.add_widget(
        TextInput::new("name", 160.0, 24.0, font.clone())
            .with_background(Color::from_hex(0x555555)),
    );
    panel
}

fn click(runner: &mut HeadlessRunner, window: &mut Window, x: f32, y: f32) -> UiResult<()> {
    runner.push(RawInput::CursorMoved { x, y });
    runner.push(RawInput::ButtonPressed(MouseButton::Left));
    runner.run_frame(window)?;
    runner.push(RawInput::ButtonReleased(MouseButton::Left));
    runner.run_frame(window)
}

fn type_text(runner: &mut HeadlessRunner, window: &mut Window, text: &str) -> UiResult<()> {
    // One character reaches the widget per frame.
    for c in text.chars() {
        runner.push(RawInput::CharTyped(c));
        runner.run_frame(window)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    kite_core::init(&Config::default());

    let font = Font::default();
    let mut window = Window::new(
        WindowConfig::new(600, 300, "form demo")
            .menu_bar(true)
            .show_cursor_position(true),
        font.clone(),
    )?;

    if let Some(menu) = window.menu_bar_mut() {
        menu.add_menu_heading("File", &font);
        menu.add_menu_heading("Help", &font);
    }
    window.add_panel(button_panel("panel1", &font, 20.0));
    window.add_panel(button_panel("panel2", &font, 140.0));
    window.add_panel(form_panel(&font));

    let (tx, rx) = unbounded::<Event>();
    window.add_event_listener(EventType::ValueChanged, tx);
    let printer = thread::spawn(move || {
        for event in rx {
            println!("{}", event.description());
        }
    });

    let mut runner = HeadlessRunner::new(&mut window, 600, 300)?;

    click(&mut runner, &mut window, 30.0, 50.0)?;
    click(&mut runner, &mut window, 270.0, 50.0)?;
    click(&mut runner, &mut window, 300.0, 70.0)?;
    type_text(&mut runner, &mut window, "kite")?;

    runner.push(RawInput::KeyPressed(Key::Backspace));
    runner.run_frame(&mut window)?;
    runner.push(RawInput::KeyReleased(Key::Backspace));
    runner.run_frame(&mut window)?;

    window.post_event(Event::set_text_for("name", "posted from outside"));
    runner.run_frames(&mut window, 2)?;

    println!("name is {:?}", window.widget_data("name")?);
    println!("subscribe is {:?}", window.widget_data("subscribe")?);

    let output = std::env::args().nth(1).unwrap_or_else(|| "form_demo.png".to_string());
    runner.surface().save_png(&output)?;
    println!("saved {} frames, last one to {}", runner.frame_count(), output);

    drop(window);
    let _ = printer.join();
    Ok(())
}
