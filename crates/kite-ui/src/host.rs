//! The render-loop contract and a headless host.
//!
//! A host calls [`Game::update`], [`Game::draw`] and [`Game::layout`] once per
//! frame. [`HeadlessRunner`] is a host without a real window: it feeds scripted
//! input and renders into an off-screen [`Image`].

use kite_input::{InputState, InputSystem, RawInput};
use kite_render::{Image, Surface};

use crate::error::{UiError, UiResult};
use crate::window::Window;

pub trait Game {
    fn update(&mut self, input: &InputState) -> UiResult<()>;

    /// Draw failures are the game's to report; the host keeps running.
    fn draw(&mut self, surface: &mut dyn Surface);

    /// Logical size for a host offering `outside_width` x `outside_height`.
    fn layout(&mut self, outside_width: u32, outside_height: u32) -> (u32, u32);
}

impl Game for Window {
    fn update(&mut self, input: &InputState) -> UiResult<()> {
        Window::update(self, input)
    }

    fn draw(&mut self, surface: &mut dyn Surface) {
        if let Err(e) = Window::draw(self, surface) {
            tracing::error!("Failed to draw window '{}': {}", self.title(), e);
        }
    }

    fn layout(&mut self, outside_width: u32, outside_height: u32) -> (u32, u32) {
        Window::layout(self, outside_width, outside_height)
    }
}

/// Drives a [`Game`] frame by frame into an off-screen image.
pub struct HeadlessRunner {
    input: InputSystem,
    surface: Image,
    frames: u64,
}

impl HeadlessRunner {
    /// Size the surface from the game's layout.
    ///
    /// Fails if the game asks for an empty surface.
    pub fn new(game: &mut dyn Game, outside_width: u32, outside_height: u32) -> UiResult<Self> {
        let (width, height) = game.layout(outside_width, outside_height);
        if width == 0 || height == 0 {
            return Err(UiError::HostInit(format!(
                "layout returned an empty surface ({}x{})",
                width, height
            )));
        }

        tracing::debug!("Headless runner rendering at {}x{}", width, height);
        Ok(Self {
            input: InputSystem::new(),
            surface: Image::new(width, height),
            frames: 0,
        })
    }

    /// Queue a raw input event for the next frame.
    pub fn push(&mut self, event: RawInput) {
        self.input.on_event(&event);
    }

    pub fn push_all(&mut self, events: &[RawInput]) {
        self.input.on_events(events);
    }

    pub fn input_mut(&mut self) -> &mut InputSystem {
        &mut self.input
    }

    /// Run update then draw for one frame.
    ///
    /// The frame is drawn even when update reports errors; those are returned
    /// afterwards.
    pub fn run_frame(&mut self, game: &mut dyn Game) -> UiResult<()> {
        let state = self.input.frame();
        let result = game.update(&state);
        game.draw(&mut self.surface);
        self.frames += 1;
        result
    }

    pub fn run_frames(&mut self, game: &mut dyn Game, count: usize) -> UiResult<()> {
        for _ in 0..count {
            self.run_frame(game)?;
        }
        Ok(())
    }

    pub fn surface(&self) -> &Image {
        &self.surface
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindowConfig;
    use kite_render::{Color, Font};

    struct Empty;

    impl Game for Empty {
        fn update(&mut self, _input: &InputState) -> UiResult<()> {
            Ok(())
        }

        fn draw(&mut self, _surface: &mut dyn Surface) {}

        fn layout(&mut self, _w: u32, _h: u32) -> (u32, u32) {
            (0, 0)
        }
    }

    #[test]
    fn test_empty_layout_fails_setup() {
        assert!(matches!(
            HeadlessRunner::new(&mut Empty, 100, 100),
            Err(UiError::HostInit(_))
        ));
    }

    #[test]
    fn test_runner_draws_window_background() {
        let config = WindowConfig::new(32, 16, "bg").background(Color::BLUE);
        let mut window = Window::new(config, Font::default()).unwrap();
        let mut runner = HeadlessRunner::new(&mut window, 800, 600).unwrap();

        runner.run_frames(&mut window, 2).unwrap();
        assert_eq!(runner.frame_count(), 2);
        assert_eq!(runner.surface().width(), 32);
        assert_eq!(runner.surface().pixel(5, 5), Some(Color::BLUE.to_rgba8()));
    }
}
