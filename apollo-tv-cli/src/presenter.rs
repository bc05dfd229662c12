//! A minifb window that displays decoded frames and handles basic
//! keyboard controls (Esc/q to quit).

use color_eyre::eyre::{eyre, Result};
use minifb::{Key, Window, WindowOptions};

use apollo_tv_core::Framebuffer;

pub struct Presenter {
    window: Window,
}

impl Presenter {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let options = WindowOptions {
            resize: true,
            ..WindowOptions::default()
        };

        let mut window = Window::new("Apollo TV Viewer", width as usize, height as usize, options)
            .map_err(|e| eyre!("failed to open display window: {e}"))?;

        window.set_target_fps(60);

        Ok(Self { window })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    /// Handles one pass of pending input, returning `false` if the viewer
    /// should exit.
    pub fn poll(&mut self) -> bool {
        if self.window.is_key_pressed(Key::Q, minifb::KeyRepeat::No) {
            return false;
        }
        self.is_open()
    }

    pub fn present(&mut self, framebuffer: &Framebuffer) -> Result<()> {
        self.window
            .update_with_buffer(
                framebuffer.as_slice(),
                framebuffer.width() as usize,
                framebuffer.height() as usize,
            )
            .map_err(|e| eyre!("failed to present frame: {e}"))
    }
}
