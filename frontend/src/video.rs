//! SDL window presenting the handheld's 240x160 console surface.
//!
//! The LCD resolution is fixed, so the streaming texture is created once
//! at startup and only updated per frame; the window is an integer scale
//! of the native surface.

use keylight_core::device::console::{HEIGHT, WIDTH};
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};

/// Bytes per framebuffer row (RGB24).
const PITCH: usize = WIDTH * 3;

pub struct Video {
    canvas: Canvas<Window>,
    texture: Texture,
    // The texture must not outlive its creator (sdl2 unsafe_textures).
    _texture_creator: TextureCreator<WindowContext>,
}

impl Video {
    /// Create a window scaled up from the native LCD resolution.
    pub fn new(sdl_video: &sdl2::VideoSubsystem, title: &str, scale: u32) -> Self {
        let window = sdl_video
            .window(title, WIDTH as u32 * scale, HEIGHT as u32 * scale)
            .position_centered()
            .build()
            .expect("Failed to create window");

        let canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .expect("Failed to create canvas");

        let texture_creator = canvas.texture_creator();
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGB24, WIDTH as u32, HEIGHT as u32)
            .expect("Failed to create texture");

        Self {
            canvas,
            texture,
            _texture_creator: texture_creator,
        }
    }

    /// Upload the console framebuffer and present it scaled to the window.
    pub fn present(&mut self, framebuffer: &[u8]) {
        self.texture
            .update(None, framebuffer, PITCH)
            .expect("Failed to update texture");

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, None)
            .expect("Failed to copy texture");
        self.canvas.present();
    }
}
