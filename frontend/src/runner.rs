//! Host frame loop: the stand-in for the handheld's vblank wait.
//!
//! Each iteration plays one hardware frame: latch SDL input events into
//! the keypad register, run the program's frame, render the console (plus
//! the frame-rate overlay), drain the mixer into the audio ring, and sleep
//! until the next frame boundary. Pacing is a monotonic-clock deadline at
//! the LCD's 59.7275 Hz; vsync is not assumed.

use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use keylight_core::core::handheld::{Handheld, Program};
use keylight_core::device::console;
use keylight_core::device::mixer::{FRAME_RATE_HZ, SAMPLES_PER_FRAME};
use sdl2::event::Event;
use sdl2::keyboard::Scancode;
use tracing::debug;

use crate::audio;
use crate::input;
use crate::overlay;
use crate::video::Video;

pub fn run(mut program: Box<dyn Program>, title: &str, scale: u32) {
    let sdl_context = sdl2::init().expect("Failed to initialize SDL2");
    let sdl_video = sdl_context.video().expect("Failed to init SDL video");

    let mut video = Video::new(&sdl_video, title, scale);
    let mut event_pump = sdl_context.event_pump().expect("Failed to get event pump");
    let key_map = input::default_key_map();

    let mut hw = Handheld::new();
    program.init(&mut hw);

    let audio_out = if program.uses_audio() {
        let sdl_audio = sdl_context.audio().expect("Failed to init SDL audio");
        Some(audio::init(&sdl_audio))
    } else {
        None
    };

    let frame_duration = Duration::from_secs_f64(1.0 / FRAME_RATE_HZ);
    let mut next_frame = Instant::now() + frame_duration;
    let mut audio_started = false;
    let mut frame_buf = vec![0i16; SAMPLES_PER_FRAME * 2];
    let mut framebuffer = vec![0u8; console::WIDTH * console::HEIGHT * 3];

    // Measured frame rate, updated once a second.
    let mut fps_text = String::new();
    let mut fps_window_start = Instant::now();
    let mut fps_frames = 0u32;

    'main: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'main,

                Event::KeyDown {
                    scancode: Some(Scancode::Escape),
                    ..
                } => break 'main,

                Event::KeyDown {
                    scancode: Some(sc),
                    repeat: false,
                    ..
                } => {
                    if let Some(button) = key_map.get(sc) {
                        hw.keypad.set_button(button, true);
                    }
                }

                Event::KeyUp {
                    scancode: Some(sc), ..
                } => {
                    if let Some(button) = key_map.get(sc) {
                        hw.keypad.set_button(button, false);
                    }
                }

                _ => {}
            }
        }

        program.frame(&mut hw);

        if let Some((device, ring, _)) = &audio_out {
            let n = hw.mixer.fill_audio(&mut frame_buf);
            if n > 0 {
                let mut buf = ring.lock().unwrap();
                buf.extend(&frame_buf[..n]);
                // Drop backlog beyond ~4 frames so latency stays bounded.
                let cap = SAMPLES_PER_FRAME * 2 * 4;
                while buf.len() > cap {
                    buf.pop_front();
                }
            }
            if !audio_started && n > 0 {
                device.resume();
                audio_started = true;
            }
        }

        hw.console.render(&mut framebuffer);
        overlay::draw_fps(&mut framebuffer, &fps_text);
        video.present(&framebuffer);

        fps_frames += 1;
        let elapsed = fps_window_start.elapsed();
        if elapsed >= Duration::from_secs(1) {
            let fps = fps_frames as f64 / elapsed.as_secs_f64();
            fps_text = format!("{fps:.1}");
            debug!(fps, "frame rate");
            fps_window_start = Instant::now();
            fps_frames = 0;
        }

        let now = Instant::now();
        if next_frame > now {
            std::thread::sleep(next_frame - now);
        } else {
            // Running behind; skip the sleep and resynchronize.
            next_frame = now;
        }
        next_frame += frame_duration;
    }

    if let Some((device, _, fade_out)) = &audio_out {
        fade_out.store(true, Ordering::Relaxed);
        std::thread::sleep(audio::fade_out_duration());
        device.pause();
    }
}
