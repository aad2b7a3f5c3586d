//! Terminal presentation module.
//!
//! Renders a [`core::GameSnapshot`] into a character framebuffer and flushes
//! it to a terminal. The engine never sees any of this: the host reads a
//! snapshot once per frame and hands it to [`GameView`].
//!
//! - Keep `core` free of I/O
//! - Render each board cell 2 characters wide to offset the terminal glyph aspect ratio
//! - Only rewrite terminal rows that changed between frames

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, HudState, Viewport};
pub use renderer::{encode_frame_into, TerminalRenderer};
