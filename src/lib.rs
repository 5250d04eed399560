//! retouch — a raster-image editing engine.
//!
//! The engine loads a decoded BGRA8 pixel buffer, applies a sequence of
//! reversible editing operations (stylized filters, brightness/contrast and
//! channel adjustments, crop, resize, rotate-90, frame compositing), and
//! keeps an undo/redo history of image snapshots. Container decoding and
//! encoding live at the edges ([`io`]); the core only ever sees
//! [`raster::RasterImage`] buffers.
//!
//! Typical embedding:
//!
//! ```no_run
//! use retouch::ops::Operation;
//! use retouch::session::EditSession;
//!
//! let image = retouch::io::decode_image("photo.png".as_ref())?;
//! let mut session = EditSession::new(image);
//! session.apply(&Operation::Sepia)?;
//! session.apply(&Operation::Crop { x: 0, y: 0, width: 800, height: 600 })?;
//! session.undo()?;
//! retouch::io::encode_image(session.current(), "out.png".as_ref())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! A session is single-threaded by design: every operation runs to
//! completion before the next, and a multi-threaded host must serialize
//! calls into each `EditSession` (one session per logical user).

pub mod cli;
pub mod config;
pub mod frames;
pub mod history;
pub mod io;
pub mod logger;
pub mod ops;
pub mod raster;
pub mod session;

pub use config::EngineConfig;
pub use frames::FrameRegistry;
pub use history::{HistoryError, HistoryManager};
pub use ops::{OpError, Operation};
pub use raster::{Bgra, RasterImage};
pub use session::EditSession;
