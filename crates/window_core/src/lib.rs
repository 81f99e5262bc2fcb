//! # Window Core
//!
//! Z-ordered window management and lifecycle event dispatch for an
//! interactive application's on-screen surfaces.
//!
//! ## Features
//!
//! - **Window Chain**: Arena-backed front-to-back ordering with O(1) raise and removal
//! - **Lifecycle Events**: Activation, deactivation, draw, close requests and close notifications
//! - **Close Veto**: A window can cancel its own closure from its handler
//! - **Reentrant Dispatch**: Handlers receive the manager and may create, raise or close windows
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use window_core::prelude::*;
//!
//! struct Hud;
//!
//! impl WindowHandler for Hud {
//!     fn handle_event(
//!         &self,
//!         _wm: &mut WindowManager,
//!         _window: WindowId,
//!         _event: &Event,
//!         _data: Option<&UserData>,
//!     ) -> bool {
//!         false
//!     }
//! }
//!
//! fn main() -> Result<(), WindowError> {
//!     let screen = Canvas::new(640, 480);
//!     let mut wm = WindowManager::new();
//!     let hud = wm.create(&screen, Rect::new(0, 0, 640, 32), Rc::new(Hud), None)?;
//!     assert_eq!(wm.get_front(), Some(hud));
//!     assert!(wm.close(hud)?);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod events;
pub mod foundation;
pub mod surface;
pub mod window;

pub use config::{Config, ConfigError, WindowManagerConfig};
pub use events::{Event, EventType};
pub use surface::{Canvas, Rect, Surface, SurfaceError};
pub use window::{ClosedWindow, UserData, WindowError, WindowHandler, WindowId, WindowManager};

/// Common imports for window owners
pub mod prelude {
    pub use crate::{
        config::{Config, WindowManagerConfig},
        events::{Event, EventType, USER_BASE},
        surface::{Canvas, Rect, Surface},
        window::{ClosedWindow, UserData, WindowError, WindowHandler, WindowId, WindowManager},
    };
}
