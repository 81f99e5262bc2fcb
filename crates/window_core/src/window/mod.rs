//! Window System Module
//!
//! A window is a rectangular region carved from a drawing surface, a handler
//! that receives its events, and a position in the front-to-back chain.
//!
//! Architecture:
//! - WindowManager: owns the chain and delivers lifecycle events
//! - WindowHandler: behaviour supplied by whoever creates the window
//! - WindowId / ClosedWindow: identity while live, and after destruction

pub mod manager;


use std::any::Any;
use std::rc::Rc;

use slotmap::{Key, new_key_type};
use thiserror::Error;

use crate::events::Event;
use crate::surface::SurfaceError;

pub use manager::{WindowManager, Windows};

new_key_type! {
    /// Handle to a live window
    ///
    /// Handles are generational: once the window closes, the handle stops
    /// resolving and never aliases a window created later.
    pub struct WindowId;
}

/// Identity of a window that no longer exists
///
/// Delivered with the terminal close notification. It cannot be turned back
/// into a [`WindowId`], so no manager operation can follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClosedWindow(u64);

impl ClosedWindow {
    /// Whether this is the identity `window` had while it was live
    pub fn was(self, window: WindowId) -> bool {
        self.0 == window.data().as_ffi()
    }

    /// Raw value of the former handle
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<WindowId> for ClosedWindow {
    fn from(window: WindowId) -> Self {
        Self(window.data().as_ffi())
    }
}

/// Opaque per-window data owned by the window's creator
pub type UserData = Rc<dyn Any>;

/// Behaviour of a window
///
/// Handlers are shared (`&self`) because dispatch is reentrant: a handler may
/// call back into the manager, which may dispatch to the same handler again
/// before the outer call returns. Keep mutable state in `Cell`/`RefCell` and
/// never hold a borrow across a manager call.
pub trait WindowHandler {
    /// Handle an event sent to `window`
    ///
    /// The return value only matters for [`EventType::WindowClose`], where
    /// `true` cancels the close.
    ///
    /// [`EventType::WindowClose`]: crate::events::EventType::WindowClose
    fn handle_event(
        &self,
        wm: &mut WindowManager,
        window: WindowId,
        event: &Event,
        data: Option<&UserData>,
    ) -> bool;

    /// Called once after the window has been destroyed
    fn window_closed(&self, _wm: &mut WindowManager, _window: ClosedWindow) {}
}

/// Window manager errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// Handle does not refer to a live window
    #[error("Window not found: {0:?}")]
    NotFound(WindowId),

    /// No room for another window
    #[error("Window limit reached: {max}")]
    CapacityExhausted {
        /// Configured limit
        max: usize,
    },

    /// Sub-surface could not be carved
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),
}
