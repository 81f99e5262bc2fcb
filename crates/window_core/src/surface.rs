//! Drawing surfaces
//!
//! The window manager never touches pixels. It only needs a way to carve a
//! rectangular sub-surface out of a parent when a window is created, which is
//! what [`Surface`] provides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rectangle in surface coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Exclusive right edge
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Whether the rectangle covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether `other` lies entirely inside this rectangle
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Surface errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// Requested region extends past the parent surface
    #[error("Region {rect:?} does not fit inside surface {bounds:?}")]
    OutOfBounds {
        /// Requested region, relative to the parent
        rect: Rect,
        /// Parent extent, relative to itself
        bounds: Rect,
    },

    /// Requested region has no area
    #[error("Empty region: {0:?}")]
    Empty(Rect),
}

/// A drawing surface that windows can be carved from
pub trait Surface: std::fmt::Debug {
    /// Absolute area covered by this surface
    fn bounds(&self) -> Rect;

    /// Carve a sub-surface at `rect`, given relative to this surface's origin
    fn carve(&self, rect: Rect) -> Result<Box<dyn Surface>, SurfaceError>;
}

/// Bounds-only surface
///
/// Tracks where a region sits on screen without owning any pixel storage.
/// Renderers map a canvas back onto their own targets through [`Surface::bounds`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    bounds: Rect,
}

impl Canvas {
    /// Create a root canvas of the given size at the origin
    pub const fn new(width: u32, height: u32) -> Self {
        Self::with_bounds(Rect::new(0, 0, width, height))
    }

    /// Create a canvas covering an absolute region
    pub const fn with_bounds(bounds: Rect) -> Self {
        Self { bounds }
    }
}

impl Surface for Canvas {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn carve(&self, rect: Rect) -> Result<Box<dyn Surface>, SurfaceError> {
        if rect.is_empty() {
            return Err(SurfaceError::Empty(rect));
        }

        let local = Rect::new(0, 0, self.bounds.width, self.bounds.height);
        if !local.contains_rect(&rect) {
            return Err(SurfaceError::OutOfBounds { rect, bounds: local });
        }

        let x = self.bounds.x.saturating_add(rect.x);
        let y = self.bounds.y.saturating_add(rect.y);
        Ok(Box::new(Self::with_bounds(Rect::new(x, y, rect.width, rect.height))))
    }
}
