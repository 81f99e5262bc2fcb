//! Window Manager
//!
//! Owns the window chain and routes lifecycle events.
//!
//! The chain runs from `first` (back-most, oldest) to `front` (most recently
//! raised). `front` ignores visibility; [`WindowManager::get_front`] is the
//! visibility-aware lookup used to decide who is active.

use std::rc::Rc;

use slotmap::SlotMap;

use super::{ClosedWindow, UserData, WindowError, WindowHandler, WindowId};
use crate::config::WindowManagerConfig;
use crate::events::{Event, EventType};
use crate::surface::{Rect, Surface};

/// Manager-side window state
struct WindowRecord {
    /// Region carved from the parent surface at creation
    surface: Box<dyn Surface>,
    handler: Rc<dyn WindowHandler>,
    visible: bool,
    user_data: Option<UserData>,
    /// Neighbour toward the back
    prev: Option<WindowId>,
    /// Neighbour toward the front
    next: Option<WindowId>,
}

/// Central window management system
pub struct WindowManager {
    /// Live windows by handle
    windows: SlotMap<WindowId, WindowRecord>,

    /// Most recently raised window, visible or not
    front: Option<WindowId>,

    /// Back-most window
    first: Option<WindowId>,

    config: WindowManagerConfig,
}

impl WindowManager {
    /// Create an empty window manager
    pub fn new() -> Self {
        Self::with_config(WindowManagerConfig::default())
    }

    /// Create an empty window manager with the given settings
    pub fn with_config(config: WindowManagerConfig) -> Self {
        Self {
            windows: SlotMap::with_key(),
            front: None,
            first: None,
            config,
        }
    }

    /// Current settings
    pub const fn config(&self) -> &WindowManagerConfig {
        &self.config
    }

    /// Create a window on a region of `parent` and make it the front window
    ///
    /// The new window receives `WindowActivated` first, then the previously
    /// active window (if any) receives `WindowDeactivated`.
    pub fn create(
        &mut self,
        parent: &dyn Surface,
        rect: Rect,
        handler: Rc<dyn WindowHandler>,
        user_data: Option<UserData>,
    ) -> Result<WindowId, WindowError> {
        if let Some(max) = self.config.max_windows {
            if self.windows.len() >= max {
                log::warn!("Refusing to create window: limit of {} reached", max);
                return Err(WindowError::CapacityExhausted { max });
            }
        }

        let surface = parent.carve(rect)?;
        let prev = self.get_front();

        let window = self.windows.insert(WindowRecord {
            surface,
            handler,
            visible: true,
            user_data,
            prev: None,
            next: None,
        });
        self.link_front(window);
        log::debug!("Created window {:?} at {:?} ({} live)", window, rect, self.windows.len());

        self.notify(window, EventType::WindowActivated);
        if let Some(prev) = prev {
            self.notify(prev, EventType::WindowDeactivated);
        }

        Ok(window)
    }

    /// Close a window
    ///
    /// Returns `Ok(false)` if the window vetoed by handling `WindowClose`; it
    /// is then reactivated and stays where it was. Otherwise the window is
    /// unlinked, the new active window is activated, the window's state is
    /// released and its handler gets [`WindowHandler::window_closed`].
    pub fn close(&mut self, window: WindowId) -> Result<bool, WindowError> {
        let handler = match self.windows.get(window) {
            Some(record) => Rc::clone(&record.handler),
            None => return Err(WindowError::NotFound(window)),
        };

        self.notify(window, EventType::WindowDeactivated);
        if !self.windows.contains_key(window) {
            return Ok(true);
        }

        let vetoed = self.notify(window, EventType::WindowClose);
        if !self.windows.contains_key(window) {
            return Ok(true);
        }

        if vetoed {
            log::debug!("Window {:?} vetoed close", window);
            self.notify(window, EventType::WindowActivated);
            return Ok(false);
        }

        self.unlink(window);
        let record = self.windows.remove(window);

        if let Some(front) = self.get_front() {
            self.notify(front, EventType::WindowActivated);
        }

        drop(record);
        log::debug!("Closed window {:?} ({} live)", window, self.windows.len());

        handler.window_closed(self, ClosedWindow::from(window));
        Ok(true)
    }

    /// Top-most visible window
    pub fn get_front(&self) -> Option<WindowId> {
        let mut cursor = self.front;
        while let Some(window) = cursor {
            let record = &self.windows[window];
            if record.visible {
                return Some(window);
            }
            cursor = record.prev;
        }
        None
    }

    /// Most recently raised window, ignoring visibility
    pub const fn front_raw(&self) -> Option<WindowId> {
        self.front
    }

    /// Back-most window
    pub const fn get_first(&self) -> Option<WindowId> {
        self.first
    }

    /// Next window toward the front
    pub fn get_next(&self, window: WindowId) -> Option<WindowId> {
        self.windows.get(window).and_then(|record| record.next)
    }

    /// Next window toward the back
    pub fn get_prev(&self, window: WindowId) -> Option<WindowId> {
        self.windows.get(window).and_then(|record| record.prev)
    }

    /// Iterate windows from back to front
    pub fn iter(&self) -> Windows<'_> {
        Windows {
            manager: self,
            cursor: self.first,
        }
    }

    /// Raise a window to the front
    ///
    /// A visible window is activated and the previously active window is
    /// deactivated, even when that is the raised window itself (it was the
    /// visible front under a hidden one). Raising an invisible window fires
    /// nothing.
    pub fn select(&mut self, window: WindowId) -> Result<(), WindowError> {
        if !self.windows.contains_key(window) {
            return Err(WindowError::NotFound(window));
        }

        let prev = self.get_front();
        if self.front == Some(window) {
            return Ok(());
        }

        self.unlink(window);
        self.link_front(window);
        log::debug!("Raised window {:?}", window);

        if self.windows[window].visible {
            self.notify(window, EventType::WindowActivated);
            if let Some(prev) = prev {
                self.notify(prev, EventType::WindowDeactivated);
            }
        }

        Ok(())
    }

    /// Show or hide a window
    ///
    /// Fires events only when this changes which window is the visible front:
    /// the new one is activated, then the old one deactivated.
    pub fn set_visible(&mut self, window: WindowId, visible: bool) -> Result<(), WindowError> {
        if !self.windows.contains_key(window) {
            return Err(WindowError::NotFound(window));
        }

        let prev = self.get_front();
        self.windows[window].visible = visible;
        let front = self.get_front();
        if front == prev {
            return Ok(());
        }

        if let Some(front) = front {
            self.notify(front, EventType::WindowActivated);
        }
        if let Some(prev) = prev {
            self.notify(prev, EventType::WindowDeactivated);
        }

        Ok(())
    }

    /// Whether a window is visible
    pub fn is_visible(&self, window: WindowId) -> Result<bool, WindowError> {
        self.windows
            .get(window)
            .map(|record| record.visible)
            .ok_or(WindowError::NotFound(window))
    }

    /// Surface a window draws to
    pub fn surface(&self, window: WindowId) -> Option<&dyn Surface> {
        self.windows.get(window).map(|record| record.surface.as_ref())
    }

    /// Data supplied when the window was created
    pub fn user_data(&self, window: WindowId) -> Option<UserData> {
        self.windows.get(window).and_then(|record| record.user_data.clone())
    }

    /// Whether a handle refers to a live window
    pub fn contains(&self, window: WindowId) -> bool {
        self.windows.contains_key(window)
    }

    /// Number of live windows
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether there are no live windows
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Deliver an event to a window and return its handler's answer
    ///
    /// Dispatch is a direct call; the handler may reenter the manager.
    pub fn send_event(&mut self, window: WindowId, event: &Event) -> Result<bool, WindowError> {
        let (handler, data) = match self.windows.get(window) {
            Some(record) => (Rc::clone(&record.handler), record.user_data.clone()),
            None => return Err(WindowError::NotFound(window)),
        };

        if self.config.trace_events {
            log::trace!("{:?} -> {:?}", event.event_type, window);
        }

        Ok(handler.handle_event(self, window, event, data.as_ref()))
    }

    /// Close every window without asking
    ///
    /// Windows are drained from the front. Each receives `WindowDeactivated`,
    /// is released, then gets [`WindowHandler::window_closed`]. There is no
    /// `WindowClose` request and nothing is reactivated. Windows created by
    /// handlers while draining are drained as well.
    pub fn shutdown(&mut self) {
        log::info!("Shutting down window manager ({} live)", self.windows.len());

        while let Some(window) = self.front {
            let handler = Rc::clone(&self.windows[window].handler);

            self.notify(window, EventType::WindowDeactivated);
            if !self.windows.contains_key(window) {
                continue;
            }

            self.unlink(window);
            self.windows.remove(window);
            handler.window_closed(self, ClosedWindow::from(window));
        }
    }

    /// Dispatch a lifecycle event to a window that may have vanished during
    /// an earlier dispatch
    fn notify(&mut self, window: WindowId, event_type: EventType) -> bool {
        match self.send_event(window, &Event::new(event_type)) {
            Ok(handled) => handled,
            Err(_) => {
                log::debug!("Skipping {:?} for {:?}: window already closed", event_type, window);
                false
            }
        }
    }

    /// Append an unlinked window as the new front
    fn link_front(&mut self, window: WindowId) {
        let old_front = self.front;

        let record = &mut self.windows[window];
        record.prev = old_front;
        record.next = None;

        if let Some(old_front) = old_front {
            self.windows[old_front].next = Some(window);
        }
        if self.first.is_none() {
            self.first = Some(window);
        }
        self.front = Some(window);
    }

    /// Detach a window from the chain, leaving its record in place
    fn unlink(&mut self, window: WindowId) {
        let record = &mut self.windows[window];
        let (prev, next) = (record.prev.take(), record.next.take());

        if self.front == Some(window) {
            self.front = prev;
        }
        if self.first == Some(window) {
            self.first = next;
        }
        if let Some(next) = next {
            self.windows[next].prev = prev;
        }
        if let Some(prev) = prev {
            self.windows[prev].next = next;
        }
    }
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WindowManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowManager")
            .field("chain", &self.iter().collect::<Vec<_>>())
            .field("front", &self.front)
            .field("first", &self.first)
            .field("config", &self.config)
            .finish()
    }
}

/// Back-to-front iterator over window handles
pub struct Windows<'a> {
    manager: &'a WindowManager,
    cursor: Option<WindowId>,
}

impl Iterator for Windows<'_> {
    type Item = WindowId;

    fn next(&mut self) -> Option<Self::Item> {
        let window = self.cursor?;
        self.cursor = self.manager.get_next(window);
        Some(window)
    }
}

impl<'a> IntoIterator for &'a WindowManager {
    type Item = WindowId;
    type IntoIter = Windows<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Canvas;

    struct Silent;

    impl WindowHandler for Silent {
        fn handle_event(
            &self,
            _wm: &mut WindowManager,
            _window: WindowId,
            _event: &Event,
            _data: Option<&UserData>,
        ) -> bool {
            false
        }
    }

    fn spawn(wm: &mut WindowManager, count: usize) -> Vec<WindowId> {
        let screen = Canvas::new(320, 200);
        (0..count)
            .map(|_| wm.create(&screen, Rect::new(0, 0, 32, 32), Rc::new(Silent), None).unwrap())
            .collect()
    }

    /// Walk both directions and check the links agree with `first`/`front`
    fn assert_chain(wm: &WindowManager, expected: &[WindowId]) {
        assert_eq!(wm.iter().collect::<Vec<_>>(), expected);
        assert_eq!(wm.len(), expected.len());
        assert_eq!(wm.get_first(), expected.first().copied());
        assert_eq!(wm.front_raw(), expected.last().copied());

        let mut backwards = Vec::new();
        let mut cursor = wm.front_raw();
        while let Some(window) = cursor {
            backwards.push(window);
            cursor = wm.get_prev(window);
        }
        backwards.reverse();
        assert_eq!(backwards, expected);
    }

    #[test]
    fn test_empty_manager() {
        let wm = WindowManager::new();
        assert!(wm.is_empty());
        assert_eq!(wm.get_front(), None);
        assert_eq!(wm.get_first(), None);
        assert_eq!(wm.iter().count(), 0);
    }

    #[test]
    fn test_unlink_middle_and_ends() {
        let mut wm = WindowManager::new();
        let ids = spawn(&mut wm, 4);

        wm.unlink(ids[1]);
        wm.windows.remove(ids[1]);
        assert_chain(&wm, &[ids[0], ids[2], ids[3]]);

        wm.unlink(ids[0]);
        wm.windows.remove(ids[0]);
        assert_chain(&wm, &[ids[2], ids[3]]);

        wm.unlink(ids[3]);
        wm.windows.remove(ids[3]);
        assert_chain(&wm, &[ids[2]]);

        wm.unlink(ids[2]);
        wm.windows.remove(ids[2]);
        assert_chain(&wm, &[]);
    }

    #[test]
    fn test_relink_first_as_front() {
        let mut wm = WindowManager::new();
        let ids = spawn(&mut wm, 3);

        wm.unlink(ids[0]);
        wm.link_front(ids[0]);
        assert_chain(&wm, &[ids[1], ids[2], ids[0]]);
    }

    #[test]
    fn test_stale_handle_lookups() {
        let mut wm = WindowManager::new();
        let ids = spawn(&mut wm, 2);
        assert!(wm.close(ids[0]).unwrap());

        assert!(!wm.contains(ids[0]));
        assert_eq!(wm.get_next(ids[0]), None);
        assert!(wm.surface(ids[0]).is_none());
        assert_eq!(wm.is_visible(ids[0]), Err(WindowError::NotFound(ids[0])));
        assert_eq!(wm.close(ids[0]), Err(WindowError::NotFound(ids[0])));
        assert_eq!(wm.select(ids[0]), Err(WindowError::NotFound(ids[0])));
        assert_eq!(wm.set_visible(ids[0], false), Err(WindowError::NotFound(ids[0])));
        assert_eq!(
            wm.send_event(ids[0], &Event::new(EventType::WindowDraw)),
            Err(WindowError::NotFound(ids[0]))
        );
    }

    #[test]
    fn test_window_surface_is_carved_region() {
        let mut wm = WindowManager::new();
        let screen = Canvas::with_bounds(Rect::new(100, 50, 320, 200));
        let window = wm.create(&screen, Rect::new(10, 10, 64, 48), Rc::new(Silent), None).unwrap();

        let surface = wm.surface(window).unwrap();
        assert_eq!(surface.bounds(), Rect::new(110, 60, 64, 48));
    }
}
