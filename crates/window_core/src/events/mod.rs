//! Window event vocabulary
//!
//! Events carry a type tag only. The core's own types occupy the low codes;
//! hosts number their own events from [`USER_BASE`] upwards and the manager
//! dispatches those opaquely.

/// First numeric code available to host-defined events
pub const USER_BASE: u64 = 7;

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Nothing happened this tick
    Idle,
    /// A translated key command for the receiving window
    KeyCommand,
    /// The window became the active (visible front) window
    WindowActivated,
    /// The window stopped being the active window
    WindowDeactivated,
    /// The window should redraw its surface
    WindowDraw,
    /// The window is about to close; returning `true` vetoes
    WindowClose,
    /// The window has been destroyed
    WindowClosed,
    /// Host-defined event, numbered relative to [`USER_BASE`]
    User(u32),
}

impl EventType {
    /// Numeric code of this event type
    pub const fn code(self) -> u64 {
        match self {
            Self::Idle => 0,
            Self::KeyCommand => 1,
            Self::WindowActivated => 2,
            Self::WindowDeactivated => 3,
            Self::WindowDraw => 4,
            Self::WindowClose => 5,
            Self::WindowClosed => 6,
            Self::User(n) => USER_BASE + n as u64,
        }
    }

    /// Event type for a numeric code, `None` past the end of the user range
    pub fn from_code(code: u64) -> Option<Self> {
        let event_type = match code {
            0 => Self::Idle,
            1 => Self::KeyCommand,
            2 => Self::WindowActivated,
            3 => Self::WindowDeactivated,
            4 => Self::WindowDraw,
            5 => Self::WindowClose,
            6 => Self::WindowClosed,
            n => Self::User(u32::try_from(n - USER_BASE).ok()?),
        };
        Some(event_type)
    }

    /// Whether this is a host-defined type
    pub const fn is_user(self) -> bool {
        matches!(self, Self::User(_))
    }
}

/// A window event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// Type of event
    pub event_type: EventType,
}

impl Event {
    /// Create a new event of the given type
    pub const fn new(event_type: EventType) -> Self {
        Self { event_type }
    }
}

impl From<EventType> for Event {
    fn from(event_type: EventType) -> Self {
        Self::new(event_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_codes_are_dense() {
        let core = [
            EventType::Idle,
            EventType::KeyCommand,
            EventType::WindowActivated,
            EventType::WindowDeactivated,
            EventType::WindowDraw,
            EventType::WindowClose,
            EventType::WindowClosed,
        ];
        for (expected, event_type) in core.iter().enumerate() {
            assert_eq!(event_type.code(), expected as u64);
            assert_eq!(EventType::from_code(expected as u64), Some(*event_type));
        }
    }

    #[test]
    fn test_user_codes_start_at_base() {
        assert_eq!(EventType::User(0).code(), USER_BASE);
        assert_eq!(EventType::from_code(USER_BASE + 3), Some(EventType::User(3)));
        assert!(EventType::User(3).is_user());
        assert!(!EventType::WindowDraw.is_user());
    }

    #[test]
    fn test_code_past_user_range() {
        assert_eq!(EventType::from_code(u64::MAX), None);
        assert_eq!(
            EventType::from_code(USER_BASE + u64::from(u32::MAX)),
            Some(EventType::User(u32::MAX))
        );
    }
}
