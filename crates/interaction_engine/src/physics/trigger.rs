//! Trigger notification protocol
//!
//! The physics collaborator reports bodies entering and leaving trigger
//! volumes. Trigger volumes filter by the kind of body, in the spirit of
//! collision layers.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::{BodyKind, BodyRef};

bitflags! {
    /// Body kinds a trigger volume reports
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct TriggerFlags: u8 {
        /// Static bodies
        const STATICS = 1 << 0;
        /// Kinematic bodies (the player controller)
        const KINEMATICS = 1 << 1;
        /// Dynamic bodies
        const DYNAMICS = 1 << 2;
    }
}

impl TriggerFlags {
    /// Whether a body of this kind passes the filter
    pub fn accepts(self, kind: BodyKind) -> bool {
        self.contains(Self::from(kind))
    }
}

impl From<BodyKind> for TriggerFlags {
    fn from(kind: BodyKind) -> Self {
        match kind {
            BodyKind::Static => Self::STATICS,
            BodyKind::Kinematic => Self::KINEMATICS,
            BodyKind::Dynamic => Self::DYNAMICS,
        }
    }
}

impl Default for TriggerFlags {
    fn default() -> Self {
        Self::KINEMATICS | Self::DYNAMICS
    }
}

/// A body crossing a trigger volume boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    /// The body entered the volume
    Entered(BodyRef),
    /// The body is leaving the volume
    Leaving(BodyRef),
}

impl TriggerEvent {
    /// The body involved
    pub fn body(&self) -> BodyRef {
        match *self {
            Self::Entered(body) | Self::Leaving(body) => body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_filter_body_kinds() {
        let flags = TriggerFlags::STATICS | TriggerFlags::KINEMATICS;
        assert!(flags.accepts(BodyKind::Static));
        assert!(flags.accepts(BodyKind::Kinematic));
        assert!(!flags.accepts(BodyKind::Dynamic));
        assert!(!TriggerFlags::empty().accepts(BodyKind::Kinematic));
    }

    #[test]
    fn test_default_reports_moving_bodies() {
        let flags = TriggerFlags::default();
        assert!(flags.accepts(BodyKind::Kinematic));
        assert!(!flags.accepts(BodyKind::Static));
    }
}
