//! Physics bridge
//!
//! Registry of rigid bodies and the queue of trigger notifications waiting to
//! be delivered in the physics phase of a tick.

use slotmap::{new_key_type, SlotMap};

use super::{BodyKind, BodyRef, TriggerEvent};
use crate::ecs::{EntityId, World};

new_key_type! {
    /// Key of a registered body
    pub struct BodyKey;
}

#[derive(Debug, Clone, Copy)]
struct BodyRecord {
    owner: EntityId,
    kind: BodyKind,
}

/// Body registry plus queued trigger notifications
#[derive(Debug, Default)]
pub struct PhysicsBridge {
    bodies: SlotMap<BodyKey, BodyRecord>,
    pending: Vec<(EntityId, TriggerEvent)>,
}

impl PhysicsBridge {
    /// Create an empty bridge
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a body owned by `owner`
    pub fn register_body(&mut self, owner: EntityId, kind: BodyKind) -> BodyRef {
        let key = self.bodies.insert(BodyRecord { owner, kind });
        log::debug!("Registered {:?} body for entity {}", kind, owner);
        BodyRef { key, owner, kind }
    }

    /// Remove a body. Queued notifications about it are dropped on delivery.
    pub fn remove_body(&mut self, body: BodyRef) -> bool {
        self.bodies.remove(body.key).is_some()
    }

    /// Remove every body owned by `owner`
    pub fn remove_bodies_of(&mut self, owner: EntityId) -> usize {
        let before = self.bodies.len();
        self.bodies.retain(|_, record| record.owner != owner);
        before - self.bodies.len()
    }

    /// Whether the body is still registered
    pub fn contains(&self, body: BodyRef) -> bool {
        self.bodies.contains_key(body.key)
    }

    /// Number of registered bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Queue "body entered `volume`"
    pub fn enter(&mut self, volume: EntityId, body: BodyRef) {
        self.pending.push((volume, TriggerEvent::Entered(body)));
    }

    /// Queue "body is leaving `volume`"
    pub fn leave(&mut self, volume: EntityId, body: BodyRef) {
        self.pending.push((volume, TriggerEvent::Leaving(body)));
    }

    /// Number of queued notifications
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Take queued notifications in arrival order, dropping those about removed bodies
    pub fn drain(&mut self) -> Vec<(EntityId, TriggerEvent)> {
        let bodies = &self.bodies;
        self.pending
            .drain(..)
            .filter(|(volume, event)| {
                let live = bodies
                    .get(event.body().key)
                    .is_some_and(|record| record.owner == event.body().owner && record.kind == event.body().kind);
                if !live {
                    log::warn!("Dropping trigger notification for {} about an unknown body", volume);
                }
                live
            })
            .collect()
    }

    /// Deliver queued notifications to the world. Returns the number of
    /// component notifications made.
    pub fn dispatch(&mut self, world: &mut World) -> usize {
        self.drain()
            .into_iter()
            .map(|(volume, event)| world.notify_trigger(volume, event))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_resolves_to_owner() {
        let mut bridge = PhysicsBridge::new();
        let owner = EntityId::from_raw(4);
        let body = bridge.register_body(owner, BodyKind::Kinematic);
        assert_eq!(body.owner(), owner);
        assert_eq!(body.kind(), BodyKind::Kinematic);
        assert!(bridge.contains(body));
    }

    #[test]
    fn test_drain_keeps_arrival_order() {
        let mut bridge = PhysicsBridge::new();
        let volume = EntityId::from_raw(1);
        let body = bridge.register_body(EntityId::from_raw(2), BodyKind::Kinematic);
        bridge.enter(volume, body);
        bridge.leave(volume, body);
        bridge.enter(volume, body);

        let events: Vec<_> = bridge.drain().into_iter().map(|(_, e)| e).collect();
        assert_eq!(
            events,
            vec![TriggerEvent::Entered(body), TriggerEvent::Leaving(body), TriggerEvent::Entered(body)]
        );
        assert_eq!(bridge.pending(), 0);
    }

    #[test]
    fn test_removed_body_notifications_are_dropped() {
        let mut bridge = PhysicsBridge::new();
        let volume = EntityId::from_raw(1);
        let player = EntityId::from_raw(2);
        let body = bridge.register_body(player, BodyKind::Kinematic);
        let other = bridge.register_body(EntityId::from_raw(3), BodyKind::Dynamic);
        bridge.enter(volume, body);
        bridge.enter(volume, other);

        assert_eq!(bridge.remove_bodies_of(player), 1);
        assert_eq!(bridge.drain(), vec![(volume, TriggerEvent::Entered(other))]);
    }
}
