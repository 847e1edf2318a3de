use delve_core::{Position, RoomKind};

/// Room-entry notifications dispatched to external collaborators after a
/// successful move. Fire-and-forget: the controller never waits on or
/// inspects the collaborator's reaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoomEvent {
    /// A monster room was entered; the combat system takes over.
    CombatTriggered { position: Position },
    TrapSprung { position: Position },
    EventEncountered { position: Position },
    ShopEntered { position: Position },
    LootFound { position: Position },
    BossReached { position: Position },
}

impl RoomEvent {
    /// Maps a room kind to the notification its entry triggers, if any.
    pub fn for_room(kind: RoomKind, position: Position) -> Option<Self> {
        match kind {
            RoomKind::Monster => Some(Self::CombatTriggered { position }),
            RoomKind::Trap => Some(Self::TrapSprung { position }),
            RoomKind::Event => Some(Self::EventEncountered { position }),
            RoomKind::Shop => Some(Self::ShopEntered { position }),
            RoomKind::Loot => Some(Self::LootFound { position }),
            RoomKind::Boss => Some(Self::BossReached { position }),
            RoomKind::Entrance | RoomKind::Empty | RoomKind::Wall => None,
        }
    }
}

/// Boundary to the combat/quest/notification collaborators.
pub trait RoomEventSink {
    fn notify(&mut self, event: RoomEvent);
}

/// Sink for invocations with no collaborator attached (tests, dry runs).
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl RoomEventSink for NullSink {
    fn notify(&mut self, _event: RoomEvent) {}
}
