//! Game status machine, scoring state and the NPC roster

use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Title screen, waiting for start input
    #[default]
    Menu,
    /// Active gameplay
    Started,
    /// Game is paused
    Paused,
    /// Suspended on an encounter until the player decides
    AwaitingUser,
    /// Roster exhausted (turn-based modes)
    Ended,
    /// Roster exhausted with the player alive
    Won,
    /// Player health ran out
    Lost,
}

/// Something that moves the status machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    Start,
    TogglePause,
    Encounter,
    Resolved,
    /// No eligible NPCs remain; `won` picks `Won` over `Ended`
    RosterCleared { won: bool },
    PlayerDied,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Menu => "Menu",
            GameStatus::Started => "Started",
            GameStatus::Paused => "Paused",
            GameStatus::AwaitingUser => "Waiting",
            GameStatus::Ended => "Ended",
            GameStatus::Won => "Won",
            GameStatus::Lost => "Lost",
        }
    }

    /// Stable numeric code
    pub fn code(&self) -> u8 {
        match self {
            GameStatus::Menu => 0,
            GameStatus::Started => 1,
            GameStatus::Paused => 2,
            GameStatus::Ended => 3,
            GameStatus::Lost => 4,
            GameStatus::AwaitingUser => 5,
            GameStatus::Won => 6,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Ended | GameStatus::Won | GameStatus::Lost)
    }

    /// Where `event` leads from here, or `None` if the machine does not allow it
    pub fn next(self, event: StatusEvent) -> Option<GameStatus> {
        use GameStatus::*;
        use StatusEvent::*;
        match (self, event) {
            (Menu, Start) => Some(Started),
            (Started, TogglePause) => Some(Paused),
            (Paused, TogglePause) => Some(Started),
            (Started, Encounter) => Some(AwaitingUser),
            (AwaitingUser, Resolved) => Some(Started),
            (Started | AwaitingUser, RosterCleared { won: false }) => Some(Ended),
            (Started | AwaitingUser, RosterCleared { won: true }) => Some(Won),
            (Started | AwaitingUser, PlayerDied) => Some(Lost),
            _ => None,
        }
    }
}

/// Scoring and adjudication state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,
    /// Prompt is shown only while awaiting the player's decision
    pub prompt_player: bool,
    pub prompt_text: String,
    pub purged_count: u32,
    pub spared_count: u32,
    /// NPC under adjudication (non-owning)
    pub target: Option<ActorId>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a status event; illegal transitions are refused and logged
    pub fn apply(&mut self, event: StatusEvent) -> bool {
        match self.status.next(event) {
            Some(next) => {
                log::info!("Status {} -> {}", self.status.as_str(), next.as_str());
                self.status = next;
                true
            }
            None => {
                log::warn!(
                    "Ignoring {:?} while {}",
                    event,
                    self.status.as_str()
                );
                false
            }
        }
    }

    pub fn set_prompt(&mut self, text: &str) {
        self.prompt_player = true;
        self.prompt_text = text.to_string();
    }

    pub fn clear_prompt(&mut self) {
        self.prompt_player = false;
        self.prompt_text.clear();
    }

    pub fn purged_label(&self) -> String {
        format!("Purged: {}", self.purged_count)
    }

    pub fn spared_label(&self) -> String {
        format!("Spared: {}", self.spared_count)
    }
}

/// Ordered NPC roster; removal is two-phase (hide, then compact)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NpcRegistry {
    actors: Vec<Actor>,
}

impl NpcRegistry {
    pub fn new(actors: Vec<Actor>) -> Self {
        Self { actors }
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.iter_mut()
    }

    /// Visible and collidable NPCs, in spawn order
    pub fn eligible(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter().filter(|a| a.is_eligible())
    }

    pub fn eligible_count(&self) -> usize {
        self.eligible().count()
    }

    /// Soft delete: the NPC stays in the roster until the next compaction
    pub fn hide(&mut self, id: ActorId) -> bool {
        match self.get_mut(id) {
            Some(actor) if actor.draw => {
                actor.draw = false;
                true
            }
            _ => false,
        }
    }

    /// Physically drop every hidden NPC, returning how many were removed
    pub fn compact(&mut self) -> usize {
        let before = self.actors.len();
        self.actors.retain(|a| a.draw);
        let removed = before - self.actors.len();
        if removed > 0 {
            log::debug!("Compacted {} NPCs, {} remain", removed, self.actors.len());
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Texture;
    use glam::Vec2;

    fn npc(id: u32, x: f32) -> Actor {
        Actor::new(
            ActorId(id),
            format!("Undead{}", id),
            Vec2::new(x, 0.0),
            Texture::new(1, 24.0, 32.0),
            1.0,
            true,
        )
    }

    #[test]
    fn test_status_transitions() {
        use GameStatus::*;
        use StatusEvent::*;
        assert_eq!(Menu.next(Start), Some(Started));
        assert_eq!(Started.next(TogglePause), Some(Paused));
        assert_eq!(Paused.next(TogglePause), Some(Started));
        assert_eq!(Started.next(Encounter), Some(AwaitingUser));
        assert_eq!(AwaitingUser.next(Resolved), Some(Started));
        assert_eq!(Started.next(RosterCleared { won: false }), Some(Ended));
        assert_eq!(Started.next(RosterCleared { won: true }), Some(Won));
        assert_eq!(Started.next(PlayerDied), Some(Lost));

        assert_eq!(Menu.next(Encounter), None);
        assert_eq!(Paused.next(Encounter), None);
        assert_eq!(AwaitingUser.next(TogglePause), None);
        for terminal in [Ended, Won, Lost] {
            assert!(terminal.is_terminal());
            assert_eq!(terminal.next(Start), None);
            assert_eq!(terminal.next(TogglePause), None);
        }
    }

    #[test]
    fn test_status_codes_and_names() {
        assert_eq!(GameStatus::AwaitingUser.as_str(), "Waiting");
        assert_eq!(GameStatus::AwaitingUser.code(), 5);
        assert_eq!(GameStatus::Won.code(), 6);
        assert_eq!(GameStatus::default(), GameStatus::Menu);
    }

    #[test]
    fn test_apply_rejects_illegal_event() {
        let mut state = GameState::new();
        assert!(!state.apply(StatusEvent::Resolved));
        assert_eq!(state.status, GameStatus::Menu);
        assert!(state.apply(StatusEvent::Start));
        assert_eq!(state.status, GameStatus::Started);
    }

    #[test]
    fn test_hide_then_compact() {
        let mut npcs = NpcRegistry::new(vec![npc(1, 0.0), npc(2, 100.0), npc(3, 200.0)]);
        assert!(npcs.hide(ActorId(2)));
        assert!(!npcs.hide(ActorId(2)));
        assert!(!npcs.hide(ActorId(99)));

        // Still present until compaction
        assert_eq!(npcs.len(), 3);
        assert_eq!(npcs.eligible_count(), 2);

        assert_eq!(npcs.compact(), 1);
        let ids: Vec<_> = npcs.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![ActorId(1), ActorId(3)]);
    }

    #[test]
    fn test_compaction_is_idempotent() {
        let mut npcs = NpcRegistry::new(vec![npc(1, 0.0), npc(2, 100.0), npc(3, 200.0)]);
        npcs.hide(ActorId(1));
        npcs.compact();
        let first: Vec<_> = npcs.iter().map(|a| a.id).collect();
        assert_eq!(npcs.compact(), 0);
        let second: Vec<_> = npcs.iter().map(|a| a.id).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_non_collidable_npc_is_not_eligible() {
        let mut ghost = npc(4, 0.0);
        ghost.collision_enabled = false;
        let npcs = NpcRegistry::new(vec![ghost, npc(5, 50.0)]);
        let eligible: Vec<_> = npcs.eligible().map(|a| a.id).collect();
        assert_eq!(eligible, vec![ActorId(5)]);
    }

    #[test]
    fn test_labels() {
        let mut state = GameState::new();
        state.purged_count = 3;
        assert_eq!(state.purged_label(), "Purged: 3");
        assert_eq!(state.spared_label(), "Spared: 0");
    }
}
