//! The authoritative board-state document.
//!
//! One `BoardState` per game, mutated only by the turn orchestrator and
//! copied wholesale into the game history after every resolved turn. All
//! cross-entity references are id strings resolved against the owning team's
//! entity list, which keeps the document trivially serializable and free of
//! aliasing when snapshots are taken.

use serde::{Deserialize, Serialize};

use crate::{EntityId, Role, TeamColor};

/// The nine catalog assets. A closed set: every id maps to exactly one
/// activation effect, dispatched by exhaustive match in the core crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetId {
    AttackVector,
    Education,
    Recovery,
    SoftwareUpdate,
    BargainingChip,
    NetworkPolicy,
    Stuxnet,
    Ransomware,
    CyberInvestment,
}

/// Persistent vitality-growth memory used by the checkpoint scoring rules:
/// `vitality` is the value recorded at the previous checkpoint, `count` the
/// current growth streak.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthTracker {
    pub vitality: i32,
    pub count: u32,
}

/// Named modifiers attached to an entity. Counters tick down once per
/// resolved turn; one-shot flags clear after their turn of effect.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Traits {
    /// Immune to direct damage while > 0.
    pub software_update: u8,
    /// Incoming direct damage halved, splash quartered, while > 0.
    pub education: u8,
    /// Incoming direct damage halved while > 0.
    pub bargaining_chip: u8,
    /// Entity takes no declared action while > 0.
    pub paralyzed: u8,
    pub cannot_attack: u8,
    pub cannot_bid: u8,
    /// Entity takes no declared action while > 0.
    pub cannot_act: u8,
    /// Next direct hit deals double damage, then clears.
    pub stuxnet: bool,
    /// Marked by the ransomware asset; a direct hit paralyzes, then clears.
    pub ransomware: bool,
    pub banking_error: bool,
    pub embargoed: bool,
    pub people_revolt: bool,
    /// Permanently immune to splash damage.
    pub network_policy: bool,
    /// Revitalization costs 1 less resource.
    pub cyber_investment: bool,
    /// Regenerate +1 vitality per turn until this recorded target is reached.
    pub recovery: Option<i32>,
    pub recruitment_drive: Option<GrowthTracker>,
    pub grow_capacity: Option<GrowthTracker>,
    pub last_growth_vitality: Option<i32>,
}

/// One playable unit. `connections` names same-team entities (splash
/// adjacency, undirected); `attacks` names opposing-team entities this one
/// is permitted to target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub role: Role,
    pub connections: Vec<EntityId>,
    pub attacks: Vec<EntityId>,
    pub resource: i32,
    pub vitality: i32,
    pub victory_points: i32,
    #[serde(default)]
    pub traits: Traits,
}

/// One row of the shared black market. `has_bid` records that a standing bid
/// exists, so an uncontested prior bid is detected explicitly rather than
/// inferred from the bid amount.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketListing {
    pub asset: AssetId,
    pub bid: i32,
    #[serde(default)]
    pub has_bid: bool,
}

impl MarketListing {
    pub fn new(asset: AssetId) -> Self {
        Self {
            asset,
            bid: 0,
            has_bid: false,
        }
    }
}

/// One team's half of the board: the fixed five-entity roster (insertion
/// order preserved) and the assets it currently owns (acquisition order,
/// duplicates allowed).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamState {
    pub entities: Vec<Entity>,
    pub assets: Vec<AssetId>,
}

impl TeamState {
    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entities.iter().any(|e| e.id == id)
    }

    /// The entity bound to `role` (each team fields exactly one per role).
    pub fn by_role(&self, role: Role) -> Option<&Entity> {
        self.entities.iter().find(|e| e.role == role)
    }

    pub fn by_role_mut(&mut self, role: Role) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.role == role)
    }

    /// Ids of every entity adjacent to `id`. The adjacency graph is
    /// undirected: a declared connection counts in both directions.
    pub fn neighbours(&self, id: &str) -> Vec<EntityId> {
        let mut out = Vec::new();
        let declared = self.entity(id).map(|e| e.connections.clone()).unwrap_or_default();
        for other in &self.entities {
            if other.id == id {
                continue;
            }
            let linked = declared.iter().any(|c| *c == other.id)
                || other.connections.iter().any(|c| *c == id);
            if linked && !out.contains(&other.id) {
                out.push(other.id.clone());
            }
        }
        out
    }

    pub fn total_victory_points(&self) -> i32 {
        self.entities.iter().map(|e| e.victory_points).sum()
    }
}

/// The full board document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    /// Half-round counter, starting at 1 (red). Odd = red acts, even = blue.
    pub turn: u32,
    pub red: TeamState,
    pub blue: TeamState,
    pub black_market: Vec<MarketListing>,
    pub black_market_pool: Vec<AssetId>,
}

impl BoardState {
    pub fn team(&self, color: TeamColor) -> &TeamState {
        match color {
            TeamColor::Red => &self.red,
            TeamColor::Blue => &self.blue,
        }
    }

    pub fn team_mut(&mut self, color: TeamColor) -> &mut TeamState {
        match color {
            TeamColor::Red => &mut self.red,
            TeamColor::Blue => &mut self.blue,
        }
    }

    pub fn acting_team(&self) -> TeamColor {
        TeamColor::acting_on(self.turn)
    }

    /// Look up an entity on either team.
    pub fn entity(&self, id: &str) -> Option<(TeamColor, &Entity)> {
        if let Some(e) = self.red.entity(id) {
            return Some((TeamColor::Red, e));
        }
        self.blue.entity(id).map(|e| (TeamColor::Blue, e))
    }

    pub fn entity_mut(&mut self, id: &str) -> Option<&mut Entity> {
        if self.red.contains(id) {
            return self.red.entity_mut(id);
        }
        self.blue.entity_mut(id)
    }
}
