//! Roster loading and validation.
//!
//! The two five-entity rosters are external data: YAML declaring ids, names,
//! roles, starting resource/vitality, connections and starting attack edges.
//! The engine validates the shape here, at game creation, so malformed data
//! can never reach turn resolution.

use serde::Deserialize;
use thiserror::Error;

use coldfront_protocol::{BoardState, Entity, EntityId, Role, TeamState, Traits};

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("utf-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("{team} team must field exactly five entities, got {got}")]
    WrongEntityCount { team: &'static str, got: usize },
    #[error("duplicate entity id: {0}")]
    DuplicateEntityId(EntityId),
    #[error("{team} team fields no {role} entity")]
    MissingRole { team: &'static str, role: &'static str },
    #[error("{entity}: connection references unknown same-team entity {reference}")]
    UnknownConnection { entity: EntityId, reference: EntityId },
    #[error("{entity}: attack references unknown opposing entity {reference}")]
    UnknownAttackTarget { entity: EntityId, reference: EntityId },
}

/// Where the roster definition comes from.
pub enum RosterSource<'a> {
    /// The roster shipped with the crate.
    Embedded,
    /// A file on disk; `.json` files parse as JSON, anything else as YAML.
    Path(String),
    /// Raw YAML bytes (e.g. from the persistence collaborator).
    Bytes(&'a [u8]),
}

#[derive(Debug, Deserialize)]
struct RawRoster {
    red: Vec<RawEntity>,
    blue: Vec<RawEntity>,
}

#[derive(Debug, Deserialize)]
struct RawEntity {
    id: EntityId,
    name: String,
    role: Role,
    #[serde(default)]
    connections: Vec<EntityId>,
    #[serde(default)]
    attacks: Vec<EntityId>,
    resource: i32,
    vitality: i32,
}

/// Load and validate a roster, producing the turn-1 board document.
pub fn load_roster(source: RosterSource<'_>) -> Result<BoardState, RosterError> {
    let raw: RawRoster = match source {
        RosterSource::Embedded => serde_yaml::from_str(include_str!("../data/roster.yaml"))?,
        RosterSource::Path(path) => {
            let contents = std::fs::read_to_string(&path)?;
            if path.ends_with(".json") {
                serde_json::from_str(&contents)?
            } else {
                serde_yaml::from_str(&contents)?
            }
        }
        RosterSource::Bytes(bytes) => serde_yaml::from_str(std::str::from_utf8(bytes)?)?,
    };

    let red = build_team("red", raw.red)?;
    let blue = build_team("blue", raw.blue)?;

    validate_references(&red, &blue)?;
    validate_references(&blue, &red)?;

    Ok(BoardState {
        turn: 1,
        red,
        blue,
        black_market: Vec::new(),
        black_market_pool: Vec::new(),
    })
}

fn build_team(team: &'static str, raw: Vec<RawEntity>) -> Result<TeamState, RosterError> {
    if raw.len() != 5 {
        return Err(RosterError::WrongEntityCount {
            team,
            got: raw.len(),
        });
    }

    let mut entities = Vec::with_capacity(raw.len());
    for raw_entity in raw {
        if entities.iter().any(|e: &Entity| e.id == raw_entity.id) {
            return Err(RosterError::DuplicateEntityId(raw_entity.id));
        }
        entities.push(Entity {
            id: raw_entity.id,
            name: raw_entity.name,
            role: raw_entity.role,
            connections: raw_entity.connections,
            attacks: raw_entity.attacks,
            resource: raw_entity.resource,
            vitality: raw_entity.vitality,
            victory_points: 0,
            traits: Traits::default(),
        });
    }

    let state = TeamState {
        entities,
        assets: Vec::new(),
    };
    for role in Role::ALL {
        if state.by_role(role).is_none() {
            return Err(RosterError::MissingRole {
                team,
                role: role.label(),
            });
        }
    }
    Ok(state)
}

fn validate_references(team: &TeamState, opposing: &TeamState) -> Result<(), RosterError> {
    for entity in &team.entities {
        for reference in &entity.connections {
            if !team.contains(reference) {
                return Err(RosterError::UnknownConnection {
                    entity: entity.id.clone(),
                    reference: reference.clone(),
                });
            }
        }
        for reference in &entity.attacks {
            if !opposing.contains(reference) {
                return Err(RosterError::UnknownAttackTarget {
                    entity: entity.id.clone(),
                    reference: reference.clone(),
                });
            }
        }
    }
    Ok(())
}
