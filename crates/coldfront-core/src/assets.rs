//! The nine-asset catalog and activation effects.
//!
//! The catalog is closed: every `AssetId` maps to exactly one effect,
//! dispatched by exhaustive match. Activation is forgiving — an invalid
//! option leaves the board untouched and reports failure, so a forced
//! timeout resolution can never error.

use coldfront_protocol::{AssetId, AssetOption, BoardState, TeamColor};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetCategory {
    Attack,
    Defensive,
}

/// Static catalog entry for one asset.
#[derive(Clone, Copy, Debug)]
pub struct AssetSpec {
    pub name: &'static str,
    pub category: AssetCategory,
    pub description: &'static str,
    /// Valid targets/options; empty means no selector is needed.
    pub targets: &'static [&'static str],
    /// How many copies seed the black-market pool.
    pub rarity: usize,
}

pub const ALL_ASSETS: [AssetId; 9] = [
    AssetId::AttackVector,
    AssetId::Education,
    AssetId::Recovery,
    AssetId::SoftwareUpdate,
    AssetId::BargainingChip,
    AssetId::NetworkPolicy,
    AssetId::Stuxnet,
    AssetId::Ransomware,
    AssetId::CyberInvestment,
];

const ANY_ENTITY: &[&str] = &[
    "rus_gov", "bear", "trolls", "scs", "ros", "uk_gov", "plc", "elect", "gchq", "energy",
];

pub fn asset_spec(asset: AssetId) -> AssetSpec {
    match asset {
        AssetId::AttackVector => AssetSpec {
            name: "Attack Vector",
            category: AssetCategory::Attack,
            description: "Opens up one of the following attack vectors: GCHQ - Rosenergoatom, \
                          SCS - UK Energy, UK Government - Russia Government.",
            targets: &["gchq", "scs", "uk_gov"],
            rarity: 3,
        },
        AssetId::Education => AssetSpec {
            name: "Education",
            category: AssetCategory::Defensive,
            description: "Electorate suffers only half of any damage it receives for the next 3 turns.",
            targets: &[],
            rarity: 2,
        },
        AssetId::Recovery => AssetSpec {
            name: "Recovery Management",
            category: AssetCategory::Defensive,
            description: "At the end of a turn, if UK PLC has suffered any damage, they receive +1 vitality.",
            targets: &[],
            rarity: 2,
        },
        AssetId::SoftwareUpdate => AssetSpec {
            name: "Software Update",
            category: AssetCategory::Defensive,
            description: "Renders UK PLC or UK Energy or Rosenergoatom immune to direct attack for 2 turns.",
            targets: &["plc", "energy", "ros"],
            rarity: 3,
        },
        AssetId::BargainingChip => AssetSpec {
            name: "Bargaining Chip",
            category: AssetCategory::Defensive,
            description: "Russia Government suffers only half of any damage it receives for the next 3 turns.",
            targets: &[],
            rarity: 2,
        },
        AssetId::NetworkPolicy => AssetSpec {
            name: "Network Policy",
            category: AssetCategory::Defensive,
            description: "Renders entity immune from splash damage, but only 2 resource can be \
                          transferred to or from it each turn.",
            targets: ANY_ENTITY,
            rarity: 2,
        },
        AssetId::Stuxnet => AssetSpec {
            name: "Stuxnet 2.0",
            category: AssetCategory::Attack,
            description: "Direct attack from GCHQ/SCS deals double damage to UK Energy or Rosenergoatom.",
            targets: &["gchq", "scs"],
            rarity: 1,
        },
        AssetId::Ransomware => AssetSpec {
            name: "Ransomware",
            category: AssetCategory::Attack,
            description: "When part of successful direct attack, paralyses UK PLC or Electorate \
                          for 2 turns unless 2 resource is paid to attacker.",
            targets: &["plc", "elect"],
            rarity: 1,
        },
        AssetId::CyberInvestment => AssetSpec {
            name: "Cyber Investment Programme",
            category: AssetCategory::Defensive,
            description: "Entity may regenerate vitality at 1 less resource cost than normal.",
            targets: ANY_ENTITY,
            rarity: 2,
        },
    }
}

/// Count how many of a team's held assets fall in `category`.
pub fn count_assets_of_type(assets: &[AssetId], category: AssetCategory) -> usize {
    assets
        .iter()
        .filter(|a| asset_spec(**a).category == category)
        .count()
}

fn set_attack_edge(board: &mut BoardState, team: TeamColor, attacker: &str, target: &str) -> bool {
    match board.team_mut(team).entity_mut(attacker) {
        Some(entity) => {
            entity.attacks = vec![target.to_string()];
            true
        }
        None => false,
    }
}

/// Apply one activation. Returns false (board untouched) when the option is
/// missing or names an invalid target.
pub fn activate_asset(board: &mut BoardState, asset: AssetId, option: &AssetOption) -> bool {
    match asset {
        AssetId::AttackVector => match option {
            AssetOption::Choice(0) => set_attack_edge(board, TeamColor::Blue, "gchq", "ros"),
            AssetOption::Choice(1) => set_attack_edge(board, TeamColor::Red, "scs", "energy"),
            AssetOption::Choice(2) => set_attack_edge(board, TeamColor::Blue, "uk_gov", "rus_gov"),
            _ => false,
        },
        AssetId::Education => match board.blue.entity_mut("elect") {
            Some(elect) => {
                elect.traits.education = 3;
                true
            }
            None => false,
        },
        AssetId::Recovery => match board.blue.entity_mut("plc") {
            Some(plc) => {
                plc.traits.recovery = Some(plc.vitality);
                true
            }
            None => false,
        },
        AssetId::SoftwareUpdate => {
            let target = match option {
                AssetOption::Choice(0) => "plc",
                AssetOption::Choice(1) => "energy",
                AssetOption::Choice(2) => "ros",
                _ => return false,
            };
            match board.entity_mut(target) {
                Some(entity) => {
                    entity.traits.software_update = 2;
                    true
                }
                None => false,
            }
        }
        AssetId::BargainingChip => match board.red.entity_mut("rus_gov") {
            Some(gov) => {
                gov.traits.bargaining_chip = 3;
                true
            }
            None => false,
        },
        AssetId::NetworkPolicy => match option {
            AssetOption::Target(id) => match board.entity_mut(id) {
                Some(entity) => {
                    entity.traits.network_policy = true;
                    true
                }
                None => false,
            },
            _ => false,
        },
        AssetId::Stuxnet => {
            let target = match option {
                AssetOption::Choice(0) => "ros",
                AssetOption::Choice(1) => "energy",
                _ => return false,
            };
            match board.entity_mut(target) {
                Some(entity) => {
                    entity.traits.stuxnet = true;
                    true
                }
                None => false,
            }
        }
        AssetId::Ransomware => match option {
            AssetOption::Target(id) if id == "plc" || id == "elect" => {
                match board.blue.entity_mut(id) {
                    Some(entity) => {
                        entity.traits.ransomware = true;
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        },
        AssetId::CyberInvestment => match option {
            AssetOption::Target(id) => match board.entity_mut(id) {
                Some(entity) => {
                    entity.traits.cyber_investment = true;
                    true
                }
                None => false,
            },
            _ => false,
        },
    }
}
