//! Victory-point scoring, fatality handling and winner determination.
//!
//! Monthly scoring runs for both teams whenever a new turn is odd. Checkpoint
//! rules key off the `end_of_month` helper; growth rules keep their memory in
//! entity traits so it survives snapshotting.

use coldfront_protocol::{BoardState, Entity, GrowthTracker, LogCategory, Role, TeamColor, Traits};

use crate::assets::{count_assets_of_type, AssetCategory};
use crate::engine::MessageLog;
use crate::tables::{checkpoint_index, end_of_month};

pub const QUARTER_MONTHS: [u32; 4] = [3, 6, 9, 12];
pub const THIRD_MONTHS: [u32; 3] = [4, 8, 12];
pub const HALF_MONTHS: [u32; 2] = [6, 12];

/// Flag every destroyed entity and award the opposing government 10 VP each.
/// Returns whether any entity fell this turn.
pub fn fatality_sweep(board: &mut BoardState, log: &mut MessageLog) -> bool {
    let mut fatalities = false;
    for team in [TeamColor::Red, TeamColor::Blue] {
        let fallen: Vec<String> = board
            .team(team)
            .entities
            .iter()
            .filter(|e| e.vitality <= 0)
            .map(|e| e.name.clone())
            .collect();
        for name in fallen {
            fatalities = true;
            if let Some(gov) = board.team_mut(team.opponent()).by_role_mut(Role::Government) {
                gov.victory_points += 10;
            }
            log.log(
                format!("{name} was dealt fatal damage. Opponent was awarded 10 VPs."),
                LogCategory::Important,
            );
        }
    }
    fatalities
}

/// Compare summed victory points and declare the winner. A tie falls to blue,
/// matching the strict comparison the scoring rules are balanced around.
pub fn determine_winner(board: &BoardState, log: &mut MessageLog) -> TeamColor {
    let red_vps = board.red.total_victory_points();
    let blue_vps = board.blue.total_victory_points();
    let victor = if red_vps > blue_vps {
        TeamColor::Red
    } else {
        TeamColor::Blue
    };
    let (winner_vps, loser_vps) = match victor {
        TeamColor::Red => (red_vps, blue_vps),
        TeamColor::Blue => (blue_vps, red_vps),
    };
    log.log(
        format!(
            "Team {} won the game having {winner_vps} VPs. The opposing team had {loser_vps} VPs.",
            victor.label()
        ),
        LogCategory::Important,
    );
    victor
}

/// Seed the growth-rule memory from current vitality so the first checkpoint
/// compares against the starting values.
pub fn ensure_growth_memory(board: &mut BoardState) {
    if let Some(plc) = board.blue.entity_mut("plc") {
        let vitality = plc.vitality;
        plc.traits
            .recruitment_drive
            .get_or_insert(GrowthTracker { vitality, count: 0 });
    }
    if let Some(ros) = board.red.entity_mut("ros") {
        let vitality = ros.vitality;
        ros.traits
            .grow_capacity
            .get_or_insert(GrowthTracker { vitality, count: 0 });
    }
    if let Some(bear) = board.red.entity_mut("bear") {
        let vitality = bear.vitality;
        bear.traits.last_growth_vitality.get_or_insert(vitality);
    }
}

/// Run monthly scoring for both teams. `board.turn` is the freshly entered
/// odd turn.
pub fn score_month(board: &mut BoardState, log: &mut MessageLog) {
    score_blue(board, log);
    score_red(board, log);
}

/// Award a growth-streak checkpoint on one entity. Growth extends the streak
/// and pays `1 + 2 * streak`; stagnation zeroes it. The recorded vitality
/// updates either way.
fn growth_streak_checkpoint(
    entity: &mut Entity,
    tracker: fn(&mut Traits) -> &mut Option<GrowthTracker>,
) -> Option<(i32, u32)> {
    let vitality = entity.vitality;
    let slot = tracker(&mut entity.traits);
    let memory = slot.get_or_insert(GrowthTracker { vitality, count: 0 });

    if vitality > memory.vitality {
        let won = 1 + 2 * memory.count as i32;
        memory.count += 1;
        memory.vitality = vitality;
        let streak = memory.count;
        entity.victory_points += won;
        Some((won, streak))
    } else {
        memory.count = 0;
        memory.vitality = vitality;
        None
    }
}

fn score_blue(board: &mut BoardState, log: &mut MessageLog) {
    let turn = board.turn;

    let elect_resource = board.blue.entity("elect").map_or(0, |e| e.resource);
    if elect_resource >= 4 {
        if let Some(gov) = board.blue.entity_mut("uk_gov") {
            gov.victory_points += 1;
        }
        log.log(
            "Election time - UK Government gains 1 VP because a month ended with Electorate \
             having 4 or more resources.",
            LogCategory::VictoryPoint,
        );
    }

    if turn == end_of_month(12) {
        let rus_vitality = board.red.entity("rus_gov").map_or(0, |e| e.vitality);
        if rus_vitality < 4 {
            if let Some(gov) = board.blue.entity_mut("uk_gov") {
                gov.victory_points += 5;
            }
            log.log(
                "Aggressive outlook - UK Government gains 5 VPs because the Russian Government \
                 ended the game with less vitality than it started with.",
                LogCategory::VictoryPoint,
            );
        }
    }

    if let Some(index) = checkpoint_index(turn, &THIRD_MONTHS) {
        let limit = ((index + 1) * 3) as i32;
        let won = (index + 2) as i32;
        if let Some(plc) = board.blue.entity_mut("plc") {
            if plc.resource >= limit {
                plc.victory_points += won;
                log.log(
                    format!(
                        "Weather the storm - UK PLC gains {won} VP because it had more than \
                         {limit} resources at the end of the quarter."
                    ),
                    LogCategory::VictoryPoint,
                );
            }
        }
    }

    if checkpoint_index(turn, &QUARTER_MONTHS).is_some() {
        if let Some(plc) = board.blue.entity_mut("plc") {
            if let Some((won, streak)) =
                growth_streak_checkpoint(plc, |t| &mut t.recruitment_drive)
            {
                log.log(
                    format!(
                        "Recruitment drive - UK PLC gains {won} VP because it achieved vitality \
                         growth last {streak} quarter(s)."
                    ),
                    LogCategory::VictoryPoint,
                );
            }
        }
    }

    if let Some(index) = checkpoint_index(turn, &HALF_MONTHS) {
        let limit = 6 + (index as i32) * 3;
        let won = (index + 2) as i32;
        if let Some(energy) = board.blue.entity_mut("energy") {
            if energy.vitality >= limit {
                energy.victory_points += won;
                log.log(
                    format!(
                        "Grow capacity - UK Energy gains {won} VP because has more than {limit} \
                         vitality."
                    ),
                    LogCategory::VictoryPoint,
                );
            }
        }
    }
}

fn score_red(board: &mut BoardState, log: &mut MessageLog) {
    let turn = board.turn;

    if let Some(gov) = board.red.entity_mut("rus_gov") {
        if gov.resource >= 3 {
            gov.victory_points += 1;
            log.log(
                "Some animals are more equal than others - Russian Government gains 1 VP \
                 because it ended the month with more than 3 resources.",
                LogCategory::VictoryPoint,
            );
        }
    }

    if let Some(index) = checkpoint_index(turn, &THIRD_MONTHS) {
        if let Some(bear) = board.red.entity_mut("bear") {
            let vitality = bear.vitality;
            let recorded = bear.traits.last_growth_vitality.get_or_insert(vitality);
            if vitality > *recorded {
                let won = 1 + 2 * index as i32;
                *recorded = vitality;
                bear.victory_points += won;
                log.log(
                    format!(
                        "Those who can't steal - Energetic Bear gains {won} VP because it \
                         achieved vitality growth since last check."
                    ),
                    LogCategory::VictoryPoint,
                );
            }
        }
    }

    // Arsenal comparison: owning fewer defensive assets than the opponent has
    // attack assets hands the opponent's market entity 2 VP.
    let blue_defence = count_assets_of_type(&board.blue.assets, AssetCategory::Defensive);
    let red_attack = count_assets_of_type(&board.red.assets, AssetCategory::Attack);
    if blue_defence < red_attack {
        if let Some(scs) = board.red.entity_mut("scs") {
            scs.victory_points += 2;
        }
        log.log(
            "Win the arms race - SCS gains 2 VPs because Russia has a better cyber arsenal \
             than the UK.",
            LogCategory::VictoryPoint,
        );
    }
    let red_defence = count_assets_of_type(&board.red.assets, AssetCategory::Defensive);
    let blue_attack = count_assets_of_type(&board.blue.assets, AssetCategory::Attack);
    if red_defence < blue_attack {
        if let Some(gchq) = board.blue.entity_mut("gchq") {
            gchq.victory_points += 2;
        }
        log.log(
            "Win the arms race - GCHQ gains 2 VPs because the UK has a better cyber arsenal \
             than Russia.",
            LogCategory::VictoryPoint,
        );
    }

    if checkpoint_index(turn, &QUARTER_MONTHS).is_some() {
        if let Some(ros) = board.red.entity_mut("ros") {
            if let Some((won, streak)) = growth_streak_checkpoint(ros, |t| &mut t.grow_capacity) {
                log.log(
                    format!(
                        "Grow capacity - Rosenergoatom gains {won} VP because it achieved \
                         vitality growth last {streak} quarter(s)."
                    ),
                    LogCategory::VictoryPoint,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{load_roster, RosterSource};
    use coldfront_protocol::AssetId;

    fn board() -> BoardState {
        let mut board = load_roster(RosterSource::Embedded).expect("embedded roster");
        ensure_growth_memory(&mut board);
        board
    }

    #[test]
    fn fatality_awards_ten_vp_to_the_opposing_government() {
        let mut board = board();
        let mut log = MessageLog::default();
        board.blue.entity_mut("plc").unwrap().vitality = 0;

        assert!(fatality_sweep(&mut board, &mut log));
        assert_eq!(board.red.entity("rus_gov").unwrap().victory_points, 10);
        assert_eq!(board.blue.entity("uk_gov").unwrap().victory_points, 0);
    }

    #[test]
    fn no_fatalities_is_quiet() {
        let mut board = board();
        let mut log = MessageLog::default();
        assert!(!fatality_sweep(&mut board, &mut log));
        assert!(log.entries().is_empty());
    }

    #[test]
    fn winner_is_the_higher_total() {
        let mut board = board();
        let mut log = MessageLog::default();
        board.red.entity_mut("bear").unwrap().victory_points = 7;
        board.blue.entity_mut("plc").unwrap().victory_points = 3;

        assert_eq!(determine_winner(&board, &mut log), TeamColor::Red);
    }

    #[test]
    fn monthly_resource_thresholds() {
        let mut board = board();
        let mut log = MessageLog::default();
        board.turn = 3;
        board.blue.entity_mut("elect").unwrap().resource = 4;
        // rus_gov starts with 3 resource, enough for its monthly rule.

        score_month(&mut board, &mut log);

        assert_eq!(board.blue.entity("uk_gov").unwrap().victory_points, 1);
        assert_eq!(board.red.entity("rus_gov").unwrap().victory_points, 1);
    }

    #[test]
    fn growth_streak_pays_and_resets() {
        let mut board = board();
        let mut log = MessageLog::default();

        // First quarter end: plc grew by 2.
        board.turn = end_of_month(3);
        board.blue.entity_mut("plc").unwrap().vitality += 2;
        score_month(&mut board, &mut log);
        let plc = board.blue.entity("plc").unwrap();
        assert_eq!(plc.victory_points, 1);
        assert_eq!(plc.traits.recruitment_drive.unwrap().count, 1);

        // Second quarter end: grew again, streak pays 1 + 2.
        board.turn = end_of_month(6);
        board.blue.entity_mut("plc").unwrap().vitality += 1;
        score_month(&mut board, &mut log);
        let plc = board.blue.entity("plc").unwrap();
        assert_eq!(plc.victory_points, 4);
        assert_eq!(plc.traits.recruitment_drive.unwrap().count, 2);

        // Third quarter end: stagnation zeroes the streak.
        board.turn = end_of_month(9);
        score_month(&mut board, &mut log);
        let plc = board.blue.entity("plc").unwrap();
        assert_eq!(plc.victory_points, 4);
        assert_eq!(plc.traits.recruitment_drive.unwrap().count, 0);
    }

    #[test]
    fn arsenal_comparison_rewards_the_better_armed_side() {
        let mut board = board();
        let mut log = MessageLog::default();
        board.turn = 3;
        board.red.assets = vec![AssetId::Stuxnet, AssetId::Ransomware];
        board.blue.assets = vec![AssetId::Education];

        score_month(&mut board, &mut log);

        // blue defence (1) < red attack (2): scs scores.
        assert_eq!(board.red.entity("scs").unwrap().victory_points, 2);
        // red defence (0) < blue attack (0) is false: gchq does not.
        assert_eq!(board.blue.entity("gchq").unwrap().victory_points, 0);
    }

    #[test]
    fn final_month_rewards_aggression_outlook() {
        let mut board = board();
        let mut log = MessageLog::default();
        board.turn = end_of_month(12);
        board.red.entity_mut("rus_gov").unwrap().vitality = 3;
        board.blue.entity_mut("elect").unwrap().resource = 0;

        score_month(&mut board, &mut log);

        assert_eq!(board.blue.entity("uk_gov").unwrap().victory_points, 5);
    }

    #[test]
    fn energy_capacity_checkpoints() {
        let mut board = board();
        let mut log = MessageLog::default();
        board.turn = end_of_month(6);
        board.blue.entity_mut("energy").unwrap().vitality = 6;

        score_month(&mut board, &mut log);
        assert_eq!(board.blue.entity("energy").unwrap().victory_points, 2);

        // Second half-year checkpoint needs 9 vitality; 6 is no longer enough.
        board.turn = end_of_month(12);
        score_month(&mut board, &mut log);
        assert_eq!(board.blue.entity("energy").unwrap().victory_points, 2);
    }
}
