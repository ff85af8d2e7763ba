//! Per-turn input resolution: asset activations, black-market bids, entity
//! actions (attack / transfer / revitalize) and the trait decay pass.
//!
//! All functions mutate the board in place and narrate what happened into the
//! message log. Negative resource or vitality is a valid transient state; the
//! fatality sweep in `scoring` settles it afterwards.

use coldfront_protocol::{
    form, AssetId, BoardState, DeclaredAction, EntityId, LogCategory, RawInputs, Role, TeamColor,
};

use crate::assets::activate_asset;
use crate::assets::asset_spec;
use crate::engine::MessageLog;
use crate::rng::Randomness;
use crate::tables::{attack_result, max_revitalization, VITALITY_RECOVERY_COST};

/// Which entity places black-market bids for each team.
pub fn market_bidder(team: TeamColor) -> &'static str {
    match team {
        TeamColor::Red => "scs",
        TeamColor::Blue => "gchq",
    }
}

fn entity_name(board: &BoardState, id: &str) -> String {
    board
        .entity(id)
        .map(|(_, e)| e.name.clone())
        .unwrap_or_else(|| id.to_string())
}

/// Resolve the acting team's asset activations. Assets are consumed on
/// successful activation only, removed by descending index so earlier
/// removals cannot shift later ones.
pub fn resolve_activations(board: &mut BoardState, inputs: &RawInputs, log: &mut MessageLog) {
    let acting = board.acting_team();
    let mut used: Vec<usize> = Vec::new();

    for index in form::activated_assets(inputs) {
        if used.contains(&index) {
            continue;
        }
        let Some(asset) = board.team(acting).assets.get(index).copied() else {
            log.log(
                format!("Team {} tried to activate an unknown asset.", acting.label()),
                LogCategory::Action,
            );
            continue;
        };
        let option = form::asset_option(inputs, index);
        let spec = asset_spec(asset);
        if activate_asset(board, asset, &option) {
            log.log(
                format!(
                    "Team {} activated asset {} - {}",
                    acting.label(),
                    spec.name,
                    spec.description
                ),
                LogCategory::Action,
            );
            used.push(index);
        } else {
            log.log(
                format!(
                    "Team {} could not activate {} - no valid target was chosen.",
                    acting.label(),
                    spec.name
                ),
                LogCategory::Action,
            );
        }
    }

    used.sort_unstable_by(|a, b| b.cmp(a));
    for index in used {
        board.team_mut(acting).assets.remove(index);
    }
}

/// Resolve black-market bids for the acting team and award uncontested
/// listings to the side that bid last turn.
pub fn resolve_market(board: &mut BoardState, inputs: &RawInputs, log: &mut MessageLog) {
    let acting = board.acting_team();
    let opponent = acting.opponent();
    let bidder_id = market_bidder(acting);

    let bidder_blocked = board
        .team(acting)
        .entity(bidder_id)
        .is_some_and(|e| e.traits.embargoed || e.traits.cannot_bid > 0);

    let mut removed: Vec<usize> = Vec::new();
    for index in 0..board.black_market.len() {
        let mut bid = form::market_bid(inputs, index);
        if bid > 0 && bidder_blocked {
            log.log(
                format!(
                    "{} cannot bid on the Black Market this turn.",
                    entity_name(board, bidder_id)
                ),
                LogCategory::Action,
            );
            bid = 0;
        }

        if bid > 0 {
            if let Some(bidder) = board.team_mut(acting).entity_mut(bidder_id) {
                bidder.resource -= bid;
            }
        }

        let listing = &mut board.black_market[index];
        let asset_name = asset_spec(listing.asset).name;
        if listing.has_bid && bid == 0 {
            log.log(
                format!(
                    "Team {}'s bid for {} was not contested - asset gained.",
                    opponent.label(),
                    asset_name
                ),
                LogCategory::Action,
            );
            let asset = listing.asset;
            board.team_mut(opponent).assets.push(asset);
            removed.push(index);
        } else if bid > 0 {
            log.log(
                format!("Team {} bid {} for {}.", acting.label(), bid, asset_name),
                LogCategory::Action,
            );
            listing.bid = bid;
            listing.has_bid = true;
        }
    }

    for index in removed.into_iter().rev() {
        board.black_market.remove(index);
    }
}

/// Resolve each acting entity's declared action.
pub fn resolve_actions(
    board: &mut BoardState,
    inputs: &RawInputs,
    rng: &mut dyn Randomness,
    log: &mut MessageLog,
) {
    let acting = board.acting_team();
    let ids: Vec<EntityId> = board
        .team(acting)
        .entities
        .iter()
        .map(|e| e.id.clone())
        .collect();

    for id in &ids {
        let action = form::declared_action(inputs, id);
        if action == DeclaredAction::None {
            continue;
        }

        let Some(entity) = board.team(acting).entity(id) else {
            continue;
        };
        if entity.traits.cannot_act > 0 || entity.traits.paralyzed > 0 {
            log.log(
                format!("{} is incapacitated and takes no action.", entity.name),
                LogCategory::Action,
            );
            continue;
        }

        match action {
            DeclaredAction::Attack => {
                if entity.traits.cannot_attack > 0 {
                    log.log(
                        format!("{} is unable to attack this turn.", entity.name),
                        LogCategory::Action,
                    );
                } else {
                    do_attack(board, inputs, rng, log, id);
                }
            }
            DeclaredAction::Transfer => do_transfer(board, inputs, log, id),
            DeclaredAction::Revitalize => do_revitalize(board, inputs, log, id),
            DeclaredAction::None => {}
        }
    }
}

fn do_attack(
    board: &mut BoardState,
    inputs: &RawInputs,
    rng: &mut dyn Randomness,
    log: &mut MessageLog,
    attacker_id: &str,
) {
    let acting = board.acting_team();
    let Some(attacker) = board.team(acting).entity(attacker_id) else {
        return;
    };
    let attacker_name = attacker.name.clone();
    let permitted = attacker.attacks.clone();

    for (target_id, investment) in form::attack_targets(inputs, attacker_id) {
        if !permitted.contains(&target_id) {
            log.log(
                format!(
                    "{} cannot target {}.",
                    attacker_name,
                    entity_name(board, &target_id)
                ),
                LogCategory::Action,
            );
            continue;
        }

        let investment = investment.clamp(0, 6);
        let roll = rng.roll_die();
        let margin = attack_result(investment, roll);
        log.log(
            format!("{attacker_name} spent {investment} resources and rolled {roll}."),
            LogCategory::Action,
        );

        if margin > 0 {
            apply_damage(board, &target_id, margin, acting.opponent(), log);
        } else if margin < 0 {
            apply_damage(board, attacker_id, -margin, acting, log);
            apply_attribution(board, attacker_id, margin);
        }

        if let Some(attacker) = board.team_mut(acting).entity_mut(attacker_id) {
            attacker.resource -= investment;
        }

        if attacker_id == "trolls" && margin > 0 && investment >= 3 {
            let vp_cost = if investment < 5 { 1 } else { 2 };
            if let Some(gov) = board.team_mut(acting).by_role_mut(Role::Government) {
                gov.victory_points -= vp_cost;
                let gov_name = gov.name.clone();
                log.log(
                    format!(
                        "Control the Trolls - {gov_name} lost {vp_cost} VP because \
                         {attacker_name} launched a large attack."
                    ),
                    LogCategory::VictoryPoint,
                );
            }
            if board.team(acting).assets.contains(&AssetId::Ransomware) {
                if let Some(trolls) = board.team_mut(acting).entity_mut(attacker_id) {
                    trolls.victory_points += 4;
                }
                log.log(
                    format!(
                        "Success breeds confidence - {attacker_name} gained 4 VPs because they \
                         launched a large attack while holding the Ransomware asset."
                    ),
                    LogCategory::VictoryPoint,
                );
            }
        }
    }
}

/// Apply `amount` damage to `target_id` on `target_team`, then splash the
/// target's neighbours. Direct damage honours the target's defensive traits;
/// splash is computed from the raw amount.
pub fn apply_damage(
    board: &mut BoardState,
    target_id: &str,
    amount: i32,
    target_team: TeamColor,
    log: &mut MessageLog,
) {
    let neighbours = board.team(target_team).neighbours(target_id);
    let Some(target) = board.team_mut(target_team).entity_mut(target_id) else {
        return;
    };

    let mut direct = amount;
    if target.traits.software_update > 0 {
        direct = 0;
    }
    if target.traits.stuxnet {
        direct *= 2;
    }
    if target.traits.education > 0 || target.traits.bargaining_chip > 0 {
        direct /= 2;
    }
    if target.traits.ransomware {
        target.traits.paralyzed = 3;
    }
    target.vitality -= direct;
    let target_name = target.name.clone();

    for id in neighbours {
        let Some(connection) = board.team_mut(target_team).entity_mut(&id) else {
            continue;
        };
        if connection.traits.education > 0 {
            connection.vitality -= amount / 4;
        } else if connection.traits.network_policy {
            // splash-immune
        } else {
            connection.vitality -= amount / 2;
        }
    }

    log.log(
        format!(
            "{target_name} was dealt {amount} damage. Connected entities got {} damage.",
            amount / 2
        ),
        LogCategory::Action,
    );
}

/// Attacker-specific backfire penalty. `margin` is the negative success
/// margin (-1 or -2); the heavier penalty applies at -2.
fn apply_attribution(board: &mut BoardState, attacker_id: &str, margin: i32) {
    let acting = board.acting_team();
    let opponent = acting.opponent();
    let severe = margin <= -2;

    match attacker_id {
        "bear" => {
            board.team_mut(opponent).assets.push(AssetId::SoftwareUpdate);
            if severe {
                board.team_mut(opponent).assets.push(AssetId::Recovery);
            }
        }
        "trolls" => {
            board.team_mut(opponent).assets.push(AssetId::Education);
            if severe {
                if let Some(trolls) = board.team_mut(acting).entity_mut("trolls") {
                    trolls.traits.cannot_attack = 2;
                }
            }
        }
        "scs" => {
            board.team_mut(opponent).assets.push(AssetId::SoftwareUpdate);
            if let Some(scs) = board.team_mut(acting).entity_mut("scs") {
                scs.traits.cannot_bid = 2;
            }
            if severe {
                board.team_mut(opponent).assets.push(AssetId::AttackVector);
            }
        }
        "gchq" => {
            if let Some(gchq) = board.team_mut(acting).entity_mut("gchq") {
                gchq.traits.cannot_attack = 2;
                if severe {
                    gchq.traits.cannot_act = 2;
                }
            }
            if severe {
                if let Some(gov) = board.team_mut(acting).by_role_mut(Role::Government) {
                    gov.vitality -= 1;
                }
            }
        }
        "uk_gov" => {
            board.team_mut(opponent).assets.push(AssetId::BargainingChip);
            if severe {
                if let Some(gov) = board.team_mut(acting).entity_mut("uk_gov") {
                    gov.resource -= 2;
                    gov.vitality -= 2;
                }
            }
        }
        _ => {}
    }
}

fn do_transfer(board: &mut BoardState, inputs: &RawInputs, log: &mut MessageLog, source_id: &str) {
    let acting = board.acting_team();
    if board.team(acting).entity(source_id).is_none() {
        return;
    }

    let transfers_down = board
        .team(acting)
        .by_role(Role::Government)
        .is_some_and(|g| g.traits.banking_error);
    if transfers_down {
        log.log(
            format!(
                "{} could not send resources - transfer protocols are down.",
                entity_name(board, source_id)
            ),
            LogCategory::Action,
        );
        return;
    }

    for (target_id, amount) in form::transfer_targets(inputs, source_id) {
        let Some(target) = board.entity_mut(&target_id) else {
            continue;
        };
        target.resource += amount;
        let target_name = target.name.clone();

        let Some(source) = board.team_mut(acting).entity_mut(source_id) else {
            continue;
        };
        source.resource -= amount;
        let source_name = source.name.clone();

        if amount > 0 {
            log.log(
                format!("{source_name} sent {amount} resources to {target_name}."),
                LogCategory::Action,
            );
            if source_id == "elect" {
                if let Some(elect) = board.team_mut(acting).entity_mut("elect") {
                    elect.victory_points -= 1;
                }
                log.log(
                    format!(
                        "Resist the drain - {source_name} lost 1 VP due to the transfer of \
                         resources."
                    ),
                    LogCategory::VictoryPoint,
                );
            }
        }
    }
}

fn do_revitalize(board: &mut BoardState, inputs: &RawInputs, log: &mut MessageLog, entity_id: &str) {
    let acting = board.acting_team();
    let declared = form::revitalize_amount(inputs, entity_id).clamp(0, 6);
    let Some(entity) = board.team_mut(acting).entity_mut(entity_id) else {
        return;
    };

    let amount = declared.min(max_revitalization(entity.resource));
    let mut cost = VITALITY_RECOVERY_COST[amount as usize];
    if entity.traits.cyber_investment {
        cost = (cost - 1).max(0);
    }

    entity.vitality += amount;
    entity.resource -= cost;
    log.log(
        format!(
            "{} spent {cost} resources to gain {amount} vitality.",
            entity.name
        ),
        LogCategory::Action,
    );
}

/// Tick down and clear time-limited traits. Runs once per resolved turn,
/// after all actions.
pub fn decay_traits(board: &mut BoardState, _log: &mut MessageLog) {
    let acting = board.acting_team();

    fn tick(value: &mut u8) {
        *value = value.saturating_sub(1);
    }

    if let Some(elect) = board.blue.entity_mut("elect") {
        tick(&mut elect.traits.education);
    }
    if let Some(gov) = board.red.entity_mut("rus_gov") {
        tick(&mut gov.traits.bargaining_chip);
    }
    for id in ["plc", "energy"] {
        if let Some(entity) = board.blue.entity_mut(id) {
            tick(&mut entity.traits.software_update);
        }
    }
    if let Some(ros) = board.red.entity_mut("ros") {
        tick(&mut ros.traits.software_update);
    }

    // Recovery regenerates towards the recorded target, then retires.
    if let Some(plc) = board.blue.entity_mut("plc") {
        if let Some(target) = plc.traits.recovery {
            if plc.vitality < target {
                plc.vitality += 1;
            }
            if plc.vitality >= target {
                plc.traits.recovery = None;
            }
        }
    }

    // One-shot marks spend themselves after their turn of effect.
    if let Some(energy) = board.blue.entity_mut("energy") {
        energy.traits.stuxnet = false;
    }
    if let Some(ros) = board.red.entity_mut("ros") {
        ros.traits.stuxnet = false;
    }
    for id in ["plc", "elect"] {
        if let Some(entity) = board.blue.entity_mut(id) {
            entity.traits.ransomware = false;
            tick(&mut entity.traits.paralyzed);
        }
    }

    // Incapacitation counters tick on their owner's acting turn, so a penalty
    // earned this turn still bites on the entity's next turn.
    for entity in board.team_mut(acting).entities.iter_mut() {
        tick(&mut entity.traits.cannot_attack);
        tick(&mut entity.traits.cannot_bid);
        tick(&mut entity.traits.cannot_act);
    }

    // Turn-scoped team handicaps expire once the handicapped team has acted.
    match acting {
        TeamColor::Blue => {
            if let Some(gov) = board.blue.entity_mut("uk_gov") {
                gov.traits.banking_error = false;
            }
        }
        TeamColor::Red => {
            if let Some(scs) = board.red.entity_mut("scs") {
                scs.traits.embargoed = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;
    use crate::roster::{load_roster, RosterSource};
    use coldfront_protocol::MarketListing;

    fn board() -> BoardState {
        load_roster(RosterSource::Embedded).expect("embedded roster")
    }

    fn inputs(pairs: &[(&str, &str)]) -> RawInputs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn successful_attack_damages_target_and_splashes_connections() {
        let mut board = board();
        let mut log = MessageLog::default();
        let mut rng = ScriptedRng::with_rolls(&[6]);

        let before_plc = board.blue.entity("plc").unwrap().vitality;
        let before_gov = board.blue.entity("uk_gov").unwrap().vitality;
        let before_gchq = board.blue.entity("gchq").unwrap().vitality;
        let before_bear = board.red.entity("bear").unwrap().resource;

        let form = inputs(&[("bear__action", "attack"), ("bear-plc__attack", "2")]);
        resolve_actions(&mut board, &form, &mut rng, &mut log);

        // investment 2, roll 6 -> margin 2 direct, 1 splash
        assert_eq!(board.blue.entity("plc").unwrap().vitality, before_plc - 2);
        assert_eq!(board.blue.entity("uk_gov").unwrap().vitality, before_gov - 1);
        assert_eq!(board.blue.entity("gchq").unwrap().vitality, before_gchq - 1);
        assert_eq!(board.red.entity("bear").unwrap().resource, before_bear - 2);
    }

    #[test]
    fn backfire_hits_the_attacker_and_attributes() {
        let mut board = board();
        let mut log = MessageLog::default();
        // investment 3, roll 1 -> margin -1
        let mut rng = ScriptedRng::with_rolls(&[1]);

        let before_bear = board.red.entity("bear").unwrap().vitality;
        let form = inputs(&[("bear__action", "attack"), ("bear-plc__attack", "3")]);
        resolve_actions(&mut board, &form, &mut rng, &mut log);

        assert_eq!(board.red.entity("bear").unwrap().vitality, before_bear - 1);
        // Attribution: defender gains a Software Update asset.
        assert_eq!(board.blue.assets, vec![AssetId::SoftwareUpdate]);
        assert_eq!(board.red.entity("bear").unwrap().resource, 2 - 3);
    }

    #[test]
    fn splash_respects_network_policy_and_education() {
        let mut board = board();
        let mut log = MessageLog::default();

        board.blue.entity_mut("uk_gov").unwrap().traits.network_policy = true;
        board.blue.entity_mut("gchq").unwrap().traits.education = 2;
        let before_gov = board.blue.entity("uk_gov").unwrap().vitality;
        let before_gchq = board.blue.entity("gchq").unwrap().vitality;
        let before_plc = board.blue.entity("plc").unwrap().vitality;

        apply_damage(&mut board, "plc", 4, TeamColor::Blue, &mut log);

        assert_eq!(board.blue.entity("plc").unwrap().vitality, before_plc - 4);
        // network_policy: no splash; education: quarter splash
        assert_eq!(board.blue.entity("uk_gov").unwrap().vitality, before_gov);
        assert_eq!(board.blue.entity("gchq").unwrap().vitality, before_gchq - 1);
    }

    #[test]
    fn software_update_blanks_direct_damage() {
        let mut board = board();
        let mut log = MessageLog::default();

        board.blue.entity_mut("plc").unwrap().traits.software_update = 1;
        let before = board.blue.entity("plc").unwrap().vitality;
        apply_damage(&mut board, "plc", 5, TeamColor::Blue, &mut log);
        assert_eq!(board.blue.entity("plc").unwrap().vitality, before);
    }

    #[test]
    fn stuxnet_doubles_and_education_halves_direct_damage() {
        let mut board = board();
        let mut log = MessageLog::default();

        // 4 * 2 / 2 = 4
        let energy = board.blue.entity_mut("energy").unwrap();
        energy.traits.stuxnet = true;
        energy.traits.education = 1;
        let before = board.blue.entity("energy").unwrap().vitality;
        apply_damage(&mut board, "energy", 4, TeamColor::Blue, &mut log);
        assert_eq!(board.blue.entity("energy").unwrap().vitality, before - 4);
    }

    #[test]
    fn ransomware_mark_paralyses_on_hit() {
        let mut board = board();
        let mut log = MessageLog::default();
        board.blue.entity_mut("elect").unwrap().traits.ransomware = true;

        apply_damage(&mut board, "elect", 2, TeamColor::Blue, &mut log);
        assert_eq!(board.blue.entity("elect").unwrap().traits.paralyzed, 3);
    }

    #[test]
    fn revitalize_clamps_to_affordable_and_charges_the_table() {
        let mut board = board();
        let mut log = MessageLog::default();
        let mut rng = ScriptedRng::new();

        // plc starts with 2 resource: declared 6 clamps to 2, costing 2.
        board.turn = 2;
        let form = inputs(&[("plc__action", "revitalize"), ("plc__revitalize", "6")]);
        let before_vitality = board.blue.entity("plc").unwrap().vitality;
        resolve_actions(&mut board, &form, &mut rng, &mut log);

        let plc = board.blue.entity("plc").unwrap();
        assert_eq!(plc.vitality, before_vitality + 2);
        assert_eq!(plc.resource, 0);
    }

    #[test]
    fn cyber_investment_discounts_recovery() {
        let mut board = board();
        let mut log = MessageLog::default();
        let mut rng = ScriptedRng::new();

        board.turn = 2;
        {
            let plc = board.blue.entity_mut("plc").unwrap();
            plc.traits.cyber_investment = true;
            plc.resource = 5;
        }
        let form = inputs(&[("plc__action", "revitalize"), ("plc__revitalize", "4")]);
        resolve_actions(&mut board, &form, &mut rng, &mut log);

        // cost table says 5, discounted to 4
        assert_eq!(board.blue.entity("plc").unwrap().resource, 1);
    }

    #[test]
    fn electorate_pays_a_vp_for_any_transfer() {
        let mut board = board();
        let mut log = MessageLog::default();
        let mut rng = ScriptedRng::new();

        board.turn = 2;
        let form = inputs(&[("elect__action", "transfer"), ("elect-uk_gov__transfer", "1")]);
        resolve_actions(&mut board, &form, &mut rng, &mut log);

        assert_eq!(board.blue.entity("elect").unwrap().victory_points, -1);
        assert_eq!(board.blue.entity("elect").unwrap().resource, 1);
        assert_eq!(board.blue.entity("uk_gov").unwrap().resource, 4);
    }

    #[test]
    fn banking_error_freezes_blue_transfers() {
        let mut board = board();
        let mut log = MessageLog::default();
        let mut rng = ScriptedRng::new();

        board.turn = 2;
        board.blue.entity_mut("uk_gov").unwrap().traits.banking_error = true;
        let form = inputs(&[("plc__action", "transfer"), ("plc-uk_gov__transfer", "2")]);
        resolve_actions(&mut board, &form, &mut rng, &mut log);

        assert_eq!(board.blue.entity("plc").unwrap().resource, 2);
        assert_eq!(board.blue.entity("uk_gov").unwrap().resource, 3);
    }

    #[test]
    fn uncontested_bid_awards_the_listing_to_the_prior_bidder() {
        let mut board = board();
        let mut log = MessageLog::default();
        board.black_market.push(MarketListing {
            asset: AssetId::Stuxnet,
            bid: 2,
            has_bid: true,
        });

        // Red's turn, no contesting bid submitted.
        resolve_market(&mut board, &RawInputs::new(), &mut log);

        assert!(board.black_market.is_empty());
        assert_eq!(board.blue.assets, vec![AssetId::Stuxnet]);
    }

    #[test]
    fn raised_bid_persists_and_debits_the_bidder() {
        let mut board = board();
        let mut log = MessageLog::default();
        board.black_market.push(MarketListing::new(AssetId::Education));

        let before = board.red.entity("scs").unwrap().resource;
        let form = inputs(&[("bm-bid-0", "2")]);
        resolve_market(&mut board, &form, &mut log);

        assert_eq!(board.black_market[0].bid, 2);
        assert!(board.black_market[0].has_bid);
        assert_eq!(board.red.entity("scs").unwrap().resource, before - 2);
        assert!(board.blue.assets.is_empty());
    }

    #[test]
    fn embargoed_bidder_cannot_raise() {
        let mut board = board();
        let mut log = MessageLog::default();
        board.black_market.push(MarketListing::new(AssetId::Education));
        board.red.entity_mut("scs").unwrap().traits.embargoed = true;

        let before = board.red.entity("scs").unwrap().resource;
        let form = inputs(&[("bm-bid-0", "3")]);
        resolve_market(&mut board, &form, &mut log);

        assert_eq!(board.black_market[0].bid, 0);
        assert!(!board.black_market[0].has_bid);
        assert_eq!(board.red.entity("scs").unwrap().resource, before);
    }

    #[test]
    fn activation_consumes_assets_by_descending_index() {
        let mut board = board();
        let mut log = MessageLog::default();
        board.red.assets = vec![
            AssetId::BargainingChip,
            AssetId::Stuxnet,
            AssetId::NetworkPolicy,
        ];

        let form = inputs(&[
            ("activated-assets", "0, 1"),
            ("option-1", "0"),
        ]);
        resolve_activations(&mut board, &form, &mut log);

        assert_eq!(board.red.assets, vec![AssetId::NetworkPolicy]);
        assert_eq!(board.red.entity("rus_gov").unwrap().traits.bargaining_chip, 3);
        assert!(board.red.entity("ros").unwrap().traits.stuxnet);
    }

    #[test]
    fn failed_activation_keeps_the_asset() {
        let mut board = board();
        let mut log = MessageLog::default();
        board.red.assets = vec![AssetId::NetworkPolicy];

        // No target chosen.
        let form = inputs(&[("activated-assets", "0")]);
        resolve_activations(&mut board, &form, &mut log);

        assert_eq!(board.red.assets, vec![AssetId::NetworkPolicy]);
    }

    #[test]
    fn decay_ticks_counters_and_spends_one_shot_marks() {
        let mut board = board();
        let mut log = MessageLog::default();

        {
            let elect = board.blue.entity_mut("elect").unwrap();
            elect.traits.education = 3;
            elect.traits.ransomware = true;
            elect.traits.paralyzed = 2;
        }
        board.red.entity_mut("ros").unwrap().traits.stuxnet = true;

        decay_traits(&mut board, &mut log);

        let elect = board.blue.entity("elect").unwrap();
        assert_eq!(elect.traits.education, 2);
        assert!(!elect.traits.ransomware);
        assert_eq!(elect.traits.paralyzed, 1);
        assert!(!board.red.entity("ros").unwrap().traits.stuxnet);
    }

    #[test]
    fn recovery_regenerates_then_retires() {
        let mut board = board();
        let mut log = MessageLog::default();

        {
            let plc = board.blue.entity_mut("plc").unwrap();
            plc.vitality = 3;
            plc.traits.recovery = Some(5);
        }

        decay_traits(&mut board, &mut log);
        assert_eq!(board.blue.entity("plc").unwrap().vitality, 4);
        assert!(board.blue.entity("plc").unwrap().traits.recovery.is_some());

        decay_traits(&mut board, &mut log);
        let plc = board.blue.entity("plc").unwrap();
        assert_eq!(plc.vitality, 5);
        assert!(plc.traits.recovery.is_none());
    }

    #[test]
    fn incapacitated_entities_take_no_action() {
        let mut board = board();
        let mut log = MessageLog::default();
        let mut rng = ScriptedRng::with_rolls(&[6]);

        board.red.entity_mut("bear").unwrap().traits.cannot_act = 1;
        let before = board.blue.entity("plc").unwrap().vitality;
        let form = inputs(&[("bear__action", "attack"), ("bear-plc__attack", "2")]);
        resolve_actions(&mut board, &form, &mut rng, &mut log);

        assert_eq!(board.blue.entity("plc").unwrap().vitality, before);
        assert_eq!(board.red.entity("bear").unwrap().resource, 2);
    }
}
