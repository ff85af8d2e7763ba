//! Raw form-field input conventions.
//!
//! Players submit turns as flat string maps produced by an external form
//! layer. The recognized field grammar:
//!
//! - `{entity}__action` — `attack` | `transfer` | `revitalize` | `none`
//! - `{attacker}-{target}__attack` — resource investment for one attack
//! - `{source}-{target}__transfer` — resource amount to move
//! - `{entity}__revitalize` — desired vitality gain
//! - `bm-bid-{index}` — bid on one black-market row
//! - `activated-assets` — comma-separated indices into the team asset list
//! - `option-{index}` — per-activation selector (sub-choice or entity id)
//!
//! Unparseable numeric values read as zero; unrecognized fields are ignored.
//! A `BTreeMap` keeps iteration (and therefore resolution and dice-draw
//! order) deterministic for a given set of inputs.

use std::collections::BTreeMap;

use crate::EntityId;

/// Accumulated raw inputs for the in-progress turn.
pub type RawInputs = BTreeMap<String, String>;

/// One entity's declared action for the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclaredAction {
    Attack,
    Transfer,
    Revitalize,
    None,
}

/// Selector accompanying an asset activation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetOption {
    None,
    /// Numeric sub-choice (e.g. which dormant attack edge to open).
    Choice(u8),
    /// A target entity id.
    Target(EntityId),
}

fn parse_amount(value: &str) -> i32 {
    value.trim().parse::<i32>().unwrap_or(0).max(0)
}

/// The action declared for `entity`, if any.
pub fn declared_action(form: &RawInputs, entity: &str) -> DeclaredAction {
    match form.get(&format!("{entity}__action")).map(String::as_str) {
        Some("attack") => DeclaredAction::Attack,
        Some("transfer") => DeclaredAction::Transfer,
        Some("revitalize") => DeclaredAction::Revitalize,
        _ => DeclaredAction::None,
    }
}

fn paired_targets(form: &RawInputs, prefix: &str, suffix: &str) -> Vec<(EntityId, i32)> {
    let mut out = Vec::new();
    for (field, value) in form {
        let Some(rest) = field.strip_suffix(suffix) else {
            continue;
        };
        let Some(target) = rest.strip_prefix(prefix).and_then(|r| r.strip_prefix('-')) else {
            continue;
        };
        if !target.is_empty() && !target.contains('-') {
            out.push((target.to_string(), parse_amount(value)));
        }
    }
    out
}

/// Every `(target, investment)` pair declared for `attacker`.
pub fn attack_targets(form: &RawInputs, attacker: &str) -> Vec<(EntityId, i32)> {
    paired_targets(form, attacker, "__attack")
}

/// Every `(target, amount)` pair declared for `source`.
pub fn transfer_targets(form: &RawInputs, source: &str) -> Vec<(EntityId, i32)> {
    paired_targets(form, source, "__transfer")
}

/// Declared vitality gain for `entity`.
pub fn revitalize_amount(form: &RawInputs, entity: &str) -> i32 {
    form.get(&format!("{entity}__revitalize"))
        .map(|v| parse_amount(v))
        .unwrap_or(0)
}

/// Bid placed on black-market row `index` this turn.
pub fn market_bid(form: &RawInputs, index: usize) -> i32 {
    form.get(&format!("bm-bid-{index}"))
        .map(|v| parse_amount(v))
        .unwrap_or(0)
}

/// Indices into the acting team's asset list marked for activation.
pub fn activated_assets(form: &RawInputs) -> Vec<usize> {
    let Some(raw) = form.get("activated-assets") else {
        return Vec::new();
    };
    raw.split(',')
        .filter_map(|part| part.trim().parse::<usize>().ok())
        .collect()
}

/// Selector submitted alongside the activation at `index`.
pub fn asset_option(form: &RawInputs, index: usize) -> AssetOption {
    match form.get(&format!("option-{index}")).map(|v| v.trim()) {
        None | Some("") => AssetOption::None,
        Some(value) => match value.parse::<u8>() {
            Ok(choice) => AssetOption::Choice(choice),
            Err(_) => AssetOption::Target(value.to_string()),
        },
    }
}
