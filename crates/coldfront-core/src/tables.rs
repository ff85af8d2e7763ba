//! Fixed numeric balancing tables and month arithmetic.

/// Attack resolution matrix, indexed `[investment][die roll]`.
///
/// Rows are the resource investment (0..=6), columns the d6 roll (index 0 is
/// unused padding so a roll indexes directly). Positive entries are damage
/// dealt to the target, negative entries backfire onto the attacker and
/// trigger attribution.
pub const ATTACK_RESULT_TABLE: [[i32; 7]; 7] = [
    [0, 0, 0, 0, 0, 0, 0],
    [0, 0, 1, 1, 1, 1, 2],
    [0, 0, 1, 1, 1, 2, 2],
    [0, -1, 0, 1, 2, 2, 3],
    [0, -1, 0, 1, 2, 3, 4],
    [0, -2, -1, 2, 3, 3, 4],
    [0, -2, -1, 0, 3, 5, 6],
];

/// Resource cost of recovering `n` vitality, indexed by `n` (0..=6).
pub const VITALITY_RECOVERY_COST: [i32; 7] = [0, 1, 2, 4, 5, 6, 7];

/// Success margin for one attack. Investment is clamped to the table bounds.
pub fn attack_result(investment: i32, roll: i32) -> i32 {
    let investment = investment.clamp(0, 6) as usize;
    let roll = roll.clamp(1, 6) as usize;
    ATTACK_RESULT_TABLE[investment][roll]
}

/// Largest vitality recovery affordable with the given resource.
pub fn max_revitalization(available_resource: i32) -> i32 {
    const MAX_BY_RESOURCE: [i32; 7] = [0, 1, 2, 2, 4, 5, 6];
    if available_resource <= 0 {
        return 0;
    }
    match MAX_BY_RESOURCE.get(available_resource as usize) {
        Some(max) => *max,
        None => MAX_BY_RESOURCE[MAX_BY_RESOURCE.len() - 1],
    }
}

/// The turn on which month `month` (1-based) ends.
pub fn end_of_month(month: u32) -> u32 {
    2 * month - 1
}

/// 0-based month index for a turn.
pub fn month_index(turn: u32) -> u32 {
    turn / 2
}

/// Position of `turn` within a set of month-end checkpoints, if it is one.
pub fn checkpoint_index(turn: u32, months: &[u32]) -> Option<usize> {
    months.iter().position(|m| end_of_month(*m) == turn)
}
