//! The Game aggregate: players, readiness barrier, input accumulation,
//! history and the round timer, wrapped around one `GameEngine`.
//!
//! All clock readings are passed in as `Instant` values; no method reads
//! wall-clock time itself.

use std::collections::BTreeSet;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use coldfront_core::{GameEngine, Randomness};
use coldfront_protocol::{BoardState, LogEntry, RawInputs, Role, SubmitError, TeamColor};

use crate::config::GameConfig;

use super::timer::RoundTimer;

/// The five role-players fielding one team.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPlayers {
    pub name: String,
    pub government: String,
    pub industry: String,
    pub people: String,
    pub security: String,
    pub energy: String,
}

impl TeamPlayers {
    pub fn players(&self) -> [&str; 5] {
        [
            &self.government,
            &self.industry,
            &self.people,
            &self.security,
            &self.energy,
        ]
    }

    pub fn player_for(&self, role: Role) -> &str {
        match role {
            Role::Government => &self.government,
            Role::Industry => &self.industry,
            Role::People => &self.people,
            Role::Security => &self.security,
            Role::Energy => &self.energy,
        }
    }

    pub fn contains(&self, username: &str) -> bool {
        self.players().contains(&username)
    }
}

#[derive(Debug, Error)]
pub enum GameSetupError {
    #[error("player {0} holds more than one seat")]
    DuplicatePlayer(String),
}

/// One running game. Mutation happens only through `submit_input` and
/// `resolve_if_ready`; everything else is a side-effect-free query.
pub struct Game {
    id: u64,
    owner: String,
    red_players: TeamPlayers,
    blue_players: TeamPlayers,
    engine: GameEngine,
    history: Vec<BoardState>,
    player_inputs: RawInputs,
    ready_players: BTreeSet<String>,
    timer: RoundTimer,
    config: GameConfig,
}

impl Game {
    /// Create a game from a loaded roster board. The ten seats must be held
    /// by ten distinct players. The initial post-setup board becomes
    /// `history[0]`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u64,
        owner: impl Into<String>,
        red_players: TeamPlayers,
        blue_players: TeamPlayers,
        board: BoardState,
        rng: Box<dyn Randomness>,
        config: GameConfig,
        now: Instant,
    ) -> Result<Self, GameSetupError> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for username in red_players
            .players()
            .into_iter()
            .chain(blue_players.players())
        {
            if !seen.insert(username) {
                return Err(GameSetupError::DuplicatePlayer(username.to_string()));
            }
        }

        let engine = GameEngine::new(board, rng);
        let history = vec![engine.board().clone()];
        let timer = RoundTimer::new(&config, now);

        Ok(Self {
            id,
            owner: owner.into(),
            red_players,
            blue_players,
            engine,
            history,
            player_inputs: RawInputs::new(),
            ready_players: BTreeSet::new(),
            timer,
            config,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn board(&self) -> &BoardState {
        self.engine.board()
    }

    pub fn turn(&self) -> u32 {
        self.engine.turn()
    }

    pub fn victor(&self) -> Option<TeamColor> {
        self.engine.victor()
    }

    pub fn messages(&self) -> &[LogEntry] {
        self.engine.messages()
    }

    /// One snapshot per resolved turn; the first element is the initial
    /// post-setup state.
    pub fn history(&self) -> &[BoardState] {
        &self.history
    }

    pub fn active_team(&self) -> TeamColor {
        self.engine.board().acting_team()
    }

    pub fn team_players(&self, color: TeamColor) -> &TeamPlayers {
        match color {
            TeamColor::Red => &self.red_players,
            TeamColor::Blue => &self.blue_players,
        }
    }

    fn active_players(&self) -> &TeamPlayers {
        self.team_players(self.active_team())
    }

    pub fn ready_players(&self) -> &BTreeSet<String> {
        &self.ready_players
    }

    pub fn all_players_ready(&self) -> bool {
        let roster: BTreeSet<&str> = self.active_players().players().into_iter().collect();
        let ready: BTreeSet<&str> = self.ready_players.iter().map(String::as_str).collect();
        roster == ready
    }

    fn perform_checks(&self, player: &str, declared_turn: u32) -> Vec<SubmitError> {
        let mut errors = Vec::new();

        if declared_turn != self.engine.turn() {
            errors.push(SubmitError::StaleTurn);
        }
        if self.engine.is_finished() {
            errors.push(SubmitError::GameFinished);
        }
        if self.ready_players.contains(player) {
            errors.push(SubmitError::AlreadyReady);
        }
        if !self.active_players().contains(player) {
            errors.push(SubmitError::NotYourTurn);
        }

        errors
    }

    /// Merge one player's submitted fields and mark them ready. Later keys
    /// overwrite earlier ones. On rejection nothing is mutated and every
    /// applicable error is returned for display.
    pub fn submit_input(
        &mut self,
        player: &str,
        inputs: RawInputs,
        declared_turn: u32,
    ) -> Result<(), Vec<SubmitError>> {
        let errors = self.perform_checks(player, declared_turn);
        if !errors.is_empty() {
            return Err(errors);
        }

        self.player_inputs.extend(inputs);
        self.ready_players.insert(player.to_string());
        debug!(game = self.id, player, "input submitted");
        Ok(())
    }

    /// Resolve the turn if the barrier allows it.
    ///
    /// Without `force_timeout`, resolution requires every active-team player
    /// to be ready. With it, resolution additionally requires the round
    /// deadline (plus grace) to have passed at `now` - which makes a repeat
    /// forced call after a resolution a no-op, since resolving resets the
    /// clock. Returns whether a turn was resolved.
    pub fn resolve_if_ready(&mut self, force_timeout: bool, now: Instant) -> bool {
        if self.engine.is_finished() {
            return false;
        }
        if force_timeout {
            if !self.timer.expired(now, self.config.timeout_grace) {
                return false;
            }
        } else if !self.all_players_ready() {
            return false;
        }

        self.engine.resolve_turn(&self.player_inputs);
        self.timer.reset_round(now);
        self.ready_players.clear();
        self.player_inputs.clear();
        self.history.push(self.engine.board().clone());
        info!(game = self.id, turn = self.engine.turn(), "turn resolved");
        true
    }

    /// Idempotent timeout poll, driven by board-read requests.
    pub fn check_timeout(&mut self, now: Instant) -> bool {
        self.resolve_if_ready(true, now)
    }

    /// Pause or resume the round clock. Only the game owner may toggle, and
    /// not during the unpause grace window.
    pub fn toggle_pause(&mut self, requestor: &str, now: Instant) -> bool {
        if requestor != self.owner {
            return false;
        }
        self.timer.toggle_pause(now)
    }

    pub fn time_left(&self, now: Instant) -> i64 {
        self.timer.time_left(now)
    }

    pub fn is_paused(&self) -> bool {
        self.timer.is_paused()
    }

    pub fn is_starting(&self, now: Instant) -> bool {
        self.timer.is_starting(now)
    }

    pub fn starting_delay(&self, now: Instant) -> i64 {
        self.timer.starting_delay(now)
    }
}
