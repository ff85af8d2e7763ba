//! Shared registry of running games.
//!
//! One mutex per game serializes its readiness checks, submissions and
//! timeout polls; independent games run in parallel. Every guarded access
//! first polls the round timeout, so ordinary board reads are what drive
//! forced resolution - no background scheduler is required.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Instant;

use thiserror::Error;
use tracing::info;

use coldfront_core::{load_roster, GameRng, Randomness, RosterError, RosterSource};
use coldfront_protocol::BoardState;

use crate::config::GameConfig;
use crate::game::{Game, GameSetupError, TeamPlayers};

#[derive(Debug, Error)]
pub enum CreateGameError {
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error(transparent)]
    Setup(#[from] GameSetupError),
}

pub struct GameRegistry {
    games: RwLock<HashMap<u64, Arc<Mutex<Game>>>>,
    next_id: AtomicU64,
    config: GameConfig,
}

impl GameRegistry {
    pub fn new(config: GameConfig) -> Self {
        Self {
            games: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            config,
        }
    }

    /// Create a game on the embedded roster with a process-entropy seed.
    pub fn create_game(
        &self,
        owner: &str,
        red_players: TeamPlayers,
        blue_players: TeamPlayers,
    ) -> Result<u64, CreateGameError> {
        let board = load_roster(RosterSource::Embedded)?;
        let seed: u64 = rand::random();
        self.create_game_with(
            owner,
            red_players,
            blue_players,
            board,
            Box::new(GameRng::seed_from_u64(seed)),
        )
    }

    /// Create a game with an explicit board and randomness source (custom
    /// rosters, deterministic tests).
    pub fn create_game_with(
        &self,
        owner: &str,
        red_players: TeamPlayers,
        blue_players: TeamPlayers,
        board: BoardState,
        rng: Box<dyn Randomness>,
    ) -> Result<u64, CreateGameError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let game = Game::new(
            id,
            owner,
            red_players,
            blue_players,
            board,
            rng,
            self.config.clone(),
            Instant::now(),
        )?;

        self.games
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(Mutex::new(game)));
        info!(game = id, owner, "created game");
        Ok(id)
    }

    pub fn game(&self, id: u64) -> Option<Arc<Mutex<Game>>> {
        self.games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `f` under the game's lock, after the idempotent timeout poll.
    pub fn with_game<R>(&self, id: u64, f: impl FnOnce(&mut Game) -> R) -> Option<R> {
        let handle = self.game(id)?;
        let mut game = handle.lock().unwrap_or_else(PoisonError::into_inner);
        if game.check_timeout(Instant::now()) {
            info!(game = id, "turn resolved by timeout");
        }
        Some(f(&mut game))
    }
}
