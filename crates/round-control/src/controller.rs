//! Round and match scoring
//!
//! [`MatchController`] owns every counter of a match and decides round and
//! match winners as points come in. A round goes to the first player whose
//! round points reach the configured cap. The match goes to the player whose
//! lead in rounds won reaches the winning difference, which can only happen
//! at the moment that player takes a round.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::MatchConfig;
use crate::error::{MatchError, Result};
use crate::player::Player;

/// Scoring state of a match in progress
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// Points in the current round, indexed by player
    pub round_points: [u32; 2],
    /// Rounds taken so far in this match, indexed by player
    pub rounds_won: [u32; 2],
    /// Current round, starting at 1
    pub round_number: u32,
    pub round_winner: Option<Player>,
    pub match_winner: Option<Player>,
    /// `rounds_won[1] - rounds_won[2]` as of the last point
    pub score_difference: i32,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            round_points: [0, 0],
            rounds_won: [0, 0],
            round_number: 1,
            round_winner: None,
            match_winner: None,
            score_difference: 0,
        }
    }
}

/// What a single point did to the match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointOutcome {
    /// Round still open
    Point,
    /// The scorer took the round, match continues
    RoundWon(Player),
    /// The scorer took the round and with it the match
    MatchWon(Player),
}

/// Owner of all per-round and per-match counters
#[derive(Clone, Debug)]
pub struct MatchController {
    config: MatchConfig,
    state: MatchState,
}

impl MatchController {
    /// Create a controller for a fresh match
    pub fn new(config: MatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: MatchState::default(),
        })
    }

    /// Record a point for a raw player id
    pub fn record_point_id(&mut self, id: u8) -> Result<PointOutcome> {
        let player = Player::from_id(id)?;
        self.record_point(player)
    }

    /// Record a point and evaluate round and match outcomes.
    ///
    /// Rejected without touching any counter while a round winner is pending.
    pub fn record_point(&mut self, player: Player) -> Result<PointOutcome> {
        if self.state.round_winner.is_some() {
            return Err(MatchError::UnexpectedScoreWhileLocked);
        }

        let slot = player.index();
        self.state.round_points[slot] += 1;
        debug!(
            player = player.id(),
            points = self.state.round_points[slot],
            round = self.state.round_number,
            "point scored"
        );

        let round_won = self.state.round_points[slot] >= self.config.max_points_per_round;
        if round_won {
            self.state.round_winner = Some(player);
            self.state.rounds_won[slot] += 1;
        }

        self.state.score_difference =
            self.state.rounds_won[0] as i32 - self.state.rounds_won[1] as i32;

        if !round_won {
            return Ok(PointOutcome::Point);
        }

        // Only the scorer's direction can cross the margin
        let lead = match player {
            Player::One => self.state.score_difference,
            Player::Two => -self.state.score_difference,
        };
        if lead >= self.config.winning_difference {
            self.state.match_winner = Some(player);
            info!(
                player = player.id(),
                rounds_won = ?self.state.rounds_won,
                "match won"
            );
            return Ok(PointOutcome::MatchWon(player));
        }

        info!(
            player = player.id(),
            round = self.state.round_number,
            difference = self.state.score_difference,
            "round won"
        );
        Ok(PointOutcome::RoundWon(player))
    }

    /// Clear the round. With `end_match`, the match tally is cleared as well
    /// and round numbering restarts at 1.
    pub fn reset_round(&mut self, end_match: bool) {
        self.state.round_points = [0, 0];
        self.state.round_winner = None;
        self.state.match_winner = None;
        if end_match {
            self.state.rounds_won = [0, 0];
            self.state.score_difference = 0;
            self.state.round_number = 1;
        }
        debug!(end_match, round = self.state.round_number, "round reset");
    }

    pub fn advance_round_number(&mut self) {
        self.state.round_number += 1;
    }

    pub fn current_round_winner(&self) -> Option<Player> {
        self.state.round_winner
    }

    pub fn current_match_winner(&self) -> Option<Player> {
        self.state.match_winner
    }

    pub fn score_difference(&self) -> i32 {
        self.state.score_difference
    }

    pub fn rounds_won(&self, player: Player) -> u32 {
        self.state.rounds_won[player.index()]
    }

    pub fn round_points(&self, player: Player) -> u32 {
        self.state.round_points[player.index()]
    }

    pub fn round_number(&self) -> u32 {
        self.state.round_number
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }
}
