//! Round Control
//!
//! Round and match outcome controller for a two-player contest.
//! Tracks points within a round, decides round winners, decides the match
//! under a win-by-margin rule, and times the hand-off from one round to the
//! next. This crate is compiled to:
//! - Native (linked into the game loop)
//! - WASM (for a browser frontend)

mod player;
mod config;
mod error;
mod controller;
mod scheduler;
mod session;

#[cfg(feature = "wasm")]
mod wasm;

pub use player::Player;
pub use config::{MatchConfig, DEFAULT_RESET_DELAY, MAX_POINTS_PER_ROUND, MIN_POINTS_PER_ROUND};
pub use error::{MatchError, Result};
pub use controller::{MatchController, MatchState, PointOutcome};
pub use scheduler::{Phase, RoundTransitionScheduler, Transition};
pub use session::{Headline, InputEvent, MatchSession, NoScene, SceneHooks, Snapshot};

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_classic_match_end_to_end() {
        let mut session = MatchSession::new(MatchConfig::default(), NoScene).unwrap();
        session.declare_intro_end();

        let script = [2u8, 1, 1, 1];
        let mut transitions = Vec::new();
        for id in script {
            transitions.extend(session.handle(InputEvent::PointScored { player: id }).unwrap());
            for _ in 0..150 {
                transitions.extend(session.tick(Duration::from_millis(16)));
            }
        }

        assert_eq!(
            transitions,
            vec![
                Transition::RoundEnded { winner: Player::Two, round: 1 },
                Transition::RoundStarted { round: 2 },
                Transition::RoundEnded { winner: Player::One, round: 2 },
                Transition::RoundStarted { round: 3 },
                Transition::RoundEnded { winner: Player::One, round: 3 },
                Transition::RoundStarted { round: 4 },
                Transition::MatchEnded { winner: Player::One },
            ]
        );
        assert_eq!(session.snapshot().rounds_won, [3, 1]);
        assert_eq!(session.snapshot().headline, Some(Headline::Wins(Player::One)));
    }
}
