//! Timed transitions between rounds
//!
//! Once a round is decided the scheduler locks input and holds the outcome on
//! screen for the configured delay before starting the next round. A decided
//! match instead parks the scheduler until an explicit restart. Time only moves
//! when the caller feeds elapsed durations into [`RoundTransitionScheduler::tick`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::controller::MatchController;
use crate::player::Player;

/// Scheduler state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Round in play
    Idle,
    /// Outcome on display, next round pending
    AwaitingReset { end_match: bool, elapsed: Duration },
    /// Match decided, waiting for a restart command
    AwaitingRestart,
}

/// Signal emitted to collaborators on every phase change
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    RoundEnded { winner: Player, round: u32 },
    MatchEnded { winner: Player },
    RoundStarted { round: u32 },
    MatchRestarted,
    MainMenu,
}

/// Cooperative, tick-driven timer that walks the controller from one round to the next
#[derive(Clone, Debug)]
pub struct RoundTransitionScheduler {
    phase: Phase,
    reset_delay: Duration,
    input_locked: bool,
}

impl RoundTransitionScheduler {
    pub fn new(reset_delay: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            reset_delay,
            input_locked: false,
        }
    }

    /// Scheduler using the delay from the controller's config
    pub fn for_controller(controller: &MatchController) -> Self {
        Self::new(controller.config().reset_delay)
    }

    /// React to a decided round or match. Only acts while idle, so a pending
    /// conclusion is never scheduled twice.
    pub fn observe(&mut self, controller: &MatchController) -> Option<Transition> {
        if self.phase != Phase::Idle {
            return None;
        }
        let round_winner = controller.current_round_winner()?;

        self.input_locked = true;
        if let Some(winner) = controller.current_match_winner() {
            self.phase = Phase::AwaitingRestart;
            info!(winner = winner.id(), "match over, awaiting restart");
            return Some(Transition::MatchEnded { winner });
        }

        self.phase = Phase::AwaitingReset {
            end_match: false,
            elapsed: Duration::ZERO,
        };
        debug!(
            winner = round_winner.id(),
            delay_ms = self.reset_delay.as_millis() as u64,
            "round over, next round scheduled"
        );
        Some(Transition::RoundEnded {
            winner: round_winner,
            round: controller.round_number(),
        })
    }

    /// Advance the timer by `dt`. Fires the pending reset at most once.
    pub fn tick(&mut self, dt: Duration, controller: &mut MatchController) -> Option<Transition> {
        match self.phase {
            Phase::Idle => self.observe(controller),
            Phase::AwaitingRestart => None,
            Phase::AwaitingReset { end_match, elapsed } => {
                let elapsed = elapsed.saturating_add(dt);
                if elapsed < self.reset_delay {
                    self.phase = Phase::AwaitingReset { end_match, elapsed };
                    return None;
                }

                controller.reset_round(end_match);
                controller.advance_round_number();
                self.input_locked = false;
                self.phase = Phase::Idle;
                let round = controller.round_number();
                info!(round, "round started");
                Some(Transition::RoundStarted { round })
            }
        }
    }

    /// Start a new match. Ignored unless a finished match is awaiting restart.
    pub fn restart(&mut self, controller: &mut MatchController) -> Option<Transition> {
        if self.phase != Phase::AwaitingRestart {
            debug!(phase = ?self.phase, "restart ignored");
            return None;
        }
        controller.reset_round(true);
        self.input_locked = false;
        self.phase = Phase::Idle;
        info!("match restarted");
        Some(Transition::MatchRestarted)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn input_locked(&self) -> bool {
        self.input_locked
    }

    /// True while the presentation should offer restart and menu controls
    pub fn awaiting_restart(&self) -> bool {
        self.phase == Phase::AwaitingRestart
    }

    /// Time left before the pending round reset, if one is scheduled
    pub fn remaining(&self) -> Option<Duration> {
        match self.phase {
            Phase::AwaitingReset { elapsed, .. } => Some(self.reset_delay.saturating_sub(elapsed)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;
    use crate::controller::PointOutcome;

    fn setup(max_points: u32, margin: i32) -> (MatchController, RoundTransitionScheduler) {
        let controller = MatchController::new(MatchConfig::new(max_points, margin)).unwrap();
        let scheduler = RoundTransitionScheduler::for_controller(&controller);
        (controller, scheduler)
    }

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn test_idle_without_winner() {
        let (mut c, mut s) = setup(2, 2);
        c.record_point(Player::One).unwrap();
        assert_eq!(s.observe(&c), None);
        assert_eq!(s.tick(secs(5.0), &mut c), None);
        assert_eq!(s.phase(), Phase::Idle);
        assert!(!s.input_locked());
    }

    #[test]
    fn test_round_end_locks_and_schedules() {
        let (mut c, mut s) = setup(1, 2);
        c.record_point(Player::Two).unwrap();

        assert_eq!(
            s.observe(&c),
            Some(Transition::RoundEnded { winner: Player::Two, round: 1 })
        );
        assert!(s.input_locked());
        assert_eq!(s.remaining(), Some(secs(2.0)));
        assert!(!s.awaiting_restart());
    }

    #[test]
    fn test_reset_fires_after_delay() {
        let (mut c, mut s) = setup(1, 2);
        c.record_point(Player::One).unwrap();
        s.observe(&c);

        assert_eq!(s.tick(secs(0.5), &mut c), None);
        assert_eq!(s.tick(secs(1.0), &mut c), None);
        assert_eq!(s.remaining(), Some(secs(0.5)));
        assert_eq!(c.current_round_winner(), Some(Player::One));

        assert_eq!(s.tick(secs(0.5), &mut c), Some(Transition::RoundStarted { round: 2 }));
        assert_eq!(s.phase(), Phase::Idle);
        assert!(!s.input_locked());
        assert_eq!(c.current_round_winner(), None);
        assert_eq!(c.round_points(Player::One), 0);
        assert_eq!(c.rounds_won(Player::One), 1);
        assert_eq!(c.round_number(), 2);
    }

    #[test]
    fn test_reset_fires_exactly_once() {
        let (mut c, mut s) = setup(1, 5);
        c.record_point(Player::One).unwrap();
        s.observe(&c);
        // Observing again while pending must not restart the timer
        s.tick(secs(1.5), &mut c);
        assert_eq!(s.observe(&c), None);
        assert_eq!(s.remaining(), Some(secs(0.5)));

        let fired: Vec<_> = (0..10).filter_map(|_| s.tick(secs(1.0), &mut c)).collect();
        assert_eq!(fired, vec![Transition::RoundStarted { round: 2 }]);
        assert_eq!(c.round_number(), 2);
        assert_eq!(c.rounds_won(Player::One), 1);
    }

    #[test]
    fn test_single_large_tick_fires_once() {
        let (mut c, mut s) = setup(1, 5);
        c.record_point(Player::Two).unwrap();
        s.observe(&c);
        assert_eq!(s.tick(secs(60.0), &mut c), Some(Transition::RoundStarted { round: 2 }));
        assert_eq!(s.tick(secs(60.0), &mut c), None);
        assert_eq!(c.round_number(), 2);
    }

    #[test]
    fn test_tick_observes_when_idle() {
        let (mut c, mut s) = setup(1, 2);
        c.record_point(Player::One).unwrap();
        assert_eq!(
            s.tick(secs(0.016), &mut c),
            Some(Transition::RoundEnded { winner: Player::One, round: 1 })
        );
        assert_eq!(s.remaining(), Some(secs(2.0)));
    }

    #[test]
    fn test_match_end_waits_for_restart() {
        let (mut c, mut s) = setup(1, 1);
        assert_eq!(c.record_point(Player::One), Ok(PointOutcome::MatchWon(Player::One)));
        assert_eq!(s.observe(&c), Some(Transition::MatchEnded { winner: Player::One }));
        assert!(s.awaiting_restart());
        assert!(s.input_locked());
        assert_eq!(s.remaining(), None);

        // No timer in this state
        assert_eq!(s.tick(secs(100.0), &mut c), None);
        assert_eq!(c.current_match_winner(), Some(Player::One));

        assert_eq!(s.restart(&mut c), Some(Transition::MatchRestarted));
        assert_eq!(s.phase(), Phase::Idle);
        assert!(!s.input_locked());
        assert_eq!(c.rounds_won(Player::One), 0);
        assert_eq!(c.current_match_winner(), None);
        assert_eq!(c.round_number(), 1);
    }

    #[test]
    fn test_restart_ignored_outside_awaiting_restart() {
        let (mut c, mut s) = setup(1, 3);
        assert_eq!(s.restart(&mut c), None);

        c.record_point(Player::One).unwrap();
        s.observe(&c);
        assert_eq!(s.restart(&mut c), None);
        assert_eq!(c.rounds_won(Player::One), 1);
        assert!(matches!(s.phase(), Phase::AwaitingReset { .. }));
    }

    #[test]
    fn test_full_match_through_scheduler() {
        let (mut c, mut s) = setup(1, 2);
        let mut transitions = Vec::new();

        for player in [Player::One, Player::Two, Player::Two, Player::Two] {
            c.record_point(player).unwrap();
            transitions.extend(s.observe(&c));
            transitions.extend(s.tick(secs(2.0), &mut c));
        }

        assert_eq!(
            transitions,
            vec![
                Transition::RoundEnded { winner: Player::One, round: 1 },
                Transition::RoundStarted { round: 2 },
                Transition::RoundEnded { winner: Player::Two, round: 2 },
                Transition::RoundStarted { round: 3 },
                Transition::RoundEnded { winner: Player::Two, round: 3 },
                Transition::RoundStarted { round: 4 },
                Transition::MatchEnded { winner: Player::Two },
            ]
        );
        assert_eq!(c.state().rounds_won, [1, 3]);
    }
}
