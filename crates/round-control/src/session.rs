//! Event and query surface for collaborators
//!
//! [`MatchSession`] is what the game loop talks to. Input handling pushes
//! [`InputEvent`]s in, the frame loop calls [`MatchSession::tick`], and the
//! presentation reads a [`Snapshot`] each frame. Scene side effects (character
//! input blocking, repositioning, level loads) go out through [`SceneHooks`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::MatchConfig;
use crate::controller::MatchController;
use crate::error::{MatchError, Result};
use crate::player::Player;
use crate::scheduler::{RoundTransitionScheduler, Transition};

/// Discrete events delivered by the input collaborator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    /// Raw player id, validated on entry
    PointScored { player: u8 },
    RestartRequested,
    MainMenuRequested,
}

/// Scene-lifecycle collaborator
pub trait SceneHooks {
    /// Characters must ignore player input while `locked`
    fn set_input_locked(&mut self, _locked: bool) {}

    /// Put both characters back at their start positions and facing
    fn reset_positions(&mut self) {}

    /// A new match was committed after a restart
    fn reload_match(&mut self) {}

    fn load_main_menu(&mut self) {}
}

/// Scene that ignores every hook
#[derive(Clone, Copy, Debug, Default)]
pub struct NoScene;

impl SceneHooks for NoScene {}

/// How the presentation should phrase the current outcome. Text templates
/// live with the presentation; this only carries which one applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "player", rename_all = "snake_case")]
pub enum Headline {
    /// Round winner now leads the match
    TookLead(Player),
    /// Round winner evened the match
    Balanced(Player),
    /// Match winner
    Wins(Player),
}

/// Per-frame view for the presentation collaborator
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub round_number: u32,
    pub round_winner: Option<Player>,
    pub match_winner: Option<Player>,
    pub score_difference: i32,
    pub input_locked: bool,
    pub awaiting_restart: bool,
    pub show_round_banner: bool,
    pub rounds_won: [u32; 2],
    pub round_points: [u32; 2],
    /// Seconds the current round has been running
    pub round_time: f64,
    pub headline: Option<Headline>,
}

/// A running match wired to its scene
pub struct MatchSession<S: SceneHooks> {
    controller: MatchController,
    scheduler: RoundTransitionScheduler,
    scene: S,
    intro_finished: bool,
    round_time: Duration,
}

impl<S: SceneHooks> MatchSession<S> {
    pub fn new(config: MatchConfig, scene: S) -> Result<Self> {
        let controller = MatchController::new(config)?;
        let scheduler = RoundTransitionScheduler::for_controller(&controller);
        Ok(Self {
            controller,
            scheduler,
            scene,
            intro_finished: false,
            round_time: Duration::ZERO,
        })
    }

    /// Apply one input event and return the transitions it caused
    pub fn handle(&mut self, event: InputEvent) -> Result<Vec<Transition>> {
        let mut transitions = Vec::new();
        match event {
            InputEvent::PointScored { player } => {
                let player = Player::from_id(player)?;
                if self.scheduler.input_locked() {
                    warn!(player = player.id(), "point scored while input locked");
                    return Err(MatchError::UnexpectedScoreWhileLocked);
                }
                self.controller.record_point(player)?;
                if let Some(transition) = self.scheduler.observe(&self.controller) {
                    self.apply(transition);
                    transitions.push(transition);
                }
            }
            InputEvent::RestartRequested => {
                if let Some(transition) = self.scheduler.restart(&mut self.controller) {
                    self.apply(transition);
                    transitions.push(transition);
                }
            }
            InputEvent::MainMenuRequested => {
                info!("main menu requested");
                self.scene.load_main_menu();
                transitions.push(Transition::MainMenu);
            }
        }
        Ok(transitions)
    }

    /// Advance the frame clock by `dt`
    pub fn tick(&mut self, dt: Duration) -> Vec<Transition> {
        if self.intro_finished {
            self.round_time = self.round_time.saturating_add(dt);
        }
        let mut transitions = Vec::new();
        if let Some(transition) = self.scheduler.tick(dt, &mut self.controller) {
            self.apply(transition);
            transitions.push(transition);
        }
        transitions
    }

    /// Start the round clock once the opening animation is done
    pub fn declare_intro_end(&mut self) {
        debug!("intro finished");
        self.intro_finished = true;
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = self.controller.state();
        let awaiting_restart = self.scheduler.awaiting_restart();
        Snapshot {
            round_number: state.round_number,
            round_winner: state.round_winner,
            match_winner: state.match_winner,
            score_difference: state.score_difference,
            input_locked: self.scheduler.input_locked(),
            awaiting_restart,
            show_round_banner: !awaiting_restart,
            rounds_won: state.rounds_won,
            round_points: state.round_points,
            round_time: self.round_time.as_secs_f64(),
            headline: self.headline(),
        }
    }

    pub fn headline(&self) -> Option<Headline> {
        if let Some(winner) = self.controller.current_match_winner() {
            return Some(Headline::Wins(winner));
        }
        let winner = self.controller.current_round_winner()?;
        if self.controller.score_difference() != 0 {
            Some(Headline::TookLead(winner))
        } else {
            Some(Headline::Balanced(winner))
        }
    }

    pub fn round_time(&self) -> Duration {
        self.round_time
    }

    pub fn controller(&self) -> &MatchController {
        &self.controller
    }

    pub fn scheduler(&self) -> &RoundTransitionScheduler {
        &self.scheduler
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Forward scene side effects of a transition
    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::RoundEnded { .. } | Transition::MatchEnded { .. } => {
                self.scene.set_input_locked(true);
            }
            Transition::RoundStarted { .. } => {
                self.round_time = Duration::ZERO;
                self.scene.reset_positions();
                self.scene.set_input_locked(false);
            }
            Transition::MatchRestarted => {
                self.round_time = Duration::ZERO;
                self.scene.reload_match();
                self.scene.reset_positions();
                self.scene.set_input_locked(false);
            }
            Transition::MainMenu => {}
        }
    }
}
