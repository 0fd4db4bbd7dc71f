use serde::{Deserialize, Serialize};

use crate::*;

/// Edge-triggered solved-state notification, delivered at most once per
/// actual change.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    BecameSolved,
    BecameUnsolved,
}

/// Glue between the board and the swipe interpreter: routes tile taps and
/// recognized swipes into moves, latches the solved state, and disables
/// interaction once the puzzle is solved (until `reset`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleController {
    config: PuzzleConfig,
    board: Board,
    swipes: SwipeInterpreter,
    solved: bool,
    pending: Option<Transition>,
}

impl PuzzleController {
    pub fn new(config: PuzzleConfig, seed: u64) -> Self {
        let board = RandomWalkGenerator::new(seed).generate(config);
        let solved = board.is_solved();
        Self {
            config,
            board,
            swipes: SwipeInterpreter::new(),
            solved,
            pending: None,
        }
    }

    pub fn config(&self) -> PuzzleConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn can_interact(&self) -> bool {
        !self.solved
    }

    pub fn taps_suppressed(&self) -> bool {
        self.swipes.taps_suppressed()
    }

    pub fn release_tap_suppression(&mut self) {
        self.swipes.release_tap_suppression();
    }

    /// Takes the transition caused by the latest state change, if any.
    /// Each change is reported exactly once.
    pub fn take_transition(&mut self) -> Option<Transition> {
        self.pending.take()
    }

    /// Replaces the board wholesale with a fresh solved-then-shuffled one.
    /// The only way back from `solved` to `unsolved`.
    pub fn reset(&mut self, seed: u64) {
        self.board = RandomWalkGenerator::new(seed).generate(self.config);
        self.swipes = SwipeInterpreter::new();
        let now_solved = self.board.is_solved();
        if now_solved != self.solved {
            self.solved = now_solved;
            self.pending = Some(if now_solved {
                Transition::BecameSolved
            } else {
                Transition::BecameUnsolved
            });
        }
        log::debug!("reset with seed {seed}");
    }

    /// A tap on the tile currently sitting at `index`. Suppressed taps
    /// (the tail end of a swipe) and taps while solved report `NoChange`.
    pub fn activate_tile(&mut self, index: CellIndex) -> Result<MoveOutcome> {
        if !self.can_interact() || self.swipes.taps_suppressed() {
            return Ok(MoveOutcome::NoChange);
        }
        let outcome = self.board.try_move(index)?;
        self.after_move(outcome);
        Ok(outcome)
    }

    /// A recognized swipe in `direction`.
    pub fn swipe(&mut self, direction: Direction) -> MoveOutcome {
        if !self.can_interact() {
            return MoveOutcome::NoChange;
        }
        let outcome = self.board.try_move_direction(direction);
        self.after_move(outcome);
        outcome
    }

    pub fn pointer_down(&mut self, id: PointerId, x: f64, y: f64) {
        if !self.can_interact() {
            return;
        }
        self.swipes.pointer_down(id, x, y);
    }

    pub fn pointer_move(&mut self, id: PointerId, x: f64, y: f64, threshold: f64) -> MoveOutcome {
        match self.swipes.pointer_move(id, x, y, threshold) {
            Some(direction) => {
                log::debug!("swipe fired: {direction:?}");
                self.swipe(direction)
            }
            None => MoveOutcome::NoChange,
        }
    }

    /// Returns `true` when the binding must schedule a tap-suppression
    /// release on the next event-loop turn.
    pub fn pointer_up(&mut self, id: PointerId) -> bool {
        self.swipes.pointer_up(id)
    }

    pub fn pointer_cancel(&mut self, id: PointerId) {
        self.swipes.pointer_cancel(id);
    }

    fn after_move(&mut self, outcome: MoveOutcome) {
        if !outcome.has_update() {
            return;
        }
        let now_solved = self.board.is_solved();
        if now_solved == self.solved {
            return;
        }
        self.solved = now_solved;
        self.pending = Some(if now_solved {
            log::debug!("puzzle solved");
            Transition::BecameSolved
        } else {
            Transition::BecameUnsolved
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Controller one move away from solved: empty at index 7, tile 8 at
    /// index 8.
    fn nearly_solved() -> PuzzleController {
        let mut controller = PuzzleController::new(PuzzleConfig::new(3, 25), 0);
        controller.reset_to_nearly_solved();
        controller
    }

    impl PuzzleController {
        fn reset_to_nearly_solved(&mut self) {
            use Cell::*;
            self.board = Board::from_cells(
                3,
                vec![
                    Tile(1),
                    Tile(2),
                    Tile(3),
                    Tile(4),
                    Tile(5),
                    Tile(6),
                    Tile(7),
                    Empty,
                    Tile(8),
                ],
            )
            .unwrap();
            self.solved = false;
            self.pending = None;
        }
    }

    #[test]
    fn zero_shuffle_moves_is_solved_immediately() {
        let controller = PuzzleController::new(PuzzleConfig::new(3, 0), 99);
        assert!(controller.is_solved());
        assert!(!controller.can_interact());
    }

    #[test]
    fn solving_move_emits_became_solved_exactly_once() {
        let mut controller = nearly_solved();

        assert_eq!(controller.activate_tile(3), Ok(MoveOutcome::NoChange));
        assert_eq!(controller.take_transition(), None);

        assert_eq!(controller.activate_tile(8), Ok(MoveOutcome::Moved));
        assert!(controller.is_solved());
        assert_eq!(controller.take_transition(), Some(Transition::BecameSolved));
        assert_eq!(controller.take_transition(), None);
    }

    #[test]
    fn interaction_is_disabled_while_solved() {
        let mut controller = nearly_solved();
        assert_eq!(controller.activate_tile(8), Ok(MoveOutcome::Moved));
        controller.take_transition();

        assert_eq!(controller.swipe(Direction::Down), MoveOutcome::NoChange);
        assert_eq!(controller.activate_tile(5), Ok(MoveOutcome::NoChange));
        controller.pointer_down(1, 0.0, 0.0);
        assert_eq!(
            controller.pointer_move(1, 100.0, 0.0, 22.0),
            MoveOutcome::NoChange
        );
        assert!(controller.is_solved());
    }

    #[test]
    fn reset_from_solved_emits_became_unsolved() {
        let mut controller = nearly_solved();
        controller.activate_tile(8).unwrap();
        controller.take_transition();

        // every shuffle move is a transposition, so an odd move count (25)
        // can never reproduce the identity permutation
        controller.reset(5);
        assert!(!controller.is_solved());
        assert_eq!(
            controller.take_transition(),
            Some(Transition::BecameUnsolved)
        );
        assert_eq!(controller.take_transition(), None);
    }

    #[test]
    fn swipe_through_pointer_events_moves_a_tile() {
        let mut controller = nearly_solved();
        // empty at (2, 1): swiping down pulls tile 5 from the row above
        controller.pointer_down(7, 10.0, 10.0);
        assert_eq!(
            controller.pointer_move(7, 10.0, 60.0, 22.0),
            MoveOutcome::Moved
        );
        assert_eq!(controller.board().cell_at(7), Cell::Tile(5));

        // the swipe's terminating tap must not activate a tile
        assert!(controller.pointer_up(7));
        assert_eq!(controller.activate_tile(1), Ok(MoveOutcome::NoChange));
        controller.release_tap_suppression();
        assert_eq!(controller.activate_tile(1), Ok(MoveOutcome::Moved));
    }

    #[test]
    fn controller_serializes_round_trip_mid_game() {
        let mut controller = PuzzleController::new(PuzzleConfig::default(), 17);
        controller.pointer_down(1, 0.0, 0.0);
        let json = serde_json::to_string(&controller).unwrap();
        let restored: PuzzleController = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, controller);
    }
}
