//! The game owner: lifecycle, timer, persistence and feedback.

use crate::action::{Move, MoveOutcome, MoveRejection, MoveSource};
use crate::catalog::{Brand, Catalog};
use crate::clock::{Clock, GameTimer, SystemClock};
use crate::feedback::FeedbackEvent;
use crate::input::MoveSink;
use crate::persistence::{
    KeyValueStore, load_max_unlocked, load_records, save_max_unlocked, save_records,
};
use crate::progression::Progression;
use crate::records::{GameRecord, RecordBook};
use crate::round::Round;
use crate::status::{Confirmation, GameStatus, Modal};
use crate::view::GameView;
use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument};

/// A running game session.
///
/// `Game` is the single owner of all mutable game state. Every mutation
/// takes `&mut self`, so moves from any input source are serialized.
/// Persisted state is read once at construction and written after each
/// change, best-effort.
#[derive(Debug)]
pub struct Game<S, C = SystemClock, R = StdRng> {
    catalog: Catalog,
    store: S,
    clock: C,
    rng: R,
    round: Round,
    status: GameStatus,
    progression: Progression,
    records: RecordBook,
    timer: GameTimer,
    modal: Option<Modal>,
    outbox: Vec<FeedbackEvent>,
}

impl<S, C, R> Game<S, C, R>
where
    S: KeyValueStore,
    C: Clock,
    R: Rng,
{
    /// Starts a session at the lowest selectable level.
    pub fn new(catalog: Catalog, store: S, clock: C, rng: R) -> Self {
        let level = catalog.min_level();
        Self::starting_at(catalog, store, clock, rng, level)
    }

    /// Starts a session at `level`, or at the lowest level if `level` is
    /// not unlocked.
    #[instrument(skip(catalog, store, clock, rng))]
    pub fn starting_at(catalog: Catalog, store: S, clock: C, mut rng: R, level: usize) -> Self {
        let progression = Progression::new(&catalog, load_max_unlocked(&store, catalog.min_level()));
        let records = RecordBook::new(load_records(&store));

        let level = if progression.is_selectable(level) {
            level
        } else {
            debug!(level, "Starting level locked, using minimum");
            progression.min_level()
        };

        let round = Round::deal(&catalog, level, &mut rng);
        let timer = GameTimer::running(clock.now());
        info!(
            level,
            max_unlocked = progression.max_unlocked(),
            records = records.len(),
            "Game session started"
        );

        Self {
            catalog,
            store,
            clock,
            rng,
            round,
            status: GameStatus::Playing,
            progression,
            records,
            timer,
            modal: None,
            outbox: Vec::new(),
        }
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Current difficulty.
    pub fn difficulty(&self) -> usize {
        self.round.size()
    }

    /// The catalog being played.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The round in progress.
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Unlock state.
    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    /// All completed games.
    pub fn records(&self) -> &RecordBook {
        &self.records
    }

    /// The blocking modal being shown, if any.
    pub fn modal(&self) -> Option<Modal> {
        self.modal
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Unplaced active brands.
    pub fn inventory(&self) -> Vec<Brand> {
        self.round.inventory()
    }

    /// The target, once it may be shown.
    pub fn revealed_target(&self) -> Option<&[Brand]> {
        (self.status == GameStatus::Won).then(|| self.round.target().brands())
    }

    /// Seconds of play, excluding time behind modals.
    pub fn elapsed_secs(&self) -> u64 {
        self.timer.elapsed_secs(self.clock.now())
    }

    /// Signals a drag has started. Returns false if moves are not accepted.
    #[instrument(skip(self))]
    pub fn pickup(&mut self, source: MoveSource) -> bool {
        if self.status != GameStatus::Playing {
            debug!("Pickup ignored, game not in progress");
            return false;
        }
        self.outbox.push(FeedbackEvent::Pickup);
        true
    }

    /// Applies a move. This is the only path from input to the board.
    #[instrument(skip(self))]
    pub fn execute_move(&mut self, mv: Move) -> MoveOutcome {
        if self.status != GameStatus::Playing {
            debug!("Move ignored, game not in progress");
            return MoveOutcome::Ignored(MoveRejection::NotPlaying);
        }

        let outcome = self.round.apply(mv);
        match outcome {
            MoveOutcome::Placed { .. } | MoveOutcome::Swapped { .. } => {
                self.outbox.push(FeedbackEvent::Drop)
            }
            MoveOutcome::Removed { .. } => self.outbox.push(FeedbackEvent::Remove),
            MoveOutcome::Ignored(_) => {}
        }
        outcome
    }

    /// Checks if the board may be confirmed.
    pub fn can_confirm(&self) -> bool {
        self.status == GameStatus::Playing && self.round.board().is_complete()
    }

    /// Scores the board and logs the attempt.
    ///
    /// Returns `None` (and records nothing) unless the game is in progress
    /// and every slot is filled. A full match wins the game.
    #[instrument(skip(self))]
    pub fn confirm(&mut self) -> Option<Confirmation> {
        if self.status != GameStatus::Playing {
            debug!("Confirm ignored, game not in progress");
            return None;
        }

        let now = self.clock.now();
        let entry = self.round.confirm(now)?.clone();
        let size = self.round.size();

        if *entry.matches() < size {
            debug!(attempt = entry.id(), matches = entry.matches(), "Attempt logged");
            self.outbox.push(FeedbackEvent::Confirm);
            return Some(Confirmation::Attempt(entry));
        }

        self.status = GameStatus::Won;
        self.timer.stop(now);

        let unlocked = self.progression.record_win(size);
        if unlocked.is_some() {
            save_max_unlocked(&mut self.store, self.progression.max_unlocked());
        }

        let record = GameRecord::new(
            u64::try_from(now.timestamp_millis()).unwrap_or_default(),
            now,
            self.round.history().len(),
            self.timer.elapsed_secs(now),
            size,
            self.round.target().brands().to_vec(),
        );
        self.records.append(record.clone());
        save_records(&mut self.store, self.records.records());

        info!(
            difficulty = size,
            attempts = record.attempts(),
            duration_secs = record.duration_secs(),
            "Game won"
        );
        self.outbox.push(FeedbackEvent::Win);

        Some(Confirmation::Solved {
            entry,
            record,
            unlocked,
        })
    }

    /// Checks if [`advance`](Self::advance) would be accepted.
    pub fn can_advance(&self) -> bool {
        let next = self.round.size() + 1;
        self.status == GameStatus::Won
            && next <= self.catalog.len()
            && next <= self.progression.max_unlocked()
    }

    /// Deals a new game at the same difficulty. Only after a win.
    #[instrument(skip(self))]
    pub fn retry(&mut self) -> bool {
        if self.status != GameStatus::Won {
            debug!("Retry refused, game not won");
            self.outbox.push(FeedbackEvent::Denied);
            return false;
        }
        self.outbox.push(FeedbackEvent::Click);
        self.start_round(self.round.size());
        true
    }

    /// Deals a new game one level up. Only after a win, and only if that
    /// level exists and is unlocked.
    #[instrument(skip(self))]
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            debug!(difficulty = self.round.size(), "Advance refused");
            self.outbox.push(FeedbackEvent::Denied);
            return false;
        }
        self.outbox.push(FeedbackEvent::Click);
        self.start_round(self.round.size() + 1);
        true
    }

    /// Deals a new game at `level`. Refused with [`FeedbackEvent::Denied`]
    /// if the level is locked; state is unchanged in that case.
    #[instrument(skip(self))]
    pub fn select_level(&mut self, level: usize) -> bool {
        if !self.progression.is_selectable(level) {
            debug!(
                level,
                max_unlocked = self.progression.max_unlocked(),
                "Level locked"
            );
            self.outbox.push(FeedbackEvent::Denied);
            return false;
        }
        self.outbox.push(FeedbackEvent::Click);
        if self.modal == Some(Modal::LevelSelect) {
            self.modal = None;
        }
        self.start_round(level);
        true
    }

    /// Shows a blocking modal and pauses the timer.
    #[instrument(skip(self))]
    pub fn show_modal(&mut self, modal: Modal) {
        if self.modal.is_none() {
            self.timer.pause(self.clock.now());
        }
        self.modal = Some(modal);
    }

    /// Closes the modal and resumes the timer.
    #[instrument(skip(self))]
    pub fn dismiss_modal(&mut self) {
        if self.modal.take().is_some() {
            self.timer.resume(self.clock.now());
        }
    }

    /// Takes all queued feedback events, oldest first.
    pub fn drain_feedback(&mut self) -> Vec<FeedbackEvent> {
        std::mem::take(&mut self.outbox)
    }

    /// Read-only snapshot for presentation.
    pub fn view(&self) -> GameView {
        GameView::new(
            self.round.board().clone(),
            self.revealed_target().map(<[Brand]>::to_vec),
            self.inventory(),
            self.round.history().newest_first().cloned().collect(),
            self.status,
            self.elapsed_secs(),
            self.round.size(),
            self.progression.max_unlocked(),
            self.progression.min_level(),
            self.catalog.len(),
            self.modal,
            self.can_confirm(),
            self.can_advance(),
        )
    }

    fn start_round(&mut self, size: usize) {
        self.round = Round::deal(&self.catalog, size, &mut self.rng);
        self.status = GameStatus::Playing;
        let now = self.clock.now();
        self.timer = if self.modal.is_some() {
            GameTimer::paused()
        } else {
            GameTimer::running(now)
        };
        info!(difficulty = size, "New game dealt");
    }
}

impl<S, C, R> MoveSink for Game<S, C, R>
where
    S: KeyValueStore,
    C: Clock,
    R: Rng,
{
    fn pickup(&mut self, source: MoveSource) -> bool {
        Game::pickup(self, source)
    }

    fn execute_move(&mut self, mv: Move) -> MoveOutcome {
        Game::execute_move(self, mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::persistence::{MAX_UNLOCKED_KEY, MemoryStore, RECORDS_KEY};
    use rand::SeedableRng;

    type TestGame<'a> = Game<MemoryStore, &'a ManualClock, StdRng>;

    fn game(clock: &ManualClock) -> TestGame<'_> {
        Game::new(
            Catalog::standard(),
            MemoryStore::new(),
            clock,
            StdRng::seed_from_u64(11),
        )
    }

    fn solve(game: &mut TestGame<'_>) -> Confirmation {
        let target = game.round.target().brands().to_vec();
        for (i, brand) in target.into_iter().enumerate() {
            game.execute_move(Move::place(brand, i));
        }
        game.confirm().expect("board is full")
    }

    #[test]
    fn test_moves_emit_drop_and_remove() {
        let clock = ManualClock::default();
        let mut game = game(&clock);
        game.execute_move(Move::place(Brand::Cola, 0));
        game.execute_move(Move::shift(0, Brand::Cola, 3));
        game.execute_move(Move::remove(3, Brand::Cola));
        assert_eq!(
            game.drain_feedback(),
            vec![FeedbackEvent::Drop, FeedbackEvent::Drop, FeedbackEvent::Remove]
        );
        assert!(game.drain_feedback().is_empty());
    }

    #[test]
    fn test_confirm_requires_full_board() {
        let clock = ManualClock::default();
        let mut game = game(&clock);
        game.execute_move(Move::place(Brand::Cola, 0));
        assert!(!game.can_confirm());
        assert!(game.confirm().is_none());
        assert!(game.round().history().is_empty());
    }

    #[test]
    fn test_win_persists_and_freezes() {
        let clock = ManualClock::default();
        let mut game = game(&clock);
        clock.advance_secs(75);

        let confirmation = solve(&mut game);
        assert!(confirmation.is_solved());
        assert_eq!(game.status(), GameStatus::Won);
        assert!(game.revealed_target().is_some());

        let record = game.records().records()[0].clone();
        assert_eq!(*record.duration_secs(), 75);
        assert_eq!(*record.attempts(), 1);
        assert!(game.store().get(RECORDS_KEY).unwrap().is_some());
        assert_eq!(
            game.store().get(MAX_UNLOCKED_KEY).unwrap().as_deref(),
            Some("6")
        );

        clock.advance_secs(30);
        assert_eq!(game.elapsed_secs(), 75);
        assert_eq!(
            game.execute_move(Move::remove(0, record.solution()[0])),
            MoveOutcome::Ignored(MoveRejection::NotPlaying)
        );
        assert!(game.drain_feedback().ends_with(&[FeedbackEvent::Win]));
    }

    #[test]
    fn test_modal_pauses_timer() {
        let clock = ManualClock::default();
        let mut game = game(&clock);
        clock.advance_secs(10);
        game.show_modal(Modal::Instructions);
        clock.advance_secs(60);
        game.dismiss_modal();
        clock.advance_secs(5);
        assert_eq!(game.elapsed_secs(), 15);
        assert_eq!(game.modal(), None);
    }

    #[test]
    fn test_select_level_closes_level_picker() {
        let clock = ManualClock::default();
        let mut game = game(&clock);
        game.show_modal(Modal::LevelSelect);
        clock.advance_secs(20);
        assert!(game.select_level(5));
        assert_eq!(game.modal(), None);
        clock.advance_secs(4);
        assert_eq!(game.elapsed_secs(), 4);
    }

    #[test]
    fn test_retry_only_after_win() {
        let clock = ManualClock::default();
        let mut game = game(&clock);
        assert!(!game.retry());
        assert_eq!(game.drain_feedback(), vec![FeedbackEvent::Denied]);
    }

    #[test]
    fn test_advance_after_unlocking_win() {
        let clock = ManualClock::default();
        let mut game = game(&clock);
        solve(&mut game);
        assert!(game.can_advance());
        assert!(game.advance());
        assert_eq!(game.difficulty(), 6);
        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.inventory().len(), 6);
    }

    #[test]
    fn test_persisted_frontier_is_loaded_and_clamped() {
        let clock = ManualClock::default();
        let store = MemoryStore::with_entries([(MAX_UNLOCKED_KEY, "8")]);
        let game = Game::starting_at(
            Catalog::standard(),
            store,
            &clock,
            StdRng::seed_from_u64(1),
            7,
        );
        assert_eq!(game.progression().max_unlocked(), 8);
        assert_eq!(game.difficulty(), 7);

        let store = MemoryStore::with_entries([(MAX_UNLOCKED_KEY, "99")]);
        let game = Game::new(Catalog::standard(), store, &clock, StdRng::seed_from_u64(1));
        assert_eq!(game.progression().max_unlocked(), 10);
    }

    #[test]
    fn test_locked_starting_level_falls_back() {
        let clock = ManualClock::default();
        let game = Game::starting_at(
            Catalog::standard(),
            MemoryStore::new(),
            &clock,
            StdRng::seed_from_u64(1),
            9,
        );
        assert_eq!(game.difficulty(), 5);
    }
}
