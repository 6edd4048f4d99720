//=========================================================================
// Quiz Engine
//=========================================================================
//
// State machine for the timed quiz.
//
// One countdown budget covers the whole quiz session (the per-question
// timer bar in the site design is a view concern, not engine behavior).
// Answering locks the chosen option for a short feedback window, then the
// quiz advances. The quiz is terminal once the budget is spent or the
// questions are exhausted; in that state only reset has an effect.
//
// Flow:
//   answer(option) → lock + score → advance delay → next question
//   tick(dt)       → countdown seconds → expiry forces terminal
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::events::{GameEvent, Outbox};
use crate::core::screen::Activity;
use crate::core::timing::{Countdown, Delay};

//=== Question ============================================================

/// One quiz prompt with its fixed answer options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    /// Ordered candidate answers.
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct: usize,
}

impl Question {
    pub fn new(text: &str, options: &[&str], correct: usize) -> Self {
        Self {
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct,
        }
    }
}

//=== AnswerOutcome =======================================================

/// Result of an answer submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Quiz over, answer already locked, or option out of range; state
    /// is unchanged.
    Ignored,
    /// The option was locked for the feedback window.
    Locked { correct: bool },
}

//=== QuizEngine ==========================================================

/// Timed quiz state over a fixed ordered question sequence.
pub struct QuizEngine {
    questions: Vec<Question>,
    current: usize,
    score: u32,
    clock: Countdown,
    locked: Option<usize>,
    advance: Delay,
    lock_window: Duration,
}

impl QuizEngine {
    //--- Construction -----------------------------------------------------

    /// Creates an engine over the question bank.
    ///
    /// `budget` is the whole-session countdown (whole seconds);
    /// `lock_window` is how long a locked answer stays on display before
    /// the quiz advances.
    pub fn new(questions: Vec<Question>, budget: Duration, lock_window: Duration) -> Self {
        Self {
            questions,
            current: 0,
            score: 0,
            clock: Countdown::new(budget),
            locked: None,
            advance: Delay::idle(),
            lock_window,
        }
    }

    //--- Operations -------------------------------------------------------

    /// Submits an answer for the current question.
    ///
    /// Rejected while the quiz is over or an answer is already locked
    /// (the lock freezes input until the feedback window ends). A correct
    /// option scores immediately; advancing happens when the window fires.
    pub fn answer(&mut self, option: usize, outbox: &mut Outbox) -> AnswerOutcome {
        if self.is_over() {
            debug!("Answer {} rejected: quiz is over", option);
            return AnswerOutcome::Ignored;
        }

        if self.locked.is_some() {
            debug!("Answer {} rejected: an answer is locked", option);
            return AnswerOutcome::Ignored;
        }

        let question = &self.questions[self.current];
        if option >= question.options.len() {
            warn!(
                "Answer {} rejected: question has {} options",
                option,
                question.options.len()
            );
            return AnswerOutcome::Ignored;
        }

        let correct = option == question.correct;
        if correct {
            self.score += 1;
        }

        self.locked = Some(option);
        self.advance.start(self.lock_window);
        outbox.publish(GameEvent::AnswerLocked { option, correct });

        AnswerOutcome::Locked { correct }
    }

    /// Advances quiz time.
    ///
    /// Drives the session countdown (one decrement per whole elapsed
    /// second) and the answer feedback window. Budget exhaustion forces
    /// the terminal state mid-question, cancelling any pending advance.
    pub fn tick(&mut self, dt: Duration, outbox: &mut Outbox) {
        if self.is_over() {
            return;
        }

        for _ in 0..self.clock.tick(dt) {
            outbox.publish(GameEvent::ClockTicked {
                remaining: self.clock.remaining(),
            });
        }

        if self.clock.is_expired() {
            self.advance.cancel();
            self.locked = None;
            self.publish_finished(outbox);
            return;
        }

        if self.advance.tick(dt) {
            self.locked = None;
            self.current += 1;

            if self.current == self.questions.len() {
                self.publish_finished(outbox);
            } else {
                outbox.publish(GameEvent::QuestionPresented {
                    index: self.current,
                    total: self.questions.len(),
                });
            }
        }
    }

    /// Restores the initial state: question zero, zero score, full budget,
    /// no lock.
    pub fn reset(&mut self, outbox: &mut Outbox) {
        self.current = 0;
        self.score = 0;
        self.clock.restart();
        self.locked = None;
        self.advance.cancel();

        outbox.publish(GameEvent::QuestionPresented {
            index: 0,
            total: self.questions.len(),
        });
    }

    /// Aborts the pending feedback window (screen teardown).
    pub fn cancel_pending(&mut self) {
        self.advance.cancel();
    }

    //--- Queries ----------------------------------------------------------

    /// Returns the current question, or `None` when all are answered.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// Returns the index of the current question.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Returns the count of correct answers so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Returns the whole seconds left on the session budget.
    pub fn remaining_seconds(&self) -> u32 {
        self.clock.remaining()
    }

    /// Returns the locked option while the feedback window is on display.
    pub fn locked_answer(&self) -> Option<usize> {
        self.locked
    }

    /// Returns the number of questions in the bank.
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Returns `true` in the terminal state (budget spent or questions
    /// exhausted); only `reset` is accepted there.
    pub fn is_over(&self) -> bool {
        self.clock.is_expired() || self.current == self.questions.len()
    }

    //--- Internal Helpers -------------------------------------------------

    fn publish_finished(&self, outbox: &mut Outbox) {
        outbox.publish(GameEvent::QuizFinished {
            score: self.score,
            total: self.questions.len(),
        });
    }
}

//--- Activity Lifecycle ----------------------------------------------------

impl Activity for QuizEngine {
    fn on_enter(&mut self, outbox: &mut Outbox) {
        self.reset(outbox);
    }

    fn on_exit(&mut self) {
        self.cancel_pending();
    }

    fn tick(&mut self, dt: Duration, outbox: &mut Outbox) {
        QuizEngine::tick(self, dt, outbox);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const BUDGET: Duration = Duration::from_secs(30);
    const LOCK: Duration = Duration::from_millis(1_200);

    fn bank(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question::new(&format!("pregunta {}", i), &["a", "b", "c"], i % 3))
            .collect()
    }

    fn engine(n: usize) -> (QuizEngine, Outbox) {
        (QuizEngine::new(bank(n), BUDGET, LOCK), Outbox::new())
    }

    /// Answers the current question and lets the feedback window elapse.
    fn answer_and_advance(quiz: &mut QuizEngine, option: usize, outbox: &mut Outbox) {
        quiz.answer(option, outbox);
        quiz.tick(LOCK, outbox);
    }

    //=====================================================================
    // Answering & Locking
    //=====================================================================

    #[test]
    fn correct_answer_scores_and_locks() {
        let (mut quiz, mut outbox) = engine(3);

        let outcome = quiz.answer(0, &mut outbox);
        assert_eq!(outcome, AnswerOutcome::Locked { correct: true });
        assert_eq!(quiz.score(), 1);
        assert_eq!(quiz.locked_answer(), Some(0));
        // Advancing waits for the feedback window
        assert_eq!(quiz.current_index(), 0);
    }

    #[test]
    fn wrong_answer_locks_without_scoring() {
        let (mut quiz, mut outbox) = engine(3);

        let outcome = quiz.answer(1, &mut outbox);
        assert_eq!(outcome, AnswerOutcome::Locked { correct: false });
        assert_eq!(quiz.score(), 0);
        assert_eq!(quiz.locked_answer(), Some(1));
    }

    #[test]
    fn second_answer_rejected_while_locked() {
        let (mut quiz, mut outbox) = engine(3);

        quiz.answer(1, &mut outbox);
        assert_eq!(quiz.answer(0, &mut outbox), AnswerOutcome::Ignored);

        // The rejected call neither scores nor replaces the lock
        assert_eq!(quiz.score(), 0);
        assert_eq!(quiz.locked_answer(), Some(1));
    }

    #[test]
    fn lock_clears_and_question_advances_after_window() {
        let (mut quiz, mut outbox) = engine(3);

        quiz.answer(0, &mut outbox);
        quiz.tick(Duration::from_millis(1_199), &mut outbox);
        assert_eq!(quiz.current_index(), 0);

        quiz.tick(Duration::from_millis(1), &mut outbox);
        assert_eq!(quiz.current_index(), 1);
        assert_eq!(quiz.locked_answer(), None);
    }

    #[test]
    fn out_of_range_option_is_ignored() {
        let (mut quiz, mut outbox) = engine(3);
        assert_eq!(quiz.answer(9, &mut outbox), AnswerOutcome::Ignored);
        assert_eq!(quiz.locked_answer(), None);
    }

    //=====================================================================
    // Completion
    //=====================================================================

    #[test]
    fn three_correct_answers_finish_with_full_score() {
        let (mut quiz, mut outbox) = engine(3);

        for i in 0..3 {
            answer_and_advance(&mut quiz, i % 3, &mut outbox);
        }

        assert!(quiz.is_over());
        assert_eq!(quiz.score(), 3);
        assert_eq!(quiz.current_index(), 3);
        assert!(quiz.current_question().is_none());
    }

    #[test]
    fn finishing_emits_final_score() {
        let (mut quiz, mut outbox) = engine(2);
        let rx = outbox.subscribe();

        answer_and_advance(&mut quiz, 0, &mut outbox);
        answer_and_advance(&mut quiz, 0, &mut outbox);
        outbox.dispatch();

        let events: Vec<GameEvent> = rx.try_iter().collect();
        assert!(events.contains(&GameEvent::QuizFinished { score: 1, total: 2 }));
    }

    #[test]
    fn answers_after_completion_are_ignored() {
        let (mut quiz, mut outbox) = engine(1);
        answer_and_advance(&mut quiz, 0, &mut outbox);

        assert!(quiz.is_over());
        assert_eq!(quiz.answer(0, &mut outbox), AnswerOutcome::Ignored);
        assert_eq!(quiz.score(), 1);
    }

    //=====================================================================
    // Countdown
    //=====================================================================

    #[test]
    fn budget_decrements_once_per_elapsed_second() {
        let (mut quiz, mut outbox) = engine(3);

        quiz.tick(Duration::from_millis(2_500), &mut outbox);
        assert_eq!(quiz.remaining_seconds(), 28);

        quiz.tick(Duration::from_millis(500), &mut outbox);
        assert_eq!(quiz.remaining_seconds(), 27);
    }

    #[test]
    fn budget_exhaustion_forces_terminal_state() {
        let (mut quiz, mut outbox) = engine(3);
        answer_and_advance(&mut quiz, 0, &mut outbox);

        quiz.tick(BUDGET, &mut outbox);

        assert!(quiz.is_over());
        assert_eq!(quiz.remaining_seconds(), 0);
        // Progress stops mid-question
        assert_eq!(quiz.current_index(), 1);
        assert_eq!(quiz.answer(0, &mut outbox), AnswerOutcome::Ignored);
    }

    #[test]
    fn expiry_cancels_a_pending_lock_window() {
        let (mut quiz, mut outbox) = engine(3);

        quiz.answer(0, &mut outbox);
        quiz.tick(BUDGET, &mut outbox);

        assert!(quiz.is_over());
        assert_eq!(quiz.locked_answer(), None);
        // The stale window must not advance a finished quiz
        let index = quiz.current_index();
        quiz.tick(LOCK, &mut outbox);
        assert_eq!(quiz.current_index(), index);
    }

    #[test]
    fn expiry_emits_finished_with_partial_score() {
        let (mut quiz, mut outbox) = engine(3);
        let rx = outbox.subscribe();
        answer_and_advance(&mut quiz, 0, &mut outbox);

        quiz.tick(BUDGET, &mut outbox);
        outbox.dispatch();

        let events: Vec<GameEvent> = rx.try_iter().collect();
        assert!(events.contains(&GameEvent::QuizFinished { score: 1, total: 3 }));
    }

    #[test]
    fn clock_ticks_are_published_with_remaining_seconds() {
        let (mut quiz, mut outbox) = engine(3);
        let rx = outbox.subscribe();

        quiz.tick(Duration::from_secs(2), &mut outbox);
        outbox.dispatch();

        let events: Vec<GameEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                GameEvent::ClockTicked { remaining: 29 },
                GameEvent::ClockTicked { remaining: 28 },
            ]
        );
    }

    //=====================================================================
    // Reset & Teardown
    //=====================================================================

    #[test]
    fn reset_restores_documented_initial_state() {
        let (mut quiz, mut outbox) = engine(3);
        answer_and_advance(&mut quiz, 0, &mut outbox);
        quiz.answer(2, &mut outbox);
        quiz.tick(Duration::from_secs(5), &mut outbox);

        quiz.reset(&mut outbox);

        assert_eq!(quiz.current_index(), 0);
        assert_eq!(quiz.score(), 0);
        assert_eq!(quiz.remaining_seconds(), 30);
        assert_eq!(quiz.locked_answer(), None);
        assert!(!quiz.is_over());
    }

    #[test]
    fn reset_revives_a_terminal_quiz() {
        let (mut quiz, mut outbox) = engine(2);
        quiz.tick(BUDGET, &mut outbox);
        assert!(quiz.is_over());

        quiz.reset(&mut outbox);
        assert!(!quiz.is_over());
        assert_eq!(quiz.answer(0, &mut outbox), AnswerOutcome::Locked { correct: true });
    }

    #[test]
    fn cancel_pending_stops_the_advance_window() {
        let (mut quiz, mut outbox) = engine(3);
        quiz.answer(0, &mut outbox);

        quiz.cancel_pending();
        quiz.tick(LOCK, &mut outbox);

        // Without the window the quiz stays on the locked question
        assert_eq!(quiz.current_index(), 0);
        assert_eq!(quiz.locked_answer(), Some(0));
    }
}
