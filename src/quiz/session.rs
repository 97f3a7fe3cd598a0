use rand::Rng;

use super::bank::QuestionBank;
use super::question::{Gradable, Question, QuestionRecord};
use super::random;
use super::surface::Surface;
use crate::store::{StateStore, SCORE};

/// How many questions one attempt draws from its tier.
pub const QUESTIONS_PER_QUIZ: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SessionState {
    #[default]
    Idle,
    InProgress,
    Completed,
}

/// The navigation action currently offered to the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Advance,
    Finish,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("the quiz has not been started")]
    NotStarted,
    #[error("no question to move past: at {position} of {total}")]
    NothingToAdvance { position: usize, total: usize },
    #[error("the quiz is already finished")]
    AlreadyCompleted,
}

/// One learner's attempt: a fixed sequence of questions, a cursor and a score.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct QuizSession {
    questions: Vec<QuestionRecord>,
    current_question: usize,
    score: u32,
    active: Option<Question>,
    state: SessionState,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws [`QUESTIONS_PER_QUIZ`] questions from `tier` and shows the first one.
    /// An unknown tier gives an empty quiz that can only be finished.
    pub fn start<R: Rng + ?Sized>(
        bank: &QuestionBank,
        tier: &str,
        surface: &mut Surface,
        rng: &mut R,
    ) -> Self {
        let questions = random::sample(bank.tier(tier), QUESTIONS_PER_QUIZ, rng);
        if questions.is_empty() {
            log::warn!("No questions for tier {:?}, starting an empty quiz", tier);
        }
        let mut session = Self::new();
        session.begin(questions, surface, rng);
        log::info!(
            "Quiz started: tier {:?}, {} questions",
            tier,
            session.questions.len()
        );
        session
    }

    /// Starts with an already chosen sequence, in the given order.
    pub fn with_questions<R: Rng + ?Sized>(
        questions: Vec<QuestionRecord>,
        surface: &mut Surface,
        rng: &mut R,
    ) -> Self {
        let mut session = Self::new();
        session.begin(questions, surface, rng);
        session
    }

    fn begin<R: Rng + ?Sized>(
        &mut self,
        questions: Vec<QuestionRecord>,
        surface: &mut Surface,
        rng: &mut R,
    ) {
        self.questions = questions;
        self.current_question = 0;
        self.score = 0;
        self.state = SessionState::InProgress;
        self.render_current(surface, rng);
    }

    fn render_current<R: Rng + ?Sized>(&mut self, surface: &mut Surface, rng: &mut R) {
        surface.clear();
        self.active = None;

        let Some(record) = self.questions.get(self.current_question) else {
            return;
        };
        surface.set_heading(format!("{}. {}", self.current_question + 1, record.prompt));
        let question = Question::from_record(record);
        question.render(surface, rng);
        self.active = Some(question);
    }

    fn grade_active(&mut self, surface: &Surface) -> bool {
        let Some(question) = &self.active else {
            return false;
        };
        let correct = question.check(surface);
        if correct {
            self.score += 1;
        }
        log::debug!(
            "Question {} ({}) graded {}",
            self.current_question + 1,
            question.kind().tag(),
            if correct { "correct" } else { "wrong" }
        );
        correct
    }

    fn ensure_in_progress(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Idle => Err(SessionError::NotStarted),
            SessionState::InProgress => Ok(()),
            SessionState::Completed => Err(SessionError::AlreadyCompleted),
        }
    }

    /// Grades what is on the surface, then shows the next question (or leaves the
    /// surface empty after the last one). Returns whether the answer was right.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        surface: &mut Surface,
        rng: &mut R,
    ) -> Result<bool, SessionError> {
        self.ensure_in_progress()?;
        if self.current_question >= self.questions.len() {
            return Err(SessionError::NothingToAdvance {
                position: self.current_question,
                total: self.questions.len(),
            });
        }

        let correct = self.grade_active(surface);
        self.current_question += 1;
        self.render_current(surface, rng);
        Ok(correct)
    }

    /// Grades what is on the surface, closes the quiz and stores the score.
    pub fn finish<S: StateStore + ?Sized>(
        &mut self,
        surface: &Surface,
        store: &mut S,
    ) -> Result<u32, SessionError> {
        self.ensure_in_progress()?;

        self.grade_active(surface);
        self.active = None;
        self.state = SessionState::Completed;
        store.set(SCORE, self.score.to_string());
        log::info!(
            "Quiz finished: {} of {} correct",
            self.score,
            self.questions.len()
        );
        Ok(self.score)
    }

    /// `Advance` everywhere but the last question, `Finish` on it.
    /// Nothing once the quiz is completed or before it starts.
    pub fn affordance(&self) -> Option<Action> {
        if self.state != SessionState::InProgress {
            return None;
        }
        if self.current_question + 1 < self.questions.len() {
            Some(Action::Advance)
        } else {
            Some(Action::Finish)
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    pub fn position(&self) -> usize {
        self.current_question
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn active(&self) -> Option<&Question> {
        self.active.as_ref()
    }
}
