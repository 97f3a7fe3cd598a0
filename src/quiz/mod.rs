pub mod bank;
pub mod matching;
pub mod question;
pub mod random;
pub mod session;
pub mod surface;

pub use bank::QuestionBank;
pub use question::{Gradable, Question, QuestionRecord, VariantKind};
pub use session::{Action, QuizSession, SessionError, SessionState, QUESTIONS_PER_QUIZ};
pub use surface::{Control, Surface};
