pub mod judge;
pub mod outcome;
pub mod question;

pub use judge::{BackendErrorBody, RunOutput, RunRequest, SubmitReport, SubmitRequest, TestResult};
pub use outcome::Failure;
pub use question::{Example, Question, QuestionSummary};
