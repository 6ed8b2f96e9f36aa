pub mod question;

pub use question::{
    Difficulty, GenerateRequest, NewQuestion, Question, QuestionFilters, QuestionType, Stats,
};
