pub mod test;
pub mod test_type;

pub use test::{file_name_from_uri, Choice, ChoiceField, Question, Test};
pub use test_type::{StrengthKind, TestType};
