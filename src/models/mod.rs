pub mod check_record;
pub mod outcome;

pub use check_record::CheckRecord;
pub use outcome::OutcomeSet;
