pub mod fields;
pub mod record;

pub use record::Submission;
