pub mod exercise;
pub mod user;

pub use exercise::{Exercise, ExerciseView, format_date, parse_date};
pub use user::{User, UserView};
