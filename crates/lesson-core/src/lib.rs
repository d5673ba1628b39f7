pub mod acquire;
pub mod config;
pub mod error;
pub mod generator;
pub mod io;
pub mod lesson;
pub mod paths;
pub mod pipeline;
pub mod plan;
pub mod prompt;
pub mod release;
pub mod sanitize;
pub mod scaffold;
pub mod update;
pub mod writer;

pub use error::{GenerationError, LessonError, Result};
