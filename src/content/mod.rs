//! Content module - post models and the metadata derived from them

mod post;
mod projector;
mod read_time;

pub use post::{BlockType, Post, PostSummary, Section, TextBlock};
pub use projector::{project, project_summary, SUMMARY_FIELDS};
pub use read_time::{estimate_read_minutes, plain_text, WORDS_PER_MINUTE};
