pub mod chapter;
pub mod common;
pub mod init;
pub mod plot_decision;
pub mod story;

// Re-export common types/enums for easier access
pub use chapter::{Chapter, ChapterEntry, ChapterPage};
pub use common::*;
pub use init::InitArgs;
pub use plot_decision::{PlotDecision, PlotDecisionEntry, PlotOption};
pub use story::Story;
