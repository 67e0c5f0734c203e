pub mod plot_service;
pub mod story_service;
