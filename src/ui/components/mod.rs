pub mod flashcard;
pub mod menu;
pub mod progress_bar;
pub mod quiz_card;
pub mod score_panel;
pub mod summary;
