pub mod app;
pub mod beat_recorder;
pub mod catalog_select;
pub mod play_controls;
