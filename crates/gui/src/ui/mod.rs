pub mod messages;
pub mod properties;
pub mod status_bar;
pub mod toolbar;
