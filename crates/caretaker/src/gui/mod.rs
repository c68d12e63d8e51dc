pub mod app;
pub mod scheduler;
pub mod theme;
pub mod wheel;
