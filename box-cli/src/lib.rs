pub mod render;
pub mod settings;
pub mod utils;
