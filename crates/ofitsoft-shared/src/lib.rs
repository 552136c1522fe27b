pub mod api;
pub mod content;
pub mod models;
pub mod ops;

pub use content::*;
pub use models::*;
