mod auth;
mod content;

pub use auth::*;
pub use content::*;
