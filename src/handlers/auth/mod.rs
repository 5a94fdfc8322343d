// handlers/auth/mod.rs - registration, token acquisition and the token check endpoint

pub mod protected;
pub mod register;
pub mod token;

pub use protected::protected_get;
pub use register::register_post;
pub use token::token_post;
