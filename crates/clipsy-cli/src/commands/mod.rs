pub mod auth;
pub mod context;
pub mod listen;
pub mod recipes;
pub mod share;
