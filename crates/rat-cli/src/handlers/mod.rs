pub mod index;
pub mod mv;
pub mod new;
pub mod open;
pub mod rm;
pub mod search;
pub mod show;
