pub mod events;
pub mod input;
pub mod layout;
pub mod surface;
pub mod terminal_guard;
pub mod theme;
