//! Line-oriented terminal front end.

pub mod chat_loop;
pub mod render;
