// Circles: themed peer-support rooms with realtime chat.

pub mod catalog;
pub mod handlers;
pub mod room;
pub mod slug;
