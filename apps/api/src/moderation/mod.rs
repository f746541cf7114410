// Q&A moderation: the rephrase gate and question persistence.

pub mod gate;
pub mod handlers;
pub mod store;
