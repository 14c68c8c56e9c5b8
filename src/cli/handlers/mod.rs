//! Command handlers

mod send;

pub use send::SendCommandHandler;
