//! Transport boundary: TCP accept loop.

pub mod listener;
