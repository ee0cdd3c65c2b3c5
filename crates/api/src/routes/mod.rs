//! API route handlers

pub mod predict;
