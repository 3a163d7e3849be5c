//! API endpoint handlers.
//!
//! `pages` serves the HTML shell; the rest answer JSON under `/api/`.

pub mod fallback;
pub mod health;
pub mod medicines;
pub mod pages;
pub mod predict;
pub mod vocabulary;
