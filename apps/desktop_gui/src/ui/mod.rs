//! UI layer for desktop GUI: app shell, routes, and pages.

pub mod app;
mod pages;

pub use app::{Route, StudentPortalApp};
