//! Shared library module for the Futoshiki app crate.
#![allow(missing_docs, clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod app;
pub mod browser;
pub mod event;
pub mod input;
pub mod notifications;
pub mod session;
pub mod settings;
pub mod view_model_builder;

mod ui;
