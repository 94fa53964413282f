#![forbid(unsafe_code)]

//! Text-rendered screen catalog over `bindkit-runtime`.
//!
//! The catalog root links to a handful of screens (form, stacks, buttons,
//! framed, list, data binding). Screens render to plain strings; every state
//! change a mounted screen observes produces a new frame. The data-binding
//! screen shares one [`Mix`](mix::Mix) record owned by the app.

pub mod app;
pub mod cli;
pub mod logging;
pub mod mix;
pub mod screens;
