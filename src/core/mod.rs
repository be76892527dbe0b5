//! # Core Application Logic
//!
//! This module contains Lantern's session logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Transcript (entries) │
//!                    │  • Composer (draft)     │
//!                    │  • App + update()       │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │   Reply    │
//!     │  Adapter   │                          │ providers  │
//!     │ (ratatui)  │                          │  (echo)    │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`message`]: `Message` and `Role`
//! - [`transcript`]: ordered entries with the single typing placeholder
//! - [`composer`]: draft text and the auto-growing input height
//! - [`state`]: the `App` struct, session phase and request ids
//! - [`action`]: the `Action` enum and the `update()` reducer
//! - [`config`]: layered configuration

pub mod action;
pub mod composer;
pub mod config;
pub mod message;
pub mod state;
pub mod transcript;
