//! # Core Application Logic
//!
//! The page's business logic. It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • FormDraft + rules    │
//!                    │  • prompt composition   │
//!                    │  • State (app data)     │
//!                    │  • Action + update()    │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect::Dispatch
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌────────────┐                ┌────────────┐
//!          │ inference  │                │   leads    │
//!          │ (chat SSE) │                │ (Formspree)│
//!          └────────────┘                └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`form`]: `FormDraft` and local validation
//! - [`prompt`]: turns a draft into the report prompt
//! - [`state`]: the `App` struct, all page state in one place
//! - [`action`]: the `Action` enum and the `update()` reducer
//! - [`config`]: config file, env and CLI resolution

pub mod action;
pub mod config;
pub mod form;
pub mod prompt;
pub mod state;
