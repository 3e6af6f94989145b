//! # TUI Components
//!
//! All UI components for the terminal page.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: page heading and model name
//! - `Confirmation`: post-submit heading and lead-capture status
//! - `Notice`: blocking message overlay
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent state lives in `TuiState`; a transient wrapper is built each
//! frame with the props it needs from `App`:
//! - `LeadFormState` / `LeadForm`: text fields, consent checkbox, submit button
//! - `TextField`: one editable control, owned by the form
//! - `ReportPanelState` / `ReportPanel`: scrollable markdown report
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Page heading)
//! ├── lead_form.rs     (Form layout, focus, submit)
//! ├── text_field/      (Single editable field)
//! ├── confirmation.rs  (Post-submit status)
//! ├── report_panel.rs  (Streamed report view)
//! └── notice.rs        (Blocking notice overlay)
//! ```

mod confirmation;
pub mod lead_form;
mod notice;
mod report_panel;
pub mod text_field;
mod title_bar;

pub use confirmation::Confirmation;
pub use lead_form::{FormEvent, LeadForm, LeadFormState};
pub use notice::Notice;
pub use report_panel::{ReportPanel, ReportPanelState};
pub use title_bar::TitleBar;
