//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the page,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Flow
//!
//! ```text
//! crossterm ──► TuiEvent ──► route_event ──► Action ──► update() ──► Effect
//!                                                              │
//!            rx ◄── Lead*/Report* actions ◄── tokio tasks ◄────┘ Dispatch
//! ```
//!
//! ## Redraw Strategy
//!
//! - **Busy** (lead capture or report in flight): polls every ~80ms so chunks
//!   show up promptly.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use futures::StreamExt;
use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::form::FormDraft;
use crate::core::state::{App, ReportStatus, SubmissionPhase};
use crate::inference::{
    ChatCompletionsProvider, CompletionProvider, PromptRequest, StreamChunk, submit_prompt,
};
use crate::leads::{FormspreeClient, LeadCapture, LeadOutcome};
use crate::tui::component::EventHandler;
use crate::tui::components::{FormEvent, LeadFormState, ReportPanelState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const BUSY_POLL: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub form: LeadFormState,
    pub report: ReportPanelState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            form: LeadFormState::new(),
            report: ReportPanelState::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is ignored by terminals that don't support it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!(
            "Terminal modes enabled (mouse, bracketed paste, cursor style, keyboard enhancement)"
        );
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Build the chat-completion provider from a resolved config.
pub fn build_provider(config: &ResolvedConfig) -> Arc<dyn CompletionProvider> {
    Arc::new(ChatCompletionsProvider::new(
        config.provider,
        config.chat_api_key.clone(),
        Some(config.chat_base_url.clone()),
    ))
}

/// Build the lead-capture client from a resolved config.
pub fn build_lead_capture(config: &ResolvedConfig) -> Arc<dyn LeadCapture> {
    Arc::new(FormspreeClient::new(
        config.form_id.clone(),
        Some(config.leads_base_url.clone()),
    ))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(build_provider(&config), build_lead_capture(&config), &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new()
        .and_then(|_guard| event_loop(&mut terminal, &mut app, &mut tui));
    ratatui::restore();

    info!(
        "Keyscout exiting (submitted={}, report={:?})",
        app.flags.is_submitted, app.report
    );
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
) -> std::io::Result<()> {
    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, app, tui))?;
            needs_redraw = false;
        }

        let busy = app.lead.submitting || app.report == ReportStatus::Streaming;
        let first_event = poll_event_timeout(if busy { BUSY_POLL } else { IDLE_POLL });

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            should_quit |= route_event(app, tui, &event, &tx);
        }

        if should_quit {
            return Ok(());
        }

        // Handle background task actions (lead outcome, report chunks)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if apply(app, action, &tx) {
                return Ok(());
            }
        }
    }
}

/// Sends one terminal event to whatever currently owns input.
/// Returns true when the page should close.
fn route_event(
    app: &mut App,
    tui: &mut TuiState,
    event: &TuiEvent,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match event {
        TuiEvent::Resize => return false,
        TuiEvent::ForceQuit => return apply(app, Action::Quit, tx),
        _ => {}
    }

    // The notice blocks everything else until dismissed
    if app.notice.is_some() {
        if matches!(event, TuiEvent::Enter | TuiEvent::Quit | TuiEvent::InputChar(' ')) {
            return apply(app, Action::DismissNotice, tx);
        }
        return false;
    }

    if *event == TuiEvent::Quit {
        return apply(app, Action::Quit, tx);
    }

    match app.flags.phase() {
        SubmissionPhase::NotSubmitted => {
            let Some(form_event) = tui.form.handle_event(event) else {
                return false;
            };
            let action = match form_event {
                FormEvent::Edit(field, value) => Action::EditField(field, value),
                FormEvent::ToggleConsent => Action::ToggleConsent,
                FormEvent::Submit => Action::Submit,
            };
            apply(app, action, tx)
        }
        SubmissionPhase::AwaitingDispatch | SubmissionPhase::ResultsVisible => {
            tui.report.handle_event(event);
            false
        }
    }
}

/// Runs an action through `update` and carries out the resulting effect.
/// Returns true when the page should close.
fn apply(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    match update(app, action) {
        Effect::None => false,
        Effect::Quit => true,
        Effect::Dispatch { prompt, record } => {
            spawn_dispatch(app, prompt, record, tx.clone());
            update(app, Action::ReportDispatched);
            false
        }
    }
}

/// Starts the two network tasks of a submission: lead capture and report stream.
fn spawn_dispatch(
    app: &App,
    prompt: String,
    record: FormDraft,
    tx: mpsc::Sender<Action>,
) {
    info!(
        "Dispatching submission (lead capture: {}, provider: {})",
        app.lead_capture.name(),
        app.provider.name()
    );

    spawn_lead_capture(app.lead_capture.clone(), record, tx.clone());
    spawn_report(
        app.provider.clone(),
        PromptRequest {
            prompt,
            model: app.model_name.clone(),
            max_output_tokens: app.max_output_tokens,
        },
        tx,
    );
}

fn spawn_lead_capture(
    lead_capture: Arc<dyn LeadCapture>,
    record: FormDraft,
    tx: mpsc::Sender<Action>,
) {
    tokio::spawn(async move {
        let action = match lead_capture.submit(&record).await {
            Ok(LeadOutcome::Accepted) => {
                info!("Lead accepted by {}", lead_capture.name());
                Action::LeadAccepted
            }
            Ok(LeadOutcome::Rejected(errors)) => {
                warn!("Lead rejected with {} field error(s)", errors.len());
                Action::LeadRejected(errors)
            }
            Err(e) => {
                warn!("Lead capture failed: {}", e);
                Action::LeadFailed(e.to_string())
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to send lead outcome: receiver dropped");
        }
    });
}

fn spawn_report(
    provider: Arc<dyn CompletionProvider>,
    request: PromptRequest,
    tx: mpsc::Sender<Action>,
) {
    tokio::spawn(async move {
        let mut stream = Box::pin(submit_prompt(provider, request));
        let mut forwarded_bytes = 0usize;

        while let Some(item) = stream.next().await {
            let action = match item {
                Ok(StreamChunk::Content(text)) => {
                    forwarded_bytes += text.len();
                    Action::ReportChunk(text)
                }
                Ok(StreamChunk::Completed) => continue,
                Err(e) => {
                    warn!("Report stream failed after {} bytes: {}", forwarded_bytes, e);
                    if tx.send(Action::ReportFailed(e.to_string())).is_err() {
                        warn!("Failed to send ReportFailed: receiver dropped");
                    }
                    return;
                }
            };
            if tx.send(action).is_err() {
                warn!("Failed to forward ReportChunk: receiver dropped");
                return;
            }
        }

        info!("Report stream finished: {} content bytes", forwarded_bytes);
        if tx.send(Action::ReportDone).is_err() {
            warn!("Failed to send ReportDone: receiver dropped");
        }
    });
}
