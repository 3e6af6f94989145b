use crate::core::state::{App, SubmissionPhase};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Confirmation, LeadForm, Notice, ReportPanel, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(1), Min(0), Length(1)]);
    let [title_area, _, main_area, status_area] = layout.areas(frame.area());
    let main_area = Rect {
        x: main_area.x + 1,
        width: main_area.width.saturating_sub(2),
        ..main_area
    };

    TitleBar::new(app.model_name.clone()).render(frame, title_area);

    match app.flags.phase() {
        SubmissionPhase::NotSubmitted => {
            LeadForm {
                state: &mut tui.form,
                draft: &app.draft,
                submitting: app.lead.submitting,
                highlight_missing: app.notice.is_some(),
            }
            .render(frame, main_area);
        }
        phase => draw_results(frame, main_area, app, tui, phase),
    }

    frame.render_widget(
        Span::styled(app.status_message.as_str(), Style::default().fg(Color::DarkGray)),
        status_area,
    );

    if let Some(message) = &app.notice {
        Notice::new(message).render(frame, frame.area());
    }
}

fn draw_results(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    tui: &mut TuiState,
    phase: SubmissionPhase,
) {
    use Constraint::{Length, Min};

    let mut confirmation = Confirmation::new(&app.lead);
    let confirmation_height = confirmation.height(area.width);
    let [confirmation_area, _, report_area] =
        Layout::vertical([Length(confirmation_height), Length(1), Min(0)]).areas(area);

    confirmation.render(frame, confirmation_area);

    if phase == SubmissionPhase::ResultsVisible {
        let content = app.report_text();
        ReportPanel {
            state: &mut tui.report,
            content: &content,
            status: &app.report,
        }
        .render(frame, report_area);
    }
}
