//! Text rendering of the resident list.

use unicode_width::UnicodeWidthStr;

use crate::app::{ResidentsListState, ViewBody};
use crate::domain::ResidentId;
use crate::ui::color;

pub const TITLE: &str = "Resident Accounts";
pub const LOADING_TEXT: &str = "Loading resident data...";
pub const EMPTY_TEXT: &str = "No resident accounts found.";
pub const BACK_LABEL: &str = "Back to Dashboard";
pub const DELETE_LABEL: &str = "Delete";
pub const DELETING_LABEL: &str = "Deleting...";
pub const COLUMNS: [&str; 5] = ["Name", "Email", "Address", "Phone", "Actions"];

const SPINNER: &str = "⠋";
const COLUMN_GAP: &str = "  ";

/// Display text for one table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCells {
    pub id: ResidentId,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    pub action: String,
    /// Delete control disabled while a request for this row is in flight.
    pub action_disabled: bool,
}

impl RowCells {
    fn cells(&self) -> [&str; 5] {
        [
            &self.name,
            &self.email,
            &self.address,
            &self.phone,
            &self.action,
        ]
    }
}

/// Rows of the table, in backend order. Empty unless the table is showing.
pub fn row_cells(state: &ResidentsListState) -> Vec<RowCells> {
    let ViewBody::Table(residents) = state.body() else {
        return Vec::new();
    };

    residents
        .iter()
        .map(|resident| {
            let pending = state.is_delete_pending(resident.id);
            RowCells {
                id: resident.id,
                name: resident.display_name().to_string(),
                email: resident.display_email().to_string(),
                address: resident.display_address().to_string(),
                phone: resident.display_phone().to_string(),
                action: if pending {
                    format!("[{DELETING_LABEL}]")
                } else {
                    format!("[{DELETE_LABEL} #{}]", resident.id)
                },
                action_disabled: pending,
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub color: bool,
    pub dashboard_route: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: false,
            dashboard_route: crate::config::DEFAULT_DASHBOARD_ROUTE.to_string(),
        }
    }
}

/// Render the whole page: title, body by priority, back control.
pub fn render(state: &ResidentsListState, options: &RenderOptions) -> String {
    let color = options.color;
    let mut out = String::new();

    out.push_str(&color::bold(TITLE, color));
    out.push_str("\n\n");

    match state.body() {
        ViewBody::Loading => {
            out.push_str(&format!("{} {}\n", color::accent(SPINNER, color), LOADING_TEXT));
        }
        ViewBody::Error(message) => {
            out.push_str(&color::danger(&format!("! {message}"), color));
            out.push('\n');
        }
        ViewBody::Empty => {
            out.push_str(&color::muted(EMPTY_TEXT, color));
            out.push('\n');
        }
        ViewBody::Table(_) => {
            out.push_str(&render_table(&row_cells(state), color));
        }
    }

    out.push('\n');
    out.push_str(&format!(
        "[{}] {}\n",
        BACK_LABEL,
        color::accent(&options.dashboard_route, color)
    ));
    out
}

fn render_table(rows: &[RowCells], color: bool) -> String {
    let mut widths = COLUMNS.map(display_width);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(display_width(cell));
        }
    }

    let mut out = String::new();

    let header: Vec<String> = COLUMNS
        .iter()
        .zip(widths)
        .map(|(label, width)| pad(&color::bold(label, color), label, width))
        .collect();
    push_line(&mut out, &header);

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule);

    for row in rows {
        let styled: Vec<String> = row
            .cells()
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(column, (cell, width))| {
                let painted = if column == COLUMNS.len() - 1 {
                    if row.action_disabled {
                        color::muted(cell, color)
                    } else {
                        color::danger(cell, color)
                    }
                } else if *cell == crate::domain::NOT_PROVIDED {
                    color::muted(cell, color)
                } else {
                    cell.to_string()
                };
                pad(&painted, cell, width)
            })
            .collect();
        push_line(&mut out, &styled);
    }

    out
}

fn push_line(out: &mut String, cells: &[String]) {
    out.push_str(cells.join(COLUMN_GAP).trim_end());
    out.push('\n');
}

/// Pad `styled` to `width` columns, measuring the unstyled `plain` text.
fn pad(styled: &str, plain: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(plain));
    format!("{styled}{}", " ".repeat(fill))
}

fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Resident, NOT_PROVIDED};
    use crate::services::ApiError;
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;

    fn loaded(residents: Vec<Resident>) -> ResidentsListState {
        let mut state = ResidentsListState::new();
        state.finish_load(Ok(residents)).unwrap();
        state
    }

    fn failed() -> ResidentsListState {
        let mut state = ResidentsListState::new();
        let _ = state.finish_load(Err(ApiError::Status {
            method: "GET",
            url: "http://localhost/api/residents".to_string(),
            status: StatusCode::SERVICE_UNAVAILABLE,
        }));
        state
    }

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn loading_shows_spinner_only() {
        let text = render(&ResidentsListState::new(), &RenderOptions::default());

        assert!(text.contains(LOADING_TEXT));
        assert!(!text.contains("Email"));
        assert!(!text.contains(EMPTY_TEXT));
        assert!(text.ends_with("[Back to Dashboard] /dashboard\n"));
    }

    #[test]
    fn error_hides_table() {
        let text = render(&failed(), &RenderOptions::default());

        assert!(text.contains(crate::app::LOAD_FAILURE_MESSAGE));
        assert!(!text.contains("Actions"));
        assert!(text.contains(BACK_LABEL));
    }

    #[test]
    fn empty_collection_shows_no_records_message() {
        let text = render(&loaded(Vec::new()), &RenderOptions::default());

        assert!(text.contains(EMPTY_TEXT));
        assert!(!text.contains("Actions"));
    }

    #[test]
    fn one_row_per_resident_in_order() {
        let state = loaded(vec![
            Resident::new(3, "c@x.com").with_name("Cy"),
            Resident::new(1, "a@x.com").with_name("Al"),
            Resident::new(2, "b@x.com").with_name("Bo"),
        ]);

        let rows = row_cells(&state);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Cy", "Al", "Bo"]);

        let text = render(&state, &RenderOptions::default());
        // title, blank, header, rule, 3 rows, blank, back
        assert_eq!(lines(&text).len(), 9);
    }

    #[test]
    fn missing_fields_render_not_provided() {
        let state = loaded(vec![Resident::new(1, "a@x.com").with_updated_at("t")]);

        let rows = row_cells(&state);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, NOT_PROVIDED);
        assert_eq!(rows[0].address, NOT_PROVIDED);
        assert_eq!(rows[0].phone, NOT_PROVIDED);
        assert_eq!(rows[0].email, "a@x.com");
        assert_eq!(rows[0].action, "[Delete #1]");
    }

    #[test]
    fn columns_are_aligned() {
        let state = loaded(vec![
            Resident::new(1, "a@x.com").with_name("Zoë Ångström"),
            Resident::new(22, "longer.address@x.com").with_name("Al"),
        ]);

        let text = render(&state, &RenderOptions::default());
        let all = lines(&text);
        let column_of = |line: &str, needle: &str| display_width(&line[..line.find(needle).unwrap()]);

        let header = column_of(all[2], "Email");
        assert_eq!(column_of(all[4], "a@x.com"), header);
        assert_eq!(column_of(all[5], "longer.address@x.com"), header);
    }

    #[test]
    fn pending_delete_disables_row_action() {
        let mut state = loaded(vec![Resident::new(1, "a@x.com"), Resident::new(2, "b@x.com")]);
        state.begin_delete(ResidentId::new(2)).unwrap();

        let rows = row_cells(&state);

        assert!(!rows[0].action_disabled);
        assert!(rows[1].action_disabled);
        assert_eq!(rows[1].action, format!("[{DELETING_LABEL}]"));
    }

    #[test]
    fn custom_dashboard_route_is_shown() {
        let options = RenderOptions {
            color: false,
            dashboard_route: "/admin/home".to_string(),
        };
        let text = render(&loaded(Vec::new()), &options);
        assert!(text.ends_with("[Back to Dashboard] /admin/home\n"));
    }
}
