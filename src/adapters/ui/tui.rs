//! Implements InputPort and LoginPrompt with inquire prompts.
//!
//! Holds the list state (fetched entities, keep-set, view query). Fetch and leave run
//! as background jobs; the menu is not shown again until the job has finished.

use crate::adapters::ui::progress;
use crate::domain::{Credentials, DomainError, Entity, KeepSet, SortKey, TypeFilter, ViewQuery};
use crate::ports::{CredentialsPort, InputPort, LoginPrompt, SelectionPort};
use crate::usecases::{FetchService, JobRunner, LeaveService};
use async_trait::async_trait;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{Confirm, InquireError, MultiSelect, Password, Select, Text};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("?").with_fg(Color::LightCyan))
        .with_highlighted_option_prefix(Styled::new(">").with_fg(Color::LightCyan));
    inquire::set_global_render_config(config);
}

fn prompt_err(e: InquireError) -> DomainError {
    DomainError::Prompt(e.to_string())
}

/// Esc goes back to the menu; anything else is an error.
fn cancelled<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(e) => Err(prompt_err(e)),
    }
}

/// Ask for API id, hash and phone, pre-filled from the credentials file or `fallback`.
/// Offers to save them afterwards.
pub async fn collect_credentials(
    store: &dyn CredentialsPort,
    fallback: Option<Credentials>,
) -> Result<Credentials, DomainError> {
    let saved = store.load().await;
    let initial = saved.clone().or(fallback).unwrap_or_default();

    let creds = Credentials {
        api_id: Text::new("API ID:")
            .with_initial_value(&initial.api_id)
            .prompt()
            .map_err(prompt_err)?,
        api_hash: Text::new("API Hash:")
            .with_initial_value(&initial.api_hash)
            .prompt()
            .map_err(prompt_err)?,
        phone: Text::new("Phone Number:")
            .with_initial_value(&initial.phone)
            .with_placeholder("+12345678901")
            .prompt()
            .map_err(prompt_err)?,
    };
    if !creds.is_complete() {
        return Err(DomainError::Config(
            "Please fill in all API credentials".into(),
        ));
    }

    if saved.as_ref() != Some(&creds) {
        let save = Confirm::new("Save credentials for next time?")
            .with_default(true)
            .prompt()
            .map_err(prompt_err)?;
        if save {
            match store.save(&creds).await {
                Ok(()) => println!("Credentials saved successfully"),
                Err(e) => {
                    warn!(error = %e, "failed to save credentials");
                    println!("Failed to save credentials: {}", e);
                }
            }
        }
    }
    Ok(creds)
}

pub struct InquireLoginPrompt;

impl LoginPrompt for InquireLoginPrompt {
    fn login_code(&self) -> Result<String, DomainError> {
        Text::new("Login code (sent to your Telegram app):")
            .prompt()
            .map_err(prompt_err)
    }

    fn password(&self, hint: Option<&str>) -> Result<String, DomainError> {
        let message = match hint {
            Some(h) => format!("Two-step verification password (hint: {}):", h),
            None => "Two-step verification password:".to_string(),
        };
        Password::new(&message)
            .without_confirmation()
            .prompt()
            .map_err(prompt_err)
    }
}

/// Display wrapper for the keep multi-select.
#[derive(Debug, Clone)]
struct EntityOption(Entity);

impl fmt::Display for EntityOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (ID: {}, Type: {})",
            self.0.name, self.0.id, self.0.kind
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    ChooseKeep,
    Search,
    FilterType,
    Sort,
    SelectAll,
    DeselectAll,
    LeaveUnselected,
    Refetch,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 9] = [
        MenuAction::ChooseKeep,
        MenuAction::Search,
        MenuAction::FilterType,
        MenuAction::Sort,
        MenuAction::SelectAll,
        MenuAction::DeselectAll,
        MenuAction::LeaveUnselected,
        MenuAction::Refetch,
        MenuAction::Quit,
    ];
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MenuAction::ChooseKeep => "Choose groups & channels to keep",
            MenuAction::Search => "Search",
            MenuAction::FilterType => "Filter by type",
            MenuAction::Sort => "Sort by",
            MenuAction::SelectAll => "Select all (shown)",
            MenuAction::DeselectAll => "Deselect all (shown)",
            MenuAction::LeaveUnselected => "Leave unselected groups",
            MenuAction::Refetch => "Fetch groups/channels again",
            MenuAction::Quit => "Quit",
        })
    }
}

/// What the surface shows and edits between background jobs.
#[derive(Debug, Default)]
struct ListState {
    entities: Vec<Entity>,
    keep: KeepSet,
    view: ViewQuery,
}

impl ListState {
    fn visible(&self) -> Vec<Entity> {
        self.view.apply(&self.entities)
    }

    fn status_line(&self, shown: usize) -> String {
        let mut line = format!(
            "{} of {} shown, {} kept | {} | {}",
            shown,
            self.entities.len(),
            self.keep.kept_count(&self.entities),
            self.view.type_filter,
            self.view.sort_key
        );
        if !self.view.query.is_empty() {
            line.push_str(&format!(" | search: {:?}", self.view.query));
        }
        line
    }

    /// Replace the keep status of the shown entities with `chosen`.
    fn apply_choice(&mut self, shown: &[Entity], chosen: &HashSet<i64>) {
        for e in shown {
            self.keep.set(e.id, chosen.contains(&e.id));
        }
    }
}

/// TUI adapter. Inquire prompts over the fetch and leave use cases.
pub struct TuiInputPort {
    fetch: Arc<FetchService>,
    leave: Arc<LeaveService>,
    selection: Arc<dyn SelectionPort>,
    jobs: JobRunner,
}

impl TuiInputPort {
    pub fn new(
        fetch: Arc<FetchService>,
        leave: Arc<LeaveService>,
        selection: Arc<dyn SelectionPort>,
    ) -> Self {
        Self {
            fetch,
            leave,
            selection,
            jobs: JobRunner::new(),
        }
    }

    /// Fetch in the background; on success replace the list and reload the keep-list.
    /// A failed fetch is reported and leaves the previous list in place.
    async fn fetch_into(&self, state: &mut ListState) {
        let fetch = Arc::clone(&self.fetch);
        let Some(job) = self
            .jobs
            .submit(move |p| async move { fetch.fetch_entities(&p).await })
        else {
            println!("Another operation is still running.");
            return;
        };
        match progress::follow(job, progress::spinner()).await {
            Ok(entities) => {
                state.entities = entities;
                state.keep = KeepSet::new(self.selection.load().await);
            }
            Err(e) => println!("Error fetching groups: {}", e),
        }
    }

    fn choose_keep(&self, state: &mut ListState) -> Result<(), DomainError> {
        let shown = state.visible();
        if shown.is_empty() {
            println!("No groups match the current search and filter.");
            return Ok(());
        }
        let defaults: Vec<usize> = shown
            .iter()
            .enumerate()
            .filter(|(_, e)| state.keep.is_kept(e.id))
            .map(|(i, _)| i)
            .collect();
        let options: Vec<EntityOption> = shown.iter().cloned().map(EntityOption).collect();
        let picked = cancelled(
            MultiSelect::new("Select Groups & Channels to Keep:", options)
                .with_default(&defaults)
                .with_page_size(15)
                .prompt(),
        )?;
        if let Some(picked) = picked {
            let chosen: HashSet<i64> = picked.iter().map(|o| o.0.id).collect();
            state.apply_choice(&shown, &chosen);
        }
        Ok(())
    }

    fn edit_view(&self, state: &mut ListState, action: MenuAction) -> Result<(), DomainError> {
        match action {
            MenuAction::Search => {
                if let Some(q) = cancelled(
                    Text::new("Search groups:")
                        .with_initial_value(&state.view.query)
                        .with_help_message("name or ID; empty shows everything")
                        .prompt(),
                )? {
                    state.view.query = q.trim().to_string();
                }
            }
            MenuAction::FilterType => {
                let cursor = TypeFilter::ALL
                    .iter()
                    .position(|t| *t == state.view.type_filter)
                    .unwrap_or(0);
                if let Some(t) = cancelled(
                    Select::new("Filter by type:", TypeFilter::ALL.to_vec())
                        .with_starting_cursor(cursor)
                        .prompt(),
                )? {
                    state.view.type_filter = t;
                }
            }
            MenuAction::Sort => {
                let cursor = SortKey::ALL
                    .iter()
                    .position(|k| *k == state.view.sort_key)
                    .unwrap_or(0);
                if let Some(k) = cancelled(
                    Select::new("Sort by:", SortKey::ALL.to_vec())
                        .with_starting_cursor(cursor)
                        .prompt(),
                )? {
                    state.view.sort_key = k;
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn leave_unselected(&self, state: &ListState) -> Result<(), DomainError> {
        if let Err(e) = self.selection.save(state.keep.ids()).await {
            warn!(error = %e, "failed to save keep-list");
            println!("Failed to save groups: {}", e);
        }

        let to_leave = state.keep.to_leave(&state.entities);
        if to_leave.is_empty() {
            println!("No groups to leave. You've selected to keep all groups.");
            return Ok(());
        }

        let confirmed = cancelled(
            Confirm::new(&format!(
                "You are about to leave {} groups. This action cannot be undone. Continue?",
                to_leave.len()
            ))
            .with_default(false)
            .prompt(),
        )?
        .unwrap_or(false);
        if !confirmed {
            return Ok(());
        }

        let leave = Arc::clone(&self.leave);
        let Some(job) = self
            .jobs
            .submit(move |p| async move { leave.leave_all(&to_leave, &p).await })
        else {
            println!("Another operation is still running.");
            return Ok(());
        };
        match progress::follow(job, progress::percent_bar()).await {
            Ok(run) => println!(
                "Operation complete: {} left, {} failed. Results saved to {}",
                run.succeeded(),
                run.failed(),
                run.report_path.display()
            ),
            Err(e) => println!("Operation failed: {}", e),
        }
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let mut state = ListState::default();
        self.fetch_into(&mut state).await;

        loop {
            let shown = state.visible().len();
            println!("{}", state.status_line(shown));
            let action = match Select::new("What next?", MenuAction::ALL.to_vec())
                .with_page_size(MenuAction::ALL.len())
                .prompt()
            {
                Ok(a) => a,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    MenuAction::Quit
                }
                Err(e) => return Err(prompt_err(e)),
            };

            match action {
                MenuAction::ChooseKeep => self.choose_keep(&mut state)?,
                MenuAction::Search | MenuAction::FilterType | MenuAction::Sort => {
                    self.edit_view(&mut state, action)?
                }
                MenuAction::SelectAll => {
                    let shown = state.visible();
                    state.keep.select_all(&shown);
                }
                MenuAction::DeselectAll => {
                    let shown = state.visible();
                    state.keep.deselect_all(&shown);
                }
                MenuAction::LeaveUnselected => self.leave_unselected(&state).await?,
                MenuAction::Refetch => self.fetch_into(&mut state).await,
                MenuAction::Quit => return Ok(()),
            }
        }
    }
}
