//! FFI use-case API for the Flutter task and category screens.
//!
//! # Responsibility
//! - Own the process session: one task list and one category list, each
//!   with its own store handle on the same database file.
//! - Translate screen gestures into list controller calls.
//! - Return full row snapshots so Dart can redraw after every call.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - Row indexes refer to the snapshot returned by the previous call.
//! - Store failures during gestures are logged by core, not reported here.

use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use todolist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, Accessory, Category,
    CategoryId, CategoryList, ListController, ListView, Presentable, Record, RowContent,
    RowTint, StoreHandle, SwipeAction, Task, TaskList, TextPrompt,
};
use uuid::Uuid;

const DEFAULT_DB_FILE_NAME: &str = "todolist.sqlite3";
static DEFAULT_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static SESSION: Mutex<Option<Session>> = Mutex::new(None);

struct Session {
    db_path: PathBuf,
    tasks: TaskList<BridgeView>,
    categories: CategoryList<BridgeView>,
}

/// View stand-in: Dart pulls snapshots instead of receiving callbacks.
#[derive(Debug, Default)]
struct BridgeView {
    focus_release_requested: bool,
}

impl ListView for BridgeView {
    fn reload_data(&mut self, _rows: &[RowContent]) {}

    fn resign_search_focus(&mut self) {
        self.focus_release_requested = true;
    }
}

/// One drawable row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    /// Stable entity id in string form.
    pub id: String,
    pub text: Option<String>,
    pub detail: Option<String>,
    /// Whether the row shows a checkmark.
    pub checked: bool,
    /// Whether the row uses the accent text color.
    pub accent: bool,
}

/// Full list snapshot returned by every list call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListResponse {
    /// Whether the call was accepted.
    pub ok: bool,
    /// Rows to draw, replacing everything shown before. Rejected calls on an
    /// open session carry the unchanged rows.
    pub rows: Vec<ListRow>,
    /// Title of the destructive swipe action offered on each row.
    pub swipe_action_title: String,
    /// Dart should unfocus the search field on its next frame.
    pub resign_search_focus: bool,
    /// Human-readable message for diagnostics.
    pub message: String,
}

/// Creation prompt descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptView {
    pub title: String,
    pub message: String,
    pub placeholder: String,
    pub confirm_label: String,
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Opens the session on `db_path` (or the default path) and loads both lists.
///
/// Replaces any previously open session. A failure here means the app has
/// no usable store; every other call keeps failing until this succeeds.
#[flutter_rust_bridge::frb(sync)]
pub fn open_session(db_path: Option<String>) -> ListResponse {
    let path = db_path
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(resolve_default_db_path);

    let session = match open_lists(path) {
        Ok(session) => session,
        Err(err) => {
            warn!("event=session_open module=ffi status=error error={err}");
            return ListResponse::failure(format!("open_session failed: {err}"));
        }
    };

    let mut guard = match SESSION.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    let session = guard.insert(session);
    info!(
        "event=session_open module=ffi status=ok tasks={} categories={}",
        session.tasks.row_count(),
        session.categories.row_count()
    );
    snapshot(&mut session.tasks, "Session opened.")
}

/// Returns the current task rows.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_snapshot() -> ListResponse {
    with_session(|session| snapshot(&mut session.tasks, "Tasks loaded."))
}

/// Switches the task screen to one category (`None` shows every task).
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_select_category(category_id: Option<String>) -> ListResponse {
    with_session(|session| {
        let category = match category_id.as_deref().map(parse_id).transpose() {
            Ok(category) => category,
            Err(message) => return rejected(&mut session.tasks, &message),
        };
        match open_task_list(&session.db_path, category) {
            Ok(tasks) => {
                let dropped = session.tasks.store().pending_len();
                if dropped > 0 {
                    warn!(
                        "event=tasks_select_category module=ffi status=warn dropped_pending={dropped}"
                    );
                }
                session.tasks = tasks;
                snapshot(&mut session.tasks, "Tasks loaded.")
            }
            Err(err) => rejected(
                &mut session.tasks,
                &format!("tasks_select_category failed: {err}"),
            ),
        }
    })
}

/// Creates a task from the confirmed prompt text.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_create(title: Option<String>) -> ListResponse {
    with_session(|session| {
        session.tasks.create(title);
        snapshot(&mut session.tasks, "Task created.")
    })
}

/// Toggles completion of the task row at `index`.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_toggle(index: u32) -> ListResponse {
    with_session(|session| match session.tasks.toggle_done(index as usize) {
        Ok(true) => snapshot(&mut session.tasks, "Task completed."),
        Ok(false) => snapshot(&mut session.tasks, "Task reopened."),
        Err(err) => rejected(&mut session.tasks, &format!("tasks_toggle failed: {err}")),
    })
}

/// Runs the swipe delete action on the task row at `index`.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_delete(index: u32) -> ListResponse {
    with_session(|session| {
        match session
            .tasks
            .perform_swipe_action(index as usize, SwipeAction::Delete)
        {
            Ok(()) => snapshot(&mut session.tasks, "Task deleted."),
            Err(err) => rejected(&mut session.tasks, &format!("tasks_delete failed: {err}")),
        }
    })
}

/// Search button pressed on the task screen.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_search_submit(text: String) -> ListResponse {
    with_session(|session| {
        session.tasks.on_search_submit(&text);
        snapshot(&mut session.tasks, "Search applied.")
    })
}

/// Search text edited on the task screen.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_search_changed(text: String) -> ListResponse {
    with_session(|session| {
        session.tasks.on_search_text_change(&text);
        snapshot(&mut session.tasks, "Search updated.")
    })
}

/// Returns the current category rows.
#[flutter_rust_bridge::frb(sync)]
pub fn categories_snapshot() -> ListResponse {
    with_session(|session| snapshot(&mut session.categories, "Categories loaded."))
}

/// Creates a category from the confirmed prompt text.
#[flutter_rust_bridge::frb(sync)]
pub fn categories_create(name: Option<String>) -> ListResponse {
    with_session(|session| {
        session.categories.create(name);
        snapshot(&mut session.categories, "Category created.")
    })
}

/// Runs the swipe delete action on the category row at `index`.
///
/// Tasks filed under the category lose their category.
#[flutter_rust_bridge::frb(sync)]
pub fn categories_delete(index: u32) -> ListResponse {
    with_session(|session| {
        match session
            .categories
            .perform_swipe_action(index as usize, SwipeAction::Delete)
        {
            Ok(()) => snapshot(&mut session.categories, "Category deleted."),
            Err(err) => rejected(
                &mut session.categories,
                &format!("categories_delete failed: {err}"),
            ),
        }
    })
}

/// Search button pressed on the category screen.
#[flutter_rust_bridge::frb(sync)]
pub fn categories_search_submit(text: String) -> ListResponse {
    with_session(|session| {
        session.categories.on_search_submit(&text);
        snapshot(&mut session.categories, "Search applied.")
    })
}

/// Search text edited on the category screen.
#[flutter_rust_bridge::frb(sync)]
pub fn categories_search_changed(text: String) -> ListResponse {
    with_session(|session| {
        session.categories.on_search_text_change(&text);
        snapshot(&mut session.categories, "Search updated.")
    })
}

/// Prompt shown by the "new task" button.
#[flutter_rust_bridge::frb(sync)]
pub fn task_prompt() -> PromptView {
    PromptView::from(<Task as Presentable>::prompt())
}

/// Prompt shown by the "new category" button.
#[flutter_rust_bridge::frb(sync)]
pub fn category_prompt() -> PromptView {
    PromptView::from(<Category as Presentable>::prompt())
}

impl ListResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            rows: Vec::new(),
            swipe_action_title: SwipeAction::Delete.title().to_string(),
            resign_search_focus: false,
            message: message.into(),
        }
    }
}

impl From<TextPrompt> for PromptView {
    fn from(prompt: TextPrompt) -> Self {
        Self {
            title: prompt.title.to_string(),
            message: prompt.message.to_string(),
            placeholder: prompt.placeholder.to_string(),
            confirm_label: prompt.confirm_label.to_string(),
        }
    }
}

fn open_lists(db_path: PathBuf) -> Result<Session, String> {
    let tasks = open_task_list(&db_path, None)?;
    let mut categories = CategoryList::new(open_store(&db_path)?, BridgeView::default());
    categories.reload();
    Ok(Session {
        db_path,
        tasks,
        categories,
    })
}

fn open_task_list(
    db_path: &Path,
    category: Option<CategoryId>,
) -> Result<TaskList<BridgeView>, String> {
    let store = open_store(db_path)?;
    let mut tasks = match category {
        Some(category) => TaskList::for_category(store, BridgeView::default(), category),
        None => TaskList::new(store, BridgeView::default()),
    };
    tasks.reload();
    Ok(tasks)
}

fn open_store(db_path: &Path) -> Result<StoreHandle, String> {
    StoreHandle::open(db_path).map_err(|err| format!("store open failed: {err}"))
}

fn with_session(f: impl FnOnce(&mut Session) -> ListResponse) -> ListResponse {
    let mut guard = match SESSION.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    match guard.as_mut() {
        Some(session) => f(session),
        None => ListResponse::failure("session not open; call open_session first"),
    }
}

fn snapshot<E: Record + Presentable>(
    list: &mut ListController<E, BridgeView>,
    message: &str,
) -> ListResponse {
    list.run_deferred();
    let resign_search_focus = std::mem::take(&mut list.view_mut().focus_release_requested);
    let rows = list
        .items()
        .iter()
        .map(|entity| {
            let content = entity.row_content();
            ListRow {
                id: entity.id().to_string(),
                text: content.text,
                detail: content.detail,
                checked: content.accessory == Accessory::Checkmark,
                accent: content.tint == RowTint::Accent,
            }
        })
        .collect();

    ListResponse {
        ok: true,
        rows,
        swipe_action_title: SwipeAction::Delete.title().to_string(),
        resign_search_focus,
        message: message.to_string(),
    }
}

/// Current rows of `list`, flagged as a rejected call.
fn rejected<E: Record + Presentable>(
    list: &mut ListController<E, BridgeView>,
    message: &str,
) -> ListResponse {
    ListResponse {
        ok: false,
        ..snapshot(list, message)
    }
}

fn parse_id(raw: &str) -> Result<CategoryId, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid category id `{raw}`"))
}

fn resolve_default_db_path() -> PathBuf {
    DEFAULT_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("TODOLIST_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
        })
        .clone()
}
