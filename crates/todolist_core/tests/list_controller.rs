mod common;

use common::{reject_inserts, RecordingView};
use std::collections::HashSet;
use todolist_core::{
    Accessory, CategoryList, FetchRequest, ListError, StoreHandle, SwipeAction, Task, TaskList,
};

fn task_list() -> TaskList<RecordingView> {
    let mut list = TaskList::new(
        StoreHandle::open_in_memory().unwrap(),
        RecordingView::default(),
    );
    list.reload();
    list
}

fn titles(tasks: &[Task]) -> Vec<Option<String>> {
    tasks.iter().map(|task| task.title.clone()).collect()
}

#[test]
fn create_appends_open_task_and_renders() {
    let mut list = task_list();

    list.create(Some("Buy milk".to_string()));

    assert_eq!(list.row_count(), 1);
    let task = &list.items()[0];
    assert_eq!(task.title.as_deref(), Some("Buy milk"));
    assert!(!task.done);
    assert_eq!(list.view().texts(), vec![Some("Buy milk".to_string())]);
    assert!(!list.store().has_changes());
}

#[test]
fn creates_round_trip_through_a_fresh_load() {
    let mut list = task_list();
    let names = ["Buy milk", "Call mom", "Water plants", "Pay rent"];
    for name in names {
        list.create(Some(name.to_string()));
    }
    assert_eq!(list.row_count(), names.len());

    let persisted: HashSet<String> = list
        .store()
        .fetch::<Task>(&FetchRequest::all())
        .unwrap()
        .into_iter()
        .filter_map(|task| task.title)
        .collect();
    let expected: HashSet<String> = names.iter().map(|name| name.to_string()).collect();
    assert_eq!(persisted, expected);

    list.reload();
    assert_eq!(list.row_count(), names.len());
}

#[test]
fn create_accepts_absent_and_empty_titles() {
    let mut list = task_list();
    list.create(None);
    list.create(Some(String::new()));

    list.reload();
    assert_eq!(titles(list.items()), vec![None, Some(String::new())]);
}

#[test]
fn toggle_done_twice_restores_original_state() {
    let mut list = task_list();
    list.create(Some("Buy milk".to_string()));

    assert!(list.toggle_done(0).unwrap());
    assert!(list.items()[0].done);
    assert_eq!(list.row(0).unwrap().accessory, Accessory::Checkmark);

    list.reload();
    assert!(list.items()[0].done);

    assert!(!list.toggle_done(0).unwrap());
    list.reload();
    assert_eq!(list.items()[0].title.as_deref(), Some("Buy milk"));
    assert!(!list.items()[0].done);
    assert_eq!(list.row(0).unwrap().accessory, Accessory::None);
}

#[test]
fn delete_removes_row_from_list_and_store() {
    let mut list = task_list();
    list.create(Some("Buy milk".to_string()));
    list.create(Some("Call mom".to_string()));

    let removed = list.delete(0).unwrap();
    assert_eq!(removed.title.as_deref(), Some("Buy milk"));
    assert_eq!(list.row_count(), 1);

    list.reload();
    assert_eq!(titles(list.items()), vec![Some("Call mom".to_string())]);
    assert!(list.items().iter().all(|task| task.id != removed.id));
}

#[test]
fn swipe_delete_is_offered_for_valid_rows_only() {
    let mut list = task_list();
    list.create(Some("Buy milk".to_string()));

    let actions = list.swipe_actions(0);
    assert_eq!(actions, vec![SwipeAction::Delete]);
    assert!(actions[0].is_destructive());
    assert!(list.swipe_actions(1).is_empty());

    list.perform_swipe_action(0, SwipeAction::Delete).unwrap();
    assert_eq!(list.row_count(), 0);
}

#[test]
fn out_of_range_index_is_rejected_without_side_effects() {
    let mut list = task_list();
    list.create(Some("Buy milk".to_string()));
    let reloads = list.view().reloads;

    assert_eq!(
        list.toggle_done(3).unwrap_err(),
        ListError::IndexOutOfRange { index: 3, len: 1 }
    );
    assert!(list.delete(1).is_err());
    assert_eq!(list.row_count(), 1);
    assert_eq!(list.view().reloads, reloads);
    assert!(!list.store().has_changes());
}

#[test]
fn failed_commit_keeps_created_row_visible() {
    let mut list = task_list();
    reject_inserts(list.store().connection(), "tasks");

    list.create(Some("Buy milk".to_string()));

    assert_eq!(titles(list.items()), vec![Some("Buy milk".to_string())]);
    assert_eq!(list.view().texts(), vec![Some("Buy milk".to_string())]);
    assert!(!list.store().has_changes());
    assert!(list
        .store()
        .fetch::<Task>(&FetchRequest::all())
        .unwrap()
        .is_empty());
}

#[test]
fn failed_commit_is_not_replayed_by_the_next_one() {
    let mut list = task_list();
    reject_inserts(list.store().connection(), "tasks");
    list.create(Some("Buy milk".to_string()));

    list.store()
        .connection()
        .execute_batch("DROP TRIGGER reject_tasks_inserts;")
        .unwrap();
    list.create(Some("Call mom".to_string()));

    assert_eq!(
        titles(list.items()),
        vec![Some("Buy milk".to_string()), Some("Call mom".to_string())]
    );
    assert!(!list.store().has_changes());
    let stored = list.store().fetch::<Task>(&FetchRequest::all()).unwrap();
    assert_eq!(titles(&stored), vec![Some("Call mom".to_string())]);

    list.reload();
    assert_eq!(titles(list.items()), vec![Some("Call mom".to_string())]);
}

#[test]
fn failed_query_keeps_previous_collection() {
    let mut list = task_list();
    list.create(Some("Buy milk".to_string()));
    list.store()
        .connection()
        .execute_batch("ALTER TABLE tasks RENAME TO tasks_moved;")
        .unwrap();

    list.reload();

    assert_eq!(titles(list.items()), vec![Some("Buy milk".to_string())]);
}

#[test]
fn every_mutation_triggers_a_full_render() {
    let mut list = task_list();
    let start = list.view().reloads;

    list.create(Some("a".to_string()));
    list.toggle_done(0).unwrap();
    list.delete(0).unwrap();

    assert_eq!(list.view().reloads, start + 3);
    assert!(list.view().rows.is_empty());
}

#[test]
fn category_list_shares_the_same_controller_behavior() {
    let mut list = CategoryList::new(
        StoreHandle::open_in_memory().unwrap(),
        RecordingView::default(),
    );
    list.reload();
    list.create(Some("Home".to_string()));
    list.create(Some("Work".to_string()));
    list.delete(0).unwrap();

    list.reload();
    assert_eq!(list.row_count(), 1);
    assert_eq!(list.items()[0].name.as_deref(), Some("Work"));
    assert_eq!(list.prompt().title, "New category");
    assert_eq!(list.row(0).unwrap().detail, None);
}

#[test]
fn controllers_on_one_file_share_durable_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todolist.db");

    let mut writer = TaskList::new(StoreHandle::open(&path).unwrap(), RecordingView::default());
    writer.create(Some("Buy milk".to_string()));

    let mut reader = TaskList::new(StoreHandle::open(&path).unwrap(), RecordingView::default());
    reader.reload();
    assert_eq!(titles(reader.items()), vec![Some("Buy milk".to_string())]);
}
