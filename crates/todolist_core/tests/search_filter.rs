mod common;

use common::RecordingView;
use todolist_core::{CategoryList, ListConfig, StoreHandle, TaskList};

fn seeded_tasks(config: ListConfig) -> TaskList<RecordingView> {
    let mut list = TaskList::with_config(
        StoreHandle::open_in_memory().unwrap(),
        RecordingView::default(),
        config,
    );
    list.reload();
    for title in ["call the plumber", "Buy milk", "Água para plantas", "Call mom"] {
        list.create(Some(title.to_string()));
    }
    list
}

fn titles(list: &TaskList<RecordingView>) -> Vec<&str> {
    list.items()
        .iter()
        .map(|task| task.title.as_deref().unwrap_or(""))
        .collect()
}

#[test]
fn submit_filters_case_insensitively_in_query_order() {
    let mut list = seeded_tasks(ListConfig::default());

    list.on_search_submit("CALL");

    assert_eq!(titles(&list), vec!["call the plumber", "Call mom"]);
    assert_eq!(list.view().rows.len(), 2);
}

#[test]
fn submit_matches_single_task_scenario() {
    let mut list = TaskList::new(
        StoreHandle::open_in_memory().unwrap(),
        RecordingView::default(),
    );
    list.create(Some("Buy milk".to_string()));
    list.create(Some("Call mom".to_string()));

    list.on_search_submit("call");

    assert_eq!(titles(&list), vec!["Call mom"]);
}

#[test]
fn submit_ignores_diacritics() {
    let mut list = seeded_tasks(ListConfig::default());

    list.on_search_submit("agua");

    assert_eq!(titles(&list), vec!["Água para plantas"]);
}

#[test]
fn submit_without_matches_empties_the_list() {
    let mut list = seeded_tasks(ListConfig::default());

    list.on_search_submit("groceries");

    assert_eq!(list.row_count(), 0);
    assert!(list.view().rows.is_empty());
}

#[test]
fn empty_submit_loads_everything() {
    let mut list = seeded_tasks(ListConfig::default());
    list.on_search_submit("milk");
    assert_eq!(list.row_count(), 1);

    list.on_search_submit("");
    assert_eq!(list.row_count(), 4);
}

#[test]
fn whitespace_submit_matches_titles_containing_it() {
    let mut list = TaskList::new(
        StoreHandle::open_in_memory().unwrap(),
        RecordingView::default(),
    );
    list.reload();
    list.create(Some("Buy milk".to_string()));
    list.create(Some("Call".to_string()));

    list.on_search_submit(" ");

    assert_eq!(titles(&list), vec!["Buy milk"]);
}

#[test]
fn sorted_search_results_are_opt_in() {
    let mut list = seeded_tasks(ListConfig {
        sort_search_results: true,
    });

    list.on_search_submit("l");

    assert_eq!(
        titles(&list),
        vec!["Buy milk", "Call mom", "call the plumber", "Água para plantas"]
    );

    list.on_search_submit("call");
    assert_eq!(titles(&list), vec!["Call mom", "call the plumber"]);
}

#[test]
fn clearing_text_restores_full_list_and_defers_focus_release() {
    let mut list = seeded_tasks(ListConfig::default());
    list.on_search_submit("milk");
    assert_eq!(list.row_count(), 1);

    list.on_search_text_change("");

    assert_eq!(list.row_count(), 4);
    assert_eq!(list.view().rows.len(), 4);
    assert!(list.has_deferred());
    assert_eq!(list.view().focus_resigned, 0);

    assert_eq!(list.run_deferred(), 1);
    assert_eq!(list.view().focus_resigned, 1);
    assert!(!list.has_deferred());
}

#[test]
fn typing_does_not_filter_but_still_renders() {
    let mut list = seeded_tasks(ListConfig::default());
    let reloads = list.view().reloads;

    list.on_search_text_change("mi");

    assert_eq!(list.row_count(), 4);
    assert_eq!(list.view().reloads, reloads + 1);
    assert!(!list.has_deferred());
}

#[test]
fn rows_created_during_a_filter_stay_until_reset() {
    let mut list = seeded_tasks(ListConfig::default());
    list.on_search_submit("milk");

    list.create(Some("Walk dog".to_string()));
    assert_eq!(titles(&list), vec!["Buy milk", "Walk dog"]);

    list.on_search_text_change("");
    assert_eq!(list.row_count(), 5);
}

#[test]
fn category_search_uses_names() {
    let mut list = CategoryList::new(
        StoreHandle::open_in_memory().unwrap(),
        RecordingView::default(),
    );
    list.create(Some("Home".to_string()));
    list.create(Some("Work".to_string()));
    list.create(None);

    list.on_search_submit("OR");

    assert_eq!(list.row_count(), 1);
    assert_eq!(list.items()[0].name.as_deref(), Some("Work"));
}
