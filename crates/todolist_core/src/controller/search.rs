//! Search bar handling for list controllers.
//!
//! Filtering is explicit: submitting runs a filtered fetch, clearing the text
//! restores the full list. Typing alone never filters.

use super::list::{DeferredUi, ListController};
use super::view::{ListView, Presentable};
use crate::store::{FetchRequest, Record, SortOrder};
use log::debug;

impl<E: Record + Presentable, V: ListView> ListController<E, V> {
    /// Loads rows whose label contains `text`, ignoring case and accents.
    ///
    /// Empty text loads the unfiltered list; any other text, whitespace
    /// included, is matched as typed.
    pub fn on_search_submit(&mut self, text: &str) {
        let request = if text.is_empty() {
            self.base_request()
        } else {
            FetchRequest::label_contains(text).in_category(self.scope)
        };
        let sort = self
            .config
            .sort_search_results
            .then_some(SortOrder::LabelAscending);

        debug!(
            "event=search_submit module=controller status=start kind={} sorted={}",
            E::KIND.as_str(),
            sort.is_some()
        );
        self.load(&request.sorted(sort));
    }

    /// Reacts to edits in the search field.
    ///
    /// Empty text reloads the unfiltered list and queues focus resignation
    /// for [`ListController::run_deferred`]. The list is re-rendered either way.
    pub fn on_search_text_change(&mut self, text: &str) {
        if text.is_empty() {
            let request = self.base_request();
            self.replace_items(&request);
            self.deferred.push_back(DeferredUi::ResignSearchFocus);
        }
        self.render();
    }
}
