use todolist_core::{ListView, RowContent};

/// View that records every full reload it receives.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub reloads: usize,
    pub rows: Vec<RowContent>,
    pub focus_resigned: usize,
}

#[allow(dead_code)]
impl RecordingView {
    pub fn texts(&self) -> Vec<Option<String>> {
        self.rows.iter().map(|row| row.text.clone()).collect()
    }
}

impl ListView for RecordingView {
    fn reload_data(&mut self, rows: &[RowContent]) {
        self.reloads += 1;
        self.rows = rows.to_vec();
    }

    fn resign_search_focus(&mut self) {
        self.focus_resigned += 1;
    }
}

/// Makes every insert into `table` fail at commit time.
#[allow(dead_code)]
pub fn reject_inserts(conn: &rusqlite::Connection, table: &str) {
    conn.execute_batch(&format!(
        "CREATE TRIGGER reject_{table}_inserts BEFORE INSERT ON {table}
         BEGIN SELECT RAISE(ABORT, 'simulated store failure'); END;"
    ))
    .unwrap();
}
