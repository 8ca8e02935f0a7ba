use std::fs;
use std::path::Path;

use rusqlite::Connection;
use scriptwatch::scan::{self, source::SqliteSource, targets::default_targets};
use scriptwatch::store::{check_against_baseline, save_baseline, BaselineFile};
use tempfile::TempDir;

fn create_shop_db(path: &Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE core_config_data (config_id INTEGER PRIMARY KEY, path TEXT, value TEXT);
         CREATE TABLE cms_block (block_id INTEGER PRIMARY KEY, content TEXT);
         CREATE TABLE cms_page (page_id INTEGER PRIMARY KEY, content TEXT, layout_update_xml TEXT);

         INSERT INTO core_config_data VALUES
            (1, 'design/head/includes', '<script src=\"https://cdn.example.com/analytics.js\"></script>'),
            (2, 'general/store/name', 'Example Store');
         INSERT INTO cms_block VALUES
            (10, '<div>footer</div><script>track();</script><script>track();</script>'),
            (11, '<p>no scripts here</p>');
         INSERT INTO cms_page VALUES
            (20, '<h1>Home</h1>', NULL),
            (21, '<SCRIPT type=\"text/javascript\">\nwindow.x = 1;\n</SCRIPT>', '<referenceContainer/>');",
    )
    .unwrap();
}

fn scan_db(path: &Path) -> scriptwatch::snapshot::Snapshot {
    let source = SqliteSource::open(path).unwrap();
    scan::run(&source, &default_targets()).unwrap().snapshot
}

fn exec(path: &Path, sql: &str) {
    Connection::open(path).unwrap().execute_batch(sql).unwrap();
}

#[test]
fn baseline_then_unchanged_database_has_no_alerts() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("shop.sqlite");
    create_shop_db(&db);
    let store = BaselineFile::new(dir.path().join("scan").join("status.json"));

    let snapshot = scan_db(&db);
    assert_eq!(snapshot.fingerprint_count(), 4);
    save_baseline(&store, &snapshot).unwrap();

    let result = check_against_baseline(&store, &scan_db(&db)).unwrap();
    assert!(result.alerts.is_empty());
}

#[test]
fn injected_and_removed_scripts_are_reported() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("shop.sqlite");
    create_shop_db(&db);
    let store = BaselineFile::new(dir.path().join("status.json"));
    save_baseline(&store, &scan_db(&db)).unwrap();
    let saved = fs::read(store.path()).unwrap();

    exec(
        &db,
        "UPDATE cms_block SET content = '<div>footer</div><script>track();</script>' WHERE block_id = 10;
         UPDATE cms_page SET layout_update_xml = '<script>skim(document.forms)</script>' WHERE page_id = 20;",
    );

    let result = check_against_baseline(&store, &scan_db(&db)).unwrap();
    let lines: Vec<String> = result.alerts.iter().map(|a| a.to_string()).collect();

    assert_eq!(
        lines,
        vec![
            "Table:'cms_block', Record:'10', Column:'content'",
            "Table:'cms_page', Record:'20', Column:'layout_update_xml'",
        ]
    );
    assert_eq!(fs::read(store.path()).unwrap(), saved);
}

#[test]
fn resetting_baseline_accepts_current_state() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("shop.sqlite");
    create_shop_db(&db);
    let store = BaselineFile::new(dir.path().join("status.json"));
    save_baseline(&store, &scan_db(&db)).unwrap();

    exec(&db, "DELETE FROM core_config_data WHERE config_id = 1;");
    assert_eq!(check_against_baseline(&store, &scan_db(&db)).unwrap().alerts.len(), 1);

    save_baseline(&store, &scan_db(&db)).unwrap();
    assert!(check_against_baseline(&store, &scan_db(&db)).unwrap().alerts.is_empty());
}

#[test]
fn missing_database_fails_to_open() {
    let dir = TempDir::new().unwrap();
    assert!(SqliteSource::open(&dir.path().join("absent.sqlite")).is_err());
}
