use gate_core::catalog::{Catalog, GateType};
use gate_core::customer::CustomerDetails;
use gate_core::gate::{Selection, Sides};
use gate_core::ids::ProductId;
use gate_store::{CustomerStore, JsonFileStore, QuoteSession, StoreError};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tempfile::TempDir;

fn open(dir: &TempDir) -> QuoteSession<JsonFileStore> {
    open_at(&dir.path().join("data").join("customers.json"))
}

fn open_at(path: &Path) -> QuoteSession<JsonFileStore> {
    QuoteSession::open(JsonFileStore::new(path), Catalog::builtin())
}

#[test]
fn test_saved_gate_reprices_identically_after_reload() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir);

    let customer_id = session
        .add_customer(CustomerDetails {
            name: "Hofer".into(),
            email: "hofer@example.at".into(),
            ..Default::default()
        })
        .unwrap();
    session.select_customer(&customer_id).unwrap();
    session.start_new_gate(GateType::SlidingDoors);
    session
        .update_dimensions(400.0, 250.0, 50.0, Instant::now())
        .unwrap();
    session
        .modify_gate(|g| {
            g.set_surcharge(10.0);
            g.select(Selection::new(ProductId(55), 1.0, Sides::Double))?;
            g.select(Selection::new(ProductId(70), 1.0, Sides::Double))?;
            g.select(Selection::new(ProductId(84), 2.5, Sides::Single))?;
            g.select(Selection::new(ProductId(220), 4.0, Sides::Single))
        })
        .unwrap();
    let gate_id = session.save_current_gate().unwrap();
    let saved = session
        .current_customer()
        .unwrap()
        .get_gate(&gate_id)
        .unwrap()
        .clone();

    let reopened = open(&dir);
    let customer = reopened.customer(&customer_id).unwrap();
    let reloaded = customer.get_gate(&gate_id).unwrap();
    assert_eq!(reloaded, &saved);

    let before = reopened.catalog().quote(&saved);
    let after = reopened.catalog().quote(reloaded);
    assert_eq!(before, after);
    assert_eq!(after.totals(), reloaded.totals);
}

#[test]
fn test_atomic_save_leaves_no_temp_file() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir);
    session.add_customer(CustomerDetails::new("Hofer")).unwrap();

    let entries: Vec<_> = fs::read_dir(dir.path().join("data"))
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(entries, vec!["customers.json".to_string()]);
    assert!(session.store().size_bytes() > 0);
    assert!(session.store().is_available());
}

#[test]
fn test_corrupt_file_opens_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("customers.json");
    fs::write(&path, "{ not json").unwrap();

    let store = JsonFileStore::new(&path);
    assert!(matches!(store.load(), Err(StoreError::Serialization(_))));

    let mut session = QuoteSession::open(store, Catalog::builtin());
    assert!(session.customers().is_empty());

    let backup = dir.path().join("customers.json.bak");
    assert_eq!(fs::read_to_string(&backup).unwrap(), "{ not json");

    session.add_customer(CustomerDetails::new("Hofer")).unwrap();
    assert_eq!(fs::read_to_string(&backup).unwrap(), "{ not json");
    assert_eq!(open_at(&path).customers().len(), 1);
}

#[test]
fn test_missing_file_keeps_no_backup() {
    let dir = TempDir::new().unwrap();
    let session = open(&dir);
    assert!(session.customers().is_empty());
    assert!(!dir.path().join("data").join("customers.json.bak").exists());
}

#[test]
fn test_reads_legacy_export() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("legacy.json");
    fs::write(
        &path,
        r#"[{
            "id": "customer_1700000000000_k3j4h5g6f",
            "name": "Hofer",
            "company": "Hofer Landtechnik",
            "address": "", "city": "", "phone": "", "email": "",
            "gates": [{
                "id": "gate_1700000000001_abcdefghi",
                "name": "Stall",
                "gateType": "Flügeltore und Falttore",
                "breite": 420, "hoehe": 250, "glashoehe": 0,
                "aufschlag": 0,
                "selectedProducts": [{"id": 14, "quantity": 1, "sides": "einseitig"}],
                "createdAt": "2024-05-01T08:00:00.000Z",
                "updatedAt": "2024-05-01T08:00:00.000Z"
            }],
            "createdAt": "2024-05-01T08:00:00.000Z",
            "updatedAt": "2024-05-01T08:00:00.000Z"
        }]"#,
    )
    .unwrap();

    let session = QuoteSession::open(JsonFileStore::new(&path), Catalog::builtin());
    let gate = &session.customers()[0].gates[0];
    let quote = session.catalog().quote(gate);
    assert!((quote.subtotal - 185.0 * 10.5).abs() < 1e-9);
}

#[test]
fn test_clear_removes_file() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir);
    session.add_customer(CustomerDetails::new("Hofer")).unwrap();
    session.clear_all().unwrap();

    assert!(!dir.path().join("data").join("customers.json").exists());
    assert!(open(&dir).customers().is_empty());
}
