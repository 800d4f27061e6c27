//! Full runs against a JSON file on disk.

use std::fs;

use hostel_merge::{JsonFileStore, MergeConfig, MergeEngine};
use serde_json::{json, Value};

fn write_store(path: &std::path::Path) {
    let data = json!({
        "hostels": {
            "h1": {
                "name": "Sunrise",
                "warden": "Okafor",
                "floors": [{ "rooms": [
                    { "id": "h1-101", "number": "101", "capacity": 4,
                      "occupants": ["s1", "s2"], "isAvailable": true },
                    { "id": "h1-102", "number": "102", "capacity": 2,
                      "occupants": ["s3"], "isAvailable": true }
                ]}]
            },
            "h2": {
                "name": "Sunrise",
                "floors": [{ "rooms": [
                    { "id": "h2-101", "number": "101", "capacity": 4,
                      "occupants": ["s4"], "isAvailable": true },
                    { "id": "h2-102", "number": "102", "capacity": 2,
                      "occupants": ["s5", "s6"], "isAvailable": false }
                ]}]
            },
            "h3": {
                "name": "Sunrise",
                "floors": [{ "rooms": [
                    { "id": "h3-101", "number": "101", "capacity": 4,
                      "occupants": ["s7"], "isAvailable": true }
                ]}]
            }
        },
        "roomAllocations": {
            "a4": { "studentRegNumber": "s4", "hostelId": "h2", "roomId": "h2-101" },
            "a5": { "studentRegNumber": "s5", "hostelId": "h2", "roomId": "h2-102" },
            "a7": { "studentRegNumber": "s7", "hostelId": "h3", "roomId": "h3-101", "term": "spring" },
            "a9": { "studentRegNumber": "ghost", "hostelId": "h3", "roomId": "h3-101" }
        }
    });
    fs::write(path, serde_json::to_vec_pretty(&data).unwrap()).unwrap();
}

fn read_store(path: &std::path::Path) -> Value {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

#[test]
fn run_persists_merge_and_repairs_allocations() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    write_store(&path);

    let engine = MergeEngine::new(JsonFileStore::open(&path).unwrap(), MergeConfig::default());
    let report = engine.run().unwrap();

    assert!(report.committed);
    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].merge.primary.as_str(), "h1");
    // h2 room 102 overflows (1 + 2 > 2); h3 fits entirely.
    assert_eq!(report.completely_merged, 1);
    assert_eq!(report.partially_merged, 1);
    assert_eq!(report.conflicts, 1);

    let on_disk = read_store(&path);
    let hostels = on_disk["hostels"].as_object().unwrap();
    assert!(hostels.contains_key("h1"));
    assert!(hostels.contains_key("h2"));
    assert!(!hostels.contains_key("h3"));

    let h1 = &hostels["h1"];
    assert_eq!(h1["warden"], json!("Okafor"), "unmodeled fields survive");
    assert_eq!(h1["floors"][0]["rooms"][0]["occupants"], json!(["s1", "s2", "s4", "s7"]));
    assert_eq!(h1["floors"][0]["rooms"][0]["isAvailable"], json!(false));
    assert!(h1.get("occupant_count").is_none());

    let h2 = &hostels["h2"];
    assert_eq!(h2["floors"][0]["rooms"][0]["occupants"], json!([]));
    assert_eq!(h2["floors"][0]["rooms"][1]["occupants"], json!(["s5", "s6"]));

    let allocations = &on_disk["roomAllocations"];
    assert_eq!(allocations["a7"]["hostelId"], json!("h1"));
    assert_eq!(allocations["a7"]["term"], json!("spring"));
    assert_eq!(allocations["a9"]["hostelId"], json!("h1"), "redirected, then kept");
    // s4 moved to h1; validation corrects the stale h2 allocation.
    assert_eq!(allocations["a4"]["hostelId"], json!("h1"));
    assert_eq!(allocations["a4"]["roomId"], json!("h1-101"));
    assert_eq!(allocations["a5"]["hostelId"], json!("h2"));

    let validation = report.validation.unwrap();
    assert_eq!(validation.total, 4);
    assert_eq!(validation.fixed, 1);
    assert_eq!(validation.errors, 0);
}

#[test]
fn rerun_after_merge_changes_nothing_more() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    write_store(&path);

    MergeEngine::new(JsonFileStore::open(&path).unwrap(), MergeConfig::default())
        .run()
        .unwrap();
    let after_first = read_store(&path);

    let engine = MergeEngine::new(JsonFileStore::open(&path).unwrap(), MergeConfig::default());
    let second = engine.validate().unwrap();
    assert_eq!(second.fixed, 0);
    assert_eq!(second.invalid, 0);
    assert_eq!(read_store(&path)["roomAllocations"], after_first["roomAllocations"]);
}

#[test]
fn dry_run_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    write_store(&path);
    let before = fs::read(&path).unwrap();

    let engine = MergeEngine::new(JsonFileStore::open(&path).unwrap(), MergeConfig::dry_run());
    let report = engine.run().unwrap();

    assert!(!report.committed);
    assert_eq!(report.queued_deletes, 1);
    assert_eq!(fs::read(&path).unwrap(), before);
}
