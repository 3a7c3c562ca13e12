use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn write_site(root: &Path) {
    fs::write(
        root.join("properties.json"),
        r#"{
            "characters": {
                "Dent": {
                    "description": "The last hope of a doomed planet",
                    "author": "dna",
                    "type": "protagonist",
                    "tags": ["hero", "reluctant"],
                    "location": "ProtocolW"
                },
                "Marvin": {
                    "description": "A paranoid android",
                    "tags": ["robot"]
                }
            },
            "locations": {
                "ProtocolW": {
                    "description": "A listening post in the void",
                    "tags": ["outpost"],
                    "characters": ["Dent", "Zaphod"],
                    "position": {"x": 30.0, "y": 40.0}
                },
                "Magrathea": {
                    "description": "A planet factory",
                    "characters": ["Marvin"]
                }
            }
        }"#,
    )
    .unwrap();

    fs::create_dir_all(root.join("characters")).unwrap();
    fs::create_dir_all(root.join("locations")).unwrap();
    fs::write(
        root.join("characters/dent.html"),
        "<h1>Dent</h1><p>Mostly harmless.</p>",
    )
    .unwrap();
    fs::write(
        root.join("locations/protocolw.html"),
        "<p>A listening post in the void.</p>",
    )
    .unwrap();
    let long: String = (1..=20)
        .map(|i| format!("<p>Chapter {}</p>", i))
        .collect();
    fs::write(root.join("locations/magrathea.html"), long).unwrap();
    // No page for Marvin: opening him exercises the load-failure path.
}

fn lorebook(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lorebook").unwrap();
    cmd.arg("--root").arg(root);
    cmd
}

#[test]
fn show_home_renders_both_grids() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    lorebook(dir.path())
        .arg("show")
        .arg("home")
        .assert()
        .success()
        .stdout(predicates::str::contains("Characters"))
        .stdout(predicates::str::contains("Locations"))
        .stdout(predicates::str::contains("Dent"))
        .stdout(predicates::str::contains("Magrathea"))
        .stdout(predicates::str::contains("══ Home ══"));
}

#[test]
fn show_map_renders_markers_for_positioned_locations_only() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    lorebook(dir.path())
        .arg("show")
        .arg("map")
        .assert()
        .success()
        .stdout(predicates::str::contains("◉ ProtocolW  (30%, 40%)"))
        .stdout(predicates::str::contains("Magrathea").not());
}

#[test]
fn open_renders_entry_properties_and_content() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    lorebook(dir.path())
        .arg("open")
        .arg("characters/dent.html")
        .assert()
        .success()
        .stdout(predicates::str::contains("Type:    protagonist"))
        .stdout(predicates::str::contains("Author:  dna"))
        .stdout(predicates::str::contains("Tags:    hero, reluctant"))
        .stdout(predicates::str::contains("Mostly harmless."));
}

#[test]
fn open_accepts_unnormalized_entry_names() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    lorebook(dir.path())
        .arg("open")
        .arg("characters/Dent")
        .assert()
        .success()
        .stdout(predicates::str::contains("Mostly harmless."));
}

#[test]
fn open_location_lists_residents_without_dangling_references() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    lorebook(dir.path())
        .arg("open")
        .arg("locations/protocolw.html")
        .assert()
        .success()
        .stdout(predicates::str::contains("Characters here:"))
        .stdout(predicates::str::contains("Dent"))
        .stdout(predicates::str::contains("Zaphod").not());
}

#[test]
fn open_unknown_path_reports_inline_and_stays_calm() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    lorebook(dir.path())
        .arg("open")
        .arg("characters/zaphod.html")
        .assert()
        .success()
        .stdout(predicates::str::contains("File not found"));
}

#[test]
fn open_missing_content_page_reports_load_error() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    lorebook(dir.path())
        .arg("open")
        .arg("characters/marvin.html")
        .assert()
        .success()
        .stdout(predicates::str::contains("Error loading Marvin"));
}

#[test]
fn open_peek_elides_the_middle() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    lorebook(dir.path())
        .arg("open")
        .arg("locations/magrathea.html")
        .arg("--peek")
        .assert()
        .success()
        .stdout(predicates::str::contains("Chapter 1"))
        .stdout(predicates::str::contains("… 14 lines not shown …"))
        .stdout(predicates::str::contains("Chapter 20"));
}

#[test]
fn search_term_filters_and_counts() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    lorebook(dir.path())
        .arg("search")
        .arg("doomed")
        .assert()
        .success()
        .stdout(predicates::str::contains("Dent"))
        .stdout(predicates::str::contains("Marvin").not())
        .stdout(predicates::str::contains("Found: 1 character"));
}

#[test]
fn search_by_location_restricts_characters() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    lorebook(dir.path())
        .arg("search")
        .arg("--location")
        .arg("ProtocolW")
        .assert()
        .success()
        .stdout(predicates::str::contains("Dent"))
        .stdout(predicates::str::contains("Marvin").not())
        .stdout(predicates::str::contains("Found: 1 character, 2 locations"));
}

#[test]
fn search_without_matches_reports_no_results() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    lorebook(dir.path())
        .arg("search")
        .arg("--tag")
        .arg("villain")
        .assert()
        .success()
        .stdout(predicates::str::contains("No results found"));
}

#[test]
fn search_list_filters_prints_options() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    lorebook(dir.path())
        .arg("search")
        .arg("--list-filters")
        .assert()
        .success()
        .stdout(predicates::str::contains("Tags:"))
        .stdout(predicates::str::contains("hero"))
        .stdout(predicates::str::contains("outpost"))
        .stdout(predicates::str::contains("Locations:"))
        .stdout(predicates::str::contains("Magrathea"));
}

#[test]
fn tree_lists_every_entry_with_its_hash() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    lorebook(dir.path())
        .arg("tree")
        .assert()
        .success()
        .stdout(predicates::str::contains("Characters/"))
        .stdout(predicates::str::contains("Locations/"))
        .stdout(predicates::str::contains("#/explorer/characters/dent.html"))
        .stdout(predicates::str::contains("#/explorer/locations/magrathea.html"));
}

#[test]
fn doctor_reports_dangling_reference() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    lorebook(dir.path())
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicates::str::contains("1 inconsistency found:"))
        .stdout(predicates::str::contains("Zaphod"));
}

#[test]
fn doctor_on_clean_dataset() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("properties.json"),
        r#"{"characters": {"Dent": {}}, "locations": {}}"#,
    )
    .unwrap();

    lorebook(dir.path())
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicates::str::contains("No inconsistencies found."));
}

#[test]
fn missing_dataset_is_fatal() {
    let dir = tempfile::tempdir().unwrap();

    lorebook(dir.path())
        .arg("show")
        .arg("home")
        .assert()
        .failure()
        .stderr(predicates::str::contains("Error:"))
        .stderr(predicates::str::contains("try again"));
}

#[test]
fn init_scaffolds_an_empty_site() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("world");

    let mut cmd = Command::cargo_bin("lorebook").unwrap();
    cmd.arg("--root")
        .arg(&root)
        .arg("init")
        .assert()
        .success()
        .stdout(predicates::str::contains("Initialized lorebook site"));

    assert!(root.join("properties.json").is_file());
    assert!(root.join("lorebook.json").is_file());
    assert!(root.join("characters").is_dir());

    // A second init refuses to clobber the dataset.
    let mut cmd = Command::cargo_bin("lorebook").unwrap();
    cmd.arg("--root")
        .arg(&root)
        .arg("init")
        .assert()
        .success()
        .stdout(predicates::str::contains("already exists"));
}

#[test]
fn config_set_and_get_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    lorebook(dir.path())
        .arg("config")
        .arg("dataset-file")
        .arg("world.json")
        .assert()
        .success()
        .stdout(predicates::str::contains("Config updated."));

    lorebook(dir.path())
        .arg("config")
        .arg("dataset-file")
        .assert()
        .success()
        .stdout(predicates::str::contains("dataset-file = world.json"));
}

#[test]
fn browse_session_inits_map_once_and_filters_live() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    lorebook(dir.path())
        .arg("browse")
        .write_stdin("#/map\n#/home\n#/map\nsearch dent\ntag villain\nquit\n")
        .assert()
        .success()
        // The map page activates on every visit...
        .stdout(predicates::str::contains("══ Map ══").count(2))
        // ...but markers initialize exactly once per session.
        .stdout(predicates::str::contains("◉ ProtocolW  (30%, 40%)").count(1))
        .stdout(predicates::str::contains("Found: 1 character"))
        .stdout(predicates::str::contains("No results found"));
}

#[test]
fn browse_deep_link_resolves_on_start() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    lorebook(dir.path())
        .arg("browse")
        .arg("#/explorer/characters/dent.html")
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicates::str::contains("══ Explorer ══"))
        .stdout(predicates::str::contains("Mostly harmless."));
}

#[test]
fn browse_empty_explorer_hash_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    lorebook(dir.path())
        .arg("browse")
        .write_stdin("#/explorer/\nquit\n")
        .assert()
        .success()
        .stdout(predicates::str::contains("File not found").not());
}
