mod common;

use common::{Fixture, OFFICIAL};
use shellpack_store::catalog::{browse, describe, installed, search};
use shellpack_store::{install, sources, Origin};
use std::path::PathBuf;

fn seed(fx: &Fixture) {
    fx.remote
        .put(OFFICIAL, "editor/main.py", "e")
        .put(
            OFFICIAL,
            "editor/description.txt",
            "[description]\nText tool\n[author]\nAda\n[version]\n1.4\n",
        )
        .put(OFFICIAL, "notes/main.py", "n")
        .put(
            OFFICIAL,
            "notes/description.txt",
            "[description]\nA tiny EDITOR for notes\n",
        )
        .put(OFFICIAL, "calc/main.py", "c")
        .put(OFFICIAL, ".github/workflow.yml", "ci");
}

#[test]
fn installed_lists_packages_with_their_files() {
    let fx = Fixture::new();
    seed(&fx);
    assert!(installed(&fx.store).unwrap().is_empty());

    install(&fx.store, "notes").unwrap();
    install(&fx.store, "calc").unwrap();

    let pkgs = installed(&fx.store).unwrap();
    let names: Vec<&str> = pkgs.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["calc", "notes"]);
    assert!(pkgs[0].descriptor.is_none());
    assert_eq!(
        pkgs[1].files,
        vec![PathBuf::from("description.txt"), PathBuf::from("main.py")]
    );
}

#[test]
fn describe_prefers_the_local_copy() {
    let fx = Fixture::new();
    seed(&fx);

    let (remote, origin) = describe(&fx.store, "editor").unwrap().unwrap();
    assert_eq!(origin, Origin::Remote(OFFICIAL.to_string()));
    assert_eq!(remote.author, "Ada");

    install(&fx.store, "editor").unwrap();
    fx.remote.put(
        OFFICIAL,
        "editor/description.txt",
        "[version]\n9.9\n",
    );
    let (local, origin) = describe(&fx.store, "editor").unwrap().unwrap();
    assert_eq!(origin, Origin::Installed);
    assert_eq!(local.version, "1.4");

    assert!(describe(&fx.store, "calc").unwrap().is_none());
}

#[test]
fn browse_marks_installed_packages() {
    let fx = Fixture::new();
    seed(&fx);
    install(&fx.store, "calc").unwrap();

    let rows = browse(&fx.store, OFFICIAL).unwrap();
    let summary: Vec<(&str, bool)> = rows
        .iter()
        .map(|r| (r.name.as_str(), r.installed))
        .collect();
    assert_eq!(
        summary,
        vec![("calc", true), ("editor", false), ("notes", false)]
    );
    assert!(browse(&fx.store, "ghost/repo").is_err());
}

#[test]
fn search_matches_names_before_descriptions() {
    let fx = Fixture::new();
    seed(&fx);
    fx.remote.empty_repo("bob/b");
    sources::add_source(&fx.store, "bob/b").unwrap();
    fx.remote
        .put("bob/b", "editor/main.py", "other editor")
        .put("bob/b", "edit-plus/main.py", "x");

    let hits = search(&fx.store, "Edit");
    let found: Vec<(&str, &str)> = hits
        .iter()
        .map(|h| (h.name.as_str(), h.source.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            ("editor", OFFICIAL),
            ("notes", OFFICIAL),
            ("edit-plus", "bob/b"),
        ]
    );
    assert!(search(&fx.store, "zzz").is_empty());
}

#[test]
fn unreachable_source_is_skipped_by_search() {
    let fx = Fixture::new();
    seed(&fx);
    fx.remote.empty_repo("bob/b");
    sources::add_source(&fx.store, "bob/b").unwrap();
    fx.remote.break_source("bob/b");

    let hits = search(&fx.store, "calc");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "calc");
}
