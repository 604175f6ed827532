mod common;

use common::{Fixture, OFFICIAL};
use shellpack_store::api;

#[test]
fn install_reports() {
    let fx = Fixture::new();
    fx.remote
        .put(OFFICIAL, "editor/main.py", "e")
        .put(OFFICIAL, "half/main.py", "m")
        .put(OFFICIAL, "half/extra.py", "x")
        .fail_file(OFFICIAL, "half/extra.py");

    let r = api::install(&fx.store, "editor");
    assert!(r.ok);
    assert!(r.message.contains(OFFICIAL));

    let r = api::install(&fx.store, "editor");
    assert!(!r.ok);
    assert!(r.message.contains("already installed"));

    let r = api::install(&fx.store, "half");
    assert!(r.ok);
    assert!(r.message.contains("1 errors"));

    let r = api::install(&fx.store, "ghost");
    assert!(!r.ok);
    assert!(r.message.contains("not found"));
}

#[test]
fn install_many_summarizes() {
    let fx = Fixture::new();
    fx.remote
        .put(OFFICIAL, "a/main.py", "a")
        .put(OFFICIAL, "b/main.py", "b");

    let names = vec!["a".to_string(), "ghost".to_string(), "b".to_string()];
    let (reports, summary) = api::install_many(&fx.store, &names);
    let oks: Vec<bool> = reports.iter().map(|r| r.ok).collect();
    assert_eq!(oks, vec![true, false, true]);
    assert!(!summary.ok);
    assert!(summary.message.contains("2 of 3"));
    assert!(fx.pkg("a").is_dir() && fx.pkg("b").is_dir());
}

#[test]
fn uninstall_and_validity_reports() {
    let fx = Fixture::new();
    fx.remote.put(OFFICIAL, "game/main.py", "g");

    assert!(!api::uninstall(&fx.store, "game").ok);
    assert!(!api::is_valid(&fx.store, "game").ok);

    assert!(api::install(&fx.store, "game").ok);
    assert!(api::is_valid(&fx.store, "game").ok);
    assert!(api::uninstall(&fx.store, "game").ok);
    assert!(!api::is_valid(&fx.store, "game").ok);
}

#[test]
fn source_reports() {
    let fx = Fixture::new();
    fx.remote.empty_repo("alice/tools");

    assert!(api::add_source(&fx.store, "alice/tools").ok);
    assert!(!api::add_source(&fx.store, "alice/tools").ok);
    let r = api::remove_source(&fx.store, OFFICIAL);
    assert!(!r.ok);
    assert!(r.message.contains("official"));
    assert!(api::remove_source(&fx.store, "alice/tools").ok);
}

#[test]
fn info_and_version_reports() {
    let fx = Fixture::new();
    fx.remote.put(OFFICIAL, "editor/main.py", "e").put(
        OFFICIAL,
        "editor/description.txt",
        "[description]\nText tool\n[version]\n1.4\n[requirements]\nrich\n",
    );

    let r = api::describe(&fx.store, "editor");
    assert!(r.ok);
    assert!(r.message.contains(OFFICIAL));
    assert!(r.message.contains("rich"));

    let r = api::version(&fx.store, "editor");
    assert!(r.ok);
    assert!(r.message.contains("available") && r.message.contains("1.4"));

    api::install(&fx.store, "editor");
    let r = api::version(&fx.store, "editor");
    assert!(r.message.contains("installed"));

    assert!(!api::version(&fx.store, "ghost").ok);
}
