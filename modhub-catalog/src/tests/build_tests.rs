use std::cell::RefCell;
use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use modhub_core::Owner;
use modhub_fetch::memory::MemoryFetcher;

use super::*;

const RAW: &str = "https://raw.example.com";

fn config() -> HarvestConfig {
    HarvestConfig {
        raw_url: RAW.to_string(),
        ..Default::default()
    }
}

fn hit(full_name: &str, stars: u64) -> SearchHit {
    SearchHit {
        full_name: full_name.to_string(),
        name: None,
        default_branch: "main".to_string(),
        stargazers_count: stars,
        pushed_at: Some("2024-01-01T00:00:00Z".to_string()),
        language: Some("Java".to_string()),
        owner: Owner {
            login: full_name.split('/').next().unwrap().to_string(),
        },
    }
}

fn url(full_name: &str, path: &str) -> String {
    format!("{RAW}/{full_name}/main/{path}")
}

fn png() -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    RgbaImage::from_pixel(128, 96, Rgba([9, 9, 9, 255]))
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

fn meta(version: &str) -> String {
    format!(r#"{{"name": "m", "displayName": "Mod", "minGameVersion": "{version}"}}"#)
}

fn no_progress(_: BuildProgress) {}

#[test]
fn test_missing_metadata_skipped() {
    let fetch = MemoryFetcher::new();
    let config = config();
    let dir = tempfile::tempdir().unwrap();
    let builder = CatalogBuilder::new(&fetch, &config, dir.path());

    let outcome = builder.process(&hit("a/mod", 10), &no_progress);
    assert!(matches!(
        outcome,
        Outcome::Skipped {
            reason: SkipReason::NoMetadata,
            icon: None,
        }
    ));
    // No icon lookups for a candidate without metadata
    assert!(!fetch.was_requested(&url("a/mod", "icon.png")));
}

#[test]
fn test_compatibility_floor() {
    let config = config();
    let dir = tempfile::tempdir().unwrap();

    for (version, accepted) in [("104", false), ("105", true), ("105.1", true), ("99.9", false)] {
        let mut fetch = MemoryFetcher::new();
        fetch.respond(url("a/mod", "mod.json"), meta(version));
        let builder = CatalogBuilder::new(&fetch, &config, dir.path());
        let outcome = builder.process(&hit("a/mod", 0), &no_progress);
        assert_eq!(
            matches!(outcome, Outcome::Accepted { .. }),
            accepted,
            "minGameVersion {version}"
        );
    }
}

#[test]
fn test_missing_version_is_legacy() {
    let mut fetch = MemoryFetcher::new();
    fetch.respond(url("a/mod", "mod.json"), r#"{"name": "m"}"#);
    let config = config();
    let dir = tempfile::tempdir().unwrap();
    let builder = CatalogBuilder::new(&fetch, &config, dir.path());

    match builder.process(&hit("a/mod", 0), &no_progress) {
        Outcome::Skipped {
            reason: SkipReason::Incompatible { min_game_version },
            ..
        } => {
            assert_eq!(min_game_version, "104");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_icon_resolved_before_compatibility_check() {
    let mut fetch = MemoryFetcher::new();
    fetch
        .respond(url("a/mod", "mod.json"), meta("104"))
        .respond(url("a/mod", "icon.png"), png());
    let config = config();
    let dir = tempfile::tempdir().unwrap();
    let builder = CatalogBuilder::new(&fetch, &config, dir.path());

    let outcome = builder.process(&hit("a/mod", 5), &no_progress);
    let expected = dir.path().join("a_mod.png");
    match outcome {
        Outcome::Skipped {
            reason: SkipReason::Incompatible { min_game_version },
            icon: Some(IconOutcome::Written(path)),
        } => {
            assert_eq!(min_game_version, "104");
            assert_eq!(path, expected);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(
        fetch.requests(),
        vec![url("a/mod", "mod.json"), url("a/mod", "icon.png")]
    );
}

#[test]
fn test_incompatible_icon_counted() {
    let mut fetch = MemoryFetcher::new();
    fetch
        .respond(url("a/old", "mod.json"), meta("104"))
        .respond(url("a/old", "icon.png"), png());
    let config = config();
    let dir = tempfile::tempdir().unwrap();
    let builder = CatalogBuilder::new(&fetch, &config, dir.path());

    let build = builder.build(&[hit("a/old", 5)], &no_progress);
    assert!(build.entries.is_empty());
    assert_eq!(build.stats.incompatible, 1);
    assert_eq!(build.stats.icons_written, 1);
}

#[test]
fn test_icon_gate_one_star() {
    let mut fetch = MemoryFetcher::new();
    fetch
        .respond(url("a/mod", "mod.json"), meta("126"))
        .respond(url("a/mod", "icon.png"), png());
    let config = config();
    let dir = tempfile::tempdir().unwrap();
    let builder = CatalogBuilder::new(&fetch, &config, dir.path());

    let outcome = builder.process(&hit("a/mod", 1), &no_progress);
    assert!(matches!(
        outcome,
        Outcome::Accepted {
            icon: IconOutcome::Gated,
            ..
        }
    ));
    assert!(!fetch.was_requested(&url("a/mod", "icon.png")));
    assert!(!dir.path().join("a_mod.png").exists());
}

#[test]
fn test_icon_gate_two_stars() {
    let mut fetch = MemoryFetcher::new();
    fetch
        .respond(url("a/mod", "mod.json"), meta("126"))
        .respond(url("a/mod", "icon.png"), png());
    let config = config();
    let dir = tempfile::tempdir().unwrap();
    let builder = CatalogBuilder::new(&fetch, &config, dir.path());

    let outcome = builder.process(&hit("a/mod", 2), &no_progress);
    let expected = dir.path().join("a_mod.png");
    match outcome {
        Outcome::Accepted {
            icon: IconOutcome::Written(path),
            ..
        } => assert_eq!(path, expected),
        other => panic!("unexpected outcome: {other:?}"),
    }

    let written = image::open(&expected).unwrap();
    assert_eq!((written.width(), written.height()), (64, 64));
}

#[test]
fn test_missing_icon_keeps_entry() {
    let mut fetch = MemoryFetcher::new();
    fetch
        .respond(url("a/mod", "mod.json"), meta("126"))
        .respond(url("a/mod", "icon.png"), "not an image");
    let config = config();
    let dir = tempfile::tempdir().unwrap();
    let builder = CatalogBuilder::new(&fetch, &config, dir.path());

    let outcome = builder.process(&hit("a/mod", 50), &no_progress);
    assert!(matches!(
        outcome,
        Outcome::Accepted {
            icon: IconOutcome::NotFound,
            ..
        }
    ));
    assert!(fetch.was_requested(&url("a/mod", "assets/icon.png")));
}

#[test]
fn test_unwritable_icon_dir_keeps_entry() {
    let mut fetch = MemoryFetcher::new();
    fetch
        .respond(url("a/mod", "mod.json"), meta("126"))
        .respond(url("a/mod", "icon.png"), png());
    let config = config();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let builder = CatalogBuilder::new(&fetch, &config, &missing);

    let outcome = builder.process(&hit("a/mod", 5), &no_progress);
    assert!(matches!(
        outcome,
        Outcome::Accepted {
            icon: IconOutcome::WriteFailed,
            ..
        }
    ));
}

#[test]
fn test_build_isolates_candidates() {
    let mut fetch = MemoryFetcher::new();
    fetch
        .respond(url("a/first", "mod.json"), meta("126"))
        .fail(url("b/broken", "mod.json"), "connection reset")
        .respond(url("b/broken", "mod.hjson"), "{{{{")
        .respond(url("c/old", "mod.json"), meta("104"))
        .respond(url("d/last", "assets/mod.hjson"), "{\n  minGameVersion: 146\n}\n")
        .respond(url("d/last", "icon.png"), png());
    let config = config();
    let dir = tempfile::tempdir().unwrap();
    let builder = CatalogBuilder::new(&fetch, &config, dir.path());

    let candidates = vec![
        hit("a/first", 0),
        hit("b/broken", 10),
        hit("c/old", 10),
        hit("d/last", 3),
    ];
    let events = RefCell::new(Vec::new());
    let build = builder.build(&candidates, &|p| events.borrow_mut().push(p));

    let repos: Vec<_> = build.entries.iter().map(|e| e.repo.as_str()).collect();
    assert_eq!(repos, vec!["a/first", "d/last"]);
    assert_eq!(
        build.stats,
        BuildStats {
            processed: 4,
            accepted: 2,
            missing_metadata: 1,
            incompatible: 1,
            icons_written: 1,
            icon_write_failures: 0,
        }
    );

    let events = events.into_inner();
    assert!(matches!(events.first(), Some(BuildProgress::Started { total: 4 })));
    assert!(matches!(events.last(), Some(BuildProgress::Done { accepted: 2 })));
    assert!(events.iter().any(|e| matches!(
        e,
        BuildProgress::IconFound {
            width: 128,
            height: 96,
            ..
        }
    )));
}

#[test]
fn test_build_empty() {
    let fetch = MemoryFetcher::new();
    let config = config();
    let dir = tempfile::tempdir().unwrap();
    let build = CatalogBuilder::new(&fetch, &config, dir.path()).build(&[], &no_progress);
    assert!(build.entries.is_empty());
    assert_eq!(build.stats, BuildStats::default());
}
