use std::fs;
use std::sync::Arc;

use tempfile::{TempDir, tempdir};

use anchorlink_core::{AnchorLink, LocalVault, SearchSettings, UnitKind};

fn vault_fixture(files: &[(&str, &str)]) -> (TempDir, AnchorLink) {
    let dir = tempdir().expect("tempdir");
    for (path, content) in files {
        let full = dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(full, content).expect("write fixture");
    }
    let vault = Arc::new(LocalVault::new(dir.path()).expect("vault"));
    let engine = AnchorLink::new(vault, SearchSettings::default()).expect("engine");
    (dir, engine)
}

#[test]
fn search_ranks_heading_and_block_matches_across_documents() {
    // Given a corpus where one heading matches fully and one block partially
    // When searching for the two-word query
    // Then the heading ranks first at 1.0 and the block follows below it.
    let (_dir, engine) = vault_fixture(&[
        (
            "guides/ml.md",
            "# Introduction to Machine Learning\n\nA short overview paragraph.",
        ),
        (
            "journal/today.md",
            "Thinking about machine pipelines again.\n\nUnrelated closing thought.",
        ),
    ]);

    let results = engine.search("machine learning", None).expect("results");
    assert!(results.len() >= 2);

    assert_eq!(results[0].unit.kind, UnitKind::Heading);
    assert_eq!(results[0].document.path, "guides/ml.md");
    assert!((results[0].score - 1.0).abs() < f32::EPSILON);
    assert_eq!(results[0].unit.link_target, "Introduction to Machine Learning");

    let block = results
        .iter()
        .find(|r| r.document.path == "journal/today.md")
        .expect("partial block match");
    assert_eq!(block.unit.kind, UnitKind::Block);
    assert!((block.score - 0.5).abs() < f32::EPSILON);
}

#[test]
fn a_large_corpus_is_capped_at_max_results_in_descending_order() {
    // Given 30 matching blocks and the default cap of 25
    // When searching
    // Then exactly 25 results return, all above threshold, sorted descending.
    let files: Vec<(String, String)> = (0..30)
        .map(|i| {
            let filler = if i % 2 == 0 { "" } else { " extra padding words" };
            (
                format!("notes/doc{i:02}.md"),
                format!("machine learning entry number {i:02}{filler}"),
            )
        })
        .collect();
    let borrowed: Vec<(&str, &str)> = files
        .iter()
        .map(|(p, c)| (p.as_str(), c.as_str()))
        .collect();
    let (_dir, engine) = vault_fixture(&borrowed);

    let results = engine.search("machine learning", None).expect("results");
    assert_eq!(results.len(), 25);
    assert!(results.iter().all(|r| r.score >= 0.1));
    assert!(
        results
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score)
    );
}

#[test]
fn duplicated_passages_surface_once_with_their_best_score() {
    // The same text in one document, once under a matching heading context
    // and once alone, must collapse to a single result.
    let (_dir, engine) = vault_fixture(&[(
        "a.md",
        "machine learning checklist\n\nother words entirely\n\nmachine learning checklist",
    )]);

    let results = engine.search("machine learning", None).expect("results");
    let matching: Vec<_> = results
        .iter()
        .filter(|r| r.unit.text == "machine learning checklist")
        .collect();
    assert_eq!(matching.len(), 1);
}

#[test]
fn chosen_block_gains_a_permanent_anchor_and_a_link_path() {
    // Search, pick the block, resolve it twice; the anchor is written once
    // and the composed link path carries it.
    let (dir, engine) = vault_fixture(&[(
        "inbox/idea.md",
        "# Ideas\n\nbuild a machine learning reading list\n\nsomething else",
    )]);

    let mut results = engine.search("machine learning reading", None).expect("results");
    let chosen = results
        .iter_mut()
        .find(|r| r.unit.kind == UnitKind::Block)
        .expect("block result");

    let target = engine.resolve_link_target(chosen).expect("anchor");
    assert!(target.starts_with('^'));

    let on_disk = fs::read_to_string(dir.path().join("inbox/idea.md")).expect("read back");
    assert!(on_disk.contains(&format!("build a machine learning reading list {target}")));
    assert_eq!(on_disk.matches(" ^").count(), 1);

    let second = engine.resolve_link_target(chosen).expect("anchor again");
    assert_eq!(second, target);
    assert_eq!(
        fs::read_to_string(dir.path().join("inbox/idea.md")).expect("read back"),
        on_disk
    );

    let link_path = engine.build_link_path(&chosen.document, &target);
    assert_eq!(link_path, format!("inbox/idea#{target}"));
}

#[test]
fn heading_results_never_touch_the_document_on_resolve() {
    let (dir, engine) = vault_fixture(&[("h.md", "# Machine Learning Notes\n\nbody")]);

    let mut results = engine.search("machine learning notes", None).expect("results");
    let heading = results
        .iter_mut()
        .find(|r| r.unit.kind == UnitKind::Heading)
        .expect("heading result");

    let before = fs::read_to_string(dir.path().join("h.md")).expect("read");
    let target = engine.resolve_link_target(heading).expect("target");
    assert_eq!(target, "Machine Learning Notes");
    assert_eq!(
        fs::read_to_string(dir.path().join("h.md")).expect("read"),
        before
    );
}

#[test]
fn korean_stopwords_are_filtered_alongside_english_ones() {
    // "그리고" is a default stopword; "검색" is not.
    let (_dir, engine) = vault_fixture(&[("ko.md", "검색 엔진 설계 노트")]);

    let results = engine.search("그리고 검색", None).expect("results");
    assert_eq!(results.len(), 1);
    assert!((results[0].score - 1.0).abs() < f32::EPSILON);
}
