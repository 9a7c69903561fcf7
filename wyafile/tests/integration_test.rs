use anyhow::Result;
use std::collections::HashSet;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};
use wyafile::{
    search, Corpus, IndexConfig, Indexer, MatchOrder, ScanCoordinator, SearchEngine,
    SearchRequest,
};

fn create_test_files(dir: &TempDir, files: &[(&str, &str)]) -> Result<()> {
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    }
    Ok(())
}

fn file_names(paths: &[PathBuf]) -> HashSet<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

fn config(threads: usize) -> IndexConfig {
    IndexConfig {
        thread_count: NonZeroUsize::new(threads).unwrap(),
        ..IndexConfig::default()
    }
}

#[test]
fn test_hello_scenario() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        &dir,
        &[
            ("a.txt", "hello world"),
            ("b.txt", "Hello there"),
            ("c.md", "hello"),
            (".git/d.txt", "hello"),
        ],
    )?;

    let request = SearchRequest::new(vec![dir.path().to_path_buf()], "hello");
    let outcome = search(&config(4), &request);

    assert_eq!(
        file_names(&outcome.matches),
        HashSet::from(["a.txt".to_string(), "b.txt".to_string()])
    );
    assert_eq!(outcome.matches.len(), 2);
    assert_eq!(outcome.files_indexed, 2);
    Ok(())
}

#[test]
fn test_depth_limit() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        &dir,
        &[
            ("d0.txt", "zero"),
            ("1/d1.txt", "one"),
            ("1/2/d2.txt", "two"),
            ("1/2/3/d3.txt", "three"),
            ("1/2/3/4/d4.txt", "four"),
            ("1/2/3/4/5/d5.txt", "five"),
            ("1/2/3/4/5/6/d6.txt", "six"),
        ],
    )?;

    let corpus = Indexer::default().scan(dir.path());
    let names: HashSet<_> = corpus
        .paths()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        ["d0.txt", "d1.txt", "d2.txt", "d3.txt", "d4.txt"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    );
    Ok(())
}

#[test]
fn test_skip_rules_cover_whole_subtree() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        &dir,
        &[
            ("keep/a.txt", "visible"),
            (".git/objects/b.txt", "hidden"),
            ("node_modules/pkg/c.txt", "hidden"),
            ("deep/__pycache__/d.txt", "hidden"),
        ],
    )?;

    let corpus = Indexer::default().scan(dir.path());
    assert_eq!(corpus.len(), 1);
    assert!(corpus.paths().all(|p| p.ends_with("keep/a.txt")));
    Ok(())
}

#[test]
fn test_size_and_extension_limits() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("big.txt"), "x".repeat(1_048_577))?;
    fs::write(dir.path().join("limit.txt"), "x".repeat(1_048_576))?;
    fs::write(dir.path().join("notes.md"), "markdown")?;
    fs::write(dir.path().join("data.csv"), "a,b")?;

    let corpus = Indexer::default().scan(dir.path());
    let names: HashSet<_> = corpus
        .paths()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        HashSet::from(["limit.txt".to_string(), "data.csv".to_string()])
    );
    Ok(())
}

#[test]
fn test_scan_is_idempotent() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        &dir,
        &[("a.txt", "1"), ("x/b.txt", "2"), ("x/y/c.csv", "3")],
    )?;

    let coordinator = ScanCoordinator::from_config(&config(3));
    let first = coordinator.scan_all(&[dir.path()]);
    let second = coordinator.scan_all(&[dir.path()]);
    assert_eq!(first.corpus, second.corpus);
    assert_eq!(first.corpus.len(), 3);
    Ok(())
}

#[test]
fn test_dedup_across_roots() -> Result<()> {
    let first = tempdir()?;
    let second = tempdir()?;
    create_test_files(
        &first,
        &[("report.txt", "keyword in first"), ("a.txt", "keyword twin")],
    )?;
    create_test_files(
        &second,
        &[("report.txt", "keyword in second"), ("b.txt", "keyword twin")],
    )?;

    let request = SearchRequest::new(
        vec![first.path().to_path_buf(), second.path().to_path_buf()],
        "KEYWORD",
    );
    let outcome = search(&config(4), &request);

    assert_eq!(outcome.files_indexed, 4);
    assert_eq!(outcome.scanned_roots.len(), 2);
    assert_eq!(outcome.matches.len(), 2);
    let names = file_names(&outcome.matches);
    assert!(names.contains("report.txt"));
    assert!(names.contains("a.txt") ^ names.contains("b.txt"));
    Ok(())
}

#[test]
fn test_sorted_order_picks_first_path() -> Result<()> {
    let first = tempdir()?;
    let second = tempdir()?;
    create_test_files(&first, &[("same.txt", "keyword one")])?;
    create_test_files(&second, &[("same.txt", "keyword two")])?;

    let config = IndexConfig {
        match_order: MatchOrder::Path,
        ..config(2)
    };
    let request = SearchRequest::new(
        vec![first.path().to_path_buf(), second.path().to_path_buf()],
        "keyword",
    );
    let outcome = search(&config, &request);

    let mut expected = vec![
        wyafile::errors::unify_path(first.path()).join("same.txt"),
        wyafile::errors::unify_path(second.path()).join("same.txt"),
    ];
    expected.sort();
    assert_eq!(outcome.matches, vec![expected[0].clone()]);
    Ok(())
}

#[test]
fn test_empty_corpus_search() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("readme.md", "keyword"), ("empty.txt", "")])?;

    let request = SearchRequest::new(vec![dir.path().to_path_buf()], "keyword");
    let outcome = search(&config(2), &request);
    assert!(outcome.matches.is_empty());
    assert!(outcome.scanned_roots.is_empty());
    assert!(outcome.is_empty_scan());
    Ok(())
}

#[test]
fn test_missing_root_is_not_an_error() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("a.txt", "keyword")])?;

    let request = SearchRequest::new(
        vec![dir.path().join("missing"), dir.path().to_path_buf()],
        "keyword",
    );
    let outcome = search(&config(2), &request);
    assert_eq!(outcome.matches.len(), 1);
    assert_eq!(
        outcome.scanned_roots,
        vec![wyafile::errors::unify_path(dir.path())]
    );
    Ok(())
}

#[test]
fn test_many_files_single_and_many_workers_agree() -> Result<()> {
    let dir = tempdir()?;
    for i in 0..50 {
        let content = if i % 3 == 0 {
            format!("file {} has the Needle", i)
        } else {
            format!("file {} has nothing", i)
        };
        fs::write(dir.path().join(format!("f{}.txt", i)), content)?;
    }

    let corpus: Corpus = Indexer::default().scan(dir.path());
    let single = SearchEngine::new(NonZeroUsize::new(1).unwrap()).search(&corpus, "needle");
    let many = SearchEngine::new(NonZeroUsize::new(8).unwrap()).search(&corpus, "needle");

    let single: HashSet<&Path> = single.iter().map(PathBuf::as_path).collect();
    let many: HashSet<&Path> = many.iter().map(PathBuf::as_path).collect();
    assert_eq!(single.len(), 17);
    assert_eq!(single, many);
    Ok(())
}
