use colored::Colorize;
use std::path::PathBuf;
use wyafile::{ScanOutcome, ScanStats, SearchOutcome};

fn list_roots(roots: &[PathBuf]) -> String {
    roots
        .iter()
        .map(|r| r.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn print_scan(roots: &[PathBuf], outcome: &ScanOutcome, show_contents: bool) {
    if outcome.corpus.is_empty() {
        println!(
            "{}",
            format!(
                "No supported files found or could not access: {}",
                list_roots(roots)
            )
            .yellow()
        );
        return;
    }

    println!("\n=== Directory Scan Results ===");
    println!(
        "Found {} file(s) in {} of {} directories",
        outcome.corpus.len(),
        outcome.scanned_roots.len(),
        roots.len()
    );
    for root in &outcome.scanned_roots {
        println!("  {}", root.display().to_string().blue());
    }
    println!();

    for (path, content) in &outcome.corpus {
        if show_contents {
            println!("--- File: {} ---", path.display().to_string().blue());
            println!("{}", content);
            println!("--- End of File ---\n");
        } else {
            println!("{} ({} bytes)", path.display().to_string().blue(), content.len());
        }
    }
    println!("=== End of Directory Scan ===");
}

pub fn print_search(roots: &[PathBuf], outcome: &SearchOutcome) {
    if outcome.is_empty_scan() {
        println!(
            "{}",
            format!("No supported files found in: {}", list_roots(roots)).yellow()
        );
        return;
    }

    if !outcome.has_matches() {
        println!(
            "No files contain '{}' ({} files searched)",
            outcome.keyword.bold(),
            outcome.files_indexed
        );
        return;
    }

    for path in &outcome.matches {
        println!("{}", path.display().to_string().blue());
    }
    println!(
        "\nFound '{}' in {} files ({} files searched)",
        outcome.keyword.bold(),
        outcome.matches.len().to_string().green(),
        outcome.files_indexed
    );
    println!("Scanned: {}", list_roots(&outcome.scanned_roots));
}

pub fn print_stats(stats: &ScanStats) {
    println!("\n{}", "Scan statistics".bold());
    println!(
        "  directories visited/skipped/failed: {}/{}/{}",
        stats.directories_visited, stats.directories_skipped, stats.directories_failed
    );
    println!("  depth limit hits: {}", stats.depth_limit_hits);
    println!("  files seen: {}", stats.files_seen());
    println!(
        "  files indexed/ineligible/too large/empty: {}/{}/{}/{}",
        stats.files_indexed, stats.files_ineligible, stats.files_too_large, stats.files_empty
    );
    println!("  bytes loaded: {}", stats.bytes_loaded);
}
