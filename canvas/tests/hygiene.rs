//! Hygiene: source-level standards for the rasterizer crate.
//!
//! Scans `src/` (test modules excluded) for patterns the crate keeps on a
//! budget. Budgets only go down; to add an occurrence, remove another first.

use std::fs;
use std::path::{Path, PathBuf};

struct Budget {
    name: &'static str,
    max: usize,
    matches: fn(&str) -> bool,
}

const BUDGETS: &[Budget] = &[
    // Crashes.
    Budget { name: ".unwrap()", max: 0, matches: |l| l.contains(".unwrap()") },
    Budget { name: ".expect(", max: 0, matches: |l| l.contains(".expect(") },
    Budget { name: "panic!", max: 0, matches: |l| l.contains("panic!(") },
    Budget { name: "unreachable!", max: 0, matches: |l| l.contains("unreachable!(") },
    Budget { name: "todo!", max: 0, matches: |l| l.contains("todo!(") },
    Budget { name: "unimplemented!", max: 0, matches: |l| l.contains("unimplemented!(") },
    // Release-mode precondition checks: row access (2) and drawing into an empty framebuffer (1).
    Budget { name: "assert!", max: 3, matches: |l| l.contains("assert!(") && !l.contains("debug_assert!(") },
    // Errors dropped on the floor.
    Budget { name: "let _ =", max: 0, matches: |l| l.contains("let _ =") },
    Budget { name: ".ok()", max: 0, matches: |l| l.contains(".ok()") },
    // The library reports through `tracing`, never stdout.
    Budget { name: "println!", max: 0, matches: |l| l.contains("println!(") || l.contains("eprintln!(") },
    Budget { name: "dbg!", max: 0, matches: |l| l.contains("dbg!(") },
    Budget { name: "unsafe", max: 0, matches: |l| l.contains("unsafe ") },
    Budget { name: "#[allow(dead_code)]", max: 0, matches: |l| l.contains("#[allow(dead_code)]") },
];

struct SourceFile {
    path: PathBuf,
    content: String,
}

fn production_sources() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(&Path::new(env!("CARGO_MANIFEST_DIR")).join("src"), &mut files);
    files
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let is_rs = path.extension().is_some_and(|e| e == "rs");
        let is_test = path.file_name().is_some_and(|n| n.to_string_lossy().ends_with("_test.rs"));
        if is_rs && !is_test {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path, content });
            }
        }
    }
}

fn hits(files: &[SourceFile], budget: &Budget) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|f| {
            let count = f
                .content
                .lines()
                .filter(|line| !line.trim_start().starts_with("//"))
                .filter(|line| (budget.matches)(line))
                .count();
            (count > 0).then(|| (f.path.display().to_string(), count))
        })
        .collect()
}

#[test]
fn sources_are_found() {
    let files = production_sources();
    assert!(files.iter().any(|f| f.path.ends_with("raster.rs")), "scanned {} files", files.len());
}

#[test]
fn budgets_hold() {
    let files = production_sources();
    let mut report = Vec::new();
    for budget in BUDGETS {
        let found = hits(&files, budget);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            report.push(format!("{} budget exceeded: found {count}, max {}", budget.name, budget.max));
            report.extend(found.iter().map(|(path, c)| format!("  {path}: {c}")));
        }
    }
    assert!(report.is_empty(), "\n{}", report.join("\n"));
}
