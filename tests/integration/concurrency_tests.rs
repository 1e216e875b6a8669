//! Readers running while the blocklist is reloaded

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tempfile::NamedTempFile;
use urwarden::{BlocklistIndex, RuleEvaluator, Scanner, Thresholds};

fn write_generation(file: &mut NamedTempFile, tag: &str, count: usize) {
    let mut content = String::new();
    for i in 0..count {
        content.push_str(&format!("0.0.0.0 host{}.{}.com\n", i, tag));
    }
    std::fs::write(file.path(), content).unwrap();
    file.flush().unwrap();
}

#[test]
fn test_readers_see_whole_generations() {
    const COUNT: usize = 500;

    let mut file = NamedTempFile::new().unwrap();
    write_generation(&mut file, "old", COUNT);

    let index = Arc::new(BlocklistIndex::new(file.path()));
    index.load().unwrap();
    assert_eq!(index.size(), COUNT);

    let stop = Arc::new(AtomicBool::new(false));
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let index = Arc::clone(&index);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    // Every generation has exactly COUNT entries; a partial swap would not
                    assert_eq!(index.size(), COUNT);
                    let _ = index.contains("www.host7.old.com");
                }
            })
        })
        .collect();

    for round in 0..20 {
        let tag = if round % 2 == 0 { "new" } else { "old" };
        write_generation(&mut file, tag, COUNT);
        index.reload().unwrap();
    }

    stop.store(true, Ordering::Relaxed);
    for reader in readers {
        reader.join().unwrap();
    }

    assert!(index.contains("host1.old.com").is_some());
    assert!(index.contains("host1.new.com").is_none());
}

#[test]
fn test_shared_index_across_scanners() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "bad.example.com").unwrap();
    file.flush().unwrap();

    let index = Arc::new(BlocklistIndex::new(file.path()));
    index.load().unwrap();

    let scanner = Scanner::new(RuleEvaluator::new(Arc::clone(&index)), Thresholds::default());
    let urls: Vec<String> = (0..200)
        .map(|i| format!("https://n{}.bad.example.com/", i))
        .collect();

    let results = scanner.scan_batch(&urls, 8);
    assert!(results
        .iter()
        .all(|r| r.as_ref().map(|r| r.score == 70).unwrap_or(false)));
    assert_eq!(index.size(), 1);
}
