//! Sweep throughput over an unchanged tree

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use watcher::{PollWatcher, WatchEvent, WatcherConfig};

fn build_tree(root: &std::path::Path, dirs: usize, files_per_dir: usize) {
    for d in 0..dirs {
        let dir = root.join(format!("dir{:03}/nested", d));
        fs::create_dir_all(&dir).unwrap();
        for f in 0..files_per_dir {
            fs::write(dir.join(format!("file{:03}.txt", f)), b"content").unwrap();
        }
    }
}

fn bench_sweep(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    build_tree(temp_dir.path(), 50, 20);

    let watcher = PollWatcher::new(
        WatcherConfig::with_interval(Duration::from_secs(3600)),
        |event: WatchEvent| {
            black_box(event);
        },
    )
    .unwrap();
    watcher.watch(temp_dir.path()).unwrap();
    // Discovery pass so the measured sweeps are pure comparisons
    watcher.poll();

    c.bench_function("sweep_unchanged_1000_files", |b| {
        b.iter(|| black_box(watcher.poll()));
    });

    watcher.close();
}

criterion_group!(benches, bench_sweep);
criterion_main!(benches);
