use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quickrip::backend::parse_progress_line;

fn bench_parse_progress(c: &mut Criterion) {
    let lines = [
        "[download]  42.3% of ~ 10.00MiB at  1.00MiB/s ETA 00:05",
        "[download] 100% of   10.00MiB in 00:00:05 at 2.00MiB/s",
        "[youtube] dQw4w9WgXcQ: Downloading webpage",
        "/home/me/Downloads/video.webm",
    ];

    c.bench_function("parse_progress_line", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(parse_progress_line(black_box(line)));
            }
        })
    });
}

fn bench_parse_log(c: &mut Criterion) {
    let log: Vec<String> = (0..1000)
        .map(|i| format!("[download] {:5.1}% of 512.00MiB at 8.00MiB/s ETA 01:00", i as f32 / 10.0))
        .collect();

    c.bench_function("parse_progress_log_1000_lines", |b| {
        b.iter(|| log.iter().filter_map(|line| parse_progress_line(line)).count())
    });
}

criterion_group!(benches, bench_parse_progress, bench_parse_log);
criterion_main!(benches);
