use bam_output::{Collapser, GlobPattern, normalize};
use bam_test_utils::rsync::rsync_output;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn sample_paths(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| match i % 4 {
            0 | 1 => format!(".git/objects/{:02x}/{i}", i % 256),
            2 => format!("photos/2024/img_{i}.jpg"),
            _ => format!("notes/{i}.md"),
        })
        .collect()
}

fn collapse_benchmark(c: &mut Criterion) {
    let collapser = Collapser::from_globs([".git/objects/*", "photos/*.jpg", "*.tmp"]).unwrap();
    let lines = sample_paths(10_000);

    c.bench_function("Collapser::collapse (10k lines)", |b| {
        b.iter(|| collapser.collapse(black_box(lines.clone())))
    });
}

fn normalize_benchmark(c: &mut Criterion) {
    let collapser = Collapser::from_globs([".git/objects/*", "photos/*.jpg"]).unwrap();
    let paths = sample_paths(10_000);
    let refs: Vec<&str> = paths.iter().map(String::as_str).collect();
    let output = rsync_output(&refs, &refs[..100]);

    c.bench_function("normalize (10k changes)", |b| {
        b.iter(|| normalize(black_box(output.clone()), &collapser).unwrap())
    });
}

fn glob_compile_benchmark(c: &mut Criterion) {
    c.bench_function("GlobPattern::new", |b| {
        b.iter(|| GlobPattern::new(black_box("photos/20[0-9][0-9]/*/img_???.jpg")).unwrap())
    });
}

criterion_group!(
    benches,
    collapse_benchmark,
    normalize_benchmark,
    glob_compile_benchmark
);
criterion_main!(benches);
