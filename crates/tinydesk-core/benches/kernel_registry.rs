//! Benchmarks for command dispatch and window manager churn.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use tinydesk_core::terminal::{CommandRegistry, Terminal};
use tinydesk_core::wm::{MiniWindow, Scene, WindowManager};

fn registry(n: usize) -> (CommandRegistry, Vec<String>) {
    let mut reg = CommandRegistry::new();
    let names: Vec<String> = (0..n).map(|i| format!("cmd_{i}")).collect();
    for name in &names {
        reg.register_fn(name, |args| Ok(args.join(" ")));
    }
    (reg, names)
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("command_resolve");

    for n in [10, 100, 1_000] {
        let (reg, names) = registry(n);
        let upper: Vec<String> = names.iter().map(|s| s.to_uppercase()).collect();
        let label = format!("{n}");

        group.bench_function(BenchmarkId::new("resolve", &label), |b| {
            b.iter(|| {
                for name in &upper {
                    let _ = reg.resolve(name);
                }
            });
        });
    }

    group.finish();
}

fn bench_submit(c: &mut Criterion) {
    let mut group = c.benchmark_group("terminal_submit");
    let (reg, _) = registry(100);

    group.bench_function("quoted_line", |b| {
        b.iter_batched(
            || Terminal::new("> "),
            |mut term| {
                for _ in 0..100 {
                    term.submit(r#"cmd_42 "hello world" 'and more' plain"#, &reg);
                }
                term
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_window_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_churn");

    for n in [10, 100, 1_000] {
        let keys: Vec<String> = (0..n).map(|i| format!("app_{i}")).collect();
        let label = format!("{n}");

        group.bench_function(BenchmarkId::new("show_then_close", &label), |b| {
            b.iter(|| {
                let wm = WindowManager::new();
                let mut scene = Scene::new();
                for key in &keys {
                    let w = MiniWindow::new(key, 100, 100, key, &wm);
                    let _ = w.show_on(&mut scene, wm.count());
                }
                for w in wm.all() {
                    let _ = w.close(&mut scene);
                }
                wm.count()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_submit, bench_window_churn);
criterion_main!(benches);
