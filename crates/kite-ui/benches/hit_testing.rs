//! Benchmarks for hit-testing and frame draw

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kite_render::{Font, Image};
use kite_ui::{CheckBox, Panel, Window, WindowConfig};

/// A window with `count` checkboxes in a grid of vertical columns.
fn setup(count: usize) -> Window {
    let mut window = Window::new(WindowConfig::new(1024, 1024, "bench"), Font::default())
        .expect("window");
    let mut row = Panel::horizontal("grid");
    for column in 0..count.div_ceil(32) {
        let mut panel = Panel::vertical(format!("column-{}", column));
        for i in 0..32.min(count - column * 32) {
            panel.add_widget(CheckBox::new(format!("cb-{}-{}", column, i), 16.0));
        }
        row.add_panel(panel);
    }
    window.add_panel(row);
    window
}

fn bench_find_widget(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_widget_for_input");

    for count in [10, 100, 500] {
        group.throughput(Throughput::Elements(1));

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut window = setup(count);
            // Last widget: worst case for the linear search.
            let column = (count - 1) / 32;
            let row = (count - 1) % 32;
            let (x, y) = (column as f32 * 16.0 + 8.0, row as f32 * 16.0 + 8.0);
            b.iter(|| black_box(window.find_widget_for_input(black_box(x), black_box(y))));
        });
    }

    group.finish();
}

fn bench_miss(c: &mut Criterion) {
    let mut window = setup(500);
    c.bench_function("find_widget_for_input_miss", |b| {
        b.iter(|| black_box(window.find_widget_for_input(black_box(1000.0), black_box(1000.0))))
    });
}

fn bench_clean_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_clean");

    for count in [10, 100, 500] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut window = setup(count);
            let mut frame = Image::new(1024, 1024);
            window.draw(&mut frame).expect("first draw");
            b.iter(|| window.draw(black_box(&mut frame)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_find_widget, bench_miss, bench_clean_draw);
criterion_main!(benches);
