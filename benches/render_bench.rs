use criterion::{black_box, criterion_group, criterion_main, Criterion};
use time::macros::datetime;

use tracknet::config::{CookieStyle, TrackingConfig};
use tracknet::render::render;

fn benchmark_pattern_extract(c: &mut Criterion) {
    let config = TrackingConfig::new();
    let header = "session=abc123; theme=dark; Apache=203.0.113.5.1700000000000000; lang=en";

    c.bench_function("pattern_extract", |b| {
        b.iter(|| black_box(config.pattern().extract(black_box(header))))
    });
}

fn benchmark_render_netscape(c: &mut Criterion) {
    let mut config = TrackingConfig::new();
    config.enabled = true;
    config.expires = 86400;
    let now = datetime!(2026-08-07 12:00 UTC);

    c.bench_function("render_netscape", |b| {
        b.iter(|| {
            black_box(render(
                black_box(&config),
                black_box("203.0.113.5.1700000000000000"),
                false,
                now,
            ))
        })
    });
}

fn benchmark_render_max_age(c: &mut Criterion) {
    let mut config = TrackingConfig::new();
    config.enabled = true;
    config.expires = 86400;
    config.style = CookieStyle::Cookie;
    config.set_cookie_domain(".example.com").unwrap();
    let now = datetime!(2026-08-07 12:00 UTC);

    c.bench_function("render_max_age", |b| {
        b.iter(|| {
            black_box(render(
                black_box(&config),
                black_box("203.0.113.5.1700000000000000"),
                false,
                now,
            ))
        })
    });
}

criterion_group!(
    benches,
    benchmark_pattern_extract,
    benchmark_render_netscape,
    benchmark_render_max_age
);
criterion_main!(benches);
