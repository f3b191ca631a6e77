use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use shade_core::{ParameterStore, SampleWindow, shade_angle};

// Synthetic daylight trace: half-sine with additive white noise, in [0, 1]
fn synth_trace(n: usize, noise_amp: f32, seed: u32) -> Vec<f32> {
    // tiny PRNG
    let mut state = seed.max(1);
    let mut next_f32 = || {
        let mut x = state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        state = x;
        (x as f32) / (u32::MAX as f32 + 1.0)
    };
    let mut v = Vec::with_capacity(n);
    for i in 0..n {
        let t = i as f32 / 288.0;
        let s = (t * std::f32::consts::PI).sin().max(0.0);
        let noise = (next_f32() * 2.0 - 1.0) * noise_amp;
        v.push((s + noise).clamp(0.0, 1.0));
    }
    v
}

pub fn bench_window(c: &mut Criterion) {
    let mut g = c.benchmark_group("window");
    // Allow quick tweaking without CLI flags (Criterion 0.5):
    //   BENCH_SAMPLE_SIZE=10 BENCH_MEAS_MS=50 cargo bench -p shade_core --bench window
    if let Ok(ss) = std::env::var("BENCH_SAMPLE_SIZE") {
        if let Ok(n) = ss.parse::<usize>() {
            g.sample_size(n.max(1));
        }
    } else {
        g.sample_size(50);
    }
    if let Ok(ms) = std::env::var("BENCH_MEAS_MS")
        && let Ok(ms_u64) = ms.parse::<u64>()
    {
        g.measurement_time(std::time::Duration::from_millis(ms_u64));
    }

    let n = 50_000usize;
    let trace = synth_trace(n, 0.02, 0xC0FFEE);

    for &span in &[8usize, 24, 96] {
        g.bench_function(format!("append_average_span_{span}"), |b| {
            b.iter_batched(
                || SampleWindow::new(100, span),
                |mut w| {
                    for &r in &trace {
                        w.append(black_box(r));
                        black_box(w.average());
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }

    let params = ParameterStore::default();
    g.bench_function("control_law", |b| {
        b.iter(|| {
            let mut acc = 0u32;
            for &r in &trace {
                acc += u32::from(shade_angle(black_box(r), black_box(29.5), &params));
            }
            black_box(acc);
        })
    });
    g.finish();
}

criterion_group!(window, bench_window);
criterion_main!(window);
