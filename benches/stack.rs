//! Benchmarks for the merge and defect-scan kernels at archive frame size.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nightstack::discovery::DiscoverySlot;
use nightstack::stack::{repair_defect_band, Accumulator, LumaPlane};
use nightstack::Frame;
use std::path::PathBuf;

const WIDTH: u32 = 1920;
const HEIGHT: u32 = 1080;

fn test_frame(seed: u64) -> Frame {
    let pixels: Vec<u8> = (0..(WIDTH as usize * HEIGHT as usize * 3))
        .map(|i| ((i as u64).wrapping_mul(2654435761).wrapping_add(seed) >> 16) as u8)
        .collect();
    Frame::new(
        pixels,
        WIDTH,
        HEIGHT,
        PathBuf::from("bench.jpg"),
        DiscoverySlot {
            bucket: 0,
            hour: 20,
            index: 0,
        },
    )
}

fn defective_plane() -> LumaPlane {
    // Dense gray-128 band across the top quarter of the frame.
    let pixels: Vec<u8> = (0..(WIDTH as usize * HEIGHT as usize))
        .flat_map(|i| {
            if i < (WIDTH as usize * HEIGHT as usize) / 4 {
                [128u8, 128, 128]
            } else {
                [(i % 100) as u8, (i % 50) as u8, (i % 25) as u8]
            }
        })
        .collect();
    LumaPlane::from_rgb8(&pixels, WIDTH, HEIGHT)
}

fn bench_merge(c: &mut Criterion) {
    let frame = test_frame(42);
    let plane = LumaPlane::from_rgb8(frame.pixels(), WIDTH, HEIGHT);

    c.bench_function("merge_1080p", |b| {
        b.iter(|| {
            let mut acc = Accumulator::new(WIDTH, HEIGHT);
            acc.merge(black_box(&frame), black_box(&plane));
            acc
        })
    });
}

fn bench_luma_plane(c: &mut Criterion) {
    let frame = test_frame(7);

    c.bench_function("luma_plane_1080p", |b| {
        b.iter(|| LumaPlane::from_rgb8(black_box(frame.pixels()), WIDTH, HEIGHT))
    });
}

fn bench_repair(c: &mut Criterion) {
    c.bench_function("repair_dense_band_1080p", |b| {
        b.iter_with_setup(defective_plane, |mut plane| {
            let report = repair_defect_band(&mut plane);
            black_box((plane, report))
        })
    });
}

criterion_group!(benches, bench_merge, bench_luma_plane, bench_repair);
criterion_main!(benches);
