use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::f32::consts::TAU;
use swrast::{Affine2D, Attribute, Color, Context, FillStrategy, IndexBuffer, IndexRange, PrimitiveType, VertexBuffer};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

/// Triangles of increasing size, centered on the framebuffer
fn triangle_sizes() -> [(&'static str, i32); 3] {
    [("small", 8), ("medium", 64), ("large", 400)]
}

/// Benchmark: a single Gouraud triangle per strategy and size
fn bench_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");
    let (cx, cy) = (WIDTH as i32 / 2, HEIGHT as i32 / 2);

    for strategy in FillStrategy::ALL {
        let mut ctx = Context::with_strategy(WIDTH, HEIGHT, strategy).unwrap();
        for (name, size) in triangle_sizes() {
            let id = BenchmarkId::new(format!("{:?}", strategy), name);
            group.bench_with_input(id, &size, |b, &size| {
                b.iter(|| {
                    ctx.draw_triangle(
                        black_box([cx - size, cy - size / 2]),
                        black_box([cx + size, cy - size / 3]),
                        black_box([cx, cy + size / 2]),
                        Color::RED.pack(),
                        Color::GREEN.pack(),
                        Color::BLUE.pack(),
                    )
                })
            });
        }
    }

    group.finish();
}

/// Benchmark: flat-colored triangle (tiled strategies take the constant path)
fn bench_constant_color(c: &mut Criterion) {
    let mut group = c.benchmark_group("constant_color");
    let white = Color::WHITE.pack();

    for strategy in FillStrategy::ALL {
        let mut ctx = Context::with_strategy(WIDTH, HEIGHT, strategy).unwrap();
        group.bench_function(format!("{:?}", strategy), |b| {
            b.iter(|| ctx.draw_triangle(black_box([20, 20]), [600, 40], [300, 460], white, white, white))
        });
    }

    group.finish();
}

/// Benchmark: one indexed fan per frame through a render pass
fn bench_indexed_fan(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexed_fan");

    for segments in [16u16, 256, 4096] {
        let mut positions = vec![[0.0f32, 0.0]];
        let mut colors = vec![Color::WHITE.pack()];
        for i in 0..segments {
            let angle = i as f32 / segments as f32 * TAU;
            positions.push([angle.cos(), angle.sin()]);
            colors.push(if i % 2 == 0 { Color::RED.pack() } else { Color::BLUE.pack() });
        }
        let indices: Vec<u16> = (1..=segments)
            .flat_map(|i| [0, i, if i == segments { 1 } else { i + 1 }])
            .collect();

        let mut ctx = Context::new(WIDTH, HEIGHT).unwrap();
        ctx.set_transform(Affine2D::IDENTITY.scale(200.0, 200.0).translate(320.0, 240.0));

        group.bench_with_input(BenchmarkId::new("segments", segments), &segments, |b, &segments| {
            b.iter(|| {
                let mut pass = ctx.pass();
                pass.bind_vertex_buffer(Attribute::Position, VertexBuffer::from_positions(&positions));
                pass.bind_vertex_buffer(Attribute::Color, VertexBuffer::from_packed_colors(&colors));
                pass.bind_index_buffer(IndexBuffer::new(&indices));
                pass.draw_primitives(
                    PrimitiveType::TriangleList,
                    IndexRange::new(0, segments as u32),
                    indices.len(),
                    0,
                    0,
                );
            })
        });
    }

    group.finish();
}

/// Benchmark: full-screen clear
fn bench_clear(c: &mut Criterion) {
    let mut ctx = Context::new(WIDTH, HEIGHT).unwrap();
    c.bench_function("clear_640x480", |b| b.iter(|| ctx.clear(black_box(0xFF20_2020))));
}

criterion_group!(
    benches,
    bench_single_triangle,
    bench_constant_color,
    bench_indexed_fan,
    bench_clear
);
criterion_main!(benches);
