//! swrast demo: a rotating Gouraud-shaded fan drawn on the CPU and shown
//! through a macroquad texture.

use std::f32::consts::TAU;
use std::sync::OnceLock;

use macroquad::prelude::*;
use swrast::config::{DemoConfig, DEFAULT_CONFIG_PATH};
use swrast::logging::{init_logging, LoggingConfig};
use swrast::{
    Affine2D, Attribute, ColorFormat, Context, Font, IndexBuffer, IndexRange, PrimitiveType, VertexBuffer,
    FRAMEBUFFER_FORMAT, VERSION,
};

static CONFIG: OnceLock<DemoConfig> = OnceLock::new();

fn config() -> &'static DemoConfig {
    CONFIG.get_or_init(|| {
        let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        match DemoConfig::load_or_default(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Failed to load {}: {}, using defaults", path, e);
                DemoConfig::default()
            }
        }
    })
}

fn window_conf() -> Conf {
    let cfg = config();
    let (width, height) = cfg.framebuffer_size();
    let scale = cfg.scale.clamp(1, 16) as i32;
    Conf {
        window_title: format!("swrast v{}", VERSION),
        window_width: width as i32 * scale,
        window_height: height as i32 * scale,
        window_resizable: true,
        ..Default::default()
    }
}

/// Unit-radius fan: center vertex 0, rim vertices 1..=segments
struct FanMesh {
    positions: Vec<[f32; 2]>,
    colors: Vec<[u8; 4]>,
    indices: Vec<u16>,
}

impl FanMesh {
    fn new(segments: u16) -> Self {
        let mut positions = vec![[0.0, 0.0]];
        let mut colors = vec![[255, 255, 255, 255]];
        for i in 0..segments {
            let t = i as f32 / segments as f32;
            let angle = t * TAU;
            positions.push([angle.cos(), angle.sin()]);
            colors.push(hue(t));
        }

        let mut indices = Vec::with_capacity(segments as usize * 3);
        for i in 1..=segments {
            let next = if i == segments { 1 } else { i + 1 };
            indices.extend_from_slice(&[0, i, next]);
        }

        Self { positions, colors, indices }
    }
}

/// Fully saturated color at `t` around the hue wheel
fn hue(t: f32) -> [u8; 4] {
    let h = (t.fract() * 6.0).max(0.0);
    let x = ((1.0 - ((h % 2.0) - 1.0).abs()) * 255.0) as u8;
    match h as u32 {
        0 => [255, x, 0, 255],
        1 => [x, 255, 0, 255],
        2 => [0, 255, x, 255],
        3 => [0, x, 255, 255],
        4 => [x, 0, 255, 255],
        _ => [255, 0, x, 255],
    }
}

/// RGBA bytes for texture upload
fn upload_bytes<'a>(ctx: &'a Context, staging: &'a mut Vec<u8>) -> &'a [u8] {
    match FRAMEBUFFER_FORMAT {
        ColorFormat::Rgba => ctx.framebuffer_bytes(),
        ColorFormat::Bgra => {
            staging.clear();
            for px in ctx.framebuffer_bytes().chunks_exact(4) {
                staging.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
            }
            staging.as_slice()
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let cfg = config().clone();
    init_logging(LoggingConfig {
        env_filter: cfg.log_filter.clone(),
        ..Default::default()
    });

    let (width, height) = cfg.framebuffer_size();
    let created = match cfg.strategy {
        Some(strategy) => Context::with_strategy(width as u32, height as u32, strategy),
        None => Context::new(width as u32, height as u32),
    };
    let mut ctx = match created {
        Ok(ctx) => ctx,
        Err(e) => {
            log::error!("failed to create rendering context: {}", e);
            return;
        }
    };

    let mesh = FanMesh::new(cfg.fan_segments());
    let vertex_count = mesh.positions.len() as u32;
    let font = Font::tiny();
    let overlay_color = swrast::Color::WHITE.pack();
    let outline_color = swrast::Color::new(40, 40, 40).pack();
    let radius = width.min(height) as f32 * 0.4;
    let center = (width as f32 * 0.5, height as f32 * 0.5);
    let mut staging = Vec::new();

    log::info!(
        "demo running: {} segments, {:?} fill",
        mesh.indices.len() / 3,
        ctx.fill_strategy()
    );

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        let angle = get_time() as f32 * cfg.rotation_speed;
        let transform = Affine2D::IDENTITY
            .scale(radius, radius)
            .rotate(angle)
            .translate(center.0, center.1);

        ctx.clear(cfg.clear_color.pack());
        ctx.set_transform(transform);
        {
            let mut pass = ctx.pass();
            pass.bind_vertex_buffer(Attribute::Position, VertexBuffer::from_positions(&mesh.positions));
            pass.bind_vertex_buffer(Attribute::Color, VertexBuffer::from_rgba8(&mesh.colors));
            pass.bind_index_buffer(IndexBuffer::new(&mesh.indices));
            pass.draw_primitives(
                PrimitiveType::TriangleList,
                IndexRange::new(0, vertex_count - 1),
                mesh.indices.len(),
                0,
                0,
            );
        }

        if cfg.overlay {
            let rim: Vec<[i32; 2]> = mesh.positions[1..]
                .iter()
                .map(|p| transform.apply_to_screen(p[0], p[1]))
                .collect();
            for (i, a) in rim.iter().enumerate() {
                let b = rim[(i + 1) % rim.len()];
                ctx.draw_line(a[0], a[1], b[0], b[1], outline_color);
            }
            let stats = format!("{} FPS {:?}", get_fps(), ctx.fill_strategy()).to_uppercase();
            ctx.draw_text(&font, 2, 2, &stats, overlay_color);
        }

        let bytes = upload_bytes(&ctx, &mut staging);
        let texture = Texture2D::from_rgba8(width, height, bytes);
        texture.set_filter(FilterMode::Nearest);

        clear_background(BLACK);
        let scale = (screen_width() / ctx.width() as f32).min(screen_height() / ctx.height() as f32);
        let (draw_w, draw_h) = (ctx.width() as f32 * scale, ctx.height() as f32 * scale);
        draw_texture_ex(
            &texture,
            (screen_width() - draw_w) * 0.5,
            (screen_height() - draw_h) * 0.5,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(draw_w, draw_h)),
                ..Default::default()
            },
        );

        next_frame().await
    }
}
