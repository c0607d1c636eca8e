//! Rendering context and render passes.
//!
//! A [`Context`] owns the framebuffer, the world-to-screen transform, the
//! scratch arena and the fill strategy picked at creation. Buffer bindings
//! live in a [`RenderPass`] borrowed from the context, so bound vertex data
//! only has to outlive the pass, not the context.

use super::buffer::{IndexBuffer, VertexBuffer};
use super::cpu::CpuFeatures;
use super::error::{ContextError, DrawError};
use super::font::Font;
use super::math::{transform_positions, Affine2D};
use super::render::Framebuffer;
use super::scratch::Scratch;
use super::triangle::{FillStrategy, Triangle};
use super::types::{Attribute, Color, IndexRange, PrimitiveType, VertexFormat};

pub struct Context {
    framebuffer: Framebuffer,
    transform: Affine2D,
    scratch: Scratch,
    strategy: FillStrategy,
    features: CpuFeatures,
}

impl Context {
    /// Create a context, picking the fill strategy from the host CPU
    pub fn new(width: u32, height: u32) -> Result<Self, ContextError> {
        let features = CpuFeatures::detect();
        log::debug!("cpu features: {}", features);
        Self::create(width, height, FillStrategy::select(features), features)
    }

    /// Create a context with an explicit fill strategy
    pub fn with_strategy(width: u32, height: u32, strategy: FillStrategy) -> Result<Self, ContextError> {
        Self::create(width, height, strategy, CpuFeatures::empty())
    }

    fn create(
        width: u32,
        height: u32,
        strategy: FillStrategy,
        features: CpuFeatures,
    ) -> Result<Self, ContextError> {
        let framebuffer = Framebuffer::new(width, height)?;
        let scratch = Scratch::with_capacity(framebuffer.width(), framebuffer.height())?;
        log::info!(
            "created {}x{} context ({:?} fill, {} KiB scratch)",
            width,
            height,
            strategy,
            scratch.capacity_bytes() / 1024
        );
        Ok(Self {
            framebuffer,
            transform: Affine2D::IDENTITY,
            scratch,
            strategy,
            features,
        })
    }

    pub fn width(&self) -> usize {
        self.framebuffer.width()
    }

    pub fn height(&self) -> usize {
        self.framebuffer.height()
    }

    pub fn fill_strategy(&self) -> FillStrategy {
        self.strategy
    }

    /// Features probed at creation (empty for `with_strategy`)
    pub fn cpu_features(&self) -> CpuFeatures {
        self.features
    }

    /// Row-major packed pixels
    pub fn framebuffer(&self) -> &[u32] {
        self.framebuffer.pixels()
    }

    pub fn framebuffer_bytes(&self) -> &[u8] {
        self.framebuffer.as_bytes()
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.framebuffer.get(x, y)
    }

    pub fn transform(&self) -> Affine2D {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Affine2D) {
        self.transform = transform;
    }

    pub fn clear(&mut self, color: u32) {
        self.framebuffer.clear(color);
    }

    pub fn draw_pixel(&mut self, x: i32, y: i32, color: u32) {
        self.framebuffer.set_pixel(x, y, color);
    }

    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        self.framebuffer.draw_line(x0, y0, x1, y1, color);
    }

    pub fn draw_text(&mut self, font: &Font<'_>, x: i32, y: i32, text: &str, color: u32) {
        self.framebuffer.draw_text(font, x, y, text, color);
    }

    /// Rasterize one screen-space triangle with Gouraud shading
    pub fn draw_triangle(&mut self, p0: [i32; 2], p1: [i32; 2], p2: [i32; 2], c0: u32, c1: u32, c2: u32) {
        let tri = Triangle::new(p0, p1, p2, c0, c1, c2);
        self.strategy.fill(&tri, &mut self.framebuffer, &mut self.scratch);
    }

    /// Begin a batch of indexed draws with empty bindings
    pub fn pass<'a>(&mut self) -> RenderPass<'_, 'a> {
        RenderPass {
            ctx: self,
            vertex_buffers: [None; Attribute::COUNT],
            index_buffer: None,
            vertex_color: Color::WHITE.pack(),
        }
    }
}

/// Binding table for indexed draws into one context
pub struct RenderPass<'c, 'a> {
    ctx: &'c mut Context,
    vertex_buffers: [Option<VertexBuffer<'a>>; Attribute::COUNT],
    index_buffer: Option<IndexBuffer<'a>>,
    vertex_color: u32,
}

impl<'c, 'a> RenderPass<'c, 'a> {
    pub fn bind_vertex_buffer(&mut self, attribute: Attribute, buffer: VertexBuffer<'a>) {
        self.vertex_buffers[attribute.index()] = Some(buffer);
    }

    pub fn unbind_vertex_buffer(&mut self, attribute: Attribute) {
        self.vertex_buffers[attribute.index()] = None;
    }

    pub fn bind_index_buffer(&mut self, buffer: IndexBuffer<'a>) {
        self.index_buffer = Some(buffer);
    }

    pub fn unbind_index_buffer(&mut self) {
        self.index_buffer = None;
    }

    /// Color used for every vertex when no usable color buffer is bound
    pub fn set_vertex_color(&mut self, color: u32) {
        self.vertex_color = color;
    }

    /// The context this pass draws into
    pub fn context(&mut self) -> &mut Context {
        &mut *self.ctx
    }

    /// Draw `count` indices starting at `base_index`, three per triangle.
    ///
    /// Index value `i` in `range` refers to vertex `base_vertex + (i - range.start)`.
    /// Invalid calls draw nothing.
    pub fn draw_primitives(
        &mut self,
        primitive: PrimitiveType,
        range: IndexRange,
        count: usize,
        base_index: usize,
        base_vertex: usize,
    ) {
        if let Err(e) = self.try_draw(primitive, range, count, base_index, base_vertex) {
            log::debug!("draw_primitives ignored: {}", e);
        }
    }

    /// Same as [`draw_primitives`](Self::draw_primitives) with a raw topology id
    pub fn draw_primitives_raw(
        &mut self,
        primitive: u32,
        range: IndexRange,
        count: usize,
        base_index: usize,
        base_vertex: usize,
    ) {
        match PrimitiveType::from_raw(primitive) {
            Some(primitive) => self.draw_primitives(primitive, range, count, base_index, base_vertex),
            None => log::debug!("draw_primitives ignored: {} ({})", DrawError::UnsupportedPrimitive, primitive),
        }
    }

    fn try_draw(
        &mut self,
        primitive: PrimitiveType,
        range: IndexRange,
        count: usize,
        base_index: usize,
        base_vertex: usize,
    ) -> Result<(), DrawError> {
        match primitive {
            PrimitiveType::TriangleList => {}
        }

        let positions = self.vertex_buffers[Attribute::Position.index()]
            .ok_or(DrawError::MissingAttribute(Attribute::Position))?;
        if positions.format() != VertexFormat::Float2 {
            return Err(DrawError::InvalidPositionFormat);
        }
        if !positions.is_complete() {
            return Err(DrawError::BufferTooSmall(Attribute::Position));
        }
        let indices = self.index_buffer.ok_or(DrawError::MissingIndexBuffer)?;

        let vertex_count = range.vertex_count().ok_or(DrawError::InvertedIndexRange {
            start: range.start,
            end: range.end,
        })?;
        let required = base_vertex.saturating_add(vertex_count);
        if required > positions.count() {
            return Err(DrawError::VertexRangeOutOfBounds {
                required,
                available: positions.count(),
            });
        }
        let index_end = base_index.saturating_add(count);
        if index_end > indices.len() {
            return Err(DrawError::IndexRangeOutOfBounds {
                required: index_end,
                available: indices.len(),
            });
        }

        let colors = self.vertex_buffers[Attribute::Color.index()].filter(|c| {
            let usable = c.format().is_color() && c.count() == positions.count() && c.is_complete();
            if !usable {
                log::debug!("color buffer ignored, using constant vertex color");
            }
            usable
        });

        let Context {
            framebuffer,
            transform,
            scratch,
            strategy,
            ..
        } = &mut *self.ctx;

        scratch.reset();
        for v in base_vertex..required {
            let p = positions
                .position(v)
                .ok_or(DrawError::BufferTooSmall(Attribute::Position))?;
            scratch.object_positions.push(p);
        }
        scratch.screen_positions.resize(vertex_count, [0, 0]);
        transform_positions(&scratch.object_positions, transform, &mut scratch.screen_positions);

        let vertex_color = self.vertex_color;
        let vertex = |index: u16, screen: &[[i32; 2]]| -> Option<([i32; 2], u32)> {
            let index = u32::from(index);
            if !range.contains(index) {
                return None;
            }
            let local = (index - range.start) as usize;
            let color = colors
                .and_then(|c| c.color(base_vertex + local))
                .unwrap_or(vertex_color);
            Some((screen[local], color))
        };

        for tri in indices.as_slice()[base_index..index_end].chunks_exact(3) {
            let corners = (
                vertex(tri[0], &scratch.screen_positions),
                vertex(tri[1], &scratch.screen_positions),
                vertex(tri[2], &scratch.screen_positions),
            );
            let (Some((p0, c0)), Some((p1, c1)), Some((p2, c2))) = corners else {
                log::trace!("triangle {:?} references indices outside {:?}", tri, range);
                continue;
            };
            strategy.fill(&Triangle::new(p0, p1, p2, c0, c1, c2), framebuffer, scratch);
        }

        Ok(())
    }
}
