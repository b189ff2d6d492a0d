use crate::coords::Viewport;
use crate::paint::Color;

/// One frame's worth of drawing state handed to renderers.
///
/// Bundles the device handles with the acquired surface view and the encoder
/// recording into it. Every pass opened through [`pass`](Self::pass) loads the
/// existing contents, so draws layer on top of the clear.
pub struct RenderFrame<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub format: wgpu::TextureFormat,
    pub viewport: Viewport,

    encoder: &'a mut wgpu::CommandEncoder,
    view: &'a wgpu::TextureView,
}

impl<'a> RenderFrame<'a> {
    pub(crate) fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        format: wgpu::TextureFormat,
        viewport: Viewport,
        encoder: &'a mut wgpu::CommandEncoder,
        view: &'a wgpu::TextureView,
    ) -> Self {
        Self { device, queue, format, viewport, encoder, view }
    }

    /// Width over height of the drawable area.
    pub fn aspect(&self) -> f32 {
        self.viewport.aspect()
    }

    /// Fills the whole target with `color`.
    pub(crate) fn clear(&mut self, color: Color) {
        let _pass = self.begin(Some("ember clear"), wgpu::LoadOp::Clear(color.clamped().to_wgpu()));
    }

    /// Opens a color pass over the frame's target that keeps what is already drawn.
    pub fn pass(&mut self, label: &str) -> wgpu::RenderPass<'_> {
        self.begin(Some(label), wgpu::LoadOp::Load)
    }

    fn begin(&mut self, label: Option<&str>, load: wgpu::LoadOp<wgpu::Color>) -> wgpu::RenderPass<'_> {
        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label,
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}
