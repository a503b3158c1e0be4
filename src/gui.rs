//! Immediate-mode GUI context: egui plus its winit event sink and wgpu
//! renderer. One instance lives as long as the window.

use egui::{ClippedPrimitive, TexturesDelta};
use egui_wgpu::ScreenDescriptor;
use winit::event::WindowEvent;
use winit::window::Window;

pub struct GuiContext {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl GuiContext {
    pub fn new(
        window: &Window,
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        scale_factor: f32,
    ) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            ctx.viewport_id(),
            window,
            Some(scale_factor),
            window.theme(),
            Some(device.limits().max_texture_dimension_2d as usize),
        );
        let renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            ctx,
            state,
            renderer,
        }
    }

    /// Forward a window event to egui. Returns true when egui consumed it.
    pub fn on_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Run the GUI pass for this frame and tessellate the output.
    pub fn prepare(
        &mut self,
        window: &Window,
        mut build: impl FnMut(&egui::Context),
    ) -> (Vec<ClippedPrimitive>, TexturesDelta) {
        let raw_input = self.state.take_egui_input(window);
        let full_output = self.ctx.run(raw_input, |ctx| build(ctx));
        self.state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        (primitives, full_output.textures_delta)
    }

    /// Upload texture changes and vertex data ahead of the render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[ClippedPrimitive],
        textures_delta: &TexturesDelta,
        screen: &ScreenDescriptor,
    ) -> Vec<wgpu::CommandBuffer> {
        for (id, image_delta) in &textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }
        self.renderer
            .update_buffers(device, queue, encoder, primitives, screen)
    }

    /// Paint the tessellated GUI into an open render pass.
    pub fn paint(
        &mut self,
        pass: &mut wgpu::RenderPass<'static>,
        primitives: &[ClippedPrimitive],
        screen: &ScreenDescriptor,
    ) {
        self.renderer.render(pass, primitives, screen);
    }

    /// Free textures egui no longer needs; call after the frame is submitted.
    pub fn cleanup(&mut self, textures_delta: &TexturesDelta) {
        for id in &textures_delta.free {
            self.renderer.free_texture(id);
        }
    }

    pub fn pixels_per_point(&self) -> f32 {
        self.ctx.pixels_per_point()
    }
}
