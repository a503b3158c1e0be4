//! wgpu surface, device, and presentation configuration for the window.

use std::sync::Arc;

use tracing::{info, warn};
use winit::window::Window;

use crate::config::SyncMode;
use crate::error::InitError;

/// Map the requested sync mode onto a present mode the surface supports.
/// Degradation is best-effort: an unsupported request is logged and replaced,
/// never fatal.
fn choose_present_mode(sync_mode: SyncMode, available: &[wgpu::PresentMode]) -> wgpu::PresentMode {
    match sync_mode {
        SyncMode::Adaptive => {
            if available.contains(&wgpu::PresentMode::FifoRelaxed) {
                wgpu::PresentMode::FifoRelaxed
            } else {
                warn!("adaptive sync unsupported by surface, falling back to vsync");
                wgpu::PresentMode::Fifo
            }
        }
        SyncMode::Disabled => {
            if available.contains(&wgpu::PresentMode::Immediate) {
                wgpu::PresentMode::Immediate
            } else if available.contains(&wgpu::PresentMode::Mailbox) {
                wgpu::PresentMode::Mailbox
            } else {
                warn!("unsynchronized presentation unsupported by surface, using vsync");
                wgpu::PresentMode::Fifo
            }
        }
    }
}

/// True when the mode paces frames to the display, making the loop's own
/// pacing sleep unnecessary.
fn paced_by_display(mode: wgpu::PresentMode) -> bool {
    matches!(
        mode,
        wgpu::PresentMode::Fifo | wgpu::PresentMode::FifoRelaxed | wgpu::PresentMode::AutoVsync
    )
}

/// Owns the render surface and device for the lifetime of the window.
pub struct GfxContext {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    vsync_active: bool,
}

impl GfxContext {
    pub fn new(window: Arc<Window>, sync_mode: SyncMode) -> Result<Self, InitError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(InitError::NoAdapter)?;
        info!("graphics adapter: {}", adapter.get_info().name);

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("padview device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
            },
            None,
        ))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(caps.formats[0]);
        let present_mode = choose_present_mode(sync_mode, &caps.present_modes);
        let vsync_active = paced_by_display(present_mode);
        info!("present mode: {present_mode:?}");

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            desired_maximum_frame_latency: 2,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            vsync_active,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Re-apply the current configuration after a lost or outdated surface.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn begin_frame(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn vsync_active(&self) -> bool {
        self.vsync_active
    }
}
