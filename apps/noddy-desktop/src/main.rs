use anyhow::Result;
use clap::Parser;
use noddy_core::{
    DEFAULT_MAP_TEXTURE, DEFAULT_TIME_SCALE, FrameDriver, FrameScheduler, Material, RenderContext,
    Scene, ShaderSetId, SystemTimeSource, TextureBinding, ViewportState, create_surface,
};
use noddy_render_wgpu::{LogoRenderer, RenderError, SurfaceFrame};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "noddy-desktop", about = "Animated world map logo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Shader set driving the logo (nodd or noddy)
    #[arg(long, default_value = "nodd")]
    shader_set: ShaderSetId,

    /// World map image
    #[arg(long, default_value = DEFAULT_MAP_TEXTURE)]
    texture: PathBuf,

    /// Initial window width in pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value = "720")]
    height: u32,

    /// Shader time units per elapsed millisecond
    #[arg(long, default_value_t = DEFAULT_TIME_SCALE)]
    time_scale: f64,

    /// Exit after this many frames
    #[arg(long)]
    frames: Option<u64>,
}

/// Redraw requests are the host's "next frame" tick.
struct WindowScheduler<'a>(&'a Window);

impl FrameScheduler for WindowScheduler<'_> {
    fn request_next_frame(&mut self) {
        self.0.request_redraw();
    }
}

struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: LogoRenderer,
    driver: FrameDriver<SystemTimeSource>,
}

struct GpuApp {
    cli: Cli,
    gpu: Option<Gpu>,
    error: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(cli: Cli) -> Self {
        Self {
            cli,
            gpu: None,
            error: None,
        }
    }

    fn init(&self, event_loop: &ActiveEventLoop) -> Result<Gpu> {
        let attrs = Window::default_attributes()
            .with_title("noddy")
            .with_inner_size(PhysicalSize::new(self.cli.width, self.cli.height));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| anyhow::anyhow!("no compatible GPU adapter"))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("noddy_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let material = Material::new(
            self.cli.shader_set,
            TextureBinding::world_map(self.cli.texture.clone()),
        );
        let surface_desc = create_surface(material);
        let renderer = LogoRenderer::new(
            &device,
            &queue,
            surface_format,
            &surface_desc.material,
            surface_desc.geometry(),
        )
        .map_err(|e: RenderError| anyhow::anyhow!("{}: {e}", self.cli.texture.display()))?;

        let context = RenderContext::new(
            ViewportState::new(config.width, config.height),
            Scene::with_surface(surface_desc),
        );
        let driver =
            FrameDriver::with_time_scale(context, SystemTimeSource::new(), self.cli.time_scale);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Gpu {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            driver,
        })
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match self.init(event_loop) {
            Ok(gpu) => {
                gpu.window.request_redraw();
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("startup failed: {e}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                gpu.config.width = new_size.width.max(1);
                gpu.config.height = new_size.height.max(1);
                gpu.surface.configure(&gpu.device, &gpu.config);
                gpu.driver.resize(gpu.config.width, gpu.config.height);
            }
            WindowEvent::RedrawRequested => {
                let output = match gpu.surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        gpu.surface.configure(&gpu.device, &gpu.config);
                        gpu.window.request_redraw();
                        return;
                    }
                    Err(e) => {
                        tracing::error!("surface error: {e}");
                        gpu.window.request_redraw();
                        return;
                    }
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                let mut frame = SurfaceFrame {
                    renderer: &gpu.renderer,
                    device: &gpu.device,
                    queue: &gpu.queue,
                    view: &view,
                };
                let mut scheduler = WindowScheduler(&gpu.window);
                gpu.driver.step(&mut frame, &mut scheduler);

                gpu.window.pre_present_notify();
                output.present();

                if self
                    .cli
                    .frames
                    .is_some_and(|limit| gpu.driver.frame_count() >= limit)
                {
                    tracing::info!(frames = gpu.driver.frame_count(), "frame limit reached");
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!(shader_set = %cli.shader_set, "noddy-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = GpuApp::new(cli);
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
