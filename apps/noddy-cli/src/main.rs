use clap::{Parser, Subcommand};
use noddy_core::{
    DEFAULT_MAP_TEXTURE, DEFAULT_TIME_SCALE, DebugTextTarget, FrameDriver, FrameScheduler,
    ManualTimeSource, Material, RenderContext, SURFACE_HEIGHT, SURFACE_WIDTH, Scene, ShaderSetId,
    TextureBinding, ViewportState, compute_projection, create_surface,
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "noddy-cli", about = "Inspect the logo projection and frame timeline")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, shader sets and surface constants
    Info,
    /// Print the orthographic projection for a viewport
    Projection {
        #[arg(long, default_value = "1920")]
        width: u32,
        #[arg(long, default_value = "1080")]
        height: u32,
    },
    /// Step the frame loop against a simulated clock and print each draw
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "10")]
        frames: u64,
        /// Simulated milliseconds between frames
        #[arg(short, long, default_value = "16")]
        interval_ms: u64,
        /// Shader set driving the logo
        #[arg(long, default_value = "nodd")]
        shader_set: ShaderSetId,
        /// Shader time units per elapsed millisecond
        #[arg(long, default_value_t = DEFAULT_TIME_SCALE)]
        time_scale: f64,
    },
}

/// Counts requests instead of waiting on a display.
#[derive(Default)]
struct CountingScheduler {
    requested: u64,
}

impl FrameScheduler for CountingScheduler {
    fn request_next_frame(&mut self) {
        self.requested += 1;
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "trace" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("noddy-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("core: {}", noddy_core::crate_info());
            let sets: Vec<&str> = ShaderSetId::ALL.iter().map(|s| s.identifier()).collect();
            println!("shader sets: {}", sets.join(", "));
            println!("surface: {SURFACE_WIDTH:.3} x {SURFACE_HEIGHT:.3}");
            println!("time scale: {DEFAULT_TIME_SCALE:e} per ms");
            println!("map texture: {DEFAULT_MAP_TEXTURE}");
        }
        Commands::Projection { width, height } => {
            let viewport = ViewportState::new(width, height);
            let p = compute_projection(width, height);
            println!(
                "viewport {}x{} aspect={}",
                viewport.width,
                viewport.height,
                viewport.aspect_ratio()
            );
            println!(
                "left={} right={} top={} bottom={} near={} far={}",
                p.left, p.right, p.top, p.bottom, p.near, p.far
            );
            println!("view_proj={:?}", p.view_projection().to_cols_array_2d());
        }
        Commands::Simulate {
            frames,
            interval_ms,
            shader_set,
            time_scale,
        } => {
            let material = Material::new(shader_set, TextureBinding::world_map(DEFAULT_MAP_TEXTURE));
            let context = RenderContext::new(
                ViewportState::new(1920, 1080),
                Scene::with_surface(create_surface(material)),
            );

            let source = ManualTimeSource::new();
            let mut driver = FrameDriver::with_time_scale(context, &source, time_scale);
            let mut target = DebugTextTarget::new();
            let mut scheduler = CountingScheduler::default();

            if frames > 0 {
                driver.run_until(&mut target, &mut scheduler, |report| {
                    source.advance(Duration::from_millis(interval_ms));
                    report.frame_index + 1 >= frames
                });
            }

            let draws = target.draw_count();
            print!("{}", target.into_text());
            println!(
                "frames={} draws={} next_frame_requests={}",
                driver.frame_count(),
                draws,
                scheduler.requested
            );
        }
    }

    Ok(())
}
