use clap::{Parser, Subcommand};
use colorcube_camera::{CUBE_SIZE, CameraState, DOLLY_STEP, ROTATION_SENSITIVITY};
use colorcube_geometry::{CUBE_FACES, CUBE_VERTICES};
use colorcube_input::{InputSession, PointerButton};
use colorcube_render::{DebugTextRenderer, FrameLayout, Projection, Renderer, frame_matrix};
use glam::Vec2;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "colorcube-cli", about = "Inspect the cube viewer without a window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and viewer constants
    Info,
    /// Replay drags and scroll ticks, then print the resulting frame
    Frame {
        /// Window width in pixels
        #[arg(long, default_value_t = 600)]
        width: u32,
        /// Window height in pixels
        #[arg(long, default_value_t = 600)]
        height: u32,
        /// Drag by DX DY pixels with the primary button; repeatable
        #[arg(long, num_args = 2, value_names = ["DX", "DY"], allow_negative_numbers = true)]
        drag: Vec<f32>,
        /// Scroll ticks; positive dollies in, negative dollies out
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        scroll: i32,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct FrameReport {
    camera: CameraState,
    layout: FrameLayout,
    aspect: f32,
    matrix: [[f32; 4]; 4],
}

/// Feed drags and wheel ticks through the same input path as the viewer.
fn replay(drags: &[f32], scroll: i32) -> CameraState {
    let mut session = InputSession::new();
    let mut camera = CameraState::new();
    // Each drag starts where the previous one ended, like a real pointer.
    let mut cursor = Vec2::ZERO;

    for pair in drags.chunks_exact(2) {
        let offset = Vec2::new(pair[0], pair[1]);
        let actions = [
            session.button(PointerButton::Primary, true),
            session.cursor_moved(cursor + offset),
            session.button(PointerButton::Primary, false),
        ];
        for action in actions {
            session.apply(action, &mut camera);
        }
        cursor += offset;
        tracing::debug!(
            "drag ({}, {}) -> rotation {:?}",
            pair[0],
            pair[1],
            camera.rotation_accumulated
        );
    }

    let tick = if scroll >= 0 { 1.0 } else { -1.0 };
    for _ in 0..scroll.unsigned_abs() {
        let action = session.wheel(tick);
        session.apply(action, &mut camera);
    }
    camera
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            let projection = Projection::default();
            println!("colorcube-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", colorcube_render::crate_info());
            println!(
                "geometry: {} vertices, {} faces",
                CUBE_VERTICES.len(),
                CUBE_FACES.len()
            );
            println!(
                "projection: fov={} near={} far={}",
                projection.fov_degrees, projection.near, projection.far
            );
            println!(
                "camera: sensitivity={ROTATION_SENSITIVITY} dolly_step={DOLLY_STEP} cube_size={CUBE_SIZE}"
            );
        }
        Commands::Frame {
            width,
            height,
            drag,
            scroll,
            json,
        } => {
            let camera = replay(&drag, scroll);
            let layout = FrameLayout::from_size(width, height);
            if json {
                let report = FrameReport {
                    camera,
                    layout,
                    aspect: layout.aspect(),
                    matrix: frame_matrix(&camera, &layout).to_cols_array_2d(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", DebugTextRenderer::new().render(&camera, &layout));
            }
        }
    }

    Ok(())
}
