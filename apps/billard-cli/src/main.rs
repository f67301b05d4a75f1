use anyhow::{Context, Result, bail};
use billard_camera::MotionMode;
use billard_input::{InputEvent, Key};
use billard_render::{FrameDriver, FrameOutcome, RecordingBackend, render_text};
use billard_scene::ViewerConfig;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "billard-cli", about = "CLI tool for the billard viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Load and validate a viewer configuration
    Validate {
        /// YAML configuration file
        config: PathBuf,
    },
    /// Print the built-in configuration as YAML
    DefaultConfig,
    /// Run frames headless and print the recorded draw calls
    DumpFrame {
        /// YAML configuration file; the built-in billiard room when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Number of frames to run
        #[arg(short, long, default_value = "1")]
        frames: u32,
        /// Keys held for every frame (w, a, s, d, up, down, left, right)
        #[arg(long, value_delimiter = ',')]
        hold: Vec<String>,
        /// Scroll offset applied on the first frame
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        scroll: f32,
        /// Scale motion by this frame time in seconds instead of fixed steps
        #[arg(long)]
        elapsed: Option<f32>,
        /// Aspect ratio for the projection; the window's when omitted
        #[arg(long)]
        aspect: Option<f32>,
        /// Only print the last frame
        #[arg(long)]
        last: bool,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn load(path: Option<&Path>) -> Result<ViewerConfig> {
    match path {
        Some(path) => ViewerConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(ViewerConfig::default()),
    }
}

fn parse_keys(names: &[String]) -> Result<Vec<Key>> {
    names
        .iter()
        .map(|name| Key::from_name(name).with_context(|| format!("unknown key {name:?}")))
        .collect()
}

struct DumpOptions {
    frames: u32,
    hold: Vec<Key>,
    scroll: f32,
    dt: f32,
    aspect: f32,
    last: bool,
}

/// Drive `frames` frames against a recording backend and return the text
/// or JSON listing.
fn dump(config: &ViewerConfig, opts: &DumpOptions, json: bool) -> Result<String> {
    let mut driver = FrameDriver::from_config(config);
    let mut backend = RecordingBackend::new();
    let mut frames = Vec::new();

    for i in 0..opts.frames {
        let mut events = Vec::new();
        if i == 0 {
            events.extend(opts.hold.iter().map(|k| InputEvent::KeyPressed(*k)));
            if opts.scroll != 0.0 {
                events.push(InputEvent::Scroll { y: opts.scroll });
            }
        }
        let Ok(outcome) = driver.frame(events, opts.dt, opts.aspect, &mut backend);
        if outcome == FrameOutcome::Exit {
            tracing::info!(frame = i, "exit requested, stopping");
            break;
        }
        if opts.last {
            frames.clear();
        }
        frames.push(backend.take());
    }

    let camera = driver.camera();
    tracing::debug!(
        position = %camera.position(),
        yaw = camera.yaw(),
        pitch = camera.pitch(),
        zoom = camera.zoom(),
        "final camera"
    );

    if json {
        return Ok(serde_json::to_string_pretty(&frames)?);
    }
    let mut out = render_text(&frames.concat());
    out.push_str(&format!(
        "camera: pos=({:.3}, {:.3}, {:.3}) yaw={:.1} pitch={:.1} zoom={:.1}\n",
        camera.position().x,
        camera.position().y,
        camera.position().z,
        camera.yaw(),
        camera.pitch(),
        camera.zoom()
    ));
    Ok(out)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("billard-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", billard_common::crate_info());
            println!("camera: {}", billard_camera::crate_info());
            println!("input: {}", billard_input::crate_info());
            println!("scene: {}", billard_scene::crate_info());
            println!("render: {}", billard_render::crate_info());
        }
        Commands::Validate { config } => {
            let loaded = load(Some(&config))?;
            println!(
                "{}: OK ({} shaders, {} meshes, {} targets)",
                config.display(),
                loaded.shaders.len(),
                loaded.meshes.len(),
                loaded.scene.targets.len()
            );
        }
        Commands::DefaultConfig => {
            print!("{}", ViewerConfig::default().to_yaml()?);
        }
        Commands::DumpFrame {
            config,
            frames,
            hold,
            scroll,
            elapsed,
            aspect,
            last,
            json,
        } => {
            if frames == 0 {
                bail!("--frames must be at least 1");
            }
            let mut config = load(config.as_deref())?;
            let dt = match elapsed {
                Some(dt) => {
                    config.input.motion = MotionMode::elapsed_default();
                    dt
                }
                None => 1.0 / 60.0,
            };
            let opts = DumpOptions {
                frames,
                hold: parse_keys(&hold)?,
                scroll,
                dt,
                aspect: aspect.unwrap_or_else(|| config.aspect_ratio()),
                last,
            };
            print!("{}", dump(&config, &opts, json)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(frames: u32, hold: Vec<Key>) -> DumpOptions {
        DumpOptions {
            frames,
            hold,
            scroll: 0.0,
            dt: 1.0 / 60.0,
            aspect: 1.0,
            last: false,
        }
    }

    #[test]
    fn dump_is_reproducible() {
        let config = ViewerConfig::default();
        let a = dump(&config, &opts(3, vec![Key::W, Key::Right]), false).unwrap();
        let b = dump(&config, &opts(3, vec![Key::W, Key::Right]), false).unwrap();
        assert_eq!(a, b);
        assert!(a.contains("=== frame 2"));
        assert_eq!(a.matches("=== end ===").count(), 3);
        assert!(a.contains("use ball\n"));
    }

    #[test]
    fn ten_forward_frames_reach_one_unit() {
        let config = ViewerConfig::default();
        let out = dump(&config, &opts(10, vec![Key::W]), false).unwrap();
        // front is -Z at the default yaw
        assert!(out.contains(", 10.000, 19.000) yaw=-90.0"), "{out}");
    }

    #[test]
    fn escape_stops_early() {
        let config = ViewerConfig::default();
        let out = dump(&config, &opts(5, vec![Key::Escape]), false).unwrap();
        assert!(!out.contains("=== frame"));
    }

    #[test]
    fn json_frames_are_arrays_of_ops() {
        let config = ViewerConfig::default();
        let mut o = opts(2, Vec::new());
        o.last = true;
        let out = dump(&config, &o, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let frames = value.as_array().unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0][0]["op"], "begin_frame");
    }

    #[test]
    fn unknown_key_names_are_rejected() {
        assert!(parse_keys(&["w".to_string(), "UP".to_string()]).is_ok());
        assert!(parse_keys(&["space".to_string()]).is_err());
    }

    #[test]
    fn cli_parses_dump_frame() {
        let cli = Cli::parse_from([
            "billard-cli",
            "dump-frame",
            "--frames",
            "4",
            "--hold",
            "w,left",
            "--scroll",
            "-2",
            "--json",
        ]);
        match cli.command {
            Commands::DumpFrame {
                frames,
                hold,
                scroll,
                json,
                ..
            } => {
                assert_eq!(frames, 4);
                assert_eq!(hold, vec!["w", "left"]);
                assert_eq!(scroll, -2.0);
                assert!(json);
            }
            _ => panic!("expected dump-frame"),
        }
    }
}
