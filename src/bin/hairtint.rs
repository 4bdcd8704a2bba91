use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hairtint", version)]
struct Cli {
    /// Try-on config JSON. `HAIRTINT_*` environment overrides apply on top.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recolor a single image and write a PNG.
    Frame(FrameArgs),
    /// Run a directory of frames through a full session and write PNGs.
    Sequence(SequenceArgs),
    /// List the preset hair colors.
    Palette,
    /// Recolor an image and keep it as a saved look.
    Snapshot(SnapshotArgs),
    /// Manage saved looks.
    Looks {
        #[command(subcommand)]
        cmd: LooksCommand,
    },
}

#[derive(Args, Debug)]
struct ColorArgs {
    /// Preset id (see `hairtint palette`). Defaults to the configured color.
    #[arg(long, conflicts_with = "hex")]
    color: Option<String>,

    /// Custom color as `#rrggbb`.
    #[arg(long)]
    hex: Option<String>,

    /// Color strength, clamped to [0.1, 1.0].
    #[arg(long)]
    intensity: Option<f32>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Input image.
    #[arg(long)]
    image: PathBuf,

    /// Recorded detections (JSON).
    #[arg(long)]
    landmarks: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    color: ColorArgs,
}

#[derive(Args, Debug)]
struct SequenceArgs {
    /// Directory of PNG/JPEG frames, played in file-name order.
    #[arg(long)]
    frames: PathBuf,

    /// Recorded detections (JSON), one entry per frame.
    #[arg(long)]
    landmarks: PathBuf,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    color: ColorArgs,
}

#[derive(Args, Debug)]
struct SnapshotArgs {
    #[arg(long)]
    image: PathBuf,

    #[arg(long)]
    landmarks: PathBuf,

    /// Saved-looks store directory.
    #[arg(long)]
    store: PathBuf,

    /// Signed-in user name.
    #[arg(long)]
    user: String,

    #[command(flatten)]
    color: ColorArgs,
}

#[derive(Subcommand, Debug)]
enum LooksCommand {
    /// Print saved looks, newest first.
    List {
        #[arg(long)]
        store: PathBuf,
        #[arg(long)]
        user: String,
    },
    /// Remove the look at `index` (as printed by `list`).
    Remove {
        #[arg(long)]
        store: PathBuf,
        #[arg(long)]
        user: String,
        #[arg(long)]
        index: usize,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Frame(args) => cmd_frame(&config, args),
        Command::Sequence(args) => cmd_sequence(&config, args),
        Command::Palette => cmd_palette(),
        Command::Snapshot(args) => cmd_snapshot(&config, args),
        Command::Looks { cmd } => cmd_looks(cmd),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<hairtint::TryOnConfig> {
    let config = match path {
        Some(p) => hairtint::TryOnConfig::from_json_file(p)?,
        None => hairtint::TryOnConfig::default(),
    };
    let config = config.with_env_overrides();
    config.validate()?;
    Ok(config)
}

fn selection(
    config: &hairtint::TryOnConfig,
    args: &ColorArgs,
) -> anyhow::Result<hairtint::ColorSelection> {
    let mut sel = config.initial_selection()?;
    if let Some(id) = &args.color {
        let preset = hairtint::find_hair_color(id)
            .with_context(|| format!("unknown hair color '{id}' (see `hairtint palette`)"))?;
        sel.color = preset.rgb;
    }
    if let Some(hex) = &args.hex {
        sel.color = Some(hairtint::Rgb::from_hex(hex)?);
    }
    if let Some(v) = args.intensity {
        sel.intensity = hairtint::Intensity::new(v);
    }
    Ok(sel)
}

fn cmd_frame(config: &hairtint::TryOnConfig, args: FrameArgs) -> anyhow::Result<()> {
    let frame = hairtint::load_image(&args.image)?;
    let detector = hairtint::FixedDetector::from_json_file(&args.landmarks)?;
    let out = hairtint::render_still(config, frame, detector, selection(config, &args.color)?)?;
    write_png(&out, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(config: &hairtint::TryOnConfig, args: SequenceArgs) -> anyhow::Result<()> {
    let paths = frame_paths(&args.frames)?;
    let frames = paths
        .iter()
        .map(|p| hairtint::load_image(p))
        .collect::<Result<Vec<_>, _>>()?;
    let detector = hairtint::FixedDetector::from_json_file(&args.landmarks)?;
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let stats = hairtint::run_sequence(
        config,
        frames,
        detector,
        selection(config, &args.color)?,
        |i, canvas| {
            let path = args.out.join(format!("frame_{i:05}.png"));
            write_png(canvas, &path).map_err(hairtint::TintError::Other)
        },
    )?;
    eprintln!(
        "wrote {} frames ({} with overlay) to {}",
        stats.frames_drawn,
        stats.overlays_drawn,
        args.out.display()
    );
    Ok(())
}

fn cmd_palette() -> anyhow::Result<()> {
    for c in &hairtint::HAIR_COLORS {
        let rgb = match c.rgb {
            Some(rgb) => {
                let [r, g, b] = rgb.to_rgb8();
                format!("#{r:02x}{g:02x}{b:02x}")
            }
            None => "-".to_string(),
        };
        let marker = if c.id == hairtint::DEFAULT_HAIR_COLOR { " (default)" } else { "" };
        println!("{:<16} {:<8} {}{}", c.id, rgb, c.name, marker);
    }
    Ok(())
}

fn cmd_snapshot(config: &hairtint::TryOnConfig, args: SnapshotArgs) -> anyhow::Result<()> {
    let frame = hairtint::load_image(&args.image)?;
    let detector = hairtint::FixedDetector::from_json_file(&args.landmarks)?;
    let out = hairtint::render_still(config, frame, detector, selection(config, &args.color)?)?;
    let look = hairtint::CapturedLook::capture(&out, config.snapshot.jpeg_quality)?;

    let auth = hairtint::AuthState::signed_in(args.user);
    let mut looks = hairtint::SavedLooks::new(hairtint::FileStore::open(&args.store)?);
    let added = looks.save(&auth, look)?;
    let total = looks.list(&auth)?.len();
    eprintln!(
        "{} ({total} saved)",
        if added { "look saved" } else { "look already saved" }
    );
    Ok(())
}

fn cmd_looks(cmd: LooksCommand) -> anyhow::Result<()> {
    match cmd {
        LooksCommand::List { store, user } => {
            let auth = hairtint::AuthState::signed_in(user);
            let looks = hairtint::SavedLooks::new(hairtint::FileStore::open(&store)?);
            for (i, look) in looks.list(&auth)?.iter().enumerate() {
                let frame = match look.decode() {
                    Ok(frame) => frame,
                    Err(e) => {
                        tracing::warn!(index = i, error = %e, "saved look does not decode");
                        println!("{i}: undecodable, {} bytes", look.data_url().len());
                        continue;
                    }
                };
                println!(
                    "{i}: {}x{} jpeg, {} bytes",
                    frame.width,
                    frame.height,
                    look.data_url().len()
                );
            }
            Ok(())
        }
        LooksCommand::Remove { store, user, index } => {
            let auth = hairtint::AuthState::signed_in(user);
            let mut looks = hairtint::SavedLooks::new(hairtint::FileStore::open(&store)?);
            let list = looks.list(&auth)?;
            let look = list
                .get(index)
                .with_context(|| format!("no saved look at index {index} ({} saved)", list.len()))?;
            looks.remove(&auth, look)?;
            eprintln!("removed look {index}");
            Ok(())
        }
    }
}

fn frame_paths(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("read dir '{}'", dir.display()))? {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "png" | "jpg" | "jpeg"));
        if is_image {
            paths.push(path);
        }
    }
    paths.sort();
    anyhow::ensure!(!paths.is_empty(), "no frames found in '{}'", dir.display());
    Ok(paths)
}

fn write_png(frame: &hairtint::FrameRGBA, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    frame
        .to_rgba_image()?
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
