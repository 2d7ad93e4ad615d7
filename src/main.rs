use anyhow::{Context, Result};
use arto::{Config, Editor, EditorConfig, ImageFormat, NoticeLevel, Script, SymmetryMode};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "arto")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("ARTO_GIT_HASH"), ")"),
    about = "Symmetric drawing canvas with brushes, shapes and image export"
)]
struct Cli {
    /// Replay a recorded session (JSON or TOML list of editor commands)
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Write the finished artwork to this path
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,

    /// Image format for --output (png or jpg); inferred from the extension if omitted
    #[arg(long, short = 'f', value_name = "FORMAT")]
    format: Option<ImageFormat>,

    /// JPEG quality between 0.0 and 1.0
    #[arg(long, short = 'q', value_name = "QUALITY")]
    quality: Option<f64>,

    /// Canvas width in pixels
    #[arg(long, value_name = "PX")]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long, value_name = "PX")]
    height: Option<u32>,

    /// Initial symmetry mode (none, horizontal, vertical, quad)
    #[arg(long, value_name = "MODE")]
    symmetry: Option<SymmetryMode>,

    /// Print the artwork as a data URL on stdout
    #[arg(long, action = ArgAction::SetTrue)]
    data_url: bool,

    /// Copy the artwork to the clipboard
    #[arg(long, short = 'c', action = ArgAction::SetTrue)]
    copy: bool,

    /// Forward editor notices as desktop notifications
    #[arg(long, short = 'n', action = ArgAction::SetTrue)]
    notify: bool,

    /// Use this config file instead of ~/.config/arto/config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let Some(script_path) = cli.script.as_deref() else {
        print_usage();
        return Ok(());
    };

    let mut config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|err| {
            log::warn!("Failed to load config, using defaults: {:#}", err);
            Config::default()
        }),
    };
    if let Some(width) = cli.width {
        config.canvas.width = width;
    }
    if let Some(height) = cli.height {
        config.canvas.height = height;
    }
    if let Some(mode) = cli.symmetry {
        config.drawing.symmetry = mode;
    }
    config.validate_and_clamp();

    let script = Script::load(script_path)?;
    let mut editor = Editor::new(EditorConfig::from(&config));
    script.run(&mut editor);

    let quality = cli.quality.unwrap_or(config.export.quality);

    if let Some(output) = cli.output.as_deref() {
        let format = match cli.format {
            Some(format) => format,
            None => output
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(|ext| ext.parse().ok())
                .unwrap_or(config.export.format),
        };
        let path = editor
            .save_to(output, format, quality)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("Saved {}", path.display());
    }

    if cli.data_url {
        let url = editor.image_data_url(cli.format.unwrap_or(config.export.format), quality)?;
        println!("{url}");
    }

    if cli.copy {
        // Clipboard failures are reported as notices below.
        let _ = editor.copy_to_clipboard();
    }

    let availability = editor.availability();
    log::info!(
        "Applied {} commands: {} objects, undo {}, redo {}",
        script.commands.len(),
        editor.scene().content_count(),
        if availability.can_undo { "available" } else { "unavailable" },
        if availability.can_redo { "available" } else { "unavailable" },
    );

    let notices = editor.take_notices();
    for notice in &notices {
        match notice.level {
            NoticeLevel::Info => log::info!("{}", notice.message),
            _ => eprintln!("{notice}"),
        }
    }
    if cli.notify {
        arto::notification::send_notices_blocking(&notices);
    }

    Ok(())
}

fn print_usage() {
    println!("arto: Symmetric drawing canvas with brushes, shapes and image export");
    println!();
    println!("Usage:");
    println!("  arto --script session.toml --output art.png   Replay a session and save it");
    println!("  arto --script session.json --data-url         Print the artwork as a data URL");
    println!("  arto --help                                   Show help");
    println!();
    println!("Session files list editor commands, for example:");
    println!("  [[commands]]");
    println!("  op = \"set_symmetry\"");
    println!("  mode = \"quad\"");
    println!();
    println!("  [[commands]]");
    println!("  op = \"stroke\"");
    println!("  points = [[10.0, 10.0], [60.0, 40.0]]");
}
