use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use coco_overlay::common::{OverlayConfig, DEFAULT_DPI};
use coco_overlay::OverlayError;

#[derive(Parser, Debug)]
#[command(name = "coco_overlay", version, about = "Visualize COCO bboxes in a folder.")]
struct Cli {
    /// Folder containing 1 COCO JSON and the images
    folder: PathBuf,

    /// Show images interactively
    #[arg(long, default_value_t = false)]
    show: bool,

    /// Directory to save overlay images (PNG)
    #[arg(long)]
    save: Option<PathBuf>,

    /// Optional comma-separated image file names to limit visualization (e.g. 'img1.png,img2.jpg')
    #[arg(long)]
    subset: Option<String>,

    /// Rendering resolution; scales label text and line widths
    #[arg(long, default_value_t = DEFAULT_DPI, value_parser = clap::value_parser!(u32).range(1..))]
    dpi: u32,

    /// TrueType font used for label text
    #[arg(long)]
    font: Option<PathBuf>,

    /// Comma-separated '#rrggbb' colours cycled over the categories
    #[arg(long)]
    palette: Option<String>,
}

impl From<Cli> for OverlayConfig {
    fn from(cli: Cli) -> Self {
        OverlayConfig::new(cli.folder)
            .with_show(cli.show)
            .with_save_dir(cli.save)
            .with_subset(cli.subset.as_deref())
            .with_dpi(cli.dpi)
            .with_font_path(cli.font)
            .with_palette(cli.palette)
    }
}

fn main() {
    init_logger();

    let config = OverlayConfig::from(Cli::parse());

    if let Err(err) = coco_overlay::run(&config).context("overlay run failed") {
        match err.downcast_ref::<OverlayError>() {
            Some(OverlayError::Input(_)) => eprintln!("Error: {}", err.root_cause()),
            _ => {
                log::error!("{}", err);
                for cause in err.chain().skip(1) {
                    log::error!("caused by: {}", cause);
                }
            }
        }
        std::process::exit(1);
    }
}

fn init_logger() {
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_env("RUST_LOG");
    } else {
        builder.filter(Some("coco_overlay"), LevelFilter::Info);
        builder.filter(None, LevelFilter::Warn);
    }

    builder.format_timestamp(None).init();
}
