//! Overlay Studio CLI: lay out text overlays and generate transformed media.
//!
//! Usage:
//!   overlay-studio upload <FILE>          Upload media and start a document
//!   overlay-studio init <ASSET_ID>        Start a document for media already uploaded
//!   overlay-studio layer add|remove|list|set
//!   overlay-studio logo set|clear
//!   overlay-studio compile                Print the transformation string and URL
//!   overlay-studio preview                Write an approximate SVG preview
//!   overlay-studio generate               Build the final URL and notify the webhook
//!   overlay-studio template save|list|apply
//!   overlay-studio preset list|apply
//!   overlay-studio anchor <X> <Y>         Show how a position resolves
//!   overlay-studio check                  Show configuration and document issues
//!
//! The document lives in a JSON file (`--doc`, default `overlay.json`).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use studio_common::AppConfig;
use studio_overlay_model::{Anchor, FontWeight, MediaKind, TextAlign};

mod commands;

#[derive(Parser)]
#[command(
    name = "overlay-studio",
    about = "Text and logo overlays compiled into media transformation URLs",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Overlay document file
    #[arg(long, global = true, default_value = "overlay.json")]
    doc: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a document for media that is already uploaded
    Init {
        /// Remote asset identifier
        asset_id: String,

        /// Media kind: image or video
        #[arg(long, default_value = "image")]
        kind: MediaKind,

        /// Delivery URL of the untransformed media
        #[arg(long)]
        url: Option<String>,

        /// Intrinsic width in pixels
        #[arg(long, requires = "height")]
        width: Option<u32>,

        /// Intrinsic height in pixels
        #[arg(long, requires = "width")]
        height: Option<u32>,
    },

    /// Upload base media (starts a new document) or a logo
    Upload {
        /// Local file to upload
        file: PathBuf,

        /// Upload as the document's logo instead of new base media
        #[arg(long)]
        logo: bool,
    },

    /// Add, remove, list, or edit text layers
    Layer {
        #[command(subcommand)]
        action: LayerAction,
    },

    /// Place or remove the logo
    Logo {
        #[command(subcommand)]
        action: LogoAction,
    },

    /// Print the transformation string and delivery URL
    Compile,

    /// Write an approximate SVG preview
    Preview {
        /// Output SVG file
        #[arg(short, long, default_value = "preview.svg")]
        output: PathBuf,

        /// Local copy of the base image, used for its dimensions and as background
        #[arg(long)]
        media: Option<PathBuf>,

        /// Playback time for video documents (seconds or m:ss)
        #[arg(long, value_parser = parse_seconds)]
        time: Option<f64>,
    },

    /// Build the final URL and notify the webhook
    Generate {
        /// Launch URL carrying user_id and security_code
        #[arg(long)]
        launch_url: Option<String>,

        /// User identifier (overrides the launch URL)
        #[arg(long)]
        user_id: Option<String>,

        /// Security code (overrides the launch URL)
        #[arg(long)]
        security_code: Option<String>,
    },

    /// Save, list, or apply named style templates
    Template {
        #[command(subcommand)]
        action: TemplateAction,
    },

    /// List or apply built-in style presets
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },

    /// Show the anchor and offsets a position resolves to
    Anchor {
        /// Horizontal position in percent
        #[arg(allow_hyphen_values = true)]
        x: f64,

        /// Vertical position in percent
        #[arg(allow_hyphen_values = true)]
        y: f64,
    },

    /// Show configuration, fonts, and document issues
    Check,
}

#[derive(Subcommand)]
pub enum LayerAction {
    /// Append a default layer
    Add,

    /// Remove a layer (1-based index)
    Remove { index: usize },

    /// List layers in stacking order
    List,

    /// Edit one layer
    Set(LayerEdit),
}

/// Field edits for one layer. Unset flags leave the field unchanged.
#[derive(Args)]
pub struct LayerEdit {
    /// Layer to edit (1-based index)
    pub index: usize,

    #[arg(long)]
    pub text: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub x: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    pub y: Option<f64>,

    /// Named position preset, e.g. top-left or bottom-center
    #[arg(long)]
    pub at: Option<String>,

    #[arg(long)]
    pub font: Option<String>,

    #[arg(long)]
    pub size: Option<u32>,

    #[arg(long)]
    pub weight: Option<WeightArg>,

    #[arg(long)]
    pub align: Option<AlignArg>,

    #[arg(long)]
    pub color: Option<String>,

    #[arg(long)]
    pub stroke_width: Option<u32>,

    #[arg(long)]
    pub stroke_color: Option<String>,

    #[arg(long)]
    pub shadow: Option<bool>,

    #[arg(long)]
    pub shadow_color: Option<String>,

    #[arg(long)]
    pub shadow_blur: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    pub shadow_x: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    pub shadow_y: Option<f64>,

    #[arg(long)]
    pub curved: Option<bool>,

    /// Arc angle in degrees; negative bends downward
    #[arg(long, allow_hyphen_values = true)]
    pub curve_angle: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    pub rotation: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    pub letter_spacing: Option<i32>,

    /// Window start (seconds or m:ss)
    #[arg(long, value_parser = parse_seconds)]
    pub start: Option<f64>,

    /// Window end (seconds or m:ss)
    #[arg(long, value_parser = parse_seconds, conflicts_with = "to_end")]
    pub end: Option<f64>,

    /// Run to the end of the media
    #[arg(long)]
    pub to_end: bool,

    #[arg(long)]
    pub enabled: Option<bool>,
}

#[derive(Subcommand)]
pub enum LogoAction {
    /// Place an uploaded image as the logo
    Set {
        /// Remote asset identifier of the logo
        asset_id: String,

        #[arg(long, default_value = "120")]
        width: u32,

        /// Anchor, e.g. north_west or bottom-right
        #[arg(long, default_value = "north_west")]
        anchor: Anchor,

        #[arg(long, value_parser = parse_seconds)]
        start: Option<f64>,

        #[arg(long, value_parser = parse_seconds)]
        end: Option<f64>,
    },

    /// Remove the logo
    Clear,
}

#[derive(Subcommand)]
pub enum TemplateAction {
    /// Save a layer's style under a name
    Save { name: String, layer: usize },

    /// List saved templates
    List,

    /// Apply a template to a layer
    Apply { name: String, layer: usize },
}

#[derive(Subcommand)]
pub enum PresetAction {
    /// List built-in presets
    List,

    /// Apply a preset to a layer
    Apply { key: String, layer: usize },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum WeightArg {
    Normal,
    Bold,
}

impl From<WeightArg> for FontWeight {
    fn from(arg: WeightArg) -> Self {
        match arg {
            WeightArg::Normal => FontWeight::Normal,
            WeightArg::Bold => FontWeight::Bold,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AlignArg {
    Left,
    Center,
    Right,
}

impl From<AlignArg> for TextAlign {
    fn from(arg: AlignArg) -> Self {
        match arg {
            AlignArg::Left => TextAlign::Left,
            AlignArg::Center => TextAlign::Center,
            AlignArg::Right => TextAlign::Right,
        }
    }
}

fn parse_seconds(input: &str) -> Result<f64, String> {
    studio_common::parse_timecode(input)
        .ok_or_else(|| format!("Invalid time '{input}': use seconds or m:ss"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load();

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    studio_common::logging::init_logging(&logging);

    let doc = cli.doc;
    match cli.command {
        Commands::Init {
            asset_id,
            kind,
            url,
            width,
            height,
        } => commands::init::run(&doc, asset_id, kind, url, width.zip(height)),
        Commands::Upload { file, logo } => commands::upload::run(&config, &doc, file, logo).await,
        Commands::Layer { action } => commands::layer::run(&doc, action),
        Commands::Logo { action } => commands::logo::run(&doc, action),
        Commands::Compile => commands::compile::run(&config, &doc),
        Commands::Preview {
            output,
            media,
            time,
        } => commands::preview::run(&config, &doc, output, media, time),
        Commands::Generate {
            launch_url,
            user_id,
            security_code,
        } => commands::generate::run(&config, &doc, launch_url, user_id, security_code).await,
        Commands::Template { action } => commands::template::run(&config, &doc, action),
        Commands::Preset { action } => commands::preset::run(&doc, action),
        Commands::Anchor { x, y } => commands::anchor::run(&config, x, y),
        Commands::Check => commands::check::run(&config, &doc),
    }
}
