use clap::{Parser, Subcommand};
use map_poster::config::{self, ToolConfig};
use map_poster::export::{self, CanvasRasterizer, ExportError};
use map_poster::output::{self, ExportLine};
use map_poster::poster::{AspectRatio, ExportResolution, Orientation};
use map_poster::{codec, styles};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "map-poster")]
#[command(about = "Size map posters for export and pack them into share links")]
#[command(long_about = "\
Size map posters for export and pack them into share links

A poster document is JSON (or TOML, by extension) in the same shape as a
share link record. Only `style` is required; everything else falls back to
the [defaults] in poster.toml:

  {
    \"style\": \"noir\",
    \"palette\": \"charcoal\",
    \"location\": {
      \"name\": \"Kyoto\",
      \"center\": [135.7681, 35.0116],
      \"bounds\": [[135.6581, 34.9316], [135.8781, 35.0916]],
      \"zoom\": 11.5
    },
    \"format\": { \"aspectRatio\": \"ISO\", \"orientation\": \"landscape\" }
  }

Export presets keep their long edge; the short edge follows the poster's
aspect ratio and orientation.

Set RUST_LOG=debug to see why a share link was rejected.
Run 'map-poster gen-config' to generate a documented poster.toml.")]
#[command(version)]
struct Cli {
    /// Tool configuration file
    #[arg(long, default_value = "poster.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List map styles and their palettes
    Styles,
    /// Show the pixel size a poster exports at
    Resolution {
        /// Named preset from poster.toml
        #[arg(long, conflicts_with_all = ["width", "height", "dpi"])]
        preset: Option<String>,
        /// Custom base width (short edge)
        #[arg(long, requires_all = ["height", "dpi"])]
        width: Option<u32>,
        /// Custom base height (long edge)
        #[arg(long, requires_all = ["width", "dpi"])]
        height: Option<u32>,
        /// Custom DPI
        #[arg(long, requires_all = ["width", "height"])]
        dpi: Option<u32>,
        /// Aspect ratio: 2:3, 3:4, 4:5, 1:1 or ISO
        #[arg(long)]
        aspect: Option<AspectRatio>,
        /// portrait or landscape
        #[arg(long)]
        orientation: Option<Orientation>,
    },
    /// Encode a poster document as a share payload
    Encode {
        /// Poster document (.json or .toml)
        document: PathBuf,
        /// Print a full editor URL instead of the bare payload
        #[arg(long)]
        url: bool,
    },
    /// Decode a share payload or share URL
    Decode {
        /// Bare payload or URL containing `config=`
        input: String,
    },
    /// Render a poster document to PNG
    Export {
        /// Poster document (.json or .toml)
        document: PathBuf,
        /// Preset to export; repeat for several
        #[arg(long = "preset", conflicts_with = "all")]
        presets: Vec<String>,
        /// Export every configured preset
        #[arg(long)]
        all: bool,
        /// Output directory (defaults to export.output_dir)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print a stock poster.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Styles => {
            output::print_styles(styles::all_styles());
        }
        Command::Resolution {
            preset,
            width,
            height,
            dpi,
            aspect,
            orientation,
        } => {
            let tool = config::load_config(&cli.config)?;
            let mut poster = tool.default_poster()?;
            if let Some(aspect) = aspect {
                poster.format.aspect_ratio = aspect;
            }
            if let Some(orientation) = orientation {
                poster.format.orientation = orientation;
            }

            let (id, base) = match (width, height, dpi) {
                (Some(w), Some(h), Some(d)) => {
                    ("custom".to_string(), ExportResolution::new(w, h, d, "Custom"))
                }
                _ => {
                    let id = preset.unwrap_or_else(|| tool.export.default_preset.clone());
                    let base = lookup_preset(&tool, &id)?;
                    (id, base)
                }
            };
            output::print_plan(&export::plan_export(&poster, &id, &base), &poster);
        }
        Command::Encode { document, url } => {
            let tool = config::load_config(&cli.config)?;
            let poster = config::load_poster(&document, &tool)?;
            let encoded = codec::encode_config(&poster);
            if encoded.is_empty() {
                return Err(format!("could not encode {}", document.display()).into());
            }
            if url {
                println!("{}", codec::share_url(&tool.share.base_url, &encoded));
            } else {
                println!("{}", encoded);
            }
        }
        Command::Decode { input } => {
            let encoded = codec::extract_encoded(&input);
            let Some(patch) = codec::decode_config(encoded) else {
                return Err("share link could not be decoded (RUST_LOG=debug for details)".into());
            };
            output::print_patch(&patch);
        }
        Command::Export {
            document,
            presets,
            all,
            output: output_dir,
        } => {
            let tool = config::load_config(&cli.config)?;
            let poster = config::load_poster(&document, &tool)?;
            let output_dir =
                output_dir.unwrap_or_else(|| PathBuf::from(&tool.export.output_dir));

            let ids: Vec<String> = if all {
                tool.presets().into_iter().map(|(id, _)| id).collect()
            } else if presets.is_empty() {
                vec![tool.export.default_preset.clone()]
            } else {
                presets
            };

            let lines = run_export(&tool, &poster, &ids, &output_dir);
            output::print_export(&lines);
            let failed = lines.iter().filter(|l| l.outcome.is_err()).count();
            if failed > 0 {
                return Err(format!("{failed} of {} exports failed", lines.len()).into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn lookup_preset(tool: &ToolConfig, id: &str) -> Result<ExportResolution, ExportError> {
    tool.preset(id)
        .ok_or_else(|| ExportError::UnknownPreset(id.to_string()))
}

/// Render the known presets in parallel and write them out, keeping the
/// requested order in the report.
fn run_export(
    tool: &ToolConfig,
    poster: &map_poster::poster::PosterConfig,
    ids: &[String],
    output_dir: &Path,
) -> Vec<ExportLine> {
    let known: Vec<(String, ExportResolution)> = ids
        .iter()
        .filter_map(|id| tool.preset(id).map(|res| (id.clone(), res)))
        .collect();
    let mut rendered =
        export::export_batch(&CanvasRasterizer::new(), poster, &known).into_iter();

    ids.iter()
        .map(|id| {
            let outcome = match lookup_preset(tool, id) {
                Err(e) => Err(e),
                Ok(_) => match rendered.next() {
                    Some(Ok(exported)) => {
                        export::write_export(output_dir, poster, &exported).map(|path| {
                            (path, exported.resolution.width, exported.resolution.height)
                        })
                    }
                    Some(Err(e)) => Err(e),
                    None => Err(ExportError::UnknownPreset(id.clone())),
                },
            };
            ExportLine {
                preset: id.clone(),
                outcome,
            }
        })
        .collect()
}
