use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use plotters::prelude::DrawingBackend;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::fs;
use std::path::PathBuf;
use vecplot::plotters_canvas::{PlottersCanvas, register_font_file};
use vecplot::render::canvas::CanvasRenderer;
use vecplot::render::recording::RecordingContext;
use vecplot::render::render;
use vecplot::render::svg::{SvgDocument, SvgRenderer};
use vecplot::{AxisExtent, DashStyle, RenderConfig, Transform, VectorCollection, storage};

#[derive(Parser, Debug)]
#[command(
    name = "vecplot",
    version,
    about = "Render labelled 2D vectors with axes and ticks to SVG, PNG or a canvas call log"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a JSON vector collection.
    Render(RenderArgs),
    /// Print the dash-style table.
    Styles,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Backend {
    /// SVG element tree (only for .svg output).
    Svg,
    /// Canvas-style context (plotters for .svg/.png, call log for .json).
    Canvas,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExtentArg {
    Viewport,
    Overscan,
}

impl From<ExtentArg> for AxisExtent {
    fn from(e: ExtentArg) -> Self {
        match e {
            ExtentArg::Viewport => AxisExtent::Viewport,
            ExtentArg::Overscan => AxisExtent::Overscan,
        }
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// JSON object of vectors keyed by name (draw order = key order).
    #[arg(short, long)]
    input: PathBuf,
    /// Output file: .svg, .png or .json (canvas call log).
    #[arg(short, long)]
    out: PathBuf,
    /// Rendering backend. Defaults to svg for .svg output, canvas otherwise.
    #[arg(long, value_enum)]
    backend: Option<Backend>,
    /// Surface width in pixels.
    #[arg(long, default_value_t = 300)]
    width: u32,
    /// Surface height in pixels.
    #[arg(long, default_value_t = 300)]
    height: u32,
    /// Uniform zoom factor.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
    /// Keep the surface's y-down convention instead of flipping to y-up.
    #[arg(long, default_value_t = false)]
    no_invert_y: bool,
    /// JSON render config; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Tick spacing in logical units.
    #[arg(long)]
    tick_step: Option<f64>,
    /// Vector keys whose label is not drawn, separated by comma or semicolon (e.g., L1,L2,L3).
    #[arg(long)]
    exclude_label: Option<String>,
    /// Reach of the reference axis lines.
    #[arg(long, value_enum)]
    axis_extent: Option<ExtentArg>,
    /// TTF/OTF font used for PNG labels (required for .png output).
    #[arg(long)]
    font: Option<PathBuf>,
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Styles => {
            for d in DashStyle::ALL {
                println!("{:<8} {:?}", d.name(), d.pattern());
            }
            Ok(())
        }
    }
}

fn build_config(args: &RenderArgs) -> Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => storage::load_config(path)?,
        None => RenderConfig::default(),
    };
    if let Some(step) = args.tick_step {
        config.tick_step = step;
    }
    if let Some(extent) = args.axis_extent {
        config.axis_extent = extent.into();
    }
    if let Some(keys) = &args.exclude_label {
        config = config.exclude_labels(parse_list(keys));
    }
    Ok(config)
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let vectors = storage::load_collection(&args.input)?;
    let config = build_config(&args)?;
    let transform = Transform::centered(args.width as f64, args.height as f64)
        .with_scale(args.scale)
        .with_invert_y(!args.no_invert_y);

    let ext = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let backend = args.backend.unwrap_or(if ext == "svg" {
        Backend::Svg
    } else {
        Backend::Canvas
    });

    match (backend, ext.as_str()) {
        (Backend::Svg, "svg") => {
            let mut doc = SvgDocument::new(args.width, args.height);
            doc.add_group("vectors");
            render(
                &mut SvgRenderer::new(&mut doc, "vectors"),
                &vectors,
                &transform,
                &config,
            )?;
            doc.save(&args.out)?;
        }
        (Backend::Svg, other) => bail!("the svg backend writes .svg files, not .{other}"),
        (Backend::Canvas, "json") => {
            let mut ctx = RecordingContext::new(args.width as f64, args.height as f64);
            render(&mut CanvasRenderer::new(&mut ctx), &vectors, &transform, &config)?;
            fs::write(&args.out, ctx.to_json()?)
                .with_context(|| format!("writing {}", args.out.display()))?;
        }
        (Backend::Canvas, "svg") => {
            let mut buf = String::new();
            {
                let mut canvas =
                    PlottersCanvas::new(SVGBackend::with_string(&mut buf, (args.width, args.height)));
                draw_canvas(&mut canvas, &vectors, &transform, &config)?;
            }
            fs::write(&args.out, buf).with_context(|| format!("writing {}", args.out.display()))?;
        }
        (Backend::Canvas, "png") => {
            let Some(font) = &args.font else {
                bail!("PNG labels need a font file; pass --font <file.ttf>");
            };
            let family = config.font_spec()?.family;
            register_font_file(&family, font)?;
            let mut canvas =
                PlottersCanvas::new(BitMapBackend::new(&args.out, (args.width, args.height)));
            draw_canvas(&mut canvas, &vectors, &transform, &config)?;
        }
        (Backend::Canvas, other) => bail!("unsupported output format: .{other}"),
    }

    eprintln!("Wrote {} vectors to {}", vectors.len(), args.out.display());
    Ok(())
}

fn draw_canvas<DB: DrawingBackend>(
    canvas: &mut PlottersCanvas<DB>,
    vectors: &VectorCollection,
    transform: &Transform,
    config: &RenderConfig,
) -> Result<()> {
    render(&mut CanvasRenderer::new(canvas), vectors, transform, config)?;
    canvas.present()?;
    Ok(())
}
