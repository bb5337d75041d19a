use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;

use iconfont::{GlyphDrawable, IconFont, IconFontConfig, StateSet};
use iconfont_engine::coords::Rect;
use iconfont_engine::logging::{LoggingConfig, init_logging};
use iconfont_engine::raster::RasterCanvas;

/// Render an icon-font glyph drawable to a PNG.
#[derive(Parser, Debug)]
#[command(name = "iconfont-preview", version)]
struct Args {
    /// `<icon-font>` XML file to inflate.
    #[arg(conflicts_with_all = ["icon", "list"], required_unless_present_any = ["icon", "list"])]
    xml: Option<PathBuf>,

    /// Name of a bundled icon instead of an XML file.
    #[arg(long)]
    icon: Option<String>,

    /// Print the bundled icon names and exit.
    #[arg(long)]
    list: bool,

    /// Directory holding `icon_font/typeface.ttf` and `icon_font/metadata.json`.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Directory `@font/<name>` references are resolved under.
    #[arg(long, default_value = "res")]
    fonts: PathBuf,

    /// Output image size in pixels; defaults to the intrinsic size, or 128.
    #[arg(long)]
    size: Option<u32>,

    /// Drawable level, 0..=10000.
    #[arg(long, default_value_t = 10_000)]
    level: u16,

    /// Pixels per `dp`.
    #[arg(long, default_value_t = 1.0)]
    density: f32,

    /// Render in the pressed state.
    #[arg(long)]
    pressed: bool,

    /// Background as `#RRGGBB` or `#AARRGGBB`; transparent when omitted.
    #[arg(long)]
    background: Option<String>,

    /// Seconds to wait for font resources.
    #[arg(long, default_value_t = 5)]
    font_timeout: u64,

    #[arg(short, long, default_value = "icon.png")]
    out: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

const FALLBACK_SIZE: u32 = 128;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig::from_verbosity(args.verbose));

    let config = IconFontConfig::default()
        .with_asset_root(&args.assets)
        .with_font_root(&args.fonts)
        .with_density(args.density);
    let ctx = IconFont::new(config);

    if args.list {
        for name in ctx.assets().icon_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let mut drawable = load(&ctx, &args)?;
    ctx.wait_for_fonts(Duration::from_secs(args.font_timeout));
    drawable.poll_font();
    if drawable.typeface().is_none() {
        log::warn!("no typeface available, the output will be empty");
    }

    drawable.set_level(args.level);
    if args.pressed {
        drawable.set_state(StateSet::ENABLED | StateSet::PRESSED);
    }

    let size = args
        .size
        .or_else(|| u32::try_from(drawable.intrinsic_size()).ok().filter(|&s| s > 0))
        .unwrap_or(FALLBACK_SIZE);
    let mut canvas = match &args.background {
        Some(bg) => {
            let color = iconfont::inflate::parse_color(bg)
                .with_context(|| format!("invalid background color {bg:?}"))?;
            RasterCanvas::with_background(size, size, color)
        }
        None => RasterCanvas::new(size, size),
    };

    let padding = drawable.padding().unwrap_or_default();
    let bounds = Rect::from_ltrb(
        padding.left as f32,
        padding.top as f32,
        size as f32 - padding.right as f32,
        size as f32 - padding.bottom as f32,
    );
    drawable.paint(&mut canvas, bounds);

    canvas
        .image()
        .save(&args.out)
        .with_context(|| format!("writing {}", args.out.display()))?;
    log::info!("wrote {}x{} preview to {}", size, size, args.out.display());
    Ok(())
}

fn load(ctx: &IconFont, args: &Args) -> Result<GlyphDrawable> {
    if let Some(name) = &args.icon {
        return ctx.asset_icon(name).with_context(|| {
            format!("icon {name:?} not found under {}", args.assets.display())
        });
    }
    let Some(path) = &args.xml else {
        bail!("an XML file or --icon is required");
    };
    let drawable = ctx
        .inflate_file(path)
        .with_context(|| format!("inflating {}", path.display()))?;
    if !drawable.is_visible() {
        log::info!("{} is marked invisible, rendering anyway", path.display());
    }
    Ok(drawable)
}
