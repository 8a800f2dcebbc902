use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use vahan::{
    BikeFilter, BuiltinCatalog, Catalog, ColorImageMap, ColorResolver, ColorTintTable, Commute,
    Condition, Experience, FrameSet, FsImageLoader, FuelType, GalleryConfig, ImageSrc, LoanTerms,
    OrbitViewer, RiderProfile, SHORTLIST_LEN, SortOrder, Terrain, TintGenerator, Usage,
};

#[derive(Parser, Debug)]
#[command(name = "vahan", version)]
struct Cli {
    /// JSON file overriding gallery defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a color's tint to an image file.
    Tint(TintArgs),
    /// Print the gallery a bike shows for a color.
    Resolve(ResolveArgs),
    /// Write one tinted JPEG per listed color of a bike.
    Variants(VariantsArgs),
    /// Render one orbit viewer frame as a PNG.
    Orbit(OrbitArgs),
    /// Compute the monthly installment for a loan.
    Emi(EmiArgs),
    /// List catalog bikes matching filters.
    Browse(BrowseArgs),
    /// Shortlist bikes for a rider profile.
    Recommend(RecommendArgs),
    /// Estimate CO2 and fuel savings against a petrol commuter.
    Eco(EcoArgs),
}

#[derive(Parser, Debug)]
struct TintArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Color name from the tint table.
    #[arg(long)]
    color: String,

    /// Output image; format follows the extension.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Bike id.
    #[arg(long)]
    bike: String,

    /// Color name.
    #[arg(long)]
    color: String,

    /// Static asset root image sources resolve against.
    #[arg(long, default_value = ".")]
    assets: PathBuf,
}

#[derive(Parser, Debug)]
struct VariantsArgs {
    /// Bike id.
    #[arg(long)]
    bike: String,

    /// Static asset root image sources resolve against.
    #[arg(long, default_value = ".")]
    assets: PathBuf,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct OrbitArgs {
    /// Frame sources, in rotation order.
    #[arg(long, num_args = 1.., required = true)]
    frames: Vec<String>,

    /// Static asset root frame sources resolve against.
    #[arg(long, default_value = ".")]
    assets: PathBuf,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    frame: usize,

    /// Canvas width.
    #[arg(long)]
    width: u32,

    /// Canvas height.
    #[arg(long)]
    height: u32,

    /// Zoom factor, clamped to the configured bounds.
    #[arg(long, default_value_t = 1.0)]
    zoom: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct EmiArgs {
    /// Amount financed.
    #[arg(long)]
    principal: f64,

    /// Annual interest rate in percent; defaults to the configured rate.
    #[arg(long)]
    rate: Option<f64>,

    /// Tenure in months; defaults to the configured tenure.
    #[arg(long)]
    months: Option<u32>,
}

#[derive(Parser, Debug)]
struct BrowseArgs {
    /// Substring of the name or brand.
    #[arg(long, default_value = "")]
    search: String,

    /// Brand to include; repeatable.
    #[arg(long = "brand")]
    brands: Vec<String>,

    /// Petrol, Electric or Hybrid; repeatable.
    #[arg(long = "fuel", value_parser = parse_fuel)]
    fuel_types: Vec<FuelType>,

    /// new or used; repeatable.
    #[arg(long = "condition", value_parser = parse_condition)]
    conditions: Vec<Condition>,

    #[arg(long, default_value_t = 0)]
    min_price: u64,

    #[arg(long, default_value_t = 500_000)]
    max_price: u64,

    /// popularity, price-low, price-high, mileage or eco-score.
    #[arg(long, default_value = "popularity", value_parser = parse_sort)]
    sort: SortOrder,
}

#[derive(Parser, Debug)]
struct RecommendArgs {
    #[arg(long, default_value_t = 50_000)]
    min_budget: u64,

    #[arg(long, default_value_t = 200_000)]
    max_budget: u64,

    /// Acceptable powertrain; repeatable. Defaults to Petrol.
    #[arg(long = "fuel", value_parser = parse_fuel)]
    fuel_types: Vec<FuelType>,

    /// daily, weekend or touring.
    #[arg(long, default_value = "daily", value_parser = parse_usage)]
    usage: Usage,

    /// city, highway or offroad.
    #[arg(long, default_value = "city", value_parser = parse_terrain)]
    terrain: Terrain,

    /// beginner, intermediate or expert.
    #[arg(long, default_value = "beginner", value_parser = parse_experience)]
    experience: Experience,
}

#[derive(Parser, Debug)]
struct EcoArgs {
    #[arg(long, default_value = "electric", value_parser = parse_fuel)]
    fuel: FuelType,

    /// Kilometres ridden per day.
    #[arg(long, default_value_t = 30.0)]
    daily_km: f64,

    #[arg(long, default_value_t = 5)]
    years: u32,
}

fn parse_fuel(s: &str) -> Result<FuelType, String> {
    FuelType::parse(s).ok_or_else(|| format!("unknown fuel type '{s}'"))
}

fn parse_condition(s: &str) -> Result<Condition, String> {
    Condition::parse(s).ok_or_else(|| format!("unknown condition '{s}'"))
}

fn parse_sort(s: &str) -> Result<SortOrder, String> {
    SortOrder::parse(s).ok_or_else(|| format!("unknown sort order '{s}'"))
}

fn parse_usage(s: &str) -> Result<Usage, String> {
    Usage::parse(s).ok_or_else(|| format!("unknown usage '{s}'"))
}

fn parse_terrain(s: &str) -> Result<Terrain, String> {
    Terrain::parse(s).ok_or_else(|| format!("unknown terrain '{s}'"))
}

fn parse_experience(s: &str) -> Result<Experience, String> {
    Experience::parse(s).ok_or_else(|| format!("unknown experience level '{s}'"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => GalleryConfig::from_json_file(path)?,
        None => GalleryConfig::default(),
    };

    match cli.cmd {
        Command::Tint(args) => cmd_tint(args),
        Command::Resolve(args) => cmd_resolve(args, &config),
        Command::Variants(args) => cmd_variants(args, &config),
        Command::Orbit(args) => cmd_orbit(args, &config),
        Command::Emi(args) => cmd_emi(args, &config),
        Command::Browse(args) => cmd_browse(args),
        Command::Recommend(args) => cmd_recommend(args),
        Command::Eco(args) => cmd_eco(args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn save_image(img: image::RgbaImage, path: &Path) -> anyhow::Result<()> {
    ensure_parent(path)?;
    let dynamic = image::DynamicImage::ImageRgba8(img);
    let is_jpeg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"));
    let result = if is_jpeg {
        dynamic.to_rgb8().save(path)
    } else {
        dynamic.save(path)
    };
    result.with_context(|| format!("write image '{}'", path.display()))
}

fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_owned()
}

fn load_bike_catalog() -> anyhow::Result<(Catalog, ColorImageMap)> {
    let catalog = Catalog::load(&BuiltinCatalog)?;
    let color_map = ColorImageMap::builtin()?;
    Ok((catalog, color_map))
}

fn cmd_tint(args: TintArgs) -> anyhow::Result<()> {
    let img = image::open(&args.in_path)
        .with_context(|| format!("open image '{}'", args.in_path.display()))?
        .to_rgba8();
    let filter = ColorTintTable::builtin().lookup(&args.color);
    tracing::debug!(color = %args.color, %filter, "applying tint");
    save_image(vahan::apply_filter(&img, &filter), &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_resolve(args: ResolveArgs, config: &GalleryConfig) -> anyhow::Result<()> {
    let (catalog, color_map) = load_bike_catalog()?;
    let entry = catalog
        .get(&args.bike)
        .with_context(|| format!("unknown bike '{}'", args.bike))?;
    let generator = TintGenerator::new(
        FsImageLoader::new(&args.assets),
        ColorTintTable::builtin(),
        config,
    );

    let mut resolver = ColorResolver::new();
    let gallery = resolver.resolve_with(&entry.bike, &color_map, &args.color, &generator);
    if gallery.is_empty() {
        println!("{}", config.placeholder);
    }
    for src in &gallery {
        println!("{}", src.abbreviated());
    }
    if resolver.generation_count() > 0 {
        eprintln!("generated {} tinted image(s)", gallery.len());
    }
    Ok(())
}

fn cmd_variants(args: VariantsArgs, config: &GalleryConfig) -> anyhow::Result<()> {
    let (catalog, _) = load_bike_catalog()?;
    let entry = catalog
        .get(&args.bike)
        .with_context(|| format!("unknown bike '{}'", args.bike))?;
    let bike = &entry.bike;
    let source = bike
        .primary_image()
        .with_context(|| format!("bike '{}' has no base image", bike.id))?;

    let generator = TintGenerator::new(
        FsImageLoader::new(&args.assets),
        ColorTintTable::builtin(),
        config,
    );
    let base_slug = slugify(&format!("{} {}", bike.brand, bike.name));

    let written: Vec<PathBuf> = bike
        .color_names()
        .par_iter()
        .map(|color| -> anyhow::Result<PathBuf> {
            let tinted = generator
                .tint(&source, color)
                .with_context(|| format!("tint '{color}'"))?;
            let out = args
                .out
                .join(format!("{base_slug}-{}.jpg", slugify(color)));
            save_image(tinted, &out)?;
            Ok(out)
        })
        .collect::<anyhow::Result<_>>()?;

    for path in &written {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_orbit(args: OrbitArgs, config: &GalleryConfig) -> anyhow::Result<()> {
    let srcs: Vec<ImageSrc> = args.frames.iter().map(ImageSrc::new).collect();
    let frames = FrameSet::from_sources(&srcs, config.min_orbit_frames, &config.placeholder);
    if !frames.is_rotating() {
        tracing::info!(frames = srcs.len(), "too few frames; rendering a still");
    }

    let mut viewer = OrbitViewer::new(frames, config);
    viewer.resize(args.width, args.height);
    viewer.preload(&FsImageLoader::new(&args.assets));
    viewer.seek(args.frame);
    viewer.set_zoom(args.zoom);

    let canvas = viewer
        .render()
        .with_context(|| format!("frame {} is not drawable", viewer.counter_label()))?;
    save_image(canvas, &args.out)?;
    eprintln!("wrote {} ({})", args.out.display(), viewer.counter_label());
    Ok(())
}

fn cmd_emi(args: EmiArgs, config: &GalleryConfig) -> anyhow::Result<()> {
    let terms = LoanTerms::new(
        args.principal,
        args.rate.unwrap_or(config.default_annual_rate_pct),
        args.months.unwrap_or(config.default_tenure_months),
    )?;
    println!("emi: {}", terms.monthly_payment_rounded());
    println!("total payable: {:.0}", terms.total_payable());
    println!("total interest: {:.0}", terms.total_interest());
    Ok(())
}

fn cmd_browse(args: BrowseArgs) -> anyhow::Result<()> {
    let catalog = Catalog::load(&BuiltinCatalog)?;
    let filter = BikeFilter {
        search: args.search,
        brands: args.brands,
        fuel_types: args.fuel_types,
        conditions: args.conditions,
        price: (args.min_price, args.max_price),
        ..BikeFilter::unbounded()
    };
    let hits = catalog.browse(&filter, args.sort);
    for e in &hits {
        println!(
            "{}\t{} {}\t{}\t{}",
            e.bike.id,
            e.bike.brand,
            e.bike.name,
            e.bike.price,
            e.kind.efficiency_label()
        );
    }
    eprintln!("{} of {} bikes", hits.len(), catalog.len());
    Ok(())
}

fn cmd_recommend(args: RecommendArgs) -> anyhow::Result<()> {
    let catalog = Catalog::load(&BuiltinCatalog)?;
    let mut profile = RiderProfile {
        budget: (args.min_budget, args.max_budget),
        usage: args.usage,
        terrain: args.terrain,
        experience: args.experience,
        ..RiderProfile::default()
    };
    if !args.fuel_types.is_empty() {
        profile.fuel_types = args.fuel_types;
    }
    let picks = catalog.recommend(&profile, SHORTLIST_LEN)?;
    if picks.is_empty() {
        eprintln!("no bikes match the budget and fuel preferences");
    }
    for pick in &picks {
        let bike = &pick.entry.bike;
        println!("{}\t{} {}\tscore {}", bike.id, bike.brand, bike.name, pick.score);
    }
    Ok(())
}

fn cmd_eco(args: EcoArgs) -> anyhow::Result<()> {
    let impact = Commute {
        fuel_type: args.fuel,
        daily_km: args.daily_km,
        years: args.years,
    }
    .impact()?;
    println!("distance: {:.0} km", impact.total_km);
    println!("co2 saved: {:.0} kg", impact.co2_saved_kg);
    println!("fuel savings: {:.0}", impact.cost_saved);
    println!("trees equivalent: {:.0}", impact.trees_equivalent);
    println!("eco score: {}", impact.eco_score);
    Ok(())
}
