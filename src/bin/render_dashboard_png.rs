#[cfg(feature = "cairo-backend")]
use statboard::api::{DashboardConfig, DashboardEngine, OverviewChart};
#[cfg(feature = "cairo-backend")]
use statboard::core::{Dataset, RecordId, Viewport};
#[cfg(feature = "cairo-backend")]
use statboard::interaction::BrushRect;
#[cfg(feature = "cairo-backend")]
use statboard::render::CairoRenderer;
#[cfg(feature = "cairo-backend")]
use std::path::PathBuf;

#[cfg(feature = "cairo-backend")]
const DEFAULT_DATA_PATH: &str = "tests/fixtures/creatures_small.csv";
#[cfg(feature = "cairo-backend")]
const DEFAULT_OUTPUT_PATH: &str = "dashboard.png";
#[cfg(feature = "cairo-backend")]
const DEFAULT_WIDTH: u32 = 1280;
#[cfg(feature = "cairo-backend")]
const DEFAULT_HEIGHT: u32 = 900;

#[cfg(feature = "cairo-backend")]
#[derive(Debug, Clone)]
enum ScriptedEvent {
    Brush(Option<[f64; 4]>),
    Click(RecordId),
    ClickAt(f64, f64),
    Reset,
}

#[cfg(feature = "cairo-backend")]
#[derive(Debug)]
struct CliArgs {
    data_path: PathBuf,
    output_path: PathBuf,
    config_path: Option<PathBuf>,
    width: u32,
    height: u32,
    overview: bool,
    print_snapshot: bool,
    events: Vec<ScriptedEvent>,
}

#[cfg(feature = "cairo-backend")]
fn main() {
    let _ = statboard::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cairo-backend"))]
fn main() {
    eprintln!("this tool requires feature `cairo-backend`");
    std::process::exit(1);
}

#[cfg(feature = "cairo-backend")]
fn run() -> Result<(), String> {
    let args = parse_args()?;

    let (dataset, report) = Dataset::from_csv_path(&args.data_path).map_err(|err| {
        tracing::error!(error = %err, path = %args.data_path.display(), "dataset load failed");
        format!("failed to load `{}`: {err}", args.data_path.display())
    })?;
    println!(
        "loaded {} record(s) from {} ({} dropped)",
        report.rows_kept,
        args.data_path.display(),
        report.rows_dropped
    );

    let config = match &args.config_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|err| format!("failed to read config `{}`: {err}", path.display()))?;
            DashboardConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => DashboardConfig::new(Viewport::new(args.width, args.height)),
    };

    let width = i32::try_from(config.viewport.width)
        .map_err(|_| "viewport width overflows i32".to_owned())?;
    let height = i32::try_from(config.viewport.height)
        .map_err(|_| "viewport height overflows i32".to_owned())?;
    let mut renderer = CairoRenderer::new(width, height).map_err(|err| err.to_string())?;

    if args.overview {
        let chart = OverviewChart::new(dataset, config).map_err(|err| err.to_string())?;
        chart.render(&mut renderer).map_err(|err| err.to_string())?;
        renderer
            .write_png(&args.output_path)
            .map_err(|err| err.to_string())?;
        println!("wrote overview -> {}", args.output_path.display());
        return Ok(());
    }

    let mut engine =
        DashboardEngine::new(renderer, dataset, config).map_err(|err| err.to_string())?;
    for event in &args.events {
        let outcome = match event {
            ScriptedEvent::Brush(Some([x0, y0, x1, y1])) => {
                let rect = BrushRect::new(*x0, *y0, *x1, *y1).map_err(|err| err.to_string())?;
                engine.brush_end(Some(rect))
            }
            ScriptedEvent::Brush(None) => engine.brush_end(None),
            ScriptedEvent::Click(id) => engine.point_click_id(id),
            ScriptedEvent::ClickAt(x, y) => engine.click_at(*x, *y),
            ScriptedEvent::Reset => engine.reset(),
        }
        .map_err(|err| format!("event {event:?} failed: {err}"))?;
        match outcome {
            Some(transition) => println!(
                "{event:?}: mode={:?} selected={}",
                transition.mode_after, transition.selection_len
            ),
            None => println!("{event:?}: ignored"),
        }
    }

    engine.advance_animations(engine.config().bar_transition_ms);
    engine.render().map_err(|err| err.to_string())?;
    engine
        .renderer()
        .write_png(&args.output_path)
        .map_err(|err| err.to_string())?;
    println!(
        "wrote dashboard ({}) -> {}",
        engine.views().summary.text,
        args.output_path.display()
    );

    if args.print_snapshot {
        let json = engine
            .snapshot_json_contract_v1_pretty()
            .map_err(|err| err.to_string())?;
        println!("{json}");
    }
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn parse_args() -> Result<CliArgs, String> {
    let mut args_out = CliArgs {
        data_path: PathBuf::from(DEFAULT_DATA_PATH),
        output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        config_path: None,
        width: DEFAULT_WIDTH,
        height: DEFAULT_HEIGHT,
        overview: false,
        print_snapshot: false,
        events: Vec::new(),
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value_for = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match arg.as_str() {
            "--data" => args_out.data_path = PathBuf::from(value_for("--data")?),
            "--output" => args_out.output_path = PathBuf::from(value_for("--output")?),
            "--config" => args_out.config_path = Some(PathBuf::from(value_for("--config")?)),
            "--width" => args_out.width = parse_u32(&value_for("--width")?, "--width")?,
            "--height" => args_out.height = parse_u32(&value_for("--height")?, "--height")?,
            "--brush" => {
                let raw = value_for("--brush")?;
                let rect = if raw == "none" {
                    None
                } else {
                    let values = parse_floats(&raw, "--brush")?;
                    let [x0, y0, x1, y1] = values[..] else {
                        return Err("--brush expects x0,y0,x1,y1 or `none`".to_owned());
                    };
                    Some([x0, y0, x1, y1])
                };
                args_out.events.push(ScriptedEvent::Brush(rect));
            }
            "--click" => {
                let id = value_for("--click")?;
                args_out.events.push(ScriptedEvent::Click(RecordId::new(id)));
            }
            "--click-at" => {
                let values = parse_floats(&value_for("--click-at")?, "--click-at")?;
                let [x, y] = values[..] else {
                    return Err("--click-at expects x,y".to_owned());
                };
                args_out.events.push(ScriptedEvent::ClickAt(x, y));
            }
            "--reset" => args_out.events.push(ScriptedEvent::Reset),
            "--overview" => args_out.overview = true,
            "--snapshot" => args_out.print_snapshot = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(args_out)
}

#[cfg(feature = "cairo-backend")]
fn parse_u32(raw: &str, flag: &str) -> Result<u32, String> {
    raw.parse::<u32>()
        .map_err(|err| format!("invalid value `{raw}` for {flag}: {err}"))
}

#[cfg(feature = "cairo-backend")]
fn parse_floats(raw: &str, flag: &str) -> Result<Vec<f64>, String> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|err| format!("invalid number `{part}` for {flag}: {err}"))
        })
        .collect()
}

#[cfg(feature = "cairo-backend")]
fn print_usage() {
    println!("{}", usage_message());
}

#[cfg(feature = "cairo-backend")]
fn usage_message() -> String {
    format!(
        "Usage: cargo run --features cairo-backend --bin render_dashboard_png -- [options]\n\nOptions:\n  --data <path>          CSV dataset (default: {DEFAULT_DATA_PATH})\n  --output <path>        PNG output path (default: {DEFAULT_OUTPUT_PATH})\n  --config <path>        Dashboard config JSON (overrides --width/--height)\n  --width <px>           Canvas width (default: {DEFAULT_WIDTH})\n  --height <px>          Canvas height (default: {DEFAULT_HEIGHT})\n  --brush <x0,y0,x1,y1>  Finish a brush in scatter pixels, or `none` for an empty drag\n  --click <record-id>    Click the point of a record\n  --click-at <x,y>       Click at canvas pixels\n  --reset                Reset the selection\n  --overview             Render the static overview page instead\n  --snapshot             Print the engine snapshot JSON after replaying events\n  -h, --help             Show this message"
    )
}
