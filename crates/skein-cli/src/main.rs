use serde::Serialize;
use skein::layout::{
    Algorithm, MinimapFrame, OverviewTransform, Point, Positions, Rect, Size, Viewport,
    find_components,
};
use skein::{GraphStore, LayoutSession, layout_graph};
use std::collections::BTreeMap;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Model(skein::Error),
    Layout(skein::HeadlessError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Model(err) => write!(f, "{err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<skein::Error> for CliError {
    fn from(value: skein::Error) -> Self {
        Self::Model(value)
    }
}

impl From<skein::HeadlessError> for CliError {
    fn from(value: skein::HeadlessError) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Components,
    Minimap,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    algorithm: Option<String>,
    config: Option<String>,
    width: f64,
    height: f64,
    seed: Option<u64>,
    pan_x: f64,
    pan_y: f64,
    zoom: f64,
    click: Option<(f64, f64)>,
    pretty: bool,
    verbose: bool,
}

fn usage() -> &'static str {
    "skein-cli\n\
\n\
USAGE:\n\
  skein-cli [layout] [--algorithm grid|circle|concentric|random|force|cluster] [--config <path>] [--width <w>] [--height <h>] [--seed <n>] [--pretty] [--verbose] [<path>|-]\n\
  skein-cli components [--pretty] [--verbose] [<path>|-]\n\
  skein-cli minimap [--algorithm <name>] [--config <path>] [--width <w>] [--height <h>] [--seed <n>] [--pan-x <x>] [--pan-y <y>] [--zoom <z>] [--click <x> <y>] [--pretty] [--verbose] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the graph JSON is read from stdin.\n\
  - Input is {\"nodes\": [{\"id\": ...}], \"edges\": [{\"source\": ..., \"target\": ...}]}; unknown edge endpoints become stub nodes.\n\
  - --config reads a layout JSON object such as {\"type\": \"force\", \"iterations\": 200}; it cannot be combined with --algorithm.\n\
  - --width/--height set the canvas size (default 800 x 600).\n\
  - minimap prints the overview frame (200 x 150 units), or null when the positions have no extent; --click adds the pan that centers the clicked point.\n\
"
}

fn next_f64<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<f64, CliError> {
    let Some(raw) = it.next() else {
        return Err(CliError::Usage(usage()));
    };
    let v = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if !v.is_finite() {
        return Err(CliError::Usage(usage()));
    }
    Ok(v)
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        width: 800.0,
        height: 600.0,
        zoom: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "components" => args.command = Command::Components,
            "minimap" => args.command = Command::Minimap,
            "--pretty" => args.pretty = true,
            "--verbose" | "-v" => args.verbose = true,
            "--algorithm" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if Algorithm::from_name(name).is_none() {
                    return Err(CliError::Usage(usage()));
                }
                args.algorithm = Some(name.clone());
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--width" => args.width = next_f64(&mut it)?,
            "--height" => args.height = next_f64(&mut it)?,
            "--pan-x" => args.pan_x = next_f64(&mut it)?,
            "--pan-y" => args.pan_y = next_f64(&mut it)?,
            "--zoom" => {
                args.zoom = next_f64(&mut it)?;
                if args.zoom <= 0.0 {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--click" => {
                let x = next_f64(&mut it)?;
                let y = next_f64(&mut it)?;
                args.click = Some((x, y));
            }
            "--seed" => {
                let Some(seed) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.seed = Some(seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if args.algorithm.is_some() && args.config.is_some() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    // A subscriber may already be installed when embedded; keep going without ours.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn resolve_algorithm(args: &Args) -> Result<Algorithm, CliError> {
    let mut algorithm = match (&args.config, &args.algorithm) {
        (Some(path), _) => serde_json::from_str::<Algorithm>(&std::fs::read_to_string(path)?)?,
        (None, Some(name)) => Algorithm::from_name(name).ok_or(CliError::Usage(usage()))?,
        (None, None) => Algorithm::default(),
    };
    if args.seed.is_some() {
        algorithm.set_random_seed(args.seed);
    }
    Ok(algorithm)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutOut<'a> {
    algorithm: &'a Algorithm,
    canvas: Size,
    positions: &'a Positions,
    meta_positions: &'a Positions,
}

#[derive(Serialize)]
struct ComponentsOut {
    count: usize,
    components: BTreeMap<String, usize>,
}

#[derive(Serialize)]
struct Dot<'a> {
    id: &'a str,
    x: f64,
    y: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MinimapOut<'a> {
    nodes: Vec<Dot<'a>>,
    meta_nodes: Vec<Dot<'a>>,
    viewport: Option<Rect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pan: Option<Point>,
}

fn dots(items: &[(String, Point)]) -> Vec<Dot<'_>> {
    items
        .iter()
        .map(|(id, p)| Dot {
            id: id.as_str(),
            x: p.x,
            y: p.y,
        })
        .collect()
}

fn run_session(args: &Args, store: GraphStore) -> Result<LayoutSession, CliError> {
    let algorithm = resolve_algorithm(args)?;
    let mut session = LayoutSession::new(store, algorithm, Size::new(args.width, args.height));
    session.set_viewport(Viewport {
        pan: Point::new(args.pan_x, args.pan_y),
        zoom: args.zoom,
    });
    session.relayout()?;
    Ok(session)
}

fn run(args: Args) -> Result<(), CliError> {
    init_tracing(args.verbose);
    let text = read_input(args.input.as_deref())?;
    let store = GraphStore::from_json(&text)?;
    tracing::debug!(
        nodes = store.node_count(),
        edges = store.edge_count(),
        stubs = store.stubs().count(),
        "graph loaded"
    );

    match args.command {
        Command::Components => {
            let components: BTreeMap<String, usize> =
                find_components(&layout_graph(&store)).into_iter().collect();
            let count = components.values().max().map_or(0, |m| m + 1);
            write_json(&ComponentsOut { count, components }, args.pretty)
        }
        Command::Layout => {
            let session = run_session(&args, store)?;
            write_json(
                &LayoutOut {
                    algorithm: session.algorithm(),
                    canvas: session.canvas(),
                    positions: session.positions(),
                    meta_positions: session.meta_positions(),
                },
                args.pretty,
            )
        }
        Command::Minimap => {
            let session = run_session(&args, store)?;
            let Some(transform) = OverviewTransform::for_positions(
                session.positions(),
                session.meta_positions(),
                skein::layout::MINIMAP_SIZE,
            ) else {
                tracing::warn!("positions have no extent; minimap frame skipped");
                return write_json(&serde_json::Value::Null, args.pretty);
            };
            let frame = MinimapFrame::build(
                &transform,
                session.positions(),
                session.meta_positions(),
                session.viewport(),
                session.canvas(),
            );
            let pan = args.click.map(|(x, y)| {
                transform.pan_for_click(Point::new(x, y), session.viewport(), session.canvas())
            });
            write_json(
                &MinimapOut {
                    nodes: dots(&frame.nodes),
                    meta_nodes: dots(&frame.meta_nodes),
                    viewport: frame.viewport,
                    pan,
                },
                args.pretty,
            )
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
