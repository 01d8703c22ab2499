use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use clap::Parser;
use legible_engine::prelude::*;
use legible_paint::{contrast_ratio, parse_color, relative_luminance, sample_at};

const DEFAULT_GRADIENT: &str =
    "linear-gradient(90deg, #0b132b 0%, #3a506b 35%, #5bc0be 60%, #f4f1de 100%)";

/// One `--element <left>:<width>[:static]` value.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ElementSpec {
    left: f32,
    width: f32,
    dynamic: bool,
}

#[derive(Parser, Debug)]
#[command(name = "legible-studio")]
#[command(version)]
#[command(
    about = "Preview legible text and border colors over a gradient background",
    long_about = None
)]
struct Args {
    /// `linear-gradient(...)` background
    #[arg(long, default_value = DEFAULT_GRADIENT)]
    gradient: String,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280.0, value_parser = parse_px)]
    width: f32,

    /// Add an element as `<left>:<width>`; append `:static` to opt it out
    /// of dynamic coloring. Five evenly spaced elements when omitted.
    #[arg(long = "element", value_name = "LEFT:WIDTH[:static]", value_parser = parse_element)]
    elements: Vec<ElementSpec>,

    /// After the first pass, resize the viewport and recompute (repeatable)
    #[arg(long = "resize", value_name = "PX", value_parser = parse_px)]
    resizes: Vec<f32>,

    /// Disable dynamic coloring; every element gets the fallback colors
    #[arg(long)]
    no_dynamic: bool,

    /// `env_logger` filter, e.g. `legible_engine=trace`
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,

    /// Log per-pass summaries
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Requested elements, or five evenly spaced ones across the default width.
    fn element_specs(&self) -> Vec<ElementSpec> {
        if !self.elements.is_empty() {
            return self.elements.clone();
        }
        (0..5)
            .map(|i| ElementSpec { left: 40.0 + i as f32 * 250.0, width: 160.0, dynamic: true })
            .collect()
    }

    fn logging(&self) -> LoggingConfig {
        let config = LoggingConfig::default().verbose(self.verbose);
        match &self.log {
            Some(filter) => config.with_filter(filter.clone()),
            None => config,
        }
    }
}

fn parse_px(value: &str) -> Result<f32, String> {
    let px: f32 = value.trim().parse().map_err(|_| format!("{value:?} is not a number"))?;
    if !px.is_finite() {
        return Err(format!("{value:?} is not finite"));
    }
    Ok(px)
}

fn parse_element(value: &str) -> Result<ElementSpec, String> {
    let mut parts = value.split(':');
    let mut next_px = |what: &str| match parts.next() {
        Some(part) => parse_px(part).map_err(|e| format!("{what}: {e}")),
        None => Err(format!("{value:?} is missing {what} (expected <left>:<width>)")),
    };
    let left = next_px("left")?;
    let width = next_px("width")?;
    let dynamic = match parts.next() {
        None => true,
        Some("static") => false,
        Some(other) => return Err(format!("unknown suffix {other:?} (expected `static`)")),
    };
    Ok(ElementSpec { left, width, dynamic })
}

fn print_report(controller: &ReactiveColorController<Rc<RefCell<SceneSnapshot>>>, heading: &str) {
    let scene = controller.environment().borrow();
    let viewport = Viewport::new(scene.viewport_width);

    println!();
    println!("  {heading}  (viewport {} px)", scene.viewport_width);
    println!("  ─────────────────────────────────────────────────────────────────────────");
    println!(
        "  {:>3}  {:>7}  {:>6}  {:>5}  {:>8}  {:>5}  {:>6}  {:<8}  border",
        "id", "left", "width", "t", "bg", "lum", "ratio", "text"
    );

    for target in &scene.targets {
        let t = viewport.ratio(target.rect.center_x());
        let Some(state) = controller.state(target.id) else {
            println!(
                "  {:>3}  {:>7}  {:>6}  (not laid out)",
                target.id.raw(),
                target.rect.left,
                target.rect.width
            );
            continue;
        };

        let (bg, lum, ratio) = match controller.stops().filter(|_| target.dynamic) {
            Some(stops) => {
                let bg = sample_at(stops, t);
                let ratio = parse_color(&state.text_color).map(|fg| contrast_ratio(fg, bg));
                (
                    bg.to_hex(),
                    format!("{:.3}", relative_luminance(bg)),
                    ratio.map_or("-".into(), |r| format!("{r:.2}")),
                )
            }
            None => ("-".into(), "-".into(), "-".into()),
        };

        println!(
            "  {:>3}  {:>7}  {:>6}  {:>5.2}  {:>8}  {:>5}  {:>6}  {:<8}  {}",
            target.id.raw(),
            target.rect.left,
            target.rect.width,
            t,
            bg,
            lum,
            ratio,
            state.text_color,
            state.border_color,
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.logging());

    let targets = args
        .element_specs()
        .into_iter()
        .enumerate()
        .map(|(i, spec)| {
            let rect = Rect::horizontal(spec.left, spec.width, 36.0);
            Target::new(ElementId::from_raw(i as u64 + 1), rect).with_dynamic(spec.dynamic)
        })
        .collect();

    let scene = Rc::new(RefCell::new(SceneSnapshot {
        gradient_source: Some(args.gradient.clone()),
        viewport_width: args.width,
        targets,
    }));

    let config = ControllerConfig::default().with_dynamic_enabled(!args.no_dynamic);
    let controller = ReactiveColorController::new(Rc::clone(&scene), config).shared();
    let triggers = TriggerRegistry::new();

    let active = ReactiveColorController::activate(&controller, &triggers);
    if controller.borrow().stops().is_none() {
        log::warn!("gradient {:?} has no usable stops; showing fallback colors", args.gradient);
    }
    print_report(&controller.borrow(), "initial pass");

    for width in &args.resizes {
        scene.borrow_mut().viewport_width = *width;
        triggers.fire(TriggerKind::ViewportResized);
        print_report(&controller.borrow(), "after resize");
    }

    active.deactivate();
    println!();
    Ok(())
}
