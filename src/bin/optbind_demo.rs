// CLASSIFICATION: COMMUNITY
// Filename: optbind_demo.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Small front end that binds its own command line through the engine.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use optbind::{Descriptor, OptionSet, OptionTarget, Options, UsageLayout};

const PROGRAM: &str = "optbind-demo";
const MESSAGE: &str = "[options] [name=value ...] files...";

#[derive(Debug, Default)]
struct Tracing {
    enabled: bool,
    depth: u8,
    filter: String,
}

impl OptionTarget for Tracing {
    fn declare(set: &mut OptionSet<Self>) {
        set.flag(
            Descriptor::new()
                .short('T')
                .long("trace")
                .description("Print every matched option while running"),
            |t| t.enabled = true,
        )
        .value(
            Descriptor::new()
                .short('d')
                .long("depth")
                .default_value("1")
                .description("Nesting depth reported by the trace output"),
            |t: &mut Tracing, v: u8| t.depth = v,
        )
        .value(
            Descriptor::new()
                .long("filter")
                .property()
                .description("Only trace options whose name contains this text"),
            |t: &mut Tracing, v: String| t.filter = v,
        );
    }
}

#[derive(Debug, Default)]
struct Settings {
    help: bool,
    level: i32,
    output: Option<PathBuf>,
    layout: Option<PathBuf>,
    tracing: Tracing,
}

impl OptionTarget for Settings {
    fn declare(set: &mut OptionSet<Self>) {
        set.flag(
            Descriptor::new()
                .short('h')
                .long("help")
                .description("Show this text and exit"),
            |s| s.help = true,
        )
        .value(
            Descriptor::new()
                .short('O')
                .embedded()
                .default_value("0")
                .description("Optimisation level, given as -O2"),
            |s: &mut Settings, v: i32| s.level = v,
        )
        .value(
            Descriptor::new()
                .short('o')
                .long("output")
                .description("Where to write results"),
            |s: &mut Settings, v: PathBuf| s.output = Some(v),
        )
        .value(
            Descriptor::new()
                .long("layout")
                .description("YAML file with usage layout settings (width, description_width, indent)"),
            |s: &mut Settings, v: PathBuf| s.layout = Some(v),
        )
        .reference::<Tracing>();
    }

    fn references(&mut self) -> Vec<&mut dyn OptionTarget> {
        vec![&mut self.tracing as &mut dyn OptionTarget]
    }
}

impl Settings {
    fn usage_layout(&self) -> anyhow::Result<UsageLayout> {
        match &self.layout {
            None => Ok(UsageLayout::default()),
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_yaml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
            }
        }
    }
}

fn run() -> anyhow::Result<()> {
    let options = Options::builder().target::<Settings>().build()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut settings = Settings::default();

    let files = match options.parse(&args, &mut [&mut settings as &mut dyn OptionTarget]) {
        Ok(files) => files,
        Err(err) => {
            eprint!("{}", options.usage(PROGRAM, MESSAGE));
            return Err(err.into());
        }
    };
    if settings.help {
        let layout = settings.usage_layout()?;
        print!("{}", options.usage_with(&layout, PROGRAM, MESSAGE));
        return Ok(());
    }

    println!("level: {}", settings.level);
    if let Some(output) = &settings.output {
        println!("output: {}", output.display());
    }
    if settings.tracing.enabled {
        println!(
            "trace: depth={} filter={:?}",
            settings.tracing.depth, settings.tracing.filter
        );
    }
    for file in files {
        println!("file: {file}");
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
