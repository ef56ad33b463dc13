use std::env;
use std::fs::{self, File};
use std::io::{BufWriter, Write as _, stdout};
use std::path::PathBuf;

use anyhow::{Context as _, bail};
use vulkan_layer_generator::{Config, Target, generate, parse_registry};

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        // stdout may carry the generated code
        eprintln!(
            "{level:<5} {file}:{line} > {text}",
            level = record.level(),
            file = record.file().unwrap_or_else(|| record.target()),
            line = record
                .line()
                .map_or_else(|| "??".to_string(), |line| line.to_string()),
            text = record.args(),
        );
    }

    fn flush(&self) {}
}

impl Logger {
    fn init() {
        log::set_logger(&Logger).expect("could not set logger");
        log::set_max_level(log::LevelFilter::Debug);
    }
}

// usage: genvk <layer_trait.rs|global_simple_intercept.rs> <vk.xml> [out dir]
fn main() -> anyhow::Result<()> {
    Logger::init();

    let mut args = env::args().skip(1);
    let (Some(target), Some(registry_path)) = (args.next(), args.next()) else {
        bail!("usage: genvk <target> <vk.xml> [out dir]");
    };
    let out_dir = args.next().map(PathBuf::from);

    let target: Target = target.parse()?;
    let input = fs::read_to_string(&registry_path)
        .with_context(|| format!("could not read {registry_path}"))?;

    let config = Config::default();
    let registry = parse_registry(&input, &config)?;

    match out_dir {
        Some(out_dir) => {
            let path = out_dir.join(target.file_name());
            let file = File::create(&path)
                .with_context(|| format!("could not create {}", path.display()))?;
            let mut w = BufWriter::new(file);
            generate(&mut w, target, &registry, &config)?;
            w.flush()?;
            log::info!("wrote {}", path.display());
        }
        None => {
            let mut w = BufWriter::new(stdout());
            generate(&mut w, target, &registry, &config)?;
            w.flush()?;
        }
    }

    Ok(())
}
