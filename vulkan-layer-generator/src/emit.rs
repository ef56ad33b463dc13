use std::io;
use std::str::FromStr;

use anyhow::bail;
use log::info;

use crate::config::Config;
use crate::intercept::emit_global_simple_intercept;
use crate::layer_trait::emit_layer_trait;
use crate::model::{Model, UnhandledCommand};
use crate::registry::Registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    LayerTrait,
    GlobalSimpleIntercept,
}

impl Target {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::LayerTrait => "layer_trait.rs",
            Self::GlobalSimpleIntercept => "global_simple_intercept.rs",
        }
    }
}

impl FromStr for Target {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "layer_trait.rs" => Ok(Self::LayerTrait),
            "global_simple_intercept.rs" => Ok(Self::GlobalSimpleIntercept),
            other => bail!("unknown target: {other}"),
        }
    }
}

pub fn generate<W: io::Write>(
    w: &mut W,
    target: Target,
    registry: &Registry,
    config: &Config,
) -> anyhow::Result<()> {
    let model = Model::build(registry, config)?;
    info!("generating {}", target.file_name());
    match target {
        Target::LayerTrait => emit_layer_trait(w, &model, config),
        Target::GlobalSimpleIntercept => emit_global_simple_intercept(w, &model, config),
    }
}

pub(crate) fn emit_header<W: io::Write>(w: &mut W) -> anyhow::Result<()> {
    write!(w, "// This file is generated from the Vulkan XML API registry.\n")?;
    write!(w, "#![allow(missing_docs)]\n")?;
    Ok(())
}

pub(crate) fn emit_lines<W: io::Write>(
    w: &mut W,
    indent: usize,
    lines: &[String],
) -> anyhow::Result<()> {
    for line in lines.iter() {
        if line.is_empty() {
            write!(w, "\n")?;
        } else {
            write!(w, "{:indent$}{line}\n", "")?;
        }
    }
    Ok(())
}

pub(crate) fn emit_unhandled_comments<W: io::Write>(
    w: &mut W,
    unhandled: &[UnhandledCommand],
) -> anyhow::Result<()> {
    if unhandled.is_empty() {
        return Ok(());
    }
    write!(w, "// Unhandled commands:\n")?;
    for command in unhandled.iter() {
        write!(w, "// * {}: {}\n", command.name, command.reason)?;
    }
    write!(w, "\n")?;
    Ok(())
}
