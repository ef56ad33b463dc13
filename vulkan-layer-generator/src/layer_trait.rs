use std::io;

use crate::config::Config;
use crate::decayed::DispatchChain;
use crate::emit::{emit_header, emit_lines, emit_unhandled_comments};
use crate::error::GenError;
use crate::model::{Model, ModelCommand};
use crate::names::{command_fn_name, command_variant_name};
use crate::project::HighLevelType;
use crate::signature::infer_signature;

const TYPE_PARAM_NAMES: &[&str] = &["T", "U", "V", "W"];

fn is_bool_slice(ty: &HighLevelType) -> bool {
    matches!(
        ty,
        HighLevelType::Slice {
            element,
            mutable: false,
            ..
        } if element.is_bool()
    )
}

/// `fn create_image(&self, ...) -> LayerResult<VkResult<vk::Image>>`
pub fn hook_method_decl(command: &ModelCommand, config: &Config) -> Result<String, GenError> {
    let name = &command.command.name;
    let signature = infer_signature(&command.command, config)?;

    let mut type_params: Vec<String> = Vec::new();
    let mut params: Vec<String> = vec!["&self".to_string()];
    for param in signature.params.iter() {
        if is_bool_slice(&param.ty) {
            let type_param = TYPE_PARAM_NAMES
                .get(type_params.len())
                .ok_or_else(|| GenError::TooManyTypeParams(name.clone()))?;
            type_params.push(format!("{type_param}: Iterator<Item = bool> + 'static"));
            params.push(format!("{}: {type_param}", param.name));
            continue;
        }
        param
            .ty
            .check_no_indirect_bool()
            .map_err(|reason| GenError::TypeMismatch {
                command: name.clone(),
                param: param.name.clone(),
                reason: reason.to_string(),
            })?;
        params.push(format!("{}: {}", param.name, param.ty));
    }

    let generics = if type_params.is_empty() {
        String::new()
    } else {
        format!("<{}>", type_params.join(", "))
    };
    Ok(format!(
        "fn {}{generics}({}) -> {}",
        command_fn_name(name),
        params.join(", "),
        signature.return_type()
    ))
}

fn emit_vulkan_command_enum<W: io::Write>(w: &mut W, commands: &[&ModelCommand]) -> anyhow::Result<()> {
    write!(w, "#[derive(Debug, PartialOrd, Ord, PartialEq, Eq, Hash, Clone)]\n")?;
    write!(w, "pub enum VulkanCommand {{\n")?;
    for command in commands.iter() {
        write!(w, "    {},\n", command_variant_name(&command.command.name))?;
    }
    write!(w, "}}\n\n")?;

    write!(w, "impl TryFrom<&str> for VulkanCommand {{\n")?;
    write!(w, "    type Error = TryFromVulkanCommandError;\n\n")?;
    write!(w, "    fn try_from(value: &str) -> Result<Self, Self::Error> {{\n")?;
    write!(w, "        match value {{\n")?;
    for command in commands.iter() {
        let name = &command.command.name;
        write!(
            w,
            "            \"{name}\" => Ok(VulkanCommand::{}),\n",
            command_variant_name(name)
        )?;
    }
    write!(
        w,
        "            _ => Err(TryFromVulkanCommandError::UnknownCommand(value.to_owned())),\n"
    )?;
    write!(w, "        }}\n")?;
    write!(w, "    }}\n")?;
    write!(w, "}}\n\n")?;
    Ok(())
}

fn emit_hooks_trait<W: io::Write>(
    w: &mut W,
    trait_name: &str,
    commands: &[&ModelCommand],
    config: &Config,
) -> anyhow::Result<()> {
    write!(w, "pub trait {trait_name}: Send + Sync {{\n")?;
    for command in commands.iter() {
        let lines = vec![
            format!("{} {{", hook_method_decl(command, config)?),
            "    LayerResult::Unhandled".to_string(),
            "}".to_string(),
        ];
        emit_lines(w, 4, &lines)?;
    }
    write!(w, "}}\n\n")?;
    Ok(())
}

pub fn emit_layer_trait<W: io::Write>(w: &mut W, model: &Model, config: &Config) -> anyhow::Result<()> {
    emit_header(w)?;
    write!(w, "#![allow(clippy::too_many_arguments)]\n")?;
    write!(w, "use std::ffi::{{c_char, c_int, c_void}};\n")?;
    write!(w, "use std::mem::MaybeUninit;\n\n")?;
    write!(w, "use ash::{{vk, prelude::VkResult}};\n\n")?;
    write!(w, "use crate::VkLayerDeviceLink;\n")?;
    write!(w, "use super::{{LayerResult, TryFromVulkanCommandError}};\n\n")?;

    emit_unhandled_comments(w, &model.unhandled)?;

    let commands: Vec<&ModelCommand> = model
        .representatives()?
        .into_iter()
        .filter(|command| !config.is_hookless(&command.command.name))
        .collect();
    emit_vulkan_command_enum(w, &commands)?;

    for (chain, trait_name) in [
        (DispatchChain::Device, "DeviceHooks"),
        (DispatchChain::Instance, "InstanceHooks"),
    ] {
        let hooked: Vec<&ModelCommand> = commands
            .iter()
            .copied()
            .filter(|command| command.chain == chain)
            .collect();
        emit_hooks_trait(w, trait_name, &hooked, config)?;
    }
    Ok(())
}
