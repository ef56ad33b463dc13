use std::io;

use crate::config::Config;
use crate::decayed::{Command, DispatchChain};
use crate::dispatch::{DispatchFeature, dispatch_feature_of, features_of, used_features};
use crate::emit::{emit_header, emit_lines, emit_unhandled_comments};
use crate::error::GenError;
use crate::model::{Model, ModelCommand};
use crate::names::{command_fn_name, command_variant_name, rust_type_name};
use crate::project::{Mode, project};
use crate::signature::infer_signature;
use crate::transform::{ffi_name, ret_lines, transform_param};

/// `extern "system" fn create_image(device: vk::Device, ...) -> vk::Result`
pub fn ffi_fn_decl(command: &Command, config: &Config) -> Result<String, GenError> {
    let mut params: Vec<String> = Vec::with_capacity(command.params.len());
    for param in command.params.iter() {
        let ty = project(&param.ty, Mode::Ffi, config, &command.name, &param.name)?;
        params.push(format!("{}: {ty}", ffi_name(&param.name)));
    }
    let ret = match command.return_type.as_str() {
        "void" => String::new(),
        other => {
            let ty = rust_type_name(config, other).ok_or_else(|| GenError::UnknownType {
                command: command.name.clone(),
                name: other.to_string(),
            })?;
            format!(" -> {ty}")
        }
    };
    Ok(format!(
        "extern \"system\" fn {}({}){ret}",
        command_fn_name(&command.name),
        params.join(", ")
    ))
}

/// body of the intercept function: ask the hook first, fall back to the next layer.
pub fn ffi_fn_body(
    command: &ModelCommand,
    features: &[DispatchFeature],
    config: &Config,
) -> Result<Vec<String>, GenError> {
    let ModelCommand { command, chain } = command;
    let fn_name = command_fn_name(&command.name);
    let receiver = command
        .params
        .first()
        .map(|param| ffi_name(&param.name))
        .ok_or_else(|| GenError::MissingDispatchInfo(command.name.clone()))?;
    let info_var = match chain {
        DispatchChain::Device => "device_info",
        DispatchChain::Instance => "instance_info",
        DispatchChain::Global => return Err(GenError::MissingDispatchInfo(command.name.clone())),
    };
    let dispatch_feature = dispatch_feature_of(features, &command.name)?;

    let signature = infer_signature(command, config)?;
    let mut args: Vec<String> = Vec::with_capacity(signature.params.len());
    for param in signature.params.iter() {
        let index = param.source.ok_or_else(|| GenError::NoApplicableTransform {
            command: command.name.clone(),
            param: param.name.clone(),
        })?;
        args.push(transform_param(command, index, &param.ty, config)?);
    }
    let ffi_args: Vec<String> = command
        .params
        .iter()
        .map(|param| ffi_name(&param.name))
        .collect();

    let mut lines = vec![
        "let global = Self::instance();".to_string(),
        format!("// {}", command.name),
        format!("let {info_var} = global.get_{info_var}({receiver}).unwrap();"),
        format!(
            "let dispatch_table = &{info_var}.dispatch_table.{};",
            dispatch_feature.field_name()
        ),
        format!(
            "let layer_result = {info_var}.customized_info.borrow().hooks().{fn_name}({});",
            args.join(", ")
        ),
        "match layer_result {".to_string(),
        "    LayerResult::Handled(res) => {".to_string(),
    ];
    lines.extend(
        ret_lines(command, &signature, config)?
            .into_iter()
            .map(|line| format!("        {line}")),
    );
    lines.push("    }".to_string());
    lines.push(format!(
        "    LayerResult::Unhandled => unsafe {{ (dispatch_table.{fn_name})({}) }},",
        ffi_args.join(", ")
    ));
    lines.push("}".to_string());
    Ok(lines)
}

fn emit_extension_enum<W: io::Write>(w: &mut W, features: &[DispatchFeature]) -> anyhow::Result<()> {
    let extensions: Vec<(&str, String)> = features
        .iter()
        .filter_map(|feature| Some((feature.extension_name()?, feature.extension_variant()?)))
        .collect();

    write!(w, "#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Debug)]\n")?;
    write!(w, "pub enum Extension {{\n")?;
    for (_, variant) in extensions.iter() {
        write!(w, "    {variant},\n")?;
    }
    write!(w, "}}\n\n")?;

    write!(w, "impl TryFrom<&str> for Extension {{\n")?;
    write!(w, "    type Error = TryFromExtensionError;\n\n")?;
    write!(w, "    fn try_from(value: &str) -> Result<Self, Self::Error> {{\n")?;
    write!(w, "        match value {{\n")?;
    for (name, variant) in extensions.iter() {
        write!(w, "            \"{name}\" => Ok(Extension::{variant}),\n")?;
    }
    write!(
        w,
        "            _ => Err(TryFromExtensionError::UnknownExtension(value.to_owned())),\n"
    )?;
    write!(w, "        }}\n")?;
    write!(w, "    }}\n")?;
    write!(w, "}}\n\n")?;

    write!(w, "impl From<Extension> for &'static str {{\n")?;
    write!(w, "    fn from(value: Extension) -> &'static str {{\n")?;
    write!(w, "        match value {{\n")?;
    for (name, variant) in extensions.iter() {
        write!(w, "            Extension::{variant} => \"{name}\",\n")?;
    }
    write!(w, "        }}\n")?;
    write!(w, "    }}\n")?;
    write!(w, "}}\n\n")?;
    Ok(())
}

struct DispatchTable {
    struct_name: &'static str,
    core_type: &'static str,
    proc_addr_fn: &'static str,
    proc_addr_type: &'static str,
    handle: &'static str,
    chain: DispatchChain,
}

const DISPATCH_TABLES: &[DispatchTable] = &[
    DispatchTable {
        struct_name: "DeviceDispatchTable",
        core_type: "ash::Device",
        proc_addr_fn: "get_device_proc_addr",
        proc_addr_type: "vkGetDeviceProcAddr",
        handle: "device",
        chain: DispatchChain::Device,
    },
    DispatchTable {
        struct_name: "InstanceDispatchTable",
        core_type: "ash::Instance",
        proc_addr_fn: "get_instance_proc_addr",
        proc_addr_type: "vkGetInstanceProcAddr",
        handle: "instance",
        chain: DispatchChain::Instance,
    },
];

fn emit_dispatch_tables<W: io::Write>(
    w: &mut W,
    model: &Model,
    config: &Config,
) -> anyhow::Result<()> {
    let mut served: Vec<&str> = Vec::new();
    for command in model.representatives()?.into_iter() {
        if command.chain != DispatchChain::Global {
            served.push(&command.command.name);
        }
    }
    let used = used_features(&model.features, served)?;

    for table in DISPATCH_TABLES.iter() {
        let DispatchTable {
            struct_name,
            core_type,
            proc_addr_fn,
            proc_addr_type,
            handle,
            chain,
        } = table;

        let mut fields: Vec<(bool, String, String)> = Vec::new();
        // registry order
        for feature in model.features.iter().filter(|feature| used.contains(feature)) {
            let Some(table_type) = feature.table_type() else {
                continue;
            };
            let serves_chain = feature.commands.iter().any(|name| {
                model
                    .commands
                    .get(name)
                    .is_some_and(|command| command.chain == *chain)
            });
            if serves_chain {
                fields.push((feature.is_deprecated(config), feature.field_name(), table_type));
            }
        }

        write!(w, "pub(crate) struct {struct_name} {{\n")?;
        write!(w, "    pub core: Arc<{core_type}>,\n")?;
        for (deprecated, field_name, table_type) in fields.iter() {
            if *deprecated {
                write!(w, "    #[allow(deprecated)]\n")?;
            }
            write!(w, "    {field_name}: Arc<{table_type}>,\n")?;
        }
        write!(w, "}}\n\n")?;

        write!(w, "impl {struct_name} {{\n")?;
        write!(
            w,
            "    pub(crate) fn load({proc_addr_fn}: vk::PFN_{proc_addr_type}, {handle}: Arc<{core_type}>) -> Self {{\n"
        )?;
        write!(
            w,
            "        let proc_addr_loader = {proc_addr_fn}_loader({proc_addr_fn}, &{handle});\n"
        )?;
        write!(w, "        Self {{\n")?;
        write!(w, "            core: Arc::clone(&{handle}),\n")?;
        for (_, field_name, table_type) in fields.iter() {
            write!(
                w,
                "            {field_name}: Arc::new({table_type}::load(&proc_addr_loader)),\n"
            )?;
        }
        write!(w, "        }}\n")?;
        write!(w, "    }}\n")?;
        write!(w, "}}\n\n")?;
    }
    Ok(())
}

fn vulkan_command_entries(
    model: &Model,
    chain: DispatchChain,
    config: &Config,
) -> Result<Vec<String>, GenError> {
    let mut lines: Vec<String> = Vec::new();
    for (name, _) in model.commands_of(chain) {
        let representative = &model.representative(name)?.command.name;
        let features: Vec<String> = features_of(&model.features, name)
            .map(DispatchFeature::feature_expr)
            .collect();
        if features.is_empty() {
            return Err(GenError::MissingDispatchInfo(name.to_string()));
        }
        let hooked = if config.is_always_hooked(name) {
            "true".to_string()
        } else {
            format!(
                "hooked_commands.contains(&LayerVulkanCommand::{})",
                command_variant_name(representative)
            )
        };
        lines.extend([
            "VulkanCommand {".to_string(),
            format!("    name: \"{name}\","),
            format!("    features: smallvec![{}],", features.join(", ")),
            format!("    hooked: {hooked},"),
            format!(
                "    proc: unsafe {{ std::mem::transmute::<vk::PFN_{representative}, vk::PFN_vkVoidFunction>(Self::{}) }},",
                command_fn_name(representative)
            ),
            "},".to_string(),
        ]);
    }
    Ok(lines)
}

pub fn emit_global_simple_intercept<W: io::Write>(
    w: &mut W,
    model: &Model,
    config: &Config,
) -> anyhow::Result<()> {
    emit_header(w)?;
    write!(w, "#![allow(unused_unsafe)]\n")?;
    write!(
        w,
        "use std::{{borrow::Borrow, collections::HashSet, ffi::{{c_char, c_int, c_void, CStr}}, ptr::NonNull, sync::Arc}};\n\n"
    )?;
    write!(w, "use ash::vk;\n")?;
    write!(w, "use smallvec::smallvec;\n\n")?;
    write!(
        w,
        "use crate::{{fill_vk_out_array, Global, Layer, LayerResult, LayerVulkanCommand, vk_utils::{{ptr_as_uninit_mut, slice_from_raw_parts}}}};\n"
    )?;
    write!(
        w,
        "use super::{{get_device_proc_addr_loader, get_instance_proc_addr_loader, ApiVersion, Feature, TryFromExtensionError, VulkanCommand, bool_iterator_from_raw_parts, maybe_slice_from_raw_parts, maybe_uninit_slice_from_raw_parts_mut, uninit_slice_from_raw_parts_mut}};\n\n"
    )?;

    emit_extension_enum(w, &model.features)?;
    emit_dispatch_tables(w, model, config)?;
    emit_unhandled_comments(w, &model.unhandled)?;

    write!(w, "impl<T: Layer> Global<T> {{\n")?;
    write!(
        w,
        "    pub(crate) fn create_device_commands(&self, instance_info: &T::InstanceInfo, device_info: Option<&T::DeviceInfo>) -> Box<[VulkanCommand]> {{\n"
    )?;
    write!(w, "        let hooked_commands = self.layer_info\n")?;
    write!(w, "            .hooked_device_commands(instance_info, device_info)\n")?;
    write!(w, "            .collect::<HashSet<_>>();\n")?;
    write!(w, "        Box::new([\n")?;
    emit_lines(w, 12, &vulkan_command_entries(model, DispatchChain::Device, config)?)?;
    write!(w, "        ])\n")?;
    write!(w, "    }}\n\n")?;

    write!(
        w,
        "    pub(crate) fn create_instance_commands(&self, instance_info: &T::InstanceInfo) -> Box<[VulkanCommand]> {{\n"
    )?;
    write!(w, "        let hooked_commands = self.layer_info\n")?;
    write!(w, "            .hooked_instance_commands(instance_info)\n")?;
    write!(w, "            .collect::<HashSet<_>>();\n")?;
    write!(w, "        Box::new([\n")?;
    emit_lines(w, 12, &vulkan_command_entries(model, DispatchChain::Instance, config)?)?;
    write!(w, "        ])\n")?;
    write!(w, "    }}\n")?;

    for command in model.representatives()?.into_iter() {
        if command.chain == DispatchChain::Global
            || config.is_manually_implemented(&command.command.name)
        {
            continue;
        }
        write!(w, "\n    {} {{\n", ffi_fn_decl(&command.command, config)?)?;
        emit_lines(w, 8, &ffi_fn_body(command, &model.features, config)?)?;
        write!(w, "    }}\n")?;
    }
    write!(w, "}}\n")?;
    Ok(())
}
