use std::collections::HashSet;

use crate::config::{Config, LAYER_DEVICE_LINK_COMMAND};
use crate::decayed::{Command, Length};
use crate::error::GenError;
use crate::names::{camel_to_snake, rust_type_name};
use crate::project::{HighLevelType, Mode, project};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnKind {
    Void,
    VkResult,
    Bool32,
    Scalar(HighLevelType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureParam {
    /// index into the params of the command; `None` for injected params.
    pub source: Option<usize>,
    pub name: String,
    pub ty: HighLevelType,
}

/// shape of a hook method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSignature {
    pub ret: ReturnKind,
    pub params: Vec<SignatureParam>,
    /// the out param that became the return value of the hook.
    pub promoted: Option<(usize, HighLevelType)>,
}

impl CommandSignature {
    pub fn return_type(&self) -> String {
        let promoted = self
            .promoted
            .as_ref()
            .map(|(_, ty)| ty.to_string())
            .unwrap_or_else(|| "()".to_string());
        match &self.ret {
            ReturnKind::Void => format!("LayerResult<{promoted}>"),
            ReturnKind::VkResult => format!("LayerResult<VkResult<{promoted}>>"),
            ReturnKind::Bool32 => "LayerResult<bool>".to_string(),
            ReturnKind::Scalar(ty) => format!("LayerResult<{ty}>"),
        }
    }
}

fn return_kind(command: &Command, config: &Config) -> Result<ReturnKind, GenError> {
    Ok(match command.return_type.as_str() {
        "void" => ReturnKind::Void,
        "VkResult" => ReturnKind::VkResult,
        "VkBool32" => ReturnKind::Bool32,
        other => {
            let name = rust_type_name(config, other).ok_or_else(|| GenError::UnknownType {
                command: command.name.clone(),
                name: other.to_string(),
            })?;
            ReturnKind::Scalar(HighLevelType::Scalar(name))
        }
    })
}

/// the last param, if it is an out param that the hook returns instead.
fn promote(
    command: &Command,
    config: &Config,
) -> Result<Option<(usize, HighLevelType)>, GenError> {
    if config.keeps_out_param(&command.name) {
        return Ok(None);
    }
    let Some(index) = command.params.len().checked_sub(1) else {
        return Ok(None);
    };
    let last = &command.params[index];
    let Some(pointee) = last.ty.pointee() else {
        return Ok(None);
    };
    if pointee.is_const || last.ty.is_struct() || pointee.name() == Some("void") {
        return Ok(None);
    }
    let element = project(pointee, Mode::Safe, config, &command.name, &last.name)?;
    match &last.ty.length {
        Length::None => Ok(Some((index, element))),
        Length::Variable(_) => Ok(Some((index, HighLevelType::Vec(Box::new(element))))),
        Length::Fixed(_) | Length::NullTerminated => Ok(None),
    }
}

pub fn infer_signature(command: &Command, config: &Config) -> Result<CommandSignature, GenError> {
    let ret = return_kind(command, config)?;
    let promoted = match ret {
        ReturnKind::Void | ReturnKind::VkResult => promote(command, config)?,
        ReturnKind::Bool32 | ReturnKind::Scalar(_) => None,
    };
    let promoted_index = promoted.as_ref().map(|(index, _)| *index);

    let mut hidden: HashSet<usize> = HashSet::new();
    if let Some(index) = promoted_index {
        hidden.insert(index);
        if let Some(len) = command.params[index].length_ref() {
            hidden.extend(command.params.iter().position(|param| param.name == len));
        }
    }
    if let Some(receiver) = command.params.first() {
        if matches!(receiver.ty.name(), Some("VkInstance" | "VkDevice")) {
            hidden.insert(0);
        }
    }
    let length_refs: HashSet<&str> = command
        .params
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != promoted_index)
        .filter_map(|(_, param)| param.length_ref())
        .collect();

    let mut params: Vec<SignatureParam> = Vec::new();
    for (index, param) in command.params.iter().enumerate() {
        if hidden.contains(&index) {
            continue;
        }
        if !param.ty.is_pointer() && length_refs.contains(param.name.as_str()) {
            continue;
        }
        params.push(SignatureParam {
            source: Some(index),
            name: format!("_{}", camel_to_snake(&param.name)),
            ty: project(&param.ty, Mode::Safe, config, &command.name, &param.name)?,
        });
    }

    if command.name == LAYER_DEVICE_LINK_COMMAND {
        params.insert(
            params.len().min(2),
            SignatureParam {
                source: None,
                name: "_layer_device_link".to_string(),
                ty: HighLevelType::Ref {
                    target: Box::new(HighLevelType::Scalar("VkLayerDeviceLink".to_string())),
                    mutable: false,
                    uninit: false,
                },
            },
        );
    }

    Ok(CommandSignature {
        ret,
        params,
        promoted,
    })
}
