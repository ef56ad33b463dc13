use std::collections::HashMap;

use crate::config::Config;
use crate::error::GenError;
use crate::registry::{RawCommand, RawParam, TypeCategory};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Length {
    None,
    /// dimensions of a fixed size array, outermost first.
    Fixed(Vec<u32>),
    /// a sibling parameter, a `param->field` path or a fixed arithmetic expression.
    Variable(String),
    NullTerminated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Scalar { name: String, is_struct: bool },
    Pointer(Box<DecayedType>),
}

/// c-level type of a parameter.
///
/// on a pointer node `is_const` describes the pointer itself (`* const`); const-ness of the
/// pointee is the `is_const` of the node it points to. the length is attached to the outermost
/// node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecayedType {
    pub is_const: bool,
    pub is_optional: bool,
    pub kind: TypeKind,
    pub length: Length,
}

impl DecayedType {
    /// the innermost node.
    pub fn scalar(&self) -> &DecayedType {
        let mut node = self;
        while let TypeKind::Pointer(pointee) = &node.kind {
            node = pointee;
        }
        node
    }

    pub fn scalar_name(&self) -> &str {
        match &self.scalar().kind {
            TypeKind::Scalar { name, .. } => name,
            TypeKind::Pointer(_) => unreachable!(),
        }
    }

    pub fn is_struct(&self) -> bool {
        matches!(self.scalar().kind, TypeKind::Scalar { is_struct: true, .. })
    }

    pub fn pointee(&self) -> Option<&DecayedType> {
        match &self.kind {
            TypeKind::Pointer(pointee) => Some(pointee),
            TypeKind::Scalar { .. } => None,
        }
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self.kind, TypeKind::Pointer(_))
    }

    /// name of a scalar node, `None` for pointers.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::Scalar { name, .. } => Some(name),
            TypeKind::Pointer(_) => None,
        }
    }

    /// whether this is a pointer straight to one of `names`.
    pub fn points_to_any(&self, names: &[&str]) -> bool {
        self.pointee()
            .and_then(DecayedType::name)
            .is_some_and(|name| names.contains(&name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub ty: DecayedType,
}

impl Parameter {
    pub fn length_ref(&self) -> Option<&str> {
        match &self.ty.length {
            Length::Variable(len) => Some(len),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DispatchChain {
    Global,
    Instance,
    Device,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub return_type: String,
    pub params: Vec<Parameter>,
}

impl Command {
    pub fn from_raw(
        raw: &RawCommand,
        types: &HashMap<String, TypeCategory>,
    ) -> Result<Command, GenError> {
        let params = raw
            .params
            .iter()
            .map(|param| {
                Ok(Parameter {
                    name: param.name.clone(),
                    ty: decay_param(&raw.name, param, types)?,
                })
            })
            .collect::<Result<Vec<_>, GenError>>()?;
        Ok(Command {
            name: raw.name.clone(),
            return_type: raw.return_type.clone(),
            params,
        })
    }

    pub fn param(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|param| param.name == name)
    }

    /// `None` when the chain can not be told from the first parameter.
    pub fn dispatch_chain(&self, config: &Config) -> Option<DispatchChain> {
        if config.is_global(&self.name) {
            return Some(DispatchChain::Global);
        }
        match self.params.first()?.ty.name()? {
            "VkInstance" | "VkPhysicalDevice" => Some(DispatchChain::Instance),
            "VkDevice" | "VkCommandBuffer" | "VkQueue" => Some(DispatchChain::Device),
            _ => None,
        }
    }
}

/// pointer levels of the text between `</type>` and `<name>`, innermost first. `true` marks a
/// const pointer.
fn parse_pointer_levels(text: &str) -> Option<Vec<bool>> {
    let mut levels: Vec<bool> = Vec::new();
    let mut rest = text.trim();
    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix('*') {
            levels.push(false);
            rest = tail.trim_start();
        } else if let Some(tail) = rest.strip_prefix("const") {
            let last = levels.last_mut()?;
            if *last {
                return None;
            }
            *last = true;
            rest = tail.trim_start();
        } else {
            return None;
        }
    }
    Some(levels)
}

/// `[4]` -> `[4]`, `[2][3]` -> `[2, 3]`.
fn parse_array_dims(text: &str) -> Option<Vec<u32>> {
    let mut dims: Vec<u32> = Vec::new();
    let mut rest = text.trim();
    while !rest.is_empty() {
        let tail = rest.strip_prefix('[')?;
        let (dim, tail) = tail.split_once(']')?;
        dims.push(dim.trim().parse().ok()?);
        rest = tail.trim_start();
    }
    Some(dims)
}

fn decay_param(
    command: &str,
    raw: &RawParam,
    types: &HashMap<String, TypeCategory>,
) -> Result<DecayedType, GenError> {
    let malformed = |reason: String| GenError::MalformedType {
        command: command.to_string(),
        param: raw.name.clone(),
        reason,
    };
    let unsupported_len = |len: &str| GenError::UnsupportedLengthSpec {
        command: command.to_string(),
        param: raw.name.clone(),
        len: len.to_string(),
    };

    let category = types
        .get(&raw.type_name)
        .copied()
        .ok_or_else(|| GenError::UnknownType {
            command: command.to_string(),
            name: raw.type_name.clone(),
        })?;

    let qualifiers: Vec<&str> = raw
        .prefix
        .split_whitespace()
        .filter(|word| *word != "struct")
        .collect();
    let base_is_const = match qualifiers.as_slice() {
        [] => false,
        ["const"] => true,
        _ => return Err(malformed(format!("unexpected prefix {:?}", raw.prefix))),
    };

    let levels = parse_pointer_levels(&raw.pointer_suffix)
        .ok_or_else(|| malformed(format!("unexpected pointer text {:?}", raw.pointer_suffix)))?;
    let node_count = levels.len() + 1;

    // outermost first
    let mut optional_flags: Vec<bool> = Vec::new();
    if let Some(optional) = raw.optional.as_deref() {
        for flag in optional.split(',') {
            match flag.trim() {
                "true" => optional_flags.push(true),
                "false" => optional_flags.push(false),
                other => return Err(malformed(format!("unexpected optional flag {other:?}"))),
            }
        }
    }
    if optional_flags.len() > node_count {
        return Err(malformed(format!(
            "{} optional flags for {node_count} levels",
            optional_flags.len()
        )));
    }
    let is_optional = |depth_from_outside: usize| {
        optional_flags
            .get(depth_from_outside)
            .copied()
            .unwrap_or(false)
    };

    let mut ty = DecayedType {
        is_const: base_is_const,
        is_optional: is_optional(node_count - 1),
        kind: TypeKind::Scalar {
            name: raw.type_name.clone(),
            is_struct: category == TypeCategory::Struct,
        },
        length: Length::None,
    };
    for (i, pointer_is_const) in levels.iter().enumerate() {
        ty = DecayedType {
            is_const: *pointer_is_const,
            is_optional: is_optional(node_count - 2 - i),
            kind: TypeKind::Pointer(Box::new(ty)),
            length: Length::None,
        };
    }

    if let Some(len) = raw.len.as_deref() {
        ty.length = if len == "null-terminated" {
            let is_const_char = ty
                .pointee()
                .is_some_and(|pointee| pointee.is_const && pointee.name() == Some("char"));
            if !is_const_char {
                return Err(GenError::TypeMismatch {
                    command: command.to_string(),
                    param: raw.name.clone(),
                    reason: "null-terminated length on something other than const char*"
                        .to_string(),
                });
            }
            Length::NullTerminated
        } else if len.starts_with("latexmath:") {
            let altlen = raw.altlen.as_deref().ok_or_else(|| unsupported_len(len))?;
            Length::Variable(altlen.to_string())
        } else if len == "1" || len.contains(',') {
            return Err(unsupported_len(len));
        } else if len.is_empty() {
            Length::None
        } else {
            Length::Variable(len.to_string())
        };
        if !ty.is_pointer() && ty.length != Length::None {
            return Err(GenError::TypeMismatch {
                command: command.to_string(),
                param: raw.name.clone(),
                reason: format!("length {len:?} on a non-pointer"),
            });
        }
    }

    if !raw.array_suffix.is_empty() {
        let dims = parse_array_dims(&raw.array_suffix)
            .filter(|dims| !dims.is_empty())
            .ok_or_else(|| malformed(format!("unexpected array suffix {:?}", raw.array_suffix)))?;
        if ty.length != Length::None {
            return Err(unsupported_len(&raw.array_suffix));
        }
        ty.length = Length::Fixed(dims);
    }

    Ok(ty)
}
