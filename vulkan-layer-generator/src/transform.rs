//! expressions that sit between the raw `extern "system"` params and the hooks of the layer.

use crate::config::Config;
use crate::decayed::{Command, DecayedType, Length, Parameter, TypeKind};
use crate::error::GenError;
use crate::names::{camel_to_snake, escape_keyword};
use crate::project::HighLevelType;
use crate::signature::{CommandSignature, ReturnKind};

/// scalar types a length param may have.
const LENGTH_SCALARS: &[&str] = &["uint32_t", "size_t", "VkDeviceSize"];
/// pointee types of in/out count params.
const COUNT_POINTEES: &[&str] = &["uint32_t", "size_t"];

pub fn ffi_name(name: &str) -> String {
    escape_keyword(&camel_to_snake(name))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Array,
    Bool,
    Scalar,
    NoLenPointer,
    NullTerminated,
    BoolSlice,
    VoidSlice,
    GeneralSlice,
}

/// first matching rule wins.
fn select_rule(ty: &DecayedType, safe: &HighLevelType) -> Option<Rule> {
    match (&ty.kind, &ty.length, safe) {
        (TypeKind::Scalar { .. }, Length::Fixed(_), HighLevelType::Ref { .. })
            if !ty.is_optional && ty.is_const =>
        {
            Some(Rule::Array)
        }
        (TypeKind::Scalar { name, .. }, Length::None, HighLevelType::Scalar(safe_name))
            if name == "VkBool32" && safe_name == "bool" =>
        {
            Some(Rule::Bool)
        }
        (TypeKind::Scalar { .. }, Length::None, HighLevelType::Scalar(_)) => Some(Rule::Scalar),
        (TypeKind::Pointer(_), Length::None, _) => Some(Rule::NoLenPointer),
        (TypeKind::Pointer(pointee), Length::NullTerminated, HighLevelType::Str)
            if !ty.is_optional && pointee.is_const && pointee.name() == Some("char") =>
        {
            Some(Rule::NullTerminated)
        }
        (TypeKind::Pointer(pointee), Length::Variable(_), _)
            if !ty.is_optional && pointee.is_const && pointee.name() == Some("VkBool32") =>
        {
            Some(Rule::BoolSlice)
        }
        (TypeKind::Pointer(pointee), Length::Variable(_), _) if pointee.name() == Some("void") => {
            Some(Rule::VoidSlice)
        }
        (TypeKind::Pointer(_), Length::Variable(_), _) => Some(Rule::GeneralSlice),
        _ => None,
    }
}

fn slice_fn(ty: &DecayedType, pointee: &DecayedType) -> &'static str {
    match (ty.is_optional, pointee.is_const) {
        (true, true) => "maybe_slice_from_raw_parts",
        (true, false) => "maybe_uninit_slice_from_raw_parts_mut",
        (false, true) => "slice_from_raw_parts",
        (false, false) => "uninit_slice_from_raw_parts_mut",
    }
}

struct Context<'a> {
    config: &'a Config,
    command: &'a Command,
    param: &'a Parameter,
}

impl<'a> Context<'a> {
    fn sibling(&self, name: &str) -> Option<&'a Parameter> {
        self.command.param(name)
    }

    fn type_mismatch(&self, reason: impl Into<String>) -> GenError {
        GenError::TypeMismatch {
            command: self.command.name.clone(),
            param: self.param.name.clone(),
            reason: reason.into(),
        }
    }

    fn no_transform(&self) -> GenError {
        GenError::NoApplicableTransform {
            command: self.command.name.clone(),
            param: self.param.name.clone(),
        }
    }

    fn length_ref(&self) -> Result<&'a str, GenError> {
        self.param.length_ref().ok_or_else(|| self.no_transform())
    }

    /// sibling named by the length of the param; it must be required.
    fn length_sibling(&self) -> Result<&'a Parameter, GenError> {
        let len = self.length_ref()?;
        let sibling = self
            .sibling(len)
            .ok_or_else(|| self.type_mismatch(format!("length {len:?} is not a parameter")))?;
        if sibling.ty.is_optional {
            return Err(self.type_mismatch(format!("length {len:?} is optional")));
        }
        Ok(sibling)
    }

    fn bool_slice_len(&self) -> Result<String, GenError> {
        let len = self.length_ref()?;
        if len.contains("->") {
            return Err(self.type_mismatch(format!("bool slice length {len:?} is a path")));
        }
        let sibling = self.length_sibling()?;
        if !sibling.ty.name().is_some_and(|name| LENGTH_SCALARS.contains(&name)) {
            return Err(self.type_mismatch(format!("bool slice length {len:?} is not an integer")));
        }
        Ok(ffi_name(&sibling.name))
    }

    fn void_slice_len(&self, ty: &DecayedType, pointee: &DecayedType) -> Result<String, GenError> {
        let sibling = self.length_sibling()?;
        let supported = if ty.is_optional && !pointee.is_const {
            sibling.ty.points_to_any(COUNT_POINTEES)
        } else {
            sibling.ty.name().is_some_and(|name| LENGTH_SCALARS.contains(&name))
        };
        if !supported {
            return Err(self.type_mismatch(format!("unsupported length {}", sibling.name)));
        }
        Ok(ffi_name(&sibling.name))
    }

    fn slice_len(&self, ty: &DecayedType, pointee: &DecayedType) -> Result<String, GenError> {
        let len = self.length_ref()?;
        if let Some(formula) = self.config.length_formula(&self.command.name, len) {
            return Ok(formula.to_string());
        }

        if ty.is_optional && !pointee.is_const {
            // optional out slices are sized by an in/out count
            let sibling = self
                .sibling(len)
                .filter(|sibling| sibling.ty.points_to_any(COUNT_POINTEES))
                .ok_or_else(|| self.type_mismatch(format!("{len:?} is not a count pointer")))?;
            return Ok(ffi_name(&sibling.name));
        }

        if let Some((struct_name, field)) = len.split_once("->") {
            let sibling = self
                .sibling(struct_name)
                .filter(|_| !field.contains("->"))
                .ok_or_else(|| self.type_mismatch(format!("unsupported length path {len:?}")))?;
            if sibling.ty.is_optional {
                return Err(GenError::UnsupportedOptionalLengthPath {
                    command: self.command.name.clone(),
                    param: self.param.name.clone(),
                    len: len.to_string(),
                });
            }
            if !sibling.ty.pointee().is_some_and(|pointee| pointee.is_const) {
                return Err(self.type_mismatch(format!("{struct_name} is not a const pointer")));
            }
            return Ok(format!(
                "unsafe {{ {}.as_ref() }}.unwrap().{}",
                ffi_name(struct_name),
                ffi_name(field)
            ));
        }

        let sibling = self.sibling(len).ok_or_else(|| self.no_transform())?;
        if sibling.ty.name() == Some("uint32_t") {
            return Ok(ffi_name(&sibling.name));
        }
        if sibling.ty.points_to_any(&["uint32_t"]) && !sibling.ty.is_optional {
            return Ok(format!(
                "*unsafe {{ {}.as_ref() }}.unwrap()",
                ffi_name(&sibling.name)
            ));
        }
        Err(self.no_transform())
    }
}

/// expression that turns the raw param at `index` into the value handed to the hook.
pub fn transform_param(
    command: &Command,
    index: usize,
    safe: &HighLevelType,
    config: &Config,
) -> Result<String, GenError> {
    let param = &command.params[index];
    let ctx = Context {
        config,
        command,
        param,
    };
    let ty = &param.ty;
    let name = ffi_name(&param.name);
    let rule = select_rule(ty, safe).ok_or_else(|| ctx.no_transform())?;
    let pointee = ty.pointee();
    Ok(match (rule, pointee) {
        (Rule::Array, _) => format!("unsafe {{ {name}.as_ref() }}.unwrap()"),
        (Rule::Bool, _) => format!("{name} == vk::TRUE"),
        (Rule::Scalar, _) => name,
        (Rule::NoLenPointer, Some(pointee)) => {
            let expr = match safe {
                HighLevelType::Pointer { .. } => return Ok(name),
                HighLevelType::Option(inner) if matches!(**inner, HighLevelType::Pointer { .. }) => {
                    return Ok(format!("(!{name}.is_null()).then_some({name})"));
                }
                _ if pointee.is_const => format!("unsafe {{ {name}.as_ref() }}"),
                _ => format!("unsafe {{ ptr_as_uninit_mut({name}) }}"),
            };
            if ty.is_optional {
                expr
            } else {
                format!("{expr}.unwrap()")
            }
        }
        (Rule::NullTerminated, _) => {
            format!("unsafe {{ CStr::from_ptr({name}) }}.to_str().unwrap()")
        }
        (Rule::BoolSlice, _) => {
            let len = ctx.bool_slice_len()?;
            format!("unsafe {{ bool_iterator_from_raw_parts({name}, {len}) }}")
        }
        (Rule::VoidSlice, Some(pointee)) => {
            let len = ctx.void_slice_len(ty, pointee)?;
            let cast = if pointee.is_const { "*const u8" } else { "*mut u8" };
            let slice_fn = slice_fn(ty, pointee);
            format!("unsafe {{ {slice_fn}({name} as {cast}, {len}) }}")
        }
        (Rule::GeneralSlice, Some(pointee)) => {
            let len = ctx.slice_len(ty, pointee)?;
            let slice_fn = slice_fn(ty, pointee);
            format!("unsafe {{ {slice_fn}({name}, {len}) }}")
        }
        _ => return Err(ctx.no_transform()),
    })
}

/// lines that write the value returned by a hook, `res`, back into the out param at `index`.
pub fn assign_lines(
    command: &Command,
    index: usize,
    returns_vk_result: bool,
    config: &Config,
) -> Result<Vec<String>, GenError> {
    let param = &command.params[index];
    let ctx = Context {
        config,
        command,
        param,
    };
    let ty = &param.ty;
    let pointee = ty
        .pointee()
        .ok_or_else(|| ctx.type_mismatch("out param is not a pointer"))?;
    let name = ffi_name(&param.name);

    let mut lines: Vec<String> = Vec::new();
    match &ty.length {
        Length::Variable(len) => {
            let mut count_is_in_out = false;
            let len_expr = if let Some((struct_name, field)) = len.split_once("->") {
                let sibling = ctx
                    .sibling(struct_name)
                    .ok_or_else(|| ctx.type_mismatch(format!("unsupported length path {len:?}")))?;
                if sibling.ty.is_optional {
                    return Err(GenError::UnsupportedOptionalLengthPath {
                        command: command.name.clone(),
                        param: param.name.clone(),
                        len: len.to_string(),
                    });
                }
                format!(
                    "unsafe {{ {}.as_ref().unwrap() }}.{}.try_into().unwrap()",
                    ffi_name(struct_name),
                    ffi_name(field)
                )
            } else {
                let sibling = ctx.length_sibling()?;
                let len_name = ffi_name(&sibling.name);
                match sibling.ty.name() {
                    Some("uint32_t") => format!("{len_name}.try_into().unwrap()"),
                    Some("size_t") => len_name,
                    _ if sibling.ty.points_to_any(COUNT_POINTEES) => {
                        count_is_in_out = true;
                        len_name
                    }
                    _ => {
                        return Err(ctx.type_mismatch(format!("unsupported length {len:?}")));
                    }
                }
            };

            if !count_is_in_out {
                lines.push(format!(
                    "unsafe {{ std::slice::from_raw_parts_mut({name}, {len_expr}) }}.copy_from_slice(&res);"
                ));
                if returns_vk_result {
                    lines.push("vk::Result::SUCCESS".to_string());
                }
                return Ok(lines);
            }

            let mut fill_lines = vec![
                "    fill_vk_out_array(".to_string(),
                "        &res,".to_string(),
                format!("        NonNull::new({len_expr}).unwrap(),"),
                format!("        {name},"),
                "    )".to_string(),
            ];
            if !returns_vk_result {
                // NOTE: VK_INCOMPLETE is dropped on the floor here.
                if let Some(last) = fill_lines.last_mut() {
                    last.push(';');
                }
                lines.push(format!("// We can't return INCOMPLETE from {}", command.name));
                lines.push("#[allow(unused_must_use)]".to_string());
            }
            lines.push("unsafe {".to_string());
            lines.extend(fill_lines);
            lines.push("}".to_string());
        }
        Length::None => {
            if ty.is_optional {
                return Err(ctx.type_mismatch("optional out param"));
            }
            let expr = if pointee.name() == Some("VkBool32") {
                "if res { vk::TRUE } else { vk::FALSE }".to_string()
            } else if let Some(inner) = pointee.pointee().filter(|_| pointee.is_optional) {
                if inner.is_const {
                    return Err(ctx.type_mismatch("optional const pointer out param"));
                }
                "res.unwrap_or(std::ptr::null_mut())".to_string()
            } else {
                "res".to_string()
            };
            lines.push(format!("*unsafe {{ {name}.as_mut() }}.unwrap() = {expr};"));
            if returns_vk_result {
                lines.push("vk::Result::SUCCESS".to_string());
            }
        }
        Length::Fixed(_) | Length::NullTerminated => {
            return Err(ctx.type_mismatch("out param with a fixed or null-terminated length"));
        }
    }
    Ok(lines)
}

/// lines that turn the value returned by a hook, `res`, into the return value of the raw
/// function.
pub fn ret_lines(
    command: &Command,
    signature: &CommandSignature,
    config: &Config,
) -> Result<Vec<String>, GenError> {
    let promoted = signature.promoted.as_ref().map(|(index, _)| *index);
    Ok(match (&signature.ret, promoted) {
        (ReturnKind::VkResult, None) => vec![
            "match res {".to_string(),
            "    Ok(()) => vk::Result::SUCCESS,".to_string(),
            "    Err(e) => e,".to_string(),
            "}".to_string(),
        ],
        (ReturnKind::VkResult, Some(index)) => {
            let mut lines = vec!["match res {".to_string(), "    Ok(res) => {".to_string()];
            lines.extend(
                assign_lines(command, index, true, config)?
                    .into_iter()
                    .map(|line| format!("        {line}")),
            );
            lines.push("    }".to_string());
            lines.push("    Err(e) => e,".to_string());
            lines.push("}".to_string());
            lines
        }
        (ReturnKind::Void, Some(index)) => assign_lines(command, index, false, config)?,
        (ReturnKind::Bool32, _) => vec!["if res { vk::TRUE } else { vk::FALSE }".to_string()],
        (ReturnKind::Void | ReturnKind::Scalar(_), _) => vec!["res".to_string()],
    })
}
