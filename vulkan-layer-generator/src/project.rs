use std::fmt;

use crate::config::Config;
use crate::decayed::{DecayedType, Length, TypeKind};
use crate::error::GenError;
use crate::names::rust_type_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighLevelType {
    Scalar(String),
    Str,
    Ref {
        target: Box<HighLevelType>,
        mutable: bool,
        uninit: bool,
    },
    Slice {
        element: Box<HighLevelType>,
        mutable: bool,
        uninit: bool,
    },
    Vec(Box<HighLevelType>),
    Option(Box<HighLevelType>),
    Array {
        element: Box<HighLevelType>,
        len: u32,
    },
    Pointer {
        pointee: Box<HighLevelType>,
        mutable: bool,
    },
}

impl HighLevelType {
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Scalar(name) if name == "bool")
    }

    /// `bool` has a different layout than `VkBool32`, so it must never be reached through an
    /// indirection. `MaybeUninit<bool>` is the only exception: the hook writes a value that is
    /// converted afterwards.
    pub fn check_no_indirect_bool(&self) -> Result<(), &'static str> {
        match self {
            Self::Scalar(_) | Self::Str => Ok(()),
            Self::Ref {
                target,
                uninit: true,
                ..
            } if target.is_bool() => Ok(()),
            Self::Ref { target: inner, .. }
            | Self::Slice { element: inner, .. }
            | Self::Array { element: inner, .. }
            | Self::Pointer { pointee: inner, .. } => {
                if inner.is_bool() {
                    Err("bool behind an indirection")
                } else {
                    inner.check_no_indirect_bool()
                }
            }
            Self::Vec(inner) | Self::Option(inner) => inner.check_no_indirect_bool(),
        }
    }
}

fn write_maybe_uninit(
    f: &mut fmt::Formatter<'_>,
    inner: &HighLevelType,
    uninit: bool,
) -> fmt::Result {
    if uninit {
        f.write_fmt(format_args!("MaybeUninit<{inner}>"))
    } else {
        f.write_fmt(format_args!("{inner}"))
    }
}

impl fmt::Display for HighLevelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(name) => f.write_str(name),
            Self::Str => f.write_str("&str"),
            Self::Ref {
                target,
                mutable,
                uninit,
            } => {
                f.write_str(if *mutable { "&mut " } else { "&" })?;
                write_maybe_uninit(f, target, *uninit)
            }
            Self::Slice {
                element,
                mutable,
                uninit,
            } => {
                f.write_str(if *mutable { "&mut [" } else { "&[" })?;
                write_maybe_uninit(f, element, *uninit)?;
                f.write_str("]")
            }
            Self::Vec(element) => f.write_fmt(format_args!("Vec<{element}>")),
            Self::Option(inner) => f.write_fmt(format_args!("Option<{inner}>")),
            Self::Array { element, len } => f.write_fmt(format_args!("[{element}; {len}]")),
            Self::Pointer { pointee, mutable } => {
                let qualifier = if *mutable { "mut" } else { "const" };
                f.write_fmt(format_args!("*{qualifier} {pointee}"))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// the raw `extern "system"` side.
    Ffi,
    /// what the hooks of the layer see.
    Safe,
}

struct Context<'a> {
    config: &'a Config,
    command: &'a str,
    param: &'a str,
}

impl Context<'_> {
    fn scalar(&self, name: &str) -> Result<HighLevelType, GenError> {
        rust_type_name(self.config, name)
            .map(HighLevelType::Scalar)
            .ok_or_else(|| GenError::UnknownType {
                command: self.command.to_string(),
                name: name.to_string(),
            })
    }

    fn nesting_error(&self) -> GenError {
        GenError::UnsupportedNesting {
            command: self.command.to_string(),
            param: self.param.to_string(),
        }
    }

    fn optional(&self, inner: HighLevelType) -> Result<HighLevelType, GenError> {
        if matches!(inner, HighLevelType::Option(_)) {
            return Err(self.nesting_error());
        }
        Ok(HighLevelType::Option(Box::new(inner)))
    }

    fn is_opaque(&self, ty: &DecayedType) -> bool {
        ty.name()
            .is_some_and(|name| self.config.is_opaque_type(name) || self.config.is_platform_type(name))
    }
}

/// `[2][3]` of `f32` -> `[[f32; 3]; 2]`.
fn array_of(element: HighLevelType, dims: &[u32]) -> HighLevelType {
    dims.iter()
        .rev()
        .fold(element, |element, len| HighLevelType::Array {
            element: Box::new(element),
            len: *len,
        })
}

fn project_ffi(ty: &DecayedType, ctx: &Context) -> Result<HighLevelType, GenError> {
    match &ty.kind {
        TypeKind::Scalar { name, .. } => {
            let scalar = ctx.scalar(name)?;
            match &ty.length {
                Length::Fixed(dims) => Ok(HighLevelType::Pointer {
                    pointee: Box::new(array_of(scalar, dims)),
                    mutable: !ty.is_const,
                }),
                _ => Ok(scalar),
            }
        }
        TypeKind::Pointer(pointee) => Ok(HighLevelType::Pointer {
            pointee: Box::new(project_ffi(pointee, ctx)?),
            mutable: !pointee.is_const,
        }),
    }
}

fn project_safe(ty: &DecayedType, ctx: &Context) -> Result<HighLevelType, GenError> {
    match (&ty.kind, &ty.length) {
        (TypeKind::Scalar { name, .. }, Length::None) => {
            if name == "VkBool32" {
                Ok(HighLevelType::Scalar("bool".to_string()))
            } else {
                ctx.scalar(name)
            }
        }
        (TypeKind::Scalar { name, .. }, Length::Fixed(dims)) => {
            if ty.is_optional {
                return Err(GenError::UnsupportedOptionalArray {
                    command: ctx.command.to_string(),
                    param: ctx.param.to_string(),
                });
            }
            let element = if name == "VkBool32" {
                HighLevelType::Scalar("bool".to_string())
            } else {
                ctx.scalar(name)?
            };
            Ok(HighLevelType::Ref {
                target: Box::new(array_of(element, dims)),
                mutable: !ty.is_const,
                uninit: false,
            })
        }
        (TypeKind::Scalar { .. }, _) => Err(GenError::TypeMismatch {
            command: ctx.command.to_string(),
            param: ctx.param.to_string(),
            reason: "variable length on a non-pointer".to_string(),
        }),
        (TypeKind::Pointer(_), Length::NullTerminated) => {
            if ty.is_optional {
                return Err(GenError::UnsupportedOptionalString {
                    command: ctx.command.to_string(),
                    param: ctx.param.to_string(),
                });
            }
            Ok(HighLevelType::Str)
        }
        (TypeKind::Pointer(pointee), Length::Variable(_)) => {
            let element = if pointee.name() == Some("void") {
                HighLevelType::Scalar("u8".to_string())
            } else {
                project_safe(pointee, ctx)?
            };
            if matches!(element, HighLevelType::Slice { .. }) {
                return Err(ctx.nesting_error());
            }
            let slice = HighLevelType::Slice {
                element: Box::new(element),
                mutable: !pointee.is_const,
                uninit: !pointee.is_const,
            };
            if ty.is_optional {
                ctx.optional(slice)
            } else {
                Ok(slice)
            }
        }
        (TypeKind::Pointer(pointee), Length::Fixed(_)) => Err(GenError::MalformedType {
            command: ctx.command.to_string(),
            param: ctx.param.to_string(),
            reason: format!("fixed dimensions on a pointer to {}", pointee.scalar_name()),
        }),
        (TypeKind::Pointer(pointee), Length::None) => {
            let projected = if ctx.is_opaque(pointee) {
                HighLevelType::Pointer {
                    pointee: Box::new(project_ffi(pointee, ctx)?),
                    mutable: !pointee.is_const,
                }
            } else {
                HighLevelType::Ref {
                    target: Box::new(project_safe(pointee, ctx)?),
                    mutable: !pointee.is_const,
                    uninit: !pointee.is_const,
                }
            };
            if ty.is_optional {
                ctx.optional(projected)
            } else {
                Ok(projected)
            }
        }
    }
}

pub fn project(
    ty: &DecayedType,
    mode: Mode,
    config: &Config,
    command: &str,
    param: &str,
) -> Result<HighLevelType, GenError> {
    let ctx = Context {
        config,
        command,
        param,
    };
    match mode {
        Mode::Ffi => project_ffi(ty, &ctx),
        Mode::Safe => project_safe(ty, &ctx),
    }
}
