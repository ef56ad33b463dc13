use std::{error, fmt};

/// every failure of the inference engine is fatal for the run. each variant carries enough
/// context to find the offending registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    MalformedType {
        command: String,
        param: String,
        reason: String,
    },
    UnsupportedLengthSpec {
        command: String,
        param: String,
        len: String,
    },
    TypeMismatch {
        command: String,
        param: String,
        reason: String,
    },
    UnsupportedOptionalString {
        command: String,
        param: String,
    },
    UnsupportedOptionalArray {
        command: String,
        param: String,
    },
    UnsupportedNesting {
        command: String,
        param: String,
    },
    UnsupportedOptionalLengthPath {
        command: String,
        param: String,
        len: String,
    },
    NoApplicableTransform {
        command: String,
        param: String,
    },
    UnregisteredName(String),
    MissingDispatchInfo(String),
    UnknownType {
        command: String,
        name: String,
    },
    TooManyTypeParams(String),
}

impl error::Error for GenError {}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedType {
                command,
                param,
                reason,
            } => f.write_fmt(format_args!("{command}: malformed type of {param}: {reason}")),
            Self::UnsupportedLengthSpec {
                command,
                param,
                len,
            } => f.write_fmt(format_args!(
                "{command}: unsupported length spec of {param}: {len:?}"
            )),
            Self::TypeMismatch {
                command,
                param,
                reason,
            } => f.write_fmt(format_args!("{command}: type mismatch of {param}: {reason}")),
            Self::UnsupportedOptionalString { command, param } => f.write_fmt(format_args!(
                "{command}: optional null-terminated string {param} is not supported"
            )),
            Self::UnsupportedOptionalArray { command, param } => f.write_fmt(format_args!(
                "{command}: optional fixed size array {param} is not supported"
            )),
            Self::UnsupportedNesting { command, param } => f.write_fmt(format_args!(
                "{command}: nested optional or nested slice in {param} is not supported"
            )),
            Self::UnsupportedOptionalLengthPath {
                command,
                param,
                len,
            } => f.write_fmt(format_args!(
                "{command}: length {len:?} of {param} goes through an optional pointer"
            )),
            Self::NoApplicableTransform { command, param } => f.write_fmt(format_args!(
                "{command}: no transform applies to {param}"
            )),
            Self::UnregisteredName(name) => {
                f.write_fmt(format_args!("{name} was never added to the alias forest"))
            }
            Self::MissingDispatchInfo(command) => {
                f.write_fmt(format_args!("{command} is not required by any feature"))
            }
            Self::UnknownType { command, name } => {
                f.write_fmt(format_args!("{command}: unknown type {name}"))
            }
            Self::TooManyTypeParams(command) => {
                f.write_fmt(format_args!("{command}: too many generic type parameters"))
            }
        }
    }
}

#[test]
fn test_display_names_command_and_param() {
    let err = GenError::UnsupportedOptionalLengthPath {
        command: "vkCmdBuildAccelerationStructuresIndirectKHR".to_string(),
        param: "ppMaxPrimitiveCounts".to_string(),
        len: "pInfos->geometryCount".to_string(),
    };
    let message = err.to_string();
    assert!(message.contains("vkCmdBuildAccelerationStructuresIndirectKHR"));
    assert!(message.contains("ppMaxPrimitiveCounts"));
}
