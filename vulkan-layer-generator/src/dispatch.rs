use std::collections::BTreeSet;

use log::debug;

use crate::config::Config;
use crate::error::GenError;
use crate::names::snake_to_upper_camel;
use crate::registry::{Feature, FeatureKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchKind {
    Core { major: u32, minor: u32 },
    Extension { vendor: String, name: String },
}

/// a core version or an extension together with the handled commands it requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchFeature {
    pub kind: DispatchKind,
    pub commands: BTreeSet<String>,
}

impl DispatchFeature {
    pub fn from_feature(feature: &Feature, config: &Config) -> Self {
        let kind = match &feature.kind {
            FeatureKind::Version(version) => DispatchKind::Core {
                major: version.0,
                minor: version.1,
            },
            FeatureKind::Extension { vendor } => DispatchKind::Extension {
                vendor: vendor.clone(),
                name: feature.name.clone(),
            },
        };
        let commands = feature
            .commands
            .iter()
            .filter(|command| config.unhandled_reason(command).is_none())
            .cloned()
            .collect();
        Self { kind, commands }
    }

    pub fn extension_name(&self) -> Option<&str> {
        match &self.kind {
            DispatchKind::Extension { name, .. } => Some(name),
            DispatchKind::Core { .. } => None,
        }
    }

    /// field of the dispatch table the commands of this feature are loaded into.
    ///
    /// core versions live on the ash device or instance: `core.fp_v1_0()`. extensions have a
    /// field of their own: `VK_KHR_surface` -> `khr_surface`.
    pub fn field_name(&self) -> String {
        match &self.kind {
            DispatchKind::Core { major, minor } => format!("core.fp_v{major}_{minor}()"),
            DispatchKind::Extension { name, .. } => strip_vk_prefix(name).to_ascii_lowercase(),
        }
    }

    /// `ash::vk::KhrSurfaceFn`; `None` for core versions.
    pub fn table_type(&self) -> Option<String> {
        self.extension_name()
            .map(|_| format!("ash::vk::{}Fn", snake_to_upper_camel(&self.field_name())))
    }

    /// `VK_KHR_surface` -> `KHRSurface`; `None` for core versions.
    pub fn extension_variant(&self) -> Option<String> {
        self.extension_name()
            .map(|name| snake_to_upper_camel(strip_vk_prefix(name)))
    }

    pub fn feature_expr(&self) -> String {
        match &self.kind {
            DispatchKind::Core { major, minor } => {
                format!("Feature::Core(ApiVersion {{ major: {major}, minor: {minor} }})")
            }
            DispatchKind::Extension { name, .. } => format!(
                "Feature::Extension(Extension::{})",
                snake_to_upper_camel(strip_vk_prefix(name))
            ),
        }
    }

    pub fn is_deprecated(&self, config: &Config) -> bool {
        self.extension_name()
            .is_some_and(|name| config.is_deprecated_extension(name))
    }
}

fn strip_vk_prefix(name: &str) -> &str {
    name.strip_prefix("VK_").unwrap_or(name)
}

/// features in registry order: core versions first, extensions after.
pub fn dispatch_features(features: &[Feature], config: &Config) -> Vec<DispatchFeature> {
    features
        .iter()
        .map(|feature| {
            let dispatch_feature = DispatchFeature::from_feature(feature, config);
            if dispatch_feature.commands.is_empty() {
                debug!("{} requires no handled command", feature.name);
            }
            dispatch_feature
        })
        .collect()
}

/// every feature that requires `command`.
pub fn features_of<'a>(
    features: &'a [DispatchFeature],
    command: &'a str,
) -> impl Iterator<Item = &'a DispatchFeature> + 'a {
    features
        .iter()
        .filter(move |feature| feature.commands.contains(command))
}

/// the feature whose dispatch table serves `command`.
pub fn dispatch_feature_of<'a>(
    features: &'a [DispatchFeature],
    command: &str,
) -> Result<&'a DispatchFeature, GenError> {
    features
        .iter()
        .find(|feature| feature.commands.contains(command))
        .ok_or_else(|| GenError::MissingDispatchInfo(command.to_string()))
}

/// features that still serve at least one of `commands`, each once, in the order they are
/// first needed.
pub fn used_features<'a, 'b>(
    features: &'a [DispatchFeature],
    commands: impl IntoIterator<Item = &'b str>,
) -> Result<Vec<&'a DispatchFeature>, GenError> {
    let mut used: Vec<&DispatchFeature> = Vec::new();
    for command in commands {
        let feature = dispatch_feature_of(features, command)?;
        if !used.contains(&feature) {
            used.push(feature);
        }
    }
    Ok(used)
}
