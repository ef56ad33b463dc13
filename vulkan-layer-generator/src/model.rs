use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::aliases::{CommandAliases, FrozenAliases};
use crate::config::Config;
use crate::decayed::{Command, DispatchChain};
use crate::dispatch::{DispatchFeature, dispatch_features};
use crate::error::GenError;
use crate::registry::Registry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCommand {
    pub command: Command,
    pub chain: DispatchChain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnhandledCommand {
    pub name: String,
    pub reason: String,
}

/// everything the renderers need, built in one pass over the registry and never mutated after.
#[derive(Debug)]
pub struct Model {
    /// handled commands, sorted by name.
    pub commands: BTreeMap<String, ModelCommand>,
    /// in registry order.
    pub unhandled: Vec<UnhandledCommand>,
    pub aliases: FrozenAliases,
    pub features: Vec<DispatchFeature>,
}

impl Model {
    pub fn build(registry: &Registry, config: &Config) -> Result<Model, GenError> {
        let mut commands: BTreeMap<String, ModelCommand> = BTreeMap::new();
        let mut unhandled: Vec<UnhandledCommand> = Vec::new();
        let mut aliases = CommandAliases::new();

        for name in registry.required_commands() {
            let Some(raw) = registry.commands.get(name) else {
                warn!("{name} is required but never defined");
                continue;
            };
            if let Some(reason) = config.unhandled_reason(name) {
                debug!("skipping {name}: {reason}");
                unhandled.push(UnhandledCommand {
                    name: name.to_string(),
                    reason: reason.to_string(),
                });
                continue;
            }

            let command = Command::from_raw(raw, &registry.types)?;
            aliases.add_alias(name, raw.alias.as_deref());
            let Some(chain) = command.dispatch_chain(config) else {
                debug!("skipping {name}: unknown dispatch chain");
                unhandled.push(UnhandledCommand {
                    name: name.to_string(),
                    reason: "Unknown dispatch chain type".to_string(),
                });
                continue;
            };
            commands.insert(name.to_string(), ModelCommand { command, chain });
        }

        let model = Model {
            commands,
            unhandled,
            aliases: aliases.freeze(),
            features: dispatch_features(&registry.features, config),
        };
        for name in model.commands.keys() {
            model.representative(name)?;
        }
        info!(
            "{} handled commands, {} unhandled, {} features",
            model.commands.len(),
            model.unhandled.len(),
            model.features.len()
        );
        Ok(model)
    }

    /// the handled command that stands in for `name` and all of its aliases.
    pub fn representative(&self, name: &str) -> Result<&ModelCommand, GenError> {
        let representative = self
            .aliases
            .representative(name)
            .ok_or_else(|| GenError::UnregisteredName(name.to_string()))?;
        self.commands
            .get(representative)
            .ok_or_else(|| GenError::UnregisteredName(representative.to_string()))
    }

    pub fn is_aliased(&self, name: &str) -> Result<bool, GenError> {
        self.aliases
            .is_aliased(name)
            .ok_or_else(|| GenError::UnregisteredName(name.to_string()))
    }

    /// handled commands that represent their alias group, sorted by name.
    pub fn representatives(&self) -> Result<Vec<&ModelCommand>, GenError> {
        let mut representatives: Vec<&ModelCommand> = Vec::new();
        for (name, command) in self.commands.iter() {
            if !self.is_aliased(name)? {
                representatives.push(command);
            }
        }
        Ok(representatives)
    }

    /// every handled name (aliases included) dispatched through `chain`, sorted by name.
    pub fn commands_of(&self, chain: DispatchChain) -> impl Iterator<Item = (&str, &ModelCommand)> {
        self.commands
            .iter()
            .filter(move |(_, command)| command.chain == chain)
            .map(|(name, command)| (name.as_str(), command))
    }
}
