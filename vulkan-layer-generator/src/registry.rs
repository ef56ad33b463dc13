use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use anyhow::{Context as _, bail};
use log::{debug, warn};
use xml_iterator::{Element, ElementIterator, StartTag, unescape};

use crate::config::Config;

#[derive(Debug, Clone, Copy)]
pub struct Version(pub u32, pub u32);

impl FromStr for Version {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        let major: u32 = parts.next().context("missing major")?.parse()?;
        let minor: u32 = parts.next().context("missing minor")?.parse()?;
        if parts.next().is_some() {
            bail!("unexpected version format: {s}");
        }
        Ok(Version(major, minor))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 == other.1
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.0.cmp(&other.0).then(self.1.cmp(&other.1)))
    }
}

#[test]
fn test_version() {
    let a: Version = "1.0".parse().unwrap();
    let b: Version = "1.3".parse().unwrap();
    assert!(a < b);
    assert_eq!(a, Version(1, 0));
    assert!("1.0.1".parse::<Version>().is_err());
}

// xml spec:
// https://registry.khronos.org/vulkan/specs/latest/registry.html

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    Basetype,
    Bitmask,
    Define,
    Enum,
    Funcpointer,
    Handle,
    Include,
    Struct,
    Union,
    /// no category attribute; platform and c types (`uint32_t`, `HWND`, ...).
    None,
    Other,
}

impl TypeCategory {
    fn from_attr(category: Option<&str>) -> Self {
        match category {
            None => Self::None,
            Some("basetype") => Self::Basetype,
            Some("bitmask") => Self::Bitmask,
            Some("define") => Self::Define,
            Some("enum") => Self::Enum,
            Some("funcpointer") => Self::Funcpointer,
            Some("handle") => Self::Handle,
            Some("include") => Self::Include,
            Some("struct") => Self::Struct,
            Some("union") => Self::Union,
            Some(other) => {
                warn!("unknown type category: {other}");
                Self::Other
            }
        }
    }
}

/// a `<param>` as written in the registry, split around its `<type>` and `<name>` children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParam {
    pub name: String,
    pub type_name: String,
    /// text before `<type>`: empty, `const`, `struct` or `const struct`.
    pub prefix: String,
    /// text between `</type>` and `<name>`: pointer levels like `*`, `**`, `* const*`.
    pub pointer_suffix: String,
    /// text after `</name>`: fixed dimensions like `[4]`.
    pub array_suffix: String,
    pub optional: Option<String>,
    pub len: Option<String>,
    pub altlen: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommand {
    pub name: String,
    pub return_type: String,
    pub params: Vec<RawParam>,
    /// the command this one is an alias of. params are copied from it.
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureKind {
    Version(Version),
    Extension { vendor: String },
}

/// a `<feature>` or a supported `<extension>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: String,
    pub kind: FeatureKind,
    pub commands: Vec<String>,
}

#[derive(Debug, Default)]
pub struct Registry {
    pub types: HashMap<String, TypeCategory>,
    pub commands: HashMap<String, RawCommand>,
    /// in document order; core versions come before extensions.
    pub features: Vec<Feature>,
}

impl Registry {
    /// every command required by a feature, each once, in the order they are first required.
    pub fn required_commands(&self) -> Vec<&str> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut required: Vec<&str> = Vec::new();
        for feature in self.features.iter() {
            for command in feature.commands.iter() {
                if seen.insert(command) {
                    required.push(command);
                }
            }
        }
        required
    }
}

fn skip_element<'a>(name: &str, element_iterator: &mut ElementIterator<'a>) -> anyhow::Result<()> {
    let mut depth = 1;
    while let Some(element) = element_iterator.next() {
        match element {
            Element::StartTag(start) if start.name == name => depth += 1,
            Element::EndTag(end) if end.name == name => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            _ => {}
        }
    }
    bail!("unexpected eof in {name}")
}

fn read_text<'a>(tag_name: &str, element_iterator: &mut ElementIterator<'a>) -> anyhow::Result<String> {
    let mut text = String::new();
    while let Some(element) = element_iterator.next() {
        match element {
            Element::Text(part) => text.push_str(&unescape(part)),
            Element::EndTag(end) if end.name == tag_name => return Ok(text.trim().to_string()),
            other => bail!("unexpected element in {tag_name}: {other:?}"),
        }
    }
    bail!("unexpected eof in {tag_name}")
}

fn is_api_supported(start_tag: &StartTag, config: &Config) -> bool {
    start_tag
        .attr("api")
        .is_none_or(|api| config.supports(&api))
}

fn parse_type<'a>(
    category: Option<&str>,
    name_attr: Option<String>,
    element_iterator: &mut ElementIterator<'a>,
) -> anyhow::Result<(String, TypeCategory)> {
    let mut name = name_attr;
    while let Some(element) = element_iterator.next() {
        match element {
            Element::StartTag(start) => match start.name {
                "name" if name.is_none() => name = Some(read_text("name", element_iterator)?),
                other => skip_element(other, element_iterator)?,
            },
            Element::EndTag(end) if end.name == "type" => {
                let name = name.context("name is missing")?;
                return Ok((name, TypeCategory::from_attr(category)));
            }
            Element::EndTag(end) => bail!("unexpected end: {}", end.name),
            _ => {}
        }
    }
    bail!("unexpected eof in type")
}

fn parse_types_into<'a>(
    element_iterator: &mut ElementIterator<'a>,
    types: &mut HashMap<String, TypeCategory>,
) -> anyhow::Result<()> {
    while let Some(element) = element_iterator.next() {
        match element {
            Element::EmptyTag(empty) if empty.name == "type" => {
                let name = empty.attr("name").context("name is missing")?;
                let category = TypeCategory::from_attr(empty.attr("category").as_deref());
                types.entry(name.into_owned()).or_insert(category);
            }
            Element::StartTag(start) => match start.name {
                "type" => {
                    let category = start.attr("category");
                    let name = start.attr("name").map(|name| name.into_owned());
                    let (name, category) =
                        parse_type(category.as_deref(), name, element_iterator)
                            .context("could not parse type")?;
                    types.entry(name).or_insert(category);
                }
                other => skip_element(other, element_iterator)?,
            },
            Element::EndTag(end) if end.name == "types" => break,
            _ => {}
        }
    }
    Ok(())
}

fn parse_param<'a>(
    start_tag: StartTag<'a>,
    element_iterator: &mut ElementIterator<'a>,
) -> anyhow::Result<RawParam> {
    #[derive(PartialEq)]
    enum Stage {
        Prefix,
        AfterType,
        AfterName,
    }

    let mut param = RawParam {
        optional: start_tag.attr("optional").map(|v| v.into_owned()),
        len: start_tag.attr("len").map(|v| v.into_owned()),
        altlen: start_tag.attr("altlen").map(|v| v.into_owned()),
        ..RawParam::default()
    };
    let mut stage = Stage::Prefix;
    while let Some(element) = element_iterator.next() {
        match element {
            Element::Text(text) => {
                let text = unescape(text);
                match stage {
                    Stage::Prefix => param.prefix.push_str(&text),
                    Stage::AfterType => param.pointer_suffix.push_str(&text),
                    Stage::AfterName => param.array_suffix.push_str(&text),
                }
            }
            Element::StartTag(start) => match start.name {
                "type" if stage == Stage::Prefix => {
                    param.type_name = read_text("type", element_iterator)?;
                    stage = Stage::AfterType;
                }
                "name" if stage == Stage::AfterType => {
                    param.name = read_text("name", element_iterator)?;
                    stage = Stage::AfterName;
                }
                // symbolic dimensions, e.g. `[<enum>VK_UUID_SIZE</enum>]`
                "enum" if stage == Stage::AfterName => {
                    let text = read_text("enum", element_iterator)?;
                    param.array_suffix.push_str(&text);
                }
                other => bail!("unexpected start: {other}"),
            },
            Element::EndTag(end) if end.name == "param" => break,
            other => bail!("unexpected element: {other:?}"),
        }
    }
    if stage != Stage::AfterName {
        bail!("param is missing type or name");
    }
    param.prefix = param.prefix.trim().to_string();
    param.pointer_suffix = param.pointer_suffix.trim().to_string();
    param.array_suffix = param.array_suffix.trim().to_string();
    Ok(param)
}

fn parse_proto<'a>(element_iterator: &mut ElementIterator<'a>) -> anyhow::Result<(String, String)> {
    let mut return_type: Option<String> = None;
    let mut name: Option<String> = None;
    while let Some(element) = element_iterator.next() {
        match element {
            Element::StartTag(start) => match start.name {
                "type" => return_type = Some(read_text("type", element_iterator)?),
                "name" => name = Some(read_text("name", element_iterator)?),
                other => bail!("unexpected start: {other}"),
            },
            Element::EndTag(end) if end.name == "proto" => break,
            Element::Text(_) => {}
            other => bail!("unexpected element: {other:?}"),
        }
    }
    Ok((
        return_type.context("proto type is missing")?,
        name.context("proto name is missing")?,
    ))
}

/// returns `None` for commands that belong to another api.
fn parse_command<'a>(
    start_tag: StartTag<'a>,
    element_iterator: &mut ElementIterator<'a>,
    config: &Config,
) -> anyhow::Result<Option<RawCommand>> {
    let supported = is_api_supported(&start_tag, config);
    let mut proto: Option<(String, String)> = None;
    let mut params: Vec<RawParam> = Vec::new();
    while let Some(element) = element_iterator.next() {
        match element {
            Element::StartTag(start) => match start.name {
                "proto" => {
                    proto = Some(parse_proto(element_iterator).context("could not parse proto")?);
                }
                "param" => {
                    let param_supported = is_api_supported(&start, config);
                    let param =
                        parse_param(start, element_iterator).context("could not parse param")?;
                    if param_supported {
                        params.push(param);
                    }
                }
                other => skip_element(other, element_iterator)?,
            },
            Element::EndTag(end) => match end.name {
                "command" => break,
                other => bail!("unexpected end: {other}"),
            },
            _ => {}
        }
    }
    let (return_type, name) = proto.context("proto is missing")?;
    if !supported {
        debug!("skipping {name}, not a {} command", config.api);
        return Ok(None);
    }
    Ok(Some(RawCommand {
        name,
        return_type,
        params,
        alias: None,
    }))
}

fn parse_commands_into<'a>(
    element_iterator: &mut ElementIterator<'a>,
    config: &Config,
    commands: &mut HashMap<String, RawCommand>,
    aliases: &mut Vec<(String, String)>,
) -> anyhow::Result<()> {
    while let Some(element) = element_iterator.next() {
        match element {
            Element::StartTag(start) if start.name == "command" => {
                let command = parse_command(start, element_iterator, config)
                    .context("could not parse command")?;
                if let Some(command) = command {
                    commands.insert(command.name.clone(), command);
                }
            }
            Element::EmptyTag(empty) if empty.name == "command" => {
                let name = empty.attr("name").context("name is missing")?;
                let alias = empty.attr("alias").context("alias is missing")?;
                aliases.push((name.into_owned(), alias.into_owned()));
            }
            Element::StartTag(start) => skip_element(start.name, element_iterator)?,
            Element::EndTag(end) if end.name == "commands" => break,
            _ => {}
        }
    }
    Ok(())
}

fn parse_require<'a>(
    start_tag: StartTag<'a>,
    element_iterator: &mut ElementIterator<'a>,
    config: &Config,
    commands: &mut Vec<String>,
) -> anyhow::Result<()> {
    let supported = is_api_supported(&start_tag, config);
    while let Some(element) = element_iterator.next() {
        match element {
            Element::EmptyTag(empty) if supported && empty.name == "command" => {
                let name = empty.attr("name").context("name is missing")?;
                commands.push(name.into_owned());
            }
            Element::StartTag(start) => skip_element(start.name, element_iterator)?,
            Element::EndTag(end) if end.name == "require" => break,
            _ => {}
        }
    }
    Ok(())
}

/// collects the commands of every `<require>` inside of `tag_name`; `<remove>` and `<deprecate>`
/// blocks are not interesting here.
fn parse_feature_body<'a>(
    tag_name: &str,
    element_iterator: &mut ElementIterator<'a>,
    config: &Config,
) -> anyhow::Result<Vec<String>> {
    let mut commands: Vec<String> = Vec::new();
    while let Some(element) = element_iterator.next() {
        match element {
            Element::StartTag(start) => match start.name {
                "require" => parse_require(start, element_iterator, config, &mut commands)
                    .context("could not parse require")?,
                other => skip_element(other, element_iterator)?,
            },
            Element::EndTag(end) if end.name == tag_name => break,
            _ => {}
        }
    }
    Ok(commands)
}

fn parse_feature<'a>(
    start_tag: StartTag<'a>,
    element_iterator: &mut ElementIterator<'a>,
    config: &Config,
) -> anyhow::Result<Option<Feature>> {
    let supported = is_api_supported(&start_tag, config);
    let name = start_tag.attr("name").context("name is missing")?.into_owned();
    let number: Version = start_tag
        .attr("number")
        .context("number is missing")?
        .parse()
        .with_context(|| format!("invalid number of {name}"))?;
    let commands = parse_feature_body("feature", element_iterator, config)?;
    if !supported {
        debug!("skipping feature {name}");
        return Ok(None);
    }
    Ok(Some(Feature {
        name,
        kind: FeatureKind::Version(number),
        commands,
    }))
}

fn parse_extension<'a>(
    start_tag: StartTag<'a>,
    element_iterator: &mut ElementIterator<'a>,
    config: &Config,
) -> anyhow::Result<Option<Feature>> {
    let name = start_tag.attr("name").context("name is missing")?.into_owned();
    let supported = start_tag.attr("supported").context("supported is missing")?;
    let commands = parse_feature_body("extension", element_iterator, config)
        .with_context(|| format!("could not parse {name}"))?;
    if !config.is_extension_supported(&name, &supported) {
        debug!("skipping extension {name}, supported: {supported}");
        return Ok(None);
    }
    let vendor = name
        .split('_')
        .nth(1)
        .with_context(|| format!("could not get vendor of {name}"))?
        .to_string();
    Ok(Some(Feature {
        name,
        kind: FeatureKind::Extension { vendor },
        commands,
    }))
}

fn parse_extensions_into<'a>(
    element_iterator: &mut ElementIterator<'a>,
    config: &Config,
    features: &mut Vec<Feature>,
) -> anyhow::Result<()> {
    while let Some(element) = element_iterator.next() {
        match element {
            Element::StartTag(start) => match start.name {
                "extension" => {
                    let extension = parse_extension(start, element_iterator, config)
                        .context("could not parse extension")?;
                    features.extend(extension);
                }
                other => skip_element(other, element_iterator)?,
            },
            Element::EndTag(end) if end.name == "extensions" => break,
            _ => {}
        }
    }
    Ok(())
}

/// alias commands are stored as copies of their target under their own name, like the registry
/// tooling of khronos does.
fn resolve_command_aliases(
    commands: &mut HashMap<String, RawCommand>,
    aliases: Vec<(String, String)>,
) {
    for (name, alias) in aliases {
        let Some(target_command) = commands.get(&alias) else {
            warn!("{name} is an alias of unknown command {alias}");
            continue;
        };
        let command = RawCommand {
            name: name.clone(),
            return_type: target_command.return_type.clone(),
            params: target_command.params.clone(),
            alias: Some(alias),
        };
        commands.insert(name, command);
    }
}

pub fn parse_registry(input: &str, config: &Config) -> anyhow::Result<Registry> {
    let mut registry = Registry::default();
    let mut aliases: Vec<(String, String)> = Vec::new();

    let mut element_iterator = ElementIterator::new(input);
    while let Some(element) = element_iterator.next() {
        let Element::StartTag(start) = element else {
            continue;
        };
        match start.name {
            "registry" => {}
            "types" => {
                parse_types_into(&mut element_iterator, &mut registry.types)
                    .context("could not parse types")?;
            }
            "commands" => {
                parse_commands_into(
                    &mut element_iterator,
                    config,
                    &mut registry.commands,
                    &mut aliases,
                )
                .context("could not parse commands")?;
            }
            "feature" => {
                let feature = parse_feature(start, &mut element_iterator, config)
                    .context("could not parse feature")?;
                registry.features.extend(feature);
            }
            "extensions" => {
                parse_extensions_into(&mut element_iterator, config, &mut registry.features)
                    .context("could not parse extensions")?;
            }
            other => skip_element(other, &mut element_iterator)?,
        }
    }
    resolve_command_aliases(&mut registry.commands, aliases);

    debug!(
        "parsed {} types, {} commands, {} features",
        registry.types.len(),
        registry.commands.len(),
        registry.features.len()
    );
    Ok(registry)
}
