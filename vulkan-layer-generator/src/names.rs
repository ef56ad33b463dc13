use crate::config::Config;

/// `pCreateInfo` -> `p_create_info`, `GetPhysicalDeviceSurfaceSupportKHR` ->
/// `get_physical_device_surface_support_khr`.
///
/// a run of capitals stays in one word; a capital starts a new word when the char before it is
/// not a capital or the char after it is lowercase.
pub fn camel_to_snake(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    if chars.len() <= 1 {
        return input.to_ascii_lowercase();
    }

    let mut output = String::with_capacity(input.len() + 4);
    output.push(chars[0].to_ascii_lowercase());
    for window in chars.windows(3) {
        let [prev, cur, next] = [window[0], window[1], window[2]];
        if cur.is_ascii_uppercase() && (next.is_ascii_lowercase() || !prev.is_ascii_uppercase()) {
            output.push('_');
        }
        output.push(cur.to_ascii_lowercase());
    }
    output.push(chars[chars.len() - 1].to_ascii_lowercase());
    output
}

/// `KHR_surface` -> `KHRSurface`. case of chars that do not follow an underscore is preserved.
pub fn snake_to_upper_camel(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    if chars.len() <= 1 {
        return input.to_ascii_uppercase();
    }

    let mut output = String::with_capacity(input.len());
    output.push(chars[0].to_ascii_uppercase());
    for window in chars.windows(3) {
        let [prev, cur, next] = [window[0], window[1], window[2]];
        if cur == '_' && next != '_' {
            continue;
        }
        if prev == '_' {
            output.push(cur.to_ascii_uppercase());
        } else {
            output.push(cur);
        }
    }
    // NOTE: the last char is never uppercased, even after an underscore.
    output.push(chars[chars.len() - 1]);
    output
}

const RUST_KEYWORDS: &[&str] = &["type"];

pub fn escape_keyword(input: &str) -> String {
    if RUST_KEYWORDS.contains(&input) {
        format!("_{input}")
    } else {
        input.to_string()
    }
}

/// `vkCreateImage` -> `create_image`.
pub fn command_fn_name(command_name: &str) -> String {
    camel_to_snake(command_name.strip_prefix("vk").unwrap_or(command_name))
}

/// `vkCreateImage` -> `CreateImage`. vendor suffixes go through the snake case name, so
/// `vkGetPhysicalDeviceSurfaceSupportKHR` becomes `GetPhysicalDeviceSurfaceSupportKhr`.
pub fn command_variant_name(command_name: &str) -> String {
    snake_to_upper_camel(&command_fn_name(command_name))
}

/// maps a registry type name to the rust type name used in the generated code. `None` means the
/// name is not known.
pub fn rust_type_name(config: &Config, name: &str) -> Option<String> {
    if let Some(mapped) = config.opaque_type(name) {
        return Some(mapped.to_string());
    }
    if let Some(mapped) = config.primitive_type(name) {
        return Some(mapped.to_string());
    }
    if config.is_platform_type(name) {
        return Some(format!("vk::{name}"));
    }
    if name.starts_with("PFN_vk") {
        return Some(format!("vk::{name}"));
    }
    let stem = name.strip_prefix("Vk")?;
    for suffix in ["", "KHR", "EXT"] {
        if let Some(base) = stem.strip_suffix(suffix).and_then(|s| s.strip_suffix("FlagBits")) {
            return Some(format!("vk::{base}Flags{suffix}"));
        }
    }
    Some(format!("vk::{stem}"))
}
