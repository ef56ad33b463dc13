use std::collections::{HashMap, HashSet};

/// commands the generator refuses to handle, grouped by reason.
const UNHANDLED_COMMANDS: &[(&str, &[&str])] = &[
    (
        "The ash Rust binding doesn't have proper bindings yet.",
        &[
            "vkMapMemory2KHR",
            "vkUnmapMemory2KHR",
            "vkCreateShadersEXT",
            "vkDestroyShaderEXT",
            "vkGetShaderBinaryDataEXT",
            "vkCmdBindShadersEXT",
            "vkCmdDrawClusterHUAWEI",
            "vkCmdDrawClusterIndirectHUAWEI",
            "vkCmdSetAttachmentFeedbackLoopEnableEXT",
            "vkCmdSetDiscardRectangleEnableEXT",
            "vkCmdSetExclusiveScissorEnableNV",
            "vkCmdSetDiscardRectangleModeEXT",
        ],
    ),
    (
        "Dynamic multi-dimensional array bindings are not supported yet.",
        &[
            "vkCmdBuildAccelerationStructuresKHR",
            "vkBuildAccelerationStructuresKHR",
            "vkCmdBuildAccelerationStructuresIndirectKHR",
        ],
    ),
    (
        "The length info and the data pointer are nested in structs.",
        &["vkGetDeviceFaultInfoEXT"],
    ),
];

/// commands whose intercept function is written by hand in the layer framework.
const MANUALLY_IMPLEMENTED_COMMANDS: &[&str] = &[
    "vkDestroyInstance",
    "vkEnumeratePhysicalDevices",
    "vkEnumeratePhysicalDeviceGroups",
    "vkGetInstanceProcAddr",
    "vkGetDeviceProcAddr",
    "vkCreateDevice",
    "vkDestroyDevice",
    "vkEnumerateDeviceExtensionProperties",
    "vkEnumerateDeviceLayerProperties",
];

/// commands that the framework must intercept no matter what the layer asks for.
const ALWAYS_HOOKED_COMMANDS: &[&str] = &[
    "vkEnumerateInstanceLayerProperties",
    "vkEnumerateInstanceExtensionProperties",
    "vkEnumerateDeviceLayerProperties",
    "vkEnumerateDeviceExtensionProperties",
    "vkGetInstanceProcAddr",
    "vkGetDeviceProcAddr",
    "vkCreateInstance",
    "vkDestroyInstance",
    "vkCreateDevice",
    "vkDestroyDevice",
    "vkEnumeratePhysicalDeviceGroups",
    "vkEnumeratePhysicalDeviceGroupsKHR",
    "vkEnumeratePhysicalDevices",
];

/// commands that get no hook method.
const HOOKLESS_COMMANDS: &[&str] = &[
    // intercepted through drop of the instance and device info
    "vkDestroyInstance",
    "vkDestroyDevice",
    // intercepted when the physical device info is created
    "vkEnumeratePhysicalDevices",
    "vkEnumeratePhysicalDeviceGroups",
    // provided through constants of the layer
    "vkEnumerateDeviceLayerProperties",
    "vkEnumerateDeviceExtensionProperties",
    // TODO: pre-instance functions need a hook of their own.
    "vkEnumerateInstanceExtensionProperties",
    "vkEnumerateInstanceLayerProperties",
    "vkEnumerateInstanceVersion",
];

const GLOBAL_COMMANDS: &[&str] = &[
    "vkCreateInstance",
    "vkEnumerateInstanceExtensionProperties",
    "vkEnumerateInstanceLayerProperties",
    "vkEnumerateInstanceVersion",
];

/// the last parameter of these commands is never promoted to a return value. the layer is
/// expected to pass the out pointer through to the next layer.
const KEEP_OUT_PARAM_COMMANDS: &[&str] = &["vkCreateDevice"];

/// command that receives the device link of the layer chain as an extra hook parameter.
pub const LAYER_DEVICE_LINK_COMMAND: &str = "vkCreateDevice";

const DEPRECATED_EXTENSIONS: &[&str] = &["VK_EXT_debug_report"];

/// extensions that are emitted even though the registry does not list vulkan as supported.
const SUPPORTED_OVERRIDES: &[&str] = &["VK_ANDROID_native_buffer"];

/// (command, length text as written in the registry, rust expression)
const LENGTH_FORMULAS: &[(&str, &str, &str)] = &[(
    "vkCmdSetSampleMaskEXT",
    "(samples + 31) / 32",
    "(samples.as_raw() + 31) / 32",
)];

/// types that are only ever handled through pointers.
const OPAQUE_TYPES: &[(&str, &str)] = &[
    ("void", "c_void"),
    // xcb/xcb.h
    ("xcb_connection_t", "vk::xcb_connection_t"),
    // wayland-client.h
    ("wl_display", "vk::wl_display"),
    ("wl_surface", "vk::wl_surface"),
    // screen/screen.h
    ("_screen_context", "vk::_screen_context"),
    ("_screen_window", "vk::_screen_window"),
    // windows.h
    ("SECURITY_ATTRIBUTES", "vk::SECURITY_ATTRIBUTES"),
    ("ANativeWindow", "vk::ANativeWindow"),
    ("AHardwareBuffer", "vk::AHardwareBuffer"),
    ("CAMetalLayer", "vk::CAMetalLayer"),
];

const PRIMITIVE_TYPES: &[(&str, &str)] = &[
    ("uint64_t", "u64"),
    ("uint32_t", "u32"),
    ("uint16_t", "u16"),
    ("int32_t", "i32"),
    ("char", "c_char"),
    ("size_t", "usize"),
    ("float", "f32"),
    ("int", "c_int"),
];

/// platform types that are re-exported by ash under the same name.
const PLATFORM_TYPES: &[&str] = &[
    // X11/Xlib.h
    "Display",
    "VisualID",
    "Window",
    // X11/extensions/Xrandr.h
    "RROutput",
    // windows.h
    "HINSTANCE",
    "HWND",
    "HMONITOR",
    "HANDLE",
    "DWORD",
    "LPCWSTR",
    // xcb/xcb.h
    "xcb_visualid_t",
    "xcb_window_t",
    // directfb.h
    "IDirectFB",
    "IDirectFBSurface",
    // zircon/types.h
    "zx_handle_t",
    // ggp_c/vulkan_types.h
    "GgpStreamDescriptor",
    "GgpFrameToken",
];

/// immutable knobs of the generator. built once and handed to every stage.
#[derive(Debug)]
pub struct Config {
    pub api: &'static str,
    unhandled: HashMap<&'static str, &'static str>,
    manually_implemented: HashSet<&'static str>,
    always_hooked: HashSet<&'static str>,
    hookless: HashSet<&'static str>,
    global: HashSet<&'static str>,
    keep_out_param: HashSet<&'static str>,
    deprecated_extensions: HashSet<&'static str>,
    supported_overrides: HashSet<&'static str>,
    opaque_types: HashMap<&'static str, &'static str>,
    primitive_types: HashMap<&'static str, &'static str>,
    platform_types: HashSet<&'static str>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: "vulkan",
            unhandled: UNHANDLED_COMMANDS
                .iter()
                .flat_map(|(reason, names)| names.iter().map(move |name| (*name, *reason)))
                .collect(),
            manually_implemented: MANUALLY_IMPLEMENTED_COMMANDS.iter().copied().collect(),
            always_hooked: ALWAYS_HOOKED_COMMANDS.iter().copied().collect(),
            hookless: HOOKLESS_COMMANDS.iter().copied().collect(),
            global: GLOBAL_COMMANDS.iter().copied().collect(),
            keep_out_param: KEEP_OUT_PARAM_COMMANDS.iter().copied().collect(),
            deprecated_extensions: DEPRECATED_EXTENSIONS.iter().copied().collect(),
            supported_overrides: SUPPORTED_OVERRIDES.iter().copied().collect(),
            opaque_types: OPAQUE_TYPES.iter().copied().collect(),
            primitive_types: PRIMITIVE_TYPES.iter().copied().collect(),
            platform_types: PLATFORM_TYPES.iter().copied().collect(),
        }
    }
}

impl Config {
    pub fn unhandled_reason(&self, command: &str) -> Option<&'static str> {
        self.unhandled.get(command).copied()
    }

    pub fn is_manually_implemented(&self, command: &str) -> bool {
        self.manually_implemented.contains(command)
    }

    pub fn is_always_hooked(&self, command: &str) -> bool {
        self.always_hooked.contains(command)
    }

    pub fn is_hookless(&self, command: &str) -> bool {
        self.hookless.contains(command)
    }

    pub fn is_global(&self, command: &str) -> bool {
        self.global.contains(command)
    }

    pub fn keeps_out_param(&self, command: &str) -> bool {
        self.keep_out_param.contains(command)
    }

    pub fn is_deprecated_extension(&self, extension: &str) -> bool {
        self.deprecated_extensions.contains(extension)
    }

    /// whether a registry `supported` / `api` list (`"vulkan,vulkansc"`) includes the configured
    /// api.
    pub fn supports(&self, api_list: &str) -> bool {
        api_list.split(',').any(|api| api.trim() == self.api)
    }

    pub fn is_extension_supported(&self, extension: &str, supported: &str) -> bool {
        self.supported_overrides.contains(extension) || self.supports(supported)
    }

    pub fn length_formula(&self, command: &str, len: &str) -> Option<&'static str> {
        LENGTH_FORMULAS
            .iter()
            .find(|(c, l, _)| *c == command && *l == len)
            .map(|(_, _, expr)| *expr)
    }

    pub fn opaque_type(&self, name: &str) -> Option<&'static str> {
        self.opaque_types.get(name).copied()
    }

    pub fn is_opaque_type(&self, name: &str) -> bool {
        self.opaque_types.contains_key(name)
    }

    pub fn primitive_type(&self, name: &str) -> Option<&'static str> {
        self.primitive_types.get(name).copied()
    }

    pub fn is_platform_type(&self, name: &str) -> bool {
        self.platform_types.contains(name)
    }
}
