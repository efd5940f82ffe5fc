use std::time::Duration;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::animation::{Easing, TransitionSpec};
use crate::error::{ChartError, ChartResult};

/// JSON persistence shared by every component config.
pub trait JsonConfig: Serialize + DeserializeOwned {
    /// Deserializes config from JSON; absent fields take their defaults.
    ///
    /// A string `transition` is a positioning transform and is read as `transform`.
    fn from_json_str(input: &str) -> ChartResult<Self> {
        let mut value: Value = serde_json::from_str(input).map_err(parse_error)?;
        lift_transform(&mut value);
        serde_json::from_value(value).map_err(parse_error)
    }

    /// Serializes config to pretty JSON for debug/config files.
    fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidInput(format!("failed to serialize config: {e}")))
    }
}

fn parse_error(error: serde_json::Error) -> ChartError {
    ChartError::InvalidInput(format!("failed to parse config: {error}"))
}

fn lift_transform(value: &mut Value) {
    let Some(object) = value.as_object_mut() else {
        return;
    };
    if !object.get("transition").is_some_and(Value::is_string) {
        return;
    }
    if let Some(transform) = object.remove("transition") {
        object.entry("transform").or_insert(transform);
    }
}

/// Duration and easing applied to a component's visual transitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionConfig {
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    #[serde(default)]
    pub easing: Easing,
}

impl TransitionConfig {
    #[must_use]
    pub fn spec(self) -> TransitionSpec {
        TransitionSpec::new(Duration::from_millis(self.duration_ms), self.easing)
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            easing: Easing::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPlacement {
    #[default]
    Bottom,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridOrientation {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    #[serde(rename = "type", default)]
    pub placement: AxisPlacement,
    #[serde(default)]
    pub ticks: usize,
    #[serde(default)]
    pub disable_animation: bool,
    /// Positioning transform applied to the axis group. JSON may also give it as
    /// a string `transition`.
    #[serde(default)]
    pub transform: Option<String>,
    /// Keeps tick 0 as an unlabeled anchor excluded from emphasis.
    #[serde(default)]
    pub reserve_first_tick: bool,
    #[serde(default = "default_font_size")]
    pub font_size: String,
    /// Forwarded verbatim onto the root group (`id`, `class`, `data-*`, ...).
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    #[serde(default)]
    pub transition: TransitionConfig,
}

impl AxisConfig {
    #[must_use]
    pub fn new(placement: AxisPlacement) -> Self {
        Self {
            placement,
            ticks: 0,
            disable_animation: false,
            transform: None,
            reserve_first_tick: false,
            font_size: default_font_size(),
            attributes: IndexMap::new(),
            transition: TransitionConfig::default(),
        }
    }

    #[must_use]
    pub fn with_ticks(mut self, ticks: usize) -> Self {
        self.ticks = ticks;
        self
    }

    #[must_use]
    pub fn with_disable_animation(mut self, disable_animation: bool) -> Self {
        self.disable_animation = disable_animation;
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: impl Into<String>) -> Self {
        self.transform = Some(transform.into());
        self
    }

    #[must_use]
    pub fn with_reserve_first_tick(mut self, reserve_first_tick: bool) -> Self {
        self.reserve_first_tick = reserve_first_tick;
        self
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self::new(AxisPlacement::default())
    }
}

impl JsonConfig for AxisConfig {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLineConfig {
    #[serde(rename = "type", default)]
    pub orientation: GridOrientation,
    #[serde(default)]
    pub ticks: usize,
    /// Line length: chart height for vertical lines, width for horizontal.
    #[serde(default)]
    pub size: f64,
    #[serde(default)]
    pub disable_animation: bool,
    #[serde(default)]
    pub transform: Option<String>,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    #[serde(default)]
    pub transition: TransitionConfig,
}

impl GridLineConfig {
    #[must_use]
    pub fn new(orientation: GridOrientation) -> Self {
        Self {
            orientation,
            ticks: 0,
            size: 0.0,
            disable_animation: false,
            transform: None,
            attributes: IndexMap::new(),
            transition: TransitionConfig::default(),
        }
    }

    #[must_use]
    pub fn with_ticks(mut self, ticks: usize) -> Self {
        self.ticks = ticks;
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_disable_animation(mut self, disable_animation: bool) -> Self {
        self.disable_animation = disable_animation;
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: impl Into<String>) -> Self {
        self.transform = Some(transform.into());
        self
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl Default for GridLineConfig {
    fn default() -> Self {
        Self::new(GridOrientation::default())
    }
}

impl JsonConfig for GridLineConfig {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipConfig {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub disable_animation: bool,
    #[serde(default = "default_point_radius")]
    pub point_radius: f64,
    #[serde(default = "default_content_width")]
    pub content_width: f64,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    #[serde(default)]
    pub transition: TransitionConfig,
}

impl TooltipConfig {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            disable_animation: false,
            point_radius: default_point_radius(),
            content_width: default_content_width(),
            attributes: IndexMap::new(),
            transition: TransitionConfig::default(),
        }
    }

    #[must_use]
    pub fn with_disable_animation(mut self, disable_animation: bool) -> Self {
        self.disable_animation = disable_animation;
        self
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl JsonConfig for TooltipConfig {}

/// Entrance effect of a line path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineAnimation {
    /// Draws the stroke from left to right through the dash offset.
    #[default]
    Left,
    FadeIn,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineConfig {
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub animation: LineAnimation,
    #[serde(default)]
    pub smooth: bool,
    #[serde(default)]
    pub disable_animation: bool,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    #[serde(default)]
    pub transition: TransitionConfig,
}

impl LineConfig {
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: LineAnimation) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub fn with_smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    #[must_use]
    pub fn with_disable_animation(mut self, disable_animation: bool) -> Self {
        self.disable_animation = disable_animation;
        self
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            animation: LineAnimation::default(),
            smooth: false,
            disable_animation: false,
            attributes: IndexMap::new(),
            transition: TransitionConfig::default(),
        }
    }
}

impl JsonConfig for LineConfig {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaConfig {
    #[serde(default = "default_color")]
    pub color: String,
    /// Emits the `linearGradient` the fill references.
    #[serde(default)]
    pub gradient: bool,
    #[serde(default)]
    pub smooth: bool,
    #[serde(default)]
    pub disable_animation: bool,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    #[serde(default)]
    pub transition: TransitionConfig,
}

impl AreaConfig {
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    #[must_use]
    pub fn with_gradient(mut self, gradient: bool) -> Self {
        self.gradient = gradient;
        self
    }

    #[must_use]
    pub fn with_smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    #[must_use]
    pub fn with_disable_animation(mut self, disable_animation: bool) -> Self {
        self.disable_animation = disable_animation;
        self
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            gradient: false,
            smooth: false,
            disable_animation: false,
            attributes: IndexMap::new(),
            transition: TransitionConfig::default(),
        }
    }
}

impl JsonConfig for AreaConfig {}

fn default_duration_ms() -> u64 {
    250
}

fn default_font_size() -> String {
    "0.75rem".to_owned()
}

fn default_color() -> String {
    "white".to_owned()
}

fn default_point_radius() -> f64 {
    4.0
}

fn default_content_width() -> f64 {
    120.0
}
