use serde::{Deserialize, Serialize};

/// Host chart types that bands can recolor.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ChartType {
    /// Line chart; the gradient goes on the stroke
    Line,
    /// Bubble chart; the gradient goes on the fill
    Bubble,
}

impl ChartType {
    /// Look up a host chart type by its configuration name.
    ///
    /// Returns `None` for every type bands cannot recolor.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "line" => Some(Self::Line),
            "bubble" => Some(Self::Bubble),
            _ => None,
        }
    }

    /// Dataset property the band gradient targets for this chart type.
    pub const fn color_property(self) -> ColorProperty {
        match self {
            Self::Line => ColorProperty::BorderColor,
            Self::Bubble => ColorProperty::BackgroundColor,
        }
    }
}

/// A dataset's stroke or fill color slot.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ColorProperty {
    /// Stroke color
    #[default]
    BorderColor,
    /// Fill color
    BackgroundColor,
}

impl ColorProperty {
    /// Property name on a host dataset object.
    pub const fn key(self) -> &'static str {
        match self {
            Self::BorderColor => "borderColor",
            Self::BackgroundColor => "backgroundColor",
        }
    }
}

/// Pixel rectangle inside the axis bounds where data is plotted.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChartArea {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}
