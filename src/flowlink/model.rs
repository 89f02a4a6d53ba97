use crate::controls::ControlParams;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Identifier of a node in the imported graph (always a run of digits).
pub type NodeId = String;

static NODE_PATH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\.").expect("valid regex"));

/// Extracts the leading node id from a path like `7.inputs.cfg`.
pub fn node_id_from_path(node_path: &str) -> Option<&str> {
    NODE_PATH_RE
        .captures(node_path)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn input_path(node_id: &str, input: &str) -> String {
    format!("{}.inputs.{}", node_id, input)
}

/// The kind of UI control a binding renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ControlType {
    Prompt,
    Dropdown,
    Stepper,
    Input,
    Toggle,
    Seeder,
    DimensionSelector,
    ImageLoader,
    CanvasOutput,
    CanvasLoadedImage,
    CanvasAlphaOutput,
    CanvasSelectedMaskOutput,
    CanvasCroppedMaskOutput,
    CanvasCroppedImageOutput,
    CanvasCroppedAlphaOnImageOutput,
    DataComponent,
}

impl ControlType {
    /// Every control type, in document emission order.
    pub const ALL: [ControlType; 16] = [
        ControlType::Prompt,
        ControlType::Dropdown,
        ControlType::Stepper,
        ControlType::Input,
        ControlType::Toggle,
        ControlType::Seeder,
        ControlType::DimensionSelector,
        ControlType::ImageLoader,
        ControlType::CanvasOutput,
        ControlType::CanvasLoadedImage,
        ControlType::CanvasAlphaOutput,
        ControlType::CanvasSelectedMaskOutput,
        ControlType::CanvasCroppedMaskOutput,
        ControlType::CanvasCroppedImageOutput,
        ControlType::CanvasCroppedAlphaOnImageOutput,
        ControlType::DataComponent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ControlType::Prompt => "prompt",
            ControlType::Dropdown => "dropdown",
            ControlType::Stepper => "stepper",
            ControlType::Input => "input",
            ControlType::Toggle => "toggle",
            ControlType::Seeder => "seeder",
            ControlType::DimensionSelector => "dimensionSelector",
            ControlType::ImageLoader => "imageLoader",
            ControlType::CanvasOutput => "canvasOutput",
            ControlType::CanvasLoadedImage => "canvasLoadedImage",
            ControlType::CanvasAlphaOutput => "canvasAlphaOutput",
            ControlType::CanvasSelectedMaskOutput => "canvasSelectedMaskOutput",
            ControlType::CanvasCroppedMaskOutput => "canvasCroppedMaskOutput",
            ControlType::CanvasCroppedImageOutput => "canvasCroppedImageOutput",
            ControlType::CanvasCroppedAlphaOnImageOutput => "canvasCroppedAlphaOnImageOutput",
            ControlType::DataComponent => "dataComponent",
        }
    }

    /// The document key holding controls of this type, e.g. `steppers`.
    pub fn plural(self) -> String {
        format!("{}s", self.as_str())
    }

    pub fn from_plural(key: &str) -> Option<Self> {
        key.strip_suffix('s').and_then(|single| single.parse().ok())
    }

    /// Dimension selectors drive a node's width/height pair rather than a single input.
    pub fn binds_whole_node(self) -> bool {
        matches!(self, ControlType::DimensionSelector)
    }
}

impl fmt::Display for ControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ControlType::ALL
            .iter()
            .copied()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| format!("Unknown control type: {}", s))
    }
}

/// One control assigned to one graph input.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub id: String,
    pub node_id: NodeId,
    pub node_path: String,
    pub params: ControlParams,
    /// Weak reference to the owning group, kept in sync by the group operations.
    pub group_id: Option<String>,
}

impl Binding {
    pub fn control_type(&self) -> ControlType {
        self.params.control_type()
    }

    pub fn is_grouped(&self) -> bool {
        self.group_id.is_some()
    }

    /// Label if one is set, id otherwise.
    pub fn display_name(&self) -> &str {
        self.params.label().unwrap_or(&self.id)
    }

    /// Name of the bound input: the last segment of the node path.
    pub fn input_name(&self) -> &str {
        self.node_path
            .rsplit('.')
            .next()
            .unwrap_or(&self.node_path)
    }
}

/// A named, ordered collection of bindings presented together (a multi-component).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub label: String,
    pub member_order: Vec<String>,
}

impl Group {
    pub fn new(id: String, label: String) -> Self {
        Self {
            id,
            label,
            member_order: Vec::new(),
        }
    }

    pub fn contains(&self, binding_id: &str) -> bool {
        self.member_order.iter().any(|id| id == binding_id)
    }
}

/// Direction for reordering bindings, groups and group members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    ToTop,
    Up,
    Down,
    ToBottom,
}

impl FromStr for Move {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Move::ToTop),
            "up" => Ok(Move::Up),
            "down" => Ok(Move::Down),
            "bottom" => Ok(Move::ToBottom),
            other => Err(format!(
                "Invalid move: {} (expected top, up, down or bottom)",
                other
            )),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::ToTop => "top",
            Move::Up => "up",
            Move::Down => "down",
            Move::ToBottom => "bottom",
        };
        f.write_str(name)
    }
}

/// Moves `items[index]` in the given direction. Returns false when the item is
/// already at the boundary the move points to, or `index` is out of range.
pub(crate) fn apply_move<T>(items: &mut Vec<T>, index: usize, mv: Move) -> bool {
    if index >= items.len() {
        return false;
    }
    let last = items.len() - 1;
    let target = match mv {
        Move::ToTop | Move::Up if index == 0 => return false,
        Move::Down | Move::ToBottom if index == last => return false,
        Move::ToTop => 0,
        Move::Up => index - 1,
        Move::Down => index + 1,
        Move::ToBottom => last,
    };
    let item = items.remove(index);
    items.insert(target, item);
    true
}
