use desklet_host::{Axis, DockExtent, EdgeInsets, GeometryProvider, ThemeMetric};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::placement::Placement;

pub use desklet_host::DEFAULT_TITLE_BAR_HEIGHT;

/// Edge length of a launcher icon when the config does not override it.
pub const DEFAULT_ITEM_SIZE: i32 = 56;
/// Gap between icons and around the grid.
pub const ITEM_MARGIN: i32 = 8;
/// Largest icon edge length a `size` override may request.
pub const MAX_ITEM_SIZE: i32 = 512;
/// Space withheld from the layout axis when the dock window list is mounted.
pub const WINDOW_LIST_RESERVE: i32 = 200;
/// Space withheld from the layout axis otherwise.
pub const DEFAULT_RESERVE: i32 = 80;
/// Delay before an opening mobile desklet is marked fully open.
pub const OPEN_SETTLE_DELAY_MS: u32 = 5;
/// Delay matching the mobile close animation.
pub const CLOSE_SETTLE_DELAY_MS: u32 = 250;
/// Default desklet width/height in config.
pub const DEFAULT_DESKLET_EXTENT: i32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DeskletId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Axis items advance along inside one block.
    pub fn primary_axis(self) -> Axis {
        match self {
            Self::Horizontal => Axis::Horizontal,
            Self::Vertical => Axis::Vertical,
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Self::Horizontal => "Horizontal",
            Self::Vertical => "Vertical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl EdgeSide {
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Top => "Top",
            Self::Bottom => "Bottom",
        }
    }
}

/// Position of the desklet along its edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrossAlignment {
    Start,
    Center,
    End,
}

/// Symbolic anchor: the edge the desklet docks to, then its alignment along that edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeAlignment {
    LeftTop,
    LeftCenter,
    LeftBottom,
    RightTop,
    #[default]
    RightCenter,
    RightBottom,
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl EdgeAlignment {
    pub const ALL: [Self; 12] = [
        Self::LeftTop,
        Self::LeftCenter,
        Self::LeftBottom,
        Self::RightTop,
        Self::RightCenter,
        Self::RightBottom,
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    pub fn side(self) -> EdgeSide {
        match self {
            Self::LeftTop | Self::LeftCenter | Self::LeftBottom => EdgeSide::Left,
            Self::RightTop | Self::RightCenter | Self::RightBottom => EdgeSide::Right,
            Self::TopLeft | Self::TopCenter | Self::TopRight => EdgeSide::Top,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => EdgeSide::Bottom,
        }
    }

    pub fn alignment(self) -> CrossAlignment {
        match self {
            Self::LeftTop | Self::RightTop | Self::TopLeft | Self::BottomLeft => {
                CrossAlignment::Start
            }
            Self::LeftCenter | Self::RightCenter | Self::TopCenter | Self::BottomCenter => {
                CrossAlignment::Center
            }
            Self::LeftBottom | Self::RightBottom | Self::TopRight | Self::BottomRight => {
                CrossAlignment::End
            }
        }
    }

    /// Left/right edges stack vertically, top/bottom edges run horizontally.
    pub fn orientation(self) -> Orientation {
        match self.side() {
            EdgeSide::Left | EdgeSide::Right => Orientation::Vertical,
            EdgeSide::Top | EdgeSide::Bottom => Orientation::Horizontal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LeftTop => "left_top",
            Self::LeftCenter => "left_center",
            Self::LeftBottom => "left_bottom",
            Self::RightTop => "right_top",
            Self::RightCenter => "right_center",
            Self::RightBottom => "right_bottom",
            Self::TopLeft => "top_left",
            Self::TopCenter => "top_center",
            Self::TopRight => "top_right",
            Self::BottomLeft => "bottom_left",
            Self::BottomCenter => "bottom_center",
            Self::BottomRight => "bottom_right",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|anchor| anchor.as_str() == token)
    }
}

/// `"fixed"` pins the desklet at explicit coordinates; any other token anchors it to an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PositionMode {
    #[default]
    Anchored,
    Fixed,
}

impl From<String> for PositionMode {
    fn from(value: String) -> Self {
        if value == "fixed" {
            Self::Fixed
        } else {
            Self::Anchored
        }
    }
}

impl From<PositionMode> for String {
    fn from(value: PositionMode) -> Self {
        match value {
            PositionMode::Anchored => "anchored".to_string(),
            PositionMode::Fixed => "fixed".to_string(),
        }
    }
}

/// Per-desklet options. Replaced wholesale on reconfiguration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskletConfig {
    pub width: i32,
    pub height: i32,
    pub position: PositionMode,
    #[serde(rename = "layout")]
    pub anchor: EdgeAlignment,
    #[serde(rename = "dockx")]
    pub fixed_x: i32,
    #[serde(rename = "docky")]
    pub fixed_y: i32,
    #[serde(rename = "size")]
    pub item_size: Option<i32>,
}

impl Default for DeskletConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_DESKLET_EXTENT,
            height: DEFAULT_DESKLET_EXTENT,
            position: PositionMode::Anchored,
            anchor: EdgeAlignment::default(),
            fixed_x: 0,
            fixed_y: 0,
            item_size: None,
        }
    }
}

/// Errors reading desklet options.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid desklet options: {0}")]
    Parse(String),
}

impl DeskletConfig {
    /// Parses the desklet's JSON `options` object. Absent keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when `raw` is not a valid options object.
    pub fn from_options_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    pub fn anchored(anchor: EdgeAlignment) -> Self {
        Self {
            anchor,
            ..Self::default()
        }
    }

    pub fn fixed(x: i32, y: i32) -> Self {
        Self {
            position: PositionMode::Fixed,
            fixed_x: x,
            fixed_y: y,
            ..Self::default()
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self.position, PositionMode::Fixed)
    }

    /// Configured icon edge length, falling back to [`DEFAULT_ITEM_SIZE`] for absent or
    /// non-positive overrides. Oversized overrides are capped at [`MAX_ITEM_SIZE`].
    pub fn item_size(&self) -> i32 {
        self.item_size
            .filter(|size| *size > 0)
            .map_or(DEFAULT_ITEM_SIZE, |size| size.min(MAX_ITEM_SIZE))
    }
}

/// Global window-list presentation setting shared by every desklet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewListMode {
    #[default]
    Default,
    Docked,
    DockedList,
}

impl ViewListMode {
    pub fn is_docked(self) -> bool {
        matches!(self, Self::Docked | Self::DockedList)
    }
}

/// Measured surroundings for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEnvironment {
    pub viewport_width: i32,
    pub viewport_height: i32,
    pub parent_width: i32,
    pub parent_height: i32,
    pub title_bar_height: i32,
    pub dock: Option<DockExtent>,
    pub window_list_present: bool,
    pub view_list: ViewListMode,
    pub mobile: bool,
}

impl Default for LayoutEnvironment {
    fn default() -> Self {
        Self {
            viewport_width: 1024,
            viewport_height: 768,
            parent_width: 1024,
            parent_height: 768,
            title_bar_height: DEFAULT_TITLE_BAR_HEIGHT,
            dock: None,
            window_list_present: false,
            view_list: ViewListMode::Default,
            mobile: false,
        }
    }
}

impl LayoutEnvironment {
    /// Samples a geometry provider. A theme without a title bar metric falls back to
    /// [`DEFAULT_TITLE_BAR_HEIGHT`].
    pub fn sample(geometry: &dyn GeometryProvider, view_list: ViewListMode, mobile: bool) -> Self {
        Self {
            viewport_width: geometry.viewport_extent(Axis::Horizontal),
            viewport_height: geometry.viewport_extent(Axis::Vertical),
            parent_width: geometry.parent_extent(Axis::Horizontal),
            parent_height: geometry.parent_extent(Axis::Vertical),
            title_bar_height: geometry
                .theme_metric(ThemeMetric::ScreenTitleHeight)
                .unwrap_or(DEFAULT_TITLE_BAR_HEIGHT),
            dock: geometry.companion_dock(),
            window_list_present: geometry.window_list_present(),
            view_list,
            mobile,
        }
    }

    /// Screen extent along the orientation's primary axis; vertical strips lose the title bar.
    pub fn screen_extent(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.viewport_width,
            Orientation::Vertical => self.viewport_height - self.title_bar_height,
        }
    }

    /// Space icons may occupy along the primary axis before wrapping. Never below one pixel.
    pub fn available_space(&self, orientation: Orientation) -> i32 {
        let reserve = if self.window_list_present {
            WINDOW_LIST_RESERVE
        } else {
            DEFAULT_RESERVE
        };
        (self.screen_extent(orientation) - reserve).max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Launcher,
    /// The task/window list region. Survives `clear`.
    WindowList,
    /// Dock menu region.
    Menu,
}

/// How a launcher icon is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LauncherIcon {
    Image(String),
    /// Generic file-type glyph named by the upper-cased type token (`TXT`, `PNG`, ...).
    TypeGlyph(String),
    Bookmark {
        label: String,
        favicon: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationBinding {
    /// Executable string, optionally followed by space-separated arguments.
    Executable(String),
    /// Opaque shell command handed back to the host on click.
    Command(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherRecord {
    pub binding: ActivationBinding,
    pub icon: LauncherIcon,
    pub icon_source: String,
    pub title: Option<String>,
    pub display_name: Option<String>,
    pub class_name: Option<String>,
    pub workspace: Option<u32>,
    pub running: bool,
    /// Link resolved from bookmark metadata; activation opens it instead of executing.
    pub link: Option<String>,
}

impl LauncherRecord {
    pub fn executable(&self) -> Option<&str> {
        match &self.binding {
            ActivationBinding::Executable(exe) => Some(exe.as_str()),
            ActivationBinding::Command(_) => None,
        }
    }

    /// Text under the icon.
    pub fn label(&self) -> String {
        if let Some(name) = &self.display_name {
            return name.clone();
        }
        match &self.binding {
            ActivationBinding::Executable(exe) => exe.clone(),
            ActivationBinding::Command(cmd) => self.title.clone().unwrap_or_else(|| cmd.clone()),
        }
    }

    pub fn is_bookmark(&self) -> bool {
        matches!(self.icon, LauncherIcon::Bookmark { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeskletItem {
    pub id: ItemId,
    pub kind: ItemKind,
    /// Rendered but excluded from grid flow.
    pub skip: bool,
    pub launcher: Option<LauncherRecord>,
}

impl DeskletItem {
    pub fn launcher(id: ItemId, record: LauncherRecord) -> Self {
        Self {
            id,
            kind: ItemKind::Launcher,
            skip: false,
            launcher: Some(record),
        }
    }

    /// Window-list and menu regions always skip grid flow.
    pub fn region(id: ItemId, kind: ItemKind) -> Self {
        Self {
            id,
            kind,
            skip: !matches!(kind, ItemKind::Launcher),
            launcher: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPosition {
    pub x: i32,
    pub y: i32,
    /// Wrap segment the item landed in, counted along the wrap axis.
    pub block: u32,
}

/// Output of one layout pass. Recomputed wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub orientation: Orientation,
    pub blocks: u32,
    /// Blocks the item walk actually filled.
    pub occupied_blocks: u32,
    pub container_width: i32,
    pub container_height: i32,
    pub content_pixel_length: i32,
    /// Positions of flowed items in flow order.
    pub item_positions: Vec<(ItemId, ItemPosition)>,
}

impl LayoutResult {
    pub fn position_of(&self, id: ItemId) -> Option<ItemPosition> {
        self.item_positions
            .iter()
            .find(|(item_id, _)| *item_id == id)
            .map(|(_, position)| *position)
    }

    pub fn container_size(&self) -> PixelSize {
        PixelSize {
            width: self.container_width,
            height: self.container_height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollState {
    pub scroll_left: f64,
    pub scroll_top: f64,
}

/// Mobile overlay visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpenState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderPhase {
    #[default]
    Initializing,
    Rendered,
}

/// Delayed half of a mobile open/close transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    Opened,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeskletState {
    pub id: DeskletId,
    pub dom_id: String,
    pub config: DeskletConfig,
    pub environment: LayoutEnvironment,
    pub orientation: Orientation,
    pub items: Vec<DeskletItem>,
    pub next_item_id: u64,
    pub layout: Option<LayoutResult>,
    pub placement: Placement,
    pub reserved_margins: EdgeInsets,
    pub open_state: OpenState,
    pub phase: RenderPhase,
    /// Presentation-only marker cleared once entrance animations may run.
    pub initializing_class: bool,
}

impl DeskletState {
    pub fn new(
        id: DeskletId,
        dom_id: impl Into<String>,
        config: DeskletConfig,
        environment: LayoutEnvironment,
    ) -> Self {
        Self {
            id,
            dom_id: dom_id.into(),
            config,
            environment,
            orientation: Orientation::Vertical,
            items: Vec::new(),
            next_item_id: 1,
            layout: None,
            placement: Placement::default(),
            reserved_margins: EdgeInsets::ZERO,
            open_state: OpenState::Closed,
            phase: RenderPhase::Initializing,
            initializing_class: true,
        }
    }

    pub fn item(&self, id: ItemId) -> Option<&DeskletItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items in presentation order: the window list always renders last.
    pub fn ordered_items(&self) -> Vec<&DeskletItem> {
        let (lists, mut rest): (Vec<&DeskletItem>, Vec<&DeskletItem>) = self
            .items
            .iter()
            .partition(|item| matches!(item.kind, ItemKind::WindowList));
        rest.extend(lists);
        rest
    }

    pub fn launcher_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item.kind, ItemKind::Launcher))
            .count()
    }
}
