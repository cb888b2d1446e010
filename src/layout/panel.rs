use crate::foundation::core::Vec2i;

/// The thirteen regions of an unfolded tuck box, in layout order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PanelName {
    /// Strip glued under the right side.
    GlueTab,
    /// Rear face with the thumb cutout.
    Back,
    /// Left side.
    Left,
    /// Front face.
    Front,
    /// Right side.
    Right,
    /// Bottom end.
    Bottom,
    /// Tuck tab closing the bottom.
    BottomTab,
    /// Top end (the lid).
    Top,
    /// Tuck tab closing the top.
    TopTab,
    /// Left-top dust flap.
    LtTab,
    /// Right-top dust flap.
    RtTab,
    /// Left-bottom dust flap.
    LbTab,
    /// Right-bottom dust flap.
    RbTab,
}

impl PanelName {
    /// Every panel in layout (and compositing) order.
    pub const ALL: [PanelName; 13] = [
        Self::GlueTab,
        Self::Back,
        Self::Left,
        Self::Front,
        Self::Right,
        Self::Bottom,
        Self::BottomTab,
        Self::Top,
        Self::TopTab,
        Self::LtTab,
        Self::RtTab,
        Self::LbTab,
        Self::RbTab,
    ];

    /// Configuration key of this panel.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GlueTab => "glue_tab",
            Self::Back => "back",
            Self::Left => "left",
            Self::Front => "front",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::BottomTab => "bottom_tab",
            Self::Top => "top",
            Self::TopTab => "top_tab",
            Self::LtTab => "lt_tab",
            Self::RtTab => "rt_tab",
            Self::LbTab => "lb_tab",
            Self::RbTab => "rb_tab",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for PanelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Orientation a panel is drawn in, or must appear in on the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Taller than wide.
    #[default]
    Portrait,
    /// Wider than tall.
    Landscape,
}

impl Orientation {
    /// Case-insensitive parse of `portrait` / `landscape`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Some(Self::Portrait),
            "landscape" => Some(Self::Landscape),
            _ => None,
        }
    }

    /// Reorder `size` so its axes agree with this orientation.
    pub fn normalize(self, size: Vec2i) -> Vec2i {
        match self {
            Self::Portrait => Vec2i::new(size.min_axis(), size.max_axis()),
            Self::Landscape => Vec2i::new(size.max_axis(), size.min_axis()),
        }
    }
}

/// Outline class of a panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Plain rectangle.
    #[default]
    Pane,
    /// Rectangle with an elliptical thumb cutout on the top edge.
    Back,
    /// Plain rectangle.
    GlueTab,
    /// Angled dust flap.
    SideTab,
    /// Rectangle with a rounded bottom.
    TuckTab,
}

/// Placement and shape of one panel on the unfolded template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelSpec {
    /// Which panel this is.
    pub name: PanelName,
    /// Top-left corner relative to the template origin.
    pub pos: Vec2i,
    /// Size in the working orientation.
    pub size: Vec2i,
    /// Outline class.
    pub shape: ShapeKind,
    /// Rotate 180° after any orientation change.
    pub rotated: bool,
    /// Mirror left-right last.
    pub flip_h: bool,
    /// Mirror top-bottom before `flip_h`.
    pub flip_v: bool,
    /// Thumb cutout width; only meaningful for [`ShapeKind::Back`].
    pub cutin: i32,
    /// Orientation the panel is rendered in.
    pub orientation: Orientation,
    /// Orientation the panel must have on the page.
    pub print_orientation: Orientation,
}

impl PanelSpec {
    /// Portrait rectangle with no transforms.
    pub fn new(name: PanelName, pos: Vec2i, size: Vec2i) -> Self {
        Self {
            name,
            pos,
            size,
            shape: ShapeKind::Pane,
            rotated: false,
            flip_h: false,
            flip_v: false,
            cutin: 0,
            orientation: Orientation::Portrait,
            print_orientation: Orientation::Portrait,
        }
    }

    /// Whether rendering needs a 90° turn to reach the print orientation.
    pub fn needs_quarter_turn(&self) -> bool {
        self.orientation != self.print_orientation
    }

    /// Size of the rendered panel once oriented for the page.
    pub fn placed_size(&self) -> Vec2i {
        if self.needs_quarter_turn() {
            self.size.transposed()
        } else {
            self.size
        }
    }
}
