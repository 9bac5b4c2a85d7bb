//! Modal, drawer and toast class tables.

use serde::{Deserialize, Serialize};
use ui_headless::Size;

use crate::merge::cn;

/// Backdrop behind an open modal.
pub const MODAL_OVERLAY: &str = "fixed inset-0 z-50 bg-black/80 data-[state=closed]:hidden";

/// Modal dialog surface.
pub const MODAL_CONTENT: &str = "fixed left-1/2 top-1/2 z-50 grid w-full max-w-lg -translate-x-1/2 -translate-y-1/2 gap-4 border bg-background p-6 shadow-lg focus:outline-none sm:rounded-lg data-[state=closed]:hidden";

/// Modal heading.
pub const MODAL_TITLE: &str = "text-lg font-semibold leading-none tracking-tight";

/// Modal supporting text.
pub const MODAL_DESCRIPTION: &str = "text-sm text-muted-foreground";

/// Close affordance in the modal corner.
pub const MODAL_CLOSE: &str = "absolute right-4 top-4 rounded-sm opacity-70 transition-opacity hover:opacity-100 focus:outline-none focus:ring-2 focus:ring-ring focus:ring-offset-2";

/// Full class list for the modal surface.
pub fn modal_content_class(extra: Option<&str>) -> String {
    cn([MODAL_CONTENT, extra.unwrap_or_default()])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Viewport edge a drawer slides in from.
pub enum DrawerSide {
    /// Left edge.
    Left,
    /// Right edge.
    #[default]
    Right,
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
}

impl DrawerSide {
    /// Stable token for `data-side`.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }

    /// Anchoring classes for the panel.
    pub const fn class(self) -> &'static str {
        match self {
            Self::Left => "left-0 top-0 h-full",
            Self::Right => "right-0 top-0 h-full",
            Self::Top => "top-0 left-0 w-full",
            Self::Bottom => "bottom-0 left-0 w-full",
        }
    }

    /// `(hidden, visible)` transforms for the slide animation.
    pub const fn transform(self) -> (&'static str, &'static str) {
        match self {
            Self::Left => ("-translate-x-full", "translate-x-0"),
            Self::Right => ("translate-x-full", "translate-x-0"),
            Self::Top => ("-translate-y-full", "translate-y-0"),
            Self::Bottom => ("translate-y-full", "translate-y-0"),
        }
    }

    const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Drawer extent across its sliding axis.
pub enum DrawerSize {
    /// 16rem.
    Sm,
    /// 20rem.
    #[default]
    Md,
    /// 24rem.
    Lg,
    /// 28rem.
    Xl,
    /// The whole viewport.
    Full,
}

/// Width for side drawers, height for top and bottom drawers.
pub const fn drawer_size_class(side: DrawerSide, size: DrawerSize) -> &'static str {
    match (side.is_horizontal(), size) {
        (true, DrawerSize::Sm) => "w-64",
        (true, DrawerSize::Md) => "w-80",
        (true, DrawerSize::Lg) => "w-96",
        (true, DrawerSize::Xl) => "w-[28rem]",
        (true, DrawerSize::Full) => "w-full",
        (false, DrawerSize::Sm) => "h-64",
        (false, DrawerSize::Md) => "h-80",
        (false, DrawerSize::Lg) => "h-96",
        (false, DrawerSize::Xl) => "h-[28rem]",
        (false, DrawerSize::Full) => "h-full",
    }
}

const DRAWER_PANEL: &str = "fixed bg-white text-gray-900 shadow-lg border border-gray-200 z-50 transition-transform duration-300 ease-in-out flex flex-col";
const DRAWER_OVERLAY: &str = "fixed inset-0 bg-black bg-opacity-50 z-40 transition-opacity duration-300";
/// Close affordance in the drawer corner.
pub const DRAWER_CLOSE: &str = "absolute top-4 right-4 p-2 text-gray-500 hover:text-gray-700 hover:bg-gray-100 rounded-md transition-colors duration-200";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Resolved classes for a drawer.
pub struct DrawerClasses {
    /// Backdrop behind the panel.
    pub overlay: String,
    /// Sliding panel.
    pub content: String,
    /// Close button.
    pub close: String,
}

impl DrawerClasses {
    /// Resolves the class lists for a drawer in its shown or hidden position.
    pub fn new(side: DrawerSide, size: DrawerSize, visible: bool) -> Self {
        let (hidden, shown) = side.transform();
        Self {
            overlay: cn([
                DRAWER_OVERLAY,
                if visible { "opacity-100" } else { "opacity-0 pointer-events-none" },
            ]),
            content: cn([
                DRAWER_PANEL,
                side.class(),
                drawer_size_class(side, size),
                if visible { shown } else { hidden },
            ]),
            close: cn([DRAWER_CLOSE]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Toast status variants.
pub enum ToastVariant {
    /// Neutral notification.
    #[default]
    Default,
    /// Completed action.
    Success,
    /// Needs attention.
    Warning,
    /// Failed action.
    Error,
    /// Informational.
    Info,
}

impl ToastVariant {
    /// Stable token for `data-variant`.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    /// Surface colors for the variant.
    pub const fn class(self) -> &'static str {
        match self {
            Self::Default => "bg-white border-gray-200 text-gray-900",
            Self::Success => "bg-green-50 border-green-200 text-green-800",
            Self::Warning => "bg-yellow-50 border-yellow-200 text-yellow-800",
            Self::Error => "bg-red-50 border-red-200 text-red-800",
            Self::Info => "bg-blue-50 border-blue-200 text-blue-800",
        }
    }
}

/// Toast padding and width for a size.
pub const fn toast_size_class(size: Size) -> &'static str {
    match size {
        Size::Sm => "text-sm p-3 max-w-sm",
        Size::Md => "text-base p-4 max-w-md",
        Size::Lg => "text-lg p-5 max-w-lg",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Viewport corner or edge a toast stack is pinned to.
pub enum ToastPosition {
    /// Top left corner.
    TopLeft,
    /// Top edge, centered.
    TopCenter,
    /// Top right corner.
    #[default]
    TopRight,
    /// Bottom left corner.
    BottomLeft,
    /// Bottom edge, centered.
    BottomCenter,
    /// Bottom right corner.
    BottomRight,
}

impl ToastPosition {
    /// Stable token for `data-position`.
    pub const fn token(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
            Self::BottomRight => "bottom-right",
        }
    }

    /// Placement classes for the toast stack.
    pub const fn class(self) -> &'static str {
        match self {
            Self::TopLeft => "top-4 left-4",
            Self::TopCenter => "top-4 left-1/2 transform -translate-x-1/2",
            Self::TopRight => "top-4 right-4",
            Self::BottomLeft => "bottom-4 left-4",
            Self::BottomCenter => "bottom-4 left-1/2 transform -translate-x-1/2",
            Self::BottomRight => "bottom-4 right-4",
        }
    }
}

/// Classes shared by every toast.
pub const TOAST_BASE: &str =
    "fixed z-50 flex w-full items-start gap-3 rounded-md border shadow-lg pointer-events-auto";

/// Full class list for a toast.
pub fn toast_class(
    variant: ToastVariant,
    size: Size,
    position: ToastPosition,
    extra: Option<&str>,
) -> String {
    cn([
        TOAST_BASE,
        variant.class(),
        toast_size_class(size),
        position.class(),
        extra.unwrap_or_default(),
    ])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn positions_decode_from_kebab_tokens() {
        let position: ToastPosition = serde_json::from_str("\"bottom-center\"").expect("decode");
        assert_eq!(position, ToastPosition::BottomCenter);
        assert_eq!(position.token(), "bottom-center");
        assert_eq!(ToastPosition::default(), ToastPosition::TopRight);
    }

    #[test]
    fn toast_class_combines_every_table() {
        let class = toast_class(ToastVariant::Error, Size::Lg, ToastPosition::TopLeft, None);
        assert!(class.contains("bg-red-50 border-red-200 text-red-800"));
        assert!(class.contains("text-lg p-5 max-w-lg"));
        assert!(class.ends_with("top-4 left-4"));
    }

    #[test]
    fn modal_content_accepts_width_override() {
        let class = modal_content_class(Some("max-w-2xl"));
        assert!(class.ends_with("max-w-2xl"));
        assert!(!class.contains("max-w-lg"));
    }

    #[test]
    fn hidden_drawer_slides_off_its_edge() {
        let hidden = DrawerClasses::new(DrawerSide::Left, DrawerSize::Sm, false);
        assert!(hidden.content.contains("left-0 top-0 h-full w-64"));
        assert!(hidden.content.ends_with("-translate-x-full"));
        assert!(hidden.overlay.ends_with("opacity-0 pointer-events-none"));

        let shown = DrawerClasses::new(DrawerSide::Left, DrawerSize::Sm, true);
        assert!(shown.content.ends_with("translate-x-0"));
        assert!(shown.overlay.ends_with("opacity-100"));
    }

    #[test]
    fn drawer_size_follows_the_sliding_axis() {
        assert_eq!(drawer_size_class(DrawerSide::Right, DrawerSize::Xl), "w-[28rem]");
        assert_eq!(drawer_size_class(DrawerSide::Bottom, DrawerSize::Xl), "h-[28rem]");
        let top = DrawerClasses::new(DrawerSide::Top, DrawerSize::Full, true);
        assert!(top.content.contains("top-0 left-0 w-full h-full translate-y-0"));

        let side: DrawerSide = serde_json::from_str("\"bottom\"").expect("decode");
        assert_eq!(side, DrawerSide::Bottom);
        assert_eq!(DrawerSide::default(), DrawerSide::Right);
        assert_eq!(DrawerSize::default(), DrawerSize::Md);
    }
}
