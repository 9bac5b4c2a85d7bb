//! Slider class tables.

use ui_headless::{Orientation, Size};

use crate::merge::cn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Size-dependent slider classes.
pub struct SliderSizeClasses {
    /// Track thickness.
    pub track: &'static str,
    /// Thumb dimensions.
    pub thumb: &'static str,
    /// Value label text size.
    pub value: &'static str,
}

/// Size-dependent classes.
pub const fn slider_size_classes(size: Size) -> SliderSizeClasses {
    match size {
        Size::Sm => SliderSizeClasses {
            track: "h-1",
            thumb: "w-3 h-3",
            value: "text-xs",
        },
        Size::Md => SliderSizeClasses {
            track: "h-2",
            thumb: "w-4 h-4",
            value: "text-sm",
        },
        Size::Lg => SliderSizeClasses {
            track: "h-3",
            thumb: "w-5 h-5",
            value: "text-base",
        },
    }
}

/// Orientation-dependent `(container, track, thumb)` classes.
pub const fn slider_orientation_classes(
    orientation: Orientation,
) -> (&'static str, &'static str, &'static str) {
    match orientation {
        Orientation::Horizontal => (
            "w-full flex items-center",
            "w-full relative",
            "absolute top-1/2 -translate-y-1/2 -translate-x-1/2",
        ),
        Orientation::Vertical => (
            "h-full flex flex-col items-center",
            "h-full relative",
            "absolute left-1/2 -translate-x-1/2 -translate-y-1/2",
        ),
    }
}

const CONTAINER: &str = "relative";
const TRACK: &str = "bg-gray-200 rounded-full relative";
const FILL: &str = "bg-blue-500 rounded-full absolute";
const THUMB: &str = "bg-white border-2 border-blue-500 rounded-full cursor-pointer transition-all duration-200 hover:scale-110 focus:outline-none focus:ring-2 focus:ring-blue-500 focus:ring-offset-2";
const TICK: &str = "absolute w-1 h-1 bg-gray-400 rounded-full";
const VALUE: &str = "absolute whitespace-nowrap";
const DISABLED: &str = "opacity-50 cursor-not-allowed";
const THUMB_DISABLED: &str = "cursor-not-allowed hover:scale-100";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Resolved classes for every slider part.
pub struct SliderClasses {
    /// Outer wrapper.
    pub container: String,
    /// Unfilled track.
    pub track: String,
    /// Filled portion of the track.
    pub fill: String,
    /// Draggable thumb.
    pub thumb: String,
    /// Step tick mark.
    pub tick: String,
    /// Value label.
    pub value: String,
}

impl SliderClasses {
    /// Resolves the class lists for a slider.
    pub fn new(size: Size, orientation: Orientation, disabled: bool) -> Self {
        let sizes = slider_size_classes(size);
        let (container, track, thumb) = slider_orientation_classes(orientation);
        let fill_extent = match orientation {
            Orientation::Horizontal => sizes.track,
            Orientation::Vertical => "w-full",
        };
        Self {
            container: cn([CONTAINER, container, if disabled { DISABLED } else { "" }]),
            track: cn([TRACK, track, sizes.track]),
            fill: cn([FILL, fill_extent]),
            thumb: cn([
                THUMB,
                thumb,
                sizes.thumb,
                if disabled { THUMB_DISABLED } else { "" },
            ]),
            tick: cn([TICK]),
            value: cn([VALUE, sizes.value]),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn horizontal_fill_follows_track_thickness() {
        let classes = SliderClasses::new(Size::Lg, Orientation::Horizontal, false);
        assert_eq!(classes.fill, "bg-blue-500 rounded-full absolute h-3");
        assert_eq!(classes.track, "bg-gray-200 rounded-full w-full relative h-3");
        assert_eq!(classes.container, "relative w-full flex items-center");
    }

    #[test]
    fn vertical_fill_spans_track_width() {
        let classes = SliderClasses::new(Size::Sm, Orientation::Vertical, false);
        assert_eq!(classes.fill, "bg-blue-500 rounded-full absolute w-full");
        assert!(classes.thumb.contains("left-1/2 -translate-x-1/2 -translate-y-1/2"));
        assert!(classes.thumb.ends_with("w-3 h-3"));
    }

    #[test]
    fn disabled_thumb_drops_pointer_and_hover_scale() {
        let classes = SliderClasses::new(Size::Md, Orientation::Horizontal, true);
        assert!(!classes.thumb.contains("cursor-pointer"));
        assert!(!classes.thumb.contains("hover:scale-110"));
        assert!(classes.thumb.ends_with("cursor-not-allowed hover:scale-100"));
        assert!(classes.container.ends_with("opacity-50 cursor-not-allowed"));
    }
}
