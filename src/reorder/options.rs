/// How finely an "inside" drop is positioned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Granularity {
    /// Split inline text before or after the character under the pointer.
    #[default]
    Character,

    /// Split at the start of the range under the pointer, without choosing a side.
    /// Pointing at the very first character counts as dropping before the element.
    Element,
}

/// Options for [`super::DragController`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DragOptions {
    /// Height (in points) of the bands at the top and bottom of a candidate that mean
    /// "before"/"after" even when the pointer is over text.
    pub drop_padding: f32,

    pub granularity: Granularity,

    /// Marker set on the source element for the duration of a drag.
    pub dragging_marker: String,

    /// Thickness of the drop indicator bar.
    pub indicator_thickness: f32,

    /// How far the vertical "inside" indicator extends above and below the text range.
    pub indicator_overhang: f32,

    /// If true, record drag decisions in a small ring buffer, see
    /// [`super::DragController::debug_log_text`].
    pub debug_event_log: bool,

    /// Maximum number of debug log lines to keep (ring buffer).
    pub debug_event_log_capacity: usize,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            drop_padding: 4.0,
            granularity: Granularity::Character,
            dragging_marker: "dragging".to_owned(),
            indicator_thickness: 2.0,
            indicator_overhang: 3.0,
            debug_event_log: false,
            debug_event_log_capacity: 200,
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let opt: DragOptions =
            serde_json::from_str(r#"{ "drop_padding": 6.0, "granularity": "Element" }"#)
                .expect("valid options");
        assert_eq!(opt.drop_padding, 6.0);
        assert_eq!(opt.granularity, Granularity::Element);
        assert_eq!(opt.dragging_marker, "dragging");
        assert_eq!(opt.debug_event_log_capacity, 200);
    }

    #[test]
    fn ron_config_with_debug_log() {
        let opt: DragOptions = ron::from_str(
            "(debug_event_log: true, debug_event_log_capacity: 16, dragging_marker: \"lifted\")",
        )
        .expect("valid options");
        assert!(opt.debug_event_log);
        assert_eq!(opt.debug_event_log_capacity, 16);
        assert_eq!(opt.dragging_marker, "lifted");
        assert_eq!(opt.indicator_thickness, 2.0);
    }
}
