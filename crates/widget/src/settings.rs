//! Configure a scrollbar.
use crate::core::time::{Duration, milliseconds, seconds};
use crate::core::{Easing, Edges, Error};

/// The axes that get a custom scrollbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Track {
    /// Only the vertical axis.
    #[default]
    Vertical,
    /// Only the horizontal axis.
    Horizontal,
    /// Both axes.
    All,
}

impl Track {
    /// Returns true if the vertical axis is tracked.
    pub fn has_vertical(self) -> bool {
        matches!(self, Track::Vertical | Track::All)
    }

    /// Returns true if the horizontal axis is tracked.
    pub fn has_horizontal(self) -> bool {
        matches!(self, Track::Horizontal | Track::All)
    }

    /// Returns the name of the track, as used in state attributes.
    pub fn name(self) -> &'static str {
        match self {
            Track::Vertical => "vertical",
            Track::Horizontal => "horizontal",
            Track::All => "all",
        }
    }
}

/// When the scrollbars are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    /// Only when the content overflows.
    #[default]
    Native,
    /// Only while the pointer hovers the scrollable area.
    Hover,
    /// Always, even if the content does not overflow.
    Always,
}

impl Visibility {
    /// Returns the name of the visibility, as used in state attributes.
    pub fn name(self) -> &'static str {
        match self {
            Visibility::Native => "native",
            Visibility::Hover => "hover",
            Visibility::Always => "always",
        }
    }
}

/// How the scrollbars share space with the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Appearance {
    /// The scrollbars take their own space next to the content.
    #[default]
    Standard,
    /// The scrollbars float on top of the content.
    Compact,
}

impl Appearance {
    /// Returns the name of the appearance, as used in state attributes.
    pub fn name(self) -> &'static str {
        match self {
            Appearance::Standard => "standard",
            Appearance::Compact => "compact",
        }
    }
}

/// Where the scrollbars are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    /// Where the platform puts them.
    #[default]
    Native,
    /// The horizontal scrollbar goes to the top.
    InvertX,
    /// The vertical scrollbar goes to the start side.
    InvertY,
    /// Both of the above.
    InvertAll,
}

impl Position {
    /// Returns the name of the position, as used in state attributes.
    pub fn name(self) -> &'static str {
        match self {
            Position::Native => "native",
            Position::InvertX => "invertX",
            Position::InvertY => "invertY",
            Position::InvertAll => "invertAll",
        }
    }
}

/// How reached and dropped edges are detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeMode {
    /// With sentinels observed by the host.
    #[default]
    Sentinel,
    /// By comparing the measured offset against the thresholds.
    Position,
}

/// The settings of a scrollbar.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Settings {
    /// The axes with a custom scrollbar.
    pub track: Track,
    /// When the scrollbars are shown.
    pub visibility: Visibility,
    /// How the scrollbars share space with the content.
    pub appearance: Appearance,
    /// Where the scrollbars are placed.
    pub position: Position,
    /// The minimum size of a thumb, in pixels.
    pub min_thumb_size: f32,
    /// Waits for content changes to settle for this long before measuring.
    pub sensor_debounce: Option<Duration>,
    /// Measures content changes at most once per this interval.
    pub sensor_throttle: Option<Duration>,
    /// Stops observing content changes.
    pub disable_sensor: bool,
    /// Ignores pointer interactions with the scrollbars.
    pub disable_interaction: bool,
    /// The default duration of programmatic scrolling.
    pub scroll_duration: Duration,
    /// The default easing of programmatic scrolling.
    pub scroll_easing: Easing,
    /// The duration of the scroll started by clicking a track.
    pub track_click_duration: Duration,
    /// Waits for an external viewport to appear instead of failing.
    pub async_viewport: bool,
    /// How often a missing external viewport is looked up.
    pub async_poll_interval: Duration,
    /// How long a missing external viewport is waited for.
    pub async_timeout: Duration,
    /// The edges that publish reached events.
    pub reached: Edges,
    /// The edges that publish dropped events.
    pub dropped: Edges,
    /// The distance from an edge under which it counts as reached.
    pub reached_offset: f32,
    /// The distance from an edge over which it counts as dropped.
    pub dropped_offset: f32,
    /// How reached and dropped edges are detected.
    pub edge_mode: EdgeMode,
    /// How long to wait for the first sentinel report before arming.
    pub arm_timeout: Duration,
    /// The duration of the fade of [`Visibility::Hover`] scrollbars.
    pub hover_fade: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            track: Track::default(),
            visibility: Visibility::default(),
            appearance: Appearance::default(),
            position: Position::default(),
            min_thumb_size: 20.0,
            sensor_debounce: None,
            sensor_throttle: None,
            disable_sensor: false,
            disable_interaction: false,
            scroll_duration: milliseconds(468),
            scroll_easing: Easing::Standard,
            track_click_duration: milliseconds(300),
            async_viewport: false,
            async_poll_interval: milliseconds(100),
            async_timeout: seconds(3),
            reached: Edges::empty(),
            dropped: Edges::empty(),
            reached_offset: 1.0,
            dropped_offset: 0.0,
            edge_mode: EdgeMode::default(),
            arm_timeout: milliseconds(50),
            hover_fade: milliseconds(400),
        }
    }
}

impl Settings {
    /// Creates the default [`Settings`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the [`Track`].
    pub fn track(mut self, track: Track) -> Self {
        self.track = track;
        self
    }

    /// Sets the [`Visibility`].
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Sets the [`Appearance`].
    pub fn appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    /// Sets the [`Position`].
    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Sets the minimum size of a thumb.
    pub fn min_thumb_size(mut self, size: f32) -> Self {
        self.min_thumb_size = size;
        self
    }

    /// Debounces content change measurements.
    pub fn sensor_debounce(mut self, interval: Duration) -> Self {
        self.sensor_debounce = Some(interval);
        self
    }

    /// Throttles content change measurements.
    pub fn sensor_throttle(mut self, interval: Duration) -> Self {
        self.sensor_throttle = Some(interval);
        self
    }

    /// Stops observing content changes.
    pub fn disable_sensor(mut self) -> Self {
        self.disable_sensor = true;
        self
    }

    /// Ignores pointer interactions with the scrollbars.
    pub fn disable_interaction(mut self) -> Self {
        self.disable_interaction = true;
        self
    }

    /// Sets the default duration and easing of programmatic scrolling.
    pub fn scroll(mut self, duration: Duration, easing: impl Into<Easing>) -> Self {
        self.scroll_duration = duration;
        self.scroll_easing = easing.into();
        self
    }

    /// Sets the duration of the scroll started by clicking a track.
    pub fn track_click_duration(mut self, duration: Duration) -> Self {
        self.track_click_duration = duration;
        self
    }

    /// Waits up to `timeout` for an external viewport, looking it up every
    /// `interval`.
    pub fn async_viewport(mut self, interval: Duration, timeout: Duration) -> Self {
        self.async_viewport = true;
        self.async_poll_interval = interval;
        self.async_timeout = timeout;
        self
    }

    /// Publishes reached events for the given edges.
    pub fn on_reached(mut self, edges: impl Into<Edges>) -> Self {
        self.reached = edges.into();
        self
    }

    /// Publishes dropped events for the given edges.
    pub fn on_dropped(mut self, edges: impl Into<Edges>) -> Self {
        self.dropped = edges.into();
        self
    }

    /// Sets the thresholds of reached and dropped edges.
    pub fn edge_offsets(mut self, reached: f32, dropped: f32) -> Self {
        self.reached_offset = reached;
        self.dropped_offset = dropped;
        self
    }

    /// Sets the [`EdgeMode`].
    pub fn edge_mode(mut self, mode: EdgeMode) -> Self {
        self.edge_mode = mode;
        self
    }

    /// Sets the duration of the hover fade.
    pub fn hover_fade(mut self, duration: Duration) -> Self {
        self.hover_fade = duration;
        self
    }

    /// Checks that the [`Settings`] make sense.
    pub fn validate(&self) -> Result<(), Error> {
        let lengths = [
            ("min_thumb_size", self.min_thumb_size),
            ("reached_offset", self.reached_offset),
            ("dropped_offset", self.dropped_offset),
        ];

        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidSetting {
                    name,
                    reason: format!("expected a positive length, got {value}"),
                });
            }
        }

        if self.sensor_debounce.is_some() && self.sensor_throttle.is_some() {
            return Err(Error::InvalidSetting {
                name: "sensor_debounce",
                reason: String::from("cannot be combined with `sensor_throttle`"),
            });
        }

        if self.async_viewport && self.async_poll_interval.is_zero() {
            return Err(Error::InvalidSetting {
                name: "async_poll_interval",
                reason: String::from("must not be zero"),
            });
        }

        Ok(())
    }
}

/// An error produced while loading [`Settings`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("Failed to read settings: {0}")]
    ReadError(String),
    /// The file could not be parsed.
    #[error("Failed to parse settings: {0}")]
    ParseError(String),
    /// The parsed settings are invalid.
    #[error(transparent)]
    Invalid(#[from] Error),
}

#[cfg(feature = "serde")]
impl Settings {
    /// Parses [`Settings`] from RON. Missing fields keep their defaults.
    ///
    /// ```
    /// use icy_scroll_widget::settings::{Settings, Track};
    ///
    /// let settings = Settings::from_ron("(track: All, min_thumb_size: 32.0)").unwrap();
    ///
    /// assert_eq!(settings.track, Track::All);
    /// assert_eq!(settings.min_thumb_size, 32.0);
    /// ```
    pub fn from_ron(source: &str) -> Result<Self, LoadError> {
        let settings: Self =
            ron::from_str(source).map_err(|error| LoadError::ParseError(error.to_string()))?;

        settings.validate()?;

        Ok(settings)
    }

    /// Loads [`Settings`] from a RON file.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();

        let source = std::fs::read_to_string(path)
            .map_err(|error| LoadError::ReadError(format!("{}: {error}", path.display())))?;

        log::debug!("Loading scrollbar settings from {}", path.display());

        Self::from_ron(&source)
    }
}
