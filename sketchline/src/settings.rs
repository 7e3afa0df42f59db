use sketchline_core::{
    fit,
    history::HistoryManager,
    tess::{StripSettings, StripTessellator, WidthPolicy},
};

const DOCUMENTATION: &str = r#"# Sketchline settings. You may edit this file, but be aware that formatting and comments will not
# be preserved, and all keys and values are case sensitive.

# tension:             Scale of the curve tangents. 0.5 gives Catmull-Rom curves, 0 gives straight lines.
# samples_per_segment: Points evaluated along each curve segment. At least 2.
# cap_segments:        Triangles in each round end cap. At least 3.
# disc_segments:       Triangles in the disc drawn for single-point strokes. At least 3.
# width:               "Uniform" for constant width, or "Pressure" to scale width by stylus pressure.
# history_capacity:    Number of undo states kept per document.

"#;

#[must_use]
pub fn preferences_dir() -> Option<std::path::PathBuf> {
    let mut base_dir = dirs::preference_dir()?;
    base_dir.push(env!("CARGO_PKG_NAME"));
    Some(base_dir)
}

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
#[serde(default)]
pub struct Settings {
    pub tension: f32,
    pub samples_per_segment: usize,
    pub cap_segments: usize,
    pub disc_segments: usize,
    /// Name of a [`WidthPolicy`] variant.
    pub width: String,
    pub history_capacity: usize,
    #[serde(skip)]
    failed_to_load: bool,
}
impl Default for Settings {
    fn default() -> Self {
        let strip = StripSettings::default();
        Self {
            tension: fit::DEFAULT_TENSION,
            samples_per_segment: strip.samples_per_segment,
            cap_segments: strip.cap_segments,
            disc_segments: strip.disc_segments,
            width: strip.width.to_string(),
            history_capacity: HistoryManager::DEFAULT_CAPACITY,
            failed_to_load: false,
        }
    }
}
impl Settings {
    const FILENAME: &'static str = "settings.toml";
    /// Load from user preferences, or default if unavailable for some reason.
    #[must_use]
    pub fn load() -> Self {
        match preferences_dir() {
            None => Self::no_path(),
            Some(mut dir) => {
                dir.push(Self::FILENAME);
                Self::load_or_default(&dir)
            }
        }
    }
    #[must_use]
    fn no_path() -> Self {
        log::warn!("Settings weren't available, defaulting.");
        Self {
            failed_to_load: true,
            ..Self::default()
        }
    }
    #[must_use]
    fn load_or_default(path: &std::path::Path) -> Self {
        let settings: anyhow::Result<Self> = try_block::try_block! {
            let string = std::fs::read_to_string(path)?;
            let settings : Self = toml::from_str(&string)?;

            Ok(settings)
        };

        match settings {
            Ok(settings) => settings,
            Err(e) => {
                log::debug!("Reading {path:?}: {e:#}");
                Self::no_path()
            }
        }
    }
    /// Return true if loading user's settings failed.
    #[must_use]
    pub fn did_fail_to_load(&self) -> bool {
        self.failed_to_load
    }
    pub fn save(&self) -> anyhow::Result<()> {
        let mut preferences =
            preferences_dir().ok_or_else(|| anyhow::anyhow!("No preferences dir found"))?;
        // Not recursive. Errors from an existing dir are ignored, real ones show up on write.
        let _ = std::fs::DirBuilder::new().create(&preferences);

        preferences.push(Self::FILENAME);
        let string = self.to_toml()?;
        std::fs::write(preferences, string)?;
        Ok(())
    }
    fn to_toml(&self) -> anyhow::Result<String> {
        let string = toml::ser::to_string_pretty(self)?;
        Ok(DOCUMENTATION.to_owned() + &string)
    }
    /// The configured width policy. Unknown names fall back to the default.
    #[must_use]
    pub fn width_policy(&self) -> WidthPolicy {
        use strum::IntoEnumIterator;
        self.width.parse().unwrap_or_else(|_| {
            let options: Vec<_> = WidthPolicy::iter().map(|p| p.to_string()).collect();
            log::warn!("Unknown width policy {:?}, expected one of {options:?}", self.width);
            WidthPolicy::default()
        })
    }
    #[must_use]
    pub fn tessellator(&self) -> StripTessellator {
        StripTessellator {
            tension: self.tension,
            settings: StripSettings {
                samples_per_segment: self.samples_per_segment,
                cap_segments: self.cap_segments,
                disc_segments: self.disc_segments,
                width: self.width_policy(),
            }
            .sanitized(),
        }
    }
}
