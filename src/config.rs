use anyhow::{bail, Context};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use stripcal::calendar::parse::parse_weekday;
use stripcal::calendar::{
    is_parsable_date_string, parse_date_string, Locale, StripOptions, ThemeVariant,
};

/// Settings read from the configuration file and/or the command line.  All
/// dates are `YYYY-MM-DD` strings.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub(crate) struct Config {
    pub(crate) first_day: Option<String>,
    pub(crate) start: Option<String>,
    pub(crate) end: Option<String>,
    pub(crate) min: Option<String>,
    pub(crate) max: Option<String>,
    pub(crate) marks: Vec<String>,
    pub(crate) locale: Option<String>,
    pub(crate) theme: Option<String>,
    pub(crate) week_count: Option<usize>,
    pub(crate) item_width: Option<u16>,
    pub(crate) column_gap: Option<u16>,
    pub(crate) log_file: Option<PathBuf>,
}

impl Config {
    /// `<config dir>/stripcal/config.toml`
    pub(crate) fn default_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join("stripcal").join("config.toml"))
    }

    /// Read the configuration from `path`, or from the default path if that
    /// exists.  A missing default file yields the default configuration; a
    /// missing explicit file is an error.
    pub(crate) fn load(path: Option<&Path>) -> anyhow::Result<Config> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Config::default_path() {
                Some(p) if p.exists() => p,
                _ => {
                    tracing::debug!("no configuration file found; using defaults");
                    return Ok(Config::default());
                }
            },
        };
        let src = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config =
            Config::from_toml(&src).with_context(|| format!("failed to parse {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub(crate) fn from_toml(src: &str) -> anyhow::Result<Config> {
        let config = toml::from_str::<Config>(src)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every date setting is a valid `YYYY-MM-DD` date
    pub(crate) fn validate(&self) -> anyhow::Result<()> {
        let named = [
            ("start", &self.start),
            ("end", &self.end),
            ("min", &self.min),
            ("max", &self.max),
        ];
        for (name, value) in named {
            if let Some(s) = value {
                if !is_parsable_date_string(s) {
                    bail!("invalid {name} date {s:?}; expected YYYY-MM-DD");
                }
            }
        }
        for s in &self.marks {
            if !is_parsable_date_string(s) {
                bail!("invalid marked date {s:?}; expected YYYY-MM-DD");
            }
        }
        Ok(())
    }

    /// Layer `other` on top of `self`.  Settings present in `other` replace
    /// those in `self`, and marked dates are combined.
    pub(crate) fn merge(mut self, other: Config) -> Config {
        self.first_day = other.first_day.or(self.first_day);
        self.start = other.start.or(self.start);
        self.end = other.end.or(self.end);
        self.min = other.min.or(self.min);
        self.max = other.max.or(self.max);
        self.marks.extend(other.marks);
        self.locale = other.locale.or(self.locale);
        self.theme = other.theme.or(self.theme);
        self.week_count = other.week_count.or(self.week_count);
        self.item_width = other.item_width.or(self.item_width);
        self.column_gap = other.column_gap.or(self.column_gap);
        self.log_file = other.log_file.or(self.log_file);
        self
    }

    pub(crate) fn theme(&self) -> anyhow::Result<ThemeVariant> {
        match self.theme {
            Some(ref s) => Ok(s.parse::<ThemeVariant>()?),
            None => Ok(ThemeVariant::default()),
        }
    }

    /// Apply the settings to `options`
    pub(crate) fn apply(&self, mut options: StripOptions) -> anyhow::Result<StripOptions> {
        self.validate()?;
        if let Some(ref s) = self.first_day {
            options = options.first_day(parse_weekday(s)?);
        }
        if let Some(ref s) = self.start {
            options = options.start_date(parse_date_string(s)?);
        }
        if let Some(ref s) = self.end {
            options = options.end_date(parse_date_string(s)?);
        }
        if let Some(ref s) = self.min {
            options = options.min_date(parse_date_string(s)?);
        }
        if let Some(ref s) = self.max {
            options = options.max_date(parse_date_string(s)?);
        }
        for s in &self.marks {
            options = options.mark(parse_date_string(s)?);
        }
        if let Some(ref s) = self.locale {
            options = options.locale(s.parse::<Locale>()?);
        }
        if let Some(n) = self.week_count {
            if n == 0 {
                bail!("week count must be positive");
            }
            options = options.week_count(n);
        }
        if let Some(w) = self.item_width {
            if w == 0 {
                bail!("item width must be positive");
            }
            options = options.item_width(w);
        }
        if let Some(g) = self.column_gap {
            options = options.column_gap(g);
        }
        Ok(options)
    }
}
