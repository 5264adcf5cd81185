use crate::paginator::{Chrome, DEFAULT_LINE_WIDTH, DEFAULT_LINES_PER_PAGE, PageLayout};
use anyhow::{Context, Result};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CURRENT_VERSION: u32 = 1;
const SETTINGS_FILENAME: &str = "config.yaml";
const APP_NAME: &str = "pagerat";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub version: u32,

    pub book_file: PathBuf,

    pub state_file: PathBuf,

    /// Shown above every page; defaults to the book's file name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Page geometry for the non-interactive commands.
    pub line_width: usize,
    pub lines_per_page: usize,

    /// Terminal columns/rows around the page text in the interactive reader.
    pub horizontal_chrome: u16,
    pub vertical_chrome: u16,
}

impl Default for Settings {
    fn default() -> Self {
        let chrome = Chrome::default();
        Self {
            version: CURRENT_VERSION,
            book_file: PathBuf::from("book.html"),
            state_file: PathBuf::from(".pagerat_state.json"),
            title: None,
            line_width: DEFAULT_LINE_WIDTH,
            lines_per_page: DEFAULT_LINES_PER_PAGE,
            horizontal_chrome: chrome.horizontal,
            vertical_chrome: chrome.vertical,
        }
    }
}

impl Settings {
    /// Loads settings from `explicit` if given (any failure is an error),
    /// otherwise from the user config directory when a file exists there
    /// (a broken file is logged and ignored), otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        match preferred_config_path() {
            Some(path) if path.exists() => Ok(Self::load_from_path(&path).unwrap_or_else(|e| {
                error!("Failed to load settings from {path:?}: {e:#}");
                Self::default()
            })),
            Some(path) => {
                info!("No settings file at {path:?}, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
        debug!("Loaded settings from {path:?}: {settings:?}");
        Ok(settings)
    }

    pub fn default_layout(&self) -> PageLayout {
        PageLayout::new(self.line_width, self.lines_per_page)
    }

    pub fn chrome(&self) -> Chrome {
        Chrome {
            horizontal: self.horizontal_chrome,
            vertical: self.vertical_chrome,
        }
    }

    pub fn display_title(&self) -> String {
        self.title.clone().unwrap_or_else(|| {
            self.book_file
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Untitled".to_string())
        })
    }
}

pub fn preferred_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|config| config.join(APP_NAME).join(SETTINGS_FILENAME))
}
