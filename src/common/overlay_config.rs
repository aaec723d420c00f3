use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_DPI: u32 = 120;

#[derive(Debug, Clone)]
pub struct OverlayConfig {
    pub folder: PathBuf,
    pub show: bool,
    pub save_dir: Option<PathBuf>,
    pub subset: Option<HashSet<String>>,
    pub dpi: u32,
    pub font_path: Option<PathBuf>,
    pub palette: Option<String>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::new(),
            show: false,
            save_dir: None,
            subset: None,
            dpi: DEFAULT_DPI,
            font_path: None,
            palette: None,
        }
    }
}

impl OverlayConfig {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            ..Default::default()
        }
    }

    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    pub fn with_save_dir(mut self, save_dir: Option<PathBuf>) -> Self {
        self.save_dir = save_dir;
        self
    }

    /// Accepts the raw `--subset` value, e.g. `"img1.png, img2.jpg"`.
    pub fn with_subset(mut self, subset: Option<&str>) -> Self {
        self.subset = subset.and_then(parse_subset);
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi.max(1);
        self
    }

    pub fn with_font_path(mut self, font_path: Option<PathBuf>) -> Self {
        self.font_path = font_path;
        self
    }

    pub fn with_palette(mut self, palette: Option<String>) -> Self {
        self.palette = palette;
        self
    }

    /// Rendering is only worth doing when the result goes somewhere.
    pub fn wants_output(&self) -> bool {
        self.show || self.save_dir.is_some()
    }

    pub fn is_selected(&self, file_name: &str) -> bool {
        match &self.subset {
            Some(names) => names.contains(file_name),
            None => true,
        }
    }
}

impl fmt::Display for OverlayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Folder: {}", self.folder.display())?;
        writeln!(f, "Show: {}", self.show)?;
        match &self.save_dir {
            Some(dir) => writeln!(f, "Save Directory: {}", dir.display())?,
            None => writeln!(f, "Save Directory: -")?,
        }
        match &self.subset {
            Some(names) => writeln!(f, "Subset: {}", names.len())?,
            None => writeln!(f, "Subset: all")?,
        }
        write!(f, "DPI: {}", self.dpi)
    }
}

/// Splits a comma-separated list of file names. Returns `None` when nothing
/// usable is left, which means "no filter".
pub fn parse_subset(raw: &str) -> Option<HashSet<String>> {
    let names: HashSet<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    if names.is_empty() { None } else { Some(names) }
}
