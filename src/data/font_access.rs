//! Locates a TrueType font for label text.
use std::path::{Path, PathBuf};
use ab_glyph::FontVec;

/// Font files tried, in order, inside every search directory.
const FONT_CANDIDATES: [&str; 8] = [
    "DejaVuSans-Bold.ttf",
    "dejavu/DejaVuSans-Bold.ttf",
    "truetype/dejavu/DejaVuSans-Bold.ttf",
    "LiberationSans-Bold.ttf",
    "truetype/liberation/LiberationSans-Bold.ttf",
    "liberation/LiberationSans-Bold.ttf",
    "Arial Bold.ttf",
    "arialbd.ttf",
];

/// Places a font may live in.
#[derive(Debug)]
pub enum FontAccess {
    User,
    System,
}

impl FontAccess {
    /// Base directories for this location that exist on the current platform.
    pub fn dirs(&self) -> Vec<PathBuf> {
        match self {
            FontAccess::User => dirs::font_dir().into_iter().collect(),
            FontAccess::System => {
                let mut d = vec![
                    PathBuf::from("/usr/share/fonts"),
                    PathBuf::from("/usr/local/share/fonts"),
                    PathBuf::from("/Library/Fonts"),
                    PathBuf::from("/System/Library/Fonts/Supplemental"),
                ];
                if let Some(windir) = std::env::var_os("WINDIR") {
                    d.push(PathBuf::from(windir).join("Fonts"));
                }
                d
            }
        }
    }

    /// First candidate font file found under this location.
    pub fn find(&self) -> Option<PathBuf> {
        self.dirs()
            .iter()
            .flat_map(|dir| FONT_CANDIDATES.iter().map(move |name| dir.join(name)))
            .find(|p| p.is_file())
    }
}

/// Loads `explicit` if given, otherwise the first font found in the user then system locations.
///
/// Returns `None` (after a warning) when nothing usable is found; labels are then drawn without text.
pub fn load_label_font(explicit: Option<&Path>) -> Option<FontVec> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => FontAccess::User.find().or_else(|| FontAccess::System.find()),
    };

    let Some(path) = path else {
        log::warn!("No label font found; pass --font <file.ttf> to draw label text");
        return None;
    };

    match read_font(&path) {
        Ok(font) => {
            log::debug!("Using label font {}", path.display());
            Some(font)
        }
        Err(e) => {
            log::warn!("Failed to load font '{}': {}; labels will have no text", path.display(), e);
            None
        }
    }
}

fn read_font(path: &Path) -> anyhow::Result<FontVec> {
    let bytes = std::fs::read(path)?;
    Ok(FontVec::try_from_vec(bytes)?)
}
