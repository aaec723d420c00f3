use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use crate::common::OverlayCanvas;
use crate::error::OverlayError;
use crate::Result;

/// Shows a canvas in the platform image viewer and waits for the user.
pub trait OverlayViewer {
    fn show(&mut self, canvas: &OverlayCanvas) -> Result<()>;
}

/// Opens a temporary PNG with the system opener, then blocks until Enter is pressed.
#[derive(Debug, Default)]
pub struct SystemViewer {
    shown: usize,
}

impl SystemViewer {
    pub fn new() -> Self {
        Self::default()
    }

    fn temp_path(&self) -> PathBuf {
        std::env::temp_dir().join(format!("coco_overlay_{}_{}.png", std::process::id(), self.shown))
    }
}

impl OverlayViewer for SystemViewer {
    fn show(&mut self, canvas: &OverlayCanvas) -> Result<()> {
        let path = self.temp_path();
        self.shown += 1;

        canvas.save_png(&path)?;
        let opened = open_with_system_viewer(&path);

        let waited = match &opened {
            Ok(()) => wait_for_dismiss(&canvas.caption),
            Err(_) => Ok(()),
        };

        if let Err(e) = std::fs::remove_file(&path) {
            log::debug!("Could not remove {}: {}", path.display(), e);
        }

        opened.and(waited)
    }
}

fn open_with_system_viewer(path: &Path) -> Result<()> {
    let program = if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };

    Command::new(program)
        .arg(path)
        .spawn()
        .map(|_| ())
        .map_err(|e| OverlayError::io(path, e))
}

fn wait_for_dismiss(caption: &str) -> Result<()> {
    prompt_and_wait(&mut io::stdout().lock(), &mut io::stdin().lock(), caption)
}

/// Prints the caption prompt and blocks until a line is read. A prompt that
/// cannot be written is only logged; stdin errors are returned.
fn prompt_and_wait(out: &mut impl Write, input: &mut impl BufRead, caption: &str) -> Result<()> {
    if let Err(e) = write!(out, "{}  [press Enter for the next image] ", caption).and_then(|_| out.flush()) {
        log::debug!("Could not write the viewer prompt: {}", e);
    }

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| OverlayError::io("<stdin>", e))?;
    Ok(())
}
