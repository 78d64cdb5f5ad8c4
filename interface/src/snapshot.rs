//! SAVE and PRINT: both work on a screenshot of the current frame and never
//! look at the circuit itself.

use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local};
use egui::ColorImage;
use log::info;

/// Attached to a screenshot request so the reply can be routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotKind {
    Save,
    Print,
}

pub fn export_name(at: DateTime<Local>) -> String {
    format!("diagram_{}.png", at.format("%Y%m%d_%H%M%S"))
}

pub fn save_diagram(image: &ColorImage, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(export_name(Local::now()));
    write_png(image, &path)?;
    info!("diagram saved as {}", path.display());
    Ok(path)
}

/// Writes the frame to a temporary PNG that outlives the app and hands it
/// to the system viewer, which is where printing happens.
pub fn print_diagram(image: &ColorImage) -> Result<PathBuf> {
    let tmp = tempfile::Builder::new()
        .prefix("diagram_")
        .suffix(".png")
        .tempfile()
        .context("creating temporary image")?;
    let (_, path) = tmp.keep().context("keeping temporary image")?;
    write_png(image, &path)?;
    open_in_viewer(&path)?;
    info!("opened {} in the default viewer for printing", path.display());
    Ok(path)
}

fn write_png(image: &ColorImage, path: &Path) -> Result<()> {
    let [w, h] = image.size;
    let raw: Vec<u8> = image.pixels.iter().flat_map(|c| c.to_array()).collect();
    let buf = image::RgbaImage::from_raw(w as u32, h as u32, raw)
        .ok_or_else(|| anyhow!("screenshot buffer doesn't match its {}x{} size", w, h))?;
    buf.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))
}

fn open_in_viewer(path: &Path) -> Result<()> {
    let mut cmd = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };
    cmd.arg(path)
        .spawn()
        .with_context(|| format!("launching a viewer for {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use egui::Color32;

    use super::*;

    #[test]
    fn timestamped_name() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(export_name(at), "diagram_20240309_070501.png");
    }

    #[test]
    fn save_creates_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("saved_diagrams");
        let img = ColorImage::new([4, 3], Color32::RED);
        let path = save_diagram(&img, &target).unwrap();
        assert!(path.starts_with(&target));
        let back = image::open(&path).unwrap().to_rgba8();
        assert_eq!(back.dimensions(), (4, 3));
        assert_eq!(back.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }
}
