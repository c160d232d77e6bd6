use std::{fmt, path::PathBuf, str::FromStr};

use anyhow::{Result, anyhow};
use filedock_runtime::DIALOG_ENV;
use log::debug;
use rfd::FileDialog;

/// Native file and folder selection.
///
/// Cancelling a dialog is not an error: single pickers return `None`, the
/// multi picker an empty list.
pub trait Picker: Send + Sync {
    fn name(&self) -> &str;
    fn pick_file(&self) -> Result<Option<PathBuf>>;
    fn pick_files(&self) -> Result<Vec<PathBuf>>;
    fn pick_folder(&self) -> Result<Option<PathBuf>>;
}

/// Which picker a host should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    /// Platform dialogs (portal, GTK, AppKit or Win32).
    Native,
    /// No dialogs; every pick reports cancellation.
    Headless,
}

impl FromStr for PickerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" => Ok(PickerKind::Native),
            "none" | "headless" => Ok(PickerKind::Headless),
            other => Err(format!(
                "unknown picker '{other}' (expected native or none)"
            )),
        }
    }
}

impl fmt::Display for PickerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PickerKind::Native => "native",
            PickerKind::Headless => "none",
        })
    }
}

/// Opens the platform's file dialogs through `rfd`.
///
/// Each pick blocks the calling thread until the dialog closes.
#[derive(Debug, Clone, Default)]
pub struct NativePicker {
    title: Option<String>,
    directory: Option<PathBuf>,
}

impl NativePicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Folder the dialogs open in.
    pub fn with_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directory = Some(dir.into());
        self
    }

    fn dialog(&self) -> FileDialog {
        let mut dialog = FileDialog::new();
        if let Some(title) = &self.title {
            dialog = dialog.set_title(title);
        }
        if let Some(dir) = &self.directory {
            dialog = dialog.set_directory(dir);
        }
        dialog
    }
}

impl Picker for NativePicker {
    fn name(&self) -> &str {
        "native"
    }

    fn pick_file(&self) -> Result<Option<PathBuf>> {
        debug!("[picker] pick file");
        Ok(self.dialog().pick_file())
    }

    fn pick_files(&self) -> Result<Vec<PathBuf>> {
        debug!("[picker] pick files");
        Ok(self.dialog().pick_files().unwrap_or_default())
    }

    fn pick_folder(&self) -> Result<Option<PathBuf>> {
        debug!("[picker] pick folder");
        Ok(self.dialog().pick_folder())
    }
}

/// Picker for hosts without a display: every dialog is "cancelled".
#[derive(Debug, Default)]
pub struct HeadlessPicker;

impl Picker for HeadlessPicker {
    fn name(&self) -> &str {
        "none"
    }

    fn pick_file(&self) -> Result<Option<PathBuf>> {
        Ok(None)
    }

    fn pick_files(&self) -> Result<Vec<PathBuf>> {
        Ok(Vec::new())
    }

    fn pick_folder(&self) -> Result<Option<PathBuf>> {
        Ok(None)
    }
}

pub fn picker_for(kind: PickerKind) -> Box<dyn Picker> {
    match kind {
        PickerKind::Native => Box::new(NativePicker::new().with_title("filedock")),
        PickerKind::Headless => Box::new(HeadlessPicker),
    }
}

/// Picker named by the environment, else native when a display is present.
fn kind_from_env() -> Result<PickerKind> {
    if let Ok(value) = std::env::var(DIALOG_ENV)
        && !value.trim().is_empty()
    {
        return value.parse().map_err(|e: String| anyhow!("{DIALOG_ENV}: {e}"));
    }

    if cfg!(any(target_os = "macos", windows)) {
        return Ok(PickerKind::Native);
    }

    let has_display = ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|v| !v.is_empty()));

    Ok(if has_display {
        PickerKind::Native
    } else {
        PickerKind::Headless
    })
}

pub fn picker_from_env() -> Result<Box<dyn Picker>> {
    Ok(picker_for(kind_from_env()?))
}

#[cfg(test)]
#[path = "picker_tests.rs"]
mod tests;
