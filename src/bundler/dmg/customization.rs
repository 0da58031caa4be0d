//! Finder presentation options.
//!
//! On macOS these are applied by mounting the image and driving Finder with
//! AppleScript, then blessing the volume. None of that exists on a Linux
//! host, so this step only reports which options were requested and could
//! not be honored. The image content is unaffected.

use crate::bundler::settings::{DmgSettings, Settings};

/// Describes every requested presentation option that is not applied.
pub fn unapplied_options(dmg: &DmgSettings) -> Vec<String> {
    let mut ignored = Vec::new();

    if let Some(pos) = dmg.window_position {
        ignored.push(format!("--window-pos {} {}", pos.x, pos.y));
    }
    if let Some(size) = dmg.window_size {
        ignored.push(format!("--window-size {} {}", size.width, size.height));
    }
    if let Some(size) = dmg.text_size {
        ignored.push(format!("--text-size {}", size));
    }
    if let Some(size) = dmg.icon_size {
        ignored.push(format!("--icon-size {}", size));
    }
    for icon in &dmg.icons {
        ignored.push(format!(
            "--icon {} {} {}",
            icon.file, icon.position.x, icon.position.y
        ));
    }
    for file in &dmg.hide_extensions {
        ignored.push(format!("--hide-extension {}", file));
    }
    if let Some(pos) = dmg.app_drop_link {
        ignored.push(format!("--app-drop-link position {}", pos));
    }
    if let Some(pos) = dmg.ql_drop_link {
        ignored.push(format!("--ql-drop-link position {}", pos));
    }
    for added in &dmg.added_files {
        ignored.push(format!(
            "--add-file {} position {}",
            added.name.display(),
            added.position
        ));
    }
    if let Some(eula) = &dmg.eula {
        ignored.push(format!("--eula {}", eula.display()));
    }
    if dmg.bless {
        ignored.push("--bless".to_string());
    }

    ignored
}

/// Applies Finder presentation settings to the staged volume.
///
/// Returns the options that were requested but not applied so the caller
/// can surface them.
pub fn apply_finder_layout(settings: &Settings) -> Vec<String> {
    let dmg = settings.dmg_settings();

    if dmg.sandbox_safe {
        log::info!("Sandbox-safe mode: skipping Finder scripting");
    } else if dmg.skip_jenkins {
        log::info!("Skipping Finder prettifying step");
    }

    if dmg.skip_internet_enable {
        log::debug!("--no-internet-enable has no effect on modern disk images");
    }

    let ignored = unapplied_options(dmg);
    for option in &ignored {
        log::warn!(
            "{} is not applied when building '{}' on this platform",
            option,
            settings.volume_name()
        );
    }
    ignored
}
