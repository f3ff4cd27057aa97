use super::types::{ActiveSelf, ColorDrivers, OrientationDrive, RawImage, SectionToggle};
use bevy_ecs::prelude::Query;

/// Section visibility follows the toggle. The toggle is the only writer of a
/// section's `ActiveSelf` once the binding exists.
pub fn sys_drive_section_visibility(
    toggles: Query<&SectionToggle>,
    mut actives: Query<&mut ActiveSelf>,
) {
    for toggle in toggles.iter() {
        if let Ok(mut active) = actives.get_mut(toggle.section_root) {
            active.0 = toggle.expanded;
        }
    }
}

/// Icon orientation follows the drive source's active state.
pub fn sys_drive_icon_orientation(
    mut icons: Query<(&OrientationDrive, &mut RawImage)>,
    actives: Query<&ActiveSelf>,
) {
    for (drive, mut raw) in icons.iter_mut() {
        let active = actives.get(drive.source).map(|a| a.0).unwrap_or(true);
        raw.orientation = if active { drive.active_value } else { drive.inactive_value };
    }
}

/// Targeted color drives push their color into the target's raw-image tint.
pub fn sys_drive_color_targets(drivers: Query<&ColorDrivers>, mut raws: Query<&mut RawImage>) {
    for set in drivers.iter() {
        for drive in &set.0 {
            if let Some(target) = drive.target {
                if let Ok(mut raw) = raws.get_mut(target) {
                    raw.tint = drive.color;
                }
            }
        }
    }
}
