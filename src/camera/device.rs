//! Camera enumeration for `list-cameras` and `--camera` validation.

use nokhwa::query;
use nokhwa::utils::{ApiBackend, CameraIndex};

use super::types::{CameraError, CameraInfo};

/// Cameras the kiosk can select with `--camera N`.
///
/// No cameras is an empty list, not an error.
pub fn list_devices() -> Result<Vec<CameraInfo>, CameraError> {
    let devices = query(ApiBackend::Auto).map_err(|e| CameraError::QueryFailed(e.to_string()))?;
    Ok(devices.iter().filter_map(selectable).collect())
}

/// Map a backend entry to a selectable camera.
///
/// Backends that name devices by string (`CameraIndex::String`) can't be
/// picked by number, so those entries are skipped.
fn selectable(device: &nokhwa::utils::CameraInfo) -> Option<CameraInfo> {
    match device.index() {
        CameraIndex::Index(index) => Some(CameraInfo {
            index: *index,
            name: device.human_name(),
            description: device.description().to_string(),
        }),
        CameraIndex::String(id) => {
            log::warn!(
                "Skipping camera '{}': backend id '{}' is not numeric",
                device.human_name(),
                id
            );
            None
        }
    }
}

/// Find the camera with `index` in `devices`.
pub fn find_device(devices: &[CameraInfo], index: u32) -> Result<&CameraInfo, CameraError> {
    devices
        .iter()
        .find(|d| d.index == index)
        .ok_or(CameraError::DeviceNotFound(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend_entry(name: &str, index: CameraIndex) -> nokhwa::utils::CameraInfo {
        nokhwa::utils::CameraInfo::new(name, "USB", "", index)
    }

    #[test]
    fn test_numeric_index_is_kept() {
        let info = selectable(&backend_entry("Front Desk", CameraIndex::Index(2))).unwrap();
        assert_eq!(info.index, 2);
        assert_eq!(info.name, "Front Desk");
        assert_eq!(info.description, "USB");
    }

    #[test]
    fn test_string_index_is_skipped_not_zeroed() {
        let entries = [
            backend_entry("Named", CameraIndex::String("usb-0000:00:14.0-1".to_string())),
            backend_entry("Counter", CameraIndex::Index(1)),
        ];
        let devices: Vec<_> = entries.iter().filter_map(selectable).collect();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].index, 1);
        assert!(matches!(find_device(&devices, 0), Err(CameraError::DeviceNotFound(0))));
    }

    #[test]
    fn test_find_device() {
        let devices = vec![CameraInfo {
            index: 3,
            name: "Counter".to_string(),
            description: "USB".to_string(),
        }];
        assert_eq!(find_device(&devices, 3).unwrap().name, "Counter");
        assert!(matches!(find_device(&devices, 0), Err(CameraError::DeviceNotFound(0))));
    }

    #[test]
    fn test_list_devices_returns_or_reports_query_failure() {
        // Hosts without a camera backend report QueryFailed instead
        match list_devices() {
            Ok(devices) => {
                // Every listed camera is selectable by a distinct number
                let mut seen = std::collections::HashSet::new();
                assert!(devices.iter().all(|d| seen.insert(d.index)));
            }
            Err(CameraError::QueryFailed(_)) => {}
            Err(other) => panic!("Unexpected error: {}", other),
        }
    }
}
