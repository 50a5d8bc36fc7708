use std::fmt;
use std::str::FromStr;

use crate::error::XorError;

/// Compute target a parameter or input slot is pinned to.
///
/// Placements are parsed and validated once, at configuration time; how a
/// placement maps onto an actual device is up to the selected backend (see
/// [`crate::backend::PlacementBackend`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DevicePlacement {
    /// The host processor.
    Host,
    /// The backend's default accelerator.
    DefaultAccelerator,
    /// An accelerator selected by index.
    Accelerator(usize),
}

impl FromStr for DevicePlacement {
    type Err = XorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        match lower.as_str() {
            "cpu" | "host" => Ok(Self::Host),
            "gpu" => Ok(Self::DefaultAccelerator),
            _ => match lower.strip_prefix("gpu:") {
                Some(index) => index.parse().map(Self::Accelerator).map_err(|_| {
                    XorError::InvalidDevice(format!("`{s}` has a non-numeric accelerator index"))
                }),
                None => Err(XorError::InvalidDevice(format!(
                    "`{s}` is not a known placement (expected `cpu`, `gpu`, or `gpu:<index>`)"
                ))),
            },
        }
    }
}

impl fmt::Display for DevicePlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host => write!(f, "cpu"),
            Self::DefaultAccelerator => write!(f, "gpu"),
            Self::Accelerator(index) => write!(f, "gpu:{index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_placements() {
        assert_eq!("cpu".parse::<DevicePlacement>().unwrap(), DevicePlacement::Host);
        assert_eq!("CPU".parse::<DevicePlacement>().unwrap(), DevicePlacement::Host);
        assert_eq!(
            "gpu".parse::<DevicePlacement>().unwrap(),
            DevicePlacement::DefaultAccelerator
        );
        assert_eq!(
            "GPU:1".parse::<DevicePlacement>().unwrap(),
            DevicePlacement::Accelerator(1)
        );
    }

    #[test]
    fn rejects_unknown_placements() {
        assert!("tpu".parse::<DevicePlacement>().is_err());
        assert!("gpu:one".parse::<DevicePlacement>().is_err());
        assert!("".parse::<DevicePlacement>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for placement in [
            DevicePlacement::Host,
            DevicePlacement::DefaultAccelerator,
            DevicePlacement::Accelerator(3),
        ] {
            let parsed: DevicePlacement = placement.to_string().parse().unwrap();
            assert_eq!(parsed, placement);
        }
    }
}
