use burn::prelude::*;
use burn::record::{FullPrecisionSettings, NamedMpkFileRecorder};

use crate::device::DevicePlacement;

pub type Element = f32;

#[cfg(all(feature = "ndarray", not(feature = "wgpu")))]
pub type MainBackend = burn::backend::NdArray<Element, i32>;
#[cfg(feature = "wgpu")]
pub type MainBackend = burn::backend::wgpu::Wgpu<Element, i32>;

#[cfg(not(any(feature = "ndarray", feature = "wgpu")))]
std::compile_error!("No backend selected. Enable the `ndarray` or `wgpu` feature.");

pub type MainAutoBackend = burn::backend::Autodiff<MainBackend>;

/// File recorder used for parameter persistence.
///
/// The on-disk format is owned by burn; records written through this alias
/// are only round-trippable through the same alias.
pub type ModelRecorder = NamedMpkFileRecorder<FullPrecisionSettings>;

/// Maps a validated [`DevicePlacement`] onto one of the backend's devices.
pub trait PlacementBackend: Backend {
    fn placement_device(placement: DevicePlacement) -> <Self as Backend>::Device;
}

#[cfg(feature = "ndarray")]
impl PlacementBackend for burn::backend::NdArray<Element, i32> {
    // single-device backend: every placement resolves to the host
    fn placement_device(_placement: DevicePlacement) -> <Self as Backend>::Device {
        burn::backend::ndarray::NdArrayDevice::Cpu
    }
}

#[cfg(feature = "wgpu")]
impl PlacementBackend for burn::backend::wgpu::Wgpu<Element, i32> {
    fn placement_device(placement: DevicePlacement) -> <Self as Backend>::Device {
        use burn::backend::wgpu::WgpuDevice;
        match placement {
            DevicePlacement::Host => WgpuDevice::Cpu,
            DevicePlacement::DefaultAccelerator => WgpuDevice::default(),
            DevicePlacement::Accelerator(index) => WgpuDevice::DiscreteGpu(index),
        }
    }
}

impl<B: PlacementBackend> PlacementBackend for burn::backend::Autodiff<B> {
    fn placement_device(placement: DevicePlacement) -> <Self as Backend>::Device {
        B::placement_device(placement)
    }
}
