use std::path::Path;

use burn::module::Param;
use burn::nn::Initializer;
use burn::prelude::*;
use burn::record::FileRecorder;
use burn::tensor::activation;

use crate::backend::{ModelRecorder, PlacementBackend};
use crate::device::DevicePlacement;
use crate::error::XorError;
use crate::loss::LossMode;

/// Configuration of the XOR network and its device placements.
#[derive(Config, Debug)]
pub struct XorModelConfig {
    /// Width of the tanh hidden layer.
    #[config(default = 8)]
    pub hidden_size: usize,
    /// Placement of the hidden-layer parameters and of the input slot.
    #[config(default = "DevicePlacement::DefaultAccelerator")]
    pub hidden: DevicePlacement,
    /// Placement of the output-layer parameters and of the target slot.
    #[config(default = "DevicePlacement::Host")]
    pub output: DevicePlacement,
    /// Output transform and label encoding used for training and inference.
    #[config(default = "LossMode::Squared")]
    pub loss_mode: LossMode,
}

impl XorModelConfig {
    /// Returns the initialized model, each parameter allocated on its
    /// configured placement.
    pub fn init<B: PlacementBackend>(&self) -> XorModel<B> {
        let hidden_device = B::placement_device(self.hidden);
        let output_device = B::placement_device(self.output);
        let initializer = Initializer::KaimingUniform {
            gain: 1.0 / 3.0f64.sqrt(),
            fan_out_only: false,
        };
        XorModel {
            w: initializer.init_with([2, self.hidden_size], Some(2), None, &hidden_device),
            b: initializer.init_with([self.hidden_size], Some(2), None, &hidden_device),
            v: initializer.init_with(
                [self.hidden_size, 1],
                Some(self.hidden_size),
                None,
                &output_device,
            ),
            a: initializer.init_with([1], Some(self.hidden_size), None, &output_device),
        }
    }

    /// Restores a model from a record written by [`XorModel::save`].
    ///
    /// The record is decoded into a freshly allocated model, each parameter
    /// is pinned back onto its configured placement (the record carries no
    /// affinity), and every shape is checked against this config.
    pub fn restore<B: PlacementBackend>(&self, path: &Path) -> Result<XorModel<B>, XorError> {
        let extension = <ModelRecorder as FileRecorder<B>>::file_extension();
        let file = path.with_extension(extension);
        if !std::fs::exists(&file)? {
            return Err(XorError::Restore {
                path: file,
                reason: "file not found".into(),
            });
        }
        log::info!("restoring parameters from {}", file.display());

        let output_device = B::placement_device(self.output);
        let loaded = self
            .init::<B>()
            .load_file(path.to_path_buf(), &ModelRecorder::new(), &output_device)
            .map_err(|e| XorError::Restore {
                path: file,
                reason: e.to_string(),
            })?;

        let hidden_device = B::placement_device(self.hidden);
        let model = XorModel {
            w: loaded.w.map(|t| t.to_device(&hidden_device)),
            b: loaded.b.map(|t| t.to_device(&hidden_device)),
            v: loaded.v.map(|t| t.to_device(&output_device)),
            a: loaded.a.map(|t| t.to_device(&output_device)),
        };
        model.check_shapes(self.hidden_size)?;
        Ok(model)
    }
}

/// The four learnable tensors of the XOR network.
///
/// `w`/`b` live on the hidden placement, `v`/`a` on the output placement;
/// the forward pass moves the hidden activations across.
#[derive(Module, Debug)]
pub struct XorModel<B: Backend> {
    pub w: Param<Tensor<B, 2>>,
    pub b: Param<Tensor<B, 1>>,
    pub v: Param<Tensor<B, 2>>,
    pub a: Param<Tensor<B, 1>>,
}

impl<B: Backend> XorModel<B> {
    /// Builds the forward expression for a batch of encoded input pairs.
    ///
    /// # Shapes
    ///
    /// - input: `[batch_size, 2]`, on the input device
    /// - output: `[batch_size, 1]`, on the output device
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        let hidden = activation::tanh(input.matmul(self.w.val()) + self.b.val().unsqueeze());
        let hidden = hidden.to_device(&self.output_device());
        hidden.matmul(self.v.val()) + self.a.val().unsqueeze()
    }

    /// Forward pass with the mode's output transform applied.
    pub fn predict(&self, input: Tensor<B, 2>, mode: LossMode) -> Tensor<B, 2> {
        mode.transform(self.forward(input))
    }

    /// Device input slots must be materialized on.
    pub fn input_device(&self) -> B::Device {
        self.w.device()
    }

    /// Device target slots must be materialized on.
    pub fn output_device(&self) -> B::Device {
        self.a.device()
    }

    /// Serializes all parameters to `path` (the recorder's extension is
    /// appended by burn).
    pub fn save(&self, path: &Path) -> Result<(), XorError> {
        log::info!("saving parameters to {}", path.display());
        self.clone()
            .save_file(path.to_path_buf(), &ModelRecorder::new())?;
        Ok(())
    }

    fn check_shapes(&self, hidden_size: usize) -> Result<(), XorError> {
        let checks: [(&'static str, Vec<usize>, Vec<usize>); 4] = [
            ("w", vec![2, hidden_size], self.w.dims().to_vec()),
            ("b", vec![hidden_size], self.b.dims().to_vec()),
            ("v", vec![hidden_size, 1], self.v.dims().to_vec()),
            ("a", vec![1], self.a.dims().to_vec()),
        ];
        for (param, expected, found) in checks {
            if expected != found {
                return Err(XorError::ShapeMismatch {
                    param,
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }
}
