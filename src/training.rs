use burn::optim::{GradientsParams, Optimizer, SgdConfig};
use burn::prelude::*;
use burn::tensor::ElementConversion;
use burn::tensor::backend::AutodiffBackend;

use crate::dataset::TRAIN_ROWS;
use crate::model::{XorModel, XorModelConfig};

/// Configuration of the training run.
#[derive(Config)]
pub struct TrainingConfig {
    pub optimizer: SgdConfig,
    /// Passes over the 4-row truth table.
    #[config(default = 2000)]
    pub num_epochs: usize,
    #[config(default = 0.1)]
    pub lr: f64,
    #[config(default = 0)]
    pub seed: u64,
}

/// Runs the fixed-iteration training loop, printing the mean loss once per
/// epoch.
///
/// Each of the 4 truth-table rows is a full step: bind the input and target
/// slots, evaluate the loss, backpropagate, apply one optimizer update.
/// Returns the trained model together with the per-epoch mean losses.
pub fn train<AutoB: AutodiffBackend>(
    config: &TrainingConfig,
    model_config: &XorModelConfig,
    mut model: XorModel<AutoB>,
) -> (XorModel<AutoB>, Vec<f32>) {
    let mut optim = config.optimizer.init::<AutoB, XorModel<AutoB>>();
    let mode = model_config.loss_mode;
    let input_device = model.input_device();
    let target_device = model.output_device();

    let mut epoch_losses = Vec::with_capacity(config.num_epochs);
    for _epoch in 0..config.num_epochs {
        let mut mloss = 0.0f32;
        for row in TRAIN_ROWS {
            let input = Tensor::<AutoB, 2>::from_floats([row.encode(mode)], &input_device);
            let target =
                Tensor::<AutoB, 2>::from_floats([[row.encoded_label(mode)]], &target_device);

            let prediction = model.predict(input, mode);
            let loss = mode.loss(prediction, target);
            mloss += loss.clone().into_scalar().elem::<f32>();

            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optim.step(config.lr, model, grads);
        }
        let mloss = mloss / TRAIN_ROWS.len() as f32;
        println!("loss: {mloss:.9}");
        epoch_losses.push(mloss);
    }
    (model, epoch_losses)
}
