use std::path::Path;

use burn::module::AutodiffModule;
use burn::prelude::*;
use burn::tensor::ElementConversion;
use burn::tensor::backend::AutodiffBackend;

use crate::backend::PlacementBackend;
use crate::dataset::{HELD_OUT_ROW, QUERY_ROWS, TruthRow};
use crate::error::XorError;
use crate::loss::LossMode;
use crate::model::{XorModel, XorModelConfig};

/// Scalar prediction for one truth-table row.
pub fn predict_row<B: Backend>(model: &XorModel<B>, mode: LossMode, row: TruthRow) -> f32 {
    let input = Tensor::<B, 2>::from_floats([row.encode(mode)], &model.input_device());
    model.predict(input, mode).into_scalar().elem::<f32>()
}

/// Sanity query on the training graph: the held-out row's prediction is
/// negated twice (numerically the identity, kept to exercise the graph
/// negation operator) and printed.
pub fn held_out_query<B: Backend>(model: &XorModel<B>, mode: LossMode) {
    let input = Tensor::<B, 2>::from_floats([HELD_OUT_ROW.encode(mode)], &model.input_device());
    let z = -(-model.predict(input, mode));
    println!("{}", z.into_scalar().elem::<f32>());
}

/// Queries the model on every truth-table row and prints one labeled line
/// per row.
pub fn query_table<B: Backend>(model: &XorModel<B>, mode: LossMode) {
    for row in QUERY_ROWS {
        println!("{} {}", row.tag(), predict_row(model, mode, row));
    }
}

/// Post-training harness: the held-out sanity query, the parameter save,
/// then a fresh graph rebuilt without autodiff bookkeeping and queried on
/// all 4 rows.
pub fn post_training<AutoB: AutodiffBackend>(
    model: &XorModel<AutoB>,
    mode: LossMode,
    model_path: &Path,
) -> Result<(), XorError> {
    held_out_query(model, mode);
    model.save(model_path)?;

    // drop the training graph; the inner module rebuilds the forward
    // expression from the live parameter values
    let model = model.valid();
    query_table(&model, mode);
    Ok(())
}

/// Standalone inference: restores the saved parameters and prints the
/// labeled predictions from a freshly built graph.
pub fn infer<B: PlacementBackend>(
    model_config: &XorModelConfig,
    model_path: &Path,
) -> Result<(), XorError> {
    let model = model_config.restore::<B>(model_path)?;
    query_table(&model, model_config.loss_mode);
    Ok(())
}
