use burn::optim::SgdConfig;
use burn::prelude::*;

use burn_xor::dataset::QUERY_ROWS;
use burn_xor::inference::predict_row;
use burn_xor::prelude::*;
use burn_xor::training::{self, TrainingConfig};

fn trained(
    mode: LossMode,
    epochs: usize,
    seed: u64,
) -> (XorModel<MainAutoBackend>, Vec<f32>, XorModelConfig) {
    MainAutoBackend::seed(seed);
    let model_config = XorModelConfig::new().with_loss_mode(mode);
    let training_config = TrainingConfig::new(SgdConfig::new()).with_num_epochs(epochs);
    let model = model_config.init::<MainAutoBackend>();
    let (model, epoch_losses) = training::train(&training_config, &model_config, model);
    (model, epoch_losses, model_config)
}

#[test]
fn squared_mode_learns_the_truth_table() {
    let (model, _, config) = trained(LossMode::Squared, 2000, 5);
    for row in QUERY_ROWS {
        let prediction = predict_row(&model, config.loss_mode, row);
        let expected = config.loss_mode.encode(row.label());
        // correct direction, with at least half the target magnitude
        assert!(
            prediction * expected > 0.5,
            "{}: predicted {prediction}, expected near {expected}",
            row.tag()
        );
    }
}

#[test]
fn logistic_mode_learns_the_truth_table() {
    let (model, _, config) = trained(LossMode::Logistic, 2000, 5);
    for row in QUERY_ROWS {
        let prediction = predict_row(&model, config.loss_mode, row);
        if row.label() {
            assert!(
                prediction > 0.6,
                "{}: predicted {prediction}, expected near 1",
                row.tag()
            );
        } else {
            assert!(
                prediction < 0.4,
                "{}: predicted {prediction}, expected near 0",
                row.tag()
            );
        }
    }
}

#[test]
fn epoch_loss_trends_downward() {
    let (_, epoch_losses, _) = trained(LossMode::Squared, 300, 7);
    let head: f32 = epoch_losses[..50].iter().sum::<f32>() / 50.0;
    let tail: f32 = epoch_losses[250..].iter().sum::<f32>() / 50.0;
    assert!(
        tail < head,
        "loss did not trend downward: first-window mean {head}, last-window mean {tail}"
    );
}

#[test]
fn fresh_inference_graph_matches_the_training_graph() {
    use burn::module::AutodiffModule;

    let (model, _, config) = trained(LossMode::Squared, 50, 3);
    let inference_model = model.valid();
    for row in QUERY_ROWS {
        let a = predict_row(&model, config.loss_mode, row);
        let b = predict_row(&inference_model, config.loss_mode, row);
        assert!(
            (a - b).abs() < 1e-6,
            "{}: training graph {a}, rebuilt graph {b}",
            row.tag()
        );
    }
}

#[test]
fn double_negation_is_identity() {
    MainAutoBackend::seed(9);
    let config = XorModelConfig::new();
    let model = config.init::<MainAutoBackend>();

    let input = Tensor::<MainAutoBackend, 2>::from_floats([[-1.0, 1.0]], &model.input_device());
    let prediction = model.predict(input, config.loss_mode);
    let negated_twice = -(-prediction.clone());
    assert_eq!(
        prediction.into_data().to_vec::<f32>().unwrap(),
        negated_twice.into_data().to_vec::<f32>().unwrap(),
    );
}
