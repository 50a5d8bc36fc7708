use burn::optim::SgdConfig;
use burn::tensor::backend::AutodiffBackend;

use burn_xor::cli::AppArgs;
use burn_xor::prelude::*;
use burn_xor::{inference, training};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), XorError> {
    let app_args = AppArgs::parse()?;
    launch::<MainBackend, MainAutoBackend>(&app_args)
}

fn launch<B, AutoB>(app_args: &AppArgs) -> Result<(), XorError>
where
    B: PlacementBackend,
    AutoB: AutodiffBackend + PlacementBackend,
{
    app_args.create_artifact_dir()?;

    // setup model and training configs
    let mut model_config = app_args
        .load_model_config()?
        .unwrap_or_else(XorModelConfig::new);
    let mut training_config = app_args
        .load_training_config()?
        .unwrap_or_else(|| TrainingConfig::new(SgdConfig::new()));
    if let Some(mode) = app_args.loss_mode {
        model_config = model_config.with_loss_mode(mode);
    }
    if let Some(placement) = app_args.hidden_device {
        model_config = model_config.with_hidden(placement);
    }
    if let Some(placement) = app_args.output_device {
        model_config = model_config.with_output(placement);
    }
    if let Some(epochs) = app_args.epochs {
        training_config = training_config.with_num_epochs(epochs);
    }
    // save configs
    app_args.save_model_config(&model_config)?;
    app_args.save_training_config(&training_config)?;

    if app_args.training {
        let _training_device = AutoB::placement_device(model_config.hidden);
        AutoB::seed(training_config.seed);
        let model = match &app_args.restore {
            Some(path) => model_config.restore::<AutoB>(path)?,
            None => model_config.init::<AutoB>(),
        };
        let (model, _epoch_losses) = training::train(&training_config, &model_config, model);
        inference::post_training(&model, model_config.loss_mode, &app_args.model_path())?;
    } else if app_args.inference {
        let record = app_args
            .restore
            .clone()
            .unwrap_or_else(|| app_args.model_path());
        inference::infer::<B>(&model_config, &record)?;
    }
    Ok(())
}
