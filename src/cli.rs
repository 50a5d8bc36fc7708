use std::path::{Path, PathBuf};

use burn::prelude::*;

use crate::device::DevicePlacement;
use crate::error::XorError;
use crate::loss::LossMode;
use crate::model::XorModelConfig;
use crate::training::TrainingConfig;

pub const HELP: &str = "\
Burn XOR

Trains a small feed-forward network on the XOR problem with multi-device
parameter placement, serializes the parameters, then re-queries a freshly
rebuilt graph on the full truth table.

USAGE:
    burn-xor [OPTIONS] [RESTORE_PATH]

When neither --training nor --inference is given, both run: the full
train-save-requery cycle.

ARGS:
    [RESTORE_PATH]          Parameter record to restore before training, in
                            place of freshly initialized values (with or
                            without the recorder's file extension)

FLAGS:
    -h, --help              Show this help message and exit
    -t, --training          Run training (prints one mean-loss line per epoch)
    -i, --inference         Without --training: restore the saved parameters
                            from the artifacts directory and print the labeled
                            predictions

OPTIONS:
    -a, --artifacts-path <PATH>
                            Directory where configurations and the parameter
                            record are saved and loaded. Defaults to a newly
                            created temporary directory.
    -m, --model-config <PATH>
                            Load the model configuration from this file
                            (overrides any config in the artifacts directory)
    -c, --training-config <PATH>
                            Load the training configuration from this file
                            (overrides any config in the artifacts directory)
        --loss-mode <MODE>  `logistic` (labels 1/0, binary log-loss) or
                            `squared` (labels 1/-1, squared distance)
        --epochs <N>        Passes over the truth table
        --hidden-device <PLACEMENT>
                            Placement of the hidden-layer parameters:
                            `cpu`, `gpu`, or `gpu:<index>`
        --output-device <PLACEMENT>
                            Placement of the output-layer parameters

The compute backend is selected at build time via cargo features
(`ndarray` by default, `wgpu` opt-in); placements map onto the devices the
selected backend actually has.
";

pub const MODEL_CONFIG_NAME: &str = "model_config.json";
pub const TRAINING_CONFIG_NAME: &str = "training_config.json";
pub const MODEL_NAME: &str = "xor";

#[derive(Debug)]
pub struct AppArgs {
    pub training: bool,
    pub inference: bool,
    pub restore: Option<PathBuf>,
    pub model_config: Option<PathBuf>,
    pub training_config: Option<PathBuf>,
    pub artifacts_path: PathBuf,
    pub loss_mode: Option<LossMode>,
    pub epochs: Option<usize>,
    pub hidden_device: Option<DevicePlacement>,
    pub output_device: Option<DevicePlacement>,
}

impl AppArgs {
    pub fn parse() -> Result<Self, XorError> {
        let mut pargs = pico_args::Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            println!("{HELP}");
            std::process::exit(0);
        }

        let mut args = AppArgs {
            model_config: pargs.opt_value_from_os_str(["-m", "--model-config"], parse_path)?,
            training_config: pargs.opt_value_from_os_str(["-c", "--training-config"], parse_path)?,
            loss_mode: pargs.opt_value_from_str("--loss-mode")?,
            epochs: pargs.opt_value_from_str("--epochs")?,
            hidden_device: pargs.opt_value_from_str("--hidden-device")?,
            output_device: pargs.opt_value_from_str("--output-device")?,
            artifacts_path: match pargs.opt_value_from_os_str(["-a", "--artifacts-path"], parse_path)? {
                Some(path) => path,
                None => {
                    let tmp = temp_dir::TempDir::with_prefix(concat!(env!("CARGO_PKG_NAME"), "-"))?
                        .dont_delete_on_drop();
                    let path = tmp.path().to_path_buf();
                    log::info!("new artifacts directory: {}", path.display());
                    path
                }
            },
            // must parse flags after values
            training: pargs.contains(["-t", "--training"]),
            inference: pargs.contains(["-i", "--inference"]),
            restore: None,
        };
        args.restore = pargs.opt_free_from_os_str(parse_path)?;

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            return Err(XorError::InvalidArgs(format!(
                "unused arguments: {remaining:?}"
            )));
        }

        // the original behavior: a bare invocation runs the whole cycle
        if !args.training && !args.inference {
            args.training = true;
            args.inference = true;
        }
        Ok(args)
    }

    pub fn create_artifact_dir(&self) -> Result<(), XorError> {
        std::fs::create_dir_all(&self.artifacts_path)?;
        Ok(())
    }

    /// Path of the parameter record inside the artifacts directory, without
    /// the recorder's extension.
    pub fn model_path(&self) -> PathBuf {
        self.artifacts_path.join(MODEL_NAME)
    }

    /// Loads the model config from the explicit override path, else from the
    /// artifacts directory; `None` if neither exists.
    pub fn load_model_config(&self) -> Result<Option<XorModelConfig>, XorError> {
        if let Some(path) = &self.model_config {
            return require_config_file(path).map(Some);
        }
        load_config_file(&self.artifacts_path.join(MODEL_CONFIG_NAME))
    }

    /// Loads the training config from the explicit override path, else from
    /// the artifacts directory; `None` if neither exists.
    pub fn load_training_config(&self) -> Result<Option<TrainingConfig>, XorError> {
        if let Some(path) = &self.training_config {
            return require_config_file(path).map(Some);
        }
        load_config_file(&self.artifacts_path.join(TRAINING_CONFIG_NAME))
    }

    pub fn save_model_config(&self, config: &XorModelConfig) -> Result<(), XorError> {
        save_config_file(&self.artifacts_path.join(MODEL_CONFIG_NAME), config)
    }

    pub fn save_training_config(&self, config: &TrainingConfig) -> Result<(), XorError> {
        save_config_file(&self.artifacts_path.join(TRAINING_CONFIG_NAME), config)
    }
}

fn parse_path(s: &std::ffi::OsStr) -> Result<PathBuf, &'static str> {
    Ok(s.into())
}

fn load_config_file<C: Config>(path: &Path) -> Result<Option<C>, XorError> {
    if !std::fs::exists(path)? {
        return Ok(None);
    }
    log::info!("loading config from {}", path.display());
    C::load(path).map(Some).map_err(|e| XorError::Config {
        path: path.into(),
        reason: e.to_string(),
    })
}

fn require_config_file<C: Config>(path: &Path) -> Result<C, XorError> {
    load_config_file(path)?.ok_or_else(|| XorError::Config {
        path: path.into(),
        reason: "file not found".into(),
    })
}

fn save_config_file<C: Config>(path: &Path, config: &C) -> Result<(), XorError> {
    log::info!("saving config to {}", path.display());
    config.save(path).map_err(|e| XorError::Config {
        path: path.into(),
        reason: e.to_string(),
    })
}
