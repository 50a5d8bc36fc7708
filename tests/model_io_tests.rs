use burn::prelude::*;

use burn_xor::dataset::QUERY_ROWS;
use burn_xor::inference::predict_row;
use burn_xor::prelude::*;

#[test]
fn record_round_trip_reproduces_predictions() {
    MainAutoBackend::seed(11);
    let config = XorModelConfig::new();
    let model = config.init::<MainAutoBackend>();

    let dir = temp_dir::TempDir::new().unwrap();
    let path = dir.path().join("xor");
    model.save(&path).unwrap();

    let restored = config.restore::<MainAutoBackend>(&path).unwrap();
    for row in QUERY_ROWS {
        let a = predict_row(&model, config.loss_mode, row);
        let b = predict_row(&restored, config.loss_mode, row);
        assert!(
            (a - b).abs() < 1e-6,
            "{}: saved {a}, restored {b}",
            row.tag()
        );
    }
}

#[test]
fn restore_accepts_paths_with_the_recorder_extension() {
    MainAutoBackend::seed(13);
    let config = XorModelConfig::new();
    let model = config.init::<MainAutoBackend>();

    let dir = temp_dir::TempDir::new().unwrap();
    model.save(&dir.path().join("xor")).unwrap();

    let extension =
        <ModelRecorder as burn::record::FileRecorder<MainAutoBackend>>::file_extension();
    let explicit = dir.path().join("xor").with_extension(extension);
    assert!(config.restore::<MainAutoBackend>(&explicit).is_ok());
}

#[test]
fn mismatched_shapes_are_rejected() {
    MainAutoBackend::seed(17);
    let config = XorModelConfig::new().with_hidden_size(8);
    let model = config.init::<MainAutoBackend>();

    let dir = temp_dir::TempDir::new().unwrap();
    let path = dir.path().join("xor");
    model.save(&path).unwrap();

    let narrower = XorModelConfig::new().with_hidden_size(4);
    assert!(narrower.restore::<MainAutoBackend>(&path).is_err());
}

#[test]
fn missing_record_is_a_descriptive_error() {
    let config = XorModelConfig::new();
    let dir = temp_dir::TempDir::new().unwrap();
    let err = config
        .restore::<MainAutoBackend>(&dir.path().join("absent"))
        .unwrap_err();
    assert!(matches!(err, XorError::Restore { .. }), "got {err}");
}
