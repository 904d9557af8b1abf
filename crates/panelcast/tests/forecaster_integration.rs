//! Integration tests for the full fit/predict/persist pipeline.
//!
//! These tests drive the facade end-to-end with the deterministic
//! SeasonalNaive reference engine, so expected outputs are exact.

use panelcast::prelude::*;

/// Build a panel with one block of rows per entity, an integer step column,
/// and the given target values per entity.
fn panel(entities: &[(&str, Vec<f32>)]) -> PanelFrame {
    let mut ids = Vec::new();
    let mut steps = Vec::new();
    let mut values = Vec::new();
    for (id, series) in entities {
        for (t, &value) in series.iter().enumerate() {
            ids.push(id.to_string());
            steps.push(t as i64);
            values.push(value);
        }
    }
    PanelFrame::new(vec![
        ("store".to_string(), Column::Str(ids)),
        ("t".to_string(), Column::Int(steps)),
        ("sales".to_string(), Column::Float(values)),
    ])
    .unwrap()
}

fn index_schema(horizon: usize) -> ForecastingSchema {
    ForecastingSchema::new("store", "t", TimeColumnKind::Index, "sales", horizon)
}

#[test]
fn test_fit_predict_two_entities() {
    let a_series: Vec<f32> = (1..=10).map(|v| v as f32).collect();
    let b_series: Vec<f32> = (1..=10).map(|v| (v * 20) as f32).collect();
    let mut history = panel(&[("A", a_series), ("B", b_series)]);

    // Two test rows per entity, matching the horizon, in training order.
    let mut test = panel(&[("A", vec![0.0, 0.0]), ("B", vec![0.0, 0.0])]);

    let forecaster = train_forecaster::<SeasonalNaive>(
        &mut history,
        index_schema(2),
        ForecasterConfig::default(),
        None,
    )
    .unwrap();
    assert!(forecaster.is_fitted());
    assert_eq!(
        forecaster.entity_ids().unwrap(),
        &["A".to_string(), "B".to_string()]
    );

    forecaster.predict(&mut test, "prediction").unwrap();
    let predictions = test.float_values("prediction").unwrap();
    assert_eq!(predictions.len(), 4);

    // Last-value carry-forward, de-scaled back to original units: rows 0-1
    // are A's forecast, rows 2-3 are B's.
    for &p in &predictions[..2] {
        assert!((p - 10.0).abs() < 1e-3, "got {p}");
    }
    for &p in &predictions[2..] {
        assert!((p - 200.0).abs() < 1e-3, "got {p}");
    }
}

#[test]
fn test_predict_before_fit() {
    let forecaster =
        Forecaster::<SeasonalNaive>::new(index_schema(2), ForecasterConfig::default()).unwrap();
    let mut test = panel(&[("A", vec![0.0, 0.0])]);
    let err = forecaster.predict(&mut test, "prediction").unwrap_err();
    assert!(matches!(err, ForecastError::NotFitted));
}

#[test]
fn test_save_before_fit() {
    let forecaster =
        Forecaster::<SeasonalNaive>::new(index_schema(2), ForecasterConfig::default()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let err = forecaster.save(dir.path()).unwrap_err();
    assert!(matches!(err, ForecastError::NotFitted));
}

#[test]
fn test_prediction_length_mismatch() {
    let mut history = panel(&[("A", vec![1.0, 2.0, 3.0]), ("B", vec![4.0, 5.0, 6.0])]);
    let forecaster = train_forecaster::<SeasonalNaive>(
        &mut history,
        index_schema(2),
        ForecasterConfig::default(),
        None,
    )
    .unwrap();

    // Three rows per entity for a horizon of two.
    let mut test = panel(&[("A", vec![0.0; 3]), ("B", vec![0.0; 3])]);
    let err = forecaster.predict(&mut test, "prediction").unwrap_err();
    assert!(matches!(
        err,
        ForecastError::Data(panelcast_data::DataError::SchemaMismatch(_))
    ));
}

#[test]
fn test_history_ratio_bounds_training_window() {
    let mut history = panel(&[("A", (1..=30).map(|v| v as f32).collect())]);
    let config = ForecasterConfig {
        history_forecast_ratio: Some(3),
        ..Default::default()
    };
    let forecaster =
        train_forecaster::<SeasonalNaive>(&mut history, index_schema(2), config, None).unwrap();
    assert_eq!(forecaster.history_length(), Some(6));

    // Last-value forecast still sees the chronological tail.
    let mut test = panel(&[("A", vec![0.0, 0.0])]);
    forecaster.predict(&mut test, "prediction").unwrap();
    let predictions = test.float_values("prediction").unwrap();
    assert!((predictions[0] - 30.0).abs() < 1e-3);
}

#[test]
fn test_single_past_covariate_with_exogenous() {
    let mut history = PanelFrame::new(vec![
        (
            "store".to_string(),
            Column::Str(vec!["A".into(), "A".into(), "A".into()]),
        ),
        ("t".to_string(), Column::Int(vec![0, 1, 2])),
        ("sales".to_string(), Column::Float(vec![1.0, 2.0, 3.0])),
        ("price".to_string(), Column::Float(vec![9.0, 9.5, 10.0])),
    ])
    .unwrap();

    let schema = index_schema(1).with_past_covariates(vec!["price".to_string()]);
    let config = ForecasterConfig {
        use_exogenous: true,
        ..Default::default()
    };
    let forecaster =
        train_forecaster::<SeasonalNaive>(&mut history, schema, config, None).unwrap();

    let mut test = panel(&[("A", vec![0.0])]);
    forecaster.predict(&mut test, "prediction").unwrap();
    assert!((test.float_values("prediction").unwrap()[0] - 3.0).abs() < 1e-3);
}

#[test]
fn test_calendar_covariates_round_trip() {
    let dates: Vec<String> = (1..=9).map(|d| format!("2024-04-0{d}")).collect();
    let mut history = PanelFrame::new(vec![
        ("store".to_string(), Column::Str(vec!["A".into(); 9])),
        ("date".to_string(), Column::Str(dates)),
        (
            "sales".to_string(),
            Column::Float((1..=9).map(|v| v as f32).collect()),
        ),
    ])
    .unwrap();
    let mut test = PanelFrame::new(vec![
        ("store".to_string(), Column::Str(vec!["A".into(); 2])),
        (
            "date".to_string(),
            Column::Str(vec!["2024-04-10".into(), "2024-04-11".into()]),
        ),
    ])
    .unwrap();

    let schema = ForecastingSchema::new("store", "date", TimeColumnKind::Date, "sales", 2);
    let forecaster = train_forecaster::<SeasonalNaive>(
        &mut history,
        schema,
        ForecasterConfig::default(),
        Some(&mut test),
    )
    .unwrap();

    // Derived columns are visible on both panels before segmentation.
    assert!(history.has_column("date_year"));
    assert!(history.has_column("date_month"));
    assert!(test.has_column("date_year"));
    assert!(test.has_column("date_month"));

    forecaster.predict(&mut test, "prediction").unwrap();
    let predictions = test.float_values("prediction").unwrap();
    assert_eq!(predictions.len(), 2);
    assert!((predictions[0] - 9.0).abs() < 1e-3);
}

#[test]
fn test_save_load_predict_round_trip() {
    let mut history = panel(&[
        ("A", (1..=10).map(|v| v as f32).collect()),
        ("B", (1..=10).map(|v| (v * 3) as f32).collect()),
    ]);
    let forecaster = train_forecaster::<SeasonalNaive>(
        &mut history,
        index_schema(2),
        ForecasterConfig::default(),
        None,
    )
    .unwrap();

    let mut before = panel(&[("A", vec![0.0, 0.0]), ("B", vec![0.0, 0.0])]);
    forecaster.predict(&mut before, "prediction").unwrap();

    let dir = tempfile::tempdir().unwrap();
    save_forecaster(&forecaster, dir.path()).unwrap();
    let restored = load_forecaster::<SeasonalNaive>(dir.path()).unwrap();
    assert!(restored.is_fitted());
    assert_eq!(restored.entity_ids(), forecaster.entity_ids());

    let mut after = panel(&[("A", vec![0.0, 0.0]), ("B", vec![0.0, 0.0])]);
    restored.predict(&mut after, "prediction").unwrap();

    assert_eq!(
        before.float_values("prediction").unwrap(),
        after.float_values("prediction").unwrap()
    );
}
