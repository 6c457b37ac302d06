use std::collections::BTreeMap;

use flare_trigger_sweep::catalog::{Catalog, FlareRecord};
use flare_trigger_sweep::scores::{Bucket, Membership, aggregate, classify, tally};
use flare_trigger_sweep::trigger::{
    LaunchObservation, ThresholdSpec, TriggerConfig, run_one_threshold,
};

const LEN: usize = 20;

fn flare(id: &str, above_c5: bool, xrsb: Vec<f64>, xrsa: Vec<f64>) -> FlareRecord {
    FlareRecord {
        flare_id: id.to_string(),
        peak_time: format!("{}-peak", id),
        flare_class: (if above_c5 { "M1.0" } else { "C1.0" }).to_string(),
        peak_flux: if above_c5 { 1e-5 } else { 1e-6 },
        background_flux: 1e-7,
        start_to_peak_minutes: 10.0,
        above_c5,
        above_c5_10min: above_c5,
        time: (0..xrsb.len()).map(|i| format!("{}-{}", id, i)).collect(),
        xrsa,
        xrsb,
        derived: BTreeMap::new(),
    }
}

fn bright() -> Vec<f64> {
    (0..LEN).map(|i| if i < 2 { 1e-7 } else { 1e-5 }).collect()
}

fn quiet() -> Vec<f64> {
    vec![1e-7; LEN]
}

fn increasing() -> Vec<f64> {
    (0..LEN).map(|i| 1e-7 + 1e-8 * i as f64).collect()
}

fn decreasing() -> Vec<f64> {
    (0..LEN).map(|i| 1e-6 - 1e-8 * i as f64).collect()
}

fn four_flare_catalog() -> Catalog {
    Catalog::new(vec![
        flare("a", true, bright(), increasing()),
        flare("b", false, quiet(), increasing()),
        flare("c", true, bright(), decreasing()),
        flare("d", false, quiet(), increasing()),
    ])
    .unwrap()
}

fn xrsb_column() -> Vec<String> {
    vec!["xrsb".to_string()]
}

#[test]
fn four_flare_scenario() {
    let catalog = four_flare_catalog();
    let spec = ThresholdSpec::Single(1e-6);
    let obs = run_one_threshold(&catalog, &xrsb_column(), &spec, &TriggerConfig::default()).unwrap();
    assert_eq!(obs.len(), 2);
    assert_eq!(obs[0].flare_id, "a");
    assert_eq!(obs[0].trigger_time, "a-2");
    assert_eq!(obs[1].flare_id, "c");
    assert_eq!(obs[1].cancelled, Some(true));

    let result = aggregate(&catalog, obs, &spec).unwrap();
    let c = result.score.counts;
    assert_eq!(c.tp, 1);
    assert_eq!(c.fn_cancelled, 1);
    assert_eq!(c.fn_, 0);
    assert_eq!(c.tn, 2);
    assert_eq!(c.total(), catalog.len());
    assert_eq!(result.score.precision, 1.0);
    assert_eq!(result.score.recall, 0.5);
    assert_eq!(result.score.trigger_to_launch, 0.5);
    assert_eq!(result.score.thresholds, vec![1e-6]);
    assert_eq!(result.dropped, 0);

    assert_eq!(result.launches.len(), 2);
    let launched = &result.launches[0];
    assert!(launched.observed_c5.both_instruments);
    assert!(launched.above_c5);
    assert_eq!(launched.flare_class, "M1.0");
    assert_eq!(launched.peak_time, "a-peak");
}

#[test]
fn missing_flare_id_is_fatal() {
    let catalog = four_flare_catalog();
    let obs = vec![LaunchObservation {
        flare_number: 0,
        flare_id: "zzz".to_string(),
        trigger_time: "t".to_string(),
        cancelled: Some(false),
        max_foxsi: 1e-5,
        mean_foxsi: 1e-5,
        max_hic: 1e-5,
        mean_hic: 1e-5,
        past_series_end: false,
    }];
    let err = aggregate(&catalog, obs, &ThresholdSpec::Single(1e-6)).unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("zzz"));
    assert!(msg.contains("1e-6"));
}

#[test]
fn no_triggers_gives_nan_scores() {
    let catalog = four_flare_catalog();
    let result = aggregate(&catalog, Vec::new(), &ThresholdSpec::Single(1.0)).unwrap();
    assert!(result.launches.is_empty());
    assert_eq!(result.score.counts.tp, 0);
    assert_eq!(result.score.counts.fn_, 2);
    assert_eq!(result.score.counts.tn, 2);
    assert!(result.score.precision.is_nan());
    assert!(result.score.trigger_to_launch.is_nan());
    assert_eq!(result.score.recall, 0.0);
}

#[test]
fn tail_triggers_are_dropped() {
    let mut late = quiet();
    late[LEN - 2] = 1e-5;
    late[LEN - 1] = 1e-5;
    let catalog = Catalog::new(vec![
        flare("a", true, bright(), increasing()),
        flare("late", false, late, increasing()),
    ])
    .unwrap();
    let spec = ThresholdSpec::Single(1e-6);
    let obs = run_one_threshold(&catalog, &xrsb_column(), &spec, &TriggerConfig::default()).unwrap();
    assert_eq!(obs.len(), 2);

    let result = aggregate(&catalog, obs, &spec).unwrap();
    assert_eq!(result.dropped, 1);
    assert_eq!(result.launches.len(), 1);
    assert_eq!(result.score.counts.tn, 1);
    assert_eq!(result.score.counts.tp, 1);
    assert_eq!(result.score.counts.total(), 2);
}

#[test]
fn nan_gap_in_window_keeps_the_launch() {
    // FOXSI window [11, 17) has a gap; HiC window [13, 19) is intact.
    let mut gappy: Vec<f64> = (0..30).map(|i| if i < 2 { 1e-7 } else { 1e-5 }).collect();
    gappy[11] = f64::NAN;
    let xrsa: Vec<f64> = (0..30).map(|i| 1e-7 + 1e-8 * i as f64).collect();
    let catalog = Catalog::new(vec![flare("gap", true, gappy, xrsa)]).unwrap();
    let spec = ThresholdSpec::Single(1e-6);
    let obs = run_one_threshold(&catalog, &xrsb_column(), &spec, &TriggerConfig::default()).unwrap();

    let result = aggregate(&catalog, obs, &spec).unwrap();
    assert_eq!(result.dropped, 0);
    assert_eq!(result.launches.len(), 1);
    assert!(result.launches[0].max_foxsi.is_nan());
    assert!(!result.launches[0].observed_c5.max_foxsi);
    assert!(result.launches[0].observed_c5.max_hic);
    let c = result.score.counts;
    assert_eq!(c.fp_c5_not_observed, 1);
    assert_eq!(c.fn_, 0);
    assert_eq!(result.score.trigger_to_launch, 1.0);
}

#[test]
fn launched_without_c5_on_both_instruments_is_false_positive() {
    // Reaches the trigger level but never C5.
    let dim: Vec<f64> = (0..LEN).map(|i| if i < 2 { 1e-7 } else { 2e-6 }).collect();
    let catalog = Catalog::new(vec![
        flare("dim", false, dim.clone(), increasing()),
        flare("missed", true, dim, increasing()),
    ])
    .unwrap();
    let spec = ThresholdSpec::Single(1e-6);
    let obs = run_one_threshold(&catalog, &xrsb_column(), &spec, &TriggerConfig::default()).unwrap();
    let result = aggregate(&catalog, obs, &spec).unwrap();
    let c = result.score.counts;
    assert_eq!(c.fp_noc5_not_observed, 1);
    assert_eq!(c.fp_c5_not_observed, 1);
    assert_eq!(result.score.precision, 0.0);
    assert_eq!(result.score.trigger_to_launch, 1.0);
}

#[test]
fn every_membership_combination_has_one_bucket() {
    let mut seen = Vec::new();
    for above in [false, true] {
        for triggered in [false, true] {
            for cancelled in [false, true] {
                for observed in [false, true] {
                    if !triggered && (cancelled || observed) {
                        continue;
                    }
                    if cancelled && observed {
                        continue;
                    }
                    let b = classify(above, triggered, cancelled, observed);
                    if !seen.contains(&b) {
                        seen.push(b);
                    }
                }
            }
        }
    }
    assert_eq!(seen.len(), 8);
    assert!(seen.contains(&Bucket::TpNoC5Observed));
}

#[test]
fn inconsistent_membership_is_rejected() {
    let mut m = Membership::new(vec![true, false]);
    m.launched[1] = true;
    assert!(tally(&m).is_err());

    let mut m = Membership::new(vec![true]);
    m.triggered[0] = true;
    m.launched[0] = true;
    m.cancelled[0] = true;
    assert!(tally(&m).is_err());
}
