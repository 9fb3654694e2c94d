use print_predictor::{
    Axis, GCodeFile, PredictError, Predictor, PredictorProfile, SequenceFault, predict_file_duration,
    remaining_seconds,
};

const CURA_JOB: &str = "\
;FLAVOR:UltiGCode
G21
G90
M82
M107
G28 X0 Y0
G28 Z0
G1 Z15.0 F9000
G92 E0
G1 F200 E3
G92 E0
G1 F9000
M117 Printing...
G0 F9000 X10 Y10 Z0.3
;LAYER:0
G1 F1200 X20 Y10 E0.5
G1 X20 Y20 E1.0
M84
";

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn square_path_takes_six_seconds_per_leg() {
    let square = ["G1 X100 Y0 F1000", "G1 X100 Y100", "G1 X0 Y100", "G1 X0 Y0"];
    let total = predict_file_duration(square).unwrap();
    assert!(close(total, 24.0));
}

#[test]
fn file_total_is_sum_of_line_totals() {
    let lines: Vec<&str> = CURA_JOB.lines().collect();
    let whole = predict_file_duration(&lines).unwrap();

    let mut p = Predictor::new();
    let summed: f64 = lines.iter().map(|l| p.predict_line_duration(l).unwrap()).sum();
    assert!(close(whole, summed));
    assert!(close(p.elapsed(), whole));
}

#[test]
fn cura_style_job() {
    let file = GCodeFile::from_content("job.gcode", CURA_JOB);
    let r = file.estimate(&PredictorProfile::default()).unwrap();

    let expected = 60.0 * 15.0 / 585.0 // first Z lift, capped
        + 60.0 * 200f64.sqrt() / 9000.0
        + 60.0 * 14.7 / 585.0
        + 0.5
        + 0.5;
    assert!(close(r.estimated_seconds, expected), "{}", r.estimated_seconds);
    assert_eq!(r.line_count, 18);
    assert_eq!(r.unknown_codes, 1);
    assert_eq!(r.timed_moves, 5);
}

#[test]
fn prediction_is_repeatable() {
    let lines: Vec<&str> = CURA_JOB.lines().collect();
    let first = predict_file_duration(&lines).unwrap();
    let second = predict_file_duration(&lines).unwrap();
    assert_eq!(first, second);
}

#[test]
fn pairing_order_does_not_matter() {
    let xy = predict_file_duration(["F600", "G1 X10", "Y10"]).unwrap();
    let yx = predict_file_duration(["F600", "G1 Y10", "X10"]).unwrap();
    assert!(close(xy, yx));
}

#[test]
fn vertical_speed_caps() {
    for (feed, speed) in [(3000.0, 585.0), (500.0, 450.0), (100.0, 100.0)] {
        let line = format!("G1 Z10 F{feed}");
        let t = predict_file_duration([line]).unwrap();
        assert!(close(t, 60.0 * 10.0 / speed), "F{feed}: {t}");
    }
}

#[test]
fn homing_suppression_survives_feed_codes() {
    let t = predict_file_duration(["G28", "F600", "X0 Y0", "G1 X30 Y40"]).unwrap();
    assert!(close(t, 5.0));
}

#[test]
fn negative_feed_never_yields_negative_time() {
    assert!(predict_file_duration(["F-600", "G1 X30 Y40"]).is_err());
    assert!(predict_file_duration(["F-600", "G1 Z10"]).is_err());
}

#[test]
fn homing_is_one_shot() {
    let t = predict_file_duration(["G28", "X0 Y0", "G1 X30 Y40 F600", "G1 X0 Y0"]).unwrap();
    assert!(close(t, 10.0));
}

#[test]
fn fatal_errors_carry_line_and_code() {
    assert_eq!(
        predict_file_duration(["G1 X10", "Y10"]),
        Err(PredictError::UnresolvedFeed { line: 2, code: "Y10".into() })
    );
    assert_eq!(
        predict_file_duration(["G1 X10", "X20"]),
        Err(PredictError::Sequence {
            line: 2,
            code: "X20".into(),
            fault: SequenceFault::RepeatedAxis { axis: Axis::X, opposite: Axis::Y },
        })
    );
}

#[test]
fn running_total_drives_time_remaining() {
    let lines: Vec<&str> = CURA_JOB.lines().collect();
    let total = predict_file_duration(&lines).unwrap();

    let mut p = Predictor::new();
    let halfway = p
        .predict_lines(&lines[..14])
        .last()
        .unwrap()
        .unwrap();
    assert_eq!(halfway.line, 14);
    assert!(close(remaining_seconds(total, halfway.elapsed), 1.0));
}
