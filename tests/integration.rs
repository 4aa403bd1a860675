use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

fn geoframe(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_geoframe"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute command")
}

fn write_geojson(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).expect("Failed to create fixture");
    file.write_all(content.as_bytes()).expect("Failed to write fixture");
    path.to_str().unwrap().to_string()
}

const TWO_POINTS: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        { "type": "Feature", "properties": {}, "geometry": { "type": "Point", "coordinates": [0.0, 0.0] } },
        { "type": "Feature", "properties": {}, "geometry": { "type": "Point", "coordinates": [10.0, 10.0] } }
    ]
}"#;

#[test]
fn test_help_flag() {
    let output = geoframe(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("geoframe"));
    assert!(stdout.contains("--aspect-ratio"));
    assert!(stdout.contains("--no-geometries"));
}

#[test]
fn test_missing_input() {
    let output = geoframe(&[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("INPUT") || stderr.contains("required"));
}

#[test]
fn test_file_not_found() {
    let output = geoframe(&["nonexistent.geojson"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"));
}

#[test]
fn test_invalid_aspect_ratio() {
    let output = geoframe(&["doc.geojson", "--aspect-ratio", "0"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Aspect ratio"));
}

#[test]
fn test_two_points_quiet() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let input = write_geojson(temp_dir.path(), "points.geojson", TWO_POINTS);

    let output = geoframe(&[&input, "-q"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 6, "{}", stdout);
    assert_eq!(lines[0], "0,0,10,10");
    assert_eq!(lines[1], "5,5");
    assert_eq!(lines[4], "5,5");

    let range: f64 = lines[5].parse().expect("range should be numeric");
    assert!(range.is_finite() && range > 0.0);
}

#[test]
fn test_labelled_output_and_parallel() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let input = write_geojson(temp_dir.path(), "points.geojson", TWO_POINTS);

    let sequential = geoframe(&[&input]);
    let parallel = geoframe(&[&input, "--parallel"]);
    assert!(sequential.status.success());
    assert!(parallel.status.success());

    let stdout = String::from_utf8_lossy(&sequential.stdout);
    assert!(stdout.contains("Bounds: 0,0,10,10"));
    assert!(stdout.contains("Diagonal:"));
    assert!(stdout.contains(" km"));
    assert_eq!(sequential.stdout, parallel.stdout);
}

#[test]
fn test_max_range_caps_output() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let input = write_geojson(temp_dir.path(), "points.geojson", TWO_POINTS);

    let output = geoframe(&[&input, "-q", "--max-range", "5000"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().last(), Some("5000.0"));
}

#[test]
fn test_features_only_finds_nothing_in_lines() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let input = write_geojson(
        temp_dir.path(),
        "line.geojson",
        r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] }
                }
            ]
        }"#,
    );

    let output = geoframe(&[&input, "--no-geometries"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no located features"));

    let output = geoframe(&[&input, "-q"]);
    assert!(output.status.success());
}

#[test]
fn test_geometries_only_walks_feature_collection() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let input = write_geojson(
        temp_dir.path(),
        "mixed.geojson",
        r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": {}, "geometry": { "type": "Point", "coordinates": [50.0, 50.0] } },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 2.0]] }
                }
            ]
        }"#,
    );

    let output = geoframe(&[&input, "-q", "--no-features"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().next(), Some("0,0,2,1"));
}

#[test]
fn test_parallel_keeps_points_across_antimeridian() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let input = write_geojson(
        temp_dir.path(),
        "wrap.geojson",
        r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": {}, "geometry": { "type": "Point", "coordinates": [170.0, 0.0] } },
                { "type": "Feature", "properties": {}, "geometry": { "type": "Point", "coordinates": [-170.0, 5.0] } }
            ]
        }"#,
    );

    for extra in [None, Some("--parallel")] {
        let mut args = vec![input.as_str(), "-q"];
        args.extend(extra);
        let output = geoframe(&args);
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert_eq!(stdout.lines().next(), Some("0,170,5,-170"), "{:?}", extra);
    }
}
