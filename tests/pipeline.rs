use movie_genre_etl::ErrorKind;
use movie_genre_etl::pipeline::{run_pipeline, PipelineOptions};
use movie_genre_etl::types::TopGenre;

#[test]
fn run_pipeline_writes_enhanced_csv_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("movie_enhanced.csv");

    let summary = run_pipeline("tests/fixtures/movies.csv", &out, &PipelineOptions::default()).unwrap();

    assert_eq!(summary.row_count, 7);
    assert_eq!(summary.total_count, 17);
    let avg = summary.average.unwrap();
    assert!((avg - 17.0 / 7.0).abs() < 1e-12);
    assert_eq!(summary.top_genre, TopGenre::new("Comedy", 5));

    let written = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], "movieId,title,genres,genre_count");
    assert_eq!(
        lines[1],
        "1,Toy Story (1995),Adventure|Animation|Children|Comedy|Fantasy,5"
    );
    assert_eq!(lines[6], "11,\"American President, The (1995)\",Comedy|Drama|Romance,3");
    assert_eq!(lines[7], "114335,La cravate (1957),(no genres listed),0");
    assert!(written.ends_with("0\n"));
}

#[test]
fn run_pipeline_header_only_input_has_no_average() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.csv");
    let out = dir.path().join("out.csv");
    std::fs::write(&input, "movieId,title,genres\n").unwrap();

    let summary = run_pipeline(&input, &out, &PipelineOptions::default()).unwrap();

    assert_eq!(summary.row_count, 0);
    assert_eq!(summary.average, None);
    assert_eq!(summary.top_genre, TopGenre::default());
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "movieId,title,genres,genre_count\n"
    );
}

#[test]
fn run_pipeline_stops_before_writing_on_invalid_rows() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.csv");

    let err = run_pipeline(
        "tests/fixtures/no_genres_column.csv",
        &out,
        &PipelineOptions::default(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(!out.exists());
}

#[test]
fn run_pipeline_rejects_empty_genre_field() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.csv");
    let out = dir.path().join("out.csv");
    std::fs::write(&input, "movieId,title,genres\n1,Untitled,\n").unwrap();

    let err = run_pipeline(&input, &out, &PipelineOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(err.to_string().contains("empty 'genres' field"));
}

#[test]
fn summary_serializes_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.csv");
    let json_path = dir.path().join("summary.json");

    let summary = run_pipeline("tests/fixtures/movies.csv", &out, &PipelineOptions::default()).unwrap();
    summary.write_json(&json_path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value["row_count"], 7);
    assert_eq!(value["total_count"], 17);
    assert_eq!(value["top_genre"]["name"], "Comedy");
    assert_eq!(value["top_genre"]["count"], 5);
}

#[test]
fn summary_write_into_missing_parent_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.csv");
    let not_a_dir = dir.path().join("plain_file");
    std::fs::write(&not_a_dir, "x").unwrap();

    let summary = run_pipeline("tests/fixtures/movies.csv", &out, &PipelineOptions::default()).unwrap();
    let err = summary.write_json(not_a_dir.join("summary.json")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[cfg(target_os = "linux")]
#[test]
fn summary_write_to_full_device_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.csv");

    let summary = run_pipeline("tests/fixtures/movies.csv", &out, &PipelineOptions::default()).unwrap();
    let err = summary.write_json("/dev/full").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}
