use super::*;
use clap::CommandFactory;

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn replay_defaults_to_stdin_and_export_file_name() {
    let cli = Cli::try_parse_from(["pixelcanvas", "--width", "64", "--height", "32", "--cell-size", "8", "replay"])
        .unwrap();
    assert_eq!((cli.width, cli.height, cli.cell_size), (64, 32, 8));
    let Command::Replay(args) = cli.command;
    assert_eq!(args.input, "-");
    assert_eq!(args.out, PathBuf::from("canvas_export.png"));
    assert!(!args.data_url);
}

#[test]
fn replay_accepts_paths_and_data_url_flag() {
    let cli = Cli::try_parse_from(["pixelcanvas", "replay", "--input", "stroke.json", "--out", "art.png", "--data-url"])
        .unwrap();
    let Command::Replay(args) = cli.command;
    assert_eq!(args.input, "stroke.json");
    assert_eq!(args.out, PathBuf::from("art.png"));
    assert!(args.data_url);
}

#[test]
fn run_rejects_zero_cell_size() {
    let cli = Cli::try_parse_from(["pixelcanvas", "--cell-size", "0", "replay"]).unwrap();
    assert!(matches!(run(cli), Err(CliError::Config(_))));
}

#[test]
fn missing_script_reports_its_path() {
    let err = read_input("/nonexistent/pixelcanvas/script.json").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/pixelcanvas/script.json"));
}

#[test]
fn replay_writes_png_file() {
    let dir = std::env::temp_dir().join(format!("pixelcanvas-test-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let input = dir.join("script.json");
    let out = dir.join("out.png");
    fs::write(&input, r##"{"events": [{"type": "color", "value": "#00ff00"}, {"type": "pointer_down", "x": 1, "y": 1}]}"##)
        .unwrap();

    let args = ReplayArgs { input: input.display().to_string(), out: out.clone(), data_url: false };
    run_replay(CanvasConfig::new(20, 20, 10).unwrap(), &args).unwrap();

    let png = fs::read(&out).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn oversized_canvas_reports_export_error() {
    let dir = std::env::temp_dir().join(format!("pixelcanvas-huge-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let input = dir.join("script.json");
    fs::write(&input, r#"{"events": []}"#).unwrap();

    let args = ReplayArgs { input: input.display().to_string(), out: dir.join("out.png"), data_url: false };
    let result = run_replay(CanvasConfig::new(u32::MAX, u32::MAX, 1).unwrap(), &args);
    assert!(matches!(result, Err(CliError::Export(ExportError::TooLarge { .. }))));
    assert!(!dir.join("out.png").exists());
    fs::remove_dir_all(&dir).unwrap();
}
