use super::*;

#[test]
fn test_parse_run_defaults() {
    let cli = Cli::try_parse_from(["kira-reliability", "run", "--input", "scores.csv"]).unwrap();
    match cli.command {
        Command::Run(args) => {
            assert_eq!(args.input, Some(PathBuf::from("scores.csv")));
            assert!(args.config.is_none());
            assert!(args.out.is_none());
            assert!(!args.no_plots);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_run_all_flags() {
    let cli = Cli::try_parse_from([
        "kira-reliability",
        "run",
        "--config",
        "study.json",
        "--out",
        "out",
        "--no-plots",
    ])
    .unwrap();
    match cli.command {
        Command::Run(args) => {
            assert_eq!(args.config, Some(PathBuf::from("study.json")));
            assert_eq!(args.out, Some(PathBuf::from("out")));
            assert!(args.no_plots);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_default_config_command() {
    let cli = Cli::try_parse_from(["kira-reliability", "default-config"]).unwrap();
    assert!(matches!(cli.command, Command::DefaultConfig));
}

#[test]
fn test_parse_rejects_unknown_argument() {
    assert!(Cli::try_parse_from(["kira-reliability", "run", "--mode", "cell"]).is_err());
    assert!(Cli::try_parse_from(["kira-reliability"]).is_err());
}

#[test]
fn test_run_without_dataset_fails() {
    let args = RunArgs {
        input: None,
        config: None,
        out: None,
        no_plots: true,
    };
    let err = run(&args).unwrap_err();
    assert!(matches!(err, AppError::Config(ConfigError::Invalid(_))));
}

#[test]
fn test_run_missing_input_file_fails() {
    let args = RunArgs {
        input: Some(PathBuf::from("/nonexistent/kira/scores.csv")),
        config: None,
        out: None,
        no_plots: true,
    };
    let err = run(&args).unwrap_err();
    assert!(matches!(err, AppError::Input(InputError::MissingInput(_))));
}
