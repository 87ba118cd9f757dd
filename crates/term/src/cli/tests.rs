use rstest::rstest;

use super::*;

fn parse(args: &[&str]) -> Cli {
	Cli::try_parse_from(std::iter::once("force-rgb").chain(args.iter().copied())).unwrap()
}

#[test]
fn defaults() {
	let cli = parse(&[]);
	assert_eq!(cli.dump, None);
	assert_eq!(cli.output_dir, PathBuf::from("."));
	assert_eq!(cli.strategy, StrategyArg::Auto);
	assert_eq!(cli.display_is_tv, DisplayIsTv::Omit);
	assert!(!cli.clean);
	assert!(!cli.install);
}

#[rstest]
#[case("auto", Strategy::Auto)]
#[case("structured", Strategy::Structured)]
#[case("bytes", Strategy::ByteDerived)]
fn strategy_maps_to_pipeline(#[case] value: &str, #[case] expected: Strategy) {
	let cli = parse(&["--strategy", value]);
	assert_eq!(cli.run_options().strategy, expected);
}

#[rstest]
#[case("yes", DisplayIsTv::Force(true))]
#[case("FALSE", DisplayIsTv::Force(false))]
#[case("omit", DisplayIsTv::Omit)]
fn display_is_tv_values(#[case] value: &str, #[case] expected: DisplayIsTv) {
	let cli = parse(&["-d", value]);
	assert_eq!(cli.run_options().display_is_tv, expected);
}

#[test]
fn invalid_display_is_tv_is_rejected() {
	let err = Cli::try_parse_from(["force-rgb", "--display-is-tv", "maybe"]).unwrap_err();
	assert!(err.to_string().contains("only none, true, or false"));
}

#[test]
fn overrides_dir_requires_install() {
	assert!(Cli::try_parse_from(["force-rgb", "--overrides-dir", "/tmp/o"]).is_err());

	let cli = parse(&["--install", "--overrides-dir", "/tmp/o"]);
	assert_eq!(cli.overrides_dir, Some(PathBuf::from("/tmp/o")));
}

#[test]
fn dump_accepts_stdin_marker() {
	let cli = parse(&["--dump", "-", "-o", "out"]);
	assert_eq!(cli.dump, Some(PathBuf::from("-")));
	assert_eq!(cli.output_dir, PathBuf::from("out"));
}
