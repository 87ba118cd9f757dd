use super::*;

#[test]
fn dump_argument_selects_source() {
	assert_eq!(RegistrySource::from_arg(None), RegistrySource::Ioreg);
	assert_eq!(RegistrySource::from_arg(Some(Path::new("-"))), RegistrySource::Stdin);
	assert_eq!(
		RegistrySource::from_arg(Some(Path::new("ioreg.txt"))),
		RegistrySource::File(PathBuf::from("ioreg.txt"))
	);
}

#[test]
fn reads_saved_dump() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("ioreg.txt");
	std::fs::write(&path, "\"EDID\" = <00ff>").unwrap();

	let text = RegistrySource::File(path).read().unwrap();
	assert_eq!(text, "\"EDID\" = <00ff>");
}

#[test]
fn missing_dump_names_the_path() {
	let err = RegistrySource::File(PathBuf::from("/nonexistent/ioreg.txt")).read().unwrap_err();
	assert!(err.to_string().contains("/nonexistent/ioreg.txt"));
}

#[test]
fn missing_command_is_an_error() {
	assert!(command_output("force-rgb-no-such-command", &[]).is_err());
}
