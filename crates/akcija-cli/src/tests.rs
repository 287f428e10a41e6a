use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["akcija"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_offers_without_url() {
    let cli = Cli::try_parse_from(["akcija", "offers"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Offers { url: None })));
}

#[test]
fn parses_offers_with_url() {
    let cli = Cli::try_parse_from(["akcija", "offers", "--url", "https://example.lt/akcijos"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Offers { url: Some(ref u) }) if u == "https://example.lt/akcijos"
    ));
}

#[test]
fn parses_images_collect_with_prefix() {
    let cli = Cli::try_parse_from(["akcija", "images", "collect", "--prefix", "iki"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Images {
            command: ImagesCommands::Collect { url: None, prefix: Some(ref p) }
        }) if p == "iki"
    ));
}

#[test]
fn parses_images_fetch() {
    let cli =
        Cli::try_parse_from(["akcija", "images", "fetch"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Images {
            command: ImagesCommands::Fetch
        })
    ));
}

#[test]
fn images_requires_subcommand() {
    assert!(Cli::try_parse_from(["akcija", "images"]).is_err());
}

#[test]
fn parses_ocr_folder_and_flag() {
    let cli = Cli::try_parse_from(["akcija", "ocr", "images/batch", "--binarize"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Ocr { ref folder, binarize: true })
            if folder == &PathBuf::from("images/batch")
    ));
}

#[test]
fn ocr_requires_folder() {
    assert!(Cli::try_parse_from(["akcija", "ocr"]).is_err());
}
