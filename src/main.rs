use gwanju::{
    books::english_name,
    cli::Cli,
    config::Config,
    logging::{self, LogLevel},
    navigation::Navigator,
    references::Resolver,
    store::{CrossRefMap, VerseStore},
    translate,
    ui::reader::{ApplicationState, Reader},
};

use clap::Parser;
use eyre::Result;
use std::path::Path;
use std::time::Duration;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(LogLevel::from_flags(cli.verbose, cli.debug));

    if let Some(input) = &cli.translate_refs {
        return run_translator(input, &cli.output, cli.download);
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path.clone())?,
        None => match Config::new() {
            Ok(config) => config,
            Err(err) => {
                logging::warn(format!("could not load configuration: {}", err));
                logging::warn("starting with default settings");
                Config::ephemeral()
            }
        },
    };
    config.override_data_paths(cli.data.clone(), cli.refs.clone());

    let store = VerseStore::load(&config.bible_data_path())?;
    let refs = CrossRefMap::load(&config.refs_data_path())?;

    let mut navigator = Navigator::starting_at(&store);
    if let Some(citation) = &cli.citation {
        if navigator.follow_reference(citation).is_none() {
            logging::warn(format!("ignoring unparseable citation '{}'", citation));
        }
    }

    if cli.dump {
        dump_position(&config, &store, &refs, &navigator);
        return Ok(());
    }

    let state = ApplicationState::new(config, store, refs, navigator);
    let mut reader = Reader::new(state)?;
    if let Err(err) = reader.run() {
        logging::error(format!("reader stopped: {}", err));
        return Err(err);
    }
    Ok(())
}

fn run_translator(input: &Path, output: &Path, download: bool) -> Result<()> {
    if !input.exists() {
        if !download {
            return Err(eyre::eyre!(
                "{} not found (pass --download to fetch it)",
                input.display()
            ));
        }
        translate::download(translate::ENGLISH_REFS_URL, input, Duration::from_secs(60))?;
    }

    let translation = translate::translate_file(input, output)?;
    println!(
        "translated {} keys ({} skipped) into {}",
        translation.translated,
        translation.skipped,
        output.display()
    );
    Ok(())
}

fn dump_position(config: &Config, store: &VerseStore, refs: &CrossRefMap, navigator: &Navigator) {
    let settings = &config.settings;
    let position = navigator.position();

    match english_name(&position.book) {
        Some(english) => println!(
            "{} ({} {}:{})",
            position, english, position.chapter, position.verse
        ),
        None => println!("{}", position),
    }
    println!(
        "{}",
        store
            .get_text(&position.book, &position.chapter, &position.verse)
            .unwrap_or(settings.no_data_message.as_str())
    );

    println!();
    println!("[관주]");
    let references = Resolver::new(store, refs).references_at(position);
    if references.is_empty() {
        println!("{}", settings.no_refs_message);
    }
    for entry in references {
        if entry.preview_text.is_empty() {
            println!("{}", entry.citation);
        } else {
            println!("{}  {}", entry.citation, entry.preview_text);
        }
    }

    println!();
    println!("[주석]");
    println!(
        "{}",
        store
            .commentary(&position.book, &position.chapter, &position.verse)
            .unwrap_or(settings.no_commentary_message.as_str())
    );
}
