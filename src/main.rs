//! statmap-vault - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use statmap_vault::{
    cli::{Args, CollectionCommand, Command, ImageCommand},
    collection::{CollectionStore, CollectionUpdate, ImageUpdate, NewCollection, NewImage},
    config::{validate_config, Config},
    error::{exit_codes, Error, Result},
    output::{
        collection_line, image_line, print_collection, print_error, print_image, print_info,
        print_split, print_success, print_warning, split_json,
    },
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let mut config = Config::load_or_default(&args.config)?;
    args.merge_into_config(&mut config);
    validate_config(&config)?;

    match args.command {
        Command::Split { paths, json } => run_split(&config, &paths, json),
        Command::Token(_) => run_token(&config),
        Command::Collection(command) => run_collection(&config, command),
        Command::Image(command) => run_image(&config, command),
    }
}

fn open_store(config: &Config) -> Result<CollectionStore> {
    let path = config.store_path();
    tracing::debug!("Using store {}", path.display());
    Ok(CollectionStore::open(&path)?.with_claim_retries(config.token.claim_retries))
}

fn run_split(config: &Config, paths: &[String], json: bool) -> Result<()> {
    let splitter = config.splitter();
    for path in paths {
        let parts = splitter.split(path);
        if json {
            println!("{}", split_json(path, &parts)?);
        } else {
            print_split(path, &parts);
        }
    }
    Ok(())
}

fn run_token(config: &Config) -> Result<()> {
    let generator = config.token_generator()?;
    let store = open_store(config)?;
    let token = generator.generate(&store)?;
    println!("{}", token);
    Ok(())
}

fn run_collection(config: &Config, command: CollectionCommand) -> Result<()> {
    let mut store = open_store(config)?;

    match command {
        CollectionCommand::Create {
            name,
            owner,
            private,
            ..
        } => {
            let generator = config.token_generator()?;
            let collection = store.create_collection(
                NewCollection {
                    name,
                    owner,
                    private,
                },
                &generator,
            )?;
            store.save()?;

            print_success(&format!("Created collection {}", collection.id));
            if let Some(url) = collection.private_url() {
                print_info(&format!("Private URL: {}", url));
            }
        }
        CollectionCommand::Edit {
            id,
            name,
            owner,
            private,
            public,
            ..
        } => {
            let generator = config.token_generator()?;
            let visibility = match (private, public) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let collection = store.update_collection(
                id,
                CollectionUpdate {
                    name,
                    owner,
                    private: visibility,
                },
                &generator,
            )?;
            store.save()?;

            print_success(&format!("Updated collection {}", collection.id));
            if let Some(url) = collection.private_url() {
                print_info(&format!("Private URL: {}", url));
            }
        }
        CollectionCommand::List => {
            if store.collections().is_empty() {
                print_warning("No collections yet");
            }
            for collection in store.collections() {
                println!("{}", collection_line(collection));
            }
        }
        CollectionCommand::Show { id, token } => {
            let collection = match (id, token) {
                (_, Some(token)) => store.collection_by_token(&token)?,
                (Some(id), None) => store.collection(id)?,
                (None, None) => {
                    return Err(Error::Config(
                        "A collection ID or --token is required".to_string(),
                    ))
                }
            };
            let images = store.images_in(collection.id)?;
            print_collection(collection, &images);
        }
    }

    Ok(())
}

fn run_image(config: &Config, command: ImageCommand) -> Result<()> {
    let mut store = open_store(config)?;

    match command {
        ImageCommand::Add {
            collection,
            file,
            name,
            tags,
        } => {
            let image = store.add_image(NewImage {
                collection_id: collection,
                file,
                name,
                tags,
            })?;
            store.save()?;
            print_success(&format!("Added image {} '{}'", image.id, image.name));
        }
        ImageCommand::Edit {
            id,
            name,
            tags,
            clear_tags,
        } => {
            let tags = if clear_tags {
                Some(Vec::new())
            } else if tags.is_empty() {
                None
            } else {
                Some(tags)
            };
            let image = store.update_image(id, ImageUpdate { name, tags })?;
            store.save()?;
            print_success(&format!("Updated image {} '{}'", image.id, image.name));
        }
        ImageCommand::Remove { id } => {
            let image = store.remove_image(id)?;
            store.save()?;
            print_success(&format!("Removed image {} '{}'", image.id, image.name));
        }
        ImageCommand::Show { id } => {
            print_image(store.image(id)?);
        }
        ImageCommand::Tagged { tag } => {
            let images = store.images_by_tag(&tag);
            if images.is_empty() {
                print_warning(&format!("No images tagged '{}'", tag));
            }
            for image in images {
                println!("{}", image_line(image));
            }
        }
    }

    Ok(())
}
