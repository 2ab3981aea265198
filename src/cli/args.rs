//! Command-line argument definitions using clap.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;

/// Statistical map collection registry CLI.
#[derive(Parser, Debug)]
#[command(
    name = "statmap-vault",
    version,
    about = "Manage statistical map collections and their private tokens",
    long_about = "A CLI tool to split neuroimaging filenames, generate private collection \
                  tokens and manage a registry of collections and images."
)]
pub struct Args {
    /// Path to configuration file.
    #[arg(short, long, default_value = "statmap.toml", global = true)]
    pub config: PathBuf,

    /// Path to the collection store (overrides the config file).
    #[arg(short, long, env = "STATMAP_STORE", global = true)]
    pub store: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split paths into directory, stem and extension.
    Split {
        /// Paths to split.
        #[arg(required = true)]
        paths: Vec<String>,

        /// Print one JSON object per path.
        #[arg(long)]
        json: bool,
    },

    /// Generate a private token unused by any collection.
    Token(TokenArgs),

    /// Manage collections.
    #[command(subcommand)]
    Collection(CollectionCommand),

    /// Manage images.
    #[command(subcommand)]
    Image(ImageCommand),
}

/// Token generation overrides.
#[derive(ClapArgs, Debug, Default)]
pub struct TokenArgs {
    /// Number of letters in the token.
    #[arg(short, long)]
    pub length: Option<usize>,

    /// Collisions tolerated before giving up.
    #[arg(long)]
    pub max_retries: Option<u32>,
}

/// Collection subcommands.
#[derive(Subcommand, Debug)]
pub enum CollectionCommand {
    /// Create a collection.
    Create {
        /// Collection name.
        name: String,

        /// Owner of the collection.
        #[arg(short, long, env = "STATMAP_OWNER")]
        owner: String,

        /// Give the collection a private-access token.
        #[arg(long)]
        private: bool,

        #[command(flatten)]
        token: TokenArgs,
    },

    /// Edit a collection.
    Edit {
        /// Collection ID.
        id: u64,

        /// New name.
        #[arg(short, long)]
        name: Option<String>,

        /// New owner.
        #[arg(short, long)]
        owner: Option<String>,

        /// Give the collection a private-access token.
        #[arg(long, conflicts_with = "public")]
        private: bool,

        /// Drop the collection's private-access token.
        #[arg(long)]
        public: bool,

        #[command(flatten)]
        token: TokenArgs,
    },

    /// List all collections.
    List,

    /// Show a collection and its images.
    Show {
        /// Collection ID.
        #[arg(required_unless_present = "token", conflicts_with = "token")]
        id: Option<u64>,

        /// Look the collection up by its private-access token instead.
        #[arg(long)]
        token: Option<String>,
    },
}

/// Image subcommands.
#[derive(Subcommand, Debug)]
pub enum ImageCommand {
    /// Add an image to a collection.
    Add {
        /// Collection ID.
        collection: u64,

        /// Path of the map file.
        file: String,

        /// Display name (defaults to the file's stem).
        #[arg(short, long)]
        name: Option<String>,

        /// Tag to attach. Can be repeated.
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// Rename an image or replace its tags.
    Edit {
        /// Image ID.
        id: u64,

        /// New display name.
        #[arg(short, long)]
        name: Option<String>,

        /// Replacement tag. Can be repeated.
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Remove all tags.
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,
    },

    /// Remove an image.
    Remove {
        /// Image ID.
        id: u64,
    },

    /// Show an image.
    Show {
        /// Image ID.
        id: u64,
    },

    /// List images carrying a tag.
    Tagged {
        /// Tag name.
        tag: String,
    },
}

impl TokenArgs {
    /// Apply token overrides to the config.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(length) = self.length {
            config.token.length = length;
        }

        if let Some(max_retries) = self.max_retries {
            config.token.max_retries = Some(max_retries);
        }
    }
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(store) = &self.store {
            config.store.path = Some(store.clone());
        }

        match &self.command {
            Command::Token(token)
            | Command::Collection(CollectionCommand::Create { token, .. })
            | Command::Collection(CollectionCommand::Edit { token, .. }) => {
                token.merge_into_config(config)
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_overrides_merge() {
        let args = Args::parse_from([
            "statmap-vault",
            "--store",
            "/tmp/store.json",
            "token",
            "--length",
            "12",
            "--max-retries",
            "5",
        ]);
        let mut config = Config::default();
        args.merge_into_config(&mut config);

        assert_eq!(config.token.length, 12);
        assert_eq!(config.token.max_retries, Some(5));
        assert_eq!(config.store.path, Some(PathBuf::from("/tmp/store.json")));
    }

    #[test]
    fn test_collection_create_parses() {
        let args = Args::parse_from([
            "statmap-vault",
            "collection",
            "create",
            "Pain",
            "--owner",
            "alice",
            "--private",
            "--length",
            "10",
        ]);
        let mut config = Config::default();
        args.merge_into_config(&mut config);
        assert_eq!(config.token.length, 10);

        match args.command {
            Command::Collection(CollectionCommand::Create {
                name,
                owner,
                private,
                ..
            }) => {
                assert_eq!(name, "Pain");
                assert_eq!(owner, "alice");
                assert!(private);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_image_add_repeated_tags() {
        let args = Args::parse_from([
            "statmap-vault",
            "image",
            "add",
            "3",
            "maps/zstat1.nii.gz",
            "--tag",
            "motor",
            "-t",
            "fmri",
        ]);
        match args.command {
            Command::Image(ImageCommand::Add {
                collection, tags, ..
            }) => {
                assert_eq!(collection, 3);
                assert_eq!(tags, vec!["motor", "fmri"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_split_requires_paths() {
        assert!(Args::try_parse_from(["statmap-vault", "split"]).is_err());
    }

    #[test]
    fn test_negative_length_rejected() {
        assert!(Args::try_parse_from(["statmap-vault", "token", "--length", "-3"]).is_err());
    }

    #[test]
    fn test_collection_edit_parses() {
        let args = Args::parse_from([
            "statmap-vault",
            "collection",
            "edit",
            "4",
            "--name",
            "Reward",
            "--private",
            "--length",
            "6",
        ]);
        let mut config = Config::default();
        args.merge_into_config(&mut config);
        assert_eq!(config.token.length, 6);

        match args.command {
            Command::Collection(CollectionCommand::Edit {
                id,
                name,
                owner,
                private,
                public,
                ..
            }) => {
                assert_eq!(id, 4);
                assert_eq!(name.as_deref(), Some("Reward"));
                assert_eq!(owner, None);
                assert!(private);
                assert!(!public);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Args::try_parse_from([
            "statmap-vault",
            "collection",
            "edit",
            "4",
            "--private",
            "--public",
        ])
        .is_err());
    }

    #[test]
    fn test_collection_show_by_id_or_token() {
        let args = Args::parse_from(["statmap-vault", "collection", "show", "--token", "ABCDEFGH"]);
        match args.command {
            Command::Collection(CollectionCommand::Show { id, token }) => {
                assert_eq!(id, None);
                assert_eq!(token.as_deref(), Some("ABCDEFGH"));
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Args::try_parse_from(["statmap-vault", "collection", "show"]).is_err());
        assert!(Args::try_parse_from([
            "statmap-vault",
            "collection",
            "show",
            "3",
            "--token",
            "ABCDEFGH",
        ])
        .is_err());
    }

    #[test]
    fn test_image_edit_and_remove_parse() {
        let args = Args::parse_from(["statmap-vault", "image", "edit", "9", "--clear-tags"]);
        match args.command {
            Command::Image(ImageCommand::Edit {
                id,
                tags,
                clear_tags,
                ..
            }) => {
                assert_eq!(id, 9);
                assert!(tags.is_empty());
                assert!(clear_tags);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let args = Args::parse_from(["statmap-vault", "image", "remove", "9"]);
        assert!(matches!(
            args.command,
            Command::Image(ImageCommand::Remove { id: 9 })
        ));
    }
}
