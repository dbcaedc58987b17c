use crate::book::Overrides;
use crate::config::Defaults;
use clap::Parser;

/// Builds `book-<title>.epub` from the Markdown chapters in the current
/// directory.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    /// Author of the book
    #[clap(short, long)]
    pub author: Option<String>,

    /// Cover image file name, relative to the book directory
    #[clap(short, long)]
    pub cover: Option<String>,

    /// Short description of the book
    #[clap(short, long)]
    pub description: Option<String>,

    /// Language tag of the book, such as `en` or `zh-CN`
    #[clap(short, long)]
    pub language: Option<String>,

    /// Title of the book
    #[clap(short, long)]
    pub title: Option<String>,

    /// Subject tag; repeat for several tags
    #[clap(short = 'g', long = "tag")]
    pub tags: Vec<String>,

    /// Log discovery and packaging details
    #[clap(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Command-line values layered over configuration defaults.
    pub fn overrides(&self, defaults: &Defaults) -> Overrides {
        let tags = if self.tags.is_empty() {
            defaults.default_tags.clone()
        } else {
            Some(self.tags.clone())
        };
        Overrides {
            title: self.title.clone().or_else(|| defaults.default_title.clone()),
            author: self.author.clone().or_else(|| defaults.default_author.clone()),
            language: self
                .language
                .clone()
                .or_else(|| defaults.default_language.clone()),
            cover_image: self.cover.clone().or_else(|| defaults.default_cover.clone()),
            description: self
                .description
                .clone()
                .or_else(|| defaults.default_description.clone()),
            tags,
        }
    }

    pub fn verbose(&self, defaults: &Defaults) -> bool {
        self.verbose || defaults.verbose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mdepub").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn cli_values_win_over_defaults() {
        let defaults = Defaults {
            default_author: Some("Config".to_string()),
            default_title: Some("Config Title".to_string()),
            default_tags: Some(vec!["config".to_string()]),
            ..Defaults::default()
        };
        let overrides = parse(&["-a", "Cli", "-g", "one", "--tag", "two"]).overrides(&defaults);
        assert_eq!(overrides.author.as_deref(), Some("Cli"));
        assert_eq!(overrides.title.as_deref(), Some("Config Title"));
        assert_eq!(
            overrides.tags,
            Some(vec!["one".to_string(), "two".to_string()])
        );
    }

    #[test]
    fn empty_cli_falls_back_to_defaults() {
        let defaults = Defaults {
            default_tags: Some(vec!["config".to_string()]),
            default_verbose: Some(true),
            ..Defaults::default()
        };
        let cli = parse(&[]);
        assert_eq!(cli.overrides(&defaults).tags, Some(vec!["config".to_string()]));
        assert!(cli.verbose(&defaults));
        assert!(!cli.verbose(&Defaults::default()));
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["mdepub", "--bogus"]).is_err());
    }

    #[test]
    fn short_flags_map_to_fields() {
        let cli = parse(&["-c", "front.png", "-d", "About", "-l", "zh", "-t", "T", "-v"]);
        assert_eq!(cli.cover.as_deref(), Some("front.png"));
        assert_eq!(cli.description.as_deref(), Some("About"));
        assert_eq!(cli.language.as_deref(), Some("zh"));
        assert_eq!(cli.title.as_deref(), Some("T"));
        assert!(cli.verbose);
    }
}
