#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Command, DEFAULT_PORT};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_parse_build() {
        let cli = Cli::parse_from(["pagesmith", "build"]);
        match cli.command {
            Command::Build(args) => {
                assert!(args.project.cwd.is_none());
                assert!(args.project.config.is_none());
            }
            other => panic!("expected build, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_project_options() {
        let cli = Cli::parse_from([
            "pagesmith",
            "clean",
            "--cwd",
            "site",
            "--config",
            "page.config.json",
        ]);
        match cli.command {
            Command::Clean(args) => {
                assert_eq!(args.project.cwd, Some(PathBuf::from("site")));
                assert_eq!(args.project.config, Some(PathBuf::from("page.config.json")));
            }
            other => panic!("expected clean, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_dev_defaults() {
        let cli = Cli::parse_from(["pagesmith", "dev"]);
        match cli.command {
            Command::Dev(args) => {
                assert_eq!(args.port, DEFAULT_PORT);
                assert!(!args.open);
            }
            other => panic!("expected dev, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_dev_port_and_open() {
        let cli = Cli::parse_from(["pagesmith", "dev", "--port", "4000", "--open"]);
        match cli.command {
            Command::Dev(args) => {
                assert_eq!(args.port, 4000);
                assert!(args.open);
            }
            other => panic!("expected dev, got {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["pagesmith", "build", "--verbose", "--no-color"]);
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["pagesmith", "-v", "-q", "build"]).is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert!(Cli::try_parse_from(["pagesmith", "serve"]).is_err());
    }

    #[test]
    fn test_invalid_port() {
        assert!(Cli::try_parse_from(["pagesmith", "dev", "--port", "http"]).is_err());
    }
}
