//! CLI argument parsing and validation module
//!
//! Handles command-line interface using clap, including:
//! - Mapping file and resolver selection
//! - Concurrency and timeout tuning
//! - Optional TOML defaults file
//! - Output format selection (human/JSON)
//! - Verbosity and quiet modes

use clap::{Arg, ArgAction, Command};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

use crate::config::HarnessConfiguration;
use crate::models::{validate_concurrency, validate_timeout_secs, ResolverSpec, VerifyConfig};

/// Parse command line arguments and return the run configuration
pub fn parse_args() -> Result<VerifyConfig> {
    let matches = build_command().get_matches();
    resolve_config(&matches)
}

fn build_command() -> Command {
    Command::new("hostcheck")
        .version(concat!(env!("HOSTCHECK_VERSION"), " (", env!("GIT_HASH"), ")"))
        .about("Verify hosts-file name resolution against a resolver under test")
        .long_about(
            "Reads a mapping file of (address, hostname) pairs, checks that every \
             listed hostname resolves to exactly its listed address, and that \
             synthesized near-miss hostnames fail to resolve. The resolver under \
             test is an external program invoked once per lookup, or the host's \
             own resolution call.",
        )
        .arg(
            Arg::new("mapping")
                .value_name("MAPPING")
                .help("Path to the mapping file (hosts-file format)")
                .required(true),
        )
        .arg(
            Arg::new("resolver")
                .short('r')
                .long("resolver")
                .value_name("PATH")
                .help("Resolver executable to test; invoked once per hostname"),
        )
        .arg(
            Arg::new("native")
                .long("native")
                .help("Test the host's native resolution call instead of an executable")
                .conflicts_with("resolver")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("concurrency")
                .short('c')
                .long("concurrency")
                .value_name("N")
                .help("Maximum resolver invocations in flight at once [default: 7]")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECS")
                .help("Per-case time budget in seconds [default: 2.0]")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("lenient")
                .long("lenient")
                .help("Pass positive cases on any non-empty answer instead of exact address match")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("TOML file supplying defaults; explicit flags override it"),
        )
        .arg(
            Arg::new("json")
                .short('j')
                .long("json")
                .help("Output in JSON format")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Suppress non-anomaly output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .conflicts_with("quiet")
                .action(ArgAction::SetTrue),
        )
}

fn resolve_config(matches: &clap::ArgMatches) -> Result<VerifyConfig> {
    // File-supplied defaults, if any
    let defaults = match matches.get_one::<String>("config") {
        Some(path) => HarnessConfiguration::load_from_file(Path::new(path))?,
        None => HarnessConfiguration::default(),
    };

    let mapping_path = PathBuf::from(
        matches
            .get_one::<String>("mapping")
            .expect("mapping is a required argument"),
    );
    if !mapping_path.exists() {
        return Err(anyhow!(
            "Mapping file does not exist: {}",
            mapping_path.display()
        ));
    }

    // Explicit flags win over the config file
    let resolver = if matches.get_flag("native") {
        ResolverSpec::Native
    } else if let Some(program) = matches.get_one::<String>("resolver") {
        ResolverSpec::Subprocess(PathBuf::from(program))
    } else if defaults.resolver.native {
        ResolverSpec::Native
    } else if let Some(program) = defaults.resolver.program {
        ResolverSpec::Subprocess(program)
    } else {
        return Err(anyhow!(
            "No resolver under test: pass --resolver PATH or --native"
        ));
    };

    let concurrency = validate_concurrency(
        matches
            .get_one::<usize>("concurrency")
            .copied()
            .unwrap_or(defaults.verifier.concurrency),
    )?;

    let timeout = validate_timeout_secs(
        matches
            .get_one::<f64>("timeout")
            .copied()
            .unwrap_or(defaults.verifier.timeout),
    )?;

    Ok(VerifyConfig {
        mapping_path,
        resolver,
        concurrency,
        timeout,
        lenient: matches.get_flag("lenient") || defaults.verifier.lenient,
        json_output: matches.get_flag("json"),
        quiet_mode: matches.get_flag("quiet"),
        verbose: matches.get_flag("verbose"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn mapping_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "10.0.0.1 alpha.example").unwrap();
        file
    }

    fn parse(args: &[&str]) -> Result<VerifyConfig> {
        let matches = build_command()
            .try_get_matches_from(args)
            .map_err(|e| anyhow!(e))?;
        resolve_config(&matches)
    }

    #[test]
    fn test_defaults_with_subprocess_resolver() {
        let mapping = mapping_file();
        let config = parse(&[
            "hostcheck",
            mapping.path().to_str().unwrap(),
            "--resolver",
            "/bin/true",
        ])
        .unwrap();

        assert_eq!(
            config.resolver,
            ResolverSpec::Subprocess(PathBuf::from("/bin/true"))
        );
        assert_eq!(config.concurrency, 7);
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert!(!config.lenient);
        assert!(!config.json_output);
    }

    #[test]
    fn test_native_flag_selects_native_resolver() {
        let mapping = mapping_file();
        let config = parse(&["hostcheck", mapping.path().to_str().unwrap(), "--native"]).unwrap();
        assert_eq!(config.resolver, ResolverSpec::Native);
    }

    #[test]
    fn test_missing_resolver_selection_is_an_error() {
        let mapping = mapping_file();
        let result = parse(&["hostcheck", mapping.path().to_str().unwrap()]);
        assert!(result.unwrap_err().to_string().contains("--resolver"));
    }

    #[test]
    fn test_native_conflicts_with_resolver() {
        let mapping = mapping_file();
        let result = parse(&[
            "hostcheck",
            mapping.path().to_str().unwrap(),
            "--native",
            "--resolver",
            "/bin/true",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_mapping_file_is_an_error() {
        let result = parse(&["hostcheck", "/nonexistent/hosts", "--native"]);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Mapping file does not exist"));
    }

    #[test]
    fn test_bounds_are_enforced() {
        let mapping = mapping_file();
        let path = mapping.path().to_str().unwrap();
        assert!(parse(&["hostcheck", path, "--native", "-c", "0"]).is_err());
        assert!(parse(&["hostcheck", path, "--native", "-t", "0.01"]).is_err());
    }

    #[test]
    fn test_config_file_supplies_defaults_and_flags_override() {
        let mapping = mapping_file();
        let mut config_file = NamedTempFile::new().unwrap();
        write!(
            config_file,
            "[verifier]\nconcurrency = 3\ntimeout = 1.5\n\n[resolver]\nnative = true\n"
        )
        .unwrap();

        let config = parse(&[
            "hostcheck",
            mapping.path().to_str().unwrap(),
            "--config",
            config_file.path().to_str().unwrap(),
        ])
        .unwrap();
        assert_eq!(config.resolver, ResolverSpec::Native);
        assert_eq!(config.concurrency, 3);
        assert_eq!(config.timeout, Duration::from_secs_f64(1.5));

        let config = parse(&[
            "hostcheck",
            mapping.path().to_str().unwrap(),
            "--config",
            config_file.path().to_str().unwrap(),
            "-c",
            "9",
            "--resolver",
            "/bin/true",
        ])
        .unwrap();
        assert_eq!(config.concurrency, 9);
        assert_eq!(
            config.resolver,
            ResolverSpec::Subprocess(PathBuf::from("/bin/true"))
        );
    }
}
