use tracing::Level;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// `-v` raises this crate's level only; dependencies stay at WARN unless
/// `RUST_LOG` says otherwise.
fn crate_directive(verbosity: u8) -> String {
    format!(
        "{}={}",
        env!("CARGO_CRATE_NAME"),
        level_for(verbosity).as_str().to_lowercase()
    )
}

pub fn init(verbosity: u8) {
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    match crate_directive(verbosity).parse::<Directive>() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => eprintln!("Ignoring log directive: {}", e),
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_level_mapping() {
        assert_eq!(level_for(0), Level::WARN);
        assert_eq!(level_for(1), Level::INFO);
        assert_eq!(level_for(2), Level::DEBUG);
        assert_eq!(level_for(3), Level::TRACE);
        assert_eq!(level_for(9), Level::TRACE);
    }

    #[test]
    fn test_crate_directive_parses() {
        assert_eq!(crate_directive(0), "episodify=warn");
        assert_eq!(crate_directive(2), "episodify=debug");
        assert!(crate_directive(3).parse::<Directive>().is_ok());
    }
}
