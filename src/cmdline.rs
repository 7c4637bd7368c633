//! Command-line half of the configuration loader.
//!
//! Every flag has a short and a long form; the long forms double as the
//! interactive command names. Usage errors terminate the process before
//! any network or file-system side effect, as does an unknown unit, which
//! prints the full unit registry to the error stream first.

use clap::Parser;
use crate::error::SessionError;
use crate::session_context::{IpFamily, SessionConfiguration};
use crate::unit_format;

#[derive(Debug, Parser)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version,
    about = "Fetch a single file over http(s) with live progress."
)]
pub struct Cli {
    /// Verbose mode.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Show the status line.
    #[arg(short = 's', long)]
    pub status: bool,

    /// Show the progress bar.
    #[arg(short = 'p', long)]
    pub progress: bool,

    /// Speed and size unit.
    #[arg(short = 'u', long)]
    pub units: Option<String>,

    /// Binary prefixes for speed and size.
    #[arg(short = 'b', long)]
    pub binary: bool,

    /// Close on finish.
    #[arg(short = 'c', long)]
    pub close: bool,

    /// Window width.
    #[arg(short = 'x', long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(short = 'y', long)]
    pub height: Option<u32>,

    /// Fixed window size.
    #[arg(short = 'f', long)]
    pub fixed: bool,

    /// Set the user agent.
    #[arg(short = 'U', long = "user-agent")]
    pub user_agent: Option<String>,

    /// Set the referer.
    #[arg(short = 'r', long)]
    pub referer: Option<String>,

    /// HTTP authentication credentials (<user>:<password>).
    #[arg(short = 'a', long)]
    pub auth: Option<String>,

    /// Add a cookie (<name>=<contents>).
    #[arg(short = 'C', long = "cookie")]
    pub cookies: Vec<String>,

    /// Add a cookies file.
    #[arg(short = 'F', long = "cookies-file")]
    pub cookies_files: Vec<String>,

    /// Override proxy settings.
    #[arg(short = 'P', long)]
    pub proxy: Option<String>,

    /// Proxy authentication credentials (<user>:<password>).
    #[arg(short = 'A', long = "proxy-auth")]
    pub proxy_auth: Option<String>,

    /// Resolve to IPv4 addresses only.
    #[arg(short = '4', long)]
    pub ipv4: bool,

    /// Resolve to IPv6 addresses only.
    #[arg(short = '6', long, conflicts_with = "ipv4")]
    pub ipv6: bool,

    /// Outgoing network interface address.
    #[arg(short = 'i', long)]
    pub intf: Option<String>,

    /// Read extra commands from standard input.
    #[arg(short = 'I', long)]
    pub interactive: bool,

    /// Source URL.
    pub url: String,

    /// Output file or directory.
    #[arg(default_value = ".")]
    pub output: String,
}

impl Cli {
    /// Moves the parsed flags into the session configuration. An unknown
    /// unit prints the registry and is fatal to the caller.
    pub fn apply(self, config: &mut SessionConfiguration) -> crate::error::Result<()> {
        if let Some(repr) = &self.units {
            match unit_format::find_unit(repr) {
                Some(unit) => config.unit = unit,
                None => {
                    print_units();
                    return Err(SessionError::UnknownUnit);
                }
            }
        }

        config.verbose = self.verbose;
        config.status = self.status;
        config.progress = self.progress;
        config.binary = self.binary;
        config.close_on_finish = self.close;
        config.fixed = self.fixed;
        config.interactive = self.interactive;
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(user_agent) = self.user_agent {
            config.user_agent = user_agent;
        }
        config.referer = self.referer;
        config.http_auth = self.auth;
        config.cookies.extend(self.cookies);
        config.cookie_files.extend(self.cookies_files);
        config.proxy = self.proxy;
        config.proxy_auth = self.proxy_auth;
        config.interface = self.intf;
        if self.ipv4 {
            config.ip_family = IpFamily::V4;
        } else if self.ipv6 {
            config.ip_family = IpFamily::V6;
        }
        config.url = self.url;
        config.output = self.output;
        Ok(())
    }
}

/// Prints the unit registry, column-aligned, to the error stream.
fn print_units() {
    eprintln!("Units are:");
    let max = unit_format::UNITS
        .iter()
        .map(|unit| unit.repr.len())
        .max()
        .unwrap_or(0);
    for unit in &unit_format::UNITS {
        eprintln!("  {:<width$} {}", unit.repr, unit.desc, width = max);
    }
}

#[cfg(test)]
mod test {
    use clap::Parser;
    use crate::cmdline::Cli;
    use crate::error::SessionError;
    use crate::session_context::{IpFamily, SessionConfiguration};

    fn load(args: &[&str]) -> SessionConfiguration {
        let mut config = SessionConfiguration::new();
        Cli::try_parse_from(args).unwrap().apply(&mut config).unwrap();
        config
    }

    #[test]
    fn test_positional_arguments() {
        let config = load(&["webget", "http://example.com/a.bin"]);
        assert_eq!(config.url, "http://example.com/a.bin");
        assert_eq!(config.output, ".");

        let config = load(&["webget", "http://example.com/a.bin", "/tmp"]);
        assert_eq!(config.output, "/tmp");
    }

    #[test]
    fn test_zero_or_too_many_positionals_are_usage_errors() {
        assert!(Cli::try_parse_from(["webget"]).is_err());
        assert!(Cli::try_parse_from(["webget", "url", "out", "extra"]).is_err());
    }

    #[test]
    fn test_flags() {
        let config = load(&[
            "webget", "-v", "-s", "-p", "-b", "-c", "-f", "-4",
            "-U", "agent", "-r", "ref", "-a", "user:pass",
            "-C", "a=1", "-C", "b=2", "-F", "/tmp/jar",
            "-P", "http://proxy:8080", "-A", "puser:ppass",
            "-i", "10.0.0.1", "-x", "640", "-y", "480",
            "http://example.com/a.bin",
        ]);
        assert!(config.verbose && config.status && config.progress);
        assert!(config.binary && config.close_on_finish && config.fixed);
        assert_eq!(config.ip_family, IpFamily::V4);
        assert_eq!(config.user_agent, "agent");
        assert_eq!(config.referer.as_deref(), Some("ref"));
        assert_eq!(config.http_auth.as_deref(), Some("user:pass"));
        assert_eq!(config.cookies, vec!["a=1".to_string(), "b=2".to_string()]);
        assert_eq!(config.cookie_files, vec!["/tmp/jar".to_string()]);
        assert_eq!(config.proxy.as_deref(), Some("http://proxy:8080"));
        assert_eq!(config.proxy_auth.as_deref(), Some("puser:ppass"));
        assert_eq!(config.interface.as_deref(), Some("10.0.0.1"));
        assert_eq!((config.width, config.height), (640, 480));
    }

    #[test]
    fn test_unit_selection() {
        let config = load(&["webget", "-u", "b", "http://example.com/a.bin"]);
        assert_eq!(config.unit.repr, "b");
        assert_eq!(config.unit.factor, 8.);
    }

    #[test]
    fn test_unknown_unit_is_fatal() {
        let mut config = SessionConfiguration::new();
        let cli = Cli::try_parse_from(["webget", "-u", "KB", "http://example.com/a.bin"]).unwrap();
        assert_eq!(cli.apply(&mut config), Err(SessionError::UnknownUnit));
    }

    #[test]
    fn test_ipv4_conflicts_with_ipv6() {
        assert!(Cli::try_parse_from(["webget", "-4", "-6", "http://example.com/"]).is_err());
    }
}
