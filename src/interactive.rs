//! Line-oriented configuration commands read from standard input.
//!
//! One command per line: the first whitespace-delimited token names the
//! command, the rest of the line is the argument. `#` lines are comments.
//! An unknown command is the only malformed input that does not abort the
//! process: it logs a syntax error and the loop continues. Arguments are
//! copied into storage owned by the configuration before the line buffer
//! is reused.

use std::io::BufRead;
use crate::session_context::{IpFamily, SessionConfiguration};

enum CommandAction {
    Verbose,
    Status,
    Progress,
    Binary,
    Close,
    Fixed,
    Width,
    Height,
    UserAgent,
    Referer,
    Auth,
    Cookie,
    CookiesFile,
    Proxy,
    ProxyAuth,
    Interface,
    Ipv4,
    Ipv6,
    Url,
    Output,
}

struct Command {
    name: &'static str,
    action: CommandAction,
}

const COMMANDS: [Command; 20] = [
    Command { name: "verbose", action: CommandAction::Verbose },
    Command { name: "status", action: CommandAction::Status },
    Command { name: "progress", action: CommandAction::Progress },
    Command { name: "binary", action: CommandAction::Binary },
    Command { name: "close", action: CommandAction::Close },
    Command { name: "fixed", action: CommandAction::Fixed },
    Command { name: "width", action: CommandAction::Width },
    Command { name: "height", action: CommandAction::Height },
    Command { name: "user-agent", action: CommandAction::UserAgent },
    Command { name: "referer", action: CommandAction::Referer },
    Command { name: "auth", action: CommandAction::Auth },
    Command { name: "cookie", action: CommandAction::Cookie },
    Command { name: "cookies-file", action: CommandAction::CookiesFile },
    Command { name: "proxy", action: CommandAction::Proxy },
    Command { name: "proxy-auth", action: CommandAction::ProxyAuth },
    Command { name: "intf", action: CommandAction::Interface },
    Command { name: "ipv4", action: CommandAction::Ipv4 },
    Command { name: "ipv6", action: CommandAction::Ipv6 },
    Command { name: "url", action: CommandAction::Url },
    Command { name: "output", action: CommandAction::Output },
];

/// Applies commands from `input` until end of input.
pub fn parse_commands<R: BufRead>(config: &mut SessionConfiguration, input: R) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        if line.starts_with('#') {
            continue;
        }
        let mut parts = line.splitn(2, |c: char| c == ' ' || c == '\t');
        let name = parts.next().unwrap_or("");
        if name.is_empty() || name.chars().any(|c| c.is_control()) {
            continue;
        }
        let arg = parts
            .next()
            .unwrap_or("")
            .trim_end_matches(|c| matches!(c, '\r' | '\x0b' | '\x0c'));
        match COMMANDS.iter().find(|command| command.name == name) {
            Some(command) => apply(config, &command.action, arg),
            None => tracing::error!("syntax error: unknown command '{}'", name),
        }
    }
}

fn apply(config: &mut SessionConfiguration, action: &CommandAction, arg: &str) {
    match action {
        CommandAction::Verbose => config.verbose = true,
        CommandAction::Status => config.status = true,
        CommandAction::Progress => config.progress = true,
        CommandAction::Binary => config.binary = true,
        CommandAction::Close => config.close_on_finish = true,
        CommandAction::Fixed => config.fixed = true,
        CommandAction::Width => config.width = arg.trim().parse().unwrap_or(0),
        CommandAction::Height => config.height = arg.trim().parse().unwrap_or(0),
        CommandAction::UserAgent => config.user_agent = arg.to_string(),
        CommandAction::Referer => config.referer = Some(arg.to_string()),
        CommandAction::Auth => config.http_auth = Some(arg.to_string()),
        CommandAction::Cookie => config.cookies.push(arg.to_string()),
        CommandAction::CookiesFile => config.cookie_files.push(arg.to_string()),
        CommandAction::Proxy => config.proxy = Some(arg.to_string()),
        CommandAction::ProxyAuth => config.proxy_auth = Some(arg.to_string()),
        CommandAction::Interface => config.interface = Some(arg.to_string()),
        CommandAction::Ipv4 => config.ip_family = IpFamily::V4,
        CommandAction::Ipv6 => config.ip_family = IpFamily::V6,
        CommandAction::Url => config.url = arg.to_string(),
        CommandAction::Output => config.output = arg.to_string(),
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;
    use crate::interactive::parse_commands;
    use crate::session_context::{IpFamily, SessionConfiguration};

    fn parse(script: &str) -> SessionConfiguration {
        let mut config = SessionConfiguration::new();
        parse_commands(&mut config, Cursor::new(script.as_bytes()));
        config
    }

    #[test]
    fn test_script_with_comment_and_unknown_command() {
        let config = parse("cookie a=b\n# comment\nbogus x\nverbose\n");
        assert_eq!(config.cookies, vec!["a=b".to_string()]);
        assert!(config.verbose);
        assert!(!config.status);
    }

    #[test]
    fn test_repeatable_commands_append_in_order() {
        let config = parse("cookie a=1\ncookie b=2\ncookies-file /tmp/jar\n");
        assert_eq!(config.cookies, vec!["a=1".to_string(), "b=2".to_string()]);
        assert_eq!(config.cookie_files, vec!["/tmp/jar".to_string()]);
    }

    #[test]
    fn test_arguments_are_owned_copies() {
        let config = parse("user-agent test agent 1.0\nreferer http://example.com/\n");
        assert_eq!(config.user_agent, "test agent 1.0");
        assert_eq!(config.referer.as_deref(), Some("http://example.com/"));
    }

    #[test]
    fn test_url_and_output_override() {
        let config = parse("url http://example.com/a.bin\noutput /tmp\n");
        assert_eq!(config.url, "http://example.com/a.bin");
        assert_eq!(config.output, "/tmp");
    }

    #[test]
    fn test_integers_and_family() {
        let config = parse("width 640\nheight 480\nfixed\nipv6\n");
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 480);
        assert!(config.fixed);
        assert_eq!(config.ip_family, IpFamily::V6);
    }

    #[test]
    fn test_control_characters_in_command_skip_line() {
        let config = parse("ver\x0bbose\n\nverbose\n");
        assert!(config.verbose);
    }

    #[test]
    fn test_tab_separates_command_and_argument() {
        let config = parse("proxy\thttp://proxy:8080\n");
        assert_eq!(config.proxy.as_deref(), Some("http://proxy:8080"));
    }

    #[test]
    fn test_missing_argument_is_empty() {
        let config = parse("referer\n");
        assert_eq!(config.referer.as_deref(), Some(""));
    }
}
