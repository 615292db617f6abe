//! Command grammar.
//!
//! ```text
//! start <path-or-"quoted path"> [arguments...]
//! kill
//! status
//! ```
//!
//! Keywords are matched case-insensitively as prefixes, in the order
//! `start`, `kill`, `status`. Whatever follows a keyword other than `start`
//! is ignored.

use crate::errors::ProtocolError;

pub const CMD_START: &str = "start";
pub const CMD_KILL: &str = "kill";
pub const CMD_STATUS: &str = "status";

/// A parsed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start(StartRequest),
    Kill,
    Status,
}

/// Arguments of a `start` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartRequest {
    /// Application path exactly as it appeared on the wire, quotes included.
    pub path_token: String,
    /// Everything after the path, trimmed. Opaque: never re-parsed here.
    pub arguments: String,
}

impl StartRequest {
    /// Parse the text that follows the `start` keyword.
    pub fn from_blob(blob: &str) -> Result<Self, ProtocolError> {
        let data = blob.trim();
        let token = extract_application_path(data);
        if token.trim().is_empty() {
            return Err(ProtocolError::MissingApplicationPath);
        }

        let request = Self {
            path_token: token.trim_end().to_string(),
            arguments: data[token.len()..].trim().to_string(),
        };
        if request.launch_path().trim().is_empty() {
            return Err(ProtocolError::MissingApplicationPath);
        }
        Ok(request)
    }

    /// The path handed to the launcher: the token without its surrounding
    /// double quotes.
    pub fn launch_path(&self) -> &str {
        let token = self.path_token.as_str();
        token
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(token)
    }
}

/// Parse one command string.
pub fn parse_command(input: &str) -> Result<Command, ProtocolError> {
    let data = input.trim();
    if data.is_empty() {
        return Err(ProtocolError::Empty);
    }

    if let Some(rest) = strip_keyword(data, CMD_START) {
        StartRequest::from_blob(rest).map(Command::Start)
    } else if strip_keyword(data, CMD_KILL).is_some() {
        Ok(Command::Kill)
    } else if strip_keyword(data, CMD_STATUS).is_some() {
        Ok(Command::Status)
    } else {
        Err(ProtocolError::Unknown(data.to_string()))
    }
}

/// Extract the application path token from the text after `start`.
///
/// A quoted path runs up to and including the closing quote; an unterminated
/// quote yields an empty token. An unquoted path runs up to and including
/// the next space, or to the end of the text when there is none.
pub fn extract_application_path(data: &str) -> &str {
    let data = data.trim();
    if data.is_empty() {
        return "";
    }

    if data.starts_with('"') && data.len() > 2 {
        match find_after_first(data, '"') {
            Some(end) => &data[..=end],
            None => "",
        }
    } else {
        match find_after_first(data, ' ') {
            Some(end) => &data[..=end],
            None => data,
        }
    }
}

fn find_after_first(data: &str, needle: char) -> Option<usize> {
    data.char_indices()
        .skip(1)
        .find(|&(_, c)| c == needle)
        .map(|(idx, _)| idx)
}

fn strip_keyword<'a>(data: &'a str, keyword: &str) -> Option<&'a str> {
    let head = data.get(..keyword.len())?;
    if head.eq_ignore_ascii_case(keyword) {
        Some(&data[keyword.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(input: &str) -> StartRequest {
        match parse_command(input) {
            Ok(Command::Start(request)) => request,
            other => panic!("expected start, got {:?}", other),
        }
    }

    #[test]
    fn test_unquoted_path_without_arguments() {
        let request = start("start notepad.exe");
        assert_eq!(request.path_token, "notepad.exe");
        assert_eq!(request.launch_path(), "notepad.exe");
        assert_eq!(request.arguments, "");
    }

    #[test]
    fn test_quoted_path_keeps_quotes_in_token() {
        let request = start(r#"start "C:\Program Files\App\app.exe" --flag value"#);
        assert_eq!(request.path_token, r#""C:\Program Files\App\app.exe""#);
        assert_eq!(request.launch_path(), r"C:\Program Files\App\app.exe");
        assert_eq!(request.arguments, "--flag value");
    }

    #[test]
    fn test_unquoted_path_with_arguments() {
        let request = start("start /opt/game/run.sh   -windowed  -log  ");
        assert_eq!(request.path_token, "/opt/game/run.sh");
        assert_eq!(request.arguments, "-windowed  -log");
    }

    #[test]
    fn test_arguments_are_opaque() {
        let request = start(r#"start app -name "a b" -x='1;2' | tee"#);
        assert_eq!(request.arguments, r#"-name "a b" -x='1;2' | tee"#);
    }

    #[test]
    fn test_unterminated_quote_is_rejected() {
        assert_eq!(
            parse_command(r#"start "C:\Program Files\App\app.exe --flag"#),
            Err(ProtocolError::MissingApplicationPath)
        );
    }

    #[test]
    fn test_missing_path_is_rejected() {
        assert_eq!(parse_command("start"), Err(ProtocolError::MissingApplicationPath));
        assert_eq!(parse_command("start    "), Err(ProtocolError::MissingApplicationPath));
        assert_eq!(parse_command(r#"start """#), Err(ProtocolError::MissingApplicationPath));
    }

    #[test]
    fn test_keyword_case_and_whitespace_do_not_matter() {
        let expected = parse_command("start app.exe -a").unwrap();
        for variant in ["  START app.exe -a", "Start app.exe -a\r\n", "\tsTaRt app.exe -a  "] {
            assert_eq!(parse_command(variant).unwrap(), expected);
        }

        for variant in ["kill", "KILL", "  Kill \n"] {
            assert_eq!(parse_command(variant).unwrap(), Command::Kill);
        }
        for variant in ["status", "STATUS", " Status\n"] {
            assert_eq!(parse_command(variant).unwrap(), Command::Status);
        }
    }

    #[test]
    fn test_prefix_matching() {
        assert_eq!(parse_command("killall").unwrap(), Command::Kill);
        assert_eq!(parse_command("status please").unwrap(), Command::Status);
        let request = start("startup.exe now");
        assert_eq!(request.path_token, "up.exe");
        assert_eq!(request.arguments, "now");
    }

    #[test]
    fn test_empty_and_unknown() {
        assert_eq!(parse_command(""), Err(ProtocolError::Empty));
        assert_eq!(parse_command(" \r\n\t "), Err(ProtocolError::Empty));
        assert_eq!(
            parse_command("shutdown"),
            Err(ProtocolError::Unknown("shutdown".to_string()))
        );
        assert_eq!(
            parse_command("st"),
            Err(ProtocolError::Unknown("st".to_string()))
        );
    }

    #[test]
    fn test_extract_application_path() {
        assert_eq!(extract_application_path(r#""a b" c"#), r#""a b""#);
        assert_eq!(extract_application_path("a b c"), "a ");
        assert_eq!(extract_application_path("abc"), "abc");
        assert_eq!(extract_application_path(r#""ab"#), "");
        assert_eq!(extract_application_path("   "), "");
    }
}
