use std::path::PathBuf;

/// One line of user input, mapped to the affordance it triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Select(PathBuf),
    Submit,
    Reset,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

pub fn parse_command(line: &str) -> UiCommand {
    let line = line.trim();
    if line.is_empty() {
        return UiCommand::Empty;
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "select" | "open" | "s" => {
            let path = unquote(rest);
            if path.is_empty() {
                UiCommand::Invalid("select needs a path, e.g. `select ./photo.png`".to_string())
            } else {
                UiCommand::Select(PathBuf::from(path))
            }
        }
        "submit" | "extract" | "x" => UiCommand::Submit,
        "reset" | "r" => UiCommand::Reset,
        "help" | "h" | "?" => UiCommand::Help,
        "quit" | "exit" | "q" => UiCommand::Quit,
        other => UiCommand::Invalid(format!("unknown command `{other}`; type `help`")),
    }
}

fn unquote(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = raw
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_keeps_spaces_in_path() {
        assert_eq!(
            parse_command("select  my photos/cat 1.png "),
            UiCommand::Select(PathBuf::from("my photos/cat 1.png"))
        );
    }

    #[test]
    fn select_strips_matching_quotes() {
        assert_eq!(
            parse_command(r#"open "C:\images\cat.png""#),
            UiCommand::Select(PathBuf::from(r"C:\images\cat.png"))
        );
        assert_eq!(
            parse_command("s 'a b.jpg'"),
            UiCommand::Select(PathBuf::from("a b.jpg"))
        );
    }

    #[test]
    fn select_without_path_is_invalid() {
        assert!(matches!(parse_command("select"), UiCommand::Invalid(_)));
        assert!(matches!(parse_command("select \"\""), UiCommand::Invalid(_)));
    }

    #[test]
    fn verbs_and_aliases() {
        assert_eq!(parse_command("SUBMIT"), UiCommand::Submit);
        assert_eq!(parse_command("x"), UiCommand::Submit);
        assert_eq!(parse_command("reset"), UiCommand::Reset);
        assert_eq!(parse_command("?"), UiCommand::Help);
        assert_eq!(parse_command("exit"), UiCommand::Quit);
        assert_eq!(parse_command("   "), UiCommand::Empty);
        assert!(matches!(parse_command("decode"), UiCommand::Invalid(_)));
    }
}
