/// A line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Guess(String),
    /// A blank line, treated like pressing Enter.
    Enter,
    NewGame,
    Stats,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Enter;
        }

        match line.strip_prefix(':') {
            Some(name) => match name.to_lowercase().as_str() {
                "new" | "n" => Command::NewGame,
                "stats" | "s" => Command::Stats,
                "help" | "h" | "?" => Command::Help,
                "quit" | "q" | "exit" => Command::Quit,
                _ => Command::Unknown(line.to_string()),
            },
            None => Command::Guess(line.to_uppercase()),
        }
    }
}

pub const HELP_TEXT: &str = "Type a 5-letter word and press Enter to guess.
Commands: :new starts a new game, :stats shows your record, :quit exits.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_guess() {
        assert_eq!(Command::parse(" crane \n"), Command::Guess("CRANE".to_string()));
        assert_eq!(Command::parse("abc"), Command::Guess("ABC".to_string()));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse(""), Command::Enter);
        assert_eq!(Command::parse(":new"), Command::NewGame);
        assert_eq!(Command::parse(":STATS"), Command::Stats);
        assert_eq!(Command::parse(":q"), Command::Quit);
        assert_eq!(Command::parse(":?"), Command::Help);
        assert_eq!(Command::parse(":fly"), Command::Unknown(":fly".to_string()));
    }
}
