use std::str::FromStr;

use crate::models::{BookId, CommentId, Genre};

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Genre(Genre),
    Open(BookId),
    Text(String),
    Rate(u8),
    Send,
    Delete(CommentId),
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
genre <all|sports|fiction|thriller|fantasy>  list books of a genre
open <bookId>                                 expand or collapse a book
text <review>                                 write the review draft
rate <1-5>                                    set the draft rating
send                                          send the draft
delete <commentId>                            delete a review
show                                          print the current screen
quit                                          leave";

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.find(char::is_whitespace) {
            Some(i) => (&line[..i], line[i..].trim()),
            None => (line, ""),
        };

        let need = |what: &str| -> anyhow::Result<()> {
            if rest.is_empty() {
                Err(anyhow::anyhow!("`{}` needs {}", word, what))
            } else {
                Ok(())
            }
        };

        match word.to_lowercase().as_str() {
            "genre" => {
                need("a genre")?;
                Ok(Command::Genre(rest.parse()?))
            }
            "open" => {
                need("a book id")?;
                Ok(Command::Open(BookId::new(rest)))
            }
            "text" => {
                need("some text")?;
                Ok(Command::Text(rest.to_string()))
            }
            "rate" => {
                need("a rating")?;
                Ok(Command::Rate(rest.parse()?))
            }
            "send" => Ok(Command::Send),
            "delete" => {
                need("a comment id")?;
                Ok(Command::Delete(CommentId::new(rest)))
            }
            "show" | "" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            unknown => Err(anyhow::anyhow!("unknown command `{}`, try `help`", unknown)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Command;
    use crate::models::{BookId, CommentId, Genre};

    #[test]
    fn parse_commands() -> anyhow::Result<()> {
        assert_eq!(Command::Genre(Genre::All), "genre all".parse()?);
        assert_eq!(Command::Open(BookId::new("zyTCAlFPjgYC")), "open zyTCAlFPjgYC".parse()?);
        assert_eq!(
            Command::Text("Great read, would recommend".to_string()),
            "text   Great read, would recommend ".parse()?
        );
        assert_eq!(Command::Rate(4), "rate 4".parse()?);
        assert_eq!(Command::Send, "SEND".parse()?);
        assert_eq!(Command::Delete(CommentId::new("c1")), "delete c1".parse()?);
        assert_eq!(Command::Show, "".parse()?);
        assert_eq!(Command::Quit, "exit".parse()?);

        Ok(())
    }

    #[test]
    fn missing_argument() {
        let err = "open".parse::<Command>().unwrap_err();

        assert_eq!("`open` needs a book id", err.to_string());
    }

    #[test]
    fn unknown_command() {
        assert!("dance".parse::<Command>().is_err());
        assert!("genre poetry".parse::<Command>().is_err());
        assert!("rate lots".parse::<Command>().is_err());
    }
}
