//! Console commands read from stdin, one per line.

use wf_session::InputEvent;

pub const HELP: &str = "\
commands:
  fix <marker>   scanned location marker (e.g. fix MainGateway)
  say <phrase>   spoken request (e.g. say take me to the nearest staircase)
  go <place>     typed destination
  stop           stop narration
  reload         re-read the map
  help           this text
  quit";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Event(InputEvent),
    Stop,
    Reload,
    Help,
    Quit,
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, String> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let needs_arg = |make: fn(String) -> InputEvent| {
            if rest.is_empty() {
                Err(format!("`{verb}` needs an argument; try `help`"))
            } else {
                Ok(Command::Event(make(rest.to_owned())))
            }
        };

        match verb.to_ascii_lowercase().as_str() {
            "" => Ok(Command::Empty),
            "fix" | "at" => needs_arg(InputEvent::LocationFix),
            "say" => needs_arg(InputEvent::Utterance),
            "go" | "to" => needs_arg(InputEvent::Destination),
            "stop" => Ok(Command::Stop),
            "reload" => Ok(Command::Reload),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(format!("unknown command `{other}`; try `help`")),
        }
    }
}
