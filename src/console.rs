//! Terminal front end: line commands in, alarm banners and prompts out.

use async_trait::async_trait;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::controller::{AlertOutput, SnoozeChoice};
use crate::models::{Alarm, NewAlarm, SoundProfile};
use crate::sound;
use crate::types::AlarmId;

pub const HELP: &str = "\
commands:
  add HH:MM [message...] [repeat] [snooze=N] [sound=standard|high|low|pulse]
  del ID        delete an alarm
  snooze ID     push an alarm forward by its snooze minutes
  list          show the alarm list
  clock         show the current time
  help          show this help
  quit          exit";

/// A line command typed at the clock.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(NewAlarm),
    Remove(AlarmId),
    Snooze(AlarmId),
    List,
    Clock,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(String::new());
    };
    match verb.to_ascii_lowercase().as_str() {
        "add" => {
            let Some(time) = words.next() else {
                return Err("usage: add HH:MM [message...]".into());
            };
            let mut draft = NewAlarm {
                time: time.to_string(),
                message: String::new(),
                sound: SoundProfile::Standard,
                repeat: false,
                snooze: 5,
                active: true,
            };
            let mut message_words: Vec<&str> = Vec::new();
            for word in words {
                if word.eq_ignore_ascii_case("repeat") {
                    draft.repeat = true;
                } else if let Some(minutes) = word.strip_prefix("snooze=") {
                    draft.snooze = minutes
                        .parse()
                        .map_err(|_| format!("bad snooze minutes {minutes:?}"))?;
                } else if let Some(name) = word.strip_prefix("sound=") {
                    draft.sound = SoundProfile::from_keyword(name)
                        .ok_or_else(|| format!("unknown sound {name:?}"))?;
                } else {
                    message_words.push(word);
                }
            }
            draft.message = message_words.join(" ");
            Ok(Command::Add(draft))
        }
        "del" | "delete" | "rm" => parse_id(words.next()).map(Command::Remove),
        "snooze" => parse_id(words.next()).map(Command::Snooze),
        "list" | "ls" => Ok(Command::List),
        "clock" | "time" => Ok(Command::Clock),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command {other:?}; try \"help\"")),
    }
}

fn parse_id(word: Option<&str>) -> Result<AlarmId, String> {
    let Some(word) = word else {
        return Err("an alarm id is required".into());
    };
    word.parse().map_err(|_| format!("bad alarm id {word:?}"))
}

/// Console implementation of the controller's alert seam. All stdin goes
/// through one reader task, so the firing prompt and the command loop read
/// from the same channel instead of fighting over the terminal.
pub struct ConsoleAlert {
    input: mpsc::Receiver<String>,
    notifications_enabled: bool,
}

impl ConsoleAlert {
    pub fn new(notifications_enabled: bool) -> Self {
        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if tx.send(line).await.is_err() {
                    break;
                }
            }
        });
        ConsoleAlert {
            input: rx,
            notifications_enabled,
        }
    }

    /// A pending command line, if the user typed one since the last tick.
    pub fn try_line(&mut self) -> Option<String> {
        self.input.try_recv().ok()
    }
}

#[async_trait]
impl AlertOutput for ConsoleAlert {
    fn alarm_triggered(&mut self, alarm: &Alarm) {
        println!();
        println!(">>> ALARM {} [{}] {}", alarm.time, alarm.id, alarm.message);
    }

    fn play_sound(&mut self, profile: SoundProfile) {
        sound::play(profile);
    }

    fn notify(&mut self, message: &str) {
        if self.notifications_enabled {
            println!("[notification] Alarm: {message}");
        }
    }

    async fn prompt_snooze(&mut self, alarm: &Alarm) -> SnoozeChoice {
        print!("{}\nSnooze? [y/N] ", alarm.message);
        std::io::stdout().flush().ok();
        match self.input.recv().await {
            Some(line) if matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes") => {
                SnoozeChoice::Snooze
            }
            _ => SnoozeChoice::Dismiss,
        }
    }

    fn alarm_cleared(&mut self, _alarm: &Alarm) {
        println!();
    }
}
