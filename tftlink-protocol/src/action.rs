//! Action command vocabulary
//!
//! Commands understood by the display, rendered without the `//action:`
//! prefix (see [`crate::line`] for the wire line).
//!
//! | Command | Body |
//! |---------|------|
//! | Connect | `connect <firmware> <version>` |
//! | Media | `media insert` / `media error` / `media removed` |
//! | Bell | `bell F<freq> D<dur>` |
//! | Start | `start` |
//! | Status | `status <text>` |
//! | Progress | `progress S<secs> P<percent>` |
//! | Paused / Cancel / Kill | `paused` / `cancel` / `kill` |
//! | Prompt dialog | `prompt_begin <text>`, `prompt_button <text>`, `prompt_show`, `prompt_end` |

use core::fmt;

// Keywords
const KW_CONNECT: &str = "connect";
const KW_MEDIA: &str = "media";
const KW_BELL: &str = "bell";
const KW_START: &str = "start";
const KW_STATUS: &str = "status";
const KW_PROGRESS: &str = "progress";
const KW_PAUSED: &str = "paused";
const KW_CANCEL: &str = "cancel";
const KW_KILL: &str = "kill";
const KW_PROMPT_BEGIN: &str = "prompt_begin";
const KW_PROMPT_BUTTON: &str = "prompt_button";
const KW_PROMPT_SHOW: &str = "prompt_show";
const KW_PROMPT_END: &str = "prompt_end";

/// Storage media change reported to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MediaEvent {
    /// Card inserted and mounted
    Inserted,
    /// Card failed to mount or read
    Error,
    /// Card removed
    Removed,
}

impl MediaEvent {
    /// Wire sub-command
    pub fn keyword(self) -> &'static str {
        match self {
            MediaEvent::Inserted => "insert",
            MediaEvent::Error => "error",
            MediaEvent::Removed => "removed",
        }
    }

    /// Parse a wire sub-command
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "insert" => Some(MediaEvent::Inserted),
            "error" => Some(MediaEvent::Error),
            "removed" => Some(MediaEvent::Removed),
            _ => None,
        }
    }
}

/// A single action command with its typed arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActionCommand<'a> {
    /// Firmware is up and ready to send action commands
    Connect { firmware: &'a str, version: &'a str },
    /// Media change
    Media(MediaEvent),
    /// Audible or visual bell
    Bell { frequency_hz: u16, duration_ms: u16 },
    /// Print job started
    Start,
    /// Status line changed
    Status(&'a str),
    /// Print progress
    Progress { seconds: u32, percent: u8 },
    /// Job paused
    Paused,
    /// Job cancelled
    Cancel,
    /// Printer killed
    Kill,
    /// Start defining a prompt dialog with a message
    PromptBegin(&'a str),
    /// Add a button to the dialog being defined
    PromptButton(&'a str),
    /// Show the defined dialog
    PromptShow,
    /// Close any open dialog
    PromptEnd,
}

impl<'a> ActionCommand<'a> {
    /// Leading keyword of the rendered body
    pub fn keyword(&self) -> &'static str {
        match self {
            ActionCommand::Connect { .. } => KW_CONNECT,
            ActionCommand::Media(_) => KW_MEDIA,
            ActionCommand::Bell { .. } => KW_BELL,
            ActionCommand::Start => KW_START,
            ActionCommand::Status(_) => KW_STATUS,
            ActionCommand::Progress { .. } => KW_PROGRESS,
            ActionCommand::Paused => KW_PAUSED,
            ActionCommand::Cancel => KW_CANCEL,
            ActionCommand::Kill => KW_KILL,
            ActionCommand::PromptBegin(_) => KW_PROMPT_BEGIN,
            ActionCommand::PromptButton(_) => KW_PROMPT_BUTTON,
            ActionCommand::PromptShow => KW_PROMPT_SHOW,
            ActionCommand::PromptEnd => KW_PROMPT_END,
        }
    }

    /// Parse a command body (the text after `//action:`)
    ///
    /// Returns `None` for unknown keywords or malformed arguments.
    pub fn parse(body: &'a str) -> Option<Self> {
        let (keyword, args) = match body.split_once(' ') {
            Some((keyword, args)) => (keyword, Some(args)),
            None => (body, None),
        };

        match (keyword, args) {
            (KW_CONNECT, Some(args)) => {
                let (firmware, version) = args.split_once(' ').unwrap_or((args, ""));
                Some(ActionCommand::Connect { firmware, version })
            }
            (KW_MEDIA, Some(sub)) => MediaEvent::from_keyword(sub).map(ActionCommand::Media),
            (KW_BELL, Some(args)) => {
                let (freq, dur) = args.split_once(' ')?;
                Some(ActionCommand::Bell {
                    frequency_hz: freq.strip_prefix('F')?.parse().ok()?,
                    duration_ms: dur.strip_prefix('D')?.parse().ok()?,
                })
            }
            (KW_START, None) => Some(ActionCommand::Start),
            (KW_STATUS, args) => Some(ActionCommand::Status(args.unwrap_or(""))),
            (KW_PROGRESS, Some(args)) => {
                let (secs, percent) = args.split_once(' ')?;
                Some(ActionCommand::Progress {
                    seconds: secs.strip_prefix('S')?.parse().ok()?,
                    percent: percent.strip_prefix('P')?.parse().ok()?,
                })
            }
            (KW_PAUSED, None) => Some(ActionCommand::Paused),
            (KW_CANCEL, None) => Some(ActionCommand::Cancel),
            (KW_KILL, None) => Some(ActionCommand::Kill),
            (KW_PROMPT_BEGIN, args) => Some(ActionCommand::PromptBegin(args.unwrap_or(""))),
            (KW_PROMPT_BUTTON, args) => Some(ActionCommand::PromptButton(args.unwrap_or(""))),
            (KW_PROMPT_SHOW, None) => Some(ActionCommand::PromptShow),
            (KW_PROMPT_END, None) => Some(ActionCommand::PromptEnd),
            _ => None,
        }
    }
}

impl fmt::Display for ActionCommand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = self.keyword();
        match self {
            ActionCommand::Connect { firmware, version } => {
                write!(f, "{} {} {}", keyword, firmware, version)
            }
            ActionCommand::Media(event) => write!(f, "{} {}", keyword, event.keyword()),
            ActionCommand::Bell {
                frequency_hz,
                duration_ms,
            } => write!(f, "{} F{} D{}", keyword, frequency_hz, duration_ms),
            ActionCommand::Status(text)
            | ActionCommand::PromptBegin(text)
            | ActionCommand::PromptButton(text) => write!(f, "{} {}", keyword, text),
            ActionCommand::Progress { seconds, percent } => {
                write!(f, "{} S{} P{}", keyword, seconds, percent)
            }
            ActionCommand::Start
            | ActionCommand::Paused
            | ActionCommand::Cancel
            | ActionCommand::Kill
            | ActionCommand::PromptShow
            | ActionCommand::PromptEnd => f.write_str(keyword),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String;

    fn render(cmd: &ActionCommand<'_>) -> String<128> {
        let mut out = String::new();
        write!(out, "{}", cmd).unwrap();
        out
    }

    #[test]
    fn test_render_bell() {
        let cmd = ActionCommand::Bell {
            frequency_hz: 440,
            duration_ms: 200,
        };
        assert_eq!(render(&cmd).as_str(), "bell F440 D200");
    }

    #[test]
    fn test_render_progress() {
        let cmd = ActionCommand::Progress {
            seconds: 125,
            percent: 42,
        };
        assert_eq!(render(&cmd).as_str(), "progress S125 P42");
    }

    #[test]
    fn test_render_connect() {
        let cmd = ActionCommand::Connect {
            firmware: "Marlin",
            version: "2.0.1",
        };
        assert_eq!(render(&cmd).as_str(), "connect Marlin 2.0.1");
    }

    #[test]
    fn test_render_media() {
        assert_eq!(render(&ActionCommand::Media(MediaEvent::Inserted)).as_str(), "media insert");
        assert_eq!(render(&ActionCommand::Media(MediaEvent::Error)).as_str(), "media error");
        assert_eq!(render(&ActionCommand::Media(MediaEvent::Removed)).as_str(), "media removed");
    }

    #[test]
    fn test_render_bare_keywords() {
        assert_eq!(render(&ActionCommand::Start).as_str(), "start");
        assert_eq!(render(&ActionCommand::Paused).as_str(), "paused");
        assert_eq!(render(&ActionCommand::Cancel).as_str(), "cancel");
        assert_eq!(render(&ActionCommand::Kill).as_str(), "kill");
        assert_eq!(render(&ActionCommand::PromptShow).as_str(), "prompt_show");
        assert_eq!(render(&ActionCommand::PromptEnd).as_str(), "prompt_end");
    }

    #[test]
    fn test_render_status_keeps_separator_for_empty_text() {
        assert_eq!(render(&ActionCommand::Status("")).as_str(), "status ");
        assert_eq!(render(&ActionCommand::Status("Heating...")).as_str(), "status Heating...");
    }

    #[test]
    fn test_parse_rendered_commands() {
        let commands = [
            ActionCommand::Connect {
                firmware: "Marlin",
                version: "bugfix-2.0.x",
            },
            ActionCommand::Media(MediaEvent::Removed),
            ActionCommand::Bell {
                frequency_hz: 1000,
                duration_ms: 50,
            },
            ActionCommand::Status("Printing cube.gcode"),
            ActionCommand::Progress {
                seconds: 3600,
                percent: 99,
            },
            ActionCommand::PromptBegin("Printer halted"),
            ActionCommand::PromptButton("Continue"),
            ActionCommand::Kill,
        ];

        for cmd in commands {
            let body = render(&cmd);
            assert_eq!(ActionCommand::parse(body.as_str()), Some(cmd));
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(ActionCommand::parse("bell 440 200"), None);
        assert_eq!(ActionCommand::parse("progress S10"), None);
        assert_eq!(ActionCommand::parse("progress S10 P300"), None);
        assert_eq!(ActionCommand::parse("media eject"), None);
        assert_eq!(ActionCommand::parse("start now"), None);
        assert_eq!(ActionCommand::parse("noop"), None);
    }
}
