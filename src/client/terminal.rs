//! Terminal front-end
//!
//! 逐行读取命令驱动 Workflow

use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

use super::api::AudioFile;
use super::audio::AudioElement;
use super::view;
use super::workflow::Workflow;

pub const HELP: &str = "\
Commands:
  name <voice name>       set the voice name
  files <path> [path...]  select audio samples (replaces the selection)
  clone                   clone the voice
  text <text>             set the text to speak
  generate                generate speech
  play                    play / pause the generated speech
  reset                   rewind and pause
  show                    redraw the screen
  help                    show this help
  quit                    exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCommand {
    Name(String),
    Files(Vec<PathBuf>),
    Clone,
    Text(String),
    Generate,
    Play,
    Reset,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}', type 'help'")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
}

impl TerminalCommand {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "" => return Err(CommandError::Empty),
            "name" => TerminalCommand::Name(rest.to_string()),
            "files" | "file" => {
                let paths: Vec<PathBuf> = rest.split_whitespace().map(PathBuf::from).collect();
                if paths.is_empty() {
                    return Err(CommandError::MissingArgument("files"));
                }
                TerminalCommand::Files(paths)
            }
            "clone" => TerminalCommand::Clone,
            "text" => TerminalCommand::Text(rest.to_string()),
            "generate" | "gen" => TerminalCommand::Generate,
            "play" | "pause" => TerminalCommand::Play,
            "reset" => TerminalCommand::Reset,
            "show" => TerminalCommand::Show,
            "help" | "?" => TerminalCommand::Help,
            "quit" | "exit" | "q" => TerminalCommand::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

pub struct TerminalApp<A: AudioElement> {
    workflow: Workflow<A>,
}

impl<A: AudioElement> TerminalApp<A> {
    pub fn new(workflow: Workflow<A>) -> Self {
        Self { workflow }
    }

    pub fn workflow(&self) -> &Workflow<A> {
        &self.workflow
    }

    /// 同步播放结束事件
    pub fn poll(&mut self) {
        if let Some(panel) = self.workflow.speech_mut() {
            panel.poll_playback();
        }
    }

    pub fn render(&self) -> String {
        view::render(&self.workflow)
    }

    /// 执行一条命令，返回 false 表示退出
    pub async fn handle<W: Write>(
        &mut self,
        command: TerminalCommand,
        out: &mut W,
    ) -> std::io::Result<bool> {
        self.poll();

        match command {
            TerminalCommand::Quit => return Ok(false),
            TerminalCommand::Help => writeln!(out, "{}", HELP)?,
            TerminalCommand::Show => write!(out, "{}", self.render())?,
            TerminalCommand::Name(name) => match self.workflow.form_mut() {
                Some(form) => form.set_name(name),
                None => writeln!(out, "Voice already created")?,
            },
            TerminalCommand::Files(paths) => self.select_files(paths, out).await?,
            TerminalCommand::Clone => self.clone_voice(out).await?,
            TerminalCommand::Text(text) => match self.workflow.speech_mut() {
                Some(panel) => panel.set_text(text),
                None => writeln!(out, "Clone a voice first")?,
            },
            TerminalCommand::Generate => self.generate(out).await?,
            TerminalCommand::Play => match self.workflow.speech_mut() {
                Some(panel) => {
                    if let Err(e) = panel.toggle_play_pause() {
                        writeln!(out, "Error: {}", e)?;
                    }
                }
                None => writeln!(out, "Clone a voice first")?,
            },
            TerminalCommand::Reset => match self.workflow.speech_mut() {
                Some(panel) => panel.reset(),
                None => writeln!(out, "Clone a voice first")?,
            },
        }
        Ok(true)
    }

    async fn select_files<W: Write>(&mut self, paths: Vec<PathBuf>, out: &mut W) -> std::io::Result<()> {
        if self.workflow.form_mut().is_none() {
            return writeln!(out, "Voice already created");
        }

        let mut files = Vec::with_capacity(paths.len());
        for path in &paths {
            match AudioFile::read(path).await {
                Ok(file) => files.push(file),
                Err(e) => return writeln!(out, "Error: {}", e),
            }
        }

        if let Some(form) = self.workflow.form_mut() {
            form.select_files(files);
            writeln!(out, "{}", view::files_selected(form.files().len()))?;
        }
        Ok(())
    }

    async fn clone_voice<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        let Some(submission) = self.workflow.begin_clone() else {
            return match self.workflow.form_mut() {
                Some(_) => writeln!(out, "Enter a voice name and select audio files first"),
                None => writeln!(out, "Voice already created"),
            };
        };

        writeln!(out, "{}", view::clone_button_caption(true))?;
        out.flush()?;
        let outcome = submission.send(self.workflow.api().as_ref()).await;

        match self.workflow.finish_clone(outcome) {
            Some(voice_id) => writeln!(out, "Voice created: {}", voice_id)?,
            None => {
                if let Some(error) = self.workflow.form().error() {
                    writeln!(out, "Error: {}", error)?;
                }
            }
        }
        Ok(())
    }

    async fn generate<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        let Some(submission) = self.workflow.begin_speech() else {
            return match self.workflow.speech() {
                Some(_) => writeln!(out, "Enter some text first"),
                None => writeln!(out, "Clone a voice first"),
            };
        };

        writeln!(out, "{}", view::generate_button_caption(true))?;
        out.flush()?;
        let outcome = submission.send(self.workflow.api().as_ref()).await;

        if self.workflow.finish_speech(outcome) {
            writeln!(out, "Speech ready, type 'play' to listen")?;
        } else if let Some(alert) = self.workflow.speech_mut().and_then(|p| p.take_alert()) {
            writeln!(out, "{}", alert)?;
        }
        Ok(())
    }
}
