//! 文本视图
//!
//! 把界面状态渲染成终端可显示的文本

use std::fmt::Write;

use super::audio::AudioElement;
use super::text_to_speech::TextToSpeechPanel;
use super::voice_cloning::VoiceCloningForm;
use super::workflow::{Step, Workflow};

pub const TITLE: &str = "VoiceClone AI";
pub const TAGLINE: &str = "Clone your voice and make it say anything!";

pub fn header() -> String {
    format!("{}\n{}\n", TITLE, TAGLINE)
}

/// 步骤指示，当前步骤用方括号标出
pub fn step_indicator(step: &Step) -> String {
    match step {
        Step::Cloning => "[Clone Voice] ---- Generate Speech".to_string(),
        Step::Generating { .. } => "Clone Voice ---- [Generate Speech]".to_string(),
    }
}

pub fn clone_button_caption(submitting: bool) -> &'static str {
    if submitting {
        "Cloning Voice..."
    } else {
        "Clone Voice"
    }
}

pub fn generate_button_caption(generating: bool) -> &'static str {
    if generating {
        "Generating Speech..."
    } else {
        "Generate Speech"
    }
}

pub fn files_selected(count: usize) -> String {
    format!("{} file(s) selected", count)
}

pub fn render_form(form: &VoiceCloningForm) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Clone Your Voice");
    let _ = writeln!(out, "  Voice Name: {}", form.name());
    let _ = writeln!(out, "  Upload Audio Samples");
    if !form.files().is_empty() {
        let _ = writeln!(out, "  {}", files_selected(form.files().len()));
        for file in form.files() {
            let _ = writeln!(out, "    - {} ({} bytes)", file.file_name, file.data.len());
        }
    }
    let state = if form.can_submit() || form.is_submitting() {
        ""
    } else {
        " (disabled)"
    };
    let _ = writeln!(out, "  <{}>{}", clone_button_caption(form.is_submitting()), state);
    if let Some(error) = form.error() {
        let _ = writeln!(out, "  Error: {}", error);
    }
    out
}

pub fn render_panel<A: AudioElement>(panel: &TextToSpeechPanel<A>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Generate Speech");
    let _ = writeln!(out, "  Enter Text: {}", panel.text());
    let state = if panel.can_submit() || panel.is_generating() {
        ""
    } else {
        " (disabled)"
    };
    let _ = writeln!(
        out,
        "  <{}>{}",
        generate_button_caption(panel.is_generating()),
        state
    );
    if panel.audio_url().is_some() {
        let _ = writeln!(out, "  Generated Speech:");
        let _ = writeln!(
            out,
            "    [{}] [Reset]  {:.1}s",
            if panel.is_playing() { "Pause" } else { "Play" },
            panel.element().current_time()
        );
    }
    out
}

pub fn render<A: AudioElement>(workflow: &Workflow<A>) -> String {
    let mut out = step_indicator(&workflow.step());
    out.push('\n');
    match workflow.speech() {
        Some(panel) => out.push_str(&render_panel(panel)),
        None => out.push_str(&render_form(workflow.form())),
    }
    out
}
