// SCRIPTFORGE Exporters - Text Artifacts From a Normalized Script
// Copyright (c) 2026 ScriptForge | SCRIPTFORGE
//
// Four independent pure transforms: subtitle track, voiceover transcript,
// shot list and storyboard. None of them raise on missing optional fields;
// absent values become empty text. Only the time parser has an explicit
// fallback for malformed ranges.

use crate::script::model::{Script, Section, NARRATED_KINDS};

pub const SUBTITLE_FILENAME: &str = "captions.srt";
pub const VOICEOVER_FILENAME: &str = "voiceover.txt";
pub const SHOT_LIST_FILENAME: &str = "shotlist.csv";
pub const STORYBOARD_FILENAME: &str = "storyboard.md";

pub const VOICEOVER_SIGNOFF: &str = "Abonne-toi pour ne rien rater.";

/// Fallback cue range for a time field that does not parse as "start-end".
const FALLBACK_RANGE: (u32, u32) = (0, 3);

/// Parse a "start-end" range in seconds, accepting a hyphen or an en-dash
/// as separator. Malformed input falls back to (0, 3).
pub fn parse_time_range(time: &str) -> (u32, u32) {
    let mut parts = time.splitn(2, ['-', '–']);
    let start = parts.next().map(str::trim).and_then(|p| p.parse::<u32>().ok());
    let end = parts.next().map(str::trim).and_then(|p| p.parse::<u32>().ok());
    match (start, end) {
        (Some(start), Some(end)) => (start, end),
        _ => FALLBACK_RANGE,
    }
}

/// SRT timestamp: HH:MM:SS,000.
fn format_timestamp(total_secs: u32) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{secs:02},000")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Subtitle track: one numbered cue per section, caption preferred over
/// text, sections whose resulting text is empty are skipped.
pub fn build_subtitles(script: &Script) -> String {
    let mut out = String::new();
    let mut cue = 1;
    for section in &script.sections {
        let raw = if section.caption.trim().is_empty() { &section.text } else { &section.caption };
        let line = collapse_whitespace(raw);
        if line.is_empty() {
            continue;
        }
        let (start, end) = parse_time_range(&section.time);
        out.push_str(&format!(
            "{cue}\n{} --> {}\n{line}\n\n",
            format_timestamp(start),
            format_timestamp(end)
        ));
        cue += 1;
    }
    out
}

/// Voiceover transcript: title line, narrated sections in document order,
/// fixed sign-off.
pub fn build_voiceover(script: &Script) -> String {
    let mut lines = vec![script.title.clone(), String::new()];
    for section in &script.sections {
        if NARRATED_KINDS.contains(&section.kind.as_str()) && !section.text.trim().is_empty() {
            lines.push(section.text.clone());
            lines.push(String::new());
        }
    }
    lines.push(VOICEOVER_SIGNOFF.to_string());
    lines.join("\n")
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn shot_action(section: &Section) -> String {
    if !section.caption.trim().is_empty() {
        return section.caption.clone();
    }
    section.text.chars().take(60).collect()
}

/// Shot list: CSV with one row per section.
pub fn build_shot_list(script: &Script) -> String {
    let mut out = String::from("time_start,time_end,type,action,broll,notes\n");
    for section in &script.sections {
        let (start, end) = parse_time_range(&section.time);
        let notes = section
            .pattern_interrupt
            .clone()
            .or_else(|| section.micro_action.clone())
            .unwrap_or_default();
        let broll = section.broll.clone().unwrap_or_default();
        out.push_str(&format!(
            "{start},{end},{},{},{},{}\n",
            csv_field(&section.kind),
            csv_field(&shot_action(section)),
            csv_field(&broll),
            csv_field(&notes)
        ));
    }
    out
}

/// Storyboard: a headed Markdown outline of the whole script.
pub fn build_storyboard(script: &Script) -> String {
    let mut out = format!("# {}\n\n", script.title);

    out.push_str("## Style visuel\n");
    if let Some(vs) = &script.visual_style {
        out.push_str(&format!("- Luminosité : {}\n", vs.luminosity));
        out.push_str(&format!("- Contraste : {}\n", vs.contrast));
        out.push_str(&format!("- Palette : {}\n", vs.color_palette));
        out.push_str(&format!("- Transitions : {}\n", vs.transitions.join(", ")));
        out.push_str(&format!("- Effets : {}\n", vs.effects.join(", ")));
        out.push_str(&format!("- Style global : {}\n", vs.overall_style));
    }
    out.push('\n');

    for (idx, section) in script.sections.iter().enumerate() {
        let (start, end) = parse_time_range(&section.time);
        out.push_str(&format!(
            "## {}. {} ({start}-{end}s)\n",
            idx + 1,
            section.kind.to_uppercase()
        ));
        out.push_str(&format!("**Texte :** {}\n", section.text));
        out.push_str(&format!("**Caption :** {}\n", section.caption));
        out.push_str(&format!(
            "**B-roll :** {}\n",
            section.broll.clone().unwrap_or_default()
        ));
        let notes = section
            .pattern_interrupt
            .clone()
            .or_else(|| section.micro_action.clone())
            .unwrap_or_default();
        out.push_str(&format!("**Notes :** {notes}\n\n"));
    }

    out.push_str(&script.hashtags.join(" "));
    out.push('\n');
    out
}
