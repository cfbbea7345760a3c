use scriptforge_core::script::export::{
    build_shot_list, build_storyboard, build_subtitles, build_voiceover, parse_time_range,
    VOICEOVER_SIGNOFF,
};
use scriptforge_core::script::extract::force_json;
use scriptforge_core::script::model::{Script, Section, VisualStyle};
use scriptforge_core::script::normalize::normalize;

fn sample_script() -> Script {
    let mut script = Script {
        title: "Le Biais de Confirmation".to_string(),
        style: "docu".to_string(),
        duration_sec: 45,
        sections: vec![
            Section::new("hook", "0-5", "Ton cerveau filtre la réalité.", "Ton cerveau te ment"),
            Section::new("point", "5-15", "Tu retiens ce qui confirme ton avis.", "Tu tries les faits"),
        ],
        ..Script::default()
    };
    normalize(&mut script, "docu", 45, "biais de confirmation");
    script
}

#[test]
fn time_range_parses_start_end_seconds() {
    assert_eq!(parse_time_range("5-15"), (5, 15));
    assert_eq!(parse_time_range(" 5 - 15 "), (5, 15));
    assert_eq!(parse_time_range("5–15"), (5, 15));
}

#[test]
fn malformed_time_range_falls_back() {
    assert_eq!(parse_time_range("abc"), (0, 3));
    assert_eq!(parse_time_range(""), (0, 3));
    assert_eq!(parse_time_range("5-"), (0, 3));
}

#[test]
fn subtitles_emit_numbered_timecoded_cues() {
    let script = sample_script();
    let srt = build_subtitles(&script);

    assert!(srt.starts_with("1\n00:00:00,000 --> 00:00:05,000\nTon cerveau te ment\n"));
    assert!(srt.contains("00:00:05,000 --> 00:00:15,000"));
}

#[test]
fn subtitles_fall_back_to_text_and_skip_empty() {
    let mut script = sample_script();
    script.sections.insert(1, Section::new("point", "abc", "Un   texte\navec blancs", ""));
    script.sections.insert(2, Section::new("point", "5-8", "", ""));
    let srt = build_subtitles(&script);

    // Malformed time falls back to 0-3, caption falls back to collapsed text.
    assert!(srt.contains("00:00:00,000 --> 00:00:03,000\nUn texte avec blancs\n"));
    // The empty section produced no cue, numbering stays sequential.
    let cue_count = srt.matches(" --> ").count();
    assert!(srt.contains(&format!("{cue_count}\n")));
    assert!(!srt.contains(&format!("{}\n", cue_count + 1)));
}

#[test]
fn voiceover_has_title_narration_and_signoff() {
    let mut script = sample_script();
    script.sections.push(Section::new("broll_note", "0-0", "jamais lu à voix haute", ""));
    let vo = build_voiceover(&script);

    assert!(vo.starts_with("Le Biais de Confirmation\n"));
    assert!(vo.contains("Ton cerveau filtre la réalité."));
    assert!(vo.contains("Tu retiens ce qui confirme ton avis."));
    assert!(!vo.contains("jamais lu à voix haute"));
    assert!(vo.ends_with(VOICEOVER_SIGNOFF));
}

#[test]
fn shot_list_is_csv_with_one_row_per_section() {
    let mut script = sample_script();
    script.sections[0].broll = Some("archives, gros plan".to_string());
    script.sections[0].pattern_interrupt = Some("zoom rapide".to_string());
    let csv = build_shot_list(&script);

    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("time_start,time_end,type,action,broll,notes"));
    assert_eq!(csv.lines().count(), script.sections.len() + 1);

    let hook_row = csv.lines().nth(1).unwrap();
    assert!(hook_row.starts_with("0,5,hook,"));
    // Comma-bearing fields are quoted.
    assert!(hook_row.contains("\"archives, gros plan\""));
    assert!(hook_row.ends_with("zoom rapide"));
}

#[test]
fn shot_list_action_truncates_long_text() {
    let mut script = sample_script();
    let long_text = "x".repeat(200);
    script.sections.push(Section::new("point", "15-20", &long_text, ""));
    let csv = build_shot_list(&script);

    let row = csv.lines().last().unwrap();
    assert!(row.contains(&"x".repeat(60)));
    assert!(!row.contains(&"x".repeat(61)));
}

#[test]
fn storyboard_outlines_style_sections_and_hashtags() {
    let script = sample_script();
    let board = build_storyboard(&script);

    assert!(board.starts_with("# Le Biais de Confirmation\n"));
    assert!(board.contains("## Style visuel\n"));
    assert!(board.contains("## 1. HOOK (0-5s)\n"));
    assert!(board.contains("**Texte :** Ton cerveau filtre la réalité.\n"));
    assert!(board.contains("#documentaire"));
}

#[test]
fn storyboard_never_raises_on_missing_optionals() {
    let script = Script {
        title: "Vide".to_string(),
        sections: vec![Section::new("point", "", "", "")],
        visual_style: Some(VisualStyle::default()),
        ..Script::default()
    };
    let board = build_storyboard(&script);
    assert!(board.contains("**B-roll :** \n"));
}

#[test]
fn force_json_round_trips_a_well_formed_script() {
    let script = sample_script();
    let serialized = serde_json::to_string(&script).unwrap();
    let value = force_json(&serialized).unwrap();
    let back = Script::from_model_value(value).unwrap();
    assert_eq!(back, script);
}

#[test]
fn force_json_recovers_an_embedded_object() {
    let wrapped = "Voici le script demandé :\n```json\n{\"title\": \"Test\"}\n```merci";
    let value = force_json(wrapped).unwrap();
    assert_eq!(value["title"], "Test");
}

#[test]
fn force_json_propagates_unrecoverable_input() {
    assert!(force_json("pas de json ici").is_err());
    assert!(force_json("{toujours pas valide").is_err());
}
