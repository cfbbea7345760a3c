use scriptforge_core::script::model::{Script, Section};
use scriptforge_core::script::normalize::{
    normalize, suggest_hashtags, DEFAULT_CTA_TEXT, QUIZ_CTA_TEXT,
};

fn bare_script() -> Script {
    Script {
        title: "Le Biais de Confirmation".to_string(),
        style: "viral".to_string(),
        duration_sec: 45,
        sections: vec![
            Section::new("point", "5-15", "Premier point sur le biais.", "Un seul point"),
        ],
        ..Script::default()
    }
}

#[test]
fn missing_hook_is_inserted_at_front() {
    let mut script = bare_script();
    normalize(&mut script, "viral", 45, "biais de confirmation");
    assert_eq!(script.sections[0].kind, "hook");
    assert_eq!(
        script.sections.iter().filter(|s| s.kind == "hook").count(),
        1
    );
}

#[test]
fn at_least_two_points_after_repair() {
    let mut script = bare_script();
    normalize(&mut script, "viral", 45, "biais");
    assert!(script.sections.iter().filter(|s| s.kind == "point").count() >= 2);
}

#[test]
fn proof_is_appended_when_missing() {
    let mut script = bare_script();
    normalize(&mut script, "viral", 45, "biais");
    assert!(script.sections.iter().any(|s| s.kind == "proof"));
}

#[test]
fn exactly_one_cta_with_keywords() {
    let mut script = bare_script();
    script.sections.push(Section::new("cta", "40-45", "Merci", ""));
    script.sections.push(Section::new("cta", "40-45", "Merci encore", ""));
    normalize(&mut script, "viral", 45, "biais");

    let ctas: Vec<_> = script.sections.iter().filter(|s| s.kind == "cta").collect();
    assert_eq!(ctas.len(), 1);
    let lower = ctas[0].text.to_lowercase();
    assert!(lower.contains("like"));
    assert!(lower.contains("abonne") || lower.contains("suis") || lower.contains("suivre"));
}

#[test]
fn compliant_cta_text_is_preserved() {
    let mut script = bare_script();
    script.sections.push(Section::new(
        "cta",
        "40-45",
        "LIKE la vidéo et suis-moi pour la partie 2 !",
        "Partie 2",
    ));
    normalize(&mut script, "viral", 45, "biais");
    let cta = script.sections.iter().find(|s| s.kind == "cta").unwrap();
    assert_eq!(cta.text, "LIKE la vidéo et suis-moi pour la partie 2 !");
    assert_ne!(cta.text, DEFAULT_CTA_TEXT);
}

#[test]
fn cta_is_moved_to_last_position() {
    let mut script = bare_script();
    script
        .sections
        .insert(0, Section::new("cta", "40-45", "Like et abonne-toi !", "CTA"));
    normalize(&mut script, "viral", 45, "biais");
    assert_eq!(script.sections.last().unwrap().kind, "cta");
}

#[test]
fn quiz_hook_gets_abc_options_and_fixed_cta() {
    let mut script = bare_script();
    script
        .sections
        .insert(0, Section::new("hook", "0-5", "Quelle est la bonne réponse ?", "Devine !"));
    normalize(&mut script, "quiz", 45, "biais");

    let hook = script.sections.iter().find(|s| s.kind == "hook").unwrap();
    let a = hook.text.find('A').expect("option A present");
    let b = hook.text[a..].find('B').map(|i| a + i).expect("option B after A");
    assert!(hook.text[b..].contains('C'), "option C after B");

    assert_eq!(script.sections.last().unwrap().text, QUIZ_CTA_TEXT);
}

#[test]
fn quiz_hook_with_existing_options_is_untouched() {
    let existing = "Tu choisis quoi : A) la fuite B) la lutte C) le déni ?";
    let mut script = bare_script();
    script
        .sections
        .insert(0, Section::new("hook", "0-5", existing, "A, B ou C ?"));
    normalize(&mut script, "quiz", 45, "biais");
    let hook = script.sections.iter().find(|s| s.kind == "hook").unwrap();
    assert_eq!(hook.text, existing);
}

#[test]
fn duration_is_clamped_not_rejected() {
    for (input, expected) in [(10, 30), (90, 60), (45, 45)] {
        let mut script = bare_script();
        normalize(&mut script, "viral", input, "biais");
        assert_eq!(script.duration_sec, expected, "duration {input}");
    }
}

#[test]
fn normalize_is_idempotent_on_derived_fields() {
    let mut once = bare_script();
    normalize(&mut once, "docu", 50, "biais de confirmation");

    let mut twice = once.clone();
    normalize(&mut twice, "docu", once.duration_sec, "biais de confirmation");

    assert_eq!(once.visual_style, twice.visual_style);
    assert_eq!(once.duration_sec, twice.duration_sec);
    assert_eq!(once.hashtags, twice.hashtags);
}

#[test]
fn visual_style_default_is_filled_per_style() {
    let mut script = bare_script();
    script.visual_style = None;
    normalize(&mut script, "docu", 45, "biais");
    let vs = script.visual_style.as_ref().unwrap();
    assert!(!vs.overall_style.is_empty());
    assert!(!vs.transitions.is_empty());

    // Unknown styles take the named fallback branch, same as quiz.
    let mut unknown = bare_script();
    normalize(&mut unknown, "cinematique", 45, "biais");
    let mut quiz = bare_script();
    normalize(&mut quiz, "quiz", 45, "biais");
    assert_eq!(unknown.visual_style, quiz.visual_style);
}

#[test]
fn docu_hashtags_keep_base_style_and_derived_tags() {
    let tags = suggest_hashtags("Le Biais de Confirmation", "docu");

    assert!(tags.len() <= 8);
    for base in ["#shorts", "#apprendre", "#psychologie", "#culture"] {
        assert!(tags.contains(&base.to_string()), "missing {base}");
    }
    for docu in ["#documentaire", "#histoire", "#savoir"] {
        assert!(tags.contains(&docu.to_string()), "missing {docu}");
    }
    assert!(tags.contains(&"#lebiaisdeconfirmation".to_string()));

    let mut deduped = tags.clone();
    deduped.dedup();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), tags.len(), "duplicate hashtags");
}

#[test]
fn hashtags_are_recomputed_not_trusted() {
    let mut script = bare_script();
    script.hashtags = vec!["#garbage".to_string(); 20];
    normalize(&mut script, "viral", 45, "biais");
    assert!(script.hashtags.len() <= 8);
    assert!(!script.hashtags.contains(&"#garbage".to_string()));
}
