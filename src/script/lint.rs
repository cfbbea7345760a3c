// SCRIPTFORGE Linter - Advisory Checks on a Script
// Copyright (c) 2026 ScriptForge | SCRIPTFORGE

use crate::script::model::{Script, KIND_CTA};
use crate::script::normalize::cta_keywords_present;

pub const MAX_CAPTION_WORDS: usize = 8;

/// Read-only diagnostic pass. Returns human-readable French messages, never
/// mutates the script and never blocks a response; callers dedup the list
/// with set semantics.
pub fn lint(script: &Script) -> Vec<String> {
    let mut issues = Vec::new();

    match script.sections.iter().find(|s| s.kind == KIND_CTA) {
        Some(cta) if cta_keywords_present(&cta.text) => {}
        Some(_) => issues.push(
            "CTA incomplet : le texte doit demander un like et un abonnement (abonne/suis/suivre)."
                .to_string(),
        ),
        None => issues.push("Aucune section CTA trouvée.".to_string()),
    }

    for section in &script.sections {
        let words = section.caption.split_whitespace().count();
        if words > MAX_CAPTION_WORDS {
            issues.push(format!(
                "Caption trop longue ({words} mots, max {MAX_CAPTION_WORDS}) dans la section '{}'.",
                section.kind
            ));
        }
    }

    if script.visual_style.is_none() {
        issues.push("visual_style manquant ou mal formé.".to_string());
    }

    if script.hashtags.is_empty() {
        issues.push("Aucun hashtag défini.".to_string());
    }

    issues
}
