// SCRIPTFORGE Prompt Builder - Instruction Assembly for the Model
// Copyright (c) 2026 ScriptForge | SCRIPTFORGE
//
// Parameters are interpolated verbatim, no escaping: the destination is a
// free-text completion request, and output compatibility with existing
// prompts matters more than sanitizing text we do not trust anyway.

use crate::script::model::Script;

/// Fixed rule block: French only, JSON only, schema description, and the
/// behavioral rules for each style.
const SCRIPT_RULES: &str = r##"Tu es un scénariste expert en vidéos courtes (TikTok, Shorts, Reels).

Règles strictes :
- Réponds UNIQUEMENT en français.
- Réponds UNIQUEMENT avec un objet JSON valide. Pas de texte autour, pas de balises markdown, pas de commentaires.
- Le JSON doit suivre exactement ce schéma :
{
  "title": "titre accrocheur",
  "style": "viral | docu | quiz",
  "duration_sec": 45,
  "sections": [
    {"type": "hook", "time": "0-5", "text": "...", "caption": "max 8 mots", "broll": "...", "pattern_interrupt": "..."},
    {"type": "point", "time": "5-20", "text": "...", "caption": "...", "example": "...", "micro_action": "..."},
    {"type": "proof", "time": "20-35", "text": "...", "caption": "...", "source": "..."},
    {"type": "cta", "time": "35-45", "text": "...", "caption": "..."}
  ],
  "visual_style": {"luminosity": "...", "contrast": "...", "color_palette": "...", "transitions": ["..."], "effects": ["..."], "overall_style": "..."},
  "hashtags": ["#..."],
  "disclaimer": "...",
  "risk_flags": [],
  "metrics_hypothesis": [],
  "reuse_assets": false
}

Règles par style :
- viral : hook choc dans la première seconde, rythme rapide, une idée par section, CTA qui demande un like et un abonnement.
- docu : ton posé, faits vérifiables, au moins une source citée dans la section proof.
- quiz : le hook pose une question avec trois options A) B) C), la réponse arrive avant le CTA, le CTA demande de voter en commentaire."##;

pub fn build_generation_prompt(topic: &str, style: &str, duration_sec: i64) -> String {
    format!(
        "{SCRIPT_RULES}\n\nSujet : {topic}\nStyle : {style}\nDurée cible : {duration_sec} secondes\nGénère le script JSON maintenant."
    )
}

/// Improve prompt: the current script plus the lint issues to address, same
/// output contract as generation.
pub fn build_improve_prompt(
    script: &Script,
    issues: &[String],
    style: &str,
    duration_sec: i64,
) -> String {
    let script_json =
        serde_json::to_string_pretty(script).unwrap_or_else(|_| "{}".to_string());
    let issue_block = if issues.is_empty() {
        "- Aucun problème détecté : améliore le rythme et la clarté.".to_string()
    } else {
        issues
            .iter()
            .map(|i| format!("- {i}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "{SCRIPT_RULES}\n\nVoici un script existant à améliorer :\n{script_json}\n\nProblèmes à corriger :\n{issue_block}\n\nStyle : {style}\nDurée cible : {duration_sec} secondes\nRenvoie le script JSON complet corrigé maintenant."
    )
}
