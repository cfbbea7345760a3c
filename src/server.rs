// SCRIPTFORGE API Server - HTTP Surface for Script Generation
// Copyright (c) 2026 ScriptForge | SCRIPTFORGE

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::script::export::{
    build_shot_list, build_storyboard, build_subtitles, build_voiceover, SHOT_LIST_FILENAME,
    STORYBOARD_FILENAME, SUBTITLE_FILENAME, VOICEOVER_FILENAME,
};
use crate::script::extract::force_json;
use crate::script::lint::lint;
use crate::script::model::Script;
use crate::script::normalize::normalize;
use crate::script::prompt;
use crate::state::AppState;

pub const ALL_FORMATS: &[&str] = &["storyboard", "captions", "voiceover", "shotlist"];

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/generate", post(generate))
        .route("/lint", post(lint_script))
        .route("/improve", post(improve))
        .route("/export", post(export))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

pub async fn start_server(port: u16, state: AppState) {
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("[SERVER] ScriptForge API running on http://127.0.0.1:{}", port);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn home() -> Json<Value> {
    Json(json!({ "message": "Script-maker service is running!" }))
}

/// Accepts either `{"script": {...}}` or the Script fields at the top level.
fn extract_script(body: &Value) -> Option<Script> {
    if let Some(nested) = body.get("script") {
        if nested.is_object() {
            return Script::from_model_value(nested.clone());
        }
        return None;
    }
    if body.get("sections").is_some() || body.get("title").is_some() {
        return Script::from_model_value(body.clone());
    }
    None
}

fn missing_script_error() -> Json<Value> {
    Json(json!({ "error": "champ 'script' manquant ou invalide" }))
}

async fn generate(State(state): State<AppState>, Json(body): Json<Value>) -> Json<Value> {
    let topic = body
        .get("topic")
        .and_then(Value::as_str)
        .unwrap_or("psychologie")
        .to_string();
    let style = body
        .get("style")
        .and_then(Value::as_str)
        .unwrap_or("viral")
        .to_string();
    let duration_sec = body.get("duration_sec").and_then(Value::as_i64).unwrap_or(45);

    info!("[GENERATE] topic='{}' style={} duration={}s", topic, style, duration_sec);

    let prompt = prompt::build_generation_prompt(&topic, &style, duration_sec);
    let raw = match state.llm.generate(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!("[GENERATE] model call failed, degrading: {}", e);
            String::new()
        }
    };

    // Whatever came back, the response always carries a usable script: an
    // unrecoverable payload degrades to the hard-coded skeleton, never 5xx.
    let mut script = force_json(&raw)
        .ok()
        .and_then(Script::from_model_value)
        .unwrap_or_else(|| {
            warn!("[GENERATE] model output unusable, using skeleton script");
            Script::skeleton(&topic, &style, duration_sec)
        });
    normalize(&mut script, &style, duration_sec, &topic);

    Json(json!({
        "topic": topic,
        "style": style,
        "duration_sec": script.duration_sec,
        "script": script,
        "raw": raw,
    }))
}

async fn lint_script(Json(body): Json<Value>) -> Json<Value> {
    let Some(script) = extract_script(&body) else {
        return missing_script_error();
    };

    // Set semantics on the issue list: duplicates collapse, order is the
    // set's, not the check order.
    let issues: BTreeSet<String> = lint(&script).into_iter().collect();

    let mut fixed = script.clone();
    let style = fixed.style.clone();
    let duration_sec = fixed.duration_sec;
    let topic = fixed.title.clone();
    normalize(&mut fixed, &style, duration_sec, &topic);

    Json(json!({ "issues": issues, "fixed_script": fixed }))
}

async fn improve(State(state): State<AppState>, Json(body): Json<Value>) -> Json<Value> {
    let Some(original) = extract_script(&body) else {
        return missing_script_error();
    };

    let style = body
        .get("style")
        .and_then(Value::as_str)
        .unwrap_or(&original.style)
        .to_string();
    let duration_sec = body
        .get("duration_sec")
        .and_then(Value::as_i64)
        .unwrap_or(original.duration_sec);
    let topic = body
        .get("topic")
        .and_then(Value::as_str)
        .unwrap_or(&original.title)
        .to_string();

    let issues: Vec<String> = lint(&original)
        .into_iter()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();

    info!("[IMPROVE] style={} duration={}s issues={}", style, duration_sec, issues.len());

    let prompt = prompt::build_improve_prompt(&original, &issues, &style, duration_sec);
    let raw = match state.llm.generate(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!("[IMPROVE] model call failed, keeping original: {}", e);
            String::new()
        }
    };

    // Unusable model output keeps the caller's script; normalization still
    // runs so the response always satisfies the structural invariants.
    let mut improved = force_json(&raw)
        .ok()
        .and_then(Script::from_model_value)
        .unwrap_or_else(|| original.clone());
    normalize(&mut improved, &style, duration_sec, &topic);

    Json(json!({
        "improved": improved,
        "issues": issues,
        "raw_model_output": raw,
    }))
}

async fn export(Json(body): Json<Value>) -> Json<Value> {
    let Some(mut script) = extract_script(&body) else {
        return missing_script_error();
    };

    let formats: Vec<String> = match body.get("formats").and_then(Value::as_array) {
        Some(list) => list
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        None => ALL_FORMATS.iter().map(|f| f.to_string()).collect(),
    };

    // Exporters assume a normalized script (visual_style present, CTA last).
    let style = script.style.clone();
    let duration_sec = script.duration_sec;
    let topic = script.title.clone();
    normalize(&mut script, &style, duration_sec, &topic);

    let mut exports = serde_json::Map::new();
    for format in &formats {
        let (content, filename) = match format.as_str() {
            "captions" => (build_subtitles(&script), SUBTITLE_FILENAME),
            "voiceover" => (build_voiceover(&script), VOICEOVER_FILENAME),
            "shotlist" => (build_shot_list(&script), SHOT_LIST_FILENAME),
            "storyboard" => (build_storyboard(&script), STORYBOARD_FILENAME),
            other => {
                warn!("[EXPORT] unknown format '{}' skipped", other);
                continue;
            }
        };
        exports.insert(format.clone(), Value::String(content));
        exports.insert(format!("{format}_filename"), Value::String(filename.to_string()));
    }

    Json(json!({
        "exports": exports,
        "meta": {
            "title": script.title,
            "style": script.style,
            "duration_sec": script.duration_sec,
        },
    }))
}
