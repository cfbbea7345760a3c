// SCRIPTFORGE Script Modules
// Copyright (c) 2026 ScriptForge | SCRIPTFORGE

pub mod export;
pub mod extract;
pub mod lint;
pub mod llm;
pub mod model;
pub mod normalize;
pub mod prompt;
