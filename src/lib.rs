// SCRIPTFORGE Library Root
// Copyright (c) 2026 ScriptForge | SCRIPTFORGE

pub mod script;
pub mod server;
pub mod state;
