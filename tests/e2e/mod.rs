// End-to-end tests for the Silero TTS Backend API
//
// Each test boots the real router on an ephemeral port, backed by:
// - a fresh temporary cache directory (and static directory for the web UI)
// - a fake Silero model server (axum) that renders deterministic audio and
//   records every call, so tests can count synthesis invocations
//
// Tests are isolated from each other and run in parallel.

mod test_speakers;
mod test_static;
