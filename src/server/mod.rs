pub mod gemini;
pub mod state;
