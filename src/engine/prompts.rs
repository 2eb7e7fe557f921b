// src/engine/prompts.rs
// Prompt builders for the humanization passes.

pub fn deep_pass_one(input: &str) -> String {
    format!(
        "Rewrite this to be 100% human-like, undetectable by AI detectors. \
         Use tons of contractions, casual markers (honestly, look, i mean, you know, like), \
         short punchy sentences mixed with longer ones, casual vocabulary, remove AI phrases. \
         Sound like talking to a friend. Original: \"{input}\" Rewrite only:"
    )
}

pub fn deep_pass_two(input: &str) -> String {
    format!(
        "Make this even more human. Add more contractions, more casual markers, \
         shorter varied sentences. Text: \"{input}\" Output only:"
    )
}

pub fn deep_pass_three(input: &str) -> String {
    format!("Final polish - keep super casual. Text: \"{input}\" Output only:")
}

pub fn shallow_pass(input: &str) -> String {
    format!(
        "Rewrite to sound human. Use tons of contractions, casual language. \
         Text: \"{input}\" Output only:"
    )
}
