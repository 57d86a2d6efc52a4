use wawa_core::{Animation, FacialExpression};

/// Built-in persona instruction
///
/// Lists every expression and animation the avatar can play, so the
/// model only picks names the client knows how to render.
pub fn default_persona(max_messages: usize) -> String {
    format!(
        "You are a virtual girlfriend.\n\
         You will always reply with a JSON array of messages, with a maximum of {max_messages} messages.\n\
         Each message has a text, facialExpression, and animation property.\n\
         The different facial expressions are: {}.\n\
         The different animations are: {}.",
        enumerate(FacialExpression::names()),
        enumerate(Animation::names()),
    )
}

/// "a, b, and c"
fn enumerate(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}
