// Chat assistant: rule-based intent cascade over the user's last analysis.
// Every reply is a fixed template filled from the taxonomy and the session
// snapshot; nothing is generated.

pub mod handlers;
pub mod intents;
pub mod responder;
pub mod similarity;
